//! Meal recommendation service.
//!
//! Ranks catalog dishes for a user's meal slot from their stored preferences and
//! the last week of meal history, and serves the result over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
