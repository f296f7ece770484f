//! HTTP request handlers for the dashboard API

pub mod health;
pub mod stats;
pub mod upload;
