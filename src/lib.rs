//! BlogHub - a terminal client for reading and commenting on BlogHub posts
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod markup;
pub mod models;
pub mod session;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod views;
