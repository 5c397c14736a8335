pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod gate;
pub mod poller;
pub mod session;
