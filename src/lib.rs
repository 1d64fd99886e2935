pub mod api;
pub mod config;
pub mod document;
pub mod dto;
pub mod error;
pub mod format;
pub mod handlers;
pub mod page;
pub mod telemetry;
