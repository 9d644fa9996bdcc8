pub mod app;
pub mod args;
pub mod auth;
pub mod commands;
mod config;
mod error;
pub mod export;
pub mod model;
pub mod persist;
mod session;
pub mod store;
pub mod summary;
pub mod tracker;
mod utils;
pub mod view;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{error_type, Error, ErrorType, IntoResult, Result};
pub use tracker::Tracker;
