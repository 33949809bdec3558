pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod state;
pub mod users;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
