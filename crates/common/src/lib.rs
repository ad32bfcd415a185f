//! Common utilities and shared types for WeTube.
//!
//! This crate provides foundational components used across all WeTube crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use wetube_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id = IdGenerator::new().generate();
//!     println!("Serving {} with new id {}", config.server.url, id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
