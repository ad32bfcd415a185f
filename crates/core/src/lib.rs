//! Core page logic for WeTube.
//!
//! Page controllers hold the per-page view state (the listing grid, the
//! video detail page) and talk to the store only through the injected
//! [`Backend`] capability. Sessions are resolved by one process-wide
//! [`SessionContext`].

pub mod services;

pub use services::*;
