//! Structured logging facility for canonic
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)` or `init_with_filter`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use canonic_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Ownership
//!
//! The library core only emits `tracing::debug!` details. Boundary layers
//! (the settings loader) own the start/end/error lifecycle events.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, init_with_filter, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
