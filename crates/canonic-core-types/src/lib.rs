//! Core types shared across canonic facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! facility and by every crate that emits boundary events:
//!
//! - **Field keys**: component, op, event, duration and error fields
//! - **Event names**: start, end, end_error

pub mod schema;
