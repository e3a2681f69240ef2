//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across all logging and error reporting.
//! `tracing` field names are written as identifiers at each call site and must
//! spell the same names; log consumers and tests match on these constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Settings context
pub const FIELD_PATH: &str = "path";
pub const FIELD_PREFIX: &str = "prefix";
pub const FIELD_KEY: &str = "key";

// Collection sizes
pub const FIELD_ENTRY_COUNT: &str = "entry_count";
pub const FIELD_GROUP_COUNT: &str = "group_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
