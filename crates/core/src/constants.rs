//! Constants used throughout the checked workspace
// Environment variable names
pub const CARRIER_RAISE_VAR: &str = "CHECKED_CARRIER_RAISE";
pub const CARRIER_BACKTRACE_VAR: &str = "CHECKED_CARRIER_BACKTRACE";

// Tracing targets
pub const CARRIER_TRACE_TARGET: &str = "checked::carrier";
pub const CONFIG_TRACE_TARGET: &str = "checked::config";

// Filter used when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Accepted spellings for boolean settings
pub const TRUTHY_VALUES: &[&str] = &["1", "true", "yes", "on"];
pub const FALSY_VALUES: &[&str] = &["0", "false", "no", "off"];
