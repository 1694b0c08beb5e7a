//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "SliceGen";

/// The binary name used in command examples.
pub const APP_BINARY_NAME: &str = "slicegen";

/// Directory name under the platform config directory.
pub const APP_DATA_DIR: &str = "SliceGen";

/// Version stamped into generated file headers.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Column at which generated enum lists wrap.
pub const CLIP_LINE: usize = 72;

/// Log file name for batched asset errors.
pub const LOG_FILE_NAME: &str = "slicegen.log";
