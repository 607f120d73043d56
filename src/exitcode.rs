/// Standard Unix exit codes for the bmclient CLI application.
///
/// These codes follow the BSD convention where possible.
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, missing required parameters, etc.
pub const USAGE: i32 = 64;

/// The bookmark service could not be reached or answered with an error
pub const UNAVAILABLE: i32 = 69;
