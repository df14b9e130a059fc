/// Standard Unix exit codes for the linkshelf CLI.
///
/// These codes follow the BSD convention (sysexits.h).
///
/// Successful termination
pub const SUCCESS: i32 = 0;

/// Command line usage error - invalid arguments, failed command, etc.
pub const USAGE: i32 = 64;

/// Missing or rejected session
pub const NOPERM: i32 = 77;
