//! Exit codes returned by [`run`](crate::run).

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, invalid configuration or a rejected game action.
pub const ERROR: i32 = 2;
