//! Process exit codes. Part of the public CLI contract.

pub const OK: i32 = 0;
pub const NOT_VERIFIED: i32 = 1; // At least one certificate pending, invalid, rejected or not found
pub const CONFIG_ERROR: i32 = 2; // Unreadable config or input file
