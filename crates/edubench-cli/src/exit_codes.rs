/// Exit code contract: 0 = success, 1 = runtime failure (aborted batch),
/// 2 = configuration or load error.
pub const EXIT_SUCCESS: i32 = 0;
pub const RUNTIME_ERROR: i32 = 1;
pub const CONFIG_ERROR: i32 = 2;
