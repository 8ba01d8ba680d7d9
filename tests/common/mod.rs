#![allow(dead_code)]

/// Initialise tracing for tests; see `crondag_test_utils::init_tracing`.
pub fn init_tracing() {
    crondag_test_utils::init_tracing();
}
