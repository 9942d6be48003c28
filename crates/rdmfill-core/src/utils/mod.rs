//! Utility functions and helper types.

#[cfg(feature = "test-utils")]
pub mod test_utils;
