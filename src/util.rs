//! Utility functions and types.

use std::time::Duration;

/// Converts a millisecond setting to a [`Duration`]. Negative values are
/// clamped to zero.
pub fn millis_to_duration(ms: i32) -> Duration {
    Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_to_duration() {
        assert_eq!(millis_to_duration(30000), Duration::from_secs(30));
        assert_eq!(millis_to_duration(0), Duration::ZERO);
        assert_eq!(millis_to_duration(-1), Duration::ZERO);
    }
}
