//! Fixed table mapping numeric keys to animation speed multipliers.

/// Multiplier for each numeric key, indexed by the key's digit.
pub const TIME_SCALE_TABLE: [f32; 10] = [0.0, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.65, 1.85, 2.0];

/// Key selected at startup: nominal speed.
pub const DEFAULT_TIME_SCALE_KEY: u8 = 4;

/// Multiplier for a digit key, or `None` for anything outside 0-9.
pub fn from_key(key: u8) -> Option<f32> {
    TIME_SCALE_TABLE.get(usize::from(key)).copied()
}

/// Real seconds per simulated day at `scale`; `None` when time is frozen.
pub fn seconds_per_day(day_duration: f32, scale: f32) -> Option<f32> {
    (scale > 0.0).then(|| day_duration / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_values() {
        assert_eq!(from_key(0), Some(0.0));
        assert_eq!(from_key(1), Some(0.25));
        assert_eq!(from_key(4), Some(1.0));
        assert_eq!(from_key(7), Some(1.65));
        assert_eq!(from_key(9), Some(2.0));
    }

    #[test]
    fn test_out_of_range_key() {
        assert_eq!(from_key(10), None);
        assert_eq!(from_key(255), None);
    }

    #[test]
    fn test_default_key_is_nominal_speed() {
        assert_eq!(from_key(DEFAULT_TIME_SCALE_KEY), Some(1.0));
    }

    #[test]
    fn test_table_is_monotonic() {
        assert!(TIME_SCALE_TABLE.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_seconds_per_day() {
        assert_eq!(seconds_per_day(10.0, 1.0), Some(10.0));
        assert_eq!(seconds_per_day(10.0, 2.0), Some(5.0));
        assert_eq!(seconds_per_day(10.0, 0.0), None);
    }
}
