//! Periodic angle bookkeeping in degrees.

/// Full turn in degrees.
pub const FULL_TURN: f32 = 360.0;

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Handles negative input and the rounding case where `rem_euclid` lands
/// exactly on 360.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Advance an angle by `speed * dt` degrees, keeping it in `[0, 360)`.
pub fn advance(angle: f32, speed_deg_s: f32, dt: f32) -> f32 {
    wrap_degrees(angle + speed_deg_s * dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_identity_in_range() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(123.5), 123.5);
    }

    #[test]
    fn test_wrap_full_turns() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((wrap_degrees(725.0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_negative() {
        assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((wrap_degrees(-450.0) - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_below_full_turn() {
        let wrapped = wrap_degrees(-1e-7);
        assert!((0.0..FULL_TURN).contains(&wrapped), "got {wrapped}");
    }

    #[test]
    fn test_advance_stays_in_range_over_many_steps() {
        let mut angle = 0.0;
        for step in 0..10_000 {
            let dt = 0.001 + (step % 17) as f32 * 0.37;
            angle = advance(angle, 97.3, dt);
            assert!((0.0..FULL_TURN).contains(&angle), "step {step}: {angle}");
        }
    }
}
