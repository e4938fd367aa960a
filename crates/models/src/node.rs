//! Explicit Euler update for a single rotating node, in SI units.

/// Advances a node's angular velocity (rad/s) by one tick.
///
/// `friction` is applied first and never carries the node past standstill:
/// a friction torque at or beyond the stopping torque `|ω| · I / dt` brings
/// the node exactly to rest. `drive` is applied on top of that.
/// Torques are in N·m, inertia in kg·m², `dt` in seconds.
pub(crate) fn advance(velocity: f64, inertia: f64, drive: f64, friction: f64, dt: f64) -> f64 {
    let stopping = velocity.abs() * inertia / dt;
    let coasted = if friction * velocity <= 0.0 && friction.abs() >= stopping {
        0.0
    } else {
        velocity + friction / inertia * dt
    };
    let coasted = if coasted * velocity < 0.0 {
        0.0
    } else {
        coasted
    };
    coasted + drive / inertia * dt
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn explicit_euler() {
        // (10 N·m − 2 N·m) / 0.5 kg·m² · 0.1 s = 1.6 rad/s
        assert_relative_eq!(advance(4.0, 0.5, 10.0, -2.0, 0.1), 5.6);
    }

    #[test]
    fn stopping_torque_stops_exactly() {
        let velocity = 0.123_456_789;
        let stopping = velocity * 0.3 / 0.02;
        assert_eq!(advance(velocity, 0.3, 0.0, -stopping, 0.02), 0.0);
        assert_eq!(advance(-velocity, 0.3, 0.0, stopping, 0.02), 0.0);
    }

    #[test]
    fn excess_friction_stops_at_zero() {
        let velocity = 3.0;
        let stopping = -velocity * 0.7 / 0.01;
        assert_eq!(advance(velocity, 0.7, 0.0, stopping * 1.5, 0.01), 0.0);
    }

    #[test]
    fn underflowing_stopping_torque_still_stops() {
        // The friction limit |ω| · I / dt underflows to zero for the smallest
        // subnormal velocity, so friction arrives already clamped to -0.0.
        let velocity = f64::from_bits(1);
        assert_eq!(advance(velocity, 0.3, 0.0, -0.0, 0.02), 0.0);
    }

    #[test]
    fn without_friction_velocity_is_kept() {
        assert_eq!(advance(42.0, 0.3, 0.0, 0.0, 0.02), 42.0);
        assert_eq!(advance(0.0, 0.3, 0.0, 0.0, 0.02), 0.0);
    }

    #[test]
    fn drive_can_reverse_after_standstill() {
        let next = advance(1.0, 1.0, -200.0, -100.0, 0.01);
        assert_relative_eq!(next, -2.0);
    }
}
