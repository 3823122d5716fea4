use crate::config;

/// Cap health at the nominal maximum. There is no lower clamp: zero and
/// negative health are valid "defeated" readings the pulse model handles.
pub fn clamp_health(health: f64) -> f64 {
    health.min(config::MAX_HEALTH)
}

/// Ammo as a proportion of the nominal clip size. Unclamped: picking up
/// spare clips can push the ratio above 1.0, which the controller wants
/// to see as-is.
pub fn ammo_ratio(ammo: f64) -> f64 {
    ammo / config::AMMO_CAPACITY
}

/// Normalize both vitals for one tick.
pub fn scale(health: f64, ammo: f64) -> (f64, f64) {
    (clamp_health(health), ammo_ratio(ammo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_clamp_health_caps_at_max() {
        assert_approx_eq!(clamp_health(150.0), 100.0);
        assert_approx_eq!(clamp_health(100.0), 100.0);
        assert_approx_eq!(clamp_health(42.5), 42.5);
    }

    #[test]
    fn test_clamp_health_allows_defeated_extremes() {
        assert_approx_eq!(clamp_health(0.0), 0.0);
        assert_approx_eq!(clamp_health(-20.0), -20.0);
    }

    #[test]
    fn test_ammo_ratio() {
        assert_approx_eq!(ammo_ratio(50.0), 1.0);
        assert_approx_eq!(ammo_ratio(25.0), 0.5);
        assert_approx_eq!(ammo_ratio(0.0), 0.0);
    }

    #[test]
    fn test_ammo_ratio_unclamped_above_capacity() {
        assert_approx_eq!(ammo_ratio(75.0), 1.5);
    }

    #[test]
    fn test_scale() {
        let (health, ammo) = scale(120.0, 10.0);
        assert_approx_eq!(health, 100.0);
        assert_approx_eq!(ammo, 0.2);
    }
}
