use crate::config;
use crate::sim::Observation;
use std::f64::INFINITY;

/// An angular sector of the view, half-open [lo, hi) in degrees, mapped to
/// one motor channel. Sectors may overlap.
#[derive(Debug, Clone, Copy)]
pub struct Zone {
    pub lo: f64,
    pub hi: f64,
}

impl Zone {
    pub fn contains(&self, angle: f64) -> bool {
        self.lo <= angle && angle < self.hi
    }
}

/// The four neck-motor sectors from the rig's calibration.
pub fn motor_zones() -> [Zone; config::ZONE_COUNT] {
    config::ZONE_BOUNDS.map(|(lo, hi)| Zone { lo, hi })
}

/// Per-zone result of binning one tick's observations. Reset every tick.
#[derive(Debug, Clone, Copy)]
pub struct ZoneState {
    pub best_distance: f64, // Closest hostile matched so far, INFINITY if none
    pub power: f64,         // Motor drive in [0, 1]
}

impl Default for ZoneState {
    fn default() -> Self {
        ZoneState {
            best_distance: INFINITY,
            power: 0.0,
        }
    }
}

/// Bin one tick's hostiles into zones, keeping the closest hostile per zone.
///
/// Hostiles at or beyond `max_distance` are discarded up front. A hostile
/// can fall in several overlapping zones and is evaluated against each.
/// Selection is a strict minimum on distance, so the result does not depend
/// on the traversal order of the input.
pub fn bin(
    hostiles: &[Observation],
    zones: &[Zone; config::ZONE_COUNT],
    max_distance: f64,
) -> [ZoneState; config::ZONE_COUNT] {
    let mut states = [ZoneState::default(); config::ZONE_COUNT];

    for hostile in hostiles.iter().filter(|h| h.distance < max_distance) {
        for (zone, state) in zones.iter().zip(states.iter_mut()) {
            if zone.contains(hostile.angle) && hostile.distance < state.best_distance {
                state.best_distance = hostile.distance;
            }
        }
    }

    for state in states.iter_mut() {
        state.power = activate(state.best_distance, config::MIN_DISTANCE, config::MAX_DISTANCE);
    }
    states
}

/// Map a zone's closest-hostile distance to a motor power in [0, 1].
///
/// Distance is normalized so `min_distance` maps to 1 and `max_distance`
/// maps to 0, then raised to the fourth power. The quartic keeps the motor
/// quiet over most of the range and spikes it sharply once a hostile is
/// close; an empty zone (infinite distance) drives nothing.
pub fn activate(best_distance: f64, min_distance: f64, max_distance: f64) -> f64 {
    if best_distance == INFINITY {
        return 0.0;
    }
    let clamped = best_distance.max(min_distance);
    let norm = (clamped - max_distance) / (min_distance - max_distance);
    norm.powi(config::FALLOFF_EXPONENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn obs(angle: f64, distance: f64) -> Observation {
        Observation { angle, distance }
    }

    #[test]
    fn test_zone_contains_half_open() {
        let zone = Zone { lo: 60.0, hi: 165.0 };
        assert!(zone.contains(60.0));
        assert!(zone.contains(164.999));
        assert!(!zone.contains(165.0));
        assert!(!zone.contains(59.999));
    }

    #[test]
    fn test_activate_boundaries() {
        assert_approx_eq!(activate(135.0, 135.0, 750.0), 1.0);
        assert_approx_eq!(activate(750.0, 135.0, 750.0), 0.0);
        assert_approx_eq!(activate(INFINITY, 135.0, 750.0), 0.0);
    }

    #[test]
    fn test_activate_clamps_below_min_distance() {
        assert_approx_eq!(activate(10.0, 135.0, 750.0), 1.0);
    }

    #[test]
    fn test_activate_strictly_monotonic_inside_range() {
        let mut prev = activate(136.0, 135.0, 750.0);
        for step in 1..100 {
            let d = 136.0 + step as f64 * 6.0;
            let cur = activate(d, 135.0, 750.0);
            assert!(
                cur < prev,
                "power did not fall from {} to {} at distance {}",
                prev,
                cur,
                d
            );
            prev = cur;
        }
    }

    #[test]
    fn test_bin_selects_closest_per_zone() {
        // Angle 100 lands only in the first zone; the hostile at 750 is
        // discarded by the range filter and the one at 135 drives it fully.
        let hostiles = [obs(100.0, 135.0), obs(100.0, 750.0)];
        let states = bin(&hostiles, &motor_zones(), config::MAX_DISTANCE);
        assert_approx_eq!(states[0].best_distance, 135.0);
        assert_approx_eq!(states[0].power, 1.0);
        for state in &states[1..] {
            assert_eq!(state.best_distance, INFINITY);
            assert_approx_eq!(state.power, 0.0);
        }
    }

    #[test]
    fn test_bin_overlapping_zones_share_a_hostile() {
        // 170 degrees sits in both center zones but in neither outer zone.
        let hostiles = [obs(170.0, 300.0)];
        let states = bin(&hostiles, &motor_zones(), config::MAX_DISTANCE);
        assert_eq!(states[0].best_distance, INFINITY);
        assert_approx_eq!(states[1].best_distance, 300.0);
        assert_approx_eq!(states[2].best_distance, 300.0);
        assert_eq!(states[3].best_distance, INFINITY);
        assert!(states[1].power > 0.0);
        assert_approx_eq!(states[1].power, states[2].power);
    }

    #[test]
    fn test_bin_discards_out_of_range() {
        let hostiles = [obs(100.0, 750.0), obs(100.0, 5000.0)];
        let states = bin(&hostiles, &motor_zones(), config::MAX_DISTANCE);
        for state in &states {
            assert_eq!(state.best_distance, INFINITY);
            assert_approx_eq!(state.power, 0.0);
        }
    }

    #[test]
    fn test_bin_is_order_independent() {
        let base = [
            obs(100.0, 400.0),
            obs(100.0, 140.0),
            obs(150.0, 600.0),
            obs(170.0, 200.0),
            obs(200.0, 139.0),
            obs(250.0, 139.0),
        ];
        let reference = bin(&base, &motor_zones(), config::MAX_DISTANCE);

        // A handful of rotations and a full reversal cover the orderings
        // that tripped up sort-dependent selection.
        let mut reversed = base;
        reversed.reverse();
        let mut permutations = vec![reversed];
        for rot in 1..base.len() {
            let mut p = base;
            p.rotate_left(rot);
            permutations.push(p);
        }

        for permuted in permutations {
            let states = bin(&permuted, &motor_zones(), config::MAX_DISTANCE);
            for (a, b) in reference.iter().zip(states.iter()) {
                assert_eq!(a.best_distance, b.best_distance);
                assert_eq!(a.power, b.power);
            }
        }
    }

    #[test]
    fn test_bin_equal_distances_keep_one_candidate() {
        // Two hostiles at the same distance in the same zone: strict < keeps
        // the first seen, and either way the zone state is identical.
        let hostiles = [obs(100.0, 200.0), obs(110.0, 200.0)];
        let states = bin(&hostiles, &motor_zones(), config::MAX_DISTANCE);
        assert_approx_eq!(states[0].best_distance, 200.0);
    }
}
