use crate::config;
use crate::vitals;

/// Heartbeat intensity for the chest motor, in roughly [0, 1].
///
/// Stateless oscillator over wall-clock time: the rate rises as health
/// drops (5 at full health up to 20 near death) and the modulation depth
/// scales with missing health, floored so the pulse stays perceptible
/// even at full health.
pub fn intensity(elapsed_seconds: f64, health: f64) -> f64 {
    let health = vitals::clamp_health(health);

    let rate = ((config::MAX_HEALTH - health) * config::PULSE_RATE_SPAN) / config::MAX_HEALTH
        + config::PULSE_RATE_BASE;
    let raw = ((elapsed_seconds * rate).cos() + (elapsed_seconds * rate * 2.0).sin()).abs()
        / config::PULSE_AMPLITUDE_DIV;

    let depth = ((config::MAX_HEALTH - health) / config::MAX_HEALTH).max(config::PULSE_MIN_DEPTH);

    1.0 - raw * depth
}
