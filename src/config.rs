//! Configuration constants for the haptic bridge.

// Zone layout: angular sectors of the view mapped onto the four neck motors.
// Intervals are half-open [lo, hi) in degrees and deliberately overlap so a
// hostile near a boundary drives both adjacent motors.
pub const ZONE_COUNT: usize = 4;
pub const ZONE_BOUNDS: [(f64, f64); ZONE_COUNT] = [
    (60.0, 165.0),  // far left
    (135.0, 195.0), // center left
    (165.0, 225.0), // center right
    (195.0, 300.0), // far right
];

// Proximity model
pub const MIN_DISTANCE: f64 = 135.0; // Full activation at or below this range
pub const MAX_DISTANCE: f64 = 750.0; // Hostiles at or beyond this range are ignored
pub const FALLOFF_EXPONENT: i32 = 4; // Quartic falloff: sharp near-range peak

// Vitals
pub const MAX_HEALTH: f64 = 100.0; // Nominal health cap; no lower clamp
pub const AMMO_CAPACITY: f64 = 50.0; // Nominal clip size for the ammo ratio

// Heartbeat pulse
pub const PULSE_RATE_BASE: f64 = 5.0; // Oscillator rate at full health
pub const PULSE_RATE_SPAN: f64 = 15.0; // Extra rate as health drops to zero
pub const PULSE_AMPLITUDE_DIV: f64 = 1.8; // Normalizes |cos + sin| to ~[0,1]
pub const PULSE_MIN_DEPTH: f64 = 0.3; // Modulation floor so the pulse never flatlines

// Link defaults
pub const DEFAULT_BAUD: u32 = 115_200;

// Tick pacing (seconds between ticks; the engine runs at 35 tics/sec)
pub const TIC_SECONDS: f64 = 1.0 / 35.0;
