use crate::config;

/// Total frame size on the wire. The controller has no framing or checksum;
/// it relies on this size being fixed.
pub const FRAME_SIZE: usize = (2 + config::ZONE_COUNT) * 4;

/// One control frame for the motor rig: chest pulse, ammo gauge and the
/// four neck motors. Sent once per tick, little-endian f32 fields in
/// declaration order with no padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlFrame {
    pub heart: f32,
    pub ammo_ratio: f32,
    pub zone_power: [f32; config::ZONE_COUNT],
}

impl ControlFrame {
    /// The resting frame sent on shutdown: pulse and gauge idle high, all
    /// neck motors released.
    pub fn neutral() -> Self {
        ControlFrame {
            heart: 1.0,
            ammo_ratio: 1.0,
            zone_power: [0.0; config::ZONE_COUNT],
        }
    }

    /// Serialize field by field. Explicit per-field little-endian writes
    /// keep the wire layout independent of host struct padding rules.
    pub fn encode(&self) -> [u8; FRAME_SIZE] {
        let mut buf = [0u8; FRAME_SIZE];
        buf[0..4].copy_from_slice(&self.heart.to_le_bytes());
        buf[4..8].copy_from_slice(&self.ammo_ratio.to_le_bytes());
        for (i, power) in self.zone_power.iter().enumerate() {
            let at = 8 + i * 4;
            buf[at..at + 4].copy_from_slice(&power.to_le_bytes());
        }
        buf
    }

    /// Inverse of `encode`. The rig never talks back; this exists for
    /// loopback checks and tests.
    #[allow(dead_code)]
    pub fn decode(bytes: &[u8; FRAME_SIZE]) -> Self {
        let f32_at = |at: usize| f32::from_le_bytes(bytes[at..at + 4].try_into().unwrap());
        let mut zone_power = [0.0; config::ZONE_COUNT];
        for (i, power) in zone_power.iter_mut().enumerate() {
            *power = f32_at(8 + i * 4);
        }
        ControlFrame {
            heart: f32_at(0),
            ammo_ratio: f32_at(4),
            zone_power,
        }
    }
}
