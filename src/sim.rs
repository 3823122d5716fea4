use crate::config;
use crate::debug_sim;
use crate::error::SimError;
use rand::prelude::*;

/// One detected hostile, fresh each tick. Angle is degrees [0, 360) in the
/// player's view, distance is engine map units.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub angle: f64,
    pub distance: f64,
}

/// Read-only state snapshot for one tick.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tick: u32,
    pub health: f64,
    pub ammo: f64,
    pub hostiles: Vec<Observation>,
}

/// Discrete player action forwarded to the simulation each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Idle,
    MoveLeft,
    MoveRight,
    Attack,
}

/// The upstream simulation as the bridge sees it: a per-tick snapshot
/// source. Configuration and process lifecycle stay on the other side of
/// this seam.
pub trait Simulation {
    /// Start a fresh episode.
    fn new_episode(&mut self) -> Result<(), SimError>;

    /// Whether the current episode has run to its end.
    fn episode_finished(&self) -> bool;

    /// The current tick's state. `EpisodeEnded` here is normal control
    /// flow, not a failure.
    fn snapshot(&self) -> Result<Snapshot, SimError>;

    /// Apply one action and advance to the next tick.
    fn advance(&mut self, action: Action) -> Result<(), SimError>;

    /// Release the simulation. Called once on shutdown.
    fn close(&mut self);
}

// Scripted stand-in tuning
const EPISODE_TICKS: u32 = 2000;
const SPAWN_MIN: usize = 3;
const SPAWN_MAX: usize = 6;
const MELEE_RANGE: f64 = 90.0;

#[derive(Debug, Clone, Copy)]
struct Hostile {
    angle: f64,
    distance: f64,
    approach: f64, // Map units closed per tick
}

/// Self-contained stand-in upstream: a handful of hostiles wander toward
/// the player while health and ammo drain. Lets the whole pipeline run
/// end-to-end with no engine attached.
pub struct ScriptedSim {
    tick: u32,
    health: f64,
    ammo: f64,
    hostiles: Vec<Hostile>,
    open: bool,
}

impl ScriptedSim {
    pub fn new() -> Self {
        ScriptedSim {
            tick: 0,
            health: config::MAX_HEALTH,
            ammo: config::AMMO_CAPACITY,
            hostiles: Vec::new(),
            open: true,
        }
    }

    fn spawn_hostile(rng: &mut ThreadRng) -> Hostile {
        Hostile {
            angle: rng.gen_range(0.0..360.0),
            distance: rng.gen_range(config::MAX_DISTANCE..config::MAX_DISTANCE * 2.0),
            approach: rng.gen_range(2.0..10.0),
        }
    }
}

impl Simulation for ScriptedSim {
    fn new_episode(&mut self) -> Result<(), SimError> {
        if !self.open {
            return Err(SimError::Terminated);
        }
        let mut rng = thread_rng();
        self.tick = 0;
        self.health = config::MAX_HEALTH;
        self.ammo = config::AMMO_CAPACITY;
        self.hostiles = (0..rng.gen_range(SPAWN_MIN..=SPAWN_MAX))
            .map(|_| Self::spawn_hostile(&mut rng))
            .collect();
        debug_sim!("New episode with {} hostiles", self.hostiles.len());
        Ok(())
    }

    fn episode_finished(&self) -> bool {
        self.tick >= EPISODE_TICKS || self.health <= 0.0
    }

    fn snapshot(&self) -> Result<Snapshot, SimError> {
        if !self.open {
            return Err(SimError::Terminated);
        }
        if self.episode_finished() {
            return Err(SimError::EpisodeEnded);
        }
        Ok(Snapshot {
            tick: self.tick,
            health: self.health,
            ammo: self.ammo,
            hostiles: self
                .hostiles
                .iter()
                .map(|h| Observation {
                    angle: h.angle,
                    distance: h.distance,
                })
                .collect(),
        })
    }

    fn advance(&mut self, action: Action) -> Result<(), SimError> {
        if !self.open {
            return Err(SimError::Terminated);
        }
        let mut rng = thread_rng();
        self.tick += 1;

        if action == Action::Attack && self.ammo > 0.0 {
            self.ammo -= 1.0;
        }

        for hostile in self.hostiles.iter_mut() {
            hostile.distance -= hostile.approach;
            hostile.angle = (hostile.angle + rng.gen_range(-3.0..3.0)).rem_euclid(360.0);
            if hostile.distance < MELEE_RANGE {
                // It reached the player: take a hit, hostile retreats far.
                self.health -= rng.gen_range(1.0..5.0);
                *hostile = Self::spawn_hostile(&mut rng);
            }
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            debug_sim!("Scripted simulation released");
        }
    }
}
