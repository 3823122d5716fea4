use crate::config;
use crate::error::{LinkError, SimError};
use crate::frame::ControlFrame;
use crate::link::LinkTransport;
use crate::pulse;
use crate::sim::{Action, Simulation, Snapshot};
use crate::vitals;
use crate::zones::{self, Zone};
use crate::{debug_frame, debug_pulse, debug_zone};
use log::{info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// The Game struct drives the per-tick pipeline: pull one snapshot from the
/// simulation, encode it into a control frame, forward it over the link.
pub struct Game<S: Simulation> {
    sim: S,
    link: LinkTransport,
    zones: [Zone; config::ZONE_COUNT],
    cancel: Arc<AtomicBool>,
    shutdown_done: AtomicBool,
    started_at: Instant,
    pace: Duration,
    max_ticks: Option<u64>,
    ticks_sent: u64,
}

impl<S: Simulation> Game<S> {
    pub fn new(sim: S, link: LinkTransport, cancel: Arc<AtomicBool>, max_ticks: Option<u64>) -> Self {
        Game {
            sim,
            link,
            zones: zones::motor_zones(),
            cancel,
            shutdown_done: AtomicBool::new(false),
            started_at: Instant::now(),
            pace: Duration::from_secs_f64(config::TIC_SECONDS),
            max_ticks,
            ticks_sent: 0,
        }
    }

    /// Run episodes until cancelled, the tick budget runs out, or the link
    /// dies. The shutdown path runs on every exit, including errors.
    pub fn run(&mut self) -> Result<(), LinkError> {
        let result = self.run_loop();
        self.shutdown();
        result
    }

    fn run_loop(&mut self) -> Result<(), LinkError> {
        let mut episode: u32 = 0;

        'episodes: while !self.cancel.load(Ordering::SeqCst) {
            episode += 1;
            info!("Episode #{}", episode);
            if let Err(e) = self.sim.new_episode() {
                warn!("Could not start episode: {}", e);
                break;
            }

            while !self.sim.episode_finished() {
                // Cancellation is observed here, at the top of each tick.
                if self.cancel.load(Ordering::SeqCst) {
                    break 'episodes;
                }

                let snapshot = match self.sim.snapshot() {
                    Ok(s) => s,
                    Err(SimError::EpisodeEnded) => break,
                    Err(SimError::Terminated) => {
                        warn!("Simulation terminated unexpectedly");
                        break 'episodes;
                    }
                };

                match self.sim.advance(Action::Idle) {
                    Ok(()) | Err(SimError::EpisodeEnded) => {}
                    Err(SimError::Terminated) => {
                        warn!("Simulation terminated unexpectedly");
                        break 'episodes;
                    }
                }

                let frame = self.build_frame(&snapshot, self.started_at.elapsed().as_secs_f64());
                debug_frame!(snapshot.tick, "{:?}", frame);
                self.link.send(&frame.encode())?;
                self.ticks_sent += 1;

                if let Some(max) = self.max_ticks {
                    if self.ticks_sent >= max {
                        info!("Tick budget of {} reached", max);
                        break 'episodes;
                    }
                }
                if !self.pace.is_zero() {
                    thread::sleep(self.pace);
                }
            }
            info!("Episode #{} finished", episode);
        }
        Ok(())
    }

    /// Encode one snapshot into a control frame.
    fn build_frame(&self, snapshot: &Snapshot, elapsed_seconds: f64) -> ControlFrame {
        let (health, ammo_ratio) = vitals::scale(snapshot.health, snapshot.ammo);
        let states = zones::bin(&snapshot.hostiles, &self.zones, config::MAX_DISTANCE);
        let heart = pulse::intensity(elapsed_seconds, health);

        debug_zone!(
            snapshot.tick,
            "powers {:?}",
            states.map(|s| (s.power * 1000.0).round() / 1000.0)
        );
        debug_pulse!(snapshot.tick, "heart {:.3} at health {:.1}", heart, health);

        let mut zone_power = [0.0f32; config::ZONE_COUNT];
        for (out, state) in zone_power.iter_mut().zip(states.iter()) {
            *out = state.power as f32;
        }
        ControlFrame {
            heart: heart as f32,
            ammo_ratio: ammo_ratio as f32,
            zone_power,
        }
    }

    /// Reset the rig and release everything. Runs at most once; later calls
    /// are no-ops, so the interrupt path and the normal exit path can both
    /// go through here safely.
    pub fn shutdown(&mut self) {
        if self.shutdown_done.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("Shutting down: resetting motors and releasing the simulation");
        if self.link.is_connected() {
            if let Err(e) = self.link.send(&ControlFrame::neutral().encode()) {
                warn!("Could not send the neutral frame: {}", e);
            }
            self.link.close();
        }
        self.sim.close();
    }
}
