//! Session loop
//!
//! A session owns one [`World`] and advances it one discrete tick at a time.
//! Each tick runs, in order: camera look/zoom, movement, goal pickup, enemy
//! update, capture check. Nothing inside a tick blocks or waits; timers only
//! accumulate the `dt` they are given.

use crate::camera::MoveIntent;
use crate::config::WorldConfig;
use crate::error::Result;
use crate::world::World;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Input sampled for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Movement requests, resolved against the active camera
    pub intents: Vec<MoveIntent>,
    /// Angular change in radians (theta/yaw, phi/pitch)
    pub look: Vec2,
    /// Orbit distance change
    pub zoom: f32,
}

impl FrameInput {
    pub fn moving(intents: impl IntoIterator<Item = MoveIntent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub goals_collected: usize,
    pub captured: bool,
    /// Set only on the tick the last goal was collected
    pub completed: bool,
}

/// Running totals for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub ticks: u64,
    /// Simulated seconds
    pub elapsed: f64,
    pub goals_collected: usize,
    pub goals_total: usize,
    pub captures: u32,
    pub completed: bool,
}

#[derive(Debug)]
pub struct Session {
    world: World,
    stats: SessionStats,
}

impl Session {
    pub fn new(config: WorldConfig) -> Result<Self> {
        let world = World::new(&config)?;
        let stats = SessionStats {
            goals_total: world.goals().total(),
            ..SessionStats::default()
        };
        Ok(Self { world, stats })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Run one update. Negative `dt` is treated as zero.
    pub fn tick(&mut self, dt: f32, input: &FrameInput) -> TickEvents {
        let dt = dt.max(0.0);
        let mut events = TickEvents::default();

        self.world.apply_input(dt, input);

        events.goals_collected = self.world.collect_goals();
        self.stats.goals_collected += events.goals_collected;
        if !self.stats.completed && self.world.goals().is_complete() {
            self.stats.completed = true;
            events.completed = true;
            log::info!(
                "All {} goals collected after {:.2}s",
                self.stats.goals_total,
                self.stats.elapsed + f64::from(dt)
            );
        }

        self.world.update_agents(dt);

        if self.world.player_caught() {
            self.world.handle_capture();
            self.stats.captures += 1;
            events.captured = true;
        }

        self.stats.ticks += 1;
        self.stats.elapsed += f64::from(dt);
        events
    }
}
