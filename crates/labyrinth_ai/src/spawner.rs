//! Batch spawning of navigation agents

use crate::agent::{AgentConfig, NavigationAgent};
use glam::Vec3;
use labyrinth_maze::{MazeRng, MazeView};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Spawn rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Maximum agents per batch
    pub max_agents: usize,
    /// Candidates at or within this distance of the player are skipped
    pub min_player_distance: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_agents: 8,
            min_player_distance: 6.0,
        }
    }
}

/// Owns the current agent batch
#[derive(Debug, Default)]
pub struct AgentSpawner {
    spawn: SpawnConfig,
    agent: AgentConfig,
    agents: Vec<NavigationAgent>,
}

impl AgentSpawner {
    pub fn new(spawn: SpawnConfig, agent: AgentConfig) -> Self {
        Self {
            spawn,
            agent,
            agents: Vec::new(),
        }
    }

    pub fn agents(&self) -> &[NavigationAgent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [NavigationAgent] {
        &mut self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Drop the whole batch and spawn a fresh one.
    ///
    /// Valid positions are shuffled; each candidate is used at most once and
    /// candidates too close to the player are skipped, not replaced. Returns
    /// the number spawned, which may be below the cap.
    pub fn respawn(&mut self, player: Vec3, view: &MazeView<'_>, rng: &mut MazeRng) -> usize {
        self.agents.clear();

        let mut candidates = view.valid_positions();
        candidates.shuffle(rng);

        let mut skipped = 0;
        for cell in candidates {
            if self.agents.len() >= self.spawn.max_agents {
                break;
            }
            if view.cell_center(cell).distance(player) <= self.spawn.min_player_distance {
                skipped += 1;
                continue;
            }
            let rotation = rng.gen_range(0.0..TAU);
            self.agents
                .push(NavigationAgent::new(cell, view, &self.agent).with_rotation(rotation));
        }

        debug!("Spawn pass skipped {} cells near the player", skipped);
        info!("Spawned {} agents", self.agents.len());
        self.agents.len()
    }

    /// Advance every agent by one tick
    pub fn update(&mut self, dt: f32, player: Vec3, view: &MazeView<'_>, rng: &mut MazeRng) {
        for agent in &mut self.agents {
            agent.update(dt, player, view, rng);
        }
    }
}
