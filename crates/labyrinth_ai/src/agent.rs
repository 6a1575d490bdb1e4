//! Grid-walking enemy agent
//!
//! An agent is always either resting in a cell ([`Motion::Idle`]) or sliding
//! from its cell to an adjacent one ([`Motion::Moving`]). Both phases are
//! paced by the same timer and the active speed, which is seconds per cell
//! transition: `chase_speed` while chasing, `move_speed` while patrolling.
//!
//! The patrol/chase decision is taken once per update, before any motion,
//! from the straight-line distance to the player.

use crate::state_machine::{State, StateMachine};
use glam::Vec3;
use labyrinth_maze::{CellCoord, MazeRng, MazeView};
use log::trace;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Behaviour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentMode {
    Patrol,
    Chase,
}

impl State for AgentMode {}

/// Motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    Idle,
    Moving,
}

/// What the mode machine looks at
#[derive(Debug, Clone, Copy)]
pub struct Sensing {
    pub distance_to_player: f32,
    pub detection_radius: f32,
}

/// Agent tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Seconds per cell while patrolling
    pub move_speed: f32,
    /// Seconds per cell while chasing
    pub chase_speed: f32,
    pub detection_radius: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            move_speed: 1.0,
            chase_speed: 0.5,
            detection_radius: 8.0,
        }
    }
}

/// An enemy walking the maze graph
#[derive(Debug)]
pub struct NavigationAgent {
    cell: CellCoord,
    target: CellCoord,
    position: Vec3,
    rotation_y: f32,
    move_timer: f32,
    move_speed: f32,
    chase_speed: f32,
    detection_radius: f32,
    motion: Motion,
    mode: StateMachine<AgentMode, Sensing>,
}

pub(crate) fn mode_machine() -> StateMachine<AgentMode, Sensing> {
    let mut fsm = StateMachine::new(AgentMode::Patrol);
    fsm.add_transition(AgentMode::Patrol, AgentMode::Chase, |s: &Sensing| {
        s.distance_to_player <= s.detection_radius
    });
    fsm.add_transition(AgentMode::Chase, AgentMode::Patrol, |s: &Sensing| {
        s.distance_to_player > s.detection_radius
    });
    fsm
}

impl NavigationAgent {
    /// Place an idle, patrolling agent at the centre of `cell`
    pub fn new(cell: CellCoord, view: &MazeView<'_>, config: &AgentConfig) -> Self {
        Self {
            cell,
            target: cell,
            position: view.cell_center(cell),
            rotation_y: 0.0,
            move_timer: 0.0,
            move_speed: config.move_speed,
            chase_speed: config.chase_speed,
            detection_radius: config.detection_radius,
            motion: Motion::Idle,
            mode: mode_machine(),
        }
    }

    pub fn with_rotation(mut self, rotation_y: f32) -> Self {
        self.rotation_y = rotation_y;
        self
    }

    pub fn cell(&self) -> CellCoord {
        self.cell
    }

    pub fn target(&self) -> CellCoord {
        self.target
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Facing angle around +Y, `atan2(dx, dz)` of the last step
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    pub fn move_timer(&self) -> f32 {
        self.move_timer
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn mode(&self) -> AgentMode {
        *self.mode.current()
    }

    pub fn is_moving(&self) -> bool {
        self.motion == Motion::Moving
    }

    pub fn is_chasing(&self) -> bool {
        self.mode.is_in(&AgentMode::Chase)
    }

    /// Seconds per cell transition in the current mode
    pub fn active_speed(&self) -> f32 {
        match self.mode() {
            AgentMode::Chase => self.chase_speed,
            AgentMode::Patrol => self.move_speed,
        }
    }

    /// Advance one tick
    pub fn update(&mut self, dt: f32, player: Vec3, view: &MazeView<'_>, rng: &mut MazeRng) {
        let sensing = Sensing {
            distance_to_player: self.position.distance(player),
            detection_radius: self.detection_radius,
        };
        if let Some(mode) = self.mode.evaluate(&sensing) {
            trace!("Agent at {:?} switched to {:?}", self.cell, mode);
        }

        let speed = self.active_speed();
        self.move_timer += dt;

        match self.motion {
            Motion::Idle => {
                if self.move_timer >= speed {
                    self.begin_step(player, view, rng);
                }
            }
            Motion::Moving => {
                let from = view.cell_center(self.cell);
                let to = view.cell_center(self.target);
                let progress = self.move_timer / speed;

                if progress >= 1.0 {
                    self.position = to;
                    self.cell = self.target;
                    self.motion = Motion::Idle;
                    self.move_timer = 0.0;
                } else {
                    self.position = from.lerp(to, progress);
                }
            }
        }
    }

    fn begin_step(&mut self, player: Vec3, view: &MazeView<'_>, rng: &mut MazeRng) {
        let neighbors = view.valid_neighbors(self.cell);
        let next = match self.mode() {
            AgentMode::Patrol => neighbors.choose(rng).copied(),
            AgentMode::Chase => self.toward(player, &neighbors, view),
        };

        // Boxed in: stay put and wait another full period
        let Some(next) = next else {
            self.move_timer = 0.0;
            return;
        };

        let delta = view.cell_center(next) - view.cell_center(self.cell);
        self.rotation_y = delta.x.atan2(delta.z);
        self.target = next;
        self.motion = Motion::Moving;
        self.move_timer = 0.0;
    }

    /// Neighbour whose direction best matches the direction to the player.
    /// Ties keep the earliest neighbour.
    fn toward(
        &self,
        player: Vec3,
        neighbors: &[CellCoord],
        view: &MazeView<'_>,
    ) -> Option<CellCoord> {
        let here = view.cell_center(self.cell);
        let to_player = (player - here).normalize_or_zero();

        let mut best: Option<(CellCoord, f32)> = None;
        for &candidate in neighbors {
            let dir = (view.cell_center(candidate) - here).normalize_or_zero();
            let score = dir.dot(to_player);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        best.map(|(cell, _)| cell)
    }
}
