//! World state
//!
//! The world owns the maze (and with it the single random stream), the
//! exported wall boxes, the player, the camera, the goals and the enemy
//! batch. Everything that mutates it goes through `&mut World`.

use crate::camera::{camera_validator, Camera};
use crate::config::WorldConfig;
use crate::error::Result;
use crate::goals::GoalSet;
use crate::player::Player;
use crate::session::FrameInput;
use glam::Vec3;
use labyrinth_ai::{AgentSpawner, NavigationAgent};
use labyrinth_collision::{sphere_vs_sphere, MovementValidator, Sphere, AABB};
use labyrinth_maze::{CellCoord, MazeGenerator};

#[derive(Debug)]
pub struct World {
    maze: MazeGenerator,
    obstacles: Vec<AABB>,
    player: Player,
    spawn_cell: CellCoord,
    camera: Camera,
    camera_validator: MovementValidator,
    goals: GoalSet,
    enemies: AgentSpawner,
    catch_radius: f32,
}

impl World {
    /// Generate the maze and populate it.
    ///
    /// Random draws happen in a fixed order after generation: goal placement,
    /// then the first enemy batch.
    pub fn new(config: &WorldConfig) -> Result<Self> {
        config.validate()?;

        let mut maze = MazeGenerator::with_config(
            config.maze.width,
            config.maze.height,
            config.maze.seed,
            config.maze.geometry.clone(),
        )?;
        maze.generate_maze();
        let obstacles = maze.obstacles();

        let spawn_cell = config.player.spawn.unwrap_or_else(|| maze.grid().center());
        let spawn = maze.view().cell_center(spawn_cell);
        let player = Player::new(spawn, &config.player);
        let camera = Camera::from_config(spawn, &config.camera);

        let (goals, enemies) = {
            let (view, rng) = maze.split_mut();
            let goals = GoalSet::place(
                config.goals.count,
                config.goals.radius,
                spawn_cell,
                &view,
                rng,
            );
            let mut enemies = AgentSpawner::new(config.enemies.spawn, config.enemies.agent);
            enemies.respawn(spawn, &view, rng);
            (goals, enemies)
        };

        log::info!(
            "World ready: {} walls, {} goals, {} enemies, player at cell ({}, {})",
            obstacles.len(),
            goals.total(),
            enemies.len(),
            spawn_cell.x,
            spawn_cell.y
        );

        Ok(Self {
            maze,
            obstacles,
            player,
            spawn_cell,
            camera,
            camera_validator: camera_validator(&config.camera),
            goals,
            enemies,
            catch_radius: config.enemies.catch_radius,
        })
    }

    pub fn maze(&self) -> &MazeGenerator {
        &self.maze
    }

    /// Wall boxes, one per exported wall volume
    pub fn obstacles(&self) -> &[AABB] {
        &self.obstacles
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn spawn_cell(&self) -> CellCoord {
        self.spawn_cell
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }

    pub fn agents(&self) -> &[NavigationAgent] {
        self.enemies.agents()
    }

    /// Look, zoom and movement for one tick.
    ///
    /// With an orbit camera the intents walk the player in the camera's
    /// ground basis; with a free camera they fly the camera and the player
    /// stays put. The orbit target then eases toward the player.
    pub fn apply_input(&mut self, dt: f32, input: &FrameInput) {
        self.camera
            .apply_look(input.look, input.zoom, &self.camera_validator, &self.obstacles);

        match &mut self.camera {
            Camera::Orbit(orbit) => {
                let basis = orbit.ground_basis();
                self.player.walk(&input.intents, basis, dt, &self.obstacles);
            }
            Camera::Free(free) => {
                free.fly(&input.intents, dt, &self.camera_validator, &self.obstacles);
            }
        }

        self.camera.follow(self.player.position());
    }

    /// Pick up touched goals. Returns how many were collected this call.
    pub fn collect_goals(&mut self) -> usize {
        self.goals.collect(&self.player.bounds())
    }

    /// Advance every enemy by `dt`
    pub fn update_agents(&mut self, dt: f32) {
        let player = self.player.position();
        let (view, rng) = self.maze.split_mut();
        self.enemies.update(dt, player, &view, rng);
    }

    /// True if any enemy touches the player
    pub fn player_caught(&self) -> bool {
        let player = self.player.bounds();
        self.enemies
            .agents()
            .iter()
            .any(|agent| sphere_vs_sphere(&player, &self.agent_bounds(agent)))
    }

    fn agent_bounds(&self, agent: &NavigationAgent) -> Sphere {
        Sphere::new(agent.position(), self.catch_radius)
    }

    /// Send the player home and replace the enemy batch
    pub fn handle_capture(&mut self) {
        log::warn!(
            "Player caught at {:?}, returning to cell ({}, {})",
            self.player.position(),
            self.spawn_cell.x,
            self.spawn_cell.y
        );
        self.player.respawn();
        self.respawn_agents();
    }

    /// Discard all enemies and spawn a new batch around the current player position
    pub fn respawn_agents(&mut self) -> usize {
        let player = self.player.position();
        let (view, rng) = self.maze.split_mut();
        self.enemies.respawn(player, &view, rng)
    }

    /// Player's distance to the nearest enemy, if any
    pub fn nearest_agent_distance(&self) -> Option<f32> {
        let player = self.player.position();
        self.enemies
            .agents()
            .iter()
            .map(|agent| agent.position().distance(player))
            .min_by(f32::total_cmp)
    }

    /// World position of a cell centre
    pub fn cell_center(&self, cell: CellCoord) -> Vec3 {
        self.maze.view().cell_center(cell)
    }
}
