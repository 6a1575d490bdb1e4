//! Collectible goals

use glam::Vec3;
use labyrinth_collision::{sphere_vs_sphere, Sphere};
use labyrinth_maze::{CellCoord, MazeRng, MazeView};
use rand::seq::SliceRandom;

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub cell: CellCoord,
    pub bounds: Sphere,
    pub collected: bool,
}

/// Goals placed for one session
#[derive(Debug, Clone, Default)]
pub struct GoalSet {
    goals: Vec<Goal>,
}

impl GoalSet {
    /// Place up to `count` goals on distinct valid cells, never on `exclude`
    pub fn place(
        count: usize,
        radius: f32,
        exclude: CellCoord,
        view: &MazeView<'_>,
        rng: &mut MazeRng,
    ) -> Self {
        let mut cells: Vec<CellCoord> = view
            .valid_positions()
            .into_iter()
            .filter(|&cell| cell != exclude)
            .collect();
        cells.shuffle(rng);

        let goals: Vec<Goal> = cells
            .into_iter()
            .take(count)
            .map(|cell| Goal {
                cell,
                bounds: Sphere::new(view.cell_center(cell), radius),
                collected: false,
            })
            .collect();

        if goals.len() < count {
            log::warn!("Only {} of {} goals fit in the maze", goals.len(), count);
        }
        Self { goals }
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn total(&self) -> usize {
        self.goals.len()
    }

    pub fn collected(&self) -> usize {
        self.goals.iter().filter(|g| g.collected).count()
    }

    /// Every goal picked up; an empty set is never complete
    pub fn is_complete(&self) -> bool {
        !self.goals.is_empty() && self.goals.iter().all(|g| g.collected)
    }

    /// Mark every goal the player touches. Returns how many were newly collected.
    pub fn collect(&mut self, player: &Sphere) -> usize {
        let mut picked = 0;
        for goal in self.goals.iter_mut().filter(|g| !g.collected) {
            if sphere_vs_sphere(player, &goal.bounds) {
                goal.collected = true;
                picked += 1;
                log::info!("Goal collected at ({}, {})", goal.cell.x, goal.cell.y);
            }
        }
        picked
    }
}
