//! Dense per-cell occupancy views over an arena snapshot.
//! This module exists so collision resolution and AI planning ask the same
//! "is this cell free" question against one consistent picture of the board.
//! It does not own movement or death rules.

use crate::state::{Arena, Life};
use crate::types::{EntityTag, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Free,
    /// Wall still in its warning stage.
    Telegraphed,
    Wall,
    Body,
}

#[derive(Clone, Debug)]
pub struct Occupancy {
    width: i32,
    height: i32,
    cells: Vec<CellState>,
}

impl Occupancy {
    fn blank(arena: &Arena) -> Self {
        let len = usize::try_from(arena.width * arena.height).unwrap_or(0);
        let mut occupancy =
            Self { width: arena.width, height: arena.height, cells: vec![CellState::Free; len] };
        for hazard in &arena.hazards {
            let state = if hazard.warning { CellState::Telegraphed } else { CellState::Wall };
            occupancy.set(hazard.pos, state);
        }
        occupancy
    }

    /// The AI's conservative view: every alive body minus its last cell, every
    /// dead body in full, growth ignored.
    pub fn planning(arena: &Arena) -> Self {
        let mut occupancy = Self::blank(arena);
        for snake in &arena.snakes {
            let keep = match snake.life {
                Life::Alive => snake.body.len().saturating_sub(1),
                Life::Dead | Life::AwaitingRespawn { .. } => snake.body.len(),
            };
            for &cell in snake.body.iter().take(keep) {
                occupancy.set(cell, CellState::Body);
            }
        }
        occupancy
    }

    /// The pre-move board a group step resolves deaths against. Tails of
    /// `movers` without growth credit are left free since they vacate this tick.
    pub fn collision(arena: &Arena, movers: &[EntityTag]) -> Self {
        let mut occupancy = Self::blank(arena);
        for snake in &arena.snakes {
            let vacates_tail =
                snake.is_alive() && snake.growth == 0 && movers.contains(&snake.tag);
            let keep =
                if vacates_tail { snake.body.len().saturating_sub(1) } else { snake.body.len() };
            for &cell in snake.body.iter().take(keep) {
                occupancy.set(cell, CellState::Body);
            }
        }
        occupancy
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Out of bounds reads as a wall.
    pub fn cell(&self, pos: Pos) -> CellState {
        self.index(pos).map_or(CellState::Wall, |idx| self.cells[idx])
    }

    pub fn is_walkable(&self, pos: Pos, include_warnings: bool) -> bool {
        match self.cell(pos) {
            CellState::Free => true,
            CellState::Telegraphed => !include_warnings,
            CellState::Wall | CellState::Body => false,
        }
    }

    fn set(&mut self, pos: Pos, state: CellState) {
        if let Some(idx) = self.index(pos) {
            // Bodies win over telegraphs; solid walls win over everything.
            if self.cells[idx] != CellState::Wall {
                self.cells[idx] = state;
            }
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        usize::try_from(pos.y * self.width + pos.x).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Snake;

    fn lone_snake_arena() -> Arena {
        let mut arena = Arena::empty();
        arena.add_snake(Snake::new(EntityTag::Player, Pos::new(10, 10)));
        arena
    }

    #[test]
    fn out_of_bounds_is_never_walkable() {
        let occupancy = Occupancy::planning(&Arena::empty());
        for pos in [Pos::new(-1, 0), Pos::new(0, -1), Pos::new(30, 5), Pos::new(5, 40)] {
            assert!(!occupancy.is_walkable(pos, false), "{pos}");
            assert!(!occupancy.is_walkable(pos, true), "{pos}");
        }
    }

    #[test]
    fn warning_walls_block_only_when_asked() {
        let mut arena = Arena::empty();
        arena.add_wall(Pos::new(4, 4));
        arena.hazards[0].warning = true;
        let occupancy = Occupancy::planning(&arena);
        assert!(occupancy.is_walkable(Pos::new(4, 4), false));
        assert!(!occupancy.is_walkable(Pos::new(4, 4), true));
    }

    #[test]
    fn planning_frees_the_last_cell_regardless_of_growth() {
        let mut arena = lone_snake_arena();
        arena.snakes[0].growth = 3;
        let occupancy = Occupancy::planning(&arena);
        assert_eq!(occupancy.cell(Pos::new(10, 10)), CellState::Body);
        assert_eq!(occupancy.cell(Pos::new(10, 11)), CellState::Body);
        assert_eq!(occupancy.cell(Pos::new(10, 12)), CellState::Free);
    }

    #[test]
    fn dead_bodies_block_in_full() {
        let mut arena = lone_snake_arena();
        arena.snakes[0].life = Life::Dead;
        let occupancy = Occupancy::planning(&arena);
        assert_eq!(occupancy.cell(Pos::new(10, 12)), CellState::Body);
    }

    #[test]
    fn collision_view_frees_mover_tails_without_growth() {
        let mut arena = lone_snake_arena();
        let moving = Occupancy::collision(&arena, &[EntityTag::Player]);
        assert!(moving.is_walkable(Pos::new(10, 12), false));

        let still = Occupancy::collision(&arena, &[]);
        assert!(!still.is_walkable(Pos::new(10, 12), false));

        arena.snakes[0].growth = 1;
        let growing = Occupancy::collision(&arena, &[EntityTag::Player]);
        assert!(!growing.is_walkable(Pos::new(10, 12), false));
    }
}
