//! Tiered AI move selection.
//! This module exists so each difficulty's planning depth is expressed over the
//! same legal-move set and the same read-only occupancy view.
//! It does not own movement, collision or tick pacing.

use super::occupancy::Occupancy;
use super::pathfinding::{accessible_area, find_path};
use crate::content::{PATH_BUDGET, SAFETY_MARGIN, SURVIVAL_AREA_CAP};
use crate::state::Snake;
use crate::types::{Difficulty, Direction, Pos};

/// Picks the next heading for `snake` chasing `target`. A snake with no legal
/// move keeps its heading and dies on the coming tick.
pub fn choose_move(
    occupancy: &Occupancy,
    snake: &Snake,
    target: Pos,
    difficulty: Difficulty,
) -> Direction {
    let head = snake.head();
    let legal = legal_moves(occupancy, head, snake.direction);
    let Some(&first) = legal.first() else {
        return snake.direction;
    };
    match difficulty {
        Difficulty::Normal => greedy(&legal, head, target),
        Difficulty::Medium => path_step(occupancy, head, target).unwrap_or(first),
        Difficulty::Hard => {
            let body_len = snake.body.len();
            path_step(occupancy, head, target)
                .filter(|&direction| {
                    let area =
                        accessible_area(occupancy, head.step(direction), body_len + SAFETY_MARGIN);
                    area >= body_len
                })
                .unwrap_or_else(|| roomiest(occupancy, &legal, head))
        }
    }
}

/// Neighbours in `Direction::ALL` order, minus the reversal and anything
/// blocked right now. Telegraphed walls still count as open here.
fn legal_moves(occupancy: &Occupancy, head: Pos, heading: Direction) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| direction != heading.opposite())
        .filter(|&direction| occupancy.is_walkable(head.step(direction), false))
        .collect()
}

fn greedy(legal: &[Direction], head: Pos, target: Pos) -> Direction {
    let mut best = legal[0];
    let mut best_distance = head.step(best).manhattan(target);
    for &direction in &legal[1..] {
        let distance = head.step(direction).manhattan(target);
        if distance < best_distance {
            best = direction;
            best_distance = distance;
        }
    }
    best
}

/// First step of a planned route, if the route is longer than the start cell.
fn path_step(occupancy: &Occupancy, head: Pos, target: Pos) -> Option<Direction> {
    let path = find_path(occupancy, head, target, PATH_BUDGET)?;
    let next = *path.get(1)?;
    Direction::between(head, next)
}

fn roomiest(occupancy: &Occupancy, legal: &[Direction], head: Pos) -> Direction {
    let mut best = legal[0];
    let mut best_area = accessible_area(occupancy, head.step(best), SURVIVAL_AREA_CAP);
    for &direction in &legal[1..] {
        let area = accessible_area(occupancy, head.step(direction), SURVIVAL_AREA_CAP);
        if area > best_area {
            best = direction;
            best_area = area;
        }
    }
    best
}
