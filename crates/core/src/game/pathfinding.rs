//! Snapshot-scoped shortest-path and flood-fill helpers.
//! This module exists so AI planning can query routes and free space as pure
//! functions of an occupancy view.
//! It does not own move selection or any mutable game state.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::occupancy::Occupancy;
use crate::types::{Direction, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// A* over 4-neighbour unit steps, treating telegraphed walls as solid.
/// Returns `start..=goal`, or `None` when the goal is unreachable or more
/// than `budget` nodes would have to be expanded.
pub fn find_path(occupancy: &Occupancy, start: Pos, goal: Pos, budget: u32) -> Option<Vec<Pos>> {
    if start == goal {
        return Some(vec![start]);
    }
    if !occupancy.is_walkable(goal, true) {
        return None;
    }
    let mut open_set = BTreeSet::new();
    let mut closed = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = start.manhattan(goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0);
    let mut expansions = 0;
    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if !closed.insert(p) {
            continue;
        }
        if p == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        expansions += 1;
        if expansions > budget {
            return None;
        }
        let cur_g = g_score.get(&p).copied().unwrap_or(u32::MAX);
        for n in neighbors(p) {
            if closed.contains(&n) || !occupancy.is_walkable(n, true) {
                continue;
            }
            let tg = cur_g.saturating_add(1);
            if tg < g_score.get(&n).copied().unwrap_or(u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = n.manhattan(goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    None
}

/// Breadth-first count of cells reachable from `start` (counted itself), capped at `limit`.
pub fn accessible_area(occupancy: &Occupancy, start: Pos, limit: usize) -> usize {
    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut count = 0;
    while let Some(current) = queue.pop_front() {
        count += 1;
        if count >= limit {
            return limit;
        }
        for neighbor in neighbors(current) {
            if occupancy.is_walkable(neighbor, true) && visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    count
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Option<Vec<Pos>> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        p = *came.get(&p)?;
        result.push(p);
    }
    result.reverse();
    Some(result)
}

pub(super) fn neighbors(p: Pos) -> [Pos; 4] {
    Direction::ALL.map(|direction| p.step(direction))
}
