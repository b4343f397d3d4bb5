//! Timed hazard/item insertion and AI respawn placement.
//! This module exists to keep seeded free-cell sampling and spawn cadence in one place.
//! It does not own collision rules or tick pacing.

use rand_chacha::rand_core::Rng;

use super::*;
use crate::state::{Hazard, Item};

impl Game {
    /// Fires every spawn kind whose cadence has elapsed, one instance per kind per call.
    pub(super) fn run_spawn_schedule(&mut self) {
        let elapsed = self.elapsed;
        if due(self.config.wall_interval, self.markers.wall, elapsed) {
            self.markers.wall = elapsed;
            self.spawn_wall();
        }
        if due(self.config.poison_interval, self.markers.poison, elapsed) {
            self.markers.poison = elapsed;
            self.spawn_item(ItemKind::Poison);
        }
        if due(self.config.trap_interval, self.markers.trap, elapsed) {
            self.markers.trap = elapsed;
            self.spawn_item(ItemKind::Trap);
        }
    }

    fn spawn_wall(&mut self) {
        let pos = self.random_free_cell(|_, _| true);
        let warning = !WALL_TELEGRAPH.is_zero();
        self.state.hazards.push(Hazard { pos, warning, spawned_at: self.elapsed });
        tracing::debug!(%pos, warning, "wall spawned");
        if warning {
            self.events.push(GameEvent::HazardWarning { at: pos });
        } else {
            self.events.push(GameEvent::HazardActivated { at: pos });
        }
    }

    pub(super) fn spawn_item(&mut self, kind: ItemKind) -> ItemId {
        let pos = self.random_free_cell(|_, _| true);
        let warning = !item_telegraph(kind).is_zero();
        let id = self.state.items.insert(Item {
            id: ItemId::default(),
            kind,
            pos,
            warning,
            spawned_at: self.elapsed,
        });
        self.state.items[id].id = id;
        tracing::debug!(?kind, %pos, warning, "item spawned");
        if !warning {
            self.events.push(GameEvent::ItemSpawned { kind, at: pos });
        }
        id
    }

    /// Lifts the warning stage off anything whose telegraph has run out.
    pub(super) fn activate_telegraphs(&mut self) {
        let elapsed = self.elapsed;
        for hazard in &mut self.state.hazards {
            if hazard.warning && elapsed >= hazard.spawned_at + WALL_TELEGRAPH {
                hazard.warning = false;
                self.events.push(GameEvent::HazardActivated { at: hazard.pos });
            }
        }
        for item in self.state.items.values_mut() {
            if item.warning && elapsed >= item.spawned_at + item_telegraph(item.kind) {
                item.warning = false;
                self.events.push(GameEvent::ItemSpawned { kind: item.kind, at: item.pos });
            }
        }
    }

    /// Brings back every AI whose respawn deadline has passed.
    pub(super) fn run_respawns(&mut self) {
        let elapsed = self.elapsed;
        let due: Vec<EntityTag> = self
            .state
            .snakes
            .iter()
            .filter(|snake| matches!(snake.life, Life::AwaitingRespawn { at } if elapsed >= at))
            .map(|snake| snake.tag)
            .collect();
        for tag in due {
            // The rubble has to go before sampling, or the old body would veto nearby cells.
            if let Some(snake) = self.state.snake_mut(tag) {
                snake.body.clear();
            }
            let head = self.random_free_cell(|arena, pos| {
                (1..START_BODY_LEN).all(|dy| arena.is_vacant(Pos::new(pos.x, pos.y + dy)))
            });
            if let Some(snake) = self.state.snake_mut(tag) {
                snake.respawn_at(head);
            }
            tracing::debug!(?tag, %head, "entity respawned");
            self.events.push(GameEvent::EntityRespawned { entity: tag, at: head });
        }
    }

    /// Uniform rejection sampling over the interior. Falls back to the grid
    /// centre when every attempt lands on something.
    fn random_free_cell(&mut self, accept: impl Fn(&Arena, Pos) -> bool) -> Pos {
        let span_x = u64::try_from(self.state.width - 2).unwrap_or(0).max(1);
        let span_y = u64::try_from(self.state.height - 2).unwrap_or(0).max(1);
        for _ in 0..SPAWN_ATTEMPTS {
            let x = 1 + (self.rng.next_u64() % span_x) as i32;
            let y = 1 + (self.rng.next_u64() % span_y) as i32;
            let pos = Pos::new(x, y);
            if self.state.is_vacant(pos) && accept(&self.state, pos) {
                return pos;
            }
        }
        tracing::debug!("free-cell sampling exhausted, using fallback");
        Pos::new(self.state.width / 2, self.state.height / 2)
    }
}

fn due(interval: Duration, last: Duration, elapsed: Duration) -> bool {
    !interval.is_zero() && elapsed.saturating_sub(last) >= interval
}
