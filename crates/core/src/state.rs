use std::collections::VecDeque;
use std::time::Duration;

use slotmap::SlotMap;

use crate::content::{GRID_HEIGHT, GRID_WIDTH, START_BODY_LEN};
use crate::types::*;

/// Lifecycle of a competitor. A body left behind by `Dead` or
/// `AwaitingRespawn` stays on the board as rubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Life {
    Alive,
    Dead,
    AwaitingRespawn { at: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlReversal {
    pub remaining_ticks: u32,
}

#[derive(Clone, Debug)]
pub struct Snake {
    pub tag: EntityTag,
    /// Head first.
    pub body: VecDeque<Pos>,
    pub direction: Direction,
    pub pending: Direction,
    pub score: u32,
    pub life: Life,
    pub growth: u32,
    pub reversal: Option<ControlReversal>,
}

impl Snake {
    /// Three cells tall, heading up from `head`.
    pub fn new(tag: EntityTag, head: Pos) -> Self {
        Self {
            tag,
            body: starting_body(head),
            direction: Direction::Up,
            pending: Direction::Up,
            score: 0,
            life: Life::Alive,
            growth: 0,
            reversal: None,
        }
    }

    pub fn head(&self) -> Pos {
        self.body.front().copied().unwrap_or(Pos::new(0, 0))
    }

    pub fn tail(&self) -> Option<Pos> {
        self.body.back().copied()
    }

    pub fn is_alive(&self) -> bool {
        self.life == Life::Alive
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }

    /// Puts the snake back on the board at `head`. Score survives.
    pub fn respawn_at(&mut self, head: Pos) {
        self.body = starting_body(head);
        self.direction = Direction::Up;
        self.pending = Direction::Up;
        self.life = Life::Alive;
        self.growth = 0;
        self.reversal = None;
    }
}

fn starting_body(head: Pos) -> VecDeque<Pos> {
    (0..START_BODY_LEN).map(|dy| Pos::new(head.x, head.y + dy)).collect()
}

#[derive(Clone, Debug)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub pos: Pos,
    pub warning: bool,
    pub spawned_at: Duration,
}

/// A wall. Telegraphed first, then solid for the rest of the match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hazard {
    pub pos: Pos,
    pub warning: bool,
    pub spawned_at: Duration,
}

/// The world snapshot: every entity, item and hazard of one match.
#[derive(Clone, Debug)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    pub snakes: Vec<Snake>,
    pub items: SlotMap<ItemId, Item>,
    pub hazards: Vec<Hazard>,
}

impl Arena {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, snakes: Vec::new(), items: SlotMap::with_key(), hazards: Vec::new() }
    }

    /// Empty board with the standard dimensions.
    pub fn empty() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn add_snake(&mut self, snake: Snake) {
        self.snakes.push(snake);
    }

    /// Solid wall, skipping the telegraph.
    pub fn add_wall(&mut self, pos: Pos) {
        self.hazards.push(Hazard { pos, warning: false, spawned_at: Duration::ZERO });
    }

    pub fn add_item(&mut self, kind: ItemKind, pos: Pos) -> ItemId {
        let id = self.items.insert(Item {
            id: ItemId::default(),
            kind,
            pos,
            warning: false,
            spawned_at: Duration::ZERO,
        });
        self.items[id].id = id;
        id
    }

    pub fn snake(&self, tag: EntityTag) -> Option<&Snake> {
        self.snakes.iter().find(|snake| snake.tag == tag)
    }

    pub fn snake_mut(&mut self, tag: EntityTag) -> Option<&mut Snake> {
        self.snakes.iter_mut().find(|snake| snake.tag == tag)
    }

    pub fn player(&self) -> Option<&Snake> {
        self.snake(EntityTag::Player)
    }

    /// Position of the live positive consumable, the AI's target.
    pub fn apple(&self) -> Option<Pos> {
        self.items
            .values()
            .find(|item| item.kind == ItemKind::Apple && !item.warning)
            .map(|item| item.pos)
    }

    pub fn live_item_at(&self, pos: Pos) -> Option<ItemId> {
        self.items.values().find(|item| item.pos == pos && !item.warning).map(|item| item.id)
    }

    pub fn hazard_at(&self, pos: Pos) -> Option<&Hazard> {
        self.hazards.iter().find(|hazard| hazard.pos == pos)
    }

    /// True when nothing at all sits on `pos`: no body, rubble, wall, telegraph or item.
    pub fn is_vacant(&self, pos: Pos) -> bool {
        self.in_bounds(pos)
            && !self.snakes.iter().any(|snake| snake.occupies(pos))
            && self.hazard_at(pos).is_none()
            && !self.items.values().any(|item| item.pos == pos)
    }
}
