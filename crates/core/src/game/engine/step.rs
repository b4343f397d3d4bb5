//! One discrete advance for one tick group.
//! Every decision and every death test reads the pre-move board; mutation
//! only starts once all of them are collected.

use super::*;
use crate::state::ControlReversal;

/// A surviving mover's resolved move.
struct Move {
    tag: EntityTag,
    head: Pos,
}

impl Game {
    pub(super) fn step_group(&mut self, group: TickGroup) {
        let movers: Vec<EntityTag> = self
            .state
            .snakes
            .iter()
            .filter(|snake| snake.is_alive() && snake.tag.group() == group)
            .map(|snake| snake.tag)
            .collect();
        if movers.is_empty() {
            return;
        }

        if group == TickGroup::Ai {
            self.plan_ai_moves(&movers);
        }

        let mut candidates = Vec::with_capacity(movers.len());
        for snake in self.state.snakes.iter_mut().filter(|snake| movers.contains(&snake.tag)) {
            snake.direction = snake.pending;
            candidates.push(Move { tag: snake.tag, head: snake.head().step(snake.direction) });
        }

        let board = Occupancy::collision(&self.state, &movers);
        let mut dying = Vec::new();
        let mut moving = Vec::new();
        for candidate in &candidates {
            let head_on = candidates
                .iter()
                .any(|other| other.tag != candidate.tag && other.head == candidate.head);
            let cause = if head_on {
                Some(DeathCause::HeadOn)
            } else {
                match board.cell(candidate.head) {
                    CellState::Free | CellState::Telegraphed => None,
                    CellState::Wall if !board.in_bounds(candidate.head) => {
                        Some(DeathCause::OutOfBounds)
                    }
                    CellState::Wall => Some(DeathCause::Hazard),
                    CellState::Body => Some(DeathCause::Collision),
                }
            };
            match cause {
                Some(cause) => dying.push((candidate.tag, cause)),
                None => moving.push(candidate),
            }
        }

        let mut eaten_apples = 0;
        for candidate in moving {
            match self.move_snake(candidate) {
                Some(ItemKind::Apple) => eaten_apples += 1,
                Some(ItemKind::Poison) => dying.push((candidate.tag, DeathCause::Poison)),
                Some(ItemKind::Trap) | None => {}
            }
        }
        // Replacements are sampled against the post-move bodies.
        for _ in 0..eaten_apples {
            self.spawn_item(ItemKind::Apple);
        }
        for (tag, cause) in dying {
            self.kill(tag, cause);
        }

        self.check_step_end();
    }

    /// Collects every bot's decision against one planning snapshot before any
    /// of them is buffered.
    fn plan_ai_moves(&mut self, movers: &[EntityTag]) {
        let occupancy = Occupancy::planning(&self.state);
        let target = self.state.apple().unwrap_or(SPAWN_FALLBACK);
        let difficulty = self.config.difficulty;
        let decisions: Vec<(EntityTag, Direction)> = self
            .state
            .snakes
            .iter()
            .filter(|snake| movers.contains(&snake.tag))
            .map(|snake| (snake.tag, choose_move(&occupancy, snake, target, difficulty)))
            .collect();
        for (tag, direction) in decisions {
            tracing::trace!(?tag, ?direction, %target, "ai decision");
            if let Some(snake) = self.state.snake_mut(tag) {
                snake.pending = direction;
            }
        }
    }

    /// Advances a survivor and applies whatever it lands on. Returns the kind
    /// it ate; apple replacement and poison deaths are left to the caller.
    fn move_snake(&mut self, mv: &Move) -> Option<ItemKind> {
        let snake = self.state.snake_mut(mv.tag)?;
        if let Some(reversal) = snake.reversal.as_mut() {
            reversal.remaining_ticks = reversal.remaining_ticks.saturating_sub(1);
            if reversal.remaining_ticks == 0 {
                snake.reversal = None;
                self.events.push(GameEvent::ControlsRestored { entity: mv.tag });
            }
        }
        snake.body.push_front(mv.head);
        if snake.growth > 0 {
            snake.growth -= 1;
        } else {
            snake.body.pop_back();
        }

        let item_id = self.state.live_item_at(mv.head)?;
        let item = self.state.items.remove(item_id)?;
        self.events.push(GameEvent::ItemEaten { entity: mv.tag, kind: item.kind, at: mv.head });
        match item.kind {
            ItemKind::Apple => {
                if let Some(snake) = self.state.snake_mut(mv.tag) {
                    snake.score += 1;
                    snake.growth += 1;
                }
            }
            ItemKind::Poison => {}
            ItemKind::Trap => {
                if let Some(snake) = self.state.snake_mut(mv.tag) {
                    snake.reversal = Some(ControlReversal { remaining_ticks: REVERSAL_TICKS });
                }
                self.events.push(GameEvent::ControlsReversed { entity: mv.tag });
            }
        }
        Some(item.kind)
    }

    /// Leaves the body on the board as rubble. Bots get a respawn deadline.
    fn kill(&mut self, tag: EntityTag, cause: DeathCause) {
        let elapsed = self.elapsed;
        let Some(snake) = self.state.snake_mut(tag) else {
            return;
        };
        snake.life = if tag.is_player() {
            Life::Dead
        } else {
            Life::AwaitingRespawn { at: elapsed + RESPAWN_DELAY }
        };
        snake.growth = 0;
        let at = snake.head();
        tracing::debug!(?tag, ?cause, %at, "entity died");
        self.events.push(GameEvent::EntityDied { entity: tag, at, cause });
    }

    /// Player death and the score target both end the match on the spot.
    fn check_step_end(&mut self) {
        let Some(player) = self.state.player() else {
            return;
        };
        if !player.is_alive() {
            let winner = self.ranked_winner(|snake| !snake.tag.is_player());
            self.finish(MatchOutcome::Defeat { reason: EndReason::PlayerEliminated, winner });
        } else if player.score >= self.config.win_score {
            self.finish(MatchOutcome::Victory { reason: EndReason::ScoreTarget });
        }
    }
}
