//! Frame-delta accumulation, countdown gating and match-end detection.

use std::cmp::Reverse;

use super::*;

impl Game {
    /// Feeds one real-time frame into the match. Each group fires a step for
    /// every full interval in its accumulator, up to a per-frame cap; the
    /// remainder carries into the next frame.
    pub fn advance(&mut self, dt: Duration) -> AdvanceResult {
        self.journal.record(InputPayload::Advance { dt });
        let mut result = AdvanceResult {
            player_ticks: 0,
            ai_ticks: 0,
            stop_reason: AdvanceStopReason::FrameComplete,
        };
        match self.phase {
            MatchPhase::Aborted => {
                result.stop_reason = AdvanceStopReason::Aborted;
                return result;
            }
            MatchPhase::Finished(outcome) => {
                result.stop_reason = AdvanceStopReason::Finished(outcome);
                return result;
            }
            MatchPhase::Paused => {
                result.stop_reason = AdvanceStopReason::Paused;
                return result;
            }
            MatchPhase::Countdown => {
                self.run_countdown(dt);
                result.stop_reason =
                    AdvanceStopReason::Countdown { remaining: self.countdown_left };
                return result;
            }
            MatchPhase::Running => {}
        }

        self.elapsed += dt;
        self.player_acc += dt;
        self.ai_acc += dt;
        self.activate_telegraphs();

        result.player_ticks = self.drain_group(TickGroup::Player);
        result.ai_ticks = self.drain_group(TickGroup::Ai);

        if self.outcome().is_none() {
            self.run_spawn_schedule();
            self.run_respawns();
            self.check_time_expiry();
        }

        if let Some(outcome) = self.outcome() {
            result.stop_reason = AdvanceStopReason::Finished(outcome);
        }
        result
    }

    fn run_countdown(&mut self, dt: Duration) {
        let before = whole_seconds(self.countdown_left);
        self.countdown_left = self.countdown_left.saturating_sub(dt);
        let after = whole_seconds(self.countdown_left);
        for remaining in (after.max(1)..before).rev() {
            self.events.push(GameEvent::CountdownTick { remaining });
        }
        if self.countdown_left.is_zero() {
            self.phase = MatchPhase::Running;
            self.events.push(GameEvent::MatchStarted);
            tracing::info!(
                seed = self.seed,
                difficulty = self.config.difficulty.key(),
                entities = self.state.snakes.len(),
                "match started"
            );
        }
    }

    fn drain_group(&mut self, group: TickGroup) -> u32 {
        let interval = match group {
            TickGroup::Player => self.config.player_interval,
            TickGroup::Ai => self.config.ai_interval,
        };
        if interval.is_zero() {
            return 0;
        }
        let mut ticks = 0;
        while ticks < MAX_STEPS_PER_FRAME && self.outcome().is_none() {
            let acc = match group {
                TickGroup::Player => &mut self.player_acc,
                TickGroup::Ai => &mut self.ai_acc,
            };
            if *acc < interval {
                break;
            }
            *acc -= interval;
            self.step_group(group);
            ticks += 1;
        }
        ticks
    }

    fn check_time_expiry(&mut self) {
        if self.elapsed < self.config.duration {
            return;
        }
        let winner = self.ranked_winner(|_| true);
        let outcome = if winner == Some(EntityTag::Player) {
            MatchOutcome::Victory { reason: EndReason::TimeExpired }
        } else {
            MatchOutcome::Defeat { reason: EndReason::TimeExpired, winner }
        };
        self.finish(outcome);
    }

    /// Highest score among `eligible` entities. Equal scores go to the entity
    /// created first.
    pub(super) fn ranked_winner(&self, eligible: impl Fn(&Snake) -> bool) -> Option<EntityTag> {
        self.state
            .snakes
            .iter()
            .filter(|snake| eligible(snake))
            .min_by_key(|snake| (Reverse(snake.score), snake.tag))
            .map(|snake| snake.tag)
    }

    pub(super) fn finish(&mut self, outcome: MatchOutcome) {
        if self.outcome().is_some() {
            return;
        }
        for snake in &mut self.state.snakes {
            if matches!(snake.life, Life::AwaitingRespawn { .. }) {
                snake.life = Life::Dead;
            }
        }
        self.phase = MatchPhase::Finished(outcome);
        self.events.push(GameEvent::MatchEnded { outcome });
        tracing::info!(
            ?outcome,
            player_score = self.player_score(),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "match ended"
        );
    }
}
