//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating arena and match setup across many tests.
//! It does not own production gameplay logic.

use super::*;

/// Standard match with the countdown already finished.
pub(super) fn running_game(difficulty: Difficulty, seed: u64) -> Game {
    let mut game = Game::new(seed, difficulty);
    skip_countdown(&mut game);
    game
}

pub(super) fn skip_countdown(game: &mut Game) {
    game.advance(COUNTDOWN);
    assert_eq!(game.phase, MatchPhase::Running);
}

/// Tier values with every timed spawn switched off.
pub(super) fn quiet_config(difficulty: Difficulty) -> TierConfig {
    TierConfig {
        wall_interval: Duration::ZERO,
        poison_interval: Duration::ZERO,
        trap_interval: Duration::ZERO,
        ..TierConfig::for_difficulty(difficulty)
    }
}

/// Running match over `arena` with no timed spawns.
pub(super) fn scenario(difficulty: Difficulty, arena: Arena) -> Game {
    let mut game = Game::from_arena(7, quiet_config(difficulty), arena);
    skip_countdown(&mut game);
    game.drain_events();
    game
}

/// Snake of arbitrary shape, head first, heading away from its neck.
pub(super) fn snake_with_body(tag: EntityTag, cells: &[Pos]) -> Snake {
    let mut snake = Snake::new(tag, cells[0]);
    snake.body = cells.iter().copied().collect();
    let heading = Direction::between(cells[1], cells[0]).unwrap_or(Direction::Up);
    snake.direction = heading;
    snake.pending = heading;
    snake
}

pub(super) fn snake<'a>(game: &'a Game, tag: EntityTag) -> &'a Snake {
    game.state.snake(tag).unwrap()
}
