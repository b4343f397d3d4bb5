//! Tests for movement and death resolution inside a single group step.

use super::support::*;

const FAR_APPLE: Pos = Pos::new(28, 1);

fn arena_with(snakes: Vec<Snake>) -> Arena {
    let mut arena = Arena::empty();
    for snake in snakes {
        arena.add_snake(snake);
    }
    arena.add_item(ItemKind::Apple, FAR_APPLE);
    arena
}

fn tail_loop_player() -> Snake {
    snake_with_body(EntityTag::Player, &[
        Pos::new(5, 5),
        Pos::new(5, 6),
        Pos::new(6, 6),
        Pos::new(6, 5),
    ])
}

#[test]
fn player_may_enter_its_own_vacating_tail() {
    let mut game = scenario(Difficulty::Normal, arena_with(vec![tail_loop_player()]));
    game.steer(Direction::Right).unwrap();

    game.step_group(TickGroup::Player);

    let player = snake(&game, EntityTag::Player);
    assert!(player.is_alive());
    assert_eq!(player.head(), Pos::new(6, 5));
    assert_eq!(player.body.len(), 4);
}

#[test]
fn growing_tail_does_not_vacate() {
    let mut player = tail_loop_player();
    player.growth = 1;
    let mut game = scenario(Difficulty::Normal, arena_with(vec![player]));
    game.steer(Direction::Right).unwrap();

    game.step_group(TickGroup::Player);

    assert_eq!(snake(&game, EntityTag::Player).life, Life::Dead);
    assert_eq!(
        game.phase(),
        MatchPhase::Finished(MatchOutcome::Defeat {
            reason: EndReason::PlayerEliminated,
            winner: None
        })
    );
}

#[test]
fn crossing_bots_both_die_and_leave_rubble() {
    let player = Snake::new(EntityTag::Player, Pos::new(20, 30));
    let red = snake_with_body(EntityTag::RedBot, &[
        Pos::new(10, 10),
        Pos::new(9, 10),
        Pos::new(8, 10),
    ]);
    let orange = snake_with_body(EntityTag::OrangeBot, &[
        Pos::new(11, 10),
        Pos::new(12, 10),
        Pos::new(13, 10),
    ]);
    let mut arena = arena_with(vec![player, red.clone(), orange.clone()]);
    for wall in [Pos::new(10, 9), Pos::new(10, 11), Pos::new(11, 9), Pos::new(11, 11)] {
        arena.add_wall(wall);
    }
    let mut game = scenario(Difficulty::Hard, arena);

    game.step_group(TickGroup::Ai);

    let deadline = game.elapsed() + RESPAWN_DELAY;
    for (tag, before) in [(EntityTag::RedBot, &red), (EntityTag::OrangeBot, &orange)] {
        let bot = snake(&game, tag);
        assert_eq!(bot.life, Life::AwaitingRespawn { at: deadline });
        assert_eq!(bot.body, before.body, "{tag:?} body should stay as rubble");
        assert!(game.events().contains(&GameEvent::EntityDied {
            entity: tag,
            at: before.head(),
            cause: DeathCause::Collision,
        }));
    }
    assert_eq!(game.phase(), MatchPhase::Running);
}

#[test]
fn leaving_the_grid_eliminates_the_player() {
    let player = snake_with_body(EntityTag::Player, &[
        Pos::new(5, 0),
        Pos::new(5, 1),
        Pos::new(5, 2),
    ]);
    let bot = Snake::new(EntityTag::RedBot, Pos::new(20, 20));
    let mut game = scenario(Difficulty::Normal, arena_with(vec![player, bot]));

    game.step_group(TickGroup::Player);

    assert!(game.events().contains(&GameEvent::EntityDied {
        entity: EntityTag::Player,
        at: Pos::new(5, 0),
        cause: DeathCause::OutOfBounds,
    }));
    assert_eq!(
        game.outcome(),
        Some(MatchOutcome::Defeat {
            reason: EndReason::PlayerEliminated,
            winner: Some(EntityTag::RedBot)
        })
    );
}

#[test]
fn idle_group_bodies_block_in_full() {
    let player = snake_with_body(EntityTag::Player, &[
        Pos::new(9, 12),
        Pos::new(8, 12),
        Pos::new(7, 12),
    ]);
    let bot = Snake::new(EntityTag::RedBot, Pos::new(10, 10));
    let mut game = scenario(Difficulty::Normal, arena_with(vec![player, bot]));

    game.step_group(TickGroup::Player);

    assert!(game.events().contains(&GameEvent::EntityDied {
        entity: EntityTag::Player,
        at: Pos::new(9, 12),
        cause: DeathCause::Collision,
    }));
}

#[test]
fn rubble_blocks_until_respawn() {
    let player = snake_with_body(EntityTag::Player, &[
        Pos::new(9, 11),
        Pos::new(8, 11),
        Pos::new(7, 11),
    ]);
    let mut bot = Snake::new(EntityTag::RedBot, Pos::new(10, 10));
    bot.life = Life::AwaitingRespawn { at: Duration::from_secs(60) };
    let mut game = scenario(Difficulty::Normal, arena_with(vec![player, bot]));

    game.step_group(TickGroup::Player);

    assert_eq!(snake(&game, EntityTag::Player).life, Life::Dead);
}

#[test]
fn telegraphed_wall_is_not_yet_a_collider() {
    let player = Snake::new(EntityTag::Player, Pos::new(15, 30));
    let mut arena = arena_with(vec![player]);
    arena.add_wall(Pos::new(15, 29));
    arena.hazards[0].warning = true;
    arena.hazards[0].spawned_at = Duration::from_secs(999);
    let mut game = scenario(Difficulty::Normal, arena);

    game.step_group(TickGroup::Player);

    let player = snake(&game, EntityTag::Player);
    assert!(player.is_alive());
    assert_eq!(player.head(), Pos::new(15, 29));
}
