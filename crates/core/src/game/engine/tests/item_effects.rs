//! Tests for item pickup, growth credit and control reversal.

use super::support::*;

const FAR_APPLE: Pos = Pos::new(28, 1);

fn player_facing(kind: ItemKind, head: Pos) -> Game {
    let mut arena = Arena::empty();
    arena.add_snake(Snake::new(EntityTag::Player, head));
    if kind != ItemKind::Apple {
        arena.add_item(ItemKind::Apple, FAR_APPLE);
    }
    arena.add_item(kind, Pos::new(head.x, head.y - 1));
    scenario(Difficulty::Medium, arena)
}

#[test]
fn apple_scores_now_and_grows_on_the_following_tick() {
    let mut game = player_facing(ItemKind::Apple, Pos::new(15, 30));

    game.step_group(TickGroup::Player);
    let player = snake(&game, EntityTag::Player);
    assert_eq!(player.score, 1);
    assert_eq!(player.body.len(), 3);
    assert_eq!(player.growth, 1);
    let replacement = game.state().apple().expect("eaten apple should be replaced");
    assert_ne!(replacement, Pos::new(15, 29));
    assert!(game.events().contains(&GameEvent::ItemEaten {
        entity: EntityTag::Player,
        kind: ItemKind::Apple,
        at: Pos::new(15, 29),
    }));

    game.step_group(TickGroup::Player);
    let player = snake(&game, EntityTag::Player);
    assert_eq!(player.body.len(), 4);
    assert_eq!(player.growth, 0);
}

#[test]
fn replacement_apple_avoids_cells_entered_later_in_the_same_step() {
    let entered = Pos::new(20, 4);
    let mut arena = Arena::empty();
    arena.add_snake(snake_with_body(EntityTag::RedBot, &[
        Pos::new(5, 5),
        Pos::new(5, 6),
        Pos::new(5, 7),
    ]));
    arena.add_snake(snake_with_body(EntityTag::OrangeBot, &[
        Pos::new(20, 5),
        Pos::new(20, 6),
        Pos::new(20, 7),
    ]));
    arena.add_item(ItemKind::Apple, Pos::new(5, 4));
    // Both bots sit in dead-end shafts; the only open interior cell is the one
    // the second bot is about to enter.
    for y in 0..GRID_HEIGHT {
        for x in 0..GRID_WIDTH {
            let pos = Pos::new(x, y);
            if pos != entered && arena.is_vacant(pos) {
                arena.add_wall(pos);
            }
        }
    }
    let mut game = scenario(Difficulty::Normal, arena);

    game.step_group(TickGroup::Ai);

    assert_eq!(snake(&game, EntityTag::RedBot).head(), Pos::new(5, 4));
    assert_eq!(snake(&game, EntityTag::OrangeBot).head(), entered);
    assert_eq!(snake(&game, EntityTag::RedBot).score, 1);
    let replacement = game.state().apple().expect("eaten apple should be replaced");
    assert!(
        game.state().snakes.iter().all(|snake| !snake.occupies(replacement)),
        "replacement landed on a body at {replacement}"
    );
}

#[test]
fn poison_kills_the_eater_after_it_moves() {
    let mut game = player_facing(ItemKind::Poison, Pos::new(15, 30));

    game.step_group(TickGroup::Player);

    assert!(game.events().contains(&GameEvent::EntityDied {
        entity: EntityTag::Player,
        at: Pos::new(15, 29),
        cause: DeathCause::Poison,
    }));
    assert!(matches!(
        game.outcome(),
        Some(MatchOutcome::Defeat { reason: EndReason::PlayerEliminated, .. })
    ));
    assert!(game.state().items.values().all(|item| item.kind != ItemKind::Poison));
}

#[test]
fn trap_reverses_input_for_thirty_own_ticks() {
    let mut game = player_facing(ItemKind::Trap, Pos::new(15, 35));

    game.step_group(TickGroup::Player);
    assert!(game.events().contains(&GameEvent::ControlsReversed { entity: EntityTag::Player }));
    assert_eq!(
        snake(&game, EntityTag::Player).reversal,
        Some(ControlReversal { remaining_ticks: REVERSAL_TICKS })
    );

    game.steer(Direction::Left).unwrap();
    assert_eq!(snake(&game, EntityTag::Player).pending, Direction::Right);
    assert_eq!(
        game.steer(Direction::Up),
        Err(InputRejected::Reversal { current: Direction::Up, requested: Direction::Down })
    );
    game.steer(Direction::Down).unwrap();
    assert_eq!(snake(&game, EntityTag::Player).pending, Direction::Up);

    for _ in 1..REVERSAL_TICKS {
        game.step_group(TickGroup::Player);
    }
    assert!(snake(&game, EntityTag::Player).reversal.is_some());
    game.step_group(TickGroup::Player);
    let player = snake(&game, EntityTag::Player);
    assert!(player.is_alive());
    assert_eq!(player.reversal, None);
    assert!(game.events().contains(&GameEvent::ControlsRestored { entity: EntityTag::Player }));
}

#[test]
fn warning_items_cannot_be_picked_up() {
    let mut arena = Arena::empty();
    arena.add_snake(Snake::new(EntityTag::Player, Pos::new(15, 30)));
    arena.add_item(ItemKind::Apple, FAR_APPLE);
    let poison = arena.add_item(ItemKind::Poison, Pos::new(15, 29));
    arena.items[poison].warning = true;
    arena.items[poison].spawned_at = Duration::from_secs(999);
    let mut game = scenario(Difficulty::Medium, arena);

    game.step_group(TickGroup::Player);

    assert!(snake(&game, EntityTag::Player).is_alive());
    assert!(game.state().items.contains_key(poison));
}
