use std::time::Duration;

use arena::{
    AdvanceStopReason, Difficulty, Direction, EntityTag, Game, InputPayload, ItemKind,
    MatchPhase, MemoryLedger, ScoreLedger,
};

#[test]
fn every_tier_builds_its_standard_arena() {
    for difficulty in Difficulty::ALL {
        let game = Game::new(1, difficulty);
        let state = game.state();
        assert_eq!((state.width, state.height), (30, 40));
        assert!(state.player().is_some());
        assert!(state.apple().is_some(), "{difficulty:?} should start with an apple");
        assert_eq!(
            state.snake(EntityTag::OrangeBot).is_some(),
            difficulty == Difficulty::Hard
        );
        assert_eq!(game.phase(), MatchPhase::Countdown);
        assert_eq!(game.remaining(), game.config().duration);
    }
}

#[test]
fn hard_match_survives_a_minute_of_frames_without_panicking() {
    let mut game = Game::new(2024, Difficulty::Hard);
    for _ in 0..3_750 {
        let result = game.advance(Duration::from_millis(16));
        if let AdvanceStopReason::Finished(_) = result.stop_reason {
            break;
        }
        let state = game.state();
        let apples = state.items.values().filter(|item| item.kind == ItemKind::Apple).count();
        assert_eq!(apples, 1, "exactly one apple is on the board at all times");
    }
    let mut ledger = MemoryLedger::default();
    if game.outcome().is_some() {
        assert!(game.record_best_score(&mut ledger).is_some());
    } else {
        assert_eq!(game.record_best_score(&mut ledger), None);
    }
    assert!(ledger.best_score(Difficulty::Hard) <= game.player_score());
}

#[test]
fn journal_records_each_host_call() {
    let mut game = Game::new(3, Difficulty::Normal);
    game.advance(Duration::from_secs(3));
    let _ = game.steer(Direction::Left);
    game.toggle_pause();
    game.abort();
    let payloads: Vec<&InputPayload> =
        game.journal().inputs.iter().map(|record| &record.payload).collect();
    assert_eq!(payloads, vec![
        &InputPayload::Advance { dt: Duration::from_secs(3) },
        &InputPayload::Steer { direction: Direction::Left },
        &InputPayload::TogglePause,
        &InputPayload::Abort,
    ]);
}
