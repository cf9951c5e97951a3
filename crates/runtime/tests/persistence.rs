//! Save/restore reconstruction guarantees.

use game_core::{Action, Fighter, GameConfig, InvKey, Position, Rgb};
use game_content::{ActorTemplate, ItemCatalog};
use runtime::{GameSession, SaveGame, StaticFloor};

fn player_template() -> ActorTemplate {
    ActorTemplate {
        name: "Player".to_string(),
        glyph: '@',
        color: Rgb(255, 255, 255),
        fighter: Fighter::new(30, 0, 1),
        inventory_capacity: 26,
    }
}

fn orc_template() -> ActorTemplate {
    ActorTemplate {
        name: "Orc".to_string(),
        glyph: 'o',
        color: Rgb(63, 127, 63),
        fighter: Fighter::new(10, 0, 1),
        inventory_capacity: 0,
    }
}

fn busy_session(seed: u64) -> GameSession {
    let items = ItemCatalog::builtin();
    let floor = StaticFloor::parse("@....o....>")
        .with_npc(orc_template(), Position::new(5, 0))
        .with_item(items.get("health_potion").unwrap().clone(), Position::new(1, 0))
        .with_item(items.get("sword").unwrap().clone(), Position::new(1, 0));
    GameSession::new(GameConfig::default(), seed, &player_template(), Box::new(floor))
}

/// Plays a few turns so the save captures mid-game structure: carried
/// stacks, a wielded weapon, a moved orc, and a part-spent queue.
fn advance(session: &mut GameSession) {
    session.run_until_player().unwrap();
    session.perform_player_action(Action::Move { dx: 1, dy: 0 }).unwrap();
    session.run_until_player().unwrap();
    session.perform_player_action(Action::PickUp).unwrap();
    session.run_until_player().unwrap();
    session.perform_player_action(Action::PickUp).unwrap();
    session.run_until_player().unwrap();
    session
        .perform_player_action(Action::Wield { key: InvKey('b') })
        .unwrap();
    session.run_until_player().unwrap();
}

#[test]
fn a_restored_session_continues_exactly_like_the_original() {
    let mut original = busy_session(11);
    advance(&mut original);

    let bytes = original.snapshot().encode().unwrap();
    let save = SaveGame::decode(&bytes).unwrap();
    let generator = StaticFloor::parse("@....o....>");
    let mut restored = GameSession::restore(save, 99, Box::new(generator));

    assert_eq!(original.state(), restored.state());
    assert_eq!(original.log(), restored.log());
    assert_eq!(original.current_tick(), restored.current_tick());
    assert_eq!(original.depth(), restored.depth());

    // Deterministic continuations (no rolls involved) stay in lockstep,
    // including tie-break ordering from the reconstructed queue.
    for _ in 0..4 {
        let a = original.perform_player_action(Action::Wait).unwrap();
        let b = restored.perform_player_action(Action::Wait).unwrap();
        assert_eq!(a, b);
        assert_eq!(original.run_until_player().unwrap(), restored.run_until_player().unwrap());
        assert_eq!(original.current_tick(), restored.current_tick());
        assert_eq!(
            original.state().entities.player().position,
            restored.state().entities.player().position
        );
    }
}

#[test]
fn saves_round_trip_through_the_filesystem() {
    let mut session = busy_session(3);
    advance(&mut session);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savegame.bin");
    session.snapshot().write_to(&path).unwrap();

    let save = SaveGame::read_from(&path).unwrap();
    assert_eq!(save.state, *session.state());
    assert_eq!(save.depth, session.depth());
    assert_eq!(save.log, *session.log());
}

#[test]
fn decoding_garbage_reports_a_save_error() {
    let result = SaveGame::decode(&[0xDE, 0xAD, 0xBE, 0xEF]);
    assert!(result.is_err());
}
