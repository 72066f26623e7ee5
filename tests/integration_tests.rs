//! Integration tests for the game loop pieces working together

use crossterm::event::{KeyCode, KeyEvent};

use blockfall::core::{Engine, EngineConfig, Shape, ShapeCatalog};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{GameView, Viewport};
use blockfall::types::{GameAction, Phase, TickResult};

fn press(engine: &mut Engine, code: KeyCode) -> bool {
    let action = handle_key_event(KeyEvent::from(code)).expect("mapped key");
    engine.apply_action(action)
}

fn i_only(seed: u32) -> Engine {
    let catalog = ShapeCatalog::new(vec![Shape::parse("####").unwrap()]);
    Engine::new(EngineConfig::with_shapes(catalog), seed).unwrap()
}

#[test]
fn test_game_lifecycle() {
    let mut engine = Engine::classic(12345);
    assert_eq!(engine.phase(), Phase::Stopped);
    assert!(!engine.wants_ticks());

    assert!(press(&mut engine, KeyCode::Enter));
    assert_eq!(engine.phase(), Phase::Playing);
    assert!(engine.wants_ticks());

    assert!(press(&mut engine, KeyCode::Char('p')));
    assert_eq!(engine.phase(), Phase::Paused);
    assert_eq!(engine.tick(), TickResult::Rejected);

    assert!(press(&mut engine, KeyCode::Char('p')));
    assert_eq!(engine.phase(), Phase::Playing);

    assert!(press(&mut engine, KeyCode::Char('r')));
    assert_eq!(engine.phase(), Phase::Stopped);
    assert!(!should_quit(KeyEvent::from(KeyCode::Char('r'))));
}

#[test]
fn test_keys_drive_the_active_piece() {
    let mut engine = i_only(1);
    press(&mut engine, KeyCode::Enter);

    assert!(press(&mut engine, KeyCode::Left));
    assert_eq!(engine.current_piece().unwrap().x, 2);
    assert!(press(&mut engine, KeyCode::Down));
    assert_eq!(engine.current_piece().unwrap().y, 1);
    assert!(press(&mut engine, KeyCode::Up));
    assert_eq!(engine.current_piece().unwrap().height(), 4);

    assert!(press(&mut engine, KeyCode::Char(' ')));
    assert_eq!(engine.grid().occupied_count(), 4);
    for y in 16..20 {
        assert!(engine.grid().is_occupied(2, y));
    }
}

#[test]
fn test_hard_drop_then_tick_scores_nothing() {
    let mut engine = i_only(99);
    engine.start();
    engine.hard_drop();
    assert_eq!(engine.tick(), TickResult::Fell);

    let snap = engine.snapshot();
    for x in 0..10 {
        let expected = (3..7).contains(&x);
        assert_eq!(snap.cell(x, 19) != 0, expected, "column {x}");
    }
    assert_eq!(snap.score, 0);
    assert_eq!(snap.level, 1);
}

#[test]
fn test_play_until_game_over_then_restart() {
    let mut engine = Engine::classic(7);
    engine.start();

    // Dropping everything in place stacks up to the top quickly
    let mut locks = 0;
    while engine.phase() == Phase::Playing {
        engine.apply_action(GameAction::HardDrop);
        locks += 1;
        assert!(locks < 200, "game should end");
    }
    assert_eq!(engine.phase(), Phase::GameOver);
    assert!(engine.current_piece().is_none());
    assert!(engine.last_event().unwrap().game_over);

    let fb = GameView::default().render(&engine.snapshot(), Viewport::new(80, 24));
    assert!((0..fb.height()).any(|y| fb.row_text(y).contains("GAME OVER")));

    assert!(!engine.apply_action(GameAction::Start));
    assert!(engine.apply_action(GameAction::Restart));
    assert_eq!(engine.phase(), Phase::Stopped);
    assert_eq!(engine.grid().occupied_count(), 0);
    assert_eq!(engine.score(), 0);
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "grid_width": 8,
        "grid_height": 12,
        "palette_size": 3,
        "base_tick_ms": 800,
        "shapes": [[[1, 1], [1, 1]], [[1, 1, 1], [1]]]
    }"#;
    let config: EngineConfig = serde_json::from_str(json).unwrap();
    let mut engine = Engine::new(config, 5).unwrap();

    assert_eq!(engine.grid().width(), 8);
    assert_eq!(engine.grid().height(), 12);
    assert_eq!(engine.tick_period_ms(), 800);

    engine.start();
    for _ in 0..30 {
        if engine.phase() != Phase::Playing {
            break;
        }
        let p = *engine.current_piece().unwrap();
        assert!(p.color.index() < 3);
        assert!(p.width() <= 3);
        engine.hard_drop();
    }
}

#[test]
fn test_invalid_config_is_rejected() {
    let config: EngineConfig = serde_json::from_str(r#"{ "shapes": [] }"#).unwrap();
    let err = Engine::new(config, 1).unwrap_err();
    assert_eq!(err.to_string(), "shape catalog is empty");
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::Start,
        GameAction::Rotate,
        GameAction::MoveLeft,
        GameAction::HardDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
    ];
    let mut a = Engine::classic(2024);
    let mut b = Engine::classic(2024);
    for action in script.iter().cycle().take(60) {
        assert_eq!(a.apply_action(*action), b.apply_action(*action));
        assert_eq!(a.tick(), b.tick());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
