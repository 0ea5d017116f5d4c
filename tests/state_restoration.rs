mod common;

use common::*;
use crossterm::event::KeyCode;
use navstack::navigation::{ComponentContext, SavedState};
use navstack::persistence::{self, StateError};
use navstack::screens::{ScreenConfiguration, SCREEN_STACK_KEY};
use navstack::ui::app::App;
use navstack::ui::input::handle_key;
use proptest::prelude::*;
use tempfile::TempDir;

fn saved_with_stack(stack: serde_json::Value) -> SavedState {
    let mut map = serde_json::Map::new();
    map.insert(SCREEN_STACK_KEY.to_string(), stack);
    serde_json::from_value(serde_json::Value::Object(map)).unwrap()
}

// -- Round trip -------------------------------------------------------------

#[test]
fn saved_stack_restores_same_configurations() {
    let (root, _) = make_root();
    with_screen_a(&active(&root), |a| {
        a.update_text("hello");
        a.submit();
    });
    let saved = root.context().state_keeper().save().unwrap();

    let (restored, exits) = make_root_with(Some(saved));

    assert_eq!(
        restored.configurations(),
        vec![ScreenConfiguration::ScreenA, screen_b("hello")]
    );
    with_screen_b(&active(&restored), |b| assert_eq!(b.text(), "hello"));
    assert_eq!(exits.get(), 0);
}

#[test]
fn restored_screen_a_keeps_its_text() {
    let (root, _) = make_root();
    with_screen_a(&active(&root), |a| a.update_text("draft"));
    root.push(screen_b("next"));
    let saved = root.context().state_keeper().save().unwrap();

    let (restored, _) = make_root_with(Some(saved));
    restored.pop();

    with_screen_a(&active(&restored), |a| assert_eq!(a.text(), "draft"));
}

#[test]
fn popped_entries_are_not_saved() {
    let (root, _) = make_root();
    root.push(screen_b("gone"));
    root.pop();
    let saved = root.context().state_keeper().save().unwrap();

    let (restored, _) = make_root_with(Some(saved));
    assert_eq!(restored.configurations(), vec![ScreenConfiguration::ScreenA]);
}

#[test]
fn stack_encoding_is_tagged_json() {
    let (root, _) = make_root();
    root.push(screen_b("hi"));
    let saved = root.context().state_keeper().save().unwrap();

    assert_eq!(
        saved.get(SCREEN_STACK_KEY),
        Some(&serde_json::json!([
            { "screen": "ScreenA" },
            { "screen": "ScreenB", "text": "hi" }
        ]))
    );
}

#[test]
fn app_state_collected_before_drop_restores_after_restart() {
    let context = ComponentContext::root(None);
    let mut app = App::new(context.clone(), &navstack::config::UiConfig::default());
    type_text(&mut app, "hello");
    handle_key(&mut app, press_key(KeyCode::Enter));

    let saved = app.save_state().unwrap();
    drop(app);
    context.lifecycle().destroy();

    let (restored, _) = make_root_with(Some(saved));
    assert_eq!(
        restored.configurations(),
        vec![ScreenConfiguration::ScreenA, screen_b("hello")]
    );
    restored.pop();
    with_screen_a(&active(&restored), |a| assert_eq!(a.text(), "hello"));
}

#[test]
fn state_collected_after_drop_holds_no_stack() {
    let context = ComponentContext::root(None);
    let mut app = App::new(context.clone(), &navstack::config::UiConfig::default());
    handle_key(&mut app, press_key(KeyCode::Enter));
    drop(app);

    let saved = context.state_keeper().save().unwrap();
    assert!(saved.get(SCREEN_STACK_KEY).is_none());
}

proptest! {
    #[test]
    fn any_stack_encodes_and_decodes_unchanged(
        stack in prop::collection::vec(configuration(), 1..16)
    ) {
        let encoded = serde_json::to_value(&stack).unwrap();
        let decoded: Vec<ScreenConfiguration> = serde_json::from_value(encoded).unwrap();
        prop_assert_eq!(&decoded, &stack);

        let (root, _) = make_root_with(Some(saved_with_stack(serde_json::to_value(&stack).unwrap())));
        prop_assert_eq!(root.configurations(), stack);
    }
}

// -- Fallbacks --------------------------------------------------------------

#[test]
fn empty_saved_stack_falls_back_to_screen_a() {
    let (root, _) = make_root_with(Some(saved_with_stack(serde_json::json!([]))));
    assert_eq!(root.configurations(), vec![ScreenConfiguration::ScreenA]);
}

#[test]
fn unknown_configuration_falls_back_to_screen_a() {
    let (root, _) = make_root_with(Some(saved_with_stack(serde_json::json!([
        { "screen": "ScreenC" }
    ]))));
    assert_eq!(root.configurations(), vec![ScreenConfiguration::ScreenA]);
}

#[test]
fn screen_b_without_text_falls_back_to_screen_a() {
    let (root, _) = make_root_with(Some(saved_with_stack(serde_json::json!([
        { "screen": "ScreenA" },
        { "screen": "ScreenB" }
    ]))));
    assert_eq!(root.configurations(), vec![ScreenConfiguration::ScreenA]);
}

#[test]
fn restored_stack_may_start_with_screen_b() {
    let (root, exits) = make_root_with(Some(saved_with_stack(serde_json::json!([
        { "screen": "ScreenB", "text": "only" }
    ]))));
    assert_eq!(root.configurations(), vec![screen_b("only")]);

    with_screen_b(&active(&root), |b| b.back());
    assert_eq!(exits.get(), 1);
}

// -- State file -------------------------------------------------------------

#[test]
fn state_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let (root, _) = make_root();
    root.push(screen_b("persisted"));
    let saved = root.context().state_keeper().save().unwrap();
    persistence::save(&path, &saved).unwrap();

    let loaded = persistence::load(&path).unwrap().expect("state file exists");
    assert_eq!(loaded, saved);

    let (restored, _) = make_root_with(Some(loaded));
    assert_eq!(
        restored.configurations(),
        vec![ScreenConfiguration::ScreenA, screen_b("persisted")]
    );
}

#[test]
fn missing_state_file_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let loaded = persistence::load(&dir.path().join("absent.json")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn corrupt_state_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").unwrap();

    match persistence::load(&path).unwrap_err() {
        StateError::Json { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("Expected Json error, got {other:?}"),
    }
}

#[test]
fn clear_removes_file_and_tolerates_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    persistence::save(&path, &SavedState::default()).unwrap();
    assert!(path.exists());

    persistence::clear(&path).unwrap();
    assert!(!path.exists());
    persistence::clear(&path).unwrap();
}
