//! Action and store tests
//!
//! EffectStore-level checks for the catalog flow, plus component keyboard
//! dispatch through TestHarness.

use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore, NumericComponentId};
use pokegrid::{
    action::Action,
    components::{CatalogGrid, CatalogGridProps, Component},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Entry},
    types::PokeType,
};

fn entry(name: &str, types: &[&str]) -> Entry {
    Entry {
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: Vec::new(),
        artwork_url: None,
    }
}

#[test]
fn test_store_init_emits_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().entries.is_empty());

    let result = store.dispatch(Action::Init);
    assert!(result.changed, "State should change");
    assert!(store.state().list_loading);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::LoadCatalog { .. }));
}

#[test]
fn test_store_catalog_load() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::Init);
    store.dispatch(Action::CatalogDidLoad(vec![
        entry("bulbasaur", &["grass", "poison"]),
        entry("charmander", &["fire"]),
    ]));

    assert!(!store.state().list_loading);
    assert_eq!(store.state().entries.len(), 2);
    assert_eq!(store.state().filtered_count(), 2);
}

#[test]
fn test_store_filter_cycle() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().type_filter, None);
    store.dispatch(Action::TypeFilterNext);
    assert_eq!(store.state().type_filter, Some(PokeType::Normal));
    store.dispatch(Action::TypeFilterClear);
    assert_eq!(store.state().type_filter, None);
}

#[test]
fn test_grid_keyboard_events() {
    let mut harness = TestHarness::<AppState, Action>::new(AppState {
        entries: (0..6).map(|i| entry(&format!("m{i}"), &["bug"])).collect(),
        ..Default::default()
    });
    let mut component = CatalogGrid::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("l", |state, event| {
        component
            .handle_event(
                &event.kind,
                CatalogGridProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::Hover(Some(0)));
}

#[test]
fn test_grid_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut component = CatalogGrid::default();

    let actions = harness.send_keys::<NumericComponentId, _, _>("l j n", |state, event| {
        component
            .handle_event(
                &event.kind,
                CatalogGridProps {
                    state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_action_categories() {
    let did_load = Action::CatalogDidLoad(Vec::new());
    let page = Action::PageNext;
    let tick = Action::Tick;

    // Categories are inferred from naming convention
    assert_eq!(did_load.category(), Some("catalog_did"));
    assert_eq!(page.category(), Some("page"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_catalog_did());
    assert!(page.is_page());
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::Init,
        Action::CatalogDidLoad(vec![entry("ditto", &["normal"])]),
    ];

    assert_emitted!(actions, Action::Init);
    assert_emitted!(actions, Action::CatalogDidLoad(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::CatalogDidError(_));
}
