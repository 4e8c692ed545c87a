//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, DetailTab};
use crate::types::PokeType;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.list_loading = true;
            state.message = None;
            DispatchResult::changed_with(Effect::LoadCatalog {
                limit: state.catalog_limit,
            })
        }

        Action::CatalogDidLoad(entries) => {
            state.entries = entries;
            state.list_loading = false;
            state.reset_page();
            DispatchResult::changed()
        }

        Action::CatalogDidError(error) => {
            state.list_loading = false;
            state.message = Some(format!("Catalog error: {error}"));
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.search_active {
                return DispatchResult::unchanged();
            }
            state.search_active = true;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search_active && state.search_query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search_active = false;
            state.search_query.clear();
            state.reset_page();
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            state.search_active = false;
            state.reset_page();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search_query.push(ch);
            state.reset_page();
            DispatchResult::changed()
        }

        Action::SearchBackspace => {
            if state.search_query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.reset_page();
            DispatchResult::changed()
        }

        Action::TypeFilterSet(filter) => {
            if state.type_filter == filter {
                return DispatchResult::unchanged();
            }
            state.type_filter = filter;
            state.reset_page();
            DispatchResult::changed()
        }

        Action::TypeFilterNext => cycle_filter(state, 1),
        Action::TypeFilterPrev => cycle_filter(state, -1),

        Action::TypeFilterClear => {
            if state.type_filter.is_none() {
                return DispatchResult::unchanged();
            }
            state.type_filter = None;
            state.reset_page();
            DispatchResult::changed()
        }

        Action::PageGo(page) => go_to_page(state, page),

        Action::PageNext => {
            let target = (state.page + 1).min(state.total_filtered_pages().max(1));
            go_to_page(state, target)
        }

        Action::PagePrev => go_to_page(state, state.page.saturating_sub(1).max(1)),

        Action::PageFirst => go_to_page(state, 1),

        Action::PageLast => go_to_page(state, state.total_filtered_pages()),

        Action::GotoStart => {
            if state.goto_active {
                return DispatchResult::unchanged();
            }
            state.goto_active = true;
            state.goto_input.clear();
            DispatchResult::changed()
        }

        Action::GotoCancel => {
            if !state.goto_active {
                return DispatchResult::unchanged();
            }
            state.goto_active = false;
            state.goto_input.clear();
            DispatchResult::changed()
        }

        Action::GotoSubmit => {
            if !state.goto_active {
                return DispatchResult::unchanged();
            }
            state.goto_active = false;
            let target = state.goto_input.parse::<usize>().ok();
            state.goto_input.clear();
            if let Some(page) = target {
                let _ = go_to_page(state, page);
            }
            DispatchResult::changed()
        }

        Action::GotoInput(ch) => {
            if !ch.is_ascii_digit() {
                return DispatchResult::unchanged();
            }
            state.goto_input.push(ch);
            DispatchResult::changed()
        }

        Action::GotoBackspace => {
            if state.goto_input.pop().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }

        Action::Hover(target) => {
            let bounded = target.filter(|index| *index < state.page_slice().len());
            if state.hovered == bounded {
                return DispatchResult::unchanged();
            }
            state.hovered = bounded;
            DispatchResult::changed()
        }

        Action::EntrySelect(index) => {
            let Some(name) = state.page_slice().get(index).map(|e| e.name.clone()) else {
                return DispatchResult::unchanged();
            };
            state.selected = Some(name.clone());
            state.detail_generation += 1;
            state.detail_loading = true;
            state.reset_detail_cursors();
            DispatchResult::changed_with(Effect::LoadDetail {
                name,
                generation: state.detail_generation,
            })
        }

        Action::Deselect => {
            if state.selected.is_none() {
                return DispatchResult::unchanged();
            }
            // Closes the overlay; in-flight fetches keep running and are
            // dropped by the generation guard when they resolve.
            state.selected = None;
            state.detail_loading = false;
            DispatchResult::changed()
        }

        Action::DetailDidLoad {
            generation,
            abilities,
            moves,
        } => {
            if !detail_result_current(state, generation) {
                return DispatchResult::unchanged();
            }
            state.abilities = abilities;
            state.moves = moves;
            state.detail_loading = false;
            DispatchResult::changed()
        }

        Action::DetailDidError { generation, error } => {
            if !detail_result_current(state, generation) {
                return DispatchResult::unchanged();
            }
            // Failures resolve to empty, renderable lists.
            state.abilities = Vec::new();
            state.moves = Vec::new();
            state.detail_loading = false;
            state.message = Some(format!("Detail error: {error}"));
            DispatchResult::changed()
        }

        Action::DetailTabNext => cycle_detail_tab(state, 1),
        Action::DetailTabPrev => cycle_detail_tab(state, -1),

        Action::AbilitySelect(index) => {
            if state.selected.is_none() || state.abilities.is_empty() {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(state.abilities.len() - 1);
            if bounded == state.ability_index {
                return DispatchResult::unchanged();
            }
            state.ability_index = bounded;
            DispatchResult::changed()
        }

        Action::MoveSelect(index) => {
            if state.selected.is_none() || state.moves.is_empty() {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(state.moves.len() - 1);
            if bounded == state.move_index {
                return DispatchResult::unchanged();
            }
            state.move_index = bounded;
            DispatchResult::changed()
        }

        Action::Tick => {
            if state.list_loading || state.detail_loading {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// A detail result commits only while the selection that issued it is still
/// the current one. Deselecting or re-selecting strands the old result.
fn detail_result_current(state: &AppState, generation: u64) -> bool {
    state.selected.is_some() && generation == state.detail_generation
}

fn go_to_page(state: &mut AppState, page: usize) -> DispatchResult<Effect> {
    let total = state.total_filtered_pages();
    if page < 1 || page > total || page == state.page {
        return DispatchResult::unchanged();
    }
    state.page = page;
    state.hovered = None;
    DispatchResult::changed()
}

/// Cycle None -> first tag -> ... -> last tag -> None, as the header filter
/// select does.
fn cycle_filter(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let slots = PokeType::ALL.len() as i16 + 1;
    let current = match state.type_filter {
        None => 0,
        Some(filter) => {
            PokeType::ALL
                .iter()
                .position(|t| *t == filter)
                .unwrap_or(0) as i16
                + 1
        }
    };
    let next = (current + step).rem_euclid(slots);
    state.type_filter = if next == 0 {
        None
    } else {
        Some(PokeType::ALL[(next - 1) as usize])
    };
    state.reset_page();
    DispatchResult::changed()
}

fn cycle_detail_tab(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    if state.selected.is_none() {
        return DispatchResult::unchanged();
    }
    let tabs = DetailTab::ALL;
    let current = tabs
        .iter()
        .position(|tab| *tab == state.detail_tab)
        .unwrap_or(0) as i16;
    let next = (current + step).rem_euclid(tabs.len() as i16);
    state.detail_tab = tabs[next as usize];
    DispatchResult::changed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Entry, Overlay, PAGE_SIZE};

    fn entry(name: &str, types: &[&str]) -> Entry {
        Entry {
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            stats: Vec::new(),
            artwork_url: None,
        }
    }

    fn loaded_state(count: usize) -> AppState {
        let entries = (0..count)
            .map(|i| entry(&format!("mon-{i:03}"), &["normal"]))
            .collect();
        AppState {
            entries,
            ..Default::default()
        }
    }

    #[test]
    fn test_init_emits_catalog_load() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);
        assert!(result.changed);
        assert!(state.list_loading);
        assert_eq!(
            result.effects,
            vec![Effect::LoadCatalog {
                limit: state.catalog_limit
            }]
        );
    }

    #[test]
    fn test_catalog_load_replaces_entries_once() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::CatalogDidLoad(vec![entry("pikachu", &["electric"])]),
        );
        assert!(!state.list_loading);
        assert_eq!(state.entries.len(), 1);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_catalog_error_leaves_valid_empty_state() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        reducer(&mut state, Action::CatalogDidError("boom".into()));
        assert!(!state.list_loading);
        assert!(state.entries.is_empty());
        assert_eq!(state.total_filtered_pages(), 0);
        assert!(state.message.as_deref().unwrap().contains("boom"));
    }

    #[test]
    fn test_page_go_rejects_out_of_range() {
        let mut state = loaded_state(20); // 2 pages at 18/page

        assert!(!reducer(&mut state, Action::PageGo(0)).changed);
        assert!(!reducer(&mut state, Action::PageGo(3)).changed);
        assert_eq!(state.page, 1);

        assert!(reducer(&mut state, Action::PageGo(2)).changed);
        assert_eq!(state.page, 2);
        assert_eq!(state.page_slice().len(), 2);
    }

    #[test]
    fn test_page_next_prev_clamp() {
        let mut state = loaded_state(PAGE_SIZE + 1);
        assert!(!reducer(&mut state, Action::PagePrev).changed);
        assert!(reducer(&mut state, Action::PageNext).changed);
        assert_eq!(state.page, 2);
        assert!(!reducer(&mut state, Action::PageNext).changed);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_page_first_last() {
        let mut state = loaded_state(PAGE_SIZE * 3);
        reducer(&mut state, Action::PageGo(2));
        assert!(reducer(&mut state, Action::PageLast).changed);
        assert_eq!(state.page, 3);
        assert!(reducer(&mut state, Action::PageFirst).changed);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_search_change_resets_page() {
        let mut state = loaded_state(40);
        reducer(&mut state, Action::PageGo(3));
        assert_eq!(state.page, 3);
        reducer(&mut state, Action::SearchInput('m'));
        assert_eq!(state.page, 1);

        reducer(&mut state, Action::PageGo(2));
        reducer(&mut state, Action::SearchBackspace);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = loaded_state(40);
        reducer(&mut state, Action::PageGo(2));
        reducer(&mut state, Action::TypeFilterSet(Some(PokeType::Normal)));
        assert_eq!(state.page, 1);

        reducer(&mut state, Action::PageGo(2));
        reducer(&mut state, Action::TypeFilterClear);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_filter_cycle_wraps_through_all() {
        let mut state = loaded_state(1);
        reducer(&mut state, Action::TypeFilterNext);
        assert_eq!(state.type_filter, Some(PokeType::Normal));
        reducer(&mut state, Action::TypeFilterPrev);
        assert_eq!(state.type_filter, None);
        reducer(&mut state, Action::TypeFilterPrev);
        assert_eq!(state.type_filter, Some(PokeType::Fairy));
    }

    #[test]
    fn test_hover_bounds() {
        let mut state = loaded_state(5);
        assert!(reducer(&mut state, Action::Hover(Some(4))).changed);
        assert_eq!(state.hovered, Some(4));
        // Out-of-slice hover clears rather than points at nothing.
        assert!(reducer(&mut state, Action::Hover(Some(5))).changed);
        assert_eq!(state.hovered, None);
    }

    #[test]
    fn test_select_opens_loading_overlay_and_emits_fetch() {
        let mut state = loaded_state(3);
        let result = reducer(&mut state, Action::EntrySelect(1));
        assert!(result.changed);
        assert_eq!(state.overlay(), Overlay::Loading);
        assert_eq!(state.selected.as_deref(), Some("mon-001"));
        assert_eq!(
            result.effects,
            vec![Effect::LoadDetail {
                name: "mon-001".into(),
                generation: 1
            }]
        );
    }

    #[test]
    fn test_select_out_of_slice_is_noop() {
        let mut state = loaded_state(3);
        assert!(!reducer(&mut state, Action::EntrySelect(7)).changed);
        assert_eq!(state.overlay(), Overlay::Closed);
    }

    #[test]
    fn test_detail_commit_moves_overlay_to_ready() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntrySelect(0));
        let result = reducer(
            &mut state,
            Action::DetailDidLoad {
                generation: 1,
                abilities: vec!["static".into()],
                moves: vec!["thunder-shock".into()],
            },
        );
        assert!(result.changed);
        assert_eq!(state.overlay(), Overlay::Ready);
        assert_eq!(state.abilities, vec!["static".to_string()]);
        assert_eq!(state.moves, vec!["thunder-shock".to_string()]);
    }

    #[test]
    fn test_last_selection_wins_even_if_it_resolves_first() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntrySelect(0)); // generation 1
        reducer(&mut state, Action::EntrySelect(1)); // generation 2

        // B's fetch resolves first and commits.
        reducer(
            &mut state,
            Action::DetailDidLoad {
                generation: 2,
                abilities: vec!["b-ability".into()],
                moves: vec!["b-move".into()],
            },
        );
        assert_eq!(state.overlay(), Overlay::Ready);

        // A's stale fetch arrives afterwards and is dropped.
        let stale = reducer(
            &mut state,
            Action::DetailDidLoad {
                generation: 1,
                abilities: vec!["a-ability".into()],
                moves: vec!["a-move".into()],
            },
        );
        assert!(!stale.changed);
        assert_eq!(state.abilities, vec!["b-ability".to_string()]);
        assert_eq!(state.moves, vec!["b-move".to_string()]);
    }

    #[test]
    fn test_deselect_before_resolution_stays_closed() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntrySelect(0));
        reducer(&mut state, Action::Deselect);
        assert_eq!(state.overlay(), Overlay::Closed);

        let stale = reducer(
            &mut state,
            Action::DetailDidLoad {
                generation: 1,
                abilities: vec!["late".into()],
                moves: vec!["late".into()],
            },
        );
        assert!(!stale.changed);
        assert_eq!(state.overlay(), Overlay::Closed);
        assert!(state.abilities.is_empty());
    }

    #[test]
    fn test_reselect_discards_stale_and_reloads() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntrySelect(0));
        reducer(
            &mut state,
            Action::DetailDidLoad {
                generation: 1,
                abilities: vec!["old".into()],
                moves: vec![],
            },
        );
        assert_eq!(state.overlay(), Overlay::Ready);

        // Re-select while ready: back to loading with a fresh generation.
        let result = reducer(&mut state, Action::EntrySelect(2));
        assert_eq!(state.overlay(), Overlay::Loading);
        assert_eq!(
            result.effects,
            vec![Effect::LoadDetail {
                name: "mon-002".into(),
                generation: 2
            }]
        );
    }

    #[test]
    fn test_detail_error_yields_ready_with_empty_lists() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::EntrySelect(0));
        let result = reducer(
            &mut state,
            Action::DetailDidError {
                generation: 1,
                error: "timeout".into(),
            },
        );
        assert!(result.changed);
        assert_eq!(state.overlay(), Overlay::Ready);
        assert!(state.abilities.is_empty());
        assert!(state.moves.is_empty());
        assert!(state.message.is_some());
    }

    #[test]
    fn test_goto_minibuffer_flow() {
        let mut state = loaded_state(40);
        reducer(&mut state, Action::GotoStart);
        assert!(state.goto_active);
        reducer(&mut state, Action::GotoInput('2'));
        assert!(!reducer(&mut state, Action::GotoInput('x')).changed);
        reducer(&mut state, Action::GotoSubmit);
        assert!(!state.goto_active);
        assert_eq!(state.page, 2);

        // Out-of-range submit closes the buffer but leaves the page alone.
        reducer(&mut state, Action::GotoStart);
        reducer(&mut state, Action::GotoInput('9'));
        reducer(&mut state, Action::GotoSubmit);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_detail_tabs_cycle_only_while_open() {
        let mut state = loaded_state(3);
        assert!(!reducer(&mut state, Action::DetailTabNext).changed);

        reducer(&mut state, Action::EntrySelect(0));
        reducer(&mut state, Action::DetailTabNext);
        assert_eq!(state.detail_tab, DetailTab::Abilities);
        reducer(&mut state, Action::DetailTabPrev);
        reducer(&mut state, Action::DetailTabPrev);
        assert_eq!(state.detail_tab, DetailTab::Stats);
    }

    #[test]
    fn test_tick_only_rerenders_while_loading() {
        let mut state = loaded_state(3);
        assert!(!reducer(&mut state, Action::Tick).changed);
        state.list_loading = true;
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick, 1);
    }
}
