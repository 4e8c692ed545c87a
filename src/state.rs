use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use ratatui::style::Color;

use crate::types::{color_for, PokeType};

/// Entries shown per page, as in the source catalog.
pub const PAGE_SIZE: usize = 18;
/// Default cap on the catalog index fetch.
pub const DEFAULT_CATALOG_LIMIT: usize = 10_000;
/// Cells per grid row.
pub const GRID_COLS: usize = 6;

/// One catalog item. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    /// Raw type tags in wire order. Tags outside the known set are kept;
    /// display lookups for them degrade to empty/transparent.
    pub types: Vec<String>,
    pub stats: Vec<EntryStat>,
    pub artwork_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryStat {
    pub name: String,
    pub value: u16,
}

/// Detail overlay lifecycle. Open iff a selection exists.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Overlay {
    Closed,
    Loading,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DetailTab {
    Types,
    Abilities,
    Moves,
    Stats,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Types,
        DetailTab::Abilities,
        DetailTab::Moves,
        DetailTab::Stats,
    ];
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppState {
    /// Full catalog, loaded once at startup and never mutated afterwards.
    pub entries: Vec<Entry>,
    /// Current page, 1-based.
    pub page: usize,
    pub search_query: String,
    pub search_active: bool,
    pub type_filter: Option<PokeType>,
    /// Keyboard cursor into the current page slice; the TUI stand-in for
    /// pointer hover.
    pub hovered: Option<usize>,

    /// Selected entry by name (stable key). `Some` iff the overlay is open.
    pub selected: Option<String>,
    /// Bumped on every select; async detail results carry the generation
    /// they were issued under and are dropped if it no longer matches.
    pub detail_generation: u64,
    pub detail_loading: bool,
    /// Ability/move names for the selection. Replaced wholesale on each
    /// commit; deliberately kept across deselect.
    pub abilities: Vec<String>,
    pub moves: Vec<String>,
    pub detail_tab: DetailTab,
    pub ability_index: usize,
    pub move_index: usize,

    /// Go-to-page minibuffer.
    pub goto_active: bool,
    pub goto_input: String,

    pub list_loading: bool,
    pub message: Option<String>,
    pub tick: u64,
    /// Cap on the catalog index fetch, set once from the CLI.
    pub catalog_limit: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            page: 1,
            search_query: String::new(),
            search_active: false,
            type_filter: None,
            hovered: None,
            selected: None,
            detail_generation: 0,
            detail_loading: false,
            abilities: Vec::new(),
            moves: Vec::new(),
            detail_tab: DetailTab::Types,
            ability_index: 0,
            move_index: 0,
            goto_active: false,
            goto_input: String::new(),
            list_loading: false,
            message: None,
            tick: 0,
            catalog_limit: DEFAULT_CATALOG_LIMIT,
        }
    }
}

impl AppState {
    pub fn with_catalog_limit(limit: usize) -> Self {
        Self {
            catalog_limit: limit,
            ..Default::default()
        }
    }
}

impl AppState {
    /// All entries passing the search text AND category filter, in catalog
    /// order. Pure derivation over the full collection.
    pub fn filtered(&self) -> Vec<&Entry> {
        let query = self.search_query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                let matches_name =
                    query.is_empty() || entry.name.to_lowercase().contains(&query);
                let matches_type = match self.type_filter {
                    Some(filter) => entry.types.iter().any(|tag| tag == filter.name()),
                    None => true,
                };
                matches_name && matches_type
            })
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().len()
    }

    /// `ceil(filtered / PAGE_SIZE)`; zero when nothing matches.
    pub fn total_filtered_pages(&self) -> usize {
        self.filtered_count().div_ceil(PAGE_SIZE)
    }

    /// The current page's window of the filtered collection.
    pub fn page_slice(&self) -> Vec<&Entry> {
        let start = (self.page - 1) * PAGE_SIZE;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn hovered_entry(&self) -> Option<&Entry> {
        let index = self.hovered?;
        self.page_slice().get(index).copied()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        let name = self.selected.as_deref()?;
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn overlay(&self) -> Overlay {
        match (&self.selected, self.detail_loading) {
            (None, _) => Overlay::Closed,
            (Some(_), true) => Overlay::Loading,
            (Some(_), false) => Overlay::Ready,
        }
    }

    /// Hover tint for a grid cell: the cell's own FIRST tag's color, iff the
    /// hovered entry is this cell and its tag list contains that first tag;
    /// otherwise transparent. The containment check is redundant for a cell
    /// compared against itself but is the observed behavior; keep it.
    pub fn highlight_color(&self, entry: &Entry) -> Option<Color> {
        let hovered = self.hovered_entry()?;
        if hovered.name != entry.name {
            return None;
        }
        let first = entry.types.first()?;
        if hovered.types.iter().any(|tag| tag == first) {
            color_for(first)
        } else {
            None
        }
    }

    /// Reset paging after a search or filter mutation.
    pub fn reset_page(&mut self) {
        self.page = 1;
        self.hovered = None;
    }

    pub fn reset_detail_cursors(&mut self) {
        self.detail_tab = DetailTab::Types;
        self.ability_index = 0;
        self.move_index = 0;
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("total", ron_string(&self.entries.len()))
                .entry("filtered", ron_string(&self.filtered_count()))
                .entry("page", ron_string(&self.page))
                .entry("pages", ron_string(&self.total_filtered_pages()))
                .entry("hovered", ron_string(&self.hovered)),
            DebugSection::new("Filters")
                .entry("search", ron_string(&self.search_query))
                .entry("search_active", ron_string(&self.search_active))
                .entry("type", ron_string(&self.type_filter))
                .entry("goto", ron_string(&self.goto_input)),
            DebugSection::new("Detail")
                .entry("selected", ron_string(&self.selected))
                .entry("generation", ron_string(&self.detail_generation))
                .entry("overlay", ron_string(&self.overlay()))
                .entry("tab", ron_string(&self.detail_tab))
                .entry("abilities", ron_string(&self.abilities.len()))
                .entry("moves", ron_string(&self.moves.len())),
            DebugSection::new("Status")
                .entry("list_loading", ron_string(&self.list_loading))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
