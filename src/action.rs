use serde::{Deserialize, Serialize};

use crate::state::Entry;
use crate::types::PokeType;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,
    CatalogDidLoad(Vec<Entry>),
    CatalogDidError(String),

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,

    TypeFilterSet(Option<PokeType>),
    TypeFilterNext,
    TypeFilterPrev,
    TypeFilterClear,

    PageGo(usize),
    PageNext,
    PagePrev,
    PageFirst,
    PageLast,

    GotoStart,
    GotoCancel,
    GotoSubmit,
    GotoInput(char),
    GotoBackspace,

    Hover(Option<usize>),
    EntrySelect(usize),
    Deselect,

    DetailDidLoad {
        generation: u64,
        abilities: Vec<String>,
        moves: Vec<String>,
    },
    DetailDidError {
        generation: u64,
        error: String,
    },
    DetailTabNext,
    DetailTabPrev,
    AbilitySelect(usize),
    MoveSelect(usize),

    Tick,
    Quit,
}
