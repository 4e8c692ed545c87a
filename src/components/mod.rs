pub mod catalog_grid;
pub mod catalog_view;
pub mod detail_overlay;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use catalog_grid::{CatalogGrid, CatalogGridProps};
pub use catalog_view::{
    handle_goto_event, handle_search_event, CatalogView, CatalogViewProps,
};
pub use detail_overlay::{DetailOverlay, DetailOverlayProps};

/// Loading indicator frame for the current animation tick.
pub(crate) fn spinner_frame(tick: u64) -> char {
    match tick % 4 {
        0 => '|',
        1 => '/',
        2 => '-',
        _ => '\\',
    }
}
