use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_dispatch::EventKind;

use super::{spinner_frame, Component};
use crate::action::Action;
use crate::state::{AppState, Entry, GRID_COLS, PAGE_SIZE};
use crate::types;

const GRID_ROWS: usize = PAGE_SIZE / GRID_COLS;

const TEXT_MAIN: Color = Color::Rgb(220, 220, 230);
const TEXT_DIM: Color = Color::Rgb(130, 130, 145);

/// The paged card grid. Cursor movement emits `Hover`, Enter emits
/// `EntrySelect`, and page keys emit the page actions.
#[derive(Default)]
pub struct CatalogGrid;

pub struct CatalogGridProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Component<Action> for CatalogGrid {
    type Props<'a> = CatalogGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let state = props.state;
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => move_hover(state, -1),
                KeyCode::Right | KeyCode::Char('l') => move_hover(state, 1),
                KeyCode::Up | KeyCode::Char('k') => move_hover(state, -(GRID_COLS as isize)),
                KeyCode::Down | KeyCode::Char('j') => move_hover(state, GRID_COLS as isize),
                KeyCode::Enter => match state.hovered {
                    Some(index) => vec![Action::EntrySelect(index)],
                    None => Vec::new(),
                },
                KeyCode::Esc => match state.hovered {
                    Some(_) => vec![Action::Hover(None)],
                    None => Vec::new(),
                },
                KeyCode::PageDown | KeyCode::Char('n') => vec![Action::PageNext],
                KeyCode::PageUp | KeyCode::Char('p') => vec![Action::PagePrev],
                KeyCode::Home => vec![Action::PageFirst],
                KeyCode::End => vec![Action::PageLast],
                _ => Vec::new(),
            },
            EventKind::Scroll { delta, .. } => {
                if *delta > 0 {
                    vec![Action::PagePrev]
                } else {
                    vec![Action::PageNext]
                }
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        if state.list_loading {
            render_message(
                frame,
                area,
                &format!("Loading catalog... {}", spinner_frame(state.tick)),
            );
            return;
        }

        let slice = state.page_slice();
        if slice.is_empty() {
            render_message(frame, area, "No matches. Adjust search or filter.");
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Min(1),    // cards
            Constraint::Length(1), // page footer
        ])
        .split(area);

        let rows = Layout::vertical([Constraint::Ratio(1, GRID_ROWS as u32); GRID_ROWS])
            .split(chunks[0]);
        for (row_index, row_area) in rows.iter().enumerate() {
            let cols =
                Layout::horizontal([Constraint::Ratio(1, GRID_COLS as u32); GRID_COLS])
                    .split(*row_area);
            for (col_index, cell_area) in cols.iter().enumerate() {
                let index = row_index * GRID_COLS + col_index;
                if let Some(entry) = slice.get(index) {
                    render_cell(frame, *cell_area, state, entry, state.hovered == Some(index));
                }
            }
        }

        render_footer(frame, chunks[1], state);
    }
}

fn move_hover(state: &AppState, step: isize) -> Vec<Action> {
    let len = state.page_slice().len();
    if len == 0 {
        return Vec::new();
    }
    let next = match state.hovered {
        None => 0,
        Some(current) => {
            let target = current as isize + step;
            target.clamp(0, len as isize - 1) as usize
        }
    };
    vec![Action::Hover(Some(next))]
}

fn render_cell(frame: &mut Frame, area: Rect, state: &AppState, entry: &Entry, hovered: bool) {
    // Hover tint applies only when this cell is the hovered one and its
    // first tag resolves to a known color.
    let tint = if hovered { state.highlight_color(entry) } else { None };

    let border_color = tint
        .or_else(|| entry.types.first().and_then(|tag| types::color_for(tag)))
        .unwrap_or(TEXT_DIM);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(color) = tint {
        block = block.style(Style::default().bg(color).fg(Color::Black));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let name_style = if tint.is_some() {
        Style::default().fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD)
    };

    let glyphs = entry
        .types
        .iter()
        .map(|tag| types::glyph_for(tag))
        .collect::<Vec<_>>()
        .join("");
    let mut title = vec![Span::styled(entry.name.clone(), name_style)];
    if !glyphs.is_empty() {
        title.push(Span::raw(" "));
        title.push(Span::raw(glyphs));
    }

    let tag_spans = entry
        .types
        .iter()
        .enumerate()
        .flat_map(|(i, tag)| {
            let style = match types::color_for(tag) {
                Some(color) if tint.is_none() => Style::default().fg(color),
                _ => Style::default().fg(if tint.is_some() {
                    Color::Black
                } else {
                    TEXT_DIM
                }),
            };
            let mut spans = Vec::new();
            if i > 0 {
                spans.push(Span::raw("/"));
            }
            spans.push(Span::styled(tag.clone(), style));
            spans
        })
        .collect::<Vec<_>>();

    let lines = vec![Line::from(title), Line::from(tag_spans)];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let total = state.total_filtered_pages();
    let label = format!(
        "page {page}/{total}  {count} matches",
        page = state.page,
        count = state.filtered_count(),
    );
    frame.render_widget(
        Paragraph::new(Line::from(label).centered()).style(Style::default().fg(TEXT_DIM)),
        area,
    );
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);
    frame.render_widget(
        Paragraph::new(Line::from(message.to_string()).centered())
            .style(Style::default().fg(TEXT_DIM)),
        chunks[1],
    );
}
