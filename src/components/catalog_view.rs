use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::{EventKind, HandlerResponse};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{CatalogGrid, CatalogGridProps, Component};
use crate::action::Action;
use crate::state::AppState;

const ACCENT: Color = Color::Rgb(120, 200, 255);
const TEXT_DIM: Color = Color::Rgb(130, 130, 145);

/// Full-screen catalog: header row, card grid, minibuffer line, status bar.
#[derive(Default)]
pub struct CatalogView {
    grid: CatalogGrid,
}

pub struct CatalogViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl CatalogView {
    pub fn new() -> Self {
        Self { grid: CatalogGrid }
    }
}

impl Component<Action> for CatalogView {
    type Props<'a> = CatalogViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        self.grid
            .handle_event(
                event,
                CatalogGridProps {
                    state: props.state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Min(6),    // grid
            Constraint::Length(1), // minibuffer / message
            Constraint::Length(1), // hints
        ])
        .split(area);

        render_header(frame, chunks[0], state);
        self.grid.render(
            frame,
            chunks[1],
            CatalogGridProps {
                state,
                is_focused: props.is_focused,
            },
        );
        render_minibuffer(frame, chunks[2], state);
        render_status_bar(frame, chunks[3], state);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let filter = match state.type_filter {
        Some(tag) => format!("{} {}", tag.glyph(), tag.name()),
        None => "all".to_string(),
    };
    let search = if state.search_active {
        format!("/{}_", state.search_query)
    } else if state.search_query.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", state.search_query)
    };
    let line = Line::from(vec![
        Span::styled(
            "POKEGRID",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  type: "),
        Span::styled(
            filter,
            match state.type_filter.map(|tag| tag.color()) {
                Some(color) => Style::default().fg(color),
                None => Style::default().fg(TEXT_DIM),
            },
        ),
        Span::raw("  "),
        Span::styled(search, Style::default().fg(TEXT_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_minibuffer(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if state.goto_active {
        Line::from(vec![
            Span::styled("go to page: ", Style::default().fg(ACCENT)),
            Span::raw(state.goto_input.clone()),
            Span::styled("_", Style::default().fg(TEXT_DIM)),
        ])
    } else if state.search_active {
        Line::from(vec![
            Span::styled("search: ", Style::default().fg(ACCENT)),
            Span::raw(state.search_query.clone()),
            Span::styled("_", Style::default().fg(TEXT_DIM)),
        ])
    } else if let Some(message) = state.message.as_deref() {
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Rgb(220, 140, 120)),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut status_bar = StatusBar::new();
    let hints = if state.selected.is_some() {
        vec![
            StatusBarHint::new("esc", "close"),
            StatusBarHint::new("tab", "next tab"),
            StatusBarHint::new("\u{2191}\u{2193}", "scroll"),
        ]
    } else if state.search_active || state.goto_active {
        vec![
            StatusBarHint::new("enter", "apply"),
            StatusBarHint::new("esc", "cancel"),
        ]
    } else {
        vec![
            StatusBarHint::new("/", "search"),
            StatusBarHint::new("[ ]", "type"),
            StatusBarHint::new("c", "clear"),
            StatusBarHint::new("g", "page"),
            StatusBarHint::new("enter", "details"),
            StatusBarHint::new("q", "quit"),
        ]
    };
    <StatusBar as Component<Action>>::render(
        &mut status_bar,
        frame,
        area,
        StatusBarProps {
            left: StatusBarSection::empty(),
            center: StatusBarSection::hints(&hints),
            right: StatusBarSection::empty(),
            style: StatusBarStyle::default(),
            is_focused: false,
        },
    );
}

/// Search minibuffer keys while search entry is active.
pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            KeyCode::Esc => vec![Action::SearchCancel],
            KeyCode::Enter => vec![Action::SearchSubmit],
            KeyCode::Backspace => vec![Action::SearchBackspace],
            KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

/// Page-number minibuffer keys while the goto prompt is active.
pub fn handle_goto_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            KeyCode::Esc => vec![Action::GotoCancel],
            KeyCode::Enter => vec![Action::GotoSubmit],
            KeyCode::Backspace => vec![Action::GotoBackspace],
            KeyCode::Char(ch) => vec![Action::GotoInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}
