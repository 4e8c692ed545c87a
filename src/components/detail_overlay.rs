use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, ScrollbarStyle, SelectList,
    SelectListBehavior, SelectListProps, SelectListStyle, SelectionStyle, centered_rect,
};

use super::{spinner_frame, Component};
use crate::action::Action;
use crate::state::{AppState, DetailTab, Entry, EntryStat, Overlay};
use crate::types;

const TEXT_MAIN: Color = Color::Rgb(220, 220, 230);
const TEXT_DIM: Color = Color::Rgb(130, 130, 145);
const ACCENT: Color = Color::Rgb(120, 200, 255);

/// Modal with tabbed detail for the selected entry.
pub struct DetailOverlay {
    modal: Modal,
    ability_list: SelectList,
    move_list: SelectList,
    was_open: bool,
}

pub struct DetailOverlayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Default for DetailOverlay {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
            ability_list: SelectList::new(),
            move_list: SelectList::new(),
            was_open: false,
        }
    }
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.ability_list = SelectList::new();
            self.move_list = SelectList::new();
        }
        self.was_open = is_open;
    }

    fn route_to_list(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        match state.detail_tab {
            DetailTab::Abilities if !state.abilities.is_empty() => {
                let items = string_items(&state.abilities);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.ability_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: tab_list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::AbilitySelect,
                    render_item: &|item| item.clone(),
                };
                self.ability_list
                    .handle_event(event, props)
                    .into_iter()
                    .collect()
            }
            DetailTab::Moves if !state.moves.is_empty() => {
                let items = string_items(&state.moves);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.move_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: tab_list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::MoveSelect,
                    render_item: &|item| item.clone(),
                };
                self.move_list
                    .handle_event(event, props)
                    .into_iter()
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}

impl Component<Action> for DetailOverlay {
    type Props<'a> = DetailOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => vec![Action::Deselect],
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
                vec![Action::DetailTabNext]
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => {
                vec![Action::DetailTabPrev]
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Char('k') | KeyCode::Char('j') => {
                self.route_to_list(event, props.state)
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let overlay = state.overlay();
        if overlay == Overlay::Closed {
            return;
        }
        if area.width < 30 || area.height < 10 {
            return;
        }

        let DetailOverlay {
            modal,
            ability_list,
            move_list,
            ..
        } = self;

        let modal_area = centered_rect(64, 18, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // name + tags
                Constraint::Length(1), // artwork link
                Constraint::Length(2), // tabs
                Constraint::Min(1),    // tab body
            ])
            .split(content_area);

            let entry = state.selected_entry();
            render_title(frame, chunks[0], entry);
            render_artwork_link(frame, chunks[1], entry);

            let tabs = Tabs::new(vec!["Types", "Abilities", "Moves", "Stats"])
                .select(tab_index(state.detail_tab))
                .style(Style::default().fg(TEXT_DIM))
                .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
            frame.render_widget(tabs, chunks[2]);

            if overlay == Overlay::Loading {
                frame.render_widget(
                    Paragraph::new(format!("Loading... {}", spinner_frame(state.tick)))
                        .style(Style::default().fg(TEXT_DIM)),
                    chunks[3],
                );
                return;
            }

            match state.detail_tab {
                DetailTab::Types => render_types_tab(frame, chunks[3], entry),
                DetailTab::Abilities => render_list_tab(
                    frame,
                    chunks[3],
                    ability_list,
                    &state.abilities,
                    state.ability_index,
                    Action::AbilitySelect,
                    "No abilities.",
                ),
                DetailTab::Moves => render_list_tab(
                    frame,
                    chunks[3],
                    move_list,
                    &state.moves,
                    state.move_index,
                    Action::MoveSelect,
                    "No moves.",
                ),
                DetailTab::Stats => render_stats_tab(frame, chunks[3], entry),
            }
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(30, 30, 40)),
                        padding: Padding::xy(2, 1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::Deselect,
                render_content: &mut render_content,
            },
        );
    }
}

fn tab_index(tab: DetailTab) -> usize {
    DetailTab::ALL.iter().position(|t| *t == tab).unwrap_or(0)
}

fn string_items(values: &[String]) -> Vec<Line<'static>> {
    values
        .iter()
        .map(|value| Line::from(value.clone()))
        .collect()
}

fn tab_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: None,
        },
        selection: SelectionStyle::default(),
        scrollbar: ScrollbarStyle::default(),
    }
}

fn render_title(frame: &mut Frame, area: Rect, entry: Option<&Entry>) {
    let Some(entry) = entry else {
        return;
    };
    let mut spans = vec![Span::styled(
        entry.name.clone(),
        Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD),
    )];
    for tag in &entry.types {
        spans.push(Span::raw(" "));
        let style = match types::color_for(tag) {
            Some(color) => Style::default().fg(color),
            None => Style::default().fg(TEXT_DIM),
        };
        spans.push(Span::styled(
            format!("{}{}", types::glyph_for(tag), tag),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_artwork_link(frame: &mut Frame, area: Rect, entry: Option<&Entry>) {
    let Some(url) = entry.and_then(|e| e.artwork_url.as_deref()) else {
        return;
    };
    frame.render_widget(
        Paragraph::new(url.to_string()).style(Style::default().fg(TEXT_DIM)),
        area,
    );
}

fn render_types_tab(frame: &mut Frame, area: Rect, entry: Option<&Entry>) {
    let Some(entry) = entry else {
        return;
    };
    let lines = entry
        .types
        .iter()
        .map(|tag| {
            let style = match types::color_for(tag) {
                Some(color) => Style::default().fg(color),
                None => Style::default().fg(TEXT_DIM),
            };
            Line::from(Span::styled(
                format!("{} {}", types::glyph_for(tag), tag),
                style,
            ))
        })
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_list_tab(
    frame: &mut Frame,
    area: Rect,
    list: &mut SelectList,
    values: &[String],
    selected: usize,
    on_select: fn(usize) -> Action,
    empty_message: &str,
) {
    if values.is_empty() {
        frame.render_widget(
            Paragraph::new(empty_message.to_string()).style(Style::default().fg(TEXT_DIM)),
            area,
        );
        return;
    }
    let items = string_items(values);
    let props = SelectListProps {
        items: &items,
        count: items.len(),
        selected: selected.min(items.len().saturating_sub(1)),
        is_focused: true,
        style: tab_list_style(),
        behavior: SelectListBehavior {
            show_scrollbar: true,
            wrap_navigation: false,
        },
        on_select,
        render_item: &|item| item.clone(),
    };
    list.render(frame, area, props);
}

fn render_stats_tab(frame: &mut Frame, area: Rect, entry: Option<&Entry>) {
    let Some(entry) = entry else {
        return;
    };
    if entry.stats.is_empty() {
        frame.render_widget(
            Paragraph::new("No stats.").style(Style::default().fg(TEXT_DIM)),
            area,
        );
        return;
    }
    let lines = entry
        .stats
        .iter()
        .map(|stat| Line::from(render_stat(stat)))
        .collect::<Vec<_>>();
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(TEXT_MAIN))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_stat(stat: &EntryStat) -> String {
    let label = shorten_stat(&stat.name);
    let bar_len = (stat.value as usize / 10).clamp(1, 20);
    let bar = "#".repeat(bar_len);
    format!("{label:>4} {value:>3} {bar}", value = stat.value)
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}
