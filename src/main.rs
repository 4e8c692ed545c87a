//! Pokegrid TUI - paged catalog browser over PokeAPI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use ratatui::layout::Rect;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokegrid::action::Action;
use pokegrid::api;
use pokegrid::components::{
    handle_goto_event, handle_search_event, CatalogView, CatalogViewProps, Component,
    DetailOverlay, DetailOverlayProps,
};
use pokegrid::effect::Effect;
use pokegrid::reducer::reducer;
use pokegrid::state::{AppState, DEFAULT_CATALOG_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "pokegrid")]
#[command(about = "Browse the PokeAPI catalog in a paged card grid")]
struct Args {
    /// Maximum number of catalog entries to fetch
    #[arg(long, default_value_t = DEFAULT_CATALOG_LIMIT, value_parser = clap::value_parser!(usize))]
    limit: usize,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GridComponentId {
    Catalog,
    Search,
    Goto,
    Overlay,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum GridContext {
    Catalog,
    Search,
    Goto,
    Overlay,
}

impl EventRoutingState<GridComponentId, GridContext> for AppState {
    fn focused(&self) -> Option<GridComponentId> {
        if self.search_active {
            Some(GridComponentId::Search)
        } else if self.goto_active {
            Some(GridComponentId::Goto)
        } else if self.selected.is_some() {
            Some(GridComponentId::Overlay)
        } else {
            Some(GridComponentId::Catalog)
        }
    }

    fn modal(&self) -> Option<GridComponentId> {
        if self.search_active {
            Some(GridComponentId::Search)
        } else if self.goto_active {
            Some(GridComponentId::Goto)
        } else if self.selected.is_some() {
            Some(GridComponentId::Overlay)
        } else {
            None
        }
    }

    fn binding_context(&self, id: GridComponentId) -> GridContext {
        match id {
            GridComponentId::Catalog => GridContext::Catalog,
            GridComponentId::Search => GridContext::Search,
            GridComponentId::Goto => GridContext::Goto,
            GridComponentId::Overlay => GridContext::Overlay,
        }
    }

    fn default_context(&self) -> GridContext {
        GridContext::Catalog
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        limit,
        debug: debug_args,
    } = Args::parse();
    let debug = DebugSession::new(debug_args);

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::with_catalog_limit(limit))
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

struct GridUi {
    view: CatalogView,
    overlay: DetailOverlay,
}

impl GridUi {
    fn new() -> Self {
        Self {
            view: CatalogView::new(),
            overlay: DetailOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<GridComponentId>,
    ) {
        event_ctx.set_component_area(GridComponentId::Catalog, area);
        if state.search_active {
            event_ctx.set_component_area(GridComponentId::Search, area);
        }
        if state.goto_active {
            event_ctx.set_component_area(GridComponentId::Goto, area);
        }

        let overlay_open = state.selected.is_some();
        self.view.render(
            frame,
            area,
            CatalogViewProps {
                state,
                is_focused: render_ctx.is_focused() && !overlay_open,
            },
        );

        self.overlay.set_open(overlay_open);
        if overlay_open {
            event_ctx.set_component_area(GridComponentId::Overlay, area);
            self.overlay.render(
                frame,
                area,
                DetailOverlayProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                },
            );
        } else {
            event_ctx.component_areas.remove(&GridComponentId::Overlay);
        }
    }

    fn handle_catalog_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions: Vec<_> = self
            .view
            .handle_event(
                event,
                CatalogViewProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        handler_response(actions)
    }

    fn handle_overlay_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.overlay.set_open(state.selected.is_some());
        let actions: Vec<_> = self
            .overlay
            .handle_event(
                event,
                DetailOverlayProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
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

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(GridUi::new()));
    let mut bus: EventBus<AppState, Action, GridComponentId, GridContext> = EventBus::new();
    let keybindings: Keybindings<GridContext> = Keybindings::new();

    let ui_catalog = Rc::clone(&ui);
    bus.register(GridComponentId::Catalog, move |event, state| {
        ui_catalog
            .borrow_mut()
            .handle_catalog_event(&event.kind, state)
    });

    bus.register(GridComponentId::Search, |event, state| {
        handle_search_event(&event.kind, state)
    });

    bus.register(GridComponentId::Goto, |event, state| {
        handle_goto_event(&event.kind, state)
    });

    let ui_overlay = Rc::clone(&ui);
    bus.register(GridComponentId::Overlay, move |event, state| {
        ui_overlay
            .borrow_mut()
            .handle_overlay_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        EventKind::Key(key) => {
            let typing = state.search_active || state.goto_active;
            match key.code {
                crossterm::event::KeyCode::Char('q') if !typing => {
                    HandlerResponse::action(Action::Quit)
                }
                crossterm::event::KeyCode::Char('/') if !typing => {
                    HandlerResponse::action(Action::SearchStart)
                }
                crossterm::event::KeyCode::Char('g') if !typing && state.selected.is_none() => {
                    HandlerResponse::action(Action::GotoStart)
                }
                crossterm::event::KeyCode::Char('[') if !typing && state.selected.is_none() => {
                    HandlerResponse::action(Action::TypeFilterPrev)
                }
                crossterm::event::KeyCode::Char(']') if !typing && state.selected.is_none() => {
                    HandlerResponse::action(Action::TypeFilterNext)
                }
                crossterm::event::KeyCode::Char('c') if !typing && state.selected.is_none() => {
                    HandlerResponse::action(Action::TypeFilterClear)
                }
                _ => HandlerResponse::ignored(),
            }
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(90), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalog { limit } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::fetch_catalog(limit).await {
                    Ok(entries) => Action::CatalogDidLoad(entries),
                    Err(error) => Action::CatalogDidError(error),
                }
            });
        }
        Effect::LoadDetail { name, generation } => {
            let key = format!("detail_{generation}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let (abilities, moves) =
                    tokio::join!(api::fetch_abilities(&name), api::fetch_moves(&name));
                match (abilities, moves) {
                    (Ok(abilities), Ok(moves)) => Action::DetailDidLoad {
                        generation,
                        abilities,
                        moves,
                    },
                    (Err(error), _) | (_, Err(error)) => Action::DetailDidError {
                        generation,
                        error,
                    },
                }
            });
        }
    }
}
