use std::io::Stdout;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PickerOrigin};
use crate::artwork::{Enricher, ItunesCatalog};
use crate::config;
use crate::ingest::{load_paths, parse_dropped_paths};
use crate::picker::{FilePicker, PickerOutcome};
use crate::player::MediaPlayer;
use crate::pointer::plan_mouse;
use crate::queue::QueueAction;
use crate::runtime::media_sync::{MediaBridge, sync_status};
use crate::session::menu::{HOMEPAGE, MenuAction};
use crate::session::{OpenGate, Session, ShellMsg};
use crate::shortcuts::{PlanContext, ShortcutPlan, Step, UiEffect, plan, shortcut_for};
use crate::ui::{self, ScreenLayout};

/// Long-lived collaborators of the event loop.
pub struct Services<'a> {
    pub settings: &'a config::Settings,
    pub player: &'a MediaPlayer,
    pub rt: &'a tokio::runtime::Handle,
    pub shell_rx: &'a Receiver<ShellMsg>,
    pub media_info_rx: &'a Receiver<QueueAction>,
}

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Newest open request consumed by the UI.
    pub gate: OpenGate,
    pub bridge: MediaBridge,
    /// Geometry of the last drawn frame, for mouse hit-testing.
    pub layout: ScreenLayout,
    /// Queue generation the enricher last looked at.
    enriched_generation: u64,
    first_frame_drawn: bool,
    last_title: Option<String>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            gate: OpenGate::new(),
            bridge: MediaBridge::new(),
            layout: ScreenLayout::default(),
            enriched_generation: 0,
            first_frame_drawn: false,
            last_title: None,
        }
    }
}

/// Main terminal event loop: drains background messages, keeps the media
/// thread in sync, draws, and handles input. Returns `Ok(())` on quit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    session: &mut Session,
    mut enricher: Option<&mut Enricher<ItunesCatalog>>,
    services: &Services<'_>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(msg) = services.shell_rx.try_recv() {
            handle_shell_msg(msg, app, session, state);
        }
        while let Ok(action) = services.media_info_rx.try_recv() {
            app.dispatch(action);
        }

        let status = services.player.poll();
        let effects = sync_status(app, &status);
        state.bridge.sync(app, &session.sources, services.player);
        if effects.restart {
            services.player.seek(0.0);
        }

        if app.generation() != state.enriched_generation {
            state.enriched_generation = app.generation();
            if let Some(e) = enricher.as_deref_mut() {
                e.spawn(services.rt, &app.state.queue, &session.sources);
            }
        }

        let mut layout = ScreenLayout::default();
        terminal.draw(|f| layout = ui::draw(f, app, &services.settings.ui))?;
        state.layout = layout;

        if state.last_title.as_deref() != Some(app.title.as_str()) {
            execute!(terminal.backend_mut(), SetTitle(&app.title))?;
            state.last_title = Some(app.title.clone());
        }

        // Actions deferred during the previous turn run only after the frame
        // that reflected their predecessors.
        for action in app.take_deferred() {
            app.dispatch(action);
        }

        if !state.first_frame_drawn {
            state.first_frame_drawn = true;
            session.deliver_pending_open();
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, app, session, services, state);
                }
                Event::Mouse(mouse) => handle_mouse(&mouse, app, session, services, state),
                Event::Paste(text) => handle_paste(&text, app, session, state),
                Event::Resize(w, h) => session.on_resize(w, h),
                _ => {}
            }
        }
    }
}

fn handle_shell_msg(
    msg: ShellMsg,
    app: &mut App,
    session: &mut Session,
    state: &mut EventLoopState,
) {
    match msg {
        ShellMsg::OpenFiles { token, paths } => {
            if state.gate.accept(token) {
                load_paths(app, session, &paths);
            } else {
                tracing::debug!(token = token.raw(), "ignoring stale open request");
            }
        }
        ShellMsg::ToggleHelp => app.toggle_help(),
        ShellMsg::UpdateAvailable(version) => {
            app.set_status(format!("Version {version} is available"));
        }
    }
}

fn handle_paste(text: &str, app: &mut App, session: &mut Session, state: &mut EventLoopState) {
    let paths = parse_dropped_paths(text);
    if paths.is_empty() {
        return;
    }
    load_and_claim(app, session, &mut state.gate, &paths);
}

/// Load paths the UI picked up itself. Once something loaded, open
/// requests the shell queued earlier are stale and must not load again.
pub(super) fn load_and_claim(
    app: &mut App,
    session: &mut Session,
    gate: &mut OpenGate,
    paths: &[PathBuf],
) -> bool {
    if !load_paths(app, session, paths) {
        return false;
    }
    gate.claim(session.tokens());
    true
}

fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    session: &mut Session,
    services: &Services<'_>,
    state: &mut EventLoopState,
) {
    if let Some(action) = MenuAction::from_key(&key) {
        handle_menu_action(action, app, session, services.settings);
        return;
    }

    if let Some((picker, origin)) = app.picker.as_mut() {
        let origin = *origin;
        match picker.handle_key(&key) {
            PickerOutcome::Pending => {}
            PickerOutcome::Cancelled => app.close_picker(),
            PickerOutcome::Confirmed(paths) => {
                app.close_picker();
                match origin {
                    PickerOrigin::Menu => session.request_open(paths),
                    PickerOrigin::Shortcut => {
                        load_and_claim(app, session, &mut state.gate, &paths);
                    }
                }
            }
        }
        return;
    }

    if app.show_about {
        app.show_about = false;
        return;
    }

    let Some(shortcut) = shortcut_for(&key, app.show_help) else {
        return;
    };
    let plan = plan(shortcut, &plan_context(app), &services.settings.playback);
    apply_plan(plan, app, session, services, state);
}

fn handle_mouse(
    mouse: &MouseEvent,
    app: &mut App,
    session: &mut Session,
    services: &Services<'_>,
    state: &mut EventLoopState,
) {
    let plan = plan_mouse(
        mouse,
        &state.layout,
        &plan_context(app),
        &services.settings.playback,
    );
    if !plan.is_empty() {
        apply_plan(plan, app, session, services, state);
    }
}

fn plan_context(app: &App) -> PlanContext {
    PlanContext {
        current_time: app.state.current_time,
        duration: app.state.duration,
        volume: app.volume,
        queue_empty: app.state.is_empty(),
    }
}

fn handle_menu_action(
    action: MenuAction,
    app: &mut App,
    session: &mut Session,
    settings: &config::Settings,
) {
    tracing::debug!(?action, "menu");
    match action {
        MenuAction::OpenFile => open_picker(app, settings, PickerOrigin::Menu),
        MenuAction::ToggleHelp => session.send(ShellMsg::ToggleHelp),
        MenuAction::About => app.show_about = !app.show_about,
        MenuAction::Homepage => {
            if let Err(e) = open::that(HOMEPAGE) {
                tracing::warn!(error = %e, "failed to open browser");
                app.set_status(HOMEPAGE);
            }
        }
        MenuAction::Quit => app.should_quit = true,
    }
}

fn open_picker(app: &mut App, settings: &config::Settings, origin: PickerOrigin) {
    let start = settings
        .ui
        .picker_start_dir
        .as_deref()
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    app.open_picker(FilePicker::open(start), origin);
}

/// Apply a shortcut plan. Seeks run after the media thread has been told
/// about any source or transport change from the same plan.
fn apply_plan(
    plan: ShortcutPlan,
    app: &mut App,
    session: &mut Session,
    services: &Services<'_>,
    state: &mut EventLoopState,
) {
    let mut seeks = Vec::new();
    for step in plan.steps {
        match step {
            Step::Dispatch(action) => app.dispatch(action),
            Step::Seek(t) => {
                app.dispatch(QueueAction::SetCurrentTime(t));
                seeks.push(t);
            }
            Step::SetVolume(v) => {
                app.volume = v;
                session.set_volume(v);
            }
            Step::Ui(effect) => match effect {
                UiEffect::ToggleFullscreen => app.toggle_fullscreen(),
                UiEffect::OpenPicker => {
                    open_picker(app, services.settings, PickerOrigin::Shortcut)
                }
                UiEffect::ToggleInfo => app.toggle_info(),
                UiEffect::ToggleHelp => app.toggle_help(),
                UiEffect::CloseHelp => app.close_help(),
                UiEffect::CloseInfo => app.show_info = false,
                UiEffect::CloseAbout => app.show_about = false,
            },
        }
    }
    if app.current().is_none() {
        return;
    }
    state.bridge.sync(app, &session.sources, services.player);
    for t in seeks {
        services.player.seek(t);
    }
}
