use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::logging;
use crate::player::MediaPlayer;
use crate::queue::QueueAction;
use crate::session::menu::{MenuLabels, system_locale};
use crate::session::{self, Session, ShellMsg};

mod event_loop;
mod media_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let state_dir = session::state_dir().ok();
    let log_path = logging::init(state_dir.as_deref());
    let settings = settings::load_settings();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = ?log_path, "starting");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("classic-player-io")
        .enable_all()
        .build()?;
    let client = reqwest::Client::builder()
        .user_agent(concat!("classic-player/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let (shell_tx, shell_rx) = mpsc::channel::<ShellMsg>();
    let (media_info_tx, media_info_rx) = mpsc::channel::<QueueAction>();

    let mut session = Session::start(state_dir, env::args().skip(1), shell_tx);
    let mut app = App::new(session.volume(), MenuLabels::for_locale(&system_locale()));
    let player = MediaPlayer::new();
    let mut enricher = startup::build_enricher(&settings, client.clone(), media_info_tx);
    if settings.startup.check_for_updates {
        startup::spawn_update_check(rt.handle(), client, session.shell_sender());
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableMouseCapture
    )?;
    startup::restore_window_size(&mut stdout, &session, &settings);
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let services = event_loop::Services {
            settings: &settings,
            player: &player,
            rt: rt.handle(),
            shell_rx: &shell_rx,
            media_info_rx: &media_info_rx,
        };
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(
            &mut terminal,
            &mut app,
            &mut session,
            enricher.as_mut(),
            &services,
            &mut state,
        )
    })();

    player.quit();
    session.teardown();
    rt.shutdown_timeout(Duration::from_millis(500));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        tracing::error!(error = %e, "event loop failed");
    }
    run_result
}

#[cfg(test)]
mod tests;
