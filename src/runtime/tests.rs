use super::event_loop::load_and_claim;
use super::media_sync::*;
use crate::app::App;
use crate::player::{MediaCmd, MediaStatus};
use crate::queue::{ItemId, MediaKind, QueueAction, QueueItem, SourceRegistry};
use crate::session::menu::MenuLabels;
use crate::session::{OpenGate, Session, ShellMsg};
use std::path::PathBuf;
use std::sync::mpsc;

fn loaded(registry: &mut SourceRegistry, names: &[&str]) -> App {
    let mut app = App::new(0.8, MenuLabels::for_locale("en"));
    let items = names
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let source = registry.register(format!("/m/{n}.mp3"));
            QueueItem::new(ItemId(i as u64 + 1), *n, "mp3", source, MediaKind::Audio)
        })
        .collect();
    app.dispatch(QueueAction::LoadFiles(items));
    app
}

fn status_for(app: &App) -> MediaStatus {
    MediaStatus {
        source: app.current().map(|i| i.source),
        ..Default::default()
    }
}

#[test]
fn bridge_loads_then_plays_once() {
    let mut registry = SourceRegistry::new();
    let mut app = loaded(&mut registry, &["a", "b"]);
    let mut bridge = MediaBridge::new();

    let cmds = bridge.diff(&app, &registry);
    assert!(matches!(cmds[0], MediaCmd::Load { ref path, .. } if path.ends_with("a.mp3")));
    assert!(matches!(cmds[1], MediaCmd::SetVolume(v) if (v - 0.8).abs() < 1e-6));
    assert_eq!(cmds.len(), 2);

    app.dispatch(QueueAction::SetIsPlaying(true));
    let cmds = bridge.diff(&app, &registry);
    assert!(matches!(cmds.as_slice(), [MediaCmd::Play]));
    assert!(bridge.diff(&app, &registry).is_empty());

    // A new current item is loaded paused and then resumed.
    app.dispatch(QueueAction::Next);
    let cmds = bridge.diff(&app, &registry);
    assert!(matches!(cmds[0], MediaCmd::Load { ref path, .. } if path.ends_with("b.mp3")));
    assert!(matches!(cmds.last(), Some(MediaCmd::Play)));
}

#[test]
fn bridge_forwards_mute_and_unloads_released_sources() {
    let mut registry = SourceRegistry::new();
    let mut app = loaded(&mut registry, &["a"]);
    let mut bridge = MediaBridge::new();
    bridge.diff(&app, &registry);

    app.dispatch(QueueAction::ToggleMuted);
    assert!(matches!(bridge.diff(&app, &registry).as_slice(), [MediaCmd::SetMuted(true)]));

    let mut fresh = loaded(&mut registry, &["x"]);
    let x = fresh.current().map(|i| i.source).unwrap();
    registry.release(x);
    fresh.dispatch(QueueAction::ToggleMuted);
    let cmds = bridge.diff(&fresh, &registry);
    assert!(matches!(cmds[0], MediaCmd::Unload));
}

#[test]
fn status_updates_duration_and_position_past_threshold() {
    let mut registry = SourceRegistry::new();
    let mut app = loaded(&mut registry, &["a"]);

    let mut status = status_for(&app);
    status.duration = 200.0;
    status.position = 0.2;
    sync_status(&mut app, &status);
    assert_eq!(app.state.duration, 200.0);
    assert_eq!(app.state.current_time, 0.0);

    status.position = 0.3;
    sync_status(&mut app, &status);
    assert_eq!(app.state.current_time, 0.3);
}

#[test]
fn status_of_another_source_is_ignored() {
    let mut registry = SourceRegistry::new();
    let mut app = loaded(&mut registry, &["a"]);
    let status = MediaStatus {
        source: Some(registry.register("/m/old.mp3")),
        position: 42.0,
        duration: 99.0,
        ended: true,
        error: None,
    };
    assert_eq!(sync_status(&mut app, &status), StatusEffects::default());
    assert_eq!(app.state.duration, 0.0);
    assert_eq!(app.state.current_time, 0.0);
}

#[test]
fn end_of_source_advances_multi_item_queue() {
    let mut registry = SourceRegistry::new();
    let mut app = loaded(&mut registry, &["a", "b"]);
    app.dispatch(QueueAction::SetIsPlaying(true));

    let mut status = status_for(&app);
    status.ended = true;
    let effects = sync_status(&mut app, &status);

    assert!(effects.restart);
    assert_eq!(app.state.current_index, 1);
    assert!(app.state.is_playing);
    assert_eq!(app.state.current_time, 0.0);
}

#[test]
fn end_of_single_item_restarts_it() {
    let mut registry = SourceRegistry::new();
    let mut app = loaded(&mut registry, &["only"]);

    let mut status = status_for(&app);
    status.ended = true;
    status.position = 180.0;
    let effects = sync_status(&mut app, &status);

    assert!(effects.restart);
    assert_eq!(app.state.current_index, 0);
    assert!(app.state.is_playing);
    assert_eq!(app.state.current_time, 0.0);
}

#[test]
fn media_errors_stop_playback_and_show_status() {
    let mut registry = SourceRegistry::new();
    let mut app = loaded(&mut registry, &["a"]);
    app.dispatch(QueueAction::SetIsPlaying(true));

    let mut status = status_for(&app);
    status.error = Some("failed to decode".into());
    let effects = sync_status(&mut app, &status);

    assert_eq!(effects.error.as_deref(), Some("failed to decode"));
    assert!(!app.state.is_playing);
    assert_eq!(app.status.as_deref(), Some("failed to decode"));
}

fn queued_open(session: &Session, rx: &mpsc::Receiver<ShellMsg>, path: PathBuf) -> ShellMsg {
    session.request_open(vec![path]);
    rx.try_recv().unwrap()
}

#[test]
fn drop_without_media_keeps_queued_opens_valid() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, rx) = mpsc::channel();
    let mut session = Session::start(Some(dir.path().join("state")), Vec::<String>::new(), tx);
    let mut app = App::new(1.0, MenuLabels::for_locale("en"));
    let mut gate = OpenGate::new();

    let song = dir.path().join("song.mp3");
    std::fs::write(&song, b"").unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, b"").unwrap();

    let ShellMsg::OpenFiles { token, .. } = queued_open(&session, &rx, song.clone()) else {
        panic!("expected an open request");
    };
    assert!(!load_and_claim(&mut app, &mut session, &mut gate, &[notes]));
    assert!(app.state.is_empty());
    assert!(gate.accept(token));
}

#[test]
fn drop_with_media_makes_queued_opens_stale() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, rx) = mpsc::channel();
    let mut session = Session::start(Some(dir.path().join("state")), Vec::<String>::new(), tx);
    let mut app = App::new(1.0, MenuLabels::for_locale("en"));
    let mut gate = OpenGate::new();

    let song = dir.path().join("song.mp3");
    std::fs::write(&song, b"").unwrap();

    let ShellMsg::OpenFiles { token, .. } = queued_open(&session, &rx, song.clone()) else {
        panic!("expected an open request");
    };
    assert!(load_and_claim(&mut app, &mut session, &mut gate, &[song]));
    assert_eq!(app.state.len(), 1);
    assert!(!gate.accept(token));
}
