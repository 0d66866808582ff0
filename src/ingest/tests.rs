use super::*;
use crate::app::App;
use crate::queue::{MediaKind, QueueAction};
use crate::session::menu::MenuLabels;
use crate::session::Session;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

fn session(dir: &Path) -> Session {
    let (tx, _rx) = mpsc::channel();
    Session::start(Some(dir.join("state")), Vec::<String>::new(), tx)
}

fn touch(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    std::fs::write(&p, b"").unwrap();
    p
}

#[test]
fn mime_types_for_known_extensions() {
    assert_eq!(mime_type_for("mp4"), Some("video/mp4"));
    assert_eq!(mime_type_for("mov"), Some("video/quicktime"));
    assert_eq!(mime_type_for("mp3"), Some("audio/mpeg"));
    assert_eq!(mime_type_for("m4a"), Some("audio/mp4"));
    assert_eq!(mime_type_for("wav"), Some("audio/wav"));
    assert_eq!(mime_type_for("txt"), Some("text/plain"));
    assert_eq!(mime_type_for("xyz"), None);
}

#[test]
fn file_name_is_split_at_last_dot() {
    assert_eq!(
        split_file_name("My.Song.MP3"),
        ("My.Song".to_string(), "mp3".to_string())
    );
    assert_eq!(split_file_name("README"), ("README".to_string(), String::new()));
    assert_eq!(split_file_name(".hidden"), (".hidden".to_string(), String::new()));
    assert_eq!(split_file_name("trailing."), ("trailing.".to_string(), String::new()));
}

#[test]
fn mixed_input_keeps_only_media_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        touch(dir.path(), "Intro.MP4"),
        touch(dir.path(), "notes.txt"),
        touch(dir.path(), "Theme.Mp3"),
    ];
    let mut session = session(dir.path());

    let items = build_items(&paths, &mut session);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].display_name, "Intro");
    assert_eq!(items[0].extension, "mp4");
    assert_eq!(items[0].kind, MediaKind::Video);
    assert_eq!(items[1].display_name, "Theme");
    assert_eq!(items[1].extension, "mp3");
    assert_eq!(items[1].kind, MediaKind::Audio);
    assert!(items[0].id < items[1].id);
    assert_eq!(session.sources.len(), 2);
    assert_eq!(session.sources.resolve(items[1].source), Some(paths[2].as_path()));
}

#[test]
fn missing_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path());
    let items = build_items(&[dir.path().join("gone.mp3")], &mut session);
    assert!(items.is_empty());
    assert!(session.sources.is_empty());
}

#[test]
fn load_paths_replaces_queue_and_defers_play() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path());
    let mut app = App::new(1.0, MenuLabels::for_locale("en"));

    let first = vec![touch(dir.path(), "a.mp3"), touch(dir.path(), "b.wav")];
    assert!(load_paths(&mut app, &mut session, &first));
    assert_eq!(app.title, "a");
    assert_eq!(app.state.len(), 2);
    assert!(!app.state.is_playing);
    assert_eq!(app.generation(), 1);
    assert_eq!(app.take_deferred(), vec![QueueAction::SetIsPlaying(true)]);

    let second = vec![touch(dir.path(), "clip.mov")];
    assert!(load_paths(&mut app, &mut session, &second));
    assert_eq!(app.state.len(), 1);
    assert_eq!(app.generation(), 2);
    // Sources of the replaced queue are released.
    assert_eq!(session.sources.len(), 1);
}

#[test]
fn load_paths_without_media_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session(dir.path());
    let mut app = App::new(1.0, MenuLabels::for_locale("en"));

    let paths = vec![touch(dir.path(), "notes.txt"), touch(dir.path(), "cover.png")];
    assert!(!load_paths(&mut app, &mut session, &paths));
    assert!(app.state.is_empty());
    assert_eq!(app.generation(), 0);
    assert!(app.take_deferred().is_empty());
}

#[test]
fn dropped_text_formats() {
    assert_eq!(
        parse_dropped_paths("/a/one.mp3\n/b/two.mp4\n"),
        vec![PathBuf::from("/a/one.mp3"), PathBuf::from("/b/two.mp4")]
    );
    assert_eq!(
        parse_dropped_paths(r"/music/My\ Song.mp3 /music/b.wav"),
        vec![PathBuf::from("/music/My Song.mp3"), PathBuf::from("/music/b.wav")]
    );
    assert_eq!(
        parse_dropped_paths("'/music/My Song.mp3' \"/x/it's.mov\""),
        vec![PathBuf::from("/music/My Song.mp3"), PathBuf::from("/x/it's.mov")]
    );
    assert!(parse_dropped_paths("   \n ").is_empty());
}

#[cfg(unix)]
#[test]
fn dropped_file_uris_are_decoded() {
    assert_eq!(
        parse_dropped_paths("file:///home/me/My%20Song.mp3\r\nfile:///tmp/b.mp4"),
        vec![PathBuf::from("/home/me/My Song.mp3"), PathBuf::from("/tmp/b.mp4")]
    );
}
