use super::*;

fn items(names: &[&str]) -> (SourceRegistry, Vec<QueueItem>) {
    let mut sources = SourceRegistry::new();
    let items = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let (stem, ext) = name.rsplit_once('.').unwrap();
            let kind = if ext == "mp4" || ext == "mov" {
                MediaKind::Video
            } else {
                MediaKind::Audio
            };
            let source = sources.register(format!("/tmp/{name}"));
            QueueItem::new(ItemId(i as u64 + 1), stem, ext, source, kind)
        })
        .collect();
    (sources, items)
}

fn loaded(names: &[&str]) -> QueueState {
    let (_, items) = items(names);
    reduce(QueueState::new(), QueueAction::LoadFiles(items))
}

#[test]
fn load_files_replaces_queue_and_resets_transport() {
    let mut state = loaded(&["old.mp3"]);
    state.current_index = 0;
    state.is_playing = true;
    state.muted = true;
    state.current_time = 42.0;
    state.duration = 180.0;

    let (_, fresh) = items(&["a.mp4", "b.mp3", "c.wav"]);
    let state = reduce(state, QueueAction::LoadFiles(fresh.clone()));

    assert_eq!(state.queue, fresh);
    assert_eq!(state.current_index, 0);
    assert_eq!(state.current_time, 0.0);
    assert_eq!(state.duration, 0.0);
    assert!(!state.is_playing);
    assert!(!state.muted);
}

#[test]
fn load_files_with_no_items_keeps_prior_state() {
    let mut state = loaded(&["a.mp3", "b.mp3"]);
    state.current_index = 1;
    let before = state.clone();
    let after = reduce(state, QueueAction::LoadFiles(Vec::new()));
    assert_eq!(after, before);
}

#[test]
fn next_cycles_back_to_start_after_len_steps() {
    for len in 1..=5 {
        let names: Vec<String> = (0..len).map(|i| format!("t{i}.mp3")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        for start in 0..len {
            let mut state = loaded(&refs);
            state.current_index = start;
            for _ in 0..len {
                state = reduce(state, QueueAction::Next);
            }
            assert_eq!(state.current_index, start, "len={len} start={start}");
        }
    }
}

#[test]
fn previous_undoes_next() {
    for len in 1..=5 {
        let names: Vec<String> = (0..len).map(|i| format!("t{i}.mp3")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        for start in 0..len {
            let mut state = loaded(&refs);
            state.current_index = start;
            let state = reduce(state, QueueAction::Next);
            let state = reduce(state, QueueAction::Previous);
            assert_eq!(state.current_index, start, "len={len} start={start}");
        }
    }
}

#[test]
fn previous_wraps_from_first_to_last() {
    let state = loaded(&["a.mp3", "b.mp3", "c.mp3"]);
    let state = reduce(state, QueueAction::Previous);
    assert_eq!(state.current_index, 2);
}

#[test]
fn next_and_previous_on_empty_queue_are_noops() {
    let state = QueueState::new();
    let state = reduce(state, QueueAction::Next);
    assert_eq!(state.current_index, 0);
    let state = reduce(state, QueueAction::Previous);
    assert_eq!(state.current_index, 0);
}

#[test]
fn set_index_is_not_clamped() {
    let state = loaded(&["a.mp3"]);
    let state = reduce(state, QueueAction::SetIndex(7));
    assert_eq!(state.current_index, 7);
    assert!(state.current().is_none());
}

#[test]
fn transport_actions_set_and_toggle_flags() {
    let state = loaded(&["a.mp3"]);
    let state = reduce(state, QueueAction::TogglePlay);
    assert!(state.is_playing);
    let state = reduce(state, QueueAction::Stop);
    assert!(!state.is_playing);
    let state = reduce(state, QueueAction::SetIsPlaying(true));
    assert!(state.is_playing);
    let state = reduce(state, QueueAction::SetMuted(true));
    assert!(state.muted);
    let state = reduce(state, QueueAction::SetCurrentTime(12.5));
    let state = reduce(state, QueueAction::SetDuration(99.0));
    assert_eq!(state.current_time, 12.5);
    assert_eq!(state.duration, 99.0);
}

#[test]
fn update_media_info_out_of_range_is_identity() {
    let state = loaded(&["a.mp3", "b.mp3"]);
    let before = state.queue.clone();
    let state = reduce(
        state,
        QueueAction::UpdateMediaInfo {
            index: 2,
            id: ItemId(3),
            artwork_url: Some("https://example.com/600x600bb.jpg".into()),
            metadata: None,
        },
    );
    assert_eq!(state.queue, before);
}

#[test]
fn update_media_info_for_replaced_item_is_ignored() {
    let state = loaded(&["a.mp3", "b.mp3"]);
    let before = state.queue.clone();
    let state = reduce(
        state,
        QueueAction::UpdateMediaInfo {
            index: 1,
            id: ItemId(99),
            artwork_url: Some("https://example.com/art.jpg".into()),
            metadata: None,
        },
    );
    assert_eq!(state.queue, before);
}

#[test]
fn update_media_info_with_only_artwork_keeps_metadata() {
    let mut state = loaded(&["a.mp3", "b.mp3"]);
    let tags = TrackMetadata {
        artist: Some("Artist".into()),
        album: Some("Album".into()),
        ..TrackMetadata::default()
    };
    state.queue[1].metadata = Some(tags.clone());
    let id = state.queue[1].id;

    let state = reduce(
        state,
        QueueAction::UpdateMediaInfo {
            index: 1,
            id,
            artwork_url: Some("https://example.com/600x600bb.jpg".into()),
            metadata: None,
        },
    );

    assert_eq!(state.queue[1].metadata, Some(tags));
    assert_eq!(
        state.queue[1].artwork_url.as_deref(),
        Some("https://example.com/600x600bb.jpg")
    );
    assert!(state.queue[0].artwork_url.is_none());
}

#[test]
fn load_next_wrap_and_mute_scenario() {
    let (_, files) = items(&["a.mp4", "b.mp3"]);
    let state = reduce(QueueState::new(), QueueAction::LoadFiles(files));
    assert_eq!(state.len(), 2);
    assert_eq!(state.current_index, 0);

    let state = reduce(state, QueueAction::Next);
    assert_eq!(state.current_index, 1);
    let state = reduce(state, QueueAction::Next);
    assert_eq!(state.current_index, 0);

    let state = reduce(state, QueueAction::ToggleMuted);
    assert!(state.muted);
    let state = reduce(state, QueueAction::ToggleMuted);
    assert!(!state.muted);
}

#[test]
fn source_registry_releases_handles() {
    let mut reg = SourceRegistry::new();
    let a = reg.register("/tmp/a.mp3");
    let b = reg.register("/tmp/b.mp3");
    assert_ne!(a, b);
    assert_eq!(reg.resolve(a), Some(std::path::Path::new("/tmp/a.mp3")));

    assert_eq!(reg.release_except(&[b]), 1);
    assert!(reg.resolve(a).is_none());
    assert!(!reg.release(a));
    assert!(reg.release(b));
    assert!(reg.is_empty());
}

#[test]
fn metadata_fields_are_labelled_in_order() {
    let tags = TrackMetadata {
        title: Some("Song".into()),
        artist: Some("  ".into()),
        year: Some("1999".into()),
        track_number: Some(3),
        track_total: Some(12),
        ..TrackMetadata::default()
    };
    let fields = tags.labelled_fields();
    assert_eq!(
        fields,
        vec![
            ("Title", "Song".to_string()),
            ("Year", "1999".to_string()),
            ("Track", "3 / 12".to_string()),
        ]
    );
}
