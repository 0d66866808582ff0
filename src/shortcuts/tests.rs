use super::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctx(current_time: f64, duration: f64, volume: f64) -> PlanContext {
    PlanContext {
        current_time,
        duration,
        volume,
        queue_empty: false,
    }
}

#[test]
fn letters_are_case_insensitive() {
    for (lower, upper, expected) in [
        ('s', 'S', Shortcut::Stop),
        ('a', 'A', Shortcut::Previous),
        ('d', 'D', Shortcut::Next),
        ('m', 'M', Shortcut::ToggleMute),
        ('f', 'F', Shortcut::ToggleFullscreen),
        ('o', 'O', Shortcut::OpenPicker),
        ('i', 'I', Shortcut::ToggleInfo),
    ] {
        assert_eq!(shortcut_for(&key(KeyCode::Char(lower)), false), Some(expected));
        let shifted = KeyEvent::new(KeyCode::Char(upper), KeyModifiers::SHIFT);
        assert_eq!(shortcut_for(&shifted, false), Some(expected));
    }
}

#[test]
fn control_chords_are_not_shortcuts() {
    let ctrl_o = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
    assert_eq!(shortcut_for(&ctrl_o, false), None);
}

#[test]
fn escape_only_matches_with_help_open() {
    assert_eq!(shortcut_for(&key(KeyCode::Esc), false), None);
    assert_eq!(shortcut_for(&key(KeyCode::Esc), true), Some(Shortcut::CloseHelp));
    let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
    assert_eq!(shortcut_for(&question, false), Some(Shortcut::ToggleHelp));
}

#[test]
fn digit_seeks_to_tenths_of_duration() {
    let settings = PlaybackSettings::default();
    let p = plan(Shortcut::SeekPercent(1), &ctx(0.0, 200.0, 1.0), &settings);
    assert_eq!(p.seek_target(), Some(20.0));

    for d in b'0'..=b'9' {
        let s = shortcut_for(&key(KeyCode::Char(d as char)), false).unwrap();
        let t = plan(s, &ctx(50.0, 200.0, 1.0), &settings)
            .seek_target()
            .unwrap();
        assert!((0.0..=200.0).contains(&t));
        assert_eq!(t, f64::from(d - b'0') * 20.0);
    }
}

#[test]
fn arrow_seek_is_clamped_to_duration() {
    let settings = PlaybackSettings::default();
    let back = plan(Shortcut::SeekBack, &ctx(3.0, 60.0, 1.0), &settings);
    assert_eq!(back.seek_target(), Some(0.0));
    let fwd = plan(Shortcut::SeekForward, &ctx(58.0, 60.0, 1.0), &settings);
    assert_eq!(fwd.seek_target(), Some(60.0));
    let mid = plan(Shortcut::SeekForward, &ctx(10.0, 60.0, 1.0), &settings);
    assert_eq!(mid.seek_target(), Some(15.0));
    let unknown = plan(Shortcut::SeekForward, &ctx(0.0, 0.0, 1.0), &settings);
    assert_eq!(unknown.seek_target(), Some(0.0));
}

#[test]
fn volume_is_clamped_and_rounded() {
    let settings = PlaybackSettings::default();
    let up = plan(Shortcut::VolumeUp, &ctx(0.0, 0.0, 0.98), &settings);
    assert_eq!(up.volume(), Some(1.0));
    let down = plan(Shortcut::VolumeDown, &ctx(0.0, 0.0, 0.02), &settings);
    assert_eq!(down.volume(), Some(0.0));
    let step = plan(Shortcut::VolumeDown, &ctx(0.0, 0.0, 0.7), &settings);
    assert_eq!(step.volume(), Some(0.65));
    assert_eq!(step_volume(0.1 + 0.2), 0.3);
}

#[test]
fn previous_goes_back_only_near_the_start() {
    let settings = PlaybackSettings::default();

    let early = plan(Shortcut::Previous, &ctx(2.0, 100.0, 1.0), &settings);
    assert_eq!(
        early.actions(),
        vec![&QueueAction::Previous, &QueueAction::SetIsPlaying(true)]
    );
    assert_eq!(early.seek_target(), Some(0.0));

    let late = plan(Shortcut::Previous, &ctx(42.0, 100.0, 1.0), &settings);
    assert_eq!(late.actions(), vec![&QueueAction::SetIsPlaying(true)]);
    assert_eq!(late.seek_target(), Some(0.0));
}

#[test]
fn previous_policy_settings() {
    let mut settings = PlaybackSettings::default();
    assert_eq!(
        PreviousPolicy::from_settings(&settings),
        PreviousPolicy::RestartThenPrevious { threshold: 5.0 }
    );

    settings.previous_policy = PreviousPolicySetting::AlwaysRestart;
    let p = plan(Shortcut::Previous, &ctx(0.5, 100.0, 1.0), &settings);
    assert!(!p.actions().contains(&&QueueAction::Previous));

    settings.previous_policy = PreviousPolicySetting::AlwaysPrevious;
    let p = plan(Shortcut::Previous, &ctx(80.0, 100.0, 1.0), &settings);
    assert!(p.actions().contains(&&QueueAction::Previous));
}

#[test]
fn next_and_stop_restart_at_zero() {
    let settings = PlaybackSettings::default();
    let next = plan(Shortcut::Next, &ctx(30.0, 100.0, 1.0), &settings);
    assert_eq!(
        next.steps,
        vec![
            Step::Dispatch(QueueAction::Next),
            Step::Seek(0.0),
            Step::Dispatch(QueueAction::SetIsPlaying(true)),
        ]
    );

    let stop = plan(Shortcut::Stop, &ctx(30.0, 100.0, 1.0), &settings);
    assert_eq!(
        stop.steps,
        vec![Step::Dispatch(QueueAction::Stop), Step::Seek(0.0)]
    );
}

#[test]
fn ui_shortcuts_only_produce_ui_effects() {
    let settings = PlaybackSettings::default();
    let p = plan(Shortcut::ToggleInfo, &PlanContext::default(), &settings);
    assert_eq!(p.steps, vec![Step::Ui(UiEffect::ToggleInfo)]);
    assert!(p.actions().is_empty());
}

#[test]
fn transport_shortcuts_do_nothing_without_media() {
    let settings = PlaybackSettings::default();
    let idle = PlanContext {
        volume: 0.5,
        queue_empty: true,
        ..PlanContext::default()
    };
    for shortcut in [
        Shortcut::TogglePlay,
        Shortcut::Stop,
        Shortcut::Previous,
        Shortcut::Next,
        Shortcut::SeekBack,
        Shortcut::SeekForward,
        Shortcut::SeekPercent(5),
    ] {
        assert!(plan(shortcut, &idle, &settings).is_empty(), "{shortcut:?}");
    }

    // Volume, mute and UI toggles still work on an empty queue.
    assert_eq!(plan(Shortcut::VolumeUp, &idle, &settings).volume(), Some(0.55));
    assert_eq!(
        plan(Shortcut::ToggleMute, &idle, &settings).actions(),
        vec![&QueueAction::ToggleMuted]
    );
    assert_eq!(
        plan(Shortcut::OpenPicker, &idle, &settings).steps,
        vec![Step::Ui(UiEffect::OpenPicker)]
    );
}
