//! Mouse input.
//!
//! Clicks are hit-tested against the `ScreenLayout` of the last frame and
//! turned into the same `ShortcutPlan`s the keyboard produces, so both input
//! paths share the transport rules.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::config::PlaybackSettings;
use crate::queue::QueueAction;
use crate::shortcuts::{
    PlanContext, Shortcut, ShortcutPlan, Step, UiEffect, clamp_position, plan, step_volume,
};
use crate::ui::{Overlay, ScreenLayout, TransportButton, inner};

/// What a click landed on.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointerTarget {
    /// The now-playing panel while an item is loaded.
    Player,
    /// The now-playing panel of an empty queue.
    DropZone,
    Button(TransportButton),
    /// Position along the seek bar in `[0, 1]`.
    SeekBar(f64),
    /// Position along the volume bar in `[0, 1]`.
    VolumeBar(f64),
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

/// Position of `column` along `bar` in `[0, 1]`; both end cells are exact.
fn fraction(bar: Rect, column: u16) -> f64 {
    if bar.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(bar.x).min(bar.width - 1);
    f64::from(offset) / f64::from(bar.width - 1)
}

/// The control under `(column, row)`, ignoring overlays.
pub fn target_at(layout: &ScreenLayout, column: u16, row: u16) -> Option<PointerTarget> {
    let transport = &layout.transport;
    if let Some((button, _)) = transport
        .buttons
        .iter()
        .find(|(_, area)| contains(*area, column, row))
    {
        return Some(PointerTarget::Button(*button));
    }
    let seek = inner(transport.seek);
    if contains(seek, column, row) {
        return Some(PointerTarget::SeekBar(fraction(seek, column)));
    }
    let volume = inner(transport.volume);
    if contains(volume, column, row) {
        return Some(PointerTarget::VolumeBar(fraction(volume, column)));
    }
    if contains(layout.now_playing, column, row) {
        return Some(if layout.idle {
            PointerTarget::DropZone
        } else {
            PointerTarget::Player
        });
    }
    None
}

fn button_shortcut(button: TransportButton) -> Shortcut {
    match button {
        TransportButton::Play => Shortcut::TogglePlay,
        TransportButton::Stop => Shortcut::Stop,
        TransportButton::Previous => Shortcut::Previous,
        TransportButton::Next => Shortcut::Next,
        TransportButton::Mute => Shortcut::ToggleMute,
        TransportButton::Info => Shortcut::ToggleInfo,
        TransportButton::Fullscreen => Shortcut::ToggleFullscreen,
    }
}

/// Plan the effects of clicking `target`.
pub fn plan_click(
    target: PointerTarget,
    ctx: &PlanContext,
    settings: &PlaybackSettings,
) -> ShortcutPlan {
    match target {
        PointerTarget::Player => plan(Shortcut::TogglePlay, ctx, settings),
        PointerTarget::DropZone => plan(Shortcut::OpenPicker, ctx, settings),
        PointerTarget::Button(button) => plan(button_shortcut(button), ctx, settings),
        PointerTarget::SeekBar(_) if ctx.queue_empty => ShortcutPlan::default(),
        PointerTarget::SeekBar(at) => ShortcutPlan::of(vec![Step::Seek(clamp_position(
            at * ctx.duration,
            ctx.duration,
        ))]),
        // Dragging the volume always unmutes.
        PointerTarget::VolumeBar(at) => ShortcutPlan::of(vec![
            Step::SetVolume(step_volume(at)),
            Step::Dispatch(QueueAction::SetMuted(false)),
        ]),
    }
}

fn dismiss(overlay: Overlay) -> ShortcutPlan {
    let effect = match overlay {
        // The picker is keyboard driven.
        Overlay::Picker => return ShortcutPlan::default(),
        Overlay::About => UiEffect::CloseAbout,
        Overlay::Help => UiEffect::CloseHelp,
        Overlay::Info => UiEffect::CloseInfo,
    };
    ShortcutPlan::of(vec![Step::Ui(effect)])
}

/// Plan a mouse event. A left click on an open overlay closes it; dragging
/// with the left button scrubs the seek and volume bars.
pub fn plan_mouse(
    event: &MouseEvent,
    layout: &ScreenLayout,
    ctx: &PlanContext,
    settings: &PlaybackSettings,
) -> ShortcutPlan {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(overlay) = layout.overlay {
                return dismiss(overlay);
            }
            target_at(layout, event.column, event.row)
                .map(|target| plan_click(target, ctx, settings))
                .unwrap_or_default()
        }
        MouseEventKind::Drag(MouseButton::Left) if layout.overlay.is_none() => {
            match target_at(layout, event.column, event.row) {
                Some(target @ (PointerTarget::SeekBar(_) | PointerTarget::VolumeBar(_))) => {
                    plan_click(target, ctx, settings)
                }
                _ => ShortcutPlan::default(),
            }
        }
        _ => ShortcutPlan::default(),
    }
}
