//! UI rendering for the terminal player.
//!
//! One frame is: menu bar, now-playing panel (with the queue beside it),
//! transport row and status line. Fullscreen keeps only the now-playing
//! panel and the transport row. Overlays (help, track info, about, file
//! picker) are drawn last, centered over the body.
//!
//! `screen_layout` is the single source of the frame geometry: `draw`
//! renders into it and returns it so mouse clicks can be hit-tested against
//! what is actually on screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap,
    },
};

use crate::app::App;
use crate::config::UiSettings;
use crate::queue::MediaKind;
use crate::session::menu::{MenuAction, about_text};
use crate::shortcuts::HELP_ROWS;

/// Columns taken by one transport button.
pub const BUTTON_WIDTH: u16 = 3;
const VOLUME_WIDTH: u16 = 16;

/// Clickable transport buttons.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportButton {
    Play,
    Stop,
    Previous,
    Next,
    Mute,
    Info,
    Fullscreen,
}

impl TransportButton {
    /// Buttons left of the seek bar.
    pub const LEADING: [TransportButton; 4] = [Self::Play, Self::Stop, Self::Previous, Self::Next];
    /// Buttons right of the volume bar.
    pub const TRAILING: [TransportButton; 3] = [Self::Mute, Self::Info, Self::Fullscreen];

    fn label(self, app: &App) -> &'static str {
        match self {
            Self::Play if app.state.is_playing => "❚❚",
            Self::Play => "▶",
            Self::Stop => "■",
            Self::Previous => "|<",
            Self::Next => ">|",
            Self::Mute if app.state.muted => "×",
            Self::Mute => "♪",
            Self::Info => "i",
            Self::Fullscreen => "[]",
        }
    }
}

/// The overlay that currently takes mouse input, topmost first.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Overlay {
    Picker,
    About,
    Help,
    Info,
}

impl Overlay {
    pub fn topmost(app: &App) -> Option<Self> {
        if app.picker.is_some() {
            Some(Self::Picker)
        } else if app.show_about {
            Some(Self::About)
        } else if app.show_help {
            Some(Self::Help)
        } else if app.show_info {
            Some(Self::Info)
        } else {
            None
        }
    }
}

/// Geometry of the transport row. Bar rects include their border.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportLayout {
    pub leading: Rect,
    pub seek: Rect,
    pub volume: Rect,
    pub trailing: Rect,
    pub buttons: Vec<(TransportButton, Rect)>,
}

/// Geometry of one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu: Option<Rect>,
    pub now_playing: Rect,
    pub queue: Option<Rect>,
    pub transport: TransportLayout,
    pub status: Option<Rect>,
    /// Area the overlays are centered over.
    pub body: Rect,
    /// Nothing is loaded; the now-playing panel is the drop zone.
    pub idle: bool,
    pub overlay: Option<Overlay>,
}

/// The inside of a bordered block.
pub fn inner(area: Rect) -> Rect {
    area.inner(Margin::new(1, 1))
}

fn button_slots(area: Rect, buttons: &[TransportButton]) -> Vec<(TransportButton, Rect)> {
    let inside = inner(area);
    buttons
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let x = inside.x.saturating_add(i as u16 * BUTTON_WIDTH);
            let width = BUTTON_WIDTH.min(inside.right().saturating_sub(x));
            (*b, Rect::new(x, inside.y, width, inside.height))
        })
        .collect()
}

fn transport_layout(area: Rect) -> TransportLayout {
    let leading_width = TransportButton::LEADING.len() as u16 * BUTTON_WIDTH + 2;
    let trailing_width = TransportButton::TRAILING.len() as u16 * BUTTON_WIDTH + 2;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(leading_width),
            Constraint::Min(10),
            Constraint::Length(VOLUME_WIDTH),
            Constraint::Length(trailing_width),
        ])
        .split(area);

    let mut buttons = button_slots(cols[0], &TransportButton::LEADING);
    buttons.extend(button_slots(cols[3], &TransportButton::TRAILING));
    TransportLayout {
        leading: cols[0],
        seek: cols[1],
        volume: cols[2],
        trailing: cols[3],
        buttons,
    }
}

/// Compute the frame geometry for `area`.
pub fn screen_layout(area: Rect, app: &App, ui_settings: &UiSettings) -> ScreenLayout {
    let idle = app.current().is_none();
    let overlay = Overlay::topmost(app);

    if app.fullscreen {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);
        return ScreenLayout {
            menu: None,
            now_playing: rows[0],
            queue: None,
            transport: transport_layout(rows[1]),
            status: None,
            body: rows[0],
            idle,
            overlay,
        };
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    let (now_playing, queue) = if ui_settings.show_queue && app.state.len() > 1 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(rows[1]);
        (cols[0], Some(cols[1]))
    } else {
        (rows[1], None)
    };

    ScreenLayout {
        menu: Some(rows[0]),
        now_playing,
        queue,
        transport: transport_layout(rows[2]),
        status: Some(rows[3]),
        body: rows[1],
        idle,
        overlay,
    }
}

/// Format seconds as `MM:SS`.
fn format_mmss(secs: f64) -> String {
    let secs = if secs.is_finite() { secs.max(0.0) as u64 } else { 0 };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame` and return the layout it used.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) -> ScreenLayout {
    let layout = screen_layout(frame.area(), app, ui_settings);

    if let Some(menu) = layout.menu {
        draw_menu_bar(frame, app, menu);
    }
    draw_now_playing(frame, app, layout.now_playing);
    if let Some(queue) = layout.queue {
        draw_queue(frame, app, queue);
    }
    draw_transport(frame, app, &layout.transport);
    if let Some(status) = layout.status {
        draw_status(frame, app, status);
    }

    if app.show_info {
        draw_info(frame, app, layout.body);
    }
    if app.show_help {
        draw_help(frame, layout.body);
    }
    if app.show_about {
        draw_about(frame, layout.body);
    }
    if app.picker.is_some() {
        draw_picker(frame, app, layout.body);
    }
    layout
}

fn draw_menu_bar(frame: &mut Frame, app: &App, area: Rect) {
    let labels = &app.labels;
    let mut spans = vec![Span::styled(format!(" {} ", labels.file), Style::default().bold())];
    for action in MenuAction::ALL {
        if action == MenuAction::ToggleHelp {
            spans.push(Span::styled(format!(" {} ", labels.help), Style::default().bold()));
        }
        spans.push(Span::raw(format!(
            " {} ^{} ",
            labels.label(action),
            action.chord().to_ascii_uppercase()
        )));
    }
    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

fn draw_now_playing(frame: &mut Frame, app: &App, area: Rect) {
    let Some(item) = app.current() else {
        let hint = Paragraph::new(format!(
            "\n\nDrop {} here\nor click / press O / Ctrl+O to open",
            app.labels.media_files.to_lowercase()
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" classic player "));
        frame.render_widget(hint, area);
        return;
    };

    let mut lines = vec![Line::from(item.title().to_string().bold())];
    if let Some(meta) = item.metadata.as_ref() {
        let by: Vec<&str> = [meta.artist.as_deref(), meta.album.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !by.is_empty() {
            lines.push(Line::from(by.join(" · ")));
        }
    }
    lines.push(Line::from(""));
    match item.kind {
        MediaKind::Video => lines.push(Line::from(format!(
            "[video] {}.{} (audio track)",
            item.display_name, item.extension
        ))),
        MediaKind::Audio => {
            lines.push(Line::from(format!(
                "[audio] {}.{}",
                item.display_name, item.extension
            )));
            if let Some(url) = item.artwork_url.as_deref() {
                lines.push(Line::from(format!("Artwork: {url}").dim()));
            }
        }
    }

    let title = format!(" {} / {} ", app.state.current_index + 1, app.state.len());
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn draw_queue(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .state
        .queue
        .iter()
        .map(|item| ListItem::new(item.title().to_string()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" queue "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(app.state.current_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_buttons(frame: &mut Frame, app: &App, area: Rect, buttons: &[TransportButton]) {
    let spans: Vec<Span> = buttons
        .iter()
        .map(|b| Span::raw(format!("{:^3}", b.label(app))))
        .collect();
    let row = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(row, area);
}

fn draw_transport(frame: &mut Frame, app: &App, layout: &TransportLayout) {
    let st = &app.state;
    draw_buttons(frame, app, layout.leading, &TransportButton::LEADING);

    let ratio = if st.duration > 0.0 {
        (st.current_time / st.duration).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let label = format!(
        "{} / {}",
        format_mmss(st.current_time),
        format_mmss(st.duration)
    );
    let seek = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .ratio(ratio)
        .label(label);
    frame.render_widget(seek, layout.seek);

    let (level, label) = if st.muted {
        (0.0, "muted".to_string())
    } else {
        (app.volume.clamp(0.0, 1.0), format!("vol {:.0}%", app.volume * 100.0))
    };
    let volume = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .ratio(level)
        .label(label);
    frame.render_widget(volume, layout.volume);

    draw_buttons(frame, app, layout.trailing, &TransportButton::TRAILING);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = app
        .status
        .clone()
        .unwrap_or_else(|| "? shortcuts".to_string());
    frame.render_widget(Paragraph::new(format!(" {text}")).dim(), area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect_sized(44, HELP_ROWS.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);
    let lines: Vec<Line> = HELP_ROWS
        .iter()
        .map(|(key, what)| {
            Line::from(vec![Span::raw(format!("{key:<8}")).bold(), Span::raw(*what)])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).block(left_padded(" shortcuts ")), popup);
}

fn draw_info(frame: &mut Frame, app: &App, area: Rect) {
    let fields = app
        .current()
        .and_then(|item| item.metadata.as_ref())
        .map(|m| m.labelled_fields())
        .unwrap_or_default();
    let popup = centered_rect_sized(60, fields.len().max(1) as u16 + 2, area);
    frame.render_widget(Clear, popup);

    let lines: Vec<Line> = if fields.is_empty() {
        vec![Line::from("No track info")]
    } else {
        fields
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![Span::raw(format!("{label:<9}")).bold(), Span::raw(value)])
            })
            .collect()
    };
    let info = Paragraph::new(lines)
        .block(left_padded(" track info (I closes) "))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, popup);
}

fn draw_about(frame: &mut Frame, area: Rect) {
    let popup = centered_rect_sized(30, 5, area);
    frame.render_widget(Clear, popup);
    let about = Paragraph::new(about_text(env!("CARGO_PKG_VERSION")))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(about, popup);
}

fn draw_picker(frame: &mut Frame, app: &App, area: Rect) {
    let Some((picker, _)) = app.picker.as_ref() else {
        return;
    };
    let popup = centered_rect_sized(70, area.height.saturating_sub(2), area);
    frame.render_widget(Clear, popup);

    let title = format!(" {} : {} ", app.labels.open_file, picker.dir().display());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(" enter open · space mark · ⌫ up · esc cancel ");

    if let Some(err) = picker.error.as_deref() {
        let message = Paragraph::new(err.to_string())
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(message, popup);
        return;
    }

    let items: Vec<ListItem> = picker
        .entries()
        .iter()
        .map(|e| {
            let mark = if picker.is_marked(&e.path) { "* " } else { "  " };
            let name = if e.is_dir {
                format!("{}/", e.name)
            } else {
                e.name.clone()
            };
            ListItem::new(format!("{mark}{name}"))
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if !picker.entries().is_empty() {
        state.select(Some(picker.selected()));
    }
    frame.render_stateful_widget(list, popup, &mut state);
}
