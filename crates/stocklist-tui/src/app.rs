//! The outer shell around the catalog screen: event loop, global keys,
//! status bar, help overlay and toasts.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use stocklist_core::{Catalog, LoadPhase, Selection};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::catalog::CatalogScreen;
use crate::theme;
use crate::tui::Tui;

const TOAST_TTL: Duration = Duration::from_secs(6);
const TICK_EVERY: Duration = Duration::from_millis(250);
const FRAME_EVERY: Duration = Duration::from_millis(33);

/// Transient message in the bottom-right corner.
struct Toast {
    text: String,
    is_error: bool,
    shown_at: Instant,
}

impl Toast {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            shown_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::info(text)
        }
    }

    fn expired(&self) -> bool {
        self.shown_at.elapsed() > TOAST_TTL
    }
}

pub struct App {
    catalog: Catalog,
    screen: CatalogScreen,
    running: bool,
    help_visible: bool,
    phase: LoadPhase,
    last_loaded: Option<DateTime<Local>>,
    /// Keys, timers and the data bridge all feed this queue.
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    bridge_stop: CancellationToken,
    toast: Option<Toast>,
}

impl App {
    pub fn new(catalog: Catalog, selection: Selection) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            catalog,
            screen: CatalogScreen::new(selection),
            running: true,
            help_visible: false,
            phase: LoadPhase::Idle,
            last_loaded: None,
            action_tx,
            action_rx,
            bridge_stop: CancellationToken::new(),
            toast: None,
        }
    }

    /// Owns the terminal until the user quits. The first load starts
    /// immediately; the screen fills in as data arrives.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        tokio::spawn(crate::data_bridge::spawn_data_bridge(
            self.catalog.clone(),
            self.action_tx.clone(),
            self.bridge_stop.clone(),
        ));
        self.spawn_load(false);

        let mut events = EventReader::new(TICK_EVERY, FRAME_EVERY);
        info!("event loop running");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };
            let action = match event {
                Event::Key(key) => self.handle_key_event(key)?,
                Event::Resize | Event::Render => Some(Action::Render),
                Event::Tick => Some(Action::Tick),
            };
            if let Some(action) = action {
                self.action_tx.send(action)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                if matches!(action, Action::Render) {
                    tui.draw(|frame| self.render(frame))?;
                } else {
                    self.process_action(&action)?;
                }
            }
        }

        self.bridge_stop.cancel();
        events.stop();
        info!("event loop stopped");
        Ok(())
    }

    /// Loads run detached; their progress reaches the screen through the
    /// store and the data bridge.
    fn spawn_load(&self, reload: bool) {
        let catalog = self.catalog.clone();
        tokio::spawn(async move {
            let report = if reload {
                catalog.reload().await
            } else {
                catalog.load().await
            };
            if report.is_complete() {
                info!(
                    categories = report.categories.len(),
                    manufacturers = report.manufacturers.len(),
                    "catalog loaded"
                );
            } else {
                for (target, err) in &report.errors {
                    warn!(%target, error = %err, "load request failed");
                }
            }
        });
    }

    /// The help overlay swallows every key except the ones closing it.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            let closes = matches!(key.code, KeyCode::Esc | KeyCode::Char('?'));
            return Ok(closes.then_some(Action::ToggleHelp));
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('r')) => return Ok(Some(Action::Reload)),
            _ => {}
        }

        self.screen.handle_key_event(key)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Reload => {
                debug!("reload requested");
                self.toast = Some(Toast::info("Reloading catalog\u{2026}"));
                self.spawn_load(true);
            }

            Action::LoadStarted => {
                self.phase = LoadPhase::Loading;
                self.forward(action)?;
            }

            Action::LoadFinished => {
                self.phase = LoadPhase::Loaded;
                self.last_loaded = self
                    .catalog
                    .store()
                    .last_loaded()
                    .map(|at| at.with_timezone(&Local));
                self.forward(action)?;
            }

            Action::LoadFailed(failure) => {
                self.toast = Some(Toast::error(failure.message()));
            }

            Action::Tick => {
                if self.toast.as_ref().is_some_and(Toast::expired) {
                    self.toast = None;
                }
                self.forward(action)?;
            }

            Action::Render => {}

            other => self.forward(other)?,
        }
        Ok(())
    }

    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(follow_up) = self.screen.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [body, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        self.screen.render(frame, body);
        self.render_status_bar(frame, status);

        if let Some(toast) = &self.toast {
            render_toast(frame, area, toast);
        }

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let phase = match self.phase {
            LoadPhase::Idle => Span::styled("\u{25cb} idle", theme::hint()),
            LoadPhase::Loading => Span::styled(
                "\u{25d0} loading",
                Style::default().fg(theme::AMBER),
            ),
            LoadPhase::Loaded => Span::styled(
                match self.last_loaded {
                    Some(at) => format!("\u{25cf} loaded {}", at.format("%H:%M:%S")),
                    None => "\u{25cf} loaded".into(),
                },
                Style::default().fg(theme::STOCK_GREEN),
            ),
        };

        let api = Span::styled(
            format!("  {}", self.catalog.config().api_url),
            theme::hint(),
        );
        let hints = Span::styled(" \u{2502} ? help  r reload  q quit", theme::hint());

        frame.render_widget(
            Paragraph::new(Line::from(vec![Span::raw(" "), phase, api, hints])),
            area,
        );
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_area = centered(area, 54, 20);
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Keys ")
        .title_style(theme::panel_title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::frame_active())
        .style(Style::default().bg(theme::SURFACE));

    let text_area = block.inner(help_area);
    frame.render_widget(block, help_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default().fg(theme::HEADING),
        ))
    };
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<12}"), theme::hint_key()),
            Span::styled(what, theme::hint()),
        ])
    };

    let lines = vec![
        Line::from(""),
        section("Filters"),
        entry("1-3 Tab", "Select category"),
        entry("h/l \u{2190}/\u{2192}", "Previous / next letter"),
        entry("A-Z #", "Jump to letter"),
        Line::from(""),
        section("Products"),
        entry("j/k \u{2191}/\u{2193}", "Move up / down"),
        entry("Home/End", "First / last"),
        entry("Enter Space", "Expand / collapse"),
        entry("Esc", "Collapse"),
        Line::from(""),
        section("Global"),
        entry("r", "Reload everything"),
        entry("?", "This help"),
        entry("q Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled("  Esc or ? to close", theme::hint())),
    ];

    frame.render_widget(Paragraph::new(lines), text_area);
}

/// Anchored bottom-right, just above the status bar.
fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let text_width = u16::try_from(toast.text.chars().count()).unwrap_or(u16::MAX);
    let width = text_width.saturating_add(6).clamp(20, 70).min(area.width);
    let height = 3.min(area.height);
    let rect = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 2),
        width,
        height,
    );

    let (color, icon) = if toast.is_error {
        (theme::ALERT_RED, "\u{2717}")
    } else {
        (theme::HEADING, "\u{b7}")
    };

    let frame_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::SURFACE));
    let message = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(toast.text.as_str(), Style::default().fg(theme::TEXT)),
    ]);

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(message).block(frame_block), rect);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 54, 20), Rect::new(23, 10, 54, 20));

        let small = Rect::new(0, 0, 30, 10);
        let rect = centered(small, 54, 20);
        assert_eq!((rect.width, rect.height), (26, 6));
    }
}
