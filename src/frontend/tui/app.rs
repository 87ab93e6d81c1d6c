use super::painter::{to_color, BufferPainter};
use crate::demo::DemoApp;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventState,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Width of the settings panel in columns, borders included
const PANEL_WIDTH: u16 = 40;

/// Canvas backdrop under translucent overlays
const BACKDROP: (u8, u8, u8) = (24, 24, 28);

/// TUI Frontend using ratatui
///
/// Renders the settings panel with ratatui widgets and the input widget
/// through [`BufferPainter`]; events come from crossterm.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    /// Keyboard enhancement flags were pushed (press/release reporting)
    keyboard_enhanced: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture, and enters alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )
            .context("Failed to enable keyboard enhancement")?;
        }
        tracing::info!("Terminal keyboard enhancement: {}", keyboard_enhanced);

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            keyboard_enhanced,
        })
    }

    /// Whether key release events will be delivered
    pub fn reports_key_releases(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => Some(FrontendEvent::Key {
                code: key_event.code,
                modifiers: key_event.modifiers,
                kind: key_event.kind,
                keypad: key_event.state.contains(KeyEventState::KEYPAD),
            }),
            Event::Mouse(mouse_event) => Some(FrontendEvent::Mouse {
                kind: mouse_event.kind,
                x: mouse_event.column,
                y: mouse_event.row,
                modifiers: mouse_event.modifiers,
            }),
            Event::Resize(w, h) => Some(FrontendEvent::Resize {
                width: w,
                height: h,
            }),
            _ => None,
        }
    }
}

fn panel_lines(app: &DemoApp) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = app
        .panel_items()
        .into_iter()
        .enumerate()
        .map(|(row, item)| {
            let marker = if row == app.panel_cursor { "> " } else { "  " };
            let checkbox = match item.checked {
                Some(true) => "[x] ",
                Some(false) => "[ ] ",
                None => "",
            };
            let style = if row == app.panel_cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            let mut spans = vec![Span::styled(format!("{}{}", marker, checkbox), style)];
            if let Some(color) = item.swatch {
                spans.push(Span::styled("██ ", Style::default().fg(to_color(color))));
            }
            spans.push(Span::styled(item.label, style));
            Line::from(spans)
        })
        .collect();

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Legend",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (name, color) in app.legend() {
        lines.push(Line::from(vec![
            Span::styled("  ██ ", Style::default().fg(to_color(color))),
            Span::raw(name),
        ]));
    }

    if app.options.mouse.recordable || !app.mouse.recorded().is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(format!("Recorded: {}", app.recorded_text())));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "^N/^P select  ^E toggle  click row",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "^F/^B or right click: step value",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "^T widget  ^L layout  ^Q quit",
        Style::default().fg(Color::DarkGray),
    )));
    if !app.status.is_empty() {
        lines.push(Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn draw(f: &mut Frame, app: &mut DemoApp) {
    let [panel, canvas] =
        Layout::horizontal([Constraint::Length(PANEL_WIDTH), Constraint::Min(1)]).areas(f.area());

    let panel_block = Block::default().borders(Borders::ALL).title(" input-widgets ");
    let panel_inner = panel_block.inner(panel);
    let scroll = app.scroll_panel(panel_inner.height as usize);
    let lines = panel_lines(app);
    f.render_widget(
        Paragraph::new(lines)
            .block(panel_block)
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0)),
        panel,
    );
    let rows = (app.panel_items().len().saturating_sub(scroll) as u16).min(panel_inner.height);
    app.panel_area = Some(Rect::new(panel_inner.x, panel_inner.y, panel_inner.width, rows));

    let title = format!(" {} - {} ", app.widget.name(), app.layout_name());
    let canvas_block = Block::default().borders(Borders::ALL).title(title);
    let canvas_inner = canvas_block.inner(canvas);
    f.render_widget(canvas_block, canvas);
    app.canvas_area = Some(canvas_inner);

    let cell = app.cell_size;
    let mut painter =
        BufferPainter::new(f.buffer_mut(), canvas_inner, cell).with_backdrop(BACKDROP);
    let viewport = painter.viewport();
    app.render_widget(&mut painter, viewport);
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();

        while event::poll(self.poll_timeout)? {
            if let Ok(ev) = event::read() {
                if let Some(frontend_event) = Self::convert_event(ev) {
                    events.push(frontend_event);
                }
            }
        }

        Ok(events)
    }

    fn render(&mut self, app: &mut DemoApp) -> Result<()> {
        self.terminal.draw(|f| draw(f, app))?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.keyboard_enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
            self.keyboard_enhanced = false;
        }
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use ratatui::backend::TestBackend;

    #[test]
    fn test_convert_key_event_keeps_kind_and_keypad() {
        let mut key = KeyEvent::new_with_kind(KeyCode::Char('7'), KeyModifiers::NONE, KeyEventKind::Release);
        key.state = KeyEventState::KEYPAD;
        let converted = TuiFrontend::convert_event(Event::Key(key));
        assert_eq!(
            converted,
            Some(FrontendEvent::Key {
                code: KeyCode::Char('7'),
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                keypad: true,
            })
        );
        assert_eq!(TuiFrontend::convert_event(Event::FocusGained), None);
    }

    #[test]
    fn test_draw_records_areas_and_paints_canvas() {
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).expect("test terminal");
        let mut app = DemoApp::new(&Config::default());
        terminal
            .draw(|f| draw(f, &mut app))
            .expect("draw succeeds");

        let panel = app.panel_area.expect("panel area recorded");
        let canvas = app.canvas_area.expect("canvas area recorded");
        assert_eq!((panel.x, panel.y), (1, 1));
        assert_eq!(panel.height as usize, app.panel_items().len());
        assert_eq!((canvas.x, canvas.y), (PANEL_WIDTH + 1, 1));

        // The keyboard paints key backgrounds into the canvas
        let buffer = terminal.backend().buffer();
        let painted = (canvas.y..canvas.bottom())
            .flat_map(|y| (canvas.x..canvas.right()).map(move |x| (x, y)))
            .any(|(x, y)| matches!(buffer[(x, y)].bg, Color::Rgb(..)));
        assert!(painted);
    }

    #[test]
    fn test_panel_scrolls_to_cursor() {
        let mut terminal = Terminal::new(TestBackend::new(160, 24)).expect("test terminal");
        let mut app = DemoApp::new(&Config::default());
        app.style_editor = true;
        let count = app.panel_items().len();
        assert!(count > 22);
        app.panel_cursor = count - 1;
        terminal
            .draw(|f| draw(f, &mut app))
            .expect("draw succeeds");

        let panel = app.panel_area.expect("panel area recorded");
        assert_eq!(app.panel_scroll, count - 22);
        assert_eq!(panel.height, 22);

        // The last row is drawn on the bottom line of the panel
        let buffer = terminal.backend().buffer();
        let bottom: String = (panel.x..panel.right())
            .map(|x| buffer[(x, panel.bottom() - 1)].symbol().to_string())
            .collect();
        assert!(bottom.contains("Key Pressed+Highlighted"), "{bottom}");
    }
}
