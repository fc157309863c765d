//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! `TuiApp<TestBackend, ManualClock>` with convenient methods for simulating
//! user interactions and the passage of time.

use crate::state::{SessionSettings, SessionState};
use crate::transmit::{ManualClock, OutputMode, TransmitMode};
use crate::transport::MemoryTransport;
use crate::view::styles::ColorConfig;
use crate::view::{layout, EntryStyles, TuiApp, TuiError};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Strobe panel width used by the harness.
pub const HARNESS_STROBE_WIDTH: u16 = 8;

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Owns a clone of the manual clock and the memory transport so tests can
/// move time and plug or unplug the simulated device.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend, ManualClock>,
    clock: ManualClock,
    transport: MemoryTransport,
}

impl AcceptanceTestHarness {
    /// Strobe output, interleaved mode, device plugged in, 80x24.
    pub fn new() -> Result<Self, TuiError> {
        Self::with_settings(SessionSettings::default(), true, 80, 24)
    }

    /// Full control over settings, device availability and terminal size.
    ///
    /// Runs the startup banner and first acquisition like the real binary.
    pub fn with_settings(
        settings: SessionSettings,
        device_available: bool,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let clock = ManualClock::new(0, 1);
        let transport = MemoryTransport::new(device_available);
        let session = SessionState::new(
            settings,
            layout::chat_geometry(width, height, HARNESS_STROBE_WIDTH),
        );

        let mut app = TuiApp::with_parts(
            terminal,
            session,
            clock.clone(),
            Box::new(transport.clone()),
            HARNESS_STROBE_WIDTH,
            EntryStyles::with_color_config(ColorConfig::new(false)),
        );
        app.startup()?;

        Ok(Self {
            app,
            clock,
            transport,
        })
    }

    /// Serial output with the given device availability.
    pub fn serial(device_available: bool, debug: bool) -> Result<Self, TuiError> {
        let settings = SessionSettings {
            output: OutputMode::Serial,
            debug,
            ..SessionSettings::default()
        };
        Self::with_settings(settings, device_available, 80, 24)
    }

    /// Strobe output in blocking mode.
    pub fn blocking() -> Result<Self, TuiError> {
        let settings = SessionSettings {
            transmit_mode: TransmitMode::Blocking,
            ..SessionSettings::default()
        };
        Self::with_settings(settings, true, 80, 24)
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: KeyCode) {
        self.send_key_with_mods(key, KeyModifiers::NONE);
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) {
        self.send_event(Event::Key(KeyEvent::new(key, mods)));
    }

    /// Type text (sends individual character key events)
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.send_key(KeyCode::Char(ch));
        }
    }

    /// Type a line and press Enter.
    pub fn submit(&mut self, text: &str) {
        self.type_text(text);
        self.send_key(KeyCode::Enter);
    }

    /// Scroll with the mouse wheel.
    pub fn scroll_wheel(&mut self, up: bool) {
        let kind = if up {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        };
        self.send_event(Event::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
    }

    /// Resize the terminal and deliver the resize event.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.terminal_mut().backend_mut().resize(width, height);
        self.send_event(Event::Resize(width, height));
    }

    fn send_event(&mut self, event: Event) {
        if let Err(err) = self.app.handle_event_test(event) {
            panic!("event handling failed: {}", err);
        }
    }

    /// Move the clock forward by `ms` and service the strobe once.
    pub fn advance(&mut self, ms: u64) {
        self.clock.advance(ms);
        if let Err(err) = self.app.tick_test() {
            panic!("tick failed: {}", err);
        }
    }

    /// Advance one millisecond at a time until the strobe finishes.
    ///
    /// Returns the number of milliseconds that passed.
    pub fn run_until_idle(&mut self, limit_ms: u64) -> u64 {
        let start = self.clock_ms();
        while self.state().is_transmitting() {
            assert!(
                self.clock_ms() - start <= limit_ms,
                "transmission did not finish within {} ms",
                limit_ms
            );
            self.advance(1);
        }
        self.clock_ms() - start
    }

    /// Current manual clock reading.
    pub fn clock_ms(&self) -> u64 {
        use crate::transmit::Clock;
        self.clock.now_ms()
    }

    /// Access session state for assertions
    pub fn state(&self) -> &SessionState {
        self.app.session()
    }

    /// The simulated device.
    pub fn transport(&self) -> &MemoryTransport {
        &self.transport
    }

    /// Whether the app holds a device link.
    pub fn has_link(&self) -> bool {
        self.app.has_link()
    }

    /// Rendered history lines, oldest first.
    pub fn history_lines(&self) -> Vec<String> {
        self.state()
            .history()
            .lines()
            .iter()
            .map(|line| line.text.clone())
            .collect()
    }

    /// True if any history line contains `needle`.
    pub fn history_contains(&self, needle: &str) -> bool {
        self.history_lines().iter().any(|line| line.contains(needle))
    }

    /// Render current state to string
    pub fn render_to_string(&mut self) -> String {
        if let Err(err) = self.app.render_test() {
            panic!("render failed: {}", err);
        }
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_starts_with_banner_and_device() {
        let harness = AcceptanceTestHarness::new().unwrap();
        assert!(harness.history_contains("Welcome"));
        assert!(harness.has_link());
        assert_eq!(harness.state().device(), Some("mem0"));
    }

    #[test]
    fn buffer_to_string_trims_trailing_blank_rows() {
        let mut buffer = ratatui::buffer::Buffer::empty(ratatui::layout::Rect::new(0, 0, 4, 3));
        buffer.set_string(0, 0, "ab", ratatui::style::Style::default());
        assert_eq!(buffer_to_string(&buffer), "ab");
    }
}
