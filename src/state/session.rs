//! The single session-state value owned by the event loop.
//!
//! All UI state lives here: history, text box, scroll offset, frame rate,
//! the in-flight transmission and the strobe panel. Operations are pure
//! apart from `tracing` output; anything that touches the outside world
//! (opening a device, writing bytes, running a blocking strobe) is returned
//! as an [`Effect`] for the shell to perform.

use crate::codec::{self, CompressedBlock};
use crate::model::{
    CommandError, KeyAction, LogicalEntry, Message, PresentationError, TransportError,
};
use crate::state::{Command, LineBuffer, ScreenGeometry, ScrollController, TextBox};
use crate::transmit::{
    FrameRate, LightSignal, OutputMode, SignalSink, StrobePanel, Tick, TransmitMode, Transmission,
    TransmissionReport,
};
use tracing::{debug, error, info, warn};

/// Shown when a serial send is attempted without a device.
pub const NOT_CONNECTED: &str = "Cannot send message! Device is not connected.";

/// Shown after a failed acquisition.
pub const CONNECT_HINT: &str =
    "Ensure your device is connected and type \"/connect\" to try again.";

/// Side effect requested by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Release any held device and probe for one.
    Connect,
    /// Write a compressed block to the connected device once.
    Write(CompressedBlock),
    /// Run the pending transmission to completion before handling input.
    RunBlocking,
}

/// Startup settings for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSettings {
    /// Initial frame rate.
    pub rate: FrameRate,
    /// Strobe delivery mode.
    pub transmit_mode: TransmitMode,
    /// Where messages go.
    pub output: OutputMode,
    /// Debug flag from the command line.
    pub debug: bool,
}

/// Explicit session state passed by reference through the event loop.
#[derive(Debug, Clone)]
pub struct SessionState {
    settings: SessionSettings,
    geometry: ScreenGeometry,
    history: LineBuffer,
    textbox: TextBox,
    scroll: ScrollController,
    rate: FrameRate,
    show_fps: bool,
    transmission: Option<Transmission>,
    panel: StrobePanel,
    device: Option<String>,
    should_quit: bool,
}

impl SessionState {
    /// Fresh session laid out for `geometry`.
    pub fn new(settings: SessionSettings, geometry: ScreenGeometry) -> Self {
        Self {
            settings,
            geometry,
            history: LineBuffer::new(geometry.width()),
            textbox: TextBox::new(geometry.width(), geometry.textbox_top()),
            scroll: ScrollController::default(),
            rate: settings.rate,
            show_fps: false,
            transmission: None,
            panel: StrobePanel::default(),
            device: None,
            should_quit: false,
        }
    }

    /// Append the startup banner.
    pub fn startup(&mut self) {
        self.notice("Welcome to the Modulated Light Transceiver Client!");
        self.notice("Type /exit to quit.");
        if self.settings.debug {
            self.notice("Debug mode is on.");
        }
        self.notice("Initializing...");
    }

    // ===== Accessors =====

    /// Startup settings.
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Current layout.
    pub fn geometry(&self) -> ScreenGeometry {
        self.geometry
    }

    /// Chat history.
    pub fn history(&self) -> &LineBuffer {
        &self.history
    }

    /// Text being typed.
    pub fn textbox(&self) -> &TextBox {
        &self.textbox
    }

    /// Chat log scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset()
    }

    /// Frame rate used for the next transmission.
    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    /// Whether a report follows each transmission.
    pub fn shows_fps(&self) -> bool {
        self.show_fps
    }

    /// The in-flight transmission, if any.
    pub fn transmission(&self) -> Option<&Transmission> {
        self.transmission.as_ref()
    }

    /// True while a strobe is running.
    pub fn is_transmitting(&self) -> bool {
        self.transmission.is_some()
    }

    /// Strobe panel state.
    pub fn panel(&self) -> StrobePanel {
        self.panel
    }

    /// Location of the connected device.
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    /// Set once `/exit` or the quit key has been handled.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// One-line status for the separator row.
    pub fn status_line(&self) -> String {
        let device = self.device.as_deref().unwrap_or("no device");
        let fps = if self.show_fps { " | showfps" } else { "" };
        format!(
            "{} | {} {} | {}{}",
            self.rate, self.settings.output, self.settings.transmit_mode, device, fps
        )
    }

    // ===== History =====

    /// Append a system notice.
    pub fn notice(&mut self, text: impl Into<String>) {
        self.push_entry(LogicalEntry::system(text));
    }

    /// Append an error line.
    pub fn error_line(&mut self, text: impl Into<String>) {
        self.push_entry(LogicalEntry::error(text));
    }

    fn push_entry(&mut self, entry: LogicalEntry) {
        let previous = self.history.line_count();
        if let Err(err) = self.history.append(entry) {
            error!(error = %err, "History wrap failed");
            return;
        }
        self.scroll.on_growth(
            previous,
            self.history.line_count(),
            self.geometry.chatlog_height(),
        );
    }

    // ===== Input =====

    /// Insert a typed character at the cursor. Ignored once the message is full.
    pub fn insert_char(&mut self, ch: char) {
        if !self.textbox.insert_at_cursor(ch) {
            debug!(len = self.textbox.len(), "Input full, character dropped");
        }
    }

    /// Apply a bound key action.
    pub fn handle_action(&mut self, action: KeyAction, now_ms: u64) -> Vec<Effect> {
        let total = self.history.line_count();
        let height = self.geometry.chatlog_height();
        let page = i64::try_from(height.max(1)).unwrap_or(i64::MAX);

        match action {
            KeyAction::Submit => return self.submit(now_ms),
            KeyAction::DeleteBefore => {
                self.textbox.delete_before_cursor();
            }
            KeyAction::CursorLeft => {
                self.textbox.move_left();
            }
            KeyAction::CursorRight => {
                self.textbox.move_right();
            }
            KeyAction::ScrollUp => self.scroll.scroll_by(-1, total, height),
            KeyAction::ScrollDown => self.scroll.scroll_by(1, total, height),
            KeyAction::PageUp => self.scroll.scroll_by(-page, total, height),
            KeyAction::PageDown => self.scroll.scroll_by(page, total, height),
            KeyAction::ScrollToBottom => self.scroll.scroll_to_bottom(total, height),
            KeyAction::Quit => self.should_quit = true,
        }
        Vec::new()
    }

    /// Scroll the history by `delta` lines (mouse wheel).
    pub fn scroll_by(&mut self, delta: i64) {
        self.scroll.scroll_by(
            delta,
            self.history.line_count(),
            self.geometry.chatlog_height(),
        );
    }

    /// Re-derive wrap, cursor position and scroll offset for a new layout.
    pub fn resize(&mut self, geometry: ScreenGeometry) {
        let was_at_bottom = self
            .scroll
            .is_at_bottom(self.history.line_count(), self.geometry.chatlog_height());
        self.geometry = geometry;
        if let Err(err) = self.history.rewrap(geometry.width()) {
            error!(error = %err, "History rewrap failed");
        }
        self.textbox.resize(geometry.width(), geometry.textbox_top());
        self.scroll.on_resize(
            was_at_bottom,
            self.history.line_count(),
            geometry.chatlog_height(),
        );
    }

    // ===== Submission =====

    /// Take the typed line and act on it.
    pub fn submit(&mut self, now_ms: u64) -> Vec<Effect> {
        let line = self.textbox.take();
        match Command::parse(&line) {
            Ok(None) => Vec::new(),
            Ok(Some(command)) => self.execute(command, now_ms),
            Err(err) => {
                self.reject(&err);
                Vec::new()
            }
        }
    }

    fn reject(&mut self, err: &CommandError) {
        warn!(error = %err, "Command rejected");
        self.error_line(err.to_string());
    }

    fn execute(&mut self, command: Command, now_ms: u64) -> Vec<Effect> {
        match command {
            Command::Exit => {
                info!("Exit requested");
                self.should_quit = true;
            }
            Command::Connect => return vec![Effect::Connect],
            Command::SetFps(rate) => {
                info!(fps = rate.fps(), "Frame rate changed");
                self.rate = rate;
                self.notice(format!("Frame rate set to {}.", rate));
            }
            Command::ShowFps => {
                self.show_fps = !self.show_fps;
                let state = if self.show_fps { "on" } else { "off" };
                self.notice(format!("FPS report {}.", state));
            }
            Command::SetRed => self.hold(LightSignal::Off, "red"),
            Command::SetGreen => self.hold(LightSignal::On, "green"),
            Command::Send(message) => return self.send(message, now_ms),
        }
        Vec::new()
    }

    fn hold(&mut self, signal: LightSignal, name: &str) {
        if self.is_transmitting() {
            self.error_line("Cannot change the strobe color while transmitting.");
            return;
        }
        match self.panel.assert_signal(signal) {
            Ok(()) => self.notice(format!("Strobe held {}.", name)),
            Err(err) => self.error_line(err.to_string()),
        }
    }

    fn send(&mut self, message: Message, now_ms: u64) -> Vec<Effect> {
        if self.settings.output == OutputMode::Serial && self.device.is_none() {
            self.error_line(NOT_CONNECTED);
            return Vec::new();
        }

        let (block, bits) = match codec::encode_to_bits(&message) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "Message could not be encoded");
                self.error_line(err.to_string());
                return Vec::new();
            }
        };
        debug!(chars = message.len(), bytes = block.len(), bits = bits.len(), "Message encoded");
        self.push_entry(LogicalEntry::user(&message));
        if self.settings.debug {
            self.notice(format!("New strobe message is: {}", bits.as_str()));
        }

        let mut effects = Vec::new();
        if self.device.is_some() {
            effects.push(Effect::Write(block));
        }

        if self.settings.output == OutputMode::Strobe {
            match self.transmission.as_mut() {
                Some(pending) => pending.append(&bits),
                None => self.transmission = Some(Transmission::new(bits, self.rate, now_ms)),
            }
            if self.settings.transmit_mode == TransmitMode::Blocking {
                effects.push(Effect::RunBlocking);
            }
        }
        effects
    }

    // ===== Transmission =====

    /// Advance the in-flight transmission by at most one frame.
    pub fn tick(&mut self, now_ms: u64) -> Result<Option<TransmissionReport>, PresentationError> {
        let Some(transmission) = self.transmission.as_mut() else {
            return Ok(None);
        };
        match transmission.tick(now_ms, &mut self.panel)? {
            Tick::Finished(report) => {
                self.finish_transmission(report);
                Ok(Some(report))
            }
            Tick::Waiting | Tick::Emitted(_) => Ok(None),
        }
    }

    /// Remove the in-flight transmission so the shell can run it to
    /// completion (blocking mode).
    pub fn take_transmission(&mut self) -> Option<Transmission> {
        self.transmission.take()
    }

    /// Mutable strobe panel, the sink for a blocking run.
    pub fn panel_mut(&mut self) -> &mut StrobePanel {
        &mut self.panel
    }

    /// Record a completed transmission.
    pub fn finish_transmission(&mut self, report: TransmissionReport) {
        self.transmission = None;
        info!(
            frames = report.frames,
            elapsed_ms = report.elapsed_ms,
            "Transmission finished"
        );
        if self.show_fps {
            self.notice(format!(
                "Sent {} frames in {} ms ({:.1} fps)",
                report.frames,
                report.elapsed_ms,
                report.fps()
            ));
        }
    }

    // ===== Device =====

    /// Shell is about to probe for a device.
    pub fn connecting(&mut self) {
        self.device = None;
        self.notice("Attempting to connect to device...");
    }

    /// A device was opened.
    pub fn connected(&mut self, location: &str) {
        self.device = Some(location.to_string());
        self.notice(format!("Serial connection established at {}.", location));
    }

    /// Acquisition failed; the session continues disconnected.
    pub fn connect_failed(&mut self, err: &TransportError) {
        self.device = None;
        self.error_line(err.to_string());
        self.notice(CONNECT_HINT);
    }

    /// A write to the device failed; the device is considered gone.
    pub fn write_failed(&mut self, err: &TransportError) {
        warn!(error = %err, "Device write failed");
        self.device = None;
        self.error_line(err.to_string());
        self.notice(CONNECT_HINT);
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
