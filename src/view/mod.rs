//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod layout;
pub mod styles;

pub use styles::{ColorConfig, EntryStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::{AppError, PresentationError, TransportError};
use crate::state::{Effect, SessionState};
use crate::transmit::{Clock, LightSignal, OutputMode, SignalSink, SystemClock};
use crate::transport::{Link, Transport};
use constants::{ACTIVE_POLL, IDLE_POLL, MOUSE_SCROLL_LINES};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Strobe panel could not be updated
    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend and clock to support testing with `TestBackend`
/// and a manual clock.
pub struct TuiApp<B, C>
where
    B: ratatui::backend::Backend,
    C: Clock,
{
    terminal: Terminal<B>,
    session: SessionState,
    clock: C,
    transport: Box<dyn Transport>,
    link: Option<Box<dyn Link>>,
    key_bindings: KeyBindings,
    styles: EntryStyles,
    strobe_width: u16,
}

impl TuiApp<CrosstermBackend<Stdout>, SystemClock> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(config: &ResolvedConfig, debug: bool) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_parts(
            terminal,
            SessionState::new(
                config.session_settings(debug),
                crate::state::ScreenGeometry::default(),
            ),
            SystemClock::new(),
            Box::new(config.serial_transport()),
            config.strobe_width,
            EntryStyles::new(),
        ))
    }
}

impl<B, C> TuiApp<B, C>
where
    B: ratatui::backend::Backend,
    C: Clock,
{
    /// Assemble an app from its parts and lay the session out for the
    /// terminal's current size.
    pub fn with_parts(
        terminal: Terminal<B>,
        mut session: SessionState,
        clock: C,
        transport: Box<dyn Transport>,
        strobe_width: u16,
        styles: EntryStyles,
    ) -> Self {
        let (width, height) = match terminal.size() {
            Ok(size) => (size.width, size.height),
            Err(_) => (constants::FALLBACK_WIDTH, 24),
        };
        session.resize(layout::chat_geometry(width, height, strobe_width));

        Self {
            terminal,
            session,
            clock,
            transport,
            link: None,
            key_bindings: KeyBindings::default(),
            styles,
            strobe_width,
        }
    }

    /// Banner and first device acquisition.
    ///
    /// # Errors
    ///
    /// In serial output mode without `debug`, failing to find a device is
    /// fatal. Everywhere else the failure is only reported in the history.
    pub fn startup(&mut self) -> Result<(), AppError> {
        self.session.startup();
        match self.connect() {
            Ok(()) => Ok(()),
            Err(err)
                if self.session.settings().output == OutputMode::Serial
                    && !self.session.settings().debug =>
            {
                Err(AppError::Transport(err))
            }
            Err(_) => Ok(()),
        }
    }

    /// Run the main event loop
    ///
    /// Returns when the session asks to quit (`/exit` or Ctrl+C).
    /// Polls with a short timeout while a strobe is in flight so frame
    /// deadlines are serviced between key presses.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        while !self.session.should_quit() {
            let timeout = if self.session.is_transmitting() {
                ACTIVE_POLL
            } else {
                IDLE_POLL
            };

            let mut dirty = false;
            if event::poll(timeout)? {
                self.handle_event(event::read()?)?;
                dirty = true;
            }
            dirty |= self.tick()?;

            if dirty {
                self.draw()?;
            }
        }

        info!("Event loop finished");
        Ok(())
    }

    /// Dispatch one terminal event.
    fn handle_event(&mut self, event: Event) -> Result<(), TuiError> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                Ok(())
            }
            Event::Resize(width, height) => {
                self.handle_resize(width, height);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Handle a keyboard event: bound keys become actions, other printable
    /// characters go to the text box.
    fn handle_key(&mut self, key: KeyEvent) -> Result<(), TuiError> {
        if let Some(action) = self.key_bindings.get(key) {
            let effects = self.session.handle_action(action, self.clock.now_ms());
            return self.apply_effects(effects);
        }

        if let KeyCode::Char(ch) = key.code {
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                self.session.insert_char(ch);
            }
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.session.scroll_by(-MOUSE_SCROLL_LINES),
            MouseEventKind::ScrollDown => self.session.scroll_by(MOUSE_SCROLL_LINES),
            _ => {}
        }
    }

    /// Handle a terminal resize event
    ///
    /// Re-derives wrap, cursor position and scroll offset for the new size.
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.session
            .resize(layout::chat_geometry(width, height, self.strobe_width));
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> Result<(), TuiError> {
        for effect in effects {
            match effect {
                Effect::Connect => {
                    // failure is already reported in the history
                    let _ = self.connect();
                }
                Effect::Write(block) => self.write_block(block.as_bytes()),
                Effect::RunBlocking => self.run_blocking()?,
            }
        }
        Ok(())
    }

    /// Release any held device, then probe for one.
    fn connect(&mut self) -> Result<(), TransportError> {
        self.link = None;
        self.session.connecting();
        match self.transport.open() {
            Ok(link) => {
                info!(location = link.location(), "Device connected");
                self.session.connected(link.location());
                self.link = Some(link);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Device acquisition failed");
                self.session.connect_failed(&err);
                Err(err)
            }
        }
    }

    fn write_block(&mut self, bytes: &[u8]) {
        let result = match self.link.as_mut() {
            Some(link) => link.write(bytes),
            None => Err(TransportError::Disconnected),
        };
        match result {
            Ok(()) => debug!(bytes = bytes.len(), "Block written to device"),
            Err(err) => {
                self.link = None;
                self.session.write_failed(&err);
            }
        }
    }

    /// Advance the interleaved transmission. Returns true if anything changed.
    fn tick(&mut self) -> Result<bool, TuiError> {
        if !self.session.is_transmitting() {
            return Ok(false);
        }
        let before = self.session.panel().transitions();
        self.session.tick(self.clock.now_ms())?;
        Ok(self.session.panel().transitions() != before)
    }

    /// Run the pending strobe to completion, redrawing on every frame.
    /// Input is not read until it finishes.
    fn run_blocking(&mut self) -> Result<(), TuiError> {
        let Some(mut transmission) = self.session.take_transmission() else {
            return Ok(());
        };

        let session = &mut self.session;
        let terminal = &mut self.terminal;
        let styles = self.styles;
        let strobe_width = self.strobe_width;
        let mut sink = |signal: LightSignal| -> Result<(), PresentationError> {
            session.panel_mut().assert_signal(signal)?;
            terminal.draw(|frame| layout::render(frame, session, strobe_width, &styles))?;
            Ok(())
        };

        let report = transmission.run_blocking(&self.clock, &mut sink)?;
        self.session.finish_transmission(report);
        Ok(())
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let session = &self.session;
        let styles = &self.styles;
        let strobe_width = self.strobe_width;
        self.terminal
            .draw(|frame| layout::render(frame, session, strobe_width, styles))?;
        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test
impl<B, C> TuiApp<B, C>
where
    B: ratatui::backend::Backend,
    C: Clock,
{
    /// Get reference to session state (test-only accessor)
    pub(crate) fn session(&self) -> &SessionState {
        &self.session
    }

    /// Feed a single terminal event (test-only accessor)
    pub(crate) fn handle_event_test(&mut self, event: Event) -> Result<(), TuiError> {
        self.handle_event(event)
    }

    /// Advance the interleaved strobe once (test-only accessor)
    pub(crate) fn tick_test(&mut self) -> Result<bool, TuiError> {
        self.tick()
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Whether a device link is held (test-only accessor)
    pub(crate) fn has_link(&self) -> bool {
        self.link.is_some()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Get mutable reference to terminal (test-only accessor)
    pub(crate) fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, the startup device acquisition, the event loop,
/// and always restores the terminal afterwards.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(config: &ResolvedConfig, debug: bool) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config, debug)?;

    let result = app
        .startup()
        .map_err(TuiError::from)
        .and_then(|()| app.run());

    // Always restore terminal state
    drop(app);
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
