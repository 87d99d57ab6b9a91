//! Application core — state, lifecycle, and event dispatch.
//!
//! The [`App`] struct holds all runtime state and is the single entry point
//! for the rest of the binary.  Heavy concerns are delegated to focused
//! submodules:
//!
//! | Module       | Responsibility                               |
//! |--------------|----------------------------------------------|
//! | `commands`   | Slash-command dispatch & handlers            |
//! | `input`      | Text-input editing (cursor, insert, etc.)    |
//! | `lang`       | EN / Traditional-Chinese label catalog       |
//! | `logging`    | `LogLevel`, `LogLine` activity records       |
//! | `ui`         | TUI rendering & status-bar helpers           |

mod commands;
mod input;
mod lang;
mod logging;
mod ui;

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::agents::{AgentConfig, ConfigSource, ProfileOverride};
use crate::constants::MAX_LOGS;
use crate::gateway::Gateway;
use crate::request::{Attachment, GenerationRequest};
use crate::styles::Jackpot;

use self::lang::Language;
use self::logging::{LogLevel, LogLine};

// ── Tabs ─────────────────────────────────────────────────────────────

/// The four surfaces of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Summary,
    Guidance,
    Notes,
    Config,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Summary, Tab::Guidance, Tab::Notes, Tab::Config];

    pub(crate) fn index(self) -> usize {
        match self {
            Tab::Summary => 0,
            Tab::Guidance => 1,
            Tab::Notes => 2,
            Tab::Config => 3,
        }
    }

    pub(crate) fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    /// Localized tab title.
    pub(crate) fn title(self, lang: Language) -> &'static str {
        let t = lang.text();
        match self {
            Tab::Summary => t.tab_summary,
            Tab::Guidance => t.tab_guidance,
            Tab::Notes => t.tab_notes,
            Tab::Config => t.tab_config,
        }
    }
}

// ── Application state ────────────────────────────────────────────────

/// Pasted text plus the attachment slot for one document flow.
#[derive(Default)]
pub(crate) struct DocumentInput {
    pub(crate) pasted: String,
    pub(crate) attachment: Option<Attachment>,
}

/// Completion of a background generation task.
pub(crate) struct GenerationEvent {
    tab: Tab,
    text: String,
}

/// Top-level application state.
///
/// Fields use `pub(crate)` visibility so that the sibling submodules
/// (`commands`, `ui`, …) can access them directly while keeping them
/// hidden from the rest of the crate.
pub struct App {
    pub(crate) runtime: Runtime,
    pub(crate) input: String,
    pub(crate) cursor: usize,
    pub(crate) logs: Vec<LogLine>,
    pub(crate) lang: Language,
    pub(crate) tab: Tab,
    pub(crate) agents: AgentConfig,
    pub(crate) agents_source: ConfigSource,
    pub(crate) overrides: ProfileOverride,
    pub(crate) summary: DocumentInput,
    pub(crate) guidance: DocumentInput,
    pub(crate) notes: String,
    pub(crate) outputs: [String; 4],
    pub(crate) style_index: usize,
    pub(crate) jackpot: Jackpot,
    pub(crate) gateway: Gateway,
    gen_tx: mpsc::UnboundedSender<GenerationEvent>,
    gen_rx: mpsc::UnboundedReceiver<GenerationEvent>,
    pub(crate) pending: Option<Tab>,
    pub(crate) scroll_offset: u16,
    pub(crate) should_quit: bool,
}

// ── Lifecycle ────────────────────────────────────────────────────────

impl App {
    /// Create and initialise a new application instance.
    pub fn new() -> Result<Self> {
        let runtime = Runtime::new().context("create tokio runtime")?;
        let (agents, agents_source) = AgentConfig::load()?;
        let (gen_tx, gen_rx) = mpsc::unbounded_channel();

        let mut app = App {
            runtime,
            input: String::new(),
            cursor: 0,
            logs: Vec::new(),
            lang: Language::En,
            tab: Tab::Summary,
            agents,
            agents_source,
            overrides: ProfileOverride::default(),
            summary: DocumentInput::default(),
            guidance: DocumentInput::default(),
            notes: String::new(),
            outputs: Default::default(),
            style_index: 0,
            jackpot: Jackpot::new(),
            gateway: Gateway::new(),
            gen_tx,
            gen_rx,
            pending: None,
            scroll_offset: 0,
            should_quit: false,
        };

        app.log(
            LogLevel::Info,
            format!("Loaded agent profiles from {}.", app.agents_source.label()),
        );
        app.log(
            LogLevel::Info,
            "Type /help for commands. Tab switches views; typed lines feed the active tab."
                .to_string(),
        );
        Ok(app)
    }

    /// Whether the user has requested to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance background work: the jackpot animation and any finished
    /// generation tasks. Called once per loop iteration.
    pub fn tick(&mut self) {
        if let Some(style) = self.jackpot.tick(Instant::now()) {
            self.style_index = self.jackpot.display_index();
            self.log(
                LogLevel::Info,
                format!("🎰 Landed on {} — {}.", style.name, style.description),
            );
        }

        while let Ok(event) = self.gen_rx.try_recv() {
            self.outputs[event.tab.index()] = event.text;
            self.pending = None;
            self.log(
                LogLevel::Info,
                format!("{} updated.", event.tab.title(self.lang)),
            );
        }
    }
}

// ── Event handling ───────────────────────────────────────────────────

impl App {
    /// Route a terminal event to the appropriate handler.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            self.handle_key(key)?;
        }
        Ok(())
    }

    /// Dispatch a key press to input editing, commands, or control actions.
    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.should_quit = true,

            KeyEvent {
                code: KeyCode::Char('l'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.logs.clear(),

            KeyEvent { code, .. } => match code {
                KeyCode::Char(ch) => {
                    self.scroll_offset = 0; // snap to bottom on new input
                    self.insert_char(ch);
                }
                KeyCode::Backspace => self.backspace(),
                KeyCode::Delete => self.delete(),
                KeyCode::Left => self.move_cursor_left(),
                KeyCode::Right => self.move_cursor_right(),
                KeyCode::Home => self.move_cursor_home(),
                KeyCode::End => self.move_cursor_end(),
                KeyCode::Up => self.scroll_up(1),
                KeyCode::Down => self.scroll_down(1),
                KeyCode::PageUp => self.scroll_up(10),
                KeyCode::PageDown => self.scroll_down(10),
                KeyCode::Tab => self.tab = self.tab.next(),
                KeyCode::Enter => {
                    self.scroll_offset = 0; // snap to bottom on submit
                    self.submit_input()?;
                }
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
        }
        Ok(())
    }

    /// Submit the current input line for processing.
    fn submit_input(&mut self) -> Result<()> {
        let line = self.input.trim().to_string();
        self.input.clear();
        self.cursor = 0;

        if line.is_empty() {
            return Ok(());
        }

        if line.starts_with('/') {
            self.handle_command(&line)?;
        } else {
            self.capture_line(&line);
        }

        Ok(())
    }

    /// A typed plain line feeds the active tab's text buffer.
    fn capture_line(&mut self, line: &str) {
        match self.tab {
            Tab::Summary => {
                push_line(&mut self.summary.pasted, line);
                let total = self.summary.pasted.len();
                self.log(
                    LogLevel::Info,
                    format!("Captured into the summary document buffer ({total} chars)."),
                );
            }
            Tab::Guidance => {
                push_line(&mut self.guidance.pasted, line);
                let total = self.guidance.pasted.len();
                self.log(
                    LogLevel::Info,
                    format!("Captured into the guidance document buffer ({total} chars)."),
                );
            }
            Tab::Notes => {
                push_line(&mut self.notes, line);
                let total = self.notes.len();
                self.log(LogLevel::Info, format!("Noted ({total} chars)."));
            }
            Tab::Config => {
                self.log(
                    LogLevel::Warn,
                    "The config tab takes no free text — use /config load <path>.".to_string(),
                );
            }
        }
    }
}

fn push_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(line);
}

// ── Generation ───────────────────────────────────────────────────────

impl App {
    /// Launch a non-blocking generation for `tab`.
    ///
    /// At most one generation runs at a time: while one is pending the
    /// triggering commands are refused here, at the UI boundary, so the
    /// gateway never sees overlapping calls. The request is assembled
    /// up front; the network round trip runs on a background tokio task
    /// and reports back through the event channel.
    pub(crate) fn start_generation(&mut self, tab: Tab, request: GenerationRequest) {
        if self.pending.is_some() {
            self.log(
                LogLevel::Warn,
                "An agent is already working — wait for it to finish.".to_string(),
            );
            return;
        }

        let assembled = match request.assemble() {
            Ok(assembled) => assembled,
            Err(err) => {
                self.log(LogLevel::Error, format!("Error: {err}"));
                return;
            }
        };

        self.pending = Some(tab);
        self.log(LogLevel::Info, self.lang.text().generating.to_string());

        let tx = self.gen_tx.clone();
        let gateway = self.gateway.clone();
        self.runtime.spawn(async move {
            let text = match gateway.execute(&assembled).await {
                Ok(text) => text,
                Err(err) => format!("Error: {err}"),
            };
            let _ = tx.send(GenerationEvent { tab, text });
        });
    }
}

// ── Scrolling ────────────────────────────────────────────────────────

impl App {
    /// Scroll the activity log up by `n` lines.
    pub(crate) fn scroll_up(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(n);
    }

    /// Scroll the activity log down by `n` lines (towards the latest).
    pub(crate) fn scroll_down(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }
}

// ── Logging ──────────────────────────────────────────────────────────

impl App {
    /// Append a message to the activity log.
    pub(crate) fn log(&mut self, level: LogLevel, message: String) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.logs.push(LogLine {
            timestamp,
            level,
            message,
        });
        if self.logs.len() > MAX_LOGS {
            let overflow = self.logs.len() - MAX_LOGS;
            self.logs.drain(0..overflow);
        }
    }
}
