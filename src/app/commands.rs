//! Slash-command dispatch and handler implementations.
//!
//! Every `/command` typed by the user is routed through [`App::handle_command`]
//! and dispatched to the appropriate handler method in this module.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use crate::agents::{AgentConfig, AgentRole, ConfigSource};
use crate::constants::{ATTACHMENT_EXTENSIONS, GUIDANCE_INSTRUCTION, SUMMARY_INSTRUCTION};
use crate::magics::{self, MAGICS};
use crate::request::{Attachment, GenerationRequest, TextPayload};
use crate::util::media_type_for;

use super::lang::Language;
use super::logging::LogLevel;
use super::{App, Tab};

// ── Command dispatch ─────────────────────────────────────────────────

impl App {
    /// Route a slash-command to the matching handler.
    pub(crate) fn handle_command(&mut self, line: &str) -> Result<()> {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "/help" => self.show_help(),
            "/quit" | "/exit" => self.should_quit = true,
            "/clear" => self.logs.clear(),
            "/tab" => self.handle_tab_command(parts.collect()),
            "/lang" => self.handle_lang_command(parts.collect()),
            "/attach" => {
                let path = parts.collect::<Vec<_>>().join(" ");
                self.attach(&path);
            }
            "/detach" => self.detach(),
            "/generate" => self.run_document_flow(Tab::Summary),
            "/synthesize" => self.run_document_flow(Tab::Guidance),
            "/magic" => self.handle_magic_command(parts.collect()),
            "/notes" => self.handle_notes_command(parts.collect()),
            "/spin" => self.spin_style(),
            "/style" => self.show_style(),
            "/agents" => self.list_agents(),
            "/override" => self.handle_override_command(parts.collect()),
            "/config" => self.handle_config_command(parts.collect()),
            _ => self.log(LogLevel::Warn, format!("Unknown command: {cmd}")),
        }

        Ok(())
    }
}

// ── Help ─────────────────────────────────────────────────────────────

impl App {
    fn show_help(&mut self) {
        let lines = [
            "Commands:",
            "(no slash)             Feed text into the active tab's buffer",
            "/tab <name>            Switch tab (summary|guidance|notes|config)",
            "/attach <path>         Attach a .pdf/.txt/.md document to the active tab",
            "/detach                Remove the active tab's attachment",
            "/generate              Run the 510(k) summary agent",
            "/synthesize            Run the guidance checklist agent",
            "/magic                 List the note-keeper magics",
            "/magic <id>            Apply a magic to your notes",
            "/notes [clear]         Show or clear the notes buffer",
            "/spin                  Spin the style jackpot",
            "/style                 Show the current art style",
            "/agents                List the configured agent profiles",
            "/override ...          Per-request model/prompt/temp override",
            "/config show           View the agent configuration",
            "/config load <path>    Replace the configuration from a JSON file",
            "/config reset          Restore the built-in configuration",
            "/lang [en|tc]          Toggle or set the UI language",
            "/clear                 Clear the activity log",
            "/quit                  Exit",
        ];
        for line in lines {
            self.log(LogLevel::Info, line.to_string());
        }
    }
}

// ── Tabs & language ──────────────────────────────────────────────────

impl App {
    fn handle_tab_command(&mut self, args: Vec<&str>) {
        let target = match args.first().copied() {
            Some("summary") => Tab::Summary,
            Some("guidance") => Tab::Guidance,
            Some("notes") => Tab::Notes,
            Some("config") => Tab::Config,
            _ => {
                self.log(
                    LogLevel::Warn,
                    "Usage: /tab summary|guidance|notes|config".to_string(),
                );
                return;
            }
        };
        self.tab = target;
    }

    fn handle_lang_command(&mut self, args: Vec<&str>) {
        self.lang = match args.first().copied() {
            Some("en") => Language::En,
            Some("tc") => Language::Tc,
            None => match self.lang {
                Language::En => Language::Tc,
                Language::Tc => Language::En,
            },
            Some(other) => {
                self.log(LogLevel::Warn, format!("Unknown language: {other}"));
                return;
            }
        };
        let title = self.lang.text().title;
        self.log(LogLevel::Info, format!("{} [{}]", title, self.lang.label()));
    }
}

// ── Attachments ──────────────────────────────────────────────────────

impl App {
    fn attach(&mut self, path: &str) {
        if path.is_empty() {
            self.log(LogLevel::Warn, "Usage: /attach <path>".to_string());
            return;
        }
        let path = PathBuf::from(path);
        let Some(media_type) = media_type_for(&path) else {
            self.log(
                LogLevel::Warn,
                format!(
                    "Only .{} files are accepted.",
                    ATTACHMENT_EXTENSIONS.join("/.")
                ),
            );
            return;
        };

        let display = path.display().to_string();
        let attachment = Attachment { path, media_type };
        match self.tab {
            Tab::Summary => self.summary.attachment = Some(attachment),
            Tab::Guidance => self.guidance.attachment = Some(attachment),
            _ => {
                self.log(
                    LogLevel::Warn,
                    "Attach on the Summary or Guidance tab.".to_string(),
                );
                return;
            }
        }
        self.log(
            LogLevel::Info,
            format!("Attached {display} ({media_type})."),
        );
    }

    fn detach(&mut self) {
        let slot = match self.tab {
            Tab::Summary => &mut self.summary.attachment,
            Tab::Guidance => &mut self.guidance.attachment,
            _ => {
                self.log(
                    LogLevel::Warn,
                    "Nothing to detach on this tab.".to_string(),
                );
                return;
            }
        };
        match slot.take() {
            Some(attachment) => self.log(
                LogLevel::Info,
                format!("Detached {}.", attachment.path.display()),
            ),
            None => self.log(LogLevel::Warn, "No attachment set.".to_string()),
        }
    }
}

// ── Document flows ───────────────────────────────────────────────────

impl App {
    /// Run the summary or guidance agent over the tab's document input.
    fn run_document_flow(&mut self, tab: Tab) {
        let (role, instruction, input) = match tab {
            Tab::Summary => (AgentRole::Summarizer, SUMMARY_INSTRUCTION, &self.summary),
            Tab::Guidance => (
                AgentRole::GuidanceExpert,
                GUIDANCE_INSTRUCTION,
                &self.guidance,
            ),
            _ => return,
        };

        // Disabled-submit equivalent: refuse up front with nothing to send.
        if input.pasted.trim().is_empty() && input.attachment.is_none() {
            self.log(
                LogLevel::Warn,
                "Nothing to process — /attach a document or type text first.".to_string(),
            );
            return;
        }

        let pasted = input.pasted.clone();
        let attachment = input.attachment.clone();
        let profile = self.agents.get(role).with_override(&self.overrides);

        let mut request = GenerationRequest::new(profile, instruction);
        if !pasted.trim().is_empty() {
            request = request.with_text(TextPayload::Document(pasted));
        }
        if let Some(attachment) = attachment {
            request = request.with_attachment(attachment);
        }

        self.tab = tab;
        self.start_generation(tab, request);
    }
}

// ── Note magics ──────────────────────────────────────────────────────

impl App {
    fn handle_magic_command(&mut self, args: Vec<&str>) {
        let Some(id) = args.first().copied() else {
            self.list_magics();
            return;
        };

        if self.notes.trim().is_empty() {
            self.log(
                LogLevel::Warn,
                "No notes yet — type some lines on the Note Keeper tab first.".to_string(),
            );
            return;
        }

        if magics::find(id).is_none() {
            self.log(
                LogLevel::Info,
                format!("Unknown magic '{id}' — using the default organizer."),
            );
        }
        let modifier = magics::modifier_for(id);
        let profile = self.agents.get(AgentRole::NoteKeeper).with_override(&self.overrides);
        let request = GenerationRequest::new(profile, modifier)
            .with_text(TextPayload::Notes(self.notes.clone()));

        self.tab = Tab::Notes;
        self.start_generation(Tab::Notes, request);
    }

    fn list_magics(&mut self) {
        let magic_label = self.lang.text().magic;
        self.log(LogLevel::Info, format!("{magic_label}:"));
        for magic in MAGICS {
            self.log(
                LogLevel::Info,
                format!("{} /magic {:<15} {}", magic.icon, magic.id, magic.name),
            );
        }
    }

    fn handle_notes_command(&mut self, args: Vec<&str>) {
        match args.first().copied() {
            Some("clear") => {
                self.notes.clear();
                self.log(LogLevel::Info, "Notes cleared.".to_string());
            }
            _ => {
                let lines = self.notes.lines().count();
                let chars = self.notes.len();
                self.log(
                    LogLevel::Info,
                    format!("Notes buffer: {lines} line(s), {chars} chars."),
                );
            }
        }
    }
}

// ── Style jackpot ────────────────────────────────────────────────────

impl App {
    fn spin_style(&mut self) {
        if self.jackpot.is_spinning() {
            self.log(LogLevel::Warn, "The reel is already spinning.".to_string());
            return;
        }
        self.jackpot.spin(Instant::now());
        let label = self.lang.text().jackpot;
        self.log(LogLevel::Info, format!("🎰 {label}..."));
    }

    fn show_style(&mut self) {
        let style = self.current_style();
        self.log(
            LogLevel::Info,
            format!(
                "Style: {} — {} ({} / {})",
                style.name, style.description, style.palette.primary, style.palette.font_family
            ),
        );
    }
}

// ── Agent profiles ───────────────────────────────────────────────────

impl App {
    fn list_agents(&mut self) {
        for role in AgentRole::ALL {
            let profile = self.agents.get(role).clone();
            self.log(
                LogLevel::Info,
                format!(
                    "{}: {} [{} {} @ {:.1}] — {}",
                    role.key(),
                    profile.name,
                    profile.model_provider.label(),
                    profile.model_name,
                    profile.temperature,
                    profile.description
                ),
            );
        }
        if !self.overrides.is_empty() {
            self.log(
                LogLevel::Info,
                "A per-request override is active (/override show).".to_string(),
            );
        }
    }

    fn handle_override_command(&mut self, args: Vec<&str>) {
        match args.first().copied() {
            None | Some("show") => {
                let over = &self.overrides;
                if over.is_empty() {
                    self.log(LogLevel::Info, "No override active.".to_string());
                    return;
                }
                let model = over.model_name.as_deref().unwrap_or("(stored)");
                let temperature = over
                    .temperature
                    .map_or("(stored)".to_string(), |t| format!("{t:.2}"));
                let prompt = if over.system_prompt.is_some() {
                    "(overridden)"
                } else {
                    "(stored)"
                };
                self.log(
                    LogLevel::Info,
                    format!("Override — model: {model}, temp: {temperature}, prompt: {prompt}"),
                );
            }
            Some("model") => match args.get(1) {
                Some(model) => {
                    self.overrides.model_name = Some((*model).to_string());
                    self.log(LogLevel::Info, format!("Next requests use model {model}."));
                }
                None => self.log(LogLevel::Warn, "Usage: /override model <name>".to_string()),
            },
            Some("prompt") => {
                if args.len() > 1 {
                    let prompt = args[1..].join(" ");
                    self.overrides.system_prompt = Some(prompt);
                    self.log(
                        LogLevel::Info,
                        "Next requests use the supplied system prompt.".to_string(),
                    );
                } else {
                    self.log(LogLevel::Warn, "Usage: /override prompt <text>".to_string());
                }
            }
            Some("temp") => match args.get(1).and_then(|raw| raw.parse::<f32>().ok()) {
                Some(temperature) => {
                    self.overrides.temperature = Some(temperature);
                    self.log(
                        LogLevel::Info,
                        format!("Next requests use temperature {temperature:.2}."),
                    );
                }
                None => self.log(LogLevel::Warn, "Usage: /override temp <0.0-1.0>".to_string()),
            },
            Some("clear") => {
                self.overrides = Default::default();
                self.log(LogLevel::Info, "Override cleared.".to_string());
            }
            Some(other) => self.log(
                LogLevel::Warn,
                format!("Unknown override field: {other} (model|prompt|temp|clear)"),
            ),
        }
    }
}

// ── Configuration ────────────────────────────────────────────────────

impl App {
    fn handle_config_command(&mut self, args: Vec<&str>) {
        match args.first().copied() {
            None | Some("show") => {
                self.tab = Tab::Config;
            }
            Some("load") => match args.get(1) {
                Some(path) => self.load_config(path),
                None => self.log(LogLevel::Warn, "Usage: /config load <path>".to_string()),
            },
            Some("reset") => {
                self.agents = AgentConfig::default();
                self.agents_source = ConfigSource::Builtin;
                self.log(
                    LogLevel::Info,
                    "Agent configuration reset to built-in defaults.".to_string(),
                );
            }
            Some(other) => self.log(
                LogLevel::Warn,
                format!("Unknown config action: {other} (show|load|reset)"),
            ),
        }
    }

    /// Replace the whole profile set from a JSON file. A payload that does
    /// not parse leaves the current configuration in place.
    fn load_config(&mut self, path: &str) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                self.log(LogLevel::Error, format!("Could not read {path}: {err}"));
                return;
            }
        };

        match self.agents.replace_from_json(&text) {
            Ok(()) => {
                self.agents_source = ConfigSource::File(PathBuf::from(path));
                self.log(
                    LogLevel::Info,
                    format!("Agent configuration replaced from {path}."),
                );
            }
            Err(err) => self.log(
                LogLevel::Error,
                format!("Config parse error: {err} — previous configuration retained."),
            ),
        }
    }
}
