//! Compile-time constants and tunables shared across the crate.

/// Application name used for the config directory and window titles.
pub const APP_NAME: &str = "regent";
/// Application version injected from `Cargo.toml` at compile time.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Gemini API base URL (override with `GEMINI_BASE_URL`).
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default OpenAI API base URL (override with `OPENAI_BASE_URL`).
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Separator between an agent's system prompt and the user's task.
pub const USER_REQUEST_LABEL: &str = "\n\nUser Request: ";
/// Marker opening a pasted document body inside the text part.
pub const PASTED_BEGIN: &str = "--- BEGIN DOCUMENT ---";
/// Marker closing a pasted document body inside the text part.
pub const PASTED_END: &str = "--- END DOCUMENT ---";
/// Label introducing free-form notes in the magic-transform flow.
pub const NOTES_LABEL: &str = "Notes:";

/// Shown when the provider returns an empty or absent response text.
pub const RESPONSE_PLACEHOLDER: &str = "No response generated.";
/// Modifier used when a magic directive id does not resolve.
pub const DEFAULT_MAGIC_MODIFIER: &str = "Organize notes.";

/// Fixed task instruction for the 510(k) summary flow.
pub const SUMMARY_INSTRUCTION: &str = "Generate the 510(k) summary tables and narrative.";
/// Fixed task instruction for the guidance synthesis flow.
pub const GUIDANCE_INSTRUCTION: &str = "Analyze guidance and create checklists.";

/// Attachment extensions accepted by `/attach` (no content sniffing).
pub const ATTACHMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];

/// Maximum number of log entries kept in the activity panel.
pub const MAX_LOGS: usize = 1000;

// ── Style randomizer tunables ────────────────────────────────────────

/// Initial interval between jackpot animation steps.
pub const SPIN_START_INTERVAL_MS: u64 = 50;
/// Minimum number of animation steps per spin.
pub const SPIN_MIN_STEPS: u32 = 30;
/// Number of extra random steps added on top of the minimum (exclusive).
pub const SPIN_EXTRA_STEPS: u32 = 10;
