//! Agent profiles — the three fixed regulatory roles and their store.
//!
//! Each profile carries the provider, model, temperature, and system prompt
//! used for one generation flow. The set always holds exactly the three
//! named roles; the config surface replaces the whole set atomically and a
//! malformed payload leaves the previous set untouched. Callers may layer a
//! [`ProfileOverride`] on top of a stored profile for a single request
//! without mutating the store.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::constants::APP_NAME;

/// The three fixed roles every configuration must define.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentRole {
    Summarizer,
    GuidanceExpert,
    NoteKeeper,
}

impl AgentRole {
    pub const ALL: [AgentRole; 3] = [
        AgentRole::Summarizer,
        AgentRole::GuidanceExpert,
        AgentRole::NoteKeeper,
    ];

    /// The JSON key this role is stored under.
    pub fn key(&self) -> &'static str {
        match self {
            AgentRole::Summarizer => "fda_summarizer",
            AgentRole::GuidanceExpert => "fda_guidance_expert",
            AgentRole::NoteKeeper => "note_keeper",
        }
    }
}

/// Which generative-model backend a profile targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    Google,
    OpenAi,
}

impl ModelProvider {
    pub fn label(&self) -> &'static str {
        match self {
            ModelProvider::Google => "google",
            ModelProvider::OpenAi => "openai",
        }
    }
}

/// A named agent persona plus the model parameters it runs with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub description: String,
    pub model_provider: ModelProvider,
    pub model_name: String,
    pub temperature: f32,
    pub system_prompt: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl AgentProfile {
    /// Clone this profile with any override fields applied. The stored
    /// profile is never touched.
    pub fn with_override(&self, over: &ProfileOverride) -> AgentProfile {
        let mut effective = self.clone();
        if let Some(model) = &over.model_name {
            effective.model_name = model.clone();
        }
        if let Some(prompt) = &over.system_prompt {
            effective.system_prompt = prompt.clone();
        }
        if let Some(temperature) = over.temperature {
            effective.temperature = temperature;
        }
        effective
    }
}

/// Per-request profile adjustments; `None` fields fall through to the
/// stored profile.
#[derive(Clone, Debug, Default)]
pub struct ProfileOverride {
    pub model_name: Option<String>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
}

impl ProfileOverride {
    pub fn is_empty(&self) -> bool {
        self.model_name.is_none() && self.system_prompt.is_none() && self.temperature.is_none()
    }
}

/// Where the agent configuration was loaded from.
#[derive(Clone, Debug)]
pub enum ConfigSource {
    Builtin,
    File(PathBuf),
}

impl ConfigSource {
    pub fn label(&self) -> String {
        match self {
            ConfigSource::Builtin => "built-in defaults".to_string(),
            ConfigSource::File(path) => path.display().to_string(),
        }
    }
}

/// The full three-role profile set.
///
/// The roles are struct fields rather than a map, so "exactly these three
/// roles" holds by construction and a partial payload fails to parse.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgentConfig {
    pub fda_summarizer: AgentProfile,
    pub fda_guidance_expert: AgentProfile,
    pub note_keeper: AgentProfile,
}

impl AgentConfig {
    /// Look up the profile for a role.
    pub fn get(&self, role: AgentRole) -> &AgentProfile {
        match role {
            AgentRole::Summarizer => &self.fda_summarizer,
            AgentRole::GuidanceExpert => &self.fda_guidance_expert,
            AgentRole::NoteKeeper => &self.note_keeper,
        }
    }

    /// Replace the entire set from serialized JSON.
    ///
    /// The payload is parsed into a complete new set first; only then is
    /// the store swapped. On a parse error the previous set stays in place
    /// and the error is returned for display.
    pub fn replace_from_json(&mut self, text: &str) -> std::result::Result<(), serde_json::Error> {
        let parsed: AgentConfig = serde_json::from_str(text)?;
        *self = parsed;
        Ok(())
    }

    /// Render the current set as pretty JSON for the config tab.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "<unrenderable>".to_string())
    }

    /// Load the configuration: `REGENT_AGENTS_JSON` path, then
    /// `./agents.json`, then the user config dir, then built-in defaults.
    pub fn load() -> Result<(Self, ConfigSource)> {
        if let Ok(path) = env::var("REGENT_AGENTS_JSON") {
            let path = PathBuf::from(path);
            return Ok((Self::load_from_path(&path)?, ConfigSource::File(path)));
        }

        let cwd_path = PathBuf::from("agents.json");
        if cwd_path.exists() {
            return Ok((Self::load_from_path(&cwd_path)?, ConfigSource::File(cwd_path)));
        }

        if let Some(config_path) = config_dir_file("agents.json") {
            if config_path.exists() {
                return Ok((
                    Self::load_from_path(&config_path)?,
                    ConfigSource::File(config_path),
                ));
            }
        }

        Ok((AgentConfig::default(), ConfigSource::Builtin))
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read agent config from {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("parse agent config from {}", path.display()))?;
        Ok(config)
    }
}

/// Resolve a file inside the per-user config directory, if one exists.
fn config_dir_file(name: &str) -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME)?;
    Some(dirs.config_dir().join(name))
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            fda_summarizer: AgentProfile {
                name: "FDA Summary Expert".to_string(),
                description: "Specialist in generating 510(k) summaries.".to_string(),
                model_provider: ModelProvider::Google,
                model_name: "gemini-2.5-flash".to_string(),
                temperature: 0.2,
                system_prompt: "You are an expert Regulatory Affairs Specialist for the FDA.\n\
                    Your task is to generate a comprehensive 510(k) summary compliant with 21 CFR 807.92.\n\
                    You must extract facts accurately from the provided document.\n\
                    You must output exactly 5 tables as requested:\n\
                    1. Submitter Information\n\
                    2. Device Information\n\
                    3. Predicate Device(s)\n\
                    4. Device Description & Technological Characteristics\n\
                    5. Performance Data Summary\n\
                    Then provide a narrative conclusion on Substantial Equivalence."
                    .to_string(),
                skills: vec![
                    "pdf_extraction".to_string(),
                    "table_formatting".to_string(),
                    "regulatory_citation".to_string(),
                ],
            },
            fda_guidance_expert: AgentProfile {
                name: "Guidance Synthesizer".to_string(),
                description: "Converts guidance docs into checklists.".to_string(),
                model_provider: ModelProvider::Google,
                model_name: "gemini-3-flash-preview".to_string(),
                temperature: 0.3,
                system_prompt: "You are a Senior FDA Reviewer.\n\
                    Analyze the provided guidance document.\n\
                    Create actionable checklists for a new reviewer:\n\
                    1. Administrative Checklist\n\
                    2. Scientific/Technical Review Checklist\n\
                    3. Labeling Checklist"
                    .to_string(),
                skills: vec![
                    "checklist_generation".to_string(),
                    "risk_analysis".to_string(),
                ],
            },
            note_keeper: AgentProfile {
                name: "Regulatory Scribe".to_string(),
                description: "Organizes notes and applies AI Magics.".to_string(),
                model_provider: ModelProvider::Google,
                model_name: "gemini-2.5-flash".to_string(),
                temperature: 0.5,
                system_prompt: "You are a helpful assistant organizing regulatory notes."
                    .to_string(),
                skills: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_profiles_are_well_formed() {
        let config = AgentConfig::default();
        for role in AgentRole::ALL {
            let profile = config.get(role);
            assert!(!profile.model_name.is_empty(), "{} model", role.key());
            assert!(!profile.system_prompt.is_empty(), "{} prompt", role.key());
            assert!(
                (0.0..=1.0).contains(&profile.temperature),
                "{} temperature",
                role.key()
            );
        }
        assert_eq!(
            config.get(AgentRole::NoteKeeper).system_prompt,
            "You are a helpful assistant organizing regulatory notes."
        );
    }

    #[test]
    fn replace_with_malformed_json_keeps_previous_values() {
        let mut config = AgentConfig::default();
        let before = config.to_pretty_json();

        let err = config.replace_from_json("{ not json").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(config.to_pretty_json(), before);

        // A structurally incomplete payload (missing roles) must also fail.
        let err = config
            .replace_from_json(r#"{"note_keeper": null}"#)
            .unwrap_err();
        assert!(err.is_data());
        assert_eq!(config.to_pretty_json(), before);
    }

    #[test]
    fn replace_with_valid_json_swaps_the_whole_set() {
        let mut config = AgentConfig::default();
        let mut edited = config.clone();
        edited.note_keeper.model_name = "gemini-2.5-pro".to_string();
        edited.note_keeper.temperature = 0.9;

        config
            .replace_from_json(&edited.to_pretty_json())
            .expect("round-tripped config should parse");
        assert_eq!(config.get(AgentRole::NoteKeeper).model_name, "gemini-2.5-pro");
    }

    #[test]
    fn override_never_mutates_the_stored_profile() {
        let config = AgentConfig::default();
        let over = ProfileOverride {
            model_name: Some("gemini-2.5-pro".to_string()),
            system_prompt: None,
            temperature: Some(0.0),
        };

        let effective = config.get(AgentRole::Summarizer).with_override(&over);
        assert_eq!(effective.model_name, "gemini-2.5-pro");
        assert_eq!(effective.temperature, 0.0);

        let stored = config.get(AgentRole::Summarizer);
        assert_eq!(stored.model_name, "gemini-2.5-flash");
        assert!((stored.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn provider_tags_serialize_lowercase() {
        let json = serde_json::to_string(&ModelProvider::Google).unwrap();
        assert_eq!(json, "\"google\"");
        let back: ModelProvider = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(back, ModelProvider::OpenAi);
    }
}
