//! Request assembly — one profile + user input → one outbound model call.
//!
//! The assembler folds the effective profile's system prompt, the task
//! instruction, and the text payload into a single text part, and carries
//! an optional file attachment as a separate typed part. It never talks to
//! the network; converting the attachment to bytes is the gateway's job.

use std::path::PathBuf;

use crate::agents::{AgentProfile, ModelProvider};
use crate::constants::{NOTES_LABEL, PASTED_BEGIN, PASTED_END, USER_REQUEST_LABEL};
use crate::error::GenerateError;

/// A document file selected for upload, identified by path and declared
/// media type. Bytes are read only when the request executes.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub path: PathBuf,
    pub media_type: &'static str,
}

/// The text payload accompanying the instruction.
#[derive(Clone, Debug)]
pub enum TextPayload {
    /// Pasted document body, fenced between explicit BEGIN/END markers so
    /// the model can tell instruction from payload.
    Document(String),
    /// Free-form notes, introduced by a `Notes:` label (the magic flow).
    Notes(String),
}

impl TextPayload {
    fn is_empty(&self) -> bool {
        match self {
            TextPayload::Document(body) => body.trim().is_empty(),
            TextPayload::Notes(notes) => notes.trim().is_empty(),
        }
    }
}

/// One model call in the making. Ephemeral; nothing here is persisted.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub profile: AgentProfile,
    pub instruction: String,
    pub text: Option<TextPayload>,
    pub attachment: Option<Attachment>,
}

impl GenerationRequest {
    pub fn new(profile: AgentProfile, instruction: impl Into<String>) -> Self {
        Self {
            profile,
            instruction: instruction.into(),
            text: None,
            attachment: None,
        }
    }

    pub fn with_text(mut self, payload: TextPayload) -> Self {
        self.text = Some(payload);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Produce the single outbound request.
    ///
    /// Fails with a validation error when there is nothing to process —
    /// no usable text payload and no attachment. The UI blocks submission
    /// in that state as well; this is the backstop.
    pub fn assemble(self) -> Result<AssembledRequest, GenerateError> {
        let text_empty = self.text.as_ref().is_none_or(TextPayload::is_empty);
        if text_empty && self.attachment.is_none() {
            return Err(GenerateError::Validation(
                "supply a document, pasted text, or notes first".to_string(),
            ));
        }

        let mut text = format!(
            "{}{USER_REQUEST_LABEL}{}",
            self.profile.system_prompt, self.instruction
        );
        match &self.text {
            Some(TextPayload::Document(body)) if !text_empty => {
                text.push_str(&format!("\n\n{PASTED_BEGIN}\n{body}\n{PASTED_END}"));
            }
            Some(TextPayload::Notes(notes)) if !text_empty => {
                text.push_str(&format!("\n\n{NOTES_LABEL}\n{notes}"));
            }
            _ => {}
        }

        Ok(AssembledRequest {
            provider: self.profile.model_provider,
            model_name: self.profile.model_name,
            temperature: self.profile.temperature,
            text,
            attachment: self.attachment,
        })
    }
}

/// The finished request handed to the gateway: exactly one text part and
/// zero or one binary part.
#[derive(Clone, Debug)]
pub struct AssembledRequest {
    pub provider: ModelProvider,
    pub model_name: String,
    pub temperature: f32,
    pub text: String,
    pub attachment: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentConfig, AgentRole, ProfileOverride};

    fn profile() -> AgentProfile {
        AgentConfig::default().get(AgentRole::Summarizer).clone()
    }

    #[test]
    fn pasted_text_lands_between_the_markers() {
        let assembled = GenerationRequest::new(profile(), "Summarize this.")
            .with_text(TextPayload::Document("device history".to_string()))
            .assemble()
            .unwrap();

        assert!(assembled.text.starts_with(&profile().system_prompt));
        assert!(assembled.text.contains("User Request: Summarize this."));
        let begin = assembled.text.find(PASTED_BEGIN).unwrap();
        let end = assembled.text.find(PASTED_END).unwrap();
        let body = &assembled.text[begin + PASTED_BEGIN.len()..end];
        assert_eq!(body.trim(), "device history");
        assert!(assembled.attachment.is_none());
    }

    #[test]
    fn markers_are_omitted_without_pasted_text() {
        let attachment = Attachment {
            path: PathBuf::from("submission.pdf"),
            media_type: "application/pdf",
        };
        let assembled = GenerationRequest::new(profile(), "Summarize this.")
            .with_attachment(attachment)
            .assemble()
            .unwrap();

        assert!(!assembled.text.contains(PASTED_BEGIN));
        assert!(!assembled.text.contains(PASTED_END));
        assert!(assembled.attachment.is_some());
    }

    #[test]
    fn empty_request_is_rejected() {
        let err = GenerationRequest::new(profile(), "Summarize this.")
            .assemble()
            .unwrap_err();
        assert!(matches!(err, GenerateError::Validation(_)));

        // Whitespace-only pasted text counts as nothing to process.
        let err = GenerationRequest::new(profile(), "Summarize this.")
            .with_text(TextPayload::Document("   \n".to_string()))
            .assemble()
            .unwrap_err();
        assert!(matches!(err, GenerateError::Validation(_)));
    }

    #[test]
    fn effective_profile_parameters_flow_through() {
        let over = ProfileOverride {
            model_name: Some("gemini-2.5-pro".to_string()),
            system_prompt: None,
            temperature: Some(0.7),
        };
        let assembled = GenerationRequest::new(
            profile().with_override(&over),
            "Summarize this.",
        )
        .with_text(TextPayload::Document("x".to_string()))
        .assemble()
        .unwrap();

        assert_eq!(assembled.model_name, "gemini-2.5-pro");
        assert!((assembled.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(assembled.provider, ModelProvider::Google);
    }

    /// The note-keeper end-to-end concatenation: system prompt, separator,
    /// modifier, separator, "Notes:", separator, note text — no attachment.
    #[test]
    fn note_flow_matches_the_fixed_concatenation() {
        let config = AgentConfig::default();
        let keeper = config.get(AgentRole::NoteKeeper).clone();
        let modifier = crate::magics::modifier_for("pattern");
        let notes = "Device X failed twice in March.";

        let assembled = GenerationRequest::new(keeper, modifier)
            .with_text(TextPayload::Notes(notes.to_string()))
            .assemble()
            .unwrap();

        let expected = "You are a helpful assistant organizing regulatory notes.\n\nUser Request: Analyze text for recurring themes or systemic issues. Append a \"Patterns Detected\" section.\n\nNotes:\nDevice X failed twice in March.";
        assert_eq!(assembled.text, expected);
        assert!(assembled.attachment.is_none());
    }
}
