//! Model gateway — executes exactly one assembled request against the
//! configured provider and normalizes the outcome to text or a typed error.
//!
//! Order of operations per call: resolve the credential from the process
//! environment, convert the attachment to its base64 part, then make the
//! single HTTP call. Each earlier step failing prevents the later ones, so
//! a missing key or unreadable file never touches the network. Nothing is
//! retried; one user action is at most one outbound call.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

use crate::agents::ModelProvider;
use crate::constants::{DEFAULT_GEMINI_BASE_URL, DEFAULT_OPENAI_BASE_URL, RESPONSE_PLACEHOLDER};
use crate::error::GenerateError;
use crate::request::{AssembledRequest, Attachment};
use crate::util::env_first;

/// How a credential is resolved per provider, consulted at call time.
pub type KeyLookup = fn(ModelProvider) -> Option<String>;

/// Default lookup: the process environment, read on every call.
pub fn env_credential(provider: ModelProvider) -> Option<String> {
    match provider {
        ModelProvider::Google => env_first(&["GEMINI_API_KEY", "GOOGLE_API_KEY"]),
        ModelProvider::OpenAi => env_first(&["OPENAI_API_KEY"]),
    }
}

/// Primary env var named in the missing-credential error.
fn credential_hint(provider: ModelProvider) -> &'static str {
    match provider {
        ModelProvider::Google => "GEMINI_API_KEY",
        ModelProvider::OpenAi => "OPENAI_API_KEY",
    }
}

// ── Transport ────────────────────────────────────────────────────────

/// The outbound HTTP seam, swappable in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body and return the parsed response body. Any
    /// provider-side failure (non-2xx status, network error) comes back as
    /// [`GenerateError::Provider`] with the provider's message intact.
    async fn post_json(
        &self,
        provider: &'static str,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<Value, GenerateError>;
}

/// The real transport, backed by a shared reqwest client.
#[derive(Clone)]
pub struct HttpTransport {
    client: HttpClient,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: HttpClient::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        provider: &'static str,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<Value, GenerateError> {
        let mut builder = self.client.post(url);
        for (name, value) in headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.json(body).send().await.map_err(|err| {
            GenerateError::Provider {
                provider,
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| GenerateError::Provider {
            provider,
            message: err.to_string(),
        })?;

        if !status.is_success() {
            // The response body travels verbatim so the user sees exactly
            // what the provider said.
            return Err(GenerateError::Provider {
                provider,
                message: format!("{status}: {text}"),
            });
        }

        Ok(serde_json::from_str(&text).unwrap_or_else(|_| json!({ "raw": text })))
    }
}

// ── Gateway ──────────────────────────────────────────────────────────

/// One-shot request executor over a [`Transport`].
#[derive(Clone)]
pub struct Gateway<T: Transport = HttpTransport> {
    transport: T,
    key_lookup: KeyLookup,
    gemini_base_url: String,
    openai_base_url: String,
}

impl Gateway<HttpTransport> {
    pub fn new() -> Self {
        Self::with_parts(HttpTransport::new(), env_credential)
    }
}

impl Default for Gateway<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Gateway<T> {
    pub fn with_parts(transport: T, key_lookup: KeyLookup) -> Self {
        let gemini_base_url = env_first(&["GEMINI_BASE_URL"])
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());
        let openai_base_url = env_first(&["OPENAI_BASE_URL", "OPENAI_API_BASE"])
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
        Self {
            transport,
            key_lookup,
            gemini_base_url: gemini_base_url.trim_end_matches('/').to_string(),
            openai_base_url: openai_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Execute exactly one request and return the response text.
    pub async fn execute(&self, request: &AssembledRequest) -> Result<String, GenerateError> {
        let key = (self.key_lookup)(request.provider)
            .ok_or_else(|| GenerateError::Configuration(credential_hint(request.provider).to_string()))?;

        let attachment = match &request.attachment {
            Some(attachment) => Some(encode_attachment(attachment).await?),
            None => None,
        };

        match request.provider {
            ModelProvider::Google => self.call_gemini(&key, request, attachment).await,
            ModelProvider::OpenAi => self.call_openai(&key, request, attachment).await,
        }
    }

    async fn call_gemini(
        &self,
        key: &str,
        request: &AssembledRequest,
        attachment: Option<EncodedAttachment>,
    ) -> Result<String, GenerateError> {
        let mut parts = vec![json!({ "text": request.text })];
        if let Some(attachment) = attachment {
            parts.push(json!({
                "inline_data": {
                    "mime_type": attachment.media_type,
                    "data": attachment.data,
                }
            }));
        }

        let body = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "temperature": request.temperature },
        });
        let url = format!(
            "{}/models/{}:generateContent",
            self.gemini_base_url, request.model_name
        );
        let headers = [("x-goog-api-key", key.to_string())];

        let response = self
            .transport
            .post_json("gemini", &url, &headers, &body)
            .await?;
        Ok(normalize(extract_gemini_text(&response)))
    }

    async fn call_openai(
        &self,
        key: &str,
        request: &AssembledRequest,
        attachment: Option<EncodedAttachment>,
    ) -> Result<String, GenerateError> {
        let mut content = vec![json!({ "type": "text", "text": request.text })];
        if let Some(attachment) = attachment {
            content.push(json!({
                "type": "file",
                "file": {
                    "filename": attachment.file_name,
                    "file_data": format!(
                        "data:{};base64,{}",
                        attachment.media_type, attachment.data
                    ),
                }
            }));
        }

        let body = json!({
            "model": request.model_name,
            "messages": [{ "role": "user", "content": content }],
            "temperature": request.temperature,
        });
        let url = format!("{}/chat/completions", self.openai_base_url);
        let headers = [("Authorization", format!("Bearer {key}"))];

        let response = self
            .transport
            .post_json("openai", &url, &headers, &body)
            .await?;
        Ok(normalize(extract_openai_text(&response)))
    }
}

// ── Attachment encoding ──────────────────────────────────────────────

struct EncodedAttachment {
    media_type: &'static str,
    file_name: String,
    data: String,
}

/// Read the attachment bytes and base64-encode them. Runs before any
/// network traffic; an unreadable file fails the whole call as I/O.
async fn encode_attachment(attachment: &Attachment) -> Result<EncodedAttachment, GenerateError> {
    let bytes = tokio::fs::read(&attachment.path)
        .await
        .map_err(|err| GenerateError::Io(format!("{}: {err}", attachment.path.display())))?;
    let file_name = attachment
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    Ok(EncodedAttachment {
        media_type: attachment.media_type,
        file_name,
        data: STANDARD.encode(bytes),
    })
}

// ── Response helpers ─────────────────────────────────────────────────

/// Concatenate the text parts of the first Gemini candidate.
fn extract_gemini_text(response: &Value) -> String {
    let parts = response
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array);
    let Some(parts) = parts else {
        return String::new();
    };
    parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect()
}

/// Pull the message content from the first OpenAI choice.
fn extract_openai_text(response: &Value) -> String {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// An empty or absent response text becomes a fixed placeholder rather
/// than an error.
fn normalize(text: String) -> String {
    if text.trim().is_empty() {
        RESPONSE_PLACEHOLDER.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn assembled(provider: ModelProvider) -> AssembledRequest {
        AssembledRequest {
            provider,
            model_name: "gemini-2.5-flash".to_string(),
            temperature: 0.2,
            text: "system prompt\n\nUser Request: do the thing".to_string(),
            attachment: None,
        }
    }

    /// A transport that must never be reached.
    struct PanicTransport;

    #[async_trait]
    impl Transport for PanicTransport {
        async fn post_json(
            &self,
            _provider: &'static str,
            _url: &str,
            _headers: &[(&'static str, String)],
            _body: &Value,
        ) -> Result<Value, GenerateError> {
            panic!("transport must not be called");
        }
    }

    /// A transport that records every call and replies with a canned body.
    struct StubTransport {
        seen: Arc<Mutex<Vec<(String, Value)>>>,
        reply: Value,
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn post_json(
            &self,
            _provider: &'static str,
            url: &str,
            _headers: &[(&'static str, String)],
            body: &Value,
        ) -> Result<Value, GenerateError> {
            self.seen
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));
            Ok(self.reply.clone())
        }
    }

    fn gemini_reply(text: &str) -> Value {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_transport_call() {
        let gateway = Gateway::with_parts(PanicTransport, |_| None);
        let err = gateway
            .execute(&assembled(ModelProvider::Google))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Configuration(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn unreadable_attachment_fails_before_any_transport_call() {
        let gateway = Gateway::with_parts(PanicTransport, |_| Some("test-key".to_string()));
        let mut request = assembled(ModelProvider::Google);
        request.attachment = Some(Attachment {
            path: PathBuf::from("/nonexistent/submission.pdf"),
            media_type: "application/pdf",
        });

        let err = gateway.execute(&request).await.unwrap_err();
        assert!(matches!(err, GenerateError::Io(_)));
    }

    #[tokio::test]
    async fn gemini_body_carries_text_part_model_and_temperature() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let transport = StubTransport {
            seen: seen.clone(),
            reply: gemini_reply("done"),
        };
        let gateway = Gateway::with_parts(transport, |_| Some("test-key".to_string()));

        let text = gateway
            .execute(&assembled(ModelProvider::Google))
            .await
            .unwrap();
        assert_eq!(text, "done");

        let calls = seen.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (url, body) = &calls[0];
        assert!(url.ends_with("/models/gemini-2.5-flash:generateContent"));
        assert_eq!(
            body.pointer("/contents/0/parts/0/text").and_then(Value::as_str),
            Some("system prompt\n\nUser Request: do the thing")
        );
        let temperature = body
            .pointer("/generationConfig/temperature")
            .and_then(Value::as_f64)
            .unwrap();
        assert!((temperature - 0.2).abs() < 1e-6);
        // No attachment part when none was supplied.
        assert!(body.pointer("/contents/0/parts/1").is_none());
    }

    #[tokio::test]
    async fn empty_response_text_becomes_the_placeholder() {
        let transport = StubTransport {
            seen: Arc::new(Mutex::new(Vec::new())),
            reply: json!({ "candidates": [] }),
        };
        let gateway = Gateway::with_parts(transport, |_| Some("test-key".to_string()));

        let text = gateway
            .execute(&assembled(ModelProvider::Google))
            .await
            .unwrap();
        assert_eq!(text, RESPONSE_PLACEHOLDER);
    }

    #[tokio::test]
    async fn openai_body_uses_chat_completions_shape() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let transport = StubTransport {
            seen: seen.clone(),
            reply: json!({ "choices": [{ "message": { "content": "ok" } }] }),
        };
        let gateway = Gateway::with_parts(transport, |_| Some("test-key".to_string()));

        let mut request = assembled(ModelProvider::OpenAi);
        request.model_name = "gpt-4o-mini".to_string();
        let text = gateway.execute(&request).await.unwrap();
        assert_eq!(text, "ok");

        let calls = seen.lock().unwrap();
        let (url, body) = &calls[0];
        assert!(url.ends_with("/chat/completions"));
        assert_eq!(
            body.get("model").and_then(Value::as_str),
            Some("gpt-4o-mini")
        );
        assert_eq!(
            body.pointer("/messages/0/content/0/type").and_then(Value::as_str),
            Some("text")
        );
    }

    /// A transport that fails like a provider would.
    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn post_json(
            &self,
            provider: &'static str,
            _url: &str,
            _headers: &[(&'static str, String)],
            _body: &Value,
        ) -> Result<Value, GenerateError> {
            Err(GenerateError::Provider {
                provider,
                message: "429 Too Many Requests: quota exhausted for model".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn provider_message_is_passed_through_verbatim() {
        let gateway = Gateway::with_parts(FailingTransport, |_| Some("test-key".to_string()));
        let err = gateway
            .execute(&assembled(ModelProvider::Google))
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .contains("429 Too Many Requests: quota exhausted for model")
        );
    }
}
