//! Google Gemini language model driver.
//!
//! Keeps one `gemini_rust` client per model, created lazily on first use, so
//! the requirements agent and the pipeline stages can run on different models
//! through the same driver.
//!
//! # Example
//!
//! ```no_run
//! use panelwright_core::{GenerateRequestBuilder, Message};
//! use panelwright_interface::ComicDriver;
//! use panelwright_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("gemini-2.5-flash")?;
//! let request = GenerateRequestBuilder::default()
//!     .messages(vec![Message::user("Suggest a comic title about sharing")])
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};
use tracing::instrument;

use gemini_rust::{Gemini, client::Model};

use panelwright_core::{GenerateRequest, GenerateResponse, Output, Role};
use panelwright_error::{GeminiError, GeminiErrorKind, PanelwrightResult};
use panelwright_interface::ComicDriver;

/// Client for the Google Gemini API with per-model client pooling.
pub struct GeminiClient {
    /// Cache of model-specific REST API clients
    clients: Arc<Mutex<HashMap<String, Gemini>>>,
    /// API key for creating new clients
    api_key: String,
    /// Default model name when req.model is None
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let client_count = self.clients.lock().map(|c| c.len()).unwrap_or_default();
        f.debug_struct("GeminiClient")
            .field("model_name", &self.model_name)
            .field("cached_clients", &client_count)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Unrecognized names become `Model::Custom` with the `models/` prefix
    /// the API requires.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => {
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }

    /// Create a client whose default model is `model_name`.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_client_new", skip(model_name))]
    pub fn new(model_name: impl Into<String>) -> PanelwrightResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Ok(Self::with_api_key(api_key, model_name))
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }

    /// Get or create the pooled client for a model.
    fn client_for(&self, model_name: &str) -> Result<Gemini, GeminiError> {
        let mut clients = self.clients.lock().map_err(|e| {
            GeminiError::new(GeminiErrorKind::ClientCreation(format!(
                "client pool poisoned: {}",
                e
            )))
        })?;

        if let Some(client) = clients.get(model_name) {
            return Ok(client.clone());
        }

        let client = Gemini::with_model(&self.api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;
        clients.insert(model_name.to_string(), client.clone());
        tracing::debug!(model = %model_name, "Created Gemini client");
        Ok(client)
    }

    #[instrument(skip(self, req), fields(model = tracing::field::Empty, messages = req.messages().len()))]
    async fn generate_internal(&self, req: &GenerateRequest) -> Result<GenerateResponse, GeminiError> {
        let model_name = req.model().as_ref().unwrap_or(&self.model_name);
        tracing::Span::current().record("model", model_name.as_str());

        let client = self.client_for(model_name)?;
        let mut builder = client.generate_content();

        let mut system_prompt = req.system_instruction().clone();

        for msg in req.messages() {
            match msg.role {
                Role::System => {
                    // Gemini takes a single system prompt
                    system_prompt = Some(match system_prompt {
                        Some(existing) => format!("{}\n\n{}", existing, msg.content),
                        None => msg.content.clone(),
                    });
                }
                Role::User => {
                    builder = builder.with_user_message(&msg.content);
                }
                Role::Assistant => {
                    builder = builder.with_model_message(&msg.content);
                }
            }
        }

        if let Some(prompt) = system_prompt {
            builder = builder.with_system_prompt(&prompt);
        }

        if let Some(temp) = req.temperature() {
            builder = builder.with_temperature(*temp);
        }

        if let Some(max_tok) = req.max_tokens() {
            builder = builder.with_max_output_tokens(*max_tok as i32);
        }

        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse));
        }

        tracing::debug!(length = text.len(), "Gemini response received");
        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GeminiError {
        let err_msg = err.to_string();

        // Example: "bad response from server; code 503; description: ..."
        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GeminiError::new(GeminiErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GeminiError::new(GeminiErrorKind::ApiRequest(err_msg))
        }
    }

    fn extract_status_code(error_msg: &str) -> Option<u16> {
        let code_start = error_msg.find("code ")?;
        let code_str = &error_msg[code_start + 5..];
        let end = code_str
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(code_str.len());
        code_str[..end].parse().ok()
    }
}

#[async_trait]
impl ComicDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> PanelwrightResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_models_map_to_variants() {
        assert!(matches!(
            GeminiClient::model_name_to_enum("gemini-2.5-flash"),
            Model::Gemini25Flash
        ));
    }

    #[test]
    fn test_custom_models_get_prefix() {
        match GeminiClient::model_name_to_enum("gemini-flash-latest") {
            Model::Custom(name) => assert_eq!(name, "models/gemini-flash-latest"),
            _ => panic!("expected custom model"),
        }
        match GeminiClient::model_name_to_enum("models/gemini-exp") {
            Model::Custom(name) => assert_eq!(name, "models/gemini-exp"),
            _ => panic!("expected custom model"),
        }
    }

    #[test]
    fn test_status_code_extraction() {
        let err = GeminiClient::parse_gemini_error("bad response from server; code 503; description: overloaded");
        assert!(matches!(
            err.kind,
            GeminiErrorKind::HttpError { status_code: 503, .. }
        ));

        let err = GeminiClient::parse_gemini_error("connection reset");
        assert!(matches!(err.kind, GeminiErrorKind::ApiRequest(_)));
    }
}
