//! The fetch pipeline: prompt, model call, JSON extraction, validation and
//! storage for a single document kind.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, instrument};

use crate::Result;
use crate::anthropic::{MessageClient, MessageRequest};
use crate::config::CinqueTerreConfig;
use crate::documents::{DocumentKind, render_prompt, validate};
use crate::extract::extract_json_object;
use crate::storage::save_document;
use crate::summary::record_count;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub document: Value,
    pub records: usize,
}

/// Runs the fetch pipeline against any [`MessageClient`]
pub struct Fetcher<C> {
    client: C,
    model: String,
    location: String,
    web_search_max_uses: Option<u32>,
}

impl<C: MessageClient> Fetcher<C> {
    pub fn new(client: C, model: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            location: location.into(),
            web_search_max_uses: None,
        }
    }

    /// Fetcher using the model, location and search limit from `config`
    pub fn from_config(client: C, config: &CinqueTerreConfig) -> Self {
        Self::new(client, &config.anthropic.model, &config.defaults.location)
            .with_web_search_max_uses(config.anthropic.web_search_max_uses)
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_web_search_max_uses(mut self, max_uses: Option<u32>) -> Self {
        self.web_search_max_uses = max_uses;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    fn request_for(&self, kind: DocumentKind) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            max_tokens: kind.max_tokens(),
            prompt: render_prompt(kind, &self.location),
            web_search_max_uses: self.web_search_max_uses,
        }
    }

    /// Ask the model for a `kind` document and return it once it validates
    pub async fn fetch(&self, kind: DocumentKind) -> Result<Value> {
        let reply = self.client.complete(&self.request_for(kind)).await?;
        let document = extract_json_object(&reply.text)?;
        validate(kind, &document)?;
        Ok(document)
    }

    /// Fetch, then write the document into `output_dir`.
    ///
    /// Nothing is written unless the document validates.
    #[instrument(skip(self, output_dir), fields(model = %self.model))]
    pub async fn run(&self, kind: DocumentKind, output_dir: &Path) -> Result<FetchOutcome> {
        info!("Fetching {} data for {}", kind.label(), self.location);
        let document = self.fetch(kind).await?;
        let path = save_document(output_dir, kind, &document)?;
        let records = record_count(kind, &document);
        info!("Fetched {} {}", records, crate::summary::record_noun(kind));

        Ok(FetchOutcome {
            kind,
            path,
            document,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CinqueTerreError;
    use crate::anthropic::MessageReply;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Replies with canned output and records what it was asked
    struct ScriptedClient {
        reply: std::result::Result<String, u16>,
        seen: Mutex<Vec<MessageRequest>>,
    }

    impl ScriptedClient {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MessageClient for ScriptedClient {
        async fn complete(&self, request: &MessageRequest) -> Result<MessageReply> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(MessageReply {
                    text: text.clone(),
                    stop_reason: Some("end_turn".to_string()),
                    usage: None,
                }),
                Err(status) => Err(CinqueTerreError::api_status(*status, "scripted failure")),
            }
        }
    }

    const RESTAURANTS: &str = r#"Here is what I found:
{"metadata": {"total_results": 2}, "restaurants": [
  {"rank": 1, "name": "Dau Cila", "ratings": {"average_rating": 4.5}},
  {"rank": 2, "name": "Rio Bistrot", "ratings": {}}
]}
Let me know if you need more."#;

    fn fetcher(client: ScriptedClient) -> Fetcher<ScriptedClient> {
        Fetcher::new(client, "test-model", "Riomaggiore, Cinque Terre, Italy")
    }

    #[tokio::test]
    async fn test_run_writes_validated_document() {
        let tmp = TempDir::new().unwrap();
        let fetcher = fetcher(ScriptedClient::replying(RESTAURANTS));

        let outcome = fetcher.run(DocumentKind::Restaurants, tmp.path()).await.unwrap();

        assert_eq!(outcome.records, 2);
        assert_eq!(outcome.path, tmp.path().join("riomaggiore_restaurants.json"));
        assert!(outcome.path.exists());
        assert_eq!(outcome.document["restaurants"][0]["name"], "Dau Cila");
    }

    #[tokio::test]
    async fn test_request_uses_kind_budget_and_location() {
        let fetcher = fetcher(ScriptedClient::replying(RESTAURANTS))
            .with_model("other-model")
            .with_web_search_max_uses(Some(3));

        fetcher.fetch(DocumentKind::Restaurants).await.unwrap();

        let seen = fetcher.client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "other-model");
        assert_eq!(seen[0].max_tokens, 16_000);
        assert_eq!(seen[0].web_search_max_uses, Some(3));
        assert!(seen[0].prompt.contains("Riomaggiore, Cinque Terre, Italy"));
    }

    #[tokio::test]
    async fn test_reply_without_json() {
        let fetcher = fetcher(ScriptedClient::replying("Sorry, I could not find anything."));
        let err = fetcher.fetch(DocumentKind::Events).await.unwrap_err();
        assert!(matches!(err, CinqueTerreError::JsonNotFound));
    }

    #[tokio::test]
    async fn test_reply_with_broken_json() {
        let fetcher = fetcher(ScriptedClient::replying(r#"{"metadata": {}, "events": [ }"#));
        let err = fetcher.fetch(DocumentKind::Events).await.unwrap_err();
        assert!(matches!(err, CinqueTerreError::JsonParse { .. }));
    }

    #[tokio::test]
    async fn test_invalid_document_is_not_written() {
        let tmp = TempDir::new().unwrap();
        let fetcher = fetcher(ScriptedClient::replying(r#"{"metadata": {}, "events": []}"#));

        let err = fetcher.run(DocumentKind::Events, tmp.path()).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid document: No events found");
        assert!(!tmp.path().join("riomaggiore_events.json").exists());
    }

    #[tokio::test]
    async fn test_api_error_is_propagated() {
        let tmp = TempDir::new().unwrap();
        let fetcher = fetcher(ScriptedClient::failing(429));

        let err = fetcher.run(DocumentKind::Weather, tmp.path()).await.unwrap_err();

        assert!(matches!(err, CinqueTerreError::Api { status: Some(429), .. }));
        assert!(std::fs::read_dir(tmp.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_from_config_takes_model_and_location() {
        let mut config = CinqueTerreConfig::default();
        config.anthropic.model = "configured-model".to_string();
        config.defaults.location = "Manarola".to_string();
        config.anthropic.web_search_max_uses = Some(8);

        let fetcher = Fetcher::from_config(ScriptedClient::replying("{}"), &config);

        assert_eq!(fetcher.model(), "configured-model");
        assert_eq!(fetcher.location(), "Manarola");
        assert_eq!(fetcher.request_for(DocumentKind::Weather).web_search_max_uses, Some(8));
    }
}
