use crate::spans::EntitySpan;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display};
use std::path::Path;
use std::time::Duration;

/// The external tagging collaborator: given one sentence, produce the
/// predicted entity spans. Synchronous request/response; the evaluation loop
/// decides what a failure means (zero predictions or a fatal error).
pub trait Tagger {
    fn tag(&self, sentence: &str) -> Result<Vec<EntitySpan>, TaggerError>;
}

/// Failure of the tagging collaborator for one sentence.
#[derive(Debug)]
pub struct TaggerError {
    message: String,
}

impl TaggerError {
    pub fn new(message: impl Into<String>) -> Self {
        TaggerError {
            message: message.into(),
        }
    }
}

impl Display for TaggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tagging service failure: {}", self.message)
    }
}

impl Error for TaggerError {}

impl From<reqwest::Error> for TaggerError {
    fn from(value: reqwest::Error) -> Self {
        TaggerError::new(value.to_string())
    }
}

/// Configuration of the HTTP tagging service, read from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// Endpoint accepting tagging requests.
    pub endpoint: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl TaggerConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tagger configuration {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse tagger configuration {}", path.display()))
    }
}

/// Blocking HTTP client for the tagging service. Posts the sentence together
/// with the named-entity set URI and expects the predicted spans back as
/// JSON.
#[derive(Debug)]
pub struct ServiceTagger {
    client: reqwest::blocking::Client,
    endpoint: String,
    nerset: String,
}

#[derive(Debug, Serialize)]
struct TagRequest<'a> {
    sentence: &'a str,
    nerset: &'a str,
}

#[derive(Debug, Deserialize)]
struct TagResponse {
    entities: Vec<EntitySpan>,
}

impl ServiceTagger {
    pub fn new(config: &TaggerConfig, nerset: impl Into<String>) -> Result<Self, TaggerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(ServiceTagger {
            client,
            endpoint: config.endpoint.clone(),
            nerset: nerset.into(),
        })
    }
}

impl Tagger for ServiceTagger {
    fn tag(&self, sentence: &str) -> Result<Vec<EntitySpan>, TaggerError> {
        let request = TagRequest {
            sentence,
            nerset: &self.nerset,
        };
        let response: TagResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_json() {
        let config: TaggerConfig =
            serde_json::from_str(r#"{"endpoint": "http://localhost:9887/tag"}"#).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9887/tag");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_with_timeout() {
        let config: TaggerConfig = serde_json::from_str(
            r#"{"endpoint": "http://tagger.local/tag", "timeout_secs": 5}"#,
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_config_rejects_missing_endpoint() {
        assert!(serde_json::from_str::<TaggerConfig>("{}").is_err());
    }

    #[test]
    fn test_response_deserializes_spans() {
        let response: TagResponse = serde_json::from_str(
            r#"{"entities": [{"text": "Jan Peters", "class": "PER"}]}"#,
        )
        .unwrap();
        assert_eq!(response.entities, vec![EntitySpan::new("Jan Peters", "PER")]);
    }
}
