use crate::shared::api_utils::api_url;
use crate::shared::state::form_state_manager::DEFAULT_STORAGE_KEY;
use serde::Deserialize;

pub const DEFAULT_UPLOAD_ENDPOINT: &str = "/api/creative-direction/upload";
pub const DEFAULT_CREATIVE_VISION_ENDPOINT: &str = "/api/creative-direction/creative-vision";

/// Settings supplied by the embedding application
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreativeDirectionConfig {
    /// Prefix for relative endpoints, `None` = same origin as the page
    pub api_base: Option<String>,
    pub upload_endpoint: String,
    /// `None` or blank disables the AI buttons
    pub creative_vision_endpoint: Option<String>,
    /// BCP 47 tag for voice input
    pub speech_language: String,
    /// sessionStorage key of the form state
    pub storage_key: String,
}

impl Default for CreativeDirectionConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            creative_vision_endpoint: Some(DEFAULT_CREATIVE_VISION_ENDPOINT.to_string()),
            speech_language: "en-US".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl CreativeDirectionConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid creative direction config: {}", e))
    }

    pub fn upload_url(&self) -> String {
        api_url(self.api_base.as_deref(), &self.upload_endpoint)
    }

    /// `None` when the vision endpoint is not configured
    pub fn creative_vision_url(&self) -> Option<String> {
        self.creative_vision_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .map(|endpoint| api_url(self.api_base.as_deref(), endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CreativeDirectionConfig::default();
        assert_eq!(config.upload_url(), "/api/creative-direction/upload");
        assert_eq!(
            config.creative_vision_url().as_deref(),
            Some("/api/creative-direction/creative-vision")
        );
    }

    #[test]
    fn test_from_json_partial() {
        let config = CreativeDirectionConfig::from_json(
            r#"{"apiBase":"https://intake.example.com","speechLanguage":"de-DE"}"#,
        )
        .unwrap();
        assert_eq!(
            config.upload_url(),
            "https://intake.example.com/api/creative-direction/upload"
        );
        assert_eq!(config.speech_language, "de-DE");
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_vision_endpoint_disabled() {
        let config = CreativeDirectionConfig::from_json(r#"{"creativeVisionEndpoint":null}"#).unwrap();
        assert_eq!(config.creative_vision_url(), None);

        let blank = CreativeDirectionConfig {
            creative_vision_endpoint: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(blank.creative_vision_url(), None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(CreativeDirectionConfig::from_json("[1,2]").is_err());
    }
}
