use serde_json::{json, Value};

/// Events handed to the host's analytics callback
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsEvent {
    TrustToggled { enabled: bool },
    FilesChanged { count: usize },
    Cleared,
    Continue { trust_delegated: bool, has_vision: bool, file_count: usize },
    Back,
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::TrustToggled { .. } => "creative_direction_trust_toggled",
            AnalyticsEvent::FilesChanged { .. } => "creative_direction_files_changed",
            AnalyticsEvent::Cleared => "creative_direction_cleared",
            AnalyticsEvent::Continue { .. } => "creative_direction_continue",
            AnalyticsEvent::Back => "creative_direction_back",
        }
    }

    pub fn properties(&self) -> Value {
        match self {
            AnalyticsEvent::TrustToggled { enabled } => json!({ "enabled": enabled }),
            AnalyticsEvent::FilesChanged { count } => json!({ "fileCount": count }),
            AnalyticsEvent::Continue {
                trust_delegated,
                has_vision,
                file_count,
            } => json!({
                "trustDelegated": trust_delegated,
                "hasVision": has_vision,
                "fileCount": file_count,
            }),
            AnalyticsEvent::Cleared | AnalyticsEvent::Back => json!({}),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_fixed() {
        assert_eq!(
            AnalyticsEvent::TrustToggled { enabled: true }.name(),
            "creative_direction_trust_toggled"
        );
        assert_eq!(AnalyticsEvent::Back.name(), "creative_direction_back");
    }

    #[test]
    fn test_continue_properties() {
        let event = AnalyticsEvent::Continue {
            trust_delegated: false,
            has_vision: true,
            file_count: 2,
        };
        let props = event.properties();
        assert_eq!(props["fileCount"], 2);
        assert_eq!(props["hasVision"], true);
    }
}
