use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which AI button triggered the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VisionButtonType {
    /// Generate a vision from context alone
    FeelingLucky,
    /// Rewrite the current vision
    Enhance,
}

impl VisionButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisionButtonType::FeelingLucky => "feelingLucky",
            VisionButtonType::Enhance => "enhance",
        }
    }
}

/// Body of `POST {creative_vision_endpoint}`.
///
/// `general_info` and `design_style` are snapshots of earlier form steps,
/// passed through without interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeVisionRequest {
    pub button_type: VisionButtonType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_info: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design_style: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_vision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_squad: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreativeVisionResponse {
    pub data: VisionData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionData {
    pub vision: String,
    /// Anything else the endpoint sends back
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
