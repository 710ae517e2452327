use serde::{Deserialize, Serialize};

/// Body of `POST {upload_endpoint}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    pub filename: String,
    pub content_type: String,
    /// File content, standard base64
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Successful upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFileResponse {
    pub data: UploadedFileData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileData {
    pub url: String,
    pub filename: String,
    /// Storage key of the object
    pub key: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Error body returned with a non-2xx status by both endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = UploadFileRequest {
            filename: "logo.png".into(),
            content_type: "image/png".into(),
            data: "aGVsbG8=".into(),
            description: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contentType"], "image/png");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_response_without_description() {
        let body = r#"{"data":{"url":"https://cdn/x.png","filename":"x.png","key":"uploads/x.png","size":42}}"#;
        let response: UploadFileResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.key, "uploads/x.png");
        assert_eq!(response.data.description, None);
    }
}
