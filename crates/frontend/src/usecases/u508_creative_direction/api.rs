//! API clients of the creative direction step
//!
//! Both clients return `Result<_, String>` with a message ready for the UI
//! and never panic. Uploads report coarse progress: 10 once the file is
//! encoded, 90 when the endpoint answered, 100 when the answer parsed.

use super::config::CreativeDirectionConfig;
use crate::shared::api_utils::error_from_body;
use crate::shared::file_source::{content_type_for, FileSource};
use crate::shared::http::{FetchTransport, HttpTransport};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use contracts::usecases::u508_creative_direction::{
    CreativeVisionRequest, CreativeVisionResponse, UploadFileRequest, UploadFileResponse,
    UploadedFileData, VisionButtonType,
};
use serde_json::Value;

pub const PROGRESS_ENCODED: u8 = 10;
pub const PROGRESS_RESPONDED: u8 = 90;
pub const PROGRESS_DONE: u8 = 100;

// ============================================================================
// Upload
// ============================================================================

/// Upload one already validated file
pub async fn upload(
    file: &web_sys::File,
    config: &CreativeDirectionConfig,
    description: Option<String>,
    on_progress: &mut dyn FnMut(u8),
) -> Result<UploadedFileData, String> {
    upload_with(&FetchTransport, file, config, description, on_progress).await
}

/// Upload files one after another. One result per file, in input order.
pub async fn upload_many(
    files: &[web_sys::File],
    config: &CreativeDirectionConfig,
    on_progress: impl FnMut(usize, u8),
) -> Vec<Result<UploadedFileData, String>> {
    upload_many_with(&FetchTransport, files, config, on_progress).await
}

pub async fn upload_with<T: HttpTransport, F: FileSource>(
    transport: &T,
    file: &F,
    config: &CreativeDirectionConfig,
    description: Option<String>,
    on_progress: &mut dyn FnMut(u8),
) -> Result<UploadedFileData, String> {
    let filename = file.name();
    log::info!("Uploading '{}' ({} bytes)", filename, file.size());
    match send_upload(transport, file, config, description, on_progress).await {
        Ok(data) => {
            log::info!("Uploaded '{}' as {}", filename, data.key);
            Ok(data)
        }
        Err(e) => {
            log::error!("Upload of '{}' failed: {}", filename, e);
            Err(e)
        }
    }
}

async fn send_upload<T: HttpTransport, F: FileSource>(
    transport: &T,
    file: &F,
    config: &CreativeDirectionConfig,
    description: Option<String>,
    on_progress: &mut dyn FnMut(u8),
) -> Result<UploadedFileData, String> {
    let bytes = file.read_bytes().await?;
    let request = UploadFileRequest {
        filename: file.name(),
        content_type: content_type_for(file),
        data: STANDARD.encode(bytes),
        description: description.filter(|d| !d.trim().is_empty()),
    };
    let body = serde_json::to_string(&request).map_err(|e| e.to_string())?;
    on_progress(PROGRESS_ENCODED);

    let reply = transport.post_json(&config.upload_url(), body).await?;
    on_progress(PROGRESS_RESPONDED);

    if !reply.ok() {
        return Err(error_from_body(
            &reply.body,
            format!("Upload failed (HTTP {})", reply.status),
        ));
    }

    let response: UploadFileResponse = serde_json::from_str(&reply.body)
        .map_err(|e| format!("Invalid upload response: {}", e))?;
    on_progress(PROGRESS_DONE);
    Ok(response.data)
}

/// Strictly sequential: file N starts only after file N-1 resolved
pub async fn upload_many_with<T: HttpTransport, F: FileSource>(
    transport: &T,
    files: &[F],
    config: &CreativeDirectionConfig,
    mut on_progress: impl FnMut(usize, u8),
) -> Vec<Result<UploadedFileData, String>> {
    let mut results = Vec::with_capacity(files.len());
    for (index, file) in files.iter().enumerate() {
        let mut report = |percent: u8| on_progress(index, percent);
        results.push(upload_with(transport, file, config, None, &mut report).await);
    }
    results
}

// ============================================================================
// Creative vision (Feeling Lucky / Enhance)
// ============================================================================

/// Context sent along with an AI vision request
#[derive(Debug, Clone, Default)]
pub struct VisionContext {
    /// Snapshot of the general info step
    pub general_info: Option<Value>,
    /// Snapshot of the design style step
    pub design_style: Option<Value>,
    pub current_vision: String,
    pub trust_delegated: bool,
}

/// Generate a vision from the context alone
pub async fn feeling_lucky(
    context: &VisionContext,
    config: &CreativeDirectionConfig,
) -> Result<String, String> {
    request_vision(VisionButtonType::FeelingLucky, context, config).await
}

/// Rewrite the current vision
pub async fn enhance(
    context: &VisionContext,
    config: &CreativeDirectionConfig,
) -> Result<String, String> {
    request_vision(VisionButtonType::Enhance, context, config).await
}

pub async fn request_vision(
    mode: VisionButtonType,
    context: &VisionContext,
    config: &CreativeDirectionConfig,
) -> Result<String, String> {
    request_vision_with(&FetchTransport, mode, context, config).await
}

pub async fn request_vision_with<T: HttpTransport>(
    transport: &T,
    mode: VisionButtonType,
    context: &VisionContext,
    config: &CreativeDirectionConfig,
) -> Result<String, String> {
    let url = config
        .creative_vision_url()
        .ok_or_else(|| "AI assistance is not configured for this form".to_string())?;

    let current_vision = match mode {
        VisionButtonType::Enhance => {
            if context.current_vision.trim().is_empty() {
                return Err("Write your creative vision first, then enhance it".to_string());
            }
            Some(context.current_vision.clone())
        }
        VisionButtonType::FeelingLucky => None,
    };

    let request = CreativeVisionRequest {
        button_type: mode,
        general_info: context.general_info.clone(),
        design_style: context.design_style.clone(),
        current_vision,
        trust_squad: Some(context.trust_delegated),
    };
    let body = serde_json::to_string(&request).map_err(|e| e.to_string())?;

    log::debug!("Requesting creative vision ({})", mode.as_str());
    let reply = transport.post_json(&url, body).await.map_err(|e| {
        log::error!("Creative vision request failed: {}", e);
        e
    })?;

    if !reply.ok() {
        let message = error_from_body(
            &reply.body,
            format!("Could not generate a vision (HTTP {})", reply.status),
        );
        log::error!("Creative vision request failed: {}", message);
        return Err(message);
    }

    let response: CreativeVisionResponse = serde_json::from_str(&reply.body)
        .map_err(|e| format!("Invalid creative vision response: {}", e))?;
    let vision = response.data.vision.trim().to_string();
    if vision.is_empty() {
        return Err("The assistant returned an empty vision, please try again".to_string());
    }
    Ok(vision)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::http::HttpReply;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Scripted transport that records every request
    #[derive(Default)]
    struct FakeTransport {
        replies: RefCell<VecDeque<Result<HttpReply, String>>>,
        requests: RefCell<Vec<(String, Value)>>,
    }

    impl FakeTransport {
        fn with_replies(replies: Vec<Result<HttpReply, String>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                requests: RefCell::default(),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl HttpTransport for FakeTransport {
        async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, String> {
            let json: Value = serde_json::from_str(&body).expect("client sends JSON");
            self.requests.borrow_mut().push((url.to_string(), json));
            self.replies
                .borrow_mut()
                .pop_front()
                .expect("unexpected request")
        }
    }

    struct FakeFile {
        name: &'static str,
        mime: &'static str,
        bytes: &'static [u8],
    }

    impl FileSource for FakeFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn size(&self) -> u64 {
            self.bytes.len() as u64
        }

        fn mime_type(&self) -> String {
            self.mime.to_string()
        }

        async fn read_bytes(&self) -> Result<Vec<u8>, String> {
            Ok(self.bytes.to_vec())
        }
    }

    fn png(name: &'static str) -> FakeFile {
        FakeFile {
            name,
            mime: "image/png",
            bytes: b"hello",
        }
    }

    fn uploaded(name: &str) -> Result<HttpReply, String> {
        Ok(HttpReply {
            status: 200,
            body: serde_json::json!({
                "data": {
                    "url": format!("https://cdn.example.com/{}", name),
                    "filename": name,
                    "key": format!("uploads/{}", name),
                    "size": 5
                }
            })
            .to_string(),
        })
    }

    fn failed(status: u16, error: &str) -> Result<HttpReply, String> {
        Ok(HttpReply {
            status,
            body: serde_json::json!({ "error": error }).to_string(),
        })
    }

    fn vision_reply(vision: &str) -> Result<HttpReply, String> {
        Ok(HttpReply {
            status: 200,
            body: serde_json::json!({ "data": { "vision": vision } }).to_string(),
        })
    }

    #[test]
    fn test_upload_reports_checkpoints() {
        let transport = FakeTransport::with_replies(vec![uploaded("logo.png")]);
        let config = CreativeDirectionConfig::default();
        let mut progress = Vec::new();
        let result = block_on(upload_with(
            &transport,
            &png("logo.png"),
            &config,
            Some("Primary logo".into()),
            &mut |p| progress.push(p),
        ));

        let data = result.unwrap();
        assert_eq!(data.key, "uploads/logo.png");
        assert_eq!(progress, vec![10, 90, 100]);

        let requests = transport.requests.borrow();
        let (url, body) = &requests[0];
        assert_eq!(url, "/api/creative-direction/upload");
        assert_eq!(body["filename"], "logo.png");
        assert_eq!(body["contentType"], "image/png");
        assert_eq!(body["data"], "aGVsbG8=");
        assert_eq!(body["description"], "Primary logo");
    }

    #[test]
    fn test_upload_error_body_surfaced() {
        let transport = FakeTransport::with_replies(vec![failed(413, "File rejected by storage")]);
        let mut progress = Vec::new();
        let result = block_on(upload_with(
            &transport,
            &png("big.png"),
            &CreativeDirectionConfig::default(),
            None,
            &mut |p| progress.push(p),
        ));
        assert_eq!(result.unwrap_err(), "File rejected by storage");
        assert_eq!(progress, vec![10, 90]);
    }

    #[test]
    fn test_upload_network_failure() {
        let transport = FakeTransport::with_replies(vec![Err("Network error: offline".into())]);
        let result = block_on(upload_with(
            &transport,
            &png("a.png"),
            &CreativeDirectionConfig::default(),
            None,
            &mut |_| {},
        ));
        assert_eq!(result.unwrap_err(), "Network error: offline");
    }

    #[test]
    fn test_upload_unparseable_success() {
        let transport = FakeTransport::with_replies(vec![Ok(HttpReply {
            status: 200,
            body: "OK".into(),
        })]);
        let result = block_on(upload_with(
            &transport,
            &png("a.png"),
            &CreativeDirectionConfig::default(),
            None,
            &mut |_| {},
        ));
        assert!(result.unwrap_err().starts_with("Invalid upload response"));
    }

    #[test]
    fn test_unknown_mime_sent_as_octet_stream() {
        let transport = FakeTransport::with_replies(vec![uploaded("art.psd")]);
        let file = FakeFile {
            name: "art.psd",
            mime: "",
            bytes: b"8BPS",
        };
        block_on(upload_with(
            &transport,
            &file,
            &CreativeDirectionConfig::default(),
            None,
            &mut |_| {},
        ))
        .unwrap();
        assert_eq!(
            transport.requests.borrow()[0].1["contentType"],
            "application/octet-stream"
        );
    }

    #[test]
    fn test_upload_many_middle_failure_isolated() {
        let transport = FakeTransport::with_replies(vec![
            uploaded("f1.png"),
            failed(500, "Storage unavailable"),
            uploaded("f3.png"),
        ]);
        let files = [png("f1.png"), png("f2.png"), png("f3.png")];
        let mut progress = Vec::new();
        let results = block_on(upload_many_with(
            &transport,
            &files,
            &CreativeDirectionConfig::default(),
            |index, percent| progress.push((index, percent)),
        ));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().filename, "f1.png");
        assert_eq!(results[1].as_ref().unwrap_err(), "Storage unavailable");
        assert_eq!(results[2].as_ref().unwrap().filename, "f3.png");

        // Sequential: every checkpoint of file N precedes file N+1
        assert_eq!(
            progress,
            vec![
                (0, 10),
                (0, 90),
                (0, 100),
                (1, 10),
                (1, 90),
                (2, 10),
                (2, 90),
                (2, 100)
            ]
        );
        let names: Vec<_> = transport
            .requests
            .borrow()
            .iter()
            .map(|(_, body)| body["filename"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["f1.png", "f2.png", "f3.png"]);
    }

    #[test]
    fn test_feeling_lucky_without_endpoint_makes_no_request() {
        let transport = FakeTransport::default();
        let config = CreativeDirectionConfig {
            creative_vision_endpoint: None,
            ..Default::default()
        };
        let result = block_on(request_vision_with(
            &transport,
            VisionButtonType::FeelingLucky,
            &VisionContext::default(),
            &config,
        ));
        assert!(result.is_err());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_enhance_requires_text() {
        let transport = FakeTransport::default();
        let context = VisionContext {
            current_vision: "   ".into(),
            ..Default::default()
        };
        let result = block_on(request_vision_with(
            &transport,
            VisionButtonType::Enhance,
            &context,
            &CreativeDirectionConfig::default(),
        ));
        assert!(result.is_err());
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_enhance_sends_context() {
        let transport = FakeTransport::with_replies(vec![vision_reply("  Vivid and playful  ")]);
        let context = VisionContext {
            general_info: Some(serde_json::json!({ "company": "Acme" })),
            design_style: None,
            current_vision: "Playful".into(),
            trust_delegated: false,
        };
        let vision = block_on(request_vision_with(
            &transport,
            VisionButtonType::Enhance,
            &context,
            &CreativeDirectionConfig::default(),
        ))
        .unwrap();
        assert_eq!(vision, "Vivid and playful");

        let requests = transport.requests.borrow();
        let (url, body) = &requests[0];
        assert_eq!(url, "/api/creative-direction/creative-vision");
        assert_eq!(body["buttonType"], "enhance");
        assert_eq!(body["currentVision"], "Playful");
        assert_eq!(body["generalInfo"]["company"], "Acme");
        assert_eq!(body["trustSquad"], false);
        assert!(body.get("designStyle").is_none());
    }

    #[test]
    fn test_feeling_lucky_omits_current_vision() {
        let transport = FakeTransport::with_replies(vec![vision_reply("Fresh idea")]);
        let context = VisionContext {
            current_vision: "ignored".into(),
            ..Default::default()
        };
        block_on(request_vision_with(
            &transport,
            VisionButtonType::FeelingLucky,
            &context,
            &CreativeDirectionConfig::default(),
        ))
        .unwrap();
        let body = &transport.requests.borrow()[0].1;
        assert_eq!(body["buttonType"], "feelingLucky");
        assert!(body.get("currentVision").is_none());
    }

    #[test]
    fn test_vision_http_error() {
        let transport = FakeTransport::with_replies(vec![
            failed(502, ""),
            vision_reply("   "),
        ]);
        let context = VisionContext::default();
        let config = CreativeDirectionConfig::default();

        let err = block_on(request_vision_with(
            &transport,
            VisionButtonType::FeelingLucky,
            &context,
            &config,
        ))
        .unwrap_err();
        assert_eq!(err, "Could not generate a vision (HTTP 502)");

        let err = block_on(request_vision_with(
            &transport,
            VisionButtonType::FeelingLucky,
            &context,
            &config,
        ))
        .unwrap_err();
        assert!(err.contains("empty vision"));
    }
}
