use super::limits::{MAX_FILES, MAX_VISION_LENGTH};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A file accepted by the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Opaque id assigned on the client, unique within a session
    pub id: String,
    pub url: String,
    pub filename: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// State of the creative direction step.
///
/// Serialized as-is into session storage and handed to the host on every change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreativeDirectionState {
    /// Creative decisions are delegated to the team
    pub trust_delegated: bool,
    pub vision: String,
    /// Presentation order = upload order
    pub uploaded_files: Vec<UploadedFile>,
    /// file id -> description
    pub file_descriptions: BTreeMap<String, String>,
}

/// Partial update for [`CreativeDirectionState::merged`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStatePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_delegated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_files: Option<Vec<UploadedFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_descriptions: Option<BTreeMap<String, String>>,
}

impl FormStatePatch {
    pub fn trust_delegated(value: bool) -> Self {
        Self {
            trust_delegated: Some(value),
            ..Default::default()
        }
    }

    pub fn vision(value: impl Into<String>) -> Self {
        Self {
            vision: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn uploaded_files(files: Vec<UploadedFile>) -> Self {
        Self {
            uploaded_files: Some(files),
            ..Default::default()
        }
    }

    pub fn file_descriptions(descriptions: BTreeMap<String, String>) -> Self {
        Self {
            file_descriptions: Some(descriptions),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("vision is {len} characters, limit is {max}")]
    VisionTooLong { len: usize, max: usize },

    #[error("{count} files attached, limit is {max}")]
    TooManyFiles { count: usize, max: usize },
}

impl CreativeDirectionState {
    /// Apply a patch shallowly and return the normalized result.
    ///
    /// The receiver is untouched, so a rejected patch leaves the previous
    /// state in place.
    pub fn merged(&self, patch: FormStatePatch) -> Result<Self, StateError> {
        let mut next = self.clone();
        if let Some(trust) = patch.trust_delegated {
            next.trust_delegated = trust;
        }
        if let Some(vision) = patch.vision {
            next.vision = vision;
        }
        if let Some(files) = patch.uploaded_files {
            next.uploaded_files = files;
        }
        if let Some(descriptions) = patch.file_descriptions {
            next.file_descriptions = descriptions;
        }
        next.validated()
    }

    /// Check limits and drop descriptions of files that are no longer attached
    pub fn validated(mut self) -> Result<Self, StateError> {
        let len = self.vision.chars().count();
        if len > MAX_VISION_LENGTH {
            return Err(StateError::VisionTooLong {
                len,
                max: MAX_VISION_LENGTH,
            });
        }
        if self.uploaded_files.len() > MAX_FILES {
            return Err(StateError::TooManyFiles {
                count: self.uploaded_files.len(),
                max: MAX_FILES,
            });
        }
        let files = &self.uploaded_files;
        self.file_descriptions
            .retain(|id, _| files.iter().any(|f| &f.id == id));
        Ok(self)
    }

    /// Trust delegated, non-blank vision or at least one file
    pub fn has_content(&self) -> bool {
        self.trust_delegated || !self.vision.trim().is_empty() || !self.uploaded_files.is_empty()
    }

    pub fn can_continue(&self, disabled: bool) -> bool {
        !disabled && (self.trust_delegated || self.has_content())
    }

    pub fn description_for(&self, file_id: &str) -> &str {
        self.file_descriptions
            .get(file_id)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Patch that appends files to the uploaded list
    pub fn with_files_appended(&self, files: Vec<UploadedFile>) -> FormStatePatch {
        let mut all = self.uploaded_files.clone();
        all.extend(files);
        FormStatePatch::uploaded_files(all)
    }

    /// Patch that removes a file together with its description
    pub fn without_file(&self, file_id: &str) -> FormStatePatch {
        let files = self
            .uploaded_files
            .iter()
            .filter(|f| f.id != file_id)
            .cloned()
            .collect();
        let mut descriptions = self.file_descriptions.clone();
        descriptions.remove(file_id);
        FormStatePatch {
            uploaded_files: Some(files),
            file_descriptions: Some(descriptions),
            ..Default::default()
        }
    }

    /// Patch that sets the description of an attached file.
    /// Unknown ids yield `None`.
    pub fn with_description(&self, file_id: &str, description: String) -> Option<FormStatePatch> {
        if !self.uploaded_files.iter().any(|f| f.id == file_id) {
            return None;
        }
        let mut descriptions = self.file_descriptions.clone();
        descriptions.insert(file_id.to_string(), description);
        Some(FormStatePatch::file_descriptions(descriptions))
    }
}
