pub mod analytics;
pub mod limits;
pub mod state;
pub mod upload;
pub mod vision;

pub use analytics::AnalyticsEvent;
pub use limits::{validate_file, validate_selection, ValidationError};
pub use state::{CreativeDirectionState, FormStatePatch, StateError, UploadedFile};
pub use upload::{ErrorResponse, UploadFileRequest, UploadFileResponse, UploadedFileData};
pub use vision::{CreativeVisionRequest, CreativeVisionResponse, VisionButtonType, VisionData};

use crate::usecases::common::UseCaseMetadata;

pub struct CreativeDirection;

impl UseCaseMetadata for CreativeDirection {
    fn usecase_index() -> &'static str {
        "u508"
    }

    fn usecase_name() -> &'static str {
        "creative_direction"
    }

    fn display_name() -> &'static str {
        "Creative Direction"
    }

    fn description() -> &'static str {
        "Project intake step: creative vision, reference files and trust delegation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        assert_eq!(CreativeDirection::full_name(), "u508_creative_direction");
        assert_eq!(CreativeDirection::display_name(), "Creative Direction");
    }
}
