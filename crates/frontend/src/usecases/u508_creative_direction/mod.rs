//! u508 Creative Direction step
//!
//! Structure:
//! - config.rs: settings supplied by the host
//! - api.rs: upload and creative vision clients
//! - store.rs: persisted form state + context provider
//! - view_model.rs / upload_queue.rs: transient UI state
//! - trust_toggle.rs, vision_field.rs, speech_button.rs, file_uploader.rs: fields
//! - view.rs: CreativeDirectionStep container

pub mod api;
pub mod config;
pub mod file_uploader;
pub mod speech_button;
pub mod store;
pub mod trust_toggle;
pub mod upload_queue;
pub mod view;
pub mod view_model;
pub mod vision_field;

pub use config::CreativeDirectionConfig;
pub use store::{use_creative_direction, CreativeDirectionContext, CreativeDirectionProvider};
pub use view::{ContinueFuture, CreativeDirectionStep};

use contracts::usecases::u508_creative_direction::AnalyticsEvent;
use leptos::prelude::*;

/// Log an analytics event and hand it to the host, if it listens
pub(crate) fn track(on_analytics: Option<Callback<AnalyticsEvent>>, event: AnalyticsEvent) {
    log::debug!("analytics: {} {}", event.name(), event.properties());
    if let Some(on_analytics) = on_analytics {
        on_analytics.run(event);
    }
}

/// Human readable file size
pub fn format_file_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let size = bytes as f64;
    if size < KB {
        format!("{} B", bytes)
    } else if size < KB * KB {
        format!("{:.1} KB", size / KB)
    } else if size < KB * KB * KB {
        format!("{:.1} MB", size / (KB * KB))
    } else {
        format!("{:.2} GB", size / (KB * KB * KB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024), "2.00 GB");
    }
}
