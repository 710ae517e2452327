use web_sys::window;

/// Blocking notice for rejected user actions (bad file type, too many files, ...)
pub fn show_blocking_notice(message: &str) {
    log::warn!("Notice: {}", message);
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}
