pub mod api_utils;
pub mod file_source;
pub mod http;
pub mod icons;
pub mod notice;
pub mod speech;
pub mod state;
