pub mod environment;
pub mod terminal;
pub mod text;
pub mod timestamps;

pub use environment::{request_timeout, resolve_api_url, resolve_data_dir};
pub use terminal::strip_ansi_codes;
pub use text::{first_line_preview, truncate_chars};
pub use timestamps::{format_millis, format_timestamp};
