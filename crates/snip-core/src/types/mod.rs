//! Validated input types.

mod api_url;
mod period;
mod short_code;

pub use api_url::ApiUrl;
pub use period::Period;
pub use short_code::ShortCode;
