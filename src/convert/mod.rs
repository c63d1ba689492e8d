// 外部フォーマットとの変換
pub mod tenhou;
pub mod url;

pub use tenhou::decode_url;
pub use url::extract_log_urls;
