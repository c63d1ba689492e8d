// mainから直接呼び出すアプリケーションの動作モード(S, D)のモジュール

mod decode;
mod sync;

pub use decode::DecodeApp;
pub use sync::SyncApp;

const BASE_URL_ENV: &str = "NOTE_API_BASE"; // note APIのベースURL
const CREATOR: &str = "seppu"; // 記事を取得するクリエイター
const KEYWORD: &str = "Mリーグ"; // 牌譜を集計する記事のタイトルに含まれる文字列
const OUT_DIR: &str = "sheet";
