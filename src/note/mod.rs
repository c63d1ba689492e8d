// note記事の取得
mod api;

pub use api::*;

use crate::model::*;
use crate::util::misc::Res;

pub trait NoteSource {
    // 記事一覧 (pageは1から)
    fn find_notes(&mut self, page: u32) -> Res<Notes>;
    // 記事の本文と本文中の牌譜から集計した対局情報
    fn find_note_by_key(&mut self, key: &str) -> Res<NoteDetail>;
}
