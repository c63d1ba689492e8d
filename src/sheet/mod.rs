// 表形式の保存先 (記事一覧, 局ごとの記録, 対局ごとの集計)
mod csv_sheet;
mod row;

pub use csv_sheet::*;
pub use row::*;

use crate::model::*;
use crate::util::misc::Res;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sheet {
    Notes,
    Logs,
    Games,
}

impl Sheet {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Notes => "notes",
            Self::Logs => "logs",
            Self::Games => "games",
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            Self::Notes => &NOTE_HEADER,
            Self::Logs => &HAND_HEADER,
            Self::Games => &GAME_HEADER,
        }
    }
}

pub trait SheetStore {
    // 保存済みの記事一覧
    fn get_notes(&mut self) -> Res<Vec<Note>>;
    fn append_row(&mut self, sheet: Sheet, row: Vec<String>) -> Res;

    // 記事を追加
    // タイトルにkeywordを含む記事のみ局ごとの記録と対局の集計も追加する
    fn append_note(&mut self, detail: &NoteDetail, keyword: &str) -> Res {
        self.append_row(Sheet::Notes, note_row(detail))?;
        if !detail.note.name.contains(keyword) {
            return Ok(());
        }
        for h in &detail.game.hands {
            self.append_row(Sheet::Logs, hand_row(&detail.note.name, h))?;
        }
        self.append_row(Sheet::Games, game_row(&detail.game))
    }
}
