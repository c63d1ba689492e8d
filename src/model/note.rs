use super::*;

use time::OffsetDateTime;

// note記事の一覧情報
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: u64,
    pub key: String,
    pub name: String,
    pub publish_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notes {
    pub contents: Vec<Note>,
    pub is_last_page: bool,
    pub total_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteDetail {
    pub note: Note,
    pub body: String,
    pub game: Game,
}

impl Note {
    // 一覧APIの公開日時は分単位なので比較時は秒以下を切り捨てる
    pub fn is_same_publish(&self, other: &Note) -> bool {
        truncate_to_minute(self.publish_at) == truncate_to_minute(other.publish_at)
    }
}

pub fn truncate_to_minute(t: OffsetDateTime) -> OffsetDateTime {
    t.replace_second(0)
        .and_then(|t| t.replace_nanosecond(0))
        .unwrap_or(t)
}

#[test]
fn test_is_same_publish() {
    use time::macros::datetime;

    let a = Note {
        id: 1,
        key: "n1".into(),
        name: "a".into(),
        publish_at: datetime!(2023-10-02 20:15:42.5 +09:00),
    };
    let mut b = a.clone();
    b.publish_at = datetime!(2023-10-02 20:15 +09:00);
    assert!(a.is_same_publish(&b));
    b.publish_at = datetime!(2023-10-02 11:15 UTC);
    assert!(a.is_same_publish(&b));
    b.publish_at = datetime!(2023-10-02 20:16 +09:00);
    assert!(!a.is_same_publish(&b));
}
