use time::OffsetDateTime;

use crate::model::*;

pub const NOTE_HEADER: [&str; 5] = ["key", "id", "name", "publishAt", "body"];
pub const HAND_HEADER: [&str; 19] = [
    "title",
    "url",
    "round",
    "hand",
    "homba",
    "riichiStick",
    "eastName",
    "southName",
    "westName",
    "northName",
    "eastStartPoint",
    "southStartPoint",
    "westStartPoint",
    "northStartPoint",
    "eastGetPoint",
    "southGetPoint",
    "westGetPoint",
    "northGetPoint",
    "endOfAHand",
];
pub const GAME_HEADER: [&str; 10] = [
    "title",
    "eastName",
    "southName",
    "westName",
    "northName",
    "eastPoint",
    "southPoint",
    "westPoint",
    "northPoint",
    "first",
];

pub fn to_unix_ms(t: OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn from_unix_ms(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(ms as i128 * 1_000_000).ok()
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

pub fn note_row(d: &NoteDetail) -> Vec<String> {
    vec![
        d.note.key.clone(),
        d.note.id.to_string(),
        d.note.name.clone(),
        to_unix_ms(d.note.publish_at).to_string(),
        d.body.clone(),
    ]
}

// デコードに失敗した局はタイトルとURL以外を空欄にする
pub fn hand_row(title: &str, hand: &Hand) -> Vec<String> {
    let mut row = vec![title.to_string(), hand.url().to_string()];
    match hand {
        Hand::Decoded(h) => {
            row.push(h.round.to_string());
            row.push(h.hand.to_string());
            row.push(h.homba.to_string());
            row.push(h.riichi_stick.to_string());
            row.extend(h.names.iter().cloned());
            row.extend(h.start_points.iter().map(|p| p.to_string()));
            row.extend(h.get_points.iter().map(|p| p.to_string()));
            row.push(h.end_of_a_hand.clone());
        }
        Hand::Failed(_) => row.resize(HAND_HEADER.len(), String::new()),
    }
    row
}

pub fn game_row(g: &Game) -> Vec<String> {
    let mut row = vec![g.title.clone()];
    match &g.names {
        Some(names) => row.extend(names.iter().cloned()),
        None => row.extend([0; SEAT].map(|_| String::new())),
    }
    row.extend(g.points.iter().map(|&p| opt(p)));
    row.push(opt(g.first_joined()));
    row
}

#[cfg(test)]
fn decoded() -> Hand {
    Hand::Decoded(DecodedHand {
        url: "u1".into(),
        names: ["A", "B", "C", "D"].map(String::from),
        start_points: [25000, 25000, 25000, 25000],
        get_points: [-1000, 3000, -1000, -1000],
        round: Round::East,
        hand: 3,
        homba: 1,
        riichi_stick: 2,
        end_of_a_hand: "和了".into(),
    })
}

#[test]
fn test_hand_row() {
    let row = hand_row("t", &decoded());
    assert_eq!(row.len(), HAND_HEADER.len());
    assert_eq!(
        row,
        [
            "t", "u1", "東", "3", "1", "2", "A", "B", "C", "D", "25000", "25000", "25000",
            "25000", "-1000", "3000", "-1000", "-1000", "和了",
        ]
    );

    let failed = Hand::Failed(FailedHand {
        url: "u2".into(),
        decoded: None,
        reason: "x".into(),
    });
    let row = hand_row("t", &failed);
    assert_eq!(row.len(), HAND_HEADER.len());
    assert_eq!(&row[..2], ["t", "u2"]);
    assert!(row[2..].iter().all(|c| c.is_empty()));
}

#[test]
fn test_game_row() {
    let g = Game {
        title: "t".into(),
        hands: vec![decoded()],
        names: Some(["A", "B", "C", "D"].map(String::from)),
        points: [Some(24000), Some(28000), Some(28000), Some(20000)],
        first: Some(vec!["B".into(), "C".into()]),
    };
    let row = game_row(&g);
    assert_eq!(row.len(), GAME_HEADER.len());
    assert_eq!(
        row,
        ["t", "A", "B", "C", "D", "24000", "28000", "28000", "20000", "B,C"]
    );

    let g = Game {
        title: "t".into(),
        hands: vec![],
        names: None,
        points: [None; SEAT],
        first: None,
    };
    let row = game_row(&g);
    assert_eq!(row.len(), GAME_HEADER.len());
    assert!(row[1..].iter().all(|c| c.is_empty()));
}

#[test]
fn test_unix_ms() {
    use time::macros::datetime;

    let t = datetime!(2023-10-02 20:15 +09:00);
    let ms = to_unix_ms(t);
    assert_eq!(ms, 1696245300000);
    assert_eq!(from_unix_ms(ms), Some(t));
}
