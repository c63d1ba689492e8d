use crate::convert::decode_url;
use crate::model::*;
use crate::warn;

use super::aggregate::{result_points, winners};

// 牌譜URLを局情報に変換
// デコードに失敗した場合は失敗した局として扱い, 他の局の処理は継続する
pub fn decode_hand(url: &str) -> Hand {
    match decode_url(url) {
        Ok(h) => Hand::Decoded(h),
        Err(f) => {
            let reason = f.to_string();
            warn!(
                "failed to decode log url: {}, {}, {}",
                reason,
                url,
                f.decoded.as_deref().unwrap_or("undefined")
            );
            Hand::Failed(FailedHand {
                url: url.to_string(),
                decoded: f.decoded,
                reason,
            })
        }
    }
}

// 記事のタイトルと牌譜URLの一覧から対局の集計を生成
// 席の名前, 最終持ち点, トップは最後の局のみから算出する
pub fn assemble_game(title: &str, urls: &[String]) -> Game {
    let hands: Vec<Hand> = urls.iter().map(|u| decode_hand(u)).collect();
    let (names, points, first) = match hands.last() {
        Some(last) => (last.names().cloned(), result_points(last), winners(last)),
        None => (None, [None; SEAT], None),
    };
    Game {
        title: title.to_string(),
        hands,
        names,
        points,
        first,
    }
}

#[cfg(test)]
fn log_url(kyoku: i64, scores: [Score; SEAT], deltas: [Score; SEAT]) -> String {
    use crate::convert::tenhou::TenhouLog;
    use serde_json::json;

    let end = json!(["和了", deltas]);
    let mut record = vec![json!([kyoku, 0, 0]), json!(scores)];
    for _ in 0..14 {
        record.push(json!([]));
    }
    record.push(end);
    TenhouLog {
        log: vec![json!(record)],
        name: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        ..Default::default()
    }
    .to_viewer_url()
}

#[test]
fn test_assemble_empty() {
    let g = assemble_game("title", &[]);
    assert_eq!(g.title, "title");
    assert!(g.hands.is_empty());
    assert_eq!(g.names, None);
    assert_eq!(g.points, [None; SEAT]);
    assert_eq!(g.first, None);
    assert_eq!(g.first_joined(), None);
}

#[test]
fn test_assemble_game() {
    let urls = vec![
        log_url(0, [25000; SEAT], [8000, -8000, 0, 0]),
        log_url(7, [33000, 17000, 25000, 25000], [-2000, 0, 2000, 0]),
    ];
    let g = assemble_game("Mリーグ 第1試合", &urls);
    assert_eq!(g.hands.len(), 2);
    assert!(g.hands.iter().all(|h| h.is_decoded()));
    assert_eq!(g.names, Some(["A", "B", "C", "D"].map(String::from)));
    assert_eq!(
        g.points,
        [Some(31000), Some(17000), Some(27000), Some(25000)]
    );
    assert_eq!(g.first, Some(vec!["A".to_string()]));
}

#[test]
fn test_assemble_tie() {
    let urls = vec![log_url(3, [30000, 20000, 25000, 25000], [-1000, 0, 1000, 0])];
    let g = assemble_game("t", &urls);
    assert_eq!(g.first_joined().as_deref(), Some("A,C"));
}

#[test]
fn test_assemble_last_hand_failed() {
    use crate::util::log::capture::capture;

    let urls = vec![
        log_url(0, [25000; SEAT], [0; SEAT]),
        log_url(1, [25000; SEAT], [1000, -1000, 0, 0]),
        "https://tenhou.net/5/#json=%7Bbroken".to_string(),
    ];
    let (g, lines) = capture(|| assemble_game("t", &urls));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("https://tenhou.net/5/#json=%7Bbroken"));
    assert!(lines[0].ends_with("{broken"));

    assert_eq!(g.hands.len(), 3);
    assert!(g.hands[0].is_decoded());
    assert!(g.hands[1].is_decoded());
    assert!(!g.hands[2].is_decoded());
    assert_eq!(g.hands[2].url(), urls[2]);
    assert_eq!(g.names, None);
    assert_eq!(g.points, [None; SEAT]);
    assert_eq!(g.first, None);
}

#[test]
fn test_assemble_extreme_score() {
    let urls = vec![log_url(0, [Score::MAX, 25000, 25000, 25000], [1, 0, 0, -1])];
    let g = assemble_game("t", &urls);
    assert!(g.hands[0].is_decoded());
    assert_eq!(g.points, [None, Some(25000), Some(25000), Some(24999)]);
    assert_eq!(g.first, None);
}

#[test]
fn test_decode_hand_missing_fragment() {
    use crate::util::log::capture::capture;

    let (h, lines) = capture(|| decode_hand("https://tenhou.net/5/"));
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("undefined"));
    match h {
        Hand::Failed(f) => {
            assert_eq!(f.url, "https://tenhou.net/5/");
            assert_eq!(f.decoded, None);
        }
        h => panic!("unexpected hand: {:?}", h),
    }
}
