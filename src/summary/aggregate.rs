use crate::model::*;
use crate::util::misc::max_indices;

// 局終了時の持ち点 (開始時の持ち点 + 収支)
// デコードに失敗した局, 点数が表現できる範囲を超える局はNone
pub fn result_point(seat: Seat, hand: &Hand) -> Option<Score> {
    hand.start_point(seat)?.checked_add(hand.get_point(seat))
}

pub fn result_points(hand: &Hand) -> [Option<Score>; SEAT] {
    [0, 1, 2, 3].map(|s| result_point(s, hand))
}

// 持ち点が最大のプレイヤーの名前 (同点の場合は全員)
// 1人でも持ち点が不明な場合は判定しない
pub fn winners_of(names: &[String; SEAT], points: &[Option<Score>; SEAT]) -> Option<Vec<String>> {
    let mut ps = [0; SEAT];
    for s in 0..SEAT {
        ps[s] = points[s]?;
    }
    Some(
        max_indices(&ps)
            .into_iter()
            .map(|s| names[s].clone())
            .collect(),
    )
}

pub fn winners(hand: &Hand) -> Option<Vec<String>> {
    winners_of(hand.names()?, &result_points(hand))
}

#[cfg(test)]
fn test_hand(start_points: [Score; SEAT], get_points: [Score; SEAT]) -> Hand {
    Hand::Decoded(DecodedHand {
        url: "https://tenhou.net/5/#json=".into(),
        names: ["E", "S", "W", "N"].map(String::from),
        start_points,
        get_points,
        round: Round::South,
        hand: 4,
        homba: 0,
        riichi_stick: 0,
        end_of_a_hand: "和了".into(),
    })
}

#[cfg(test)]
fn failed_hand() -> Hand {
    Hand::Failed(FailedHand {
        url: "https://tenhou.net/5/#json=x".into(),
        decoded: Some("x".into()),
        reason: "invalid json".into(),
    })
}

#[test]
fn test_result_point() {
    let h = test_hand([25000, 25000, 25000, 25000], [-3000, 3000, 0, 0]);
    assert_eq!(result_point(0, &h), Some(22000));
    assert_eq!(result_point(1, &h), Some(28000));
    assert_eq!(result_point(2, &h), Some(25000));
    assert_eq!(result_points(&failed_hand()), [None; SEAT]);
}

#[test]
fn test_result_point_overflow() {
    let h = test_hand([Score::MAX, 25000, 25000, Score::MIN], [1, 0, 0, -1]);
    assert_eq!(result_point(0, &h), None);
    assert_eq!(result_point(1, &h), Some(25000));
    assert_eq!(result_point(3, &h), None);
    assert_eq!(winners(&h), None);

    let h = test_hand([Score::MAX, 25000, 25000, 25000], [0; SEAT]);
    assert_eq!(result_point(0, &h), Some(Score::MAX));
}

#[test]
fn test_winners() {
    let names = ["E", "S", "W", "N"].map(String::from);

    let h = test_hand([30000, 25000, 20000, 25000], [0; SEAT]);
    assert_eq!(winners(&h), Some(vec!["E".to_string()]));

    let h = test_hand([25000, 20000, 30000, 25000], [0, 5000, -5000, 0]);
    assert_eq!(winners(&h), Some(vec!["S".to_string(), "N".to_string()]));

    let h = test_hand([25000; SEAT], [0; SEAT]);
    assert_eq!(winners(&h), Some(names.to_vec()));

    // 0点でもトップになりうる
    let points = [Some(0), Some(-100), Some(0), Some(-5000)];
    assert_eq!(
        winners_of(&names, &points),
        Some(vec!["E".to_string(), "W".to_string()])
    );

    // 1人でも不明なら判定しない (空のリストではなくNone)
    let points = [Some(30000), None, Some(20000), Some(25000)];
    assert_eq!(winners_of(&names, &points), None);
    assert_eq!(winners(&failed_hand()), None);
}
