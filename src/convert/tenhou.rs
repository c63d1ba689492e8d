use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::*;

pub const VIEWER_FRAGMENT: &str = "#json="; // 天鳳牌譜ビューアのURLでJSONが始まる位置
pub const MAX_FRAGMENT_LEN: usize = 1 << 20;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("'{marker}' not found in url", marker = VIEWER_FRAGMENT)]
    MissingFragment,
    #[error("fragment too long: {0} bytes")]
    FragmentTooLong(usize),
    #[error("invalid percent escape at byte {0}")]
    Percent(usize),
    #[error("invalid utf-8 in fragment: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("field '{field}': {reason}")]
    Field { field: &'static str, reason: String },
    #[error(transparent)]
    Round(#[from] InvalidRoundNumber),
}

fn field_error(field: &'static str, reason: impl Into<String>) -> DecodeError {
    DecodeError::Field {
        field,
        reason: reason.into(),
    }
}

// デコード失敗時の情報 (ログ出力用にパーセントデコード後の文字列も保持)
#[derive(Debug)]
pub struct DecodeFailure {
    pub decoded: Option<String>,
    pub error: DecodeError,
}

impl std::fmt::Display for DecodeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

// [TenhouLog]
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TenhouLog {
    pub log: Vec<Value>,
    pub name: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<TenhouRule>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TenhouRule {
    pub disp: String,
    pub aka: usize,
}

// [TenhouKyoku]
// 局データ(log[n])のうち集計に必要な部分
#[derive(Debug, Default, PartialEq)]
pub struct TenhouKyoku {
    pub kyoku: RoundNumber,           // 局番号 (0~7)
    pub honba: u32,                   // 本場
    pub kyoutaku: u32,                // 供託
    pub scores: [Score; SEAT],        // 局開始時の持ち点
    pub result: String,               // 和了, 流局, 九種九牌など
    pub deltas: Option<[Score; SEAT]>, // 局の収支
}

// 局データの各位置の名前
// 配牌, ツモ, 捨て牌は東南西北の順で3つずつ並ぶ
const KYOKU_FIELDS: [&str; 17] = [
    "kyoku",
    "scores",
    "doras",
    "ura_doras",
    "east_haipai",
    "east_tsumo",
    "east_sutepai",
    "south_haipai",
    "south_tsumo",
    "south_sutepai",
    "west_haipai",
    "west_tsumo",
    "west_sutepai",
    "north_haipai",
    "north_tsumo",
    "north_sutepai",
    "end",
];
const KYOKU: usize = 0;
const SCORES: usize = 1;
const END: usize = 16;

fn get<'a>(arr: &'a [Value], i: usize) -> Result<&'a Value, DecodeError> {
    arr.get(i)
        .ok_or_else(|| field_error(KYOKU_FIELDS[i], format!("missing (index {})", i)))
}

fn ints<const N: usize>(field: &'static str, v: &Value) -> Result<[i64; N], DecodeError> {
    let arr = v
        .as_array()
        .ok_or_else(|| field_error(field, format!("expected array, got {}", v)))?;
    if arr.len() < N {
        return Err(field_error(
            field,
            format!("expected {} elements, got {}", N, arr.len()),
        ));
    }
    let mut res = [0; N];
    for i in 0..N {
        res[i] = arr[i]
            .as_i64()
            .ok_or_else(|| field_error(field, format!("expected integer, got {}", arr[i])))?;
    }
    Ok(res)
}

fn to_scores(field: &'static str, ns: [i64; SEAT]) -> Result<[Score; SEAT], DecodeError> {
    let mut res = [0; SEAT];
    for s in 0..SEAT {
        res[s] = Score::try_from(ns[s])
            .map_err(|_| field_error(field, format!("score out of range: {}", ns[s])))?;
    }
    Ok(res)
}

fn to_count(field: &'static str, n: i64) -> Result<u32, DecodeError> {
    u32::try_from(n).map_err(|_| field_error(field, format!("invalid count: {}", n)))
}

impl TenhouKyoku {
    // 位置ごとに形を確認しながら読み込む
    // 失敗した場合は最初に一致しなかった位置の名前をエラーとして返す
    pub fn from_log(v: &Value) -> Result<Self, DecodeError> {
        let arr = v
            .as_array()
            .ok_or_else(|| field_error("log", "hand record is not an array"))?;

        let [kyoku, honba, kyoutaku] = ints::<3>(KYOKU_FIELDS[KYOKU], get(arr, KYOKU)?)?;
        let scores = ints::<SEAT>(KYOKU_FIELDS[SCORES], get(arr, SCORES)?)?;
        for i in SCORES + 1..END {
            // ドラ, 裏ドラ, 各プレイヤーの牌の情報は使用しない
            if !get(arr, i)?.is_array() {
                return Err(field_error(KYOKU_FIELDS[i], "expected array"));
            }
        }

        let field = KYOKU_FIELDS[END];
        let end = get(arr, END)?
            .as_array()
            .ok_or_else(|| field_error(field, "expected array"))?;
        let result = end
            .first()
            .and_then(|r| r.as_str())
            .ok_or_else(|| field_error(field, "missing result"))?;
        let deltas = match end.get(1) {
            Some(d) => Some(to_scores(field, ints::<SEAT>(field, d)?)?),
            None => None,
        };

        Ok(Self {
            kyoku,
            honba: to_count(KYOKU_FIELDS[KYOKU], honba)?,
            kyoutaku: to_count(KYOKU_FIELDS[KYOKU], kyoutaku)?,
            scores: to_scores(KYOKU_FIELDS[SCORES], scores)?,
            result: result.to_string(),
            deltas,
        })
    }

    #[cfg(test)]
    fn to_log(&self) -> Value {
        use serde_json::json;

        let mut v = vec![
            json!([self.kyoku, self.honba, self.kyoutaku]),
            json!(self.scores),
            json!([]),
            json!([]),
        ];
        for _ in 0..SEAT {
            v.push(json!([]));
            v.push(json!([]));
            v.push(json!([]));
        }
        let mut result = vec![json!(self.result)];
        if let Some(d) = &self.deltas {
            result.push(json!(d));
        }
        v.push(json!(result));
        json!(v)
    }
}

impl TenhouLog {
    // 1局目の情報から集計用の局データを生成
    pub fn to_hand(&self, url: &str) -> Result<DecodedHand, DecodeError> {
        let names: [String; SEAT] = self.name.clone().try_into().map_err(|v: Vec<String>| {
            field_error("name", format!("expected {} names, got {}", SEAT, v.len()))
        })?;
        let first = self
            .log
            .first()
            .ok_or_else(|| field_error("log", "no hand record"))?;
        let k = TenhouKyoku::from_log(first)?;

        Ok(DecodedHand {
            url: url.to_string(),
            names,
            start_points: k.scores,
            get_points: k.deltas.unwrap_or([0; SEAT]),
            round: round_of(k.kyoku)?,
            hand: hand_of(k.kyoku)?,
            homba: k.honba,
            riichi_stick: k.kyoutaku,
            end_of_a_hand: k.result,
        })
    }

    #[cfg(test)]
    pub fn to_viewer_url(&self) -> String {
        use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

        let json = serde_json::to_string(self).unwrap();
        format!(
            "https://tenhou.net/5/{}{}",
            VIEWER_FRAGMENT,
            utf8_percent_encode(&json, NON_ALPHANUMERIC)
        )
    }
}

// URLのフラグメントからJSON文字列を取り出す
pub fn decode_fragment(url: &str) -> Result<String, DecodeError> {
    let fragment = url
        .split(VIEWER_FRAGMENT)
        .nth(1)
        .ok_or(DecodeError::MissingFragment)?;
    if fragment.len() > MAX_FRAGMENT_LEN {
        return Err(DecodeError::FragmentTooLong(fragment.len()));
    }
    check_percent_escapes(fragment)?;
    Ok(percent_decode_str(fragment).decode_utf8()?.into_owned())
}

// '%'の後には16進数2桁が続く必要がある
fn check_percent_escapes(s: &str) -> Result<(), DecodeError> {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'%' {
            continue;
        }
        let is_hex = |j: usize| bytes.get(j).is_some_and(|c| c.is_ascii_hexdigit());
        if !is_hex(i + 1) || !is_hex(i + 2) {
            return Err(DecodeError::Percent(i));
        }
    }
    Ok(())
}

pub fn parse_log(text: &str, url: &str) -> Result<DecodedHand, DecodeError> {
    let log: TenhouLog = serde_json::from_str(text)?;
    log.to_hand(url)
}

pub fn decode_url(url: &str) -> Result<DecodedHand, DecodeFailure> {
    let decoded = decode_fragment(url).map_err(|error| DecodeFailure {
        decoded: None,
        error,
    })?;
    parse_log(&decoded, url).map_err(|error| DecodeFailure {
        decoded: Some(decoded),
        error,
    })
}

#[cfg(test)]
fn sample_log(kyoku: TenhouKyoku) -> TenhouLog {
    TenhouLog {
        log: vec![kyoku.to_log()],
        name: vec!["園田".into(), "多井".into(), "瑞原".into(), "堀".into()],
        title: None,
        rule: Some(TenhouRule {
            disp: "Mリーグ".into(),
            aka: 1,
        }),
    }
}

#[cfg(test)]
fn sample_kyoku() -> TenhouKyoku {
    TenhouKyoku {
        kyoku: 5,
        honba: 2,
        kyoutaku: 1,
        scores: [31000, 22000, 18000, 28000],
        result: "和了".into(),
        deltas: Some([-3900, 5200, 0, -1300]),
    }
}

#[test]
fn test_decode_url() {
    let log = sample_log(sample_kyoku());
    let url = log.to_viewer_url();
    let h = decode_url(&url).unwrap();
    assert_eq!(h.url, url);
    assert_eq!(h.names, ["園田", "多井", "瑞原", "堀"].map(String::from));
    assert_eq!(h.start_points, [31000, 22000, 18000, 28000]);
    assert_eq!(h.get_points, [-3900, 5200, 0, -1300]);
    assert_eq!(h.round, Round::South);
    assert_eq!(h.hand, 2);
    assert_eq!(h.homba, 2);
    assert_eq!(h.riichi_stick, 1);
    assert_eq!(h.end_of_a_hand, "和了");
}

#[test]
fn test_decode_url_without_deltas() {
    let mut k = sample_kyoku();
    k.kyoku = 0;
    k.result = "九種九牌".into();
    k.deltas = None;
    let h = decode_url(&sample_log(k).to_viewer_url()).unwrap();
    assert_eq!(h.get_points, [0, 0, 0, 0]);
    assert_eq!(h.round, Round::East);
    assert_eq!(h.hand, 1);
    assert_eq!(h.end_of_a_hand, "九種九牌");
}

#[test]
fn test_decode_raw_fragment() {
    // 実際の牌譜URLと同じく一部の記号はエンコードされていない
    let url = r#"https://tenhou.net/5/#json={%22title%22:[%22%22,%22%22],%22name%22:[%22A%22,%22B%22,%22C%22,%22D%22],%22rule%22:{%22disp%22:%22%E8%B5%A4%22,%22aka%22:1},%22log%22:[[[3,0,0],[25000,25000,25000,25000],[21],[],[11],[],[],[12],[],[],[13],[],[],[14],[],[],[%22%E6%B5%81%E5%B1%80%22,[1500,-1500,1500,-1500]]]]}"#;
    let h = decode_url(url).unwrap();
    assert_eq!(h.names, ["A", "B", "C", "D"].map(String::from));
    assert_eq!(h.round, Round::East);
    assert_eq!(h.hand, 4);
    assert_eq!(h.end_of_a_hand, "流局");
    assert_eq!(h.get_points, [1500, -1500, 1500, -1500]);
}

#[test]
fn test_decode_missing_fragment() {
    let f = decode_url("https://tenhou.net/5/").unwrap_err();
    assert!(matches!(f.error, DecodeError::MissingFragment));
    assert_eq!(f.decoded, None);
}

#[test]
fn test_decode_not_json() {
    let f = decode_url("https://tenhou.net/5/#json=hello%20world").unwrap_err();
    assert!(matches!(f.error, DecodeError::Json(_)));
    assert_eq!(f.decoded.as_deref(), Some("hello world"));
}

#[test]
fn test_decode_invalid_percent_escape() {
    let url = "https://tenhou.net/5/#json={%22name%22:[%22A%ZZ%22,%22B%22,%22C%22,%22D%22],%22log%22:[]}";
    let f = decode_url(url).unwrap_err();
    assert!(matches!(f.error, DecodeError::Percent(17)));
    assert_eq!(f.decoded, None);

    for fragment in ["abc%", "abc%4", "%g0", "%%41"] {
        let url = format!("https://tenhou.net/5/#json={}", fragment);
        let f = decode_url(&url).unwrap_err();
        assert!(matches!(f.error, DecodeError::Percent(_)), "{}", fragment);
    }

    // 大文字小文字どちらの16進数も使える
    assert_eq!(decode_fragment("x#json=%7b%7D").unwrap(), "{}");
}

#[test]
fn test_decode_too_long() {
    let url = format!("https://tenhou.net/5/#json={}", "a".repeat(MAX_FRAGMENT_LEN + 1));
    let f = decode_url(&url).unwrap_err();
    assert!(matches!(f.error, DecodeError::FragmentTooLong(_)));
}

#[test]
fn test_decode_invalid_round_number() {
    let mut k = sample_kyoku();
    k.kyoku = 8;
    let f = decode_url(&sample_log(k).to_viewer_url()).unwrap_err();
    assert!(matches!(f.error, DecodeError::Round(InvalidRoundNumber(8))));
}

#[test]
fn test_decode_short_record() {
    // 終了情報が欠けている局データ
    let mut log = sample_log(sample_kyoku());
    let mut v = log.log[0].as_array().unwrap().clone();
    v.truncate(END);
    log.log[0] = Value::Array(v);
    let f = decode_url(&log.to_viewer_url()).unwrap_err();
    match f.error {
        DecodeError::Field { field, .. } => assert_eq!(field, "end"),
        e => panic!("unexpected error: {}", e),
    }
}

#[test]
fn test_decode_field_errors() {
    let cases = [
        (r#"{"name":["A","B","C"],"log":[]}"#, "name"),
        (r#"{"name":["A","B","C","D"],"log":[]}"#, "log"),
        (r#"{"name":["A","B","C","D"],"log":[[[0,0]]]}"#, "kyoku"),
        (r#"{"name":["A","B","C","D"],"log":[[[0,0,0],[1,2,3,"x"]]]}"#, "scores"),
        (r#"{"name":["A","B","C","D"],"log":[[[0,-1,0],[1,2,3,4],[],[],[],[],[],[],[],[],[],[],[],[],[],[],["和了"]]]}"#, "kyoku"),
        (r#"{"name":["A","B","C","D"],"log":[[[0,0,0],[1,2,3,4],[],[],[],[],[],[],[],[],[],[],[],[],[],[],[]]]}"#, "end"),
    ];
    for (text, expected) in cases {
        match parse_log(text, "u") {
            Err(DecodeError::Field { field, .. }) => assert_eq!(field, expected, "{}", text),
            r => panic!("unexpected result for {}: {:?}", text, r),
        }
    }
    assert!(matches!(
        parse_log(r#"{"log":[]}"#, "u"),
        Err(DecodeError::Json(_))
    ));
}
