use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, offset};
use time::{OffsetDateTime, PrimitiveDateTime};

use super::NoteSource;
use crate::convert::extract_log_urls;
use crate::model::*;
use crate::summary::assemble_game;
use crate::util::misc::Res;
use crate::{debug, info};

// [API response]
#[derive(Debug, Deserialize)]
struct Response<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentsData {
    contents: Vec<Content>,
    is_last_page: bool,
    total_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    id: u64,
    key: String,
    name: String,
    publish_at: String,
}

#[derive(Debug, Deserialize)]
struct NoteData {
    id: u64,
    name: String,
    publish_at: String,
    #[serde(default)]
    body: Option<String>,
}

// 一覧APIの公開日時はオフセットなしの日本時間
pub fn parse_publish_at(s: &str) -> Res<OffsetDateTime> {
    if let Ok(t) = OffsetDateTime::parse(s, &Rfc3339) {
        return Ok(t);
    }
    let formats: [&[BorrowedFormatItem<'_>]; 4] = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]"),
    ];
    for f in formats {
        if let Ok(t) = PrimitiveDateTime::parse(s, f) {
            return Ok(t.assume_offset(offset!(+9)));
        }
    }
    Err(format!("invalid publish time: '{}'", s).into())
}

// [NoteApi]
#[derive(Debug)]
pub struct NoteApi {
    base_url: String,
    creator: String,
    client: reqwest::blocking::Client,
}

impl NoteApi {
    pub fn new(base_url: &str, creator: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            creator: creator.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn get(&self, url: &str) -> Res<String> {
        debug!("GET {}", url);
        let res = self.client.get(url).send()?;
        let status = res.status();
        let text = res.text()?;
        if !status.is_success() {
            Err(format!("{} {}: {}", status, url, text))?;
        }
        Ok(text)
    }
}

impl NoteSource for NoteApi {
    fn find_notes(&mut self, page: u32) -> Res<Notes> {
        let url = format!(
            "{}/v2/creators/{}/contents?kind=note&page={}",
            self.base_url, self.creator, page
        );
        let text = self.get(&url)?;
        parse_notes(&text)
    }

    fn find_note_by_key(&mut self, key: &str) -> Res<NoteDetail> {
        let url = format!("{}/v1/notes/{}", self.base_url, key);
        let text = self.get(&url)?;
        parse_note_detail(key, &text)
    }
}

pub fn parse_notes(text: &str) -> Res<Notes> {
    let res: Response<ContentsData> = serde_json::from_str(text)?;
    let mut contents = vec![];
    for c in res.data.contents {
        contents.push(Note {
            id: c.id,
            key: c.key,
            name: c.name,
            publish_at: parse_publish_at(&c.publish_at)?,
        });
    }
    Ok(Notes {
        contents,
        is_last_page: res.data.is_last_page,
        total_count: res.data.total_count,
    })
}

pub fn parse_note_detail(key: &str, text: &str) -> Res<NoteDetail> {
    let res: Response<NoteData> = serde_json::from_str(text)?;
    let d = res.data;
    let body = d.body.unwrap_or_default();
    let urls = extract_log_urls(&body);
    info!("note {}: {} log urls", key, urls.len());
    let game = assemble_game(&d.name, &urls);
    Ok(NoteDetail {
        note: Note {
            id: d.id,
            key: key.to_string(),
            name: d.name,
            publish_at: parse_publish_at(&d.publish_at)?,
        },
        body,
        game,
    })
}

#[test]
fn test_parse_publish_at() {
    use time::macros::datetime;

    let t = datetime!(2023-10-02 20:15 +09:00);
    assert_eq!(parse_publish_at("2023-10-02T20:15:00+09:00").unwrap(), t);
    assert_eq!(parse_publish_at("2023-10-02T11:15:00Z").unwrap(), t);
    assert_eq!(parse_publish_at("2023-10-02T20:15:00").unwrap(), t);
    assert_eq!(parse_publish_at("2023-10-02 20:15").unwrap(), t);
    assert!(parse_publish_at("yesterday").is_err());
}

#[test]
fn test_parse_notes() {
    let text = r#"{"data":{"contents":[
        {"id":101,"key":"n0001","name":"Mリーグ 10/2 第1試合","publishAt":"2023-10-02T23:10:00","likeCount":3},
        {"id":102,"key":"n0002","name":"雑記","publishAt":"2023-10-03T08:00:00"}
    ],"isLastPage":false,"totalCount":25}}"#;
    let notes = parse_notes(text).unwrap();
    assert_eq!(notes.contents.len(), 2);
    assert_eq!(notes.contents[0].key, "n0001");
    assert_eq!(notes.contents[1].id, 102);
    assert!(!notes.is_last_page);
    assert_eq!(notes.total_count, 25);
}

#[test]
fn test_parse_note_detail() {
    let text = r#"{"data":{"id":101,"name":"Mリーグ","publish_at":"2023-10-02T23:10:00+09:00","body":"<a href=\"https://tenhou.net/5/#json=%7B%7D\">x</a>"}}"#;
    let d = parse_note_detail("n0001", text).unwrap();
    assert_eq!(d.note.key, "n0001");
    assert_eq!(d.game.title, "Mリーグ");
    assert_eq!(d.game.hands.len(), 1);
    assert!(!d.game.hands[0].is_decoded());

    let text = r#"{"data":{"id":1,"name":"x","publish_at":"2023-10-02T23:10:00+09:00","body":null}}"#;
    let d = parse_note_detail("n1", text).unwrap();
    assert_eq!(d.body, "");
    assert!(d.game.hands.is_empty());
}
