use crate::note::{NoteApi, NoteSource};
use crate::sheet::{CsvSheet, SheetStore};
use crate::util::misc::*;
use crate::{error, info};

// [App]
#[derive(Debug)]
pub struct SyncApp {
    base_url: String,
    creator: String,
    keyword: String,
    out_dir: String,
    page: u32,
}

impl SyncApp {
    pub fn new(args: Vec<String>) -> Self {
        use std::process::exit;

        let mut app = Self {
            base_url: std::env::var(super::BASE_URL_ENV).unwrap_or_default(),
            creator: super::CREATOR.to_string(),
            keyword: super::KEYWORD.to_string(),
            out_dir: super::OUT_DIR.to_string(),
            page: 1,
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-b" => app.base_url = next_value(&mut it, s),
                "-c" => app.creator = next_value(&mut it, s),
                "-k" => app.keyword = next_value(&mut it, s),
                "-o" => app.out_dir = next_value(&mut it, s),
                "-p" => app.page = next_value(&mut it, s),
                opt => {
                    error!("unknown option: {}", opt);
                    exit(0);
                }
            }
        }

        if app.base_url.is_empty() {
            error!("api base url(-b or ${}) not specified", super::BASE_URL_ENV);
            exit(0);
        }
        if app.page == 0 {
            error!("page(-p) starts from 1");
            exit(0);
        }

        app
    }

    pub fn run(&mut self) {
        let mut source = NoteApi::new(&self.base_url, &self.creator);
        let mut store = CsvSheet::new(&self.out_dir).unwrap_or_else(error_exit);
        let stats = sync_notes(&mut source, &mut store, &self.keyword, self.page)
            .unwrap_or_else(error_exit);
        println!(
            "pages: {}, appended: {}, skipped: {}",
            stats.pages, stats.appended, stats.skipped
        );
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub pages: u32,
    pub appended: usize,
    pub skipped: usize,
}

// 記事一覧を最後のページまで順に取得し, 未保存の記事を追加する
// 同じkeyで公開日時(分単位)も同じ記事が保存済みならスキップ
pub fn sync_notes(
    source: &mut dyn NoteSource,
    store: &mut dyn SheetStore,
    keyword: &str,
    first_page: u32,
) -> Res<SyncStats> {
    let saved = store.get_notes()?;
    let mut stats = SyncStats::default();
    let mut page = first_page;
    loop {
        let notes = source.find_notes(page)?;
        stats.pages += 1;
        info!(
            "page {}: {} notes (total {})",
            page,
            notes.contents.len(),
            notes.total_count
        );

        for note in &notes.contents {
            if saved
                .iter()
                .any(|n| n.key == note.key && n.is_same_publish(note))
            {
                stats.skipped += 1;
                continue;
            }
            let detail = source.find_note_by_key(&note.key)?;
            store.append_note(&detail, keyword)?;
            info!("appended: {} {}", note.key, note.name);
            stats.appended += 1;
        }

        if notes.is_last_page {
            break;
        }
        page += 1;
    }
    Ok(stats)
}

#[cfg(test)]
mod fake {
    use std::collections::HashMap;

    use crate::model::*;
    use crate::note::NoteSource;
    use crate::sheet::{Sheet, SheetStore};
    use crate::summary::assemble_game;
    use crate::util::misc::Res;

    pub struct FakeSource {
        pub pages: Vec<Notes>,
        pub bodies: HashMap<String, Vec<String>>, // key -> 牌譜URL
        pub requested: Vec<String>,
    }

    impl NoteSource for FakeSource {
        fn find_notes(&mut self, page: u32) -> Res<Notes> {
            let notes = self
                .pages
                .get(page as usize - 1)
                .ok_or_else(|| format!("no page {}", page))?;
            Ok(notes.clone())
        }

        fn find_note_by_key(&mut self, key: &str) -> Res<NoteDetail> {
            self.requested.push(key.to_string());
            let note = self
                .pages
                .iter()
                .flat_map(|p| p.contents.iter())
                .find(|n| n.key == key)
                .ok_or_else(|| format!("no note {}", key))?
                .clone();
            let urls = self.bodies.get(key).cloned().unwrap_or_default();
            let game = assemble_game(&note.name, &urls);
            Ok(NoteDetail {
                note,
                body: String::new(),
                game,
            })
        }
    }

    #[derive(Default)]
    pub struct FakeStore {
        pub notes: Vec<Note>,
        pub rows: Vec<(Sheet, Vec<String>)>,
    }

    impl SheetStore for FakeStore {
        fn get_notes(&mut self) -> Res<Vec<Note>> {
            Ok(self.notes.clone())
        }

        fn append_row(&mut self, sheet: Sheet, row: Vec<String>) -> Res {
            self.rows.push((sheet, row));
            Ok(())
        }
    }
}

#[cfg(test)]
fn note(key: &str, name: &str, minute: u8) -> crate::model::Note {
    use time::macros::datetime;

    crate::model::Note {
        id: key.len() as u64,
        key: key.to_string(),
        name: name.to_string(),
        publish_at: datetime!(2023-10-02 20:00 +09:00)
            .replace_minute(minute)
            .unwrap(),
    }
}

#[test]
fn test_sync_notes() {
    use std::collections::HashMap;

    use crate::model::*;
    use crate::sheet::Sheet;
    use fake::*;

    let pages = vec![
        Notes {
            contents: vec![note("n1", "Mリーグ 第1試合", 0), note("n2", "雑記", 5)],
            is_last_page: false,
            total_count: 3,
        },
        Notes {
            contents: vec![note("n3", "Mリーグ 第2試合", 10)],
            is_last_page: true,
            total_count: 3,
        },
    ];
    let mut bodies = HashMap::new();
    bodies.insert(
        "n3".to_string(),
        vec![
            "https://tenhou.net/5/#json=broken".to_string(),
            "https://tenhou.net/5/#json=broken2".to_string(),
        ],
    );
    let mut source = FakeSource {
        pages,
        bodies,
        requested: vec![],
    };

    // n1は保存済み (秒の違いは無視), n2は公開日時が更新されている
    let mut saved_n1 = note("n1", "Mリーグ 第1試合", 0);
    saved_n1.publish_at = saved_n1.publish_at.replace_second(30).unwrap();
    let mut store = FakeStore {
        notes: vec![saved_n1, note("n2", "雑記", 4)],
        rows: vec![],
    };

    let stats = sync_notes(&mut source, &mut store, "Mリーグ", 1).unwrap();
    assert_eq!(
        stats,
        SyncStats {
            pages: 2,
            appended: 2,
            skipped: 1,
        }
    );
    assert_eq!(source.requested, vec!["n2", "n3"]);

    let sheets: Vec<Sheet> = store.rows.iter().map(|(s, _)| *s).collect();
    assert_eq!(
        sheets,
        vec![Sheet::Notes, Sheet::Notes, Sheet::Logs, Sheet::Logs, Sheet::Games]
    );
    let (_, game_row) = store.rows.last().unwrap();
    assert_eq!(game_row[0], "Mリーグ 第2試合");
    assert!(game_row[1..].iter().all(|c| c.is_empty()));
}

#[test]
fn test_sync_notes_error() {
    use crate::model::*;
    use fake::*;

    let mut source = FakeSource {
        pages: vec![Notes {
            contents: vec![],
            is_last_page: false,
            total_count: 0,
        }],
        bodies: Default::default(),
        requested: vec![],
    };
    let mut store = FakeStore::default();
    assert!(sync_notes(&mut source, &mut store, "Mリーグ", 1).is_err());
    assert!(store.rows.is_empty());
}
