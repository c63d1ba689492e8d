use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use super::*;

// [CsvSheet]
// シートごとに1つのCSVファイル (<dir>/<sheet>.csv) に追記する
#[derive(Debug)]
pub struct CsvSheet {
    dir: PathBuf,
}

impl CsvSheet {
    pub fn new(dir: impl AsRef<Path>) -> Res<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self, sheet: Sheet) -> PathBuf {
        self.dir.join(format!("{}.csv", sheet.name()))
    }
}

impl SheetStore for CsvSheet {
    fn get_notes(&mut self) -> Res<Vec<Note>> {
        let path = self.path(Sheet::Notes);
        if !path.exists() {
            return Ok(vec![]);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)?;
        let mut notes = vec![];
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let field = |n: usize| record.get(n).unwrap_or("");
            let ms: i64 = field(3).parse()?;
            notes.push(Note {
                key: field(0).to_string(),
                id: field(1).parse()?,
                name: field(2).to_string(),
                publish_at: from_unix_ms(ms)
                    .ok_or_else(|| format!("{:?} row {}: invalid publishAt {}", path, i + 1, ms))?,
            });
        }
        Ok(notes)
    }

    fn append_row(&mut self, sheet: Sheet, row: Vec<String>) -> Res {
        let path = self.path(sheet);
        let is_new = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::Writer::from_writer(file);
        if is_new {
            writer.write_record(sheet.header())?;
        }
        writer.write_record(&row)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mleague_note_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_csv_sheet() {
    use time::macros::datetime;

    let dir = scratch_dir("csv_sheet");
    let mut sheet = CsvSheet::new(&dir).unwrap();
    assert!(sheet.get_notes().unwrap().is_empty());

    let detail = NoteDetail {
        note: Note {
            id: 7,
            key: "n7".into(),
            name: "Mリーグ, 第1試合".into(),
            publish_at: datetime!(2023-10-02 20:15 +09:00),
        },
        body: "line1\n\"quoted\"".into(),
        game: Game {
            title: "Mリーグ, 第1試合".into(),
            hands: vec![],
            names: None,
            points: [None; SEAT],
            first: None,
        },
    };
    sheet.append_note(&detail, "Mリーグ").unwrap();
    sheet.append_note(&detail, "該当なし").unwrap();

    let notes = sheet.get_notes().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0], detail.note);

    let games = std::fs::read_to_string(sheet.path(Sheet::Games)).unwrap();
    assert_eq!(games.lines().count(), 2); // header + 1
    assert!(!sheet.path(Sheet::Logs).exists());

    std::fs::remove_dir_all(&dir).ok();
}
