use std::path::Path;

use crate::convert::extract_log_urls;
use crate::error;
use crate::summary::{assemble_game, decode_hand};
use crate::util::misc::*;

// [App]
// 牌譜URL1つ, または保存済みの記事本文を読み込んで集計結果をJSONで出力
#[derive(Debug)]
pub struct DecodeApp {
    url: String,
    file_path: String,
    title: String,
}

impl DecodeApp {
    pub fn new(args: Vec<String>) -> Self {
        use std::process::exit;

        let mut app = Self {
            url: String::new(),
            file_path: String::new(),
            title: String::new(),
        };

        let mut it = args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-u" => app.url = next_value(&mut it, s),
                "-f" => app.file_path = next_value(&mut it, s),
                "-t" => app.title = next_value(&mut it, s),
                opt => {
                    error!("unknown option: {}", opt);
                    exit(0);
                }
            }
        }

        if app.url.is_empty() == app.file_path.is_empty() {
            print_usage();
            exit(0);
        }

        app
    }

    pub fn run(&mut self) {
        let json = if !self.url.is_empty() {
            let hand = decode_hand(&self.url);
            println!("{}", hand);
            serde_json::to_string_pretty(&hand)
        } else {
            let body = std::fs::read_to_string(&self.file_path).unwrap_or_else(error_exit);
            let title = if self.title.is_empty() {
                Path::new(&self.file_path)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            } else {
                self.title.clone()
            };
            let urls = extract_log_urls(&body);
            let game = assemble_game(&title, &urls);
            for (i, h) in game.hands.iter().enumerate() {
                println!("[{:2}] {}", i, h);
            }
            let n_decoded = game.hands.iter().filter(|h| h.is_decoded()).count();
            println!("decoded: {}/{}", n_decoded, game.hands.len());
            serde_json::to_string_pretty(&game)
        };
        println!("{}", json.unwrap_or_else(error_exit));
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ cargo run D -u URL
    $ cargo run D -f FILE [-t TITLE]
Options
    -u: decode a single tenhou log url
    -f: read a note body (html) from file and summarize all log urls in it
    -t: game title for -f (default: file name)
"
    );
}
