#![warn(rust_2018_idioms)]
// 構造的な意味合いや一貫性を保つために以下の警告は無効化
#![allow(clippy::needless_range_loop)]

mod app;
mod convert;
mod model;
mod note;
mod sheet;
mod summary;
mod util;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    match args[1].as_str() {
        "S" => {
            // Sync (note記事の取得とシートへの追記)
            app::SyncApp::new(args2).run();
        }
        "D" => {
            // Decode (牌譜URLの確認)
            app::DecodeApp::new(args2).run();
        }
        m => {
            error!("unknown mode: {}", m)
        }
    }
}
