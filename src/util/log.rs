use std::fmt;

// ログ出力の共通処理
// テスト中は出力した行を呼び出しスレッド上で記録できる
pub fn write(level: &str, file: &str, line: u32, args: fmt::Arguments<'_>) {
    let msg = format!("[{}]({}:{}) {}", level, file, line, args);
    #[cfg(test)]
    capture::push(&msg);
    eprintln!("{}", msg);
}

#[cfg(test)]
pub mod capture {
    use std::cell::RefCell;

    thread_local! {
        static LINES: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
    }

    pub(super) fn push(msg: &str) {
        LINES.with(|l| {
            if let Some(lines) = l.borrow_mut().as_mut() {
                lines.push(msg.to_string());
            }
        });
    }

    // fの実行中に出力されたログ行を返却
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        LINES.with(|l| *l.borrow_mut() = Some(vec![]));
        let res = f();
        let lines = LINES.with(|l| l.borrow_mut().take()).unwrap_or_default();
        (res, lines)
    }
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::util::log::write("ERROR", file!(), line!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::util::log::write("WARN", file!(), line!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::util::log::write("INFO", file!(), line!(), format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::util::log::write("DEBUG", file!(), line!(), format_args!($($arg)*))
    };
}

#[test]
fn test_capture() {
    let (_, lines) = capture::capture(|| {
        crate::warn!("a {}", 1);
        crate::info!("b");
    });
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("[WARN]("));
    assert!(lines[0].ends_with(") a 1"));
    assert!(lines[1].starts_with("[INFO]("));
}
