#![forbid(unsafe_code)]

//! Golden screens.
//!
//! A stored screen is the output of [`render_screen`](crate::render_screen)
//! saved as `tests/snapshots/<name>.snap` under the calling crate's
//! `CARGO_MANIFEST_DIR`. Screens are compared row by row, the same grid the
//! renderer draws, and a mismatch names the OSD rows that differ. Run with
//! `BLESS=1` to create or update the files:
//!
//! ```sh
//! BLESS=1 cargo test -p osdmenu-rescue
//! ```

use std::fmt;
use std::path::PathBuf;

const BLESS_ENV: &str = "BLESS";

/// One OSD row that differs between a stored and a rendered screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMismatch {
    /// Zero-based screen row.
    pub row: usize,
    /// Stored row; `None` when the rendered screen is longer.
    pub expected: Option<String>,
    /// Rendered row; `None` when the rendered screen is shorter.
    pub actual: Option<String>,
}

impl fmt::Display for RowMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |line: &Option<String>| match line {
            Some(line) => format!("|{line}|"),
            None => "(none)".to_string(),
        };
        write!(
            f,
            "row {:02}: expected {} got {}",
            self.row,
            show(&self.expected),
            show(&self.actual)
        )
    }
}

/// Screen rows with trailing blanks dropped, as the renderer trims them.
#[must_use]
pub fn screen_rows(screen: &str) -> Vec<&str> {
    let mut rows: Vec<&str> = screen.lines().map(str::trim_end).collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    rows
}

/// Rows that differ between two screens, in row order.
#[must_use]
pub fn row_mismatches(expected: &str, actual: &str) -> Vec<RowMismatch> {
    let expected = screen_rows(expected);
    let actual = screen_rows(actual);
    (0..expected.len().max(actual.len()))
        .filter_map(|row| {
            let want = expected.get(row).copied();
            let got = actual.get(row).copied();
            (want != got).then(|| RowMismatch {
                row,
                expected: want.map(str::to_string),
                actual: got.map(str::to_string),
            })
        })
        .collect()
}

/// Assert that a rendered screen matches the stored screen `name`.
///
/// # Panics
///
/// * If the stored screen is missing and `BLESS=1` is not set.
/// * If any row differs.
pub fn assert_screen_snapshot(name: &str, screen: &str, manifest_dir: &str) {
    let path: PathBuf = [manifest_dir, "tests", "snapshots"]
        .iter()
        .collect::<PathBuf>()
        .join(format!("{name}.snap"));
    let rendered = screen_rows(screen).join("\n");

    if std::env::var(BLESS_ENV).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true")) {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).expect("failed to create snapshot directory");
        }
        std::fs::write(&path, format!("{rendered}\n")).expect("failed to write snapshot");
        return;
    }

    let stored = match std::fs::read_to_string(&path) {
        Ok(stored) => stored,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => panic!(
            "no stored screen '{name}' at {}; run with {BLESS_ENV}=1 to create it\n{rendered}",
            path.display()
        ),
        Err(err) => panic!("failed to read stored screen {}: {err}", path.display()),
    };

    let mismatches = row_mismatches(&stored, &rendered);
    if !mismatches.is_empty() {
        let report: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
        panic!(
            "screen '{name}' differs from {} ({BLESS_ENV}=1 to update)\n{}\n\nrendered:\n{rendered}",
            path.display(),
            report.join("\n")
        );
    }
}

/// Assert that a rendered screen matches a stored one.
///
/// Uses `CARGO_MANIFEST_DIR` of the calling crate to locate snapshots.
///
/// ```ignore
/// assert_screen!("rescue_main", &operator.screen());
/// ```
#[macro_export]
macro_rules! assert_screen {
    ($name:expr, $screen:expr) => {
        $crate::snapshot::assert_screen_snapshot($name, $screen, env!("CARGO_MANIFEST_DIR"))
    };
}
