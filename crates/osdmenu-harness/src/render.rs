#![forbid(unsafe_code)]

//! Plain-text OSD rendering.
//!
//! One line per entry on a fixed-width character grid, the way a flight
//! controller OSD draws a settings page: entry text on the left, the value
//! right-aligned to the last column, and `>` in column 0 on the cursor row.
//! Trailing spaces are trimmed so snapshots stay diff-friendly.

use osdmenu_core::{EntryTag, EntryView};
use osdmenu_runtime::{Navigator, Page, PageSet};

/// Character columns on the OSD.
pub const OSD_COLUMNS: usize = 30;

/// Line appended to the screen while a restart is pending.
pub const RESTART_BANNER: &str = "  ** REBOOT REQUIRED **";

const CURSOR_MARKER: char = '>';

/// Render one row.
#[must_use]
pub fn render_entry(view: &EntryView, selected: bool) -> String {
    let mut line = String::with_capacity(OSD_COLUMNS);
    line.push(if selected { CURSOR_MARKER } else { ' ' });

    let value = match view.tag {
        EntryTag::Scalar | EntryTag::Tab | EntryTag::Bool => {
            view.value.map(|value| value.to_string())
        }
        EntryTag::Label | EntryTag::Submenu | EntryTag::Back | EntryTag::End => None,
    };

    let Some(value) = value else {
        line.extend(view.text.chars().take(OSD_COLUMNS - 1));
        return line.trim_end().to_string();
    };

    let value_width = value.chars().count();
    let text_room = OSD_COLUMNS.saturating_sub(1 + 1 + value_width);
    let text: String = view.text.chars().take(text_room).collect();
    let used = 1 + text.chars().count() + value_width;
    let gap = OSD_COLUMNS.saturating_sub(used).max(1);

    line.push_str(&text);
    line.extend(std::iter::repeat_n(' ', gap));
    line.push_str(&value);
    line
}

/// Render every row of a page, marking `cursor`.
#[must_use]
pub fn render_page<C>(page: &dyn Page<C>, cursor: Option<usize>) -> Vec<String> {
    (0..page.entry_count())
        .filter_map(|index| page.entry(index).map(|view| (index, view)))
        .map(|(index, view)| render_entry(&view, cursor == Some(index)))
        .collect()
}

/// Render the navigator's active page, with the restart banner if pending.
///
/// Returns an empty string when the menu is closed.
#[must_use]
pub fn render_screen<C, P, const N: usize>(nav: &Navigator<N>, pages: &P) -> String
where
    P: PageSet<C> + ?Sized,
{
    let Some(page) = nav.active().and_then(|id| pages.page(id)) else {
        return String::new();
    };
    let mut lines = render_page(page, nav.cursor());
    if nav.restart_pending() {
        lines.push(RESTART_BANNER.to_string());
    }
    lines.join("\n")
}
