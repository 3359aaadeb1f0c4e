#![forbid(unsafe_code)]

//! Scripted operator input.
//!
//! Maps the six OSD stick gestures onto navigator calls the way a firmware
//! menu key handler does:
//!
//! | Key | Row kind | Action |
//! |-----|----------|--------|
//! | Up / Down | any | move cursor, skipping labels |
//! | Right | scalar, tab, bool | step up |
//! | Left | scalar, tab, bool | step down |
//! | Right / Enter | submenu, back | select |
//! | Enter | bool | toggle |
//! | Esc | any | commit and pop the page |
//!
//! Every press is recorded in a transcript that can be dumped as JSONL.

use std::fmt;
use std::str::FromStr;

use osdmenu_core::{Edit, EntryTag, PageId};
use osdmenu_runtime::{MenuError, MenuResult, Navigation, Navigator, NavigatorConfig, PageSet};
use serde_json::json;

use crate::render::render_screen;

/// Operator gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
}

impl Key {
    /// Lowercase key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Enter => "enter",
            Self::Esc => "esc",
        }
    }

    /// Parse a whitespace-separated key script such as `"down down right esc"`.
    ///
    /// A count suffix repeats a key: `"right*5"`.
    pub fn parse_script(script: &str) -> Result<Vec<Self>, ParseKeyError> {
        let mut keys = Vec::new();
        for token in script.split_whitespace() {
            let (name, count) = match token.split_once('*') {
                Some((name, count)) => {
                    let count = count
                        .parse::<usize>()
                        .map_err(|_| ParseKeyError(token.to_string()))?;
                    (name, count)
                }
                None => (token, 1),
            };
            let key: Self = name.parse()?;
            keys.extend(std::iter::repeat_n(key, count));
        }
        Ok(keys)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(pub String);

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key {:?}", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Self::Up),
            "down" | "d" => Ok(Self::Down),
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            "enter" | "e" => Ok(Self::Enter),
            "esc" | "x" => Ok(Self::Esc),
            _ => Err(ParseKeyError(s.to_string())),
        }
    }
}

/// One recorded key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Press {
    pub key: Key,
    /// Active page after the press.
    pub page: Option<PageId>,
    pub cursor: Option<usize>,
    pub outcome: Result<Navigation, MenuError>,
}

/// Drives a navigator over a page set and live configuration.
pub struct Operator<C, P> {
    nav: Navigator,
    pages: P,
    live: C,
    transcript: Vec<Press>,
}

impl<C, P: PageSet<C>> Operator<C, P> {
    #[must_use]
    pub fn new(pages: P, live: C, config: NavigatorConfig) -> Self {
        Self {
            nav: Navigator::new(config),
            pages,
            live,
            transcript: Vec::new(),
        }
    }

    /// Open `root` and return the operator, panicking if the root fails to
    /// enter. Intended for test setup.
    ///
    /// # Panics
    ///
    /// Panics if the root page cannot be opened.
    #[must_use]
    pub fn opened(pages: P, live: C, config: NavigatorConfig, root: PageId) -> Self {
        let mut operator = Self::new(pages, live, config);
        if let Err(err) = operator.open(root) {
            panic!("failed to open {root}: {err}");
        }
        operator
    }

    /// Open `root` as the first page.
    pub fn open(&mut self, root: PageId) -> MenuResult<Navigation> {
        self.nav.open(&mut self.pages, &mut self.live, root)
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.nav
    }

    pub fn pages(&self) -> &P {
        &self.pages
    }

    pub fn live(&self) -> &C {
        &self.live
    }

    /// Mutate live configuration from outside the menu (another task, a
    /// CLI command).
    pub fn live_mut(&mut self) -> &mut C {
        &mut self.live
    }

    /// Hand back pages and live configuration.
    pub fn into_parts(self) -> (Navigator, P, C) {
        (self.nav, self.pages, self.live)
    }

    /// Recorded presses, oldest first.
    pub fn transcript(&self) -> &[Press] {
        &self.transcript
    }

    fn cursor_tag(&self) -> MenuResult<EntryTag> {
        let page_id = self.nav.active().ok_or(MenuError::EmptyStack)?;
        let cursor = self.nav.cursor().ok_or(MenuError::EmptyStack)?;
        let page = self
            .pages
            .page(page_id)
            .ok_or(MenuError::MissingPage(page_id))?;
        let view = page.entry(cursor).ok_or(MenuError::EntryOutOfRange {
            page: page_id,
            index: cursor,
            len: page.entry_count(),
        })?;
        Ok(view.tag)
    }

    fn dispatch(&mut self, key: Key) -> MenuResult<Navigation> {
        let nav = &mut self.nav;
        match key {
            Key::Up => nav.move_cursor(&self.pages, -1).map(|_| Navigation::Stay),
            Key::Down => nav.move_cursor(&self.pages, 1).map(|_| Navigation::Stay),
            Key::Esc => nav.commit(&mut self.pages, &mut self.live),
            Key::Left | Key::Right | Key::Enter => {
                let tag = self.cursor_tag()?;
                let nav = &mut self.nav;
                match (key, tag) {
                    (Key::Right | Key::Enter, EntryTag::Submenu | EntryTag::Back) => {
                        nav.select(&mut self.pages, &mut self.live)
                    }
                    (Key::Enter, EntryTag::Bool) => nav
                        .edit(&mut self.pages, Edit::Toggle)
                        .map(|_| Navigation::Stay),
                    (Key::Right, EntryTag::Scalar | EntryTag::Tab | EntryTag::Bool) => nav
                        .edit(&mut self.pages, Edit::INCREMENT)
                        .map(|_| Navigation::Stay),
                    (Key::Left, EntryTag::Scalar | EntryTag::Tab | EntryTag::Bool) => nav
                        .edit(&mut self.pages, Edit::DECREMENT)
                        .map(|_| Navigation::Stay),
                    _ => Ok(Navigation::Stay),
                }
            }
        }
    }

    /// Press one key and record the outcome.
    pub fn press(&mut self, key: Key) -> MenuResult<Navigation> {
        let outcome = self.dispatch(key);
        self.transcript.push(Press {
            key,
            page: self.nav.active(),
            cursor: self.nav.cursor(),
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Press every key in order, stopping at the first error.
    pub fn press_all(&mut self, keys: &[Key]) -> MenuResult<Navigation> {
        let mut last = Navigation::Stay;
        for key in keys {
            last = self.press(*key)?;
        }
        Ok(last)
    }

    /// Parse and run a key script (see [`Key::parse_script`]).
    ///
    /// # Panics
    ///
    /// Panics on an unknown key name; scripts are test fixtures.
    pub fn run(&mut self, script: &str) -> MenuResult<Navigation> {
        let keys = match Key::parse_script(script) {
            Ok(keys) => keys,
            Err(err) => panic!("bad key script {script:?}: {err}"),
        };
        self.press_all(&keys)
    }

    /// Current screen text.
    #[must_use]
    pub fn screen(&self) -> String {
        render_screen(&self.nav, &self.pages)
    }

    /// Transcript as JSONL, one press per line.
    #[must_use]
    pub fn transcript_jsonl(&self) -> String {
        let mut out = String::new();
        for (step, press) in self.transcript.iter().enumerate() {
            let (outcome, error) = match &press.outcome {
                Ok(navigation) => (format!("{navigation:?}"), None),
                Err(err) => ("error".to_string(), Some(err.to_string())),
            };
            let line = json!({
                "step": step,
                "key": press.key.as_str(),
                "page": press.page.map(PageId::name),
                "cursor": press.cursor,
                "outcome": outcome,
                "error": error,
            });
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_parsing_expands_counts() {
        assert_eq!(
            Key::parse_script("down right*3 Esc"),
            Ok(vec![Key::Down, Key::Right, Key::Right, Key::Right, Key::Esc])
        );
        assert_eq!(Key::parse_script("u d l r e x").map(|k| k.len()), Ok(6));
        assert_eq!(Key::parse_script(""), Ok(vec![]));
    }

    #[test]
    fn script_parsing_rejects_unknown_keys() {
        assert_eq!(
            Key::parse_script("down jump"),
            Err(ParseKeyError("jump".to_string()))
        );
        assert_eq!(
            Key::parse_script("right*many"),
            Err(ParseKeyError("right*many".to_string()))
        );
    }

    #[test]
    fn key_display_round_trips() {
        for key in [Key::Up, Key::Down, Key::Left, Key::Right, Key::Enter, Key::Esc] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }
}
