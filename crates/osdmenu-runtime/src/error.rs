//! Error types for page hooks and navigation.
//!
//! Out-of-range edits are not errors; widgets clamp them. What remains is
//! hook failure, invalid navigation requests, and definition mistakes in
//! the page graph.

use std::fmt;

use osdmenu_core::PageId;

use crate::page::PageState;

/// Failure status returned by a page's enter or exit hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookError {
    /// Implementation-defined status code (never zero).
    pub code: i32,
    pub reason: &'static str,
}

impl HookError {
    #[must_use]
    pub const fn new(code: i32, reason: &'static str) -> Self {
        Self { code, reason }
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.reason, self.code)
    }
}

impl std::error::Error for HookError {}

/// Result of a lifecycle hook.
pub type HookResult = Result<(), HookError>;

/// Errors raised by pages and the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// A page's enter hook failed; the push was aborted.
    EnterFailed { page: PageId, source: HookError },
    /// A page's exit hook failed; the page stays active.
    ExitFailed { page: PageId, source: HookError },
    /// The page stack is at its configured depth.
    StackFull { depth: usize },
    /// The operation needs an active page.
    EmptyStack,
    /// A submenu target is not part of the page set.
    MissingPage(PageId),
    /// The target page is already on the stack.
    AlreadyOpen(PageId),
    /// The entry has no widget.
    NotEditable { page: PageId, index: usize },
    /// The entry is not a submenu link.
    NotSubmenu { page: PageId, index: usize },
    /// Row index past the end sentinel.
    EntryOutOfRange { page: PageId, index: usize, len: usize },
    /// The page is not in a state that allows the operation.
    PageNotActive { page: PageId, state: PageState },
    /// Exit or resume before the page was ever staged.
    NotStaged(PageId),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnterFailed { page, source } => write!(f, "entering {page} failed: {source}"),
            Self::ExitFailed { page, source } => write!(f, "exiting {page} failed: {source}"),
            Self::StackFull { depth } => write!(f, "page stack full at depth {depth}"),
            Self::EmptyStack => write!(f, "no active page"),
            Self::MissingPage(page) => write!(f, "page {page} is not defined"),
            Self::AlreadyOpen(page) => write!(f, "page {page} is already open"),
            Self::NotEditable { page, index } => {
                write!(f, "entry {index} of {page} is not editable")
            }
            Self::NotSubmenu { page, index } => {
                write!(f, "entry {index} of {page} is not a submenu")
            }
            Self::EntryOutOfRange { page, index, len } => {
                write!(f, "entry {index} out of range for {page} ({len} entries)")
            }
            Self::PageNotActive { page, state } => {
                write!(f, "page {page} is {state:?}, expected Active")
            }
            Self::NotStaged(page) => write!(f, "page {page} was never staged"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EnterFailed { source, .. } | Self::ExitFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Standard result type for menu operations.
pub type MenuResult<T> = Result<T, MenuError>;
