#![forbid(unsafe_code)]

//! Menu entries: one row of a page.
//!
//! An entry is a closed tagged variant. Each variant carries only what it
//! needs, so renderers and the navigator `match` on [`EntryKind`] instead of
//! reinterpreting an untyped payload.
//!
//! Entry tables are `'static` slices terminated by an [`EntryKind::End`]
//! sentinel. Insertion order is render order:
//!
//! ```
//! use osdmenu_core::{field, MenuEntry, PageId, ScalarWidget};
//!
//! struct Staging {
//!     angle: u16,
//! }
//!
//! static ENTRIES: [MenuEntry<Staging>; 4] = [
//!     MenuEntry::label("--- RESCUE ---"),
//!     MenuEntry::uint16("ANGLE", ScalarWidget::new(field!(Staging, angle), 0, 200, 1))
//!         .reboot_required(),
//!     MenuEntry::back(),
//!     MenuEntry::end(),
//! ];
//!
//! assert_eq!(ENTRIES.iter().take_while(|e| !e.is_end()).count(), 3);
//! ```

use core::fmt;

use bitflags::bitflags;

use crate::widget::{BoolWidget, Edit, ScalarEdit, ScalarWidget, TabWidget};

/// Identity of a page within a page set.
///
/// The name doubles as a debugging guard, so keep it short and unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub &'static str);

impl PageId {
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

bitflags! {
    /// Per-entry markers carried for the renderer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntryFlags: u8 {
        /// Committing this field only takes effect after the owning
        /// subsystem restarts. The framework records it, nothing more.
        const REBOOT_REQUIRED = 1 << 0;
    }
}

/// What an entry is, with the data that kind needs.
pub enum EntryKind<S> {
    /// Static text.
    Label,
    /// Bounded integer.
    Scalar(ScalarEdit<S>),
    /// Index into a label table.
    Tab(TabWidget<S>),
    /// On/off switch.
    Bool(BoolWidget<S>),
    /// Link to another page.
    Submenu(PageId),
    /// Commit and return to the parent page.
    Back,
    /// Table terminator.
    End,
}

impl<S> Clone for EntryKind<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for EntryKind<S> {}

impl<S> fmt::Debug for EntryKind<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label => f.write_str("Label"),
            Self::Scalar(w) => f.debug_tuple("Scalar").field(w).finish(),
            Self::Tab(w) => f.debug_tuple("Tab").field(w).finish(),
            Self::Bool(w) => f.debug_tuple("Bool").field(w).finish(),
            Self::Submenu(id) => f.debug_tuple("Submenu").field(id).finish(),
            Self::Back => f.write_str("Back"),
            Self::End => f.write_str("End"),
        }
    }
}

/// Kind tag without payload, for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryTag {
    Label,
    Scalar,
    Tab,
    Bool,
    Submenu,
    Back,
    End,
}

/// Displayable value of an editable entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValue {
    Number(i32),
    /// Tab label; `None` when the staged index is outside the table.
    Choice(Option<&'static str>),
    Flag(bool),
}

impl fmt::Display for EntryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Choice(Some(label)) => f.write_str(label),
            Self::Choice(None) => f.write_str("---"),
            Self::Flag(true) => f.write_str("ON"),
            Self::Flag(false) => f.write_str("OFF"),
        }
    }
}

/// Type-erased snapshot of one row, as a renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryView {
    pub text: &'static str,
    pub tag: EntryTag,
    pub value: Option<EntryValue>,
    /// Declared submenu target (before any redirect).
    pub target: Option<PageId>,
    pub flags: EntryFlags,
    /// Edited since the page was last staged.
    pub edited: bool,
}

impl EntryView {
    /// Rows the cursor may land on.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        !matches!(self.tag, EntryTag::Label | EntryTag::End)
    }
}

/// One row of a menu page.
pub struct MenuEntry<S> {
    pub text: &'static str,
    pub kind: EntryKind<S>,
    pub flags: EntryFlags,
}

impl<S> MenuEntry<S> {
    #[must_use]
    pub const fn new(text: &'static str, kind: EntryKind<S>, flags: EntryFlags) -> Self {
        Self { text, kind, flags }
    }

    #[must_use]
    pub const fn label(text: &'static str) -> Self {
        Self::new(text, EntryKind::Label, EntryFlags::empty())
    }

    #[must_use]
    pub const fn uint8(text: &'static str, widget: ScalarWidget<S, u8>) -> Self {
        Self::new(text, EntryKind::Scalar(ScalarEdit::U8(widget)), EntryFlags::empty())
    }

    #[must_use]
    pub const fn int8(text: &'static str, widget: ScalarWidget<S, i8>) -> Self {
        Self::new(text, EntryKind::Scalar(ScalarEdit::I8(widget)), EntryFlags::empty())
    }

    #[must_use]
    pub const fn uint16(text: &'static str, widget: ScalarWidget<S, u16>) -> Self {
        Self::new(text, EntryKind::Scalar(ScalarEdit::U16(widget)), EntryFlags::empty())
    }

    #[must_use]
    pub const fn int16(text: &'static str, widget: ScalarWidget<S, i16>) -> Self {
        Self::new(text, EntryKind::Scalar(ScalarEdit::I16(widget)), EntryFlags::empty())
    }

    #[must_use]
    pub const fn tab(text: &'static str, widget: TabWidget<S>) -> Self {
        Self::new(text, EntryKind::Tab(widget), EntryFlags::empty())
    }

    #[must_use]
    pub const fn boolean(text: &'static str, widget: BoolWidget<S>) -> Self {
        Self::new(text, EntryKind::Bool(widget), EntryFlags::empty())
    }

    #[must_use]
    pub const fn submenu(text: &'static str, target: PageId) -> Self {
        Self::new(text, EntryKind::Submenu(target), EntryFlags::empty())
    }

    #[must_use]
    pub const fn back() -> Self {
        Self::new("BACK", EntryKind::Back, EntryFlags::empty())
    }

    #[must_use]
    pub const fn end() -> Self {
        Self::new("", EntryKind::End, EntryFlags::empty())
    }

    /// Mark as requiring a subsystem restart to take effect.
    #[must_use]
    pub const fn reboot_required(self) -> Self {
        Self::new(
            self.text,
            self.kind,
            self.flags.union(EntryFlags::REBOOT_REQUIRED),
        )
    }

    /// Whether the entry carries a widget.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(
            self.kind,
            EntryKind::Scalar(_) | EntryKind::Tab(_) | EntryKind::Bool(_)
        )
    }

    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self.kind, EntryKind::End)
    }

    #[must_use]
    pub const fn tag(&self) -> EntryTag {
        match self.kind {
            EntryKind::Label => EntryTag::Label,
            EntryKind::Scalar(_) => EntryTag::Scalar,
            EntryKind::Tab(_) => EntryTag::Tab,
            EntryKind::Bool(_) => EntryTag::Bool,
            EntryKind::Submenu(_) => EntryTag::Submenu,
            EntryKind::Back => EntryTag::Back,
            EntryKind::End => EntryTag::End,
        }
    }

    /// Declared submenu target, if this is a submenu link.
    #[must_use]
    pub const fn target(&self) -> Option<PageId> {
        match self.kind {
            EntryKind::Submenu(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the widget ranges of this entry are sane.
    pub fn is_well_formed(&self) -> bool {
        match &self.kind {
            EntryKind::Scalar(w) => w.is_well_formed(),
            EntryKind::Tab(w) => w.is_well_formed(),
            _ => true,
        }
    }

    /// Current value read from staging, for editable kinds.
    pub fn value(&self, staging: &S) -> Option<EntryValue> {
        match &self.kind {
            EntryKind::Scalar(w) => Some(EntryValue::Number(w.value(staging))),
            EntryKind::Tab(w) => Some(EntryValue::Choice(w.label(staging))),
            EntryKind::Bool(w) => Some(EntryValue::Flag(w.value(staging))),
            EntryKind::Label | EntryKind::Submenu(_) | EntryKind::Back | EntryKind::End => None,
        }
    }

    /// Apply an edit to the bound staging cell.
    ///
    /// Returns `None` for kinds without a widget.
    pub fn apply(&self, staging: &mut S, edit: Edit) -> Option<EntryValue> {
        match &self.kind {
            EntryKind::Scalar(w) => Some(EntryValue::Number(w.apply(staging, edit))),
            EntryKind::Tab(w) => {
                w.apply(staging, edit);
                Some(EntryValue::Choice(w.label(staging)))
            }
            EntryKind::Bool(w) => Some(EntryValue::Flag(w.apply(staging, edit))),
            EntryKind::Label | EntryKind::Submenu(_) | EntryKind::Back | EntryKind::End => None,
        }
    }

    /// Snapshot for a renderer.
    pub fn view(&self, staging: &S, edited: bool) -> EntryView {
        EntryView {
            text: self.text,
            tag: self.tag(),
            value: self.value(staging),
            target: self.target(),
            flags: self.flags,
            edited,
        }
    }
}

impl<S> Clone for MenuEntry<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for MenuEntry<S> {}

impl<S> fmt::Debug for MenuEntry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("text", &self.text)
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .finish()
    }
}
