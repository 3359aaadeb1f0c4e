//! Menu pages and their lifecycle.
//!
//! # State Machine
//!
//! ```text
//!            enter() ok                         exit() ok
//! Inactive ──────────► Entering ──► Active ──────────► Exiting ──► Inactive
//!     ▲   enter() err      │          │  ▲                │ exit() err
//!     └────────────────────┘ suspend()│  │resume()        └──► Active
//!                                     ▼  │
//!                                   Suspended
//! ```
//!
//! `Suspended` is a parent page sitting under an open child when the
//! navigator does not commit on submenu entry. Only an `Active` page accepts
//! widget edits.
//!
//! # Design Invariants
//!
//! 1. **Copy-in once**: `enter` runs the enter hook exactly once and either
//!    fully stages the page or rolls the staging back.
//! 2. **Isolation**: widget edits touch staging only; live configuration is
//!    borrowed solely by `enter` (shared) and `exit` (exclusive).
//! 3. **Copy-out once**: `exit` runs the exit hook exactly once. Running it
//!    again writes the same values and is harmless.
//! 4. **Abandon is silent**: `abandon` drops the session without the exit
//!    hook, leaving live configuration at its pre-edit values. A later
//!    `exit` or `resume` fails with `NotStaged` until the page is entered
//!    again.

use osdmenu_core::{
    Edit, EditMask, EntryFlags, EntryValue, EntryView, MenuEntry, PageId, StagingBuffer,
};
use osdmenu_core::{debug, debug_span, trace, warn};

use crate::error::{HookError, HookResult, MenuError, MenuResult};

/// Lifecycle state of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    #[default]
    Inactive,
    Entering,
    Active,
    Exiting,
    /// Staged but covered by an open child page.
    Suspended,
}

/// What caused a page to exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitTrigger {
    /// A Back or Submenu row at this index.
    Entry(usize),
    /// An external commit gesture, or closing the whole menu.
    Commit,
}

/// Outcome of a committing exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExitReport {
    /// Rows edited during the session that was just committed.
    pub edited: EditMask,
    /// Edited rows whose committed value differs from the one loaded.
    pub changed: EditMask,
    /// A changed row is flagged [`EntryFlags::REBOOT_REQUIRED`].
    pub restart_required: bool,
}

/// A page as seen by the navigator and renderers.
///
/// Object-safe so a page set can hold pages with different staging types.
pub trait Page<C> {
    fn id(&self) -> PageId;

    fn state(&self) -> PageState;

    /// Rows before the end sentinel.
    fn entry_count(&self) -> usize;

    /// Snapshot of one row, reading staged values.
    fn entry(&self, index: usize) -> Option<EntryView>;

    /// Stage live configuration and become active.
    fn enter(&mut self, live: &C) -> MenuResult<()>;

    /// Apply a widget edit to the row at `index`.
    fn edit(&mut self, index: usize, edit: Edit) -> MenuResult<EntryValue>;

    /// Commit staging back to live configuration and become inactive.
    fn exit(&mut self, live: &mut C, trigger: ExitTrigger) -> MenuResult<ExitReport>;

    /// Stop accepting edits while a child page is open.
    fn suspend(&mut self) -> MenuResult<()>;

    /// Become active again with the staging left as it was.
    fn resume(&mut self) -> MenuResult<()>;

    /// Drop the session without committing.
    fn abandon(&mut self);

    /// Alternate target for the submenu row at `index`, if any.
    fn redirect(&self, index: usize) -> Option<PageId>;
}

/// Lifecycle hooks for a [`MenuPage`].
pub struct PageHooks<S, C> {
    /// Copy live values into staging. Runs once per activation.
    pub on_enter: fn(&mut S, &C) -> HookResult,
    /// Copy staging back into live configuration.
    pub on_exit: fn(&S, &mut C, ExitTrigger) -> HookResult,
    /// Substitute a different page for a submenu row.
    pub check_redirect: Option<fn(&S, usize) -> Option<PageId>>,
}

impl<S, C> PageHooks<S, C> {
    #[must_use]
    pub const fn new(
        on_enter: fn(&mut S, &C) -> HookResult,
        on_exit: fn(&S, &mut C, ExitTrigger) -> HookResult,
    ) -> Self {
        Self {
            on_enter,
            on_exit,
            check_redirect: None,
        }
    }

    #[must_use]
    pub const fn with_redirect(self, check: fn(&S, usize) -> Option<PageId>) -> Self {
        Self {
            on_enter: self.on_enter,
            on_exit: self.on_exit,
            check_redirect: Some(check),
        }
    }
}

impl<S, C> Clone for PageHooks<S, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, C> Copy for PageHooks<S, C> {}

/// A page built from a `'static` entry table, a staging struct, and hooks.
pub struct MenuPage<S: 'static, C> {
    id: PageId,
    entries: &'static [MenuEntry<S>],
    len: usize,
    staging: StagingBuffer<S>,
    hooks: PageHooks<S, C>,
    state: PageState,
}

impl<S: Clone + 'static, C> MenuPage<S, C> {
    /// Build a page.
    ///
    /// # Panics
    ///
    /// Panics if `entries` has no `End` sentinel or a widget has an inverted
    /// range, zero step, or empty label table. These are definition errors
    /// in a static table and surface on first construction.
    #[must_use]
    pub fn new(
        id: PageId,
        entries: &'static [MenuEntry<S>],
        staging: S,
        hooks: PageHooks<S, C>,
    ) -> Self {
        let Some(len) = entries.iter().position(MenuEntry::is_end) else {
            panic!("page {id}: entry table has no End sentinel");
        };
        for (index, entry) in entries[..len].iter().enumerate() {
            assert!(
                entry.is_well_formed(),
                "page {id}: entry {index} ({:?}) has an invalid widget range",
                entry.text
            );
        }
        Self {
            id,
            entries,
            len,
            staging: StagingBuffer::new(staging),
            hooks,
            state: PageState::Inactive,
        }
    }

    /// Entries up to, not including, the end sentinel.
    #[must_use]
    pub fn entries(&self) -> &'static [MenuEntry<S>] {
        &self.entries[..self.len]
    }

    /// Staged values.
    #[must_use]
    pub fn staging(&self) -> &S {
        self.staging.cells()
    }

    /// Rows edited since the page was last staged or committed.
    #[must_use]
    pub fn edited(&self) -> EditMask {
        self.staging.edited()
    }

    /// Number of successful enters.
    #[must_use]
    pub fn loads(&self) -> u32 {
        self.staging.loads()
    }

    fn entry_at(&self, index: usize) -> MenuResult<&'static MenuEntry<S>> {
        self.entries()
            .get(index)
            .ok_or(MenuError::EntryOutOfRange {
                page: self.id,
                index,
                len: self.len,
            })
    }

    fn changed(&self) -> EditMask {
        let entries = self.entries();
        self.staging
            .changed(|row, cells| entries.get(row).and_then(|entry| entry.value(cells)))
    }

    fn restart_required(&self, changed: EditMask) -> bool {
        changed.rows().any(|row| {
            self.entries()
                .get(row)
                .is_some_and(|entry| entry.flags.contains(EntryFlags::REBOOT_REQUIRED))
        })
    }

    fn not_active(&self) -> MenuError {
        MenuError::PageNotActive {
            page: self.id,
            state: self.state,
        }
    }
}

impl<S: Clone + 'static, C> Page<C> for MenuPage<S, C> {
    fn id(&self) -> PageId {
        self.id
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn entry_count(&self) -> usize {
        self.len
    }

    fn entry(&self, index: usize) -> Option<EntryView> {
        let entry = self.entries().get(index)?;
        Some(entry.view(
            self.staging.cells(),
            self.staging.edited().contains(index),
        ))
    }

    fn enter(&mut self, live: &C) -> MenuResult<()> {
        let _span = debug_span!("page_enter", page = self.id.name()).entered();

        let previous = self.state;
        self.state = PageState::Entering;
        let on_enter = self.hooks.on_enter;
        match self.staging.load(|cells| on_enter(cells, live)) {
            Ok(()) => {
                self.state = PageState::Active;
                debug!(page = self.id.name(), loads = self.staging.loads(), "page staged");
                Ok(())
            }
            Err(source) => {
                self.state = previous;
                warn!(page = self.id.name(), code = source.code, "enter hook failed");
                Err(MenuError::EnterFailed {
                    page: self.id,
                    source,
                })
            }
        }
    }

    fn edit(&mut self, index: usize, edit: Edit) -> MenuResult<EntryValue> {
        if self.state != PageState::Active {
            return Err(self.not_active());
        }
        let entry = self.entry_at(index)?;
        if !entry.is_editable() {
            return Err(MenuError::NotEditable {
                page: self.id,
                index,
            });
        }
        let value = self
            .staging
            .edit(index, |cells| entry.apply(cells, edit))
            .ok_or(MenuError::NotEditable {
                page: self.id,
                index,
            })?;
        trace!(page = self.id.name(), index, ?edit, %value, "edit");
        Ok(value)
    }

    fn exit(&mut self, live: &mut C, trigger: ExitTrigger) -> MenuResult<ExitReport> {
        let _span = debug_span!("page_exit", page = self.id.name()).entered();

        if !self.staging.is_staged() {
            return Err(MenuError::NotStaged(self.id));
        }
        if matches!(self.state, PageState::Entering | PageState::Exiting) {
            return Err(self.not_active());
        }

        let previous = self.state;
        self.state = PageState::Exiting;
        let result: Result<(), HookError> =
            (self.hooks.on_exit)(self.staging.cells(), live, trigger);
        match result {
            Ok(()) => {
                let edited = self.staging.edited();
                let changed = self.changed();
                let report = ExitReport {
                    edited,
                    changed,
                    restart_required: self.restart_required(changed),
                };
                self.staging.commit();
                self.state = PageState::Inactive;
                debug!(
                    page = self.id.name(),
                    ?trigger,
                    edited = edited.len(),
                    changed = changed.len(),
                    restart = report.restart_required,
                    "page committed"
                );
                Ok(report)
            }
            Err(source) => {
                self.state = previous;
                warn!(page = self.id.name(), code = source.code, "exit hook failed");
                Err(MenuError::ExitFailed {
                    page: self.id,
                    source,
                })
            }
        }
    }

    fn suspend(&mut self) -> MenuResult<()> {
        if self.state != PageState::Active {
            return Err(self.not_active());
        }
        self.state = PageState::Suspended;
        Ok(())
    }

    fn resume(&mut self) -> MenuResult<()> {
        if !self.staging.is_staged() {
            return Err(MenuError::NotStaged(self.id));
        }
        match self.state {
            PageState::Inactive | PageState::Suspended | PageState::Active => {
                self.state = PageState::Active;
                Ok(())
            }
            PageState::Entering | PageState::Exiting => Err(self.not_active()),
        }
    }

    fn abandon(&mut self) {
        debug!(
            page = self.id.name(),
            dropped = self.staging.edited().len(),
            "page abandoned"
        );
        self.staging.discard();
        self.state = PageState::Inactive;
    }

    fn redirect(&self, index: usize) -> Option<PageId> {
        let check = self.hooks.check_redirect?;
        check(self.staging.cells(), index)
    }
}
