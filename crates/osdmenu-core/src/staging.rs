#![forbid(unsafe_code)]

//! Page-owned staging cells.
//!
//! A page never edits live configuration directly. Its widgets are bound to
//! cells of a plain staging struct `S` through [`Field`] accessors, and the
//! struct itself lives inside a [`StagingBuffer`] owned by the page.
//!
//! # Lifecycle
//!
//! 1. **Load**: the page's on-enter hook copies live values in through
//!    [`StagingBuffer::load`], exactly once per activation.
//! 2. **Edit**: widget operations mutate cells through
//!    [`StagingBuffer::edit`], which records the edited entry row.
//! 3. **Store**: the on-exit hook reads [`StagingBuffer::cells`] and writes
//!    every cell back to live configuration, then [`StagingBuffer::commit`]
//!    makes the stored values the new baseline.
//!
//! [`StagingBuffer::discard`] ends the session without step 3. Nothing can
//! be stored again until the next load.

use core::fmt;

/// Accessor pair binding a widget to one cell of a staging struct.
///
/// Built from two non-capturing closures, usually via [`field!`](crate::field):
///
/// ```
/// use osdmenu_core::{field, Field};
///
/// struct Staging {
///     angle: u16,
/// }
///
/// const ANGLE: Field<Staging, u16> = field!(Staging, angle);
///
/// let mut s = Staging { angle: 35 };
/// *ANGLE.cell(&mut s) += 1;
/// assert_eq!(*ANGLE.read(&s), 36);
/// ```
pub struct Field<S, T> {
    get: fn(&S) -> &T,
    get_mut: fn(&mut S) -> &mut T,
}

impl<S, T> Field<S, T> {
    /// Bind a cell from its shared and exclusive accessors.
    #[must_use]
    pub const fn new(get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
        Self { get, get_mut }
    }

    /// Borrow the cell.
    #[inline]
    pub fn read<'a>(&self, staging: &'a S) -> &'a T {
        (self.get)(staging)
    }

    /// Borrow the cell mutably.
    #[inline]
    pub fn cell<'a>(&self, staging: &'a mut S) -> &'a mut T {
        (self.get_mut)(staging)
    }
}

impl<S, T> Clone for Field<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T> Copy for Field<S, T> {}

impl<S, T> fmt::Debug for Field<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").finish_non_exhaustive()
    }
}

/// Build a [`Field`] for `$staging.$name`.
#[macro_export]
macro_rules! field {
    ($staging:ty, $name:ident) => {
        $crate::staging::Field::new(
            |s: &$staging| &s.$name,
            |s: &mut $staging| &mut s.$name,
        )
    };
}

/// Set of edited entry rows, one bit per row.
///
/// Rows beyond 63 are tracked in the last bit; a page that long is far past
/// what fits on an OSD anyway.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EditMask(u64);

impl EditMask {
    /// Highest distinct row index.
    pub const MAX_ROW: usize = 63;

    /// No rows edited.
    pub const EMPTY: Self = Self(0);

    #[inline]
    fn bit(row: usize) -> u64 {
        1u64 << row.min(Self::MAX_ROW)
    }

    /// Mark a row as edited.
    pub fn insert(&mut self, row: usize) {
        self.0 |= Self::bit(row);
    }

    /// Whether a row was edited.
    #[must_use]
    pub fn contains(&self, row: usize) -> bool {
        self.0 & Self::bit(row) != 0
    }

    /// Whether no row was edited.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of edited rows.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate edited rows in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..=Self::MAX_ROW).filter(|row| self.contains(*row))
    }

    /// Forget all edits.
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// Page-owned scratch copy of the live fields a page edits.
#[derive(Debug, Clone)]
pub struct StagingBuffer<S> {
    cells: S,
    /// Cells as last loaded or committed; `None` outside a session.
    baseline: Option<S>,
    edited: EditMask,
    loads: u32,
}

impl<S> StagingBuffer<S> {
    /// Wrap an initial staging struct. No session is open yet.
    #[must_use]
    pub const fn new(cells: S) -> Self {
        Self {
            cells,
            baseline: None,
            edited: EditMask::EMPTY,
            loads: 0,
        }
    }

    /// Whether an edit session is open: loaded and not discarded since.
    #[must_use]
    pub const fn is_staged(&self) -> bool {
        self.baseline.is_some()
    }

    /// Number of successful loads.
    #[must_use]
    pub const fn loads(&self) -> u32 {
        self.loads
    }

    /// Read-only view of the staged cells.
    #[must_use]
    pub const fn cells(&self) -> &S {
        &self.cells
    }

    /// Cells as they stood after the last load or commit.
    #[must_use]
    pub const fn baseline(&self) -> Option<&S> {
        self.baseline.as_ref()
    }

    /// Mutate staged cells on behalf of entry `row`, recording the edit.
    pub fn edit<R>(&mut self, row: usize, f: impl FnOnce(&mut S) -> R) -> R {
        self.edited.insert(row);
        f(&mut self.cells)
    }

    /// Rows edited since the last load or commit.
    #[must_use]
    pub const fn edited(&self) -> EditMask {
        self.edited
    }

    /// Edited rows whose value differs from the baseline according to `read`.
    ///
    /// Empty outside a session.
    pub fn changed<V: PartialEq>(&self, mut read: impl FnMut(usize, &S) -> V) -> EditMask {
        let mut changed = EditMask::EMPTY;
        let Some(baseline) = &self.baseline else {
            return changed;
        };
        for row in self.edited.rows() {
            if read(row, &self.cells) != read(row, baseline) {
                changed.insert(row);
            }
        }
        changed
    }

    /// End the session without storing. Cell values are left as they are.
    pub fn discard(&mut self) {
        self.edited.clear();
        self.baseline = None;
    }
}

impl<S: Clone> StagingBuffer<S> {
    /// Copy values in from live configuration.
    ///
    /// On success a fresh edit session starts: the loaded cells become the
    /// baseline, the edit mask is cleared and the load counter bumped. If
    /// `fill` fails, every cell is rolled back to its value before the call,
    /// so a failed enter leaves no partial staging behind.
    pub fn load<E>(&mut self, fill: impl FnOnce(&mut S) -> Result<(), E>) -> Result<(), E> {
        let snapshot = self.cells.clone();
        match fill(&mut self.cells) {
            Ok(()) => {
                self.baseline = Some(self.cells.clone());
                self.edited.clear();
                self.loads = self.loads.wrapping_add(1);
                Ok(())
            }
            Err(err) => {
                self.cells = snapshot;
                Err(err)
            }
        }
    }

    /// Mark the current cells as stored. The session stays open.
    pub fn commit(&mut self) {
        if self.baseline.is_some() {
            self.baseline = Some(self.cells.clone());
            self.edited.clear();
        }
    }
}
