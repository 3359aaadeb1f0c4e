#![forbid(unsafe_code)]

//! Widget descriptors: bounded editing of one staging cell.
//!
//! A widget never fails. Every request is saturated into the widget's range
//! (`[min, max]` for scalars, `[0, count)` for tabs), so after any
//! [`Edit`] the cell holds a valid value no matter what it held before.

use core::fmt;

use crate::staging::Field;

/// An operator edit request forwarded by the input loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Move by this many steps (negative moves down).
    Step(i32),
    /// Jump to an absolute value.
    Set(i32),
    /// Flip a boolean. Scalars and tabs only re-clamp.
    Toggle,
}

impl Edit {
    /// One step up.
    pub const INCREMENT: Self = Self::Step(1);
    /// One step down.
    pub const DECREMENT: Self = Self::Step(-1);
}

/// Integer types a [`ScalarWidget`] can edit.
pub trait ScalarValue: Copy + Ord + fmt::Debug + 'static {
    /// Widen for saturating arithmetic.
    fn widen(self) -> i64;

    /// Narrow back, saturating at the type's own limits.
    fn narrow(value: i64) -> Self;
}

macro_rules! impl_scalar_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScalarValue for $ty {
                #[inline]
                fn widen(self) -> i64 {
                    i64::from(self)
                }

                #[inline]
                fn narrow(value: i64) -> Self {
                    value.clamp(i64::from(<$ty>::MIN), i64::from(<$ty>::MAX)) as $ty
                }
            }
        )*
    };
}

impl_scalar_value!(u8, i8, u16, i16);

/// Integer field with inclusive bounds and a step size.
pub struct ScalarWidget<S, T> {
    cell: Field<S, T>,
    min: T,
    max: T,
    step: T,
}

impl<S, T: ScalarValue> ScalarWidget<S, T> {
    /// Describe a scalar cell editable in `[min, max]` by `step`.
    ///
    /// Bounds are checked when the owning page is built; see
    /// [`is_well_formed`](Self::is_well_formed).
    #[must_use]
    pub const fn new(cell: Field<S, T>, min: T, max: T, step: T) -> Self {
        Self {
            cell,
            min,
            max,
            step,
        }
    }

    /// `min <= max` and a positive step.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.min <= self.max && self.step.widen() > 0
    }

    /// Lower bound.
    pub fn min(&self) -> T {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> T {
        self.max
    }

    /// Step size.
    pub fn step_size(&self) -> T {
        self.step
    }

    /// Current staged value (as loaded; may predate any clamping).
    pub fn value(&self, staging: &S) -> T {
        *self.cell.read(staging)
    }

    /// Saturate a wide value into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: i64) -> T {
        T::narrow(value.clamp(self.min.widen(), self.max.widen()))
    }

    /// Apply an edit and return the new cell value.
    pub fn apply(&self, staging: &mut S, edit: Edit) -> T {
        let cell = self.cell.cell(staging);
        let current = cell.widen();
        let next = match edit {
            Edit::Step(steps) => current.saturating_add(i64::from(steps) * self.step.widen()),
            Edit::Set(value) => i64::from(value),
            Edit::Toggle => current,
        };
        *cell = self.clamp(next);
        *cell
    }
}

impl<S, T: Copy> Clone for ScalarWidget<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T: Copy> Copy for ScalarWidget<S, T> {}

impl<S, T: fmt::Debug> fmt::Debug for ScalarWidget<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarWidget")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .finish()
    }
}

/// Scalar widget of any supported width.
pub enum ScalarEdit<S> {
    U8(ScalarWidget<S, u8>),
    I8(ScalarWidget<S, i8>),
    U16(ScalarWidget<S, u16>),
    I16(ScalarWidget<S, i16>),
}

macro_rules! dispatch {
    ($self:expr, $w:ident => $body:expr) => {
        match $self {
            ScalarEdit::U8($w) => $body,
            ScalarEdit::I8($w) => $body,
            ScalarEdit::U16($w) => $body,
            ScalarEdit::I16($w) => $body,
        }
    };
}

impl<S> ScalarEdit<S> {
    /// Current staged value, widened.
    pub fn value(&self, staging: &S) -> i32 {
        dispatch!(self, w => w.value(staging).widen() as i32)
    }

    /// Inclusive bounds, widened.
    pub fn bounds(&self) -> (i32, i32) {
        dispatch!(self, w => (w.min().widen() as i32, w.max().widen() as i32))
    }

    /// Apply an edit and return the new value, widened.
    pub fn apply(&self, staging: &mut S, edit: Edit) -> i32 {
        dispatch!(self, w => w.apply(staging, edit).widen() as i32)
    }

    /// See [`ScalarWidget::is_well_formed`].
    pub fn is_well_formed(&self) -> bool {
        dispatch!(self, w => w.is_well_formed())
    }
}

impl<S> Clone for ScalarEdit<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for ScalarEdit<S> {}

impl<S> fmt::Debug for ScalarEdit<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(w) => f.debug_tuple("U8").field(w).finish(),
            Self::I8(w) => f.debug_tuple("I8").field(w).finish(),
            Self::U16(w) => f.debug_tuple("U16").field(w).finish(),
            Self::I16(w) => f.debug_tuple("I16").field(w).finish(),
        }
    }
}

/// Enumerated field: an index into an ordered label table.
pub struct TabWidget<S> {
    cell: Field<S, u8>,
    labels: &'static [&'static str],
}

impl<S> TabWidget<S> {
    /// Describe an index cell selecting one of `labels`.
    #[must_use]
    pub const fn new(cell: Field<S, u8>, labels: &'static [&'static str]) -> Self {
        Self { cell, labels }
    }

    /// Number of labels.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.labels.len()
    }

    /// The label table.
    #[must_use]
    pub const fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    /// Between 1 and 256 labels, so every index fits the `u8` cell.
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        !self.labels.is_empty() && self.labels.len() <= 256
    }

    /// Current staged index.
    ///
    /// A corrupt live value is staged as loaded and may lie outside the
    /// table until the first edit clamps it.
    pub fn index(&self, staging: &S) -> u8 {
        *self.cell.read(staging)
    }

    /// Label for the current index, if the index is valid.
    pub fn label(&self, staging: &S) -> Option<&'static str> {
        self.labels.get(usize::from(self.index(staging))).copied()
    }

    fn last_index(&self) -> i64 {
        self.labels.len().saturating_sub(1) as i64
    }

    /// Apply an edit and return the new index.
    pub fn apply(&self, staging: &mut S, edit: Edit) -> u8 {
        let cell = self.cell.cell(staging);
        let current = i64::from(*cell);
        let next = match edit {
            Edit::Step(steps) => current.saturating_add(i64::from(steps)),
            Edit::Set(value) => i64::from(value),
            Edit::Toggle => current,
        };
        *cell = next.clamp(0, self.last_index()) as u8;
        *cell
    }
}

impl<S> Clone for TabWidget<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for TabWidget<S> {}

impl<S> fmt::Debug for TabWidget<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabWidget")
            .field("labels", &self.labels)
            .finish()
    }
}

/// On/off field.
pub struct BoolWidget<S> {
    cell: Field<S, bool>,
}

impl<S> BoolWidget<S> {
    #[must_use]
    pub const fn new(cell: Field<S, bool>) -> Self {
        Self { cell }
    }

    pub fn value(&self, staging: &S) -> bool {
        *self.cell.read(staging)
    }

    /// Apply an edit and return the new value.
    ///
    /// Positive steps switch on, negative steps switch off, `Set` treats any
    /// non-zero value as on.
    pub fn apply(&self, staging: &mut S, edit: Edit) -> bool {
        let cell = self.cell.cell(staging);
        *cell = match edit {
            Edit::Step(steps) if steps > 0 => true,
            Edit::Step(steps) if steps < 0 => false,
            Edit::Step(_) => *cell,
            Edit::Set(value) => value != 0,
            Edit::Toggle => !*cell,
        };
        *cell
    }
}

impl<S> Clone for BoolWidget<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for BoolWidget<S> {}

impl<S> fmt::Debug for BoolWidget<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoolWidget")
    }
}
