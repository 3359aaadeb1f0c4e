#![forbid(unsafe_code)]

//! Core: staging cells, widget descriptors, and menu entry tables.
//!
//! Everything in this crate is passive data. Entry tables are `'static`
//! and built with `const fn` constructors; the only mutable state is the
//! page-owned [`StagingBuffer`](staging::StagingBuffer) that widgets edit.

pub mod entry;
pub mod logging;
pub mod staging;
pub mod widget;

pub use entry::{EntryFlags, EntryTag, EntryValue, EntryView, MenuEntry, PageId};
pub use staging::{EditMask, Field, StagingBuffer};
pub use widget::{BoolWidget, Edit, ScalarEdit, ScalarValue, ScalarWidget, TabWidget};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
