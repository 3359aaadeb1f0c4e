#![forbid(unsafe_code)]

//! Test tooling for osdmenu pages.
//!
//! - **Rendering**: draws the active page as OSD text, one row per entry.
//! - **Operator**: replays key scripts against a navigator and records a
//!   transcript.
//! - **Snapshots**: compares rendered screens against stored `.snap` files.
//!
//! # Quick Start
//!
//! ```ignore
//! use osdmenu_harness::{assert_screen, Operator};
//!
//! #[test]
//! fn angle_page() {
//!     let mut op = Operator::opened(menu, live, NavigatorConfig::default(), ROOT);
//!     op.run("right*5 esc").unwrap();
//!     assert_screen!("angle_after_edit", &op.screen());
//! }
//! ```

pub mod operator;
pub mod render;
pub mod snapshot;

pub use operator::{Key, Operator, ParseKeyError, Press};
pub use render::{OSD_COLUMNS, RESTART_BANNER, render_entry, render_page, render_screen};
pub use snapshot::{RowMismatch, assert_screen_snapshot, row_mismatches, screen_rows};
