#![forbid(unsafe_code)]

//! Runtime: page lifecycle, the page stack, and navigation policy.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Navigator<N>                              │
//! │   - bounded stack of frames (page id + cursor row)            │
//! │   - resolves submenu links and redirects                      │
//! │   - latches restart-required after commits                    │
//! └──────────────────────────────────────────────────────────────┘
//!                              │ PageSet<C>
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   dyn Page<C> (MenuPage<S, C>)                │
//! │   - 'static entry table                                       │
//! │   - StagingBuffer<S>                                          │
//! │   - on_enter / on_exit / check_redirect hooks                 │
//! └──────────────────────────────────────────────────────────────┘
//!                              │ &C on enter, &mut C on exit
//!                              ▼
//!                    live configuration (C)
//! ```

pub mod config;
pub mod error;
pub mod navigator;
pub mod page;

pub use config::{ConfigError, ConfigParse, NavigatorConfig, ReturnPolicy};
pub use error::{HookError, HookResult, MenuError, MenuResult};
pub use navigator::{ExitMode, Navigation, Navigator, PageSet, validate_graph};
pub use page::{ExitReport, ExitTrigger, MenuPage, Page, PageHooks, PageState};
