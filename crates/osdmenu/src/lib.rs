#![forbid(unsafe_code)]

//! osdmenu public facade crate.
//!
//! Re-exports the entry model, page runtime, and (with the default `rescue`
//! feature) the GPS rescue pages, plus a prelude for day-to-day use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use osdmenu_core::{
    BoolWidget, Edit, EditMask, EntryFlags, EntryTag, EntryValue, EntryView, Field, MenuEntry,
    PageId, ScalarEdit, ScalarValue, ScalarWidget, StagingBuffer, TabWidget, field,
};

// --- Runtime re-exports ----------------------------------------------------

pub use osdmenu_runtime::{
    ConfigError, ExitMode, ExitReport, ExitTrigger, HookError, HookResult, MenuError, MenuPage,
    MenuResult, Navigation, Navigator, NavigatorConfig, Page, PageHooks, PageSet, PageState,
    ReturnPolicy, validate_graph,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for osdmenu applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Navigation or hook failure.
    Menu(MenuError),
    /// Rejected navigator configuration.
    Config(Vec<ConfigError>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu(err) => write!(f, "{err}"),
            Self::Config(errors) => {
                f.write_str("invalid navigator config:")?;
                for err in errors {
                    write!(f, " {err};")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Menu(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<MenuError> for Error {
    fn from(err: MenuError) -> Self {
        Self::Menu(err)
    }
}

impl From<Vec<ConfigError>> for Error {
    fn from(errors: Vec<ConfigError>) -> Self {
        Self::Config(errors)
    }
}

/// Standard result type for osdmenu APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a navigator from `OSDMENU_*` environment variables.
///
/// Unlike [`NavigatorConfig::from_env`], unparseable values are an error
/// rather than silently falling back to defaults.
pub fn navigator_from_env() -> Result<Navigator> {
    navigator_from_lookup(|key| std::env::var(key).ok())
}

/// Build a navigator from an arbitrary key lookup.
pub fn navigator_from_lookup<F>(get: F) -> Result<Navigator>
where
    F: FnMut(&str) -> Option<String>,
{
    let parsed = NavigatorConfig::from_env_with(get);
    if !parsed.errors.is_empty() {
        return Err(Error::Config(parsed.errors));
    }
    parsed.config.validate()?;
    Ok(Navigator::new(parsed.config))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Edit, EntryValue, Error, ExitMode, MenuEntry, MenuError, MenuPage, Navigation, Navigator,
        NavigatorConfig, Page, PageHooks, PageId, PageSet, Result,
    };

    #[cfg(feature = "rescue")]
    pub use crate::rescue::{GpsRescueConfig, RescueMenu};

    pub use crate::{core, runtime};
}

pub use osdmenu_core as core;
pub use osdmenu_runtime as runtime;

#[cfg(feature = "rescue")]
pub use osdmenu_rescue as rescue;
