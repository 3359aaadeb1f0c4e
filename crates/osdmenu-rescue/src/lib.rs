#![forbid(unsafe_code)]

//! GPS rescue settings menu.
//!
//! A two-page instance of the osdmenu model: the main rescue page
//! (`MENUGPSRES`) and its PID gains sub-page (`MENUGPSRPID`), editing a
//! [`GpsRescueConfig`] through page-owned staging.
//!
//! ```
//! use osdmenu_rescue::{GpsRescueConfig, RescueMenu};
//! use osdmenu_runtime::{Navigator, NavigatorConfig};
//! use osdmenu_core::Edit;
//!
//! let mut live = GpsRescueConfig::default();
//! let mut menu = RescueMenu::new();
//! let mut nav = Navigator::new(NavigatorConfig::default());
//!
//! nav.open(&mut menu, &mut live, RescueMenu::ROOT).unwrap();
//! nav.edit_at(&mut menu, 1, Edit::Step(300)).unwrap();
//! nav.commit(&mut menu, &mut live).unwrap();
//!
//! assert_eq!(live.angle, 200);
//! assert!(nav.restart_pending());
//! ```

pub mod config;
pub mod menu;
pub mod pages;

pub use config::{ALTITUDE_MODE_LABELS, AltitudeMode, GpsRescueConfig};
pub use menu::RescueMenu;
pub use pages::{
    GPS_RESCUE, GPS_RESCUE_PID, PID_SUBMENU_ROW, RescuePidStaging, RescueStaging, pid_page,
    rescue_page,
};
