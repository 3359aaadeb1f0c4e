//! Page set for the GPS rescue menu.

use osdmenu_core::PageId;
use osdmenu_runtime::{MenuPage, Page, PageSet};

use crate::config::GpsRescueConfig;
use crate::pages::{
    GPS_RESCUE, GPS_RESCUE_PID, RescuePidStaging, RescueStaging, pid_page, rescue_page,
};

/// Owns both rescue pages; hand it to a navigator as its [`PageSet`].
pub struct RescueMenu {
    main: MenuPage<RescueStaging, GpsRescueConfig>,
    pid: MenuPage<RescuePidStaging, GpsRescueConfig>,
}

impl RescueMenu {
    /// Root page of the menu.
    pub const ROOT: PageId = GPS_RESCUE;

    #[must_use]
    pub fn new() -> Self {
        Self {
            main: rescue_page(),
            pid: pid_page(),
        }
    }

    /// The main page.
    #[must_use]
    pub fn main(&self) -> &MenuPage<RescueStaging, GpsRescueConfig> {
        &self.main
    }

    /// The PID sub-page.
    #[must_use]
    pub fn pid(&self) -> &MenuPage<RescuePidStaging, GpsRescueConfig> {
        &self.pid
    }
}

impl Default for RescueMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSet<GpsRescueConfig> for RescueMenu {
    fn page(&self, id: PageId) -> Option<&dyn Page<GpsRescueConfig>> {
        match id {
            GPS_RESCUE => Some(&self.main),
            GPS_RESCUE_PID => Some(&self.pid),
            _ => None,
        }
    }

    fn page_mut(&mut self, id: PageId) -> Option<&mut dyn Page<GpsRescueConfig>> {
        match id {
            GPS_RESCUE => Some(&mut self.main),
            GPS_RESCUE_PID => Some(&mut self.pid),
            _ => None,
        }
    }
}
