//! The two GPS rescue pages.
//!
//! Every editable row is flagged [`EntryFlags::REBOOT_REQUIRED`]: the rescue
//! controller only reads its parameters at boot.
//!
//! The main page stages everything except the PID gains, which live on
//! their own sub-page with a separate staging struct. Committing one page
//! never writes the other page's fields.

use osdmenu_core::{BoolWidget, MenuEntry, PageId, ScalarWidget, TabWidget, field};
use osdmenu_runtime::{ExitTrigger, HookResult, MenuPage, PageHooks};

use crate::config::{ALTITUDE_MODE_LABELS, GpsRescueConfig};

/// Main GPS rescue page.
pub const GPS_RESCUE: PageId = PageId("MENUGPSRES");
/// PID gains sub-page.
pub const GPS_RESCUE_PID: PageId = PageId("MENUGPSRPID");

// ── Main page ───────────────────────────────────────────────────────────

/// Staged copy of the main page fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescueStaging {
    pub angle: u16,
    pub min_rescue_dth: u16,
    pub initial_altitude_m: u16,
    pub altitude_mode: u8,
    pub descent_distance_m: u16,
    pub target_landing_altitude_m: u16,
    pub target_landing_distance_m: u16,
    pub rescue_groundspeed: u16,
    pub throttle_min: u16,
    pub throttle_max: u16,
    pub throttle_hover: u16,
    pub ascend_rate: u16,
    pub descend_rate: u16,
    pub allow_arming_without_fix: bool,
    pub min_sats: u8,
}

/// Row of the PID submenu link on the main page.
pub const PID_SUBMENU_ROW: usize = 16;

pub static RESCUE_ENTRIES: [MenuEntry<RescueStaging>; 19] = [
    MenuEntry::label("--- GPS RESCUE ---"),
    MenuEntry::uint16("ANGLE", ScalarWidget::new(field!(RescueStaging, angle), 0, 200, 1))
        .reboot_required(),
    MenuEntry::uint16(
        "MIN DIST HOME   M",
        ScalarWidget::new(field!(RescueStaging, min_rescue_dth), 50, 1000, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "INITAL ALT      M",
        ScalarWidget::new(field!(RescueStaging, initial_altitude_m), 20, 100, 1),
    )
    .reboot_required(),
    MenuEntry::tab(
        "ALTITUDE MODE",
        TabWidget::new(field!(RescueStaging, altitude_mode), ALTITUDE_MODE_LABELS),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "DESCENT DIST    M",
        ScalarWidget::new(field!(RescueStaging, descent_distance_m), 30, 500, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "LANDING ALT     M",
        ScalarWidget::new(field!(RescueStaging, target_landing_altitude_m), 3, 10, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "LANDING DIST    M",
        ScalarWidget::new(field!(RescueStaging, target_landing_distance_m), 5, 15, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "GROUND SPEED CM/S",
        ScalarWidget::new(field!(RescueStaging, rescue_groundspeed), 30, 3000, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "THROTTLE MIN",
        ScalarWidget::new(field!(RescueStaging, throttle_min), 1000, 2000, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "THROTTLE MAX",
        ScalarWidget::new(field!(RescueStaging, throttle_max), 1000, 2000, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "THROTTLE HOV",
        ScalarWidget::new(field!(RescueStaging, throttle_hover), 1000, 2000, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "ASCEND RATE",
        ScalarWidget::new(field!(RescueStaging, ascend_rate), 100, 2500, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "DESCEND RATE",
        ScalarWidget::new(field!(RescueStaging, descend_rate), 100, 500, 1),
    )
    .reboot_required(),
    MenuEntry::boolean(
        "ARM WITHOUT FIX",
        BoolWidget::new(field!(RescueStaging, allow_arming_without_fix)),
    )
    .reboot_required(),
    MenuEntry::uint8("MIN SATELITES", ScalarWidget::new(field!(RescueStaging, min_sats), 5, 50, 1))
        .reboot_required(),
    MenuEntry::submenu("GPS RESCUE PID", GPS_RESCUE_PID),
    MenuEntry::back(),
    MenuEntry::end(),
];

fn rescue_enter(s: &mut RescueStaging, live: &GpsRescueConfig) -> HookResult {
    s.angle = live.angle;
    s.initial_altitude_m = live.initial_altitude_m;
    s.descent_distance_m = live.descent_distance_m;
    s.rescue_groundspeed = live.rescue_groundspeed;
    s.throttle_min = live.throttle_min;
    s.throttle_max = live.throttle_max;
    s.throttle_hover = live.throttle_hover;
    s.min_sats = live.min_sats;
    s.min_rescue_dth = live.min_rescue_dth;
    s.allow_arming_without_fix = live.allow_arming_without_fix;
    s.target_landing_distance_m = live.target_landing_distance_m;
    s.target_landing_altitude_m = live.target_landing_altitude_m;
    s.altitude_mode = live.altitude_mode;
    s.ascend_rate = live.ascend_rate;
    s.descend_rate = live.descend_rate;
    Ok(())
}

fn rescue_exit(s: &RescueStaging, live: &mut GpsRescueConfig, _trigger: ExitTrigger) -> HookResult {
    live.angle = s.angle;
    live.initial_altitude_m = s.initial_altitude_m;
    live.descent_distance_m = s.descent_distance_m;
    live.rescue_groundspeed = s.rescue_groundspeed;
    live.throttle_min = s.throttle_min;
    live.throttle_max = s.throttle_max;
    live.throttle_hover = s.throttle_hover;
    live.min_sats = s.min_sats;
    live.min_rescue_dth = s.min_rescue_dth;
    live.allow_arming_without_fix = s.allow_arming_without_fix;
    live.target_landing_distance_m = s.target_landing_distance_m;
    live.target_landing_altitude_m = s.target_landing_altitude_m;
    live.altitude_mode = s.altitude_mode;
    live.ascend_rate = s.ascend_rate;
    live.descend_rate = s.descend_rate;
    Ok(())
}

/// Build the main GPS rescue page.
#[must_use]
pub fn rescue_page() -> MenuPage<RescueStaging, GpsRescueConfig> {
    MenuPage::new(
        GPS_RESCUE,
        &RESCUE_ENTRIES,
        RescueStaging::default(),
        PageHooks::new(rescue_enter, rescue_exit),
    )
}

// ── PID sub-page ────────────────────────────────────────────────────────

/// Staged copy of the rescue PID gains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescuePidStaging {
    pub throttle_p: u16,
    pub throttle_i: u16,
    pub throttle_d: u16,
    pub yaw_p: u16,
    pub vel_p: u16,
    pub vel_i: u16,
    pub vel_d: u16,
}

/// Upper bound shared by every rescue PID gain.
pub const PID_GAIN_MAX: u16 = 500;

pub static RESCUE_PID_ENTRIES: [MenuEntry<RescuePidStaging>; 10] = [
    MenuEntry::label("--- GPS RESCUE PID---"),
    MenuEntry::uint16(
        "THROTTLE P",
        ScalarWidget::new(field!(RescuePidStaging, throttle_p), 0, PID_GAIN_MAX, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "THROTTLE I",
        ScalarWidget::new(field!(RescuePidStaging, throttle_i), 0, PID_GAIN_MAX, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "THROTTLE D",
        ScalarWidget::new(field!(RescuePidStaging, throttle_d), 0, PID_GAIN_MAX, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "YAW P",
        ScalarWidget::new(field!(RescuePidStaging, yaw_p), 0, PID_GAIN_MAX, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "VELOCITY P",
        ScalarWidget::new(field!(RescuePidStaging, vel_p), 0, PID_GAIN_MAX, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "VELOCITY I",
        ScalarWidget::new(field!(RescuePidStaging, vel_i), 0, PID_GAIN_MAX, 1),
    )
    .reboot_required(),
    MenuEntry::uint16(
        "VELOCITY D",
        ScalarWidget::new(field!(RescuePidStaging, vel_d), 0, PID_GAIN_MAX, 1),
    )
    .reboot_required(),
    MenuEntry::back(),
    MenuEntry::end(),
];

fn pid_enter(s: &mut RescuePidStaging, live: &GpsRescueConfig) -> HookResult {
    s.throttle_p = live.throttle_p;
    s.throttle_i = live.throttle_i;
    s.throttle_d = live.throttle_d;
    s.yaw_p = live.yaw_p;
    s.vel_p = live.vel_p;
    s.vel_i = live.vel_i;
    s.vel_d = live.vel_d;
    Ok(())
}

fn pid_exit(s: &RescuePidStaging, live: &mut GpsRescueConfig, _trigger: ExitTrigger) -> HookResult {
    live.throttle_p = s.throttle_p;
    live.throttle_i = s.throttle_i;
    live.throttle_d = s.throttle_d;
    live.yaw_p = s.yaw_p;
    live.vel_p = s.vel_p;
    live.vel_i = s.vel_i;
    live.vel_d = s.vel_d;
    Ok(())
}

/// Build the rescue PID sub-page.
#[must_use]
pub fn pid_page() -> MenuPage<RescuePidStaging, GpsRescueConfig> {
    MenuPage::new(
        GPS_RESCUE_PID,
        &RESCUE_PID_ENTRIES,
        RescuePidStaging::default(),
        PageHooks::new(pid_enter, pid_exit),
    )
}
