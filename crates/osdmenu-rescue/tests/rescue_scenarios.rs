//! End-to-end GPS rescue menu scenarios.

use osdmenu_core::{Edit, EntryValue};
use osdmenu_harness::{Operator, assert_screen};
use osdmenu_rescue::{GPS_RESCUE, GPS_RESCUE_PID, GpsRescueConfig, PID_SUBMENU_ROW, RescueMenu};
use osdmenu_runtime::{
    ExitMode, MenuError, Navigation, Navigator, NavigatorConfig, Page, PageState, ReturnPolicy,
};

const ANGLE_ROW: usize = 1;
const ALTITUDE_MODE_ROW: usize = 4;
const DESCENT_DIST_ROW: usize = 5;
const ARM_WITHOUT_FIX_ROW: usize = 14;
const THROTTLE_P_ROW: usize = 1;

fn open(live: &mut GpsRescueConfig) -> (Navigator, RescueMenu) {
    let mut menu = RescueMenu::new();
    let mut nav = Navigator::new(NavigatorConfig::default());
    nav.open(&mut menu, live, RescueMenu::ROOT).unwrap();
    (nav, menu)
}

// ── Staged edit lifecycle ───────────────────────────────────────────────

#[test]
fn angle_clamps_and_commits() {
    let mut live = GpsRescueConfig {
        angle: 35,
        ..GpsRescueConfig::default()
    };
    let (mut nav, mut menu) = open(&mut live);
    assert_eq!(menu.main().staging().angle, 35);

    assert_eq!(
        nav.edit_at(&mut menu, ANGLE_ROW, Edit::Step(300)),
        Ok(EntryValue::Number(200))
    );
    assert_eq!(live.angle, 35, "live untouched until commit");

    nav.commit(&mut menu, &mut live).unwrap();
    assert_eq!(live.angle, 200);
    assert!(nav.restart_pending());
}

#[test]
fn enter_and_commit_without_edits_is_identity() {
    let mut live = GpsRescueConfig::default();
    let (mut nav, mut menu) = open(&mut live);
    nav.close(&mut menu, &mut live, ExitMode::Save).unwrap();
    assert_eq!(live, GpsRescueConfig::default());
    assert!(!nav.restart_pending());
}

#[test]
fn out_of_range_live_value_is_clamped_on_first_edit() {
    // Firmware default descent distance sits below the menu's minimum.
    let mut live = GpsRescueConfig::default();
    assert_eq!(live.descent_distance_m, 20);
    let (mut nav, mut menu) = open(&mut live);
    assert_eq!(menu.main().staging().descent_distance_m, 20);

    assert_eq!(
        nav.edit_at(&mut menu, DESCENT_DIST_ROW, Edit::DECREMENT),
        Ok(EntryValue::Number(30))
    );
    nav.commit(&mut menu, &mut live).unwrap();
    assert_eq!(live.descent_distance_m, 30);
}

#[test]
fn altitude_mode_tab_stays_in_table() {
    let mut live = GpsRescueConfig::default();
    let (mut nav, mut menu) = open(&mut live);
    assert_eq!(
        nav.edit_at(&mut menu, ALTITUDE_MODE_ROW, Edit::Step(7)),
        Ok(EntryValue::Choice(Some("CURRENT_ALT")))
    );
    assert_eq!(
        nav.edit_at(&mut menu, ALTITUDE_MODE_ROW, Edit::DECREMENT),
        Ok(EntryValue::Choice(Some("FIXED_ALT")))
    );
    nav.commit(&mut menu, &mut live).unwrap();
    assert_eq!(live.altitude_mode, 1);
}

#[test]
fn corrupt_altitude_mode_shows_no_label_until_edited() {
    let mut live = GpsRescueConfig {
        altitude_mode: 7,
        ..GpsRescueConfig::default()
    };
    let (mut nav, mut menu) = open(&mut live);
    let view = menu.main().entry(ALTITUDE_MODE_ROW).unwrap();
    assert_eq!(view.value, Some(EntryValue::Choice(None)));

    assert_eq!(
        nav.edit_at(&mut menu, ALTITUDE_MODE_ROW, Edit::Toggle),
        Ok(EntryValue::Choice(Some("CURRENT_ALT")))
    );
    nav.commit(&mut menu, &mut live).unwrap();
    assert_eq!(live.altitude_mode, 2);
}

#[test]
fn corrupt_altitude_mode_survives_unedited_commit() {
    let mut live = GpsRescueConfig {
        altitude_mode: 7,
        ..GpsRescueConfig::default()
    };
    let (mut nav, mut menu) = open(&mut live);
    nav.commit(&mut menu, &mut live).unwrap();
    assert_eq!(live.altitude_mode, 7);
    assert!(!nav.restart_pending());
}

#[test]
fn arm_without_fix_toggles() {
    let mut live = GpsRescueConfig::default();
    let (mut nav, mut menu) = open(&mut live);
    assert_eq!(
        nav.edit_at(&mut menu, ARM_WITHOUT_FIX_ROW, Edit::Toggle),
        Ok(EntryValue::Flag(true))
    );
    nav.commit(&mut menu, &mut live).unwrap();
    assert!(live.allow_arming_without_fix);

    let mut fresh = GpsRescueConfig::default();
    let (mut nav, mut menu) = open(&mut fresh);
    nav.edit_at(&mut menu, ARM_WITHOUT_FIX_ROW, Edit::Toggle).unwrap();
    nav.edit_at(&mut menu, ARM_WITHOUT_FIX_ROW, Edit::Toggle).unwrap();
    nav.commit(&mut menu, &mut fresh).unwrap();
    assert!(!fresh.allow_arming_without_fix);
}

#[test]
fn abandon_discards_staged_edits() {
    let mut live = GpsRescueConfig::default();
    let (mut nav, mut menu) = open(&mut live);
    nav.edit_at(&mut menu, ANGLE_ROW, Edit::Set(120)).unwrap();
    nav.edit_at(&mut menu, ARM_WITHOUT_FIX_ROW, Edit::Toggle).unwrap();

    nav.abandon(&mut menu);
    assert_eq!(live, GpsRescueConfig::default());
    assert_eq!(menu.main().state(), PageState::Inactive);
    assert!(!nav.restart_pending());
}

// ── PID sub-page ────────────────────────────────────────────────────────

#[test]
fn pid_submenu_stages_independently() {
    let mut live = GpsRescueConfig::default();
    let (mut nav, mut menu) = open(&mut live);
    nav.edit_at(&mut menu, ANGLE_ROW, Edit::Set(50)).unwrap();

    assert_eq!(
        nav.activate(&mut menu, &mut live, PID_SUBMENU_ROW),
        Ok(Navigation::Entered(GPS_RESCUE_PID))
    );
    assert_eq!(live.angle, 50, "parent committed before the child entered");
    assert_eq!(menu.pid().staging().throttle_p, 150);

    // A concurrent write to a parent field while the child is open.
    live.angle = 60;
    nav.edit_at(&mut menu, THROTTLE_P_ROW, Edit::Set(900)).unwrap();
    assert_eq!(
        nav.commit(&mut menu, &mut live),
        Ok(Navigation::Returned(GPS_RESCUE))
    );

    assert_eq!(live.throttle_p, 500);
    assert_eq!(live.angle, 60, "child commit leaves parent fields alone");
    assert_eq!(menu.main().staging().angle, 50, "parent staging untouched");
    assert_eq!(nav.cursor(), Some(PID_SUBMENU_ROW));
}

#[test]
fn resync_rereads_parent_after_pid_page() {
    let mut live = GpsRescueConfig::default();
    let mut menu = RescueMenu::new();
    let mut nav = Navigator::new(NavigatorConfig::default().return_policy(ReturnPolicy::Resync));
    nav.open(&mut menu, &mut live, GPS_RESCUE).unwrap();
    nav.activate(&mut menu, &mut live, PID_SUBMENU_ROW).unwrap();

    live.angle = 60;
    nav.commit(&mut menu, &mut live).unwrap();
    assert_eq!(menu.main().staging().angle, 60);
}

#[test]
fn close_with_save_commits_both_pages() {
    let mut live = GpsRescueConfig::default();
    let mut menu = RescueMenu::new();
    let mut nav = Navigator::new(NavigatorConfig::default().commit_on_submenu(false));
    nav.open(&mut menu, &mut live, GPS_RESCUE).unwrap();
    nav.edit_at(&mut menu, ANGLE_ROW, Edit::Set(40)).unwrap();
    nav.activate(&mut menu, &mut live, PID_SUBMENU_ROW).unwrap();
    assert_eq!(live.angle, 32, "parent not committed yet");
    nav.edit_at(&mut menu, THROTTLE_P_ROW, Edit::Set(200)).unwrap();

    nav.close(&mut menu, &mut live, ExitMode::Save).unwrap();
    assert_eq!((live.angle, live.throttle_p), (40, 200));
    assert!(!nav.is_open());
}

#[test]
fn pid_page_cannot_be_pushed_twice() {
    let mut live = GpsRescueConfig::default();
    let (mut nav, mut menu) = open(&mut live);
    nav.activate(&mut menu, &mut live, PID_SUBMENU_ROW).unwrap();
    assert_eq!(
        nav.push(&mut menu, &mut live, GPS_RESCUE_PID),
        Err(MenuError::AlreadyOpen(GPS_RESCUE_PID))
    );
}

// ── Screens ─────────────────────────────────────────────────────────────

#[test]
fn main_page_screen() {
    let op = Operator::opened(
        RescueMenu::new(),
        GpsRescueConfig::default(),
        NavigatorConfig::default(),
        RescueMenu::ROOT,
    );
    assert_screen!("rescue_main_defaults", &op.screen());
}

#[test]
fn pid_page_screen_after_edits() {
    let mut op = Operator::opened(
        RescueMenu::new(),
        GpsRescueConfig::default(),
        NavigatorConfig::default(),
        RescueMenu::ROOT,
    );
    op.run("up up enter right*5 down left*20").unwrap();
    assert_eq!(op.navigator().active(), Some(GPS_RESCUE_PID));
    assert_screen!("rescue_pid_edited", &op.screen());

    op.run("esc").unwrap();
    assert_eq!(op.live().throttle_p, 155);
    assert_eq!(op.live().throttle_i, 0);
}
