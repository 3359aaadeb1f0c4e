//! Key handling and screen rendering against a small two-page fixture.

use osdmenu_core::{BoolWidget, MenuEntry, PageId, ScalarWidget, TabWidget, field};
use osdmenu_harness::{Key, Operator, RESTART_BANNER, assert_screen};
use osdmenu_runtime::{
    ExitTrigger, HookResult, MenuError, MenuPage, Navigation, NavigatorConfig, Page, PageHooks,
    PageSet,
};

const HOME: PageId = PageId("HOME");
const MORE: PageId = PageId("MORE");

#[derive(Debug, Clone, Default, PartialEq)]
struct Live {
    rate: u8,
    mode: u8,
    beep: bool,
    gain: u8,
}

#[derive(Debug, Clone, Default)]
struct HomeCells {
    rate: u8,
    mode: u8,
    beep: bool,
}

#[derive(Debug, Clone, Default)]
struct MoreCells {
    gain: u8,
}

static HOME_ENTRIES: [MenuEntry<HomeCells>; 7] = [
    MenuEntry::label("-- HOME --"),
    MenuEntry::uint8("RATE", ScalarWidget::new(field!(HomeCells, rate), 0, 100, 1)),
    MenuEntry::tab("MODE", TabWidget::new(field!(HomeCells, mode), &["SLOW", "FAST"])),
    MenuEntry::boolean("BEEP", BoolWidget::new(field!(HomeCells, beep))).reboot_required(),
    MenuEntry::submenu("MORE", MORE),
    MenuEntry::back(),
    MenuEntry::end(),
];

static MORE_ENTRIES: [MenuEntry<MoreCells>; 4] = [
    MenuEntry::label("-- MORE --"),
    MenuEntry::uint8("GAIN", ScalarWidget::new(field!(MoreCells, gain), 0, 10, 2)),
    MenuEntry::back(),
    MenuEntry::end(),
];

fn home_enter(s: &mut HomeCells, live: &Live) -> HookResult {
    s.rate = live.rate;
    s.mode = live.mode;
    s.beep = live.beep;
    Ok(())
}

fn home_exit(s: &HomeCells, live: &mut Live, _: ExitTrigger) -> HookResult {
    live.rate = s.rate;
    live.mode = s.mode;
    live.beep = s.beep;
    Ok(())
}

fn more_enter(s: &mut MoreCells, live: &Live) -> HookResult {
    s.gain = live.gain;
    Ok(())
}

fn more_exit(s: &MoreCells, live: &mut Live, _: ExitTrigger) -> HookResult {
    live.gain = s.gain;
    Ok(())
}

struct Fixture {
    home: MenuPage<HomeCells, Live>,
    more: MenuPage<MoreCells, Live>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            home: MenuPage::new(
                HOME,
                &HOME_ENTRIES,
                HomeCells::default(),
                PageHooks::new(home_enter, home_exit),
            ),
            more: MenuPage::new(
                MORE,
                &MORE_ENTRIES,
                MoreCells::default(),
                PageHooks::new(more_enter, more_exit),
            ),
        }
    }
}

impl PageSet<Live> for Fixture {
    fn page(&self, id: PageId) -> Option<&dyn Page<Live>> {
        match id {
            HOME => Some(&self.home),
            MORE => Some(&self.more),
            _ => None,
        }
    }

    fn page_mut(&mut self, id: PageId) -> Option<&mut dyn Page<Live>> {
        match id {
            HOME => Some(&mut self.home),
            MORE => Some(&mut self.more),
            _ => None,
        }
    }
}

fn operator(live: Live) -> Operator<Live, Fixture> {
    Operator::opened(Fixture::new(), live, NavigatorConfig::default(), HOME)
}

#[test]
fn home_screen_renders() {
    let op = operator(Live {
        rate: 42,
        ..Live::default()
    });
    assert_screen!("fixture_home", &op.screen());
}

#[test]
fn left_right_step_widgets() {
    let mut op = operator(Live::default());
    op.run("right*3 left").unwrap();
    assert_eq!(op.pages().home.staging().rate, 2);

    op.run("down right right").unwrap();
    assert_eq!(op.pages().home.staging().mode, 1, "tab saturates at last label");

    op.run("down enter enter enter").unwrap();
    assert!(op.pages().home.staging().beep);
    assert_eq!(op.live(), &Live::default(), "nothing committed yet");
}

#[test]
fn enter_opens_submenu_and_esc_commits() {
    let mut op = operator(Live::default());
    op.run("down*3").unwrap();
    assert_eq!(op.press(Key::Enter), Ok(Navigation::Entered(MORE)));
    assert_eq!(op.navigator().cursor(), Some(1));

    op.run("right*9").unwrap();
    assert_eq!(op.press(Key::Esc), Ok(Navigation::Returned(HOME)));
    assert_eq!(op.live().gain, 10);
    assert_eq!(op.navigator().cursor(), Some(4), "parent cursor restored");
}

#[test]
fn right_on_back_row_pops() {
    let mut op = operator(Live::default());
    op.run("up").unwrap();
    assert_eq!(op.press(Key::Right), Ok(Navigation::Closed));
    assert!(!op.navigator().is_open());
    assert_eq!(op.screen(), "");
    assert_eq!(op.press(Key::Down), Err(MenuError::EmptyStack));
}

#[test]
fn restart_banner_follows_flagged_commit() {
    let mut op = operator(Live::default());
    op.run("down down enter").unwrap();
    op.run("down").unwrap();
    op.press(Key::Enter).unwrap();
    assert!(op.navigator().restart_pending());
    assert!(op.screen().ends_with(RESTART_BANNER));
    assert!(op.live().beep);

    op.navigator_mut().acknowledge_restart();
    assert!(!op.screen().contains("REBOOT"));
}

#[test]
fn transcript_records_every_press() {
    let mut op = operator(Live::default());
    op.run("down right").unwrap();
    let _ = op.press(Key::Esc);
    let _ = op.press(Key::Esc);

    assert_eq!(op.transcript().len(), 4);
    let lines: Vec<serde_json::Value> = op
        .transcript_jsonl()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines[0]["key"], "down");
    assert_eq!(lines[0]["cursor"], 2);
    assert_eq!(lines[1]["page"], "HOME");
    assert_eq!(lines[2]["outcome"], "Closed");
    assert_eq!(lines[3]["outcome"], "error");
    assert_eq!(lines[3]["error"], "no active page");
    assert!(lines[3]["page"].is_null());
}

#[test]
fn commit_overwrites_concurrent_live_edits() {
    let mut op = operator(Live::default());
    op.live_mut().rate = 77;
    op.run("down*3 enter esc").unwrap();
    assert_eq!(op.pages().home.staging().rate, 0, "preserve keeps old staging");

    op.run("esc").unwrap();
    op.open(HOME).unwrap();
    let (_, fixture, live) = op.into_parts();
    assert_eq!(fixture.home.staging().rate, 0);
    assert_eq!(live.rate, 0, "commit wrote the staged value over it");
}
