//! Property-based invariant tests for the page navigator.
//!
//! 1. Stack depth never exceeds the effective capacity.
//! 2. The top page is Active; pages below are Inactive or Suspended.
//! 3. Live values stay inside widget bounds after any operation sequence.
//! 4. Live configuration changes only through exit hooks.
//! 5. Abandoning the menu leaves live configuration exactly as it was.
//! 6. No panics on arbitrary key sequences.

use osdmenu_core::{Edit, MenuEntry, PageId, ScalarWidget, field};
use osdmenu_runtime::{
    ExitMode, ExitTrigger, HookResult, MenuPage, Navigator, NavigatorConfig, Page, PageHooks,
    PageSet, PageState, ReturnPolicy,
};
use proptest::prelude::*;

const ROOT: PageId = PageId("ROOT");
const MID: PageId = PageId("MID");
const LEAF: PageId = PageId("LEAF");

#[derive(Debug, Clone, Default, PartialEq)]
struct Live {
    values: [u16; 3],
    exits: u32,
}

#[derive(Debug, Clone, Default)]
struct Cells {
    value: u16,
}

static ROOT_ENTRIES: [MenuEntry<Cells>; 4] = [
    MenuEntry::uint16("VALUE", ScalarWidget::new(field!(Cells, value), 10, 90, 3)),
    MenuEntry::submenu("NEXT", MID),
    MenuEntry::back(),
    MenuEntry::end(),
];

static MID_ENTRIES: [MenuEntry<Cells>; 5] = [
    MenuEntry::label("-- MID --"),
    MenuEntry::uint16("VALUE", ScalarWidget::new(field!(Cells, value), 0, 500, 10)),
    MenuEntry::submenu("NEXT", LEAF),
    MenuEntry::back(),
    MenuEntry::end(),
];

static LEAF_ENTRIES: [MenuEntry<Cells>; 4] = [
    MenuEntry::uint16("VALUE", ScalarWidget::new(field!(Cells, value), 100, 200, 1)),
    MenuEntry::submenu("ROOT", ROOT),
    MenuEntry::back(),
    MenuEntry::end(),
];

const BOUNDS: [(u16, u16); 3] = [(10, 90), (0, 500), (100, 200)];

fn enter_at<const SLOT: usize>(s: &mut Cells, live: &Live) -> HookResult {
    s.value = live.values[SLOT];
    Ok(())
}

fn exit_at<const SLOT: usize>(s: &Cells, live: &mut Live, _: ExitTrigger) -> HookResult {
    live.values[SLOT] = s.value;
    live.exits += 1;
    Ok(())
}

struct Chain {
    pages: [MenuPage<Cells, Live>; 3],
}

impl Chain {
    fn new() -> Self {
        Self {
            pages: [
                MenuPage::new(
                    ROOT,
                    &ROOT_ENTRIES,
                    Cells::default(),
                    PageHooks::new(enter_at::<0>, exit_at::<0>),
                ),
                MenuPage::new(
                    MID,
                    &MID_ENTRIES,
                    Cells::default(),
                    PageHooks::new(enter_at::<1>, exit_at::<1>),
                ),
                MenuPage::new(
                    LEAF,
                    &LEAF_ENTRIES,
                    Cells::default(),
                    PageHooks::new(enter_at::<2>, exit_at::<2>),
                ),
            ],
        }
    }

    fn slot(id: PageId) -> Option<usize> {
        [ROOT, MID, LEAF].iter().position(|page| *page == id)
    }
}

impl PageSet<Live> for Chain {
    fn page(&self, id: PageId) -> Option<&dyn Page<Live>> {
        Self::slot(id).map(|slot| &self.pages[slot] as &dyn Page<Live>)
    }

    fn page_mut(&mut self, id: PageId) -> Option<&mut dyn Page<Live>> {
        Self::slot(id).map(|slot| &mut self.pages[slot] as &mut dyn Page<Live>)
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Move(i32),
    Step(i32),
    Set(i32),
    Select,
    Commit,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-3i32..=3).prop_map(Op::Move),
        (-40i32..=40).prop_map(Op::Step),
        (-1000i32..=1000).prop_map(Op::Set),
        Just(Op::Select),
        Just(Op::Commit),
    ]
}

fn config_strategy() -> impl Strategy<Value = NavigatorConfig> {
    (any::<bool>(), any::<bool>(), 1usize..=4).prop_map(|(resync, commit, depth)| {
        NavigatorConfig::default()
            .return_policy(if resync {
                ReturnPolicy::Resync
            } else {
                ReturnPolicy::Preserve
            })
            .commit_on_submenu(commit)
            .max_depth(depth)
    })
}

fn initial_live() -> Live {
    Live {
        values: [35, 250, 150],
        exits: 0,
    }
}

fn apply(nav: &mut Navigator, chain: &mut Chain, live: &mut Live, op: Op) {
    // Individual requests may fail (full stack, non-editable row); the
    // invariants must hold either way.
    let _ = match op {
        Op::Move(delta) => nav.move_cursor(chain, delta).map(|_| ()),
        Op::Step(steps) => nav.edit(chain, Edit::Step(steps)).map(|_| ()),
        Op::Set(value) => nav.edit(chain, Edit::Set(value)).map(|_| ()),
        Op::Select => nav.select(chain, live).map(|_| ()),
        Op::Commit => nav.commit(chain, live).map(|_| ()),
    };
}

fn check_stack(nav: &Navigator, chain: &Chain) -> Result<(), TestCaseError> {
    prop_assert!(nav.depth() <= nav.capacity());
    let open: Vec<PageId> = nav.pages().collect();
    for (depth, id) in open.iter().enumerate() {
        let state = chain.page(*id).map(|page| page.state());
        if depth + 1 == open.len() {
            prop_assert_eq!(state, Some(PageState::Active));
        } else {
            prop_assert!(matches!(
                state,
                Some(PageState::Inactive | PageState::Suspended)
            ));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn stack_shape_holds_for_any_sequence(
        config in config_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut live = initial_live();
        let mut chain = Chain::new();
        let mut nav = Navigator::new(config);
        nav.open(&mut chain, &mut live, ROOT).unwrap();

        for op in ops {
            apply(&mut nav, &mut chain, &mut live, op);
            check_stack(&nav, &chain)?;
            if !nav.is_open() {
                nav.open(&mut chain, &mut live, ROOT).unwrap();
            }
        }
    }

    #[test]
    fn live_values_stay_in_bounds(
        config in config_strategy(),
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut live = initial_live();
        let mut chain = Chain::new();
        let mut nav = Navigator::new(config);
        nav.open(&mut chain, &mut live, ROOT).unwrap();

        for op in ops {
            apply(&mut nav, &mut chain, &mut live, op);
            if !nav.is_open() {
                nav.open(&mut chain, &mut live, ROOT).unwrap();
            }
        }
        nav.close(&mut chain, &mut live, ExitMode::Save).unwrap();

        for (value, (min, max)) in live.values.iter().zip(BOUNDS) {
            prop_assert!((min..=max).contains(value), "{value} outside {min}..={max}");
        }
    }

    #[test]
    fn live_changes_only_through_exit_hooks(
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut live = initial_live();
        let mut chain = Chain::new();
        let mut nav = Navigator::new(NavigatorConfig::default());
        nav.open(&mut chain, &mut live, ROOT).unwrap();

        for op in ops {
            let before = live.clone();
            apply(&mut nav, &mut chain, &mut live, op);
            if live.exits == before.exits {
                prop_assert_eq!(&live, &before);
            }
            if !nav.is_open() {
                nav.open(&mut chain, &mut live, ROOT).unwrap();
            }
        }
    }

    #[test]
    fn abandon_leaves_live_untouched(
        edits in prop::collection::vec(-1000i32..=1000, 1..20),
    ) {
        let mut live = initial_live();
        let mut chain = Chain::new();
        let mut nav = Navigator::new(NavigatorConfig::default().commit_on_submenu(false));
        nav.open(&mut chain, &mut live, ROOT).unwrap();
        nav.set_cursor(&chain, 0).unwrap();
        for value in &edits {
            nav.edit(&mut chain, Edit::Set(*value)).unwrap();
        }
        nav.set_cursor(&chain, 1).unwrap();
        nav.select(&mut chain, &mut live).unwrap();
        nav.set_cursor(&chain, 1).unwrap();
        for value in &edits {
            nav.edit(&mut chain, Edit::Set(*value)).unwrap();
        }

        nav.close(&mut chain, &mut live, ExitMode::Discard).unwrap();
        prop_assert_eq!(live, initial_live());
        prop_assert!(!nav.is_open());
    }
}
