//! The page stack.
//!
//! The [`Navigator`] owns no pages. It keeps a bounded stack of frames
//! (page id plus cursor row) and drives the lifecycle of pages held in a
//! caller-provided [`PageSet`], borrowing live configuration only for the
//! duration of each transition.
//!
//! # Transitions
//!
//! | Call | Old top | New top |
//! |------|---------|---------|
//! | [`push`](Navigator::push) / submenu row | exit (commit) or suspend | enter |
//! | [`pop_to_parent`](Navigator::pop_to_parent) / Back row | exit (commit), discarded | resume or re-enter |
//! | [`close`](Navigator::close) `Save` | every frame exits, top first | none |
//! | [`abandon`](Navigator::abandon) | every frame dropped, no exit | none |
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Parent exit hook fails on push | Push aborted, parent stays active |
//! | Child enter hook fails on push | Push aborted, parent resumed with its staging |
//! | Exit hook fails on pop | Pop aborted, page stays active |
//! | Parent re-enter fails on pop (`Resync`) | Pop completes, parent resumed with preserved staging, error returned |
//! | Stack at capacity | `StackFull`, nothing changes |
//!
//! Only the old page's exit has completed when the new page's enter begins;
//! the two never overlap.

use osdmenu_core::{Edit, EntryTag, EntryValue, PageId};
use osdmenu_core::{debug, debug_span, info, trace, warn};

use crate::config::{DEFAULT_MAX_DEPTH, NavigatorConfig, ReturnPolicy};
use crate::error::{MenuError, MenuResult};
use crate::page::{ExitReport, ExitTrigger, Page};

/// Lookup from page id to page.
///
/// Implemented by the application's menu struct, which owns every page.
pub trait PageSet<C> {
    fn page(&self, id: PageId) -> Option<&dyn Page<C>>;

    fn page_mut(&mut self, id: PageId) -> Option<&mut dyn Page<C>>;
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Nothing moved (the row was a label or a widget).
    Stay,
    /// A page was pushed and is now active.
    Entered(PageId),
    /// The top page was popped; this parent is active again.
    Returned(PageId),
    /// The last page was popped.
    Closed,
}

/// How [`Navigator::close`] treats open pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitMode {
    /// Commit every open page, top first.
    Save,
    /// Drop every open page without committing.
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    page: PageId,
    cursor: usize,
}

/// Bounded page stack with lifecycle dispatch.
///
/// `N` is the static capacity; [`NavigatorConfig::max_depth`] can lower it.
#[derive(Debug, Clone)]
pub struct Navigator<const N: usize = DEFAULT_MAX_DEPTH> {
    frames: [Option<Frame>; N],
    depth: usize,
    config: NavigatorConfig,
    restart_pending: bool,
}

impl Navigator {
    /// Navigator with the default capacity.
    #[must_use]
    pub fn new(config: NavigatorConfig) -> Self {
        Self::bounded(config)
    }
}

impl<const N: usize> Default for Navigator<N> {
    fn default() -> Self {
        Self::bounded(NavigatorConfig::default())
    }
}

impl<const N: usize> Navigator<N> {
    /// Navigator with capacity `N`.
    #[must_use]
    pub fn bounded(config: NavigatorConfig) -> Self {
        Self {
            frames: [None; N],
            depth: 0,
            config,
            restart_pending: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Effective maximum depth.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.max_depth.min(N)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.depth > 0
    }

    /// The active page.
    #[must_use]
    pub fn active(&self) -> Option<PageId> {
        self.top().map(|frame| frame.page)
    }

    /// Cursor row on the active page.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.top().map(|frame| frame.cursor)
    }

    /// Open pages, root first.
    pub fn pages(&self) -> impl Iterator<Item = PageId> + '_ {
        self.frames[..self.depth]
            .iter()
            .flatten()
            .map(|frame| frame.page)
    }

    /// Whether `page` is anywhere on the stack.
    #[must_use]
    pub fn contains(&self, page: PageId) -> bool {
        self.pages().any(|open| open == page)
    }

    /// A commit changed a field flagged as needing a restart.
    #[must_use]
    pub fn restart_pending(&self) -> bool {
        self.restart_pending
    }

    /// Clear the restart latch once the operator has been told.
    pub fn acknowledge_restart(&mut self) {
        self.restart_pending = false;
    }

    fn top(&self) -> Option<Frame> {
        self.depth
            .checked_sub(1)
            .and_then(|index| self.frames[index])
    }

    fn top_mut(&mut self) -> Option<&mut Frame> {
        let index = self.depth.checked_sub(1)?;
        self.frames[index].as_mut()
    }

    fn place_cursor(&mut self, row: usize) {
        if let Some(frame) = self.top_mut() {
            frame.cursor = row;
        }
    }

    fn pop_frame(&mut self) -> Option<Frame> {
        let index = self.depth.checked_sub(1)?;
        self.depth = index;
        self.frames[index].take()
    }

    fn latch(&mut self, report: ExitReport) {
        if report.restart_required && !self.restart_pending {
            info!("restart required to apply committed settings");
            self.restart_pending = true;
        }
    }

    /// Open `root` as the first page. Same as [`push`](Self::push).
    pub fn open<C, P>(&mut self, pages: &mut P, live: &mut C, root: PageId) -> MenuResult<Navigation>
    where
        P: PageSet<C> + ?Sized,
    {
        self.push(pages, live, root)
    }

    /// Push `target` on top of the stack.
    ///
    /// The current page (if any) exits with [`ExitTrigger::Commit`] first, or
    /// is suspended when `commit_on_submenu` is off.
    pub fn push<C, P>(&mut self, pages: &mut P, live: &mut C, target: PageId) -> MenuResult<Navigation>
    where
        P: PageSet<C> + ?Sized,
    {
        self.push_from(pages, live, target, ExitTrigger::Commit)
    }

    fn push_from<C, P>(
        &mut self,
        pages: &mut P,
        live: &mut C,
        target: PageId,
        trigger: ExitTrigger,
    ) -> MenuResult<Navigation>
    where
        P: PageSet<C> + ?Sized,
    {
        let _span = debug_span!("menu_push", page = target.name(), depth = self.depth).entered();

        let capacity = self.capacity();
        if self.depth >= capacity {
            warn!(page = target.name(), depth = self.depth, "page stack full");
            return Err(MenuError::StackFull { depth: capacity });
        }
        if self.contains(target) {
            return Err(MenuError::AlreadyOpen(target));
        }
        if pages.page(target).is_none() {
            return Err(MenuError::MissingPage(target));
        }

        let parent = self.active();
        if let Some(parent_id) = parent {
            let parent_page = pages
                .page_mut(parent_id)
                .ok_or(MenuError::MissingPage(parent_id))?;
            if self.config.commit_on_submenu {
                let report = parent_page.exit(live, trigger)?;
                self.latch(report);
            } else {
                parent_page.suspend()?;
            }
        }

        let child = pages
            .page_mut(target)
            .ok_or(MenuError::MissingPage(target))?;
        let entered = child.enter(live).map(|()| first_selectable(&*child));

        match entered {
            Ok(cursor) => {
                self.frames[self.depth] = Some(Frame {
                    page: target,
                    cursor,
                });
                self.depth += 1;
                debug!(page = target.name(), depth = self.depth, "page pushed");
                Ok(Navigation::Entered(target))
            }
            Err(err) => {
                if let Some(parent_id) = parent
                    && let Some(parent_page) = pages.page_mut(parent_id)
                {
                    parent_page.resume()?;
                }
                Err(err)
            }
        }
    }

    /// Pop the active page, committing it, and re-activate its parent.
    pub fn pop_to_parent<C, P>(
        &mut self,
        pages: &mut P,
        live: &mut C,
        trigger: ExitTrigger,
    ) -> MenuResult<Navigation>
    where
        P: PageSet<C> + ?Sized,
    {
        let top = self.top().ok_or(MenuError::EmptyStack)?;
        let _span = debug_span!("menu_pop", page = top.page.name(), depth = self.depth).entered();

        let page = pages
            .page_mut(top.page)
            .ok_or(MenuError::MissingPage(top.page))?;
        let report = page.exit(live, trigger)?;
        self.latch(report);
        self.pop_frame();

        let Some(parent) = self.top() else {
            debug!(page = top.page.name(), "menu closed");
            return Ok(Navigation::Closed);
        };
        let parent_page = pages
            .page_mut(parent.page)
            .ok_or(MenuError::MissingPage(parent.page))?;
        match self.config.return_policy {
            ReturnPolicy::Preserve => parent_page.resume()?,
            ReturnPolicy::Resync => {
                if let Err(err) = parent_page.enter(live) {
                    parent_page.resume()?;
                    return Err(err);
                }
            }
        }
        debug!(page = parent.page.name(), depth = self.depth, "page returned");
        Ok(Navigation::Returned(parent.page))
    }

    /// External commit gesture: commit and pop the active page.
    pub fn commit<C, P>(&mut self, pages: &mut P, live: &mut C) -> MenuResult<Navigation>
    where
        P: PageSet<C> + ?Sized,
    {
        self.pop_to_parent(pages, live, ExitTrigger::Commit)
    }

    /// Target a submenu row would open, after the active page's redirect check.
    pub fn redirect<C, P>(&self, pages: &P, index: usize) -> MenuResult<PageId>
    where
        P: PageSet<C> + ?Sized,
    {
        let top = self.top().ok_or(MenuError::EmptyStack)?;
        let page = pages.page(top.page).ok_or(MenuError::MissingPage(top.page))?;
        let view = page.entry(index).ok_or(MenuError::EntryOutOfRange {
            page: top.page,
            index,
            len: page.entry_count(),
        })?;
        let declared = view.target.ok_or(MenuError::NotSubmenu {
            page: top.page,
            index,
        })?;
        match page.redirect(index) {
            Some(alternate) if alternate != declared => {
                debug!(
                    page = top.page.name(),
                    declared = declared.name(),
                    target = alternate.name(),
                    "submenu redirected"
                );
                Ok(alternate)
            }
            _ => Ok(declared),
        }
    }

    /// Act on the row under the cursor.
    pub fn select<C, P>(&mut self, pages: &mut P, live: &mut C) -> MenuResult<Navigation>
    where
        P: PageSet<C> + ?Sized,
    {
        let cursor = self.cursor().ok_or(MenuError::EmptyStack)?;
        self.activate(pages, live, cursor)
    }

    /// Act on row `index` of the active page.
    ///
    /// Submenu rows push their (possibly redirected) target; Back rows pop.
    /// Either way the cursor moves onto the row first, so a parent resumes
    /// on the submenu row it was left from. Every other row leaves the stack
    /// and cursor as they are.
    pub fn activate<C, P>(&mut self, pages: &mut P, live: &mut C, index: usize) -> MenuResult<Navigation>
    where
        P: PageSet<C> + ?Sized,
    {
        let top = self.top().ok_or(MenuError::EmptyStack)?;
        let page = pages.page(top.page).ok_or(MenuError::MissingPage(top.page))?;
        let view = page.entry(index).ok_or(MenuError::EntryOutOfRange {
            page: top.page,
            index,
            len: page.entry_count(),
        })?;
        match view.tag {
            EntryTag::Submenu => {
                self.place_cursor(index);
                let target = self.redirect::<C, P>(pages, index)?;
                self.push_from(pages, live, target, ExitTrigger::Entry(index))
            }
            EntryTag::Back => {
                self.place_cursor(index);
                self.pop_to_parent(pages, live, ExitTrigger::Entry(index))
            }
            EntryTag::Label | EntryTag::Scalar | EntryTag::Tab | EntryTag::Bool | EntryTag::End => {
                Ok(Navigation::Stay)
            }
        }
    }

    /// Edit the row under the cursor.
    pub fn edit<C, P>(&mut self, pages: &mut P, edit: Edit) -> MenuResult<EntryValue>
    where
        P: PageSet<C> + ?Sized,
    {
        let cursor = self.cursor().ok_or(MenuError::EmptyStack)?;
        self.edit_at(pages, cursor, edit)
    }

    /// Edit row `index` of the active page.
    pub fn edit_at<C, P>(&mut self, pages: &mut P, index: usize, edit: Edit) -> MenuResult<EntryValue>
    where
        P: PageSet<C> + ?Sized,
    {
        let top = self.top().ok_or(MenuError::EmptyStack)?;
        let page = pages
            .page_mut(top.page)
            .ok_or(MenuError::MissingPage(top.page))?;
        page.edit(index, edit)
    }

    /// Move the cursor `delta` selectable rows, wrapping at either end.
    ///
    /// Labels are skipped. Returns the new cursor row.
    pub fn move_cursor<C, P>(&mut self, pages: &P, delta: i32) -> MenuResult<usize>
    where
        P: PageSet<C> + ?Sized,
    {
        let top = self.top().ok_or(MenuError::EmptyStack)?;
        let page = pages.page(top.page).ok_or(MenuError::MissingPage(top.page))?;
        let selectable = (0..page.entry_count())
            .filter(|&index| is_selectable(page, index))
            .count();
        let mut cursor = top.cursor;
        if selectable > 0 {
            let steps = delta.unsigned_abs() as usize % selectable;
            for _ in 0..steps {
                match next_selectable(page, cursor, delta > 0) {
                    Some(next) => cursor = next,
                    None => break,
                }
            }
        }
        self.place_cursor(cursor);
        trace!(page = top.page.name(), cursor, "cursor moved");
        Ok(cursor)
    }

    /// Put the cursor on row `index` of the active page.
    pub fn set_cursor<C, P>(&mut self, pages: &P, index: usize) -> MenuResult<()>
    where
        P: PageSet<C> + ?Sized,
    {
        let top = self.top().ok_or(MenuError::EmptyStack)?;
        let page = pages.page(top.page).ok_or(MenuError::MissingPage(top.page))?;
        let len = page.entry_count();
        if index >= len {
            return Err(MenuError::EntryOutOfRange {
                page: top.page,
                index,
                len,
            });
        }
        self.place_cursor(index);
        Ok(())
    }

    /// Leave the menu entirely.
    ///
    /// With [`ExitMode::Save`] every open page commits, top first. If one
    /// fails, that page is resumed as the active page and the error is
    /// returned with the pages below it still open.
    pub fn close<C, P>(&mut self, pages: &mut P, live: &mut C, mode: ExitMode) -> MenuResult<Navigation>
    where
        P: PageSet<C> + ?Sized,
    {
        match mode {
            ExitMode::Discard => {
                self.abandon(pages);
                Ok(Navigation::Closed)
            }
            ExitMode::Save => {
                while let Some(top) = self.top() {
                    let page = pages
                        .page_mut(top.page)
                        .ok_or(MenuError::MissingPage(top.page))?;
                    match page.exit(live, ExitTrigger::Commit) {
                        Ok(report) => {
                            self.latch(report);
                            self.pop_frame();
                        }
                        Err(err) => {
                            page.resume()?;
                            return Err(err);
                        }
                    }
                }
                debug!("menu closed with save");
                Ok(Navigation::Closed)
            }
        }
    }

    /// Drop every open page without running exit hooks.
    ///
    /// Staged edits are lost; live configuration keeps its pre-edit values.
    pub fn abandon<C, P>(&mut self, pages: &mut P)
    where
        P: PageSet<C> + ?Sized,
    {
        while let Some(frame) = self.pop_frame() {
            if let Some(page) = pages.page_mut(frame.page) {
                page.abandon();
            }
        }
        debug!("menu abandoned");
    }
}

fn is_selectable<C>(page: &dyn Page<C>, index: usize) -> bool {
    page.entry(index).is_some_and(|view| view.is_selectable())
}

fn first_selectable<C>(page: &dyn Page<C>) -> usize {
    (0..page.entry_count())
        .find(|&index| is_selectable(page, index))
        .unwrap_or(0)
}

fn next_selectable<C>(page: &dyn Page<C>, from: usize, forward: bool) -> Option<usize> {
    let len = page.entry_count();
    if len == 0 {
        return None;
    }
    let mut index = from.min(len - 1);
    for _ in 0..len {
        index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if is_selectable(page, index) {
            return Some(index);
        }
    }
    None
}

/// Check that every page reachable from `root` through declared submenu
/// links exists. Returns the number of reachable pages.
///
/// Redirect targets are computed at runtime and cannot be checked here.
/// Cycles are tolerated; each page is visited once.
pub fn validate_graph<C, P>(pages: &P, root: PageId) -> MenuResult<usize>
where
    P: PageSet<C> + ?Sized,
{
    let mut visited: Vec<PageId> = Vec::new();
    let mut pending = vec![root];
    while let Some(id) = pending.pop() {
        if visited.contains(&id) {
            continue;
        }
        let page = pages.page(id).ok_or(MenuError::MissingPage(id))?;
        visited.push(id);
        pending.extend((0..page.entry_count()).filter_map(|index| page.entry(index)?.target));
    }
    Ok(visited.len())
}
