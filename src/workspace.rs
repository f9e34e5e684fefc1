//! The single owner of the committed tree and its counters.
//!
//! Every structural operation clones the committed root, transforms the
//! clone, and installs it atomically; failures leave the committed state
//! untouched. Drag and resize sessions live here too, including the two
//! session-scoped delayed tasks of a drag (idle preview, periodic
//! re-evaluation): they are plain deadline fields on the session value, so
//! dropping the session cancels them by construction.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

use crate::config::{LayoutConfig, PreviewMode};
use crate::drop::{self, DropResult};
use crate::geometry::Point;
use crate::layout::regions::BoundsProvider;
use crate::layout::tree::{self, PanelInfo};
use crate::layout::{Axis, Node, NodeFactory, NodeId, Tab};
use crate::resize::{self, ResizeHandle, ResizePlan};
use crate::zones::{Hover, ZoneResolver};

/// Interval of the periodic re-evaluation task that keeps overlay dimming in
/// sync while the pointer is stationary.
const REEVALUATE_INTERVAL: Duration = Duration::from_millis(70);

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("cannot remove the last remaining box")]
    LastBox,
    #[error("cannot create more boxes: max total box count is {0}")]
    BoxBudget(u32),
    #[error("drop blocked: {0}")]
    InvalidZone(String),
    #[error("no drop zone at this point")]
    NoZone,
    #[error("target is no longer present in the tree")]
    StaleTarget,
    #[error("no adjacent resize boundary for that handle")]
    NoResizeNeighbor,
    #[error("finish the current drag before resizing")]
    DragInProgress,
    #[error("no interaction session is active")]
    NoSession,
}

/// What a drag is carrying: `source_panel == None` means the tab was freshly
/// created and is not owned by any panel yet.
#[derive(Debug, Clone)]
pub struct DragContext {
    pub source_panel: Option<NodeId>,
    pub tab: Tab,
}

#[derive(Debug)]
struct DragSession {
    ctx: DragContext,
    last_point: Option<Point>,
    hover_anchor: Option<Point>,
    hover: Option<Hover>,
    idle_preview_at: Option<Instant>,
    next_reevaluate_at: Instant,
}

#[derive(Debug)]
struct ResizeSession {
    start: Point,
    base_root: Node,
    plans: Vec<ResizePlan>,
}

/// Session task that came due; the caller decides how to render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTask {
    /// The pointer has been still long enough to show the drop preview.
    PreviewDue,
    /// Periodic overlay re-evaluation tick.
    Reevaluate,
}

#[derive(Debug, Clone)]
pub struct DropReport {
    pub zone_summary: String,
    pub tab_num: u32,
    pub active_panel: NodeId,
}

pub struct Workspace {
    config: LayoutConfig,
    root: Node,
    active_panel: Option<NodeId>,
    preview_mode: PreviewMode,
    factory: NodeFactory,
    drag: Option<DragSession>,
    resize: Option<ResizeSession>,
}

impl Workspace {
    pub fn new(config: LayoutConfig) -> Self {
        let mut factory = NodeFactory::new();
        let root = factory.fallback_root();
        let active_panel = Some(root.id());
        let preview_mode = config.default_preview_mode;
        Self {
            config,
            root,
            active_panel,
            preview_mode,
            factory,
            drag: None,
            resize: None,
        }
    }

    /// Rebuild from restored persistent state. The caller has already
    /// validated the tree (see `persist`).
    pub fn from_parts(
        config: LayoutConfig,
        root: Node,
        active_panel: Option<NodeId>,
        preview_mode: PreviewMode,
        factory: NodeFactory,
    ) -> Self {
        Self {
            config,
            root,
            active_panel,
            preview_mode,
            factory,
            drag: None,
            resize: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn active_panel(&self) -> Option<NodeId> {
        self.active_panel
    }

    pub fn preview_mode(&self) -> PreviewMode {
        self.preview_mode
    }

    pub fn factory(&self) -> NodeFactory {
        self.factory
    }

    pub fn total_box_count(&self) -> usize {
        tree::total_box_count(&self.root)
    }

    pub fn panel_count(&self) -> usize {
        tree::panel_count(&self.root)
    }

    pub fn can_create_box(&self) -> bool {
        self.total_box_count() < self.config.max_total_box_count as usize
    }

    pub fn tree_string(&self) -> String {
        tree::tree_string(&self.root)
    }

    pub fn panel_info(&self, panel_id: NodeId) -> Option<PanelInfo> {
        tree::build_panel_info_map(&self.root).remove(&panel_id)
    }

    pub fn cycle_preview_mode(&mut self) -> PreviewMode {
        self.preview_mode = self.preview_mode.next();
        self.preview_mode
    }

    // ----- commands ------------------------------------------------------

    /// Create a box as a tab in the active panel, falling back to the first
    /// panel when nothing is selected.
    pub fn create_box(&mut self) -> Result<u32, LayoutError> {
        if !self.can_create_box() {
            return Err(LayoutError::BoxBudget(self.config.max_total_box_count));
        }
        let tab = self.factory.new_tab();
        let num = tab.num;

        let target = self
            .active_panel
            .filter(|id| {
                tree::find(&self.root, *id).is_some_and(|found| found.node.is_panel())
            })
            .or_else(|| tree::first_panel(&self.root).map(|p| p.id));

        match target {
            Some(panel_id) => {
                let Some(panel) = tree::find_panel_mut(&mut self.root, panel_id) else {
                    return Err(LayoutError::StaleTarget);
                };
                panel.active_tab_id = Some(tab.id);
                panel.tabs.push(tab);
                self.active_panel = Some(panel_id);
            }
            None => {
                let root = self.factory.panel(tab);
                self.active_panel = Some(root.id());
                self.root = root;
            }
        }
        debug!(num, tree = %self.tree_string(), "box created");
        Ok(num)
    }

    /// Close one tab; removing a panel's last tab collapses the panel away.
    /// Removing the very last box of the whole tree is refused.
    pub fn close_tab(&mut self, panel_id: NodeId, tab_id: NodeId) -> Result<u32, LayoutError> {
        let mut next = self.root.clone();
        let Some(panel) = tree::find_panel_mut(&mut next, panel_id) else {
            return Err(LayoutError::StaleTarget);
        };
        let Some(idx) = panel.tab_index(tab_id) else {
            return Err(LayoutError::StaleTarget);
        };

        let only_box_in_only_panel =
            tree::panel_count(&self.root) == 1 && panel.tabs.len() == 1;
        if only_box_in_only_panel {
            return Err(LayoutError::LastBox);
        }

        let removed = panel.tabs.remove(idx);
        if panel.active_tab_id == Some(removed.id) {
            panel.active_tab_id = panel.tabs.first().map(|t| t.id);
        }

        if panel.tabs.is_empty() {
            let factory = &mut self.factory;
            self.root = tree::remove_and_collapse(&next, panel_id, || factory.fallback_root());
            if self.active_panel == Some(panel_id) {
                self.active_panel = tree::first_panel(&self.root).map(|p| p.id);
            }
        } else {
            self.root = next;
        }
        debug!(num = removed.num, tree = %self.tree_string(), "box removed");
        Ok(removed.num)
    }

    pub fn activate_tab(&mut self, panel_id: NodeId, tab_id: NodeId) -> Result<(), LayoutError> {
        let mut next = self.root.clone();
        let Some(panel) = tree::find_panel_mut(&mut next, panel_id) else {
            return Err(LayoutError::StaleTarget);
        };
        if panel.tab_index(tab_id).is_none() {
            return Err(LayoutError::StaleTarget);
        }
        panel.active_tab_id = Some(tab_id);
        self.root = next;
        self.active_panel = Some(panel_id);
        Ok(())
    }

    pub fn select_panel(&mut self, panel_id: NodeId) -> bool {
        let is_panel =
            tree::find(&self.root, panel_id).is_some_and(|found| found.node.is_panel());
        if is_panel {
            self.active_panel = Some(panel_id);
        }
        is_panel
    }

    /// Back to one panel with one box; counters restart as well.
    pub fn reset(&mut self) {
        self.drag = None;
        self.resize = None;
        self.factory = NodeFactory::new();
        self.root = self.factory.fallback_root();
        self.active_panel = Some(self.root.id());
        self.preview_mode = self.config.default_preview_mode;
        debug!("workspace reset");
    }

    // ----- drag session --------------------------------------------------

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_context(&self) -> Option<&DragContext> {
        self.drag.as_ref().map(|s| &s.ctx)
    }

    pub fn drag_hover(&self) -> Option<&Hover> {
        self.drag.as_ref().and_then(|s| s.hover.as_ref())
    }

    fn new_session(&self, ctx: DragContext, point: Point, now: Instant) -> DragSession {
        DragSession {
            ctx,
            last_point: Some(point),
            hover_anchor: Some(point),
            hover: None,
            idle_preview_at: Some(now + Duration::from_millis(self.config.preview_idle_ms)),
            next_reevaluate_at: now + REEVALUATE_INTERVAL,
        }
    }

    /// Start dragging an existing tab out of its panel.
    pub fn start_tab_drag(
        &mut self,
        panel_id: NodeId,
        tab_id: NodeId,
        point: Point,
        now: Instant,
    ) -> Result<DragContext, LayoutError> {
        if self.resize.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        let tab = tree::find(&self.root, panel_id)
            .and_then(|found| found.node.as_panel())
            .and_then(|panel| panel.tabs.iter().find(|t| t.id == tab_id))
            .cloned()
            .ok_or(LayoutError::StaleTarget)?;
        let ctx = DragContext {
            source_panel: Some(panel_id),
            tab,
        };
        debug!(num = ctx.tab.num, "tab drag started");
        self.drag = Some(self.new_session(ctx.clone(), point, now));
        Ok(ctx)
    }

    /// Start dragging a freshly created box. The box number is consumed even
    /// if the drag is later canceled; numbers are never reused.
    pub fn start_create_drag(
        &mut self,
        point: Point,
        now: Instant,
    ) -> Result<DragContext, LayoutError> {
        if self.resize.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        if !self.can_create_box() {
            return Err(LayoutError::BoxBudget(self.config.max_total_box_count));
        }
        let tab = self.factory.new_tab();
        let ctx = DragContext {
            source_panel: None,
            tab,
        };
        debug!(num = ctx.tab.num, "create drag started");
        self.drag = Some(self.new_session(ctx.clone(), point, now));
        Ok(ctx)
    }

    /// Track pointer movement. Hover is re-resolved when the pointer leaves
    /// the jitter-filter radius around the last anchor, and the idle preview
    /// deadline restarts on every such re-anchor.
    pub fn drag_move(
        &mut self,
        point: Point,
        provider: &dyn BoundsProvider,
        now: Instant,
    ) -> Result<Option<Hover>, LayoutError> {
        let threshold = self.config.preview_move_threshold_px;
        let idle_ms = self.config.preview_idle_ms;
        let Some(session) = self.drag.as_mut() else {
            return Err(LayoutError::NoSession);
        };
        session.last_point = Some(point);
        let moved = session
            .hover_anchor
            .map_or(f64::INFINITY, |anchor| anchor.distance_to(point));
        if moved > threshold || session.hover.is_none() {
            session.hover_anchor = Some(point);
            session.idle_preview_at = Some(now + Duration::from_millis(idle_ms));
            let resolver = ZoneResolver::new(&self.root, provider, &self.config);
            let hover = resolver.resolve(point);
            let session = self.drag.as_mut().ok_or(LayoutError::NoSession)?;
            session.hover = hover;
        }
        Ok(self.drag.as_ref().and_then(|s| s.hover.clone()))
    }

    /// Deadline check for the session's two delayed tasks. Returns every
    /// task that came due at `now`; the idle preview fires once per anchor,
    /// the re-evaluation tick reschedules itself.
    pub fn poll_drag_tasks(&mut self, now: Instant) -> Vec<DragTask> {
        let mut due = Vec::new();
        let Some(session) = self.drag.as_mut() else {
            return due;
        };
        if session.idle_preview_at.is_some_and(|at| now >= at) {
            session.idle_preview_at = None;
            due.push(DragTask::PreviewDue);
        }
        if now >= session.next_reevaluate_at {
            session.next_reevaluate_at = now + REEVALUATE_INTERVAL;
            due.push(DragTask::Reevaluate);
        }
        due
    }

    /// Hypothetical tree for the current hover zone, computed in an isolated
    /// id/number namespace. Never touches the committed tree or counters.
    pub fn preview_tree(&self) -> Option<Node> {
        let session = self.drag.as_ref()?;
        let hover = session.hover.as_ref()?;
        if !hover.zone.is_valid() {
            return None;
        }
        drop::preview_drop(
            &self.root,
            &hover.zone,
            &session.ctx.tab,
            session.ctx.source_panel,
            &self.factory,
        )
    }

    /// Drop at `point`, preferring the session's resolved hover zone and
    /// falling back to a fresh resolution (the pointer may have moved since
    /// the last anchor).
    pub fn drop_at(
        &mut self,
        point: Point,
        provider: &dyn BoundsProvider,
    ) -> Result<DropReport, LayoutError> {
        let Some(session) = self.drag.take() else {
            return Err(LayoutError::NoSession);
        };
        let hover = session.hover.clone().or_else(|| {
            ZoneResolver::new(&self.root, provider, &self.config).resolve(point)
        });
        let Some(hover) = hover else {
            return Err(LayoutError::NoZone);
        };
        if !hover.zone.is_valid() {
            return Err(LayoutError::InvalidZone(hover.zone.reason.clone()));
        }
        if session.ctx.source_panel.is_none() && !self.can_create_box() {
            return Err(LayoutError::BoxBudget(self.config.max_total_box_count));
        }

        let Some(DropResult { root, active_panel }) = drop::execute_drop(
            &self.root,
            &hover.zone,
            &session.ctx.tab,
            session.ctx.source_panel,
            &mut self.factory,
        ) else {
            return Err(LayoutError::StaleTarget);
        };
        self.root = root;
        self.active_panel = Some(active_panel);
        let summary = zone_summary(&hover.zone);
        debug!(num = session.ctx.tab.num, zone = %summary, tree = %self.tree_string(), "drop committed");
        Ok(DropReport {
            zone_summary: summary,
            tab_num: session.ctx.tab.num,
            active_panel,
        })
    }

    /// Abandon the drag; the committed tree was never touched, and the
    /// session's delayed tasks die with the session value.
    pub fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            debug!("drag canceled");
        }
    }

    // ----- resize session ------------------------------------------------

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Begin a snapped resize from a panel handle. Builds one plan per
    /// handle side; refused when no side has an eligible neighbor.
    pub fn start_resize(
        &mut self,
        panel_id: NodeId,
        handle: ResizeHandle,
        point: Point,
        provider: &dyn BoundsProvider,
    ) -> Result<(), LayoutError> {
        if self.drag.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        let info = self.panel_info(panel_id).ok_or(LayoutError::StaleTarget)?;
        let plans: Vec<ResizePlan> = handle
            .sides()
            .iter()
            .filter_map(|&side| resize::build_plan(&self.root, &info, side, provider, &self.config))
            .collect();
        if plans.is_empty() {
            return Err(LayoutError::NoResizeNeighbor);
        }
        self.active_panel = Some(panel_id);
        debug!(panel = %panel_id, plans = plans.len(), "resize session started");
        self.resize = Some(ResizeSession {
            start: point,
            base_root: self.root.clone(),
            plans,
        });
        Ok(())
    }

    /// Begin a resize from a bare sibling boundary (no handle needed).
    pub fn start_gap_resize(
        &mut self,
        point: Point,
        provider: &dyn BoundsProvider,
    ) -> Result<(), LayoutError> {
        if self.drag.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        let candidate = resize::find_gap_candidate(&self.root, provider, &self.config, point)
            .ok_or(LayoutError::NoResizeNeighbor)?;
        self.start_resize(candidate.panel_id, candidate.handle, point, provider)
    }

    /// Idle affordance: the axis of the boundary under the pointer, if any.
    /// Suppressed while a drag or resize session is active.
    pub fn gap_hover_axis(
        &self,
        point: Point,
        provider: &dyn BoundsProvider,
    ) -> Option<Axis> {
        if self.drag.is_some() || self.resize.is_some() {
            return None;
        }
        resize::find_gap_candidate(&self.root, provider, &self.config, point)
            .map(|candidate| candidate.axis)
    }

    /// Recompute the working tree from the total delta against the frozen
    /// base. Returns whether any snapped pair changed this tick.
    pub fn resize_move(&mut self, point: Point) -> Result<bool, LayoutError> {
        let Some(session) = self.resize.as_ref() else {
            return Err(LayoutError::NoSession);
        };
        let delta_x = point.x - session.start.x;
        let delta_y = point.y - session.start.y;
        let mut next = session.base_root.clone();
        let mut changed = false;
        for plan in &session.plans {
            changed = resize::apply_plan(&mut next, plan, delta_x, delta_y) || changed;
        }
        self.root = next;
        Ok(changed)
    }

    /// Keep the working tree as the committed one.
    pub fn commit_resize(&mut self) -> Result<(), LayoutError> {
        if self.resize.take().is_none() {
            return Err(LayoutError::NoSession);
        }
        debug!(tree = %self.tree_string(), "resize committed");
        Ok(())
    }

    /// Restore the exact pre-session tree.
    pub fn cancel_resize(&mut self) {
        if let Some(session) = self.resize.take() {
            self.root = session.base_root;
            debug!("resize canceled");
        }
    }
}

pub fn zone_summary(zone: &crate::zones::DropZone) -> String {
    use crate::zones::DropAction;
    let kind = match &zone.action {
        DropAction::Stack { .. } => "STACK",
        DropAction::Split { .. } => "SPLIT",
        DropAction::Equalize { .. } => "EQUALIZE",
        DropAction::Wrap { .. } => "WRAP",
        DropAction::Invalid { .. } => "INVALID",
    };
    match zone.side {
        Some(side) => format!("{kind} | layer={} dir={}", zone.layer, side.label()),
        None => format!("{kind} | layer={}", zone.layer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;
    use crate::layout::regions::TreeBounds;

    fn workspace_bounds() -> Bounds {
        Bounds::new(0.0, 0.0, 1200.0, 800.0)
    }

    fn project(ws: &Workspace) -> TreeBounds {
        TreeBounds::project(ws.root(), workspace_bounds(), 0.0)
    }

    fn now() -> Instant {
        Instant::now()
    }

    #[test]
    fn create_box_stacks_into_active_panel() {
        let mut ws = Workspace::new(LayoutConfig::default());
        assert_eq!(ws.total_box_count(), 1);
        let num = ws.create_box().unwrap();
        assert_eq!(num, 2);
        assert_eq!(ws.total_box_count(), 2);
        assert_eq!(ws.panel_count(), 1);
    }

    #[test]
    fn create_box_respects_budget() {
        let config = LayoutConfig {
            max_total_box_count: 2,
            ..LayoutConfig::default()
        };
        let mut ws = Workspace::new(config);
        ws.create_box().unwrap();
        assert!(matches!(ws.create_box(), Err(LayoutError::BoxBudget(2))));
    }

    #[test]
    fn closing_last_box_is_refused() {
        let mut ws = Workspace::new(LayoutConfig::default());
        let panel_id = ws.root().id();
        let tab_id = ws.root().as_panel().unwrap().tabs[0].id;
        assert!(matches!(
            ws.close_tab(panel_id, tab_id),
            Err(LayoutError::LastBox)
        ));
        assert_eq!(ws.total_box_count(), 1);
    }

    #[test]
    fn drag_to_left_edge_splits_and_commits() {
        let mut ws = Workspace::new(LayoutConfig::default());
        ws.create_box().unwrap();
        let panel_id = ws.root().id();
        let tab_id = ws.root().as_panel().unwrap().tabs[1].id;
        let tb = project(&ws);

        ws.start_tab_drag(panel_id, tab_id, Point::new(600.0, 400.0), now())
            .unwrap();
        ws.drag_move(Point::new(10.0, 400.0), &tb, now()).unwrap();
        let report = ws.drop_at(Point::new(10.0, 400.0), &tb).unwrap();
        assert!(report.zone_summary.starts_with("SPLIT"));
        let c = ws.root().as_container().unwrap();
        assert_eq!(c.axis, Axis::Column);
        assert_eq!(c.sizes, vec![0.5, 0.5]);
        assert!(!ws.is_dragging());
    }

    #[test]
    fn cancel_drag_restores_nothing_but_state() {
        let mut ws = Workspace::new(LayoutConfig::default());
        ws.create_box().unwrap();
        let before = ws.tree_string();
        let panel_id = ws.root().id();
        let tab_id = ws.root().as_panel().unwrap().tabs[0].id;
        ws.start_tab_drag(panel_id, tab_id, Point::new(1.0, 1.0), now())
            .unwrap();
        ws.cancel_drag();
        assert_eq!(ws.tree_string(), before);
        assert!(!ws.is_dragging());
    }

    #[test]
    fn drag_session_tasks_fire_and_die_with_session() {
        let mut ws = Workspace::new(LayoutConfig::default());
        ws.create_box().unwrap();
        let panel_id = ws.root().id();
        let tab_id = ws.root().as_panel().unwrap().tabs[0].id;
        let t0 = now();
        ws.start_tab_drag(panel_id, tab_id, Point::new(600.0, 400.0), t0)
            .unwrap();

        let later = t0 + Duration::from_millis(500);
        let tasks = ws.poll_drag_tasks(later);
        assert!(tasks.contains(&DragTask::PreviewDue));
        assert!(tasks.contains(&DragTask::Reevaluate));
        // idle preview fires once per anchor
        assert!(!ws
            .poll_drag_tasks(later + Duration::from_millis(1))
            .contains(&DragTask::PreviewDue));

        ws.cancel_drag();
        assert!(ws.poll_drag_tasks(later + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn preview_tree_does_not_advance_counters() {
        let mut ws = Workspace::new(LayoutConfig::default());
        ws.create_box().unwrap();
        let panel_id = ws.root().id();
        let tab_id = ws.root().as_panel().unwrap().tabs[1].id;
        let tb = project(&ws);
        ws.start_tab_drag(panel_id, tab_id, Point::new(600.0, 400.0), now())
            .unwrap();
        ws.drag_move(Point::new(10.0, 400.0), &tb, now()).unwrap();

        let counters_before = ws.factory();
        let preview = ws.preview_tree().unwrap();
        assert!(preview.as_container().is_some());
        assert_eq!(ws.factory(), counters_before);
        // committed tree untouched: still one panel, box 2 on top
        assert_eq!(ws.tree_string(), "P2");
    }

    #[test]
    fn resize_cancel_restores_exact_tree() {
        let mut ws = Workspace::new(LayoutConfig::default());
        ws.create_box().unwrap();
        let panel_id = ws.root().id();
        let tab_id = ws.root().as_panel().unwrap().tabs[1].id;
        let tb = project(&ws);
        ws.start_tab_drag(panel_id, tab_id, Point::new(600.0, 400.0), now())
            .unwrap();
        ws.drag_move(Point::new(10.0, 400.0), &tb, now()).unwrap();
        ws.drop_at(Point::new(10.0, 400.0), &tb).unwrap();

        let left = ws.root().as_container().unwrap().children[0].id();
        let before = serde_json::to_string(ws.root()).unwrap();
        let tb = project(&ws);
        ws.start_resize(left, ResizeHandle::Right, Point::new(600.0, 400.0), &tb)
            .unwrap();
        assert!(ws.resize_move(Point::new(760.0, 400.0)).unwrap());
        assert_ne!(serde_json::to_string(ws.root()).unwrap(), before);
        ws.cancel_resize();
        assert_eq!(serde_json::to_string(ws.root()).unwrap(), before);
    }

    #[test]
    fn resize_without_neighbor_is_refused() {
        let mut ws = Workspace::new(LayoutConfig::default());
        let panel_id = ws.root().id();
        let tb = project(&ws);
        assert!(matches!(
            ws.start_resize(panel_id, ResizeHandle::Right, Point::new(0.0, 0.0), &tb),
            Err(LayoutError::NoResizeNeighbor)
        ));
    }

    #[test]
    fn gap_affordance_suppressed_during_sessions() {
        let mut ws = Workspace::new(LayoutConfig::default());
        ws.create_box().unwrap();
        let panel_id = ws.root().id();
        let tab_id = ws.root().as_panel().unwrap().tabs[1].id;
        let tb = project(&ws);
        ws.start_tab_drag(panel_id, tab_id, Point::new(600.0, 400.0), now())
            .unwrap();
        ws.drag_move(Point::new(10.0, 400.0), &tb, now()).unwrap();
        ws.drop_at(Point::new(10.0, 400.0), &tb).unwrap();

        let tb = project(&ws);
        let boundary = Point::new(600.0, 400.0);
        assert!(ws.gap_hover_axis(boundary, &tb).is_some());
        let left = ws.root().as_container().unwrap().children[0].id();
        ws.start_resize(left, ResizeHandle::Right, boundary, &tb).unwrap();
        assert!(ws.gap_hover_axis(boundary, &tb).is_none());
        ws.cancel_resize();
    }
}
