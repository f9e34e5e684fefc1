//! Snapped two-sibling resizing.
//!
//! A resize session freezes the tree at pointer-down and recomputes every
//! move from the total delta against that base, so intermediate snapping
//! never accumulates error. Each active side gets an independent plan;
//! corner handles carry two plans applied to the same working clone.

use crate::config::LayoutConfig;
use crate::geometry::{Bounds, Point, clamp};
use crate::layout::regions::BoundsProvider;
use crate::layout::tree::{self, PanelInfo};
use crate::layout::{Axis, Node, NodeId, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    Top,
    Right,
    Bottom,
    Left,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub fn sides(self) -> &'static [Side] {
        match self {
            ResizeHandle::Top => &[Side::Top],
            ResizeHandle::Right => &[Side::Right],
            ResizeHandle::Bottom => &[Side::Bottom],
            ResizeHandle::Left => &[Side::Left],
            ResizeHandle::TopLeft => &[Side::Left, Side::Top],
            ResizeHandle::TopRight => &[Side::Right, Side::Top],
            ResizeHandle::BottomLeft => &[Side::Left, Side::Bottom],
            ResizeHandle::BottomRight => &[Side::Right, Side::Bottom],
        }
    }
}

/// Everything needed to re-derive the snapped size pair from a pointer delta.
#[derive(Debug, Clone)]
pub struct ResizePlan {
    pub side: Side,
    pub axis: Axis,
    pub container_id: NodeId,
    pub moving_child: NodeId,
    pub neighbor_child: NodeId,
    pub container_span_px: f64,
    pub min_size_px: f64,
    pub start_moving_ratio: f64,
    pub start_neighbor_ratio: f64,
    pub snap_unit_px: f64,
}

struct ResizeTarget {
    container_id: NodeId,
    moving_child: NodeId,
    neighbor_child: NodeId,
}

/// Nearest along-axis ancestor where the panel's subtree has a neighbor on
/// the requested side.
fn find_resize_target(root: &Node, info: &PanelInfo, side: Side) -> Option<ResizeTarget> {
    let axis = side.axis();
    let wants_before = side.is_before();
    for steps in 1..=info.path.len() {
        let container = info
            .path_above(steps)
            .and_then(|path| tree::node_at_path(root, path))
            .and_then(Node::as_container)?;
        let idx = info.index_below(steps)?;
        if container.axis != axis {
            continue;
        }
        if wants_before && idx > 0 {
            return Some(ResizeTarget {
                container_id: container.id,
                moving_child: container.children[idx].id(),
                neighbor_child: container.children[idx - 1].id(),
            });
        }
        if !wants_before && idx + 1 < container.children.len() {
            return Some(ResizeTarget {
                container_id: container.id,
                moving_child: container.children[idx].id(),
                neighbor_child: container.children[idx + 1].id(),
            });
        }
    }
    None
}

/// Build the snapped plan for one side, or `None` when that side has no
/// neighbor or no room: `snap_unit = pair_px / min(levels, floor(pair/min))`,
/// guaranteeing every stop respects the per-child minimum.
pub fn build_plan(
    root: &Node,
    info: &PanelInfo,
    side: Side,
    provider: &dyn BoundsProvider,
    config: &LayoutConfig,
) -> Option<ResizePlan> {
    let target = find_resize_target(root, info, side)?;
    let axis = side.axis();
    let container = tree::find(root, target.container_id)?.node.as_container()?;
    let moving_idx = container.child_index(target.moving_child)?;
    let neighbor_idx = container.child_index(target.neighbor_child)?;

    let container_span_px = provider.node_bounds(container.id)?.span(axis);
    if container_span_px <= 0.0 {
        return None;
    }

    let start_moving_ratio = container.sizes.get(moving_idx).copied().unwrap_or(0.0);
    let start_neighbor_ratio = container.sizes.get(neighbor_idx).copied().unwrap_or(0.0);
    let pair_px = (start_moving_ratio + start_neighbor_ratio) * container_span_px;
    let min_size_px = config.min_span_px(provider.workspace_bounds(), axis);
    if pair_px <= min_size_px * 2.0 {
        return None;
    }

    let max_steps_by_min = ((pair_px / min_size_px).floor() as u32).max(1);
    let snapped_steps = config.resize_snap_levels.clamp(1, max_steps_by_min);
    let snap_unit_px = pair_px / snapped_steps as f64;

    Some(ResizePlan {
        side,
        axis,
        container_id: target.container_id,
        moving_child: target.moving_child,
        neighbor_child: target.neighbor_child,
        container_span_px,
        min_size_px,
        start_moving_ratio,
        start_neighbor_ratio,
        snap_unit_px,
    })
}

/// Apply a pointer delta to the working tree. Returns whether the snapped
/// pair actually changed, for "moved" vs "already at this step" feedback.
pub fn apply_plan(root: &mut Node, plan: &ResizePlan, delta_x: f64, delta_y: f64) -> bool {
    let Some(container) = tree::find_container_mut(root, plan.container_id) else {
        return false;
    };
    let Some(moving_idx) = container.child_index(plan.moving_child) else {
        return false;
    };
    let Some(neighbor_idx) = container.child_index(plan.neighbor_child) else {
        return false;
    };

    let raw_delta_px = match plan.axis {
        Axis::Column => delta_x,
        Axis::Row => delta_y,
    };
    // Dragging toward the origin shrinks the moving side.
    let signed_delta_px = if plan.side.is_before() {
        -raw_delta_px
    } else {
        raw_delta_px
    };

    let moving_start_px = plan.start_moving_ratio * plan.container_span_px;
    let pair_px = (plan.start_moving_ratio + plan.start_neighbor_ratio) * plan.container_span_px;
    let min_px = plan.min_size_px;
    let max_px = pair_px - min_px;
    if max_px <= min_px {
        return false;
    }

    let mut moving_px = clamp(moving_start_px + signed_delta_px, min_px, max_px);
    moving_px = (moving_px / plan.snap_unit_px).round() * plan.snap_unit_px;
    moving_px = clamp(moving_px, min_px, max_px);

    let new_moving_ratio = moving_px / plan.container_span_px;
    let new_neighbor_ratio = (pair_px - moving_px) / plan.container_span_px;
    if (new_moving_ratio - container.sizes[moving_idx]).abs() < 1e-5
        && (new_neighbor_ratio - container.sizes[neighbor_idx]).abs() < 1e-5
    {
        return false;
    }

    container.sizes[moving_idx] = new_moving_ratio;
    container.sizes[neighbor_idx] = new_neighbor_ratio;
    true
}

/// A sibling boundary near the pointer that can host a handle-less resize.
#[derive(Debug, Clone, Copy)]
pub struct GapCandidate {
    pub axis: Axis,
    pub panel_id: NodeId,
    pub handle: ResizeHandle,
    pub distance: f64,
}

/// Scan every container boundary for one within slop of the pointer. The
/// winning candidate resolves to the panel hugging the boundary's near edge,
/// with the handle that drags that edge.
pub fn find_gap_candidate(
    root: &Node,
    provider: &dyn BoundsProvider,
    config: &LayoutConfig,
    point: Point,
) -> Option<GapCandidate> {
    let slop = config.between_sibling_hit_slop_px.max(6.0);
    let mut best: Option<GapCandidate> = None;
    tree::for_each_container(root, &mut |container| {
        if container.children.len() < 2 {
            return;
        }
        for i in 0..container.children.len() - 1 {
            let (Some(a), Some(b)) = (
                provider.node_bounds(container.children[i].id()),
                provider.node_bounds(container.children[i + 1].id()),
            ) else {
                continue;
            };
            let hit = match container.axis {
                Axis::Column => {
                    let overlap_top = a.top.max(b.top);
                    let overlap_bottom = a.bottom().min(b.bottom());
                    if overlap_bottom <= overlap_top {
                        continue;
                    }
                    let boundary = (a.right() + b.left) / 2.0;
                    let distance = (point.x - boundary).abs();
                    (distance <= slop && point.y >= overlap_top && point.y <= overlap_bottom)
                        .then_some(distance)
                }
                Axis::Row => {
                    let overlap_left = a.left.max(b.left);
                    let overlap_right = a.right().min(b.right());
                    if overlap_right <= overlap_left {
                        continue;
                    }
                    let boundary = (a.bottom() + b.top) / 2.0;
                    let distance = (point.y - boundary).abs();
                    (distance <= slop && point.x >= overlap_left && point.x <= overlap_right)
                        .then_some(distance)
                }
            };
            let Some(distance) = hit else { continue };
            if best.is_some_and(|b| b.distance <= distance) {
                continue;
            }
            let (edge, handle) = match container.axis {
                Axis::Column => (Side::Right, ResizeHandle::Right),
                Axis::Row => (Side::Bottom, ResizeHandle::Bottom),
            };
            if let Some(panel_id) = pick_panel_for_edge(&container.children[i], provider, edge) {
                best = Some(GapCandidate {
                    axis: container.axis,
                    panel_id,
                    handle,
                    distance,
                });
            }
        }
    });
    best
}

/// Panel in `node`'s subtree whose rendered rectangle reaches furthest
/// toward `edge`.
fn pick_panel_for_edge(
    node: &Node,
    provider: &dyn BoundsProvider,
    edge: Side,
) -> Option<NodeId> {
    fn metric(bounds: Bounds, edge: Side) -> f64 {
        match edge {
            Side::Right => bounds.right(),
            Side::Left => bounds.left,
            Side::Top => bounds.top,
            Side::Bottom => bounds.bottom(),
        }
    }

    let mut best: Option<(f64, NodeId)> = None;
    let mut visit = |panel_id: NodeId| {
        let Some(bounds) = provider.node_bounds(panel_id) else {
            return;
        };
        let m = metric(bounds, edge);
        let better = match best {
            None => true,
            Some((current, _)) => match edge {
                Side::Right | Side::Bottom => m > current,
                Side::Left | Side::Top => m < current,
            },
        };
        if better {
            best = Some((m, panel_id));
        }
    };

    fn walk(node: &Node, visit: &mut impl FnMut(NodeId)) {
        match node {
            Node::Panel(p) => visit(p.id),
            Node::Container(c) => {
                for child in &c.children {
                    walk(child, visit);
                }
            }
        }
    }

    walk(node, &mut visit);
    best.map(|(_, id)| id)
}
