//! Drop-zone resolution: classify what a drop at a pointer location would do.
//!
//! Per hovered panel the resolver builds a descriptor set (tab-strip and
//! center STACK rectangles plus directional ring polygons), classifies each
//! directional ring against the panel's ancestor chain, and merges the best
//! panel hit with the best between-sibling boundary strip.

use tracing::trace;

use crate::config::LayoutConfig;
use crate::geometry::{self, Bounds, Point};
use crate::layout::regions::BoundsProvider;
use crate::layout::tree::{self, PanelInfo};
use crate::layout::{Axis, Node, NodeId, Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    /// Append the tab to an existing panel.
    Stack { panel: NodeId },
    /// Two-way split of the hovered panel toward `side`.
    Split { panel: NodeId, side: Side },
    /// Insert a new panel into an ancestor container and equalize all sizes.
    Equalize { container: NodeId, insert_index: usize },
    /// Wrap an ancestor in a new two-child container on the orthogonal axis.
    Wrap { container: NodeId, side: Side },
    /// No legal edit here; `DropZone::reason` says why.
    Invalid { target: NodeId },
}

#[derive(Debug, Clone)]
pub struct DropZone {
    /// 0 for STACK and boundary strips, ring index otherwise.
    pub layer: usize,
    pub side: Option<Side>,
    pub action: DropAction,
    pub reason: String,
}

impl DropZone {
    pub fn is_valid(&self) -> bool {
        !matches!(self.action, DropAction::Invalid { .. })
    }

    /// Identity comparison ignoring the human-readable reason.
    pub fn matches(&self, other: &DropZone) -> bool {
        self.layer == other.layer && self.side == other.side && self.action == other.action
    }

    fn invalid(layer: usize, side: Side, target: NodeId, reason: impl Into<String>) -> Self {
        Self {
            layer,
            side: Some(side),
            action: DropAction::Invalid { target },
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ZoneGeometry {
    Rect(Bounds),
    Polygon { bounds: Bounds, points: Vec<Point> },
}

/// One hit- or display-testable region plus its classification.
#[derive(Debug, Clone)]
pub struct ZoneDescriptor {
    pub layer: usize,
    pub geometry: ZoneGeometry,
    pub zone: DropZone,
}

impl ZoneDescriptor {
    pub fn hit(&self, point: Point) -> bool {
        match &self.geometry {
            ZoneGeometry::Rect(bounds) => bounds.contains(point),
            ZoneGeometry::Polygon { points, .. } => geometry::point_in_polygon(point, points),
        }
    }

    /// CSS-style clip path for polygon descriptors; visualization only.
    pub fn clip_path(&self) -> Option<String> {
        match &self.geometry {
            ZoneGeometry::Rect(_) => None,
            ZoneGeometry::Polygon { bounds, points } => {
                Some(geometry::polygon_to_clip_path(*bounds, points))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Hover {
    /// Hovered panel, `None` for between-sibling boundary strips.
    pub panel_id: Option<NodeId>,
    pub zone: DropZone,
}

pub struct ZoneResolver<'a> {
    root: &'a Node,
    provider: &'a dyn BoundsProvider,
    config: &'a LayoutConfig,
    min_w: f64,
    min_h: f64,
    workspace: Bounds,
}

impl<'a> ZoneResolver<'a> {
    pub fn new(root: &'a Node, provider: &'a dyn BoundsProvider, config: &'a LayoutConfig) -> Self {
        let workspace = provider.workspace_bounds();
        let (min_w, min_h) = config.min_box_px(workspace);
        Self {
            root,
            provider,
            config,
            min_w,
            min_h,
            workspace,
        }
    }

    fn min_span(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Column => self.min_w,
            Axis::Row => self.min_h,
        }
    }

    fn stack_reached_reason(&self, axis: Axis) -> String {
        let kind = match axis {
            Axis::Column => "horizontal",
            Axis::Row => "vertical",
        };
        format!("Max {kind} stack reached.")
    }

    /// Classify one directional ring for a panel. Layer 1 splits the panel
    /// itself; layer k targets the (k-1)-th ancestor container, equalizing
    /// along its axis or wrapping it perpendicular to it.
    pub fn classify(&self, info: &PanelInfo, layer: usize, side: Side) -> DropZone {
        let Some(panel_bounds) = self.provider.node_bounds(info.panel_id) else {
            return DropZone::invalid(layer, side, info.panel_id, "Panel bounds unavailable.");
        };

        if layer == 1 {
            if panel_bounds.width < self.min_w || panel_bounds.height < self.min_h {
                return DropZone::invalid(
                    layer,
                    side,
                    info.panel_id,
                    "Panel is smaller than configured minimum size.",
                );
            }
            let split_axis = side.axis();
            if !self.config.can_add_sibling(split_axis, 2) {
                return DropZone::invalid(
                    layer,
                    side,
                    info.panel_id,
                    self.stack_reached_reason(split_axis),
                );
            }
            if panel_bounds.span(split_axis) / 2.0 < self.min_span(split_axis) {
                return DropZone::invalid(
                    layer,
                    side,
                    info.panel_id,
                    "Resulting halves would fall below minimum size.",
                );
            }
            return DropZone {
                layer,
                side: Some(side),
                action: DropAction::Split {
                    panel: info.panel_id,
                    side,
                },
                reason: "Layer 1 directional split".to_string(),
            };
        }

        let steps = layer - 1;
        let ancestor = info
            .path_above(steps)
            .and_then(|path| tree::node_at_path(self.root, path))
            .and_then(Node::as_container);
        let (Some(ancestor), Some(child_idx)) = (ancestor, info.index_below(steps)) else {
            return DropZone::invalid(
                layer,
                side,
                info.panel_id,
                "No ancestor container available for this layer.",
            );
        };

        let Some(ancestor_bounds) = self.provider.node_bounds(ancestor.id) else {
            return DropZone::invalid(layer, side, ancestor.id, "Ancestor bounds unavailable.");
        };
        if ancestor_bounds.width < self.min_w || ancestor_bounds.height < self.min_h {
            return DropZone::invalid(
                layer,
                side,
                ancestor.id,
                "Ancestor area is smaller than configured minimum size.",
            );
        }

        if ancestor.axis.is_along(side) {
            let next_count = ancestor.children.len() + 1;
            if !self.config.can_add_sibling(ancestor.axis, next_count) {
                return DropZone::invalid(
                    layer,
                    side,
                    ancestor.id,
                    self.stack_reached_reason(ancestor.axis),
                );
            }
            if ancestor_bounds.span(ancestor.axis) / (next_count as f64)
                < self.min_span(ancestor.axis)
            {
                return DropZone::invalid(
                    layer,
                    side,
                    ancestor.id,
                    "Equalized siblings would fall below minimum size.",
                );
            }
            let insert_index = if side.is_before() {
                child_idx
            } else {
                child_idx + 1
            };
            return DropZone {
                layer,
                side: Some(side),
                action: DropAction::Equalize {
                    container: ancestor.id,
                    insert_index,
                },
                reason: format!("Layer {layer} along ancestor axis ({})", ancestor.axis.label()),
            };
        }

        let wrap_axis = side.axis();
        if !self.config.can_add_sibling(wrap_axis, 2) {
            return DropZone::invalid(layer, side, ancestor.id, self.stack_reached_reason(wrap_axis));
        }
        if ancestor_bounds.span(wrap_axis) / 2.0 < self.min_span(wrap_axis) {
            return DropZone::invalid(
                layer,
                side,
                ancestor.id,
                "Wrapped halves would fall below minimum size.",
            );
        }
        DropZone {
            layer,
            side: Some(side),
            action: DropAction::Wrap {
                container: ancestor.id,
                side,
            },
            reason: format!(
                "Layer {layer} perpendicular to ancestor axis ({})",
                ancestor.axis.label()
            ),
        }
    }

    /// Deepest ring reachable toward `side`: every strictly-intermediate
    /// along-axis ancestor must keep the hovered subtree at the side's
    /// extreme edge, otherwise the layer would not correspond to moving any
    /// further in that direction.
    fn reachable_layers(&self, info: &PanelInfo, side: Side, total_layers: usize) -> usize {
        let axis = side.axis();
        for steps in 1..total_layers.saturating_sub(1) {
            let container = info
                .path_above(steps)
                .and_then(|path| tree::node_at_path(self.root, path))
                .and_then(Node::as_container);
            let (Some(container), Some(child_idx)) = (container, info.index_below(steps)) else {
                return (steps + 1).min(total_layers);
            };
            if container.axis != axis {
                continue;
            }
            let at_edge = if side.is_before() {
                child_idx == 0
            } else {
                child_idx + 1 == container.children.len()
            };
            if !at_edge {
                return steps + 1;
            }
        }
        total_layers
    }

    fn stack_zone(&self, info: &PanelInfo, reason: &str) -> DropZone {
        DropZone {
            layer: 0,
            side: None,
            action: DropAction::Stack {
                panel: info.panel_id,
            },
            reason: reason.to_string(),
        }
    }

    fn descriptors(&self, info: &PanelInfo, display: bool) -> Vec<ZoneDescriptor> {
        let mut out = Vec::new();
        let Some(panel_bounds) = self.provider.node_bounds(info.panel_id) else {
            return out;
        };

        let strip = self.provider.tab_strip_bounds(info.panel_id);
        let tall_enough = panel_bounds.height
            >= self.workspace.height * self.config.tab_strip_stack_zone_min_height_fraction;
        if self.config.allow_tab_strip_stack_zone
            && tall_enough
            && let Some(strip) = strip
        {
            out.push(ZoneDescriptor {
                layer: 0,
                geometry: ZoneGeometry::Rect(strip),
                zone: self.stack_zone(info, "Tab strip zone"),
            });
        }

        // The zone body excludes the tab strip when there is room left.
        let body = if display {
            interaction_bounds(panel_bounds, strip, self.config.min_band_px)
        } else {
            panel_bounds
        };

        let center = geometry::center_rect(body, self.config.center_fraction);
        out.push(ZoneDescriptor {
            layer: 0,
            geometry: ZoneGeometry::Rect(center),
            zone: self.stack_zone(info, "Center zone"),
        });

        let total_layers = geometry::effective_layer_count(
            body,
            info.depth,
            self.config.max_depth,
            self.config.min_band_px,
        );
        for side in Side::ALL {
            let reachable = self.reachable_layers(info, side, total_layers);
            for layer in 1..=reachable {
                let points = if display {
                    geometry::display_band_polygon(
                        body,
                        layer,
                        total_layers,
                        side,
                        self.config.center_fraction,
                    )
                } else {
                    geometry::band_polygon(
                        body,
                        layer,
                        total_layers,
                        side,
                        self.config.center_fraction,
                    )
                };
                if points.len() < 3 {
                    continue;
                }
                out.push(ZoneDescriptor {
                    layer,
                    geometry: ZoneGeometry::Polygon {
                        bounds: body,
                        points,
                    },
                    zone: self.classify(info, layer, side),
                });
            }
        }
        out
    }

    /// Descriptor set used for hit-testing a pointer position.
    pub fn hit_descriptors(&self, info: &PanelInfo) -> Vec<ZoneDescriptor> {
        self.descriptors(info, false)
    }

    /// Descriptor set handed to the renderer for the zone overlay.
    pub fn display_descriptors(&self, info: &PanelInfo) -> Vec<ZoneDescriptor> {
        self.descriptors(info, true)
    }

    fn zone_at(&self, info: &PanelInfo, point: Point) -> Option<DropZone> {
        let descriptors = self.hit_descriptors(info);
        descriptors
            .into_iter()
            .filter(|d| d.hit(point))
            .min_by_key(|d| d.layer)
            .map(|d| d.zone)
    }

    /// Thin EQUALIZE strips straddling every shared sibling boundary that
    /// still has sibling-count and size budget; nearest midline wins.
    fn between_sibling_zone(&self, point: Point) -> Option<DropZone> {
        let slop = self.config.between_sibling_hit_slop_px.max(6.0);
        let mut best: Option<(f64, DropZone)> = None;
        tree::for_each_container(self.root, &mut |container| {
            if container.children.len() < 2 {
                return;
            }
            let Some(container_bounds) = self.provider.node_bounds(container.id) else {
                return;
            };
            let next_count = container.children.len() + 1;
            if !self.config.can_add_sibling(container.axis, next_count) {
                return;
            }
            if container_bounds.span(container.axis) / (next_count as f64)
                < self.min_span(container.axis)
            {
                return;
            }
            for i in 0..container.children.len() - 1 {
                let (Some(a), Some(b)) = (
                    self.provider.node_bounds(container.children[i].id()),
                    self.provider.node_bounds(container.children[i + 1].id()),
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
                if let Some(distance) = hit
                    && best.as_ref().is_none_or(|(d, _)| distance < *d)
                {
                    best = Some((
                        distance,
                        DropZone {
                            layer: 0,
                            side: None,
                            action: DropAction::Equalize {
                                container: container.id,
                                insert_index: i + 1,
                            },
                            reason: "Between-sibling boundary insert".to_string(),
                        },
                    ));
                }
            }
        });
        best.map(|(_, zone)| zone)
    }

    /// Cross-panel hit resolution: prefer the renderer's topmost panel when
    /// it can name one, otherwise scan every panel keeping the best zone by
    /// "prefer valid, then prefer smaller layer"; finally weigh the best
    /// between-sibling strip the same way (panel zones win exact ties).
    pub fn resolve(&self, point: Point) -> Option<Hover> {
        let infos = tree::build_panel_info_map(self.root);
        let panel_zone = match self.provider.topmost_panel_at(point) {
            Some(id) => infos
                .get(&id)
                .and_then(|info| self.zone_at(info, point))
                .map(|zone| (id, zone)),
            None => {
                let mut best: Option<(NodeId, DropZone)> = None;
                for info in infos.values() {
                    let inside = self
                        .provider
                        .node_bounds(info.panel_id)
                        .is_some_and(|b| b.contains(point));
                    if !inside {
                        continue;
                    }
                    if let Some(zone) = self.zone_at(info, point) {
                        let replace = match &best {
                            None => true,
                            Some((_, incumbent)) => beats(&zone, incumbent),
                        };
                        if replace {
                            best = Some((info.panel_id, zone));
                        }
                    }
                }
                best
            }
        };

        let between = self.between_sibling_zone(point);
        let hover = match (panel_zone, between) {
            (None, None) => None,
            (Some((id, zone)), None) => Some(Hover {
                panel_id: Some(id),
                zone,
            }),
            (None, Some(zone)) => Some(Hover {
                panel_id: None,
                zone,
            }),
            (Some((id, panel_zone)), Some(between_zone)) => {
                if beats(&between_zone, &panel_zone) {
                    Some(Hover {
                        panel_id: None,
                        zone: between_zone,
                    })
                } else {
                    Some(Hover {
                        panel_id: Some(id),
                        zone: panel_zone,
                    })
                }
            }
        };
        if let Some(h) = &hover {
            trace!(layer = h.zone.layer, valid = h.zone.is_valid(), "hover resolved");
        }
        hover
    }
}

/// Strictly better under "prefer valid, then prefer smaller layer".
fn beats(challenger: &DropZone, incumbent: &DropZone) -> bool {
    match (challenger.is_valid(), incumbent.is_valid()) {
        (true, false) => true,
        (false, true) => false,
        _ => challenger.layer < incumbent.layer,
    }
}

/// Panel rectangle minus the tab strip, unless that would leave less than
/// two band widths of body height.
fn interaction_bounds(panel: Bounds, strip: Option<Bounds>, min_band_px: f64) -> Bounds {
    let Some(strip) = strip else {
        return panel;
    };
    let panel_bottom = panel.bottom();
    let top = strip.bottom().clamp(panel.top, panel_bottom);
    let height = panel_bottom - top;
    if height < min_band_px * 2.0 {
        return panel;
    }
    Bounds::new(panel.left, top, panel.width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::regions::TreeBounds;
    use crate::layout::{NodeFactory, Panel};

    fn config() -> LayoutConfig {
        LayoutConfig {
            allow_tab_strip_stack_zone: false,
            ..LayoutConfig::default()
        }
    }

    fn single_panel() -> (Node, NodeId) {
        let mut f = NodeFactory::new();
        let root = f.fallback_root();
        let id = root.id();
        (root, id)
    }

    fn workspace() -> Bounds {
        Bounds::new(0.0, 0.0, 1200.0, 800.0)
    }

    #[test]
    fn center_point_stacks() {
        let (root, id) = single_panel();
        let config = config();
        let tb = TreeBounds::project(&root, workspace(), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        let hover = resolver.resolve(Point::new(600.0, 400.0)).unwrap();
        assert_eq!(hover.panel_id, Some(id));
        assert_eq!(hover.zone.layer, 0);
        assert_eq!(hover.zone.action, DropAction::Stack { panel: id });
    }

    #[test]
    fn left_edge_of_single_panel_splits() {
        let (root, id) = single_panel();
        let config = config();
        let tb = TreeBounds::project(&root, workspace(), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        let hover = resolver.resolve(Point::new(10.0, 400.0)).unwrap();
        assert_eq!(
            hover.zone.action,
            DropAction::Split {
                panel: id,
                side: Side::Left
            }
        );
        assert_eq!(hover.zone.layer, 1);
    }

    #[test]
    fn corner_of_single_panel_is_not_dead() {
        let (root, _) = single_panel();
        let config = config();
        let tb = TreeBounds::project(&root, workspace(), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        let hover = resolver.resolve(Point::new(3.0, 3.0));
        assert!(hover.is_some(), "corner must land in an outermost slab");
    }

    #[test]
    fn layer_two_equalizes_along_parent_axis() {
        let mut f = NodeFactory::new();
        let t1 = f.new_tab();
        let t2 = f.new_tab();
        let (p1, p2) = (f.panel(t1), f.panel(t2));
        let right_id = p2.id();
        let root = f.container(Axis::Column, vec![p1, p2]);
        let root_id = root.id();
        let config = config();
        let tb = TreeBounds::project(&root, workspace(), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        let infos = tree::build_panel_info_map(&root);
        let info = &infos[&right_id];

        // toward the outer right edge the layer-2 ring targets the root
        let zone = resolver.classify(info, 2, Side::Right);
        assert_eq!(
            zone.action,
            DropAction::Equalize {
                container: root_id,
                insert_index: 2
            }
        );

        // perpendicular direction wraps the root instead
        let zone = resolver.classify(info, 2, Side::Top);
        assert_eq!(
            zone.action,
            DropAction::Wrap {
                container: root_id,
                side: Side::Top
            }
        );
    }

    #[test]
    fn reachability_pruning_truncates_inner_children() {
        // column[column[p1, p2], p3]: p1 hugs the left edge at every level,
        // so it can reach LEFT layer 3; p2 cannot.
        let mut f = NodeFactory::new();
        let t1 = f.new_tab();
        let t2 = f.new_tab();
        let t3 = f.new_tab();
        let (p1, p2, p3) = (f.panel(t1), f.panel(t2), f.panel(t3));
        let (p1_id, p2_id) = (p1.id(), p2.id());
        let inner = f.container(Axis::Column, vec![p1, p2]);
        let root = f.container(Axis::Column, vec![inner, p3]);
        let config = config();
        let tb = TreeBounds::project(&root, workspace(), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        let infos = tree::build_panel_info_map(&root);

        assert_eq!(resolver.reachable_layers(&infos[&p1_id], Side::Left, 3), 3);
        // p2 sits right of p1: going further left past the inner column is
        // not a "more left" move, so layer 3 is pruned.
        assert_eq!(resolver.reachable_layers(&infos[&p2_id], Side::Left, 3), 2);
        assert_eq!(resolver.reachable_layers(&infos[&p2_id], Side::Right, 3), 3);
    }

    #[test]
    fn too_small_panel_reports_invalid_split() {
        let mut f = NodeFactory::new();
        let t1 = f.new_tab();
        let t2 = f.new_tab();
        let (p1, p2) = (f.panel(t1), f.panel(t2));
        let left_id = p1.id();
        let mut root = f.container(Axis::Column, vec![p1, p2]);
        // squeeze the left panel below the configured minimum width
        root.as_container_mut().unwrap().sizes = vec![0.05, 0.95];
        let config = config();
        let tb = TreeBounds::project(&root, workspace(), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        let infos = tree::build_panel_info_map(&root);
        let zone = resolver.classify(&infos[&left_id], 1, Side::Left);
        assert!(!zone.is_valid());
        assert!(zone.reason.contains("minimum"));
    }

    #[test]
    fn sibling_cap_reports_invalid() {
        let mut f = NodeFactory::new();
        let mut panels = Vec::new();
        for _ in 0..6 {
            let tab = f.new_tab();
            panels.push(f.panel(tab));
        }
        let first = panels[0].id();
        let root = f.container(Axis::Column, panels);
        let config = config();
        let tb = TreeBounds::project(&root, Bounds::new(0.0, 0.0, 4000.0, 800.0), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        let infos = tree::build_panel_info_map(&root);
        // splitting the first panel horizontally is still a 2-stack, fine;
        // equalizing into the root would make 7 siblings and is refused.
        let zone = resolver.classify(&infos[&first], 2, Side::Left);
        assert!(!zone.is_valid());
        assert!(zone.reason.contains("horizontal stack"));
    }

    #[test]
    fn boundary_strip_beats_directional_zone() {
        let mut f = NodeFactory::new();
        let t1 = f.new_tab();
        let t2 = f.new_tab();
        let (p1, p2) = (f.panel(t1), f.panel(t2));
        let root = f.container(Axis::Column, vec![p1, p2]);
        let root_id = root.id();
        let config = config();
        let tb = TreeBounds::project(&root, workspace(), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        // the shared boundary sits at x = 600
        let hover = resolver.resolve(Point::new(602.0, 400.0)).unwrap();
        assert_eq!(hover.panel_id, None);
        assert_eq!(
            hover.zone.action,
            DropAction::Equalize {
                container: root_id,
                insert_index: 1
            }
        );
    }

    #[test]
    fn tab_strip_zone_suppressed_for_short_panels() {
        let mut f = NodeFactory::new();
        let tab = f.new_tab();
        let root = f.panel(tab);
        let id = root.id();
        let config = LayoutConfig::default();
        // a panel shorter than 12% of the workspace height
        let tb = TreeBounds::project(&root, Bounds::new(0.0, 0.0, 1200.0, 60.0), 18.0);
        // fake a taller workspace so the fraction threshold bites
        struct ShortPanel(TreeBounds);
        impl BoundsProvider for ShortPanel {
            fn workspace_bounds(&self) -> Bounds {
                Bounds::new(0.0, 0.0, 1200.0, 800.0)
            }
            fn node_bounds(&self, id: NodeId) -> Option<Bounds> {
                self.0.node_bounds(id)
            }
            fn tab_strip_bounds(&self, id: NodeId) -> Option<Bounds> {
                self.0.tab_strip_bounds(id)
            }
        }
        let provider = ShortPanel(tb);
        let resolver = ZoneResolver::new(&root, &provider, &config);
        let infos = tree::build_panel_info_map(&root);
        let descriptors = resolver.hit_descriptors(&infos[&id]);
        let strip_zones = descriptors
            .iter()
            .filter(|d| matches!(d.geometry, ZoneGeometry::Rect(_)))
            .count();
        // only the center rectangle remains
        assert_eq!(strip_zones, 1);
    }

    #[test]
    fn display_descriptors_carry_renderable_geometry() {
        let (root, id) = single_panel();
        let config = config();
        let tb = TreeBounds::project(&root, workspace(), 0.0);
        let resolver = ZoneResolver::new(&root, &tb, &config);
        let infos = tree::build_panel_info_map(&root);
        let descriptors = resolver.display_descriptors(&infos[&id]);
        // one center rect + four directional slabs for a depth-0 panel
        assert_eq!(descriptors.len(), 5);
        for d in &descriptors {
            match &d.geometry {
                ZoneGeometry::Rect(_) => assert!(d.clip_path().is_none()),
                ZoneGeometry::Polygon { .. } => {
                    let path = d.clip_path().unwrap();
                    assert!(path.starts_with("polygon("));
                }
            }
        }
    }

    #[test]
    fn empty_panel_tabs_do_not_break_resolution() {
        // transient mid-operation state: a panel with no tabs still resolves
        let panel = Node::Panel(Panel {
            id: NodeId(7),
            tabs: Vec::new(),
            active_tab_id: None,
        });
        let config = config();
        let tb = TreeBounds::project(&panel, workspace(), 0.0);
        let resolver = ZoneResolver::new(&panel, &tb, &config);
        assert!(resolver.resolve(Point::new(600.0, 400.0)).is_some());
    }
}
