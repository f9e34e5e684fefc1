//! The rendered-bounds seam between the engine and whatever draws the tree.
//!
//! The resolver and the resize controller only ever see rectangles through
//! [`BoundsProvider`]; [`TreeBounds`] is the deterministic projection used by
//! the demo binary and the tests.

use std::collections::HashMap;

use crate::geometry::{Bounds, Point};
use super::{Axis, Node, NodeId};

pub trait BoundsProvider {
    /// Rectangle of the whole workspace.
    fn workspace_bounds(&self) -> Bounds;

    /// Rendered rectangle of a panel or container, if it is on screen.
    fn node_bounds(&self, id: NodeId) -> Option<Bounds>;

    /// Rectangle of a panel's tab strip, if it renders one.
    fn tab_strip_bounds(&self, _panel_id: NodeId) -> Option<Bounds> {
        None
    }

    /// Topmost rendered panel under the point, when the renderer can answer
    /// cheaper than a scan.
    fn topmost_panel_at(&self, _point: Point) -> Option<NodeId> {
        None
    }
}

/// Weighted recursive projection of a layout tree onto a workspace rectangle.
#[derive(Debug, Clone)]
pub struct TreeBounds {
    workspace: Bounds,
    regions: HashMap<NodeId, Bounds>,
    tab_strips: HashMap<NodeId, Bounds>,
}

impl TreeBounds {
    pub fn project(root: &Node, workspace: Bounds, tab_strip_px: f64) -> Self {
        let mut this = Self {
            workspace,
            regions: HashMap::new(),
            tab_strips: HashMap::new(),
        };
        this.walk(root, workspace, tab_strip_px);
        this
    }

    fn walk(&mut self, node: &Node, area: Bounds, tab_strip_px: f64) {
        self.regions.insert(node.id(), area);
        match node {
            Node::Panel(p) => {
                if tab_strip_px > 0.0 {
                    self.tab_strips.insert(
                        p.id,
                        Bounds::new(area.left, area.top, area.width, tab_strip_px.min(area.height)),
                    );
                }
            }
            Node::Container(c) => {
                let mut cursor = match c.axis {
                    Axis::Column => area.left,
                    Axis::Row => area.top,
                };
                for (child, share) in c.children.iter().zip(&c.sizes) {
                    let child_area = match c.axis {
                        Axis::Column => {
                            let w = share * area.width;
                            let b = Bounds::new(cursor, area.top, w, area.height);
                            cursor += w;
                            b
                        }
                        Axis::Row => {
                            let h = share * area.height;
                            let b = Bounds::new(area.left, cursor, area.width, h);
                            cursor += h;
                            b
                        }
                    };
                    self.walk(child, child_area, tab_strip_px);
                }
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.regions.keys().copied()
    }
}

impl BoundsProvider for TreeBounds {
    fn workspace_bounds(&self) -> Bounds {
        self.workspace
    }

    fn node_bounds(&self, id: NodeId) -> Option<Bounds> {
        self.regions.get(&id).copied()
    }

    fn tab_strip_bounds(&self, panel_id: NodeId) -> Option<Bounds> {
        self.tab_strips.get(&panel_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::NodeFactory;

    #[test]
    fn projection_splits_by_sizes() {
        let mut f = NodeFactory::new();
        let t1 = f.new_tab();
        let t2 = f.new_tab();
        let (p1, p2) = (f.panel(t1), f.panel(t2));
        let (left_id, right_id) = (p1.id(), p2.id());
        let mut root = f.container(Axis::Column, vec![p1, p2]);
        root.as_container_mut().unwrap().sizes = vec![0.25, 0.75];

        let tb = TreeBounds::project(&root, Bounds::new(0.0, 0.0, 400.0, 200.0), 0.0);
        let left = tb.node_bounds(left_id).unwrap();
        let right = tb.node_bounds(right_id).unwrap();
        assert_eq!(left.width, 100.0);
        assert_eq!(right.width, 300.0);
        assert_eq!(right.left, 100.0);
        assert_eq!(left.height, 200.0);
    }

    #[test]
    fn tab_strips_cap_at_panel_height() {
        let mut f = NodeFactory::new();
        let tab = f.new_tab();
        let root = f.panel(tab);
        let id = root.id();
        let tb = TreeBounds::project(&root, Bounds::new(0.0, 0.0, 100.0, 10.0), 24.0);
        let strip = tb.tab_strip_bounds(id).unwrap();
        assert_eq!(strip.height, 10.0);
        assert_eq!(strip.width, 100.0);
    }
}
