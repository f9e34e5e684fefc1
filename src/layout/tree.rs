//! Tree queries and the removal/collapse transform.
//!
//! Navigation is path-based: a node is addressed by the chain of child
//! indices from the root, so lookups and mutations never hold overlapping
//! borrows into the tree.

use std::collections::HashMap;

use super::{Container, Node, NodeId, Panel};

/// Child-index path from the root to the node with `id`.
pub fn path_to(root: &Node, id: NodeId) -> Option<Vec<usize>> {
    fn walk(node: &Node, id: NodeId, path: &mut Vec<usize>) -> bool {
        if node.id() == id {
            return true;
        }
        if let Node::Container(c) = node {
            for (idx, child) in c.children.iter().enumerate() {
                path.push(idx);
                if walk(child, id, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

pub fn node_at_path<'a>(root: &'a Node, path: &[usize]) -> Option<&'a Node> {
    let mut current = root;
    for &idx in path {
        let Node::Container(c) = current else {
            return None;
        };
        current = c.children.get(idx)?;
    }
    Some(current)
}

pub fn node_at_path_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    let mut current = root;
    for &idx in path {
        let Node::Container(c) = current else {
            return None;
        };
        current = c.children.get_mut(idx)?;
    }
    Some(current)
}

pub struct Found<'a> {
    pub node: &'a Node,
    /// Parent container and the node's index within it; `None` at the root.
    pub parent: Option<(&'a Container, usize)>,
}

/// Depth-first search returning the node plus its parent and index.
pub fn find(root: &Node, id: NodeId) -> Option<Found<'_>> {
    fn walk<'a>(
        node: &'a Node,
        id: NodeId,
        parent: Option<(&'a Container, usize)>,
    ) -> Option<Found<'a>> {
        if node.id() == id {
            return Some(Found { node, parent });
        }
        if let Node::Container(c) = node {
            for (idx, child) in c.children.iter().enumerate() {
                if let Some(found) = walk(child, id, Some((c, idx))) {
                    return Some(found);
                }
            }
        }
        None
    }

    walk(root, id, None)
}

pub fn find_mut(node: &mut Node, id: NodeId) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    match node {
        Node::Panel(_) => None,
        Node::Container(c) => c
            .children
            .iter_mut()
            .find_map(|child| find_mut(child, id)),
    }
}

pub fn find_panel_mut(root: &mut Node, id: NodeId) -> Option<&mut Panel> {
    find_mut(root, id)?.as_panel_mut()
}

pub fn find_container_mut(root: &mut Node, id: NodeId) -> Option<&mut Container> {
    find_mut(root, id)?.as_container_mut()
}

/// Per-panel ancestry derived from the current tree, recomputed per query.
#[derive(Debug, Clone)]
pub struct PanelInfo {
    pub panel_id: NodeId,
    /// Child-index path from the root to the panel.
    pub path: Vec<usize>,
    /// Ancestor chain from the root to the panel, inclusive.
    pub ancestors: Vec<NodeId>,
    /// Number of containers above the panel.
    pub depth: usize,
}

impl PanelInfo {
    pub fn parent_id(&self) -> Option<NodeId> {
        (self.ancestors.len() >= 2).then(|| self.ancestors[self.ancestors.len() - 2])
    }

    pub fn index_in_parent(&self) -> Option<usize> {
        self.path.last().copied()
    }

    /// Chain node `steps` levels above the panel (1 = direct parent).
    pub fn ancestor_above(&self, steps: usize) -> Option<NodeId> {
        let len = self.ancestors.len();
        (steps < len).then(|| self.ancestors[len - 1 - steps])
    }

    /// Path to the chain node `steps` levels above the panel.
    pub fn path_above(&self, steps: usize) -> Option<&[usize]> {
        (steps <= self.path.len()).then(|| &self.path[..self.path.len() - steps])
    }

    /// Child index of the chain node `steps - 1` levels above the panel
    /// within the ancestor `steps` levels above it.
    pub fn index_below(&self, steps: usize) -> Option<usize> {
        (steps >= 1 && steps <= self.path.len()).then(|| self.path[self.path.len() - steps])
    }
}

/// Single traversal producing every panel's root-first ancestor chain and
/// depth. Shared dependency of zone resolution and resize targeting.
pub fn build_panel_info_map(root: &Node) -> HashMap<NodeId, PanelInfo> {
    fn walk(
        node: &Node,
        path: &mut Vec<usize>,
        chain: &mut Vec<NodeId>,
        map: &mut HashMap<NodeId, PanelInfo>,
    ) {
        chain.push(node.id());
        match node {
            Node::Panel(p) => {
                map.insert(
                    p.id,
                    PanelInfo {
                        panel_id: p.id,
                        path: path.clone(),
                        ancestors: chain.clone(),
                        depth: path.len(),
                    },
                );
            }
            Node::Container(c) => {
                for (idx, child) in c.children.iter().enumerate() {
                    path.push(idx);
                    walk(child, path, chain, map);
                    path.pop();
                }
            }
        }
        chain.pop();
    }

    let mut map = HashMap::new();
    walk(root, &mut Vec::new(), &mut Vec::new(), &mut map);
    map
}

/// Remove the named panel and collapse the remains: post-order, any container
/// left with one surviving child is replaced by that child, sibling sizes
/// renormalize over the survivors, and an emptied tree is replaced by
/// `make_fallback()` so the tree-not-empty invariant holds.
pub fn remove_and_collapse(
    root: &Node,
    panel_id: NodeId,
    make_fallback: impl FnOnce() -> Node,
) -> Node {
    fn inner(node: &Node, panel_id: NodeId) -> Option<Node> {
        match node {
            Node::Panel(p) => (p.id != panel_id).then(|| node.clone()),
            Node::Container(c) => {
                let mut children = Vec::with_capacity(c.children.len());
                let mut sizes = Vec::with_capacity(c.children.len());
                for (idx, child) in c.children.iter().enumerate() {
                    if let Some(next) = inner(child, panel_id) {
                        children.push(next);
                        sizes.push(c.sizes.get(idx).copied().unwrap_or(1.0));
                    }
                }
                match children.len() {
                    0 => None,
                    1 => children.pop(),
                    n => {
                        let total: f64 = sizes.iter().sum();
                        let sizes = if total > 0.0 {
                            sizes.iter().map(|s| s / total).collect()
                        } else {
                            vec![1.0 / n as f64; n]
                        };
                        Some(Node::Container(Container {
                            id: c.id,
                            axis: c.axis,
                            children,
                            sizes,
                        }))
                    }
                }
            }
        }
    }

    inner(root, panel_id).unwrap_or_else(make_fallback)
}

pub fn panel_count(node: &Node) -> usize {
    match node {
        Node::Panel(_) => 1,
        Node::Container(c) => c.children.iter().map(panel_count).sum(),
    }
}

pub fn total_box_count(node: &Node) -> usize {
    match node {
        Node::Panel(p) => p.tabs.len(),
        Node::Container(c) => c.children.iter().map(total_box_count).sum(),
    }
}

pub fn first_panel(node: &Node) -> Option<&Panel> {
    match node {
        Node::Panel(p) => Some(p),
        Node::Container(c) => c.children.iter().find_map(first_panel),
    }
}

pub fn for_each_container<'a>(node: &'a Node, f: &mut impl FnMut(&'a Container)) {
    if let Node::Container(c) = node {
        f(c);
        for child in &c.children {
            for_each_container(child, f);
        }
    }
}

/// Compact one-line tree description, e.g. `column[P1, row[P2, P3]]`.
pub fn tree_string(node: &Node) -> String {
    match node {
        Node::Panel(p) => match p.active_tab() {
            Some(tab) => format!("P{}", tab.num),
            None => "P?".to_string(),
        },
        Node::Container(c) => {
            let inner = c
                .children
                .iter()
                .map(tree_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}[{inner}]", c.axis.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Axis, NodeFactory};

    fn three_column() -> (Node, NodeFactory) {
        let mut f = NodeFactory::new();
        let a = f.new_tab();
        let b = f.new_tab();
        let c = f.new_tab();
        let (a, b, c) = (f.panel(a), f.panel(b), f.panel(c));
        let root = f.container(Axis::Column, vec![a, b, c]);
        (root, f)
    }

    #[test]
    fn path_navigation_round_trip() {
        let (root, _) = three_column();
        let container = root.as_container().unwrap();
        let second = container.children[1].id();
        let path = path_to(&root, second).unwrap();
        assert_eq!(path, vec![1]);
        assert_eq!(node_at_path(&root, &path).unwrap().id(), second);
        assert_eq!(path_to(&root, root.id()).unwrap(), Vec::<usize>::new());
        assert!(path_to(&root, NodeId(999)).is_none());
    }

    #[test]
    fn find_reports_parent_and_index() {
        let (root, _) = three_column();
        let third = root.as_container().unwrap().children[2].id();
        let found = find(&root, third).unwrap();
        let (parent, idx) = found.parent.unwrap();
        assert_eq!(parent.id, root.id());
        assert_eq!(idx, 2);
        assert!(find(&root, root.id()).unwrap().parent.is_none());
    }

    #[test]
    fn panel_info_map_chains_are_root_first() {
        let mut f = NodeFactory::new();
        let t1 = f.new_tab();
        let t2 = f.new_tab();
        let t3 = f.new_tab();
        let (p1, p2, p3) = (f.panel(t1), f.panel(t2), f.panel(t3));
        let p3_id = p3.id();
        let inner = f.container(Axis::Row, vec![p2, p3]);
        let inner_id = inner.id();
        let root = f.container(Axis::Column, vec![p1, inner]);

        let map = build_panel_info_map(&root);
        let info = &map[&p3_id];
        assert_eq!(info.depth, 2);
        assert_eq!(info.path, vec![1, 1]);
        assert_eq!(info.ancestors, vec![root.id(), inner_id, p3_id]);
        assert_eq!(info.ancestor_above(1), Some(inner_id));
        assert_eq!(info.ancestor_above(2), Some(root.id()));
        assert_eq!(info.ancestor_above(3), None);
        assert_eq!(info.index_below(1), Some(1));
        assert_eq!(info.path_above(1), Some(&[1][..]));
    }

    #[test]
    fn remove_collapses_single_child_container() {
        let mut f = NodeFactory::new();
        let t1 = f.new_tab();
        let t2 = f.new_tab();
        let (p1, p2) = (f.panel(t1), f.panel(t2));
        let survivor = p1.id();
        let removed = p2.id();
        let root = f.container(Axis::Row, vec![p1, p2]);

        let next = remove_and_collapse(&root, removed, || unreachable!());
        assert_eq!(next.id(), survivor);
        assert!(next.is_panel());
    }

    #[test]
    fn remove_renormalizes_survivor_sizes() {
        let (root, _) = three_column();
        let middle = root.as_container().unwrap().children[1].id();
        let next = remove_and_collapse(&root, middle, || unreachable!());
        let c = next.as_container().unwrap();
        assert_eq!(c.children.len(), 2);
        let sum: f64 = c.sizes.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn remove_last_panel_uses_fallback() {
        let mut f = NodeFactory::new();
        let tab = f.new_tab();
        let root = f.panel(tab);
        let gone = root.id();
        let next = remove_and_collapse(&root, gone, || {
            let tab = f.new_tab();
            f.panel(tab)
        });
        assert!(next.is_panel());
        assert_ne!(next.id(), gone);
    }

    #[test]
    fn counts_and_tree_string() {
        let (root, _) = three_column();
        assert_eq!(panel_count(&root), 3);
        assert_eq!(total_box_count(&root), 3);
        assert_eq!(tree_string(&root), "column[P1, P2, P3]");
        assert_eq!(first_panel(&root).unwrap().tabs[0].num, 1);
    }
}
