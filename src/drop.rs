//! The drop executor: a pure `(tree, zone, tab) -> new tree` transform.
//!
//! Everything happens on a clone; the function either returns a fully valid
//! new tree or `None`, never a partially applied one. Stale references (a
//! zone computed against an older tree) therefore degrade to a no-op.

use std::mem;

use crate::layout::tree;
use crate::layout::{Node, NodeFactory, NodeId, Panel, Side, Tab};
use crate::zones::{DropAction, DropZone};

#[derive(Debug, Clone)]
pub struct DropResult {
    pub root: Node,
    pub active_panel: NodeId,
}

fn placeholder() -> Node {
    Node::Panel(Panel {
        id: NodeId(0),
        tabs: Vec::new(),
        active_tab_id: None,
    })
}

/// Replace the node at `path` with a two-child container built from the old
/// occupant and `new_panel`, ordered by the side's before/after sense.
fn wrap_slot(
    root: &mut Node,
    path: &[usize],
    new_panel: Node,
    side: Side,
    factory: &mut NodeFactory,
) -> bool {
    let Some(slot) = tree::node_at_path_mut(root, path) else {
        return false;
    };
    let old = mem::replace(slot, placeholder());
    let children = if side.is_before() {
        vec![new_panel, old]
    } else {
        vec![old, new_panel]
    };
    *slot = factory.container(side.axis(), children);
    true
}

/// Execute a drop. `source_panel` names the panel the tab is dragged out of;
/// `None` means the tab was freshly created and is not owned yet.
pub fn execute_drop(
    root: &Node,
    zone: &DropZone,
    tab: &Tab,
    source_panel: Option<NodeId>,
    factory: &mut NodeFactory,
) -> Option<DropResult> {
    if !zone.is_valid() {
        return None;
    }

    let mut next = root.clone();
    let mut moving = tab.clone();

    if let Some(source_id) = source_panel {
        let panel = tree::find_panel_mut(&mut next, source_id)?;
        let idx = panel.tab_index(tab.id)?;
        moving = panel.tabs.remove(idx);
        if panel.active_tab_id == Some(moving.id) {
            panel.active_tab_id = panel.tabs.first().map(|t| t.id);
        }
    }

    let active_panel = match &zone.action {
        DropAction::Stack { panel } => {
            let target = tree::find_panel_mut(&mut next, *panel)?;
            let moving_id = moving.id;
            target.tabs.push(moving);
            target.active_tab_id = Some(moving_id);
            *panel
        }
        DropAction::Split { panel, side } => {
            let path = tree::path_to(&next, *panel)?;
            if !tree::node_at_path(&next, &path)?.is_panel() {
                return None;
            }
            let new_panel = factory.panel(moving);
            let new_id = new_panel.id();
            if !wrap_slot(&mut next, &path, new_panel, *side, factory) {
                return None;
            }
            new_id
        }
        DropAction::Equalize {
            container,
            insert_index,
        } => {
            let new_panel = factory.panel(moving);
            let new_id = new_panel.id();
            let target = tree::find_container_mut(&mut next, *container)?;
            let at = (*insert_index).min(target.children.len());
            target.children.insert(at, new_panel);
            let n = target.children.len();
            target.sizes = vec![1.0 / n as f64; n];
            new_id
        }
        DropAction::Wrap { container, side } => {
            let path = tree::path_to(&next, *container)?;
            let new_panel = factory.panel(moving);
            let new_id = new_panel.id();
            if !wrap_slot(&mut next, &path, new_panel, *side, factory) {
                return None;
            }
            new_id
        }
        DropAction::Invalid { .. } => return None,
    };

    if let Some(source_id) = source_panel {
        let emptied = matches!(
            tree::find(&next, source_id),
            Some(found) if matches!(found.node, Node::Panel(p) if p.tabs.is_empty())
        );
        if emptied {
            next = tree::remove_and_collapse(&next, source_id, || factory.fallback_root());
        }
    }

    Some(DropResult {
        root: next,
        active_panel,
    })
}

/// Hypothetical tree for a drop preview: identical transform, run against a
/// scratch copy of the factory so committed counters stay untouched.
pub fn preview_drop(
    root: &Node,
    zone: &DropZone,
    tab: &Tab,
    source_panel: Option<NodeId>,
    factory: &NodeFactory,
) -> Option<Node> {
    let mut scratch = *factory;
    execute_drop(root, zone, tab, source_panel, &mut scratch).map(|result| result.root)
}
