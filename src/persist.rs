//! Versioned snapshot of the committed layout state.
//!
//! Restoring is strict: a payload with the wrong schema version or a tree
//! that fails validation is treated as absent rather than partially applied.
//! Counters are re-clamped against the tree's actual maxima so a hand-edited
//! or truncated payload can never reuse an id or box number.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::PreviewMode;
use crate::layout::tree;
use crate::layout::{Node, NodeFactory, NodeId};
use crate::workspace::Workspace;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state file io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub schema_version: u32,
    pub root: Node,
    pub active_panel_id: Option<NodeId>,
    pub preview_mode: PreviewMode,
    pub id_counter: u64,
    pub panel_counter: u32,
}

impl Snapshot {
    pub fn capture(ws: &Workspace) -> Self {
        let factory = ws.factory();
        Self {
            schema_version: SCHEMA_VERSION,
            root: ws.root().clone(),
            active_panel_id: ws.active_panel(),
            preview_mode: ws.preview_mode(),
            id_counter: factory.id_counter,
            panel_counter: factory.box_counter,
        }
    }

    /// Normalize a parsed payload, or reject it entirely. Counters clamp to
    /// the tree maxima; a stale active panel falls back to the first panel.
    pub fn validated(self) -> Option<Snapshot> {
        if self.schema_version != SCHEMA_VERSION {
            return None;
        }
        if !validate_node(&self.root) {
            return None;
        }
        tree::first_panel(&self.root)?;

        let stats = tree_stats(&self.root);
        let id_counter = self.id_counter.max(1).max(stats.max_id + 1);
        let panel_counter = self.panel_counter.max(1).max(stats.max_box_num + 1);

        let active_panel_id = self
            .active_panel_id
            .filter(|id| {
                tree::find(&self.root, *id).is_some_and(|found| found.node.is_panel())
            })
            .or_else(|| tree::first_panel(&self.root).map(|p| p.id));

        Some(Snapshot {
            id_counter,
            panel_counter,
            active_panel_id,
            ..self
        })
    }

    /// Workspace rebuilt from a validated snapshot.
    pub fn into_workspace(self, config: crate::config::LayoutConfig) -> Workspace {
        let factory = NodeFactory::restore(self.id_counter, self.panel_counter);
        Workspace::from_parts(
            config,
            self.root,
            self.active_panel_id,
            self.preview_mode,
            factory,
        )
    }
}

/// Structural validation: non-empty tab lists, member active tabs, parallel
/// positive sizes, and no degenerate containers.
pub fn validate_node(node: &Node) -> bool {
    match node {
        Node::Panel(p) => {
            if p.tabs.is_empty() {
                return false;
            }
            match p.active_tab_id {
                None => true,
                Some(active) => p.tabs.iter().any(|t| t.id == active),
            }
        }
        Node::Container(c) => {
            if c.children.is_empty() || c.sizes.len() != c.children.len() {
                return false;
            }
            if !c.sizes.iter().all(|s| s.is_finite() && *s > 0.0) {
                return false;
            }
            c.children.iter().all(validate_node)
        }
    }
}

struct TreeStats {
    max_id: u64,
    max_box_num: u32,
}

fn tree_stats(node: &Node) -> TreeStats {
    fn walk(node: &Node, stats: &mut TreeStats) {
        stats.max_id = stats.max_id.max(node.id().0);
        match node {
            Node::Panel(p) => {
                for tab in &p.tabs {
                    stats.max_id = stats.max_id.max(tab.id.0);
                    stats.max_box_num = stats.max_box_num.max(tab.num);
                }
            }
            Node::Container(c) => {
                for child in &c.children {
                    walk(child, stats);
                }
            }
        }
    }

    let mut stats = TreeStats {
        max_id: 0,
        max_box_num: 0,
    };
    walk(node, &mut stats);
    stats
}

/// Load a snapshot from disk. Any failure (missing file, bad JSON, schema
/// mismatch, invalid tree) reads as "nothing persisted".
pub fn load(path: &Path) -> Option<Snapshot> {
    let raw = fs::read_to_string(path).ok()?;
    let parsed: Snapshot = serde_json::from_str(&raw).ok()?;
    let snapshot = parsed.validated();
    if snapshot.is_some() {
        debug!(path = %path.display(), "layout state restored");
    }
    snapshot
}

pub fn save(path: &Path, snapshot: &Snapshot) -> Result<(), PersistError> {
    let encoded = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, encoded)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::{Axis, Panel, Tab};

    fn sample_workspace() -> Workspace {
        let mut ws = Workspace::new(LayoutConfig::default());
        ws.create_box().unwrap();
        ws
    }

    #[test]
    fn capture_validate_round_trip() {
        let ws = sample_workspace();
        let snapshot = Snapshot::capture(&ws).validated().unwrap();
        assert_eq!(snapshot.schema_version, SCHEMA_VERSION);
        let restored = snapshot.into_workspace(LayoutConfig::default());
        assert_eq!(restored.tree_string(), ws.tree_string());
        assert_eq!(restored.factory(), ws.factory());
        assert_eq!(restored.active_panel(), ws.active_panel());
    }

    #[test]
    fn wrong_schema_version_is_rejected() {
        let ws = sample_workspace();
        let mut snapshot = Snapshot::capture(&ws);
        snapshot.schema_version = 99;
        assert!(snapshot.validated().is_none());
    }

    #[test]
    fn empty_panel_tree_is_rejected() {
        let ws = sample_workspace();
        let mut snapshot = Snapshot::capture(&ws);
        snapshot.root = Node::Panel(Panel {
            id: NodeId(1),
            tabs: Vec::new(),
            active_tab_id: None,
        });
        assert!(snapshot.validated().is_none());
    }

    #[test]
    fn size_parity_is_enforced() {
        let mut f = NodeFactory::new();
        let t1 = f.new_tab();
        let t2 = f.new_tab();
        let (p1, p2) = (f.panel(t1), f.panel(t2));
        let mut root = f.container(Axis::Row, vec![p1, p2]);
        root.as_container_mut().unwrap().sizes.pop();
        assert!(!validate_node(&root));
    }

    #[test]
    fn counters_clamp_to_tree_maxima() {
        let ws = sample_workspace();
        let mut snapshot = Snapshot::capture(&ws);
        // pretend the stored counters went backwards
        snapshot.id_counter = 1;
        snapshot.panel_counter = 1;
        let validated = snapshot.validated().unwrap();
        let stats_floor_id = validated.id_counter;
        assert!(stats_floor_id > 1);
        let mut restored = validated.into_workspace(LayoutConfig::default());
        let num = restored.create_box().unwrap();
        assert_eq!(num, 3, "box numbers must never be reused");
    }

    #[test]
    fn stale_active_panel_falls_back_to_first() {
        let ws = sample_workspace();
        let mut snapshot = Snapshot::capture(&ws);
        snapshot.active_panel_id = Some(NodeId(4096));
        let validated = snapshot.validated().unwrap();
        assert_eq!(
            validated.active_panel_id,
            tree::first_panel(ws.root()).map(|p| p.id)
        );
    }

    #[test]
    fn active_tab_must_be_a_member() {
        let panel = Node::Panel(Panel {
            id: NodeId(1),
            tabs: vec![Tab {
                id: NodeId(2),
                num: 1,
            }],
            active_tab_id: Some(NodeId(3)),
        });
        assert!(!validate_node(&panel));
    }

    #[test]
    fn load_treats_garbage_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        assert!(load(&path).is_none());
        fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_none());

        let ws = sample_workspace();
        save(&path, &Snapshot::capture(&ws)).unwrap();
        let restored = load(&path).unwrap();
        assert_eq!(restored.panel_counter, ws.factory().box_counter);
    }
}
