pub mod regions;
pub mod tree;

use serde::{Deserialize, Serialize};

/// Identifier shared by tabs, panels and containers. One monotone counter
/// covers all three; ids are never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stacking axis of a container: columns place children left-to-right, rows
/// top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }

    pub fn is_along(self, side: Side) -> bool {
        side.axis() == self
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

/// Panel edge a directional zone or resize handle points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    /// Axis a split toward this side produces: LEFT/RIGHT split into a
    /// column, TOP/BOTTOM into a row.
    pub fn axis(self) -> Axis {
        match self {
            Side::Left | Side::Right => Axis::Column,
            Side::Top | Side::Bottom => Axis::Row,
        }
    }

    /// Whether an insert toward this side lands before the reference child.
    pub fn is_before(self) -> bool {
        matches!(self, Side::Left | Side::Top)
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: NodeId,
    pub num: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: NodeId,
    pub tabs: Vec<Tab>,
    pub active_tab_id: Option<NodeId>,
}

impl Panel {
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id
            .and_then(|id| self.tabs.iter().find(|t| t.id == id))
            .or_else(|| self.tabs.first())
    }

    pub fn tab_index(&self, tab_id: NodeId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: NodeId,
    pub axis: Axis,
    pub children: Vec<Node>,
    pub sizes: Vec<f64>,
}

impl Container {
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|c| c.id() == id)
    }
}

/// A layout tree node. `Clone` is the deep copy every mutation starts from;
/// the pre-clone value stays valid for rollback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Panel(Panel),
    Container(Container),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Panel(p) => p.id,
            Node::Container(c) => c.id,
        }
    }

    pub fn is_panel(&self) -> bool {
        matches!(self, Node::Panel(_))
    }

    pub fn as_panel(&self) -> Option<&Panel> {
        match self {
            Node::Panel(p) => Some(p),
            Node::Container(_) => None,
        }
    }

    pub fn as_panel_mut(&mut self) -> Option<&mut Panel> {
        match self {
            Node::Panel(p) => Some(p),
            Node::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Node::Container(c) => Some(c),
            Node::Panel(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Node::Container(c) => Some(c),
            Node::Panel(_) => None,
        }
    }
}

/// Monotone id/number source. Copyable so previews can run against a scratch
/// copy without advancing the committed counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFactory {
    pub id_counter: u64,
    pub box_counter: u32,
}

impl NodeFactory {
    pub fn new() -> Self {
        Self {
            id_counter: 1,
            box_counter: 1,
        }
    }

    pub fn restore(id_counter: u64, box_counter: u32) -> Self {
        Self {
            id_counter: id_counter.max(1),
            box_counter: box_counter.max(1),
        }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.id_counter);
        self.id_counter += 1;
        id
    }

    pub fn new_tab(&mut self) -> Tab {
        let num = self.box_counter;
        self.box_counter += 1;
        Tab {
            id: self.next_id(),
            num,
        }
    }

    pub fn panel(&mut self, tab: Tab) -> Node {
        let id = self.next_id();
        Node::Panel(Panel {
            id,
            active_tab_id: Some(tab.id),
            tabs: vec![tab],
        })
    }

    pub fn container(&mut self, axis: Axis, children: Vec<Node>) -> Node {
        let share = 1.0 / children.len().max(1) as f64;
        Node::Container(Container {
            id: self.next_id(),
            axis,
            sizes: vec![share; children.len()],
            children,
        })
    }

    /// Fresh single-panel root, used wherever the tree would otherwise empty.
    pub fn fallback_root(&mut self) -> Node {
        let tab = self.new_tab();
        self.panel(tab)
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}
