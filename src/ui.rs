//! Demo-terminal rendering of the layout tree: panel blocks with tab strips,
//! zone tinting during drags, a gap affordance marker, and a status bar.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::config::PreviewMode;
use crate::geometry::{Bounds, Point};
use crate::layout::regions::{BoundsProvider, TreeBounds};
use crate::layout::tree;
use crate::layout::{Axis, Node, NodeId};
use crate::workspace::Workspace;
use crate::zones::{DropAction, Hover, ZoneResolver};

/// Rows at the top of every panel treated as its tab strip (border + tabs).
pub const TAB_STRIP_ROWS: u16 = 2;

pub fn action_color(action: &DropAction) -> Color {
    match action {
        DropAction::Stack { .. } => Color::Cyan,
        DropAction::Split { .. } => Color::Yellow,
        DropAction::Equalize { .. } => Color::Green,
        DropAction::Wrap { .. } => Color::Magenta,
        DropAction::Invalid { .. } => Color::Red,
    }
}

fn action_target(action: &DropAction) -> NodeId {
    match action {
        DropAction::Stack { panel } | DropAction::Split { panel, .. } => *panel,
        DropAction::Equalize { container, .. } | DropAction::Wrap { container, .. } => *container,
        DropAction::Invalid { target } => *target,
    }
}

pub fn rect_to_bounds(rect: Rect) -> Bounds {
    Bounds::new(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    )
}

pub fn bounds_to_rect(bounds: Bounds) -> Rect {
    let x = bounds.left.round().max(0.0) as u16;
    let y = bounds.top.round().max(0.0) as u16;
    let right = bounds.right().round().max(0.0) as u16;
    let bottom = bounds.bottom().round().max(0.0) as u16;
    Rect {
        x,
        y,
        width: right.saturating_sub(x),
        height: bottom.saturating_sub(y),
    }
}

/// Pointer position for a terminal cell: its center.
pub fn cell_point(column: u16, row: u16) -> Point {
    Point::new(column as f64 + 0.5, row as f64 + 0.5)
}

fn tab_label(num: u32) -> String {
    format!(" {num} ")
}

/// Tab under a pointer cell, resolved against the same label layout the
/// renderer draws.
pub fn tab_at(ws: &Workspace, bounds: &TreeBounds, point: Point) -> Option<(NodeId, NodeId)> {
    let infos = tree::build_panel_info_map(ws.root());
    for info in infos.values() {
        let Some(strip) = bounds.tab_strip_bounds(info.panel_id) else {
            continue;
        };
        if !strip.contains(point) {
            continue;
        }
        let panel = tree::find(ws.root(), info.panel_id)?.node.as_panel()?;
        // labels start inside the left border
        let mut x = strip.left + 1.0;
        for tab in &panel.tabs {
            let width = tab_label(tab.num).chars().count() as f64;
            if point.x >= x && point.x < x + width {
                return Some((info.panel_id, tab.id));
            }
            x += width + 1.0; // separator column
        }
        return None;
    }
    None
}

/// Panel under a pointer cell.
pub fn panel_at(ws: &Workspace, bounds: &TreeBounds, point: Point) -> Option<NodeId> {
    let infos = tree::build_panel_info_map(ws.root());
    infos
        .values()
        .find(|info| {
            bounds
                .node_bounds(info.panel_id)
                .is_some_and(|b| b.contains(point))
        })
        .map(|info| info.panel_id)
}

fn tint(frame: &mut Frame, rect: Rect, color: Color) {
    let buffer = frame.buffer_mut();
    let clip = rect.intersection(buffer.area);
    for y in clip.y..clip.y.saturating_add(clip.height) {
        for x in clip.x..clip.x.saturating_add(clip.width) {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_bg(color);
            }
        }
    }
}

fn draw_panel(
    frame: &mut Frame,
    panel: &crate::layout::Panel,
    rect: Rect,
    active: bool,
    hover_color: Option<Color>,
) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let border_style = match (hover_color, active) {
        (Some(color), _) => Style::default().fg(color).add_modifier(Modifier::BOLD),
        (None, true) => Style::default().fg(Color::Cyan),
        (None, false) => Style::default().fg(Color::DarkGray),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.height == 0 {
        return;
    }

    let mut spans: Vec<Span> = Vec::new();
    for (idx, tab) in panel.tabs.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }
        let is_active = panel.active_tab_id == Some(tab.id);
        let style = if is_active {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(tab_label(tab.num), style));
    }
    let tabs_rect = Rect {
        height: 1,
        ..inner
    };
    frame.render_widget(Paragraph::new(Line::from(spans)), tabs_rect);

    if inner.height > 1 {
        let body = Rect {
            y: inner.y + 1,
            height: inner.height - 1,
            ..inner
        };
        let label = match panel.active_tab() {
            Some(tab) => format!("Box {}", tab.num),
            None => String::new(),
        };
        frame.render_widget(
            Paragraph::new(label).style(Style::default().fg(Color::Gray)),
            body,
        );
    }
}

fn draw_tree(
    frame: &mut Frame,
    root: &Node,
    bounds: &TreeBounds,
    active_panel: Option<NodeId>,
    hover: Option<&Hover>,
) {
    fn walk(
        frame: &mut Frame,
        node: &Node,
        bounds: &TreeBounds,
        active_panel: Option<NodeId>,
        hover_panel_color: Option<(NodeId, Color)>,
    ) {
        match node {
            Node::Panel(p) => {
                let Some(b) = bounds.node_bounds(p.id) else {
                    return;
                };
                let hover_color = hover_panel_color
                    .filter(|(id, _)| *id == p.id)
                    .map(|(_, color)| color);
                draw_panel(
                    frame,
                    p,
                    bounds_to_rect(b),
                    active_panel == Some(p.id),
                    hover_color,
                );
            }
            Node::Container(c) => {
                for child in &c.children {
                    walk(frame, child, bounds, active_panel, hover_panel_color);
                }
            }
        }
    }

    let hover_panel_color = hover.map(|h| {
        (
            action_target(&h.zone.action),
            action_color(&h.zone.action),
        )
    });
    walk(frame, root, bounds, active_panel, hover_panel_color);
    // container-targeting zones tint the whole target area; bg-only, so the
    // panel content underneath stays readable
    if let Some(hover) = hover {
        let target = action_target(&hover.zone.action);
        if tree::find(root, target).is_some_and(|found| !found.node.is_panel())
            && let Some(b) = bounds.node_bounds(target)
        {
            tint(frame, bounds_to_rect(b), action_color(&hover.zone.action));
        }
    }
}

pub struct DrawState<'a> {
    pub hover: Option<&'a Hover>,
    pub status: &'a str,
    pub gap_axis: Option<Axis>,
    pub help_visible: bool,
    /// Hypothetical tree shown instead of the committed one while the
    /// pointer idles over a valid zone.
    pub preview: Option<&'a Node>,
}

pub fn draw(frame: &mut Frame, ws: &Workspace, area: Rect, state: &DrawState) {
    let status_rect = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    let work = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };

    match state.preview {
        Some(preview) => {
            let bounds =
                TreeBounds::project(preview, rect_to_bounds(work), TAB_STRIP_ROWS as f64);
            draw_tree(frame, preview, &bounds, None, None);
        }
        None => {
            let bounds =
                TreeBounds::project(ws.root(), rect_to_bounds(work), TAB_STRIP_ROWS as f64);
            draw_tree(frame, ws.root(), &bounds, ws.active_panel(), state.hover);
            if ws.preview_mode() == PreviewMode::Hitbox
                && let Some(hover) = state.hover
            {
                draw_zone_hitboxes(frame, ws, &bounds, hover);
            }
        }
    }

    let mode = ws.preview_mode().label();
    let right = format!(
        "{} | boxes {}/{} | {}",
        mode,
        ws.total_box_count(),
        ws.config().max_total_box_count,
        ws.tree_string()
    );
    let gap_marker = match state.gap_axis {
        Some(Axis::Column) => "⇔ ",
        Some(Axis::Row) => "⇕ ",
        None => "",
    };
    let left = format!("{gap_marker}{}", state.status);
    let status_line = Line::from(vec![
        Span::styled(left, Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(right, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), status_rect);

    if state.help_visible {
        draw_help(frame, work);
    }
}

/// Hitbox mode: paint every display zone of the hovered panel, selected zone
/// at full strength, the rest dimmed.
fn draw_zone_hitboxes(frame: &mut Frame, ws: &Workspace, bounds: &TreeBounds, hover: &Hover) {
    let Some(panel_id) = hover.panel_id else {
        return;
    };
    let infos = tree::build_panel_info_map(ws.root());
    let Some(info) = infos.get(&panel_id) else {
        return;
    };
    let Some(panel_bounds) = bounds.node_bounds(panel_id) else {
        return;
    };
    let resolver = ZoneResolver::new(ws.root(), bounds, ws.config());
    let descriptors = resolver.display_descriptors(info);

    let rect = bounds_to_rect(panel_bounds);
    let buffer = frame.buffer_mut();
    let clip = rect.intersection(buffer.area);
    for y in clip.y..clip.y.saturating_add(clip.height) {
        for x in clip.x..clip.x.saturating_add(clip.width) {
            let point = cell_point(x, y);
            let Some(descriptor) = descriptors
                .iter()
                .filter(|d| d.hit(point))
                .min_by_key(|d| d.layer)
            else {
                continue;
            };
            let selected = descriptor.zone.matches(&hover.zone);
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_bg(action_color(&descriptor.zone.action));
                if !selected {
                    cell.set_style(Style::default().add_modifier(Modifier::DIM));
                }
            }
        }
    }
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let text = indoc::indoc! {"
        pane-dock demo

          mouse drag on a tab   move the box (drop zones tint the target)
          mouse drag on a gap   snapped two-sibling resize
          click on a tab        activate it
          n                     create a box and drag it with the mouse
          c                     create a box in the active panel
          x                     close the active tab
          v                     cycle hitbox / preview / combined
          r                     reset the layout
          esc                   cancel the current drag or resize
          ?                     toggle this help
          q                     quit
    "};
    let line_count = text.lines().count() as u16;
    let height = (line_count + 2).min(area.height);
    let width = area.width.min(64);
    let rect = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(text).block(block), rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    #[test]
    fn bounds_rect_round_trip() {
        let rect = Rect {
            x: 3,
            y: 4,
            width: 10,
            height: 5,
        };
        assert_eq!(bounds_to_rect(rect_to_bounds(rect)), rect);
    }

    #[test]
    fn tab_hit_matches_label_layout() {
        let mut ws = Workspace::new(LayoutConfig::default());
        ws.create_box().unwrap();
        let panel_id = ws.root().id();
        let tabs: Vec<_> = ws.root().as_panel().unwrap().tabs.clone();
        let bounds = TreeBounds::project(
            ws.root(),
            Bounds::new(0.0, 0.0, 80.0, 24.0),
            TAB_STRIP_ROWS as f64,
        );
        // first label " 1 " occupies columns 1..4 of the strip
        let hit = tab_at(&ws, &bounds, cell_point(2, 1)).unwrap();
        assert_eq!(hit, (panel_id, tabs[0].id));
        // separator at column 4, second label " 2 " at 5..8
        let hit = tab_at(&ws, &bounds, cell_point(6, 1)).unwrap();
        assert_eq!(hit, (panel_id, tabs[1].id));
        assert!(tab_at(&ws, &bounds, cell_point(40, 1)).is_none());
        assert!(tab_at(&ws, &bounds, cell_point(2, 10)).is_none());
    }

    #[test]
    fn panel_hit_test() {
        let ws = Workspace::new(LayoutConfig::default());
        let bounds = TreeBounds::project(
            ws.root(),
            Bounds::new(0.0, 0.0, 80.0, 24.0),
            TAB_STRIP_ROWS as f64,
        );
        assert_eq!(
            panel_at(&ws, &bounds, cell_point(10, 10)),
            Some(ws.root().id())
        );
        assert_eq!(panel_at(&ws, &bounds, cell_point(200, 10)), None);
    }
}
