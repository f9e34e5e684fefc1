//! Pure rectangle/polygon math for drop-zone geometry.
//!
//! Directional zones are pie slices from a panel edge to its center, cut into
//! concentric rings between the center-zone boundary and the true edge. The
//! outermost ring is treated as a rectangular slab spanning the remaining
//! edge margin, so panel corners always resolve to a zone.

use crate::layout::{Axis, Side};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Extent along the stacking direction of `axis`: columns stack children
    /// left-to-right, rows top-to-bottom.
    pub fn span(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Column => self.width,
            Axis::Row => self.height,
        }
    }
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Even-odd ray cast. Degenerate (near-horizontal) edges get a tiny slope so
/// the division stays finite.
pub fn point_in_polygon(point: Point, poly: &[Point]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let (xi, yi) = (poly[i].x, poly[i].y);
        let (xj, yj) = (poly[j].x, poly[j].y);
        let dy = if (yj - yi).abs() < f64::EPSILON {
            1e-8
        } else {
            yj - yi
        };
        let intersects =
            ((yi > point.y) != (yj > point.y)) && (point.x < (xj - xi) * (point.y - yi) / dy + xi);
        if intersects {
            inside = !inside;
        }
        j = i;
    }
    inside
}

pub fn center_rect(bounds: Bounds, center_fraction: f64) -> Bounds {
    let w = bounds.width * center_fraction;
    let h = bounds.height * center_fraction;
    Bounds::new(
        bounds.left + (bounds.width - w) / 2.0,
        bounds.top + (bounds.height - h) / 2.0,
        w,
        h,
    )
}

/// Number of directional rings offered for a panel: one per ancestor level up
/// to `max_depth`, further capped so each ring keeps at least `min_band_px`
/// of thickness on the panel's shorter edge.
pub fn effective_layer_count(
    bounds: Bounds,
    depth: usize,
    max_depth: usize,
    min_band_px: f64,
) -> usize {
    let by_depth = depth.min(max_depth) + 1;
    let by_px = (bounds.width.min(bounds.height) / (2.0 * min_band_px)).floor() as usize;
    by_depth.min(by_px.max(1)).max(1)
}

fn clip_polygon(
    poly: &[Point],
    inside: impl Fn(Point) -> bool,
    intersect: impl Fn(Point, Point) -> Point,
) -> Vec<Point> {
    if poly.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(poly.len() + 2);
    let mut prev = poly[poly.len() - 1];
    let mut prev_inside = inside(prev);
    for &curr in poly {
        let curr_inside = inside(curr);
        if curr_inside {
            if !prev_inside {
                out.push(intersect(prev, curr));
            }
            out.push(curr);
        } else if prev_inside {
            out.push(intersect(prev, curr));
        }
        prev = curr;
        prev_inside = curr_inside;
    }
    out
}

fn intersect_with_vertical(a: Point, b: Point, x_line: f64) -> Point {
    let dx = b.x - a.x;
    if dx.abs() < 1e-8 {
        return Point::new(x_line, a.y);
    }
    let t = (x_line - a.x) / dx;
    Point::new(x_line, a.y + (b.y - a.y) * t)
}

fn intersect_with_horizontal(a: Point, b: Point, y_line: f64) -> Point {
    let dy = b.y - a.y;
    if dy.abs() < 1e-8 {
        return Point::new(a.x, y_line);
    }
    let t = (y_line - a.y) / dy;
    Point::new(a.x + (b.x - a.x) * t, y_line)
}

/// Pie-slice triangle from the given edge to the rectangle center.
fn base_polygon(bounds: Bounds, side: Side) -> Vec<Point> {
    let c = bounds.center();
    let (left, right) = (bounds.left, bounds.right());
    let (top, bottom) = (bounds.top, bounds.bottom());
    match side {
        Side::Top => vec![Point::new(left, top), Point::new(right, top), c],
        Side::Bottom => vec![Point::new(right, bottom), Point::new(left, bottom), c],
        Side::Left => vec![Point::new(left, bottom), Point::new(left, top), c],
        Side::Right => vec![Point::new(right, top), Point::new(right, bottom), c],
    }
}

fn clip_between(poly: &[Point], min: f64, max: f64, horizontal: bool) -> Vec<Point> {
    let first = if horizontal {
        clip_polygon(poly, |p| p.y >= min, |a, b| intersect_with_horizontal(a, b, min))
    } else {
        clip_polygon(poly, |p| p.x >= min, |a, b| intersect_with_vertical(a, b, min))
    };
    if horizontal {
        clip_polygon(&first, |p| p.y <= max, |a, b| intersect_with_horizontal(a, b, max))
    } else {
        clip_polygon(&first, |p| p.x <= max, |a, b| intersect_with_vertical(a, b, max))
    }
}

/// Pie slice for `side`, clipped to the ring between `inner_ratio` and
/// `outer_ratio` (0 = center, 1 = edge).
fn ring_clipped_polygon(bounds: Bounds, side: Side, inner_ratio: f64, outer_ratio: f64) -> Vec<Point> {
    let inner = clamp(inner_ratio, 0.0, 1.0);
    let outer = clamp(outer_ratio, 0.0, 1.0);
    if outer <= inner {
        return Vec::new();
    }
    let c = bounds.center();
    let half_w = bounds.width / 2.0;
    let half_h = bounds.height / 2.0;
    let poly = base_polygon(bounds, side);

    match side {
        Side::Left => clip_between(&poly, c.x - outer * half_w, c.x - inner * half_w, false),
        Side::Right => clip_between(&poly, c.x + inner * half_w, c.x + outer * half_w, false),
        Side::Top => clip_between(&poly, c.y - outer * half_h, c.y - inner * half_h, true),
        Side::Bottom => clip_between(&poly, c.y + inner * half_h, c.y + outer * half_h, true),
    }
}

/// Rectangular annulus partition for one ring: TOP/BOTTOM take full-width
/// strips, LEFT/RIGHT the side rectangles between them. The four rectangles
/// tile the ring exactly, corners included.
fn annulus_rect_polygon(
    bounds: Bounds,
    side: Side,
    inner_ratio: f64,
    outer_ratio: f64,
) -> Vec<Point> {
    let c = bounds.center();
    let half_w = bounds.width / 2.0;
    let half_h = bounds.height / 2.0;
    let x_outer_left = c.x - outer_ratio * half_w;
    let x_outer_right = c.x + outer_ratio * half_w;
    let y_outer_top = c.y - outer_ratio * half_h;
    let y_outer_bottom = c.y + outer_ratio * half_h;
    let x_inner_left = c.x - inner_ratio * half_w;
    let x_inner_right = c.x + inner_ratio * half_w;
    let y_inner_top = c.y - inner_ratio * half_h;
    let y_inner_bottom = c.y + inner_ratio * half_h;

    match side {
        Side::Top if y_inner_top > y_outer_top => vec![
            Point::new(x_outer_left, y_outer_top),
            Point::new(x_outer_right, y_outer_top),
            Point::new(x_outer_right, y_inner_top),
            Point::new(x_outer_left, y_inner_top),
        ],
        Side::Bottom if y_outer_bottom > y_inner_bottom => vec![
            Point::new(x_outer_left, y_inner_bottom),
            Point::new(x_outer_right, y_inner_bottom),
            Point::new(x_outer_right, y_outer_bottom),
            Point::new(x_outer_left, y_outer_bottom),
        ],
        Side::Left if x_inner_left > x_outer_left && y_inner_bottom > y_inner_top => vec![
            Point::new(x_outer_left, y_inner_top),
            Point::new(x_inner_left, y_inner_top),
            Point::new(x_inner_left, y_inner_bottom),
            Point::new(x_outer_left, y_inner_bottom),
        ],
        Side::Right if x_outer_right > x_inner_right && y_inner_bottom > y_inner_top => vec![
            Point::new(x_inner_right, y_inner_top),
            Point::new(x_outer_right, y_inner_top),
            Point::new(x_outer_right, y_inner_bottom),
            Point::new(x_inner_right, y_inner_bottom),
        ],
        _ => Vec::new(),
    }
}

fn ring_ratios(layer: usize, total_layers: usize, start_ratio: f64) -> (f64, f64) {
    let start = clamp(start_ratio, 0.0, 0.95);
    let ring = (1.0 - start) / total_layers as f64;
    (
        start + (layer - 1) as f64 * ring,
        start + layer as f64 * ring,
    )
}

/// Hit-test polygon for a directional ring. Rings are indexed 1 (innermost,
/// nearest center) to `total_layers` (outermost, nearest the edge); the
/// outermost ring is the rectangular slab.
pub fn band_polygon(
    bounds: Bounds,
    layer: usize,
    total_layers: usize,
    side: Side,
    start_ratio: f64,
) -> Vec<Point> {
    if layer < 1 || total_layers < 1 || layer > total_layers {
        return Vec::new();
    }
    let (inner, outer) = ring_ratios(layer, total_layers, start_ratio);
    if layer == total_layers {
        annulus_rect_polygon(bounds, side, inner, outer)
    } else {
        ring_clipped_polygon(bounds, side, inner, outer)
    }
}

/// Display polygon for a directional ring: the rectangular annulus partition
/// for every ring, which is what gets rendered as the zone overlay.
pub fn display_band_polygon(
    bounds: Bounds,
    layer: usize,
    total_layers: usize,
    side: Side,
    start_ratio: f64,
) -> Vec<Point> {
    if layer < 1 || total_layers < 1 || layer > total_layers {
        return Vec::new();
    }
    let (inner, outer) = ring_ratios(layer, total_layers, start_ratio);
    annulus_rect_polygon(bounds, side, inner, outer)
}

/// Project an absolute polygon into percentage coordinates relative to its
/// bounds, as a CSS-style `polygon(...)` string. Visualization only.
pub fn polygon_to_clip_path(bounds: Bounds, poly: &[Point]) -> String {
    if poly.len() < 3 || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return String::new();
    }
    let points = poly
        .iter()
        .map(|p| {
            let x = clamp((p.x - bounds.left) / bounds.width * 100.0, 0.0, 100.0);
            let y = clamp((p.y - bounds.top) / bounds.height * 100.0, 0.0, 100.0);
            format!("{x:.2}% {y:.2}%")
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("polygon({points})")
}
