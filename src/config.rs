use serde::{Deserialize, Serialize};

use crate::geometry::Bounds;
use crate::layout::Axis;

/// Drag visualization mode cycled by the view-mode command and persisted
/// with the layout snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    Hitbox,
    Preview,
    Combined,
}

impl PreviewMode {
    pub fn next(self) -> Self {
        match self {
            PreviewMode::Hitbox => PreviewMode::Preview,
            PreviewMode::Preview => PreviewMode::Combined,
            PreviewMode::Combined => PreviewMode::Hitbox,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PreviewMode::Hitbox => "hitbox",
            PreviewMode::Preview => "preview",
            PreviewMode::Combined => "combined",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Center stack-zone fraction (0.01..0.95).
    pub center_fraction: f64,
    /// Minimum directional band thickness in px.
    pub min_band_px: f64,
    /// Max ancestor levels exposed as directional layers.
    pub max_depth: usize,
    /// Minimum panel width as a fraction of workspace width (0.01..1).
    pub min_box_width_fraction: f64,
    /// Minimum panel height as a fraction of workspace height (0.01..1).
    pub min_box_height_fraction: f64,
    /// Global cap on total boxes/tabs.
    pub max_total_box_count: u32,
    /// Max siblings in horizontal stacks (column axis).
    pub max_horizontal_stack: u32,
    /// Max siblings in vertical stacks (row axis).
    pub max_vertical_stack: u32,
    /// Idle time before a drop preview appears.
    pub preview_idle_ms: u64,
    /// Pointer-move threshold used for preview jitter filtering.
    pub preview_move_threshold_px: f64,
    /// Extra hit slop around sibling boundaries.
    pub between_sibling_hit_slop_px: f64,
    /// Initial drag visualization mode.
    pub default_preview_mode: PreviewMode,
    /// Snapped resize levels.
    pub resize_snap_levels: u32,
    /// Allow stacking by dropping on the tab strip.
    pub allow_tab_strip_stack_zone: bool,
    /// Minimum panel height fraction below which the tab strip stack zone is
    /// suppressed so it cannot collide with the center zone.
    pub tab_strip_stack_zone_min_height_fraction: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_fraction: 0.32,
            min_band_px: 12.0,
            max_depth: 6,
            min_box_width_fraction: 0.08,
            min_box_height_fraction: 0.08,
            max_total_box_count: 30,
            max_horizontal_stack: 6,
            max_vertical_stack: 6,
            preview_idle_ms: 300,
            preview_move_threshold_px: 4.0,
            between_sibling_hit_slop_px: 10.0,
            default_preview_mode: PreviewMode::Preview,
            resize_snap_levels: 8,
            allow_tab_strip_stack_zone: true,
            tab_strip_stack_zone_min_height_fraction: 0.12,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

fn positive_int_or(value: u32, fallback: u32) -> u32 {
    if value > 0 { value } else { fallback }
}

fn fraction_or(value: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    // Accept percent-style inputs (e.g. 8 for 8%).
    let normalized = if value > 1.0 && value <= 100.0 {
        value / 100.0
    } else {
        value
    };
    normalized.clamp(0.01, 1.0)
}

impl LayoutConfig {
    /// Clamp every field into its documented range, falling back to the
    /// defaults for nonsensical inputs.
    pub fn normalized(self) -> Self {
        let d = LayoutConfig::default();
        Self {
            center_fraction: if self.center_fraction.is_finite() {
                self.center_fraction.clamp(0.01, 0.95)
            } else {
                d.center_fraction
            },
            min_band_px: positive_or(self.min_band_px, d.min_band_px),
            max_depth: self.max_depth.max(1),
            min_box_width_fraction: fraction_or(self.min_box_width_fraction, d.min_box_width_fraction),
            min_box_height_fraction: fraction_or(self.min_box_height_fraction, d.min_box_height_fraction),
            max_total_box_count: positive_int_or(self.max_total_box_count, d.max_total_box_count),
            max_horizontal_stack: positive_int_or(self.max_horizontal_stack, d.max_horizontal_stack),
            max_vertical_stack: positive_int_or(self.max_vertical_stack, d.max_vertical_stack),
            preview_idle_ms: if self.preview_idle_ms > 0 {
                self.preview_idle_ms
            } else {
                d.preview_idle_ms
            },
            preview_move_threshold_px: positive_or(self.preview_move_threshold_px, d.preview_move_threshold_px),
            between_sibling_hit_slop_px: positive_or(self.between_sibling_hit_slop_px, d.between_sibling_hit_slop_px),
            default_preview_mode: self.default_preview_mode,
            resize_snap_levels: positive_int_or(self.resize_snap_levels, d.resize_snap_levels),
            allow_tab_strip_stack_zone: self.allow_tab_strip_stack_zone,
            tab_strip_stack_zone_min_height_fraction: fraction_or(
                self.tab_strip_stack_zone_min_height_fraction,
                d.tab_strip_stack_zone_min_height_fraction,
            ),
        }
    }

    pub fn stack_limit(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Column => self.max_horizontal_stack,
            Axis::Row => self.max_vertical_stack,
        }
    }

    pub fn can_add_sibling(&self, axis: Axis, next_sibling_count: usize) -> bool {
        next_sibling_count <= self.stack_limit(axis) as usize
    }

    /// Minimum panel extent in pixels along `axis`, resolved against the
    /// workspace rectangle.
    pub fn min_span_px(&self, workspace: Bounds, axis: Axis) -> f64 {
        match axis {
            Axis::Column => (workspace.width * self.min_box_width_fraction).max(1.0),
            Axis::Row => (workspace.height * self.min_box_height_fraction).max(1.0),
        }
    }

    /// (min width, min height) in pixels for the given workspace rectangle.
    pub fn min_box_px(&self, workspace: Bounds) -> (f64, f64) {
        (
            self.min_span_px(workspace, Axis::Column),
            self.min_span_px(workspace, Axis::Row),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_clamps_center_fraction() {
        let config = LayoutConfig {
            center_fraction: 2.5,
            ..LayoutConfig::default()
        };
        assert_eq!(config.normalized().center_fraction, 0.95);
    }

    #[test]
    fn normalized_accepts_percent_fractions() {
        let config = LayoutConfig {
            min_box_width_fraction: 8.0,
            ..LayoutConfig::default()
        };
        let normalized = config.normalized();
        assert!((normalized.min_box_width_fraction - 0.08).abs() < 1e-12);
    }

    #[test]
    fn normalized_replaces_nonsense_with_defaults() {
        let config = LayoutConfig {
            min_band_px: -3.0,
            max_total_box_count: 0,
            ..LayoutConfig::default()
        };
        let normalized = config.normalized();
        assert_eq!(normalized.min_band_px, 12.0);
        assert_eq!(normalized.max_total_box_count, 30);
    }

    #[test]
    fn min_span_resolves_against_workspace() {
        let config = LayoutConfig::default();
        let workspace = Bounds::new(0.0, 0.0, 1000.0, 500.0);
        assert_eq!(config.min_span_px(workspace, Axis::Column), 80.0);
        assert_eq!(config.min_span_px(workspace, Axis::Row), 40.0);
    }
}
