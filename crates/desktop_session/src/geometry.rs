//! Pure geometry for the desktop surface: bounds clamping, grid snapping, and
//! anchored window resizing. Nothing here touches session state.

use desktop_contract::{Point, Rect, Size};

use crate::model::{ResizeEdge, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, TASKBAR_HEIGHT};

/// Pointer distance from a viewport edge that triggers drag-release snapping.
pub const SNAP_EDGE_THRESHOLD: i32 = 24;

/// Minimum window dimensions enforced before any viewport clamping.
pub fn min_window_size() -> Size {
    Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}

/// Usable desktop rectangle for a viewport: everything above the reserved
/// taskbar strip. Hosts implementing `DesktopBounds` derive their rect here.
pub fn usable_area(viewport: Rect) -> Rect {
    viewport.minus_bottom(TASKBAR_HEIGHT)
}

/// Clamps a rectangle into `bounds`, shrinking it first when it is larger
/// than the bounds on an axis.
pub fn clamp_rect(rect: Rect, bounds: Rect) -> Rect {
    if bounds.w <= 0 || bounds.h <= 0 {
        return rect;
    }
    let w = rect.w.min(bounds.w);
    let h = rect.h.min(bounds.h);
    Rect {
        x: rect.x.clamp(bounds.x, bounds.right() - w),
        y: rect.y.clamp(bounds.y, bounds.bottom() - h),
        w,
        h,
    }
}

fn round_to_grid(value: i32, grid: i32) -> i32 {
    (value + grid / 2).div_euclid(grid) * grid
}

fn floor_to_grid(value: i32, grid: i32) -> i32 {
    value.div_euclid(grid) * grid
}

fn ceil_to_grid(value: i32, grid: i32) -> i32 {
    -((-value).div_euclid(grid)) * grid
}

/// Snaps `value` to the nearest grid multiple inside `[lo, hi]`.
///
/// The result is always a grid multiple when the range contains one;
/// otherwise it degrades to a plain clamp.
pub fn snap_axis(value: i32, lo: i32, hi: i32, grid: i32) -> i32 {
    if grid <= 0 || hi < lo {
        return value.clamp(lo.min(hi), hi.max(lo));
    }
    let lo_grid = ceil_to_grid(lo, grid);
    let hi_grid = floor_to_grid(hi, grid);
    if hi_grid < lo_grid {
        return value.clamp(lo, hi);
    }
    round_to_grid(value, grid).clamp(lo_grid, hi_grid)
}

/// Clamps an icon's top-left corner so its cell stays inside `bounds`, then
/// snaps it to the grid. Applied live during a drag and again on release.
pub fn snap_icon_position(position: Point, bounds: Rect, cell: Size, grid: i32) -> Point {
    Point {
        x: snap_axis(position.x, bounds.x, bounds.right() - cell.w, grid),
        y: snap_axis(position.y, bounds.y, bounds.bottom() - cell.h, grid),
    }
}

/// Applies resize deltas for an edge/corner drag.
///
/// North/west-bearing edges move the origin so the opposite edge stays fixed,
/// including when the minimum size stops the drag short.
pub fn resize_rect(start: Rect, edge: ResizeEdge, dx: i32, dy: i32, min: Size) -> Rect {
    let right = start.right();
    let bottom = start.bottom();
    let mut rect = start;
    if edge.bears_east() {
        rect.w = (start.w + dx).max(min.w);
    } else if edge.bears_west() {
        rect.w = (start.w - dx).max(min.w);
        rect.x = right - rect.w;
    }
    if edge.bears_south() {
        rect.h = (start.h + dy).max(min.h);
    } else if edge.bears_north() {
        rect.h = (start.h - dy).max(min.h);
        rect.y = bottom - rect.h;
    }
    rect
}

/// Clamps a resized rectangle to `bounds` without disturbing the anchored
/// edges; the minimum size wins over the bounds on conflict.
pub fn clamp_resized(rect: Rect, edge: ResizeEdge, bounds: Rect, min: Size) -> Rect {
    let mut rect = rect;
    if edge.bears_west() {
        if rect.x < bounds.x {
            rect.w -= bounds.x - rect.x;
            rect.x = bounds.x;
        }
    } else if edge.bears_east() {
        rect.w = rect.w.min(bounds.right() - rect.x);
    }
    if edge.bears_north() {
        if rect.y < bounds.y {
            rect.h -= bounds.y - rect.y;
            rect.y = bounds.y;
        }
    } else if edge.bears_south() {
        rect.h = rect.h.min(bounds.bottom() - rect.y);
    }
    rect.clamped_min(min.w, min.h)
}

/// Snap applied when a window drag releases near a viewport edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSnap {
    /// Release near the top edge maximizes the window.
    Maximize,
    /// Release near the left edge fills the left half.
    LeftHalf,
    /// Release near the right edge fills the right half.
    RightHalf,
}

/// Determines the edge snap for a dragged rectangle, top edge first.
pub fn edge_snap_target(rect: Rect, bounds: Rect) -> Option<EdgeSnap> {
    if rect.y <= bounds.y + SNAP_EDGE_THRESHOLD {
        return Some(EdgeSnap::Maximize);
    }
    if rect.x <= bounds.x + SNAP_EDGE_THRESHOLD {
        return Some(EdgeSnap::LeftHalf);
    }
    if rect.right() >= bounds.right() - SNAP_EDGE_THRESHOLD {
        return Some(EdgeSnap::RightHalf);
    }
    None
}

/// Half-viewport rectangle used by left/right edge snapping.
pub fn half_rect(bounds: Rect, snap: EdgeSnap, min: Size) -> Rect {
    let half_width = (bounds.w / 2).max(min.w);
    Rect {
        x: if snap == EdgeSnap::RightHalf {
            bounds.right() - half_width
        } else {
            bounds.x
        },
        y: bounds.y,
        w: half_width,
        h: bounds.h.max(min.h),
    }
}
