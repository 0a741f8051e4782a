//! Axis-aligned collision geometry.

use crate::entities::Rect;

/// True iff the two rectangles share a non-zero-area intersection.
///
/// The test is strict on every edge, so rectangles that merely touch
/// (`a.x + a.w == b.x`) do not overlap.  Symmetric in its arguments.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
