//! Swipe-to-dismiss interpretation
//!
//! Pure mapping from a normalized 2D drag delta to a dismiss-progress value.
//! The engine samples [`dismiss_progress`] while a drag is in flight and
//! applies [`SWIPE_DISMISS_THRESHOLD`] on release; below the threshold the
//! notification snaps back with no state change.

use crate::notifications::types::Position;

/// Drag distance (in normalized input units) that maps to full progress.
pub const SWIPE_REFERENCE_DISTANCE: f64 = 100.0;

/// Releasing at or above this progress dismisses the notification.
pub const SWIPE_DISMISS_THRESHOLD: f64 = 0.3;

/// Dismiss progress in `[0, 1]` for a drag delta against an anchored edge.
///
/// Only displacement along the position's dismiss axis counts (vertical for
/// top/bottom, horizontal for left/right), and only movement away from the
/// anchored edge; dragging toward the edge or off-axis yields 0.
pub fn dismiss_progress(dx: f64, dy: f64, position: Position) -> f64 {
    let displacement = match position {
        Position::Top => -dy,
        Position::Bottom => dy,
        Position::Left => -dx,
        Position::Right => dx,
    };
    (displacement.max(0.0) / SWIPE_REFERENCE_DISTANCE).clamp(0.0, 1.0)
}

/// Whether a released drag at `progress` confirms the dismissal.
pub fn crosses_threshold(progress: f64) -> bool {
    progress >= SWIPE_DISMISS_THRESHOLD
}
