//! Waypoint path following: cursor advancement and arrival detection.

use cbs_core::Vec2;

/// Advance `index` past every waypoint within `arrive_radius` of `position`
/// and return the new index plus the current target waypoint.
///
/// `None` means the path is exhausted (or was empty to begin with): the
/// caller has no target and should treat the tick as idle-equivalent.
/// Consecutive waypoints inside the radius are all skipped in one call, so a
/// fast agent can't stall on a tight cluster.
pub fn advance_path(
    waypoints:     &[Vec2],
    mut index:     usize,
    position:      Vec2,
    arrive_radius: f32,
) -> (usize, Option<Vec2>) {
    while index < waypoints.len() && position.distance(waypoints[index]) <= arrive_radius {
        index += 1;
    }
    (index, waypoints.get(index).copied())
}
