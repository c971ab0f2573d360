//! Circle-versus-grid collision resolution
//!
//! The player is a circle in cell units; walls are unit cells. Each tick the
//! resolver scans the cells under the circle's bounding box in row-major
//! order and pushes the position out of any overlap, carrying the corrected
//! position into the remaining cells of the same scan.
//!
//! The scan is sequential on purpose: penetration vectors are not summed, so
//! a concave multi-cell contact can under-correct within a single tick. The
//! next tick rescans from the corrected position. Same for an exact corner
//! hit (distance zero): the push direction degenerates to zero and the cell
//! is skipped.

use glam::Vec2;

use super::grid::OccupancyGrid;

/// Push `candidate` out of every overlapping solid cell, scan order
pub fn resolve(candidate: Vec2, radius: f32, grid: &OccupancyGrid) -> Vec2 {
    let mut pos = candidate;

    let min_x = (candidate.x - radius).floor() as i32;
    let max_x = (candidate.x + radius).floor() as i32;
    let min_y = (candidate.y - radius).floor() as i32;
    let max_y = (candidate.y + radius).floor() as i32;

    for cell_y in min_y..=max_y {
        for cell_x in min_x..=max_x {
            if !grid.is_solid(cell_x, cell_y) {
                continue;
            }

            let cell_min = Vec2::new(cell_x as f32, cell_y as f32);
            let closest = pos.clamp(cell_min, cell_min + Vec2::ONE);
            let difference = pos - closest;
            let distance = difference.length();

            if distance >= radius {
                continue;
            }

            // On the boundary of the forbidden disk around this cell. The
            // zero-distance case falls through uncorrected.
            pos = closest + difference.normalize_or_zero() * radius;
        }
    }

    pos
}
