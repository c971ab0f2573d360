//! Occupancy grid
//!
//! A fixed-size scalar field in [0,1]; cells at or above `SOLID_THRESHOLD`
//! are walls. Generated once per session and immutable afterwards.
//!
//! `generate` is the CPU reference for the GPU pass in
//! `renderer/generate_shader.wgsl`: same pcg4d lattice hash, same smoothstep
//! interpolation, same solid border ring. Tests pin this one; the shader
//! mirrors it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{NOISE_CELL, SOLID_THRESHOLD};

/// Row-major scalar occupancy field
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<f32>,
}

impl OccupancyGrid {
    /// Wrap an already-generated field (e.g. a GPU readback). The cell count
    /// must match the dimensions; the generator validates before calling.
    pub fn from_cells(width: u32, height: u32, cells: Vec<f32>) -> Self {
        debug_assert_eq!(cells.len(), (width * height) as usize);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Generate the reference field for `seed`
    pub fn generate(width: u32, height: u32, seed: u64) -> Self {
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(cell_value(x, y, width, height, seed));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw occupancy values, row-major (bound to the GPU for sampling)
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Occupancy value at a cell; out of bounds reads as 0 (open)
    #[inline]
    pub fn value_at(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0.0;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Whether a cell is a wall. Out-of-bounds cells are open; the border
    /// ring the generator writes is what actually fences the playfield.
    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.value_at(x, y) >= SOLID_THRESHOLD
    }

    /// Pick an open cell center to spawn the player on. Rejection-samples the
    /// interior, then falls back to a row-major scan, then to the grid center
    /// (only reachable on a degenerate all-solid field).
    pub fn find_spawn(&self, rng: &mut Pcg32) -> Vec2 {
        const MAX_ATTEMPTS: u32 = 1024;

        if self.width > 2 && self.height > 2 {
            for _ in 0..MAX_ATTEMPTS {
                let x = rng.random_range(1..self.width - 1) as i32;
                let y = rng.random_range(1..self.height - 1) as i32;
                if !self.is_solid(x, y) {
                    return cell_center(x, y);
                }
            }
        }

        for y in 1..self.height.saturating_sub(1) as i32 {
            for x in 1..self.width.saturating_sub(1) as i32 {
                if !self.is_solid(x, y) {
                    return cell_center(x, y);
                }
            }
        }

        cell_center(self.width as i32 / 2, self.height as i32 / 2)
    }
}

#[inline]
fn cell_center(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// 4D PCG hash (Jarzynski/Olano family). The WGSL generator runs the exact
/// same sequence in u32 arithmetic.
fn pcg4d(mut v: [u32; 4]) -> [u32; 4] {
    for c in v.iter_mut() {
        *c = c.wrapping_mul(1664525).wrapping_add(1013904223);
    }
    v[0] = v[0].wrapping_add(v[1].wrapping_mul(v[3]));
    v[1] = v[1].wrapping_add(v[2].wrapping_mul(v[0]));
    v[2] = v[2].wrapping_add(v[0].wrapping_mul(v[1]));
    v[3] = v[3].wrapping_add(v[1].wrapping_mul(v[2]));
    for c in v.iter_mut() {
        *c ^= *c >> 16;
    }
    v[0] = v[0].wrapping_add(v[1].wrapping_mul(v[3]));
    v[1] = v[1].wrapping_add(v[2].wrapping_mul(v[0]));
    v[2] = v[2].wrapping_add(v[0].wrapping_mul(v[1]));
    v[3] = v[3].wrapping_add(v[1].wrapping_mul(v[2]));
    v
}

/// Hash a noise lattice point to [0,1]
#[inline]
fn lattice_value(lx: u32, ly: u32, seed: u64) -> f32 {
    let h = pcg4d([lx, ly, seed as u32, (seed >> 32) as u32]);
    h[0] as f32 / u32::MAX as f32
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Occupancy of a single cell: smoothed value noise on a NOISE_CELL lattice,
/// with the outermost ring forced solid.
fn cell_value(x: u32, y: u32, width: u32, height: u32, seed: u64) -> f32 {
    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
        return 1.0;
    }

    let lx = x / NOISE_CELL;
    let ly = y / NOISE_CELL;
    let fx = fade((x % NOISE_CELL) as f32 / NOISE_CELL as f32);
    let fy = fade((y % NOISE_CELL) as f32 / NOISE_CELL as f32);

    let v00 = lattice_value(lx, ly, seed);
    let v10 = lattice_value(lx + 1, ly, seed);
    let v01 = lattice_value(lx, ly + 1, seed);
    let v11 = lattice_value(lx + 1, ly + 1, seed);

    let top = v00 + (v10 - v00) * fx;
    let bottom = v01 + (v11 - v01) * fx;
    top + (bottom - top) * fy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn generation_is_deterministic_for_seed() {
        let a = OccupancyGrid::generate(64, 64, 0xDEAD_BEEF);
        let b = OccupancyGrid::generate(64, 64, 0xDEAD_BEEF);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn different_seeds_differ() {
        let a = OccupancyGrid::generate(64, 64, 1);
        let b = OccupancyGrid::generate(64, 64, 2);
        assert_ne!(a.cells(), b.cells());
    }

    #[test]
    fn values_stay_in_unit_range() {
        let grid = OccupancyGrid::generate(64, 64, 42);
        assert!(grid.cells().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn border_ring_is_solid() {
        let grid = OccupancyGrid::generate(32, 32, 7);
        for i in 0..32 {
            assert!(grid.is_solid(i, 0));
            assert!(grid.is_solid(i, 31));
            assert!(grid.is_solid(0, i));
            assert!(grid.is_solid(31, i));
        }
    }

    #[test]
    fn out_of_bounds_reads_open() {
        let grid = OccupancyGrid::generate(16, 16, 3);
        assert!(!grid.is_solid(-1, 4));
        assert!(!grid.is_solid(4, -1));
        assert!(!grid.is_solid(16, 4));
        assert!(!grid.is_solid(4, 16));
        assert_eq!(grid.value_at(-5, -5), 0.0);
    }

    #[test]
    fn spawn_lands_on_open_cell() {
        let grid = OccupancyGrid::generate(64, 64, 99);
        let mut rng = Pcg32::seed_from_u64(99);
        let spawn = grid.find_spawn(&mut rng);
        let (x, y) = (spawn.x.floor() as i32, spawn.y.floor() as i32);
        assert!(!grid.is_solid(x, y));
        // Center of the cell, not a corner
        assert_eq!(spawn.x.fract(), 0.5);
        assert_eq!(spawn.y.fract(), 0.5);
    }

    #[test]
    fn spawn_scan_fallback_on_mostly_solid_field() {
        // Every interior cell solid except one; rejection sampling may miss
        // it, the scan must not.
        let (w, h) = (16u32, 16u32);
        let mut cells = vec![1.0f32; (w * h) as usize];
        cells[(5 * w + 9) as usize] = 0.0;
        let grid = OccupancyGrid::from_cells(w, h, cells);
        let mut rng = Pcg32::seed_from_u64(0);
        let spawn = grid.find_spawn(&mut rng);
        assert_eq!(spawn, Vec2::new(9.5, 5.5));
    }
}
