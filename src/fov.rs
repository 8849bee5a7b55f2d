//! Recursive shadow-casting field of view.
//!
//! The eight octants share one recursive core parameterized by an octant
//! transform, in the same style as `compute_fov`/`cast_light` in
//! `examples/arte-fact-the-cave/src/map/fov.rs` (which uses the same
//! `[col_to_x, depth_to_x, col_to_y, depth_to_y]` octant table, there over
//! integer slopes), generalized here to real top/bottom vector recursion.

use crate::grid::TileGrid;

/// Hard ceiling on shadowcast column recursion.
pub const MAX_FOV_RECURSION: i32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    CannotSee,
    Seen,
    Visible,
}

/// Visibility grid parallel to a [`TileGrid`]. Opacity is read straight off
/// the backing grid (`is_opaque`); `in_range` is supplied per call so the
/// same visibility grid can serve different radii.
pub struct VisibilityGrid {
    width: i32,
    height: i32,
    cells: Vec<Visibility>,
}

impl VisibilityGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width * height).max(0) as usize;
        Self { width, height, cells: vec![Visibility::CannotSee; len] }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn get(&self, x: i32, y: i32) -> Visibility {
        if !self.in_bounds(x, y) {
            return Visibility::CannotSee;
        }
        self.cells[self.index(x, y)]
    }

    fn mark_visible(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            let i = self.index(x, y);
            self.cells[i] = Visibility::Visible;
        }
    }

    /// Demotes every currently-Visible cell to Seen — called at the start
    /// of every FOV update (the "Visibility Grid").
    pub fn age(&mut self) {
        for c in &mut self.cells {
            if *c == Visibility::Visible {
                *c = Visibility::Seen;
            }
        }
    }
}

/// One of the disc's 8 symmetric sectors, as two (col, depth) → (dx, dy)
/// multiplier pairs (the "Octant").
#[derive(Clone, Copy)]
struct Octant {
    col_to_x: i32,
    depth_to_x: i32,
    col_to_y: i32,
    depth_to_y: i32,
}

const OCTANTS: [Octant; 8] = [
    Octant { col_to_x: 1, depth_to_x: 0, col_to_y: 0, depth_to_y: 1 },
    Octant { col_to_x: 0, depth_to_x: 1, col_to_y: 1, depth_to_y: 0 },
    Octant { col_to_x: 0, depth_to_x: 1, col_to_y: -1, depth_to_y: 0 },
    Octant { col_to_x: 1, depth_to_x: 0, col_to_y: 0, depth_to_y: -1 },
    Octant { col_to_x: -1, depth_to_x: 0, col_to_y: 0, depth_to_y: -1 },
    Octant { col_to_x: 0, depth_to_x: -1, col_to_y: -1, depth_to_y: 0 },
    Octant { col_to_x: 0, depth_to_x: -1, col_to_y: 1, depth_to_y: 0 },
    Octant { col_to_x: -1, depth_to_x: 0, col_to_y: 0, depth_to_y: 1 },
];

/// Recomputes field of view from `(px, py)` out to `radius` (negative means
/// unbounded, in practice capped at [`MAX_FOV_RECURSION`]). Ages the grid
/// first, then always marks the origin Visible.
pub fn compute_fov(vis: &mut VisibilityGrid, grid: &TileGrid, px: i32, py: i32, radius: i32) {
    vis.age();
    vis.mark_visible(px, py);

    let radius = if radius < 0 { MAX_FOV_RECURSION } else { radius.min(MAX_FOV_RECURSION) };

    for oct in &OCTANTS {
        cast_light(vis, grid, px, py, radius, 1, 1.0, 0.0, oct);
    }
}

#[allow(clippy::too_many_arguments)]
fn cast_light(
    vis: &mut VisibilityGrid,
    grid: &TileGrid,
    px: i32,
    py: i32,
    radius: i32,
    depth: i32,
    mut top_slope: f64,
    bottom_slope: f64,
    oct: &Octant,
) {
    if top_slope < bottom_slope || depth > radius || depth > MAX_FOV_RECURSION {
        return;
    }

    for d in depth..=radius {
        let mut new_top = top_slope;
        let mut blocked = false;

        let mut col = d;
        while col >= 0 {
            let map_x = px + col * oct.col_to_x + d * oct.depth_to_x;
            let map_y = py + col * oct.col_to_y + d * oct.depth_to_y;

            let l_slope = (col as f64 + 0.5) / (d as f64 - 0.5);
            let r_slope = (col as f64 - 0.5) / (d as f64 + 0.5);

            if top_slope < r_slope {
                col -= 1;
                continue;
            }
            if bottom_slope > l_slope {
                break;
            }

            // Chebyshev range, not circular: `d` (depth) is always the
            // Chebyshev distance from the origin in this octant's
            // coordinates, since `col` never exceeds `d`. The `for d in
            // depth..=radius` bound above already enforces it; this is the
            // deliberate square-not-circle radius the Chebyshev end-to-end
            // scenario requires, not an oversight.
            let within_radius = d <= radius;
            let symmetric_ok = symmetric_visible(col, d, top_slope, bottom_slope, l_slope, r_slope);
            if within_radius && symmetric_ok {
                vis.mark_visible(map_x, map_y);
            }

            let is_opaque = grid.is_opaque(map_x, map_y);

            if blocked {
                if is_opaque {
                    // Still inside the wall run: keep raising the bottom
                    // edge to this cell's right slope so the resumed scan
                    // starts at the far side of the whole run, not the near
                    // side of the first opaque cell.
                    new_top = r_slope;
                    col -= 1;
                    continue;
                }
                // opaque -> clear: resume scanning with the top vector
                // lowered to the run's far edge.
                blocked = false;
                top_slope = new_top;
            } else if is_opaque {
                // clear (or row start) -> opaque: recurse into the next
                // row with the bottom raised to this wall's near edge,
                // then keep scanning this row in case the wedge reopens
                // past the run.
                blocked = true;
                if d < radius {
                    cast_light(vis, grid, px, py, radius, d + 1, top_slope, l_slope, oct);
                }
                new_top = r_slope;
            }

            col -= 1;
        }

        if blocked {
            break;
        }
    }
}

/// Re-tests the cell's own slope against the wedge instead of trusting the
/// per-column `l_slope`/`r_slope` clamp, so a cell only lights up when it is
/// visible from both ends of its column — the condition that makes "A sees
/// B" imply "B sees A". Disabling the
/// `fov-symmetric` feature skips the re-test and lights the whole wedge.
fn symmetric_visible(col: i32, depth: i32, top_slope: f64, bottom_slope: f64, _l_slope: f64, _r_slope: f64) -> bool {
    #[cfg(feature = "fov-symmetric")]
    {
        let slope = col as f64 / depth as f64;
        slope <= top_slope && slope >= bottom_slope
    }
    #[cfg(not(feature = "fov-symmetric"))]
    {
        let _ = (col, depth, top_slope, bottom_slope);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Tile;

    fn open_room(w: i32, h: i32) -> TileGrid {
        let mut grid = TileGrid::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                grid.set_tile(x, y, Tile::Room);
            }
        }
        grid
    }

    #[test]
    fn origin_is_always_visible() {
        let grid = open_room(5, 5);
        let mut vis = VisibilityGrid::new(5, 5);
        compute_fov(&mut vis, &grid, 2, 2, 2);
        assert_eq!(vis.get(2, 2), Visibility::Visible);
    }

    #[test]
    fn open_room_radius_chebyshev_disc() {
        let grid = open_room(5, 5);
        let mut vis = VisibilityGrid::new(5, 5);
        compute_fov(&mut vis, &grid, 2, 2, 2);
        for y in 0..5 {
            for x in 0..5 {
                let cheb = (x - 2).abs().max((y - 2).abs());
                if cheb <= 2 {
                    assert_eq!(vis.get(x, y), Visibility::Visible, "({x},{y}) cheb={cheb}");
                }
            }
        }
    }

    #[test]
    fn wall_blocks_sight_behind_it() {
        let mut grid = open_room(10, 10);
        grid.set_tile(5, 5, Tile::Rock);
        let mut vis = VisibilityGrid::new(10, 10);
        compute_fov(&mut vis, &grid, 3, 5, 8);
        assert_eq!(vis.get(5, 5), Visibility::Visible);
        assert_eq!(vis.get(7, 5), Visibility::CannotSee);
    }

    #[test]
    fn thick_wall_run_does_not_leak_sight_behind_it() {
        // A two-cell-thick wall (an opaque run of length >= 2 along every
        // ray that crosses it), spanning the full width south of the
        // origin. Pins the shadow-state bug where the wedge's top vector
        // only tracked the *first* opaque cell of a run instead of every
        // cell in it, letting a sliver of light leak through to deeper rows.
        let mut grid = open_room(15, 15);
        for x in 0..15 {
            grid.set_tile(x, 9, Tile::Rock);
            grid.set_tile(x, 10, Tile::Rock);
        }
        let mut vis = VisibilityGrid::new(15, 15);
        compute_fov(&mut vis, &grid, 7, 7, 10);

        for x in 4..11 {
            assert_eq!(vis.get(x, 8), Visibility::Visible, "({x},8) should see up to the wall");
        }
        for y in 11..15 {
            for x in 0..15 {
                assert_eq!(vis.get(x, y), Visibility::CannotSee, "({x},{y}) must be shadowed by the thick wall");
            }
        }
    }

    #[test]
    fn previously_visible_demotes_to_seen_after_recompute() {
        let grid = open_room(20, 20);
        let mut vis = VisibilityGrid::new(20, 20);
        compute_fov(&mut vis, &grid, 10, 10, 5);
        assert_eq!(vis.get(12, 10), Visibility::Visible);
        compute_fov(&mut vis, &grid, 2, 2, 2);
        assert_eq!(vis.get(12, 10), Visibility::Seen);
    }

    #[test]
    fn radius_bounds_visibility() {
        let grid = open_room(50, 50);
        let mut vis = VisibilityGrid::new(50, 50);
        compute_fov(&mut vis, &grid, 25, 25, 6);
        assert_eq!(vis.get(25, 25 + 6 + 2), Visibility::CannotSee);
    }

    #[cfg(feature = "fov-symmetric")]
    #[test]
    fn symmetric_fov_sees_both_ways() {
        let grid = open_room(20, 20);
        let mut vis_a = VisibilityGrid::new(20, 20);
        compute_fov(&mut vis_a, &grid, 10, 10, 6);
        assert_eq!(vis_a.get(13, 10), Visibility::Visible);

        let mut vis_b = VisibilityGrid::new(20, 20);
        compute_fov(&mut vis_b, &grid, 13, 10, 6);
        assert_eq!(vis_b.get(10, 10), Visibility::Visible);
    }
}
