//! Recursive-split room generator.

use rand::Rng;

use crate::bsp::{BspNode, BspTree};
use crate::config::{BspConfig, CorridorStrategy};
use crate::error::MapgenResult;
use crate::grid::{Tile, TileGrid};

use super::carve_l_shaped;
#[cfg(feature = "pathfinding")]
use super::carve_dijkstra;

/// Splits, places one room per leaf, then connects them per
/// `cfg.draw_corridors`. Minimum leaf size is `room_max + padding` on each
/// axis so every leaf can fit its largest possible room.
pub fn generate(width: i32, height: i32, cfg: &BspConfig, rng: &mut impl Rng) -> MapgenResult<(TileGrid, BspTree)> {
    cfg.validate()?;

    let mut grid = TileGrid::new(width, height)?;
    let mut tree = BspTree::new(width, height);

    let min_w = cfg.room_max_w + cfg.room_padding;
    let min_h = cfg.room_max_h + cfg.room_padding;
    tree.recursive_split(tree.root(), min_w, min_h, cfg.max_splits.max(0) as u32, rng);

    generate_rooms(&tree, &mut grid, cfg, rng);
    connect(&tree, &mut grid, cfg, rng);

    Ok((grid, tree))
}

/// Places one room in every leaf whose parent is not itself a leaf: a
/// random size within `[min, max]` clamped to the leaf's interior (after
/// padding), positioned either centred or at a random offset depending on
/// the `bsp-randomise-room-location` feature. A lone root leaf (no splits
/// happened) has no parent and is skipped — the walker only acts where a
/// split actually occurred.
fn generate_rooms(tree: &BspTree, grid: &mut TileGrid, cfg: &BspConfig, rng: &mut impl Rng) {
    for leaf in tree.leaves() {
        if tree.parent(leaf).is_none() {
            continue;
        }
        place_room(grid, tree.node(leaf), cfg, rng);
    }
}

fn place_room(grid: &mut TileGrid, node: &BspNode, cfg: &BspConfig, rng: &mut impl Rng) {
    let max_w = cfg.room_max_w.min(node.width - 2 * cfg.room_padding);
    let max_h = cfg.room_max_h.min(node.height - 2 * cfg.room_padding);
    if max_w < cfg.room_min_w || max_h < cfg.room_min_h {
        return;
    }
    let w = rng.gen_range(cfg.room_min_w..=max_w);
    let h = rng.gen_range(cfg.room_min_h..=max_h);

    let free_w = (node.width - 2 * cfg.room_padding - w).max(0);
    let free_h = (node.height - 2 * cfg.room_padding - h).max(0);

    #[cfg(feature = "bsp-randomise-room-location")]
    let (ox, oy) = (rng.gen_range(0..=free_w), rng.gen_range(0..=free_h));
    #[cfg(not(feature = "bsp-randomise-room-location"))]
    let (ox, oy) = (free_w / 2, free_h / 2);

    let x0 = node.x + cfg.room_padding + ox;
    let y0 = node.y + cfg.room_padding + oy;
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            grid.set_tile(x, y, Tile::Room);
        }
    }
}

fn connect(tree: &BspTree, grid: &mut TileGrid, cfg: &BspConfig, rng: &mut impl Rng) {
    match cfg.draw_corridors {
        CorridorStrategy::None => {}
        CorridorStrategy::Simple => connect_recursive(tree, tree.root(), grid, cfg, rng, false),
        CorridorStrategy::Bsp => connect_recursive(tree, tree.root(), grid, cfg, rng, true),
        CorridorStrategy::Randomly => {
            #[cfg(feature = "pathfinding")]
            connect_randomly(tree, grid, cfg, rng);
        }
    }
}

/// Descends the tree; at every internal node, connects a random leaf from
/// the left subtree to a random leaf from the right. `use_dijkstra` is only
/// honoured when the `pathfinding` feature is compiled in; otherwise it
/// falls back to the straight-line carve.
fn connect_recursive(tree: &BspTree, idx: usize, grid: &mut TileGrid, cfg: &BspConfig, rng: &mut impl Rng, use_dijkstra: bool) {
    let (Some(l), Some(r)) = (tree.left(idx), tree.right(idx)) else { return };

    let left_leaf = tree.random_leaf(rng, l);
    let right_leaf = tree.random_leaf(rng, r);
    if let (Some(a), Some(b)) = (tree.find_room(left_leaf, grid), tree.find_room(right_leaf, grid)) {
        carve(grid, a, b, cfg.draw_doors, use_dijkstra);
    }

    connect_recursive(tree, l, grid, cfg, rng, use_dijkstra);
    connect_recursive(tree, r, grid, cfg, rng, use_dijkstra);
}

/// Walks leaves left-to-right; for each, carves a biased-Dijkstra corridor
/// to a random other leaf, then culls every tile outside the largest
/// connected region.
#[cfg(feature = "pathfinding")]
fn connect_randomly(tree: &BspTree, grid: &mut TileGrid, cfg: &BspConfig, rng: &mut impl Rng) {
    let leaves = tree.leaves();
    if leaves.len() < 2 {
        return;
    }
    for (i, &leaf) in leaves.iter().enumerate() {
        let mut other = leaves[rng.gen_range(0..leaves.len())];
        if other == leaf {
            other = leaves[(i + 1) % leaves.len()];
        }
        if let (Some(a), Some(b)) = (tree.find_room(leaf, grid), tree.find_room(other, grid)) {
            carve_dijkstra(grid, a, b, cfg.draw_doors);
        }
    }
    crate::flood_fill::cull_unconnected(grid);
}

fn carve(grid: &mut TileGrid, a: (i32, i32), b: (i32, i32), draw_doors: bool, use_dijkstra: bool) {
    if use_dijkstra {
        #[cfg(feature = "pathfinding")]
        {
            carve_dijkstra(grid, a, b, draw_doors);
            return;
        }
    }
    let _ = use_dijkstra;
    carve_l_shaped(grid, a, b, draw_doors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Tile;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn minimal_80x25_bsp_has_rooms_corridors_and_doors() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cfg = BspConfig::normal();
        let (grid, _tree) = generate(80, 25, &cfg, &mut rng).unwrap();

        let mut rooms = 0;
        let mut corridors = 0;
        let mut doors = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                match grid.tile_at(x, y) {
                    Tile::Room => rooms += 1,
                    Tile::Corridor => corridors += 1,
                    Tile::Door | Tile::DoorOpen => doors += 1,
                    _ => {}
                }
            }
        }
        assert!(rooms >= 2);
        assert!(corridors >= 1);
        assert!(doors >= 1);
    }

    #[test]
    fn randomly_strategy_yields_full_connectivity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cfg = BspConfig::normal();
        let (grid, _tree) = generate(80, 25, &cfg, &mut rng).unwrap();

        let total_passable = (0..grid.height())
            .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| grid.is_passable(x, y))
            .count();
        let largest = crate::flood_fill::largest_connected_area(&grid).unwrap();
        assert_eq!(crate::flood_fill::scored_count(&largest), total_passable);
    }

    #[test]
    fn none_strategy_leaves_rooms_unconnected_by_corridors() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut cfg = BspConfig::normal();
        cfg.draw_corridors = CorridorStrategy::None;
        let (grid, _tree) = generate(40, 20, &cfg, &mut rng).unwrap();
        let corridors = (0..grid.height())
            .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| grid.tile_at(x, y) == Tile::Corridor)
            .count();
        assert_eq!(corridors, 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut cfg = BspConfig::normal();
        cfg.room_min_w = 20;
        cfg.room_max_w = 4;
        assert!(generate(40, 20, &cfg, &mut rng).is_err());
    }

    #[test]
    fn max_splits_zero_carves_no_rooms() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut cfg = BspConfig::normal();
        cfg.max_splits = 0;
        let (grid, tree) = generate(80, 25, &cfg, &mut rng).unwrap();
        assert_eq!(tree.leaf_count(), 1);
        let rooms = (0..grid.height())
            .flat_map(|y| (0..grid.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| grid.tile_at(x, y) == Tile::Room)
            .count();
        assert_eq!(rooms, 0);
    }
}
