//! Tile grid and wall classification.

use crate::error::{MapgenError, MapgenResult};

/// One cell's contents. Rock is the zero/default value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Rock,
    Room,
    Corridor,
    Door,
    DoorOpen,
}

impl Tile {
    /// Room, Corridor, Door, and DoorOpen are passable; Rock is not.
    pub fn is_passable(self) -> bool {
        matches!(self, Tile::Room | Tile::Corridor | Tile::Door | Tile::DoorOpen)
    }

    /// A cell is opaque iff it is not passable, or it is a closed Door.
    pub fn is_opaque(self) -> bool {
        !self.is_passable() || self == Tile::Door
    }

    /// Printable-ASCII stability contract: never renumber these.
    pub fn glyph(self) -> char {
        match self {
            Tile::Rock => ' ',
            Tile::Room => '.',
            Tile::Corridor => '#',
            Tile::Door => '+',
            Tile::DoorOpen => '=',
        }
    }
}

/// Cardinal wall-connection bitfield, plus a sentinel for an isolated wall
/// with no connecting neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct WallMask(pub u8);

impl WallMask {
    pub const WEST: u8 = 1 << 0;
    pub const EAST: u8 = 1 << 1;
    pub const NORTH: u8 = 1 << 2;
    pub const SOUTH: u8 = 1 << 3;
    pub const OTHER: u8 = 1 << 4;

    pub const EMPTY: WallMask = WallMask(0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    /// Two perpendicular cardinal bits set (the "Corner wall").
    pub fn is_corner(self) -> bool {
        let horiz = self.has(Self::WEST) || self.has(Self::EAST);
        let vert = self.has(Self::NORTH) || self.has(Self::SOUTH);
        horiz && vert
    }
}

const CARDINALS: [(i32, i32, u8); 4] = [
    (-1, 0, WallMask::WEST),
    (1, 0, WallMask::EAST),
    (0, -1, WallMask::NORTH),
    (0, 1, WallMask::SOUTH),
];

const EIGHT_NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// Rectangular array of tile codes, owning its backing storage.
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with Rock. Rejects non-positive dimensions and
    /// guards the `width * height` multiplication against overflow — the
    /// Rust stand-in for the C API's allocation-failure path.
    pub fn new(width: i32, height: i32) -> MapgenResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(MapgenError::InvalidConfig(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }
        let len = (width as i64).checked_mul(height as i64).ok_or(MapgenError::Memory)?;
        let len: usize = len.try_into().map_err(|_| MapgenError::Memory)?;
        let mut tiles = Vec::new();
        tiles.try_reserve_exact(len).map_err(|_| MapgenError::Memory)?;
        tiles.resize(len, Tile::Rock);
        Ok(Self { width, height, tiles })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Out-of-bounds reads return Rock, never an error.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if !self.in_bounds(x, y) {
            return Tile::Rock;
        }
        self.tiles[self.index(x, y)]
    }

    pub fn tile_is(&self, x: i32, y: i32, code: Tile) -> bool {
        self.tile_at(x, y) == code
    }

    pub fn set_tile(&mut self, x: i32, y: i32, code: Tile) {
        if self.in_bounds(x, y) {
            let i = self.index(x, y);
            self.tiles[i] = code;
        }
    }

    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.tile_at(x, y).is_passable()
    }

    /// Out-of-bounds is opaque, matching "never an error" out-of-bounds policy.
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.tile_at(x, y).is_opaque()
    }

    /// A wall is a non-passable cell (or closed Door) touching at least one
    /// passable neighbour among its 8-ring.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let tile = self.tile_at(x, y);
        if tile.is_passable() && tile != Tile::Door {
            return false;
        }
        EIGHT_NEIGHBOURS.iter().any(|&(dx, dy)| self.is_passable(x + dx, y + dy))
    }

    pub fn is_corner_wall(&self, x: i32, y: i32) -> bool {
        self.wall_mask(x, y).is_corner()
    }

    /// Wall touching at least one Room tile among its 8-ring.
    pub fn is_room_wall(&self, x: i32, y: i32) -> bool {
        if !self.is_wall(x, y) {
            return false;
        }
        EIGHT_NEIGHBOURS.iter().any(|&(dx, dy)| self.tile_is(x + dx, y + dy, Tile::Room))
    }

    /// Generic wall-classification: `neighbour_of` decides which cells count
    /// as "wall-like" for the 8-ring search (the whole grid for `wall_mask`,
    /// Room tiles only for `room_wall_mask`).
    fn directional_mask(&self, x: i32, y: i32, neighbour_is_target: impl Fn(i32, i32) -> bool) -> WallMask {
        if !self.is_wall(x, y) {
            return WallMask::EMPTY;
        }
        let mut mask = 0u8;
        for &(dx, dy, bit) in &CARDINALS {
            let (nx, ny) = (x + dx, y + dy);
            if !self.is_wall(nx, ny) {
                continue;
            }
            if !neighbour_is_target(nx, ny) {
                continue;
            }
            // The origin "connects" to the probed wall iff some passable
            // neighbour of the origin itself has the probed cell as one of
            // its own 8-ring neighbours — this prevents two
            // detached wall strings from reading as joined through rock.
            let connects = EIGHT_NEIGHBOURS.iter().any(|&(pdx, pdy)| {
                let (px, py) = (x + pdx, y + pdy);
                if !self.is_passable(px, py) {
                    return false;
                }
                EIGHT_NEIGHBOURS
                    .iter()
                    .any(|&(qdx, qdy)| px + qdx == nx && py + qdy == ny)
            });
            if connects {
                mask |= bit;
            }
        }
        if mask == 0 {
            WallMask(WallMask::OTHER)
        } else {
            WallMask(mask)
        }
    }

    pub fn wall_mask(&self, x: i32, y: i32) -> WallMask {
        self.directional_mask(x, y, |_, _| true)
    }

    pub fn room_wall_mask(&self, x: i32, y: i32) -> WallMask {
        self.directional_mask(x, y, |nx, ny| self.is_room_wall(nx, ny))
    }

    /// Whether `to` is a passable neighbour of `from` (4- or 8-connected,
    /// whichever `to` actually is relative to `from`) — used by corridor
    /// carving to decide if a newly carved cell links back into a room.
    pub fn is_connecting(&self, from: (i32, i32), to: (i32, i32)) -> bool {
        let dx = (to.0 - from.0).abs();
        let dy = (to.1 - from.1).abs();
        if dx > 1 || dy > 1 || (dx == 0 && dy == 0) {
            return false;
        }
        self.is_passable(from.0, from.1) && self.is_passable(to.0, to.1)
    }
}
