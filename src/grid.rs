//! Two-layer map: generation flags for the carver, tiles for everyone else.

use crate::error::GameError;

pub const MIN_MAP_SIZE: usize = 9;
pub const MAX_MAP_SIZE: usize = 159;

/// Per-cell carver state. Cells start `Unexplored` (solid wall); the carver
/// walks interior lattice cells through `Explored` into `Ready`, and the
/// post-passes stamp `Coin` and `Finish` over carved cells only.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GenFlag {
    Unexplored,
    Explored,
    Ready,
    Coin,
    Finish,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Open,
    Coin,
    ExitClosed,
    ExitOpen,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    flags: Vec<GenFlag>,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Allocates both layers solid. Even dimensions are coerced down to odd
    /// so the border stays walls and the interior keeps its lattice; the
    /// coerced value must land inside [MIN_MAP_SIZE, MAX_MAP_SIZE].
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        let width = coerce_odd(width);
        let height = coerce_odd(height);
        if !(MIN_MAP_SIZE..=MAX_MAP_SIZE).contains(&width) {
            return Err(GameError::InvalidDimension {
                axis: "width",
                value: width,
            });
        }
        if !(MIN_MAP_SIZE..=MAX_MAP_SIZE).contains(&height) {
            return Err(GameError::InvalidDimension {
                axis: "height",
                value: height,
            });
        }
        Ok(Self {
            width,
            height,
            flags: vec![GenFlag::Unexplored; width * height],
            tiles: vec![Tile::Wall; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        // A flat buffer would silently alias the next row on a bad x, so
        // out-of-bounds access fails loudly here instead.
        assert!(
            x < self.width && y < self.height,
            "grid access out of bounds: ({x}, {y})"
        );
        y * self.width + x
    }

    /// Bounds-checked flag read; `None` stands for "off-grid" and is what
    /// the carver's neighbor scan leans on at the border.
    pub fn flag(&self, x: usize, y: usize) -> Option<GenFlag> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.flags[self.idx(x, y)])
    }

    pub fn set_flag(&mut self, x: usize, y: usize, flag: GenFlag) {
        let idx = self.idx(x, y);
        self.flags[idx] = flag;
    }

    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.idx(x, y)]
    }

    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        let idx = self.idx(x, y);
        self.tiles[idx] = tile;
    }

    /// Rebuilds the tile layer from the flag layer in one pure pass. After
    /// this, the only sanctioned point mutations on tiles are a collected
    /// coin flipping to `Open` and the exit toggling closed/open.
    pub fn compile_tiles(&mut self) {
        for idx in 0..self.flags.len() {
            self.tiles[idx] = match self.flags[idx] {
                GenFlag::Ready | GenFlag::Explored => Tile::Open,
                GenFlag::Unexplored => Tile::Wall,
                GenFlag::Coin => Tile::Coin,
                GenFlag::Finish => Tile::ExitClosed,
            };
        }
    }
}

fn coerce_odd(size: usize) -> usize {
    if size % 2 == 0 {
        size.saturating_sub(1)
    } else {
        size
    }
}
