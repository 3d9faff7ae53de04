use crate::grid::{Dir, Grid, Tile};

/// Player state for one maze: position, coin tally, terminal flags.
pub struct Player {
    x: usize,
    y: usize,
    coins: usize,
    escaped: bool,
    surrendered: bool,
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: 1,
            y: 1,
            coins: 0,
            escaped: false,
            surrendered: false,
        }
    }

    pub fn pos(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn coins(&self) -> usize {
        self.coins
    }

    pub fn escaped(&self) -> bool {
        self.escaped
    }

    pub fn surrendered(&self) -> bool {
        self.surrendered
    }

    /// Resolves one step against the tile layer. Walls and the closed exit
    /// block; a coin flips its cell to open and counts; the open exit ends
    /// the session.
    pub fn apply_move(&mut self, grid: &mut Grid, dir: Dir) {
        let (dx, dy) = dir.delta();
        let Some(nx) = self.x.checked_add_signed(dx) else {
            return;
        };
        let Some(ny) = self.y.checked_add_signed(dy) else {
            return;
        };
        if nx >= grid.width() || ny >= grid.height() {
            return;
        }

        match grid.tile(nx, ny) {
            Tile::Wall | Tile::ExitClosed => return,
            Tile::Coin => {
                grid.set_tile(nx, ny, Tile::Open);
                self.coins += 1;
            }
            Tile::ExitOpen => self.escaped = true,
            Tile::Open => {}
        }

        // The border wall already fences movement in; the clamp only guards
        // against a malformed grid.
        self.x = nx.min(grid.width() - 1);
        self.y = ny.min(grid.height() - 1);
    }

    pub fn surrender(&mut self) {
        self.surrendered = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GenFlag;

    // A hand-built 9x9 with a short corridor: open cells at (1,1)..(5,1),
    // a coin at (3,1), the exit at (5,1).
    fn corridor_grid() -> Grid {
        let mut grid = Grid::new(9, 9).unwrap();
        for x in 1..=4 {
            grid.set_flag(x, 1, GenFlag::Ready);
        }
        grid.set_flag(3, 1, GenFlag::Coin);
        grid.set_flag(5, 1, GenFlag::Finish);
        grid.compile_tiles();
        grid
    }

    #[test]
    fn wall_blocks_and_changes_nothing() {
        let mut grid = corridor_grid();
        let mut player = Player::new();
        player.apply_move(&mut grid, Dir::Up);
        assert_eq!(player.pos(), (1, 1));
        assert_eq!(player.coins(), 0);
        player.apply_move(&mut grid, Dir::Left);
        assert_eq!(player.pos(), (1, 1));
    }

    #[test]
    fn open_cell_moves_the_player() {
        let mut grid = corridor_grid();
        let mut player = Player::new();
        player.apply_move(&mut grid, Dir::Right);
        assert_eq!(player.pos(), (2, 1));
    }

    #[test]
    fn coin_is_collected_once_and_cell_stays_open() {
        let mut grid = corridor_grid();
        let mut player = Player::new();
        player.apply_move(&mut grid, Dir::Right);
        player.apply_move(&mut grid, Dir::Right);
        assert_eq!(player.pos(), (3, 1));
        assert_eq!(player.coins(), 1);
        assert_eq!(grid.tile(3, 1), Tile::Open);

        // Walking back over the same cell must not count again.
        player.apply_move(&mut grid, Dir::Left);
        player.apply_move(&mut grid, Dir::Right);
        assert_eq!(player.coins(), 1);
    }

    #[test]
    fn closed_exit_blocks_like_a_wall() {
        let mut grid = corridor_grid();
        let mut player = Player::new();
        for _ in 0..4 {
            player.apply_move(&mut grid, Dir::Right);
        }
        assert_eq!(player.pos(), (4, 1));
        player.apply_move(&mut grid, Dir::Right);
        assert_eq!(player.pos(), (4, 1));
        assert!(!player.escaped());
    }

    #[test]
    fn open_exit_sets_escaped() {
        let mut grid = corridor_grid();
        grid.set_tile(5, 1, Tile::ExitOpen);
        let mut player = Player::new();
        for _ in 0..5 {
            player.apply_move(&mut grid, Dir::Right);
        }
        assert_eq!(player.pos(), (5, 1));
        assert!(player.escaped());
    }

    #[test]
    fn surrender_is_unconditional() {
        let mut player = Player::new();
        assert!(!player.surrendered());
        player.surrender();
        assert!(player.surrendered());
    }
}
