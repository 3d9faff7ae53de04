use rand::Rng;

use crate::carver;
use crate::error::GameError;
use crate::grid::{Dir, Grid, Tile};
use crate::pickups;
use crate::player::Player;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Escaped,
    Surrendered,
}

/// One maze lifetime: owns the grid and the player, regenerated wholesale
/// when a round ends.
pub struct Session {
    grid: Grid,
    player: Player,
    max_coins: usize,
}

impl Session {
    /// Generates a fresh maze: carve, scatter pickups, compile tiles.
    pub fn new(
        width: usize,
        height: usize,
        max_coins: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, GameError> {
        let mut grid = Grid::new(width, height)?;
        carver::carve(&mut grid, rng);
        pickups::place_coins(&mut grid, max_coins, rng)?;
        grid.compile_tiles();
        Ok(Self {
            grid,
            player: Player::new(),
            max_coins,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn max_coins(&self) -> usize {
        self.max_coins
    }

    /// Toggles the exit tile from the current coin tally. Runs once per
    /// tick, before movement resolves.
    pub fn update_exit_gate(&mut self) {
        let (ex, ey) = (self.grid.width() - 2, self.grid.height() - 2);
        let tile = if self.player.coins() >= self.max_coins {
            Tile::ExitOpen
        } else {
            Tile::ExitClosed
        };
        self.grid.set_tile(ex, ey, tile);
    }

    pub fn move_player(&mut self, dir: Dir) {
        self.player.apply_move(&mut self.grid, dir);
    }

    pub fn surrender(&mut self) {
        self.player.surrender();
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.player.escaped() {
            Some(Outcome::Escaped)
        } else if self.player.surrendered() {
            Some(Outcome::Surrendered)
        } else {
            None
        }
    }
}
