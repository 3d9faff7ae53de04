use rand::Rng;

use crate::error::GameError;
use crate::grid::{GenFlag, Grid};

pub const MAX_COINS: usize = 10;

const PLACEMENT_INSET: usize = 1;

/// Scatters `count` coins over carved cells by rejection sampling: redraw
/// while the sampled cell is solid, already a coin, or the exit. The open
/// cell count is checked up front so a tiny maze fails instead of spinning
/// forever.
pub fn place_coins(grid: &mut Grid, count: usize, rng: &mut impl Rng) -> Result<(), GameError> {
    let open = eligible_cells(grid);
    if open < count {
        return Err(GameError::NotEnoughOpenCells {
            open,
            requested: count,
        });
    }

    let mut placed = 0;
    while placed < count {
        let x = rng.gen_range(PLACEMENT_INSET..grid.width() - PLACEMENT_INSET);
        let y = rng.gen_range(PLACEMENT_INSET..grid.height() - PLACEMENT_INSET);
        match grid.flag(x, y) {
            Some(GenFlag::Ready) | Some(GenFlag::Explored) => {
                grid.set_flag(x, y, GenFlag::Coin);
                placed += 1;
            }
            _ => {}
        }
    }
    Ok(())
}

fn eligible_cells(grid: &Grid) -> usize {
    let mut open = 0;
    for y in PLACEMENT_INSET..grid.height() - PLACEMENT_INSET {
        for x in PLACEMENT_INSET..grid.width() - PLACEMENT_INSET {
            if matches!(
                grid.flag(x, y),
                Some(GenFlag::Ready) | Some(GenFlag::Explored)
            ) {
                open += 1;
            }
        }
    }
    open
}
