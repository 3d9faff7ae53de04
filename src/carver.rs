//! Randomized depth-first backtracking carver.
//!
//! The carving point lives on the odd lattice and steps by two, so the even
//! cell between two lattice points is the passage it opens. Each passage is
//! written exactly once between a pair of lattice cells, which is what makes
//! the result a perfect maze.

use rand::Rng;

use crate::grid::{Dir, GenFlag, Grid};

#[derive(Clone, Copy, PartialEq, Eq)]
enum CarveState {
    Exploring,
    Reverting,
}

/// Carves corridors into the flag layer until every lattice cell has been
/// visited, then stamps the exit cell. Total for all valid grids: the path
/// stack strictly shrinks once no unexplored neighbors remain.
pub fn carve(grid: &mut Grid, rng: &mut impl Rng) {
    let mut x = onto_lattice(rng.gen_range(1..grid.width() - 1));
    let mut y = onto_lattice(rng.gen_range(1..grid.height() - 1));

    let mut path: Vec<(usize, usize)> = Vec::new();

    loop {
        let open_dirs = unexplored_dirs(grid, x, y);
        let state = if open_dirs.is_empty() {
            CarveState::Reverting
        } else {
            CarveState::Exploring
        };
        match state {
            CarveState::Exploring => {
                let dir = open_dirs[rng.gen_range(0..open_dirs.len())];
                let Some((nx, ny)) = lattice_step(grid, x, y, dir) else {
                    // Would leave the grid: drop the move and re-scan.
                    continue;
                };
                flag_between(grid, (x, y), (nx, ny), GenFlag::Explored);
                path.push((nx, ny));
                (x, y) = (nx, ny);
            }
            CarveState::Reverting => {
                let Some((px, py)) = path.pop() else {
                    break;
                };
                flag_between(grid, (px, py), (px, py), GenFlag::Ready);
                (x, y) = (px, py);
                if path.is_empty() {
                    break;
                }
            }
        }
    }

    let (fx, fy) = (grid.width() - 2, grid.height() - 2);
    grid.set_flag(fx, fy, GenFlag::Finish);
}

fn onto_lattice(coord: usize) -> usize {
    if coord % 2 == 0 {
        coord - 1
    } else {
        coord
    }
}

/// Lattice neighbor two cells over, or `None` when the step leaves the grid.
/// Odd coordinates stepping by two can never land on the even border rows or
/// columns, so the off-grid sentinel is the only invalid case.
fn lattice_step(grid: &Grid, x: usize, y: usize, dir: Dir) -> Option<(usize, usize)> {
    let (dx, dy) = dir.delta();
    let nx = x.checked_add_signed(dx * 2)?;
    let ny = y.checked_add_signed(dy * 2)?;
    if nx >= grid.width() || ny >= grid.height() {
        return None;
    }
    Some((nx, ny))
}

fn unexplored_dirs(grid: &Grid, x: usize, y: usize) -> Vec<Dir> {
    Dir::ALL
        .into_iter()
        .filter(|dir| {
            lattice_step(grid, x, y, *dir)
                .and_then(|(nx, ny)| grid.flag(nx, ny))
                .is_some_and(|flag| flag == GenFlag::Unexplored)
        })
        .collect()
}

/// Flags both endpoints with `flag` and the passage cell between them
/// `Ready`. Degenerate spans (from == to) collapse onto a single cell.
fn flag_between(grid: &mut Grid, from: (usize, usize), to: (usize, usize), flag: GenFlag) {
    let mid = ((from.0 + to.0) / 2, (from.1 + to.1) / 2);
    grid.set_flag(from.0, from.1, flag);
    grid.set_flag(mid.0, mid.1, GenFlag::Ready);
    grid.set_flag(to.0, to.1, flag);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn carved(width: usize, height: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        carve(&mut grid, &mut rng);
        grid
    }

    fn is_carved(flag: Option<GenFlag>) -> bool {
        matches!(
            flag,
            Some(GenFlag::Ready) | Some(GenFlag::Explored) | Some(GenFlag::Finish)
        )
    }

    fn reachable_from(grid: &Grid, start: (usize, usize)) -> Vec<(usize, usize)> {
        let mut seen = vec![false; grid.width() * grid.height()];
        let mut queue = VecDeque::new();
        seen[start.1 * grid.width() + start.0] = true;
        queue.push_back(start);
        let mut out = Vec::new();
        while let Some((x, y)) = queue.pop_front() {
            out.push((x, y));
            for dir in Dir::ALL {
                let (dx, dy) = dir.delta();
                let Some(nx) = x.checked_add_signed(dx) else {
                    continue;
                };
                let Some(ny) = y.checked_add_signed(dy) else {
                    continue;
                };
                if !is_carved(grid.flag(nx, ny)) {
                    continue;
                }
                if !seen[ny * grid.width() + nx] {
                    seen[ny * grid.width() + nx] = true;
                    queue.push_back((nx, ny));
                }
            }
        }
        out
    }

    #[test]
    fn every_lattice_cell_is_carved() {
        for (w, h, seed) in [(9, 9, 1), (13, 9, 2), (31, 21, 3), (159, 159, 4)] {
            let grid = carved(w, h, seed);
            for y in (1..h).step_by(2) {
                for x in (1..w).step_by(2) {
                    assert!(
                        is_carved(grid.flag(x, y)),
                        "lattice cell ({x}, {y}) stayed solid in {w}x{h} seed {seed}"
                    );
                }
            }
        }
    }

    #[test]
    fn border_stays_solid() {
        let grid = carved(13, 11, 7);
        for x in 0..grid.width() {
            assert_eq!(grid.flag(x, 0), Some(GenFlag::Unexplored));
            assert_eq!(grid.flag(x, grid.height() - 1), Some(GenFlag::Unexplored));
        }
        for y in 0..grid.height() {
            assert_eq!(grid.flag(0, y), Some(GenFlag::Unexplored));
            assert_eq!(grid.flag(grid.width() - 1, y), Some(GenFlag::Unexplored));
        }
    }

    #[test]
    fn passage_count_matches_spanning_tree() {
        // A perfect maze over `cells` lattice cells opens exactly
        // `cells - 1` passage cells (one per spanning-tree edge).
        for (w, h, seed) in [(9, 9, 11), (21, 13, 12), (41, 31, 13)] {
            let grid = carved(w, h, seed);
            let cells_w = w / 2;
            let cells_h = h / 2;
            let mut passages = 0;
            for y in 1..h - 1 {
                for x in 1..w - 1 {
                    // Passage cells have exactly one even coordinate.
                    if (x % 2 == 0) != (y % 2 == 0) && is_carved(grid.flag(x, y)) {
                        passages += 1;
                    }
                }
            }
            assert_eq!(passages, cells_w * cells_h - 1, "{w}x{h} seed {seed}");
        }
    }

    #[test]
    fn all_carved_cells_reachable_from_start() {
        let grid = carved(31, 21, 42);
        let reached = reachable_from(&grid, (1, 1));
        let mut carved_cells = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if is_carved(grid.flag(x, y)) {
                    carved_cells += 1;
                }
            }
        }
        assert_eq!(reached.len(), carved_cells);
    }

    #[test]
    fn exit_lands_on_the_far_corner_cell() {
        let grid = carved(9, 9, 5);
        assert_eq!(grid.flag(7, 7), Some(GenFlag::Finish));
    }

    #[test]
    fn carving_is_deterministic_under_a_fixed_seed() {
        let a = carved(21, 21, 99);
        let b = carved(21, 21, 99);
        assert_eq!(a, b);
        let c = carved(21, 21, 100);
        assert_ne!(a, c);
    }
}
