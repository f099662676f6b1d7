//! Path planners: a point-to-point search and a family of coverage-path
//! generators, sharing "produce a sequence of cells from a start" and
//! "operate on a read-only grid" capabilities.
//! Modeled as free functions dispatched on `CleaningMode`, not trait
//! objects or inheritance.

pub mod astar;
pub mod optimizer;
pub mod random_coverage;
pub mod spiral;
pub mod wall_follow;
pub mod zigzag;

use crate::agent::CleaningMode;
use crate::grid::Grid;
use rand_chacha::ChaCha8Rng;

/// Generate a coverage path for the given mode, already passed through
/// `optimizer::remove_redundant_moves`. `auto`, `spot`, and `edge` all
/// route to horizontal zigzag.
pub fn generate_coverage_path(
    grid: &Grid,
    mode: CleaningMode,
    start: (i32, i32),
    rng: &mut ChaCha8Rng,
) -> Vec<(i32, i32)> {
    let raw = match mode {
        CleaningMode::Spiral => spiral::generate_spiral_path(grid, start, None),
        CleaningMode::Zigzag => zigzag::generate_zigzag_path(grid, start, true),
        CleaningMode::WallFollow => wall_follow::follow_wall(grid, start, 1000),
        CleaningMode::Random => random_coverage::generate_random_path(grid, start, 0.95, 10_000, rng),
        CleaningMode::Auto | CleaningMode::Spot | CleaningMode::Edge => {
            zigzag::generate_zigzag_path(grid, start, true)
        }
    };

    optimizer::remove_redundant_moves(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellType;
    use rand::SeedableRng;

    #[test]
    fn auto_mode_dispatches_to_zigzag() {
        let grid = Grid::new(10, 10, CellType::Free);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let path = generate_coverage_path(&grid, CleaningMode::Auto, (0, 0), &mut rng);
        assert!(!path.is_empty());
    }

    #[test]
    fn spot_and_edge_also_route_to_zigzag() {
        let grid = Grid::new(10, 10, CellType::Free);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let auto = generate_coverage_path(&grid, CleaningMode::Auto, (0, 0), &mut rng);
        let mut rng2 = ChaCha8Rng::seed_from_u64(1);
        let spot = generate_coverage_path(&grid, CleaningMode::Spot, (0, 0), &mut rng2);
        assert_eq!(auto, spot);
    }
}
