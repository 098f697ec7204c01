//! Random sampling of cells and teams.
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::{
    board::rectangular::{Cell, RectDimensions},
    pieces::Team,
};

impl Distribution<Cell> for RectDimensions {
    /// Sample a uniformly distributed cell within these dimensions.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0, self.width()), rng.gen_range(0, self.height()))
    }
}

impl Distribution<Team> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Team {
        if rng.gen() {
            Team::White
        } else {
            Team::Black
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::board::Dimensions;

    #[test]
    fn sampled_cells_are_in_bounds() {
        let dim = RectDimensions::new(3, 5);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let cell = rng.sample(&dim);
            assert!(dim.contains(&cell));
        }
    }

    #[test]
    fn both_teams_are_sampled() {
        let mut rng = StdRng::seed_from_u64(11);
        let teams: Vec<Team> = (0..64).map(|_| rng.gen()).collect();
        assert!(teams.contains(&Team::White));
        assert!(teams.contains(&Team::Black));
    }
}
