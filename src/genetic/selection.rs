//! Parent selection strategies

use super::{Chromosome, Objective};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

/// Tournament size used when none is given
pub const DEFAULT_TOURNAMENT_SIZE: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Fitness-proportionate sampling. Only meaningful when maximizing
    /// non-negative fitness.
    Roulette,
    /// Best of `k` uniformly drawn candidates (with replacement)
    Tournament(usize),
}

impl Selection {
    /// Pick one parent, or `None` if the population is empty
    pub fn select<'a, R: Rng + ?Sized>(
        self,
        population: &'a [Chromosome],
        objective: Objective,
        rng: &mut R,
    ) -> Option<&'a Chromosome> {
        match self {
            Selection::Roulette => roulette(population, rng),
            Selection::Tournament(k) => tournament(population, k, objective, rng),
        }
    }
}

/// Error returned when a selection name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSelection(pub String);

impl fmt::Display for UnknownSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a supported selection function \
             (expected roulette, tournament or tournament_K)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSelection {}

impl FromStr for Selection {
    type Err = UnknownSelection;

    /// Accepts `roulette`, `tournament` and `tournament_K`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('_') {
            None if s == "roulette" => Ok(Selection::Roulette),
            None if s == "tournament" => Ok(Selection::Tournament(DEFAULT_TOURNAMENT_SIZE)),
            Some(("tournament", k)) => match k.parse::<usize>() {
                Ok(k) if k > 0 => Ok(Selection::Tournament(k)),
                _ => Err(UnknownSelection(s.to_string())),
            },
            _ => Err(UnknownSelection(s.to_string())),
        }
    }
}

/// Roulette wheel sampling.
///
/// Walks the population accumulating fitness until the running total passes
/// a uniform pick in `[0, total)`. Falls back to the first chromosome when
/// nothing qualifies, e.g. when every fitness is zero.
pub fn roulette<'a, R: Rng + ?Sized>(
    population: &'a [Chromosome],
    rng: &mut R,
) -> Option<&'a Chromosome> {
    let total: f64 = population.iter().map(|c| c.fitness).sum();
    let pick = rng.gen::<f64>() * total;

    let mut current = 0.0;
    for chromosome in population {
        current += chromosome.fitness;
        if current > pick {
            return Some(chromosome);
        }
    }
    population.first()
}

/// Tournament selection: draw `k` candidates, keep the fittest.
///
/// Ties keep the earlier draw. Works for either objective.
pub fn tournament<'a, R: Rng + ?Sized>(
    population: &'a [Chromosome],
    k: usize,
    objective: Objective,
    rng: &mut R,
) -> Option<&'a Chromosome> {
    let mut best: Option<&Chromosome> = None;
    for _ in 0..k.max(1) {
        let candidate = population.choose(rng)?;
        best = match best {
            Some(current) if !objective.prefers(candidate.fitness, current.fitness) => {
                Some(current)
            }
            _ => Some(candidate),
        };
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scored(fitness: &[f64]) -> Vec<Chromosome> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| {
                let mut c = Chromosome::new(vec![b'+'; i + 1]);
                c.fitness = f;
                c
            })
            .collect()
    }

    #[test]
    fn test_parse_selection_names() {
        assert_eq!("roulette".parse::<Selection>(), Ok(Selection::Roulette));
        assert_eq!("tournament".parse::<Selection>(), Ok(Selection::Tournament(2)));
        assert_eq!("tournament_5".parse::<Selection>(), Ok(Selection::Tournament(5)));
        assert!("tournament_0".parse::<Selection>().is_err());
        assert!("tournament_x".parse::<Selection>().is_err());
        assert!("rank".parse::<Selection>().is_err());
    }

    #[test]
    fn test_roulette_only_picks_positive_fitness() {
        let population = scored(&[0.0, 5.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let pick = roulette(&population, &mut rng).unwrap();
            assert_eq!(pick.fitness, 5.0);
        }
    }

    #[test]
    fn test_roulette_all_zero_falls_back_to_first() {
        let population = scored(&[0.0, 0.0]);
        let pick = roulette(&population, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(pick.genes.len(), 1);
    }

    #[test]
    fn test_roulette_favours_heavier_chromosomes() {
        let population = scored(&[1.0, 9.0]);
        let mut rng = StdRng::seed_from_u64(3);
        let heavy = (0..1000)
            .filter(|_| roulette(&population, &mut rng).unwrap().fitness == 9.0)
            .count();
        assert!(heavy > 800, "heavy picked {} times", heavy);
    }

    #[test]
    fn test_large_tournament_finds_best_for_either_objective() {
        let population = scored(&[3.0, 1.0, 7.0, 4.0]);
        let mut rng = StdRng::seed_from_u64(11);

        let max = tournament(&population, 64, Objective::Maximize, &mut rng).unwrap();
        assert_eq!(max.fitness, 7.0);

        let min = tournament(&population, 64, Objective::Minimize, &mut rng).unwrap();
        assert_eq!(min.fitness, 1.0);
    }

    #[test]
    fn test_selection_on_empty_population() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(Selection::Roulette.select(&[], Objective::Maximize, &mut rng).is_none());
        assert!(Selection::Tournament(3)
            .select(&[], Objective::Minimize, &mut rng)
            .is_none());
    }
}
