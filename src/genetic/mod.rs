//! Genetic programming over Brainfuck source
//!
//! A [`GeneticAlgorithm`] evolves a population of [`Chromosome`]s, each a
//! string of genes drawn from an alphabet. Every generation is scored by a
//! caller-supplied fitness function, sorted, optionally has its top 5%
//! carried over unchanged, and is refilled by breeding selected parents:
//!
//! ```text
//! population → score → sort → elites + breed(select, select) → next population
//! ```
//!
//! For Brainfuck the genes are the eight operators and
//! [`fitness::OutputDistance`] scores a program by the edit distance between
//! its output and a target string, evaluated under a 0.1 second timeout.

pub mod fitness;
pub mod operators;
pub mod selection;

use operators::{Length, Rates};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use selection::Selection;
use tracing::{debug, info};

/// The eight Brainfuck operators
pub const BRAINFUCK_ALPHABET: &[u8] = b"><+-.,[]";

pub const DEFAULT_CROSSOVER_RATE: f64 = 0.9;
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;

/// Size range of randomly generated chromosomes when length is variable
pub const INITIAL_GENES_MIN: usize = 5;
pub const INITIAL_GENES_MAX: usize = 50;

/// One in this many chromosomes survives as an elite
const ELITE_DIVISOR: usize = 20;

/// A candidate program and its last computed fitness
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chromosome {
    pub genes: Vec<u8>,
    pub fitness: f64,
}

impl Chromosome {
    pub fn new(genes: Vec<u8>) -> Self {
        Chromosome {
            genes,
            fitness: 0.0,
        }
    }
}

/// Direction in which fitness improves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    /// Whether `candidate` is strictly fitter than `current`
    pub fn prefers(self, candidate: f64, current: f64) -> bool {
        match self {
            Objective::Maximize => candidate > current,
            Objective::Minimize => candidate < current,
        }
    }

    /// Sort fittest first; stable, so equal scores keep their order
    fn sort(self, population: &mut [Chromosome]) {
        match self {
            Objective::Maximize => population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness)),
            Objective::Minimize => population.sort_by(|a, b| a.fitness.total_cmp(&b.fitness)),
        }
    }
}

/// Tunables for a [`GeneticAlgorithm`]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticConfig {
    pub alphabet: Vec<u8>,
    pub objective: Objective,
    pub selection: Selection,
    /// Carry the best 5% of each generation over unchanged
    pub elitism: bool,
    pub length: Length,
    pub rates: Rates,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        GeneticConfig {
            alphabet: BRAINFUCK_ALPHABET.to_vec(),
            objective: Objective::Maximize,
            selection: Selection::Roulette,
            elitism: false,
            length: Length::Variable,
            rates: Rates {
                crossover: DEFAULT_CROSSOVER_RATE,
                mutation: DEFAULT_MUTATION_RATE,
            },
        }
    }
}

/// Best and mean fitness of one scored generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f64,
    pub average_fitness: f64,
}

/// Result of [`GeneticAlgorithm::run`]
#[derive(Debug, Clone)]
pub struct Evolution {
    /// Fittest chromosome of the last scored generation
    pub best: Chromosome,
    pub generations: Vec<GenerationStats>,
}

pub struct GeneticAlgorithm<R: Rng = StdRng> {
    config: GeneticConfig,
    rng: R,
}

impl GeneticAlgorithm<StdRng> {
    /// Algorithm seeded from the operating system
    pub fn new(config: GeneticConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Reproducible algorithm for a fixed seed
    pub fn seeded(config: GeneticConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GeneticAlgorithm<R> {
    pub fn with_rng(config: GeneticConfig, rng: R) -> Self {
        GeneticAlgorithm { config, rng }
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Random population; chromosome sizes follow the configured [`Length`]
    pub fn generate_population(&mut self, size: usize) -> Vec<Chromosome> {
        (0..size)
            .map(|_| {
                let genes = match self.config.length {
                    Length::Fixed(n) => n,
                    Length::Variable => self.rng.gen_range(INITIAL_GENES_MIN..=INITIAL_GENES_MAX),
                };
                let genes = (0..genes)
                    .filter_map(|_| self.config.alphabet.choose(&mut self.rng).copied())
                    .collect();
                Chromosome::new(genes)
            })
            .collect()
    }

    /// Population of `size` derived from `seed`: the seed itself followed by
    /// mutated copies
    pub fn generate_seeded_population(&mut self, size: usize, seed: &[u8]) -> Vec<Chromosome> {
        let original = Chromosome::new(seed.to_vec());
        let mut population = Vec::with_capacity(size);
        if size > 0 {
            population.push(original.clone());
        }
        while population.len() < size {
            population.push(self.mutate(&original));
        }
        population
    }

    pub fn mutate(&mut self, chromosome: &Chromosome) -> Chromosome {
        operators::mutate(
            chromosome,
            &self.config.alphabet,
            self.config.rates.mutation,
            self.config.length,
            &mut self.rng,
        )
    }

    pub fn breed(&mut self, first: &Chromosome, second: &Chromosome) -> (Chromosome, Chromosome) {
        operators::breed(
            first,
            second,
            &self.config.alphabet,
            self.config.rates,
            self.config.length,
            &mut self.rng,
        )
    }

    /// Build the next generation from a population sorted fittest first
    fn next_generation(&mut self, population: &[Chromosome]) -> Vec<Chromosome> {
        let size = population.len();
        let mut next = Vec::with_capacity(size + 1);

        if self.config.elitism {
            next.extend_from_slice(&population[..size / ELITE_DIVISOR]);
        }

        while next.len() < size {
            let objective = self.config.objective;
            let selection = self.config.selection;
            let (Some(first), Some(second)) = (
                selection.select(population, objective, &mut self.rng),
                selection.select(population, objective, &mut self.rng),
            ) else {
                break;
            };

            let (a, b) = self.breed(first, second);
            next.push(a);
            next.push(b);
        }

        // Children come in pairs
        next.truncate(size);
        next
    }

    /// Evolve for `generations` rounds and return the fittest chromosome of
    /// the last scored generation.
    ///
    /// The initial population is random, or derived from `seed` when given.
    pub fn run<F>(
        &mut self,
        mut fitness: F,
        generations: usize,
        population_size: usize,
        seed: Option<&[u8]>,
    ) -> Evolution
    where
        F: FnMut(&[u8]) -> f64,
    {
        let mut population = match seed {
            Some(seed) => self.generate_seeded_population(population_size, seed),
            None => self.generate_population(population_size),
        };

        let mut best = Chromosome::default();
        let mut stats = Vec::with_capacity(generations);

        for generation in 1..=generations {
            if population.is_empty() {
                break;
            }

            for chromosome in population.iter_mut() {
                chromosome.fitness = fitness(&chromosome.genes);
            }

            let average_fitness =
                population.iter().map(|c| c.fitness).sum::<f64>() / population.len() as f64;
            self.config.objective.sort(&mut population);
            best = population[0].clone();

            info!(
                generation,
                best_fitness = best.fitness,
                average_fitness,
                "generation scored"
            );
            debug!(genes = %String::from_utf8_lossy(&best.genes), "current best");
            stats.push(GenerationStats {
                generation,
                best_fitness: best.fitness,
                average_fitness,
            });

            population = self.next_generation(&population);
        }

        Evolution {
            best,
            generations: stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_plus(genes: &[u8]) -> f64 {
        genes.iter().filter(|&&g| g == b'+').count() as f64
    }

    #[test]
    fn test_random_population_uses_alphabet_and_size_range() {
        let mut ga = GeneticAlgorithm::seeded(GeneticConfig::default(), 1);
        let population = ga.generate_population(30);
        assert_eq!(population.len(), 30);
        for chromosome in &population {
            let len = chromosome.genes.len();
            assert!((INITIAL_GENES_MIN..=INITIAL_GENES_MAX).contains(&len));
            assert!(chromosome.genes.iter().all(|g| BRAINFUCK_ALPHABET.contains(g)));
        }
    }

    #[test]
    fn test_fixed_length_population() {
        let config = GeneticConfig {
            length: Length::Fixed(12),
            ..GeneticConfig::default()
        };
        let mut ga = GeneticAlgorithm::seeded(config, 2);
        assert!(ga.generate_population(10).iter().all(|c| c.genes.len() == 12));
    }

    #[test]
    fn test_seeded_population_keeps_seed_first() {
        let mut ga = GeneticAlgorithm::seeded(GeneticConfig::default(), 3);
        let population = ga.generate_seeded_population(5, b"+++.");
        assert_eq!(population.len(), 5);
        assert_eq!(population[0].genes, b"+++.");
        assert!(ga.generate_seeded_population(0, b"+").is_empty());
    }

    #[test]
    fn test_objective_sorting() {
        let mut population: Vec<Chromosome> = [2.0, 5.0, 1.0]
            .iter()
            .map(|&f| Chromosome {
                genes: Vec::new(),
                fitness: f,
            })
            .collect();

        Objective::Maximize.sort(&mut population);
        assert_eq!(population[0].fitness, 5.0);
        Objective::Minimize.sort(&mut population);
        assert_eq!(population[0].fitness, 1.0);
    }

    #[test]
    fn test_elitism_never_loses_best_fitness() {
        let config = GeneticConfig {
            elitism: true,
            selection: Selection::Tournament(2),
            ..GeneticConfig::default()
        };
        let mut ga = GeneticAlgorithm::seeded(config, 4);
        let evolution = ga.run(count_plus, 15, 40, None);

        assert_eq!(evolution.generations.len(), 15);
        for pair in evolution.generations.windows(2) {
            assert!(pair[1].best_fitness >= pair[0].best_fitness);
        }
        assert_eq!(evolution.best.fitness, evolution.generations[14].best_fitness);
        assert_eq!(evolution.best.fitness, count_plus(&evolution.best.genes));
    }

    #[test]
    fn test_generation_keeps_population_size() {
        let mut ga = GeneticAlgorithm::seeded(GeneticConfig::default(), 5);
        let mut population = ga.generate_population(7);
        for c in population.iter_mut() {
            c.fitness = 1.0;
        }
        assert_eq!(ga.next_generation(&population).len(), 7);
    }

    #[test]
    fn test_minimizing_output_distance_from_seed() {
        use fitness::OutputDistance;

        // Prints 'A'; the seed survives as an elite, so the best distance
        // to "A" can only be zero
        let config = GeneticConfig {
            objective: Objective::Minimize,
            selection: Selection::Tournament(2),
            elitism: true,
            ..GeneticConfig::default()
        };
        let fitness = OutputDistance::new("A");
        let seed: &[u8] = b"++++++++[>++++++++<-]>+.";
        let mut ga = GeneticAlgorithm::seeded(config, 6);
        let evolution = ga.run(|genes| fitness.score(genes), 2, 20, Some(seed));
        assert_eq!(evolution.best.fitness, 0.0);
    }

    #[test]
    fn test_empty_population_runs_no_generations() {
        let mut ga = GeneticAlgorithm::seeded(GeneticConfig::default(), 7);
        let evolution = ga.run(count_plus, 10, 0, None);
        assert!(evolution.generations.is_empty());
        assert!(evolution.best.genes.is_empty());
    }
}
