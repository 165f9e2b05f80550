//! Variation operators: mutation, crossover and breeding

use super::Chromosome;
use rand::Rng;
use rand::seq::SliceRandom;

/// How genes are allowed to change during mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// Genes may be inserted or deleted, so chromosomes grow and shrink
    Variable,
    /// Every chromosome keeps this many genes; only substitution applies
    Fixed(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Insertion,
    Deletion,
    Substitution,
}

fn pick_mutation<R: Rng + ?Sized>(length: Length, rng: &mut R) -> Mutation {
    match length {
        Length::Fixed(_) => Mutation::Substitution,
        Length::Variable => match rng.gen_range(0..3) {
            0 => Mutation::Insertion,
            1 => Mutation::Deletion,
            _ => Mutation::Substitution,
        },
    }
}

/// Copy `chromosome`, mutating each gene independently with probability
/// `rate`.
///
/// An insertion places a random gene in front of the current one, a
/// deletion drops it and a substitution replaces it. The result has no
/// fitness yet.
pub fn mutate<R: Rng + ?Sized>(
    chromosome: &Chromosome,
    alphabet: &[u8],
    rate: f64,
    length: Length,
    rng: &mut R,
) -> Chromosome {
    let mut genes = Vec::with_capacity(chromosome.genes.len() + 4);

    for &gene in &chromosome.genes {
        if rng.gen::<f64>() >= rate {
            genes.push(gene);
            continue;
        }

        match pick_mutation(length, rng) {
            Mutation::Insertion => {
                genes.extend(alphabet.choose(rng));
                genes.push(gene);
            }
            Mutation::Deletion => {}
            Mutation::Substitution => genes.push(*alphabet.choose(rng).unwrap_or(&gene)),
        }
    }

    Chromosome::new(genes)
}

/// One-point crossover at the same relative position in both parents.
///
/// The parents may differ in length: a single fraction `r` in `[0, 1)` cuts
/// each at `floor(len * r)`, and the children swap tails.
pub fn crossover<R: Rng + ?Sized>(
    first: &Chromosome,
    second: &Chromosome,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let r: f64 = rng.gen();
    let cut_first = (first.genes.len() as f64 * r) as usize;
    let cut_second = (second.genes.len() as f64 * r) as usize;

    let (head_a, tail_a) = first.genes.split_at(cut_first);
    let (head_b, tail_b) = second.genes.split_at(cut_second);

    (
        Chromosome::new([head_a, tail_b].concat()),
        Chromosome::new([head_b, tail_a].concat()),
    )
}

/// Rates applied when two parents produce offspring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub crossover: f64,
    pub mutation: f64,
}

/// Cross two parents with probability `rates.crossover`, then mutate both
/// children.
pub fn breed<R: Rng + ?Sized>(
    first: &Chromosome,
    second: &Chromosome,
    alphabet: &[u8],
    rates: Rates,
    length: Length,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let (a, b) = if rng.gen::<f64>() < rates.crossover {
        crossover(first, second, rng)
    } else {
        (first.clone(), second.clone())
    };

    (
        mutate(&a, alphabet, rates.mutation, length, rng),
        mutate(&b, alphabet, rates.mutation, length, rng),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::BRAINFUCK_ALPHABET;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_zero_rate_mutation_copies_genes() {
        let parent = Chromosome::new(b"++[>+<-]".to_vec());
        let child = mutate(&parent, BRAINFUCK_ALPHABET, 0.0, Length::Variable, &mut rng());
        assert_eq!(child.genes, parent.genes);
        assert_eq!(child.fitness, 0.0);
    }

    #[test]
    fn test_fixed_length_mutation_only_substitutes() {
        let parent = Chromosome::new(vec![b'+'; 40]);
        let mut rng = rng();
        for _ in 0..20 {
            let child = mutate(&parent, b"<>", 1.0, Length::Fixed(40), &mut rng);
            assert_eq!(child.genes.len(), 40);
            assert!(child.genes.iter().all(|g| *g == b'<' || *g == b'>'));
        }
    }

    #[test]
    fn test_variable_mutation_changes_length_within_bounds() {
        let parent = Chromosome::new(vec![b'+'; 30]);
        let mut rng = rng();
        let mut lengths = Vec::new();
        for _ in 0..20 {
            let child = mutate(&parent, b"-", 1.0, Length::Variable, &mut rng);
            assert!(child.genes.len() <= 60);
            // Insertions keep the original gene behind a new one,
            // substitutions leave only the new one
            let kept = child.genes.iter().filter(|g| **g == b'+').count();
            let added = child.genes.len() - kept;
            assert!(added >= kept);
            lengths.push(child.genes.len());
        }
        assert!(lengths.iter().any(|&len| len != 30));
    }

    #[test]
    fn test_mutation_of_empty_chromosome_is_empty() {
        let empty = Chromosome::default();
        let child = mutate(&empty, BRAINFUCK_ALPHABET, 1.0, Length::Variable, &mut rng());
        assert!(child.genes.is_empty());
    }

    #[test]
    fn test_crossover_swaps_proportional_tails() {
        let first = Chromosome::new(vec![b'a'; 4]);
        let second = Chromosome::new(vec![b'b'; 8]);
        let mut rng = rng();

        for _ in 0..20 {
            let (a, b) = crossover(&first, &second, &mut rng);
            assert_eq!(a.genes.len() + b.genes.len(), 12);

            // a = first[..cut_a] ++ second[cut_b..], b = second[..cut_b] ++ first[cut_a..]
            let cut_a = a.genes.iter().take_while(|g| **g == b'a').count();
            let cut_b = b.genes.iter().take_while(|g| **g == b'b').count();
            assert!(a.genes[cut_a..].iter().all(|g| *g == b'b'));
            assert!(b.genes[cut_b..].iter().all(|g| *g == b'a'));
            assert_eq!(a.genes.len() - cut_a, 8 - cut_b);
            assert_eq!(b.genes.len() - cut_b, 4 - cut_a);
            // The same fraction cuts both parents
            assert_eq!(cut_b / 2, cut_a);
        }
    }

    #[test]
    fn test_breed_without_crossover_or_mutation_clones_parents() {
        let first = Chromosome::new(b"+++".to_vec());
        let second = Chromosome::new(b"---".to_vec());
        let rates = Rates {
            crossover: 0.0,
            mutation: 0.0,
        };
        let (a, b) = breed(
            &first,
            &second,
            BRAINFUCK_ALPHABET,
            rates,
            Length::Variable,
            &mut rng(),
        );
        assert_eq!(a.genes, first.genes);
        assert_eq!(b.genes, second.genes);
    }
}
