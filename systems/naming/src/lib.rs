#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic naming system that gives every generated tile a place name.

use hex_voyage_core::{NameSource, OffsetCoord};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SYLLABLES: &[&str] = &[
    "ka", "vel", "tor", "an", "mir", "zu", "ori", "eth", "sol", "dra", "ny", "qua", "ren", "is",
    "bel", "os", "tha", "cor", "lu", "vex",
];

const FEATURES: &[&str] = &[
    "Reach", "Drift", "Expanse", "Shoals", "Nebula", "Gate", "Deep", "Verge", "Hollow", "Belt",
];

const MIN_SYLLABLES: usize = 2;
const MAX_SYLLABLES: usize = 3;

/// Configuration parameters required to construct the naming system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }

    /// Seed used by the generator.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Procedural place names built from syllable tables.
///
/// Two generators created from the same seed produce the same sequence.
#[derive(Clone, Debug)]
pub struct ProceduralNames {
    rng: ChaCha8Rng,
}

impl ProceduralNames {
    /// Creates a generator seeded from the configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Produces the next name in the sequence.
    pub fn generate(&mut self) -> String {
        let count = self.rng.gen_range(MIN_SYLLABLES..=MAX_SYLLABLES);
        let mut stem = String::new();
        for _ in 0..count {
            if let Some(syllable) = SYLLABLES.choose(&mut self.rng) {
                stem.push_str(syllable);
            }
        }

        let mut name = capitalize(&stem);
        if self.rng.gen_bool(0.6) {
            if let Some(feature) = FEATURES.choose(&mut self.rng) {
                name.push(' ');
                name.push_str(feature);
            }
        }
        name
    }
}

impl NameSource for ProceduralNames {
    fn next_name(&mut self, _coord: OffsetCoord) -> String {
        self.generate()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_same_names() {
        let mut first = ProceduralNames::new(Config::new(7));
        let mut second = ProceduralNames::new(Config::new(7));
        for _ in 0..50 {
            assert_eq!(first.generate(), second.generate());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut first = ProceduralNames::new(Config::new(1));
        let mut second = ProceduralNames::new(Config::new(2));
        let first_names: Vec<String> = (0..20).map(|_| first.generate()).collect();
        let second_names: Vec<String> = (0..20).map(|_| second.generate()).collect();
        assert_ne!(first_names, second_names);
    }

    #[test]
    fn names_are_capitalised_and_never_empty() {
        let mut names = ProceduralNames::new(Config::new(0x5eed));
        for column in 0..9 {
            for row in 0..7 {
                let name = names.next_name(OffsetCoord::new(column, row));
                assert!(!name.trim().is_empty());
                assert!(name.chars().next().is_some_and(char::is_uppercase), "{name}");
            }
        }
    }

    #[test]
    fn capitalize_handles_empty_input() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("vex"), "Vex");
    }
}
