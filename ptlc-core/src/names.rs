//! Generation of auxiliary variable names.
//!
//! Temporal operators are compiled into reads of externally maintained boolean variables. Each
//! of these variables needs a name that is unique within a compilation and that does not collide
//! with any variable of the source program. Name generation is a service passed into predicate
//! construction as a [`NameGenerator`], so that callers choose between randomized names
//! ([`RandomNames`]) and deterministic names ([`SequentialNames`]).
//!
//! Every generated name has the form `{prefix}_{tag}_{suffix}`, where the tag is chosen by the
//! operator requiring the variable.
//!
//! ```rust
//! use ptlc_core::names::{NameGenerator, SequentialNames};
//!
//! let mut names = SequentialNames::new("AUX");
//! names.reserve("AUX_q_0");
//!
//! assert_eq!(names.fresh("q"), "AUX_q_1");
//! assert_eq!(names.fresh("previously"), "AUX_previously_2");
//! ```

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Prefix and suffix length of randomized names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NamingConfig {
    pub prefix: String,
    pub suffix_length: usize,
}

impl NamingConfig {
    pub const DEFAULT_PREFIX: &'static str = "PTLC";
    pub const DEFAULT_SUFFIX_LENGTH: usize = 8;
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX.to_string(),
            suffix_length: Self::DEFAULT_SUFFIX_LENGTH,
        }
    }
}

/// Source of fresh auxiliary variable names.
pub trait NameGenerator {
    /// Produce a name containing `tag` that has not been produced or reserved before.
    fn fresh(&mut self, tag: &str) -> String;

    /// Mark `name` as taken so that it is never produced by [`NameGenerator::fresh`].
    fn reserve(&mut self, name: &str);
}

impl<N> NameGenerator for &mut N
where
    N: NameGenerator + ?Sized,
{
    fn fresh(&mut self, tag: &str) -> String {
        (**self).fresh(tag)
    }

    fn reserve(&mut self, name: &str) {
        (**self).reserve(name)
    }
}

impl<N> NameGenerator for Box<N>
where
    N: NameGenerator + ?Sized,
{
    fn fresh(&mut self, tag: &str) -> String {
        (**self).fresh(tag)
    }

    fn reserve(&mut self, name: &str) {
        (**self).reserve(name)
    }
}

/// Names with a random lowercase suffix.
///
/// Random suffixes make collisions across independent generators unlikely, and the generator
/// additionally remembers every name it has issued or reserved, drawing again if a suffix repeats.
/// After [`RandomNames::MAX_REDRAWS`] consecutive collisions the suffix grows by one letter for
/// all later names, so a short configured suffix can never exhaust the name space.
#[derive(Debug, Clone)]
pub struct RandomNames<R = ChaCha20Rng> {
    config: NamingConfig,
    rng: R,
    taken: HashSet<String>,
    length: usize,
}

impl RandomNames<ChaCha20Rng> {
    /// Create a generator using the default [`NamingConfig`], seeded from the thread-local rng.
    pub fn new() -> Self {
        Self::from_config(NamingConfig::default())
    }

    pub fn from_config(config: NamingConfig) -> Self {
        Self::with_rng(config, ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    /// Create a generator whose sequence of names is fully determined by `seed`.
    pub fn seeded(config: NamingConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl Default for RandomNames<ChaCha20Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RandomNames<R> {
    /// Consecutive collisions tolerated before the suffix is extended.
    pub const MAX_REDRAWS: usize = 32;

    pub fn with_rng(config: NamingConfig, rng: R) -> Self {
        Self {
            length: config.suffix_length,
            config,
            rng,
            taken: HashSet::new(),
        }
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }
}

impl<R> RandomNames<R>
where
    R: Rng,
{
    fn suffix(&mut self) -> String {
        (0..self.length)
            .map(|_| char::from(self.rng.random_range(b'a'..=b'z')))
            .collect()
    }
}

impl<R> NameGenerator for RandomNames<R>
where
    R: Rng,
{
    fn fresh(&mut self, tag: &str) -> String {
        let mut redraws = 0;

        loop {
            let suffix = self.suffix();
            let name = format!("{}_{}_{}", self.config.prefix, tag, suffix);

            if self.taken.insert(name.clone()) {
                log::trace!("issued auxiliary name {}", name);
                return name;
            }

            log::warn!("auxiliary name {} is already taken, drawing again", name);
            redraws += 1;

            if redraws == Self::MAX_REDRAWS {
                self.length += 1;
                redraws = 0;
                log::warn!("extending auxiliary name suffixes to {} letters", self.length);
            }
        }
    }

    fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }
}

/// Deterministic names built from a prefix and a monotonically increasing counter.
///
/// The counter is shared by all tags, so two generators with the same prefix produce the same
/// names when asked for the same tags in the same order.
#[derive(Debug, Clone, Default)]
pub struct SequentialNames {
    prefix: String,
    next: usize,
    reserved: HashSet<String>,
}

impl SequentialNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
            reserved: HashSet::new(),
        }
    }

    /// Number of names issued or skipped so far.
    pub fn count(&self) -> usize {
        self.next
    }
}

impl NameGenerator for SequentialNames {
    fn fresh(&mut self, tag: &str) -> String {
        loop {
            let name = format!("{}_{}_{}", self.prefix, tag, self.next);
            self.next += 1;

            if !self.reserved.contains(&name) {
                log::trace!("issued auxiliary name {}", name);
                return name;
            }
        }
    }

    fn reserve(&mut self, name: &str) {
        self.reserved.insert(name.to_string());
    }
}
