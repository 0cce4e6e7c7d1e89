//! RoundSource: turns a generator result into a playable round.
//!
//! Anything that went wrong on the generator side is replaced by a round from
//! the static fallback table, so the caller always receives a complete round.
//! Option order is shuffled in every case so the correct answer's position is
//! never predictable.
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::gemini::GeneratedRound;
use super::round::{Letter, Round};
use crate::error::SourceError;
use crate::{FALLBACK_ROUNDS, FallbackEntry};

pub struct RoundSource<R: Rng> {
    rng: R,
    rounds: Vec<Round>,
}

impl<R: Rng> RoundSource<R> {
    pub fn new(rng: R) -> Self {
        Self::with_table(rng, FALLBACK_ROUNDS)
    }

    /// Use a custom fallback table. Entries with an invalid letter are dropped;
    /// if nothing usable remains the built-in table is used instead.
    pub fn with_table(rng: R, table: &[FallbackEntry]) -> Self {
        let mut rounds = build_rounds(table);
        if rounds.is_empty() {
            rounds = build_rounds(FALLBACK_ROUNDS);
        }
        Self { rng, rounds }
    }

    /// Resolve a generator outcome into a shuffled round, falling back on any error.
    pub fn resolve(
        &mut self,
        generated: Result<GeneratedRound, SourceError>,
        exclude: Option<Letter>,
    ) -> Round {
        let round = match generated.and_then(GeneratedRound::into_round) {
            Ok(round) => round,
            Err(err) => {
                log::warn!("content source unavailable ({err}); using fallback round");
                self.fallback(exclude)
            }
        };
        self.shuffled(round)
    }

    /// Pick a fallback round (unshuffled), avoiding `exclude` when possible.
    ///
    /// If every table entry carries the excluded letter the exclusion is ignored:
    /// repeating a letter once beats producing no round.
    pub fn fallback(&mut self, exclude: Option<Letter>) -> Round {
        let allowed: Vec<&Round> = self
            .rounds
            .iter()
            .filter(|r| Some(r.letter) != exclude)
            .collect();
        let picked = match allowed.choose(&mut self.rng) {
            Some(round) => *round,
            None => {
                if let Some(l) = exclude {
                    log::info!("every fallback round uses '{l}'; ignoring exclusion");
                }
                let i = self.rng.random_range(0..self.rounds.len());
                &self.rounds[i]
            }
        };
        picked.clone()
    }

    /// Uniform permutation of the options.
    pub fn shuffled(&mut self, mut round: Round) -> Round {
        round.options.shuffle(&mut self.rng);
        round
    }
}

fn build_rounds(table: &[FallbackEntry]) -> Vec<Round> {
    table
        .iter()
        .filter_map(|(c, pairs)| Round::from_entry(*c, pairs))
        .collect()
}
