//! Universal law compliance checker.
//!
//! # Responsibility
//! - Test each rule-backed law independently against one sigil.
//! - Pad the result with laws picked by a pluggable `LawPadding` strategy.
//!
//! # Invariants
//! - `Vibration` is always included.
//! - `Correspondence` is included iff the sigil is aligned; padding never
//!   picks it for unaligned sigils.
//! - Results are a subset of the 9-law catalog, returned in catalog order.
//! - The padding size is fixed, so the law count is deterministic even when
//!   padded members are not.

use crate::model::law::UniversalLaw;
use crate::model::sigil::Sigil;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::Regex;

/// Number of extra laws added after rule evaluation.
pub const PADDING_PICKS: usize = 2;

static POLARITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" (?:and|but|yet) ").expect("valid polarity regex"));
static SACRED_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[369]").expect("valid sacred digit regex"));
static CAUSATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"create|manifest|generate").expect("valid causation regex"));

/// Strategy choosing padding laws from the not-yet-included candidates.
pub trait LawPadding {
    /// Returns up to `count` distinct laws drawn from `candidates`.
    fn pick(&mut self, candidates: &[UniversalLaw], count: usize) -> Vec<UniversalLaw>;
}

/// Random padding. Seed it to make results reproducible.
pub struct RandomPadding {
    rng: StdRng,
}

impl RandomPadding {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPadding {
    fn default() -> Self {
        Self::new()
    }
}

impl LawPadding for RandomPadding {
    fn pick(&mut self, candidates: &[UniversalLaw], count: usize) -> Vec<UniversalLaw> {
        candidates
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect()
    }
}

/// Picks nothing; yields only the rule-triggered subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPadding;

impl LawPadding for NoPadding {
    fn pick(&mut self, _candidates: &[UniversalLaw], _count: usize) -> Vec<UniversalLaw> {
        Vec::new()
    }
}

/// Returns the deterministic, rule-triggered laws in catalog order.
pub fn triggered_laws(sigil: &Sigil, is_aligned: bool) -> Vec<UniversalLaw> {
    let mut laws = vec![UniversalLaw::Vibration];
    if is_aligned {
        laws.push(UniversalLaw::Correspondence);
    }
    if POLARITY_RE.is_match(&sigil.intention) {
        laws.push(UniversalLaw::Polarity);
    }
    if has_sacred_digit(sigil) {
        laws.push(UniversalLaw::Rhythm);
    }
    if CAUSATION_RE.is_match(&sigil.intention.to_lowercase()) {
        laws.push(UniversalLaw::CauseAndEffect);
    }
    laws
}

/// Returns the compliant laws: triggered rules plus padding picks.
///
/// Non-deterministic unless `padding` is deterministic.
pub fn check_compliance(
    sigil: &Sigil,
    is_aligned: bool,
    padding: &mut dyn LawPadding,
) -> Vec<UniversalLaw> {
    let mut laws = triggered_laws(sigil, is_aligned);
    let candidates = padding_candidates(&laws, is_aligned);

    for law in padding.pick(&candidates, PADDING_PICKS) {
        if candidates.contains(&law) && !laws.contains(&law) {
            laws.push(law);
        }
    }
    laws.sort();
    laws
}

/// Size of the full compliance set for default (random) padding.
pub fn compliance_count(sigil: &Sigil, is_aligned: bool) -> usize {
    let triggered = triggered_laws(sigil, is_aligned);
    let candidates = padding_candidates(&triggered, is_aligned);
    triggered.len() + PADDING_PICKS.min(candidates.len())
}

fn padding_candidates(included: &[UniversalLaw], is_aligned: bool) -> Vec<UniversalLaw> {
    UniversalLaw::ALL
        .into_iter()
        .filter(|law| !included.contains(law))
        .filter(|law| is_aligned || *law != UniversalLaw::Correspondence)
        .collect()
}

/// Whether the decimal frequency rendering contains 3, 6 or 9.
pub(crate) fn has_sacred_digit(sigil: &Sigil) -> bool {
    SACRED_DIGIT_RE.is_match(&sigil.frequency_label())
}
