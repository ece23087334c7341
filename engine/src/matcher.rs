//! Fuzzy ranking of candidates against a query.

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use fzpick_types::MatchEntry;

/// Ranks a static candidate set against a non-empty query.
///
/// Returns only matching candidates, best first, each with the grapheme
/// indices that contributed to its match. Empty queries are handled by the
/// caller.
pub trait CandidateMatcher {
    fn rank(&mut self, candidates: &[String], query: &str) -> Vec<MatchEntry>;
}

/// [`CandidateMatcher`] using nucleo with fzf extended syntax and smart case.
///
/// Ties on score go to the shorter candidate, then to the earlier one.
pub struct NucleoMatcher {
    matcher: Matcher,
    buf: Vec<char>,
    indices: Vec<u32>,
}

impl NucleoMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
            buf: Vec::new(),
            indices: Vec::new(),
        }
    }
}

impl Default for NucleoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NucleoMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NucleoMatcher").finish_non_exhaustive()
    }
}

struct Scored {
    score: u32,
    len: usize,
    index: usize,
    positions: Vec<usize>,
}

impl CandidateMatcher for NucleoMatcher {
    fn rank(&mut self, candidates: &[String], query: &str) -> Vec<MatchEntry> {
        let pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);

        let mut scored: Vec<Scored> = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            self.indices.clear();
            let haystack = Utf32Str::new(candidate, &mut self.buf);
            let len = haystack.len();
            let Some(score) = pattern.indices(haystack, &mut self.matcher, &mut self.indices)
            else {
                continue;
            };
            self.indices.sort_unstable();
            self.indices.dedup();
            scored.push(Scored {
                score,
                len,
                index,
                positions: self.indices.iter().map(|&i| i as usize).collect(),
            });
        }

        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.len.cmp(&b.len))
                .then_with(|| a.index.cmp(&b.index))
        });

        tracing::trace!(query, matched = scored.len(), "Ranked candidates");

        scored
            .into_iter()
            .map(|s| MatchEntry {
                candidate: candidates[s.index].clone(),
                positions: s.positions,
            })
            .collect()
    }
}
