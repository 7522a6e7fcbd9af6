//! Diversity-aware greedy ranking.
//!
//! Picks results one at a time from a mood-sorted shortlist, trading the
//! candidate's shortlist position against its dissimilarity to everything
//! already picked.
//!
//! ## Algorithm
//! 1. Seed with shortlist position 0 (the strongest mood match)
//! 2. Until `n` picks are made or the shortlist is exhausted, score every
//!    unpicked position `k`:
//!    - `avg_similarity`: mean similarity to the picks, over in-bounds pairs
//!      only (0 when there is no such pair)
//!    - `diversity = 1 - avg_similarity`
//!    - `position = 1 - k / shortlist_len`
//!    - `combined = (1 - d) * position + d * diversity`
//! 3. Take the highest `combined`; the earliest position wins ties
//!
//! Picks are returned in the order they were made.
//!
//! `d = 0` reproduces the shortlist order. `d = 1` ignores position
//! entirely. Callers clamp `d` to [0, 1]; the ranker does not.

use data_loader::{RowIndex, SimilarityMatrix};
use tracing::{debug, instrument};

/// One selected candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedPick {
    /// Position in the shortlist
    pub position: usize,
    /// Catalog row
    pub row: RowIndex,
    pub composite_score: f32,
    /// Score that won the pick
    pub combined_score: f32,
}

/// Greedy maximal-marginal-relevance style ranker
#[derive(Debug, Clone, Copy, Default)]
pub struct DiversityRanker;

impl DiversityRanker {
    pub fn new() -> Self {
        Self
    }

    /// Selected catalog rows, in selection order
    pub fn rank(
        &self,
        shortlist: &[RowIndex],
        similarity: &SimilarityMatrix,
        composite_scores: &[f32],
        diversity_factor: f32,
        n: usize,
    ) -> Vec<RowIndex> {
        self.rank_with_scores(shortlist, similarity, composite_scores, diversity_factor, n)
            .into_iter()
            .map(|pick| pick.row)
            .collect()
    }

    /// Same as [`rank`](Self::rank) but keeps the scores of every pick.
    ///
    /// `composite_scores` is aligned with `shortlist` and carried through to
    /// the picks; selection itself uses position and diversity only.
    #[instrument(skip(self, shortlist, similarity, composite_scores), fields(shortlist_len = shortlist.len()))]
    pub fn rank_with_scores(
        &self,
        shortlist: &[RowIndex],
        similarity: &SimilarityMatrix,
        composite_scores: &[f32],
        diversity_factor: f32,
        n: usize,
    ) -> Vec<RankedPick> {
        if shortlist.is_empty() || n == 0 {
            return Vec::new();
        }

        let shortlist_len = shortlist.len() as f32;
        let composite = |k: usize| composite_scores.get(k).copied().unwrap_or(0.0);

        let mut picks = Vec::with_capacity(n.min(shortlist.len()));
        picks.push(RankedPick {
            position: 0,
            row: shortlist[0],
            composite_score: composite(0),
            combined_score: combined_score(1.0, 1.0, diversity_factor),
        });

        // Kept in ascending position order so the first maximum found wins
        let mut remaining: Vec<usize> = (1..shortlist.len()).collect();
        let mut skipped_pairs = 0usize;

        while picks.len() < n && !remaining.is_empty() {
            let mut best: Option<(usize, f32)> = None;
            let mut best_score = f32::NEG_INFINITY;

            for (slot, &k) in remaining.iter().enumerate() {
                let (avg_similarity, skipped) = average_similarity(similarity, shortlist[k], &picks);
                skipped_pairs += skipped;

                let diversity_score = 1.0 - avg_similarity;
                let position_score = 1.0 - (k as f32 / shortlist_len);
                let score = combined_score(position_score, diversity_score, diversity_factor);

                if score > best_score {
                    best_score = score;
                    best = Some((slot, score));
                }
            }

            // Only reachable when every score is NaN; fall back to shortlist order
            let (slot, score) = best.unwrap_or((0, f32::NAN));
            let k = remaining.remove(slot);
            picks.push(RankedPick {
                position: k,
                row: shortlist[k],
                composite_score: composite(k),
                combined_score: score,
            });
        }

        if skipped_pairs > 0 {
            debug!("Skipped {} similarity pairs outside the matrix", skipped_pairs);
        }
        debug!("Ranked {} of {} shortlisted candidates", picks.len(), shortlist.len());
        picks
    }
}

fn combined_score(position_score: f32, diversity_score: f32, diversity_factor: f32) -> f32 {
    (1.0 - diversity_factor) * position_score + diversity_factor * diversity_score
}

/// Mean similarity between `row` and every pick, plus the number of pairs
/// skipped because an index fell outside the matrix.
fn average_similarity(similarity: &SimilarityMatrix, row: RowIndex, picks: &[RankedPick]) -> (f32, usize) {
    let mut sum = 0.0;
    let mut count = 0usize;
    for pick in picks {
        if let Some(value) = similarity.get(row, pick.row) {
            sum += value;
            count += 1;
        }
    }

    let skipped = picks.len() - count;
    if count == 0 {
        (0.0, skipped)
    } else {
        (sum / count as f32, skipped)
    }
}
