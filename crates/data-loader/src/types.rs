//! Core domain types for the mood catalog.
//!
//! The catalog and the similarity matrix are positionally aligned: row `i`
//! of the catalog is row/column `i` of the matrix. Both are immutable once
//! built and are shared read-only across requests.

use crate::error::DataLoadError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in the catalog, and the key into the similarity matrix
pub type RowIndex = usize;

/// External catalog identifier carried in the artifact (TMDB id)
pub type MovieId = u32;

// =============================================================================
// Moods
// =============================================================================

/// The fixed set of moods a request can ask for.
///
/// Declaration order is the order exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Scared,
    Romantic,
    Thoughtful,
    Adventurous,
    Relaxed,
    Mysterious,
    Inspired,
}

impl Mood {
    pub const COUNT: usize = 10;

    pub const ALL: [Mood; Mood::COUNT] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Excited,
        Mood::Scared,
        Mood::Romantic,
        Mood::Thoughtful,
        Mood::Adventurous,
        Mood::Relaxed,
        Mood::Mysterious,
        Mood::Inspired,
    ];

    /// Lowercase identifier used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Scared => "scared",
            Mood::Romantic => "romantic",
            Mood::Thoughtful => "thoughtful",
            Mood::Adventurous => "adventurous",
            Mood::Relaxed => "relaxed",
            Mood::Mysterious => "mysterious",
            Mood::Inspired => "inspired",
        }
    }

    /// Exact lookup by identifier: `None` is the "unknown mood" case
    pub fn parse(s: &str) -> Option<Mood> {
        s.parse().ok()
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| DataLoadError::InvalidValue {
                field: "mood".to_string(),
                value: s.to_string(),
            })
    }
}

/// Per-movie affinity for every mood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodScores([f32; Mood::COUNT]);

impl MoodScores {
    pub fn new(scores: [f32; Mood::COUNT]) -> Self {
        Self(scores)
    }

    /// Affinity for `mood`; undefined values read as 0
    pub fn get(&self, mood: Mood) -> f32 {
        let score = self.0[mood.index()];
        if score.is_finite() { score } else { 0.0 }
    }

    pub fn set(&mut self, mood: Mood, score: f32) {
        self.0[mood.index()] = score;
    }

    /// Builder-style setter, handy when assembling fixtures
    pub fn with(mut self, mood: Mood, score: f32) -> Self {
        self.set(mood, score);
        self
    }
}

// =============================================================================
// Movie records
// =============================================================================

/// One catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Row position in the catalog; always equal to the similarity matrix index
    pub id: RowIndex,
    pub tmdb_id: MovieId,
    pub title: String,
    pub overview: String,
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub director: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Minutes
    pub runtime: Option<u32>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub popularity: f32,
    pub mood_scores: MoodScores,
}

impl MovieRecord {
    /// Minimal record, used by loaders and fixtures before filling details
    pub fn new(tmdb_id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id: 0,
            tmdb_id,
            title: title.into(),
            overview: String::new(),
            genres: Vec::new(),
            cast: Vec::new(),
            director: None,
            poster_path: None,
            release_date: None,
            runtime: None,
            vote_average: 0.0,
            vote_count: 0,
            popularity: 0.0,
            mood_scores: MoodScores::default(),
        }
    }

    pub fn mood_score(&self, mood: Mood) -> f32 {
        self.mood_scores.get(mood)
    }
}

/// Immutable, ordered view over the catalog rows
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    movies: Vec<MovieRecord>,
}

impl CatalogStore {
    /// Build the store, stamping each record's `id` with its row position
    pub fn new(mut movies: Vec<MovieRecord>) -> Self {
        for (row, movie) in movies.iter_mut().enumerate() {
            movie.id = row;
        }
        Self { movies }
    }

    pub fn get(&self, row: RowIndex) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.iter()
    }

    pub fn as_slice(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Case-insensitive title search.
    ///
    /// Exact matches come first, then substring matches; within each group
    /// higher `vote_average` wins.
    pub fn search_title(&self, query: &str, limit: usize) -> Vec<&MovieRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &MovieRecord)> = self
            .movies
            .iter()
            .filter_map(|movie| {
                let title = movie.title.to_lowercase();
                if title == needle {
                    Some((0, movie))
                } else if title.contains(&needle) {
                    Some((1, movie))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| b.1.vote_average.total_cmp(&a.1.vote_average))
        });
        matches.truncate(limit);
        matches.into_iter().map(|(_, movie)| movie).collect()
    }
}

// =============================================================================
// Similarity matrix
// =============================================================================

/// Square pairwise similarity matrix, stored row-major.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    dim: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build from parsed rows; every row must be `rows.len()` wide
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, DataLoadError> {
        let dim = rows.len();
        let mut values = Vec::with_capacity(dim * dim);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != dim {
                return Err(DataLoadError::NotSquare {
                    row,
                    expected: dim,
                    found: cols.len(),
                });
            }
            values.extend(cols);
        }
        Ok(Self { dim, values })
    }

    /// Every distinct pair has similarity 0
    pub fn identity(dim: usize) -> Self {
        let mut values = vec![0.0; dim * dim];
        for i in 0..dim {
            values[i * dim + i] = 1.0;
        }
        Self { dim, values }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Similarity of rows `i` and `j`, or `None` if either is out of bounds
    pub fn get(&self, i: RowIndex, j: RowIndex) -> Option<f32> {
        if i < self.dim && j < self.dim {
            Some(self.values[i * self.dim + j])
        } else {
            None
        }
    }

    /// The `k` rows most similar to `row`, excluding `row` itself.
    ///
    /// Sorted by similarity descending, ties by row order. Non-finite cells
    /// read as 0.
    pub fn most_similar(&self, row: RowIndex, k: usize) -> Vec<(RowIndex, f32)> {
        if row >= self.dim {
            return Vec::new();
        }
        let start = row * self.dim;
        let mut scored: Vec<(RowIndex, f32)> = self.values[start..start + self.dim]
            .iter()
            .map(|&value| if value.is_finite() { value } else { 0.0 })
            .enumerate()
            .filter(|&(other, _)| other != row)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        scored
    }
}

// =============================================================================
// Catalog - the aligned pair
// =============================================================================

/// Movie rows and their similarity matrix, always loaded together
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub movies: CatalogStore,
    pub similarity: SimilarityMatrix,
}

impl Catalog {
    pub fn new(movies: CatalogStore, similarity: SimilarityMatrix) -> Self {
        Self { movies, similarity }
    }

    /// True when every catalog row has a matrix row and vice versa
    pub fn is_aligned(&self) -> bool {
        self.movies.len() == self.similarity.dim()
    }
}
