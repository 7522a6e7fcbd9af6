//! Parsers for the offline-produced catalog artifacts.
//!
//! - movies.jsonl: one JSON object per line, in matrix row order
//! - similarity.csv: one comma-separated matrix row per line
//!
//! Blank lines are skipped in both files. Line numbers in errors are 1-based.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

pub const MOVIES_FILE: &str = "movies.jsonl";
pub const SIMILARITY_FILE: &str = "similarity.csv";

/// Read a whole artifact, reporting a missing file by path
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// A catalog row exactly as the feature-engineering job writes it
#[derive(Debug, Deserialize)]
struct RawMovieRow {
    id: MovieId,
    title: String,
    overview: Option<String>,
    #[serde(alias = "genres")]
    genre_names: Option<Vec<String>>,
    #[serde(alias = "cast")]
    cast_names: Option<Vec<String>>,
    director: Option<String>,
    poster_path: Option<String>,
    release_date: Option<String>,
    runtime: Option<f64>,
    vote_average: f32,
    vote_count: f64,
    popularity: Option<f32>,
    mood_happy_score: Option<f32>,
    mood_sad_score: Option<f32>,
    mood_excited_score: Option<f32>,
    mood_scared_score: Option<f32>,
    mood_romantic_score: Option<f32>,
    mood_thoughtful_score: Option<f32>,
    mood_adventurous_score: Option<f32>,
    mood_relaxed_score: Option<f32>,
    mood_mysterious_score: Option<f32>,
    mood_inspired_score: Option<f32>,
}

impl RawMovieRow {
    fn mood_scores(&self) -> MoodScores {
        MoodScores::new(
            [
                self.mood_happy_score,
                self.mood_sad_score,
                self.mood_excited_score,
                self.mood_scared_score,
                self.mood_romantic_score,
                self.mood_thoughtful_score,
                self.mood_adventurous_score,
                self.mood_relaxed_score,
                self.mood_mysterious_score,
                self.mood_inspired_score,
            ]
            .map(|score| score.unwrap_or(0.0)),
        )
    }

    fn into_record(self, line: usize) -> Result<MovieRecord> {
        if !self.vote_count.is_finite() || self.vote_count < 0.0 {
            return Err(DataLoadError::ParseError {
                file: MOVIES_FILE.to_string(),
                line,
                reason: format!("Invalid vote_count: {}", self.vote_count),
            });
        }

        let mood_scores = self.mood_scores();
        let release_date = self
            .release_date
            .as_deref()
            .and_then(|raw| parse_release_date(raw, &self.title));

        Ok(MovieRecord {
            id: 0,
            tmdb_id: self.id,
            overview: self.overview.unwrap_or_default(),
            genres: self.genre_names.unwrap_or_default(),
            cast: self.cast_names.unwrap_or_default(),
            director: non_empty(self.director),
            poster_path: non_empty(self.poster_path),
            release_date,
            // 0 means "unknown" in the source data
            runtime: self
                .runtime
                .filter(|r| r.is_finite() && *r > 0.0)
                .map(|r| r as u32),
            vote_average: self.vote_average,
            vote_count: self.vote_count as u32,
            popularity: self.popularity.unwrap_or(0.0),
            mood_scores,
            title: self.title,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse a `YYYY-MM-DD` release date; bad dates are dropped with a warning
fn parse_release_date(raw: &str, title: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("Invalid release date for movie {}: {}", title, raw);
            None
        }
    }
}

/// Parse movies.jsonl into catalog records (ids are stamped later by row)
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let lines = read_lines(path)?;
    let mut movies = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let raw: RawMovieRow =
            serde_json::from_str(line_trimmed).map_err(|e| DataLoadError::ParseError {
                file: MOVIES_FILE.to_string(),
                line: line_no,
                reason: e.to_string(),
            })?;

        movies.push(raw.into_record(line_no)?);
    }

    Ok(movies)
}

/// Parse one comma-separated matrix row
fn parse_similarity_row(line: &str, line_no: usize) -> Result<Vec<f32>> {
    line.split(',')
        .map(|cell| {
            cell.trim()
                .parse::<f32>()
                .map_err(|e| DataLoadError::ParseError {
                    file: SIMILARITY_FILE.to_string(),
                    line: line_no,
                    reason: format!("Invalid similarity value '{}': {}", cell.trim(), e),
                })
        })
        .collect()
}

/// Parse similarity.csv into a square matrix
///
/// Rows are parsed in parallel; order is preserved.
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let lines = read_lines(path)?;

    let rows: Vec<Vec<f32>> = lines
        .par_iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_similarity_row(line.trim(), idx + 1))
        .collect::<Result<_>>()?;

    SimilarityMatrix::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_movie_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            MOVIES_FILE,
            concat!(
                r#"{"id": 603, "title": "The Matrix", "overview": "Wake up.", "genre_names": ["Action", "Science Fiction"], "#,
                r#""cast_names": ["Keanu Reeves"], "director": "Lana Wachowski", "release_date": "1999-03-30", "#,
                r#""runtime": 136.0, "vote_average": 8.2, "vote_count": 24000, "popularity": 80.5, "#,
                r#""mood_excited_score": 7.5, "mood_thoughtful_score": 4.0}"#,
                "\n\n"
            ),
        );

        let movies = parse_movies(&path).unwrap();
        assert_eq!(movies.len(), 1);

        let movie = &movies[0];
        assert_eq!(movie.tmdb_id, 603);
        assert_eq!(movie.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(movie.runtime, Some(136));
        assert_eq!(movie.vote_count, 24000);
        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(1999, 3, 30));
        assert_eq!(movie.mood_score(Mood::Excited), 7.5);
        assert_eq!(movie.mood_score(Mood::Happy), 0.0);
    }

    #[test]
    fn test_bad_release_date_is_dropped() {
        assert_eq!(parse_release_date("30/03/1999", "Some Movie"), None);
        assert_eq!(parse_release_date("", "Some Movie"), None);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            MOVIES_FILE,
            "{\"id\": 1, \"title\": \"Ok\", \"vote_average\": 5.0, \"vote_count\": 3}\nnot json\n",
        );

        match parse_movies(&path) {
            Err(DataLoadError::ParseError { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_similarity() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), SIMILARITY_FILE, "1.0, 0.25\n\n0.25,1.0\n");

        let matrix = parse_similarity(&path).unwrap();
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.get(0, 1), Some(0.25));
    }

    #[test]
    fn test_ragged_similarity_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), SIMILARITY_FILE, "1.0,0.5\n0.5\n");

        assert!(matches!(
            parse_similarity(&path),
            Err(DataLoadError::NotSquare { row: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_similarity(&dir.path().join(SIMILARITY_FILE));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
