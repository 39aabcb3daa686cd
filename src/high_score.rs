//! Best scores, kept as plain text with one `points speed` pair per line.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::speed::SpeedLevel;

pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("bad high score entry on line {line}: {content:?}")]
    Parse { line: usize, content: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighScore {
    pub points: u32,
    pub speed: SpeedLevel,
}

/// Sorted best-first, never longer than [`MAX_ENTRIES`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<HighScore>,
}

impl HighScores {
    pub fn entries(&self) -> &[HighScore] {
        &self.entries
    }

    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.points).unwrap_or(0)
    }

    /// Whether `points` would make it onto the table.
    pub fn qualifies(&self, points: u32) -> bool {
        points > 0
            && (self.entries.len() < MAX_ENTRIES
                || self.entries.last().is_some_and(|e| points > e.points))
    }

    /// Inserts the score and returns its rank (0 is best), or `None` if it
    /// did not qualify. Ties rank below the earlier score.
    pub fn record(&mut self, points: u32, speed: SpeedLevel) -> Option<usize> {
        if !self.qualifies(points) {
            return None;
        }
        let rank = self.entries.partition_point(|e| e.points >= points);
        self.entries.insert(rank, HighScore { points, speed });
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    pub fn parse(text: &str) -> Result<Self, HighScoreError> {
        let mut scores = HighScores::default();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let bad_line = || HighScoreError::Parse {
                line: index + 1,
                content: line.to_string(),
            };
            let (points, speed) = line.split_once(' ').ok_or_else(bad_line)?;
            let points = points.parse().map_err(|_| bad_line())?;
            let speed = SpeedLevel::from_name(speed.trim()).ok_or_else(bad_line)?;
            scores.record(points, speed);
        }
        Ok(scores)
    }

    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}\n", e.points, e.speed))
            .collect()
    }

    /// A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, HighScoreError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HighScores::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), HighScoreError> {
        fs::write(path, self.to_text())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_best_first() {
        let mut scores = HighScores::default();
        assert_eq!(scores.record(5, SpeedLevel::Slow), Some(0));
        assert_eq!(scores.record(9, SpeedLevel::Fast), Some(0));
        assert_eq!(scores.record(7, SpeedLevel::Medium), Some(1));
        assert_eq!(scores.record(7, SpeedLevel::Extreme), Some(2));

        let points: Vec<u32> = scores.entries().iter().map(|e| e.points).collect();
        assert_eq!(points, vec![9, 7, 7, 5]);
        assert_eq!(scores.entries()[1].speed, SpeedLevel::Medium);
        assert_eq!(scores.best(), 9);
    }

    #[test]
    fn test_zero_points_never_qualify() {
        let mut scores = HighScores::default();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.record(0, SpeedLevel::Slow), None);
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_table_is_truncated() {
        let mut scores = HighScores::default();
        for points in 1..=MAX_ENTRIES as u32 {
            scores.record(points, SpeedLevel::Medium);
        }
        assert!(!scores.qualifies(1));
        assert_eq!(scores.record(1, SpeedLevel::Medium), None);

        assert_eq!(scores.record(4, SpeedLevel::Fast), Some(7));
        assert_eq!(scores.entries().len(), MAX_ENTRIES);
        assert_eq!(scores.entries().last().map(|e| e.points), Some(2));
    }

    #[test]
    fn test_parse_text_file() {
        let scores = HighScores::parse("3 Slow\n\n12 extreme\n  8 Fast  \n").unwrap();
        assert_eq!(
            scores.entries(),
            &[
                HighScore {
                    points: 12,
                    speed: SpeedLevel::Extreme
                },
                HighScore {
                    points: 8,
                    speed: SpeedLevel::Fast
                },
                HighScore {
                    points: 3,
                    speed: SpeedLevel::Slow
                },
            ]
        );
        assert_eq!(scores.to_text(), "12 Extreme\n8 Fast\n3 Slow\n");
    }

    #[test]
    fn test_parse_reports_bad_line() {
        let err = HighScores::parse("3 Slow\nlots Fast\n").unwrap_err();
        match err {
            HighScoreError::Parse { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "lots Fast");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(HighScores::parse("3 Warp").is_err());
        assert!(HighScores::parse("3").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("snekfx_scores_{}.txt", std::process::id()));
        let mut scores = HighScores::default();
        scores.record(4, SpeedLevel::Fast);
        scores.record(11, SpeedLevel::Slow);

        scores.save(&path).unwrap();
        let loaded = HighScores::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, scores);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = std::env::temp_dir().join("snekfx_scores_that_do_not_exist.txt");
        let scores = HighScores::load(&path).unwrap();
        assert!(scores.entries().is_empty());
    }
}
