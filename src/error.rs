//! Error taxonomy for ingestion and profile queries.
//!
//! [`IngestError`] covers everything that can go wrong while turning an export
//! into a table. [`ProfileError`] covers the per-query conditions a session can
//! hit; none of them invalidate the loaded roster.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path:?}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("unknown encoding '{0}'")]
    UnknownEncoding(String),

    #[error("failed to decode text with encoding {0}")]
    Decode(&'static str),

    #[error("required column '{0}' not found in input headers")]
    MissingColumn(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("no player table loaded; supply an input file first")]
    MissingInput,

    #[error("no {0} selected")]
    UnresolvedSelection(&'static str),

    #[error("no players found for role {role} with at least {min_minutes} minutes played")]
    EmptyCohort { role: String, min_minutes: u32 },

    #[error(
        "player '{player}' not found among {role} players with at least {min_minutes} minutes played"
    )]
    PlayerNotInCohort {
        player: String,
        role: String,
        min_minutes: u32,
    },

    #[error("no metric template configured for role '{0}'")]
    UnsupportedRole(String),

    #[error("missing columns for {role}: {}", columns.join(", "))]
    MissingColumns { role: String, columns: Vec<String> },
}

impl ProfileError {
    /// Whether the query halted before any core computation ran.
    pub fn halted_before_compute(&self) -> bool {
        matches!(
            self,
            ProfileError::MissingInput | ProfileError::UnresolvedSelection(_)
        )
    }
}
