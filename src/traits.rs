use crate::model::{Coordinates, MatchVerdict, RevisionBundle};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Expected 5 '/'-separated segments in '{input}', found {found}")]
    WrongSegmentCount { input: String, found: usize },
    #[error("Empty {segment} segment in '{input}'")]
    EmptySegment {
        input: String,
        segment: &'static str,
    },
}

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Semaphore error: {0}")]
    Semaphore(String),
    #[error("Match task failed: {0}")]
    Task(String),
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}

pub trait MatchPolicy: Send + Sync {
    /// Returns the name reported in matching verdicts (e.g., "definition").
    fn name(&self) -> &str;

    /// Decides whether `source` and `target` carry the same license.
    fn is_matching(&self, source: &RevisionBundle, target: &RevisionBundle) -> MatchVerdict;
}

/// Decides whether a manifest path holds license text for a coordinate.
pub trait LicenseFileClassifier: Send + Sync {
    fn is_license_file(&self, path: &str, coordinates: &Coordinates) -> bool;
}

impl<F> LicenseFileClassifier for F
where
    F: Fn(&str, &Coordinates) -> bool + Send + Sync,
{
    fn is_license_file(&self, path: &str, coordinates: &Coordinates) -> bool {
        self(path, coordinates)
    }
}
