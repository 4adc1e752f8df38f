//! Helper functions for integration tests

use batpost::prelude::*;
use std::path::PathBuf;

/// Assert that a plot request failed as "not applicable"
pub fn assert_unsupported<T: std::fmt::Debug>(result: PlotResult<T>, message: &str) {
    match result {
        Err(e) => assert!(e.is_unsupported(), "{}: expected UnsupportedPlot, got {}", message, e),
        Ok(v) => panic!("{}: expected UnsupportedPlot, got {:?}", message, v),
    }
}

/// Assert that a plot request failed on a structural invariant of `field`
pub fn assert_malformed<T: std::fmt::Debug>(result: PlotResult<T>, field: &str) {
    match result {
        Err(PlotError::MalformedSolution { field: got, .. }) => {
            assert_eq!(got, field, "MalformedSolution names the wrong field")
        }
        Err(e) => panic!("expected MalformedSolution for '{}', got {}", field, e),
        Ok(v) => panic!("expected MalformedSolution for '{}', got {:?}", field, v),
    }
}

/// Output path inside a fresh temporary directory
///
/// The directory guard must outlive the path.
pub fn temp_path(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    (dir, path)
}
