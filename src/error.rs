//! Error taxonomy for the post-processing pipeline
//!
//! Every public plotting entry point returns [`PlotResult`]. The three variants
//! map one-to-one onto the three ways a request can fail:
//!
//! | Variant | Meaning | Caller reaction |
//! |---------|---------|-----------------|
//! | [`PlotError::UnsupportedPlot`] | plot not applicable to this solution | skip / list available plots |
//! | [`PlotError::MalformedSolution`] | structural invariant broken upstream | report a solver/model bug |
//! | [`PlotError::Render`] | validated data could not be drawn | inspect the named field |
//!
//! No variant is ever produced after drawing has started on a caller-visible
//! target except `Render` for backend failures.

use thiserror::Error;

use crate::registry::PlotKind;
use crate::solution::ModelFamily;

/// Result alias used across the crate
pub type PlotResult<T> = Result<T, PlotError>;

/// Typed failure of a plot request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    /// The requested plot does not apply to this solution
    #[error("plot '{plot}' is not available for {family} solution ({experiment}): {reason}")]
    UnsupportedPlot {
        plot: PlotKind,
        family: ModelFamily,
        experiment: String,
        reason: String,
    },

    /// A present field (or the time axis) violates a structural invariant
    #[error("malformed solution, field '{field}': {reason}")]
    MalformedSolution { field: String, reason: String },

    /// Extracted data could not be drawn
    #[error("cannot render field '{field}' of plot '{plot}': {reason}")]
    Render {
        plot: PlotKind,
        field: String,
        reason: String,
    },
}

impl PlotError {
    pub(crate) fn unsupported(
        plot: PlotKind,
        family: ModelFamily,
        experiment: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedPlot {
            plot,
            family,
            experiment: experiment.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSolution {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn render(plot: PlotKind, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Render {
            plot,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// `true` for the expected, non-fatal "not applicable" outcome
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedPlot { .. })
    }

    /// `true` when the upstream solution is structurally broken
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedSolution { .. })
    }

    /// `true` when drawing failed
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }
}

/// Failure while loading a [`PlotConfig`](crate::output::PlotConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read plot configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse plot configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid plot configuration value '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}
