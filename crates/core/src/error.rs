use std::fmt;
use std::path::PathBuf;

/// Failure of a single request/shape/present pipeline.
///
/// Each pipeline catches its own `PipelineError`; none of them is fatal to
/// the process.
#[derive(Debug)]
pub enum PipelineError {
    /// Network failure, non-2xx status, or an undecodable body.
    Transport {
        endpoint: &'static str,
        detail: String,
    },
    /// Well-formed response without the data the pipeline needs.
    NoData { detail: String },
    /// Derived-value math on invalid inputs.
    Computation { detail: String },
    /// The CSV file could not be written.
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn transport(endpoint: &'static str, detail: impl Into<String>) -> Self {
        Self::Transport {
            endpoint,
            detail: detail.into(),
        }
    }

    pub fn no_data(detail: impl Into<String>) -> Self {
        Self::NoData {
            detail: detail.into(),
        }
    }

    pub fn computation(detail: impl Into<String>) -> Self {
        Self::Computation {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::NoData { .. } => "no_data",
            Self::Computation { .. } => "computation",
            Self::Output { .. } => "output",
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { endpoint, detail } => {
                write!(f, "request to {endpoint} failed: {detail}")
            }
            Self::NoData { detail } => write!(f, "no data: {detail}"),
            Self::Computation { detail } => write!(f, "computation failed: {detail}"),
            Self::Output { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Output { source, .. } => Some(source),
            _ => None,
        }
    }
}
