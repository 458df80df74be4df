use core::fmt;

use rr_contour::TraceError;

/// Pipeline failures. `Trace` wraps boundary extraction errors; the other
/// arms are broken internal invariants and never recoverable. No partial
/// rectangle list is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecomposeError {
    Trace(TraceError),
    LoopBroken,
    NoOpposingSegment { x: i32, y: i32 },
    NonRectangularLoop { corners: usize },
}

impl fmt::Display for DecomposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace(err) => write!(f, "boundary extraction failed: {err}"),
            Self::LoopBroken => write!(f, "segment loop failed to close"),
            Self::NoOpposingSegment { x, y } => {
                write!(f, "no opposing segment to resolve corner ({x}, {y})")
            }
            Self::NonRectangularLoop { corners } => {
                write!(f, "emitted loop has {corners} corners, expected 4")
            }
        }
    }
}

impl std::error::Error for DecomposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Trace(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TraceError> for DecomposeError {
    fn from(err: TraceError) -> Self {
        Self::Trace(err)
    }
}
