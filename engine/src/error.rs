use thiserror::Error;

/// Precondition violations at the call boundary. Expected bad input
/// (malformed placements, empty teams, round cap) is reported through
/// `CombatReport::error` instead.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid board dimensions {width}x{height}")]
    InvalidBoard { width: u32, height: u32 },
    #[error("invalid rules: {0}")]
    InvalidRules(&'static str),
    #[error("failed to parse battle: {0}")]
    Parse(#[from] serde_json::Error),
}
