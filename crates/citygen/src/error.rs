// ---------------------------------------------------------------------------
// CityGenError: the failure kinds surfaced by city generation
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur before city generation starts.
///
/// Generation itself never fails: degenerate inputs inside the algorithm are
/// handled by policy fallbacks (thin rings shrink their buffer, candidates in
/// zones without probabilities are rejected). Only the entry checks below can
/// abort a run, and they do so before any work begins.
#[derive(Debug, Clone, PartialEq)]
pub enum CityGenError {
    /// The requested radius is non-finite, non-positive, or outside bounds.
    InvalidRadius { radius: f64, min: f64, max: f64 },
    /// Parameters could not be parsed or are internally inconsistent.
    InvalidParams(String),
}

impl fmt::Display for CityGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityGenError::InvalidRadius { radius, min, max } => write!(
                f,
                "Invalid radius: {radius} km (must be between {min} and {max} km)"
            ),
            CityGenError::InvalidParams(msg) => write!(f, "Invalid parameters: {msg}"),
        }
    }
}

impl std::error::Error for CityGenError {}

impl From<serde_json::Error> for CityGenError {
    fn from(e: serde_json::Error) -> Self {
        CityGenError::InvalidParams(e.to_string())
    }
}
