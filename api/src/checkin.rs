//! Orchestrates one check-in: guard → gateway → normalizer.
//!
//! Returns either a valid [`MoodAnalysis`] or a classified user-facing
//! error. A malformed model reply is never an error here — the normalizer
//! absorbs it into a fallback result.

use mindtrack_core::guard::InputGuard;
use mindtrack_core::mood::MoodAnalysis;
use mindtrack_core::normalize;

use crate::error::AppError;
use crate::gateway::AnalysisBackend;

#[derive(Debug, Clone)]
pub struct CheckInService<G: AnalysisBackend> {
    guard: InputGuard,
    backend: G,
}

impl<G: AnalysisBackend> CheckInService<G> {
    pub fn new(guard: InputGuard, backend: G) -> Self {
        Self { guard, backend }
    }

    /// Run the full pipeline on raw user text.
    pub async fn analyze(&self, raw: &str) -> Result<MoodAnalysis, AppError> {
        let sanitized = self.guard.validate(raw)?;
        tracing::debug!(chars = sanitized.chars().count(), "analyzing sanitized check-in");
        let reply = self.backend.analyze(&sanitized).await?;
        Ok(normalize::normalize(&reply))
    }
}
