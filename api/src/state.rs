use std::sync::Arc;

use mindtrack_core::history::{FileStore, HistoryStore};
use tokio::sync::Mutex;

use crate::checkin::CheckInService;
use crate::gateway::AnalysisGateway;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CheckInService<AnalysisGateway>>,
    /// Append/clear are an atomic read-modify-write behind this lock; there
    /// are no other writers.
    pub history: Arc<Mutex<HistoryStore<FileStore>>>,
}
