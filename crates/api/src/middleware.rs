//! Shared application state.

use areyousafe_core::ReportService;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Report submission and triage.
    pub report_service: ReportService,
}

impl AppState {
    /// Create the state handed to every handler.
    #[must_use]
    pub const fn new(report_service: ReportService) -> Self {
        Self { report_service }
    }
}
