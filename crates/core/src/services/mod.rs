//! Business logic services.

#![allow(missing_docs)]

pub mod catalog;
pub mod jobs;
pub mod mapping;
pub mod reconciliation;
pub mod report;
pub mod report_store;
pub mod retry;

pub use catalog::{Location, Symbol, SymbolCategory, list_locations, list_symbols};
pub use jobs::{ReconciliationQueue, ReconciliationWorker};
pub use reconciliation::{ReconciliationService, ReportReconciler};
pub use report::{
    BodyMapPoint, EmotionScale, Frequency, FrequencyValue, Report, ReportCreate, ReportService,
    ReportStatus, ReportUpdate, SafetyFeeling, SafetyThermometer,
};
pub use report_store::{DatabaseReportStore, InMemoryReportStore, ReportStore, SharedReportStore};
pub use retry::RetryConfig;
