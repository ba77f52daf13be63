//! Business logic services for the application layer.

pub mod compliance_service;
pub mod quota_service;
pub mod share_service;
pub mod step_graph_builder;

pub use compliance_service::{ComplianceEvaluator, CompliancePolicy};
pub use quota_service::{DomainQuotaLedger, QuotaPolicy};
pub use share_service::{LEGAL_NOTICE, ShareOutcome, SharePolicy, SharePreview, ShareService};
pub use step_graph_builder::{ActionKeywords, StepGraphBuilder};
