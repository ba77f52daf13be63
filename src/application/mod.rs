//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! compliance scoring, and rate-limit rules. Services consume repository traits
//! and provide a clean API for whatever surface embeds the pipeline.
//!
//! # Available Services
//!
//! - [`services::step_graph_builder::StepGraphBuilder`] - Instruction parsing into step graphs
//! - [`services::compliance_service::ComplianceEvaluator`] - Overlap-policy verdicts
//! - [`services::quota_service::DomainQuotaLedger`] - Per-source-domain rate limiting
//! - [`services::share_service::ShareService`] - Create/preview/redeem orchestration

pub mod services;
