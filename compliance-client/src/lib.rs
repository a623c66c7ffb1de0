//! # FinTrust Compliance Client
//!
//! Typed access layer over the FinTrust compliance API:
//! - Authorization requests for partner data access
//! - Audit log retrieval (all users or a single user)
//! - Data-sharing policy retrieval
//! - Concurrent dashboard loading
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │     Hosts (dashboard loader, fintrust CLI)   │
//! └──────────────────────┬───────────────────────┘
//!                        │ ComplianceApi
//!              ┌─────────▼──────────┐
//!              │  ComplianceClient  │
//!              └─────────┬──────────┘
//!                        │ one HTTP round trip per call
//!     ┌──────────────┬───┴──────────┬──────────────┐
//! ┌───▼──────┐ ┌─────▼────┐ ┌───────▼──────┐ ┌─────▼─────┐
//! │POST      │ │GET /logs │ │GET           │ │GET        │
//! │/authorize│ │          │ │/logs/{user}  │ │/policies  │
//! └──────────┘ └──────────┘ └──────────────┘ └───────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod metrics;
pub mod types;

pub use api::ComplianceApi;
pub use client::ComplianceClient;
pub use config::ClientConfig;
pub use dashboard::{load_dashboard, DashboardSnapshot};
pub use error::{Error, Result};
pub use types::{AuditLogEntry, AuthorizationRequest, AuthorizationResult, Policy};

/// Default compliance API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "COMPLIANCE_API_BASE_URL";

/// Environment variable setting a request timeout (seconds)
pub const TIMEOUT_ENV: &str = "COMPLIANCE_API_TIMEOUT_SECONDS";

/// Environment variable naming a TOML config file for the CLI
pub const CONFIG_PATH_ENV: &str = "COMPLIANCE_CLIENT_CONFIG";
