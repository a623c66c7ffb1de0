//! Dashboard data loading

use crate::{api::ComplianceApi, types::*, Result};
use tracing::{info, warn};

/// Outcome of loading the dashboard; each list succeeds or fails on its own
#[derive(Debug)]
pub struct DashboardSnapshot {
    /// Audit log fetch outcome
    pub audit_logs: Result<Vec<AuditLogEntry>>,
    /// Policy fetch outcome
    pub policies: Result<Vec<Policy>>,
}

impl DashboardSnapshot {
    /// Both lists loaded
    pub fn is_complete(&self) -> bool {
        self.audit_logs.is_ok() && self.policies.is_ok()
    }

    /// Audit logs, or an empty slice when the fetch failed
    pub fn audit_logs_or_empty(&self) -> &[AuditLogEntry] {
        self.audit_logs.as_deref().unwrap_or(&[])
    }

    /// Policies, or an empty slice when the fetch failed
    pub fn policies_or_empty(&self) -> &[Policy] {
        self.policies.as_deref().unwrap_or(&[])
    }
}

/// Fetch audit logs and policies concurrently
///
/// Dropping the returned future abandons both requests.
pub async fn load_dashboard<A>(api: &A) -> DashboardSnapshot
where
    A: ComplianceApi + ?Sized,
{
    let (audit_logs, policies) = tokio::join!(api.get_audit_logs(), api.get_policies());

    if let Err(e) = &audit_logs {
        warn!("Dashboard audit logs unavailable: {}", e);
    }
    if let Err(e) = &policies {
        warn!("Dashboard policies unavailable: {}", e);
    }

    let snapshot = DashboardSnapshot { audit_logs, policies };
    info!(
        "Dashboard loaded: {} audit entries, {} policies",
        snapshot.audit_logs_or_empty().len(),
        snapshot.policies_or_empty().len()
    );
    snapshot
}
