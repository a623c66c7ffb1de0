//! Compliance API interface

use crate::{types::*, Result};
use async_trait::async_trait;

/// Operations offered by the compliance API
///
/// Each call is a single round trip: no retries, no caching.
#[async_trait]
pub trait ComplianceApi: Send + Sync {
    /// Request authorization for a partner to access a user's data
    async fn authorize_data_request(
        &self,
        partner_id: &str,
        user_id: &str,
        purpose: &str,
    ) -> Result<AuthorizationResult>;

    /// Fetch all audit log entries, in server order
    async fn get_audit_logs(&self) -> Result<Vec<AuditLogEntry>>;

    /// Fetch audit log entries for one user, in server order
    async fn get_user_audit_logs(&self, user_id: &str) -> Result<Vec<AuditLogEntry>>;

    /// Fetch data-sharing policies, in server order
    async fn get_policies(&self) -> Result<Vec<Policy>>;
}
