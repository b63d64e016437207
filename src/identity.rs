// Account identity resolution
use crate::error::{ConsoleError, Result};
use aws_sdk_sts::Client as StsClient;

/// Environment variable that short-circuits the identity lookup
pub const ACCOUNT_ID_VAR: &str = "AWS_ACCOUNT_ID";

/// Resolve the AWS account ID for this run
///
/// Priority:
/// 1. `AWS_ACCOUNT_ID` environment variable (no network call)
/// 2. STS GetCallerIdentity
pub async fn resolve_account_id(sts: &StsClient) -> Result<String> {
    if let Ok(account_id) = std::env::var(ACCOUNT_ID_VAR) {
        tracing::debug!("Using account ID from {}", ACCOUNT_ID_VAR);
        return Ok(account_id);
    }

    tracing::debug!("Calling STS GetCallerIdentity");
    let response = sts
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| ConsoleError::IdentityLookup(format!("GetCallerIdentity failed: {}", e)))?;

    response
        .account()
        .map(|s| s.to_string())
        .ok_or_else(|| ConsoleError::IdentityLookup("No account in caller identity".to_string()))
}
