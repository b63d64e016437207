// Temporary credentials via STS AssumeRole
use crate::error::{ConsoleError, Result};
use crate::models::RoleCredentials;
use crate::role::ROLE_NAME;
use aws_sdk_sts::Client as StsClient;
use chrono::{TimeZone, Utc};

const SESSION_NAME: &str = "AssumeRoleSession";

/// ARN of the console-access role in the given account
pub fn console_role_arn(account_id: &str) -> String {
    format!("arn:aws:iam::{}:role/{}", account_id, ROLE_NAME)
}

/// Assume the console-access role and return its temporary credentials
pub async fn assume_console_role(sts: &StsClient, account_id: &str) -> Result<RoleCredentials> {
    let role_arn = console_role_arn(account_id);
    tracing::debug!("Assuming role {}", role_arn);

    let response = sts
        .assume_role()
        .role_arn(&role_arn)
        .role_session_name(SESSION_NAME)
        .send()
        .await
        .map_err(|e| ConsoleError::Sts(format!("AssumeRole failed: {}", e)))?;

    let creds = response
        .credentials()
        .ok_or_else(|| ConsoleError::Sts("No credentials in AssumeRole response".to_string()))?;

    let expiration_ms = creds
        .expiration()
        .to_millis()
        .map_err(|e| ConsoleError::Sts(format!("Invalid credential expiration: {}", e)))?;
    let expiration = Utc
        .timestamp_millis_opt(expiration_ms)
        .single()
        .ok_or_else(|| ConsoleError::Sts("Invalid expiration timestamp".to_string()))?;

    Ok(RoleCredentials {
        access_key_id: creds.access_key_id().to_string(),
        secret_access_key: creds.secret_access_key().to_string(),
        session_token: creds.session_token().to_string(),
        expiration,
    })
}
