// Console-access role provisioning
use crate::error::{ConsoleError, Result};
use async_trait::async_trait;
use aws_sdk_iam::error::SdkError;
use aws_sdk_iam::operation::get_role::GetRoleError;
use aws_sdk_iam::Client as IamClient;
use serde_json::json;

/// Fixed name of the console-access role assumed for federation
pub const ROLE_NAME: &str = "StsConsoleAccess";

/// Name of the inline policy attached to the role
const ADMIN_POLICY_NAME: &str = "Admin";

/// Administrator-equivalent inline policy document
pub fn admin_policy_document() -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Effect": "Allow",
                "Action": "*",
                "Resource": "*"
            }
        ]
    })
    .to_string()
}

/// Trust policy allowing principals in the account to assume the role
pub fn trust_policy_document(account_id: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "",
                "Effect": "Allow",
                "Principal": {
                    "AWS": format!("arn:aws:iam::{}:root", account_id)
                },
                "Action": "sts:AssumeRole"
            }
        ]
    })
    .to_string()
}

/// IAM role operations needed to provision the console-access role
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleStore {
    /// Whether the named role exists. NoSuchEntity is a normal negative,
    /// any other service error is fatal.
    async fn role_exists(&self, role_name: &str) -> Result<bool>;

    async fn create_role(&self, role_name: &str, trust_policy: &str) -> Result<()>;

    async fn put_role_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        policy_document: &str,
    ) -> Result<()>;
}

/// Map a GetRole failure onto the existence check result
///
/// NoSuchEntity means the role is absent (a normal negative); every other
/// failure, service error or not, is fatal.
fn classify_get_role_error<R>(err: SdkError<GetRoleError, R>) -> Result<bool> {
    if err
        .as_service_error()
        .map(|e| e.is_no_such_entity_exception())
        .unwrap_or(false)
    {
        Ok(false)
    } else {
        Err(ConsoleError::Iam(format!("GetRole failed: {}", err)))
    }
}

/// `RoleStore` backed by the AWS IAM SDK client
pub struct IamRoleStore {
    client: IamClient,
}

impl IamRoleStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: IamClient::new(config),
        }
    }
}

#[async_trait]
impl RoleStore for IamRoleStore {
    async fn role_exists(&self, role_name: &str) -> Result<bool> {
        match self.client.get_role().role_name(role_name).send().await {
            Ok(_) => Ok(true),
            Err(err) => classify_get_role_error(err),
        }
    }

    async fn create_role(&self, role_name: &str, trust_policy: &str) -> Result<()> {
        self.client
            .create_role()
            .role_name(role_name)
            .assume_role_policy_document(trust_policy)
            .send()
            .await
            .map_err(|e| ConsoleError::Iam(format!("CreateRole failed: {}", e)))?;
        Ok(())
    }

    async fn put_role_policy(
        &self,
        role_name: &str,
        policy_name: &str,
        policy_document: &str,
    ) -> Result<()> {
        self.client
            .put_role_policy()
            .role_name(role_name)
            .policy_name(policy_name)
            .policy_document(policy_document)
            .send()
            .await
            .map_err(|e| ConsoleError::Iam(format!("PutRolePolicy failed: {}", e)))?;
        Ok(())
    }
}

/// Create the console-access role if it does not exist yet
///
/// Idempotent: once the role exists, repeated calls issue no write calls.
pub async fn ensure_role(store: &dyn RoleStore, account_id: &str) -> Result<()> {
    if store.role_exists(ROLE_NAME).await? {
        tracing::debug!("Role {} already exists", ROLE_NAME);
        return Ok(());
    }

    tracing::info!("Creating role {}", ROLE_NAME);
    store
        .create_role(ROLE_NAME, &trust_policy_document(account_id))
        .await?;
    store
        .put_role_policy(ROLE_NAME, ADMIN_POLICY_NAME, &admin_policy_document())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_iam::types::error::{NoSuchEntityException, ServiceFailureException};

    #[test]
    fn test_get_role_not_found_means_absent() {
        let err = SdkError::service_error(
            GetRoleError::NoSuchEntityException(
                NoSuchEntityException::builder()
                    .message("role StsConsoleAccess does not exist")
                    .build(),
            ),
            (),
        );
        assert!(!classify_get_role_error(err).unwrap());
    }

    #[test]
    fn test_get_role_other_service_error_is_fatal() {
        let err = SdkError::service_error(
            GetRoleError::ServiceFailureException(ServiceFailureException::builder().build()),
            (),
        );
        let err = classify_get_role_error(err).unwrap_err();
        assert!(matches!(err, ConsoleError::Iam(_)));
    }

    #[test]
    fn test_get_role_dispatch_error_is_fatal() {
        let err = SdkError::<GetRoleError, ()>::timeout_error("request timed out");
        let err = classify_get_role_error(err).unwrap_err();
        assert!(matches!(err, ConsoleError::Iam(_)));
    }

    #[test]
    fn test_trust_policy_embeds_account() {
        let doc = trust_policy_document("123456789012");
        let parsed: serde_json::Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(
            parsed["Statement"][0]["Principal"]["AWS"],
            "arn:aws:iam::123456789012:root"
        );
        assert_eq!(parsed["Statement"][0]["Action"], "sts:AssumeRole");
    }

    #[test]
    fn test_admin_policy_is_admin_equivalent() {
        let parsed: serde_json::Value =
            serde_json::from_str(&admin_policy_document()).unwrap();
        assert_eq!(parsed["Statement"][0]["Effect"], "Allow");
        assert_eq!(parsed["Statement"][0]["Action"], "*");
        assert_eq!(parsed["Statement"][0]["Resource"], "*");
    }

    #[tokio::test]
    async fn test_ensure_role_noop_when_role_exists() {
        let mut store = MockRoleStore::new();
        store
            .expect_role_exists()
            .withf(|name| name == ROLE_NAME)
            .returning(|_| Ok(true));
        store.expect_create_role().times(0);
        store.expect_put_role_policy().times(0);

        ensure_role(&store, "123456789012").await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_role_creates_missing_role() {
        let mut store = MockRoleStore::new();
        store.expect_role_exists().returning(|_| Ok(false));
        store
            .expect_create_role()
            .withf(|name, trust| name == ROLE_NAME && trust.contains("123456789012"))
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_put_role_policy()
            .withf(|name, policy_name, _| name == ROLE_NAME && policy_name == "Admin")
            .times(1)
            .returning(|_, _, _| Ok(()));

        ensure_role(&store, "123456789012").await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_role_propagates_lookup_error() {
        let mut store = MockRoleStore::new();
        store
            .expect_role_exists()
            .returning(|_| Err(ConsoleError::Iam("GetRole failed: access denied".into())));
        store.expect_create_role().times(0);

        let err = ensure_role(&store, "123456789012").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Iam(_)));
    }
}
