use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Identity lookup failed: {0}")]
    IdentityLookup(String),

    #[error("IAM error: {0}")]
    Iam(String),

    #[error("STS error: {0}")]
    Sts(String),

    #[error("Federation endpoint request failed: {0}")]
    Federation(String),

    #[error("No SigninToken in federation response")]
    MissingSigninToken,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Browser launch failed: {0}")]
    BrowserLaunchFailed(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
