// CLI interface
use crate::error::Result;
use crate::role::IamRoleStore;
use crate::{browser, console, credentials, identity, role};
use aws_config::{BehaviorVersion, Region};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "aws-console")]
#[command(about = "Open the AWS web console for the current credentials", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Open the browser in incognito/private mode
    #[arg(short, long)]
    pub incognito: bool,

    /// Region for region-specific commands
    #[arg(short, long, default_value = "us-west-2")]
    pub region: String,

    /// Enable verbose/debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn execute(args: Cli) -> Result<()> {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(args.region.clone()))
        .load()
        .await;

    let sts = aws_sdk_sts::Client::new(&config);

    let account_id = identity::resolve_account_id(&sts).await?;
    tracing::debug!("Resolved account {}", account_id);

    let store = IamRoleStore::new(&config);
    role::ensure_role(&store, &account_id).await?;

    let creds = credentials::assume_console_role(&sts, &account_id).await?;
    tracing::debug!(
        "Temporary credentials expire in {} minutes",
        creds.expires_in_minutes()
    );

    let http = reqwest::Client::new();
    let url = console::federated_login_url(&http, &creds).await?;

    eprintln!("Opening AWS Console in browser...");
    eprintln!("  Account: {}", account_id);
    eprintln!("  Role: {}", role::ROLE_NAME);
    eprintln!("  Region: {}", args.region);

    browser::open_url(&url, args.incognito)?;

    eprintln!("✓ Console opened successfully");

    Ok(())
}
