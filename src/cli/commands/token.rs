use anyhow::{anyhow, Context};
use chrono::Duration;
use clap::Args;
use serde_json::json;

use crate::auth::{generate_session_token, Role, SessionClaims};
use crate::cli::OutputFormat;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(long, help = "User id (session subject)")]
    pub user: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, help = "SUPER_ADMIN, ADMIN or STAFF")]
    pub role: Role,

    #[arg(long, help = "Role tag, e.g. accountant")]
    pub tag: Option<String>,

    #[arg(long, help = "Organization id")]
    pub org: Option<String>,

    #[arg(long, help = "Lifetime in hours (default: SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<i64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &crate::config::config().security;
    let ttl = lifetime(args.hours, security.jwt_expiry_hours)?;

    let claims = SessionClaims::new(args.user, args.email, args.role, args.tag, args.org, ttl)
        .context("cannot build session claims")?;
    let token = generate_session_token(&claims, &security.auth_secret).context("AUTH_SECRET must be set to sign tokens")?;

    match output_format {
        OutputFormat::Json => println!("{}", json!({ "token": token, "claims": claims })),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}

/// Token lifetime from `--hours`, falling back to the configured expiry.
fn lifetime(hours: Option<i64>, default_hours: u64) -> anyhow::Result<Duration> {
    let hours = match hours {
        Some(hours) => hours,
        None => i64::try_from(default_hours).context("SECURITY_JWT_EXPIRY_HOURS is out of range")?,
    };

    if hours <= 0 {
        return Err(anyhow!("token lifetime must be a positive number of hours, got {}", hours));
    }

    Duration::try_hours(hours).ok_or_else(|| anyhow!("token lifetime of {} hours is out of range", hours))
}
