use crate::cli::OutputFormat;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = crate::config::config();

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => {
            println!("environment:     {:?}", config.environment);
            println!("port:            {}", config.server.port);
            println!("database:        {}", if config.database.url.is_some() { "configured" } else { "not set" });
            println!("auth secret:     {}", if config.security.auth_secret.is_empty() { "not set" } else { "set" });
            println!("auth provider:   {}", config.security.auth_url.as_deref().unwrap_or("not set"));
            println!("session cookie:  {}", config.security.session_cookie_name);
            println!("audit logging:   {}", config.security.enable_audit_logging);
        }
    }
    Ok(())
}
