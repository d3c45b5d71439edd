//! Web server command.

use std::net::SocketAddr;

use console::style;

use crate::config::Settings;

/// Port used when the bind address names only a host.
const DEFAULT_PORT: u16 = 5000;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind);
    let addr: SocketAddr = tokio::net::lookup_host((host.as_str(), port))
        .await?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Could not resolve bind address {}", bind))?;

    // Create tables first
    println!("{} Preparing database...", style("→").cyan());
    let ctx = settings.create_db_context();
    match ctx.init_schema().await {
        Ok(()) => {
            println!("  {} Database ready", style("✓").green());
        }
        Err(e) => {
            eprintln!("  {} Schema setup failed: {}", style("✗").red(), e);
            return Err(anyhow::anyhow!("Database setup failed: {}", e));
        }
    }

    if !settings.llm.has_api_key() {
        println!(
            "{} GOOGLE_API_KEY is not set; /simplify and /ask will fail",
            style("!").yellow()
        );
    }

    println!(
        "{} Starting legalbrief server at http://{}",
        style("→").cyan(),
        addr
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, addr).await
}

/// Parse a bind address that can be:
/// - Just a port: "5000" -> 127.0.0.1:5000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:5000
/// - Host and port: "0.0.0.0:5000" -> 0.0.0.0:5000
fn parse_bind_address(bind: &str) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), DEFAULT_PORT)
}
