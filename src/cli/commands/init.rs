//! Initialize command.

use console::style;

use crate::config::Settings;

/// Create the database tables if they do not exist yet.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema().await?;

    println!(
        "{} Initialized legalbrief database at {}",
        style("✓").green(),
        ctx.pool().database_url()
    );

    if !settings.llm.has_api_key() {
        println!(
            "{} GOOGLE_API_KEY is not set; add it to your environment or .env file",
            style("!").yellow()
        );
    }

    Ok(())
}
