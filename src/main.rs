mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigAction, ResolveTarget};
use showcase::db::Database;
use showcase::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("showcase=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if cli.database_url.is_some() { settings.database_url = cli.database_url.clone(); }

    match cli.command {
        Commands::Resolve { target } => match target {
            ResolveTarget::Image { reference } => println!("{}", resolve_image_url(reference.as_str())),
            ResolveTarget::Video { reference } => match classify_video(reference.as_str()) {
                VideoSource::Frame(url) => println!("frame  {url}"),
                VideoSource::Native(url) => println!("native {url}"),
                VideoSource::Missing => println!("(no video)"),
            },
        },
        Commands::ClearCache { prefix } => {
            let db = Database::connect(settings.database_url.as_deref()).await?;
            db.run_migrations().await?;
            let n = db.clear_cache_prefix(prefix.as_deref()).await?;
            println!("Removed {n} cached listing(s)");
        }
        Commands::Config { action } => {
            let app = Showcase::connect(&settings, true).await?;
            let cfg = match action {
                ConfigAction::Show { hydrate } => {
                    if hydrate && !app.hydrate_from_remote().await {
                        if let Some(err) = app.hydration_error().await { eprintln!("warning: {err}"); }
                    }
                    app.config().await
                }
                ConfigAction::SetAgency { name, tagline, logo } => {
                    app.update_agency(AgencyUpdate { name, tagline, logo: logo.map(Some) }).await
                }
                ConfigAction::SetDrive { enabled, api_key, folder_id } => {
                    app.update_drive_config(DriveUpdate { enabled, api_key, folder_id }).await
                }
            };
            println!("{}", serde_json::to_string_pretty(&*cfg)?);
        }
        Commands::Portfolio { filter } => {
            let filter: PortfolioFilter = filter.parse()?;
            let app = Showcase::connect(&settings, true).await?;
            let load = app.portfolio().await;
            let drive = app.config().await.drive.clone();
            if let Some(notice) = &load.notice { eprintln!("notice: {notice}"); }
            println!("source: {:?}", load.origin);
            for item in filter.apply(&load.items) {
                let shown = match item.display_kind() {
                    MediaKind::Video => "video",
                    MediaKind::Image => "image",
                };
                println!("[{shown}] {} | {} | {}", item.title, item.category, resolve_image_url(item.image.as_str()));
                if let Some(link) = item.source_link(&drive) { println!("        open in folder: {link}"); }
            }
        }
    }
    Ok(())
}
