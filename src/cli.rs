use clap::{Parser, Subcommand};

/// Developer CLI for inspecting and editing the site content
#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Manage site configuration, resolve media links and sync the portfolio", long_about = None)]
pub struct Cli {
    /// Database URL (defaults to the SQLite file in the user data dir)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or edit the stored site configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Load the portfolio (remote folder with fallback)
    Portfolio {
        /// Only show one media type (all, image, video)
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Resolve a media reference
    Resolve {
        #[command(subcommand)]
        target: ResolveTarget,
    },
    /// Drop cached portfolio listings
    ClearCache {
        /// Only drop keys with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as JSON
    Show {
        /// Try the remote content URL first
        #[arg(long)]
        hydrate: bool,
    },
    /// Update agency branding
    SetAgency {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        tagline: Option<String>,
        /// Logo link (drive share links are accepted); empty clears it
        #[arg(long)]
        logo: Option<String>,
    },
    /// Update remote folder sync settings
    SetDrive {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        folder_id: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ResolveTarget {
    /// Direct image URL
    Image { reference: String },
    /// Embeddable video URL
    Video { reference: String },
}
