//! CLI entry point for drdreo-blog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drdreo_blog::commands::list::ListKind;
use drdreo_blog::config::BuildMode;
use drdreo_blog::Blog;

#[derive(Parser)]
#[command(name = "drdreo-blog")]
#[command(version)]
#[command(about = "Render Markdown posts into a blog with social-sharing metadata", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new draft post
    New {
        /// Title of the new post
        title: String,

        /// Route slug (derived from the title by default)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Prerender the site into the output directory
    #[command(alias = "g")]
    Generate {
        /// Build mode; drafts are only listed in development
        #[arg(short, long, value_enum, default_value_t = BuildMode::Production)]
        mode: BuildMode,

        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4200")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Build mode; drafts are only listed in development
        #[arg(short, long, value_enum, default_value_t = BuildMode::Development)]
        mode: BuildMode,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the output directory
    Clean,

    /// List posts, tags, or routes
    List {
        /// What to list
        #[arg(value_enum, default_value_t = ListKind::Posts)]
        kind: ListKind,

        /// Build mode; drafts are only listed in development
        #[arg(short, long, value_enum, default_value_t = BuildMode::Production)]
        mode: BuildMode,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "drdreo_blog=debug,info"
    } else {
        "drdreo_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::New { title, slug } => {
            let blog = Blog::new(&base_dir)?;
            let path = drdreo_blog::commands::new::create_post(&blog, &title, slug.as_deref())?;
            println!("Created: {}", path.display());
        }

        Commands::Generate { mode, watch } => {
            let blog = Blog::new(&base_dir)?.with_mode(mode);
            tracing::info!("Generating static files ({} mode)...", mode);
            blog.generate()?;

            if watch {
                drdreo_blog::commands::generate::watch(&blog)?;
            }
        }

        Commands::Server {
            port,
            ip,
            mode,
            open,
            r#static,
        } => {
            let blog = Blog::new(&base_dir)?.with_mode(mode);

            tracing::info!("Generating static files ({} mode)...", mode);
            blog.generate()?;

            drdreo_blog::server::start(&blog, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let blog = Blog::new(&base_dir)?;
            blog.clean()?;
        }

        Commands::List { kind, mode, json } => {
            let blog = Blog::new(&base_dir)?.with_mode(mode);
            drdreo_blog::commands::list::run(&blog, kind, json)?;
        }

        Commands::Version => {
            println!("drdreo-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
