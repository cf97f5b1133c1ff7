use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use nb_board::surfaces::{HtmlSurface, TerminalControl, TerminalSurface};
use nb_board::{ArticleBoard, BoardConfig, GenerationOutcome, LoadOutcome};
use nb_core::messages::GENERATE_LABEL;
use nb_core::{ArticleFeed, CardLayout, DisplaySurface, Error, PreferenceStore, Result};
use nb_feed::{EmbeddedFeed, NewsApi};
use nb_storage::StoreKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod interactive;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse, search and generate news from the terminal", long_about = None)]
pub struct Cli {
    /// Base URL of the news server
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    api_base: String,
    /// Preference file (defaults to the user config directory)
    #[arg(long)]
    prefs: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = StorageArg::File)]
    storage: StorageArg,
    #[arg(long, value_enum, default_value_t = LayoutArg::Compact)]
    layout: LayoutArg,
    /// Request timeout in seconds; no timeout when omitted
    #[arg(long)]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StorageArg {
    File,
    Memory,
}

impl From<StorageArg> for StoreKind {
    fn from(arg: StorageArg) -> Self {
        match arg {
            StorageArg::File => StoreKind::File,
            StorageArg::Memory => StoreKind::Memory,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// Image, heading, description and a read-more link
    Classic,
    /// Heading, summary and a source/date line
    Compact,
}

impl From<LayoutArg> for CardLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Classic => CardLayout::Classic,
            LayoutArg::Compact => CardLayout::Compact,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the news server
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
    },
    /// Interactive board: type to search, `:help` for commands
    Browse {
        /// Read articles from a JSON file instead of the server
        #[arg(long)]
        embedded: Option<PathBuf>,
    },
    /// Render the board page as HTML
    Render {
        #[arg(long)]
        embedded: Option<PathBuf>,
        /// Only show articles matching this term
        #[arg(long)]
        search: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show or flip the stored theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Ask the server for new articles and show them
    Generate {
        #[arg(long)]
        topic: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ThemeAction {
    Show,
    Toggle,
}

fn default_prefs_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("nb").join("preferences.json"))
        .unwrap_or_else(|| PathBuf::from("nb-preferences.json"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct Context {
    config: BoardConfig,
    store: Arc<dyn PreferenceStore>,
    api_base: String,
    timeout: Option<Duration>,
}

impl Context {
    async fn new(cli: &Cli) -> Result<Self> {
        let prefs = cli.prefs.clone().unwrap_or_else(default_prefs_path);
        let store = nb_storage::create_store(cli.storage.into(), Some(prefs.as_path())).await?;
        Ok(Self {
            config: BoardConfig::default().with_layout(cli.layout.into()),
            store,
            api_base: cli.api_base.clone(),
            timeout: cli.timeout.map(Duration::from_secs),
        })
    }

    fn api(&self) -> Result<Arc<NewsApi>> {
        Ok(Arc::new(NewsApi::new(&self.api_base, self.timeout)?))
    }

    async fn feed(&self, embedded: Option<&Path>) -> Result<Arc<dyn ArticleFeed>> {
        match embedded {
            Some(path) => {
                info!("📂 Reading articles from {}", path.display());
                Ok(Arc::new(EmbeddedFeed::from_path(path).await?))
            }
            None => Ok(self.api()?),
        }
    }

    fn board(&self, surface: Arc<dyn DisplaySurface>, feed: Arc<dyn ArticleFeed>) -> ArticleBoard {
        ArticleBoard::new(surface, feed, self.store.clone(), self.config.clone())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { bind } => {
            let state = nb_web::AppState::default().with_layout(cli.layout.into());
            nb_web::serve(*bind, state).await?;
        }
        Commands::Browse { embedded } => {
            let ctx = Context::new(&cli).await?;
            let surface = Arc::new(TerminalSurface::stdout());
            let mut board = ctx.board(surface, ctx.feed(embedded.as_deref()).await?);
            if embedded.is_none() {
                board = board.with_generation(ctx.api()?, Arc::new(TerminalControl::new(GENERATE_LABEL)));
            }
            interactive::browse(Arc::new(board)).await?;
        }
        Commands::Render { embedded, search, out } => {
            let ctx = Context::new(&cli).await?;
            let surface = Arc::new(HtmlSurface::new());
            let board = ctx.board(surface.clone(), ctx.feed(embedded.as_deref()).await?);
            board.start().await;
            if let Some(term) = search {
                board.search(term).await;
            }
            let page = surface.page("AI Nyheter");
            match out {
                Some(path) => {
                    tokio::fs::write(path, page).await?;
                    info!("📝 Wrote board to {}", path.display());
                }
                None => print!("{}", page),
            }
        }
        Commands::Theme { action } => {
            let ctx = Context::new(&cli).await?;
            let board = ctx.board(Arc::new(TerminalSurface::stdout()), Arc::new(EmbeddedFeed::default()));
            let mut theme = board.restore_theme().await;
            if let Some(ThemeAction::Toggle) = action {
                theme = board.toggle_theme().await?;
            }
            println!("{}", theme);
        }
        Commands::Generate { topic } => {
            let ctx = Context::new(&cli).await?;
            let api = ctx.api()?;
            let surface = Arc::new(TerminalSurface::stdout());
            let board = ctx
                .board(surface, api.clone())
                .with_generation(api, Arc::new(TerminalControl::new(GENERATE_LABEL)));
            board.restore_theme().await;
            match board.trigger_generation(topic.as_deref()).await {
                GenerationOutcome::Generated(LoadOutcome::Loaded(count)) => {
                    info!("✅ Showing {} generated articles", count);
                }
                GenerationOutcome::Generated(LoadOutcome::Failed(e)) => return Err(Error::Load(e)),
                GenerationOutcome::Failed(e) => return Err(Error::Generation(e)),
                GenerationOutcome::Busy | GenerationOutcome::Unavailable => {
                    return Err(Error::Generation("generation not possible right now".to_string()))
                }
            }
        }
    }

    Ok(())
}
