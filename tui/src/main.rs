//! Folio TUI Entry Point
//!
//! Usage:
//!   folio [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>   Configuration file (default: <config dir>/folio/config.toml)
//!   -r, --roles <LIST>    Comma separated roles for the rotator
//!       --no-persist      Keep the theme choice in memory only
//!
//! Logs go to `<cache dir>/folio/folio.log`, filtered by `RUST_LOG`.

use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::config::split_roles;
use folio_core::{FolioConfig, Portfolio};
use folio_tui::App;

/// Folio - a terminal portfolio with a typewriter role rotator
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "FOLIO_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Roles to rotate through, comma separated
    #[arg(short = 'r', long, value_name = "LIST")]
    roles: Option<String>,

    /// Do not write the theme preference to disk
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // The terminal is ours; logs go to a file
    init_logging();

    // Resolve everything that can fail before touching the terminal
    let mut config = FolioConfig::resolve(args.config.as_deref())?;
    if let Some(roles) = &args.roles {
        config.rotator.roles = split_roles(roles);
    }
    if args.no_persist {
        config.no_persist = true;
    }
    config.validate()?;
    let portfolio = Portfolio::load_or_builtin(config.content.as_deref())?;

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: folio requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Piped stdin/stdout");
        eprintln!("  • SSH without -t flag");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &config, portfolio).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &FolioConfig,
    portfolio: Portfolio,
) -> anyhow::Result<()> {
    let size = crossterm::terminal::size()?;
    let mut app = App::new(config, portfolio, size)?;
    app.run(terminal).await?;
    tracing::info!("bye");
    Ok(())
}

/// File logging under the platform cache dir. Without a writable location
/// logging stays off.
fn init_logging() {
    let Some(dir) = dirs::cache_dir().map(|d| d.join("folio")) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(log_file) = File::create(dir.join("folio.log")) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .with(EnvFilter::from_default_env())
        .init();
}
