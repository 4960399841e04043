//! Storegate CLI - Drive the session policy from a shell.
//!
//! Browser storage is simulated by a JSON state file holding both scopes, so
//! a sequence of commands behaves like a viewer clicking through the store.
//!
//! # Usage
//!
//! ```bash
//! # Try to buy while logged out (records a pending redirect)
//! sg-cli check purchase
//!
//! # Log in for this browsing session only
//! sg-cli login -e ana@example.com -n "Ana" -r admin
//!
//! # Land on the home page (follows the pending redirect)
//! sg-cli visit /index.html
//!
//! # Close the browser (drops ephemeral storage)
//! sg-cli end-browsing
//! ```
//!
//! # Environment Variables
//!
//! - `STOREGATE_STATE_FILE` - State file path (default: .storegate.json)
//! - `STOREGATE_*_PAGE` - Page paths, see `storegate_core::config`
//! - `RUST_LOG` - Log filter (default: info)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use storegate_core::{GatedAction, PageMap, SessionPolicy};

mod commands;
mod state;

use state::{CliError, StateFile};

#[derive(Parser)]
#[command(name = "sg-cli")]
#[command(author, version, about = "Storegate session policy tools")]
struct Cli {
    /// State file (overrides `STOREGATE_STATE_FILE`)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a session, as the login page does after a successful login
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`user`, `admin`)
        #[arg(short, long, default_value = "user")]
        role: String,

        /// Keep the session across browser restarts
        #[arg(long)]
        remember: bool,
    },
    /// Clear the session from both scopes
    Logout,
    /// Show the current session
    Whoami,
    /// Show the navigation bar model as JSON
    Nav,
    /// Evaluate a gated action
    Check {
        #[arg(value_enum)]
        action: ActionArg,
    },
    /// Load a page: run its guard, then the page-load redirects
    Visit {
        /// Location, e.g. `/index.html`
        location: String,
    },
    /// Close the browser, dropping ephemeral storage
    EndBrowsing,
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    /// View a page that needs a logged-in viewer
    ProtectedPage,
    /// View an inventory management page
    AdminPage,
    /// Start checkout
    Purchase,
}

impl From<ActionArg> for GatedAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::ProtectedPage => Self::ViewProtectedPage,
            ActionArg::AdminPage => Self::ViewAdminPage,
            ActionArg::Purchase => Self::PerformPurchase,
        }
    }
}

fn main() {
    // Defaults to info level if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sg_cli=info,storegate_core=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let pages = PageMap::from_env()?;
    let state = cli.state_file.map_or_else(StateFile::from_env, StateFile::new);
    let policy = SessionPolicy::with_pages(state.load()?, pages)?;

    match cli.command {
        Commands::Login {
            email,
            name,
            role,
            remember,
        } => commands::session::login(&policy, &email, &name, &role, remember)?,
        Commands::Logout => commands::session::logout(&policy),
        Commands::Whoami => commands::session::whoami(&policy),
        Commands::Nav => commands::access::nav(&policy)?,
        Commands::Check { action } => {
            commands::access::check(&policy, action.into());
        }
        Commands::Visit { location } => {
            commands::access::visit(&policy, &location);
        }
        Commands::EndBrowsing => commands::session::end_browsing(&policy),
    }

    state.save(policy.store())
}
