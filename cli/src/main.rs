mod commands;
mod config;
mod inference;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    cmd_clear_history, cmd_favorite, cmd_generate, cmd_history, cmd_ingredient_add,
    cmd_ingredient_clear, cmd_ingredient_list, cmd_ingredient_remove, cmd_rate, cmd_show,
    cmd_theme,
};
use crate::config::Config;
use crate::inference::HuggingFaceClient;
use sous_core::coordinator::RequestCoordinator;
use sous_core::generation::GenerationClient;
use sous_core::ledger::HistoryLedger;
use sous_core::store::PersistentStore;

#[derive(Parser)]
#[command(
    name = "sous",
    version,
    about = "Turn the ingredients you have into a recipe",
    long_about = "\n
   ___  ___  _   _ ___
  / __|/ _ \\| | | / __|
  \\__ \\ (_) | |_| \\__ \\
  |___/\\___/ \\___/|___/
   what's for dinner?

Collect ingredients with `sous ingredient add`, then run `sous generate`.
Set HF_ACCESS_TOKEN (or put it in a .env file) to reach the model.
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the ingredients for your next recipe
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommands,
    },
    /// Generate a recipe from your ingredients
    Generate {
        /// Dietary preference (repeatable): vegetarian, vegan, gluten-free,
        /// low-carb, dairy-free, nut-free
        #[arg(short, long = "diet", value_name = "DIET")]
        diets: Vec<String>,
        /// Cuisine style: italian, asian, mexican, indian, mediterranean,
        /// american, french, surprise (default: any)
        #[arg(short, long)]
        cuisine: Option<String>,
        /// Extra ingredient for this request only (repeatable)
        #[arg(short, long = "ingredient", value_name = "NAME")]
        ingredients: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List generated recipes, newest first
    History {
        /// Only show favorites
        #[arg(short, long)]
        favorites: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a saved recipe
    Show {
        /// Recipe ID (or a unique prefix)
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rate a saved recipe from 0 (unrated) to 5 stars
    Rate {
        /// Recipe ID (or a unique prefix)
        id: String,
        /// Rating, 0-5
        rating: u8,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a saved recipe as favorite
    Favorite {
        /// Recipe ID (or a unique prefix)
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete all saved recipes
    ClearHistory {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or set the display theme
    Theme {
        /// Theme to switch to
        mode: Option<ThemeMode>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Address to bind to (default: 127.0.0.1, use 0.0.0.0 to expose to network)
        #[arg(short, long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[derive(Subcommand)]
enum IngredientCommands {
    /// Add one or more ingredients
    Add {
        /// Ingredient names
        #[arg(required = true)]
        names: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove an ingredient by list number, ID, or name
    Remove {
        /// List number, ID, or name
        ingredient: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List your ingredients
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove all ingredients
    Clear {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeMode {
    Dark,
    Light,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if matches!(cli.command, Commands::Serve { .. }) {
        "sous=info,sous_core=info"
    } else {
        "warn"
    };
    init_logging(default_filter);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr so `--json` output on stdout stays parseable. `RUST_LOG`
/// overrides the default filter.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_coordinator(config: &Config, store: &PersistentStore) -> Result<RequestCoordinator> {
    let provider = HuggingFaceClient::new(&config.inference)?;
    let client = GenerationClient::new(Arc::new(provider), config.inference.retry_policy());
    Ok(RequestCoordinator::new(
        client,
        HistoryLedger::load(store.clone()),
    ))
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let store = config.open_store()?;

    match cli.command {
        Commands::Ingredient { command } => match command {
            IngredientCommands::Add { names, json } => cmd_ingredient_add(&store, &names, json),
            IngredientCommands::Remove { ingredient, json } => {
                cmd_ingredient_remove(&store, &ingredient, json)
            }
            IngredientCommands::List { json } => cmd_ingredient_list(&store, json),
            IngredientCommands::Clear { json } => cmd_ingredient_clear(&store, json),
        },
        Commands::Generate {
            diets,
            cuisine,
            ingredients,
            json,
        } => {
            let coord = build_coordinator(&config, &store)?;
            cmd_generate(
                &coord,
                &store,
                &config.inference,
                &diets,
                cuisine.as_deref(),
                &ingredients,
                json,
            )
            .await
        }
        Commands::History { favorites, json } => {
            cmd_history(&build_coordinator(&config, &store)?, favorites, json)
        }
        Commands::Show { id, json } => cmd_show(&build_coordinator(&config, &store)?, &id, json),
        Commands::Rate { id, rating, json } => {
            cmd_rate(&build_coordinator(&config, &store)?, &id, rating, json)
        }
        Commands::Favorite { id, json } => {
            cmd_favorite(&build_coordinator(&config, &store)?, &id, json)
        }
        Commands::ClearHistory { yes, json } => {
            cmd_clear_history(&build_coordinator(&config, &store)?, yes, json)
        }
        Commands::Theme { mode, json } => {
            cmd_theme(&store, mode.map(|m| matches!(m, ThemeMode::Dark)), json)
        }
        Commands::Serve { port, bind } => {
            let coord = Arc::new(build_coordinator(&config, &store)?);
            if config.inference.access_token.is_none() {
                tracing::warn!("HF_ACCESS_TOKEN is not set; recipe requests will fail");
            }
            server::start_server(coord, store, port, &bind).await
        }
    }
}
