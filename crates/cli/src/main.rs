//! CHAMP CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! champ-cli migrate
//!
//! # Create an admin user (password from CHAMP_USER_PASSWORD or stdin)
//! champ-cli user create -e admin@example.com -n "Admin Name" -r admin
//!
//! # Load products from YAML, replacing the current catalog
//! champ-cli seed products -f products.yaml --clear
//!
//! # Set a site setting
//! champ-cli settings set whatsappNumber 919876543210
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "champ-cli")]
#[command(author, version, about = "CHAMP CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Seed the database from files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage site settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role (`admin` or `user`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert products from a YAML file
    Products {
        /// Path to the YAML file
        #[arg(short, long)]
        file: String,

        /// Delete all existing products first
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Insert or replace one setting
    Set {
        /// Setting key (e.g. `whatsappNumber`)
        key: String,

        /// Setting value
        value: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::User { action } => match action {
            UserAction::Create { email, name, role } => {
                commands::user::create_user(&email, &name, &role).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Products { file, clear } => {
                commands::seed::products(&file, clear).await?;
            }
        },
        Commands::Settings { action } => match action {
            SettingsAction::Set { key, value } => {
                commands::settings::set(&key, &value).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_user_create() {
        let cli = Cli::try_parse_from([
            "champ-cli", "user", "create", "-e", "a@b.co", "-n", "Admin", "-r", "user",
        ])
        .map_err(|e| e.to_string());
        let Ok(Cli {
            command: Commands::User {
                action: UserAction::Create { email, name, role },
            },
        }) = cli
        else {
            panic!("unexpected parse result");
        };
        assert_eq!(email, "a@b.co");
        assert_eq!(name, "Admin");
        assert_eq!(role, "user");
    }

    #[test]
    fn test_seed_clear_defaults_to_false() {
        let Ok(Cli {
            command: Commands::Seed {
                target: SeedTarget::Products { file, clear },
            },
        }) = Cli::try_parse_from(["champ-cli", "seed", "products", "-f", "p.yaml"])
        else {
            panic!("unexpected parse result");
        };
        assert_eq!(file, "p.yaml");
        assert!(!clear);
    }
}
