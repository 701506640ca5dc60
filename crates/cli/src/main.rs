//! Order Desk CLI - database migrations and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! od-cli migrate
//!
//! # Create a login account
//! od-cli user create -n "Ada" -e ada@example.com -p s3cret
//!
//! # Send the order-confirmation template to a phone number
//! od-cli notify test -t +15550100
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `user create` - Create a user row for login
//! - `notify test` - Send one confirmation message and log the provider outcome

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "od-cli")]
#[command(author, version, about = "Order Desk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage login users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Check the WhatsApp notification setup
    Notify {
        #[command(subcommand)]
        action: NotifyAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address (login identifier)
        #[arg(short, long)]
        email: String,

        /// Password (stored as given)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum NotifyAction {
    /// Send the configured template once
    Test {
        /// Recipient phone number, in international format
        #[arg(short, long)]
        to: String,

        /// Order ID passed along with the message
        #[arg(long, default_value_t = 0)]
        order_id: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create {
                name,
                email,
                password,
            } => {
                commands::user::create(&name, &email, &password).await?;
            }
        },
        Commands::Notify { action } => match action {
            NotifyAction::Test { to, order_id } => commands::notify::test(&to, order_id).await?,
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_user_create() {
        let cli = Cli::try_parse_from([
            "od-cli", "user", "create", "-n", "Ada", "-e", "ada@example.com", "-p", "pw",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::User {
                action: UserAction::Create { .. }
            })
        ));
    }

    #[test]
    fn test_parse_notify_defaults_order_id() {
        let cli = Cli::try_parse_from(["od-cli", "notify", "test", "-t", "+100"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Notify {
                action: NotifyAction::Test { order_id: 0, .. }
            })
        ));
    }
}
