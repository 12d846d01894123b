//! Threefold CLI - Database migrations and shop management.
//!
//! # Usage
//!
//! ```bash
//! # Run one service's migrations, or all of them
//! tf-cli migrate shop
//! tf-cli migrate all
//!
//! # Grant the shop admin flag
//! tf-cli shop promote --email owner@example.com
//!
//! # Manage coupons
//! tf-cli shop coupon create --code WELCOME10 --discount 10
//! tf-cli shop coupon deactivate --code WELCOME10
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::Service;

#[derive(Parser)]
#[command(name = "tf-cli")]
#[command(author, version, about = "Threefold CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Manage the shop
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run shop database migrations
    Shop,
    /// Run social database migrations
    Social,
    /// Run to-do database migrations
    Todo,
    /// Run all database migrations
    All,
}

#[derive(Subcommand)]
enum ShopAction {
    /// Grant the admin flag to an existing user
    Promote {
        /// User email address
        #[arg(short, long)]
        email: String,
    },
    /// Manage coupons
    Coupon {
        #[command(subcommand)]
        action: CouponAction,
    },
}

#[derive(Subcommand)]
enum CouponAction {
    /// Create a coupon
    Create {
        /// Coupon code
        #[arg(short, long)]
        code: String,

        /// Discount percentage (1-100)
        #[arg(short, long)]
        discount: i64,

        /// Create the coupon deactivated
        #[arg(long)]
        inactive: bool,
    },
    /// Deactivate a coupon
    Deactivate {
        /// Coupon code
        #[arg(short, long)]
        code: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Shop => commands::migrate::run(Service::Shop).await?,
            MigrateTarget::Social => commands::migrate::run(Service::Social).await?,
            MigrateTarget::Todo => commands::migrate::run(Service::Todo).await?,
            MigrateTarget::All => commands::migrate::all().await?,
        },
        Commands::Shop { action } => match action {
            ShopAction::Promote { email } => {
                commands::shop::promote(&email).await?;
            }
            ShopAction::Coupon { action } => match action {
                CouponAction::Create {
                    code,
                    discount,
                    inactive,
                } => {
                    commands::shop::create_coupon(&code, discount, !inactive).await?;
                }
                CouponAction::Deactivate { code } => {
                    commands::shop::deactivate_coupon(&code).await?;
                }
            },
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_coupon_create() {
        let cli = Cli::try_parse_from([
            "tf-cli", "shop", "coupon", "create", "--code", "SAVE5", "--discount", "5",
            "--inactive",
        ]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Shop {
                action: ShopAction::Coupon {
                    action: CouponAction::Create {
                        discount: 5,
                        inactive: true,
                        ..
                    }
                }
            })
        ));
    }
}
