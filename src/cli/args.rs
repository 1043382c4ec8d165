use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::{models::item::LineItem, utils::validation::parse_item_spec};

#[derive(Parser)]
#[command(name = "market")]
#[command(about = "An interactive shopping cart with threshold discounts and change calculation")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive shop when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive shopping menu
    Shop,
    /// Check out a list of items in one go
    Checkout {
        /// Item as NAME:PRICE:QTY, repeatable
        #[arg(short, long = "item", required = true, value_parser = parse_item_spec)]
        items: Vec<LineItem>,
        /// Amount paid, defaults to the exact amount due
        #[arg(short, long, value_parser = parse_tender_arg)]
        tender: Option<Decimal>,
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn parse_tender_arg(input: &str) -> Result<Decimal, String> {
    let amount = Decimal::from_str(input.trim())
        .map_err(|_| format!("'{}' is not a valid amount", input.trim()))?;
    if amount < Decimal::ZERO {
        return Err("Tender must not be negative".to_string());
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_shop() {
        let args = Args::try_parse_from(["market"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_checkout() {
        let args = Args::try_parse_from([
            "market",
            "-v",
            "checkout",
            "--item",
            "Rice:15000:1",
            "--item",
            "Oil:10000:1",
            "--tender",
            "20000",
            "--format",
            "json",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Some(Commands::Checkout { items, tender, format }) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].name, "Oil");
                assert_eq!(tender, Some(dec!(20000)));
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("expected checkout command"),
        }
    }

    #[test]
    fn test_checkout_rejects_bad_item() {
        assert!(Args::try_parse_from(["market", "checkout", "--item", "Rice:0:1"]).is_err());
        assert!(Args::try_parse_from(["market", "checkout"]).is_err());
        assert!(
            Args::try_parse_from(["market", "checkout", "-i", "Rice:1:1", "-t", "-5"]).is_err()
        );
    }
}
