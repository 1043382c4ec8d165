use anyhow::{Context, Result};
use console::{style, Emoji, Term};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use rust_decimal::Decimal;

use tracing::{error, info, warn};

use crate::{
    cli::args::*,
    models::item::{AddItemRequest, LineItem},
    services::{Cart, CheckoutCalculator},
    utils::{
        config::Config,
        formatting::{format_cart_table, format_config, format_money, format_receipt, format_summary},
        validation::{parse_name, parse_position, parse_price, parse_quantity, parse_tender},
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

const MENU_ITEMS: [&str; 4] = [
    "Add product",
    "View cart & pay",
    "Remove product",
    "Exit",
];

pub struct CliApp {
    cart: Cart,
    calculator: CheckoutCalculator,
    config: Config,
    term: Term,
}

impl CliApp {
    pub fn new(config: Config) -> Self {
        Self::with_cart(config, Cart::new())
    }

    pub fn with_cart(config: Config, cart: Cart) -> Self {
        Self {
            cart,
            calculator: CheckoutCalculator::new(config.discount),
            config,
            term: Term::stdout(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn run(&mut self, args: Args) -> Result<()> {
        match args.command {
            None | Some(Commands::Shop) => self.handle_shop(),
            Some(Commands::Checkout { items, tender, format }) => {
                self.handle_checkout_command(items, tender, format)
            }
            Some(Commands::Config { command }) => self.handle_config_command(command),
        }
    }

    // Interactive menu
    fn handle_shop(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();
        info!("Starting interactive shop");

        loop {
            self.term.clear_screen()?;
            println!("{}{}", CART, style("=== MAIN MENU ===").bold().cyan());

            let choice = Select::with_theme(&theme)
                .with_prompt("Choose a menu")
                .items(&MENU_ITEMS)
                .default(0)
                .interact_on(&self.term)?;

            match choice {
                0 => self.handle_add_item(&theme)?,
                1 => self.handle_view_and_pay(&theme)?,
                2 => self.handle_remove_item(&theme)?,
                _ => {
                    println!("\n{}", style("Thank you for shopping!").yellow());
                    info!("Leaving interactive shop");
                    return Ok(());
                }
            }
        }
    }

    fn handle_add_item(&mut self, theme: &ColorfulTheme) -> Result<()> {
        self.term.clear_screen()?;
        println!("{}", style("--- Add Product ---").bold().yellow());

        let name: String = Input::with_theme(theme)
            .with_prompt("Product name")
            .validate_with(|input: &String| parse_name(input).map(|_| ()))
            .interact_text_on(&self.term)?;

        let price_prompt = format!("Price ({})", self.config.currency);
        let price: String = Input::with_theme(theme)
            .with_prompt(&price_prompt)
            .validate_with(|input: &String| parse_price(input).map(|_| ()))
            .interact_text_on(&self.term)?;

        let quantity: String = Input::with_theme(theme)
            .with_prompt("Quantity")
            .validate_with(|input: &String| parse_quantity(input).map(|_| ()))
            .interact_text_on(&self.term)?;

        let request = AddItemRequest::new(
            name,
            parse_price(&price).map_err(anyhow::Error::msg)?,
            parse_quantity(&quantity).map_err(anyhow::Error::msg)?,
        );

        match request.into_line_item() {
            Ok(item) => {
                let name = item.name.clone();
                self.cart.add(item);
                println!("\n{} Product '{}' added!", CHECKMARK, style(name).green());
            }
            Err(e) => {
                println!("\n{} Failed to add product: {}", CROSS, style(&e).red());
                error!("Failed to add product: {}", e);
            }
        }

        self.pause()
    }

    fn handle_view_and_pay(&mut self, theme: &ColorfulTheme) -> Result<()> {
        self.term.clear_screen()?;
        println!("{}", style("=== Shopping Cart ===").bold().cyan());

        if self.cart.is_empty() {
            println!("{} {}", WARNING, style("The cart is still empty.").red());
            return self.pause();
        }

        println!("{}", format_cart_table(self.cart.items()));
        let summary = self.calculator.compute(self.cart.total());
        print!("{}", format_summary(&summary, &self.config.currency));

        let calculator = self.calculator;
        let tender_prompt = format!("Amount paid ({})", self.config.currency);
        let tendered: String = Input::with_theme(theme)
            .with_prompt(&tender_prompt)
            .validate_with(|input: &String| {
                parse_tender(input, summary.discounted_total, &calculator).map(|_| ())
            })
            .interact_text_on(&self.term)?;
        let tendered = parse_tender(&tendered, summary.discounted_total, &calculator)
            .map_err(anyhow::Error::msg)?;

        let receipt = self
            .calculator
            .settle(&mut self.cart, tendered)
            .context("Checkout failed after the tender was accepted")?;

        println!(
            "{}",
            style(format!(
                "Change: {}",
                format_money(&self.config.currency, receipt.change)
            ))
            .yellow()
        );
        println!("{} Payment complete, the cart has been emptied.", CHECKMARK);

        self.pause()
    }

    fn handle_remove_item(&mut self, theme: &ColorfulTheme) -> Result<()> {
        self.term.clear_screen()?;

        if self.cart.is_empty() {
            println!("{} {}", WARNING, style("The cart is empty.").red());
            return self.pause();
        }

        println!("{}", style("=== Shopping Cart ===").bold().cyan());
        println!("{}", format_cart_table(self.cart.items()));

        let size = self.cart.size();
        let position: String = Input::with_theme(theme)
            .with_prompt(format!("Number of the product to remove (1-{})", size))
            .validate_with(|input: &String| parse_position(input, size).map(|_| ()))
            .interact_text_on(&self.term)?;
        let position = parse_position(&position, size).map_err(anyhow::Error::msg)?;

        match self.cart.remove_at(position) {
            Ok(item) => {
                println!("\n{} Product '{}' removed.", CHECKMARK, style(item.name).green());
            }
            Err(e) => {
                println!("\n{} Failed to remove product: {}", CROSS, style(&e).red());
                warn!("Failed to remove product: {}", e);
            }
        }

        self.pause()
    }

    fn pause(&self) -> Result<()> {
        println!("\n{}", style("Press Enter to continue...").dim());
        self.term.read_line()?;
        Ok(())
    }

    // Batch checkout
    fn handle_checkout_command(
        &mut self,
        items: Vec<LineItem>,
        tender: Option<Decimal>,
        format: OutputFormat,
    ) -> Result<()> {
        for item in items {
            self.cart.add(item);
        }

        let tendered = match tender {
            Some(amount) => amount,
            None => self.calculator.compute(self.cart.total()).discounted_total,
        };

        let receipt = match self.calculator.settle(&mut self.cart, tendered) {
            Ok(receipt) => receipt,
            Err(e) => {
                error!("Checkout failed: {}", e);
                return Err(e).context("Checkout failed");
            }
        };

        match format {
            OutputFormat::Table => print!("{}", format_receipt(&receipt, &self.config.currency)),
            OutputFormat::Json => println!(
                "{}",
                serde_json::to_string_pretty(&receipt).context("Failed to serialize receipt")?
            ),
        }

        Ok(())
    }

    // Config Commands
    fn handle_config_command(&self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Show { format } => match format {
                OutputFormat::Table => {
                    println!("{} {}", INFO, style("Configuration").bold().cyan());
                    print!("{}", format_config(&self.config));
                }
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&self.config)
                        .context("Failed to serialize configuration")?
                ),
            },
        }
        Ok(())
    }
}
