use console::style;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::{
    models::{
        item::LineItem,
        receipt::{CheckoutSummary, Receipt},
    },
    utils::config::Config,
};

#[derive(Tabled)]
struct CartTableRow {
    #[tabled(rename = "No")]
    position: usize,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Price")]
    unit_price: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Subtotal")]
    subtotal: String,
}

/// Amounts are shown with zero decimal places. Display only.
pub fn format_amount(amount: Decimal) -> String {
    amount.round_dp(0).to_string()
}

pub fn format_money(currency: &str, amount: Decimal) -> String {
    format!("{} {}", currency, format_amount(amount))
}

pub fn format_cart_table(items: &[LineItem]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<CartTableRow> = items
        .iter()
        .enumerate()
        .map(|(index, item)| CartTableRow {
            position: index + 1,
            name: if item.name.chars().count() > 25 {
                format!("{}...", item.name.chars().take(22).collect::<String>())
            } else {
                item.name.clone()
            },
            unit_price: format_amount(item.unit_price),
            quantity: item.quantity,
            subtotal: format_amount(item.subtotal()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()));

    table.to_string()
}

pub fn format_summary(summary: &CheckoutSummary, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}\n",
        style(format!("Total: {}", format_money(currency, summary.total))).cyan()
    ));

    if summary.has_discount() {
        output.push_str(&format!(
            "{}\n",
            style(format!("Discount: {}", format_money(currency, summary.discount))).yellow()
        ));
    }

    output.push_str(&format!(
        "{}\n",
        style(format!(
            "Total after discount: {}",
            format_money(currency, summary.discounted_total)
        ))
        .green()
        .bold()
    ));

    output
}

pub fn format_receipt(receipt: &Receipt, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format_cart_table(&receipt.items));
    output.push('\n');
    output.push_str(&format_summary(&receipt.summary, currency));
    output.push_str(&format!(
        "Paid: {}\n",
        format_money(currency, receipt.tendered)
    ));
    output.push_str(&format!(
        "{}\n",
        style(format!("Change: {}", format_money(currency, receipt.change))).yellow()
    ));

    output
}

pub fn format_config(config: &Config) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}: {}\n", style("Environment").bold(), config.environment));
    output.push_str(&format!("{}: {}\n", style("Log level").bold(), config.log_level));
    output.push_str(&format!("{}: {}\n", style("Currency").bold(), config.currency));
    output.push_str(&format!(
        "{}: {}\n",
        style("Discount threshold").bold(),
        format_money(&config.currency, config.discount.threshold)
    ));
    output.push_str(&format!(
        "{}: {}%\n",
        style("Discount rate").bold(),
        (config.discount.rate * Decimal::ONE_HUNDRED).normalize()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount_drops_decimals() {
        assert_eq!(format_amount(dec!(4000.00)), "4000");
        assert_eq!(format_amount(dec!(25000)), "25000");
        assert_eq!(format_amount(dec!(0)), "0");
        assert_eq!(format_money("Rp", dec!(16000.0)), "Rp 16000");
    }

    #[test]
    fn test_empty_table_is_blank() {
        assert!(format_cart_table(&[]).is_empty());
    }

    #[test]
    fn test_table_lists_items_in_order() {
        let items = vec![
            LineItem::new("Rice", dec!(15000), 2),
            LineItem::new("Oil", dec!(10000), 1),
        ];
        let table = format_cart_table(&items);

        assert!(table.contains("Product"));
        assert!(table.contains("30000"));
        let rice = table.find("Rice").unwrap();
        let oil = table.find("Oil").unwrap();
        assert!(rice < oil);
    }

    #[test]
    fn test_summary_hides_zero_discount() {
        let summary = CheckoutSummary {
            total: dec!(100),
            discount: Decimal::ZERO,
            discounted_total: dec!(100),
        };
        let output = format_summary(&summary, "Rp");
        assert!(!output.contains("Discount:"));
        assert!(output.contains("Rp 100"));
    }

    #[test]
    fn test_receipt_shows_change() {
        let receipt = Receipt {
            items: vec![LineItem::new("Rice", dec!(25000), 1)],
            summary: CheckoutSummary {
                total: dec!(25000),
                discount: dec!(5000),
                discounted_total: dec!(20000),
            },
            tendered: dec!(50000),
            change: dec!(30000),
        };
        let output = format_receipt(&receipt, "Rp");
        assert!(output.contains("Discount: Rp 5000"));
        assert!(output.contains("Change: Rp 30000"));
    }
}
