//! Shopping list command handlers.

use std::fmt::Write as _;

use clap::Subcommand;
use gondola_core::{
    format_brl, sum_prices_by_store, AddOutcome, AppConfig, ListEntry, ShoppingList, StoreTotals,
};
use rust_decimal::Decimal;

/// Sub-commands available under `list`.
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// Add a product to the list
    Add {
        /// Product name as shown by the store
        name: String,
        /// Source the product was found on
        store: String,
        /// Displayed price (e.g. "R$ 16,07")
        price: String,
        /// Quantity to buy
        #[arg(long, default_value = "1")]
        units: Decimal,
    },
    /// Remove a product by name
    Remove { name: String },
    /// Show the list
    Show,
    /// Change how many units of a product to buy
    Units { name: String, units: Decimal },
    /// Show totals per store
    Total,
}

pub(crate) fn render_list(entries: &[ListEntry]) -> String {
    if entries.is_empty() {
        return "Shopping list is empty.\n".to_string();
    }

    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} x {} ({}) - {}",
            i + 1,
            entry.units,
            entry.name,
            entry.store,
            entry.price
        );
    }
    out
}

pub(crate) fn render_totals(totals: &StoreTotals) -> String {
    let mut out = String::new();
    for (store, total) in &totals.by_store {
        let _ = writeln!(out, "{store}: {}", format_brl(*total));
    }
    let _ = writeln!(out, "Total: {}", format_brl(totals.grand_total));
    out
}

pub(crate) fn run_list(config: &AppConfig, command: ListCommands) -> anyhow::Result<()> {
    let list = ShoppingList::new(&config.list_path);

    match command {
        ListCommands::Add {
            name,
            store,
            price,
            units,
        } => {
            let entry = ListEntry {
                units,
                name: name.clone(),
                store: store.clone(),
                price,
            };
            match list.add(entry)? {
                AddOutcome::Added => println!("Added '{name}' from {store}."),
                AddOutcome::AlreadyPresent => {
                    println!("'{name}' from {store} is already on the list.");
                }
            }
        }
        ListCommands::Remove { name } => match list.remove(&name)? {
            Some(_) => println!("Removed '{name}'."),
            None => anyhow::bail!("'{name}' is not on the list"),
        },
        ListCommands::Show => print!("{}", render_list(&list.load())),
        ListCommands::Units { name, units } => match list.update_units(&name, units)? {
            Some(previous) => println!("'{name}': {previous} -> {units} units."),
            None => anyhow::bail!("'{name}' is not on the list"),
        },
        ListCommands::Total => {
            let totals = sum_prices_by_store(&list.load())?;
            print!("{}", render_totals(&totals));
        }
    }

    Ok(())
}
