use super::ui;
use crate::AppContext;
use crate::core::{CurrencyPair, CurrencyRecord};
use crate::providers::directory_from_config;
use crate::store::Preferences;
use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use std::io::Write;

pub async fn run<W: Write>(ctx: &AppContext, out: &mut W) -> Result<()> {
    let directory = directory_from_config(&ctx.config);

    let pb = ui::new_spinner("Loading currencies...");
    let loaded = directory.load_currencies().await;
    pb.finish_and_clear();

    let records = loaded?;
    let preferences = Preferences::load(ctx.store.as_ref());
    writeln!(out, "{}", currencies_table(&records, &preferences.pair))?;
    Ok(())
}

pub fn display_currencies(records: &[CurrencyRecord], selected: &CurrencyPair) {
    println!("{}", currencies_table(records, selected));
}

/// One row per currency, marking the selected source and target.
pub fn currencies_table(records: &[CurrencyRecord], selected: &CurrencyPair) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Flag"),
        ui::header_cell(""),
    ]);

    for record in records {
        table.add_row(vec![
            Cell::new(&record.code),
            Cell::new(&record.display_name),
            Cell::new(record.flag_url()).fg(Color::DarkGrey),
            selection_cell(&record.code, selected),
        ]);
    }

    table
}

fn selection_cell(code: &str, selected: &CurrencyPair) -> Cell {
    match (code == selected.from, code == selected.to) {
        (true, true) => Cell::new("from/to").fg(Color::Green),
        (true, false) => Cell::new("from").fg(Color::Green),
        (false, true) => Cell::new("to").fg(Color::Green),
        (false, false) => Cell::new(""),
    }
}
