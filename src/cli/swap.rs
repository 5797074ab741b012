use super::ui;
use crate::AppContext;
use crate::store::Preferences;
use anyhow::{Context, Result};
use std::io::Write;

/// Swaps the stored currency pair. No rate is fetched.
pub fn run<W: Write>(ctx: &AppContext, out: &mut W) -> Result<()> {
    let mut preferences = Preferences::load(ctx.store.as_ref());
    preferences.pair.swap();
    Preferences::save(ctx.store.as_ref(), &preferences.pair)
        .context("Failed to save swapped currencies")?;

    writeln!(
        out,
        "{} {} {}",
        ui::style_text(&preferences.pair.from, ui::StyleType::Title),
        ui::style_text("->", ui::StyleType::Subtle),
        ui::style_text(&preferences.pair.to, ui::StyleType::Title)
    )?;
    Ok(())
}
