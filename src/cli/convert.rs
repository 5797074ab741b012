use super::ui;
use crate::AppContext;
use crate::core::ConversionResult;
use crate::presenter::ConversionPresenter;
use anyhow::Result;
use rust_decimal::Decimal;
use std::io::Write;

/// Converts `amount` once, using the stored pair unless overridden.
///
/// Overrides are saved as the new preferences even when the conversion fails.
pub async fn run<W: Write>(
    ctx: &AppContext,
    amount: Decimal,
    from: Option<&str>,
    to: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let mut presenter = ConversionPresenter::new(ctx.rate_provider()?, ctx.store.clone());

    if let Some(code) = from {
        presenter.set_from(&normalize_code(code));
    }
    if let Some(code) = to {
        presenter.set_to(&normalize_code(code));
    }
    presenter.set_amount(amount);

    let pb = ui::new_spinner("Converting...");
    let outcome = presenter.submit().await;
    pb.finish_and_clear();

    let result = outcome?;
    writeln!(out, "{}", render_result(&result))?;
    Ok(())
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Result line followed by the rate used.
pub fn render_result(result: &ConversionResult) -> String {
    let mut details = format!("1 {} = {} {}", result.from, result.rate, result.to);
    if let Some(updated_at) = result.updated_at {
        details.push_str(&format!(
            " (rates updated {})",
            updated_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    format!(
        "{}\n{}",
        ui::style_text(&result.to_string(), ui::StyleType::Result),
        ui::style_text(&details, ui::StyleType::Subtle)
    )
}
