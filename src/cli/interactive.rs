use super::{convert::normalize_code, currencies::display_currencies, ui};
use crate::AppContext;
use crate::core::CurrencyRecord;
use crate::presenter::ConversionPresenter;
use crate::providers::directory_from_config;
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  amount <N>    set the amount to convert
  from <CODE>   set the source currency
  to <CODE>     set the target currency
  swap          swap source and target
  convert       fetch the rate and convert (also: empty line)
  list          show available currencies
  help          show this help
  quit          leave";

#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    Amount(Decimal),
    From(String),
    To(String),
    Swap,
    Convert,
    List,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<FormCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(FormCommand::Convert);
    };
    let arg = parts.next();

    match (verb.to_lowercase().as_str(), arg) {
        ("amount", Some(value)) => Decimal::from_str(value)
            .map(FormCommand::Amount)
            .map_err(|_| format!("Not a number: {value}")),
        ("from", Some(code)) => Ok(FormCommand::From(normalize_code(code))),
        ("to", Some(code)) => Ok(FormCommand::To(normalize_code(code))),
        ("amount" | "from" | "to", None) => Err(format!("Missing value for {verb}")),
        ("swap", _) => Ok(FormCommand::Swap),
        ("convert", _) => Ok(FormCommand::Convert),
        ("list", _) => Ok(FormCommand::List),
        ("help", _) => Ok(FormCommand::Help),
        ("quit" | "exit", _) => Ok(FormCommand::Quit),
        _ => Err(format!("Unknown command: {verb}. Type 'help' for commands.")),
    }
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut presenter = ConversionPresenter::new(ctx.rate_provider()?, ctx.store.clone());
    let directory = directory_from_config(&ctx.config);

    println!("{}", ui::style_text("Currency Converter", ui::StyleType::Title));

    // Load the currency list and the first rate side by side
    let pb = ui::new_spinner("Converting...");
    let (loaded, _) =
        futures::future::join(directory.load_currencies(), presenter.submit()).await;
    pb.finish_and_clear();

    let currencies = match loaded {
        Ok(records) => Some(records),
        Err(e) => {
            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
            None
        }
    };
    ui::print_view(&presenter.view());

    let stdin = BufReader::new(tokio::io::stdin());
    run_session(&mut presenter, currencies.as_deref(), stdin).await
}

/// Reads form commands until `quit` or end of input.
///
/// Each submission is awaited before the next line is read, so at most one
/// conversion is in flight.
pub async fn run_session<R>(
    presenter: &mut ConversionPresenter,
    currencies: Option<&[CurrencyRecord]>,
    reader: R,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", ui::style_text(&message, ui::StyleType::Error));
                continue;
            }
        };
        debug!(?command, "Form command");

        match command {
            FormCommand::Amount(amount) => presenter.set_amount(amount),
            FormCommand::From(code) => {
                if check_listed(&code, currencies) {
                    presenter.set_from(&code);
                }
            }
            FormCommand::To(code) => {
                if check_listed(&code, currencies) {
                    presenter.set_to(&code);
                }
            }
            FormCommand::Swap => presenter.swap(),
            FormCommand::Convert => {
                let pb = ui::new_spinner("Converting...");
                let _ = presenter.submit().await;
                pb.finish_and_clear();
            }
            FormCommand::List => {
                match currencies {
                    Some(records) => display_currencies(records, presenter.pair()),
                    None => println!(
                        "{}",
                        ui::style_text("Currency list unavailable", ui::StyleType::Error)
                    ),
                }
                continue;
            }
            FormCommand::Help => {
                println!("{HELP}");
                continue;
            }
            FormCommand::Quit => break,
        }
        ui::print_view(&presenter.view());
    }
    Ok(())
}

// Codes are picked from the list when there is one.
fn check_listed(code: &str, currencies: Option<&[CurrencyRecord]>) -> bool {
    let listed = currencies.is_none_or(|records| records.iter().any(|r| r.code == code));
    if !listed {
        println!(
            "{}",
            ui::style_text(
                &format!("{code} is not in the currency list"),
                ui::StyleType::Error
            )
        );
    }
    listed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConversionError, CurrencyPair, RateProvider, RateQuote};
    use crate::providers::static_directory::StaticDirectory;
    use crate::store::memory::MemoryPreferenceStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedRate(Decimal);

    #[async_trait]
    impl RateProvider for FixedRate {
        async fn fetch_rate(&self, _from: &str, _to: &str) -> Result<RateQuote, ConversionError> {
            Ok(RateQuote {
                rate: self.0,
                updated_at: None,
            })
        }
    }

    fn presenter() -> ConversionPresenter {
        ConversionPresenter::new(
            Arc::new(FixedRate(Decimal::from_str("83.12").unwrap())),
            Arc::new(MemoryPreferenceStore::new()),
        )
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(
            parse_command("amount 12.5"),
            Ok(FormCommand::Amount(Decimal::from_str("12.5").unwrap()))
        );
        assert_eq!(parse_command("FROM eur"), Ok(FormCommand::From("EUR".into())));
        assert_eq!(parse_command("to jpy"), Ok(FormCommand::To("JPY".into())));
        assert_eq!(parse_command("swap"), Ok(FormCommand::Swap));
        assert_eq!(parse_command(""), Ok(FormCommand::Convert));
        assert_eq!(parse_command("   "), Ok(FormCommand::Convert));
        assert_eq!(parse_command("exit"), Ok(FormCommand::Quit));
        assert!(parse_command("amount ten").is_err());
        assert!(parse_command("from").is_err());
        assert!(parse_command("teleport").is_err());
    }

    #[tokio::test]
    async fn test_session_drives_presenter() {
        let mut presenter = presenter();
        let records = StaticDirectory::new().records();
        let input: &[u8] = b"amount 10\nconvert\nswap\nfrom XYZ\nto EUR\nquit\namount 99\n";

        run_session(&mut presenter, Some(records.as_slice()), input)
            .await
            .unwrap();

        // Swap gave INR -> USD, XYZ was rejected, EUR accepted; input after quit ignored
        assert_eq!(presenter.pair(), &CurrencyPair::new("INR", "EUR"));
        assert_eq!(presenter.amount(), Decimal::from(10));
        assert_eq!(
            presenter.view().result.as_deref(),
            Some("10 USD = 831.20 INR")
        );
    }

    #[tokio::test]
    async fn test_session_without_list_accepts_any_code() {
        let mut presenter = presenter();
        let input: &[u8] = b"from XAU\n";

        run_session(&mut presenter, None, input).await.unwrap();
        assert_eq!(presenter.pair().from, "XAU");
    }

    #[tokio::test]
    async fn test_session_reports_invalid_amount() {
        let mut presenter = presenter();
        let input: &[u8] = b"amount -5\n\n";

        run_session(&mut presenter, None, input).await.unwrap();
        assert_eq!(
            presenter.view().error.as_deref(),
            Some("Please enter a positive amount.")
        );
    }
}
