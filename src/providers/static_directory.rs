use async_trait::async_trait;

use crate::core::currency::dedup_by_code;
use crate::core::{CurrencyDirectory, CurrencyRecord, DirectoryError};

// (code, display name, flag country)
const CURRENCIES: &[(&str, &str, &str)] = &[
    ("USD", "United States Dollar", "us"),
    ("EUR", "Euro", "eu"),
    ("GBP", "British Pound Sterling", "gb"),
    ("JPY", "Japanese Yen", "jp"),
    ("CAD", "Canadian Dollar", "ca"),
    ("AUD", "Australian Dollar", "au"),
    ("CHF", "Swiss Franc", "ch"),
    ("CNY", "Chinese Yuan", "cn"),
    ("INR", "Indian Rupee", "in"),
    ("BRL", "Brazilian Real", "br"),
    ("ZAR", "South African Rand", "za"),
    ("RUB", "Russian Ruble", "ru"),
    ("MXN", "Mexican Peso", "mx"),
    ("SGD", "Singapore Dollar", "sg"),
    ("HKD", "Hong Kong Dollar", "hk"),
    ("NZD", "New Zealand Dollar", "nz"),
    ("SEK", "Swedish Krona", "se"),
    ("NOK", "Norwegian Krone", "no"),
    ("DKK", "Danish Krone", "dk"),
    ("PLN", "Polish Zloty", "pl"),
    ("KRW", "South Korean Won", "kr"),
    ("THB", "Thai Baht", "th"),
    ("MYR", "Malaysian Ringgit", "my"),
    ("IDR", "Indonesian Rupiah", "id"),
    ("PHP", "Philippine Peso", "ph"),
    ("AED", "United Arab Emirates Dirham", "ae"),
    ("ARS", "Argentine Peso", "ar"),
    ("CLP", "Chilean Peso", "cl"),
    ("COP", "Colombian Peso", "co"),
    ("CZK", "Czech Koruna", "cz"),
    ("EGP", "Egyptian Pound", "eg"),
    ("HUF", "Hungarian Forint", "hu"),
    ("ILS", "Israeli New Shekel", "il"),
    ("KWD", "Kuwaiti Dinar", "kw"),
    ("LBP", "Lebanese Pound", "lb"),
    ("NGN", "Nigerian Naira", "ng"),
    ("PEN", "Peruvian Sol", "pe"),
    ("PKR", "Pakistani Rupee", "pk"),
    ("RON", "Romanian Leu", "ro"),
    ("SAR", "Saudi Riyal", "sa"),
    ("TRY", "Turkish Lira", "tr"),
    ("TWD", "New Taiwan Dollar", "tw"),
    ("UAH", "Ukrainian Hryvnia", "ua"),
    ("VEF", "Venezuelan Bolívar", "ve"),
    ("VND", "Vietnamese Dong", "vn"),
    ("XAF", "CFA Franc BEAC", "cm"),
    ("XCD", "East Caribbean Dollar", "ag"),
    ("XOF", "CFA Franc BCEAO", "bj"),
    ("XPF", "CFP Franc", "pf"),
    ("YER", "Yemeni Rial", "ye"),
];

/// Built-in currency table. Records keep the table's order.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticDirectory;

impl StaticDirectory {
    pub fn new() -> Self {
        StaticDirectory
    }

    pub fn records(&self) -> Vec<CurrencyRecord> {
        dedup_by_code(
            CURRENCIES
                .iter()
                .map(|(code, name, country)| CurrencyRecord::new(code, name, country)),
        )
    }
}

#[async_trait]
impl CurrencyDirectory for StaticDirectory {
    async fn load_currencies(&self) -> Result<Vec<CurrencyRecord>, DirectoryError> {
        Ok(self.records())
    }
}
