//! Conversion form state: amount, currency pair, last result or error.
//!
//! Every submission gets a monotonically increasing id and only the
//! completion carrying the latest id is applied, so a slow response to an
//! older submission can never overwrite a newer one.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::{ConversionRequest, ConversionResult, ConvertError, CurrencyPair, RateProvider};
use crate::store::{PreferenceStore, Preferences};

/// A submitted conversion that has not been executed yet.
pub struct PendingConversion {
    id: u64,
    request: ConversionRequest,
    provider: Arc<dyn RateProvider>,
}

impl std::fmt::Debug for PendingConversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingConversion")
            .field("id", &self.id)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

impl PendingConversion {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    pub async fn execute(self) -> CompletedConversion {
        let outcome = convert_with(self.provider.as_ref(), self.request).await;
        CompletedConversion {
            id: self.id,
            outcome,
        }
    }
}

pub struct CompletedConversion {
    id: u64,
    outcome: Result<ConversionResult, ConvertError>,
}

impl CompletedConversion {
    pub fn outcome(&self) -> &Result<ConversionResult, ConvertError> {
        &self.outcome
    }
}

/// What the form should currently show.
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterView {
    pub amount: Decimal,
    pub pair: CurrencyPair,
    pub result: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
}

pub struct ConversionPresenter {
    provider: Arc<dyn RateProvider>,
    store: Arc<dyn PreferenceStore>,
    amount: Decimal,
    pair: CurrencyPair,
    result: Option<ConversionResult>,
    error: Option<ConvertError>,
    latest_id: u64,
    loading: bool,
}

impl ConversionPresenter {
    /// Creates a presenter with amount 1 and the stored currency pair.
    pub fn new(provider: Arc<dyn RateProvider>, store: Arc<dyn PreferenceStore>) -> Self {
        let preferences = Preferences::load(store.as_ref());
        Self {
            provider,
            store,
            amount: Decimal::ONE,
            pair: preferences.pair,
            result: None,
            error: None,
            latest_id: 0,
            loading: false,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ConvertError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
        self.error = None;
    }

    pub fn set_from(&mut self, code: &str) {
        if self.pair.from == code {
            return;
        }
        self.pair.from = code.to_string();
        self.error = None;
        if let Err(e) = Preferences::save_from(self.store.as_ref(), code) {
            warn!(error = %e, "Failed to persist from currency");
        }
    }

    pub fn set_to(&mut self, code: &str) {
        if self.pair.to == code {
            return;
        }
        self.pair.to = code.to_string();
        self.error = None;
        if let Err(e) = Preferences::save_to(self.store.as_ref(), code) {
            warn!(error = %e, "Failed to persist to currency");
        }
    }

    /// Swaps the pair and persists it. Does not fetch a new rate.
    pub fn swap(&mut self) {
        self.pair.swap();
        if self.pair.from == self.pair.to {
            return;
        }
        if let Err(e) = Preferences::save(self.store.as_ref(), &self.pair) {
            warn!(error = %e, "Failed to persist swapped currencies");
        }
    }

    /// Converts `request` without touching the form state.
    pub async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        convert_with(self.provider.as_ref(), request).await
    }

    /// Starts a submission of the current form.
    ///
    /// Clears the previous result and error. An invalid amount is recorded
    /// as the error and no request is issued.
    pub fn begin(&mut self) -> Result<PendingConversion, ConvertError> {
        self.result = None;
        self.error = None;

        // Any earlier submission still in flight is superseded by this one
        self.latest_id += 1;

        let request = ConversionRequest::new(self.amount, &self.pair);
        if !request.has_valid_amount() {
            self.loading = false;
            self.error = Some(ConvertError::InvalidAmount);
            return Err(ConvertError::InvalidAmount);
        }

        self.loading = true;
        debug!(
            id = self.latest_id,
            from = %request.from,
            to = %request.to,
            "Submitting conversion"
        );

        Ok(PendingConversion {
            id: self.latest_id,
            request,
            provider: Arc::clone(&self.provider),
        })
    }

    /// Applies a completion if it belongs to the latest submission.
    pub fn apply(&mut self, completed: CompletedConversion) -> bool {
        if completed.id != self.latest_id {
            debug!(
                id = completed.id,
                latest = self.latest_id,
                "Dropping stale conversion"
            );
            return false;
        }

        self.loading = false;
        match completed.outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                self.result = None;
                self.error = Some(e);
            }
        }
        true
    }

    /// Submits the current form and waits for the outcome.
    pub async fn submit(&mut self) -> Result<ConversionResult, ConvertError> {
        let pending = self.begin()?;
        let completed = pending.execute().await;
        let outcome = completed.outcome.clone();
        self.apply(completed);
        outcome
    }

    pub fn view(&self) -> ConverterView {
        ConverterView {
            amount: self.amount,
            pair: self.pair.clone(),
            result: self.result.as_ref().map(|r| r.to_string()),
            error: self.error.as_ref().map(|e| e.to_string()),
            loading: self.loading,
        }
    }
}

async fn convert_with(
    provider: &dyn RateProvider,
    request: ConversionRequest,
) -> Result<ConversionResult, ConvertError> {
    if !request.has_valid_amount() {
        return Err(ConvertError::InvalidAmount);
    }
    let quote = provider.fetch_rate(&request.from, &request.to).await?;
    ConversionResult::from_quote(request, quote)
}
