//! Classified failures surfaced by the rate and directory providers.

/// Why a rate lookup failed. Every provider failure is mapped onto one of
/// these before it leaves the provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("Rate limit exceeded. Please wait a moment and try again.")]
    RateLimited,

    #[error(
        "Failed to fetch exchange rates. Please check your connection or try again later."
    )]
    NetworkFailure,

    #[error("Invalid API key. Please check your API configuration.")]
    InvalidKey,

    #[error("Invalid currency pair or request format.")]
    MalformedRequest,

    #[error("Unsupported currency code provided.")]
    UnsupportedCode,

    #[error("API account is inactive. Please check your API status.")]
    InactiveAccount,

    #[error("API quota reached. Please try again after some time.")]
    QuotaReached,

    #[error("API Error: {0}.")]
    Unknown(String),
}

impl ConversionError {
    /// Maps an `error-type` tag from the rate API onto a known kind.
    pub fn from_api_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("invalid-key") => ConversionError::InvalidKey,
            Some("malformed-request") => ConversionError::MalformedRequest,
            Some("unsupported-code") => ConversionError::UnsupportedCode,
            Some("inactive-account") => ConversionError::InactiveAccount,
            Some("quota-reached") => ConversionError::QuotaReached,
            Some(other) if !other.is_empty() => ConversionError::Unknown(other.to_string()),
            _ => ConversionError::Unknown("Unknown error type".to_string()),
        }
    }

    /// Stable kebab-case name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ConversionError::RateLimited => "rate-limited",
            ConversionError::NetworkFailure => "network-failure",
            ConversionError::InvalidKey => "invalid-key",
            ConversionError::MalformedRequest => "malformed-request",
            ConversionError::UnsupportedCode => "unsupported-code",
            ConversionError::InactiveAccount => "inactive-account",
            ConversionError::QuotaReached => "quota-reached",
            ConversionError::Unknown(_) => "unknown",
        }
    }
}

/// Failure of a conversion as seen by the presenter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("Please enter a positive amount.")]
    InvalidAmount,

    #[error("Amount is too large to convert.")]
    AmountTooLarge,

    #[error(transparent)]
    Rate(#[from] ConversionError),
}

impl ConvertError {
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::InvalidAmount => "invalid-amount",
            ConvertError::AmountTooLarge => "amount-too-large",
            ConvertError::Rate(e) => e.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Currency directory unavailable: {0}")]
    Unavailable(String),
}
