use rust_decimal::Decimal;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryEntry {
    /// Lower-case slot value the interaction model resolves to.
    pub key: &'static str,
    pub display_name: &'static str,
    pub currency_code: &'static str,
}

/// Units of foreign currency per one US dollar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateQuote {
    Available(Decimal),
    /// The rate API answered but carried no quote for the currency.
    Unavailable,
}

impl RateQuote {
    pub const UNAVAILABLE_SENTINEL: Decimal = Decimal::NEGATIVE_ONE;

    pub fn value(&self) -> Decimal {
        match self {
            RateQuote::Available(rate) => *rate,
            RateQuote::Unavailable => Self::UNAVAILABLE_SENTINEL,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RateQuote::Available(_))
    }
}

impl fmt::Display for RateQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
