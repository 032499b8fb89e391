// Domain layer: country registry, quote model and the rate provider port.

pub mod countries;
pub mod model;
pub mod ports;

pub use model::{CountryEntry, RateQuote};
pub use ports::RateProvider;
