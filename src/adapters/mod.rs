// Adapters layer: concrete implementations for external systems.

pub mod currency_client;

pub use currency_client::CurrencyLayerClient;
