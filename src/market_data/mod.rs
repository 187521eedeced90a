pub mod bar;
pub mod loader;
pub mod normalizer;

// Re-export the bar types for convenient access (e.g. `use crate::market_data::Series`).
pub use bar::{PriceBar, RawBar, Series};
pub use loader::load_bars;
pub use normalizer::normalize;
