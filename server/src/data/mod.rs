//! Data layer
//!
//! - `record` - the centre user record and its lenient JSON decoding
//! - `loader` - `DataLoader` trait and the JSON file loader
//! - `error` - load errors

pub mod error;
pub mod loader;
pub mod record;

pub use error::LoadError;
pub use loader::{DataLoader, JsonFileLoader, parse_dataset};
pub use record::Record;
