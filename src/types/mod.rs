//! Request and response types for the Yahoo Finance API and the UI routes.
//!
//! ## Organization
//!
//! - [`enums`] — Display periods and sampling intervals
//! - [`history`] — Chart wire format, validated candles and price points
//! - [`etf`] — Quote summary wire format and fund details
//!
//! All enums are re-exported at the module root via `pub use enums::*`.

pub mod enums;
pub mod etf;
pub mod history;

pub use enums::*;
