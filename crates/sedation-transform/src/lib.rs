//! Signal preparation for the dataset builder.
//!
//! Operates on the aligned `(rows, [EEG, SEVO, BIS])` matrix of one case:
//! drug exposure checks, age-adjusted MAC, trimming to the valid BIS span,
//! bounded forward filling, and extraction of fixed-length EEG windows.

mod error;
pub mod exposure;
pub mod fill;
pub mod mac;
pub mod prepare;
pub mod trim;
pub mod window;

pub use error::{Result, TransformError};
pub use exposure::{any_above, peak};
pub use fill::forward_fill;
pub use mac::{age_adjusted_mac, mac_divisor};
pub use prepare::{Prepared, prepare_signals};
pub use trim::{trim_rows, valid_span};
pub use window::extract_windows;
