//! Scalar types generated code projects onto. Time values are plain integer
//! encodings so every projected field has a natural `Default`.

pub use rust_decimal::Decimal;
pub use uuid::Uuid;

/// Nanoseconds since the Unix epoch.
pub type Timestamp = u64;

/// A span in nanoseconds.
pub type Duration = u64;

/// Days since the Unix epoch.
pub type Date = i32;
