//! Utility functions for rule implementations.

pub mod allowance;
pub mod naming;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use allowance::{AllowCheck, AllowIndex};
#[doc(inline)]
pub use naming::{is_camel_case, is_screaming_snake_case, to_camel_case, to_screaming_snake_case};
