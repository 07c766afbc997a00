//! Utility functions shared by the analyzer and rules.

pub mod allowance;

#[doc(inline)]
pub use allowance::{check_allow, AllowCheck};
