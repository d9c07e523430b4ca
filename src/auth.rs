//! Client credentials, Basic credential encoding, and typed views over token endpoint payloads.

pub mod basic;
pub mod credentials;
pub mod token;

pub use basic::*;
pub use credentials::*;
pub use token::{response::*, secret::*};
