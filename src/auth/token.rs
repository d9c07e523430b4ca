//! Token endpoint payloads and the redacting secret wrapper used inside them.

pub mod response;
pub mod secret;
