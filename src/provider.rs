//! Provider-facing descriptors (data) and strategies (behavior).
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering the authorization
//! and token endpoints, the requested scope list, and provider quirks such as the scope
//! delimiter. `strategy` defines [`ProviderStrategy`], an HTTP-client-agnostic hook used by
//! flows to augment outgoing token forms and classify upstream OAuth errors for logging.

pub mod descriptor;
pub mod strategy;

pub use descriptor::*;
pub use strategy::*;
