//! Application-level configuration.
//!
//! - [`ResolverParams`] — snapshot refresh and suggestion limits

pub mod resolver_params;

pub use resolver_params::ResolverParams;
