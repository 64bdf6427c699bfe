mod provider;
pub use provider::{HttpNode, ProviderNode};
