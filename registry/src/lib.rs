//! Registry-based provider discovery (`spec.md` §5 "Registry lookup").
//! A registry adapter turns `(registry address, interface name)` into a
//! single resolved provider endpoint, already weight-selected.

mod error;
mod nacos;
mod provider;
#[cfg(feature = "zookeeper")]
mod zookeeper;

pub use error::RegistryError;
pub use provider::{select_provider_by_weight, Provider};

/// Which registry backend to query. Mirrors the reference client's
/// `RegistryFactory.create_registry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Nacos,
    #[cfg(feature = "zookeeper")]
    Zookeeper,
}

impl RegistryKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "nacos" => Some(Self::Nacos),
            #[cfg(feature = "zookeeper")]
            "zookeeper" => Some(Self::Zookeeper),
            _ => None,
        }
    }
}

/// Resolves a provider for `interface` from the registry of `kind` at
/// `address`.
pub async fn get_provider(
    kind: RegistryKind,
    address: &str,
    interface: &str,
) -> Result<Provider, RegistryError> {
    match kind {
        RegistryKind::Nacos => nacos::get_provider(address, interface).await,
        #[cfg(feature = "zookeeper")]
        RegistryKind::Zookeeper => zookeeper::get_provider(address, interface).await,
    }
}
