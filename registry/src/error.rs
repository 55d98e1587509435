/// Errors raised while resolving a provider from a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry query against {address} failed: {source}")]
    Transport {
        address: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("service {interface} has no registered providers at {address}")]
    NoProviders { address: String, interface: String },

    #[error("provider entry {raw} could not be parsed as a dubbo:// provider URL")]
    MalformedProvider { raw: String },

    #[cfg(feature = "zookeeper")]
    #[error("zookeeper session against {address} failed: {source}")]
    Zookeeper {
        address: String,
        #[source]
        source: zookeeper::ZkError,
    },
}
