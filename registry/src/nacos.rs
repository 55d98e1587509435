//! Nacos registry adapter. Queries the naming HTTP API directly rather
//! than embedding a Nacos client SDK, mirroring how the reference
//! client resolves `providers:{interface}::` through
//! `NacosClient.list_naming_instance`.

use serde::Deserialize;

use crate::provider::{select_provider_by_weight, Provider};
use crate::RegistryError;

#[derive(Debug, Deserialize)]
struct NacosInstance {
    ip: String,
    port: u16,
    #[serde(default = "default_weight")]
    weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Deserialize, Default)]
struct NacosInstanceList {
    #[serde(default)]
    hosts: Vec<NacosInstance>,
}

/// Resolves a provider for `interface` by querying the Nacos instance at
/// `address` (`host:port`, defaulting to port 8848 if bare).
pub async fn get_provider(address: &str, interface: &str) -> Result<Provider, RegistryError> {
    let base = if address.contains(':') {
        address.to_owned()
    } else {
        format!("{address}:8848")
    };
    let url = format!(
        "http://{base}/nacos/v1/ns/instance/list?serviceName=providers:{interface}::"
    );

    tracing::debug!(%url, "querying nacos for provider instances");

    let response = reqwest::get(&url)
        .await
        .map_err(|source| RegistryError::Transport {
            address: address.to_owned(),
            source,
        })?;
    let instances: NacosInstanceList =
        response
            .json()
            .await
            .map_err(|source| RegistryError::Transport {
                address: address.to_owned(),
                source,
            })?;

    let candidates: Vec<Provider> = instances
        .hosts
        .into_iter()
        .map(|instance| Provider {
            uri: format!("{}:{}", instance.ip, instance.port),
            weight: instance.weight,
        })
        .collect();

    select_provider_by_weight(&candidates, address, interface)
}
