//! ZooKeeper registry adapter, gated behind the `zookeeper` feature
//! because the underlying client is blocking. Mirrors the reference
//! client's `ZookeeperRegistryStrategy`: list the children of
//! `/dubbo/{interface}/providers`, percent-decode each `dubbo://` URL,
//! and weight-select among them.

use std::time::Duration;

use percent_encoding::percent_decode_str;
use zookeeper::{WatchedEvent, Watcher, ZooKeeper};

use crate::provider::{select_provider_by_weight, Provider};
use crate::RegistryError;

struct NoopWatcher;

impl Watcher for NoopWatcher {
    fn handle(&self, _event: WatchedEvent) {}
}

/// Resolves a provider for `interface` from the ZooKeeper ensemble at
/// `address`.
pub async fn get_provider(address: &str, interface: &str) -> Result<Provider, RegistryError> {
    let address = address.to_owned();
    let interface = interface.to_owned();

    tokio::task::spawn_blocking(move || get_provider_blocking(&address, &interface))
        .await
        .expect("zookeeper worker thread panicked")
}

fn get_provider_blocking(address: &str, interface: &str) -> Result<Provider, RegistryError> {
    let zk = ZooKeeper::connect(address, Duration::from_secs(10), NoopWatcher).map_err(|source| {
        RegistryError::Zookeeper {
            address: address.to_owned(),
            source,
        }
    })?;

    let path = format!("/dubbo/{interface}/providers");
    let children = zk
        .get_children(&path, false)
        .map_err(|source| RegistryError::Zookeeper {
            address: address.to_owned(),
            source,
        })?;

    let candidates: Vec<Provider> = children
        .iter()
        .filter_map(|raw| decode_provider(raw))
        .collect();

    select_provider_by_weight(&candidates, address, interface)
}

/// Percent-decodes one znode child name and parses it as a `dubbo://`
/// provider URL, returning `None` for anything that isn't one (the
/// reference client silently skips non-dubbo providers too).
fn decode_provider(raw: &str) -> Option<Provider> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    if !decoded.contains("dubbo://") {
        return None;
    }
    let url = url::Url::parse(&decoded).ok()?;
    let host = url.host_str()?;
    let port = url.port()?;
    let weight = url
        .query_pairs()
        .find(|(key, _)| key == "weight")
        .and_then(|(_, value)| value.parse::<f64>().ok())
        .unwrap_or(100.0);

    Some(Provider {
        uri: format!("{host}:{port}"),
        weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_percent_encoded_dubbo_url() {
        let raw = "dubbo%3A%2F%2F10.0.0.5%3A20880%3Fweight%3D200";
        let provider = decode_provider(raw).unwrap();
        assert_eq!(provider.uri, "10.0.0.5:20880");
        assert_eq!(provider.weight, 200.0);
    }

    #[test]
    fn missing_weight_defaults_to_one_hundred() {
        let raw = "dubbo://10.0.0.5:20880";
        let provider = decode_provider(raw).unwrap();
        assert_eq!(provider.weight, 100.0);
    }

    #[test]
    fn non_dubbo_entries_are_skipped() {
        assert!(decode_provider("consumer://10.0.0.1:0").is_none());
    }
}
