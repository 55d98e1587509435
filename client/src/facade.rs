//! The client facade (`spec.md` §4.H): accepts either a direct endpoint
//! or a registry URI, resolves through the registry when needed, and
//! dispatches to a cached protocol handler by scheme.

use std::sync::Arc;

use dubbo_registry::RegistryKind;
use dubbo_types::Value;
use scc::HashMap as ConcurrentHashMap;

use crate::handler::{CallSpec, DubboHandler};
use crate::transport::{TcpTransport, Transport};
use crate::ClientError;

/// Only one protocol is implemented (`spec.md` §1 Non-goals), so this is
/// always `"dubbo"` today; it exists so a future protocol handler slots
/// into the same cache without reshaping the facade.
const DUBBO_SCHEME: &str = "dubbo";

/// Either a direct service endpoint or a registry address to resolve
/// through first. `spec.md` §6: "exactly one of `registryAddress` ...
/// or `serviceURI` ... if both supplied, `serviceURI` wins".
#[derive(Debug, Clone)]
pub enum Target {
    Direct(String),
    Registry(String),
}

pub struct ClientFacade {
    handlers: ConcurrentHashMap<&'static str, Arc<DubboHandler>>,
}

impl Default for ClientFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientFacade {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: ConcurrentHashMap::new(),
        }
    }

    fn handler(&self) -> Arc<DubboHandler> {
        if let Some(entry) = self.handlers.get(DUBBO_SCHEME) {
            return Arc::clone(entry.get());
        }
        let handler = Arc::new(DubboHandler::new(Arc::new(TcpTransport)));
        // Lost-update on a racing insert is harmless: both handlers are
        // functionally identical, per `spec.md` §5 "Handler cache".
        let _ = self.handlers.insert(DUBBO_SCHEME, Arc::clone(&handler));
        handler
    }

    pub async fn invoke(&self, target: Target, mut spec: CallSpec) -> Result<Value, ClientError> {
        spec.endpoint_uri = match target {
            Target::Direct(uri) => uri,
            Target::Registry(registry_uri) => {
                let (kind, address) = parse_registry_uri(&registry_uri)?;
                let provider = dubbo_registry::get_provider(kind, address, &spec.interface).await?;
                provider.uri
            }
        };

        let handler = self.handler();
        handler.invoke(spec).await
    }
}

fn parse_registry_uri(uri: &str) -> Result<(RegistryKind, &str), ClientError> {
    let (scheme, address) = uri.split_once("://").ok_or_else(|| ClientError::UnsupportedRegistry {
        kind: uri.to_owned(),
    })?;
    let kind = RegistryKind::parse(scheme).ok_or_else(|| ClientError::UnsupportedRegistry {
        kind: scheme.to_owned(),
    })?;
    Ok((kind, address))
}
