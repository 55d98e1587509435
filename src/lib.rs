//! Client library for issuing Dubbo/Hessian-2 RPC calls against a direct
//! endpoint or a registry (`spec.md` §6 "External interfaces"). This
//! crate is the host-facing entry point: it validates a [`CallRequest`],
//! hands it to the client facade, and folds the outcome into a
//! [`CallResult`] that never panics on bad input.

mod config;
mod error;
mod json;

use std::sync::OnceLock;

use dubbo_client::{CallSpec, ClientFacade, Target};
use dubbo_types::split_declared_types;
use serde::{Deserialize, Serialize};

pub use config::{Config, ConfigError, DEFAULT_DUBBO_VERSION, DEFAULT_TIMEOUT_MS};
pub use error::InvokeError;

static FACADE: OnceLock<ClientFacade> = OnceLock::new();

fn facade() -> &'static ClientFacade {
    FACADE.get_or_init(ClientFacade::new)
}

/// The host-facing input contract (`spec.md` §6).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub interface: String,
    pub method: String,
    #[serde(default)]
    pub registry_address: Option<String>,
    #[serde(default, rename = "serviceURI")]
    pub service_uri: Option<String>,
    #[serde(default)]
    pub parameter_types: Option<String>,
    #[serde(default)]
    pub parameter_values: Option<serde_json::Value>,
    #[serde(default)]
    pub dubbo_version: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// The host-facing result contract (`spec.md` §6).
#[derive(Debug, Clone, Serialize)]
pub struct CallResult {
    pub success: bool,
    pub result: Option<serde_json::Value>,
    pub message: String,
}

impl CallResult {
    fn ok(value: serde_json::Value) -> Self {
        Self {
            success: true,
            result: Some(value),
            message: String::new(),
        }
    }

    fn err(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            result: None,
            message: error.to_string(),
        }
    }
}

/// Validates and executes one call, folding any failure into a failed
/// [`CallResult`] rather than returning an error — this function never
/// panics.
pub async fn invoke(request: CallRequest, defaults: &Config) -> CallResult {
    match invoke_inner(request, defaults).await {
        Ok(value) => CallResult::ok(value),
        Err(error) => CallResult::err(error),
    }
}

async fn invoke_inner(request: CallRequest, defaults: &Config) -> Result<serde_json::Value, InvokeError> {
    if request.interface.is_empty() {
        return Err(InvokeError::MissingInterface);
    }
    if request.method.is_empty() {
        return Err(InvokeError::MissingMethod);
    }

    let dubbo_version = request.dubbo_version.unwrap_or_else(|| defaults.dubbo_version.clone());
    if !error::is_valid_dubbo_version(&dubbo_version) {
        return Err(InvokeError::InvalidDubboVersion { given: dubbo_version });
    }

    let timeout_ms = request.timeout_ms.unwrap_or(defaults.timeout_ms);
    if timeout_ms == 0 || timeout_ms > 300_000 {
        return Err(InvokeError::InvalidTimeout { given: timeout_ms });
    }

    // `serviceURI` wins when both are supplied, per `spec.md` §6.
    let target = match (request.service_uri, request.registry_address) {
        (Some(service_uri), Some(_)) => {
            tracing::warn!("both registryAddress and serviceURI supplied; using serviceURI");
            Target::Direct(service_uri)
        }
        (Some(service_uri), None) => Target::Direct(service_uri),
        (None, Some(registry_address)) => {
            if !is_registry_uri(&registry_address) {
                return Err(InvokeError::MalformedRegistryUri(registry_address));
            }
            Target::Registry(registry_address)
        }
        (None, None) => return Err(InvokeError::MissingEndpoint),
    };

    let declared_types = request
        .parameter_types
        .as_deref()
        .map(split_declared_types)
        .unwrap_or_default();

    let arguments = json::parameter_values(request.parameter_values.as_ref(), declared_types.len())?;

    let spec = CallSpec {
        endpoint_uri: String::new(),
        interface: request.interface,
        method: request.method,
        service_version: String::new(),
        declared_types,
        arguments,
        dubbo_version,
        timeout_ms,
        extra_attachments: Vec::new(),
    };

    let value = facade().invoke(target, spec).await?;
    Ok(json::value_to_json(&value))
}

/// `^[a-z]+://.+$`, per `spec.md` §6 "Registry URI grammar".
fn is_registry_uri(address: &str) -> bool {
    match address.split_once("://") {
        Some((scheme, rest)) => !scheme.is_empty() && scheme.bytes().all(|b| b.is_ascii_lowercase()) && !rest.is_empty(),
        None => false,
    }
}
