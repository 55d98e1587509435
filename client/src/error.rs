/// Errors raised by the protocol handler and client facade
/// (`spec.md` §7), aggregating the lower crates' error kinds plus the
/// ones that only make sense at this layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("endpoint {uri:?} did not parse to host:port with a port in 1..=65535")]
    MalformedEndpoint { uri: String },

    #[error("scheme {scheme:?} has no registered protocol handler")]
    UnsupportedProtocol { scheme: String },

    #[error("registry type {kind:?} is not available in this build")]
    UnsupportedRegistry { kind: String },

    #[error("call against invoke_id {invoke_id} exceeded its {timeout_ms}ms deadline")]
    Timeout { invoke_id: u64, timeout_ms: u64 },

    #[error("transport I/O failure: {0}")]
    TransportFailure(#[source] std::io::Error),

    #[error(transparent)]
    Type(#[from] dubbo_types::TypeError),

    #[error(transparent)]
    Wire(#[from] dubbo_wire_protocol::WireError),

    #[error(transparent)]
    Registry(#[from] dubbo_registry::RegistryError),

    #[error("{0}")]
    Codec(#[from] error_stack::Report<dubbo_codec::CodecError>),
}
