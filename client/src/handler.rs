//! The Dubbo/Hessian-2 protocol handler (`spec.md` §4.F): validates the
//! endpoint, applies value coercion, assembles and sends one frame, and
//! decodes the reply.

use std::sync::Arc;
use std::time::Duration;

use dubbo_types::{declared_descriptor, infer_descriptor, TypeError, Value};
use dubbo_wire_protocol::{next_invoke_id, ReplyHeader, Request};

use crate::coercion::coerce_value;
use crate::endpoint::parse_endpoint;
use crate::transport::Transport;
use crate::ClientError;

/// One outgoing call's full shape, already validated and ready for the
/// protocol handler.
#[derive(Debug, Clone)]
pub struct CallSpec {
    pub endpoint_uri: String,
    pub interface: String,
    pub method: String,
    pub service_version: String,
    pub declared_types: Vec<String>,
    pub arguments: Vec<Value>,
    pub dubbo_version: String,
    pub timeout_ms: u64,
    pub extra_attachments: Vec<(String, String)>,
}

pub struct DubboHandler {
    transport: Arc<dyn Transport>,
}

impl DubboHandler {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn invoke(&self, spec: CallSpec) -> Result<Value, ClientError> {
        let endpoint = parse_endpoint(&spec.endpoint_uri)?;

        if spec.declared_types.len() >= 2 && spec.declared_types.len() != spec.arguments.len() {
            return Err(ClientError::Type(TypeError::TypeCountMismatch {
                declared: spec.declared_types.len(),
                received: spec.arguments.len(),
            }));
        }

        let arguments: Vec<Value> = spec
            .arguments
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let declared = spec.declared_types.get(index).map(String::as_str);
                coerce_value(value, declared)
            })
            .collect();

        let descriptor = if spec.declared_types.is_empty() {
            infer_descriptor(&arguments)?
        } else {
            declared_descriptor(&spec.declared_types)
        };

        let mut request = Request::new(
            spec.interface,
            spec.service_version,
            spec.method,
            descriptor,
            arguments,
        )
        .with_dubbo_version(spec.dubbo_version);
        for (key, value) in spec.extra_attachments {
            request = request.with_attachment(key, value);
        }

        let invoke_id = next_invoke_id();
        let frame = request.encode(invoke_id)?;

        tracing::debug!(invoke_id, endpoint = %spec.endpoint_uri, "sending dubbo request frame");

        let reply = self
            .transport
            .call(
                &endpoint.host,
                endpoint.port,
                &frame,
                Duration::from_millis(spec.timeout_ms),
                invoke_id,
            )
            .await?;

        let header = ReplyHeader::parse(&reply.header)?;
        let value = dubbo_wire_protocol::decode_reply(&header, &reply.body)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::transport::ReplyFrame;

    struct EchoNullTransport;

    #[async_trait]
    impl Transport for EchoNullTransport {
        async fn call(
            &self,
            _host: &str,
            _port: u16,
            _frame: &[u8],
            _timeout: Duration,
            _invoke_id: u64,
        ) -> Result<ReplyFrame, ClientError> {
            let mut header = [0u8; dubbo_wire_protocol::HEADER_LEN];
            header[0..2].copy_from_slice(&dubbo_wire_protocol::MAGIC);
            header[3] = dubbo_wire_protocol::REPLY_STATUS_OK;
            Ok(ReplyFrame {
                header,
                body: vec![b'N'],
            })
        }
    }

    #[tokio::test]
    async fn zero_arg_call_round_trips_to_a_null_reply() {
        let handler = DubboHandler::new(Arc::new(EchoNullTransport));
        let result = handler
            .invoke(CallSpec {
                endpoint_uri: "10.0.0.1:20880".to_owned(),
                interface: "com.x.HelloFacade".to_owned(),
                method: "sayHello".to_owned(),
                service_version: String::new(),
                declared_types: vec![],
                arguments: vec![],
                dubbo_version: "2.4.10".to_owned(),
                timeout_ms: 5_000,
                extra_attachments: vec![],
            })
            .await
            .unwrap();
        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn malformed_endpoint_fails_before_any_network_io() {
        let handler = DubboHandler::new(Arc::new(EchoNullTransport));
        let err = handler
            .invoke(CallSpec {
                endpoint_uri: "not-an-endpoint".to_owned(),
                interface: "com.x.HelloFacade".to_owned(),
                method: "sayHello".to_owned(),
                service_version: String::new(),
                declared_types: vec![],
                arguments: vec![],
                dubbo_version: "2.4.10".to_owned(),
                timeout_ms: 5_000,
                extra_attachments: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MalformedEndpoint { .. }));
    }

    #[tokio::test]
    async fn type_count_mismatch_is_rejected_for_multi_param_calls() {
        let handler = DubboHandler::new(Arc::new(EchoNullTransport));
        let err = handler
            .invoke(CallSpec {
                endpoint_uri: "10.0.0.1:20880".to_owned(),
                interface: "com.x.HelloFacade".to_owned(),
                method: "sayHello".to_owned(),
                service_version: String::new(),
                declared_types: vec!["java.lang.String".to_owned(), "int".to_owned()],
                arguments: vec![Value::Str("only one".into())],
                dubbo_version: "2.4.10".to_owned(),
                timeout_ms: 5_000,
                extra_attachments: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Type(TypeError::TypeCountMismatch { .. })));
    }
}
