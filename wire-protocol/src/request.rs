//! Request frame assembly (`spec.md` §4.C "Request framer").

use std::sync::atomic::{AtomicU64, Ordering};

use dubbo_types::Value;

use crate::encoder::{encode_string, encode_value};
use crate::header::{write_request_header, HEADER_LEN};
use crate::session::EncoderSession;
use crate::WireError;

static NEXT_INVOKE_ID: AtomicU64 = AtomicU64::new(1);

/// Returns a process-wide monotonically increasing invoke-id. Atomic
/// fetch-and-add, per `spec.md` §5 "Invoke-id counter".
pub fn next_invoke_id() -> u64 {
    NEXT_INVOKE_ID.fetch_add(1, Ordering::Relaxed)
}

pub const DEFAULT_DUBBO_VERSION: &str = "2.4.10";

/// One outgoing Dubbo call, ready to be encoded into a full frame. The
/// body is always assembled in the fixed order from `spec.md` §4.C:
/// dubbo version, service path, service version, method, parameter-type
/// descriptor, each argument, then the attachments map.
#[derive(Debug, Clone)]
pub struct Request {
    pub dubbo_version: String,
    pub service_path: String,
    pub service_version: String,
    pub method: String,
    pub parameter_descriptor: String,
    pub arguments: Vec<Value>,
    pub extra_attachments: Vec<(String, String)>,
}

impl Request {
    pub fn new(
        service_path: impl Into<String>,
        service_version: impl Into<String>,
        method: impl Into<String>,
        parameter_descriptor: impl Into<String>,
        arguments: Vec<Value>,
    ) -> Self {
        Self {
            dubbo_version: DEFAULT_DUBBO_VERSION.to_owned(),
            service_path: service_path.into(),
            service_version: service_version.into(),
            method: method.into(),
            parameter_descriptor: parameter_descriptor.into(),
            arguments,
            extra_attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dubbo_version(mut self, version: impl Into<String>) -> Self {
        self.dubbo_version = version.into();
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_attachments.push((key.into(), value.into()));
        self
    }

    /// `path`, `interface`, and `version` are always present, ahead of any
    /// caller-supplied extras, per `spec.md` §4.C.
    fn attachments(&self) -> Vec<(&str, &str)> {
        let mut attachments = vec![
            ("path", self.service_path.as_str()),
            ("interface", self.service_path.as_str()),
            ("version", self.service_version.as_str()),
        ];
        attachments.extend(
            self.extra_attachments
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        attachments
    }

    fn encode_body(&self) -> Result<Vec<u8>, WireError> {
        let mut body = Vec::new();
        let mut session = EncoderSession::new();

        encode_string(&mut body, &self.dubbo_version);
        encode_string(&mut body, &self.service_path);
        encode_string(&mut body, &self.service_version);
        encode_string(&mut body, &self.method);
        encode_string(&mut body, &self.parameter_descriptor);

        for argument in &self.arguments {
            encode_value(&mut body, &mut session, argument)?;
        }

        body.push(b'H');
        for (key, value) in self.attachments() {
            encode_string(&mut body, key);
            encode_string(&mut body, value);
        }
        body.push(b'Z');

        Ok(body)
    }

    /// Assembles the full frame: header with `invoke_id` and the body's
    /// length, followed by the body.
    pub fn encode(&self, invoke_id: u64) -> Result<Vec<u8>, WireError> {
        let body = self.encode_body()?;
        let mut frame = Vec::with_capacity(HEADER_LEN + body.len());
        write_request_header(&mut frame, invoke_id, body.len() as u32);
        frame.extend_from_slice(&body);
        Ok(frame)
    }
}
