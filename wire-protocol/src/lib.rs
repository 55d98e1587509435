//! Dubbo frame encoding and decoding on top of Hessian-2 (`spec.md` §3,
//! §4.B-D). This crate owns the wire format; it knows nothing about
//! sockets, registries, or service handlers.

mod decoder;
mod encoder;
mod error;
mod header;
mod reply;
mod request;
mod session;

pub use decoder::{decode_double, decode_int, decode_long, decode_string, decode_value, Cursor};
pub use encoder::{encode_double, encode_int, encode_long, encode_string, encode_value};
pub use error::WireError;
pub use header::{
    write_request_header, ReplyHeader, HEADER_LEN, MAGIC, REPLY_STATUS_OK,
    REQUEST_FLAGS_TWO_WAY_HESSIAN2,
};
pub use reply::{decode_reply, decode_reply_body};
pub use request::{next_invoke_id, Request, DEFAULT_DUBBO_VERSION};
pub use session::{DecoderSession, EncoderSession};
