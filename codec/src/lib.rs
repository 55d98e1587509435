//! Frames [`dubbo_wire_protocol`] requests and replies onto a byte stream,
//! in the style of `tokio_util::codec::{Encoder, Decoder}`.

mod error;

use bytes::{Buf as _, BytesMut};
use dubbo_types::Value;
use dubbo_wire_protocol::{next_invoke_id, ReplyHeader, Request, HEADER_LEN};
use error_stack::{Report, ResultExt as _};
use tokio_util::codec::{Decoder, Encoder};

pub use error::CodecError;

/// A 16 MiB reply body is already absurd for an RPC call; anything past
/// that is treated as a malformed or adversarial frame rather than read
/// into memory.
pub const MAX_BODY_LEN: u32 = 16 * 1024 * 1024;

/// A request paired with the invoke-id it was assigned, so the caller can
/// match it against the corresponding [`Reply`].
#[derive(Debug, Clone)]
pub struct Outbound {
    pub invoke_id: u64,
    pub request: Request,
}

impl Outbound {
    /// Assigns the next process-wide invoke-id to `request`.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            invoke_id: next_invoke_id(),
            request,
        }
    }
}

/// A decoded reply frame. `outcome` is `Err(status)` for any non-OK
/// status byte; the corresponding body is not parsed (`spec.md`
/// Non-goals — decoding the exception payload itself is out of scope).
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub invoke_id: u64,
    pub outcome: Result<Value, u8>,
}

/// Encodes [`Outbound`] calls as complete request frames.
#[derive(Debug, Default, Copy, Clone)]
pub struct RequestEncoder {
    _private: (),
}

impl Encoder<Outbound> for RequestEncoder {
    type Error = Report<CodecError>;

    fn encode(&mut self, item: Outbound, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let frame = item
            .request
            .encode(item.invoke_id)
            .map_err(CodecError::from)
            .attach_printable_lazy(|| format!("encoding request invoke_id={}", item.invoke_id))?;
        dst.extend_from_slice(&frame);
        Ok(())
    }
}

/// Decodes a byte stream into complete [`Reply`] frames, buffering until
/// the header's declared body length is fully available.
#[derive(Debug, Default)]
pub struct ReplyDecoder {
    max_body_len: u32,
}

impl ReplyDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_body_len: MAX_BODY_LEN,
        }
    }

    #[must_use]
    pub fn with_max_body_len(max_body_len: u32) -> Self {
        Self { max_body_len }
    }
}

impl Decoder for ReplyDecoder {
    type Error = Report<CodecError>;
    type Item = Reply;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < HEADER_LEN {
            return Ok(None);
        }

        let header_bytes: [u8; HEADER_LEN] = src[..HEADER_LEN].try_into().expect("checked length");
        let header = ReplyHeader::parse(&header_bytes)
            .map_err(CodecError::from)
            .attach_printable("parsing reply header")?;

        if header.body_len > self.max_body_len {
            return Err(Report::new(CodecError::FrameTooLarge {
                declared: header.body_len,
                limit: self.max_body_len,
            }));
        }

        let frame_len = HEADER_LEN + header.body_len as usize;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(HEADER_LEN);
        let body = src.split_to(header.body_len as usize);

        let outcome = if header.is_ok() {
            let value = dubbo_wire_protocol::decode_reply_body(&body)
                .map_err(CodecError::from)
                .attach_printable_lazy(|| format!("decoding reply body invoke_id={}", header.invoke_id))?;
            Ok(value)
        } else {
            Err(header.status)
        };

        Ok(Some(Reply {
            invoke_id: header.invoke_id,
            outcome,
        }))
    }
}

#[cfg(test)]
mod tests {
    use dubbo_wire_protocol::{write_request_header, MAGIC, REPLY_STATUS_OK};

    use super::*;

    #[test]
    fn encodes_a_request_into_a_complete_frame() {
        let mut encoder = RequestEncoder::default();
        let mut buf = BytesMut::new();
        let outbound = Outbound {
            invoke_id: 9,
            request: Request::new("com.x.Foo", "", "bar", "", vec![]),
        };
        encoder.encode(outbound, &mut buf).unwrap();
        assert!(buf.len() > HEADER_LEN);
        assert_eq!(&buf[0..2], &MAGIC);
    }

    #[test]
    fn decoder_waits_for_a_full_frame() {
        let mut decoder = ReplyDecoder::new();
        let mut buf = BytesMut::new();
        write_request_header_for_reply(&mut buf, 1, REPLY_STATUS_OK, 5);
        buf.extend_from_slice(&[b'N']); // only 1 of 5 declared body bytes
        assert!(decoder.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn decoder_yields_a_reply_once_the_frame_is_complete() {
        let mut decoder = ReplyDecoder::new();
        let mut buf = BytesMut::new();
        write_request_header_for_reply(&mut buf, 1, REPLY_STATUS_OK, 1);
        buf.extend_from_slice(&[b'N']);
        let reply = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(reply.invoke_id, 1);
        assert_eq!(reply.outcome, Ok(Value::Null));
        assert!(buf.is_empty());
    }

    #[test]
    fn non_ok_status_surfaces_as_err_without_parsing_body() {
        let mut decoder = ReplyDecoder::new();
        let mut buf = BytesMut::new();
        write_request_header_for_reply(&mut buf, 2, 0x40, 0);
        let reply = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(reply.outcome, Err(0x40));
    }

    #[test]
    fn oversized_frame_is_rejected_before_buffering_body() {
        let mut decoder = ReplyDecoder::with_max_body_len(4);
        let mut buf = BytesMut::new();
        write_request_header_for_reply(&mut buf, 3, REPLY_STATUS_OK, 100);
        assert!(decoder.decode(&mut buf).is_err());
    }

    fn write_request_header_for_reply(buf: &mut BytesMut, invoke_id: u64, status: u8, body_len: u32) {
        let mut header = Vec::new();
        write_request_header(&mut header, invoke_id, body_len);
        header[3] = status;
        buf.extend_from_slice(&header);
    }
}
