//! Reply decoding (`spec.md` §4.D "Reply decoder"). Distinguishes a
//! successful result from a remote exception by the status byte alone;
//! decoding the exception's own payload is out of scope (`spec.md`
//! Non-goals).

use dubbo_types::Value;

use crate::decoder::{decode_value, Cursor};
use crate::header::ReplyHeader;
use crate::session::DecoderSession;
use crate::WireError;

/// Decodes a reply body that is already known to carry a successful
/// result (`header.is_ok()`).
pub fn decode_reply_body(body: &[u8]) -> Result<Value, WireError> {
    let mut cursor = Cursor::new(body);
    let mut session = DecoderSession::new();
    decode_value(&mut cursor, &mut session)
}

/// Decodes a full reply: a non-OK status short-circuits into
/// [`WireError::RemoteException`] without attempting to parse `body`.
pub fn decode_reply(header: &ReplyHeader, body: &[u8]) -> Result<Value, WireError> {
    if !header.is_ok() {
        return Err(WireError::RemoteException {
            status: header.status,
        });
    }
    decode_reply_body(body)
}

#[cfg(test)]
mod tests {
    use dubbo_types::Value;

    use super::*;
    use crate::encoder::encode_value;
    use crate::header::REPLY_STATUS_OK;
    use crate::session::EncoderSession;

    fn ok_header(body_len: u32) -> ReplyHeader {
        ReplyHeader {
            status: REPLY_STATUS_OK,
            invoke_id: 1,
            body_len,
        }
    }

    #[test]
    fn decodes_a_successful_scalar_reply() {
        let mut body = Vec::new();
        let mut session = EncoderSession::new();
        encode_value(&mut body, &mut session, &Value::Str("ok".into())).unwrap();

        let decoded = decode_reply(&ok_header(body.len() as u32), &body).unwrap();
        assert_eq!(decoded, Value::Str("ok".into()));
    }

    #[test]
    fn non_ok_status_short_circuits_without_touching_body() {
        let header = ReplyHeader {
            status: 0x40,
            invoke_id: 1,
            body_len: 0,
        };
        let err = decode_reply(&header, &[]).unwrap_err();
        assert!(matches!(err, WireError::RemoteException { status: 0x40 }));
    }

    #[test]
    fn null_reply_decodes_as_null() {
        let body = vec![b'N'];
        let decoded = decode_reply(&ok_header(1), &body).unwrap();
        assert_eq!(decoded, Value::Null);
    }
}
