//! A reference decoder that inverts every branch of the Hessian-2 encoder
//! (`spec.md` §4.B, §8 "parses back via a reference Hessian-2 decoder").
//!
//! This is intentionally scoped to the subset of the wire format this
//! crate's own encoder can produce. It is not a general-purpose Hessian-2
//! reader for arbitrary Java object graphs it has never seen — that
//! decision is recorded in `DESIGN.md`.

use dubbo_types::{NamedObject, Value};
use indexmap::IndexMap;

use crate::session::DecoderSession;
use crate::WireError;

pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self, context: &'static str) -> Result<u8, WireError> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or(WireError::UnexpectedEof { expected: context })
    }

    fn read_u8(&mut self, context: &'static str) -> Result<u8, WireError> {
        let byte = self.peek(context)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_exact(&mut self, len: usize, context: &'static str) -> Result<&'a [u8], WireError> {
        let end = self.pos + len;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or(WireError::TruncatedString {
                claimed: len,
                available: self.bytes.len().saturating_sub(self.pos),
            })?;
        let _ = context;
        self.pos = end;
        Ok(slice)
    }
}

pub fn decode_value(cursor: &mut Cursor<'_>, session: &mut DecoderSession) -> Result<Value, WireError> {
    let tag = cursor.peek("value")?;
    match tag {
        b'T' => {
            cursor.read_u8("bool")?;
            Ok(Value::Bool(true))
        }
        b'F' => {
            cursor.read_u8("bool")?;
            Ok(Value::Bool(false))
        }
        b'N' => {
            cursor.read_u8("null")?;
            Ok(Value::Null)
        }
        0x80..=0xbf | 0xc8..=0xcf | 0xd0..=0xd7 | b'I' => Ok(Value::Int32(decode_int(cursor)?)),
        0xd8..=0xef | 0xf0..=0xff | 0x38..=0x3f | 0x59 | b'L' => Ok(Value::Int64(decode_long(cursor)?)),
        0x5b..=0x5f | b'D' => Ok(Value::F64(decode_double(cursor)?)),
        0x00..=0x1f | 0x30..=0x33 | 0x52 | 0x53 => Ok(Value::Str(decode_string(cursor)?)),
        0x70..=0x76 | 0x56 => decode_list(cursor, session),
        0x60..=0x6f | b'O' | b'C' => decode_object(cursor, session),
        other => Err(WireError::UnknownTag {
            tag: other,
            context: "value",
        }),
    }
}

pub fn decode_int(cursor: &mut Cursor<'_>) -> Result<i32, WireError> {
    let tag = cursor.read_u8("int32")?;
    match tag {
        0x80..=0xbf => Ok(i32::from(tag) - 0x90),
        0xc8..=0xcf => {
            let low = i32::from(cursor.read_u8("int32")?);
            let high = i32::from(tag) - 0xc8;
            Ok((high << 8) | low)
        }
        0xd0..=0xd7 => {
            let mid = i32::from(cursor.read_u8("int32")?);
            let low = i32::from(cursor.read_u8("int32")?);
            let high = i32::from(tag) - 0xd4;
            Ok((high << 16) | (mid << 8) | low)
        }
        b'I' => {
            let bytes = cursor.read_exact(4, "int32")?;
            Ok(i32::from_be_bytes(bytes.try_into().expect("4 bytes")))
        }
        other => Err(WireError::UnknownTag {
            tag: other,
            context: "int32",
        }),
    }
}

pub fn decode_long(cursor: &mut Cursor<'_>) -> Result<i64, WireError> {
    let tag = cursor.read_u8("int64")?;
    match tag {
        0xd8..=0xef => Ok(i64::from(tag) - 0xe0),
        0xf0..=0xff => {
            let low = i64::from(cursor.read_u8("int64")?);
            let high = i64::from(tag) - 0xf8;
            Ok((high << 8) | low)
        }
        0x38..=0x3f => {
            let mid = i64::from(cursor.read_u8("int64")?);
            let low = i64::from(cursor.read_u8("int64")?);
            let high = i64::from(tag) - 0x3c;
            Ok((high << 16) | (mid << 8) | low)
        }
        0x59 => {
            let bytes = cursor.read_exact(4, "int64")?;
            Ok(i64::from(i32::from_be_bytes(bytes.try_into().expect("4 bytes"))))
        }
        b'L' => {
            let bytes = cursor.read_exact(8, "int64")?;
            Ok(i64::from_be_bytes(bytes.try_into().expect("8 bytes")))
        }
        other => Err(WireError::UnknownTag {
            tag: other,
            context: "int64",
        }),
    }
}

pub fn decode_double(cursor: &mut Cursor<'_>) -> Result<f64, WireError> {
    let tag = cursor.read_u8("double")?;
    match tag {
        0x5b => Ok(0.0),
        0x5c => Ok(1.0),
        0x5d => {
            let byte = cursor.read_u8("double")?;
            Ok(f64::from(byte as i8))
        }
        0x5e => {
            let bytes = cursor.read_exact(2, "double")?;
            Ok(f64::from(i16::from_be_bytes(bytes.try_into().expect("2 bytes"))))
        }
        0x5f => {
            let bytes = cursor.read_exact(4, "double")?;
            let millis = i32::from_be_bytes(bytes.try_into().expect("4 bytes"));
            Ok(f64::from(millis) / 1000.0)
        }
        b'D' => {
            let bytes = cursor.read_exact(8, "double")?;
            Ok(f64::from_be_bytes(bytes.try_into().expect("8 bytes")))
        }
        other => Err(WireError::UnknownTag {
            tag: other,
            context: "double",
        }),
    }
}

fn decode_string_bytes(cursor: &mut Cursor<'_>) -> Result<Vec<u8>, WireError> {
    let mut bytes = Vec::new();
    loop {
        let tag = cursor.read_u8("string")?;
        match tag {
            0x00..=0x1f => {
                let len = tag as usize;
                bytes.extend_from_slice(cursor.read_exact(len, "string")?);
                return Ok(bytes);
            }
            0x30..=0x33 => {
                let high = (tag - 0x30) as usize;
                let low = cursor.read_u8("string")? as usize;
                let len = (high << 8) | low;
                bytes.extend_from_slice(cursor.read_exact(len, "string")?);
                return Ok(bytes);
            }
            // 0x53 is also the ASCII byte for 'S', the accepted single-chunk alias.
            0x52 | 0x53 => {
                let high = cursor.read_u8("string")? as usize;
                let low = cursor.read_u8("string")? as usize;
                let len = (high << 8) | low;
                bytes.extend_from_slice(cursor.read_exact(len, "string")?);
                if tag == 0x52 {
                    continue;
                }
                return Ok(bytes);
            }
            other => {
                return Err(WireError::UnknownTag {
                    tag: other,
                    context: "string",
                })
            }
        }
    }
}

pub fn decode_string(cursor: &mut Cursor<'_>) -> Result<String, WireError> {
    let bytes = decode_string_bytes(cursor)?;
    String::from_utf8(bytes).map_err(|_| WireError::UnexpectedEof {
        expected: "utf8 string",
    })
}

fn is_string_tag(byte: u8) -> bool {
    matches!(byte, 0x00..=0x1f | 0x30..=0x33 | 0x52 | 0x53)
}

fn decode_list(cursor: &mut Cursor<'_>, session: &mut DecoderSession) -> Result<Value, WireError> {
    let tag = cursor.read_u8("list")?;
    let short_length = if tag == 0x56 { None } else { Some((tag - 0x70) as usize) };

    let type_tag_byte = cursor.peek("list type tag")?;
    let type_tag = if is_string_tag(type_tag_byte) {
        let tag = decode_string(cursor)?;
        session.list_types.push(tag.clone());
        tag
    } else {
        let index = decode_int(cursor)? as usize;
        session
            .list_types
            .get(index)
            .cloned()
            .ok_or(WireError::UnknownListTypeRef { index })?
    };
    let _ = type_tag;

    let length = match short_length {
        Some(length) => length,
        None => decode_int(cursor)? as usize,
    };

    let mut items = Vec::with_capacity(length);
    for _ in 0..length {
        items.push(decode_value(cursor, session)?);
    }
    Ok(Value::List(items))
}

fn decode_object(cursor: &mut Cursor<'_>, session: &mut DecoderSession) -> Result<Value, WireError> {
    let tag = cursor.peek("object")?;
    if tag == b'C' {
        cursor.read_u8("object")?;
        let path = decode_string(cursor)?;
        let field_count = decode_int(cursor)? as usize;
        let mut names = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            names.push(decode_string(cursor)?);
        }
        session.class_defs.push((path, names));
    }

    let tag = cursor.read_u8("object")?;
    let index = match tag {
        0x60..=0x6f => (tag - 0x60) as usize,
        b'O' => decode_int(cursor)? as usize,
        other => {
            return Err(WireError::UnknownTag {
                tag: other,
                context: "object",
            })
        }
    };
    let (path, names) = session
        .class_defs
        .get(index)
        .cloned()
        .ok_or(WireError::UnknownClassRef { index })?;

    let mut fields = IndexMap::new();
    for name in names {
        fields.insert(name, decode_value(cursor, session)?);
    }
    Ok(Value::Object(NamedObject { path, fields }))
}
