//! The Hessian-2 encoder (`spec.md` §4.B). A pure function from
//! `(session, value)` to appended bytes; all multi-byte integer fields
//! are big-endian.

use dubbo_types::{NamedObject, Value};

use crate::session::EncoderSession;
use crate::WireError;

pub fn encode_value(out: &mut Vec<u8>, session: &mut EncoderSession, value: &Value) -> Result<(), WireError> {
    match value {
        Value::Bool(b) => {
            out.push(if *b { b'T' } else { b'F' });
        }
        Value::Int32(v) => encode_int(out, *v),
        Value::Int64(v) => encode_long(out, *v),
        Value::F64(v) => encode_double(out, *v),
        Value::Str(s) => encode_string(out, s),
        Value::Null => out.push(b'N'),
        Value::Object(object) => encode_object(out, session, object)?,
        Value::List(items) => encode_list(out, session, items)?,
    }
    Ok(())
}

pub fn encode_int(out: &mut Vec<u8>, v: i32) {
    if (-0x10..=0x2f).contains(&v) {
        out.push((v + 0x90) as u8);
    } else if (-0x800..=0x7ff).contains(&v) {
        out.push((0xc8 + (v >> 8)) as u8);
        out.push((v & 0xff) as u8);
    } else if (-0x40000..=0x3ffff).contains(&v) {
        out.push((0xd4 + (v >> 16)) as u8);
        out.push(((v >> 8) & 0xff) as u8);
        out.push((v & 0xff) as u8);
    } else {
        out.push(b'I');
        out.extend_from_slice(&v.to_be_bytes());
    }
}

pub fn encode_long(out: &mut Vec<u8>, v: i64) {
    if (-0x08..=0x0f).contains(&v) {
        out.push((v + 0xe0) as u8);
    } else if (-0x800..=0x7ff).contains(&v) {
        out.push((0xf8 + (v >> 8)) as u8);
        out.push((v & 0xff) as u8);
    } else if (-0x40000..=0x3ffff).contains(&v) {
        out.push((0x3c + (v >> 16)) as u8);
        out.push(((v >> 8) & 0xff) as u8);
        out.push((v & 0xff) as u8);
    } else if let Ok(narrow) = i32::try_from(v) {
        out.push(0x59);
        out.extend_from_slice(&narrow.to_be_bytes());
    } else {
        out.push(b'L');
        out.extend_from_slice(&v.to_be_bytes());
    }
}

pub fn encode_double(out: &mut Vec<u8>, v: f64) {
    if v == 0.0 {
        out.push(0x5b);
        return;
    }
    if v == 1.0 {
        out.push(0x5c);
        return;
    }
    if v.fract() == 0.0 && v >= -128.0 && v <= 127.0 {
        out.push(0x5d);
        out.push(v as i8 as u8);
        return;
    }
    if v.fract() == 0.0 && v >= -32768.0 && v <= 32767.0 {
        out.push(0x5e);
        out.extend_from_slice(&(v as i16).to_be_bytes());
        return;
    }
    let millis = v * 1000.0;
    if millis.fract() == 0.0 && millis >= i32::MIN as f64 && millis <= i32::MAX as f64 {
        let millis = millis as i32;
        if f64::from(millis) / 1000.0 == v {
            out.push(0x5f);
            out.extend_from_slice(&millis.to_be_bytes());
            return;
        }
    }
    out.push(b'D');
    out.extend_from_slice(&v.to_be_bytes());
}

pub fn encode_string(out: &mut Vec<u8>, s: &str) {
    let len = s.len();
    if len <= 0x1f {
        out.push(len as u8);
        out.extend_from_slice(s.as_bytes());
    } else if len <= 0x3ff {
        out.push(0x30 + ((len >> 8) as u8));
        out.push((len & 0xff) as u8);
        out.extend_from_slice(s.as_bytes());
    } else {
        let chunks = chunk_str(s, 0xffff);
        let last = chunks.len() - 1;
        for (index, chunk) in chunks.into_iter().enumerate() {
            let marker = if index == last { 0x53 } else { 0x52 };
            let chunk_len = chunk.len();
            out.push(marker);
            out.push(((chunk_len >> 8) & 0xff) as u8);
            out.push((chunk_len & 0xff) as u8);
            out.extend_from_slice(chunk.as_bytes());
        }
    }
}

/// Splits `s` into the fewest `&str` slices whose UTF-8 byte length does
/// not exceed `max_len`, never cutting a multi-byte character in half.
fn chunk_str(s: &str, max_len: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut current_len = 0;
    for (index, ch) in s.char_indices() {
        let ch_len = ch.len_utf8();
        if current_len + ch_len > max_len {
            chunks.push(&s[start..index]);
            start = index;
            current_len = 0;
        }
        current_len += ch_len;
    }
    chunks.push(&s[start..]);
    chunks
}

fn encode_object(out: &mut Vec<u8>, session: &mut EncoderSession, object: &NamedObject) -> Result<(), WireError> {
    if object.is_array_list() {
        if let Some(Value::List(items)) = object.fields.get("elementData") {
            return encode_list(out, session, items);
        }
    }

    let (index, is_new) = session.register_class(&object.path);
    if is_new {
        out.push(b'C');
        encode_string(out, &object.path);
        encode_int(out, object.fields.len() as i32);
        for name in object.fields.keys() {
            encode_string(out, name);
        }
    }

    if index <= 0x0f {
        out.push(0x60 + index as u8);
    } else {
        out.push(b'O');
        encode_int(out, index as i32);
    }
    for value in object.fields.values() {
        encode_value(out, session, value)?;
    }
    Ok(())
}

fn list_type_tag(first: &Value) -> Result<&'static str, WireError> {
    Ok(match first {
        Value::Bool(_) => "[boolean",
        Value::Int32(_) | Value::Int64(_) => "[int",
        Value::F64(_) => "[double",
        Value::Str(_) => "[string",
        Value::Object(_) => "[object",
        Value::Null | Value::List(_) => {
            return Err(WireError::UnsupportedType(dubbo_types::TypeError::UnsupportedType {
                description: format!("list element shape {} has no wire list-type tag", first.shape_name()),
            }))
        }
    })
}

fn encode_list(out: &mut Vec<u8>, session: &mut EncoderSession, items: &[Value]) -> Result<(), WireError> {
    let Some(first) = items.first() else {
        // Empty lists cannot be typed from their contents; encode as null.
        out.push(b'N');
        return Ok(());
    };
    for (index, item) in items.iter().enumerate().skip(1) {
        if !item.same_shape(first) {
            return Err(WireError::UnsupportedType(dubbo_types::TypeError::HeterogeneousList {
                first: first.shape_name(),
                other: item.shape_name(),
                index,
            }));
        }
    }

    let tag = list_type_tag(first)?;
    let (type_index, is_new) = session.register_list_type(tag);
    let length = items.len();

    if length < 7 {
        out.push(0x70 + length as u8);
    } else {
        out.push(0x56);
    }
    if is_new {
        encode_string(out, tag);
    } else {
        encode_int(out, type_index as i32);
    }
    if length >= 7 {
        encode_int(out, length as i32);
    }
    for item in items {
        encode_value(out, session, item)?;
    }
    Ok(())
}
