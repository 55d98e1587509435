/// Errors raised while encoding a request frame or decoding a reply
/// frame.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("argument has no supported wire representation: {0}")]
    UnsupportedType(#[from] dubbo_types::TypeError),

    #[error("reply frame magic mismatch, found {found:02x?}")]
    BadMagic { found: [u8; 2] },

    #[error("unexpected end of input while decoding a {expected} value")]
    UnexpectedEof { expected: &'static str },

    #[error("unknown Hessian-2 tag byte 0x{tag:02x} while decoding a {context}")]
    UnknownTag { tag: u8, context: &'static str },

    #[error("class reference index {index} has no matching class definition in this frame")]
    UnknownClassRef { index: usize },

    #[error("list type-tag reference index {index} has no matching entry in this frame")]
    UnknownListTypeRef { index: usize },

    #[error("string chunk claims {claimed} bytes but only {available} remained")]
    TruncatedString { claimed: usize, available: usize },

    #[error("reply carries a remote exception status byte 0x{status:02x}")]
    RemoteException { status: u8 },
}
