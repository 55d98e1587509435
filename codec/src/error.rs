/// Errors raised while framing bytes onto or off of a [`tokio::net`]
/// stream. Wire-level decode failures ([`dubbo_wire_protocol::WireError`])
/// are folded in rather than duplicated.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("malformed frame")]
    Wire(#[from] dubbo_wire_protocol::WireError),

    #[error("frame body of {declared} bytes exceeds the {limit} byte limit")]
    FrameTooLarge { declared: u32, limit: u32 },
}
