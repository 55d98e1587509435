//! Protocol handler and client facade (`spec.md` §4.F, §4.H): turns a
//! validated call spec into a wire frame, sends it, and decodes the
//! reply. Endpoint and registry resolution live here; wire format lives
//! in `dubbo_wire_protocol`.

mod coercion;
mod endpoint;
mod error;
mod facade;
mod handler;
mod transport;

pub use endpoint::{parse_endpoint, Endpoint};
pub use error::ClientError;
pub use facade::{ClientFacade, Target};
pub use handler::{CallSpec, DubboHandler};
pub use transport::{ReplyFrame, TcpTransport, Transport};
