mod error;
mod responder;
mod upstream;

pub use error::ForwardError;
pub use responder::{Responder, SYNTHETIC_RDATA, SYNTHETIC_TTL};
pub use upstream::{UdpUpstream, Upstream};
