use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForwardError {
    #[error("Cannot decode request: {0}")]
    Decode(#[from] dns::DnsError),

    #[error("Upstream {addr} unreachable: {source}")]
    UpstreamUnreachable {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Upstream {addr} did not reply within {timeout:?}")]
    UpstreamTimeout { addr: SocketAddr, timeout: Duration },
}
