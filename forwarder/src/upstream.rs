use bytes::BytesMut;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;

use crate::error::ForwardError;

/// One request/response round trip with a resolver.
#[allow(async_fn_in_trait)]
pub trait Upstream {
    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>, ForwardError>;
}

/// Relays over UDP, using a fresh socket for every exchange.
#[derive(Debug, Clone)]
pub struct UdpUpstream {
    server_addr: SocketAddr,
    timeout: Option<Duration>,
}

impl UdpUpstream {
    pub fn new(server_addr: SocketAddr, timeout: Option<Duration>) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    async fn round_trip(&self, request: &[u8]) -> std::io::Result<Vec<u8>> {
        let local_addr: SocketAddr = match self.server_addr {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let sock = UdpSocket::bind(local_addr).await?;
        sock.connect(self.server_addr).await?;

        let send_size = sock.send(request).await?;
        tracing::debug!("sent {} bytes to upstream {}", send_size, self.server_addr);

        let mut resp_buf = BytesMut::with_capacity(dns::MAX_MESSAGE_SIZE);
        let response_size = sock.recv_buf(&mut resp_buf).await?;
        tracing::debug!(
            "received udp response from {}, length: {}",
            self.server_addr,
            response_size
        );

        Ok(resp_buf[0..response_size].to_vec())
    }
}

impl Upstream for UdpUpstream {
    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>, ForwardError> {
        let unreachable = |source| ForwardError::UpstreamUnreachable {
            addr: self.server_addr,
            source,
        };

        match self.timeout {
            None => self.round_trip(request).await.map_err(unreachable),
            Some(timeout) => match tokio::time::timeout(timeout, self.round_trip(request)).await {
                Ok(ret) => ret.map_err(unreachable),
                Err(_) => Err(ForwardError::UpstreamTimeout {
                    addr: self.server_addr,
                    timeout,
                }),
            },
        }
    }
}
