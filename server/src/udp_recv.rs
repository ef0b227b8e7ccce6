use std::net::SocketAddr;
use tokio::net::UdpSocket;

// Errors coming back from a previous send_to (ICMP port unreachable and the
// like) surface on the next recv. They concern one peer, not the socket.
pub async fn udp_recv(socket: &UdpSocket, buf: &mut [u8]) -> Option<(usize, SocketAddr)> {
    match socket.recv_from(buf).await {
        Ok(received) => Some(received),
        Err(e) => {
            if is_connection_error(&e) {
                tracing::debug!("UDP recv connection error, err: {}", e);
                return None;
            }

            tracing::error!("UDP recv error, err: {}", e);
            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            None
        }
    }
}

fn is_connection_error(e: &std::io::Error) -> bool {
    matches!(
        e.kind(),
        std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::ConnectionReset
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_errors() {
        assert!(is_connection_error(&std::io::ErrorKind::ConnectionReset.into()));
        assert!(!is_connection_error(&std::io::ErrorKind::PermissionDenied.into()));
    }

    #[tokio::test]
    async fn test_recv() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(&[1, 2, 3], server.local_addr().unwrap()).await.unwrap();

        let mut buf = [0u8; 512];
        let (n, peer) = udp_recv(&server, &mut buf).await.unwrap();
        assert_eq!(&buf[..n], &[1, 2, 3]);
        assert_eq!(peer, client.local_addr().unwrap());
    }
}
