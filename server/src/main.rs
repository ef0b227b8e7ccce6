use std::error::Error;
use std::net::SocketAddr;

use configuration::{get_config, ForwarderConfiguration};
use forwarder::{Responder, UdpUpstream};
use tokio::net::UdpSocket;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod udp_recv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: cli_args::CliArgs = argh::from_env();
    let mut config: ForwarderConfiguration = get_config(args.config)?;
    if let Some(resolver) = args.resolver {
        config.set_upstream(resolver);
    }

    let upstream = config.upstream.as_ref().map(|u| {
        tracing::info!("Upstream resolver: {}, timeout: {:?}", u.server_address, u.timeout());
        UdpUpstream::new(u.server_address, u.timeout())
    });
    let parallel = config.upstream.as_ref().map_or(false, |u| u.parallel);
    let responder = Responder::new(upstream).with_parallel_relay(parallel);

    let address = config.server.bind_address();
    let socket = UdpSocket::bind(address).await?;
    tracing::info!("Listening on: {}, pid: {}", address, std::process::id());

    let mut buf = [0u8; dns::MAX_MESSAGE_SIZE];
    loop {
        let Some((size, source)) = udp_recv::udp_recv(&socket, &mut buf).await else {
            continue;
        };

        let request = &buf[..size];
        tracing::debug!("Received {} bytes from {}", size, source);

        serve(&socket, &responder, request, source).await;
    }
}

// Everything that can go wrong with one datagram stays with that datagram.
async fn serve(socket: &UdpSocket, responder: &Responder<UdpUpstream>, request: &[u8], source: SocketAddr) {
    let response = match responder.handle(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Dropping request from {}: {}", source, e);
            return;
        }
    };

    if let Err(e) = socket.send_to(&response, source).await {
        tracing::error!("Failed to send response to {}: {}", source, e);
    }
}
