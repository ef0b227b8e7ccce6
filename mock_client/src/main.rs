use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};

use dns::{Message, Question};
use log::{info, warn};
use tokio::net::UdpSocket;

// Usage: mock_client [server address] [name...]
//
// Every name becomes one A question of a single query message.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::try_init();

    let mut args = std::env::args().skip(1);
    let server_address = args.next().unwrap_or("127.0.0.1:2053".to_string());
    let addr = server_address.parse::<SocketAddr>()?;

    let mut names: Vec<String> = args.collect();
    if names.is_empty() {
        names.push("codecrafters.io".to_string());
    }

    let questions = names.iter().map(|n| Question::a_record(n)).collect();
    let request = Message::query(std::process::id() as u16, questions).to_bytes()?;

    let sock = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    sock.send_to(&request, addr).await?;
    info!("sent {} questions ({} bytes) to {}", names.len(), request.len(), addr);

    let mut buf = vec![0; dns::MAX_MESSAGE_SIZE];
    let n = sock.recv(&mut buf).await?;
    info!("received {} bytes", n);

    let response = match dns::decode_response(&buf[0..n]) {
        Ok(r) => r,
        Err(e) => {
            // e.g. a relayed reply missing answers it counts
            warn!("cannot fully decode response: {}", e);
            let header = dns::Header::parse(&buf[0..n])?;
            println!("{:?}", header);
            return Ok(());
        }
    };

    println!("{:?}", response.header);
    for q in &response.questions {
        println!("question: {} type {} class {}", q.name, q.qtype, q.qclass);
    }
    for a in &response.answers {
        match a.ipv4_address() {
            Some(ip) => println!("answer: {} ttl {} -> {}", a.name, a.ttl, Ipv4Addr::from(ip)),
            None => println!("answer: {} ttl {} -> {:?}", a.name, a.ttl, a.rdata),
        }
    }

    Ok(())
}
