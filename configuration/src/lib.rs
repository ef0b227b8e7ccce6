use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Load `T` from a TOML file. A missing file is not an error, every field
/// then takes its default.
pub fn get_config<T: for<'de> Deserialize<'de>>(config_path: PathBuf) -> Result<T, config::ConfigError> {
    let f = config::File::from(config_path).required(false);
    let config = config::Config::builder().add_source(f).build()?;
    config.try_deserialize::<T>()
}

#[derive(Debug, Default, Deserialize)]
pub struct ForwarderConfiguration {
    #[serde(default)]
    pub server: ServerConfiguration,
    // absent: answer locally
    pub upstream: Option<UpstreamConfiguration>,
}

impl ForwarderConfiguration {
    /// Point the forwarder at `server_address`, keeping any other upstream
    /// settings already loaded.
    pub fn set_upstream(&mut self, server_address: SocketAddr) {
        match self.upstream.as_mut() {
            Some(upstream) => upstream.server_address = server_address,
            None => {
                self.upstream = Some(UpstreamConfiguration {
                    server_address,
                    timeout_ms: None,
                    parallel: false,
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServerConfiguration {
    ip_address: IpAddr,
    port: u16,
}

impl ServerConfiguration {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.ip_address, self.port)
    }
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            ip_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 2053,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfiguration {
    pub server_address: SocketAddr,
    // absent: wait for the upstream reply forever
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub parallel: bool,
}

impl UpstreamConfiguration {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
