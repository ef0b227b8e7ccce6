use argh::FromArgs;
use std::net::SocketAddr;
use std::path::PathBuf;

fn default_config_path() -> PathBuf {
    PathBuf::from("./forwarder_config.toml")
}

#[derive(Debug, FromArgs)]
#[argh(description = "UDP DNS responder that answers locally or relays to an upstream resolver")]
pub struct CliArgs {
    #[argh(
        option,
        description = "config file path, default: './forwarder_config.toml'",
        default = "default_config_path()"
    )]
    pub config: PathBuf,

    #[argh(
        option,
        description = "upstream resolver address, e.g. 8.8.8.8:53, overrides the config file"
    )]
    pub resolver: Option<SocketAddr>,
}
