//! HTTP server configuration

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct HttpServerConfig {
    /// Host to bind to
    #[arg(
        id = "http_host",
        long = "host",
        env = "FORMGATE_HOST",
        default_value = "0.0.0.0"
    )]
    pub host: String,

    /// Port to bind to
    #[arg(
        id = "http_port",
        short = 'p',
        long = "port",
        env = "FORMGATE_PORT",
        default_value_t = 8080
    )]
    pub port: u16,
}

impl HttpServerConfig {
    /// The socket address string handed to the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }
}
