use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Clone, Debug)]
pub struct BillingConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub debug: bool,
}

impl BillingConfig {
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://student.db".to_string());

        let max_connections = std::env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(5);

        let host = std::env::var("HOST")
            .ok()
            .and_then(|val| val.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        let port = std::env::var("PORT")
            .ok()
            .and_then(|val| val.parse::<u16>().ok())
            .unwrap_or(5000);

        let debug = std::env::var("DEBUG")
            .map(|val| parse_flag(&val))
            .unwrap_or(false);

        Self {
            database_url,
            max_connections,
            host,
            port,
            debug,
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    // RUST_LOG wins over this when set
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "student_billing=debug,tower_http=debug"
        } else {
            "student_billing=info,tower_http=info"
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://student.db".to_string(),
            max_connections: 5,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            debug: false,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
