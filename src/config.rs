use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default port for the web server
pub const DEFAULT_PORT: u16 = 8000;

/// Google OAuth consent page
pub const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Google OAuth token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google Calendar v3 API root
pub const DEFAULT_CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Main configuration structure for the server
#[derive(Debug, Clone)]
pub struct Config {
    /// Google OAuth client ID
    pub google_client_id: String,
    /// Google OAuth client secret
    pub google_client_secret: String,
    /// Redirect URL registered with Google, pointing back at /auth/redirect
    pub redirect_url: String,
    /// Address to bind the web server to
    pub bind_address: IpAddr,
    /// Port to bind the web server to
    pub port: u16,
    pub auth_url: String,
    pub token_url: String,
    pub calendar_api_url: String,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Required environment variables
        let google_client_id = env::var("CLIENT_ID").map_err(|_| env_error("CLIENT_ID"))?;
        let google_client_secret =
            env::var("CLIENT_SECRET").map_err(|_| env_error("CLIENT_SECRET"))?;
        let redirect_url = env::var("REDIRECT_URL").map_err(|_| env_error("REDIRECT_URL"))?;

        let port = match env::var("PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|_| config_error(&format!("Invalid PORT format: {}", port)))?,
            Err(_) => DEFAULT_PORT,
        };

        let bind_address = match env::var("BIND_ADDRESS") {
            Ok(address) => address
                .parse::<IpAddr>()
                .map_err(|_| config_error(&format!("Invalid BIND_ADDRESS format: {}", address)))?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        // Endpoint overrides, mostly useful against a local stand-in
        let auth_url = env::var("GOOGLE_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string());
        let token_url =
            env::var("GOOGLE_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string());
        let calendar_api_url = env::var("GOOGLE_CALENDAR_API_URL")
            .unwrap_or_else(|_| DEFAULT_CALENDAR_API_URL.to_string());

        Ok(Config {
            google_client_id,
            google_client_secret,
            redirect_url,
            bind_address,
            port,
            auth_url,
            token_url,
            calendar_api_url,
        })
    }

    /// Create a configuration with default endpoints and the given OAuth client
    pub fn new(client_id: &str, client_secret: &str, redirect_url: &str) -> Self {
        Config {
            google_client_id: client_id.to_string(),
            google_client_secret: client_secret.to_string(),
            redirect_url: redirect_url.to_string(),
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            calendar_api_url: DEFAULT_CALENDAR_API_URL.to_string(),
        }
    }

    /// Socket address the server listens on
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}
