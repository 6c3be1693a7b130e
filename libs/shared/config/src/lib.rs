use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: [u8; 4],
    pub port: u16,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: [0, 0, 0, 0],
            port: env::var("MEDNOVA_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| {
                    warn!("MEDNOVA_PORT not set or invalid, using 3000");
                    3000
                }),
            seed_demo_data: env::var("MEDNOVA_SEED_DEMO_DATA")
                .map(|v| v != "0" && v.to_lowercase() != "false")
                .unwrap_or(true),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: [0, 0, 0, 0],
            port: 3000,
            seed_demo_data: true,
        }
    }
}
