use serde::{Deserialize, Serialize};

use self::backend::BackendConfig;
use self::gateway::GatewayConfig;
use self::session::SessionConfig;
use self::store::StoreConfig;

pub mod backend;
pub mod gateway;
pub mod session;
pub mod store;

#[derive(Default, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub gateway: GatewayConfig,
    pub store: StoreConfig,
    pub session: SessionConfig,
}

impl Config {
    pub fn new() -> Self {
        Config {
            backend: BackendConfig::new(),
            gateway: GatewayConfig::new(),
            store: StoreConfig::new(),
            session: SessionConfig::new(),
        }
    }
}
