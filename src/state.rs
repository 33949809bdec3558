use std::sync::Arc;

use crate::{auth::JwtKeys, config::AppConfig, users::service::UserService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserService>,
    pub keys: JwtKeys,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, users: Arc<dyn UserService>) -> Self {
        let keys = JwtKeys::new(&config.jwt);
        Self {
            config,
            users,
            keys,
        }
    }
}
