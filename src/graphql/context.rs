use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::services::ConfigService;

#[derive(Clone)]
pub struct GraphQLContext {
    pub config_service: Arc<ConfigService>,
}

impl GraphQLContext {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            config_service: Arc::new(ConfigService::new(db)),
        }
    }
}
