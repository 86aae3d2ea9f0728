use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::repository::Repository;
use crate::service::auth_service::AuthService;
use crate::service::catalog_service::CatalogService;
use crate::service::tracking_service::TrackingService;

pub mod auth_service;
pub mod catalog_service;
pub mod error;
pub mod ingest_service;
pub mod tracking_service;

/// The services the API server hands out. The ingest service is not here:
/// only the scraper binary constructs it.
pub struct Services {
    pub catalog: Arc<CatalogService>,
    pub tracking: Arc<TrackingService>,
    pub auth: Arc<AuthService>,
}

impl Services {
    pub fn new(db: Arc<Repository>, config: &Config) -> Result<Self, AppError> {
        let auth = Arc::new(AuthService::new(db.clone(), config)?);

        Ok(Self {
            catalog: Arc::new(CatalogService::new(db.clone())),
            tracking: Arc::new(TrackingService::new(db.clone())),
            auth,
        })
    }
}
