//! Business logic services

pub mod catalog;
pub mod clock;
pub mod stats;

use std::sync::Arc;

use crate::repository::Repository;

pub use clock::{Clock, FixedClock, SystemClock};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), clock),
            stats: stats::StatsService::new(repository),
        }
    }
}
