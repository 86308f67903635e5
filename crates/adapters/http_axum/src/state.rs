//! Shared application state for axum handlers.

use std::sync::Arc;

use hbnb_app::ports::Storage;
use hbnb_app::services::review_service::ReviewService;
use hbnb_app::services::stats_service::StatsService;

/// Application state shared across all axum handlers.
///
/// Generic over the storage backend to avoid dynamic dispatch.
/// `Clone` is implemented manually so the storage itself does not need to be
/// `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<S> {
    /// Review CRUD service.
    pub review_service: Arc<ReviewService<S>>,
    /// Record counts.
    pub stats_service: Arc<StatsService<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            review_service: Arc::clone(&self.review_service),
            stats_service: Arc::clone(&self.stats_service),
        }
    }
}

impl<S: Storage> AppState<S> {
    /// Create a new application state from service instances.
    pub fn new(review_service: ReviewService<S>, stats_service: StatsService<S>) -> Self {
        Self {
            review_service: Arc::new(review_service),
            stats_service: Arc::new(stats_service),
        }
    }
}

impl<S: Storage + Clone> AppState<S> {
    /// Create both services over one storage backend.
    pub fn from_storage(storage: S) -> Self {
        Self::new(
            ReviewService::new(storage.clone()),
            StatsService::new(storage),
        )
    }
}
