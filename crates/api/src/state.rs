use std::sync::Arc;

use copydesk_engine::CategoryManager;
use tokio::sync::Mutex;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// The manager sits behind a `Mutex` on purpose: category operations must
/// run one at a time per collection (a reorder commit may not overlap with
/// another reorder, delete, or toggle), and the lock is where that
/// serialization happens.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<Mutex<CategoryManager>>,
}

impl AppState {
    pub fn new(manager: CategoryManager) -> Self {
        Self {
            manager: Arc::new(Mutex::new(manager)),
        }
    }
}
