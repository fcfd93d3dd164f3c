use super::core::Router;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Publication point for router snapshots.
///
/// Readers call [`load`](Self::load) and get a complete, immutable `Router`;
/// a new snapshot only becomes visible once it is fully built and passed to
/// [`publish`](Self::publish). Loads never block.
#[derive(Debug)]
pub struct RouterHandle {
    current: ArcSwap<Router>,
}

impl RouterHandle {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<Router> {
        self.current.load_full()
    }

    /// Replace the current snapshot. In-flight readers keep the one they loaded.
    pub fn publish(&self, router: Router) {
        let routes_count = router.collection().len();
        self.current.store(Arc::new(router));
        info!(routes_count, "Router snapshot published");
    }
}
