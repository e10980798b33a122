use std::sync::Arc;

use burrow_lifecycle::MappingLifecycle;

#[derive(Clone)]
pub struct AppState {
    lifecycle: Arc<dyn MappingLifecycle>,
}

impl AppState {
    pub fn new(lifecycle: Arc<dyn MappingLifecycle>) -> Self {
        Self { lifecycle }
    }

    pub fn lifecycle(&self) -> &dyn MappingLifecycle {
        self.lifecycle.as_ref()
    }
}
