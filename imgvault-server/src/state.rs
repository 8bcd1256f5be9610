//! Application state shared across handlers

use std::sync::Arc;

use imgvault_store::ImageDriver;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    driver: Box<dyn ImageDriver>,
}

impl AppState {
    pub fn new(driver: Box<dyn ImageDriver>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { driver }),
        }
    }

    pub fn driver(&self) -> &dyn ImageDriver {
        self.inner.driver.as_ref()
    }
}
