//! Mount liveness for async completions.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// Shared flag that is true while the owning view is mounted.
///
/// Clones share the flag. The view revokes it on teardown; completions check
/// it before applying their results.
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn revoke(&self) {
        self.0.set(false);
    }

    /// Await `future`, keeping its output only if still mounted.
    pub async fn guard<F: Future>(&self, future: F) -> Option<F::Output> {
        let output = future.await;
        if self.is_alive() {
            Some(output)
        } else {
            tracing::debug!("discarding result for unmounted view");
            None
        }
    }
}
