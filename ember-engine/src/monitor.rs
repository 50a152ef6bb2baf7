//! Telemetry shared between the audio thread and readers

use crate::meters::Meters;
use crate::scope::ScopeBuffer;

/// Meters and scope, handed out as `Arc<Monitor>`
#[derive(Debug)]
pub struct Monitor {
    pub meters: Meters,
    pub scope: ScopeBuffer,
}

impl Monitor {
    pub fn new(scope_capacity: usize) -> Self {
        Self {
            meters: Meters::new(),
            scope: ScopeBuffer::new(scope_capacity),
        }
    }

    /// Zero the scope and restore default meter values
    pub fn clear(&self) {
        self.meters.reset();
        self.scope.clear();
    }
}
