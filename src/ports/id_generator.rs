//! IdGenerator port - the single source of working-directory identifiers.

use uuid::Uuid;

/// Collision-resistant identifier source.
///
/// Injected so tests can substitute a deterministic sequence.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Uuid;
}
