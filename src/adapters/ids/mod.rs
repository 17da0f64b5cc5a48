//! Identifier Generators
//!
//! Implementations of the IdGenerator port.
//!
//! - **UuidGenerator** - Random v4 UUIDs (production)
//! - **SequentialIdGenerator** - Deterministic counter-based UUIDs (testing)

mod sequential_generator;
mod uuid_generator;

pub use sequential_generator::SequentialIdGenerator;
pub use uuid_generator::UuidGenerator;
