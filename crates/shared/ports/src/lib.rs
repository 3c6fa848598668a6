//! GBCE Ports
//!
//! Port definitions (traits) for the GBCE market.
//! These define the boundaries between domain logic and infrastructure.

mod clock;

pub use clock::Clock;
