// ============================================================================
// Interfaces Module
// Seams for collaborators injected into the conversion layer
// ============================================================================

pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};
