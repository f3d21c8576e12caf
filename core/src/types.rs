//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one cadence interval of the live demo.
pub type Tick = u64;

/// A stable, unique identifier for any generated record.
pub type EntityId = String;

/// The canonical batch run identifier.
pub type RunId = String;
