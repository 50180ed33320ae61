/// Data organization for the water-level monitoring service.
///
/// Submodules:
/// - `enrich` — joins the three historical lookup tables into live features.
///
/// Heavier statistics (trend detection, return-period analysis) stay with
/// downstream consumers of the published snapshot.

pub mod enrich;
