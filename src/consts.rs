// SNAPPING
/// Maximum distance, in canvas units, at which a candidate may snap.
pub const SNAP_TOLERANCE: f64 = 10.;

/// Two snap distances within this epsilon are considered equal, so their guides are merged
/// instead of one being dropped. Geometry built from repeated scale/rotation composition is
/// not bit-exact, so exact equality would miss simultaneous guides.
pub const SNAP_DISTANCE_EPSILON: f64 = 0.01;
