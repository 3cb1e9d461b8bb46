//! Random attribute helpers.

use rand::Rng;

/// Uniform sample from `low..high`, or `low` when the range is empty.
///
/// A zero-sized surface produces empty ranges, which `gen_range` rejects.
pub fn uniform(rng: &mut impl Rng, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
