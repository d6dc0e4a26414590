/// Round to 4 decimal places, half away from zero.
///
/// This is the output rounding rule of the document format and must stay
/// bit-for-bit stable: scale by 10,000, `f64::round` (which rounds half
/// away from zero), scale back.
pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
