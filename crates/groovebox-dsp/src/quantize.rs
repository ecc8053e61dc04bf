//! Time-domain PPQN quantization.

/// Rounds an event time to the nearest PPQN pulse at the given tempo.
///
/// `ppqn = 0` or a non-positive `bpm` returns the time unchanged. The pulse
/// length is `60 / (bpm * ppqn)` seconds. Idempotent: re-quantizing a
/// quantized time is a no-op.
pub fn round_to_ppqn(time_seconds: f64, bpm: f64, ppqn: u32) -> f64 {
    if ppqn == 0 || bpm <= 0.0 {
        return time_seconds;
    }
    let pulse = 60.0 / (bpm * ppqn as f64);
    (time_seconds / pulse).round() * pulse
}
