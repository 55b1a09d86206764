/// Scale float samples by `volume` and quantize to signed 16-bit.
///
/// Input is expected in [-1.0, 1.0]; anything outside is clamped first, so
/// the output never exceeds `volume * i16::MAX` in magnitude.
pub fn quantize(input: &[f32], volume: f32, out: &mut Vec<i16>) {
    let scale = volume * i16::MAX as f32;
    out.clear();
    out.extend(
        input
            .iter()
            .map(|&s| (s.clamp(-1.0, 1.0) * scale).round() as i16),
    );
}

/// True when `volume` is a usable gain.
pub fn is_valid_volume(volume: f32) -> bool {
    (0.0..=1.0).contains(&volume)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_volume_maps_to_full_scale() {
        let mut out = Vec::new();
        quantize(&[1.0, -1.0, 0.0], 1.0, &mut out);
        assert_eq!(out, vec![i16::MAX, -i16::MAX, 0]);
    }

    #[test]
    fn volume_bounds_peak() {
        let mut out = Vec::new();
        quantize(&[1.0, -1.0, 2.0], 0.3, &mut out);
        let limit = (0.3 * i16::MAX as f32).round() as i16;
        assert!(out.iter().all(|s| s.abs() <= limit));
    }

    #[test]
    fn volume_range() {
        assert!(is_valid_volume(0.0));
        assert!(is_valid_volume(1.0));
        assert!(!is_valid_volume(1.01));
        assert!(!is_valid_volume(-0.1));
        assert!(!is_valid_volume(f32::NAN));
    }
}
