mod tests {
    use diorama_light_cycle::filter::{TemporalFilter, filter_weight, step};
    use diorama_light_cycle::illumination::{Intensities, compute};

    fn intensities(values: &[f64]) -> Intensities {
        Intensities::from_slice(values).unwrap()
    }

    #[test]
    fn test_filter_weight() {
        assert!((filter_weight(60, 1.0 / 60.0) - 0.5).abs() < 1e-12);
        assert!((filter_weight(60, 0.02) - 0.5f64.powf(1.0 / 1.2)).abs() < 1e-12);
        assert_eq!(filter_weight(60, 0.0), 0.0);
    }

    #[test]
    fn test_step_resets_on_length_mismatch() {
        let mut filtered = Intensities::new();
        let target = intensities(&[0.2, 0.4, 0.6]);
        step(&mut filtered, &target, 0.9);
        assert_eq!(filtered, target);

        let mut filtered = intensities(&[1.0]);
        step(&mut filtered, &target, 0.9);
        assert_eq!(filtered, target);
    }

    #[test]
    fn test_step_moves_towards_target() {
        let mut filtered = intensities(&[1.0, 0.0]);
        let target = intensities(&[0.0, 1.0]);
        step(&mut filtered, &target, 0.25);
        assert_eq!(filtered, intensities(&[0.25, 0.75]));
    }

    #[test]
    fn test_half_life() {
        // 0.1 s at 60 Hz is 6 ticks
        let mut filter = TemporalFilter::with_half_life(60, 0.1);
        filter.step(&intensities(&[1.0]));
        let target = intensities(&[0.0]);
        for _ in 0..6 {
            filter.step(&target);
        }
        assert!((filter.values()[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_converges_to_constant_target() {
        let mut filter = TemporalFilter::new(0.5);
        assert!(!filter.is_primed());
        filter.step(&compute(0.0));
        assert!(filter.is_primed());

        let target = compute(12.0);
        for _ in 0..200 {
            filter.step(&target);
        }
        for (value, expected) in filter.values().iter().zip(target.iter()) {
            assert!((value - expected).abs() < 1e-12);
        }
    }
}
