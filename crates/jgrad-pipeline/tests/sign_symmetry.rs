use jgrad_codec::MeasurementBatch;
use jgrad_pipeline::{estimate, Capabilities, EstimateConfig, PhaseKickbackEncoder, ReplayExecutor};
use proptest::prelude::*;

fn rows_strategy() -> impl Strategy<Value = (usize, Vec<Vec<u8>>)> {
    (1usize..10).prop_flat_map(|precision| {
        let row = prop::collection::vec(0u8..=1, precision + 1);
        (Just(precision), prop::collection::vec(row, 1..20))
    })
}

proptest! {
    #[test]
    fn estimate_is_odd_in_the_perturbation(
        (precision, rows) in rows_strategy(),
        magnitude in 1e-9f64..0.999,
    ) {
        let samples = rows.len();
        let executor = ReplayExecutor::from_batch(MeasurementBatch::from_rows(rows).unwrap());
        let capabilities = Capabilities {
            encoder: &PhaseKickbackEncoder,
            executor: &executor,
        };
        let config = EstimateConfig::new(precision, samples);
        let positive = estimate(magnitude, &config, capabilities).unwrap();
        let negative = estimate(-magnitude, &config, capabilities).unwrap();
        prop_assert_eq!(positive, -negative);
        prop_assert!((0.0..1.0).contains(&positive));
        let grid = positive * 2f64.powi(precision as i32);
        prop_assert_eq!(grid, grid.trunc());
    }
}
