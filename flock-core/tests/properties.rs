use std::f32::consts::PI;

use flock_core::{angle, FlockConfig, FlockSimulation, Vector2D};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn any_coord() -> impl Strategy<Value = f32> {
    -1.0e4_f32..1.0e4
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_headings_stay_canonical_and_boids_stay_near_field(
        seed in any::<u64>(),
        count in 1_usize..40,
        width in 50.0_f32..1000.0,
        height in 50.0_f32..1000.0,
        steps in 1_usize..30,
    ) {
        let config = FlockConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut flock = FlockSimulation::new(width, height, count, config, &mut rng).unwrap();

        for _ in 0..steps {
            flock.step();
            for boid in flock.boids() {
                prop_assert!(boid.heading.is_finite());
                prop_assert!(boid.heading > -PI && boid.heading <= PI, "heading {}", boid.heading);

                let limit_x = width / 2.0 + boid.visible_distance;
                let limit_y = height / 2.0 + boid.visible_distance;
                prop_assert!(boid.position.x.abs() <= limit_x + 1e-3, "x {} past {}", boid.position.x, limit_x);
                prop_assert!(boid.position.y.abs() <= limit_y + 1e-3, "y {} past {}", boid.position.y, limit_y);
            }
        }
    }

    #[test]
    fn test_neighbors_stable_between_steps(seed in any::<u64>(), count in 2_usize..30) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut flock = FlockSimulation::new(400.0, 400.0, count, FlockConfig::default(), &mut rng).unwrap();
        flock.step();

        for index in 0..flock.len() {
            let first = flock.neighbors(index);
            prop_assert!(!first.contains(&index));
            prop_assert_eq!(first, flock.neighbors(index));
        }
    }

    #[test]
    fn test_distance_is_symmetric(
        ax in any_coord(), ay in any_coord(),
        bx in any_coord(), by in any_coord(),
    ) {
        let a = Vector2D::new(ax, ay);
        let b = Vector2D::new(bx, by);
        prop_assert_eq!(a.distance(&b), b.distance(&a));
    }

    #[test]
    fn test_normalize_lands_in_canonical_range(theta in -1.0e3_f32..1.0e3) {
        let normalized = angle::normalize(theta);
        prop_assert!(normalized > -PI && normalized <= PI);
        prop_assert!(angle::signed_difference(normalized, theta).abs() < 1e-3);
    }
}
