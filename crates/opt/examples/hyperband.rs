use ndarray_rand::rand::Rng;
use optbox_opt::{hyperband, HyperbandParams};
use optbox_sample::Sample;
use rand_xoshiro::Xoshiro256Plus;

// Validation loss of a model trained with a budget of iterations
fn loss(budget: f64, max_depth: f64, learning_rate: f64) -> f64 {
    (learning_rate - 0.3).powi(2) + 0.01 * (max_depth - 6.).abs() + 1. / (1. + budget)
}

fn main() {
    let sampler = |rng: &mut Xoshiro256Plus| {
        Sample::record([
            ("max_depth", rng.gen_range(1..10).into()),
            ("learning_rate", rng.gen_range(0.0..1.0).into()),
        ])
    };
    let run_batch = |batch: &[(f64, Sample)]| {
        batch
            .iter()
            .map(|(budget, x)| {
                let depth = x.get("max_depth").and_then(Sample::as_scalar).expect("max_depth");
                let lr = x
                    .get("learning_rate")
                    .and_then(Sample::as_scalar)
                    .expect("learning_rate");
                loss(*budget, depth, lr)
            })
            .collect::<Vec<_>>()
    };

    let params = HyperbandParams::new().max_budget(100.);
    let trials = hyperband(&sampler, run_batch, params, Some(42)).expect("hyperband run");

    let ((budget, x_best), y_best) = trials.best().expect("trials");
    println!(
        "{} trials, best loss {y_best} at {x_best} with budget {budget}",
        trials.len()
    );
}
