use ndarray_rand::rand::Rng;
use optbox_opt::{AcquisitionStrategy, BanditBuilder, Direction, Optimizer};
use optbox_sample::Sample;
use rand_xoshiro::Xoshiro256Plus;

// Branin function: 3 global minima 0.397887 at (-pi, 12.275), (pi, 2.275), (9.42478, 2.475)
fn branin(a: f64, b: f64) -> f64 {
    let pi = std::f64::consts::PI;
    let t = b - 5.1 / (4. * pi * pi) * a * a + 5. / pi * a - 6.;
    t * t + 10. * (1. - 1. / (8. * pi)) * a.cos() + 10.
}

fn main() {
    // samples are records {a, b}
    let sampler = |rng: &mut Xoshiro256Plus| {
        Sample::record([
            ("a", rng.gen_range(-100.0..100.0).into()),
            ("b", rng.gen_range(-100.0..100.0).into()),
        ])
    };
    let mut opt = BanditBuilder::optimize(sampler)
        .configure(|config| {
            config
                .acquisition_strategy(AcquisitionStrategy::UcbMinimize)
                .seed(42)
        })
        .build()
        .expect("Bandit configured");

    for _ in 0..200 {
        let x = opt.suggest().expect("suggestion");
        let a = x.get("a").and_then(Sample::as_scalar).expect("a");
        let b = x.get("b").and_then(Sample::as_scalar).expect("b");
        opt.update(x, branin(a, b)).expect("update");
    }

    let (x_best, y_best) = opt
        .history()
        .best(Direction::Minimize)
        .expect("evaluations");
    println!("Minimum Branin = {y_best} at {x_best}");
}
