use ndarray_rand::rand::Rng;
use optbox_opt::{AcquisitionStrategy, BanditBuilder, Direction, Optimizer};
use optbox_sample::Sample;
use rand_xoshiro::Xoshiro256Plus;

fn f(x: f64) -> f64 {
    x * x - 2.
}

fn main() {
    let sampler = |rng: &mut Xoshiro256Plus| rng.gen_range(-1.0..1.0);
    let mut opt = BanditBuilder::optimize(sampler)
        .configure(|config| {
            config
                .acquisition_strategy(AcquisitionStrategy::UcbMinimize)
                .seed(42)
        })
        .build()
        .expect("Bandit configured");

    // warm start with one known evaluation
    opt.update(Sample::from(1.), f(1.)).expect("update");
    for _ in 0..100 {
        let x = opt.suggest().expect("suggestion");
        let y = f(x.as_scalar().expect("scalar sample"));
        opt.update(x, y).expect("update");
    }

    let (x_best, y_best) = opt
        .history()
        .best(Direction::Minimize)
        .expect("evaluations");
    println!("Minimum x^2 - 2 = {y_best} at x = {x_best}");
}
