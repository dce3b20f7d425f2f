use ndarray_rand::rand::Rng;
use optbox_opt::{Direction, Optimizer, RandomSearch};
use rand_xoshiro::Xoshiro256Plus;

fn f(x: f64) -> f64 {
    x * x - 2.
}

fn main() {
    let sampler = |rng: &mut Xoshiro256Plus| rng.gen_range(-1.0..1.0);
    let mut opt = RandomSearch::new(sampler, Some(42)).expect("RandomSearch configured");

    for _ in 0..100 {
        let x = opt.suggest().expect("suggestion");
        let y = f(x.as_scalar().expect("scalar sample"));
        opt.update(x, y).expect("update");
    }

    let history = opt.history();
    let (x_best, y_best) = history.best(Direction::Minimize).expect("evaluations");
    println!("Minimum x^2 - 2 = {y_best} at x = {x_best}");
    println!(
        "Best so far: {:?}",
        history.running_best(Direction::Minimize)
    );
}
