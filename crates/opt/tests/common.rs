use ndarray_rand::rand::Rng;
use optbox_opt::{
    AcquisitionStrategy, BanditBuilder, Direction, OptError, Optimizer, RandomSearch,
};
use optbox_sample::Sample;
use paste::paste;
use rand_xoshiro::Xoshiro256Plus;

fn unif_sampler(rng: &mut Xoshiro256Plus) -> f64 {
    rng.gen_range(-1.0..1.0)
}

fn random_search() -> Box<dyn Optimizer> {
    Box::new(RandomSearch::new(unif_sampler, Some(42)).expect("RandomSearch configured"))
}

fn bandit_ucb_minimize() -> Box<dyn Optimizer> {
    Box::new(
        BanditBuilder::optimize(unif_sampler)
            .configure(|config| {
                config
                    .acquisition_strategy(AcquisitionStrategy::UcbMinimize)
                    .seed(42)
            })
            .build()
            .expect("Bandit configured"),
    )
}

fn bandit_ucb_maximize() -> Box<dyn Optimizer> {
    Box::new(
        BanditBuilder::optimize(unif_sampler)
            .configure(|config| {
                config
                    .acquisition_strategy(AcquisitionStrategy::UcbMaximize)
                    .seed(42)
            })
            .build()
            .expect("Bandit configured"),
    )
}

fn scalars(values: &[f64]) -> Vec<Sample> {
    values.iter().map(|&v| Sample::from(v)).collect()
}

macro_rules! test_optimizer {
    ($opt:ident) => {
        paste! {
            #[test]
            fn [<test_update_ $opt>]() {
                let mut opt = $opt();
                assert!(opt.history().is_empty());
                for (x, y) in [(1., 5.), (2., 6.), (3., 7.), (4., 8.)] {
                    opt.update(Sample::from(x), y).unwrap();
                }
                assert_eq!(opt.history().inputs(), &scalars(&[1., 2., 3., 4.])[..]);
                assert_eq!(opt.history().outputs(), &[5., 6., 7., 8.]);

                let mut opt = $opt();
                opt.update_many(&scalars(&[1., 2., 3., 4.]), &[5., 6., 7., 8.])
                    .unwrap();
                assert_eq!(opt.history().inputs(), &scalars(&[1., 2., 3., 4.])[..]);
                assert_eq!(opt.history().outputs(), &[5., 6., 7., 8.]);
            }

            #[test]
            fn [<test_coherence_ $opt>]() {
                let mut opt = $opt();
                opt.update(Sample::from(1.), 2.).unwrap();
                assert!(matches!(
                    opt.update(Sample::from(vec![7.]), 2.),
                    Err(OptError::TypeIncoherence { .. })
                ));
                assert!(matches!(
                    opt.update(Sample::record([("a", 5.into())]), 2.),
                    Err(OptError::TypeIncoherence { .. })
                ));
                assert_eq!(opt.history().len(), 1);

                let mut opt = $opt();
                assert!(matches!(
                    opt.update_many(&[Sample::from(1.), Sample::from(vec![7.])], &[2.]),
                    Err(OptError::LengthMismatch { .. })
                ));
                let mut xs = scalars(&[1., 2., 3., 4.]);
                xs.push(Sample::record([("a", 5.into())]));
                assert!(matches!(
                    opt.update_many(&xs, &[2., 2., 2., 2., 2.]),
                    Err(OptError::TypeIncoherence { index: 4, .. })
                ));
                assert!(opt.history().is_empty());

                let mut opt = $opt();
                assert!(matches!(
                    opt.update_many(&scalars(&[1., 2.]), &[2.]),
                    Err(OptError::LengthMismatch { inputs: 2, outputs: 1 })
                ));

                let mut opt = $opt();
                assert!(matches!(
                    opt.update_many(&scalars(&[1., 2.]), &[2., f64::NAN]),
                    Err(OptError::NonScalarOutcome { index: 1 })
                ));
                assert!(opt.history().is_empty());
            }

            #[test]
            fn [<test_suggest_on_empty_history_ $opt>]() {
                let mut opt = $opt();
                let x = opt.suggest().unwrap().as_scalar().unwrap();
                assert!((-1.0..1.0).contains(&x));
                assert!(opt.history().is_empty());
            }

            #[test]
            fn [<test_best_aligned_with_history_ $opt>]() {
                let f = |x: f64| x * x - 2.;
                let mut opt = $opt();
                for _ in 0..100 {
                    let x = opt.suggest().unwrap();
                    let y = f(x.as_scalar().unwrap());
                    opt.update(x, y).unwrap();
                }
                let history = opt.history();
                assert_eq!(history.inputs().len(), 100);
                assert_eq!(history.outputs().len(), 100);

                let y_min = history.outputs().iter().copied().fold(f64::INFINITY, f64::min);
                let (x_best, y_best) = history.best(Direction::Minimize).unwrap();
                assert_eq!(y_best, y_min);
                let idx = history.argmin().unwrap();
                assert_eq!(&history.inputs()[idx], x_best);
                assert_eq!(f(x_best.as_scalar().unwrap()), y_best);
                assert_eq!(history.running_best(Direction::Minimize)[99], y_min);
            }
        }
    };
}

test_optimizer!(random_search);
test_optimizer!(bandit_ucb_minimize);
test_optimizer!(bandit_ucb_maximize);

#[test]
fn test_bandit_minimizes_x2_minus_2() {
    let mut opt = bandit_ucb_minimize();
    opt.update(Sample::from(1.), -1.).unwrap();
    for _ in 0..30 {
        let x = opt.suggest().unwrap();
        let v = x.as_scalar().unwrap();
        opt.update(x, v * v - 2.).unwrap();
    }
    let (_, y_best) = opt.history().best(Direction::Minimize).unwrap();
    assert!(y_best < -1.95);
}

#[test]
fn test_record_samples() {
    let sampler = |rng: &mut Xoshiro256Plus| {
        Sample::record([("x", unif_sampler(rng).into()), ("y", unif_sampler(rng).into())])
    };
    let mut opt = BanditBuilder::optimize(sampler)
        .configure(|config| {
            config
                .n_candidates(50)
                .acquisition_strategy(AcquisitionStrategy::UcbMinimize)
                .seed(0)
        })
        .build()
        .unwrap();
    for _ in 0..20 {
        let s = opt.suggest().unwrap();
        let x = s.get("x").and_then(Sample::as_scalar).unwrap();
        let y = s.get("y").and_then(Sample::as_scalar).unwrap();
        opt.update(s, x * x + y * y).unwrap();
    }
    assert_eq!(opt.history().len(), 20);
    assert!(opt.update(Sample::from(1.), 1.).is_err());
}
