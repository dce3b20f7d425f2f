//! Conversion of heterogeneous samples into numeric matrices.
//!
//! Models require fixed-width numeric inputs while samples may be scalars,
//! variable-length sequences or nested records. [`vectorize`] turns one batch of
//! samples of a given shape class into a `(n_samples, n_features)` matrix:
//!
//! * scalars give a `(n, 1)` matrix,
//! * sequences give one column per position, shorter sequences are padded with NaN,
//! * records are flattened (see [`flatten`]), then get one column per feature name
//!   sorted lexicographically, features missing from a record are set to NaN.
//!
//! Missing features never drop a row: NaN is left for the model to impute.
use crate::errors::{Result, SampleError};
use crate::{Sample, ShapeClass};
use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// Missing feature marker
pub const MISSING: f64 = f64::NAN;

/// Column layout of a [`FeatureMatrix`]
#[derive(Clone, Debug, PartialEq)]
pub enum Columns {
    /// Feature names of a record batch, sorted
    Named(Vec<String>),
    /// Number of positional columns of a scalar or sequence batch
    Positional(usize),
}

impl Columns {
    /// Number of columns
    pub fn len(&self) -> usize {
        match self {
            Columns::Named(names) => names.len(),
            Columns::Positional(n) => *n,
        }
    }

    /// Whether there is no column
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Numeric representation of a batch of samples, one row per sample
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureMatrix {
    /// (n_samples, n_features) values, NaN marks a missing feature
    pub data: Array2<f64>,
    /// Column layout
    pub columns: Columns,
}

impl FeatureMatrix {
    /// Project the matrix onto a previously computed column layout.
    ///
    /// Named columns are matched by name: a column unknown to this matrix is
    /// filled with NaN, a column absent from `columns` is dropped.
    /// Positional columns are truncated or padded with NaN.
    pub fn align(self, columns: &Columns) -> FeatureMatrix {
        if &self.columns == columns {
            return self;
        }
        let nrows = self.data.nrows();
        let mut data = Array2::from_elem((nrows, columns.len()), MISSING);
        match (&self.columns, columns) {
            (Columns::Named(own), Columns::Named(target)) => {
                let index: BTreeMap<&str, usize> = own
                    .iter()
                    .enumerate()
                    .map(|(j, name)| (name.as_str(), j))
                    .collect();
                for (j, name) in target.iter().enumerate() {
                    if let Some(&k) = index.get(name.as_str()) {
                        data.column_mut(j).assign(&self.data.column(k));
                    }
                }
            }
            _ => {
                let n = self.data.ncols().min(columns.len());
                for j in 0..n {
                    data.column_mut(j).assign(&self.data.column(j));
                }
            }
        }
        FeatureMatrix {
            data,
            columns: columns.clone(),
        }
    }
}

/// Flatten a record into a map of scalar features.
///
/// * a nested record is merged in under its own keys, without prefix: when a
///   nested key collides with another key the last one visited wins (keys are
///   visited in lexicographic order),
/// * a sequence under `key` is expanded as `key_0`, `key_1`, ... where a nested
///   sequence or record item `i` gets its features prefixed by `key_i_`,
/// * scalars are copied as is.
///
/// ```
/// use optbox_sample::{flatten, Sample};
///
/// let s = Sample::record([
///     ("lr", 0.1.into()),
///     ("layers", Sample::from(vec![32, 64])),
///     ("opt", Sample::record([("beta", 0.9.into())])),
/// ]);
/// let features = flatten(s.as_record().unwrap());
/// let names: Vec<&str> = features.keys().map(|k| k.as_str()).collect();
/// assert_eq!(names, ["beta", "layers_0", "layers_1", "lr"]);
/// ```
pub fn flatten(record: &BTreeMap<String, Sample>) -> BTreeMap<String, f64> {
    let mut features = BTreeMap::new();
    flatten_into(record, "", &mut features);
    features
}

fn flatten_into(record: &BTreeMap<String, Sample>, prefix: &str, out: &mut BTreeMap<String, f64>) {
    for (key, value) in record.iter() {
        match value {
            Sample::Scalar(v) => {
                out.insert(format!("{prefix}{key}"), *v);
            }
            Sample::Record(nested) => flatten_into(nested, prefix, out),
            Sample::Sequence(items) => flatten_sequence(&format!("{prefix}{key}"), items, out),
        }
    }
}

fn flatten_sequence(key: &str, items: &[Sample], out: &mut BTreeMap<String, f64>) {
    for (i, item) in items.iter().enumerate() {
        let item_key = format!("{key}_{i}");
        match item {
            Sample::Scalar(v) => {
                out.insert(item_key, *v);
            }
            Sample::Sequence(nested) => flatten_sequence(&item_key, nested, out),
            Sample::Record(nested) => flatten_into(nested, &format!("{item_key}_"), out),
        }
    }
}

/// Shape class shared by all samples of the batch, `None` for an empty batch
pub fn batch_shape_class(samples: &[Sample]) -> Result<Option<ShapeClass>> {
    let Some(first) = samples.first() else {
        return Ok(None);
    };
    let expected = first.shape_class();
    match samples
        .iter()
        .position(|s| s.shape_class() != expected)
    {
        Some(index) => Err(SampleError::MixedShapes {
            expected,
            found: samples[index].shape_class(),
            index,
        }),
        None => Ok(Some(expected)),
    }
}

/// Whether the batch consists of sequences of different lengths
pub fn is_varying_length(samples: &[Sample]) -> bool {
    let lengths: Option<Vec<usize>> = samples
        .iter()
        .map(|s| s.as_sequence().map(|items| items.len()))
        .collect();
    match lengths {
        Some(lengths) if !lengths.is_empty() => lengths.iter().any(|&l| l != lengths[0]),
        _ => false,
    }
}

/// Vectorize a batch of samples of one shape class.
///
/// Scalars give a `(n, 1)` matrix, sequences one column per position and
/// records one column per flattened feature name (sorted).
///
/// Sequence columns are positional: the scalar leaves of each sequence are laid out
/// depth-first, so records nested in sequences are not matched by key across rows
/// (`[{a: 1}]` and `[{b: 2}]` both fill column 0). Use a record at the top level when
/// features must be matched by name.
///
/// ```
/// use optbox_sample::{vectorize, Sample};
///
/// let batch = vec![
///     Sample::record([("a", 1.into())]),
///     Sample::record([("a", 1.into()), ("b", 2.into())]),
///     Sample::record([("a", 1.into())]),
/// ];
/// let x = vectorize(&batch).unwrap();
/// assert_eq!(x.dim(), (3, 2));
/// assert!(x[[0, 1]].is_nan());
/// assert_eq!(x[[1, 1]], 2.);
/// ```
pub fn vectorize(samples: &[Sample]) -> Result<Array2<f64>> {
    Ok(vectorize_features(samples)?.data)
}

/// Vectorize a batch of samples, keeping the column layout
pub fn vectorize_features(samples: &[Sample]) -> Result<FeatureMatrix> {
    match batch_shape_class(samples)? {
        None => Ok(FeatureMatrix {
            data: Array2::zeros((0, 0)),
            columns: Columns::Positional(0),
        }),
        Some(ShapeClass::Scalar) => {
            let values: Array1<f64> = samples.iter().filter_map(Sample::as_scalar).collect();
            Ok(FeatureMatrix {
                data: values.insert_axis(Axis(1)),
                columns: Columns::Positional(1),
            })
        }
        Some(ShapeClass::Sequence) => Ok(vectorize_sequences(samples)),
        Some(ShapeClass::Record) => Ok(vectorize_records(samples)),
    }
}

fn vectorize_sequences(samples: &[Sample]) -> FeatureMatrix {
    let rows: Vec<Vec<f64>> = samples.par_iter().map(Sample::leaves).collect();
    let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut data = Array2::from_elem((rows.len(), ncols), MISSING);
    for (i, row) in rows.iter().enumerate() {
        for (j, v) in row.iter().enumerate() {
            data[[i, j]] = *v;
        }
    }
    FeatureMatrix {
        data,
        columns: Columns::Positional(ncols),
    }
}

fn vectorize_records(samples: &[Sample]) -> FeatureMatrix {
    let rows: Vec<BTreeMap<String, f64>> = samples
        .par_iter()
        .map(|s| s.as_record().map(flatten).unwrap_or_default())
        .collect();
    let names: BTreeSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();
    let names: Vec<String> = names.into_iter().cloned().collect();

    let mut data = Array2::from_elem((rows.len(), names.len()), MISSING);
    for (i, row) in rows.iter().enumerate() {
        for (j, name) in names.iter().enumerate() {
            if let Some(v) = row.get(name) {
                data[[i, j]] = *v;
            }
        }
    }
    FeatureMatrix {
        data,
        columns: Columns::Named(names),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn rec(fields: &[(&str, f64)]) -> Sample {
        Sample::record(fields.iter().map(|(k, v)| (*k, Sample::Scalar(*v))))
    }

    #[test]
    fn test_vectorize_list_of_records() {
        let x = vectorize(&[rec(&[("a", 5.)]), rec(&[("a", 6.)]), rec(&[("a", 7.)])]).unwrap();
        assert_eq!(x.dim(), (3, 1));

        let fm = vectorize_features(&[
            rec(&[("a", 5.), ("b", 2.)]),
            rec(&[("a", 6.), ("b", 3.)]),
            rec(&[("a", 7.), ("b", 4.)]),
        ])
        .unwrap();
        assert_eq!(fm.data.dim(), (3, 2));
        assert_eq!(
            fm.columns,
            Columns::Named(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(fm.data.column(0), array![5., 6., 7.]);
        assert_eq!(fm.data.column(1), array![2., 3., 4.]);
    }

    #[test]
    fn test_vectorize_missing_features() {
        let x = vectorize(&[
            rec(&[("a", 1.)]),
            rec(&[("a", 1.), ("b", 2.)]),
            rec(&[("a", 1.)]),
        ])
        .unwrap();
        assert_eq!(x.dim(), (3, 2));
        assert_eq!(x.column(0), array![1., 1., 1.]);
        assert!(x[[0, 1]].is_nan());
        assert_eq!(x[[1, 1]], 2.);
        assert!(x[[2, 1]].is_nan());
    }

    #[test]
    fn test_vectorize_columns_sorted() {
        let fm = vectorize_features(&[rec(&[("zeta", 1.), ("alpha", 2.), ("mu", 3.)])]).unwrap();
        assert_eq!(
            fm.columns,
            Columns::Named(vec![
                "alpha".to_string(),
                "mu".to_string(),
                "zeta".to_string()
            ])
        );
        assert_eq!(fm.data, array![[2., 3., 1.]]);
    }

    #[test]
    fn test_flatten_nested_and_sequences() {
        let s = Sample::record([
            ("lr", 0.1.into()),
            ("units", Sample::from(vec![16., 32., 64.])),
            ("optim", Sample::record([("beta1", 0.9.into()), ("beta2", 0.99.into())])),
        ]);
        let features = flatten(s.as_record().unwrap());
        let expected: BTreeMap<String, f64> = [
            ("beta1", 0.9),
            ("beta2", 0.99),
            ("lr", 0.1),
            ("units_0", 16.),
            ("units_1", 32.),
            ("units_2", 64.),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        assert_eq!(features, expected);
    }

    #[test]
    fn test_flatten_key_collision_last_write_wins() {
        // "a" is visited before "b" whose nested "a" overwrites the outer one
        let s = Sample::record([("a", 1.into()), ("b", Sample::record([("a", 2.into())]))]);
        let features = flatten(s.as_record().unwrap());
        assert_eq!(features.len(), 1);
        assert_eq!(features["a"], 2.);

        // nested "b" is merged first then overwritten by the outer "b"
        let s = Sample::record([("a", Sample::record([("b", 1.into())])), ("b", 2.into())]);
        let features = flatten(s.as_record().unwrap());
        assert_eq!(features.len(), 1);
        assert_eq!(features["b"], 2.);
    }

    #[test]
    fn test_flatten_records_within_sequences() {
        let s = Sample::record([(
            "layers",
            Sample::Sequence(vec![
                Sample::record([("units", 8.into())]),
                Sample::from(vec![1., 2.]),
            ]),
        )]);
        let features = flatten(s.as_record().unwrap());
        let names: Vec<&str> = features.keys().map(String::as_str).collect();
        assert_eq!(names, ["layers_0_units", "layers_1_0", "layers_1_1"]);
    }

    #[test]
    fn test_vectorize_scalars() {
        let x = vectorize(&[1.into(), 2.into(), 3.into()]).unwrap();
        assert_eq!(x, array![[1.], [2.], [3.]]);
    }

    #[test]
    fn test_vectorize_sequences() {
        let x = vectorize(&[Sample::from([1., 2.]), Sample::from([3., 4.])]).unwrap();
        assert_eq!(x, array![[1., 2.], [3., 4.]]);
    }

    #[test]
    fn test_vectorize_records_within_sequences_positional() {
        let x = vectorize(&[
            Sample::Sequence(vec![Sample::record([("a", 1.into())])]),
            Sample::Sequence(vec![Sample::record([("b", 2.into())])]),
        ])
        .unwrap();
        assert_eq!(x, array![[1.], [2.]]);
        let features = vectorize_features(&[Sample::Sequence(vec![Sample::record([(
            "a",
            1.into(),
        )])])])
        .unwrap();
        assert_eq!(features.columns, Columns::Positional(1));
    }

    #[test]
    fn test_is_varying_length() {
        assert!(!is_varying_length(&[]));
        assert!(is_varying_length(&[Sample::from([1]), Sample::from([1, 2])]));
        assert!(is_varying_length(&[
            Sample::from([1]),
            Sample::from([2]),
            Sample::from([3]),
            Sample::from([1, 2])
        ]));
        assert!(!is_varying_length(&[Sample::from([1, 2]), Sample::from([3, 4])]));
        assert!(!is_varying_length(&[1.into(), 2.into()]));
    }

    #[test]
    fn test_vectorize_varying_length_sequences() {
        let x = vectorize(&[Sample::from([1.]), Sample::from([1., 2., 3.])]).unwrap();
        assert_eq!(x.dim(), (2, 3));
        assert_eq!(x[[0, 0]], 1.);
        assert!(x[[0, 1]].is_nan() && x[[0, 2]].is_nan());
        assert_abs_diff_eq!(x.row(1).to_owned(), Array1::from(vec![1., 2., 3.]));
    }

    #[test]
    fn test_vectorize_empty() {
        assert_eq!(vectorize(&[]).unwrap().dim(), (0, 0));
    }

    #[test]
    fn test_vectorize_mixed_shapes() {
        let err = vectorize(&[1.into(), rec(&[("a", 5.)])]).unwrap_err();
        assert_eq!(
            err,
            SampleError::MixedShapes {
                expected: ShapeClass::Scalar,
                found: ShapeClass::Record,
                index: 1
            }
        );
    }

    #[test]
    fn test_align_named_columns() {
        let train = vectorize_features(&[rec(&[("a", 1.), ("b", 2.)])]).unwrap();
        let test = vectorize_features(&[rec(&[("b", 5.), ("c", 7.)])]).unwrap();
        let aligned = test.align(&train.columns);
        assert_eq!(aligned.columns, train.columns);
        assert!(aligned.data[[0, 0]].is_nan());
        assert_eq!(aligned.data[[0, 1]], 5.);
    }

    #[test]
    fn test_align_positional_columns() {
        let fm = vectorize_features(&[Sample::from([1., 2., 3.])]).unwrap();
        let truncated = fm.clone().align(&Columns::Positional(2));
        assert_eq!(truncated.data, array![[1., 2.]]);
        let padded = fm.align(&Columns::Positional(4));
        assert_eq!(padded.data.dim(), (1, 4));
        assert!(padded.data[[0, 3]].is_nan());
    }
}
