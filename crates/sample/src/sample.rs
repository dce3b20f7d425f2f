use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// One point of a search space.
///
/// A sample is either a numeric scalar, an ordered list of samples or a record
/// mapping names to samples (possibly nested). Record keys are kept sorted which
/// makes every traversal of a record deterministic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(untagged)
)]
pub enum Sample {
    /// A numeric value
    Scalar(f64),
    /// An ordered list of values, lists of a batch may have different lengths
    Sequence(Vec<Sample>),
    /// A mapping from names to values
    Record(BTreeMap<String, Sample>),
}

/// Shape class of a [`Sample`], all samples stored in one optimizer history share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum ShapeClass {
    /// See [`Sample::Scalar`]
    Scalar,
    /// See [`Sample::Sequence`]
    Sequence,
    /// See [`Sample::Record`]
    Record,
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeClass::Scalar => "scalar",
            ShapeClass::Sequence => "sequence",
            ShapeClass::Record => "record",
        };
        write!(f, "{name}")
    }
}

impl Sample {
    /// Build a record sample from `(name, value)` pairs.
    ///
    /// ```
    /// use optbox_sample::Sample;
    ///
    /// let s = Sample::record([("max_depth", 3.into()), ("learning_rate", 0.1.into())]);
    /// assert_eq!(s.get("max_depth").and_then(Sample::as_scalar), Some(3.));
    /// ```
    pub fn record<K, I>(fields: I) -> Sample
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Sample)>,
    {
        Sample::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Shape class of this sample
    pub fn shape_class(&self) -> ShapeClass {
        match self {
            Sample::Scalar(_) => ShapeClass::Scalar,
            Sample::Sequence(_) => ShapeClass::Sequence,
            Sample::Record(_) => ShapeClass::Record,
        }
    }

    /// Scalar value if any
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Sample::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// Sequence items if any
    pub fn as_sequence(&self) -> Option<&[Sample]> {
        match self {
            Sample::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Record fields if any
    pub fn as_record(&self) -> Option<&BTreeMap<String, Sample>> {
        match self {
            Sample::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Field `key` of a record sample
    pub fn get(&self, key: &str) -> Option<&Sample> {
        self.as_record().and_then(|fields| fields.get(key))
    }

    /// Scalar leaves of the sample in depth-first order (record fields in key order)
    pub fn leaves(&self) -> Vec<f64> {
        let mut out = vec![];
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<f64>) {
        match self {
            Sample::Scalar(v) => out.push(*v),
            Sample::Sequence(items) => items.iter().for_each(|item| item.collect_leaves(out)),
            Sample::Record(fields) => fields.values().for_each(|v| v.collect_leaves(out)),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Scalar(v) => write!(f, "{v}"),
            Sample::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Sample::Record(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<f64> for Sample {
    fn from(v: f64) -> Self {
        Sample::Scalar(v)
    }
}

impl From<f32> for Sample {
    fn from(v: f32) -> Self {
        Sample::Scalar(v as f64)
    }
}

impl From<i32> for Sample {
    fn from(v: i32) -> Self {
        Sample::Scalar(v as f64)
    }
}

impl From<i64> for Sample {
    fn from(v: i64) -> Self {
        Sample::Scalar(v as f64)
    }
}

impl<T: Into<Sample>> From<Vec<T>> for Sample {
    fn from(items: Vec<T>) -> Self {
        Sample::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Sample>, const N: usize> From<[T; N]> for Sample {
    fn from(items: [T; N]) -> Self {
        Sample::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Sample>> for Sample {
    fn from(fields: BTreeMap<String, Sample>) -> Self {
        Sample::Record(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_class() {
        assert_eq!(Sample::from(1.).shape_class(), ShapeClass::Scalar);
        assert_eq!(Sample::from(vec![1., 2.]).shape_class(), ShapeClass::Sequence);
        assert_eq!(
            Sample::record([("a", 5.into())]).shape_class(),
            ShapeClass::Record
        );
    }

    #[test]
    fn test_leaves() {
        let s = Sample::record([
            ("b", Sample::from(vec![1., 2.])),
            ("a", Sample::record([("z", 3.into())])),
        ]);
        // "a" comes first as record keys are sorted
        assert_eq!(s.leaves(), vec![3., 1., 2.]);
    }

    #[test]
    fn test_display() {
        let s = Sample::record([("a", 5.into()), ("b", Sample::from([1, 2]))]);
        assert_eq!(format!("{s}"), "{a: 5, b: [1, 2]}");
    }

    #[cfg(feature = "serializable")]
    #[test]
    fn test_serde_json() {
        let s = Sample::record([("a", 5.5.into()), ("b", Sample::from(vec![1., 2.]))]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"a":5.5,"b":[1.0,2.0]}"#);
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
