use std::{cmp::Ordering, fmt, sync::Arc};

use allocative::Allocative;

/// Represents a single data value stored in the database.
///
/// Values are untyped with respect to the column that holds them: a column's
/// declared type is descriptive only, so any variant may appear in any column.
#[derive(Debug, Clone, PartialEq, Allocative)]
pub enum Value {
    /// represents an empty or missing value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer value.
    Int(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A UTF-8 string value, wrapped in an [Arc] so result sets can copy
    /// rows out of the catalog cheaply.
    Text(Arc<str>),
}

impl Value {
    /// Returns `true` if the value is [Value::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Position of this value's kind in the cross-kind ordering.
    ///
    /// Integers and floats share a rank so they compare numerically.
    fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total order over all values: `Null < Bool < numeric < Text`.
    ///
    /// Within a kind the natural order applies: `false < true`, integers and
    /// floats numerically (mixed pairs included, `-0.0` equal to `0.0`), text
    /// lexicographically by bytes. Two nulls are equal.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(l), Self::Bool(r)) => l.cmp(r),
            (Self::Int(l), Self::Int(r)) => l.cmp(r),
            (Self::Float(l), Self::Float(r)) => cmp_floats(*l, *r),
            (Self::Int(l), Self::Float(r)) => cmp_int_float(*l, *r),
            (Self::Float(l), Self::Int(r)) => cmp_int_float(*r, *l).reverse(),
            (Self::Text(l), Self::Text(r)) => l.as_ref().cmp(r.as_ref()),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// Numeric float order. NaN cannot come out of the scalar parser; it falls
/// back to the IEEE total order so the comparison stays total.
fn cmp_floats(l: f64, r: f64) -> Ordering {
    l.partial_cmp(&r).unwrap_or_else(|| l.total_cmp(&r))
}

/// 2^63, the first float above every `i64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// Exact comparison of an integer with a float, without widening the
/// integer to `f64`.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() {
        return (int as f64).total_cmp(&float);
    }
    if float >= I64_END {
        return Ordering::Less;
    }
    if float < -I64_END {
        return Ordering::Greater;
    }

    // in range, so the whole part converts exactly
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64
            .partial_cmp(&(float - whole))
            .unwrap_or(Ordering::Equal),
        unequal => unequal,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(Arc::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────
    // Test 1 : null check
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(1).is_null());
        assert!(!Value::Text("NULL".into()).is_null());
    }

    // ─────────────────────────────────────────────────────────────
    // Test 2 : same-kind ordering
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_same_kind_order() {
        assert_eq!(Value::Int(1).total_cmp(&Value::Int(2)), Ordering::Less);
        assert_eq!(
            Value::Float(2.5).total_cmp(&Value::Float(-1.0)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Text("apple".into()).total_cmp(&Value::Text("banana".into())),
            Ordering::Less
        );
        assert_eq!(
            Value::Text("B".into()).total_cmp(&Value::Text("a".into())),
            Ordering::Less
        );
        assert_eq!(
            Value::Bool(false).total_cmp(&Value::Bool(true)),
            Ordering::Less
        );
        assert_eq!(Value::Null.total_cmp(&Value::Null), Ordering::Equal);
    }

    // ─────────────────────────────────────────────────────────────
    // Test 3 : integers and floats compare numerically
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_mixed_numeric_order() {
        assert_eq!(Value::Int(1).total_cmp(&Value::Float(1.0)), Ordering::Equal);
        assert_eq!(Value::Int(1).total_cmp(&Value::Float(1.5)), Ordering::Less);
        assert_eq!(
            Value::Float(1.5).total_cmp(&Value::Int(1)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Float(-0.5).total_cmp(&Value::Int(0)),
            Ordering::Less
        );
        assert_eq!(
            Value::Int(-1).total_cmp(&Value::Float(-0.5)),
            Ordering::Less
        );
    }

    // ─────────────────────────────────────────────────────────────
    // Test 3b : negative zero equals zero on every numeric path
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_negative_zero_equals_zero() {
        let neg = Value::Float(-0.0);
        assert_eq!(neg.total_cmp(&Value::Float(0.0)), Ordering::Equal);
        assert_eq!(Value::Float(0.0).total_cmp(&neg), Ordering::Equal);
        assert_eq!(neg.total_cmp(&Value::Int(0)), Ordering::Equal);
        assert_eq!(Value::Int(0).total_cmp(&Value::Float(0.0)), Ordering::Equal);
        assert_eq!(neg, Value::Float(0.0));
    }

    // ─────────────────────────────────────────────────────────────
    // Test 3c : integers beyond 2^53 compare exactly against floats
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_large_int_float_order_is_exact() {
        let two_53 = 9_007_199_254_740_992_i64;
        let float = Value::Float(two_53 as f64);

        assert_eq!(Value::Int(two_53).total_cmp(&float), Ordering::Equal);
        assert_eq!(Value::Int(two_53 + 1).total_cmp(&float), Ordering::Greater);
        assert_eq!(float.total_cmp(&Value::Int(two_53 + 1)), Ordering::Less);

        // 2^63 is above every i64, -2^63 is i64::MIN
        assert_eq!(
            Value::Int(i64::MAX).total_cmp(&Value::Float(I64_END)),
            Ordering::Less
        );
        assert_eq!(
            Value::Int(i64::MIN).total_cmp(&Value::Float(-I64_END)),
            Ordering::Equal
        );
        assert_eq!(
            Value::Int(i64::MIN).total_cmp(&Value::Float(f64::NEG_INFINITY)),
            Ordering::Greater
        );
        assert_eq!(
            Value::Int(i64::MAX).total_cmp(&Value::Float(f64::INFINITY)),
            Ordering::Less
        );
    }

    // ─────────────────────────────────────────────────────────────
    // Test 4 : cross-kind ordering, every pair of kinds
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_cross_kind_order() {
        // one representative per rank, ascending
        let ladder = [
            Value::Null,
            Value::Bool(true),
            Value::Int(-1000),
            Value::Float(99.5),
            Value::Text("".into()),
        ];
        for (i, left) in ladder.iter().enumerate() {
            for (j, right) in ladder.iter().enumerate() {
                let expected = match (left.kind_rank(), right.kind_rank()) {
                    (l, r) if l != r => l.cmp(&r),
                    _ => i.cmp(&j),
                };
                assert_eq!(
                    left.total_cmp(right),
                    expected,
                    "{left:?} vs {right:?}"
                );
            }
        }

        // text sorts after numbers even when it looks numeric
        assert_eq!(
            Value::Text("1".into()).total_cmp(&Value::Int(5)),
            Ordering::Greater
        );
        // bool sorts before numbers regardless of truthiness
        assert_eq!(Value::Bool(true).total_cmp(&Value::Int(0)), Ordering::Less);
        assert_eq!(Value::Null.total_cmp(&Value::Bool(false)), Ordering::Less);
    }

    // ─────────────────────────────────────────────────────────────
    // Test 5 : text rendering
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Text("a,b".into()).to_string(), "a,b");
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(3_i64), Value::Int(3));
        assert_eq!(Value::from(0.25_f64), Value::Float(0.25));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from("x"), Value::Text("x".into()));
    }
}
