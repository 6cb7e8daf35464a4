//! Property lookup and structural equality over harvest snapshots.

use serde_json::Value;
use std::fmt;

/// Dotted path into a JSON snapshot, e.g. `registryData.manifest.license`.
///
/// Resolution never fails: a missing intermediate object, a non-container
/// along the way or an out-of-range index all resolve to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyPath(&'static str);

impl PropertyPath {
    pub const fn new(dotted: &'static str) -> Self {
        Self(dotted)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Looks the path up in `root`, treating a missing root as absent.
    pub fn resolve<'a>(&self, root: Option<&'a Value>) -> Option<&'a Value> {
        let pointer: String = self
            .0
            .split('.')
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect();
        root?.pointer(&pointer)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Structural equality where `None` (absent) equals only `None`.
///
/// Arrays compare element-wise in order, objects by key set regardless of
/// key order, numbers by numeric value.
pub fn deep_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => {
            if a == b {
                return true;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).map_or(false, |y| values_equal(x, y)))
        }
        _ => false,
    }
}

/// Renders a looked-up value for a match reason; absent renders as
/// `undefined`.
///
/// Object keys keep their snapshot order and integral floats print without
/// a fraction (`1.0` renders as `1`).
pub fn render(value: Option<&Value>) -> String {
    match value {
        Some(value) => integral_floats(value).to_string(),
        None => "undefined".to_string(),
    }
}

// Largest magnitude at which every integer is exactly representable as f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn integral_floats(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => Value::from(f as i64),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(integral_floats).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), integral_floats(item)))
                .collect(),
        ),
        _ => value.clone(),
    }
}
