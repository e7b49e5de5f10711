//! Best-effort reading of configuration overrides.
//!
//! Overrides arrive as a flat JSON object. Each reader returns `None` when a
//! key is absent or its value is unusable; unusable values are logged at
//! debug level and the exercise falls back to its default. Numeric fields
//! also accept numeric strings, since query-string callers send everything
//! as text.

use std::ops::RangeInclusive;

use serde_json::Value;
use tracing::debug;

use crate::choice::validate_probabilities;

/// Flat map of override name to value.
pub type ConfigOverrides = serde_json::Map<String, Value>;

/// Typed view over a [`ConfigOverrides`] map for one exercise.
#[derive(Debug, Clone, Copy)]
pub struct Overrides<'a> {
    map: &'a ConfigOverrides,
    exercise: &'a str,
}

impl<'a> Overrides<'a> {
    pub fn new(map: &'a ConfigOverrides, exercise: &'a str) -> Self {
        Self { map, exercise }
    }

    fn dropped(&self, key: &str, value: &Value, reason: &str) {
        debug!(exercise = self.exercise, key, %value, reason, "ignoring override");
    }

    /// A non-empty trimmed string. Numbers are accepted and stringified.
    pub fn string(&self, key: &str) -> Option<String> {
        let value = self.map.get(key)?;
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => {
                self.dropped(key, value, "expected a string");
                return None;
            }
        };
        if text.is_empty() {
            self.dropped(key, value, "empty string");
            return None;
        }
        Some(text)
    }

    /// A string that `parse` accepts.
    pub fn parsed<T>(&self, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let text = self.string(key)?;
        let parsed = parse(&text);
        if parsed.is_none() {
            self.dropped(key, &Value::String(text), "unrecognized value");
        }
        parsed
    }

    /// An integer inside `range`.
    pub fn int_in(&self, key: &str, range: RangeInclusive<i64>) -> Option<i64> {
        let value = self.map.get(key)?;
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if range.contains(&v) => Some(v),
            Some(_) => {
                self.dropped(key, value, "out of range");
                None
            }
            None => {
                self.dropped(key, value, "expected an integer");
                None
            }
        }
    }

    /// A finite float inside `range`.
    pub fn float_in(&self, key: &str, range: RangeInclusive<f64>) -> Option<f64> {
        let value = self.map.get(key)?;
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() && range.contains(&v) => Some(v),
            Some(_) => {
                self.dropped(key, value, "out of range");
                None
            }
            None => {
                self.dropped(key, value, "expected a number");
                None
            }
        }
    }

    /// A probability table over `allowed` categories.
    ///
    /// Accepts a JSON object or a JSON-encoded object string. The table must
    /// pass [`validate_probabilities`]; otherwise it is dropped whole.
    pub fn probabilities(&self, key: &str, allowed: &[&str]) -> Option<Vec<(String, f64)>> {
        let value = self.map.get(key)?;
        let decoded;
        let object = match value {
            Value::Object(map) => map,
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => {
                    decoded = map;
                    &decoded
                }
                _ => {
                    self.dropped(key, value, "expected an object");
                    return None;
                }
            },
            _ => {
                self.dropped(key, value, "expected an object");
                return None;
            }
        };

        let mut table = Vec::with_capacity(object.len());
        for (category, weight) in object {
            let weight = match weight {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            match weight {
                Some(w) => table.push((category.clone(), w)),
                None => {
                    self.dropped(key, value, "non-numeric weight");
                    return None;
                }
            }
        }

        match validate_probabilities(&table, allowed) {
            Ok(()) => Some(table),
            Err(reason) => {
                self.dropped(key, value, &reason);
                None
            }
        }
    }
}

/// Parses `key=value` into an override entry.
///
/// The value is read as JSON when it parses (`octave=5`, `p={"a":1}`) and as
/// a plain string otherwise (`reference_note=C`).
pub fn parse_override(pair: &str) -> Option<(String, Value)> {
    let (key, raw) = pair.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = serde_json::from_str::<Value>(raw.trim())
        .unwrap_or_else(|_| Value::String(raw.trim().to_string()));
    Some((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> ConfigOverrides {
        match value {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_string_reader() {
        let m = map(json!({"a": " C ", "b": "", "c": 5, "d": [1]}));
        let o = Overrides::new(&m, "test");
        assert_eq!(o.string("a").as_deref(), Some("C"));
        assert_eq!(o.string("b"), None);
        assert_eq!(o.string("c").as_deref(), Some("5"));
        assert_eq!(o.string("d"), None);
        assert_eq!(o.string("missing"), None);
    }

    #[test]
    fn test_int_reader_accepts_strings_and_checks_range() {
        let m = map(json!({"n": 5, "s": "7", "f": 3.0, "big": 99, "bad": "x", "frac": 2.5}));
        let o = Overrides::new(&m, "test");
        assert_eq!(o.int_in("n", 1..=8), Some(5));
        assert_eq!(o.int_in("s", 1..=8), Some(7));
        assert_eq!(o.int_in("f", 1..=8), Some(3));
        assert_eq!(o.int_in("big", 1..=8), None);
        assert_eq!(o.int_in("bad", 1..=8), None);
        assert_eq!(o.int_in("frac", 1..=8), None);
    }

    #[test]
    fn test_float_reader() {
        let m = map(json!({"d": 1.5, "s": "0.75", "low": 0.1}));
        let o = Overrides::new(&m, "test");
        assert_eq!(o.float_in("d", 0.5..=2.0), Some(1.5));
        assert_eq!(o.float_in("s", 0.5..=2.0), Some(0.75));
        assert_eq!(o.float_in("low", 0.5..=2.0), None);
    }

    #[test]
    fn test_probabilities_reader() {
        let m = map(json!({
            "ok": {"higher": 0.7, "lower": 0.3},
            "text": "{\"higher\": 0.5, \"lower\": 0.5}",
            "sum": {"higher": 0.7, "lower": 0.7},
            "unknown": {"up": 1.0},
            "weird": {"higher": "a", "lower": 1.0},
            "list": [0.5, 0.5]
        }));
        let o = Overrides::new(&m, "test");
        let allowed = ["higher", "lower"];
        let ok = o.probabilities("ok", &allowed).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(o.probabilities("text", &allowed).is_some());
        assert!(o.probabilities("sum", &allowed).is_none());
        assert!(o.probabilities("unknown", &allowed).is_none());
        assert!(o.probabilities("weird", &allowed).is_none());
        assert!(o.probabilities("list", &allowed).is_none());
    }

    #[test]
    fn test_parsed_reader() {
        let m = map(json!({"key": "Bb", "bad": "H"}));
        let o = Overrides::new(&m, "test");
        let parse = |s: &str| if s == "Bb" { Some(10) } else { None };
        assert_eq!(o.parsed("key", parse), Some(10));
        assert_eq!(o.parsed("bad", parse), None);
    }

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override("octave=5"), Some(("octave".to_string(), json!(5))));
        assert_eq!(
            parse_override("reference_note=C"),
            Some(("reference_note".to_string(), json!("C")))
        );
        assert_eq!(
            parse_override("p={\"a\": 1}"),
            Some(("p".to_string(), json!({"a": 1})))
        );
        assert_eq!(parse_override("novalue"), None);
        assert_eq!(parse_override("=x"), None);
    }
}
