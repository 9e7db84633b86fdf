//! Cell values and column types.
//!
//! Missing values are explicit (`Value::Missing`) and are never silently
//! coerced to zero or the empty string. Every cell in a table either matches
//! its column's declared type or is missing.

use std::fmt;

use chrono::NaiveDate;

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Date,
    /// Categorical codes are stored as text; the type drives recoding and
    /// display, not storage.
    Categorical,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Real)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Categorical => "categorical",
        };
        f.write_str(name)
    }
}

/// A single cell value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Int(i64),
    Real(f64),
    Text(String),
    Date(NaiveDate),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the value. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The column type this value satisfies, or `None` for missing values
    /// (missing satisfies every declared type).
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Value::Int(_) => Some(ColumnType::Integer),
            Value::Real(_) => Some(ColumnType::Real),
            Value::Text(_) => Some(ColumnType::Text),
            Value::Date(_) => Some(ColumnType::Date),
            Value::Missing => None,
        }
    }

    /// Whether the value may be stored in a column of the given type.
    pub fn matches(&self, ty: ColumnType) -> bool {
        match self {
            Value::Missing => true,
            Value::Int(_) => ty == ColumnType::Integer,
            Value::Real(_) => ty == ColumnType::Real,
            Value::Text(_) => matches!(ty, ColumnType::Text | ColumnType::Categorical),
            Value::Date(_) => ty == ColumnType::Date,
        }
    }

    /// Hash/eq-comparable image of the value for grouping and join keys.
    /// Reals compare by bit pattern.
    pub fn key_atom(&self) -> KeyAtom {
        match self {
            Value::Int(v) => KeyAtom::Int(*v),
            Value::Real(v) => KeyAtom::Bits(v.to_bits()),
            Value::Text(s) => KeyAtom::Text(s.clone()),
            Value::Date(d) => KeyAtom::Date(*d),
            Value::Missing => KeyAtom::Missing,
        }
    }

    /// Renders the value for delimited output and table display.
    ///
    /// Missing renders as the empty string; reals drop trailing zeros so
    /// whole numbers print without a fractional part.
    pub fn render(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Real(v) => format_numeric(*v),
            Value::Text(s) => s.clone(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Missing => String::new(),
        }
    }
}

/// Comparable key image of a [`Value`]. Missing is a valid grouping atom;
/// join code treats it as never-matching instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyAtom {
    Int(i64),
    Bits(u64),
    Text(String),
    Date(NaiveDate),
    Missing,
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use tabula_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.5), "1.5");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(-2.25), "-2.25");
    }

    #[test]
    fn test_render_missing_is_empty() {
        assert_eq!(Value::Missing.render(), "");
    }

    #[test]
    fn test_matches_declared_types() {
        assert!(Value::Int(1).matches(ColumnType::Integer));
        assert!(!Value::Int(1).matches(ColumnType::Real));
        assert!(Value::Text("MB".into()).matches(ColumnType::Categorical));
        assert!(Value::Missing.matches(ColumnType::Date));
    }

    #[test]
    fn test_key_atom_distinguishes_types() {
        assert_ne!(Value::Int(1).key_atom(), Value::Text("1".into()).key_atom());
        assert_eq!(Value::Real(2.5).key_atom(), Value::Real(2.5).key_atom());
    }

    #[test]
    fn test_value_serde_round_trip() {
        let value = Value::Real(1.5);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"kind":"Real","value":1.5}"#);
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
