//! Tri-state optional field used by partial-update DTOs.
//!
//! A plain `Option<T>` cannot tell "the client did not send this key" apart
//! from "the client sent `null`", and a bare `T` cannot tell either of them
//! apart from the zero value. [`Patch`] keeps all three states distinct:
//!
//! | JSON input        | Value              | Effect on the column |
//! |-------------------|--------------------|----------------------|
//! | key missing       | `Patch::Absent`    | untouched            |
//! | `"key": null`     | `Patch::Clear`     | set to `NULL`        |
//! | `"key": <value>`  | `Patch::Set(v)`    | set to `v`           |
//!
//! Fields must be annotated with `#[serde(default)]` so a missing key lands
//! on `Absent`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// `true` for `Clear` and `Set`: the column will be written.
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// The new value when one was supplied.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Clear => Patch::Clear,
            Patch::Set(v) => Patch::Set(v),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
        match self {
            Patch::Absent => Patch::Absent,
            Patch::Clear => Patch::Clear,
            Patch::Set(v) => Patch::Set(f(v)),
        }
    }

    /// Collapse a present field into the value that will be written
    /// (`None` meaning SQL `NULL`). Returns `None` for `Absent`.
    pub fn into_write(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Clear => Some(None),
            Patch::Set(v) => Some(Some(v)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; a missing key uses `Default`.
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Set(v) => serializer.serialize_some(v),
            Patch::Absent | Patch::Clear => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default)]
        flag: Patch<bool>,
        #[serde(default)]
        label: Patch<String>,
    }

    fn parse(json: &str) -> Form {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn missing_key_is_absent() {
        let p = parse("{}");
        assert_eq!(p.flag, Patch::Absent);
        assert_eq!(p.label, Patch::Absent);
    }

    #[test]
    fn explicit_null_is_clear() {
        let p = parse(r#"{"label": null}"#);
        assert_eq!(p.label, Patch::Clear);
        assert_eq!(p.flag, Patch::Absent);
    }

    #[test]
    fn false_is_distinct_from_absent() {
        let p = parse(r#"{"flag": false}"#);
        assert_eq!(p.flag, Patch::Set(false));
        assert!(p.flag.is_present());
    }

    #[test]
    fn empty_string_is_set() {
        let p = parse(r#"{"label": ""}"#);
        assert_eq!(p.label.as_set().map(String::as_str), Some(""));
    }

    #[test]
    fn into_write_distinguishes_all_states() {
        assert_eq!(Patch::<i32>::Absent.into_write(), None);
        assert_eq!(Patch::<i32>::Clear.into_write(), Some(None));
        assert_eq!(Patch::Set(0).into_write(), Some(Some(0)));
    }

    #[test]
    fn map_preserves_state() {
        assert_eq!(Patch::Set(2).map(|v| v * 10), Patch::Set(20));
        assert_eq!(Patch::<i32>::Clear.map(|v| v * 10), Patch::Clear);
        assert_eq!(Patch::<i32>::Absent.map(|v| v * 10), Patch::Absent);
    }

    #[test]
    fn serializes_as_nullable_value() {
        assert_eq!(
            serde_json::to_value(Patch::Set("Milk".to_string())).unwrap(),
            serde_json::json!("Milk")
        );
        assert_eq!(
            serde_json::to_value(Patch::<i32>::Clear).unwrap(),
            serde_json::Value::Null
        );
        assert_eq!(
            serde_json::to_value(Patch::<i32>::Absent).unwrap(),
            serde_json::Value::Null
        );
    }
}
