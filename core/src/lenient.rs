//! Field decoders that drop a value of the wrong shape instead of failing
//! the whole record. Only the fields that carry them are affected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn option<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.and_then(|v| serde_json::from_value(v).ok()))
}

pub(crate) fn vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(option(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "super::option")]
        n: Option<i32>,
        #[serde(default, deserialize_with = "super::vec")]
        list: Vec<String>,
    }

    #[test]
    fn wrong_shapes_fall_back() {
        let p: Sample = serde_json::from_value(json!({ "n": "seven", "list": { "a": 1 } })).unwrap();
        assert_eq!(p.n, None);
        assert!(p.list.is_empty());
    }

    #[test]
    fn right_shapes_and_missing_fields() {
        let p: Sample = serde_json::from_value(json!({ "n": 7, "list": ["x"] })).unwrap();
        assert_eq!(p.n, Some(7));
        assert_eq!(p.list, vec!["x".to_string()]);
        let p: Sample = serde_json::from_value(json!({ "n": null })).unwrap();
        assert_eq!(p.n, None);
        assert!(p.list.is_empty());
    }
}
