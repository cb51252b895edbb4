use serde::{Deserialize, Deserializer};

/// Accept a list either as a JSON array or as a comma-joined string.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::List(items) => items,
        Raw::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Raw::Null(()) => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "super::string_list")]
        tags: Vec<String>,
    }

    #[test]
    fn accepts_array_string_and_null() {
        let a: Holder = serde_json::from_str(r#"{"tags":["a","b"]}"#).unwrap();
        let b: Holder = serde_json::from_str(r#"{"tags":"a, b,,"}"#).unwrap();
        let c: Holder = serde_json::from_str(r#"{"tags":null}"#).unwrap();
        let d: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(a.tags, vec!["a", "b"]);
        assert_eq!(b.tags, vec!["a", "b"]);
        assert!(c.tags.is_empty());
        assert!(d.tags.is_empty());
    }
}
