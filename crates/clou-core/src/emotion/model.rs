//! Emotion domain model.

use serde::{Deserialize, Serialize};

/// An emotion tag (e.g. sadness, solitude, warmth).
///
/// Reference data: the set is defined server-side and fetched once per run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Emotion {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_without_description() {
        let emotion: Emotion = serde_json::from_str(r#"{"id": 3, "name": "warmth"}"#).unwrap();
        assert_eq!(emotion.name, "warmth");
        assert!(emotion.description.is_empty());
    }
}
