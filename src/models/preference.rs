use serde::{Deserialize, Serialize};

/// A liked or disliked example paper the researcher has flagged, used to
/// anchor the classifier's judgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceExample {
    pub title: String,
    pub abstract_excerpt: Option<String>,
    pub reason: Option<String>,
}

/// The researcher's interests plus optional liked/disliked examples.
/// Loaded once per run by an external collaborator; read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Free-text research interests.
    pub interests: String,
    pub liked: Vec<PreferenceExample>,
    pub disliked: Vec<PreferenceExample>,
}

impl PreferenceProfile {
    pub fn new(interests: impl Into<String>) -> Self {
        Self {
            interests: interests.into(),
            liked: Vec::new(),
            disliked: Vec::new(),
        }
    }

    /// Whether the prompt should carry an examples section at all.
    pub fn has_examples(&self) -> bool {
        !self.liked.is_empty() || !self.disliked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_has_no_examples() {
        assert!(!PreferenceProfile::new("genomics").has_examples());
    }

    #[test]
    fn disliked_only_counts_as_examples() {
        let mut profile = PreferenceProfile::new("genomics");
        profile.disliked.push(PreferenceExample {
            title: "A survey of surveys".into(),
            abstract_excerpt: None,
            reason: Some("too broad".into()),
        });
        assert!(profile.has_examples());
    }
}
