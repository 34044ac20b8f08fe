//! Group-conditioned relevance policy.
//!
//! The group label is an operator-assigned trust signal, not a model
//! output: curated high-value feeds get broad recall (field OR method),
//! everything else gets the precision-favoring default (field AND method).

use crate::models::{ScreeningSignals, ScreeningVerdict};

/// Substrings of a group label that select the lenient OR policy.
/// Matching any of them, anywhere in the label, wins.
pub const LENIENT_GROUP_KEYWORDS: &[&str] = &["high", "quality"];

/// Whether the group label selects the lenient OR policy.
pub fn is_lenient_group(group_label: &str) -> bool {
    let label = group_label.to_lowercase();
    LENIENT_GROUP_KEYWORDS.iter().any(|kw| label.contains(kw))
}

/// The admit/reject decision, a pure function of the two signals and the
/// group label. Recomputed fresh every time, never cached.
pub fn decide(field_match: bool, method_match: bool, group_label: &str) -> bool {
    if is_lenient_group(group_label) {
        field_match || method_match
    } else {
        field_match && method_match
    }
}

/// Apply the policy to parsed signals, producing the final verdict.
pub fn evaluate_verdict(signals: ScreeningSignals, group_label: &str) -> ScreeningVerdict {
    let admitted = decide(signals.field_match, signals.method_match, group_label);
    ScreeningVerdict {
        field_match: signals.field_match,
        method_match: signals.method_match,
        summary: signals.summary,
        admitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_quality_group_admits_on_either_signal() {
        assert!(decide(true, false, "high-quality"));
        assert!(decide(false, true, "high-quality"));
        assert!(!decide(false, false, "high-quality"));
    }

    #[test]
    fn default_group_requires_both_signals() {
        assert!(!decide(true, false, "default"));
        assert!(!decide(false, true, "default"));
        assert!(decide(true, true, "default"));
        assert!(!decide(false, false, "default"));
    }

    #[test]
    fn keywords_match_case_insensitively_anywhere() {
        assert!(is_lenient_group("HIGH"));
        assert!(is_lenient_group("Top Quality Journals"));
        assert!(is_lenient_group("somewhat-highbrow"));
        assert!(!is_lenient_group("default"));
        assert!(!is_lenient_group("preprints"));
    }

    #[test]
    fn verdict_carries_signals_and_decision() {
        let verdict = evaluate_verdict(
            ScreeningSignals {
                field_match: true,
                method_match: false,
                summary: "Problem: X".into(),
            },
            "high-quality",
        );
        assert!(verdict.admitted);
        assert!(verdict.field_match);
        assert!(!verdict.method_match);
        assert_eq!(verdict.summary, "Problem: X");
    }

    #[test]
    fn same_signals_different_group_different_decision() {
        let signals = ScreeningSignals {
            field_match: true,
            method_match: false,
            summary: String::new(),
        };
        assert!(evaluate_verdict(signals.clone(), "quality").admitted);
        assert!(!evaluate_verdict(signals, "default").admitted);
    }
}
