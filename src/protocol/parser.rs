use crate::models::ScreeningSignals;

/// The literal marker whose tail is the summary.
const SUMMARY_TOKEN: &str = "SUMMARY:";

/// Parse a model response into the two match signals and a summary.
///
/// Tolerant by construction: markers are scanned case-insensitively line by
/// line, missing markers default to false/empty, and surrounding free text
/// is ignored. This never fails on arbitrary model output — worst case both
/// signals are false and the summary is empty.
pub fn parse_screening_response(response: &str) -> ScreeningSignals {
    let mut signals = ScreeningSignals::default();

    for line in response.lines() {
        let upper = line.trim().to_uppercase();
        if let Some(value) = upper.strip_prefix("FIELD_MATCH:") {
            signals.field_match = parse_flag(value);
        } else if let Some(value) = upper.strip_prefix("METHOD_MATCH:") {
            signals.method_match = parse_flag(value);
        }
    }

    // Summaries legitimately span multiple lines. Everything after the first
    // literal SUMMARY: token is the summary, not just its first line.
    if let Some(idx) = response.find(SUMMARY_TOKEN) {
        signals.summary = response[idx + SUMMARY_TOKEN.len()..].trim().to_string();
    }

    signals
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "yes" | "true" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_response_parses() {
        let signals = parse_screening_response(
            "FIELD_MATCH: yes\nMETHOD_MATCH: no\nSUMMARY: Problem: X | Method: Y",
        );
        assert!(signals.field_match);
        assert!(!signals.method_match);
        assert_eq!(signals.summary, "Problem: X | Method: Y");
    }

    #[test]
    fn unrecognized_text_yields_defaults_without_error() {
        let signals = parse_screening_response("I'm sorry, I cannot assess this paper.");
        assert!(!signals.field_match);
        assert!(!signals.method_match);
        assert_eq!(signals.summary, "");
    }

    #[test]
    fn empty_response_yields_defaults() {
        let signals = parse_screening_response("");
        assert_eq!(signals, ScreeningSignals::default());
    }

    #[test]
    fn markers_match_case_insensitively() {
        let signals = parse_screening_response("field_match: YES\nMethod_Match: True");
        assert!(signals.field_match);
        assert!(signals.method_match);
    }

    #[test]
    fn flag_values_accept_yes_true_one() {
        for value in ["yes", "true", "1", "YES", "True"] {
            let signals = parse_screening_response(&format!("FIELD_MATCH: {value}"));
            assert!(signals.field_match, "{value} should parse as true");
        }
        for value in ["no", "false", "0", "maybe", ""] {
            let signals = parse_screening_response(&format!("FIELD_MATCH: {value}"));
            assert!(!signals.field_match, "{value:?} should parse as false");
        }
    }

    #[test]
    fn multiline_summary_captured_whole() {
        let response = "FIELD_MATCH: yes\nMETHOD_MATCH: yes\nSUMMARY: Problem: gene regulation\nMethod: CRISPR screen\nHighlights: novel targets";
        let signals = parse_screening_response(response);
        assert_eq!(
            signals.summary,
            "Problem: gene regulation\nMethod: CRISPR screen\nHighlights: novel targets"
        );
    }

    #[test]
    fn preamble_and_trailing_chatter_ignored() {
        let response = "Sure! Here is my assessment:\n\nFIELD_MATCH: no\nMETHOD_MATCH: yes\nSUMMARY: Problem: image classification | Method: CNN";
        let signals = parse_screening_response(response);
        assert!(!signals.field_match);
        assert!(signals.method_match);
        assert!(signals.summary.starts_with("Problem: image classification"));
    }

    #[test]
    fn missing_summary_is_empty_not_error() {
        let signals = parse_screening_response("FIELD_MATCH: yes\nMETHOD_MATCH: yes");
        assert!(signals.field_match);
        assert_eq!(signals.summary, "");
    }
}
