use serde::{Deserialize, Serialize};

/// The two independent match signals plus rationale extracted from the
/// classifier's free-text response. No admit/reject decision yet — that is
/// the policy's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningSignals {
    pub field_match: bool,
    pub method_match: bool,
    pub summary: String,
}

/// Final verdict for one item: the signals plus the policy decision.
///
/// Built via [`crate::policy::evaluate_verdict`], which recomputes
/// `admitted` from the signals and the group label every time — don't
/// assemble one by hand with a cached decision.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningVerdict {
    pub field_match: bool,
    pub method_match: bool,
    pub summary: String,
    pub admitted: bool,
}
