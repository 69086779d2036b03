//! Deterministic, lexical crisis classification.
//!
//! Pure function from message text to an assessment. No NLP: detection is
//! literal substring and regex matching over the maintained lexicon, so the
//! same input always yields the same output.

use serde::Serialize;

use super::lexicon::{CRISIS_ANNOTATION, CRISIS_PATTERNS, CRISIS_PHRASES, IMMEDIATE_RISK_PHRASES};

/// Assessed severity of a crisis signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisSeverity {
    /// No crisis signal detected.
    None,
    /// Crisis signal without immediate-risk language.
    Moderate,
    /// Crisis signal containing immediate-risk language.
    High,
}

impl std::fmt::Display for CrisisSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CrisisSeverity::None => "none",
            CrisisSeverity::Moderate => "moderate",
            CrisisSeverity::High => "high",
        };
        write!(f, "{s}")
    }
}

/// Result of classifying a single message. Computed fresh per message,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisAssessment {
    /// Whether the message tripped the crisis filter.
    pub is_crisis: bool,
    /// Severity under the immediate-risk phrase rule.
    pub severity: CrisisSeverity,
    /// Text to append to the stored message, present only on crisis.
    pub annotation: Option<&'static str>,
}

impl CrisisAssessment {
    fn clear() -> Self {
        Self {
            is_crisis: false,
            severity: CrisisSeverity::None,
            annotation: None,
        }
    }
}

/// Classifies a message for crisis signals.
///
/// Case-insensitive. Detection runs on the trimmed, lowercased text; the
/// severity check runs on the lowercased original. Empty or whitespace-only
/// input is never a crisis.
pub fn classify(text: &str) -> CrisisAssessment {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return CrisisAssessment::clear();
    }

    let phrase_hit = CRISIS_PHRASES
        .iter()
        .any(|phrase| normalized.contains(phrase));
    let pattern_hit =
        !phrase_hit && CRISIS_PATTERNS.iter().any(|re| re.is_match(&normalized));

    if !phrase_hit && !pattern_hit {
        return CrisisAssessment::clear();
    }

    let original = text.to_lowercase();
    let severity = if IMMEDIATE_RISK_PHRASES
        .iter()
        .any(|phrase| original.contains(phrase))
    {
        CrisisSeverity::High
    } else {
        CrisisSeverity::Moderate
    };

    CrisisAssessment {
        is_crisis: true,
        severity,
        annotation: Some(CRISIS_ANNOTATION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_stress_is_not_a_crisis() {
        let assessment = classify("I am stressed about exams");
        assert!(!assessment.is_crisis);
        assert_eq!(assessment.severity, CrisisSeverity::None);
        assert!(assessment.annotation.is_none());
    }

    #[test]
    fn empty_input_is_not_a_crisis() {
        assert!(!classify("").is_crisis);
        assert!(!classify("   \n\t ").is_crisis);
    }

    #[test]
    fn literal_phrase_triggers_detection() {
        let assessment = classify("I feel hopeless about everything");
        assert!(assessment.is_crisis);
        assert_eq!(assessment.severity, CrisisSeverity::Moderate);
        assert!(assessment.annotation.is_some());
    }

    #[test]
    fn paraphrase_pattern_triggers_detection() {
        let assessment = classify("I don't want to live anymore");
        assert!(assessment.is_crisis);
        assert_eq!(assessment.severity, CrisisSeverity::Moderate);
    }

    #[test]
    fn immediate_risk_phrase_escalates_to_high() {
        let assessment = classify("sometimes I think I should kill myself");
        assert!(assessment.is_crisis);
        assert_eq!(assessment.severity, CrisisSeverity::High);
    }

    #[test]
    fn suicide_mention_is_high_severity() {
        let assessment = classify("I keep thinking about suicide");
        assert!(assessment.is_crisis);
        assert_eq!(assessment.severity, CrisisSeverity::High);
    }

    #[test]
    fn detection_is_case_insensitive() {
        let assessment = classify("I CAN'T TAKE IT ANYMORE");
        assert!(assessment.is_crisis);
    }

    #[test]
    fn classification_is_deterministic() {
        let input = "life isn't worth living";
        assert_eq!(classify(input), classify(input));
        assert!(classify(input).is_crisis);
    }

    #[test]
    fn annotation_is_identical_for_both_severities() {
        let moderate = classify("I feel hopeless");
        let high = classify("I want to overdose");
        assert_eq!(moderate.annotation, high.annotation);
        assert!(moderate.annotation.is_some());
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&CrisisSeverity::Moderate).unwrap(),
            "\"moderate\""
        );
        assert_eq!(
            serde_json::to_string(&CrisisSeverity::High).unwrap(),
            "\"high\""
        );
    }
}
