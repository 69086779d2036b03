//! Crisis phrase and pattern lists.
//!
//! These lists are versioned configuration data: their maintenance is a
//! safety concern independent of code structure. They are exhaustive only to
//! the extent maintained; the classifier built on them is a best-effort
//! lexical filter, not a guarantee.

use once_cell::sync::Lazy;
use regex::Regex;

/// Literal phrases that mark a message as a potential crisis.
///
/// Matched as case-insensitive substrings of the normalized message.
pub(crate) const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "killing myself",
    "end my life",
    "ending my life",
    "take my own life",
    "want to die",
    "wish i was dead",
    "hopeless",
    "self harm",
    "self-harm",
    "hurt myself",
    "hurting myself",
    "cut myself",
    "cutting myself",
    "overdose",
    "no reason to live",
    "nothing to live for",
    "better off dead",
    "better off without me",
    "end it all",
];

/// Regex templates for paraphrased crisis expressions the literal list misses.
pub(crate) static CRISIS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"i\s+(?:just\s+)?want\s+to\s+die",
        r"life\s+(?:just\s+)?is(?:n'?t|\s+not)\s+worth\s+living",
        r"nobody\s+would\s+(?:even\s+)?miss\s+me",
        r"no\s+one\s+would\s+(?:even\s+)?miss\s+me",
        r"can'?t\s+(?:take|do)\s+(?:it|this)\s+any\s*more",
        r"can'?t\s+go\s+on",
        r"thinking\s+(?:about|of)\s+suicide",
        r"(?:don'?t|do\s+not)\s+want\s+to\s+(?:live|be\s+alive|be\s+here)",
        r"no\s+point\s+(?:in\s+)?(?:living|going\s+on)",
        r"giv(?:e|ing)\s+up\s+on\s+(?:life|everything)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("crisis pattern must compile"))
    .collect()
});

/// Subset of phrases indicating immediate risk; escalates severity to high.
pub(crate) const IMMEDIATE_RISK_PHRASES: &[&str] = &[
    "kill myself",
    "killing myself",
    "suicide",
    "suicidal",
    "overdose",
    "jump off",
    "hanging",
    "hang myself",
    "gun",
    "razor",
    "pills",
    "end my life",
];

/// Instruction appended to a crisis message before it is stored.
///
/// The same literal text regardless of severity. Because the annotation is
/// appended to the stored message, it remains part of the conversational
/// context on every future turn.
pub const CRISIS_ANNOTATION: &str = "\n\n[ALERT: This message may indicate a mental-health crisis. \
Prioritize the person's immediate safety. Respond with empathy and supportive language, \
encourage them to reach out to a crisis helpline or emergency services right away, \
and share crisis resources such as the 988 Suicide & Crisis Lifeline (call or text 988).]";
