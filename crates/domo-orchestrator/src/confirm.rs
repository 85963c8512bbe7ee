// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of replies to a parked confirmation question.
//!
//! Matching is exact against short phrase tables, not substring based:
//! "no idea, what can you do?" must not read as a refusal. Anything that is
//! not a clear yes or no is treated as a brand-new request.

/// Replies that commit the user to the parked action.
const AFFIRMATIVE_REPLIES: &[&str] = &[
    "yes",
    "y",
    "yeah",
    "yep",
    "yup",
    "sure",
    "ok",
    "okay",
    "confirm",
    "go ahead",
    "do it",
    "please do",
];

/// Replies that abandon the parked action.
const NEGATIVE_REPLIES: &[&str] = &[
    "no",
    "n",
    "nope",
    "nah",
    "cancel",
    "stop",
    "don't",
    "dont",
    "never mind",
    "nevermind",
];

/// How a message relates to an outstanding confirmation question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySense {
    /// Clear yes: run the parked intent.
    Affirmative,
    /// Clear no: drop the parked intent.
    Negative,
    /// Neither: treat the message as a fresh request.
    Other,
}

/// Classify one message against the phrase tables. Case, surrounding
/// whitespace, and trailing punctuation are ignored.
pub fn classify_reply(text: &str) -> ReplySense {
    let normalized = text
        .trim()
        .trim_end_matches(['.', '!', '?'])
        .trim_end()
        .to_lowercase();
    if AFFIRMATIVE_REPLIES.contains(&normalized.as_str()) {
        return ReplySense::Affirmative;
    }
    if NEGATIVE_REPLIES.contains(&normalized.as_str()) {
        return ReplySense::Negative;
    }
    ReplySense::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_yes_and_no() {
        assert_eq!(classify_reply("yes"), ReplySense::Affirmative);
        assert_eq!(classify_reply("no"), ReplySense::Negative);
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        assert_eq!(classify_reply("  Yes!  "), ReplySense::Affirmative);
        assert_eq!(classify_reply("NOPE."), ReplySense::Negative);
        assert_eq!(classify_reply("Go ahead?"), ReplySense::Affirmative);
    }

    #[test]
    fn longer_sentences_are_new_requests() {
        assert_eq!(classify_reply("yes please book it now"), ReplySense::Other);
        assert_eq!(classify_reply("no idea, what can you do?"), ReplySense::Other);
    }

    #[test]
    fn unrelated_text_is_other() {
        assert_eq!(classify_reply("what's my balance"), ReplySense::Other);
        assert_eq!(classify_reply(""), ReplySense::Other);
    }
}
