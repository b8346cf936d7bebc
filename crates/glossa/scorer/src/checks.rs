use glossa_config::BuiltinCheck;

/// A check that could not be evaluated. Contained per rule: the scorer
/// converts it into a failed rule result and continues with the rest of
/// the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("check needs the subject term, but the scorer has none")]
    SubjectRequired,
}

/// Outcome of one built-in or custom check.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckOutcome {
    pub passed: bool,
    /// Score in [0, 1]; 1.0 on pass, possibly partial on fail.
    pub score: f64,
    /// Extra detail for the violation message, when the check has any.
    pub detail: Option<String>,
}

impl CheckOutcome {
    fn pass() -> Self {
        Self {
            passed: true,
            score: 1.0,
            detail: None,
        }
    }

    fn fail(score: f64, detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            score: score.clamp(0.0, 1.0),
            detail: Some(detail.into()),
        }
    }
}

/// Evaluate a built-in check against the text. `subject` is the term
/// under definition, when the scorer knows it.
pub fn evaluate_builtin(
    check: &BuiltinCheck,
    text: &str,
    subject: Option<&str>,
) -> Result<CheckOutcome, CheckError> {
    match check {
        BuiltinCheck::NotCircular => not_circular(text, subject),
        BuiltinCheck::WordCount { min, max } => Ok(word_count(text, *min, *max)),
        BuiltinCheck::SingleSentence => Ok(single_sentence(text)),
        BuiltinCheck::StartsClean => Ok(starts_clean(text, subject)),
        BuiltinCheck::NoForbiddenPhrases { phrases } => Ok(no_forbidden_phrases(text, phrases)),
    }
}

fn not_circular(text: &str, subject: Option<&str>) -> Result<CheckOutcome, CheckError> {
    let subject = subject.ok_or(CheckError::SubjectRequired)?;
    let needle = subject.trim().to_lowercase();
    if needle.is_empty() {
        return Err(CheckError::SubjectRequired);
    }
    if text.to_lowercase().contains(&needle) {
        Ok(CheckOutcome::fail(
            0.0,
            format!("the definition contains the term {subject:?}"),
        ))
    } else {
        Ok(CheckOutcome::pass())
    }
}

fn word_count(text: &str, min: usize, max: usize) -> CheckOutcome {
    let count = text.split_whitespace().count();
    if (min..=max).contains(&count) {
        return CheckOutcome::pass();
    }
    // Partial scoring: how far outside the band the text falls.
    let score = if count < min {
        count as f64 / min as f64
    } else {
        max as f64 / count as f64
    };
    CheckOutcome::fail(score, format!("{count} words, expected {min}-{max}"))
}

fn single_sentence(text: &str) -> CheckOutcome {
    // A terminator followed by whitespace starts a new sentence. A bare
    // "2.1" style reference does not.
    let trimmed = text.trim_end();
    let mut chars = trimmed.chars().peekable();
    let mut breaks = 0usize;
    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(next) = chars.peek() {
                if next.is_whitespace() {
                    breaks += 1;
                }
            }
        }
    }
    if breaks == 0 {
        CheckOutcome::pass()
    } else {
        CheckOutcome::fail(0.0, format!("{} sentences, expected one", breaks + 1))
    }
}

fn starts_clean(text: &str, subject: Option<&str>) -> CheckOutcome {
    let lower = text.trim_start().to_lowercase();
    for opener in ["dit begrip", "het begrip", "de term", "deze term"] {
        if lower.starts_with(opener) {
            return CheckOutcome::fail(0.0, format!("opens with the meta phrase {opener:?}"));
        }
    }
    if let Some(subject) = subject {
        let needle = subject.trim().to_lowercase();
        if !needle.is_empty() && lower.starts_with(&needle) {
            return CheckOutcome::fail(0.0, "opens with the term itself".to_string());
        }
    }
    CheckOutcome::pass()
}

fn no_forbidden_phrases(text: &str, phrases: &[String]) -> CheckOutcome {
    let lower = text.to_lowercase();
    for phrase in phrases {
        let phrase = phrase.to_lowercase();
        if !phrase.is_empty() && lower.contains(&phrase) {
            return CheckOutcome::fail(0.0, format!("contains the phrase {phrase:?}"));
        }
    }
    CheckOutcome::pass()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_circular_flags_term_echo() {
        let out = not_circular(
            "een vergunning die door de gemeente wordt verleend",
            Some("vergunning"),
        )
        .unwrap();
        assert!(!out.passed);
        assert_eq!(out.score, 0.0);
    }

    #[test]
    fn not_circular_passes_clean_definition() {
        let out = not_circular(
            "een schriftelijke toestemming van het bevoegd gezag",
            Some("vergunning"),
        )
        .unwrap();
        assert!(out.passed);
    }

    #[test]
    fn not_circular_without_subject_is_an_error() {
        assert!(matches!(
            not_circular("tekst", None),
            Err(CheckError::SubjectRequired)
        ));
    }

    #[test]
    fn word_count_band_and_partial_scores() {
        assert!(word_count("een twee drie vier vijf", 5, 10).passed);

        let short = word_count("een twee", 4, 10);
        assert!(!short.passed);
        assert_eq!(short.score, 0.5);

        let long = word_count(&"woord ".repeat(20), 2, 10);
        assert!(!long.passed);
        assert_eq!(long.score, 0.5);
    }

    #[test]
    fn single_sentence_ignores_article_references() {
        let out = single_sentence("een besluit als bedoeld in artikel 2.1 van de wet.");
        assert!(out.passed);
    }

    #[test]
    fn single_sentence_flags_two_sentences() {
        let out = single_sentence("Een besluit. Het wordt genomen door het college.");
        assert!(!out.passed);
        assert_eq!(out.detail.as_deref(), Some("2 sentences, expected one"));
    }

    #[test]
    fn starts_clean_flags_meta_opener_and_term_echo() {
        assert!(!starts_clean("Dit begrip omvat alles", None).passed);
        assert!(!starts_clean("Vergunning voor het bouwen", Some("vergunning")).passed);
        assert!(starts_clean("een toestemming van het gezag", Some("vergunning")).passed);
    }

    #[test]
    fn forbidden_phrases_are_case_insensitive() {
        let phrases = vec!["is een begrip".to_string()];
        assert!(!no_forbidden_phrases("Dit IS EEN BEGRIP uit de wet", &phrases).passed);
        assert!(no_forbidden_phrases("een toestemming", &phrases).passed);
    }
}
