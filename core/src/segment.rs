//! Sentence segmentation for streamed planner reasoning.

/// Fragments shorter than this (after trimming) are noise, not sentences.
const MIN_SENTENCE_CHARS: usize = 4;

/// Splits free text into complete sentences.
///
/// A sentence ends at `.`, `!` or `?` only when the punctuation is followed by
/// a space, a line break or the end of input, so decimals like `3.5` stay
/// intact. A trailing fragment without punctuation is kept. Fragments of three
/// characters or fewer are dropped.
pub fn segment(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') && matches!(chars.peek(), None | Some(' ' | '\n' | '\r')) {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if sentence.chars().count() >= MIN_SENTENCE_CHARS {
        sentences.push(sentence.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_terminal_punctuation() {
        assert_eq!(
            segment("Found 3 agents. Found 2 teams."),
            vec!["Found 3 agents.", "Found 2 teams."]
        );
    }

    #[test]
    fn short_fragments_are_dropped() {
        assert!(segment("OK").is_empty());
        assert_eq!(segment("Ok. Checking the queue now!"), vec!["Checking the queue now!"]);
    }

    #[test]
    fn trailing_fragment_is_kept() {
        assert_eq!(segment("Hello world"), vec!["Hello world"]);
    }

    #[test]
    fn decimals_do_not_split() {
        assert_eq!(
            segment("Cost is 3.5 dollars. Done!"),
            vec!["Cost is 3.5 dollars.", "Done!"]
        );
    }

    #[test]
    fn newlines_and_carriage_returns_end_sentences() {
        assert_eq!(
            segment("Is it ready?\nYes it is.\r\nShipping"),
            vec!["Is it ready?", "Yes it is.", "Shipping"]
        );
    }

    #[test]
    fn tab_after_period_does_not_split() {
        assert_eq!(segment("Step one.\tstep two"), vec!["Step one.\tstep two"]);
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            segment("Vérifié l'équipe. Très bien!"),
            vec!["Vérifié l'équipe.", "Très bien!"]
        );
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert!(segment("").is_empty());
        assert!(segment("   \n ").is_empty());
    }
}
