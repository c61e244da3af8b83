/// Typographic characters with a readable ASCII spelling.
const REPLACEMENTS: [(char, &str); 13] = [
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2026}', "..."),
    ('\u{20AC}', "EUR"),
    ('\u{00A3}', "GBP"),
    ('\u{00A5}', "JPY"),
    ('\u{00A9}', "(c)"),
    ('\u{00AE}', "(R)"),
    ('\u{2122}', "(TM)"),
];

/// Reduces text to the ASCII repertoire of the standard PDF Type1 fonts.
/// Anything without a replacement becomes `?`.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some((_, replacement)) = REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            out.push_str(replacement);
        } else {
            out.push('?');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typographic_punctuation() {
        let out = sanitize("\u{201C}Glow\u{201D} \u{2014} it\u{2019}s here\u{2026}");
        assert_eq!(out, "\"Glow\" - it's here...");
        assert!(out.bytes().all(|b| b < 128));
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            sanitize("\u{20AC}5 \u{00A3}4 \u{00A5}3 \u{00A9} \u{00AE} \u{2122} 1\u{2013}2"),
            "EUR5 GBP4 JPY3 (c) (R) (TM) 1-2"
        );
    }

    #[test]
    fn test_other_non_ascii_becomes_question_mark() {
        assert_eq!(sanitize("caf\u{00E9} \u{1F33F}"), "caf? ?");
    }

    #[test]
    fn test_ascii_passes_through() {
        let text = "Plain text\nwith lines & symbols (100%)";
        assert_eq!(sanitize(text), text);
    }
}
