// Tuple splitter: breaks one `(v1, v2, ...)` row literal into raw value tokens.
// Quotes are kept in the tokens and commas inside quoted spans are not separators.
// No escape handling: a doubled '' simply closes and reopens the quoted span.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TupleError {
    #[error("unterminated {quote} quote in tuple (partial value: {partial})")]
    UnterminatedQuote { quote: char, partial: String },
}

// Scan state threaded through the fold. Owned by a single call.
#[derive(Default)]
struct Scan {
    tokens: Vec<String>,
    buf: String,
    open_quote: Option<char>,
}

impl Scan {
    fn step(mut self, c: char) -> Self {
        match (self.open_quote, c) {
            (None, '\'' | '"') => {
                self.open_quote = Some(c);
                self.buf.push(c);
            }
            (Some(q), _) if c == q => {
                self.open_quote = None;
                self.buf.push(c);
            }
            (None, ',') => {
                self.tokens.push(self.buf.trim().to_string());
                self.buf.clear();
            }
            _ => self.buf.push(c),
        }
        self
    }

    fn finish(mut self) -> Result<Vec<String>, TupleError> {
        if let Some(quote) = self.open_quote {
            return Err(TupleError::UnterminatedQuote {
                quote,
                partial: self.buf.trim().to_string(),
            });
        }
        let last = self.buf.trim();
        if !last.is_empty() {
            self.tokens.push(last.to_string());
        }
        Ok(self.tokens)
    }
}

// Split a tuple into trimmed value tokens.
// Outer parentheses are stripped when both are present. An empty interior
// yields no tokens. Empty values between two commas are kept as `""`, but a
// blank trailing value is dropped.
pub fn split_tuple(tuple_text: &str) -> Result<Vec<String>, TupleError> {
    let trimmed = tuple_text.trim();
    let interior = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);
    interior.chars().fold(Scan::default(), Scan::step).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(s: &str) -> Vec<String> {
        split_tuple(s).unwrap()
    }

    #[test]
    fn test_quoted_comma_stays_in_token() {
        assert_eq!(split("(1, 'a,b', 'c')"), vec!["1", "'a,b'", "'c'"]);
    }

    #[test]
    fn test_null_and_numbers() {
        assert_eq!(split("('x', NULL, 123.45)"), vec!["'x'", "NULL", "123.45"]);
    }

    #[test]
    fn test_doubled_single_quote_is_not_an_escape() {
        // The second ' closes the span and the third reopens it, so the
        // whole literal ends up in one token with both quotes intact.
        assert_eq!(split("('it''s', 2)"), vec!["'it''s'", "2"]);
        assert_eq!(split("('it'',s', 2)"), vec!["'it'',s'", "2"]);
    }

    #[test]
    fn test_other_quote_inside_span_is_content() {
        assert_eq!(
            split(r#"('say "hi, there"', "it's, fine")"#),
            vec![r#"'say "hi, there"'"#, r#""it's, fine""#]
        );
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(split("( 1 , 2 )"), vec!["1", "2"]);
        assert_eq!(split("  (\t'a' ,\n b)  "), vec!["'a'", "b"]);
    }

    #[test]
    fn test_empty_interior_yields_no_tokens() {
        assert!(split("()").is_empty());
        assert!(split("(   )").is_empty());
        assert!(split("").is_empty());
    }

    #[test]
    fn test_without_outer_parens() {
        assert_eq!(split("1, 'two', 3"), vec!["1", "'two'", "3"]);
        // Only one paren present: nothing is stripped.
        assert_eq!(split("(1, 2"), vec!["(1", "2"]);
    }

    #[test]
    fn test_empty_values_between_commas() {
        assert_eq!(split("(1,,3)"), vec!["1", "", "3"]);
        assert_eq!(split("(1, 2,)"), vec!["1", "2"]);
    }

    #[test]
    fn test_token_count_matches_top_level_commas() {
        let cases = [
            "('a', 'b', 'c')",
            "(1, '2,3', \"4,5,6\", NULL)",
            "('x')",
            "('uuid-1', 'a, b', 3.5, '2020-01-01', 'Activo')",
        ];
        for case in cases {
            let interior = &case[1..case.len() - 1];
            let mut in_quote: Option<char> = None;
            let mut commas = 0;
            for c in interior.chars() {
                match (in_quote, c) {
                    (None, '\'' | '"') => in_quote = Some(c),
                    (Some(q), _) if q == c => in_quote = None,
                    (None, ',') => commas += 1,
                    _ => {}
                }
            }
            assert_eq!(split(case).len(), commas + 1, "case {}", case);
        }
    }

    #[test]
    fn test_repeated_calls_agree() {
        let input = "('a,b', NULL, 'c''d', 42)";
        assert_eq!(split_tuple(input), split_tuple(input));
    }

    #[test]
    fn test_unterminated_quote_is_an_error() {
        let err = split_tuple("(1, 'abc, def)").unwrap_err();
        assert_eq!(
            err,
            TupleError::UnterminatedQuote {
                quote: '\'',
                partial: "'abc, def".to_string(),
            }
        );
        assert!(matches!(
            split_tuple("(\"open)"),
            Err(TupleError::UnterminatedQuote { quote: '"', .. })
        ));
    }
}
