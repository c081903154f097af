//! Formula tokenizer.
//!
//! A single forward scan over the input that produces typed tokens directly:
//!
//! - `(` and `)`
//! - operators `+ - * /`
//! - variables: one or more ASCII letters followed by one or more digits
//! - numbers: digits with an optional fractional part and optional exponent
//!   (`12`, `1.5`, `.5`, `3.`, `1e-4`, `2.5E+3`)
//!
//! Whitespace separates tokens and is dropped. Anything else becomes a
//! [`TokenKind::Invalid`] token; tokenizing never fails.

/// Classification of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Variable,
    Operator,
    OpenParen,
    CloseParen,
    Invalid,
}

/// A classified slice of the formula text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Split a formula into tokens.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if let Some(c) = input[pos..].chars().next().filter(|c| c.is_whitespace()) {
            pos += c.len_utf8();
            continue;
        }

        let b = bytes[pos];

        let (kind, end) = match b {
            b'(' => (TokenKind::OpenParen, pos + 1),
            b')' => (TokenKind::CloseParen, pos + 1),
            b'+' | b'-' | b'*' | b'/' => (TokenKind::Operator, pos + 1),
            b if b.is_ascii_alphabetic() => scan_variable(bytes, pos),
            b if b.is_ascii_digit() || b == b'.' => scan_number(bytes, pos),
            _ => (TokenKind::Invalid, next_char_boundary(input, pos)),
        };

        tokens.push(Token {
            kind,
            text: &input[pos..end],
        });
        pos = end;
    }

    tokens
}

/// Letters then digits. Letters without trailing digits are invalid.
fn scan_variable(bytes: &[u8], start: usize) -> (TokenKind, usize) {
    let letters_end = skip_while(bytes, start, |b| b.is_ascii_alphabetic());
    let digits_end = skip_while(bytes, letters_end, |b| b.is_ascii_digit());
    if digits_end == letters_end {
        (TokenKind::Invalid, letters_end)
    } else {
        (TokenKind::Variable, digits_end)
    }
}

fn scan_number(bytes: &[u8], start: usize) -> (TokenKind, usize) {
    let int_end = skip_while(bytes, start, |b| b.is_ascii_digit());
    let mut end = int_end;
    let mut frac_digits = 0;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_while(bytes, end + 1, |b| b.is_ascii_digit());
        frac_digits = frac_end - (end + 1);
        end = frac_end;
    }

    if int_end == start && frac_digits == 0 {
        // A lone '.'
        return (TokenKind::Invalid, start + 1);
    }

    // The exponent only belongs to the number when digits follow it;
    // otherwise the 'e' starts the next token.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_while(bytes, exp, |b| b.is_ascii_digit());
        if exp_end > exp {
            end = exp_end;
        }
    }

    (TokenKind::Number, end)
}

fn skip_while(bytes: &[u8], mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    while pos < bytes.len() && pred(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn next_char_boundary(input: &str, pos: usize) -> usize {
    input[pos..]
        .chars()
        .next()
        .map_or(input.len(), |c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, &str)> {
        tokenize(input).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(
            kinds("(a1 + 2.5) * B22"),
            vec![
                (TokenKind::OpenParen, "("),
                (TokenKind::Variable, "a1"),
                (TokenKind::Operator, "+"),
                (TokenKind::Number, "2.5"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Operator, "*"),
                (TokenKind::Variable, "B22"),
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        for n in ["12", "1.54", ".5", "3.", "1e6", "1E4", "1E-4", "5.42E-4", "2e+3"] {
            assert_eq!(kinds(n), vec![(TokenKind::Number, n)], "{n}");
        }
    }

    #[test]
    fn test_exponent_without_digits_is_not_consumed() {
        assert_eq!(
            kinds("1e"),
            vec![(TokenKind::Number, "1"), (TokenKind::Invalid, "e")]
        );
        assert_eq!(
            kinds("2e+"),
            vec![
                (TokenKind::Number, "2"),
                (TokenKind::Invalid, "e"),
                (TokenKind::Operator, "+"),
            ]
        );
    }

    #[test]
    fn test_invalid_tokens() {
        assert_eq!(kinds("$"), vec![(TokenKind::Invalid, "$")]);
        assert_eq!(kinds("abc"), vec![(TokenKind::Invalid, "abc")]);
        assert_eq!(kinds("."), vec![(TokenKind::Invalid, ".")]);
        assert_eq!(kinds("é"), vec![(TokenKind::Invalid, "é")]);
    }

    #[test]
    fn test_adjacent_tokens_split() {
        assert_eq!(
            kinds("123a5"),
            vec![(TokenKind::Number, "123"), (TokenKind::Variable, "a5")]
        );
        assert_eq!(
            kinds("a1b2"),
            vec![(TokenKind::Variable, "a1"), (TokenKind::Variable, "b2")]
        );
    }

    #[test]
    fn test_unicode_whitespace_is_skipped() {
        assert_eq!(
            kinds("1\u{00A0}+\u{2003}a1"),
            vec![
                (TokenKind::Number, "1"),
                (TokenKind::Operator, "+"),
                (TokenKind::Variable, "a1"),
            ]
        );
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("  \t\n ").is_empty());
    }
}
