//! SQL-like query lexer
//!
//! A single left-to-right scan with no backtracking. Each step consumes at
//! least one character and yields exactly one token, so the yielded slices
//! always concatenate back to the input.
//!
//! At each position the rules are tried in a fixed order: whitespace,
//! quoted string, comment, identifier/keyword, number, and finally a single
//! fallback character.

use super::tokens::TokenType;

/// Keywords recognized case-insensitively
pub const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "GROUP", "BY", "HAVING", "ORDER", "LIMIT", "OFFSET", "JOIN",
    "INNER", "LEFT", "RIGHT", "FULL", "OUTER", "ON", "AS", "AND", "OR", "NOT", "IN", "IS", "NULL",
    "ARRAY", "FOR", "WHEN", "THEN", "ELSE", "END", "DISTINCT", "ANY", "EVERY", "SATISFIES", "LIKE",
    "BETWEEN", "CASE", "LET", "USE", "KEYS", "INSERT", "UPDATE", "DELETE", "UNNEST", "META",
    "TRUE", "FALSE", "UNION", "ALL", "EXCEPT", "INTERSECT", "UPSERT", "VALUES", "RETURNING",
    "EXISTS", "PRIMARY", "KEY", "SET",
];

/// Check a word against the keyword set
pub fn is_keyword(word: &str) -> bool {
    SQL_KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(word))
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_number_continue(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || ch == '_'
}

/// Lexer over a query string, yielding `(category, slice)` pairs
pub struct SqlLexer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> SqlLexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    /// Byte offset just past the last char at or after `pos` matching `pred`
    fn scan_while(&self, pos: usize, pred: impl Fn(char) -> bool) -> usize {
        self.text[pos..]
            .char_indices()
            .find(|&(_, ch)| !pred(ch))
            .map_or(self.text.len(), |(offset, _)| pos + offset)
    }

    /// End of a quoted string starting at `start`
    ///
    /// A backslash swallows the next character whatever it is. A doubled
    /// quote is an embedded literal quote. Unterminated strings run to the
    /// end of input.
    fn scan_string(&self, start: usize, quote: char) -> usize {
        let mut pos = start + quote.len_utf8();
        while let Some(ch) = self.char_at(pos) {
            pos += ch.len_utf8();
            if ch == '\\' {
                if let Some(escaped) = self.char_at(pos) {
                    pos += escaped.len_utf8();
                }
            } else if ch == quote {
                if self.char_at(pos) == Some(quote) {
                    pos += quote.len_utf8();
                } else {
                    return pos;
                }
            }
        }
        self.text.len()
    }

    /// End of a `--` comment: stops before the newline
    fn scan_line_comment(&self, start: usize) -> usize {
        self.text[start..]
            .find('\n')
            .map_or(self.text.len(), |offset| start + offset)
    }

    /// End of a `/* */` comment, or end of input if unterminated
    fn scan_block_comment(&self, start: usize) -> usize {
        self.text[start + 2..]
            .find("*/")
            .map_or(self.text.len(), |offset| start + 2 + offset + 2)
    }

    fn scan_number(&self, start: usize, first: char) -> usize {
        self.scan_while(start + first.len_utf8(), is_number_continue)
    }
}

impl<'a> Iterator for SqlLexer<'a> {
    type Item = (TokenType, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        let start = self.pos;
        let ch = self.char_at(start)?;
        let rest = &text[start..];

        let (token_type, end) = if ch.is_whitespace() {
            (TokenType::Default, self.scan_while(start, char::is_whitespace))
        } else if ch == '\'' || ch == '"' {
            (TokenType::String, self.scan_string(start, ch))
        } else if rest.starts_with("--") {
            (TokenType::Comment, self.scan_line_comment(start))
        } else if rest.starts_with("/*") {
            (TokenType::Comment, self.scan_block_comment(start))
        } else if is_ident_start(ch) {
            let end = self.scan_while(start, is_ident_continue);
            let word = &text[start..end];
            if is_keyword(word) {
                (TokenType::Keyword, end)
            } else {
                (TokenType::Default, end)
            }
        } else if ch.is_ascii_digit()
            || (ch == '-' && self.char_at(start + 1).is_some_and(|next| next.is_ascii_digit()))
        {
            (TokenType::Number, self.scan_number(start, ch))
        } else {
            (TokenType::Default, start + ch.len_utf8())
        };

        self.pos = end;
        Some((token_type, &text[start..end]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<(TokenType, &str)> {
        SqlLexer::new(text).collect()
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(lex("select"), vec![(TokenType::Keyword, "select")]);
        assert_eq!(lex("SeLeCt"), vec![(TokenType::Keyword, "SeLeCt")]);
        assert_eq!(lex("selected"), vec![(TokenType::Default, "selected")]);
    }

    #[test]
    fn test_simple_query() {
        let tokens = lex("SELECT name FROM users WHERE age > 21");
        assert_eq!(
            tokens,
            vec![
                (TokenType::Keyword, "SELECT"),
                (TokenType::Default, " "),
                (TokenType::Default, "name"),
                (TokenType::Default, " "),
                (TokenType::Keyword, "FROM"),
                (TokenType::Default, " "),
                (TokenType::Default, "users"),
                (TokenType::Default, " "),
                (TokenType::Keyword, "WHERE"),
                (TokenType::Default, " "),
                (TokenType::Default, "age"),
                (TokenType::Default, " "),
                (TokenType::Default, ">"),
                (TokenType::Default, " "),
                (TokenType::Number, "21"),
            ]
        );
    }

    #[test]
    fn test_doubled_quote() {
        assert_eq!(lex("'it''s'"), vec![(TokenType::String, "'it''s'")]);
        assert_eq!(lex(r#""say ""hi""""#), vec![(TokenType::String, r#""say ""hi""""#)]);
    }

    #[test]
    fn test_backslash_escape() {
        assert_eq!(lex(r"'a\'b' x"), vec![
            (TokenType::String, r"'a\'b'"),
            (TokenType::Default, " "),
            (TokenType::Default, "x"),
        ]);
        // Escaped backslash does not escape the closing quote
        assert_eq!(lex(r"'a\\' x")[0], (TokenType::String, r"'a\\'"));
    }

    #[test]
    fn test_other_quote_inside_string() {
        assert_eq!(lex(r#"'say "hi"'"#), vec![(TokenType::String, r#"'say "hi"'"#)]);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(lex("'open ended"), vec![(TokenType::String, "'open ended")]);
        assert_eq!(lex(r"'trailing\"), vec![(TokenType::String, r"'trailing\")]);
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(lex("a -- note\nb"), vec![
            (TokenType::Default, "a"),
            (TokenType::Default, " "),
            (TokenType::Comment, "-- note"),
            (TokenType::Default, "\n"),
            (TokenType::Default, "b"),
        ]);
        assert_eq!(lex("-- to the end"), vec![(TokenType::Comment, "-- to the end")]);
    }

    #[test]
    fn test_block_comment() {
        assert_eq!(lex("/* a\nb */x"), vec![
            (TokenType::Comment, "/* a\nb */"),
            (TokenType::Default, "x"),
        ]);
        assert_eq!(lex("/* never closes"), vec![(TokenType::Comment, "/* never closes")]);
        assert_eq!(lex("/*/"), vec![(TokenType::Comment, "/*/")]);
    }

    #[test]
    fn test_numbers_permissive() {
        assert_eq!(lex("1.2.3"), vec![(TokenType::Number, "1.2.3")]);
        assert_eq!(lex("1_000"), vec![(TokenType::Number, "1_000")]);
        assert_eq!(lex("-5"), vec![(TokenType::Number, "-5")]);
        assert_eq!(lex("- 5")[0], (TokenType::Default, "-"));
    }

    #[test]
    fn test_minus_before_digit_is_signed_number() {
        assert_eq!(lex("a-5"), vec![
            (TokenType::Default, "a"),
            (TokenType::Number, "-5"),
        ]);
    }

    #[test]
    fn test_identifier_with_digits() {
        assert_eq!(lex("t1_x"), vec![(TokenType::Default, "t1_x")]);
        assert_eq!(lex("_key"), vec![(TokenType::Default, "_key")]);
    }

    #[test]
    fn test_non_ascii_fallback() {
        assert_eq!(lex("é1"), vec![
            (TokenType::Default, "é"),
            (TokenType::Number, "1"),
        ]);
    }

    #[test]
    fn test_lossless() {
        let inputs = [
            "",
            "SELECT * FROM `db` WHERE a = 'x''y' -- c\n/* b",
            "ANY v IN arr SATISFIES v.x > -1.5 END",
            "\t\r\n  weird ü ∑ chars 'unterminated",
            "\"a\\\"",
        ];
        for input in inputs {
            let joined: String = SqlLexer::new(input).map(|(_, s)| s).collect();
            assert_eq!(joined, input);
        }
    }
}
