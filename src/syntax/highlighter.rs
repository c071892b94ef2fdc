//! Text to colored runs
//!
//! The highlighter is a plain value: a palette plus the color used for
//! PlainText. Calling it never mutates anything, so the same input always
//! yields the same runs.

use super::json;
use super::language::HighlightLanguage;
use super::palette::ColorPalette;
use super::sql::SqlLexer;
use super::style::{Color, Run, RunSequence};
use super::tokens::TokenType;

/// Highlighter configured for one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlighter {
    palette: ColorPalette,
    plain_text_color: Color,
}

impl Highlighter {
    /// Create a highlighter; PlainText uses the palette's default color
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            palette,
            plain_text_color: palette.default,
        }
    }

    /// Builder: set the PlainText color
    pub fn with_plain_text_color(mut self, color: Color) -> Self {
        self.plain_text_color = color;
        self
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    fn run(&self, token_type: TokenType, text: impl Into<String>) -> Run {
        let run = Run::new(text, self.palette.color_for(token_type));
        if token_type.is_bold() {
            run.with_bold()
        } else {
            run
        }
    }

    /// Highlight `text` as `language`
    pub fn highlight(&self, text: &str, language: HighlightLanguage) -> RunSequence {
        match language {
            HighlightLanguage::Sql => self.highlight_sql(text),
            HighlightLanguage::Json => self.highlight_json(text),
            HighlightLanguage::PlainText => self.highlight_plain(text),
        }
    }

    fn highlight_sql(&self, text: &str) -> RunSequence {
        SqlLexer::new(text)
            .map(|(token_type, slice)| self.run(token_type, slice))
            .collect::<Vec<_>>()
            .into()
    }

    fn highlight_json(&self, text: &str) -> RunSequence {
        match json::format_json(text) {
            Some(pieces) => pieces
                .into_iter()
                .map(|(token_type, piece)| self.run(token_type, piece))
                .collect::<Vec<_>>()
                .into(),
            None => vec![self.run(TokenType::Default, text)].into(),
        }
    }

    fn highlight_plain(&self, text: &str) -> RunSequence {
        vec![Run::new(text, self.plain_text_color)].into()
    }
}

/// Highlight `text` as `language` with `palette`
pub fn tokenize(text: &str, language: HighlightLanguage, palette: &ColorPalette) -> RunSequence {
    Highlighter::new(*palette).highlight(text, language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::palette::{resolve, Theme};

    fn light() -> ColorPalette {
        resolve(Theme::Light)
    }

    #[test]
    fn test_keyword_single_bold_run() {
        let p = light();
        for input in ["select", "SELECT"] {
            let runs = tokenize(input, HighlightLanguage::Sql, &p);
            assert_eq!(runs.len(), 1);
            let run = &runs.as_slice()[0];
            assert_eq!(run.text, input);
            assert_eq!(run.color, p.keyword);
            assert!(run.is_bold());
        }
    }

    #[test]
    fn test_only_keywords_bold() {
        let runs = tokenize("SELECT 'a' -- c", HighlightLanguage::Sql, &light());
        let bold: Vec<&str> = runs.iter().filter(|r| r.is_bold()).map(|r| r.text.as_str()).collect();
        assert_eq!(bold, vec!["SELECT"]);
    }

    #[test]
    fn test_doubled_quote_single_string_run() {
        let p = light();
        let runs = tokenize("'it''s'", HighlightLanguage::Sql, &p);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs.as_slice()[0].text, "'it''s'");
        assert_eq!(runs.as_slice()[0].color, p.string);
    }

    #[test]
    fn test_unterminated_comment_single_run() {
        let p = light();
        let runs = tokenize("/* never closes", HighlightLanguage::Sql, &p);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs.as_slice()[0].text, "/* never closes");
        assert_eq!(runs.as_slice()[0].color, p.comment);
    }

    #[test]
    fn test_sql_round_trip() {
        let p = resolve(Theme::Dark);
        let inputs = [
            "",
            "SELECT META(d).id, d.* FROM db AS d WHERE d.type = \"hotel\" LIMIT 10",
            "UPDATE t SET x = -3.5 /* open",
            "  \n\t-- just a comment\nselect 'ümlaut''s' ∑ 42_000",
        ];
        for input in inputs {
            assert_eq!(tokenize(input, HighlightLanguage::Sql, &p).text(), input);
        }
    }

    #[test]
    fn test_sql_round_trip_all_short_inputs() {
        // Every string of up to three characters drawn from the characters
        // that start or end a rule
        let alphabet = ['\'', '"', '\\', '-', '/', '*', 'a', '1', '_', '.', ' ', '\n', 'é'];
        let p = light();
        let mut inputs = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..3 {
            frontier = frontier
                .iter()
                .flat_map(|input| alphabet.iter().map(move |ch| format!("{input}{ch}")))
                .collect();
            inputs.extend(frontier.iter().cloned());
        }
        assert_eq!(inputs.len(), 1 + 13 + 13 * 13 + 13 * 13 * 13);

        for input in &inputs {
            let runs = tokenize(input, HighlightLanguage::Sql, &p);
            assert_eq!(runs.text(), *input, "runs of {input:?} do not concatenate back");
            assert!(runs.iter().all(|run| !run.text.is_empty()), "empty run in {input:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let p = light();
        for lang in [HighlightLanguage::Sql, HighlightLanguage::Json, HighlightLanguage::PlainText] {
            let text = r#"{"a": "SELECT 1"}"#;
            assert_eq!(tokenize(text, lang, &p), tokenize(text, lang, &p));
        }
    }

    #[test]
    fn test_json_colors_in_order() {
        let p = light();
        let runs = tokenize(r#"{"a":1,"b":[true,null]}"#, HighlightLanguage::Json, &p);
        let colors: Vec<Color> = runs.iter().map(|r| r.color).collect();
        let d = p.default;
        assert_eq!(
            colors,
            vec![
                d, d, p.property_name, d, p.number, d, d, p.property_name, d, d, d, p.boolean, d, d,
                p.boolean, d, d, d, d, d,
            ]
        );
        assert_eq!(runs.text(), "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}");
        assert!(runs.iter().all(|r| !r.is_bold()));
    }

    #[test]
    fn test_json_parse_failure_fallback() {
        let p = light();
        let runs = tokenize("{not valid", HighlightLanguage::Json, &p);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs.as_slice()[0].text, "{not valid");
        assert_eq!(runs.as_slice()[0].color, p.default);
    }

    #[test]
    fn test_json_empty_input_single_run() {
        let p = resolve(Theme::Dark);
        let runs = tokenize("", HighlightLanguage::Json, &p);
        assert_eq!(runs.as_slice(), &[Run::new("", p.default)]);
        assert!(!runs.as_slice()[0].is_bold());
    }

    #[test]
    fn test_plain_text() {
        let p = light();
        let runs = tokenize("SELECT 1", HighlightLanguage::PlainText, &p);
        assert_eq!(runs.as_slice(), &[Run::new("SELECT 1", p.default)]);

        let runs = Highlighter::new(p)
            .with_plain_text_color(Color::BLACK)
            .highlight("x", HighlightLanguage::PlainText);
        assert_eq!(runs.as_slice(), &[Run::new("x", Color::BLACK)]);
    }
}
