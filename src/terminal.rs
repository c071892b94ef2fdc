//! Terminal render layer using crossterm

use std::io::Write;

use crossterm::{
    cursor, queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::surface::{LayoutProps, RenderLayer};
use crate::syntax::{Color, Run, RunSequence};

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Writes colored runs to a terminal (or any writer)
///
/// Each render replaces the current frame. With auto-present on (the
/// default) the frame is written out immediately; otherwise it waits for
/// `present`.
pub struct TerminalRenderer<W: Write> {
    out: W,
    frame: Vec<u8>,
    auto_present: bool,
    /// Column limit, 0 = no wrapping
    wrap_width: usize,
    /// Emit color and bold escape sequences
    ansi: bool,
    /// Clear the screen before each frame
    clear_between_frames: bool,
    layout: LayoutProps,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, wrap_width: usize) -> Self {
        Self {
            out,
            frame: Vec::new(),
            auto_present: true,
            wrap_width,
            ansi: true,
            clear_between_frames: false,
            layout: LayoutProps::default(),
        }
    }

    /// Builder: enable or disable escape sequences
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Builder: clear the screen before each frame
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear_between_frames = clear;
        self
    }

    /// Builder: write frames out only on `present`
    pub fn with_auto_present(mut self, auto_present: bool) -> Self {
        self.auto_present = auto_present;
        self
    }

    /// Write the current frame to the output
    pub fn present(&mut self) -> Result<()> {
        if self.clear_between_frames && self.ansi {
            queue!(self.out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        }
        self.out.write_all(&self.frame)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn margin(&self) -> String {
        " ".repeat(self.layout.padding as usize)
    }

    /// Lay out `text` starting at column `col`, inserting wrap breaks and
    /// the left margin after every line break. Returns the new column.
    fn lay_out(&self, text: &str, mut col: usize, laid_out: &mut String) -> usize {
        let margin = self.margin();
        let limit = self.wrap_width.saturating_sub(margin.len());

        for ch in text.chars() {
            if ch == '\n' {
                laid_out.push('\n');
                laid_out.push_str(&margin);
                col = 0;
                continue;
            }
            let width = UnicodeWidthChar::width(ch).unwrap_or(1);
            if limit > 0 && col > 0 && col + width > limit {
                laid_out.push('\n');
                laid_out.push_str(&margin);
                col = 0;
            }
            laid_out.push(ch);
            col += width;
        }
        col
    }

    fn write_run(&mut self, run: &Run, text: &str) -> Result<()> {
        if !self.ansi {
            queue!(self.frame, Print(text))?;
            return Ok(());
        }
        queue!(self.frame, SetForegroundColor(term_color(run.color)))?;
        if run.is_bold() {
            queue!(self.frame, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.frame, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }

    fn write_placeholder(&mut self, placeholder: &str) -> Result<()> {
        let line = format!("{}{}", self.margin(), placeholder);
        if self.ansi {
            queue!(
                self.frame,
                SetAttribute(Attribute::Dim),
                Print(line),
                SetAttribute(Attribute::NormalIntensity)
            )?;
        } else {
            queue!(self.frame, Print(line))?;
        }
        Ok(())
    }
}

impl<W: Write> RenderLayer for TerminalRenderer<W> {
    fn render(&mut self, runs: &RunSequence) -> Result<()> {
        self.frame.clear();

        let is_empty = runs.iter().all(|run| run.text.is_empty());
        if is_empty {
            if let Some(placeholder) = self.layout.placeholder.clone() {
                self.write_placeholder(&placeholder)?;
            }
        } else {
            let margin = self.margin();
            queue!(self.frame, Print(margin))?;
            let mut col = 0;
            for run in runs {
                let mut laid_out = String::with_capacity(run.text.len());
                col = self.lay_out(&run.text, col, &mut laid_out);
                self.write_run(run, &laid_out)?;
            }
        }

        if self.auto_present {
            self.present()?;
        }
        Ok(())
    }

    /// Font size and family have no terminal equivalent; padding becomes a
    /// left margin and the placeholder is shown for empty text
    fn apply_layout(&mut self, layout: &LayoutProps) {
        self.layout = layout.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{resolve, tokenize, HighlightLanguage, Theme};

    fn plain(wrap: usize) -> TerminalRenderer<Vec<u8>> {
        let mut renderer = TerminalRenderer::new(Vec::new(), wrap).with_ansi(false);
        renderer.apply_layout(&LayoutProps {
            padding: 0,
            ..LayoutProps::default()
        });
        renderer
    }

    fn output(renderer: TerminalRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_output_is_text() {
        let mut renderer = plain(0);
        let runs = tokenize("SELECT a\nFROM b", HighlightLanguage::Sql, &resolve(Theme::Light));
        renderer.render(&runs).unwrap();
        assert_eq!(output(renderer), "SELECT a\nFROM b");
    }

    #[test]
    fn test_wraps_at_width() {
        let mut renderer = plain(4);
        let runs = tokenize("abcdef gh", HighlightLanguage::PlainText, &resolve(Theme::Light));
        renderer.render(&runs).unwrap();
        assert_eq!(output(renderer), "abcd\nef g\nh");
    }

    #[test]
    fn test_wide_chars_count_double() {
        let mut renderer = plain(3);
        let runs = tokenize("日本語", HighlightLanguage::PlainText, &resolve(Theme::Light));
        renderer.render(&runs).unwrap();
        assert_eq!(output(renderer), "日\n本\n語");
    }

    #[test]
    fn test_padding_margin() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 0).with_ansi(false);
        renderer.apply_layout(&LayoutProps {
            padding: 2,
            ..LayoutProps::default()
        });
        let runs = tokenize("a\nb", HighlightLanguage::PlainText, &resolve(Theme::Light));
        renderer.render(&runs).unwrap();
        assert_eq!(output(renderer), "  a\n  b");
    }

    #[test]
    fn test_placeholder_for_empty_text() {
        let mut renderer = plain(0);
        renderer.apply_layout(&LayoutProps {
            padding: 0,
            placeholder: Some("Type a query".to_string()),
            ..LayoutProps::default()
        });
        let runs = tokenize("", HighlightLanguage::PlainText, &resolve(Theme::Light));
        renderer.render(&runs).unwrap();
        assert_eq!(output(renderer), "Type a query");
    }

    #[test]
    fn test_deferred_present_writes_last_frame_only() {
        let mut renderer = plain(0).with_auto_present(false);
        let palette = resolve(Theme::Light);
        renderer.render(&tokenize("first", HighlightLanguage::Sql, &palette)).unwrap();
        renderer.render(&tokenize("second", HighlightLanguage::Sql, &palette)).unwrap();
        assert!(renderer.writer().is_empty());

        renderer.present().unwrap();
        assert_eq!(output(renderer), "second");
    }

    #[test]
    fn test_clear_between_frames() {
        let palette = resolve(Theme::Light);
        let mut renderer = TerminalRenderer::new(Vec::new(), 0).with_clear(true);
        renderer.render(&tokenize("a", HighlightLanguage::Sql, &palette)).unwrap();
        renderer.render(&tokenize("b", HighlightLanguage::Sql, &palette)).unwrap();
        let out = output(renderer);
        assert_eq!(out.matches("\x1b[2J").count(), 2);
        assert!(out.rfind("\x1b[2J") < out.rfind('b'));

        // Piped output never gets escape sequences
        let mut renderer = plain(0).with_clear(true);
        renderer.render(&tokenize("a", HighlightLanguage::Sql, &palette)).unwrap();
        assert_eq!(output(renderer), "a");
    }

    #[test]
    fn test_ansi_colors_and_bold() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 0);
        let runs = tokenize("select", HighlightLanguage::Sql, &resolve(Theme::Dark));
        renderer.render(&runs).unwrap();
        let out = output(renderer);
        assert!(out.contains("38;2;79;193;255"));
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("select"));
    }
}
