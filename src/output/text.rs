// Text output - human readable run summary

use super::{Output, Source};
use console::Style;
use std::io::{self, Write};
use std::time::Duration;

/// Amount of detail written by `TextOutput`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Only the final total
    Terse,
    /// Per-suite results and every failed assertment
    #[default]
    Verbose,
}

/// Text output over any writer
///
/// Write errors are ignored; the callback interface has nowhere to report them.
pub struct TextOutput<W: Write> {
    mode: TextMode,
    writer: W,
    color: bool,
    suite_errors: usize,
    total_errors: usize,
}

impl TextOutput<io::Stdout> {
    /// Text output on stdout
    pub fn stdout(mode: TextMode) -> Self {
        Self::new(mode, io::stdout())
    }
}

impl<W: Write> TextOutput<W> {
    pub fn new(mode: TextMode, writer: W) -> Self {
        Self {
            mode,
            writer,
            color: false,
            suite_errors: 0,
            total_errors: 0,
        }
    }

    /// Colour the pass rate green or red
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn mode(&self) -> TextMode {
        self.mode
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn verbose(&self) -> bool {
        matches!(self.mode, TextMode::Verbose)
    }

    fn rate(&self, tests: usize, errors: usize) -> String {
        let pct = correct_percent(tests, errors);
        let text = format!("{}% correct", pct);
        if !self.color {
            return text;
        }

        let style = if errors == 0 {
            Style::new().green()
        } else {
            Style::new().red()
        };
        style.force_styling(true).apply_to(text).to_string()
    }

    fn done(&mut self) {
        let _ = self.writer.flush();
    }
}

fn correct_percent(tests: usize, errors: usize) -> usize {
    if tests == 0 {
        100
    } else {
        tests.saturating_sub(errors) * 100 / tests
    }
}

impl<W: Write> Output for TextOutput<W> {
    fn finished(&mut self, tests: usize, time: Duration) {
        let rate = self.rate(tests, self.total_errors);
        let _ = writeln!(self.writer, "Total: {} tests, {}", tests, rate);
        let _ = writeln!(self.writer, "in {:.6} seconds", time.as_secs_f64());
        self.done();
    }

    fn suite_start(&mut self, _tests: usize, _name: &str) {
        self.suite_errors = 0;
    }

    fn suite_end(&mut self, tests: usize, name: &str, time: Duration) {
        if self.verbose() {
            let passed = tests.saturating_sub(self.suite_errors);
            let rate = self.rate(tests, self.suite_errors);
            let _ = writeln!(
                self.writer,
                "{}: {}/{}, {} in {:.6} seconds",
                name,
                passed,
                tests,
                rate,
                time.as_secs_f64()
            );
            self.done();
        }
    }

    fn test_end(&mut self, _name: &str, ok: bool, _time: Duration) {
        if !ok {
            self.suite_errors += 1;
            self.total_errors += 1;
        }
    }

    fn assertment(&mut self, source: &Source) {
        if self.verbose() {
            let _ = writeln!(self.writer, "    Test:    {}", source.test);
            let _ = writeln!(self.writer, "    Suite:   {}", source.suite);
            let _ = writeln!(self.writer, "    File:    {}", source.file);
            let _ = writeln!(self.writer, "    Line:    {}", source.line);
            let _ = writeln!(self.writer, "    Message: {}", source.message);
            let _ = writeln!(self.writer);
            self.done();
        }
    }
}
