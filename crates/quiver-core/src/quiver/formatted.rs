//! Colour-annotated text for the quiver status line

use std::fmt;

use crate::data::colors::{CLR_DARK_GRAY, CLR_LIGHT_GRAY};

/// Runs of text, each with one colour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedString {
    runs: Vec<(u8, String)>,
    colour: u8,
}

impl Default for FormattedString {
    fn default() -> Self {
        Self {
            runs: Vec::new(),
            colour: CLR_LIGHT_GRAY,
        }
    }
}

impl FormattedString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single run of text in one colour
    pub fn coloured(colour: u8, text: &str) -> Self {
        let mut s = Self::new();
        s.textcolour(colour);
        s.push_str(text);
        s
    }

    /// Greyed-out placeholder text
    pub fn dimmed(text: &str) -> Self {
        Self::coloured(CLR_DARK_GRAY, text)
    }

    /// Colour used for text pushed from now on
    pub fn textcolour(&mut self, colour: u8) {
        self.colour = colour;
    }

    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some((colour, run)) if *colour == self.colour => run.push_str(text),
            _ => self.runs.push((self.colour, text.to_string())),
        }
    }

    pub fn runs(&self) -> &[(u8, String)] {
        &self.runs
    }

    /// The text without colours
    pub fn plain(&self) -> String {
        self.runs.iter().map(|(_, text)| text.as_str()).collect()
    }

    /// Colour of the last run, if any text was written
    pub fn last_colour(&self) -> Option<u8> {
        self.runs.last().map(|(colour, _)| *colour)
    }
}

impl fmt::Write for FormattedString {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Display for FormattedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}
