/// Controls whether a [`WriterSink`](crate::WriterSink) terminates each output with a newline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Append a newline after each output.
    #[default]
    WithNewline,
    /// Write each output exactly as formatted.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether the mode appends a trailing newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert!(LineMode::WithNewline.append_newline());
    /// assert!(!LineMode::WithoutNewline.append_newline());
    /// ```
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }

    /// Renders `output` into a single buffer ready for one `write_all` call.
    pub(crate) fn render(self, output: &logging::Output) -> String {
        let mut line = output.to_string();
        if self.append_newline() {
            line.push('\n');
        }
        line
    }
}

impl From<bool> for LineMode {
    /// `true` selects [`LineMode::WithNewline`].
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert_eq!(LineMode::from(false), LineMode::WithoutNewline);
    /// ```
    fn from(append_newline: bool) -> Self {
        if append_newline {
            Self::WithNewline
        } else {
            Self::WithoutNewline
        }
    }
}

impl From<LineMode> for bool {
    fn from(mode: LineMode) -> Self {
        mode.append_newline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::Output;

    #[test]
    fn default_appends_newline() {
        assert_eq!(LineMode::default(), LineMode::WithNewline);
    }

    #[test]
    fn bool_round_trip() {
        for mode in [LineMode::WithNewline, LineMode::WithoutNewline] {
            assert_eq!(LineMode::from(bool::from(mode)), mode);
        }
    }

    #[test]
    fn render_honours_mode() {
        let output = Output::from("ready");
        assert_eq!(LineMode::WithNewline.render(&output), "ready\n");
        assert_eq!(LineMode::WithoutNewline.render(&output), "ready");
    }
}
