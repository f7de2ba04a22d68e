/// How a [`LineSink`](crate::LineSink) ends each rendered record.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Every record, trace included, ends with `'\n'`.
    #[default]
    WithNewline,
    /// Records are written as-is; the caller frames them.
    WithoutNewline,
}

impl LineMode {
    /// Returns the character appended after each record, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::LineMode;
    ///
    /// assert_eq!(LineMode::WithNewline.terminator(), Some('\n'));
    /// assert_eq!(LineMode::WithoutNewline.terminator(), None);
    /// ```
    #[must_use]
    pub const fn terminator(self) -> Option<char> {
        match self {
            Self::WithNewline => Some('\n'),
            Self::WithoutNewline => None,
        }
    }
}
