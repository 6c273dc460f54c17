// Source files and byte-range locations into them

/// Byte range into a `SourceFile`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub start: usize,
    pub end: usize,
}

impl SourceLocation {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One input file, owned
#[derive(Debug, Clone)]
pub struct SourceFile {
    filename: String,
    data: String,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Raw text covered by `location`
    ///
    /// Out-of-range locations yield an empty string rather than panicking.
    pub fn text(&self, location: SourceLocation) -> &str {
        self.data.get(location.start..location.end).unwrap_or("")
    }

    /// Resolve a location to its 1-based line number and the full text of that line
    ///
    /// The returned line never includes the terminating `\n` (or `\r\n`).
    pub fn source_line(&self, location: SourceLocation) -> (usize, &str) {
        let offset = location.start.min(self.data.len());
        let before = &self.data[..offset];

        let line_number = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.data[offset..]
            .find('\n')
            .map_or(self.data.len(), |i| offset + i);

        let line = &self.data[line_start..line_end];
        (line_number, line.strip_suffix('\r').unwrap_or(line))
    }
}
