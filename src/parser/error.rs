use crate::diagnostics::ErrorReporter;
use crate::lexer::Token;
use crate::source::SourceFile;

/// Marker returned by a production that could not complete
///
/// The diagnostic (if any) has already gone to the reporter by the time this
/// value exists, so callers only propagate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failed;

pub type ParseResult<T> = Result<T, Failed>;

/// Sticky health flag plus the sink diagnostics go to
pub(crate) struct ParseState<'a> {
    ok: bool,
    reporter: &'a mut ErrorReporter,
}

impl<'a> ParseState<'a> {
    pub(crate) fn new(reporter: &'a mut ErrorReporter) -> Self {
        Self { ok: true, reporter }
    }

    pub(crate) fn ok(&self) -> bool {
        self.ok
    }

    /// Report `token` as unexpected, but only for the first failure of a parse
    pub(crate) fn fail(&mut self, source: &SourceFile, token: &Token) -> Failed {
        if self.ok {
            self.reporter
                .report_error(unexpected_token_message(source, token));
            self.ok = false;
        }
        Failed
    }
}

pub(crate) fn unexpected_token_message(source: &SourceFile, token: &Token) -> String {
    let (line_number, line) = source.source_line(token.location);
    format!(
        "found unexpected token: {}\non line #{}:\n\n{}\n",
        token.text(source),
        line_number,
        line
    )
}
