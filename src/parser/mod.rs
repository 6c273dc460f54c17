// Recursive-descent parser for .fidl files
//
// Every production decides its course from a single token of lookahead and
// never backtracks. A failing production reports through ParseState (once per
// parse) and returns Failed, which `?` carries back to parse_file.
mod constants;
mod declarations;
mod error;
mod helpers;
mod interface;
mod library;
mod types;

pub use error::{Failed, ParseResult};

use crate::ast::File;
use crate::diagnostics::ErrorReporter;
use crate::lexer::Tokens;
use crate::limits::CompilerLimits;
use crate::source::SourceFile;
use error::ParseState;

pub struct Parser<'a> {
    source: &'a SourceFile,
    tokens: Tokens,
    current: usize,
    state: ParseState<'a>,
    limits: &'a CompilerLimits,
}

impl<'a> Parser<'a> {
    /// A parser is single use: construct a fresh one for every file
    pub fn new(
        source: &'a SourceFile,
        tokens: Tokens,
        reporter: &'a mut ErrorReporter,
        limits: &'a CompilerLimits,
    ) -> Self {
        Self {
            source,
            tokens,
            current: 0,
            state: ParseState::new(reporter),
            limits,
        }
    }

    /// Parse the whole token stream into a `File`
    ///
    /// Returns `None` on failure; exactly one diagnostic has then been reported.
    pub fn parse_file(mut self) -> Option<File> {
        let _span = tracing::debug_span!("parse_file", file = self.source.filename()).entered();

        match self.parse_file_inner() {
            Ok(file) => {
                tracing::debug!(library = %file.library_name, "parsed");
                Some(file)
            }
            Err(Failed) => {
                debug_assert!(!self.state.ok());
                None
            }
        }
    }
}

// Public API function
pub fn parse(
    source: &SourceFile,
    tokens: Tokens,
    reporter: &mut ErrorReporter,
    limits: &CompilerLimits,
) -> Option<File> {
    Parser::new(source, tokens, reporter, limits).parse_file()
}
