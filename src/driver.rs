// Lex + parse pipeline shared by the CLI and integration tests

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::ast::File;
use crate::diagnostics::ErrorReporter;
use crate::lexer::{self, LexError, Tokens};
use crate::limits::CompilerLimits;
use crate::parser;
use crate::source::SourceFile;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("{}", .diagnostics.concat())]
    Parse { diagnostics: Vec<String> },
}

pub fn read_source<P: AsRef<Path>>(path: P) -> Result<SourceFile, CompileError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|e| CompileError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(SourceFile::new(path.display().to_string(), data))
}

pub fn tokenize(source: &SourceFile, limits: &CompilerLimits) -> Result<Tokens, CompileError> {
    Ok(lexer::lex(source, limits)?)
}

/// Lex and parse one source file
pub fn compile_source(source: &SourceFile, limits: &CompilerLimits) -> Result<File, CompileError> {
    let tokens = tokenize(source, limits)?;

    let mut reporter = ErrorReporter::new();
    match parser::parse(source, tokens, &mut reporter, limits) {
        Some(file) => Ok(file),
        None => Err(CompileError::Parse {
            diagnostics: reporter.into_errors(),
        }),
    }
}

pub fn compile_file<P: AsRef<Path>>(path: P, limits: &CompilerLimits) -> Result<File, CompileError> {
    let source = read_source(path)?;
    compile_source(&source, limits)
}
