use super::error::{Failed, ParseResult};
use crate::ast::{Identifier, Nullability};
use crate::lexer::{Token, TokenClass, TokenKind};

// Token lookahead and consumption
impl<'a> super::Parser<'a> {
    /// Kind of the next unconsumed token
    pub(super) fn peek(&self) -> TokenKind {
        self.tokens.peek_kind(self.current)
    }

    pub(super) fn peek_is(&self, class: TokenClass) -> bool {
        self.peek().is(class)
    }

    /// Take the next token, whatever its kind
    pub(super) fn consume(&mut self) -> Token {
        let token = *self.tokens.get(self.current);
        self.current = (self.current + 1).min(self.tokens.len());
        token
    }

    /// Take the next token, failing if it is not `kind`
    pub(super) fn consume_token(&mut self, kind: TokenKind) -> ParseResult<Token> {
        let token = self.consume();
        if token.kind != kind {
            return Err(self.fail(&token));
        }
        Ok(token)
    }

    /// Take the next token only if it is `kind`
    pub(super) fn maybe_consume_token(&mut self, kind: TokenKind) -> bool {
        if self.peek() == kind {
            self.consume();
            true
        } else {
            false
        }
    }

    /// Trailing `?` marks a type nullable
    pub(super) fn parse_nullability(&mut self) -> Nullability {
        if self.maybe_consume_token(TokenKind::Question) {
            Nullability::Nullable
        } else {
            Nullability::Nonnullable
        }
    }

    pub(super) fn fail(&mut self, token: &Token) -> Failed {
        self.state.fail(self.source, token)
    }

    /// Fail on the lookahead token without consuming it
    pub(super) fn fail_at_current(&mut self) -> Failed {
        let token = *self.tokens.get(self.current);
        self.fail(&token)
    }

    pub(super) fn check_depth(&mut self, depth: usize) -> ParseResult<()> {
        if depth >= self.limits.max_type_depth {
            tracing::debug!(depth, max = self.limits.max_type_depth, "type nesting too deep");
            return Err(self.fail_at_current());
        }
        Ok(())
    }

    pub(super) fn identifier(&self, token: &Token) -> Identifier {
        Identifier {
            name: token.text(self.source).to_string(),
            location: token.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::ErrorReporter;
    use crate::lexer::{TokenKind, lex};
    use crate::limits::CompilerLimits;
    use crate::parser::Parser;
    use crate::source::SourceFile;

    #[test]
    fn test_peek_does_not_advance() {
        let source = SourceFile::new("test.fidl", "library foo;");
        let limits = CompilerLimits::default();
        let tokens = lex(&source, &limits).unwrap();
        let mut reporter = ErrorReporter::new();
        let mut parser = Parser::new(&source, tokens, &mut reporter, &limits);

        assert_eq!(parser.peek(), TokenKind::Library);
        assert_eq!(parser.peek(), TokenKind::Library);
        assert_eq!(parser.consume().kind, TokenKind::Library);
        assert_eq!(parser.peek(), TokenKind::Identifier);
    }

    #[test]
    fn test_maybe_consume_token() {
        let source = SourceFile::new("test.fidl", "? ;");
        let limits = CompilerLimits::default();
        let tokens = lex(&source, &limits).unwrap();
        let mut reporter = ErrorReporter::new();
        let mut parser = Parser::new(&source, tokens, &mut reporter, &limits);

        assert!(!parser.maybe_consume_token(TokenKind::Semicolon));
        assert!(parser.maybe_consume_token(TokenKind::Question));
        assert!(parser.maybe_consume_token(TokenKind::Semicolon));
        assert_eq!(parser.peek(), TokenKind::EndOfFile);
    }

    #[test]
    fn test_consume_token_mismatch_reports_consumed_token() {
        let source = SourceFile::new("test.fidl", "struct");
        let limits = CompilerLimits::default();
        let tokens = lex(&source, &limits).unwrap();
        let mut reporter = ErrorReporter::new();
        {
            let mut parser = Parser::new(&source, tokens, &mut reporter, &limits);
            assert!(parser.consume_token(TokenKind::Library).is_err());
            // Consumption happened regardless of the mismatch
            assert_eq!(parser.peek(), TokenKind::EndOfFile);
            // Consuming past the end keeps returning end of file
            assert_eq!(parser.consume().kind, TokenKind::EndOfFile);
            assert_eq!(parser.consume().kind, TokenKind::EndOfFile);
        }
        assert_eq!(reporter.errors().len(), 1);
        assert!(reporter.errors()[0].starts_with("found unexpected token: struct\n"));
    }
}
