use super::error::ParseResult;
use super::Parser;
use crate::ast::{CompoundIdentifier, Constant, Identifier, Literal, NumericLiteral, StringLiteral};
use crate::lexer::{TokenClass, TokenKind};

// Names, literals and constant expressions
impl<'a> Parser<'a> {
    pub(super) fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.consume_token(TokenKind::Identifier)?;
        Ok(self.identifier(&token))
    }

    /// Parse a dotted name: a.b.c
    pub(super) fn parse_compound_identifier(&mut self) -> ParseResult<CompoundIdentifier> {
        let mut components = vec![self.parse_identifier()?];

        while self.maybe_consume_token(TokenKind::Dot) {
            components.push(self.parse_identifier()?);
        }

        Ok(CompoundIdentifier { components })
    }

    fn parse_string_literal(&mut self) -> ParseResult<StringLiteral> {
        let token = self.consume_token(TokenKind::StringLiteral)?;
        Ok(StringLiteral {
            value: token.text(self.source).to_string(),
            location: token.location,
        })
    }

    pub(super) fn parse_numeric_literal(&mut self) -> ParseResult<NumericLiteral> {
        let token = self.consume_token(TokenKind::NumericLiteral)?;
        Ok(NumericLiteral {
            value: token.text(self.source).to_string(),
            location: token.location,
        })
    }

    pub(super) fn parse_literal(&mut self) -> ParseResult<Literal> {
        match self.peek() {
            TokenKind::StringLiteral => Ok(Literal::String(self.parse_string_literal()?)),
            TokenKind::NumericLiteral => Ok(Literal::Numeric(self.parse_numeric_literal()?)),
            TokenKind::True => {
                self.consume_token(TokenKind::True)?;
                Ok(Literal::True)
            }
            TokenKind::False => {
                self.consume_token(TokenKind::False)?;
                Ok(Literal::False)
            }
            TokenKind::Default => {
                self.consume_token(TokenKind::Default)?;
                Ok(Literal::Default)
            }
            _ => Err(self.fail_at_current()),
        }
    }

    /// Parse a constant: a named reference or a literal
    pub(super) fn parse_constant(&mut self) -> ParseResult<Constant> {
        match self.peek() {
            TokenKind::Identifier => Ok(Constant::Identifier(self.parse_compound_identifier()?)),
            kind if kind.is(TokenClass::LITERAL) => Ok(Constant::Literal(self.parse_literal()?)),
            _ => Err(self.fail_at_current()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::ast::{Constant, Literal};

    fn const_value(source: &str) -> Constant {
        let ast = to_ast(source).unwrap();
        ast.const_declaration_list[0].constant.clone()
    }

    #[test]
    fn test_library_name_components_keep_order() {
        let ast = to_ast("library fuchsia.hardware.display;").unwrap();
        let names: Vec<&str> = ast.library_name.names().collect();
        assert_eq!(names, ["fuchsia", "hardware", "display"]);
    }

    #[test]
    fn test_string_literal_constant() {
        match const_value(r#"library foo; const string NAME = "hi";"#) {
            Constant::Literal(Literal::String(s)) => assert_eq!(s.value, r#""hi""#),
            other => panic!("unexpected constant: {:?}", other),
        }
    }

    #[test]
    fn test_numeric_literal_constant() {
        match const_value("library foo; const uint32 MAX = 0x10;") {
            Constant::Literal(Literal::Numeric(n)) => assert_eq!(n.value, "0x10"),
            other => panic!("unexpected constant: {:?}", other),
        }
    }

    #[test]
    fn test_keyword_literal_constants() {
        assert_eq!(
            const_value("library foo; const bool B = true;"),
            Constant::Literal(Literal::True)
        );
        assert_eq!(
            const_value("library foo; const bool B = false;"),
            Constant::Literal(Literal::False)
        );
        assert_eq!(
            const_value("library foo; const bool B = default;"),
            Constant::Literal(Literal::Default)
        );
    }

    #[test]
    fn test_identifier_constant() {
        match const_value("library foo; const uint32 A = other.lib.B;") {
            Constant::Identifier(id) => assert_eq!(id.to_string(), "other.lib.B"),
            other => panic!("unexpected constant: {:?}", other),
        }
    }

    #[test]
    fn test_error_constant_missing() {
        assert_eq!(unexpected_token("library foo; const uint32 A = ;"), ";");
    }

    #[test]
    fn test_error_trailing_dot_in_compound_identifier() {
        assert_eq!(unexpected_token("library foo.;"), ";");
    }

    #[test]
    fn test_error_keyword_in_compound_identifier() {
        assert_eq!(unexpected_token("library foo.struct;"), "struct");
    }
}
