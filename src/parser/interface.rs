use super::error::ParseResult;
use super::Parser;
use crate::ast::{InterfaceDeclaration, InterfaceMemberMethod, Parameter, ParameterList};
use crate::lexer::{TokenClass, TokenKind};

// Interfaces and their methods
impl<'a> Parser<'a> {
    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let ty = self.parse_type(0)?;
        let identifier = self.parse_identifier()?;
        Ok(Parameter { ty, identifier })
    }

    /// Parse a possibly empty, comma separated parameter list
    fn parse_parameter_list(&mut self) -> ParseResult<ParameterList> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenClass::TYPE) {
            parameters.push(self.parse_parameter()?);
            while self.maybe_consume_token(TokenKind::Comma) {
                parameters.push(self.parse_parameter()?);
            }
        }

        Ok(ParameterList { parameters })
    }

    /// Parse `( parameter-list )`
    fn parse_parenthesized_parameters(&mut self) -> ParseResult<ParameterList> {
        self.consume_token(TokenKind::LeftParen)?;
        let parameters = self.parse_parameter_list()?;
        self.consume_token(TokenKind::RightParen)?;
        Ok(parameters)
    }

    /// Parse `N: event Name(...)` or `N: Name(...) [-> (...)]`
    fn parse_interface_member_method(&mut self) -> ParseResult<InterfaceMemberMethod> {
        let ordinal = self.parse_numeric_literal()?;
        self.consume_token(TokenKind::Colon)?;

        // Events carry their parameters in the response slot
        if self.maybe_consume_token(TokenKind::Event) {
            let identifier = self.parse_identifier()?;
            let response = self.parse_parenthesized_parameters()?;
            return Ok(InterfaceMemberMethod {
                ordinal,
                identifier,
                maybe_request: None,
                maybe_response: Some(response),
            });
        }

        let identifier = self.parse_identifier()?;
        let request = self.parse_parenthesized_parameters()?;

        let maybe_response = if self.maybe_consume_token(TokenKind::Arrow) {
            Some(self.parse_parenthesized_parameters()?)
        } else {
            None
        };

        Ok(InterfaceMemberMethod {
            ordinal,
            identifier,
            maybe_request: Some(request),
            maybe_response,
        })
    }

    /// Parse `interface Name [: Super, ...] { (const | enum | method) ; ... }`
    pub(super) fn parse_interface_declaration(&mut self) -> ParseResult<InterfaceDeclaration> {
        self.consume_token(TokenKind::Interface)?;
        let identifier = self.parse_identifier()?;

        let mut superinterfaces = Vec::new();
        if self.maybe_consume_token(TokenKind::Colon) {
            loop {
                superinterfaces.push(self.parse_compound_identifier()?);
                if !self.maybe_consume_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume_token(TokenKind::LeftCurly)?;

        let mut const_members = Vec::new();
        let mut enum_members = Vec::new();
        let mut method_members = Vec::new();

        loop {
            match self.peek() {
                TokenKind::Const => const_members.push(self.parse_const_declaration()?),
                TokenKind::Enum => enum_members.push(self.parse_enum_declaration()?),
                TokenKind::NumericLiteral => {
                    let method = self.parse_interface_member_method()?;
                    tracing::trace!(
                        ordinal = %method.ordinal.value,
                        name = %method.identifier,
                        "interface method"
                    );
                    method_members.push(method);
                }
                _ => break,
            }
            self.consume_token(TokenKind::Semicolon)?;
        }

        self.consume_token(TokenKind::RightCurly)?;

        Ok(InterfaceDeclaration {
            identifier,
            superinterfaces,
            const_members,
            enum_members,
            method_members,
        })
    }
}
