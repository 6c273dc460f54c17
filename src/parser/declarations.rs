use super::error::ParseResult;
use super::Parser;
use crate::ast::{
    ConstDeclaration, EnumDeclaration, EnumMember, EnumMemberValue, StructDeclaration,
    StructMember, UnionDeclaration, UnionMember, Using,
};
use crate::lexer::{TokenClass, TokenKind};

// Using, const, enum, struct and union declarations
impl<'a> Parser<'a> {
    /// Parse `using a.b [as c]`
    pub(super) fn parse_using(&mut self) -> ParseResult<Using> {
        self.consume_token(TokenKind::Using)?;
        let using_path = self.parse_compound_identifier()?;

        let maybe_alias = if self.maybe_consume_token(TokenKind::As) {
            Some(self.parse_identifier()?)
        } else {
            None
        };

        Ok(Using {
            using_path,
            maybe_alias,
        })
    }

    /// Parse `const Type NAME = constant`
    pub(super) fn parse_const_declaration(&mut self) -> ParseResult<ConstDeclaration> {
        self.consume_token(TokenKind::Const)?;
        let ty = self.parse_type(0)?;
        let identifier = self.parse_identifier()?;
        self.consume_token(TokenKind::Equal)?;
        let constant = self.parse_constant()?;

        tracing::trace!(name = %identifier, "const declaration");
        Ok(ConstDeclaration {
            ty,
            identifier,
            constant,
        })
    }

    fn parse_enum_member(&mut self) -> ParseResult<EnumMember> {
        let identifier = self.parse_identifier()?;

        let maybe_value = if self.maybe_consume_token(TokenKind::Equal) {
            let value = match self.peek() {
                TokenKind::Identifier => {
                    EnumMemberValue::Identifier(self.parse_compound_identifier()?)
                }
                TokenKind::NumericLiteral => {
                    EnumMemberValue::Numeric(self.parse_numeric_literal()?)
                }
                _ => return Err(self.fail_at_current()),
            };
            Some(value)
        } else {
            None
        };

        Ok(EnumMember {
            identifier,
            maybe_value,
        })
    }

    /// Parse `enum Name [: primitive] { MEMBER [= value]; ... }`
    pub(super) fn parse_enum_declaration(&mut self) -> ParseResult<EnumDeclaration> {
        self.consume_token(TokenKind::Enum)?;
        let identifier = self.parse_identifier()?;

        let maybe_subtype = if self.maybe_consume_token(TokenKind::Colon) {
            Some(self.parse_primitive_type()?)
        } else {
            None
        };

        self.consume_token(TokenKind::LeftCurly)?;

        let mut members = Vec::new();
        while self.peek() == TokenKind::Identifier {
            members.push(self.parse_enum_member()?);
            self.consume_token(TokenKind::Semicolon)?;
        }

        self.consume_token(TokenKind::RightCurly)?;

        tracing::trace!(name = %identifier, members = members.len(), "enum declaration");
        Ok(EnumDeclaration {
            identifier,
            maybe_subtype,
            members,
        })
    }

    fn parse_struct_member(&mut self) -> ParseResult<StructMember> {
        let ty = self.parse_type(0)?;
        let identifier = self.parse_identifier()?;

        let maybe_default_value = if self.maybe_consume_token(TokenKind::Equal) {
            Some(self.parse_constant()?)
        } else {
            None
        };

        Ok(StructMember {
            ty,
            identifier,
            maybe_default_value,
        })
    }

    /// Parse `struct Name { (const | enum | member) ; ... }`
    pub(super) fn parse_struct_declaration(&mut self) -> ParseResult<StructDeclaration> {
        self.consume_token(TokenKind::Struct)?;
        let identifier = self.parse_identifier()?;
        self.consume_token(TokenKind::LeftCurly)?;

        let mut const_members = Vec::new();
        let mut enum_members = Vec::new();
        let mut members = Vec::new();

        loop {
            match self.peek() {
                TokenKind::Const => const_members.push(self.parse_const_declaration()?),
                TokenKind::Enum => enum_members.push(self.parse_enum_declaration()?),
                kind if kind.is(TokenClass::TYPE) => members.push(self.parse_struct_member()?),
                _ => break,
            }
            self.consume_token(TokenKind::Semicolon)?;
        }

        self.consume_token(TokenKind::RightCurly)?;

        tracing::trace!(name = %identifier, members = members.len(), "struct declaration");
        Ok(StructDeclaration {
            identifier,
            const_members,
            enum_members,
            members,
        })
    }

    fn parse_union_member(&mut self) -> ParseResult<UnionMember> {
        let ty = self.parse_type(0)?;
        let identifier = self.parse_identifier()?;
        Ok(UnionMember { ty, identifier })
    }

    /// Parse `union Name { (const | enum | member) ; ... }`
    pub(super) fn parse_union_declaration(&mut self) -> ParseResult<UnionDeclaration> {
        self.consume_token(TokenKind::Union)?;
        let identifier = self.parse_identifier()?;
        self.consume_token(TokenKind::LeftCurly)?;

        let mut const_members = Vec::new();
        let mut enum_members = Vec::new();
        let mut members = Vec::new();

        loop {
            match self.peek() {
                TokenKind::Const => const_members.push(self.parse_const_declaration()?),
                TokenKind::Enum => enum_members.push(self.parse_enum_declaration()?),
                kind if kind.is(TokenClass::TYPE) => members.push(self.parse_union_member()?),
                _ => break,
            }
            self.consume_token(TokenKind::Semicolon)?;
        }

        self.consume_token(TokenKind::RightCurly)?;

        tracing::trace!(name = %identifier, members = members.len(), "union declaration");
        Ok(UnionDeclaration {
            identifier,
            const_members,
            enum_members,
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::ast::{EnumMemberValue, PrimitiveSubtype};

    #[test]
    fn test_struct_single_member() {
        let ast = to_ast_string("library foo; struct S { int32 x; };").unwrap();
        let expected = "\
File foo
  Struct S
    Member int32 x
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_struct_member_has_no_default() {
        let ast = to_ast("library foo; struct S { int32 x; };").unwrap();
        let member = &ast.struct_declaration_list[0].members[0];
        assert_eq!(member.identifier.name, "x");
        assert!(member.maybe_default_value.is_none());
    }

    #[test]
    fn test_struct_with_defaults_consts_and_enums() {
        let ast = to_ast_string(
            r#"
            library foo;
            struct Config {
                const uint32 MAX = 16;
                string:MAX name = "none";
                enum Mode { ON; OFF; };
                bool enabled = true;
                vector<Config>? children;
            };
        "#,
        )
        .unwrap();
        let expected = "\
File foo
  Struct Config
    Const uint32 MAX = 16
    Enum Mode
      Member ON
      Member OFF
    Member string:MAX name = \"none\"
    Member bool enabled = true
    Member vector<Config>? children
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_empty_struct() {
        let ast = to_ast("library foo; struct Empty {};").unwrap();
        let decl = &ast.struct_declaration_list[0];
        assert!(decl.members.is_empty());
        assert!(decl.const_members.is_empty());
        assert!(decl.enum_members.is_empty());
    }

    #[test]
    fn test_enum_with_subtype_and_values() {
        let ast = to_ast("library foo; enum E : uint8 { A = 1; B; };").unwrap();
        let decl = &ast.enum_declaration_list[0];
        assert_eq!(decl.identifier.name, "E");
        assert_eq!(decl.maybe_subtype.unwrap().subtype, PrimitiveSubtype::Uint8);
        assert_eq!(decl.members.len(), 2);
        assert_eq!(decl.members[0].identifier.name, "A");
        match &decl.members[0].maybe_value {
            Some(EnumMemberValue::Numeric(n)) => assert_eq!(n.value, "1"),
            other => panic!("unexpected value: {:?}", other),
        }
        assert_eq!(decl.members[1].identifier.name, "B");
        assert!(decl.members[1].maybe_value.is_none());
    }

    #[test]
    fn test_enum_member_referencing_constant() {
        let ast = to_ast_string("library foo; enum E { A = other.VALUE; B = -1; };").unwrap();
        let expected = "\
File foo
  Enum E
    Member A = other.VALUE
    Member B = -1
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_enum_duplicates_are_kept() {
        let ast = to_ast("library foo; enum E { A; A; };").unwrap();
        assert_eq!(ast.enum_declaration_list[0].members.len(), 2);
    }

    #[test]
    fn test_union() {
        let ast = to_ast_string(
            "library foo; union U { int32 i; const bool C = false; handle<vmo>? h; };",
        )
        .unwrap();
        let expected = "\
File foo
  Union U
    Const bool C = false
    Member int32 i
    Member handle<vmo>? h
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_using_with_alias() {
        let ast = to_ast_string("library foo; using fuchsia.io; using bar.baz as bb;").unwrap();
        let expected = "\
File foo
  Using fuchsia.io
  Using bar.baz as bb
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_error_struct_missing_name() {
        assert_eq!(unexpected_token("library foo; struct { int32 x; };"), "{");
    }

    #[test]
    fn test_error_struct_member_missing_semicolon() {
        assert_eq!(unexpected_token("library foo; struct S { int32 x };"), "}");
    }

    #[test]
    fn test_error_union_member_default_not_allowed() {
        assert_eq!(unexpected_token("library foo; union U { int32 x = 1; };"), "=");
    }

    #[test]
    fn test_error_unknown_member_kind_in_body() {
        assert_eq!(unexpected_token("library foo; struct S { interface; };"), "interface");
    }

    #[test]
    fn test_error_enum_subtype_must_be_primitive() {
        assert_eq!(unexpected_token("library foo; enum E : string { A; };"), "string");
    }

    #[test]
    fn test_error_enum_value_must_be_identifier_or_number() {
        assert_eq!(unexpected_token(r#"library foo; enum E { A = "x"; };"#), r#""x""#);
    }

    #[test]
    fn test_error_const_missing_equal() {
        assert_eq!(unexpected_token("library foo; const int32 X 4;"), "4");
    }

    #[test]
    fn test_error_using_alias_missing() {
        assert_eq!(unexpected_token("library foo; using bar as;"), ";");
    }
}
