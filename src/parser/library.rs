use super::error::ParseResult;
use super::Parser;
use crate::ast::File;
use crate::lexer::TokenKind;

// File structure: library header, using list, top-level declarations
impl<'a> Parser<'a> {
    pub(super) fn parse_file_inner(&mut self) -> ParseResult<File> {
        self.consume_token(TokenKind::Library)?;
        let library_name = self.parse_compound_identifier()?;
        self.consume_token(TokenKind::Semicolon)?;

        let mut using_list = Vec::new();
        while self.peek() == TokenKind::Using {
            using_list.push(self.parse_using()?);
            self.consume_token(TokenKind::Semicolon)?;
        }

        let mut const_declaration_list = Vec::new();
        let mut enum_declaration_list = Vec::new();
        let mut interface_declaration_list = Vec::new();
        let mut struct_declaration_list = Vec::new();
        let mut union_declaration_list = Vec::new();

        loop {
            match self.peek() {
                TokenKind::Const => {
                    let decl = self.parse_const_declaration()?;
                    tracing::debug!(name = %decl.identifier, "parsed const");
                    const_declaration_list.push(decl);
                }
                TokenKind::Enum => {
                    let decl = self.parse_enum_declaration()?;
                    tracing::debug!(name = %decl.identifier, "parsed enum");
                    enum_declaration_list.push(decl);
                }
                TokenKind::Interface => {
                    let decl = self.parse_interface_declaration()?;
                    tracing::debug!(
                        name = %decl.identifier,
                        methods = decl.method_members.len(),
                        "parsed interface"
                    );
                    interface_declaration_list.push(decl);
                }
                TokenKind::Struct => {
                    let decl = self.parse_struct_declaration()?;
                    tracing::debug!(name = %decl.identifier, "parsed struct");
                    struct_declaration_list.push(decl);
                }
                TokenKind::Union => {
                    let decl = self.parse_union_declaration()?;
                    tracing::debug!(name = %decl.identifier, "parsed union");
                    union_declaration_list.push(decl);
                }
                _ => break,
            }
            self.consume_token(TokenKind::Semicolon)?;
        }

        self.consume_token(TokenKind::EndOfFile)?;

        Ok(File {
            library_name,
            using_list,
            const_declaration_list,
            enum_declaration_list,
            interface_declaration_list,
            struct_declaration_list,
            union_declaration_list,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;

    #[test]
    fn test_library_only() {
        let ast = to_ast("library foo;").unwrap();
        assert_eq!(ast.library_name.to_string(), "foo");
        assert!(ast.using_list.is_empty());
        assert!(ast.const_declaration_list.is_empty());
        assert!(ast.enum_declaration_list.is_empty());
        assert!(ast.interface_declaration_list.is_empty());
        assert!(ast.struct_declaration_list.is_empty());
        assert!(ast.union_declaration_list.is_empty());
    }

    #[test]
    fn test_const_string_declaration() {
        let ast = to_ast(r#"library foo; const string NAME = "hi";"#).unwrap();
        assert_eq!(ast.const_declaration_list.len(), 1);
        let decl = &ast.const_declaration_list[0];
        assert_eq!(decl.identifier.name, "NAME");
        assert_eq!(decl.ty.to_string(), "string");
        assert_eq!(decl.constant.to_string(), r#""hi""#);
    }

    #[test]
    fn test_declarations_grouped_by_kind() {
        let ast = to_ast_string(
            r#"
            library example.grouping;
            using base;
            union U2 { int8 a; };
            struct S1 { bool b; };
            const int32 C1 = 1;
            interface I1 {};
            enum E1 { A; };
            struct S2 {};
            const int32 C2 = C1;
        "#,
        )
        .unwrap();
        let expected = "\
File example.grouping
  Using base
  Const int32 C1 = 1
  Const int32 C2 = C1
  Enum E1
    Member A
  Interface I1
  Struct S1
    Member bool b
  Struct S2
  Union U2
    Member int8 a
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "library foo; struct S { vector<int32>:10? x; }; interface I { 1: M(); };";
        assert_eq!(to_ast(source).unwrap(), to_ast(source).unwrap());
    }

    #[test]
    fn test_error_missing_library() {
        assert_eq!(unexpected_token("struct S {};"), "struct");
    }

    #[test]
    fn test_error_using_after_declaration() {
        assert_eq!(unexpected_token("library foo; struct S {}; using bar;"), "using");
    }

    #[test]
    fn test_error_missing_declaration_semicolon() {
        assert_eq!(unexpected_token("library foo; struct S {} struct T {};"), "struct");
    }

    #[test]
    fn test_error_at_end_of_file() {
        // End of file has empty text
        let error = to_error("library foo; struct S {");
        assert!(error.starts_with("found unexpected token: \non line #1:"));
    }

    #[test]
    fn test_diagnostic_names_line_and_source() {
        let error = to_error("library foo;\n\nstruct {\n    int32 x;\n};\n");
        assert_eq!(error, "found unexpected token: {\non line #3:\n\nstruct {\n");
    }

    #[test]
    fn test_only_first_error_is_reported() {
        // Several later problems, one diagnostic for the first
        let errors = to_ast("library foo; struct 1 { int32 ; }; union {};").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("found unexpected token: 1\n"));
    }
}
