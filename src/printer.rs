// Indented tree rendering of a parsed File, two spaces per level

use std::fmt::{self, Write};

use crate::ast::{
    ConstDeclaration, EnumDeclaration, File, InterfaceDeclaration, InterfaceMemberMethod,
    StructDeclaration, UnionDeclaration,
};

struct TreePrinter<'f, 'w> {
    out: &'f mut fmt::Formatter<'w>,
    depth: usize,
}

impl TreePrinter<'_, '_> {
    fn line(&mut self, args: fmt::Arguments) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str("  ")?;
        }
        self.out.write_fmt(args)?;
        self.out.write_char('\n')
    }

    fn nested<F>(&mut self, f: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn file(&mut self, file: &File) -> fmt::Result {
        self.line(format_args!("File {}", file.library_name))?;
        self.nested(|p| {
            for using in &file.using_list {
                match &using.maybe_alias {
                    Some(alias) => p.line(format_args!("Using {} as {}", using.using_path, alias))?,
                    None => p.line(format_args!("Using {}", using.using_path))?,
                }
            }
            for decl in &file.const_declaration_list {
                p.const_declaration(decl)?;
            }
            for decl in &file.enum_declaration_list {
                p.enum_declaration(decl)?;
            }
            for decl in &file.interface_declaration_list {
                p.interface_declaration(decl)?;
            }
            for decl in &file.struct_declaration_list {
                p.struct_declaration(decl)?;
            }
            for decl in &file.union_declaration_list {
                p.union_declaration(decl)?;
            }
            Ok(())
        })
    }

    fn const_declaration(&mut self, decl: &ConstDeclaration) -> fmt::Result {
        self.line(format_args!(
            "Const {} {} = {}",
            decl.ty, decl.identifier, decl.constant
        ))
    }

    fn enum_declaration(&mut self, decl: &EnumDeclaration) -> fmt::Result {
        match &decl.maybe_subtype {
            Some(subtype) => self.line(format_args!(
                "Enum {} : {}",
                decl.identifier,
                subtype.subtype.as_str()
            ))?,
            None => self.line(format_args!("Enum {}", decl.identifier))?,
        }
        self.nested(|p| {
            for member in &decl.members {
                match &member.maybe_value {
                    Some(value) => p.line(format_args!("Member {} = {}", member.identifier, value))?,
                    None => p.line(format_args!("Member {}", member.identifier))?,
                }
            }
            Ok(())
        })
    }

    fn interface_declaration(&mut self, decl: &InterfaceDeclaration) -> fmt::Result {
        if decl.superinterfaces.is_empty() {
            self.line(format_args!("Interface {}", decl.identifier))?;
        } else {
            let supers = decl
                .superinterfaces
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            self.line(format_args!("Interface {} : {}", decl.identifier, supers))?;
        }
        self.nested(|p| {
            for member in &decl.const_members {
                p.const_declaration(member)?;
            }
            for member in &decl.enum_members {
                p.enum_declaration(member)?;
            }
            for method in &decl.method_members {
                p.method(method)?;
            }
            Ok(())
        })
    }

    fn method(&mut self, method: &InterfaceMemberMethod) -> fmt::Result {
        let ordinal = &method.ordinal.value;
        let name = &method.identifier;
        match (&method.maybe_request, &method.maybe_response) {
            (Some(request), Some(response)) => self.line(format_args!(
                "Method {}: {}{} -> {}",
                ordinal, name, request, response
            )),
            (Some(request), None) => {
                self.line(format_args!("Method {}: {}{}", ordinal, name, request))
            }
            (None, Some(response)) => {
                self.line(format_args!("Event {}: {}{}", ordinal, name, response))
            }
            (None, None) => self.line(format_args!("Method {}: {}", ordinal, name)),
        }
    }

    fn struct_declaration(&mut self, decl: &StructDeclaration) -> fmt::Result {
        self.line(format_args!("Struct {}", decl.identifier))?;
        self.nested(|p| {
            for member in &decl.const_members {
                p.const_declaration(member)?;
            }
            for member in &decl.enum_members {
                p.enum_declaration(member)?;
            }
            for member in &decl.members {
                match &member.maybe_default_value {
                    Some(value) => p.line(format_args!(
                        "Member {} {} = {}",
                        member.ty, member.identifier, value
                    ))?,
                    None => p.line(format_args!("Member {} {}", member.ty, member.identifier))?,
                }
            }
            Ok(())
        })
    }

    fn union_declaration(&mut self, decl: &UnionDeclaration) -> fmt::Result {
        self.line(format_args!("Union {}", decl.identifier))?;
        self.nested(|p| {
            for member in &decl.const_members {
                p.const_declaration(member)?;
            }
            for member in &decl.enum_members {
                p.enum_declaration(member)?;
            }
            for member in &decl.members {
                p.line(format_args!("Member {} {}", member.ty, member.identifier))?;
            }
            Ok(())
        })
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        TreePrinter { out: f, depth: 0 }.file(self)
    }
}
