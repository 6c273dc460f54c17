// Syntax tree produced by the parser
//
// Every node exclusively owns its children. Identifiers and literals copy the
// token text out of the source so the tree outlives the token list.

use std::fmt;

use crate::source::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub location: SourceLocation,
}

/// Dotted, namespace-qualified name; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundIdentifier {
    pub components: Vec<Identifier>,
}

impl CompoundIdentifier {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    /// Raw token text, quotes included
    pub value: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericLiteral {
    pub value: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(StringLiteral),
    Numeric(NumericLiteral),
    True,
    False,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Identifier(CompoundIdentifier),
    Literal(Literal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nullability {
    Nullable,
    #[default]
    Nonnullable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveSubtype {
    Bool,
    Status,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl PrimitiveSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveSubtype::Bool => "bool",
            PrimitiveSubtype::Status => "status",
            PrimitiveSubtype::Int8 => "int8",
            PrimitiveSubtype::Int16 => "int16",
            PrimitiveSubtype::Int32 => "int32",
            PrimitiveSubtype::Int64 => "int64",
            PrimitiveSubtype::Uint8 => "uint8",
            PrimitiveSubtype::Uint16 => "uint16",
            PrimitiveSubtype::Uint32 => "uint32",
            PrimitiveSubtype::Uint64 => "uint64",
            PrimitiveSubtype::Float32 => "float32",
            PrimitiveSubtype::Float64 => "float64",
        }
    }
}

/// `Handle` is the generic subtype used when no `<...>` clause is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleSubtype {
    #[default]
    Handle,
    Process,
    Thread,
    Vmo,
    Channel,
    Event,
    Port,
    Interrupt,
    Iomap,
    Pci,
    Log,
    Socket,
    Resource,
    Eventpair,
    Job,
    Vmar,
    Fifo,
    Hypervisor,
    Guest,
    Timer,
}

impl HandleSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            HandleSubtype::Handle => "handle",
            HandleSubtype::Process => "process",
            HandleSubtype::Thread => "thread",
            HandleSubtype::Vmo => "vmo",
            HandleSubtype::Channel => "channel",
            HandleSubtype::Event => "event",
            HandleSubtype::Port => "port",
            HandleSubtype::Interrupt => "interrupt",
            HandleSubtype::Iomap => "iomap",
            HandleSubtype::Pci => "pci",
            HandleSubtype::Log => "log",
            HandleSubtype::Socket => "socket",
            HandleSubtype::Resource => "resource",
            HandleSubtype::Eventpair => "eventpair",
            HandleSubtype::Job => "job",
            HandleSubtype::Vmar => "vmar",
            HandleSubtype::Fifo => "fifo",
            HandleSubtype::Hypervisor => "hypervisor",
            HandleSubtype::Guest => "guest",
            HandleSubtype::Timer => "timer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveType {
    pub subtype: PrimitiveSubtype,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub element_type: Box<Type>,
    pub element_count: Constant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorType {
    pub element_type: Box<Type>,
    pub maybe_element_count: Option<Constant>,
    pub nullability: Nullability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringType {
    pub maybe_element_count: Option<Constant>,
    pub nullability: Nullability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleType {
    pub subtype: HandleSubtype,
    pub nullability: Nullability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestType {
    pub identifier: CompoundIdentifier,
    pub nullability: Nullability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierType {
    pub identifier: CompoundIdentifier,
    pub nullability: Nullability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(PrimitiveType),
    Array(ArrayType),
    Vector(VectorType),
    String(StringType),
    Handle(HandleType),
    Request(RequestType),
    Identifier(IdentifierType),
}

impl Type {
    /// `None` for primitive and array types, which take no `?` suffix
    pub fn nullability(&self) -> Option<Nullability> {
        match self {
            Type::Primitive(_) | Type::Array(_) => None,
            Type::Vector(t) => Some(t.nullability),
            Type::String(t) => Some(t.nullability),
            Type::Handle(t) => Some(t.nullability),
            Type::Request(t) => Some(t.nullability),
            Type::Identifier(t) => Some(t.nullability),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Using {
    pub using_path: CompoundIdentifier,
    pub maybe_alias: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDeclaration {
    pub ty: Type,
    pub identifier: Identifier,
    pub constant: Constant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumMemberValue {
    Identifier(CompoundIdentifier),
    Numeric(NumericLiteral),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub identifier: Identifier,
    pub maybe_value: Option<EnumMemberValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDeclaration {
    pub identifier: Identifier,
    pub maybe_subtype: Option<PrimitiveType>,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: Type,
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterList {
    pub parameters: Vec<Parameter>,
}

/// One interface method
///
/// An `event` declaration fills only `maybe_response`. A two-way method has
/// both lists; a one-way method has only `maybe_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceMemberMethod {
    pub ordinal: NumericLiteral,
    pub identifier: Identifier,
    pub maybe_request: Option<ParameterList>,
    pub maybe_response: Option<ParameterList>,
}

impl InterfaceMemberMethod {
    pub fn is_event(&self) -> bool {
        self.maybe_request.is_none() && self.maybe_response.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDeclaration {
    pub identifier: Identifier,
    pub superinterfaces: Vec<CompoundIdentifier>,
    pub const_members: Vec<ConstDeclaration>,
    pub enum_members: Vec<EnumDeclaration>,
    pub method_members: Vec<InterfaceMemberMethod>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructMember {
    pub ty: Type,
    pub identifier: Identifier,
    pub maybe_default_value: Option<Constant>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDeclaration {
    pub identifier: Identifier,
    pub const_members: Vec<ConstDeclaration>,
    pub enum_members: Vec<EnumDeclaration>,
    pub members: Vec<StructMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionMember {
    pub ty: Type,
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDeclaration {
    pub identifier: Identifier,
    pub const_members: Vec<ConstDeclaration>,
    pub enum_members: Vec<EnumDeclaration>,
    pub members: Vec<UnionMember>,
}

/// Root of one parse
///
/// Declarations are grouped by kind; relative order across kinds is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub library_name: CompoundIdentifier,
    pub using_list: Vec<Using>,
    pub const_declaration_list: Vec<ConstDeclaration>,
    pub enum_declaration_list: Vec<EnumDeclaration>,
    pub interface_declaration_list: Vec<InterfaceDeclaration>,
    pub struct_declaration_list: Vec<StructDeclaration>,
    pub union_declaration_list: Vec<UnionDeclaration>,
}

// Inline (source syntax) rendering

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for CompoundIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::String(s) => f.write_str(&s.value),
            Literal::Numeric(n) => f.write_str(&n.value),
            Literal::True => f.write_str("true"),
            Literal::False => f.write_str("false"),
            Literal::Default => f.write_str("default"),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Constant::Identifier(identifier) => write!(f, "{}", identifier),
            Constant::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

impl fmt::Display for Nullability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Nullability::Nullable => f.write_str("?"),
            Nullability::Nonnullable => Ok(()),
        }
    }
}

fn write_count(f: &mut fmt::Formatter, count: &Option<Constant>) -> fmt::Result {
    match count {
        Some(count) => write!(f, ":{}", count),
        None => Ok(()),
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Primitive(t) => f.write_str(t.subtype.as_str()),
            Type::Array(t) => write!(f, "array<{}>:{}", t.element_type, t.element_count),
            Type::Vector(t) => {
                write!(f, "vector<{}>", t.element_type)?;
                write_count(f, &t.maybe_element_count)?;
                write!(f, "{}", t.nullability)
            }
            Type::String(t) => {
                f.write_str("string")?;
                write_count(f, &t.maybe_element_count)?;
                write!(f, "{}", t.nullability)
            }
            Type::Handle(t) => {
                f.write_str("handle")?;
                if t.subtype != HandleSubtype::Handle {
                    write!(f, "<{}>", t.subtype.as_str())?;
                }
                write!(f, "{}", t.nullability)
            }
            Type::Request(t) => write!(f, "request<{}>{}", t.identifier, t.nullability),
            Type::Identifier(t) => write!(f, "{}{}", t.identifier, t.nullability),
        }
    }
}

impl fmt::Display for EnumMemberValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnumMemberValue::Identifier(identifier) => write!(f, "{}", identifier),
            EnumMemberValue::Numeric(literal) => f.write_str(&literal.value),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.identifier)
    }
}

impl fmt::Display for ParameterList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier {
            name: name.to_string(),
            location: SourceLocation::default(),
        }
    }

    fn compound(names: &[&str]) -> CompoundIdentifier {
        CompoundIdentifier {
            components: names.iter().map(|n| ident(n)).collect(),
        }
    }

    fn numeric(value: &str) -> Constant {
        Constant::Literal(Literal::Numeric(NumericLiteral {
            value: value.to_string(),
            location: SourceLocation::default(),
        }))
    }

    #[test]
    fn test_compound_identifier_display() {
        assert_eq!(compound(&["fuchsia", "io", "File"]).to_string(), "fuchsia.io.File");
        assert_eq!(compound(&["foo"]).to_string(), "foo");
    }

    #[test]
    fn test_nested_type_display() {
        let ty = Type::Vector(VectorType {
            element_type: Box::new(Type::Array(ArrayType {
                element_type: Box::new(Type::Primitive(PrimitiveType {
                    subtype: PrimitiveSubtype::Uint8,
                })),
                element_count: Constant::Identifier(compound(&["MAX"])),
            })),
            maybe_element_count: Some(numeric("10")),
            nullability: Nullability::Nullable,
        });
        assert_eq!(ty.to_string(), "vector<array<uint8>:MAX>:10?");
        assert_eq!(ty.nullability(), Some(Nullability::Nullable));
    }

    #[test]
    fn test_handle_display() {
        let generic = Type::Handle(HandleType {
            subtype: HandleSubtype::default(),
            nullability: Nullability::default(),
        });
        assert_eq!(generic.to_string(), "handle");

        let channel = Type::Handle(HandleType {
            subtype: HandleSubtype::Channel,
            nullability: Nullability::Nullable,
        });
        assert_eq!(channel.to_string(), "handle<channel>?");
    }

    #[test]
    fn test_parameter_list_display() {
        let list = ParameterList {
            parameters: vec![
                Parameter {
                    ty: Type::Primitive(PrimitiveType {
                        subtype: PrimitiveSubtype::Int32,
                    }),
                    identifier: ident("a"),
                },
                Parameter {
                    ty: Type::String(StringType {
                        maybe_element_count: None,
                        nullability: Nullability::Nullable,
                    }),
                    identifier: ident("b"),
                },
            ],
        };
        assert_eq!(list.to_string(), "(int32 a, string? b)");
        assert_eq!(ParameterList::default().to_string(), "()");
    }
}
