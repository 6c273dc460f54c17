use super::error::ParseResult;
use super::Parser;
use crate::ast::{
    ArrayType, Constant, HandleSubtype, HandleType, IdentifierType, PrimitiveSubtype,
    PrimitiveType, RequestType, StringType, Type, VectorType,
};
use crate::lexer::{TokenClass, TokenKind};

fn primitive_subtype(kind: TokenKind) -> Option<PrimitiveSubtype> {
    let subtype = match kind {
        TokenKind::Bool => PrimitiveSubtype::Bool,
        TokenKind::Status => PrimitiveSubtype::Status,
        TokenKind::Int8 => PrimitiveSubtype::Int8,
        TokenKind::Int16 => PrimitiveSubtype::Int16,
        TokenKind::Int32 => PrimitiveSubtype::Int32,
        TokenKind::Int64 => PrimitiveSubtype::Int64,
        TokenKind::Uint8 => PrimitiveSubtype::Uint8,
        TokenKind::Uint16 => PrimitiveSubtype::Uint16,
        TokenKind::Uint32 => PrimitiveSubtype::Uint32,
        TokenKind::Uint64 => PrimitiveSubtype::Uint64,
        TokenKind::Float32 => PrimitiveSubtype::Float32,
        TokenKind::Float64 => PrimitiveSubtype::Float64,
        _ => return None,
    };
    Some(subtype)
}

// The generic `handle` subtype is implied by a missing `<...>` and has no keyword here
fn handle_subtype(kind: TokenKind) -> Option<HandleSubtype> {
    let subtype = match kind {
        TokenKind::Process => HandleSubtype::Process,
        TokenKind::Thread => HandleSubtype::Thread,
        TokenKind::Vmo => HandleSubtype::Vmo,
        TokenKind::Channel => HandleSubtype::Channel,
        TokenKind::Event => HandleSubtype::Event,
        TokenKind::Port => HandleSubtype::Port,
        TokenKind::Interrupt => HandleSubtype::Interrupt,
        TokenKind::Iomap => HandleSubtype::Iomap,
        TokenKind::Pci => HandleSubtype::Pci,
        TokenKind::Log => HandleSubtype::Log,
        TokenKind::Socket => HandleSubtype::Socket,
        TokenKind::Resource => HandleSubtype::Resource,
        TokenKind::Eventpair => HandleSubtype::Eventpair,
        TokenKind::Job => HandleSubtype::Job,
        TokenKind::Vmar => HandleSubtype::Vmar,
        TokenKind::Fifo => HandleSubtype::Fifo,
        TokenKind::Hypervisor => HandleSubtype::Hypervisor,
        TokenKind::Guest => HandleSubtype::Guest,
        TokenKind::Timer => HandleSubtype::Timer,
        _ => return None,
    };
    Some(subtype)
}

// Type grammar
impl<'a> Parser<'a> {
    /// Parse any type; `depth` counts enclosing element types
    pub(super) fn parse_type(&mut self, depth: usize) -> ParseResult<Type> {
        self.check_depth(depth)?;

        match self.peek() {
            TokenKind::Identifier => {
                let identifier = self.parse_compound_identifier()?;
                let nullability = self.parse_nullability();
                Ok(Type::Identifier(IdentifierType {
                    identifier,
                    nullability,
                }))
            }
            TokenKind::Array => Ok(Type::Array(self.parse_array_type(depth)?)),
            TokenKind::Vector => Ok(Type::Vector(self.parse_vector_type(depth)?)),
            TokenKind::String => Ok(Type::String(self.parse_string_type()?)),
            TokenKind::Handle => Ok(Type::Handle(self.parse_handle_type()?)),
            TokenKind::Request => Ok(Type::Request(self.parse_request_type()?)),
            kind if kind.is(TokenClass::PRIMITIVE_TYPE) => {
                Ok(Type::Primitive(self.parse_primitive_type()?))
            }
            _ => Err(self.fail_at_current()),
        }
    }

    pub(super) fn parse_primitive_type(&mut self) -> ParseResult<PrimitiveType> {
        let Some(subtype) = primitive_subtype(self.peek()) else {
            return Err(self.fail_at_current());
        };
        self.consume();
        Ok(PrimitiveType { subtype })
    }

    /// Parse `array<T>:N`; the count is mandatory
    fn parse_array_type(&mut self, depth: usize) -> ParseResult<ArrayType> {
        self.consume_token(TokenKind::Array)?;
        self.consume_token(TokenKind::LeftAngle)?;
        let element_type = self.parse_type(depth + 1)?;
        self.consume_token(TokenKind::RightAngle)?;
        self.consume_token(TokenKind::Colon)?;
        let element_count = self.parse_constant()?;

        Ok(ArrayType {
            element_type: Box::new(element_type),
            element_count,
        })
    }

    /// Parse `vector<T>[:N][?]`
    fn parse_vector_type(&mut self, depth: usize) -> ParseResult<VectorType> {
        self.consume_token(TokenKind::Vector)?;
        self.consume_token(TokenKind::LeftAngle)?;
        let element_type = self.parse_type(depth + 1)?;
        self.consume_token(TokenKind::RightAngle)?;
        let maybe_element_count = self.parse_maybe_element_count()?;
        let nullability = self.parse_nullability();

        Ok(VectorType {
            element_type: Box::new(element_type),
            maybe_element_count,
            nullability,
        })
    }

    /// Parse `string[:N][?]`
    fn parse_string_type(&mut self) -> ParseResult<StringType> {
        self.consume_token(TokenKind::String)?;
        let maybe_element_count = self.parse_maybe_element_count()?;
        let nullability = self.parse_nullability();

        Ok(StringType {
            maybe_element_count,
            nullability,
        })
    }

    /// Parse `handle[<subtype>][?]`
    fn parse_handle_type(&mut self) -> ParseResult<HandleType> {
        self.consume_token(TokenKind::Handle)?;

        let mut subtype = HandleSubtype::Handle;
        if self.maybe_consume_token(TokenKind::LeftAngle) {
            subtype = match handle_subtype(self.peek()) {
                Some(subtype) => subtype,
                None => return Err(self.fail_at_current()),
            };
            self.consume();
            self.consume_token(TokenKind::RightAngle)?;
        }

        let nullability = self.parse_nullability();
        Ok(HandleType {
            subtype,
            nullability,
        })
    }

    /// Parse `request<Protocol>[?]`
    fn parse_request_type(&mut self) -> ParseResult<RequestType> {
        self.consume_token(TokenKind::Request)?;
        self.consume_token(TokenKind::LeftAngle)?;
        let identifier = self.parse_compound_identifier()?;
        self.consume_token(TokenKind::RightAngle)?;
        let nullability = self.parse_nullability();

        Ok(RequestType {
            identifier,
            nullability,
        })
    }

    fn parse_maybe_element_count(&mut self) -> ParseResult<Option<Constant>> {
        if self.maybe_consume_token(TokenKind::Colon) {
            Ok(Some(self.parse_constant()?))
        } else {
            Ok(None)
        }
    }
}
