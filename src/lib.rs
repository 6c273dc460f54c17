pub mod ast;
pub mod diagnostics;
pub mod driver;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod printer;
pub mod source;
