mod lexer;
mod parser;
mod statement;
mod token;

pub use lexer::{Lexer, NO_DELIMITER};
pub use parser::StatementParser;
pub use statement::{ObjectType, Statement, StatementType};
pub use token::{Token, TokenKind};
