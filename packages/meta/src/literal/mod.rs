//! Safe Literal Evaluation
//!
//! Evaluates an extracted devtools override block into a
//! [`serde_json::Value`]. The accepted grammar is the JavaScript object
//! literal as a superset of JSON: unquoted keys, single/backtick quotes,
//! trailing commas, comments, `undefined`. Evaluation is data construction
//! only; value positions holding a non-literal expression (an identifier
//! reference, member access, call) are captured as their raw source text
//! instead of being executed.

mod lexer;
mod parser;

pub use lexer::{Lexer, Token, TokenType};

use serde_json::Value;
use thiserror::Error;

/// A malformed override literal. Positions are byte offsets into the
/// extracted block.
#[derive(Debug, Clone, Error)]
pub enum LiteralError {
    #[error("unexpected character '{ch}' at offset {pos}")]
    UnexpectedCharacter { pos: usize, ch: char },
    #[error("unterminated string starting at offset {pos}")]
    UnterminatedString { pos: usize },
    #[error("invalid escape sequence at offset {pos}")]
    InvalidEscape { pos: usize },
    #[error("invalid number at offset {pos}")]
    InvalidNumber { pos: usize },
    #[error("unexpected token '{found}' at offset {pos}")]
    UnexpectedToken { pos: usize, found: String },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected trailing input at offset {pos}")]
    TrailingInput { pos: usize },
}

/// Evaluate the raw text of an override block into a structured value.
pub fn evaluate(raw: &str) -> Result<Value, LiteralError> {
    let tokens = Lexer::new(raw).tokenize()?;
    parser::ParseLiteral::new(raw, tokens).parse()
}
