//! Literal Parser
//!
//! Recursive descent over the lexer's tokens, producing `serde_json::Value`.
//! Object key order is preserved.

use super::lexer::{Token, TokenType};
use super::LiteralError;
use serde_json::{Map, Number, Value};

pub struct ParseLiteral<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a> ParseLiteral<'a> {
    pub fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        ParseLiteral {
            input,
            tokens,
            index: 0,
        }
    }

    pub fn parse(mut self) -> Result<Value, LiteralError> {
        let value = self.parse_value()?;
        if let Some(token) = self.peek() {
            return Err(LiteralError::TrailingInput { pos: token.index });
        }
        Ok(value)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.index);
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn expect_character(&mut self, ch: char) -> Result<(), LiteralError> {
        match self.next() {
            Some(token) if token.is_character(ch) => Ok(()),
            Some(token) => Err(LiteralError::UnexpectedToken {
                pos: token.index,
                found: token.str_value.clone(),
            }),
            None => Err(LiteralError::UnexpectedEof),
        }
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        let token = self.peek().ok_or(LiteralError::UnexpectedEof)?.clone();

        match token.token_type {
            TokenType::Character if token.is_character('{') => self.parse_object(),
            TokenType::Character if token.is_character('[') => self.parse_array(),
            TokenType::String => {
                // A string directly followed by an operator is part of a
                // larger expression (e.g. 'px-' + size); fall back to the
                // raw span.
                if self.continues_as_expression(1) {
                    return self.parse_raw_expression();
                }
                self.index += 1;
                Ok(Value::String(token.str_value))
            }
            TokenType::Number => {
                if self.continues_as_expression(1) {
                    return self.parse_raw_expression();
                }
                self.index += 1;
                Ok(Self::number_value(token.num_value))
            }
            TokenType::Keyword => {
                if self.continues_as_expression(1) {
                    return self.parse_raw_expression();
                }
                self.index += 1;
                Ok(match token.str_value.as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    // `undefined` has no JSON spelling.
                    _ => Value::Null,
                })
            }
            // Negative number, unless it keeps going as an expression.
            TokenType::Operator if token.str_value == "-" => {
                let number = self
                    .tokens
                    .get(self.index + 1)
                    .filter(|t| t.token_type == TokenType::Number)
                    .cloned();
                match number {
                    Some(number) if !self.continues_as_expression(2) => {
                        self.index += 2;
                        Ok(Self::number_value(-number.num_value))
                    }
                    _ => self.parse_raw_expression(),
                }
            }
            // Identifier references, calls, member access and other computed
            // expressions are captured as data, never executed.
            _ => self.parse_raw_expression(),
        }
    }

    fn number_value(value: f64) -> Value {
        if value.fract() == 0.0 && value.is_finite() && value.abs() < i64::MAX as f64 {
            Value::Number(Number::from(value as i64))
        } else {
            Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
        }
    }

    /// Does the token at `offset` from the current position extend the
    /// current value into a larger expression?
    fn continues_as_expression(&self, offset: usize) -> bool {
        match self.tokens.get(self.index + offset) {
            Some(next) => {
                next.token_type == TokenType::Operator
                    || next.is_character('(')
                    || next.is_character('[')
            }
            None => false,
        }
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        self.expect_character('{')?;
        let mut map = Map::new();

        loop {
            let token = self.peek().ok_or(LiteralError::UnexpectedEof)?.clone();
            if token.is_character('}') {
                self.index += 1;
                return Ok(Value::Object(map));
            }

            let key = match token.token_type {
                TokenType::Identifier | TokenType::String | TokenType::Keyword => {
                    self.index += 1;
                    token.str_value.clone()
                }
                TokenType::Number => {
                    self.index += 1;
                    token.str_value.clone()
                }
                _ => {
                    return Err(LiteralError::UnexpectedToken {
                        pos: token.index,
                        found: token.str_value.clone(),
                    })
                }
            };

            self.expect_character(':')?;
            let value = self.parse_value()?;
            map.insert(key, value);

            let token = self.peek().ok_or(LiteralError::UnexpectedEof)?;
            if token.is_character(',') {
                self.index += 1;
            } else if !token.is_character('}') {
                return Err(LiteralError::UnexpectedToken {
                    pos: token.index,
                    found: token.str_value.clone(),
                });
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        self.expect_character('[')?;
        let mut items = Vec::new();

        loop {
            let token = self.peek().ok_or(LiteralError::UnexpectedEof)?;
            if token.is_character(']') {
                self.index += 1;
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value()?);

            let token = self.peek().ok_or(LiteralError::UnexpectedEof)?;
            if token.is_character(',') {
                self.index += 1;
            } else if !token.is_character(']') {
                return Err(LiteralError::UnexpectedToken {
                    pos: token.index,
                    found: token.str_value.clone(),
                });
            }
        }
    }

    /// Capture a balanced expression span verbatim as a string value.
    ///
    /// The span runs until a `,`, `}` or `]` at the expression's own nesting
    /// depth; that terminator is left for the caller.
    fn parse_raw_expression(&mut self) -> Result<Value, LiteralError> {
        let start_token = self.peek().ok_or(LiteralError::UnexpectedEof)?;
        let start = start_token.index;
        let mut end = start_token.end;
        let mut depth = 0usize;
        let mut consumed = 0usize;

        while let Some(token) = self.peek() {
            if token.token_type == TokenType::Character {
                match token.str_value.chars().next() {
                    Some('(') | Some('[') | Some('{') => depth += 1,
                    Some(')') | Some(']') | Some('}') if depth == 0 => break,
                    Some(')') | Some(']') | Some('}') => depth -= 1,
                    Some(',') if depth == 0 => break,
                    _ => {}
                }
            }
            end = token.end;
            self.index += 1;
            consumed += 1;
        }

        if consumed == 0 {
            let token = self.peek().ok_or(LiteralError::UnexpectedEof)?;
            return Err(LiteralError::UnexpectedToken {
                pos: token.index,
                found: token.str_value.clone(),
            });
        }
        if depth > 0 {
            return Err(LiteralError::UnexpectedEof);
        }

        Ok(Value::String(self.input[start..end].trim().to_string()))
    }
}
