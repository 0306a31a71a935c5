//! Literal Lexer
//!
//! Tokenizes an override block into tokens for the literal parser.
//! Comments and whitespace are trivia and produce no tokens.

use super::LiteralError;

/// Token types in an override literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// Structural punctuation: `{` `}` `[` `]` `(` `)` `:` `,`
    Character,
    Identifier,
    /// `true`, `false`, `null`, `undefined`
    Keyword,
    String,
    Number,
    /// Expression operators, kept so non-literal value expressions can be
    /// re-sliced from the source text.
    Operator,
}

/// Token representation. `index` and `end` are byte offsets into the input.
#[derive(Debug, Clone)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub str_value: String,
    pub num_value: f64,
}

impl Token {
    fn new(index: usize, end: usize, token_type: TokenType, str_value: String) -> Self {
        Token {
            index,
            end,
            token_type,
            str_value,
            num_value: 0.0,
        }
    }

    pub fn is_character(&self, ch: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(ch)
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }
}

const KEYWORDS: [&str; 4] = ["true", "false", "null", "undefined"];

/// Lexer over one override block.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LiteralError> {
        let mut tokens = Vec::new();
        while let Some(&(index, ch)) = self.chars.get(self.pos) {
            match ch {
                c if c.is_whitespace() => {
                    self.pos += 1;
                }
                '/' if self.peek_char(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_char(1) == Some('*') => self.skip_block_comment()?,
                '{' | '}' | '[' | ']' | '(' | ')' | ':' | ',' => {
                    self.pos += 1;
                    tokens.push(Token::new(
                        index,
                        index + ch.len_utf8(),
                        TokenType::Character,
                        ch.to_string(),
                    ));
                }
                '\'' | '"' | '`' => tokens.push(self.scan_string(index, ch)?),
                c if c.is_ascii_digit() => tokens.push(self.scan_number(index)?),
                c if c.is_alphabetic() || c == '_' || c == '$' => {
                    tokens.push(self.scan_identifier(index))
                }
                '+' | '-' | '*' | '/' | '.' | '?' | '!' | '=' | '<' | '>' | '&' | '|' | '%'
                | '~' | '^' | ';' => {
                    self.pos += 1;
                    tokens.push(Token::new(
                        index,
                        index + ch.len_utf8(),
                        TokenType::Operator,
                        ch.to_string(),
                    ));
                }
                other => {
                    return Err(LiteralError::UnexpectedCharacter {
                        pos: index,
                        ch: other,
                    })
                }
            }
        }
        Ok(tokens)
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|&(_, c)| c)
    }

    fn skip_line_comment(&mut self) {
        while let Some(&(_, c)) = self.chars.get(self.pos) {
            self.pos += 1;
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LiteralError> {
        let start = self.chars[self.pos].0;
        self.pos += 2;
        while self.chars.get(self.pos).is_some() {
            if self.peek_char(0) == Some('*') && self.peek_char(1) == Some('/') {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(LiteralError::UnterminatedString { pos: start })
    }

    fn scan_string(&mut self, start: usize, quote: char) -> Result<Token, LiteralError> {
        self.pos += 1;
        let mut value = String::new();

        while let Some(&(index, ch)) = self.chars.get(self.pos) {
            if ch == quote {
                self.pos += 1;
                return Ok(Token::new(
                    start,
                    index + ch.len_utf8(),
                    TokenType::String,
                    value,
                ));
            }
            if ch == '\\' {
                self.pos += 1;
                let escaped = self
                    .chars
                    .get(self.pos)
                    .map(|&(_, c)| c)
                    .ok_or(LiteralError::UnterminatedString { pos: start })?;
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '0' => value.push('\0'),
                    '\'' | '"' | '`' | '/' => value.push(escaped),
                    'u' => {
                        let code: String = (1..=4)
                            .filter_map(|i| self.peek_char(i))
                            .collect();
                        let scalar = u32::from_str_radix(&code, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .ok_or(LiteralError::InvalidEscape { pos: index })?;
                        if code.len() != 4 {
                            return Err(LiteralError::InvalidEscape { pos: index });
                        }
                        value.push(scalar);
                        self.pos += 4;
                    }
                    _ => return Err(LiteralError::InvalidEscape { pos: index }),
                }
                self.pos += 1;
            } else {
                value.push(ch);
                self.pos += 1;
            }
        }

        Err(LiteralError::UnterminatedString { pos: start })
    }

    fn scan_number(&mut self, start: usize) -> Result<Token, LiteralError> {
        let mut end = start;
        let mut seen_exponent = false;
        while let Some(&(index, ch)) = self.chars.get(self.pos) {
            let part_of_number = ch.is_ascii_digit()
                || ch == '.'
                || ch == 'e'
                || ch == 'E'
                // Exponent sign, only directly after `e`.
                || ((ch == '+' || ch == '-') && seen_exponent && {
                    let prev = self.chars[self.pos - 1].1;
                    prev == 'e' || prev == 'E'
                });
            if !part_of_number {
                break;
            }
            if ch == 'e' || ch == 'E' {
                seen_exponent = true;
            }
            end = index + ch.len_utf8();
            self.pos += 1;
        }

        let text = &self.input[start..end];
        let num_value: f64 = text
            .parse()
            .map_err(|_| LiteralError::InvalidNumber { pos: start })?;

        let mut token = Token::new(start, end, TokenType::Number, text.to_string());
        token.num_value = num_value;
        Ok(token)
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some(&(index, ch)) = self.chars.get(self.pos) {
            if !(ch.is_alphanumeric() || ch == '_' || ch == '$') {
                break;
            }
            end = index + ch.len_utf8();
            self.pos += 1;
        }

        let text = &self.input[start..end];
        let token_type = if KEYWORDS.contains(&text) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(start, end, token_type, text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().expect("lexes")
    }

    #[test]
    fn test_punctuation_and_keywords() {
        let tokens = tokenize("{ a: true, b: null }");
        let kinds: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::Character,
                TokenType::Identifier,
                TokenType::Character,
                TokenType::Keyword,
                TokenType::Character,
                TokenType::Identifier,
                TokenType::Character,
                TokenType::Keyword,
                TokenType::Character,
            ]
        );
    }

    #[test]
    fn test_string_quoting_styles() {
        for input in ["'solid'", "\"solid\"", "`solid`"] {
            let tokens = tokenize(input);
            assert_eq!(tokens.len(), 1);
            assert_eq!(tokens[0].str_value, "solid");
        }
    }

    #[test]
    fn test_string_escapes() {
        let tokens = tokenize(r#"'line\nbreak A'"#);
        assert_eq!(tokens[0].str_value, "line\nbreak A");
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("3 1.5 2e3");
        assert_eq!(tokens[0].num_value, 3.0);
        assert_eq!(tokens[1].num_value, 1.5);
        assert_eq!(tokens[2].num_value, 2000.0);
    }

    #[test]
    fn test_comments_are_trivia() {
        let tokens = tokenize("{ // line\n /* block */ a: 1 }");
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_unterminated_string_errors() {
        assert!(matches!(
            Lexer::new("'open").tokenize(),
            Err(LiteralError::UnterminatedString { pos: 0 })
        ));
    }
}
