//! Tokenizer for the configuration dialect.
use std::fmt;

use crate::errors::SyntaxError;

/// A line/column location in the configuration text. Both start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Identifier(String),
    String(String),
    Integer(i64),
    Bool(bool),
    OpenBracket,
    CloseBracket,
    Equals,
    EndOfInput,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Identifier(id) => write!(f, "identifier `{}`", id),
            Token::String(s) => write!(f, "string {:?}", s),
            Token::Integer(n) => write!(f, "integer {}", n),
            Token::Bool(b) => write!(f, "boolean {}", b),
            Token::OpenBracket => write!(f, "`[`"),
            Token::CloseBracket => write!(f, "`]`"),
            Token::Equals => write!(f, "`=`"),
            Token::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A token together with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub pos: Position,
}

/// Lazily splits configuration text into tokens. Cloning a lexer is cheap and
/// is how [Lexer::peek] avoids disturbing the original.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    /// Byte offset of the next unread character.
    offset: usize,
    pos: Position,
}

/// Characters that end an identifier.
fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '[' | ']' | '"' | '=')
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            pos: Position::default(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    /// Consume characters while `pred` holds and return them as a slice.
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.offset;
        while self.peek_char().map_or(false, &pred) {
            self.bump();
        }
        &self.src[start..self.offset]
    }

    /// Skip whitespace and `#` comments. A comment stops before its newline.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.bump();
                }
                Some('#') => {
                    self.take_while(|c| c != '\n');
                }
                _ => return,
            }
        }
    }

    /// Body of a string literal; the opening quote is already consumed. A
    /// line break (`\n` or `\r\n`) right after the quote is dropped.
    fn string(&mut self, start: Position) -> Result<Token, SyntaxError> {
        if self.src[self.offset..].starts_with("\r\n") {
            self.bump();
        }
        if self.peek_char() == Some('\n') {
            self.bump();
        }
        let body = self.take_while(|c| c != '"');
        match self.bump() {
            Some('"') => Ok(Token::String(body.to_string())),
            _ => Err(SyntaxError::StringNotClosed { pos: start }),
        }
    }

    /// Return the next token. Once the input is exhausted every further call
    /// yields [Token::EndOfInput].
    pub fn next_token(&mut self) -> Result<Lexeme, SyntaxError> {
        self.skip_trivia();
        let pos = self.pos;
        let token = match self.peek_char() {
            None => Token::EndOfInput,
            Some('[') => {
                self.bump();
                Token::OpenBracket
            }
            Some(']') => {
                self.bump();
                Token::CloseBracket
            }
            Some('=') => {
                self.bump();
                Token::Equals
            }
            Some('"') => {
                self.bump();
                self.string(pos)?
            }
            Some(c) if c.is_ascii_digit() => {
                let digits = self.take_while(|c| c.is_ascii_digit());
                let value = digits.parse().map_err(|_| {
                    SyntaxError::IntegerTooLarge {
                        pos,
                        text: digits.to_string(),
                    }
                })?;
                Token::Integer(value)
            }
            Some(_) => {
                let word = self.take_while(|c| !is_delimiter(c));
                if word.eq_ignore_ascii_case("true") {
                    Token::Bool(true)
                } else if word.eq_ignore_ascii_case("false") {
                    Token::Bool(false)
                } else {
                    Token::Identifier(word.to_string())
                }
            }
        };
        tracing::trace!(%pos, ?token, "lexed");
        Ok(Lexeme { token, pos })
    }

    /// Return the token [Lexer::next_token] would produce without consuming it.
    pub fn peek(&self) -> Result<Lexeme, SyntaxError> {
        self.clone().next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(src: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(src);
        let mut out = vec![];
        loop {
            let tok = lexer.next_token().unwrap().token;
            if tok == Token::EndOfInput {
                return out;
            }
            out.push(tok);
        }
    }

    fn ident(s: &str) -> Token {
        Token::Identifier(s.to_string())
    }

    #[test]
    fn assignment_and_header() {
        assert_eq!(
            tokens("path = \"./prog\"\n[case]\nexit_code=12"),
            vec![
                ident("path"),
                Token::Equals,
                Token::String("./prog".to_string()),
                Token::OpenBracket,
                ident("case"),
                Token::CloseBracket,
                ident("exit_code"),
                Token::Equals,
                Token::Integer(12),
            ]
        );
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            tokens("# header\nkey = 1 # trailing\n  # another"),
            vec![ident("key"), Token::Equals, Token::Integer(1)]
        );
    }

    #[test]
    fn booleans_ignore_case() {
        assert_eq!(
            tokens("TRUE False tRuE truest"),
            vec![
                Token::Bool(true),
                Token::Bool(false),
                Token::Bool(true),
                ident("truest"),
            ]
        );
    }

    #[test]
    fn leading_newline_in_string_is_dropped() {
        assert_eq!(
            tokens("out = \"\nline one\nline two\n\""),
            vec![
                ident("out"),
                Token::Equals,
                Token::String("line one\nline two\n".to_string()),
            ]
        );
        assert_eq!(
            tokens("\"\n\nx\""),
            vec![Token::String("\nx".to_string())]
        );
    }

    #[test]
    fn leading_crlf_in_string_is_dropped() {
        assert_eq!(
            tokens("out = \"\r\nline\r\n\"\r\nnext = 1"),
            vec![
                ident("out"),
                Token::Equals,
                Token::String("line\r\n".to_string()),
                ident("next"),
                Token::Equals,
                Token::Integer(1),
            ]
        );
        // Only one line break is dropped.
        assert_eq!(
            tokens("\"\r\n\r\nx\""),
            vec![Token::String("\r\nx".to_string())]
        );
        // A lone carriage return is kept.
        assert_eq!(
            tokens("\"\rx\""),
            vec![Token::String("\rx".to_string())]
        );
    }

    #[test]
    fn identifiers_stop_at_delimiters() {
        assert_eq!(
            tokens("a=b[c]d\"e\""),
            vec![
                ident("a"),
                Token::Equals,
                ident("b"),
                Token::OpenBracket,
                ident("c"),
                Token::CloseBracket,
                ident("d"),
                Token::String("e".to_string()),
            ]
        );
    }

    #[test]
    fn unterminated_string() {
        let mut lexer = Lexer::new("key = \"abc");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert_eq!(
            lexer.next_token(),
            Err(SyntaxError::StringNotClosed {
                pos: Position { line: 1, column: 7 }
            })
        );
    }

    #[test]
    fn oversized_integer_is_rejected() {
        let mut lexer = Lexer::new("99999999999999999999999");
        assert!(matches!(
            lexer.next_token(),
            Err(SyntaxError::IntegerTooLarge { .. })
        ));
    }

    #[test]
    fn positions_follow_multiline_strings() {
        let mut lexer = Lexer::new("a = \"\nx\ny\"\n  b");
        for _ in 0..3 {
            lexer.next_token().unwrap();
        }
        assert_eq!(
            lexer.next_token().unwrap(),
            Lexeme {
                token: ident("b"),
                pos: Position { line: 4, column: 3 },
            }
        );
    }

    #[test]
    fn peek_does_not_advance() {
        let mut lexer = Lexer::new("\n  key = 1");
        let peeked = lexer.peek().unwrap();
        assert_eq!(peeked, lexer.peek().unwrap());
        assert_eq!(peeked, lexer.next_token().unwrap());
        assert_eq!(peeked.pos, Position { line: 2, column: 3 });
        assert_eq!(lexer.peek().unwrap().token, Token::Equals);
    }

    #[test]
    fn end_of_input_repeats() {
        let mut lexer = Lexer::new("  # only a comment");
        assert_eq!(lexer.next_token().unwrap().token, Token::EndOfInput);
        assert_eq!(lexer.next_token().unwrap().token, Token::EndOfInput);
    }
}
