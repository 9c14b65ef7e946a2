//! Source text to token stream.
//!
//! A single scan driven by the character currently under the cursor: digits
//! start a number, letters/`_` start an identifier or keyword, `"` starts a
//! string, and everything else falls through to the punctuation/operator
//! table. Two-character operators (`==`, `!=`, `>=`, `<=`) are tried before
//! their single-character prefixes so that e.g. `==` never lexes as `=`
//! followed by a dangling `=`.

mod error;
mod token;
mod tokens;

pub use error::LexError;
pub use token::{Token, TokenKind};
pub use tokens::Tokens;

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use once_cell::sync::Lazy;

pub type LexResult<T> = Result<T, LexError>;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("let", TokenKind::Let);
    m.insert("fn", TokenKind::Fn);
    m.insert("return", TokenKind::Return);
    m.insert("if", TokenKind::If);
    m.insert("else", TokenKind::Else);
    m.insert("while", TokenKind::While);
    m.insert("use", TokenKind::Use);
    m.insert("true", TokenKind::True);
    m.insert("false", TokenKind::False);
    m
});

/// Lex a complete source file into a token stream terminated by `Eof`.
pub fn lex(source: &str) -> LexResult<Vec<Token>> {
    Lexer::new(source).lex_all()
}

struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            iter: source.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.iter.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let next = self.iter.next();
        match next {
            Some('\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => {}
        }
        next
    }

    fn lex_all(mut self) -> LexResult<Vec<Token>> {
        let mut tokens = vec![];

        loop {
            self.skip_trivia();

            let (line, col) = (self.line, self.col);

            let Some(c) = self.peek() else {
                tokens.push(Token::new(TokenKind::Eof, "", line, col));
                break;
            };

            let token = match c {
                '0'..='9' => self.lex_number(line, col),
                '"' => self.lex_string(line, col)?,
                c if c.is_alphabetic() || c == '_' => self.lex_ident(line, col),
                _ => self.lex_operator(line, col)?,
            };

            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Skip whitespace (which includes newlines, updating `line`/`col`) and
    /// `//`-to-end-of-line comments. Produces no tokens.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut ahead = self.iter.clone();
                    ahead.next();
                    if ahead.peek() == Some(&'/') {
                        while !matches!(self.peek(), Some('\n') | None) {
                            self.bump();
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_number(&mut self, line: usize, col: usize) -> Token {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                value.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if self.peek() == Some('.') {
            let mut ahead = self.iter.clone();
            ahead.next();
            if ahead.peek().is_some_and(|c| c.is_ascii_digit()) {
                value.push('.');
                self.bump();
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        value.push(c);
                        self.bump();
                    } else {
                        break;
                    }
                }
            }
        }

        Token::new(TokenKind::Number, value, line, col)
    }

    /// Strings are delimited by double quotes and may contain
    /// backslash-escaped characters; the escape sequence is carried
    /// verbatim into the token's value (see crate docs: escapes are not
    /// interpreted by this implementation).
    fn lex_string(&mut self, line: usize, col: usize) -> LexResult<Token> {
        self.bump(); // opening quote
        let mut value = String::new();

        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => {
                    value.push('\\');
                    if let Some(escaped) = self.bump() {
                        value.push(escaped);
                    }
                }
                Some(c) => value.push(c),
                None => return Err(LexError::new("unterminated string literal", line, col)),
            }
        }

        Ok(Token::new(TokenKind::String, value, line, col))
    }

    fn lex_ident(&mut self, line: usize, col: usize) -> Token {
        let mut value = String::new();

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                value.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let kind = KEYWORDS.get(value.as_str()).copied().unwrap_or(TokenKind::Id);
        Token::new(kind, value, line, col)
    }

    fn lex_operator(&mut self, line: usize, col: usize) -> LexResult<Token> {
        let c = self.bump().expect("caller already peeked a character");

        let mut two_char = |lexer: &mut Self, second: char, kind: TokenKind| -> Option<Token> {
            if lexer.peek() == Some(second) {
                lexer.bump();
                Some(Token::new(kind, format!("{c}{second}"), line, col))
            } else {
                None
            }
        };

        let token = match c {
            '=' => two_char(self, '=', TokenKind::EqEq).unwrap_or_else(|| Token::new(TokenKind::Assign, "=", line, col)),
            '!' => two_char(self, '=', TokenKind::Neq)
                .ok_or_else(|| LexError::new("expected '=' after '!'", line, col))?,
            '>' => two_char(self, '=', TokenKind::Gte).unwrap_or_else(|| Token::new(TokenKind::Gt, ">", line, col)),
            '<' => two_char(self, '=', TokenKind::Lte).unwrap_or_else(|| Token::new(TokenKind::Lt, "<", line, col)),
            '(' => Token::new(TokenKind::LParen, "(", line, col),
            ')' => Token::new(TokenKind::RParen, ")", line, col),
            '{' => Token::new(TokenKind::LBrace, "{", line, col),
            '}' => Token::new(TokenKind::RBrace, "}", line, col),
            ',' => Token::new(TokenKind::Comma, ",", line, col),
            ';' => Token::new(TokenKind::Semicolon, ";", line, col),
            '+' => Token::new(TokenKind::Plus, "+", line, col),
            '-' => Token::new(TokenKind::Minus, "-", line, col),
            '*' => Token::new(TokenKind::Mul, "*", line, col),
            '/' => Token::new(TokenKind::Div, "/", line, col),
            other => return Err(LexError::new(format!("unexpected character '{other}'"), line, col)),
        };

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_let_binding() {
        use TokenKind::*;
        assert_eq!(kinds("let x = 42;"), vec![Let, Id, Assign, Number, Semicolon, Eof]);
    }

    #[test]
    fn folds_keywords() {
        use TokenKind::*;
        assert_eq!(
            kinds("fn if else while return use true false"),
            vec![Fn, If, Else, While, Return, Use, True, False, Eof]
        );
    }

    #[test]
    fn two_char_operators_win_over_prefix() {
        use TokenKind::*;
        assert_eq!(kinds("== != >= <= > < ="), vec![EqEq, Neq, Gte, Lte, Gt, Lt, Assign, Eof]);
    }

    #[test]
    fn tracks_line_and_col_across_newlines() {
        let tokens = lex("let x\n= 1;").unwrap();
        let assign = &tokens[2];
        assert_eq!(assign.kind, TokenKind::Assign);
        assert_eq!(assign.line, 2);
        assert_eq!(assign.col, 1);
    }

    #[test]
    fn comments_are_skipped() {
        use TokenKind::*;
        assert_eq!(kinds("1 // trailing comment\n+ 2"), vec![Number, Plus, Number, Eof]);
    }

    #[test]
    fn string_escapes_are_carried_verbatim() {
        let tokens = lex(r#""a\"b""#).unwrap();
        assert_eq!(tokens[0].value, r#"a\"b"#);
    }

    #[test]
    fn decimal_numbers() {
        let tokens = lex("3.14").unwrap();
        assert_eq!(tokens[0].value, "3.14");
    }

    #[test]
    fn unmatchable_character_is_an_error() {
        let err = lex("@").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.col, 1);
    }
}
