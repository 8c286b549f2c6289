
use std::fmt;
use std::str::Chars;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    LeftParen,
    RightParen,
    /// An atomic word: a run of non-delimiter characters, or a quoted
    /// string literal kept whole, delimiters included.
    Atom(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Atom(word) => write!(f, "{}", word),
        }
    }
}

/// Single-pass scanner. The one piece of state that outlives a character is
/// whether the scan is inside a quoted string, where whitespace and parens
/// lose their delimiter role.
#[derive(Debug)]
pub struct Lexer<'a> {
    chars: Chars<'a>,
    pending: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            chars: input.chars(),
            pending: None,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        // A paren that cut a word short is held back until the next call.
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let mut word = String::new();
        let mut in_string = false;

        while let Some(c) = self.chars.next() {
            if c == '\'' {
                word.push(c);
                if in_string {
                    return Some(Token::Atom(word));
                }
                in_string = true;
            } else if in_string {
                word.push(c);
            } else if c == ' ' || c == '\t' || c == '\n' {
                if !word.is_empty() {
                    return Some(Token::Atom(word));
                }
            } else if c == '(' || c == ')' {
                let paren = if c == '(' {
                    Token::LeftParen
                } else {
                    Token::RightParen
                };
                if word.is_empty() {
                    return Some(paren);
                }
                self.pending = Some(paren);
                return Some(Token::Atom(word));
            } else {
                word.push(c);
            }
        }

        // A string opened but never closed drops its partial word.
        if !in_string && !word.is_empty() {
            Some(Token::Atom(word))
        } else {
            None
        }
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

#[cfg(test)]
fn atom(word: &str) -> Token {
    Token::Atom(word.to_string())
}

#[test]
fn test_tokenize_flat_form() {
    assert_eq!(
        tokenize("(+ 1 2)"),
        vec![Token::LeftParen, atom("+"), atom("1"), atom("2"),
            Token::RightParen]);
}

#[test]
fn test_parens_delimit_without_whitespace() {
    assert_eq!(
        tokenize("(f(g x)y)"),
        vec![Token::LeftParen, atom("f"), Token::LeftParen, atom("g"),
            atom("x"), Token::RightParen, atom("y"), Token::RightParen]);
}

#[test]
fn test_newlines_and_tabs_separate() {
    assert_eq!(
        tokenize("(define\tx\n5)"),
        vec![Token::LeftParen, atom("define"), atom("x"), atom("5"),
            Token::RightParen]);
}

#[test]
fn test_string_is_one_token() {
    assert_eq!(tokenize("'a b'"), vec![atom("'a b'")]);
}

#[test]
fn test_string_swallows_parens() {
    assert_eq!(tokenize("'a(b'"), vec![atom("'a(b'")]);
}

#[test]
fn test_empty_string_token() {
    assert_eq!(
        tokenize("(if '' 'a' 'b')"),
        vec![Token::LeftParen, atom("if"), atom("''"), atom("'a'"),
            atom("'b'"), Token::RightParen]);
}

#[test]
fn test_unterminated_string_is_dropped() {
    assert_eq!(
        tokenize("(print 'oops"),
        vec![Token::LeftParen, atom("print")]);
}

#[test]
fn test_trailing_word_is_emitted() {
    assert_eq!(tokenize("  foo"), vec![atom("foo")]);
}
