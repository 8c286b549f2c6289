mod lexer;

pub use self::lexer::{tokenize, Lexer, Token};

use crate::error::Error;
use crate::value::Value;

/// Read a program: exactly one top-level parenthesized form.
pub fn read(input: &str) -> Result<Value, Error> {
    Reader::new(input).read_program()
}

pub struct Reader<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Reader {
            lexer: Lexer::new(input),
        }
    }

    pub fn read_program(&mut self) -> Result<Value, Error> {
        match self.lexer.next() {
            Some(Token::LeftParen) => Ok(Value::list(self.read_form()?)),
            Some(token) => Err(Error::UnexpectedToken(token.to_string())),
            None => Err(Error::UnexpectedEndOfInput),
        }
    }

    /// Collect the nodes of the form whose `(` was already consumed. The
    /// matching `)` ends the form; so does running out of tokens, in which
    /// case whatever was collected stands.
    fn read_form(&mut self) -> Result<Vec<Value>, Error> {
        let mut nodes = Vec::new();

        loop {
            match self.lexer.next() {
                Some(Token::LeftParen) => {
                    nodes.push(Value::list(self.read_form()?));
                }
                Some(Token::RightParen) | None => return Ok(nodes),
                Some(Token::Atom(word)) => nodes.push(classify(&word)),
            }
        }
    }
}

// Classification order matters: a word that parses as an integer is an
// integer even though it also parses as a float.
fn classify(word: &str) -> Value {
    if let Ok(n) = word.parse::<i64>() {
        Value::int(n)
    } else if let Ok(x) = word.parse::<f64>() {
        Value::float(x)
    } else if word.len() >= 2 && word.starts_with('\'') && word.ends_with('\'')
    {
        Value::string(&word[1..word.len() - 1])
    } else {
        Value::symbol(word)
    }
}
