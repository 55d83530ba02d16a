//! This lexer tokenizes SCL.
//!
//! SCL source is nothing but whitespace-delimited keywords, so the
//! lexer is a single pass that accumulates characters into a word
//! buffer and checks the buffer against the keyword alphabet whenever
//! a delimiter (or end of input) bounds it.

use super::error::{CompileError, CompileResult, Position};

/// The closed four-keyword alphabet of SCL.
///
/// `Ski` and `Ba` are name keywords and compose command identifiers;
/// `Bop` and `Dop` are bit keywords and compose 7-bit arguments, with
/// `Dop` the sole spelling that contributes a 1 bit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Keyword {
    Ski,
    Ba,
    Bop,
    Dop,
}

impl Keyword {
    /// Looks the word up in the alphabet. Case-sensitive.
    pub fn from_word(word: &str) -> Option<Keyword> {
        match word {
            "ski" => Some(Keyword::Ski),
            "ba" => Some(Keyword::Ba),
            "bop" => Some(Keyword::Bop),
            "dop" => Some(Keyword::Dop),
            _ => None,
        }
    }

    /// The keyword's source spelling.
    pub fn spelling(&self) -> &'static str {
        match self {
            Keyword::Ski => "ski",
            Keyword::Ba => "ba",
            Keyword::Bop => "bop",
            Keyword::Dop => "dop",
        }
    }

    /// True for keywords that may form part of a command identifier.
    pub fn is_name(&self) -> bool {
        matches!(self, Keyword::Ski | Keyword::Ba)
    }

    /// The bit value contributed by a bit keyword, None for names.
    pub fn bit(&self) -> Option<u8> {
        match self {
            Keyword::Dop => Some(1),
            Keyword::Bop => Some(0),
            _ => None,
        }
    }
}

/// A single recognized keyword occurrence. Positions are 1-based and
/// point at the word's first character.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub keyword: Keyword,
    pub at: Position,
}

impl Token {
    pub fn new(keyword: Keyword, line: usize, column: usize) -> Self {
        Token {
            keyword,
            at: Position::new(line, column),
        }
    }
}

/// Scans the source into a token stream, failing on the first word
/// that is not in the keyword alphabet.
pub fn scan(source: &str) -> CompileResult<Vec<Token>> {
    let mut tokens: Vec<Token> = Vec::new();

    let mut line: usize = 1;
    let mut column: usize = 0;
    let mut word = String::new();
    // Position of the first character of the word being accumulated.
    let mut word_start = Position::new(1, 1);

    for c in source.chars() {
        column += 1;
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                flush_word(&mut word, word_start, &mut tokens)?;
                if c == '\n' {
                    line += 1;
                    column = 0;
                }
            }
            _ => {
                if word.is_empty() {
                    word_start = Position::new(line, column);
                }
                word.push(c);
            }
        }
    }

    // A pending word at end of input is bounded by a virtual trailing
    // delimiter and must still be validated.
    flush_word(&mut word, word_start, &mut tokens)?;

    trace!("scanned {} token(s)", tokens.len());
    Ok(tokens)
}

/// Checks the accumulated word against the alphabet and emits a token
/// for it. Empty words (consecutive delimiters) emit nothing.
fn flush_word(
    word: &mut String,
    start: Position,
    tokens: &mut Vec<Token>,
) -> CompileResult<()> {
    if word.is_empty() {
        return Ok(());
    }

    match Keyword::from_word(word) {
        Some(keyword) => {
            tokens.push(Token { keyword, at: start });
            word.clear();
            Ok(())
        }
        None => Err(CompileError::InvalidKeyword {
            word: std::mem::take(word),
            at: start,
        }),
    }
}
