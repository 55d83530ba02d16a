//! The Parser module takes the token stream from the lexer and groups
//! it into command invocations, resolving each against the command
//! table as soon as it is complete.
//!
//! A command identifier is a run of consecutive name tokens; each
//! argument is a run of exactly seven bit tokens decoded MSB-first
//! into a 7-bit integer. An invocation is flushed when the next
//! command begins or the input ends. Resolution happens at the flush
//! point rather than in a separate pass so that a bad identifier is
//! reported before any grouping error in the tokens that follow it.

use std::collections::VecDeque;

use super::command::CommandTable;
use super::error::{CompileError, CompileResult, Position};
use super::lexer::Token;

/// Number of bit tokens in one argument group.
const GROUP_LEN: usize = 7;

pub struct Parser<'t> {
    tokens: VecDeque<Token>,
    table: &'t CommandTable,
    fragments: Vec<String>,

    // State for the command currently being accumulated.
    pending_parts: Vec<&'static str>,
    pending_start: Option<Position>,
    completed_args: Vec<u8>,
    current_group: Vec<Token>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: Vec<Token>, table: &'t CommandTable) -> Self {
        Parser {
            tokens: VecDeque::from(tokens),
            table,
            fragments: Vec::new(),
            pending_parts: Vec::new(),
            pending_start: None,
            completed_args: Vec::new(),
            current_group: Vec::new(),
        }
    }

    /// Run the parser, consuming itself and returning the assembly
    /// fragments in emission order.
    pub fn run(mut self) -> CompileResult<Vec<String>> {
        while let Some(token) = self.consume() {
            if token.keyword.is_name() {
                self.name_token(token)?;
            } else {
                self.bit_token(token)?;
            }
        }

        // End of input bounds the trailing argument group and the
        // pending command the same way a fresh command token would.
        self.check_group_complete()?;
        self.flush()?;

        debug!("grouped {} invocation(s)", self.fragments.len());
        Ok(self.fragments)
    }

    /// A name token begins a new command or extends the pending
    /// identifier.
    fn name_token(&mut self, token: Token) -> CompileResult<()> {
        // A previous command with at least one finished argument is
        // closed off by the arrival of this one.
        if !self.completed_args.is_empty() {
            self.flush()?;
        }

        self.check_group_complete()?;

        if self.pending_start.is_none() {
            self.pending_start = Some(token.at);
        }
        self.pending_parts.push(token.keyword.spelling());
        Ok(())
    }

    /// A bit token extends the current argument group, completing an
    /// argument on the seventh.
    fn bit_token(&mut self, token: Token) -> CompileResult<()> {
        if self.pending_parts.is_empty() {
            return Err(CompileError::ExtraArguments { at: token.at });
        }

        self.current_group.push(token);
        if self.current_group.len() == GROUP_LEN {
            self.completed_args.push(decode_group(&self.current_group));
            self.current_group.clear();
        }
        Ok(())
    }

    /// Rejects a partially accumulated argument group. Full groups are
    /// drained as soon as they complete, so anything still buffered
    /// here is incomplete.
    fn check_group_complete(&self) -> CompileResult<()> {
        match self.current_group.first() {
            Some(first) => Err(CompileError::InvalidArgument { at: first.at }),
            None => Ok(()),
        }
    }

    /// Resolves the pending invocation against the command table and
    /// appends its fragment. No-op if no command is pending.
    fn flush(&mut self) -> CompileResult<()> {
        let start = match self.pending_start.take() {
            Some(at) => at,
            None => return Ok(()),
        };

        let name = self.pending_parts.join(" ");
        let fragment = self.table.resolve(&name, start, &self.completed_args)?;
        self.fragments.push(fragment);

        self.pending_parts.clear();
        self.completed_args.clear();
        Ok(())
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }
}

/// Decodes a complete 7-token group into its integer value, most
/// significant bit first.
fn decode_group(group: &[Token]) -> u8 {
    let mut value: u8 = 0;
    for (i, token) in group.iter().enumerate() {
        if token.keyword.bit() == Some(1) {
            value |= 1 << (GROUP_LEN - 1 - i);
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::super::lexer;
    use super::*;

    /// Renders a value as its 7 bit-keywords, MSB first.
    fn encode(value: u8) -> String {
        (0..GROUP_LEN)
            .map(|i| {
                if value & (1 << (GROUP_LEN - 1 - i)) != 0 {
                    "dop"
                } else {
                    "bop"
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn parse(source: &str) -> CompileResult<Vec<String>> {
        let table = CommandTable::standard();
        let tokens = lexer::scan(source).unwrap();
        Parser::new(tokens, &table).run()
    }

    #[test]
    fn test_decode_group_bounds() {
        let all_ones = lexer::scan(&encode(127)).unwrap();
        assert_eq!(decode_group(&all_ones), 127);
        let all_zeros = lexer::scan(&encode(0)).unwrap();
        assert_eq!(decode_group(&all_zeros), 0);
    }

    #[test]
    fn test_decode_group_roundtrip() {
        for value in 0..=127u8 {
            let tokens = lexer::scan(&encode(value)).unwrap();
            assert_eq!(tokens.len(), GROUP_LEN);
            assert_eq!(decode_group(&tokens), value);
        }
    }

    #[test]
    fn test_single_invocation() {
        // 85 = 1010101: the fragment embeds the quoted 'U'.
        let fragments = parse(&format!("ski ba {}", encode(85))).unwrap();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains("mov byte [buff], 'U'"));
    }

    #[test]
    fn test_newline_argument_uses_numeric_literal() {
        let fragments = parse(&format!("ski ba {}", encode(10))).unwrap();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].contains("mov byte [buff], 0xA"));
        assert!(!fragments[0].contains("'\n'"));
    }

    #[test]
    fn test_consecutive_invocations() {
        let source = format!(
            "ski ba {}\nski ba {}",
            encode(b'H'),
            encode(10)
        );
        let fragments = parse(&source).unwrap();
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains("'H'"));
        assert!(fragments[1].contains("0xA"));
    }

    #[test]
    fn test_empty_token_stream() {
        assert_eq!(parse("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_extra_arguments_before_any_command() {
        let err = parse("bop dop bop").unwrap_err();
        assert_eq!(
            err,
            CompileError::ExtraArguments {
                at: Position::new(1, 1),
            }
        );
    }

    #[test]
    fn test_incomplete_group_at_next_command() {
        // Two bit tokens, then a fresh name token triggers the check.
        let err = parse("ski ba dop dop ski").unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidArgument {
                at: Position::new(1, 8),
            }
        );
    }

    #[test]
    fn test_incomplete_group_at_end_of_input() {
        // Five bit tokens then EOF: the final flush performs the same
        // completeness check a command token would.
        let err = parse("ski ba bop bop bop bop bop").unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidArgument {
                at: Position::new(1, 8),
            }
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = parse(&format!("ba ski {}", encode(5))).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidCommand {
                name: "ba ski".to_string(),
                at: Position::new(1, 1),
            }
        );
    }

    #[test]
    fn test_known_command_with_no_arguments() {
        let err = parse("ski ba").unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidArgumentCount {
                name: "ski ba".to_string(),
                expected: 1,
                actual: 0,
                at: Position::new(1, 1),
            }
        );
    }

    #[test]
    fn test_known_command_with_too_many_arguments() {
        let source = format!("ski ba {} {}", encode(1), encode(2));
        let err = parse(&source).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidArgumentCount {
                name: "ski ba".to_string(),
                expected: 1,
                actual: 2,
                at: Position::new(1, 1),
            }
        );
    }

    #[test]
    fn test_flush_precedes_group_check() {
        // The unknown first command must be reported before the
        // incomplete group that follows it.
        let source = format!("ba ba {} bop ski", encode(0));
        let err = parse(&source).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidCommand {
                name: "ba ba".to_string(),
                at: Position::new(1, 1),
            }
        );
    }
}
