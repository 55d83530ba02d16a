//! The command table maps resolved identifiers to code generators.
//!
//! Extending the language means registering more entries here; the
//! lookup machinery never changes.

use super::error::{CompileError, CompileResult, Position};

/// A single registered command: its identifier, required argument
/// count, and the generator producing its assembly fragment.
pub struct Command {
    pub name: &'static str,
    pub args: usize,
    pub run: fn(&[u8]) -> String,
}

/// The read-only command registry. Built once before a run and
/// borrowed by the parser; never mutated.
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    /// The standard SCL command set.
    pub fn standard() -> Self {
        CommandTable {
            commands: vec![Command {
                name: "ski ba",
                args: 1,
                run: write_byte,
            }],
        }
    }

    /// Resolves an invocation to its assembly fragment.
    ///
    /// Entries are checked in registration order and the first
    /// identifier match wins; arity is only checked after a match, so
    /// an unknown identifier always reports `InvalidCommand` rather
    /// than `InvalidArgumentCount`.
    pub fn resolve(
        &self,
        name: &str,
        start: Position,
        args: &[u8],
    ) -> CompileResult<String> {
        for command in &self.commands {
            if command.name == name {
                if command.args != args.len() {
                    return Err(CompileError::InvalidArgumentCount {
                        name: name.to_string(),
                        expected: command.args,
                        actual: args.len(),
                        at: start,
                    });
                }
                debug!("resolved command '{}' with {} argument(s)", name, args.len());
                return Ok((command.run)(args));
            }
        }

        Err(CompileError::InvalidCommand {
            name: name.to_string(),
            at: start,
        })
    }
}

/// Generator for `ski ba`: write one byte to standard output.
///
/// The byte is moved into the scratch buffer and written with a
/// write(1, buff, 1) int 0x80 sequence. A newline argument is emitted
/// as the 0xA numeric literal since NASM cannot quote it.
fn write_byte(args: &[u8]) -> String {
    let literal = byte_literal(args[0]);
    format!(
        "mov byte [buff], {}\n\
         mov eax, 0x4\n\
         mov ebx, 0x1\n\
         mov ecx, buff\n\
         mov edx, 0x1\n\
         int 0x80\n",
        literal
    )
}

fn byte_literal(value: u8) -> String {
    if value == b'\n' {
        "0xA".to_string()
    } else {
        format!("'{}'", value as char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> Position {
        Position::new(1, 1)
    }

    #[test]
    fn test_resolve_known_command() {
        let table = CommandTable::standard();
        let fragment = table.resolve("ski ba", at(), &[85]).unwrap();
        assert!(fragment.contains("mov byte [buff], 'U'"));
        assert!(fragment.contains("int 0x80"));
    }

    #[test]
    fn test_resolve_unknown_command() {
        let table = CommandTable::standard();
        // Wrong arity *and* unknown name: identifier lookup comes
        // first, so this must be InvalidCommand.
        let err = table.resolve("ba ski", at(), &[85]).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidCommand {
                name: "ba ski".to_string(),
                at: at(),
            }
        );
    }

    #[test]
    fn test_resolve_arity_mismatch() {
        let table = CommandTable::standard();
        let err = table.resolve("ski ba", at(), &[]).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidArgumentCount {
                name: "ski ba".to_string(),
                expected: 1,
                actual: 0,
                at: at(),
            }
        );

        let err = table.resolve("ski ba", at(), &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            CompileError::InvalidArgumentCount {
                name: "ski ba".to_string(),
                expected: 1,
                actual: 2,
                at: at(),
            }
        );
    }

    #[test]
    fn test_byte_literal() {
        assert_eq!(byte_literal(85), "'U'");
        assert_eq!(byte_literal(b'a'), "'a'");
        // Newline gets the numeric form.
        assert_eq!(byte_literal(10), "0xA");
    }
}
