//! Wraps generated fragments into a complete NASM program.
//!
//! The data segment declares a single scratch byte that every command
//! writes through; the epilogue exits the process with status 0.

/// Data segment, entry label.
const PROLOGUE: &str = "section .data\n\
                        buff db ' '\n\
                        section .text\n\
                        global _start\n\
                        _start:\n";

/// exit(0)
const EPILOGUE: &str = "mov eax, 0x1\n\
                        xor ebx, ebx\n\
                        int 0x80";

/// Concatenates the prologue, each fragment in emission order, and
/// the epilogue into the final program text.
pub fn assemble(fragments: &[String]) -> String {
    let mut program = String::from(PROLOGUE);
    for fragment in fragments {
        program.push_str(fragment);
    }
    program.push_str(EPILOGUE);
    program
}
