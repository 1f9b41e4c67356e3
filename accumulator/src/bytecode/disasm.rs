use super::{Class, Constant, Instruction, Method};
use crate::error::Result;
use std::fmt::Write;

/// Render a method body, one instruction per line, `javap` style
///
/// Branch targets are shown as absolute offsets and `invokestatic` operands
/// are annotated with the method they refer to when `class` can resolve them.
pub fn disassemble(method: &Method, class: Option<&Class>) -> Result<String> {
    let mut listing = String::new();
    for (offset, instruction) in method.instructions()? {
        let line = match (instruction, instruction.branch_offset()) {
            (_, Some(relative)) => {
                let text = instruction.to_string();
                let mnemonic = text.split(' ').next().unwrap_or_default();
                format!("{mnemonic} {}", offset as isize + isize::from(relative))
            }
            (Instruction::InvokeStatic(index), None) => {
                match class.and_then(|class| class.constant(index)) {
                    Some(Constant::MethodRef {
                        class: owner,
                        name,
                        descriptor,
                    }) => format!("{instruction} // {owner}.{name}:{descriptor}"),
                    _ => instruction.to_string(),
                }
            }
            _ => instruction.to_string(),
        };
        // Writing to a String cannot fail
        let _ = writeln!(listing, "{offset:>4}: {line}");
    }
    Ok(listing)
}
