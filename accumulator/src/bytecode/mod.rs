//! Integer-only JVM bytecode: decoding, disassembly and interpretation of
//! static methods
//!
//! This is enough to run the accumulation loop the way a JVM would execute it
//! (see [`sample`]), and to cross-check the native implementations against it.

pub mod disasm;
pub mod instruction;
pub mod interpreter;
pub mod sample;

use crate::error::{Error, Result};

pub use disasm::disassemble;
pub use instruction::{decode, Condition, Instruction};
pub use interpreter::{Completion, Interpreter};

/// Constant pool entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    MethodRef {
        class: String,
        name: String,
        descriptor: String,
    },
    Utf8(String),
}

/// Static method with its bytecode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub descriptor: String,
    pub max_locals: u16,
    pub code: Vec<u8>,
}
//
impl Method {
    pub fn new(name: &str, descriptor: &str, max_locals: u16, code: &[u8]) -> Self {
        Self {
            name: name.to_owned(),
            descriptor: descriptor.to_owned(),
            max_locals,
            code: code.to_vec(),
        }
    }

    pub fn instructions(&self) -> Result<Vec<(usize, Instruction)>> {
        decode(&self.code)
    }

    /// Number of parameter slots and whether a value is returned
    pub fn signature(&self) -> Result<(usize, bool)> {
        parse_descriptor(&self.descriptor)
    }
}

/// Loaded class: a name, a constant pool and static methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    pub constants: Vec<Constant>,
    pub methods: Vec<Method>,
}
//
impl Class {
    /// Constant pool lookup, 1-based like the JVM's
    pub fn constant(&self, index: u16) -> Option<&Constant> {
        usize::from(index)
            .checked_sub(1)
            .and_then(|index| self.constants.get(index))
    }

    pub fn method(&self, name: &str, descriptor: &str) -> Result<&Method> {
        self.methods
            .iter()
            .find(|method| method.name == name && method.descriptor == descriptor)
            .ok_or_else(|| Error::NoSuchMethod {
                class: self.name.clone(),
                name: name.to_owned(),
                descriptor: descriptor.to_owned(),
            })
    }

    /// Resolve an `invokestatic` operand to a method of this class
    pub fn resolve(&self, index: u16) -> Result<&Method> {
        match self.constant(index) {
            Some(Constant::MethodRef {
                class,
                name,
                descriptor,
            }) => {
                if *class != self.name {
                    return Err(Error::NoSuchMethod {
                        class: class.clone(),
                        name: name.clone(),
                        descriptor: descriptor.clone(),
                    });
                }
                self.method(name, descriptor)
            }
            _ => Err(Error::BadConstant { index }),
        }
    }
}

/// Parse a method descriptor such as `(II)I` into its parameter slot count
/// and whether it returns a value
///
/// `long` and `double` parameters are not supported.
pub fn parse_descriptor(descriptor: &str) -> Result<(usize, bool)> {
    let bad = || Error::BadDescriptor(descriptor.to_owned());
    let params = descriptor.strip_prefix('(').ok_or_else(bad)?;
    let (params, ret) = params.split_once(')').ok_or_else(bad)?;

    let mut slots = 0;
    let mut chars = params.chars();
    while let Some(c) = chars.next() {
        let mut c = c;
        while c == '[' {
            c = chars.next().ok_or_else(bad)?;
        }
        match c {
            'B' | 'C' | 'F' | 'I' | 'S' | 'Z' => {}
            'L' => {
                chars.find(|&c| c == ';').ok_or_else(bad)?;
            }
            _ => return Err(bad()),
        }
        slots += 1;
    }

    let returns_value = match ret {
        "V" => false,
        "B" | "C" | "I" | "S" | "Z" => true,
        _ => return Err(bad()),
    };
    Ok((slots, returns_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptors() {
        assert_eq!(parse_descriptor("(II)I"), Ok((2, true)));
        assert_eq!(parse_descriptor("()I"), Ok((0, true)));
        assert_eq!(parse_descriptor("([Ljava/lang/String;)V"), Ok((1, false)));
        assert_eq!(parse_descriptor("([[ILjava/lang/Object;I)V"), Ok((3, false)));
    }

    #[test]
    fn malformed_descriptors() {
        for descriptor in ["II)I", "(II", "(Q)V", "(Ljava/lang/String)V", "()J", "([)V"] {
            assert_eq!(
                parse_descriptor(descriptor),
                Err(Error::BadDescriptor(descriptor.to_owned())),
                "{descriptor}"
            );
        }
    }

    #[test]
    fn constant_pool_is_one_based() {
        let class = sample::simple_math_with_loop();
        assert_eq!(class.constant(0), None);
        assert!(matches!(class.constant(1), Some(Constant::MethodRef { name, .. }) if name == "<init>"));
        assert_eq!(class.resolve(3).map(|m| m.name.as_str()), Ok("add"));
        assert_eq!(class.resolve(4), Err(Error::BadConstant { index: 4 }));
        assert!(matches!(class.resolve(1), Err(Error::NoSuchMethod { .. })));
    }
}
