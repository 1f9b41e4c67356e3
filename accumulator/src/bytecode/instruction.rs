use crate::error::{Error, Result};
use nom::{
    combinator::map,
    error::ErrorKind,
    number::complete::{be_i16, be_i8, be_u16, be_u8},
    sequence::pair,
    IResult,
};
use std::fmt;

/// Comparison used by conditional branches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Eq,
    Ne,
    Lt,
    Ge,
    Gt,
    Le,
}
//
impl Condition {
    /// Conditions in opcode order, both for `if<cond>` and `if_icmp<cond>`
    const OPCODE_ORDER: [Self; 6] = [Self::Eq, Self::Ne, Self::Lt, Self::Ge, Self::Gt, Self::Le];

    fn from_opcode(opcode: u8, base: u8) -> Self {
        Self::OPCODE_ORDER[usize::from(opcode - base)]
    }

    pub fn holds(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Lt => lhs < rhs,
            Self::Ge => lhs >= rhs,
            Self::Gt => lhs > rhs,
            Self::Le => lhs <= rhs,
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Ge => "ge",
            Self::Gt => "gt",
            Self::Le => "le",
        }
    }
}

/// Integer subset of the JVM instruction set
///
/// Short forms such as `iload_1` or `iconst_2` decode to their general form
/// (`ILoad(1)`, `IConst(2)`). Branch offsets are relative to the address of
/// the branch instruction itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    IConst(i32),
    BiPush(i8),
    SiPush(i16),
    ILoad(u8),
    IStore(u8),
    Pop,
    Dup,
    IAdd,
    ISub,
    IMul,
    IInc { index: u8, delta: i8 },
    If { condition: Condition, offset: i16 },
    IfICmp { condition: Condition, offset: i16 },
    Goto(i16),
    IReturn,
    Return,
    InvokeStatic(u16),
}

impl Instruction {
    /// Relative target of a branch instruction
    pub fn branch_offset(self) -> Option<i16> {
        match self {
            Self::If { offset, .. } | Self::IfICmp { offset, .. } | Self::Goto(offset) => {
                Some(offset)
            }
            _ => None,
        }
    }
}

fn instruction(input: &[u8]) -> IResult<&[u8], Instruction> {
    use Instruction::*;
    let (rest, opcode) = be_u8::<_, nom::error::Error<&[u8]>>(input)?;
    match opcode {
        0x00 => Ok((rest, Nop)),
        0x02..=0x08 => Ok((rest, IConst(i32::from(opcode) - 3))),
        0x10 => map(be_i8, BiPush)(rest),
        0x11 => map(be_i16, SiPush)(rest),
        0x15 => map(be_u8, ILoad)(rest),
        0x1a..=0x1d => Ok((rest, ILoad(opcode - 0x1a))),
        0x36 => map(be_u8, IStore)(rest),
        0x3b..=0x3e => Ok((rest, IStore(opcode - 0x3b))),
        0x57 => Ok((rest, Pop)),
        0x59 => Ok((rest, Dup)),
        0x60 => Ok((rest, IAdd)),
        0x64 => Ok((rest, ISub)),
        0x68 => Ok((rest, IMul)),
        0x84 => map(pair(be_u8, be_i8), |(index, delta)| IInc { index, delta })(rest),
        0x99..=0x9e => map(be_i16, |offset| If {
            condition: Condition::from_opcode(opcode, 0x99),
            offset,
        })(rest),
        0x9f..=0xa4 => map(be_i16, |offset| IfICmp {
            condition: Condition::from_opcode(opcode, 0x9f),
            offset,
        })(rest),
        0xa7 => map(be_i16, Goto)(rest),
        0xac => Ok((rest, IReturn)),
        0xb1 => Ok((rest, Return)),
        0xb8 => map(be_u16, InvokeStatic)(rest),
        _ => Err(nom::Err::Failure(nom::error::Error::new(
            input,
            ErrorKind::Switch,
        ))),
    }
}

/// Decode a method body into `(offset, instruction)` pairs
pub fn decode(code: &[u8]) -> Result<Vec<(usize, Instruction)>> {
    let mut decoded = Vec::new();
    let mut remaining = code;
    while let Some(&opcode) = remaining.first() {
        let offset = code.len() - remaining.len();
        match instruction(remaining) {
            Ok((rest, decoded_instruction)) => {
                decoded.push((offset, decoded_instruction));
                remaining = rest;
            }
            Err(nom::Err::Failure(_)) => return Err(Error::InvalidOpcode { offset, opcode }),
            Err(_) => return Err(Error::Truncated { offset }),
        }
    }
    Ok(decoded)
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Nop => write!(f, "nop"),
            IConst(value) => write!(f, "iconst {value}"),
            BiPush(value) => write!(f, "bipush {value}"),
            SiPush(value) => write!(f, "sipush {value}"),
            ILoad(index) => write!(f, "iload {index}"),
            IStore(index) => write!(f, "istore {index}"),
            Pop => write!(f, "pop"),
            Dup => write!(f, "dup"),
            IAdd => write!(f, "iadd"),
            ISub => write!(f, "isub"),
            IMul => write!(f, "imul"),
            IInc { index, delta } => write!(f, "iinc {index}, {delta}"),
            If { condition, offset } => write!(f, "if{} {offset:+}", condition.mnemonic()),
            IfICmp { condition, offset } => {
                write!(f, "if_icmp{} {offset:+}", condition.mnemonic())
            }
            Goto(offset) => write!(f, "goto {offset:+}"),
            IReturn => write!(f, "ireturn"),
            Return => write!(f, "return"),
            InvokeStatic(index) => write!(f, "invokestatic #{index}"),
        }
    }
}
