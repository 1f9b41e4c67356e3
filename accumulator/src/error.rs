/// Errors reported by the checked accumulation loop and the bytecode
/// interpreter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("running total overflowed at iteration {iteration}")]
    Overflow { iteration: u64 },

    #[error("invalid opcode {opcode:#04x} at offset {offset}")]
    InvalidOpcode { offset: usize, opcode: u8 },

    #[error("truncated instruction at offset {offset}")]
    Truncated { offset: usize },

    #[error("malformed method descriptor {0:?}")]
    BadDescriptor(String),

    #[error("constant #{index} is not a method reference")]
    BadConstant { index: u16 },

    #[error("no method {name}{descriptor} in class {class}")]
    NoSuchMethod {
        class: String,
        name: String,
        descriptor: String,
    },

    #[error("expected {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },

    #[error("branch to offset {target} does not start an instruction")]
    BadBranch { target: isize },

    #[error("local variable {index} out of range")]
    BadLocal { index: u8 },

    #[error("operand stack underflow at offset {offset}")]
    StackUnderflow { offset: usize },

    #[error("execution ran past the end of {method}")]
    MissingReturn { method: String },

    #[error("step limit of {limit} instructions exceeded")]
    StepLimit { limit: u64 },

    #[error("call depth limit of {limit} frames exceeded")]
    CallDepth { limit: usize },
}

/// Result type alias for fallible operations of this crate
pub type Result<T> = std::result::Result<T, Error>;
