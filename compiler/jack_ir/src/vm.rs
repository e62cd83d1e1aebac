//! Stack-machine instruction model.
//!
//! Code generation builds [`Command`] values; their `Display` output is the
//! exact text line consumed by the downstream VM translator.

use std::fmt;

/// Library routines the generated code calls into.
pub mod runtime {
    pub const MEMORY_ALLOC: &str = "Memory.alloc";
    pub const MATH_MULTIPLY: &str = "Math.multiply";
    pub const MATH_DIVIDE: &str = "Math.divide";
    pub const STRING_NEW: &str = "String.new";
    pub const STRING_APPEND_CHAR: &str = "String.appendChar";
}

/// A named stack-machine memory region.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic and logical stack operations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
}

impl ArithmeticOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Neg => "neg",
            ArithmeticOp::Eq => "eq",
            ArithmeticOp::Gt => "gt",
            ArithmeticOp::Lt => "lt",
            ArithmeticOp::And => "and",
            ArithmeticOp::Or => "or",
            ArithmeticOp::Not => "not",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One stack-machine instruction.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Command {
    Push(Segment, u16),
    Pop(Segment, u16),
    Arithmetic(ArithmeticOp),
    Label(String),
    Goto(String),
    IfGoto(String),
    /// `function <name> <locals>`
    Function { name: String, locals: u16 },
    /// `call <name> <args>`
    Call { name: String, args: u16 },
    Return,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Push(segment, index) => write!(f, "push {segment} {index}"),
            Command::Pop(segment, index) => write!(f, "pop {segment} {index}"),
            Command::Arithmetic(op) => f.write_str(op.as_str()),
            Command::Label(name) => write!(f, "label {name}"),
            Command::Goto(name) => write!(f, "goto {name}"),
            Command::IfGoto(name) => write!(f, "if-goto {name}"),
            Command::Function { name, locals } => write!(f, "function {name} {locals}"),
            Command::Call { name, args } => write!(f, "call {name} {args}"),
            Command::Return => f.write_str("return"),
        }
    }
}
