//! Symbol resolution and stack-machine code generation.
//!
//! [`CodeGenerator::compile_class`] takes a class's tokens and returns a
//! [`ClassOutput`] holding one typed outcome per subroutine. A fault inside
//! one subroutine becomes that subroutine's `Err` and generation moves on to
//! the next.

mod generator;
mod outcome;
pub mod symbol_table;
mod writer;

pub use generator::{ensure_sufficient_stack, CodeGenerator, CodegenOptions};
pub use outcome::{ClassOutput, CodegenError, SubroutineOutcome};
pub use symbol_table::{ShadowingRule, StorageKind, Symbol, SymbolTable};
pub use writer::{IfLabels, LabelCounters, VmWriter, WhileLabels};
