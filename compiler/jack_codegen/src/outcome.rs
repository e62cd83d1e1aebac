//! Typed per-subroutine and per-class results.

use jack_diagnostic::{malformed_structure, Diagnostic, ErrorCode};

/// A fault that stops generation of one subroutine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("malformed {what} near `{near}`")]
    MalformedStructure { what: &'static str, near: String },
    #[error("{what} count {count} does not fit an instruction operand")]
    CountOverflow { what: &'static str, count: usize },
}

impl CodegenError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CodegenError::MalformedStructure { .. } => ErrorCode::E1001,
            CodegenError::CountOverflow { .. } => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CodegenError::MalformedStructure { what, near } => malformed_structure(what, near),
            CodegenError::CountOverflow { .. } => {
                Diagnostic::error(self.code()).with_message(self.to_string())
            }
        }
    }
}

/// Result of compiling one subroutine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubroutineOutcome {
    /// `Class.name`, or `Class.?` when the header could not be read.
    pub name: String,
    pub result: Result<String, Diagnostic>,
    /// Non-fatal diagnostics, such as unresolved names.
    pub warnings: Vec<Diagnostic>,
}

impl SubroutineOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of compiling one class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassOutput {
    pub class_name: String,
    pub subroutines: Vec<SubroutineOutcome>,
    /// Every diagnostic raised for the class, subroutine ones included, in
    /// the order they arose.
    pub diagnostics: Vec<Diagnostic>,
}

impl ClassOutput {
    /// Concatenated code of the subroutines that compiled.
    pub fn code(&self) -> String {
        self.subroutines
            .iter()
            .filter_map(|s| s.result.as_ref().ok())
            .map(String::as_str)
            .collect()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}
