//! Code generator.
//!
//! One [`CodeGenerator`] owns the label counters for a compilation run. Reuse
//! it across classes to keep labels unique run-wide; create one per class when
//! compiling classes in parallel.

mod expr;
mod statements;

use jack_diagnostic::Diagnostic;
use jack_divide::{
    class_body, class_var_decs, parameter_list, range_text, subroutine_body, subroutine_decs,
    subroutine_header, var_decs, SubroutineHeader, SubroutineKind,
};
use jack_ir::vm::{runtime, Segment};
use jack_ir::Token;
use tracing::{debug, warn};

use crate::outcome::{ClassOutput, CodegenError, SubroutineOutcome};
use crate::symbol_table::{ShadowingRule, StorageKind, SymbolTable};
use crate::writer::{LabelCounters, VmWriter};

/// Generator settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CodegenOptions {
    pub shadowing: ShadowingRule,
    /// Emit `// ...` comment lines before each subroutine and statement.
    pub annotate: bool,
}

/// Compiles classes to stack-machine text.
#[derive(Debug, Default)]
pub struct CodeGenerator {
    options: CodegenOptions,
    labels: LabelCounters,
}

impl CodeGenerator {
    pub fn new(options: CodegenOptions) -> Self {
        CodeGenerator {
            options,
            labels: LabelCounters::new(),
        }
    }

    /// Counter state, for callers that track label allocation.
    pub fn labels(&self) -> LabelCounters {
        self.labels
    }

    /// Compile one class. `class_name` qualifies every emitted function.
    pub fn compile_class(&mut self, class_name: &str, tokens: &[Token]) -> ClassOutput {
        let mut output = ClassOutput {
            class_name: class_name.to_owned(),
            ..ClassOutput::default()
        };

        if let Some(problem) = class_shape_problem(tokens) {
            output.diagnostics.push(problem.in_subroutine(class_name));
        }

        let body = class_body(tokens);
        let mut table = SymbolTable::new(self.options.shadowing);
        table.build_class_scope(&class_var_decs(body));
        debug!(
            class = class_name,
            fields = table.field_count(),
            statics = table.var_count(StorageKind::Static),
            "class scope built"
        );

        for sub in subroutine_decs(body) {
            let outcome = self.compile_subroutine(&mut table, class_name, sub);
            if let Err(error) = &outcome.result {
                output.diagnostics.push(error.clone());
            }
            output.diagnostics.extend(outcome.warnings.iter().cloned());
            output.subroutines.push(outcome);
        }

        output
    }

    fn compile_subroutine(
        &mut self,
        table: &mut SymbolTable,
        class_name: &str,
        sub: &[Token],
    ) -> SubroutineOutcome {
        let Some(header) = subroutine_header(sub) else {
            let name = format!("{class_name}.?");
            let error = malformed("subroutine header", sub).to_diagnostic();
            warn!(subroutine = %name, "{error}");
            return SubroutineOutcome {
                result: Err(error.in_subroutine(name.clone())),
                name,
                warnings: Vec::new(),
            };
        };

        let name = format!("{class_name}.{}", header.name);
        let body = subroutine_body(sub);
        let mut entries = parameter_list(sub);
        entries.extend(var_decs(body));
        table.build_subroutine_scope(&entries, header.kind, class_name);

        let mut compiler = SubroutineCompiler {
            class_name,
            table: &*table,
            labels: &mut self.labels,
            out: VmWriter::new(),
            warnings: Vec::new(),
            annotate: self.options.annotate,
        };
        let result = compiler.subroutine(&header, &name, sub, body);
        let SubroutineCompiler { out, warnings, .. } = compiler;
        table.reset_subroutine_scope();

        let warnings: Vec<Diagnostic> = warnings
            .into_iter()
            .map(|w| w.in_subroutine(name.clone()))
            .collect();

        let result = match result {
            Ok(()) => {
                debug!(subroutine = %name, warnings = warnings.len(), "compiled");
                Ok(out.finish())
            }
            Err(error) => {
                warn!(subroutine = %name, "{error}");
                Err(error.to_diagnostic().in_subroutine(name.clone()))
            }
        };

        SubroutineOutcome {
            name,
            result,
            warnings,
        }
    }
}

/// Per-subroutine emission state.
pub(crate) struct SubroutineCompiler<'a> {
    class_name: &'a str,
    table: &'a SymbolTable,
    labels: &'a mut LabelCounters,
    out: VmWriter,
    warnings: Vec<Diagnostic>,
    annotate: bool,
}

impl SubroutineCompiler<'_> {
    fn subroutine(
        &mut self,
        header: &SubroutineHeader<'_>,
        name: &str,
        sub: &[Token],
        body: &[Token],
    ) -> Result<(), CodegenError> {
        if !sub.last().is_some_and(|t| t.is_symbol('}')) {
            return Err(malformed("subroutine body", sub));
        }

        if self.annotate {
            self.out.comment(&format!("{} {name}", header.kind.as_str()));
        }
        self.out
            .function(name, self.table.var_count(StorageKind::Local));

        match header.kind {
            SubroutineKind::Constructor => {
                self.out.push(Segment::Constant, self.table.field_count());
                self.out.call(runtime::MEMORY_ALLOC, 1);
                self.out.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Method => {
                self.out.push(Segment::Argument, 0);
                self.out.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Function => {}
        }

        self.statements(&jack_divide::statements(body))
    }
}

/// A class range must open with `class <name> {`.
fn class_shape_problem(tokens: &[Token]) -> Option<Diagnostic> {
    let well_formed = matches!(
        tokens,
        [class, name, open, ..]
            if class.is_keyword(jack_ir::Keyword::Class)
                && name.identifier().is_some()
                && open.is_symbol('{')
    );
    (!well_formed).then(|| malformed("class declaration", tokens).to_diagnostic())
}

/// Build a malformed-structure error quoting the start of `near`.
pub(crate) fn malformed(what: &'static str, near: &[Token]) -> CodegenError {
    const QUOTE_LIMIT: usize = 8;
    let shown = &near[..near.len().min(QUOTE_LIMIT)];
    let mut text = range_text(shown);
    if near.len() > QUOTE_LIMIT {
        text.push_str(" ...");
    }
    CodegenError::MalformedStructure { what, near: text }
}

/// Convert an instruction operand count, failing instead of truncating.
pub(crate) fn operand(what: &'static str, count: usize) -> Result<u16, CodegenError> {
    u16::try_from(count).map_err(|_| CodegenError::CountOverflow { what, count })
}

/// Ensure sufficient stack space is available before executing `f`.
///
/// Expression terms recurse through parenthesized groups, call arguments and
/// array indices.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
