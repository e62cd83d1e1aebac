//! Jack compiler driver.
//!
//! Per unit: lex, divide, resolve, generate, then hand the class's text to an
//! [`OutputSink`]. A lexical error aborts the whole run. Subroutine faults are
//! contained in the class's [`ClassOutput`]; [`FaultPolicy`] decides whether
//! they fail the unit.

mod options;
mod store;
mod tracing_setup;

use std::path::PathBuf;

use jack_codegen::{ClassOutput, CodeGenerator};
use jack_lexer::LexError;
use rayon::prelude::*;
use tracing::{info, info_span, warn};

pub use jack_diagnostic::Diagnostic;
pub use options::{parse_args, ArgsError, CliArgs, CompileOptions, FaultPolicy, USAGE};
pub use store::{
    DirectoryStore, MemoryStore, OutputSink, OutputUnit, SourceStore, SourceUnit,
    OUTPUT_EXTENSION, SOURCE_EXTENSION,
};
pub use tracing_setup::init_tracing;

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("{unit}: {source}")]
    Lex {
        unit: String,
        #[source]
        source: LexError,
    },
    #[error("{unit}: {errors} subroutine(s) failed to compile")]
    Faulted {
        unit: String,
        errors: usize,
        output: Box<ClassOutput>,
    },
    #[error("no .jack files found at {}", .0.display())]
    NoSources(PathBuf),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A compiled unit: the text to write and the diagnostics behind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledUnit {
    pub output: OutputUnit,
    pub class: ClassOutput,
}

/// Compile one unit with `generator`, whose label counters carry over.
pub fn compile_unit(
    generator: &mut CodeGenerator,
    unit: &SourceUnit,
    policy: FaultPolicy,
) -> Result<CompiledUnit, DriverError> {
    let class_name = unit.class_name();
    let _span = info_span!("unit", class = class_name).entered();

    let tokens = jack_lexer::lex(&unit.text).map_err(|source| DriverError::Lex {
        unit: unit.name.clone(),
        source,
    })?;

    let class = generator.compile_class(class_name, &tokens);
    let errors = class.errors().count();
    info!(
        tokens = tokens.len(),
        subroutines = class.subroutines.len(),
        errors,
        warnings = class.diagnostics.len() - errors,
        "compiled"
    );

    if errors > 0 {
        match policy {
            FaultPolicy::Abort => {
                return Err(DriverError::Faulted {
                    unit: unit.name.clone(),
                    errors,
                    output: Box::new(class),
                });
            }
            FaultPolicy::Continue => warn!(errors, "writing partial output"),
        }
    }

    Ok(CompiledUnit {
        output: OutputUnit {
            name: unit.output_name(),
            text: class.code(),
        },
        class,
    })
}

/// Compile every unit.
///
/// Sequential runs share one generator so labels stay unique across the run.
/// Parallel runs give each unit its own generator; labels are then unique per
/// class only.
pub fn compile_units(
    units: &[SourceUnit],
    options: &CompileOptions,
) -> Result<Vec<CompiledUnit>, DriverError> {
    if options.parallel && units.len() > 1 {
        compile_parallel(units, options)
    } else {
        compile_sequential(units, options)
    }
}

fn compile_sequential(
    units: &[SourceUnit],
    options: &CompileOptions,
) -> Result<Vec<CompiledUnit>, DriverError> {
    let mut generator = CodeGenerator::new(options.codegen());
    units
        .iter()
        .map(|unit| compile_unit(&mut generator, unit, options.fault_policy))
        .collect()
}

fn compile_parallel(
    units: &[SourceUnit],
    options: &CompileOptions,
) -> Result<Vec<CompiledUnit>, DriverError> {
    let compile_one = |unit: &SourceUnit| {
        let mut generator = CodeGenerator::new(options.codegen());
        compile_unit(&mut generator, unit, options.fault_policy)
    };

    // A scoped pool is torn down before returning.
    rayon::ThreadPoolBuilder::new()
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| units.par_iter().map(&compile_one).collect())
        })
        .unwrap_or_else(|e| {
            warn!("failed to create thread pool ({e}), compiling sequentially");
            units.iter().map(&compile_one).collect()
        })
}

/// Totals for a finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub units: Vec<CompiledUnit>,
}

impl RunSummary {
    pub fn has_errors(&self) -> bool {
        self.units.iter().any(|u| u.class.has_errors())
    }

    /// Every diagnostic, paired with the class it belongs to.
    pub fn diagnostics(&self) -> impl Iterator<Item = (&str, &Diagnostic)> {
        self.units.iter().flat_map(|u| {
            u.class
                .diagnostics
                .iter()
                .map(move |d| (u.class.class_name.as_str(), d))
        })
    }
}

/// One `CODE: description` line per distinct code, in first-seen order.
pub fn code_legend<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Vec<String> {
    let mut seen = Vec::new();
    for diagnostic in diagnostics {
        if !seen.contains(&diagnostic.code) {
            seen.push(diagnostic.code);
        }
    }
    seen.into_iter()
        .map(|code| format!("{code}: {}", code.description()))
        .collect()
}

/// Read every unit from `source`, compile, and write the results to `sink`.
///
/// Nothing is written unless every unit compiles (under `Continue`, a unit
/// with failing subroutines still counts as compiled).
pub fn run(
    source: &dyn SourceStore,
    sink: &mut dyn OutputSink,
    options: &CompileOptions,
) -> Result<RunSummary, DriverError> {
    let units = source.units()?;
    info!(units = units.len(), parallel = options.parallel, "compiling");

    let compiled = compile_units(&units, options)?;
    for unit in &compiled {
        sink.write(&unit.output)?;
    }
    Ok(RunSummary { units: compiled })
}
