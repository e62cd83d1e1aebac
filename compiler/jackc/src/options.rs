//! Compilation settings and command-line parsing.

use std::path::PathBuf;

use jack_codegen::{CodegenOptions, ShadowingRule};

/// What to do when a subroutine fails to compile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Write the class's partial output and report the diagnostics.
    #[default]
    Continue,
    /// Fail the unit; nothing is written for it.
    Abort,
}

/// Settings for one compilation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub fault_policy: FaultPolicy,
    pub shadowing: ShadowingRule,
    /// Emit `//` comment lines for subroutines and statements.
    pub annotate: bool,
    /// Compile units on a rayon pool, one generator per unit.
    pub parallel: bool,
    /// Output directory; defaults to the input's directory.
    pub out_dir: Option<PathBuf>,
}

impl CompileOptions {
    pub fn codegen(&self) -> CodegenOptions {
        CodegenOptions {
            shadowing: self.shadowing,
            annotate: self.annotate,
        }
    }
}

/// Parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub options: CompileOptions,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("missing input path")]
    MissingInput,
    #[error("unexpected extra argument `{0}`")]
    ExtraArgument(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` needs a value")]
    MissingValue(&'static str),
}

pub const USAGE: &str = "\
Usage: jackc <file.jack | directory> [options]

Options:
  --out-dir <dir>      Write .vm files to <dir> (default: next to the input)
  --parallel           Compile classes in parallel
  --annotate           Emit // comments for subroutines and statements
  --strict             Write nothing for a class with a failing subroutine
  --inner-shadowing    Resolve subroutine variables before class variables";

/// Parse arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<CliArgs, ArgsError> {
    let mut input: Option<PathBuf> = None;
    let mut options = CompileOptions::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--out-dir" | "-o" => {
                let Some(dir) = args.get(i + 1) else {
                    return Err(ArgsError::MissingValue("--out-dir"));
                };
                options.out_dir = Some(PathBuf::from(dir));
                i += 1;
            }
            "--parallel" => options.parallel = true,
            "--annotate" => options.annotate = true,
            "--strict" => options.fault_policy = FaultPolicy::Abort,
            "--inner-shadowing" => options.shadowing = ShadowingRule::InnermostFirst,
            _ => {
                if let Some(dir) = arg.strip_prefix("--out-dir=") {
                    options.out_dir = Some(PathBuf::from(dir));
                } else if arg.starts_with('-') {
                    return Err(ArgsError::UnknownOption(arg.to_owned()));
                } else if input.is_none() {
                    input = Some(PathBuf::from(arg));
                } else {
                    return Err(ArgsError::ExtraArgument(arg.to_owned()));
                }
            }
        }
        i += 1;
    }

    let input = input.ok_or(ArgsError::MissingInput)?;
    Ok(CliArgs { input, options })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn defaults() {
        let parsed = parse_args(&args(&["Main.jack"]));
        assert_eq!(
            parsed,
            Ok(CliArgs {
                input: PathBuf::from("Main.jack"),
                options: CompileOptions::default(),
            })
        );
    }

    #[test]
    fn every_flag() {
        let parsed = parse_args(&args(&[
            "--parallel",
            "src",
            "--out-dir",
            "build",
            "--annotate",
            "--strict",
            "--inner-shadowing",
        ]));
        let Ok(CliArgs { input, options }) = parsed else {
            panic!("arguments should parse: {parsed:?}");
        };
        assert_eq!(input, PathBuf::from("src"));
        assert_eq!(
            options,
            CompileOptions {
                fault_policy: FaultPolicy::Abort,
                shadowing: ShadowingRule::InnermostFirst,
                annotate: true,
                parallel: true,
                out_dir: Some(PathBuf::from("build")),
            }
        );
    }

    #[test]
    fn out_dir_equals_form() {
        let parsed = parse_args(&args(&["src", "--out-dir=out"]));
        assert_eq!(
            parsed.map(|a| a.options.out_dir),
            Ok(Some(PathBuf::from("out")))
        );
    }

    #[test]
    fn errors() {
        assert_eq!(parse_args(&[]), Err(ArgsError::MissingInput));
        assert_eq!(
            parse_args(&args(&["a", "b"])),
            Err(ArgsError::ExtraArgument("b".into()))
        );
        assert_eq!(
            parse_args(&args(&["a", "--fast"])),
            Err(ArgsError::UnknownOption("--fast".into()))
        );
        assert_eq!(
            parse_args(&args(&["a", "--out-dir"])),
            Err(ArgsError::MissingValue("--out-dir"))
        );
    }

    #[test]
    fn codegen_settings_follow() {
        let options = CompileOptions {
            annotate: true,
            shadowing: ShadowingRule::InnermostFirst,
            ..CompileOptions::default()
        };
        assert_eq!(
            options.codegen(),
            CodegenOptions {
                shadowing: ShadowingRule::InnermostFirst,
                annotate: true,
            }
        );
    }
}
