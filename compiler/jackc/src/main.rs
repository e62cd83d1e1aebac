//! Jack compiler CLI.

use jackc::{code_legend, init_tracing, parse_args, run, DirectoryStore, DriverError, USAGE};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return;
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let mut store = DirectoryStore::new(cli.input.clone(), cli.options.out_dir.clone());
    let source = store.clone();

    match run(&source, &mut store, &cli.options) {
        Ok(summary) => {
            for (class, diagnostic) in summary.diagnostics() {
                eprintln!("{class}: {diagnostic}");
            }
            for line in code_legend(summary.diagnostics().map(|(_, d)| d)) {
                eprintln!("  {line}");
            }
            println!(
                "compiled {} class(es) into {}",
                summary.units.len(),
                store.out_dir().display()
            );
            if summary.has_errors() {
                std::process::exit(1);
            }
        }
        Err(DriverError::Faulted { unit, output, .. }) => {
            for diagnostic in &output.diagnostics {
                eprintln!("{unit}: {diagnostic}");
            }
            for line in code_legend(&output.diagnostics) {
                eprintln!("  {line}");
            }
            eprintln!("error: {unit} has failing subroutines; nothing was written");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
