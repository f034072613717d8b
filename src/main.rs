//! Command-line entry point: load a chain file and write its diagnostic figures.

use std::env;
use std::error::Error;
use std::path::Path;
use std::process;

use chainplot::chain::Chain;
use chainplot::io::load_chain;
use chainplot::plot::render_all;
use chainplot::stats::ParamSummary;

fn main() {
    let args: Vec<String> = env::args().collect();

    let filename = match parse_args(&args) {
        Ok((filename, ignored)) => {
            if !ignored.is_empty() {
                println!("Warning: too many filenames.");
                println!("The following were ignored:  {}", ignored.join(" "));
            }
            filename
        }
        Err(usage) => {
            println!("Error: no filename given.");
            println!("{usage}");
            process::exit(1);
        }
    };

    if !Path::new(filename).exists() {
        println!("Error: file not found: {filename}");
        process::exit(1);
    }

    let chain = match load_chain(Path::new(filename)) {
        Ok(chain) => chain,
        Err(e) => {
            println!("Error: could not read file {filename}: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = report(&chain, filename) {
        println!("Error: could not render figures: {e}");
        process::exit(1);
    }
}

/// Splits argv into the filename and any ignored extras. `Err` carries the
/// usage line.
fn parse_args(args: &[String]) -> Result<(&str, &[String]), String> {
    match args {
        [] | [_] => Err(format!(
            "Usage:   {} <filename>",
            args.first().map(String::as_str).unwrap_or("chainplot")
        )),
        [_, filename, ignored @ ..] => Ok((filename.as_str(), ignored)),
    }
}

/// Prints per-parameter summary lines, then writes the figure set into the
/// current directory, naming files from the input stem.
fn report(chain: &Chain, filename: &str) -> Result<(), Box<dyn Error>> {
    for i in 0..chain.dim() {
        let summary = ParamSummary::from_samples(chain.param(i))?;
        println!("{}", summary.label(i + 1));
    }

    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chain");
    let figures = render_all(chain, stem, Path::new("."))?;

    println!("Saved trace plot to {}", figures.trace.display());
    for path in &figures.histograms {
        println!("Saved histogram to {}", path.display());
    }
    if let Some(path) = &figures.pairwise {
        println!("Saved pairwise scatter plot to {}", path.display());
    }
    Ok(())
}
