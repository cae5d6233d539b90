mod encode;
mod error;
mod label;
mod lexer;
mod num;
mod parser;
mod rom;

use clap::Parser;
use color_print::cprintln;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about = "Assembler for the BX16 boot ROM", help_template = HELP_TEMPLATE)]
struct Args {
    /// Input source file
    input: String,

    /// Output ROM image (text hex, one word per line)
    output: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let src = match std::fs::read_to_string(&args.input) {
        Ok(src) => src,
        Err(e) => {
            cprintln!("<red,bold>error</>: cannot read {}: {}", args.input, e);
            return ExitCode::FAILURE;
        }
    };

    let rom = match parser::assemble(&src) {
        Ok(rom) => rom,
        Err(err) => {
            err.print_diag(&args.input, &src);
            return ExitCode::FAILURE;
        }
    };

    // the output is only opened once both phases have succeeded, so a
    // failing run never leaves a partial image behind
    if let Err(e) = std::fs::write(&args.output, rom.render()) {
        cprintln!("<red,bold>error</>: cannot write {}: {}", args.output, e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
