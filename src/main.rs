use std::io::{self, Write};
use std::path::PathBuf;
use std::{fs, process};

use gumdrop::Options;

use minicc::diagnostics::Diagnostics;
use minicc::driver;
use minicc::options::{self, Dialect};
use minicc::source::SourceFile;

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print this help message")]
    help: bool,

    #[options(free, help = "source file to compile")]
    input: Option<PathBuf>,

    #[options(no_short, long = "dump-ast", help = "print the parsed tree")]
    dump_ast: bool,

    #[options(no_short, long = "c89", help = "treat // as division, not a comment")]
    c89: bool,

    #[options(no_short, long = "no-parse", help = "skip the parse pass")]
    no_parse: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse_args_default_or_exit();

    let Some(path) = args.input else {
        eprintln!("{}", Args::usage());
        process::exit(1);
    };

    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}: {err}", path.display());
            process::exit(1);
        }
    };

    let file = SourceFile::new(path.display().to_string(), &text);
    let opts = options::Options {
        parse: !args.no_parse,
        dump_parse: args.dump_ast,
        dialect: if args.c89 { Dialect::C89 } else { Dialect::C99 },
    };

    let mut diag = Diagnostics::new();
    driver::run_passes(&file, &opts, &mut diag);

    let _ = io::stdout().write_all(diag.output().as_bytes());
    if diag.has_errors() {
        let _ = io::stderr().write_all(diag.errors().as_bytes());
        process::exit(1);
    }
}
