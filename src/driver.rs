//! Pass driver: runs the configured front-end passes over one source file.

use log::debug;

use crate::diagnostics::Diagnostics;
use crate::dumper;
use crate::options::Options;
use crate::parser::ast::SyntaxTree;
use crate::parser::parser::Parser;
use crate::parser::symbols::TempFactory;
use crate::source::SourceFile;

/// Compile one source file according to `options`.
///
/// Errors are reported into `diag` as single lines; the optional tree dump
/// goes to `diag`'s output stream. Returns the parsed tree on success so
/// later passes can pick it up, `None` when parsing is disabled or failed.
/// Each call uses a fresh temporary counter, so compiling the same file
/// twice produces identical dumps.
pub fn run_passes(
    file: &SourceFile,
    options: &Options,
    diag: &mut Diagnostics,
) -> Option<SyntaxTree> {
    if !options.parse {
        debug!("{}: parse pass disabled, nothing to do", file.name());
        return None;
    }

    debug!("{}: parsing ({} chars)", file.name(), file.len());
    let mut temps = TempFactory::new();
    match Parser::new(file, options, &mut temps).parse() {
        Ok(tree) => {
            debug!(
                "{}: parsed, {} variable(s) declared",
                file.name(),
                tree.arena.len()
            );
            if options.dump_parse {
                diag.append_output(&dumper::render(&tree));
            }
            Some(tree)
        }
        Err(err) => {
            debug!("{}: parse failed", file.name());
            diag.error(err.message());
            None
        }
    }
}
