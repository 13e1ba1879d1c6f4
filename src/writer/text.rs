//! Plain-text output of generated words.

use std::io::{self, Write};

use crate::processor::Processed;
use crate::writer::bytecode::listing;

/// Write the result for one input file.
///
/// With several inputs every block gets a `--- <name>` header and blocks are
/// separated by an empty line.
pub fn emit<W: Write>(
    out: &mut W,
    name: &str,
    processed: &Processed,
    word_separator: &str,
    position: (usize, usize),
) -> io::Result<()> {
    let (index, total) = position;
    let many = total > 1;

    if many {
        writeln!(out, "--- {name}")?;
    }

    match processed {
        Processed::Words(words) => writeln!(out, "{}", words.join(word_separator))?,
        Processed::Bytecode(code) => write!(out, "{}", listing(code))?,
    }

    if many && index + 1 != total {
        writeln!(out)?;
    }
    Ok(())
}
