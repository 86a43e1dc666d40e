use std::io::{self, Write};

use crate::console::Console;
use crate::error::OrionError;
use crate::session::SearchSession;

/// Print the final report for a finished session.
///
/// Reads the session only. The elapsed time is taken at the moment the
/// report is written, so it covers the walk plus any time spent before it.
pub fn report<W: Write + Send>(session: &SearchSession, console: &Console<W>) -> Result<(), OrionError> {
    console.with_writer(|out| write_report(session, out))
}

/// Write the report for `session` to any writer.
pub fn write_report(session: &SearchSession, out: &mut impl Write) -> io::Result<()> {
    let results = session.results();

    if results.is_empty() {
        writeln!(out, "[Orion] No files found matching the query.")?;
        return out.flush();
    }

    writeln!(out, "[Orion] Done!")?;
    writeln!(
        out,
        "[Orion] Found {} file(s) matching the query in {}:",
        results.len(),
        session.request().root_dir().display()
    )?;
    for result in &results {
        writeln!(out, "Orion found: {}", result.path.display())?;
    }
    writeln!(out, "[Orion] Search completed.")?;
    writeln!(out, "[Orion] Elapsed time: {:?}", session.elapsed())?;
    out.flush()
}
