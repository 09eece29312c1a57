use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// Writes any serializable view (snapshot, dashboard, filtered list) as JSON.
///
/// `pretty` switches to indented output; otherwise the document is a single
/// line followed by a newline.
pub fn export_json<T: Serialize + ?Sized>(
    value: &T,
    pretty: bool,
    output: &mut dyn Write,
) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(output, "{json}")?;
    Ok(())
}
