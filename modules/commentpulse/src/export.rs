// CSV export of a result table: header `source_id,text,label`, rows in table order.
// The header is written up front so an empty table still yields a valid file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use commentpulse_common::{PulseError, ResultTable};

const HEADER: [&str; 3] = ["source_id", "text", "label"];

pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<(), PulseError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(HEADER)
        .map_err(|e| PulseError::Export(e.to_string()))?;
    for record in table {
        csv.serialize(record)
            .map_err(|e| PulseError::Export(e.to_string()))?;
    }
    csv.flush().map_err(|e| PulseError::Export(e.to_string()))?;
    Ok(())
}

pub fn write_csv_file(table: &ResultTable, path: impl AsRef<Path>) -> Result<(), PulseError> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| PulseError::Export(format!("{}: {e}", path.display())))?;
    write_csv(table, file)
}
