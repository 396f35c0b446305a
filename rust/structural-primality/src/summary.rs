//! Tab-separated run summary.

use std::io::Write;

use structural_core::delimited::{write_record, Delimiter};
use structural_core::{Band, Summary};

use crate::EmitError;

/// Write counts and the prime closest-band histogram:
///
/// ```text
/// metric  value
/// prime_count  ...
/// composite_count  ...
///
/// closest_band_distribution  count
/// A  ...
/// ...
/// F  ...
/// ```
pub fn write_summary<W: Write + ?Sized>(summary: &Summary, writer: &mut W) -> Result<(), EmitError> {
    let tab = Delimiter::Tab;
    write_record(writer, &["metric", "value"], tab)?;
    write_record(writer, &["prime_count".to_string(), summary.prime_count.to_string()], tab)?;
    write_record(
        writer,
        &["composite_count".to_string(), summary.composite_count.to_string()],
        tab,
    )?;
    writer.write_all(b"\n")?;
    write_record(writer, &["closest_band_distribution", "count"], tab)?;
    for band in Band::ALL {
        write_record(
            writer,
            &[band.to_string(), summary.band_count(band).to_string()],
            tab,
        )?;
    }
    writer.flush()?;
    Ok(())
}
