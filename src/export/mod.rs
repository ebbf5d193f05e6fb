//! Writing attractors into CSV files.
//!
//! Every attractor is written into its own file named `{prefix}{n}.csv`, where `n` starts at
//! `1` and follows the order in which [`AttractorSearch::run`] reports attractors. Each file
//! starts with a header line, followed by one line per row of [`format_rows`].


use crate::attractor::{Attractor, AttractorSearch, SearchConfig};
use crate::decoder::format_rows;
use crate::encoding::SymbolicEncoding;
use crate::error::AttractorError;
use crate::network::MvNetwork;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write `header` and `lines` into a new file at `path`, replacing any existing file.
pub fn write_attractor_csv<S: AsRef<str>>(
    path: &Path,
    header: &str,
    lines: &[S],
) -> Result<(), AttractorError> {
    let io_error = |source: std::io::Error| AttractorError::OutputIo {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", header).map_err(io_error)?;
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(io_error)?;
    }
    writer.flush().map_err(io_error)
}

/// The file name used for the `n`-th attractor (counted from `1`).
pub fn attractor_path(prefix: &str, n: usize) -> PathBuf {
    PathBuf::from(format!("{}{}.csv", prefix, n))
}

/// Write each attractor into `{prefix}{n}.csv` and return the number of written files.
pub fn write_attractors(
    network: &MvNetwork,
    encoding: &SymbolicEncoding,
    attractors: &[Attractor],
    prefix: &str,
    header: &str,
) -> Result<usize, AttractorError> {
    for (i, attractor) in attractors.iter().enumerate() {
        let path = attractor_path(prefix, i + 1);
        let lines = format_rows(network, encoding, &attractor.states);
        write_attractor_csv(&path, header, &lines)?;
        info!(
            "{:?} written to `{}` ({} rows).",
            attractor.kind,
            path.display(),
            lines.len()
        );
    }
    Ok(attractors.len())
}

/// Search for attractors of `network` and write them as CSV files.
///
/// Returns the number of written files. A network without attractors outside of the
/// excluded basins is not an error, in which case nothing is written.
pub fn run(
    network: &MvNetwork,
    config: &SearchConfig,
    prefix: &str,
    header: &str,
) -> Result<usize, AttractorError> {
    let search = AttractorSearch::new(network, config.clone())?;
    let attractors = search.run()?;
    info!("Search finished with {} attractor(s).", attractors.len());
    write_attractors(network, search.encoding(), &attractors, prefix, header)
}
