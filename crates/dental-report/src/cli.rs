//! Command-line surface.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

/// The supported procedure-site cardinality constraints. Stored in decoded
/// form; the HTTP client percent-encodes them on the wire.
pub const CARDINALITY_VALUES: [&str; 6] =
    ["[1..1]", "[2..2]", "[3..3]", "[4..4]", "[5..5]", "[1..5]"];

const CARDINALITY_LABELS: [&str; 6] = [
    "exactly one surface",
    "exactly two surfaces",
    "exactly three surfaces",
    "exactly four surfaces",
    "exactly five surfaces",
    "one to five surfaces",
];

/// Correlates initial dental restorations with later caries on the same
/// tooth, from a patient-event extract and a FHIR terminology server.
#[derive(Debug, Parser)]
#[command(name = "dental-report", version, about)]
pub struct Cli {
    /// Path to the `;`-delimited patient-event extract.
    #[arg(long, value_name = "FILE")]
    pub events: PathBuf,

    /// Path of the report CSV to write.
    #[arg(long, value_name = "FILE", default_value = "output.csv")]
    pub output: PathBuf,

    /// FHIR terminology-server base URL. Overrides `DENTAL_FHIR_URL`.
    #[arg(long, value_name = "URL")]
    pub fhir_url: Option<String>,

    /// Procedure-site cardinality choice, 1-6 (see the interactive prompt
    /// for the mapping). Prompted for when omitted.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub cardinality: Option<u8>,

    /// Examination-gap threshold in days for rows without a caries event.
    #[arg(long, default_value_t = 1825)]
    pub fallback_gap_days: i64,
}

/// Maps a 1-based menu choice to its cardinality constraint.
pub fn cardinality_value(choice: u8) -> &'static str {
    CARDINALITY_VALUES[usize::from(choice) - 1]
}

/// Asks on stdin which cardinality to use, re-prompting until the answer
/// is a valid menu choice.
pub fn prompt_cardinality() -> io::Result<&'static str> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        writeln!(stdout, "How many tooth surfaces should the restoration cover?")?;
        for (i, label) in CARDINALITY_LABELS.iter().enumerate() {
            writeln!(stdout, "  {}: {} {}", i + 1, CARDINALITY_VALUES[i], label)?;
        }
        write!(stdout, "Choice [1-6]: ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed before a cardinality was chosen",
            ));
        }
        match line.trim().parse::<u8>() {
            Ok(choice @ 1..=6) => return Ok(cardinality_value(choice)),
            _ => writeln!(stdout, "Not a valid choice: {}", line.trim())?,
        }
    }
}
