// ============================================================
// Layer 4 — Review Loader
// ============================================================
// Loads review rows from a CSV file using the csv crate.
//
// Loading happens in two phases:
//   1. Header validation — every required column must be present.
//      Missing columns are reported together, before any row is read.
//   2. Row conversion — each record becomes a typed Review, looked
//      up by the column positions resolved in phase 1.
//
// Required columns: Review, Product, Source, Timestamp, aspect_list.
// Anything else (Topic, ids, ...) is ignored.
//
// Records are read as raw bytes and decoded with the configured
// encoding, so Latin-1 exports from spreadsheet tools load as well
// as UTF-8 files.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fmt, fs::File, io, path::PathBuf, str::FromStr};

use crate::domain::review::Review;
use crate::domain::traits::ReviewSource;
use crate::error::{Result, ReviewError};

pub const COL_REVIEW:      &str = "Review";
pub const COL_PRODUCT:     &str = "Product";
pub const COL_SOURCE:      &str = "Source";
pub const COL_TIMESTAMP:   &str = "Timestamp";
pub const COL_ASPECT_LIST: &str = "aspect_list";

const REQUIRED_COLUMNS: [&str; 5] = [
    COL_REVIEW,
    COL_PRODUCT,
    COL_SOURCE,
    COL_TIMESTAMP,
    COL_ASPECT_LIST,
];

// ─── Encoding ─────────────────────────────────────────────────────────────────
/// Text encoding of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value
    Latin1,
}

impl Encoding {
    fn decode(self, bytes: &[u8]) -> std::result::Result<String, std::str::Utf8Error> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).map(str::to_string),
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(format!("unknown encoding '{other}' (expected utf8 or latin1)")),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => f.write_str("utf8"),
            Encoding::Latin1 => f.write_str("latin1"),
        }
    }
}

// ─── Column positions ─────────────────────────────────────────────────────────
/// Where each required column sits in a record.
#[derive(Debug, Clone, Copy)]
struct Columns {
    review:      usize,
    product:     usize,
    source:      usize,
    timestamp:   usize,
    aspect_list: usize,
}

impl Columns {
    /// Resolve column positions from the header row.
    /// Fails with a schema error naming every missing column.
    fn resolve(headers: &[String]) -> Result<Self> {
        let position = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|&name| position(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ReviewError::Schema { missing });
        }

        let find = |name: &str| position(name).ok_or_else(|| ReviewError::Schema {
            missing: vec![name.to_string()],
        });
        Ok(Self {
            review:      find(COL_REVIEW)?,
            product:     find(COL_PRODUCT)?,
            source:      find(COL_SOURCE)?,
            timestamp:   find(COL_TIMESTAMP)?,
            aspect_list: find(COL_ASPECT_LIST)?,
        })
    }
}

// ─── CsvReviewLoader ──────────────────────────────────────────────────────────
/// Loads reviews from a CSV file on disk.
/// Implements the ReviewSource trait from Layer 3.
pub struct CsvReviewLoader {
    path:     PathBuf,
    encoding: Encoding,
}

impl CsvReviewLoader {
    pub fn new(path: impl Into<PathBuf>, encoding: Encoding) -> Self {
        Self { path: path.into(), encoding }
    }
}

impl ReviewSource for CsvReviewLoader {
    fn load_all(&self) -> Result<Vec<Review>> {
        let file = File::open(&self.path)?;
        let reviews = read_reviews(file, self.encoding)?;
        tracing::info!(
            "Loaded {} reviews from '{}'",
            reviews.len(),
            self.path.display()
        );
        Ok(reviews)
    }
}

/// Open and load a review file, attaching the path to any error.
pub fn load_reviews(path: impl Into<PathBuf>, encoding: Encoding) -> anyhow::Result<Vec<Review>> {
    let path = path.into();
    CsvReviewLoader::new(path.clone(), encoding)
        .load_all()
        .with_context(|| format!("Cannot load reviews from '{}'", path.display()))
}

/// Read reviews from any CSV byte stream.
pub fn read_reviews<R: io::Read>(reader: R, encoding: Encoding) -> Result<Vec<Review>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    // ── Phase 1: validate the header ──────────────────────────────────────────
    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let name = encoding.decode(h).unwrap_or_else(|_| String::from_utf8_lossy(h).into_owned());
            // A UTF-8 byte-order mark would otherwise stick to the first name
            if i == 0 {
                name.trim_start_matches('\u{FEFF}').to_string()
            } else {
                name
            }
        })
        .collect();
    let cols = Columns::resolve(&headers)?;
    tracing::debug!("CSV header: {:?}", headers);

    // ── Phase 2: convert every record ─────────────────────────────────────────
    let mut reviews = Vec::new();
    for record in rdr.byte_records() {
        let record = record?;
        let line   = record.position().map(|p| p.line()).unwrap_or(0);

        let cell = |index: usize, column: &str| -> Result<String> {
            let bytes = record.get(index).unwrap_or_default();
            encoding.decode(bytes).map_err(|e| ReviewError::Parse {
                line,
                column: column.to_string(),
                value:  String::from_utf8_lossy(bytes).into_owned(),
                reason: format!("{e} (is the file Latin-1 encoded?)"),
            })
        };

        reviews.push(Review::new(
            line,
            cell(cols.review, COL_REVIEW)?,
            cell(cols.product, COL_PRODUCT)?,
            cell(cols.source, COL_SOURCE)?,
            cell(cols.timestamp, COL_TIMESTAMP)?,
            &cell(cols.aspect_list, COL_ASPECT_LIST)?,
        ));
    }

    Ok(reviews)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Review,Product,Source,Timestamp,aspect_list,Topic\n";

    #[test]
    fn test_loads_typed_rows_in_order() {
        let csv = format!(
            "{HEADER}\
             \"Great battery. Bad screen.\",Phone X,store,2024-01-05,\"battery,screen\",hw\n\
             Fine.,Phone Y,forum,2024-01-06,price,misc\n"
        );
        let reviews = read_reviews(csv.as_bytes(), Encoding::Utf8).unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].text, "Great battery. Bad screen.");
        assert_eq!(reviews[0].aspect_list, vec!["battery", "screen"]);
        assert_eq!(reviews[1].product, "Phone Y");
        assert_eq!(reviews[1].line, 3);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "aspect_list,Timestamp,Source,Product,Review\nprice,2024-01-01,web,P,Cheap.\n";
        let reviews = read_reviews(csv.as_bytes(), Encoding::Utf8).unwrap();
        assert_eq!(reviews[0].text, "Cheap.");
        assert_eq!(reviews[0].aspect_list, vec!["price"]);
    }

    #[test]
    fn test_missing_columns_fail_before_rows() {
        let csv = "Review,Source,Timestamp\nok,web,2024-01-01\n";
        match read_reviews(csv.as_bytes(), Encoding::Utf8) {
            Err(ReviewError::Schema { missing }) => {
                assert_eq!(missing, vec!["Product", "aspect_list"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_gives_no_rows() {
        let reviews = read_reviews(HEADER.as_bytes(), Encoding::Utf8).unwrap();
        assert!(reviews.is_empty());
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let csv = "\u{FEFF}Review,Product,Source,Timestamp,aspect_list\nok,P,web,2024-01-01,a\n";
        let reviews = read_reviews(csv.as_bytes(), Encoding::Utf8).unwrap();
        assert_eq!(reviews.len(), 1);
    }

    #[test]
    fn test_latin1_decoding() {
        let mut bytes = b"Review,Product,Source,Timestamp,aspect_list\n".to_vec();
        bytes.extend_from_slice(b"Tr\xe8s bien.,Caf\xe9,web,2024-01-01,prix\n");
        let reviews = read_reviews(bytes.as_slice(), Encoding::Latin1).unwrap();
        assert_eq!(reviews[0].text, "Très bien.");
        assert_eq!(reviews[0].product, "Café");
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let mut bytes = b"Review,Product,Source,Timestamp,aspect_list\n".to_vec();
        bytes.extend_from_slice(b"Tr\xe8s bien.,P,web,2024-01-01,prix\n");
        match read_reviews(bytes.as_slice(), Encoding::Utf8) {
            Err(ReviewError::Parse { line, column, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "Review");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_loader_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{HEADER}Nice.,P,web,2024-01-01,design,t\n").unwrap();
        let loader  = CsvReviewLoader::new(file.path(), Encoding::Utf8);
        let reviews = loader.load_all().unwrap();
        assert_eq!(reviews.len(), 1);
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("UTF-8".parse::<Encoding>(), Ok(Encoding::Utf8));
        assert_eq!("latin1".parse::<Encoding>(), Ok(Encoding::Latin1));
        assert!("ebcdic".parse::<Encoding>().is_err());
    }
}
