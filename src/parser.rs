// 📥 CSV Parser - raw customer CSV text into Records
//
// Columns are matched by header name, so input column order does not matter.
// Unknown columns are dropped, short rows leave the missing fields empty.

use crate::error::{MergeError, Result};
use crate::record::{Record, ID_COLUMN};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

/// Parse `text` into records, in file order.
///
/// `origin` names the input in errors (usually the remote path).
/// `id_column` is the header holding the identifier; when it differs from
/// the canonical `Customer Id` it is mapped onto it.
///
/// Blank input yields no records. A non-blank input must have a header row
/// containing `id_column`.
pub fn parse_records(text: &str, origin: &str, id_column: &str) -> Result<Vec<Record>> {
    if text.trim().is_empty() {
        debug!(origin, "blank input, no records");
        return Ok(Vec::new());
    }

    // The csv reader runs an open quote to EOF without complaint
    if let Some(line) = unterminated_quote_line(text) {
        return Err(MergeError::parse(
            origin,
            Some(line),
            "quoted field is never closed",
        ));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| csv_error(origin, e))?
        .clone();

    if !headers.iter().any(|h| h == id_column) {
        return Err(MergeError::parse(
            origin,
            Some(1),
            format!("header row has no '{id_column}' column"),
        ));
    }

    if id_column != ID_COLUMN {
        reader.set_headers(remap_id_header(&headers, id_column));
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<Record>() {
        let record = result.map_err(|e| csv_error(origin, e))?;
        records.push(record);
    }

    debug!(origin, count = records.len(), "parsed records");
    Ok(records)
}

/// Rename `id_column` to the canonical identifier header. A column already
/// called `Customer Id` is blanked so it cannot shadow the chosen one.
fn remap_id_header(headers: &StringRecord, id_column: &str) -> StringRecord {
    headers
        .iter()
        .map(|h| {
            if h == id_column {
                ID_COLUMN
            } else if h == ID_COLUMN {
                ""
            } else {
                h
            }
        })
        .collect()
}

/// Line of the quoted field that is still open at end of input, if any.
///
/// A quote only opens a field when it is the field's first byte; anywhere
/// else in an unquoted field it is a literal (`27" Displays`). Inside a
/// quoted field a doubled quote is an escape, a single one closes it.
fn unterminated_quote_line(text: &str) -> Option<u64> {
    let mut line = 1;
    let mut open_at = None;
    let mut field_start = true;
    let mut bytes = text.bytes().peekable();

    while let Some(byte) = bytes.next() {
        if open_at.is_some() {
            match byte {
                b'"' if bytes.peek() == Some(&b'"') => {
                    bytes.next();
                }
                b'"' => open_at = None,
                b'\n' => line += 1,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' if field_start => {
                open_at = Some(line);
                field_start = false;
            }
            b',' | b'\r' => field_start = true,
            b'\n' => {
                line += 1;
                field_start = true;
            }
            _ => field_start = false,
        }
    }

    open_at
}

fn csv_error(origin: &str, err: csv::Error) -> MergeError {
    let line = err.position().map(|p| p.line());
    MergeError::parse(origin, line, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Customer Id,First Name,Last Name,Company,City,Country,Phone 1,Phone 2,Email,Subscription Date,Website";

    #[test]
    fn test_parse_full_rows() {
        let text = format!(
            "{HEADER}\n\
             DD37Cf93aecA6Dc,Sheryl,Baxter,Rasmussen Group,East Leonard,Chile,229.077.5154,397.884.0519x718,zunigavanessa@smith.info,2020-08-24,http://www.stephenson.com/\n\
             1Ef7b82A4CAAD10,Preston,Lozano,Vega-Gentry,East Jimmychester,Djibouti,5153435776,686-620-1820x944,vmata@colon.com,2021-04-23,http://www.hobbs.com/\n"
        );

        let records = parse_records(&text, "customer.csv", ID_COLUMN).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key(), "DD37Cf93aecA6Dc");
        assert_eq!(records[0].company.as_deref(), Some("Rasmussen Group"));
        assert_eq!(records[0].phone_2.as_deref(), Some("397.884.0519x718"));
        assert_eq!(records[1].first_name.as_deref(), Some("Preston"));
        assert_eq!(records[1].website.as_deref(), Some("http://www.hobbs.com/"));
    }

    #[test]
    fn test_columns_matched_by_name() {
        let text = "Email,Customer Id,Website,First Name\n\
                    ann@example.com,1,http://ann.example,Ann\n";

        let records = parse_records(text, "reordered.csv", ID_COLUMN).unwrap();

        assert_eq!(
            records,
            vec![Record::new("1")
                .with_first_name("Ann")
                .with_email("ann@example.com")
                .with_website("http://ann.example")]
        );
    }

    #[test]
    fn test_short_row_leaves_fields_empty() {
        let text = format!("{HEADER}\n7,Greta,Garbo\n");

        let records = parse_records(&text, "short.csv", ID_COLUMN).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].last_name.as_deref(), Some("Garbo"));
        assert_eq!(records[0].company, None);
        assert_eq!(records[0].website, None);
    }

    #[test]
    fn test_unknown_columns_ignored() {
        let text = "Customer Id,Loyalty Tier,First Name\n1,gold,Ann\n";

        let records = parse_records(text, "extra.csv", ID_COLUMN).unwrap();

        assert_eq!(records, vec![Record::new("1").with_first_name("Ann")]);
    }

    #[test]
    fn test_empty_identifier_parses_as_none() {
        let text = "Customer Id,First Name\n,Nameless\n";

        let records = parse_records(text, "noid.csv", ID_COLUMN).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].customer_id, None);
        assert!(!records[0].has_identifier());
    }

    #[test]
    fn test_quoted_fields_with_delimiters_and_newlines() {
        let text = "Customer Id,Company,City\n\
                    1,\"Smith, Jones and \"\"Partners\"\"\",\"New\nYork\"\n";

        let records = parse_records(text, "quoted.csv", ID_COLUMN).unwrap();

        assert_eq!(
            records[0].company.as_deref(),
            Some("Smith, Jones and \"Partners\"")
        );
        assert_eq!(records[0].city.as_deref(), Some("New\nYork"));
    }

    #[test]
    fn test_blank_input_yields_nothing() {
        assert!(parse_records("", "empty.csv", ID_COLUMN).unwrap().is_empty());
        assert!(parse_records("  \n\n", "empty.csv", ID_COLUMN).unwrap().is_empty());
    }

    #[test]
    fn test_header_only_yields_nothing() {
        let records = parse_records(&format!("{HEADER}\n"), "header.csv", ID_COLUMN).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_unterminated_quote_is_parse_error() {
        let text = "Customer Id,Company\n1,\"Acme\n2,Globex\n";

        let err = parse_records(text, "broken.csv", ID_COLUMN).unwrap_err();

        match err {
            MergeError::Parse { origin, reason } => {
                assert_eq!(origin, "broken.csv");
                assert!(reason.contains("line 2"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_id_column_is_parse_error() {
        let text = "First Name,Last Name\nAnn,Lee\n";

        let err = parse_records(text, "noid.csv", ID_COLUMN).unwrap_err();

        assert!(matches!(err, MergeError::Parse { .. }));
        assert!(err.to_string().contains("Customer Id"));
    }

    #[test]
    fn test_custom_id_column() {
        let text = "Client Ref,Customer Id,First Name\nC-9,legacy-1,Ann\n";

        let records = parse_records(text, "custom.csv", "Client Ref").unwrap();

        assert_eq!(records, vec![Record::new("C-9").with_first_name("Ann")]);
    }

    #[test]
    fn test_unterminated_quote_line_detection() {
        assert_eq!(unterminated_quote_line("a,b\n1,2\n"), None);
        assert_eq!(unterminated_quote_line("a,\"b\"\"c\"\n"), None);
        assert_eq!(unterminated_quote_line("a,b\n1,2\n3,\"x\n"), Some(3));
        assert_eq!(unterminated_quote_line("a,\"\"\n"), None);
        // Bare quotes mid-field are literals
        assert_eq!(unterminated_quote_line("a,27\" wide\nb,5\" tall\n"), None);
        // A literal quote earlier does not hide a later open field
        assert_eq!(unterminated_quote_line("1,27\" A\n2,\"open\n"), Some(2));
    }

    #[test]
    fn test_bare_quote_inside_unquoted_field_is_literal() {
        let text = "Customer Id,Company\n1,Acme 27\" Displays\n";

        let records = parse_records(text, "inches.csv", ID_COLUMN).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company.as_deref(), Some("Acme 27\" Displays"));
    }
}
