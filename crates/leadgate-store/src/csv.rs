use leadgate_core::domain::RawSubmission;
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

const DELIMITER: char = ',';
const ENCLOSURE: char = '"';
const ESCAPE: char = '\\';
const BOM: char = '\u{feff}';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    #[error("missing header row")]
    MissingHeader,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedCsv {
    pub rows: Vec<RawSubmission>,
    /// Data rows dropped because their field count differs from the header.
    pub skipped: usize,
}

/// Reads a header-first CSV export into raw submission rows.
///
/// Quoted fields may contain delimiters and line breaks; `""` inside quotes is
/// a literal quote. A backslash inside quotes protects the next character and
/// both are kept verbatim.
pub fn parse_csv(data: &str) -> Result<ParsedCsv, CsvError> {
    let data = data.strip_prefix(BOM).unwrap_or(data);
    let mut records = CsvRecords::new(data);

    let header = match records.next() {
        Some(header) if header.iter().any(|name| !name.is_empty()) => header,
        _ => return Err(CsvError::MissingHeader),
    };
    let columns = ColumnIndex::new(&header);

    let mut parsed = ParsedCsv::default();
    for record in records {
        if is_blank(&record) {
            continue;
        }
        if record.len() != header.len() {
            parsed.skipped += 1;
            continue;
        }
        parsed.rows.push(columns.raw_submission(record));
    }

    Ok(parsed)
}

fn is_blank(record: &[String]) -> bool {
    record.len() == 1 && record[0].is_empty()
}

struct ColumnIndex {
    by_name: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(header: &[String]) -> Self {
        let mut by_name = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            // Later columns win when a name repeats.
            by_name.insert(name.clone(), idx);
        }
        Self { by_name }
    }

    fn raw_submission(&self, mut record: Vec<String>) -> RawSubmission {
        let mut take = |name: &str| {
            self.by_name
                .get(name)
                .map(|idx| std::mem::take(&mut record[*idx]))
        };
        RawSubmission {
            source_id: take("sourceId"),
            offer_id: take("offerId"),
            telephone: take("telephone"),
            created_at: take("createdAt"),
        }
    }
}

struct CsvRecords<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> CsvRecords<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            chars: data.chars().peekable(),
        }
    }

    fn quoted_field(&mut self, field: &mut String) {
        while let Some(ch) = self.chars.next() {
            match ch {
                ESCAPE => {
                    field.push(ch);
                    if let Some(next) = self.chars.next() {
                        field.push(next);
                    }
                }
                ENCLOSURE => {
                    if self.chars.peek() == Some(&ENCLOSURE) {
                        self.chars.next();
                        field.push(ENCLOSURE);
                    } else {
                        return;
                    }
                }
                _ => field.push(ch),
            }
        }
    }

    fn consume_line_break(&mut self, ch: char) -> bool {
        match ch {
            '\n' => true,
            '\r' => {
                if self.chars.peek() == Some(&'\n') {
                    self.chars.next();
                }
                true
            }
            _ => false,
        }
    }
}

impl Iterator for CsvRecords<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chars.peek()?;

        let mut record = Vec::new();
        let mut field = String::new();
        let mut at_field_start = true;

        while let Some(ch) = self.chars.next() {
            if at_field_start && ch == ENCLOSURE {
                at_field_start = false;
                self.quoted_field(&mut field);
                continue;
            }
            at_field_start = false;

            if ch == DELIMITER {
                record.push(std::mem::take(&mut field));
                at_field_start = true;
                continue;
            }
            if self.consume_line_break(ch) {
                record.push(field);
                return Some(record);
            }
            field.push(ch);
        }

        record.push(field);
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_csv, CsvError, CsvRecords};

    fn records(data: &str) -> Vec<Vec<String>> {
        CsvRecords::new(data).collect()
    }

    #[test]
    fn splits_plain_fields_and_line_endings() {
        assert_eq!(
            records("a,b\r\n1,2\n3,4"),
            vec![vec!["a", "b"], vec!["1", "2"], vec!["3", "4"]]
        );
    }

    #[test]
    fn quoted_fields_keep_delimiters_and_newlines() {
        assert_eq!(
            records("\"a,b\",\"line\nbreak\",\"say \"\"hi\"\"\"\n"),
            vec![vec!["a,b", "line\nbreak", "say \"hi\""]]
        );
    }

    #[test]
    fn backslash_escape_is_kept_verbatim() {
        assert_eq!(
            records("\"a\\\"b\",c\n"),
            vec![vec!["a\\\"b", "c"]]
        );
    }

    #[test]
    fn text_after_closing_quote_is_appended() {
        assert_eq!(records("\"ab\"cd,e"), vec![vec!["abcd", "e"]]);
    }

    #[test]
    fn parse_maps_header_columns_in_any_order() {
        let data = "telephone,createdAt,offerId,sourceId,extra\n\
                    +351 912 345 678,2024-01-01T10:00:00Z,OFR-1,src-1,x\n";
        let parsed = parse_csv(data).expect("parse");
        assert_eq!(parsed.rows.len(), 1);
        let row = &parsed.rows[0];
        assert_eq!(row.source_id.as_deref(), Some("src-1"));
        assert_eq!(row.offer_id.as_deref(), Some("OFR-1"));
        assert_eq!(row.telephone.as_deref(), Some("+351 912 345 678"));
        assert_eq!(row.created_at.as_deref(), Some("2024-01-01T10:00:00Z"));
    }

    #[test]
    fn parse_skips_rows_with_wrong_width() {
        let data = "sourceId,offerId,telephone,createdAt\n\
                    src-1,OFR-1,111111,\n\
                    src-2,OFR-1\n\
                    src-3,OFR-1,111111,2024-01-01,extra\n\
                    \n\
                    src-4,OFR-2,222222,2024-01-02\n";
        let parsed = parse_csv(data).expect("parse");
        let ids: Vec<_> = parsed
            .rows
            .iter()
            .map(|row| row.source_id.clone().unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["src-1", "src-4"]);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn parse_leaves_missing_columns_absent() {
        let parsed = parse_csv("sourceId,telephone\nsrc-1,123456\n").expect("parse");
        assert!(parsed.rows[0].offer_id.is_none());
        assert!(parsed.rows[0].created_at.is_none());
    }

    #[test]
    fn parse_strips_byte_order_mark() {
        let parsed = parse_csv("\u{feff}sourceId,telephone\nsrc-1,123456\n").expect("parse");
        assert_eq!(parsed.rows[0].source_id.as_deref(), Some("src-1"));
    }

    #[test]
    fn parse_requires_header() {
        assert_eq!(parse_csv("").unwrap_err(), CsvError::MissingHeader);
        assert_eq!(parse_csv("\n\n").unwrap_err(), CsvError::MissingHeader);
    }
}
