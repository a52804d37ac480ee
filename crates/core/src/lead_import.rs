//! CSV lead import pipeline.
//!
//! Turns an uploaded CSV file into lead insertions and an aggregate
//! success/error tally. The parsing half is pure; the insertion half talks
//! to the Record Store only through the [`LeadSink`] trait.
//!
//! Processing rules:
//!
//! - Lines are split on `\n`; blank or whitespace-only lines are dropped
//!   before the header is picked, so a leading blank line is never a header.
//! - Cells are split on every comma. Quoted fields are not parsed: double
//!   quote characters are stripped, and a comma inside quotes still splits.
//!   This matches files exported by earlier versions of the product.
//! - Headers map to [`LeadField`]s through a fixed Polish/English synonym
//!   table. Unknown headers are ignored.
//! - Empty cells leave the field absent. A row without a name is an error
//!   and never reaches the sink.
//! - Rows are inserted one at a time. A failed row is counted and the batch
//!   continues; nothing short of an empty or undecodable file stops it.

use async_trait::async_trait;
use serde::Serialize;

use crate::locale::Locale;
use crate::status::{CallStatus, LeadStatus};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Downloadable import template with three sample rows.
pub const TEMPLATE_CSV: &str = "\
Nazwa,Telefon,Email,Kategoria,Lokalizacja,Osoba Kontaktowa,Notatki
Salon Fryzjerski \"Dorota\",+48 76 835 67 67,dorota@example.com,Salony Piękności,Pl. Głogów,Dorota Rolla,
Your Laser,+48 690 053 665,yourlaser@example.com,Salony Piękności,Pl. Głogów,,
Makijaż Permanentny Marta,+48 661 111 247,marta@example.com,Salony Piękności,Pl. Głogów,Marta Kazimierska,
";

/// File name offered for the template download.
pub const TEMPLATE_FILENAME: &str = "szablon_leadow.csv";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Field mapping
// ---------------------------------------------------------------------------

/// Canonical lead column a CSV header can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Phone,
    Email,
    Category,
    Location,
    OwnerEmail,
    ContactPerson,
    Notes,
}

impl LeadField {
    /// Map a cleaned header cell to its field, ignoring case.
    pub fn from_header(header: &str) -> Option<Self> {
        match header.to_lowercase().as_str() {
            "nazwa" | "name" => Some(Self::Name),
            "telefon" | "phone" => Some(Self::Phone),
            "email" | "e-mail" => Some(Self::Email),
            "kategoria" | "category" => Some(Self::Category),
            "lokalizacja" | "location" | "miasto" => Some(Self::Location),
            "wlasciciel" | "owner" | "owner_email" => Some(Self::OwnerEmail),
            "osoba kontaktowa" | "contact_person" => Some(Self::ContactPerson),
            "notatki" | "notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

/// Trim a raw cell, then strip every double quote from it.
///
/// Whitespace inside the quotes survives: `"  Acme  "` keeps its padding.
pub fn clean_cell(raw: &str) -> String {
    raw.trim().replace('"', "")
}

/// Split a line on commas and clean each cell.
pub fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(clean_cell).collect()
}

/// Positional mapping from CSV columns to lead fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    columns: Vec<Option<LeadField>>,
}

impl HeaderMap {
    pub fn parse(header_line: &str) -> Self {
        let columns = split_cells(header_line)
            .iter()
            .map(|h| LeadField::from_header(h))
            .collect();
        Self { columns }
    }

    /// Recognized fields in column order.
    pub fn fields(&self) -> impl Iterator<Item = LeadField> + '_ {
        self.columns.iter().flatten().copied()
    }

    pub fn has_name(&self) -> bool {
        self.fields().any(|f| f == LeadField::Name)
    }

    /// Build a draft from one data line.
    ///
    /// Missing trailing cells count as empty and surplus cells are ignored.
    /// When two columns map to the same field the right-most non-empty one wins.
    pub fn map_row(&self, line: &str) -> LeadDraft {
        let mut draft = LeadDraft::default();
        for (field, value) in self.columns.iter().zip(split_cells(line)) {
            if let Some(field) = field {
                if !value.is_empty() {
                    draft.set(*field, value);
                }
            }
        }
        draft
    }
}

// ---------------------------------------------------------------------------
// Row records
// ---------------------------------------------------------------------------

/// Fields collected from one CSV row before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub owner_email: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
}

impl LeadDraft {
    pub fn set(&mut self, field: LeadField, value: String) {
        let slot = match field {
            LeadField::Name => &mut self.name,
            LeadField::Phone => &mut self.phone,
            LeadField::Email => &mut self.email,
            LeadField::Category => &mut self.category,
            LeadField::Location => &mut self.location,
            LeadField::OwnerEmail => &mut self.owner_email,
            LeadField::ContactPerson => &mut self.contact_person,
            LeadField::Notes => &mut self.notes,
        };
        *slot = Some(value);
    }

    /// Validate the draft into an insertable lead.
    pub fn into_lead(self) -> Result<ImportedLead, RowError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or(RowError::MissingName)?;

        Ok(ImportedLead {
            name,
            phone: self.phone,
            email: self.email,
            category: self.category,
            location: self.location,
            owner_email: self.owner_email,
            contact_person: self.contact_person,
            notes: self.notes,
            status: LeadStatus::New,
            call_status: CallStatus::Pending,
        })
    }
}

/// A validated lead ready for insertion. `name` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedLead {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub owner_email: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
    pub status: LeadStatus,
    pub call_status: CallStatus,
}

// ---------------------------------------------------------------------------
// Sink seam
// ---------------------------------------------------------------------------

/// Failure reported by a [`LeadSink`] for a single insertion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    /// The Record Store refused the row.
    #[error("record store rejected lead: {0}")]
    Rejected(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// Destination for imported leads.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn insert_lead(&self, lead: &ImportedLead) -> Result<(), SinkError>;
}

/// Why a single data row was counted as an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("row has no name")]
    MissingName,

    #[error(transparent)]
    Sink(#[from] SinkError),
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A data row paired with its 1-based line number in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRow {
    pub line: usize,
    pub result: Result<ImportedLead, RowError>,
}

#[derive(Debug, Clone)]
pub struct ParsedImport {
    pub headers: HeaderMap,
    pub rows: Vec<PreparedRow>,
}

/// Parse file text into validated rows. Returns `None` if the file has no
/// non-blank lines.
pub fn parse_import(text: &str) -> Option<ParsedImport> {
    let mut lines = text
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line));

    let (_, header_line) = lines.next()?;
    let headers = HeaderMap::parse(header_line);

    let rows = lines
        .map(|(line, raw)| PreparedRow {
            line,
            result: headers.map_row(raw).into_lead(),
        })
        .collect();

    Some(ParsedImport { headers, rows })
}

// ---------------------------------------------------------------------------
// Batch execution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Every data line was classified as a success or an error.
    Completed,
    /// The file had no non-blank lines.
    Empty,
    /// The file could not be decoded as UTF-8.
    Unreadable,
}

/// Aggregate result of one import batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub success: usize,
    pub errors: usize,
    pub message: String,
    pub outcome: ImportOutcome,
}

impl ImportSummary {
    fn empty(locale: Locale) -> Self {
        Self {
            success: 0,
            errors: 0,
            message: locale.empty_file().to_string(),
            outcome: ImportOutcome::Empty,
        }
    }

    fn unreadable(locale: Locale) -> Self {
        Self {
            success: 0,
            errors: 0,
            message: locale.unreadable_file().to_string(),
            outcome: ImportOutcome::Unreadable,
        }
    }
}

/// Import leads from decoded file text.
///
/// Each data row is inserted sequentially; the next row starts only after
/// the previous insertion resolved. Never fails as a whole.
pub async fn import_leads<S: LeadSink + ?Sized>(
    text: &str,
    sink: &S,
    locale: Locale,
) -> ImportSummary {
    let Some(parsed) = parse_import(text) else {
        tracing::info!("Lead import file is empty");
        return ImportSummary::empty(locale);
    };

    if !parsed.headers.has_name() {
        tracing::warn!("Lead import header has no name column, every row will be rejected");
    }

    let mut success = 0;
    let mut errors = 0;

    for row in parsed.rows {
        let result = match row.result {
            Ok(lead) => sink.insert_lead(&lead).await.map_err(RowError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => success += 1,
            Err(err) => {
                errors += 1;
                tracing::warn!(line = row.line, error = %err, "Lead import row rejected");
            }
        }
    }

    tracing::info!(success, errors, "Lead import finished");

    ImportSummary {
        success,
        errors,
        message: locale.import_summary(success, errors),
        outcome: ImportOutcome::Completed,
    }
}

/// Import leads from raw uploaded bytes.
///
/// A leading UTF-8 byte-order mark is skipped. Bytes that are not valid
/// UTF-8 produce an [`ImportOutcome::Unreadable`] summary without touching
/// the sink.
pub async fn import_leads_from_bytes<S: LeadSink + ?Sized>(
    data: &[u8],
    sink: &S,
    locale: Locale,
) -> ImportSummary {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match std::str::from_utf8(data) {
        Ok(text) => import_leads(text, sink, locale).await,
        Err(e) => {
            tracing::error!(error = %e, "Lead import file is not valid UTF-8");
            ImportSummary::unreadable(locale)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;

    /// Sink that records every insertion and rejects configured names.
    #[derive(Default)]
    struct RecordingSink {
        inserted: Mutex<Vec<ImportedLead>>,
        reject: Vec<&'static str>,
    }

    impl RecordingSink {
        fn rejecting(names: &[&'static str]) -> Self {
            Self {
                inserted: Mutex::new(Vec::new()),
                reject: names.to_vec(),
            }
        }

        fn names(&self) -> Vec<String> {
            self.inserted
                .lock()
                .unwrap()
                .iter()
                .map(|l| l.name.clone())
                .collect()
        }

        fn calls(&self) -> usize {
            self.inserted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LeadSink for RecordingSink {
        async fn insert_lead(&self, lead: &ImportedLead) -> Result<(), SinkError> {
            if self.reject.iter().any(|name| *name == lead.name) {
                return Err(SinkError::Rejected("duplicate".into()));
            }
            self.inserted.lock().unwrap().push(lead.clone());
            Ok(())
        }
    }

    async fn run(text: &str) -> (ImportSummary, RecordingSink) {
        let sink = RecordingSink::default();
        let summary = import_leads(text, &sink, Locale::Pl).await;
        (summary, sink)
    }

    // -- batch scenarios -----------------------------------------------------

    #[tokio::test]
    async fn blank_name_row_is_rejected_and_others_import() {
        let (summary, sink) = run("Nazwa,Telefon\nAcme,123\n,456\nBeta,789").await;

        assert_eq!(summary.success, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.outcome, ImportOutcome::Completed);
        assert_eq!(summary.message, "Zaimportowano 2 leadów. Błędów: 1");
        assert_eq!(sink.names(), vec!["Acme", "Beta"]);

        let inserted = sink.inserted.lock().unwrap();
        assert_eq!(inserted[0].phone.as_deref(), Some("123"));
        assert_eq!(inserted[1].phone.as_deref(), Some("789"));
    }

    #[tokio::test]
    async fn empty_input_short_circuits() {
        let (summary, sink) = run("").await;

        assert_eq!(summary.success, 0);
        assert_eq!(summary.errors, 0);
        assert_eq!(summary.outcome, ImportOutcome::Empty);
        assert_eq!(summary.message, "Plik jest pusty");
        assert_eq!(sink.calls(), 0);
    }

    #[tokio::test]
    async fn whitespace_only_input_is_empty() {
        let (summary, sink) = run("  \n\t\r\n\n").await;
        assert_eq!(summary.outcome, ImportOutcome::Empty);
        assert_eq!(sink.calls(), 0);
    }

    #[tokio::test]
    async fn header_only_file_completes_with_zero_counts() {
        let (summary, sink) = run("Nazwa,Telefon\n").await;
        assert_eq!(summary.outcome, ImportOutcome::Completed);
        assert_eq!((summary.success, summary.errors), (0, 0));
        assert_eq!(sink.calls(), 0);
    }

    #[tokio::test]
    async fn leading_blank_lines_do_not_become_the_header() {
        let (summary, sink) = run("\n   \nName,Phone\nAcme,555").await;
        assert_eq!((summary.success, summary.errors), (1, 0));
        assert_eq!(sink.names(), vec!["Acme"]);
    }

    #[tokio::test]
    async fn sink_rejection_is_counted_and_batch_continues() {
        let sink = RecordingSink::rejecting(&["Beta"]);
        let summary = import_leads("name\nAcme\nBeta\nGamma", &sink, Locale::En).await;

        assert_eq!(summary.success, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.message, "Imported 2 leads. Errors: 1");
        assert_eq!(sink.names(), vec!["Acme", "Gamma"]);
    }

    #[tokio::test]
    async fn every_data_line_is_classified_exactly_once() {
        let inputs = [
            "Nazwa\nA\nB\nC",
            "Nazwa,Email\n,x@y.z\nA,\n\n,\nB,b@c.d",
            "Foo,Bar\n1,2\n3,4",
            "Telefon,Nazwa\n1\n2,B\n3,,C",
        ];
        for input in inputs {
            let data_lines = input
                .split('\n')
                .filter(|l| !l.trim().is_empty())
                .count()
                - 1;
            let (summary, _) = run(input).await;
            assert_eq!(summary.success + summary.errors, data_lines, "input: {input:?}");
        }
    }

    #[tokio::test]
    async fn nameless_rows_never_reach_the_sink() {
        let (summary, sink) = run("Telefon,Email\n123,a@b.c\n456,d@e.f").await;
        assert_eq!((summary.success, summary.errors), (0, 2));
        assert_eq!(sink.calls(), 0);
    }

    #[tokio::test]
    async fn imported_leads_start_new_and_pending() {
        let (_, sink) = run("Nazwa\nAcme").await;
        let inserted = sink.inserted.lock().unwrap();
        assert_eq!(inserted[0].status, LeadStatus::New);
        assert_eq!(inserted[0].call_status, CallStatus::Pending);
    }

    #[tokio::test]
    async fn crlf_line_endings_are_tolerated() {
        let (summary, sink) = run("Nazwa,Telefon\r\nAcme,123\r\n").await;
        assert_eq!(summary.success, 1);
        let inserted = sink.inserted.lock().unwrap();
        assert_eq!(inserted[0].phone.as_deref(), Some("123"));
    }

    #[tokio::test]
    async fn template_imports_cleanly() {
        let (summary, sink) = run(TEMPLATE_CSV).await;
        assert_eq!((summary.success, summary.errors), (3, 0));

        let inserted = sink.inserted.lock().unwrap();
        assert_eq!(inserted[0].name, "Salon Fryzjerski Dorota");
        assert_eq!(inserted[0].contact_person.as_deref(), Some("Dorota Rolla"));
        assert_eq!(inserted[0].notes, None);
        assert_eq!(inserted[1].contact_person, None);
        assert_eq!(inserted[2].location.as_deref(), Some("Pl. Głogów"));
    }

    // -- bytes entry point ---------------------------------------------------

    #[tokio::test]
    async fn byte_order_mark_is_skipped() {
        let sink = RecordingSink::default();
        let summary =
            import_leads_from_bytes(b"\xEF\xBB\xBFNazwa\nAcme", &sink, Locale::Pl).await;
        assert_eq!(summary.success, 1);
        assert_eq!(sink.names(), vec!["Acme"]);
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_file_level_error() {
        let sink = RecordingSink::default();
        let summary = import_leads_from_bytes(&[0x4e, 0xff, 0xfe, 0x0a], &sink, Locale::Pl).await;

        assert_eq!(summary.outcome, ImportOutcome::Unreadable);
        assert_eq!(summary.message, "Błąd podczas czytania pliku");
        assert_eq!((summary.success, summary.errors), (0, 0));
        assert_eq!(sink.calls(), 0);
    }

    // -- header mapping ------------------------------------------------------

    #[test]
    fn header_matching_ignores_case_whitespace_and_quotes() {
        for header in [" Nazwa ", "nazwa", "\"NAZWA\"", " \"name\" "] {
            assert_eq!(
                LeadField::from_header(&clean_cell(header)),
                Some(LeadField::Name),
                "header: {header:?}"
            );
        }
    }

    #[test]
    fn padding_inside_quotes_is_kept() {
        assert_eq!(clean_cell("\"  Acme  \""), "  Acme  ");
        assert_eq!(LeadField::from_header(&clean_cell("\" name \"")), None);
    }

    #[tokio::test]
    async fn quoted_blank_name_still_imports() {
        let (summary, sink) = run("Nazwa\n\"  \"\n\"  Acme  \"").await;

        assert_eq!((summary.success, summary.errors), (2, 0));
        assert_eq!(sink.names(), vec!["  ", "  Acme  "]);
    }

    #[test]
    fn synonym_table_covers_both_languages() {
        let cases = [
            ("telefon", LeadField::Phone),
            ("e-mail", LeadField::Email),
            ("kategoria", LeadField::Category),
            ("miasto", LeadField::Location),
            ("lokalizacja", LeadField::Location),
            ("wlasciciel", LeadField::OwnerEmail),
            ("owner", LeadField::OwnerEmail),
            ("Osoba Kontaktowa", LeadField::ContactPerson),
            ("contact_person", LeadField::ContactPerson),
            ("notatki", LeadField::Notes),
        ];
        for (header, field) in cases {
            assert_eq!(LeadField::from_header(header), Some(field), "header: {header}");
        }
        assert_eq!(LeadField::from_header("website"), None);
    }

    #[test]
    fn template_header_is_fully_recognized() {
        let header_line = TEMPLATE_CSV.lines().next().expect("template has a header");
        let headers = HeaderMap::parse(header_line);
        assert_eq!(headers.fields().count(), 7);
        assert!(headers.has_name());
    }

    #[test]
    fn unknown_columns_do_not_shift_known_ones() {
        let headers = HeaderMap::parse("Nazwa,Website,Telefon");
        let draft = headers.map_row("Acme,acme.pl,123");
        assert_eq!(draft.name.as_deref(), Some("Acme"));
        assert_eq!(draft.phone.as_deref(), Some("123"));
    }

    #[test]
    fn empty_cells_leave_fields_absent() {
        let headers = HeaderMap::parse("Nazwa,Email,Notatki");
        let draft = headers.map_row("Acme,  ,\"\"");
        assert_eq!(draft.email, None);
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let headers = HeaderMap::parse("Nazwa,Telefon,Email");
        assert_eq!(headers.map_row("Acme").phone, None);

        let draft = headers.map_row("Acme,1,a@b.c,extra,cells");
        assert_eq!(draft.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn rightmost_non_empty_duplicate_column_wins() {
        let headers = HeaderMap::parse("Name,Nazwa");
        assert_eq!(headers.map_row("A,B").name.as_deref(), Some("B"));
        assert_eq!(headers.map_row("A,").name.as_deref(), Some("A"));
    }

    #[test]
    fn quoted_commas_still_split() {
        let headers = HeaderMap::parse("Nazwa,Telefon");
        let draft = headers.map_row("\"Acme, Inc\",123");
        assert_eq!(draft.name.as_deref(), Some("Acme"));
        assert_eq!(draft.phone.as_deref(), Some("Inc"));
    }

    #[test]
    fn draft_without_name_is_rejected() {
        let draft = LeadDraft {
            phone: Some("123".into()),
            ..Default::default()
        };
        assert_matches!(draft.into_lead(), Err(RowError::MissingName));
    }

    #[test]
    fn parse_import_reports_source_line_numbers() {
        let parsed = parse_import("\nNazwa\n\nAcme\n,\n").expect("non-empty file");
        let lines: Vec<usize> = parsed.rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![4, 5]);
        assert_matches!(parsed.rows[1].result, Err(RowError::MissingName));
    }
}
