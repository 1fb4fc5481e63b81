//! Record splitting.
//!
//! Breaks a raw `lsregister -dump` capture into individual records. Records are
//! separated by a line of dashes; only blocks whose first key is `type id` are
//! kept. Preamble and other block kinds (bundles, claims, handlers) are skipped
//! without ever searching inside them for a record marker.

use crate::lexer::Scanner;

/// The line of dashes separating records in the dump.
pub const RECORD_DELIMITER: &str =
    "--------------------------------------------------------------------------------";

/// The key every type record starts with.
pub const RECORD_MARKER: &str = "type id";

const KEY_SEPARATOR: &str = ":";

/// A lazy, single-pass iterator over the type records of a dump.
///
/// # Examples
///
/// ```
/// use uti::registry::{RecordSplitter, RECORD_DELIMITER};
///
/// let dump = format!(
///     "Status: Database is seeded.\n{d}\ntype id: public.data (0x1)\n{d}\n",
///     d = RECORD_DELIMITER
/// );
/// let records: Vec<_> = RecordSplitter::new(&dump).collect();
/// assert_eq!(records, vec!["type id: public.data (0x1)\n"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecordSplitter<'a> {
    scanner: Scanner<'a>,
}

impl<'a> RecordSplitter<'a> {
    pub fn new(dump: &'a str) -> Self {
        Self {
            scanner: Scanner::new(dump),
        }
    }

    /// Moves the cursor past the next delimiter line, or to the end of input.
    fn skip_past_delimiter(&mut self) {
        self.scanner.scan_up_to(RECORD_DELIMITER);
        self.scanner.skip_n(RECORD_DELIMITER.len());
    }
}

impl<'a> Iterator for RecordSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.scanner.at_end() {
            let start = self.scanner.cursor();
            let key = self.scanner.scan_up_to(KEY_SEPARATOR);

            if key.map(str::trim) != Some(RECORD_MARKER) {
                tracing::trace!("skipping block that does not start with a type id");
                self.skip_past_delimiter();
                continue;
            }

            self.scanner.restore(start);
            let record = self.scanner.scan_up_to(RECORD_DELIMITER);
            self.scanner.skip_n(RECORD_DELIMITER.len());

            if let Some(record) = record {
                return Some(record);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(blocks: &[&str]) -> String {
        let mut out = String::new();
        for block in blocks {
            out.push_str(block);
            out.push_str(RECORD_DELIMITER);
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_single_record() {
        let text = dump(&["type id: com.example.foo (0x1)\nbundle: TestApp (0x2)\n"]);
        let records: Vec<_> = RecordSplitter::new(&text).collect();

        assert_eq!(
            records,
            vec!["type id: com.example.foo (0x1)\nbundle: TestApp (0x2)\n"]
        );
    }

    #[test]
    fn test_preamble_is_skipped() {
        let text = dump(&[
            "Checking data integrity......done.\nStatus: Database is seeded.\n",
            "type id: public.data (0x1)\n",
        ]);
        let records: Vec<_> = RecordSplitter::new(&text).collect();

        assert_eq!(records, vec!["type id: public.data (0x1)\n"]);
    }

    #[test]
    fn test_other_block_kinds_are_skipped() {
        let text = dump(&[
            "bundle id: 42\npath: /Applications/TextEdit.app\n",
            "type id: public.plain-text (0x2)\n",
            "claim id: 7\nroles: Viewer\n",
            "type id: public.rtf (0x3)\n",
        ]);
        let records: Vec<_> = RecordSplitter::new(&text).collect();

        assert_eq!(records.len(), 2);
        assert!(records[0].starts_with("type id: public.plain-text"));
        assert!(records[1].starts_with("type id: public.rtf"));
    }

    #[test]
    fn test_marker_with_surrounding_whitespace() {
        let text = dump(&["  type id  : public.data (0x1)\n"]);
        let records: Vec<_> = RecordSplitter::new(&text).collect();

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_final_record_without_delimiter() {
        let text = format!(
            "{}type id: public.data (0x1)\n",
            dump(&["type id: public.item (0x0)\n"])
        );
        let records: Vec<_> = RecordSplitter::new(&text).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1], "type id: public.data (0x1)\n");
    }

    #[test]
    fn test_input_without_separator() {
        let records: Vec<_> = RecordSplitter::new("nothing to see").collect();

        assert!(records.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(RecordSplitter::new("").next(), None);
    }

    #[test]
    fn test_keyless_block_swallows_next_record() {
        // The first separator found belongs to the following record, so the
        // skip jumps past it.
        let text = dump(&[
            "no key here\n",
            "type id: public.data (0x1)\n",
            "type id: public.item (0x2)\n",
        ]);
        let records: Vec<_> = RecordSplitter::new(&text).collect();

        assert_eq!(records, vec!["type id: public.item (0x2)\n"]);
    }
}
