//! Field parsing for a single type record.
//!
//! A record is a block of `key: value` lines. Only a handful of keys matter:
//!
//! | key | effect |
//! |---|---|
//! | `type id` | starts a fresh record named by the first token of the value |
//! | `bundle` | adds the claiming app; CoreTypes hardware records are dropped |
//! | `reference URL` | the type's documentation link, colons and all |
//! | `conforms to` | parent UTIs |
//! | `tags` | file extensions (`.` prefix) and MIME types (contain `/`) |
//!
//! Every other key is ignored.

use super::noise::NoiseFilter;
use super::record::{PLACEHOLDER_UTI, UtiRecord};

const TYPE_ID: &str = "type id";
const BUNDLE: &str = "bundle";
const REFERENCE_URL: &str = "reference URL";
const CONFORMS_TO: &str = "conforms to";
const TAGS: &str = "tags";

/// The bundle that declares the system's built-in types, including hardware.
pub const CORE_TYPES_BUNDLE: &str = "CoreTypes";

const LIST_SEPARATOR: &str = ", ";

enum State {
    /// No `type id` seen yet.
    Pending,
    Building(UtiRecord),
    /// Dropped as hardware noise; later fields are ignored until the next
    /// `type id`.
    Discarded,
}

impl State {
    /// Returns the record being built, creating a placeholder shell if no
    /// `type id` has been seen. Returns `None` once the record was discarded.
    fn record_mut(&mut self) -> Option<&mut UtiRecord> {
        if matches!(self, State::Pending) {
            tracing::debug!("record field before its type id, using a placeholder");
            *self = State::Building(UtiRecord::new(PLACEHOLDER_UTI));
        }

        match self {
            State::Building(record) => Some(record),
            _ => None,
        }
    }
}

/// Splits a line on its first colon into a trimmed key and value.
///
/// The value keeps any further colons, so URLs survive intact.
fn split_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Returns the app name from a `bundle` value such as `TextEdit (0x1a2b)`.
fn app_name(value: &str) -> &str {
    value
        .split_once(" (")
        .map_or(value, |(name, _)| name)
        .trim()
}

fn list_entries(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Parses one raw record into a [`UtiRecord`].
///
/// # Returns
///
/// `None` if the record has fewer than two lines, or if it is a CoreTypes
/// record for a hardware identifier.
///
/// # Examples
///
/// ```
/// use uti::registry::{NoiseFilter, parse_record};
///
/// let raw = "type id: com.example.foo (0x1)\ntags: .foo, text/foo, junk\n";
/// let record = parse_record(raw, &NoiseFilter::default()).unwrap();
///
/// assert_eq!(record.uti, "com.example.foo");
/// assert!(record.extensions.contains(".foo"));
/// assert!(record.mime_types.contains("text/foo"));
/// ```
pub fn parse_record(raw: &str, filter: &NoiseFilter) -> Option<UtiRecord> {
    let lines: Vec<&str> = raw.split('\n').collect();
    if lines.len() < 2 {
        tracing::debug!("skipping record with fewer than two lines");
        return None;
    }

    let mut state = State::Pending;

    for (key, value) in lines.into_iter().filter_map(split_field) {
        match key {
            TYPE_ID => {
                let uti = value.split_whitespace().next().unwrap_or(PLACEHOLDER_UTI);
                state = State::Building(UtiRecord::new(uti));
            }
            BUNDLE => {
                let Some(record) = state.record_mut() else {
                    continue;
                };
                let name = app_name(value);
                record.add_app(name);

                if name == CORE_TYPES_BUNDLE && filter.is_hardware_noise(&record.uti) {
                    tracing::debug!(uti = %record.uti, "dropping hardware type");
                    state = State::Discarded;
                }
            }
            REFERENCE_URL => {
                if let Some(record) = state.record_mut() {
                    record.reference = Some(value.to_string());
                }
            }
            CONFORMS_TO => {
                if let Some(record) = state.record_mut() {
                    record.parents.extend(list_entries(value).map(str::to_string));
                }
            }
            TAGS => {
                let Some(record) = state.record_mut() else {
                    continue;
                };
                for tag in list_entries(value) {
                    if tag.starts_with('.') {
                        record.extensions.insert(tag.to_string());
                    } else if tag.contains('/') {
                        record.mime_types.insert(tag.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    match state {
        State::Building(record) => Some(record),
        State::Pending | State::Discarded => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<UtiRecord> {
        parse_record(raw, &NoiseFilter::default())
    }

    #[test]
    fn test_full_record() {
        let record = parse(
            "type id: com.example.foo (0x1)\n\
             bundle: TestApp (0x2)\n\
             conforms to: public.data\n\
             tags: .foo, text/foo\n",
        )
        .unwrap();

        assert_eq!(record.uti, "com.example.foo");
        assert_eq!(record.app_names().collect::<Vec<_>>(), vec!["TestApp"]);
        assert_eq!(record.parents, vec!["public.data"]);
        assert_eq!(record.extensions.iter().collect::<Vec<_>>(), vec![".foo"]);
        assert_eq!(record.mime_types.iter().collect::<Vec<_>>(), vec!["text/foo"]);
        assert_eq!(record.reference, None);
    }

    #[test]
    fn test_uti_is_first_token() {
        let record = parse("type id:    public.plain-text   (0x1a4)\n").unwrap();

        assert_eq!(record.uti, "public.plain-text");
    }

    #[test]
    fn test_single_line_record_is_skipped() {
        assert_eq!(parse("type id: public.data (0x1)"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_reference_url_keeps_colons() {
        let record = parse(
            "type id: com.example.foo (0x1)\n\
             reference URL: https://example.com:8080/x\n",
        )
        .unwrap();

        assert_eq!(record.reference.as_deref(), Some("https://example.com:8080/x"));
    }

    #[test]
    fn test_unknown_tags_are_dropped() {
        let record = parse("type id: com.example.foo (0x1)\ntags: .foo, FOO , text/foo, 'TEXT'\n")
            .unwrap();

        assert_eq!(record.extensions.len(), 1);
        assert_eq!(record.mime_types.len(), 1);
        assert!(!record.extensions.contains("FOO"));
        assert!(!record.mime_types.contains("'TEXT'"));
    }

    #[test]
    fn test_multiple_parents() {
        let record = parse(
            "type id: public.plain-text (0x1)\n\
             conforms to: public.text, public.data\n",
        )
        .unwrap();

        assert_eq!(record.parents, vec!["public.text", "public.data"]);
    }

    #[test]
    fn test_bundle_name_without_suffix() {
        let record = parse("type id: public.data (0x1)\nbundle: Preview\n").unwrap();

        assert_eq!(record.app_names().collect::<Vec<_>>(), vec!["Preview"]);
    }

    #[test]
    fn test_fields_before_type_id_create_placeholder() {
        let record = parse("bundle: TestApp (0x2)\ntags: .foo\n").unwrap();

        assert_eq!(record.uti, PLACEHOLDER_UTI);
        assert!(record.has_app("TestApp"));
        assert!(record.extensions.contains(".foo"));
    }

    #[test]
    fn test_new_type_id_discards_uncommitted_record() {
        let record = parse(
            "type id: com.example.first (0x1)\n\
             tags: .first\n\
             type id: com.example.second (0x2)\n\
             tags: .second\n",
        )
        .unwrap();

        assert_eq!(record.uti, "com.example.second");
        assert!(!record.extensions.contains(".first"));
    }

    #[test]
    fn test_core_types_hardware_is_discarded() {
        let raw = "type id: com.apple.macbook-pro (0x1)\nbundle: CoreTypes (0x3)\ntags: .nope\n";

        assert_eq!(parse(raw), None);
        // Running the filter again changes nothing.
        assert_eq!(parse(raw), None);
    }

    #[test]
    fn test_core_types_content_type_is_kept() {
        let record = parse("type id: public.plain-text (0x1)\nbundle: CoreTypes (0x3)\n").unwrap();

        assert!(record.has_app(CORE_TYPES_BUNDLE));
    }

    #[test]
    fn test_hardware_claimed_by_other_app_is_kept() {
        let record = parse("type id: com.apple.iphone (0x1)\nbundle: Finder (0x3)\n").unwrap();

        assert_eq!(record.uti, "com.apple.iphone");
    }

    #[test]
    fn test_lines_without_colon_are_ignored() {
        let record = parse("type id: public.data (0x1)\njust some text\n\n").unwrap();

        assert_eq!(record.uti, "public.data");
        assert!(record.apps.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let record = parse(
            "type id: public.data (0x1)\n\
             localizedDescription: \"en\" = \"data\"\n\
             flags: active  apple-internal\n",
        )
        .unwrap();

        assert_eq!(record, UtiRecord::new("public.data"));
    }
}
