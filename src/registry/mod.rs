//! Launch Services registry parsing.
//!
//! Turns the text printed by `lsregister -dump` into a consistent model of UTIs,
//! the apps that claim them, their extensions, MIME types and parents.
//!
//! The pipeline runs in one pass over a fully captured dump:
//!
//! 1. [`RecordSplitter`] cuts the dump into `type id` records.
//! 2. [`parse_record`] turns each record into a [`UtiRecord`], dropping
//!    hardware noise via [`NoiseFilter`].
//! 3. [`Aggregator`] merges records that share a UTI and can invert the result
//!    into an app-keyed view.

pub mod aggregate;
pub mod fields;
pub mod noise;
pub mod record;
pub mod splitter;

pub use aggregate::{AggregateStats, Aggregator};
pub use fields::{CORE_TYPES_BUNDLE, parse_record};
pub use noise::NoiseFilter;
pub use record::{AppRecord, PLACEHOLDER_UTI, UtiRecord, UtiRecordShort};
pub use splitter::{RECORD_DELIMITER, RECORD_MARKER, RecordSplitter};
