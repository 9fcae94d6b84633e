//! Output file naming

use crate::models::Record;

/// Default file name prefix
pub const DEFAULT_PREFIX: &str = "GVO_Certificaat";

/// Make a field safe for use in a file name: `/` becomes `-`, space becomes `_`
pub fn sanitize_component(value: &str) -> String {
    value.replace('/', "-").replace(' ', "_")
}

/// `{prefix}_{customer}_{city}_{street}` with each field sanitized.
///
/// Records that share customer, city and street get the same stem; a later
/// record overwrites the earlier one's files.
pub fn output_stem(record: &Record, prefix: &str) -> String {
    format!(
        "{}_{}_{}_{}",
        prefix,
        sanitize_component(&record.customer),
        sanitize_component(&record.city),
        sanitize_component(&record.street),
    )
}

/// File names for the editable document and the PDF
pub fn output_names(record: &Record, prefix: &str) -> (String, String) {
    let stem = output_stem(record, prefix);
    (format!("{}.docx", stem), format!("{}.pdf", stem))
}
