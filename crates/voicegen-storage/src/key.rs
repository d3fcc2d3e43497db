use jiff::civil::Date;

/// Build the date-partitioned object key
///
/// Layout: `{prefix}{YYYY}/{MM}/{DD}_{unique-id}_{category}.{format}`,
/// so one bucket listing per month and the day folded into the object
/// name.
pub(crate) fn object_key(
    prefix: &str,
    date: Date,
    unique_id: &str,
    category: &str,
    format: &str,
) -> String {
    format!(
        "{prefix}{:04}/{:02}/{:02}_{unique_id}_{category}.{format}",
        date.year(),
        date.month(),
        date.day(),
    )
}

/// Short unique suffix for one stored object
///
/// First eight hex characters of a fresh UUIDv4; collisions within a
/// single day are negligible and no existence check is performed.
pub(crate) fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
