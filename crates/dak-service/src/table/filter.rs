//! Free-text search over file records.

use dak_entity::file::FileRecord;

/// String forms of every scalar field of `file`. History is not included.
fn searchable_fields(file: &FileRecord) -> Vec<String> {
    let mut fields = vec![
        file.id.to_string(),
        file.file_number.clone(),
        file.title.clone(),
        file.file_type.to_string(),
        file.department.clone(),
        file.date.format("%Y-%m-%d").to_string(),
        file.status.to_string(),
        file.description.clone(),
        file.remarks.clone(),
        file.needs_return.to_string(),
    ];
    fields.extend(file.storage_path.clone());
    fields.extend(file.created_at.map(|t| t.to_rfc3339()));
    fields.extend(file.updated_at.map(|t| t.to_rfc3339()));
    fields
}

/// Whether any field of `file` contains `needle`, ignoring case.
pub fn matches(file: &FileRecord, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    searchable_fields(file)
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Keep the files that match `needle`, preserving order.
pub fn filter_files(files: Vec<FileRecord>, needle: &str) -> Vec<FileRecord> {
    files.into_iter().filter(|f| matches(f, needle)).collect()
}
