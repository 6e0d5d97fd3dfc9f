//! Single-key stable sorting.

use dak_core::types::SortField;
use dak_entity::file::FileRecord;

use super::column::FileColumn;

/// Sort `files` in place by one column. Ties keep their current order.
pub fn sort_files(files: &mut [FileRecord], sort: &SortField<FileColumn>) {
    files.sort_by(|a, b| {
        let ordering = sort.field.value(a).compare(&sort.field.value(b));
        sort.direction.apply(ordering)
    });
}
