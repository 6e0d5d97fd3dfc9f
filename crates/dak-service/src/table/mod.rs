//! List presentation of file records: sort, search and paginate.
//!
//! The pipeline is always sort, then filter, then paginate. Export works
//! on the filtered set rather than the visible page.

pub mod column;
pub mod filter;
pub mod sort;

use serde::Serialize;

use dak_core::types::pagination::DEFAULT_PAGE_SIZE;
use dak_core::types::{PageRequest, PageResponse, SortField};
use dak_entity::file::FileRecord;

pub use self::column::{CellValue, FileColumn};
pub use self::filter::{filter_files, matches};
pub use self::sort::sort_files;

/// Sort, search and page position of the file table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    sort: Option<SortField<FileColumn>>,
    search: String,
    page: u64,
    page_size: u64,
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableState {
    /// Unsorted, unfiltered, first page.
    pub fn new(page_size: u64) -> Self {
        Self {
            sort: None,
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current sort, if any.
    pub fn sort(&self) -> Option<&SortField<FileColumn>> {
        self.sort.as_ref()
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current page (1-based, before clamping).
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Click on a column header.
    pub fn toggle_sort(&mut self, column: FileColumn) -> &SortField<FileColumn> {
        let next = SortField::toggle(self.sort.take(), column);
        self.sort.insert(next)
    }

    /// Set the search text. A different term goes back to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Move to `page`. Out-of-range pages are clamped when viewed.
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// All files after sorting and filtering, unpaged.
    pub fn filtered(&self, mut files: Vec<FileRecord>) -> Vec<FileRecord> {
        if let Some(sort) = &self.sort {
            sort_files(&mut files, sort);
        }
        filter_files(files, &self.search)
    }

    /// The visible page.
    pub fn view(&self, files: Vec<FileRecord>) -> TableView {
        let rows = self.filtered(files);
        TableView {
            page: PageResponse::from_all(rows, PageRequest::new(self.page, self.page_size)),
            sort: self.sort.clone(),
            search: self.search.clone(),
        }
    }
}

/// One rendered page of the file table.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    /// Rows on this page and page counters.
    pub page: PageResponse<FileRecord>,
    /// Sort in effect.
    pub sort: Option<SortField<FileColumn>>,
    /// Search in effect.
    pub search: String,
}

impl TableView {
    /// Header text for `column`, with an arrow on the sorted one.
    pub fn header(&self, column: FileColumn) -> String {
        match &self.sort {
            Some(sort) if sort.field == column => {
                format!("{} {}", column.header(), sort.direction.arrow())
            }
            _ => column.header().to_string(),
        }
    }

    /// Summary line such as `Page 2 of 3 (25 files)`.
    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} ({} files)",
            self.page.page, self.page.total_pages, self.page.total_items
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::test_support::new_file;
    use dak_core::types::SortDirection;
    use dak_entity::file::FileType;

    fn files(count: usize) -> Vec<FileRecord> {
        (1..=count)
            .map(|n| {
                let mut file =
                    FileRecord::from_new(new_file(FileType::Received, &format!("FT/REC/{n:03}")));
                file.title = if n % 2 == 0 { "Even".into() } else { "Odd".into() };
                file
            })
            .collect()
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = TableState::default();
        assert_eq!(state.toggle_sort(FileColumn::Title).direction, SortDirection::Asc);
        assert_eq!(state.toggle_sort(FileColumn::Title).direction, SortDirection::Desc);
        assert_eq!(state.toggle_sort(FileColumn::Title).direction, SortDirection::Asc);
        let other = state.toggle_sort(FileColumn::Date);
        assert_eq!(other.field, FileColumn::Date);
        assert_eq!(other.direction, SortDirection::Asc);
    }

    #[test]
    fn test_pagination_counts() {
        let state = TableState::new(10);
        let view = state.view(files(25));
        assert_eq!(view.page.total_pages, 3);
        assert_eq!(view.page.items.len(), 10);
        assert_eq!(view.summary(), "Page 1 of 3 (25 files)");
    }

    #[test]
    fn test_page_is_clamped() {
        let mut state = TableState::new(10);
        state.set_page(9);
        let view = state.view(files(25));
        assert_eq!(view.page.page, 3);
        assert_eq!(view.page.items.len(), 5);
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = TableState::new(5);
        state.set_page(3);
        state.set_search("even");
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.set_search("even");
        assert_eq!(state.page(), 2);

        let view = state.view(files(20));
        assert_eq!(view.page.total_items, 10);
    }

    #[test]
    fn test_sort_then_filter() {
        let mut state = TableState::new(50);
        state.toggle_sort(FileColumn::FileNumber);
        state.toggle_sort(FileColumn::FileNumber);
        state.set_search("odd");
        let rows = state.filtered(files(6));
        let numbers: Vec<_> = rows.iter().map(|f| f.file_number.as_str()).collect();
        assert_eq!(numbers, ["FT/REC/005", "FT/REC/003", "FT/REC/001"]);
    }

    #[test]
    fn test_header_arrow() {
        let mut state = TableState::default();
        state.toggle_sort(FileColumn::Date);
        let view = state.view(Vec::new());
        assert_eq!(view.header(FileColumn::Date), "Date ↑");
        assert_eq!(view.header(FileColumn::Title), "Title");
        assert_eq!(view.page.total_pages, 1);
    }
}
