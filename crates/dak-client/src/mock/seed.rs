//! Sample data given to every new demo user.

use chrono::Utc;

use dak_core::types::FileId;
use dak_entity::department::Department;
use dak_entity::file::{FileRecord, FileStatus, FileType, StatusChange};

/// Departments every demo store starts with.
pub const SEED_DEPARTMENTS: [&str; 4] = ["IT", "HR", "Finance", "Operations"];

/// Reason on the history entry of seeded files.
const SEED_REASON: &str = "Initial status";

struct SeedFile {
    file_number: &'static str,
    title: &'static str,
    file_type: FileType,
    department: &'static str,
    status: FileStatus,
    description: &'static str,
    remarks: &'static str,
    needs_return: bool,
    storage_path: &'static str,
}

const SEED_FILES: [SeedFile; 2] = [
    SeedFile {
        file_number: "SAMPLE-001",
        title: "Welcome to Paper Trail Handler",
        file_type: FileType::Internal,
        department: "IT",
        status: FileStatus::Completed,
        description: "This is a sample file to demonstrate the system. You can edit or delete it.",
        remarks: "Sample file - feel free to modify or remove",
        needs_return: false,
        storage_path: "/files/welcome-sample.pdf",
    },
    SeedFile {
        file_number: "DEMO-002",
        title: "Demo Document - Getting Started",
        file_type: FileType::Received,
        department: "Operations",
        status: FileStatus::InProgress,
        description: "Another sample document to show file management features",
        remarks: "This demonstrates the file tracking workflow",
        needs_return: true,
        storage_path: "/files/demo-document.pdf",
    },
];

/// Fresh sample files, each with one initial history entry.
pub fn sample_files() -> Vec<FileRecord> {
    let now = Utc::now();
    SEED_FILES
        .iter()
        .map(|seed| {
            let id = FileId::new();
            let mut change = StatusChange::now(seed.status, Some(SEED_REASON.to_string()));
            change.file = Some(id);
            FileRecord {
                id,
                file_number: seed.file_number.to_string(),
                title: seed.title.to_string(),
                file_type: seed.file_type,
                department: seed.department.to_string(),
                date: now.date_naive(),
                status: seed.status,
                description: seed.description.to_string(),
                remarks: seed.remarks.to_string(),
                needs_return: seed.needs_return,
                storage_path: Some(seed.storage_path.to_string()),
                created_at: Some(now),
                updated_at: Some(now),
                status_history: vec![change],
            }
        })
        .collect()
}

/// The seeded department list.
pub fn sample_departments() -> Vec<Department> {
    SEED_DEPARTMENTS.iter().map(|name| Department::seeded(*name)).collect()
}
