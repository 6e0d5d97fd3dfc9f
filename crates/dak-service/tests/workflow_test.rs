//! Integration tests for the file workflow.

mod helpers;

use dak_core::error::ErrorKind;
use dak_entity::file::{FileStatus, FileType};
use dak_service::forms::{CreateFileForm, DepartmentSelection};
use dak_service::{FileAction, FileColumn, TableState};

async fn create(
    app: &helpers::TestApp,
    file_type: FileType,
    title: &str,
    department: &str,
    needs_return: bool,
) -> dak_entity::file::FileRecord {
    let departments = app.ctx.departments();
    let selection = DepartmentSelection::new(&departments.list().await.unwrap());

    let mut form = CreateFileForm::default();
    form.set_file_type(file_type);
    form.file_number = app
        .ctx
        .number_generator()
        .generate(file_type)
        .await
        .unwrap();
    form.title = title.to_string();
    form.department = selection.choose(department, None).unwrap();
    form.needs_return = needs_return;

    form.submit(&app.ctx.file_store(), &departments)
        .await
        .unwrap()
        .file
}

#[tokio::test]
async fn test_audit_report_is_returned() {
    let app = helpers::TestApp::signed_in("clerk@example.com").await;
    let file = create(&app, FileType::Received, "Audit Report", "Finance", true).await;
    assert_eq!(file.status, FileStatus::Pending);
    assert_eq!(file.file_number, "FT/REC/001");

    let lifecycle = app.ctx.lifecycle();
    let returned = lifecycle.mark_returned(file.id).await.unwrap();

    assert_eq!(returned.status, FileStatus::Returned);
    assert_eq!(returned.status_history.len(), 2);
    assert_eq!(returned.status_history[0].status, FileStatus::Pending);
    assert_eq!(returned.status_history[1].status, FileStatus::Returned);
}

#[tokio::test]
async fn test_dispatch_undo_redispatch_appends_three_events() {
    let app = helpers::TestApp::signed_in("clerk@example.com").await;
    let file = create(&app, FileType::Dispatched, "Tender Notice", "IT", true).await;
    let lifecycle = app.ctx.lifecycle();

    lifecycle.dispatch(file.id).await.unwrap();
    lifecycle.undo(file.id, "Sent to wrong office").await.unwrap();
    let file = lifecycle.dispatch(file.id).await.unwrap();

    let tail: Vec<_> = file.status_history[1..]
        .iter()
        .map(|c| c.status)
        .collect();
    assert_eq!(
        tail,
        [FileStatus::Dispatched, FileStatus::Pending, FileStatus::Dispatched]
    );
    assert_eq!(
        file.status_history[2].reason.as_deref(),
        Some("Sent to wrong office")
    );
}

#[tokio::test]
async fn test_undo_without_reason_keeps_status() {
    let app = helpers::TestApp::signed_in("clerk@example.com").await;
    let file = create(&app, FileType::Internal, "Leave Roster", "HR", true).await;
    assert!(!file.needs_return);
    assert_eq!(file.status, FileStatus::Completed);

    let lifecycle = app.ctx.lifecycle();
    let err = lifecycle
        .apply(file.id, FileAction::Undo, Some(""))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let stored = app.ctx.file_store().get(file.id).await.unwrap();
    assert_eq!(stored.status, FileStatus::Completed);
    assert_eq!(stored.status_history.len(), file.status_history.len());
}

#[tokio::test]
async fn test_table_search_and_sort() {
    let app = helpers::TestApp::signed_in("clerk@example.com").await;
    create(&app, FileType::Received, "Budget", "Finance", false).await;
    create(&app, FileType::Received, "Audit", "Finance", false).await;

    let files = app.ctx.file_store().list().await.unwrap();
    let mut table = TableState::new(10);
    table.toggle_sort(FileColumn::Title);
    let titles: Vec<_> = table
        .view(files.clone())
        .page
        .items
        .into_iter()
        .map(|f| f.title)
        .collect();
    assert_eq!(titles[0], "Audit");

    table.set_search("Sample file - feel free");
    let view = table.view(files);
    assert_eq!(view.page.total_items, 1);
    assert_eq!(view.page.items[0].file_number, "SAMPLE-001");
}

#[tokio::test]
async fn test_signed_out_guard_rejects() {
    let app = helpers::TestApp::new().await;
    let err = app.ctx.guard().require().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    let app = helpers::TestApp::signed_in("clerk@example.com").await;
    assert_eq!(
        app.ctx.guard().require().await.unwrap().email,
        "clerk@example.com"
    );
}
