//! Bulk document to generated project

use chrono::NaiveDate;
use crudwright::prelude::*;
use std::fs;
use tempfile::tempdir;

const BLOG: &str = r"
models:
  Category:
    fields:
      name: string:unique
      slug: string:unique
  Post:
    fields:
      title: string
      body:
        type: text
      status: enum:draft:published
    relations:
      - type: belongsTo
        model: Category
      - type: belongsToMany
        model: Tag
  Tag:
    fields: name:string:unique
";

#[test]
fn bulk_document_generates_every_model() {
    let project = tempdir().unwrap();
    let path = project.path().join("crud.yaml");
    fs::write(&path, BLOG).unwrap();

    let config = CrudConfig::default();
    let document = BulkDocument::load(&path).unwrap();
    let generator = Generator::new(config.clone(), StubRegistry::bundled(), LocalFilesystem::new(project.path()))
        .with_clock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap());

    for request in document.requests(&config, false) {
        let report = generator.generate(&request.unwrap());
        assert!(!report.has_failures());
    }

    for model in ["Category", "Post", "Tag"] {
        assert!(project.path().join(format!("app/Models/{model}.php")).is_file());
        assert!(project.path().join(format!("app/Http/Controllers/{model}Controller.php")).is_file());
    }

    let pivot = fs::read_to_string(
        project.path().join("database/migrations/2024_03_01_090001_create_post_tag_table.php"),
    )
    .unwrap();
    assert!(pivot.contains("Schema::create('post_tag'"));

    let web = fs::read_to_string(project.path().join("routes/web.php")).unwrap();
    for prefix in ["categories", "posts", "tags"] {
        assert_eq!(web.matches(&format!("Route::resource('{prefix}'")).count(), 1);
    }
}

#[test]
fn missing_document_is_reported() {
    let project = tempdir().unwrap();
    let err = BulkDocument::load(&project.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, CrudError::BulkNotFound(_)));
}
