use super::common::*;
use crate::pipeline::domain::{JobId, StageUpdate};
use crate::pipeline::palette;
use crate::pipeline::repository::{PipelineError, StageRepository};

#[test]
fn create_rejects_empty_name() {
    let mut repository = StageRepository::new();
    let result = repository.create(&job(), draft("", 1), fixed_now());
    assert_eq!(result, Err(PipelineError::Validation { field: "name" }));
}

#[test]
fn create_rejects_whitespace_only_name() {
    let mut repository = StageRepository::new();
    let result = repository.create(&job(), draft("   ", 1), fixed_now());
    assert_eq!(result, Err(PipelineError::Validation { field: "name" }));
}

#[test]
fn create_rejects_blank_job() {
    let mut repository = StageRepository::new();
    let result = repository.create(&JobId("  ".to_string()), draft("Applied", 1), fixed_now());
    assert_eq!(result, Err(PipelineError::Validation { field: "job_id" }));
}

#[test]
fn create_defaults_active_and_mints_unique_ids() {
    let mut repository = StageRepository::new();
    let first = repository
        .create(&job(), draft("Applied", 1), fixed_now())
        .expect("create first");
    let second = repository
        .create(&job(), draft("Interview", 2), fixed_now())
        .expect("create second");

    assert!(first.is_active);
    assert!(second.is_active);
    assert_ne!(first.id, second.id);
    assert_eq!(first.created_date, fixed_now());
    assert_eq!(first.modified_date, fixed_now());
}

#[test]
fn create_trims_name_and_keeps_explicit_color() {
    let mut repository = StageRepository::new();
    let stage = repository
        .create(
            &job(),
            colored_draft("  Technical Interview  ", 1, "#123456"),
            fixed_now(),
        )
        .expect("create stage");

    assert_eq!(stage.name, "Technical Interview");
    assert_eq!(stage.color.as_deref(), Some("#123456"));
    assert_eq!(stage.display_color(), "#123456");
}

#[test]
fn blank_color_falls_back_to_derived_palette_entry() {
    let mut repository = StageRepository::new();
    let stage = repository
        .create(&job(), colored_draft("Applied", 1, "   "), fixed_now())
        .expect("create stage");

    assert_eq!(stage.color, None);
    assert_eq!(stage.display_color(), palette::color_for("Applied"));
}

#[test]
fn list_by_job_sorts_by_order_with_stable_ties() {
    let mut repository = StageRepository::new();
    repository
        .create(&job(), draft("Second", 2), fixed_now())
        .expect("create");
    repository
        .create(&job(), draft("First", 1), fixed_now())
        .expect("create");
    repository
        .create(&job(), draft("AlsoSecond", 2), fixed_now())
        .expect("create");

    let names: Vec<&str> = repository
        .list_by_job(&job())
        .into_iter()
        .map(|stage| stage.name.as_str())
        .collect();
    // Tied orders keep insertion order; the tie itself carries no meaning.
    assert_eq!(names, ["First", "Second", "AlsoSecond"]);
}

#[test]
fn list_by_job_scopes_to_the_owning_job() {
    let mut repository = StageRepository::new();
    repository
        .create(&job(), draft("Applied", 1), fixed_now())
        .expect("create");
    repository
        .create(&other_job(), draft("Sourced", 1), fixed_now())
        .expect("create");

    assert_eq!(repository.list_by_job(&job()).len(), 1);
    assert_eq!(repository.list_by_job(&other_job()).len(), 1);
    assert!(repository.list_by_job(&JobId("job3".to_string())).is_empty());
}

#[test]
fn update_replaces_fields_and_bumps_modified_date() {
    let (mut repository, ids) = seeded_repository();
    let updated = repository
        .update(
            StageUpdate {
                id: ids[0].clone(),
                name: "Phone Screen".to_string(),
                order: 5,
                color: Some("#0EA5E9".to_string()),
                description: Some("Initial call".to_string()),
                is_active: false,
            },
            later_now(),
        )
        .expect("update succeeds");

    assert_eq!(updated.name, "Phone Screen");
    assert_eq!(updated.order, 5);
    assert_eq!(updated.color.as_deref(), Some("#0EA5E9"));
    assert_eq!(updated.description.as_deref(), Some("Initial call"));
    assert!(!updated.is_active);
    assert_eq!(updated.created_date, fixed_now());
    assert_eq!(updated.modified_date, later_now());
    assert_eq!(updated.job_id, job());
}

#[test]
fn update_rejects_empty_name() {
    let (mut repository, ids) = seeded_repository();
    let result = repository.update(
        StageUpdate {
            id: ids[0].clone(),
            name: " ".to_string(),
            order: 1,
            color: None,
            description: None,
            is_active: true,
        },
        later_now(),
    );
    assert_eq!(result, Err(PipelineError::Validation { field: "name" }));
}

#[test]
fn update_missing_stage_is_not_found() {
    let mut repository = StageRepository::new();
    let result = repository.update(
        StageUpdate {
            id: crate::pipeline::domain::StageId("stage-999999".to_string()),
            name: "Applied".to_string(),
            order: 1,
            color: None,
            description: None,
            is_active: true,
        },
        fixed_now(),
    );
    assert!(matches!(result, Err(PipelineError::StageNotFound(_))));
}

#[test]
fn deactivate_retains_the_record() {
    let (mut repository, ids) = seeded_repository();
    let stage = repository
        .deactivate(&ids[1], later_now())
        .expect("deactivate succeeds");

    assert!(!stage.is_active);
    assert_eq!(stage.modified_date, later_now());
    // Soft delete keeps the stage listed, only the active flag changes.
    assert_eq!(repository.list_by_job(&job()).len(), 3);
    assert!(repository.fetch(&ids[1]).is_some());
}

#[test]
fn purge_removes_the_record() {
    let (mut repository, ids) = seeded_repository();
    repository.purge(&ids[0]).expect("purge succeeds");

    assert_eq!(repository.list_by_job(&job()).len(), 2);
    assert!(repository.fetch(&ids[0]).is_none());
    assert_eq!(
        repository.purge(&ids[0]),
        Err(PipelineError::StageNotFound(ids[0].clone()))
    );
}

#[test]
fn deactivate_missing_stage_is_not_found() {
    let mut repository = StageRepository::new();
    let id = crate::pipeline::domain::StageId("stage-000404".to_string());
    assert_eq!(
        repository.deactivate(&id, fixed_now()),
        Err(PipelineError::StageNotFound(id.clone()))
    );
}
