use studio_experiments::*;
use studio_kernel::domain::constants::SPLIT_TEST;
use studio_kernel::domain::course::CourseKey;
use studio_kernel::domain::partitions::{AdvancedSettings, Group, UserPartition};
use studio_storage::Storage;

fn course() -> CourseKey {
    "course-v1:edX+Split+2024".parse().unwrap()
}

fn settings(partitions: Vec<UserPartition>) -> AdvancedSettings {
    let mut settings = AdvancedSettings::default();
    settings.enable_module(SPLIT_TEST);
    settings.user_partitions.value = partitions;
    settings
}

fn alpha_beta() -> UserPartition {
    UserPartition::new(
        0,
        "Configuration alpha,beta",
        "first",
        vec![Group::new("0", "alpha"), Group::new("1", "beta")],
    )
}

fn zero_one_two() -> UserPartition {
    UserPartition::new(
        1,
        "Configuration 0,1,2",
        "second",
        vec![Group::new("0", "Group 0"), Group::new("1", "Group 1"), Group::new("2", "Group 2")],
    )
}

async fn seeded() -> (MemoryContentStore, SplitTests<MemoryContentStore>) {
    let store = MemoryContentStore::new();
    store.save_settings(&course(), &settings(vec![alpha_beta(), zero_one_two()])).await.unwrap();
    (store.clone(), SplitTests::new(store))
}

fn active(view: &SplitTestView) -> Vec<&str> {
    view.groups.active.iter().map(|a| a.child.display_name.as_str()).collect()
}

fn inactive(view: &SplitTestView) -> Vec<&str> {
    view.groups.inactive.iter().map(|c| c.display_name.as_str()).collect()
}

#[tokio::test]
async fn creation_requires_the_module() {
    let service = SplitTests::new(MemoryContentStore::new());
    let err = service.create(&course(), "Experiment").await.unwrap_err();
    assert_eq!(err.kind(), "FeatureDisabled");
}

#[tokio::test]
async fn new_block_is_not_configured() {
    let (_, service) = seeded().await;
    let block = service.create(&course(), "Experiment").await.unwrap();

    let view = service.view(&course(), &block.id).await.unwrap();
    assert_eq!(view.status, ConfigurationStatus::NotConfigured);
    assert!(view.configuration_name.is_none());
    assert!(view.message().contains("must select"));
    assert!(!view.groups.can_add_missing());
}

#[tokio::test]
async fn selecting_and_switching_configurations() {
    let (_, service) = seeded().await;
    let block = service.create(&course(), "Experiment").await.unwrap();

    service.select_configuration(&course(), &block.id, 0).await.unwrap();
    let view = service.view(&course(), &block.id).await.unwrap();
    assert_eq!(view.status, ConfigurationStatus::Configured);
    assert_eq!(active(&view), vec!["alpha", "beta"]);
    assert!(inactive(&view).is_empty());
    assert!(view.message().contains("Configuration alpha,beta"));

    service.select_configuration(&course(), &block.id, 1).await.unwrap();
    let view = service.view(&course(), &block.id).await.unwrap();
    assert_eq!(active(&view), vec!["Group 0", "Group 1", "Group 2"]);
    assert_eq!(inactive(&view), vec!["alpha", "beta"]);
    assert!(view.groups.missing.is_empty());
}

#[tokio::test]
async fn reselecting_the_same_configuration_is_a_no_op() {
    let (store, service) = seeded().await;
    let block = service.create(&course(), "Experiment").await.unwrap();
    let first = service.select_configuration(&course(), &block.id, 0).await.unwrap();
    let writes = store.writes();

    let again = service.select_configuration(&course(), &block.id, 0).await.unwrap();
    assert_eq!(again, first);
    assert_eq!(store.writes(), writes);
}

#[tokio::test]
async fn unknown_targets_are_not_found() {
    let (_, service) = seeded().await;
    let block = service.create(&course(), "Experiment").await.unwrap();

    let err = service.select_configuration(&course(), &block.id, 42).await.unwrap_err();
    assert_eq!(err.kind(), "NotFound");
    assert_eq!(service.view(&course(), "nope").await.unwrap_err().kind(), "NotFound");
    assert_eq!(
        service.delete_child(&course(), &block.id, "nope").await.unwrap_err().kind(),
        "NotFound"
    );
}

#[tokio::test]
async fn missing_groups_are_added_once() {
    let (store, service) = seeded().await;
    let block = service.create(&course(), "Experiment").await.unwrap();
    service.select_configuration(&course(), &block.id, 0).await.unwrap();

    // The configuration is edited afterwards: "beta" is replaced by "gamma".
    let reshaped = UserPartition::new(
        0,
        "Configuration alpha,beta",
        "first",
        vec![Group::new("0", "alpha"), Group::new("2", "gamma")],
    );
    store.save_settings(&course(), &settings(vec![reshaped])).await.unwrap();

    let view = service.view(&course(), &block.id).await.unwrap();
    assert_eq!(active(&view), vec!["alpha"]);
    assert_eq!(inactive(&view), vec!["beta"]);
    assert_eq!(view.groups.missing, vec![Group::new("2", "gamma")]);
    assert!(view.groups.can_add_missing());

    let writes = store.writes();
    let created = service.add_missing_groups(&course(), &block.id).await.unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].group_id.as_deref(), Some("2"));
    assert_eq!(store.writes(), writes + 1);

    let view = service.view(&course(), &block.id).await.unwrap();
    assert_eq!(active(&view), vec!["alpha", "gamma"]);
    assert_eq!(inactive(&view), vec!["beta"]);
    assert!(!view.groups.can_add_missing());

    assert!(service.add_missing_groups(&course(), &block.id).await.unwrap().is_empty());
    assert_eq!(store.writes(), writes + 1);
}

#[tokio::test]
async fn deleted_configuration_makes_everything_inactive() {
    let (store, service) = seeded().await;
    let block = service.create(&course(), "Experiment").await.unwrap();
    service.select_configuration(&course(), &block.id, 0).await.unwrap();

    store.save_settings(&course(), &settings(vec![zero_one_two()])).await.unwrap();

    let view = service.view(&course(), &block.id).await.unwrap();
    assert_eq!(view.status, ConfigurationStatus::ConfigurationMissing(0));
    assert_eq!(inactive(&view), vec!["alpha", "beta"]);
    assert!(view.groups.active.is_empty());
    assert!(!view.groups.can_add_missing());
    assert!(view.message().contains("deleted group configuration"));
}

#[tokio::test]
async fn inactive_children_can_be_deleted() {
    let (_, service) = seeded().await;
    let block = service.create(&course(), "Experiment").await.unwrap();
    service.select_configuration(&course(), &block.id, 0).await.unwrap();
    service.select_configuration(&course(), &block.id, 1).await.unwrap();

    let view = service.view(&course(), &block.id).await.unwrap();
    let stale = view.groups.inactive[0].id.clone();
    let removed = service.delete_child(&course(), &block.id, &stale).await.unwrap();
    assert_eq!(removed.display_name, "alpha");

    let view = service.view(&course(), &block.id).await.unwrap();
    assert_eq!(inactive(&view), vec!["beta"]);
}

#[tokio::test]
async fn stored_content_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::builder().root(dir.path()).connect().await.unwrap();
    let content = StoredContent::new(storage.clone());
    content.save_settings(&course(), &settings(vec![alpha_beta()])).await.unwrap();

    let block = SplitTests::new(content).create(&course(), "Persisted").await.unwrap();
    SplitTests::new(StoredContent::new(storage.clone()))
        .select_configuration(&course(), &block.id, 0)
        .await
        .unwrap();

    let reopened = Storage::builder().root(dir.path()).connect().await.unwrap();
    let service = SplitTests::new(StoredContent::new(reopened));
    let view = service.view(&course(), &block.id).await.unwrap();
    assert_eq!(active(&view), vec!["alpha", "beta"]);

    let listed = service.list(&course()).await.unwrap();
    assert_eq!(listed.len(), 1);

    let ns = studio_kernel::course_namespace(&course());
    assert!(dir.path().join(&ns).join("advanced_settings.json").is_file());
    assert!(dir.path().join(&ns).join("blocks").join(format!("{}.json", block.id)).is_file());
}

#[tokio::test]
async fn path_like_block_ids_are_unknown_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::builder().root(dir.path()).connect().await.unwrap();
    let content = StoredContent::new(storage);
    content.save_settings(&course(), &settings(vec![alpha_beta()])).await.unwrap();
    let service = SplitTests::new(content.clone());

    for id in ["../advanced_settings", "blocks/../x", "", "a.b"] {
        let err = service.view(&course(), id).await.unwrap_err();
        assert_eq!(err.kind(), "NotFound", "{id:?}");
        assert!(content.load_block(&course(), id).await.unwrap().is_none());
    }

    // The settings document is untouched.
    assert!(content.load_settings(&course()).await.unwrap().split_test_enabled());
}
