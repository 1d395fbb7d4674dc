use async_trait::async_trait;
use eam_core::{
    AssessmentRatingService, EamConfig, PhysicalSpecDefinitionService, ReportGridService,
    ServiceError,
};
use eam_model::{
    AssessmentDefinition, ChangeLog, EntityKind, EntityReference, HierarchyQueryScope, Operation,
    PhysicalSpecDefinitionChangeCommand, PhysicalSpecDefinitionField,
    PhysicalSpecDefinitionSampleFile, PhysicalSpecDefinitionType, RatingId,
    RemoveAssessmentRatingCommand, SaveAssessmentRatingCommand, SelectionOptions,
};
use eam_store::{ChangeLogStore, SelectorResolver, StoreError, StoreResult};
use eam_test_utils::{SampleEstate, APP_GROUP, GRID_ID, ROOT_OU};
use mockall::mock;
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

mock! {
    pub Log {}

    #[async_trait]
    impl ChangeLogStore for Log {
        async fn write(&self, entry: ChangeLog) -> StoreResult<()>;
        async fn find_by_parent(&self, parent: &EntityReference) -> StoreResult<Vec<ChangeLog>>;
    }
}

fn spec_service(estate: &SampleEstate) -> PhysicalSpecDefinitionService {
    PhysicalSpecDefinitionService::new(
        estate.change_log.clone(),
        estate.physical_specs.clone(),
        estate.physical_specs.clone(),
        estate.physical_specs.clone(),
    )
}

fn assessment_service(estate: &SampleEstate) -> AssessmentRatingService {
    AssessmentRatingService::new(
        estate.assessments.clone(),
        estate.assessments.clone(),
        estate.change_log.clone(),
        estate.directory.clone(),
    )
}

fn fixed_length(version: &str) -> PhysicalSpecDefinitionChangeCommand {
    PhysicalSpecDefinitionChangeCommand {
        version: version.into(),
        delimiter: None,
        definition_type: PhysicalSpecDefinitionType::FixedLength,
    }
}

#[tokio::test]
async fn spec_delete_counts_every_removed_record_and_logs_once() {
    let estate = SampleEstate::new();
    let service = spec_service(&estate);
    let id = service.create("alice", 11, fixed_length("1.0")).await.unwrap();

    estate.physical_specs.insert_field(PhysicalSpecDefinitionField {
        id: None,
        spec_definition_id: id,
        name: "trade_id".into(),
        position: 1,
        description: "Trade identifier".into(),
    });
    for name in ["jan.dat", "feb.dat"] {
        estate.physical_specs.insert_sample_file(PhysicalSpecDefinitionSampleFile {
            id: None,
            spec_definition_id: id,
            name: name.into(),
            file_data: "0000000001".into(),
        });
    }

    let removed = service.delete("alice", id).await.unwrap();
    assert_eq!(removed, 1 + 1 + 2);

    let parent = EntityReference::new(EntityKind::PhysicalSpecification, 11);
    let removals: Vec<_> = estate
        .change_log
        .entries()
        .into_iter()
        .filter(|e| e.parent_reference == parent && e.operation == Operation::Remove)
        .collect();
    assert_eq!(removals.len(), 1);
    assert!(service.find_for_specification(11).await.unwrap().is_empty());
}

#[tokio::test]
async fn spec_create_fails_when_change_log_is_down() {
    let estate = SampleEstate::new();
    let mut log = MockLog::new();
    log.expect_write()
        .times(1)
        .returning(|_| Err(StoreError::unavailable("audit db offline")));

    let service = PhysicalSpecDefinitionService::new(
        Arc::new(log),
        estate.physical_specs.clone(),
        estate.physical_specs.clone(),
        estate.physical_specs.clone(),
    );

    let err = service.create("alice", 11, fixed_length("1.0")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Dependency { store: "change log", .. }));
}

#[tokio::test]
async fn read_only_assessment_writes_nothing() {
    let estate = SampleEstate::new();
    estate
        .assessments
        .insert_definition(AssessmentDefinition::new(8, "Vendor score", EntityKind::Application, 1).read_only());
    let service = assessment_service(&estate);
    let target = EntityReference::new(EntityKind::Application, 10);

    let save = SaveAssessmentRatingCommand {
        entity_reference: target,
        assessment_definition_id: 8,
        rating_id: RatingId(1),
        description: Some("imported".into()),
    };
    let remove = RemoveAssessmentRatingCommand {
        entity_reference: target,
        assessment_definition_id: 8,
    };
    let roles = BTreeSet::new();

    let create = service.create(&save, "alice", &roles).await.unwrap_err();
    let update = service.update(&save, "alice", &roles).await.unwrap_err();
    let removal = service.remove(&remove, "alice", &roles).await.unwrap_err();

    for err in [create, update, removal] {
        assert!(matches!(err, ServiceError::NotAuthorized(_)), "{err:?}");
    }
    assert!(estate.change_log.is_empty());
    assert!(service.find_for_entity(&target).await.unwrap().is_empty());
}

#[tokio::test]
async fn assessment_ratings_for_app_group_selector() {
    let estate = SampleEstate::new();
    let service = assessment_service(&estate).with_provenance("survey");
    let roles = BTreeSet::new();

    for app in [10, 20, 30] {
        let save = SaveAssessmentRatingCommand {
            entity_reference: EntityReference::new(EntityKind::Application, app),
            assessment_definition_id: 1,
            rating_id: RatingId(1),
            description: None,
        };
        service.create(&save, "alice", &roles).await.unwrap();
    }

    let options = SelectionOptions::exact(EntityReference::new(EntityKind::AppGroup, APP_GROUP));
    let found = service
        .find_by_target_kind_for_related_selector(EntityKind::Application, &options)
        .await
        .unwrap();

    let apps: Vec<i64> = found.iter().map(|r| r.entity_reference.id).collect();
    assert_eq!(apps, vec![10, 30]);
    assert!(found.iter().all(|r| r.provenance == "survey"));
}

#[test]
fn grid_service_without_collaborators_is_configuration_error() {
    let err = ReportGridService::builder().build().unwrap_err();
    assert!(matches!(err, ServiceError::Configuration(_)));
}

struct StalledSelector;

#[async_trait]
impl SelectorResolver for StalledSelector {
    async fn resolve(&self, _options: &SelectionOptions) -> StoreResult<BTreeSet<eam_model::ApplicationId>> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn stalled_selector_times_out_with_configured_deadline() {
    let estate = SampleEstate::new();
    let config = EamConfig::from_toml_str("[grid]\nfetch_timeout_ms = 1500").unwrap();
    let service = ReportGridService::builder()
        .grid_store(estate.grids.clone())
        .application_store(estate.directory.clone())
        .rating_store(estate.ratings.clone())
        .selector(Arc::new(StalledSelector))
        .config(config.grid)
        .build()
        .unwrap();

    let options = SelectionOptions::new(
        EntityReference::new(EntityKind::OrgUnit, ROOT_OU),
        HierarchyQueryScope::Children,
    );
    let err = service.get_grid(GRID_ID, &options).await.unwrap_err();

    assert!(matches!(err, ServiceError::Timeout { duration_ms: 1500 }));
}

#[tokio::test(start_paused = true)]
async fn per_call_deadline_overrides_configuration() {
    let estate = SampleEstate::new();
    let service = ReportGridService::builder()
        .grid_store(estate.grids.clone())
        .application_store(estate.directory.clone())
        .rating_store(estate.ratings.clone())
        .selector(Arc::new(StalledSelector))
        .build()
        .unwrap();

    let options = SelectionOptions::exact(EntityReference::new(EntityKind::OrgUnit, ROOT_OU));
    let err = service
        .get_grid_within(GRID_ID, &options, Duration::from_millis(20))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Timeout { duration_ms: 20 }));
}
