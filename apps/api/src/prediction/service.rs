//! Prediction pipeline: validate → normalize → score → rank → persist.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::prediction::PredictionRecord;
use crate::models::profile::RawSubmission;
use crate::prediction::normalizer::normalize;
use crate::prediction::ranking::Ranker;
use crate::prediction::scoring::RoleScorer;
use crate::prediction::validation::validate_submission;
use crate::store::PredictionStore;

pub struct PredictionService {
    store: Arc<dyn PredictionStore>,
    scorer: Arc<dyn RoleScorer>,
    ranker: Ranker,
    default_gpa_scale: f64,
}

impl PredictionService {
    pub fn new(
        store: Arc<dyn PredictionStore>,
        scorer: Arc<dyn RoleScorer>,
        ranker: Ranker,
        default_gpa_scale: f64,
    ) -> Self {
        Self {
            store,
            scorer,
            ranker,
            default_gpa_scale,
        }
    }

    /// Scores a submission for `owner_id` and appends the result to history.
    ///
    /// Validation failures return before anything is scored or written. If
    /// the append fails the result is discarded: a prediction without a
    /// durable record is not considered complete.
    pub async fn predict(
        &self,
        owner_id: &str,
        raw: &RawSubmission,
    ) -> Result<PredictionRecord, AppError> {
        let education = validate_submission(raw, self.default_gpa_scale).map_err(|fields| {
            debug!(
                "Rejected submission from {owner_id}: {:?}",
                fields.iter().map(|f| f.field.as_str()).collect::<Vec<_>>()
            );
            AppError::InvalidSubmission(fields)
        })?;

        let features = normalize(raw, self.default_gpa_scale);
        let scores = self.scorer.score(&features);
        let prediction = self.ranker.rank(&scores);

        let record = PredictionRecord {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            education,
            prediction,
            created_at: Utc::now(),
        };

        self.store.append(&record).await?;

        info!(
            "Stored prediction {} for {}: {} ({})",
            record.id,
            owner_id,
            record.prediction.primary.role,
            record.prediction.primary.confidence
        );
        Ok(record)
    }

    /// The owner's prediction records, newest first.
    pub async fn history(&self, owner_id: &str) -> Result<Vec<PredictionRecord>, AppError> {
        Ok(self.store.list_by_owner(owner_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::catalog::Role;
    use crate::prediction::scoring::RuleTableScorer;
    use crate::store::{InMemoryStore, StoreError};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct UnavailableStore;

    #[async_trait]
    impl PredictionStore for UnavailableStore {
        async fn append(&self, _record: &PredictionRecord) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk full".to_string()))
        }

        async fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<PredictionRecord>, StoreError> {
            Err(StoreError::Unavailable("disk full".to_string()))
        }
    }

    fn service_with(store: Arc<dyn PredictionStore>) -> PredictionService {
        PredictionService::new(store, Arc::new(RuleTableScorer::default()), Ranker::default(), 4.0)
    }

    fn submission(value: Value) -> RawSubmission {
        serde_json::from_value(value).unwrap()
    }

    fn phd_data_science() -> RawSubmission {
        submission(json!({
            "degree": "PhD",
            "field": "Data Science",
            "gpa": 3.8,
            "experience": 3,
            "graduation_year": 2023,
            "university": "Tech University",
            "skills": ["data analytics", "leadership"]
        }))
    }

    #[tokio::test]
    async fn test_predict_persists_exactly_one_record() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(store.clone());

        let record = service.predict("owner-1", &phd_data_science()).await.unwrap();

        assert_eq!(record.prediction.primary.role, Role::DataScientist);
        assert_eq!(record.prediction.primary.confidence, 80);
        assert_eq!(
            record.prediction.alternatives.iter().map(|r| (r.role, r.confidence)).collect::<Vec<_>>(),
            vec![(Role::ResearchScientist, 75), (Role::BusinessAnalyst, 50)]
        );

        let history = store.list_by_owner("owner-1").await.unwrap();
        assert_eq!(history, vec![record]);
    }

    #[tokio::test]
    async fn test_snapshot_is_copied_from_submission() {
        let service = service_with(Arc::new(InMemoryStore::new()));
        let record = service.predict("owner-1", &phd_data_science()).await.unwrap();
        assert_eq!(record.education.specialization, "Data Science");
        assert_eq!(record.education.skills, vec!["data analytics", "leadership"]);
        assert_eq!(record.education.experience_years, Some(3.0));
    }

    #[tokio::test]
    async fn test_invalid_submission_writes_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let service = service_with(store.clone());

        let err = service
            .predict("owner-1", &submission(json!({ "degree": "PhD" })))
            .await
            .unwrap_err();

        match err {
            AppError::InvalidSubmission(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert!(names.contains(&"specialization"));
                assert!(names.contains(&"university"));
            }
            other => panic!("expected InvalidSubmission, got {other:?}"),
        }
        assert!(store.list_by_owner("owner-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_store_unavailable() {
        let service = service_with(Arc::new(UnavailableStore));
        let err = service.predict("owner-1", &phd_data_science()).await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_ten_point_gpa_scores_like_four_point_equivalent() {
        let service = service_with(Arc::new(InMemoryStore::new()));
        let record = service
            .predict(
                "owner-1",
                &submission(json!({
                    "degree": "B.Tech",
                    "specialization": "Marketing",
                    "cgpa": 9.0,
                    "gpa_scale": 10,
                    "graduation_year": 2024,
                    "university": "IIT"
                })),
            )
            .await
            .unwrap();
        // 9.0 / 10 == 3.6 / 4 → high GPA band (+15) on top of marketing (+40)
        assert_eq!(record.prediction.primary.role, Role::MarketingManager);
        assert_eq!(record.prediction.primary.confidence, 55);
        assert_eq!(record.education.gpa, 9.0);
        assert_eq!(record.education.gpa_scale, 10.0);
    }

    #[tokio::test]
    async fn test_concurrent_predictions_for_same_owner_all_recorded() {
        let store = Arc::new(InMemoryStore::new());
        let service = Arc::new(service_with(store.clone()));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.predict("owner-1", &phd_data_science()).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(service.history("owner-1").await.unwrap().len(), 16);
    }
}
