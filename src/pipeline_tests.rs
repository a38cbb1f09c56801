// src/pipeline_tests.rs
//
// CROSS-MODULE TESTS: Layer Promotion Protocol
//
// PURPOSE:
// - Prove the repository -> service -> use-case -> web pipeline re-tags
//   errors exactly once, at the layer that first observes them
// - Prove async producers translate cancellation and timeout into
//   ordinary failure kinds before the pure combinators run
//
// INVARIANTS TESTED:
// - A record's layer is set where the failure is observed and never
//   overwritten by later promotions
// - Promotion never changes the primary kind or the record order
// - The boundary bridge round-trips kind, layer, and messages

#[cfg(test)]
mod promotion_pipeline_tests {
    use crate::boundary::ErrorReport;
    use crate::convert::promote;
    use crate::kind::FailureKind;
    use crate::layer::Layer;
    use crate::status::ResultStatus;
    use crate::typed::TypedResult;
    use mockall::automock;
    use mockall::predicate::eq;
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq)]
    struct Episode {
        id: Uuid,
        title: String,
    }

    /// Persistence collaborator contract: hands results upward at the
    /// Infrastructure layer.
    #[automock]
    trait EpisodeStore {
        fn find_episode(&self, id: Uuid) -> TypedResult<Episode>;
    }

    /// Service step: fetch and promote one layer up, never skipping
    fn fetch_episode_title(store: &dyn EpisodeStore, id: Uuid) -> TypedResult<String> {
        store
            .find_episode(id)
            .promote(Layer::Service)
            .map(|episode| episode.title)
    }

    #[test]
    fn test_pipeline_success_carries_output_to_web() {
        let id = Uuid::new_v4();
        let episode = Episode {
            id,
            title: "The Beginning".to_string(),
        };

        let mut store = MockEpisodeStore::new();
        let stored = episode.clone();
        store
            .expect_find_episode()
            .with(eq(id))
            .times(1)
            .returning(move |_| TypedResult::success(stored.clone(), Layer::Infrastructure));

        let service_result = fetch_episode_title(&store, id);
        let use_case_result = service_result.promote(Layer::UseCase);
        let web_result = use_case_result.promote(Layer::Web);

        assert!(web_result.is_success());
        assert_eq!(web_result.current_layer(), Layer::Web);
        assert_eq!(web_result.output(), "The Beginning");
    }

    #[test]
    fn test_pipeline_failure_keeps_origin_layer_on_records() {
        let id = Uuid::new_v4();

        let mut store = MockEpisodeStore::new();
        store.expect_find_episode().returning(move |lookup| {
            TypedResult::failure(
                FailureKind::NotFound,
                Layer::Infrastructure,
                format!("id {}", lookup),
            )
        });

        let web_result = fetch_episode_title(&store, id)
            .promote(Layer::UseCase)
            .promote(Layer::Web);

        assert!(web_result.is_failure());
        assert_eq!(web_result.primary_kind(), FailureKind::NotFound);
        // The value travelled to the Web layer, the record did not move
        assert_eq!(web_result.current_layer(), Layer::Web);
        assert_eq!(web_result.errors()[0].layer(), Layer::Infrastructure);
        assert_eq!(
            web_result.to_message_string(),
            format!("Episode not found on the Infrastructure layer because id {}", id)
        );
    }

    #[test]
    fn test_unknown_layer_is_tagged_at_first_promotion() {
        let status = ResultStatus::failure(FailureKind::DomainViolation, Layer::Unknown, "over limit");
        let service: ResultStatus = promote(&status, Layer::Service);
        let web: ResultStatus = promote(&service, Layer::Web);

        assert_eq!(web.current_layer(), Layer::Web);
        assert_eq!(web.errors()[0].layer(), Layer::Service);
    }

    #[test]
    fn test_cross_representation_promotion() {
        let typed = TypedResult::<Episode>::failure(
            FailureKind::AlreadyExists,
            Layer::Infrastructure,
            "duplicate slug",
        );
        // A caller that only needs pass/fail demotes to the untyped form
        let untyped: ResultStatus = promote(&typed, Layer::Service);

        assert!(untyped.already_exists());
        assert_eq!(untyped.current_layer(), Layer::Service);
        assert_eq!(untyped.errors_of_type::<Episode>().len(), 1);
    }

    #[test]
    fn test_web_boundary_report_round_trip() {
        let id = Uuid::new_v4();
        let status = ResultStatus::failure(
            FailureKind::NotAllowed,
            Layer::Infrastructure,
            format!("user {} lacks write access", id),
        )
        .promote(Layer::Service)
        .promote(Layer::UseCase)
        .promote(Layer::Web);

        // Out through the bridge and back, as a legacy call site would
        let reconstructed = status.clone().into_error(None).into_status();
        assert_eq!(reconstructed, status);

        let report = ErrorReport::from_status(&reconstructed);
        assert_eq!(report.kind, FailureKind::NotAllowed);
        assert_eq!(report.layer, Layer::Web);
        assert_eq!(report.messages.len(), 1);
    }
}

#[cfg(test)]
mod async_producer_tests {
    use crate::kind::FailureKind;
    use crate::layer::Layer;
    use crate::status::ResultStatus;
    use crate::typed::TypedResult;
    use std::time::Duration;

    /// Producer that checks its cancellation flag before doing any work
    fn guarded_fetch(cancelled: bool) -> TypedResult<u64> {
        if cancelled {
            return TypedResult::failure(
                FailureKind::OperationCancelled,
                Layer::Infrastructure,
                "caller dropped the request",
            );
        }
        TypedResult::success(7, Layer::Infrastructure)
    }

    #[test]
    fn test_cancellation_flag_becomes_operation_cancelled() {
        let result = guarded_fetch(true).promote(Layer::Service);
        assert!(result.status().operation_cancelled());
        assert!(!result.has_output());

        let result = guarded_fetch(false);
        assert_eq!(result.output(), 7);
    }

    #[tokio::test]
    async fn test_timeout_expiry_becomes_operation_timeout() {
        let slow = tokio::time::sleep(Duration::from_secs(5));
        let status = match tokio::time::timeout(Duration::from_millis(5), slow).await {
            Ok(()) => ResultStatus::success(Layer::Infrastructure),
            Err(_elapsed) => ResultStatus::failure(
                FailureKind::OperationTimeout,
                Layer::Infrastructure,
                "fetch exceeded 5ms",
            ),
        };

        assert!(status.operation_timed_out());
        assert_eq!(
            status.to_message_string(),
            "Operation timed out on the Infrastructure layer because fetch exceeded 5ms"
        );
    }

    #[tokio::test]
    async fn test_completed_producer_passes_through_combinators() {
        let fast = async { 21_u64 };
        let produced = match tokio::time::timeout(Duration::from_secs(1), fast).await {
            Ok(value) => TypedResult::success(value, Layer::Infrastructure),
            Err(_elapsed) => TypedResult::failure(
                FailureKind::OperationTimeout,
                Layer::Infrastructure,
                "fetch exceeded 1s",
            ),
        };

        let result = produced.promote(Layer::Service).map(|n| n * 2);
        assert_eq!(result.output(), 42);
    }
}
