#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use driftwatch_core::core_types::schema::{
    EVENT_END, EVENT_START, FIELD_CONCURRENCY, FIELD_DRIFTED, FIELD_INSTANCE_ID, FIELD_RUN_ID,
    FIELD_SOURCE, FIELD_TOTAL,
};
use driftwatch_core::logging_facility::test_capture::init_test_capture;
use driftwatch_core::{InstanceMap, InstanceRecord};
use driftwatch_engine::{BatchEvaluator, DriftConfig, DriftService, ExecutionContext};
use tracing::Level;

fn map(ids: &[&str], instance_type: &str) -> InstanceMap {
    ids.iter()
        .map(|id| {
            let record = InstanceRecord {
                instance_type: instance_type.to_string(),
                ..InstanceRecord::new(*id)
            };
            (id.to_string(), record)
        })
        .collect()
}

#[tokio::test]
async fn test_batch_boundary_events_share_run_id() {
    let capture = init_test_capture();
    let ids = ["i-log-1", "i-log-2", "i-log-3", "i-log-4", "i-log-5", "i-log-6", "i-log-7"];
    let actual = Arc::new(map(&ids, "t3.large"));
    let desired = Arc::new(map(&ids[..5], "t3.micro"));

    let report = BatchEvaluator::new(vec!["instance_type".to_string()], 3)
        .evaluate_batch(&ExecutionContext::new(), actual, desired)
        .await;
    assert_eq!(report.drifted_instances, 7);

    let events = capture.events();
    let start = events
        .iter()
        .find(|e| {
            e.op.as_deref() == Some("evaluate_batch")
                && e.event.as_deref() == Some(EVENT_START)
                && e.field(FIELD_TOTAL) == Some("7")
        })
        .expect("start event captured");
    assert_eq!(start.field(FIELD_CONCURRENCY), Some("3"));

    let run_id = start.field(FIELD_RUN_ID).expect("run id on start event");
    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END) && e.field(FIELD_RUN_ID) == Some(run_id))
        .expect("end event with the same run id");
    assert_eq!(end.field(FIELD_DRIFTED), Some("7"));

    let not_found_warnings = capture.count_events(|e| {
        e.level == Level::WARN
            && matches!(e.field(FIELD_INSTANCE_ID), Some("i-log-6") | Some("i-log-7"))
    });
    assert_eq!(not_found_warnings, 2);
}

#[tokio::test]
async fn test_scan_warns_about_unobserved_filter_ids() {
    let capture = init_test_capture();
    let actual = map(&["i-seen"], "t3.micro");
    let desired = map(&["i-seen"], "t3.micro");

    let filter = vec!["i-seen".to_string(), "i-never-observed".to_string()];
    let report = DriftService::new(DriftConfig::default())
        .scan(&ExecutionContext::new(), &actual, &desired, &filter)
        .await
        .unwrap();
    assert_eq!(report.total_instances, 1);

    let warning = capture
        .events()
        .into_iter()
        .find(|e| e.level == Level::WARN && e.field(FIELD_INSTANCE_ID) == Some("i-never-observed"))
        .expect("warning for unobserved id");
    assert_eq!(warning.field(FIELD_SOURCE), Some("in-memory"));
}
