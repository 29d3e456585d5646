#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use driftwatch_core::{render_report, InstanceMap, InstanceRecord, OutputFormat};
use driftwatch_engine::{BatchEvaluator, ExecutionContext};

fn fleet(size: usize, drift_every: usize) -> (Arc<InstanceMap>, Arc<InstanceMap>) {
    let mut actual = InstanceMap::new();
    let mut desired = InstanceMap::new();

    for n in 0..size {
        let id = format!("i-{:05}", n);
        let declared = InstanceRecord {
            instance_type: "t3.micro".to_string(),
            security_groups: vec!["sg-a".to_string(), "sg-b".to_string()],
            ..InstanceRecord::new(&id)
        };
        let mut observed = declared.clone();
        observed.security_groups.reverse();
        if n % drift_every == 0 {
            observed.instance_type = "t3.large".to_string();
        }

        actual.insert(id.clone(), observed);
        // Every 7th instance is undeclared
        if n % 7 != 3 {
            desired.insert(id, declared);
        }
    }

    (Arc::new(actual), Arc::new(desired))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_output_identical_for_cap_1_and_cap_50() {
    let (actual, desired) = fleet(200, 5);

    let serial = BatchEvaluator::new(Vec::new(), 1)
        .evaluate_batch(&ExecutionContext::new(), Arc::clone(&actual), Arc::clone(&desired))
        .await;
    let wide = BatchEvaluator::new(Vec::new(), 50)
        .evaluate_batch(&ExecutionContext::new(), actual, desired)
        .await;

    assert_eq!(serial, wide);
    assert_eq!(
        render_report(&serial, OutputFormat::Json),
        render_report(&wide, OutputFormat::Json)
    );
}

#[tokio::test]
async fn test_results_sorted_by_id() {
    let (actual, desired) = fleet(64, 3);
    let report = BatchEvaluator::new(Vec::new(), 8)
        .evaluate_batch(&ExecutionContext::new(), actual, desired)
        .await;

    let ids: Vec<&str> = report.results.iter().map(|r| r.instance_id.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn test_counts_reconcile() {
    let (actual, desired) = fleet(70, 5);
    let report = BatchEvaluator::new(Vec::new(), 4)
        .evaluate_batch(&ExecutionContext::new(), actual, desired)
        .await;

    assert_eq!(report.total_instances, 70);
    assert_eq!(report.results.len(), 70);
    let flagged = report.results.iter().filter(|r| r.has_drift).count();
    assert_eq!(report.drifted_instances, flagged);

    // 14 drifted by type, 10 undeclared, 2 of which overlap (n = 10, 45)
    assert_eq!(flagged, 14 + 10 - 2);
}

#[tokio::test]
async fn test_pre_cancelled_context_still_reports_every_instance() {
    let (actual, desired) = fleet(25, 2);
    let ctx = ExecutionContext::new();
    ctx.cancel();

    let report = BatchEvaluator::new(Vec::new(), 4)
        .evaluate_batch(&ctx, actual, desired)
        .await;

    assert_eq!(report.total_instances, 25);
    assert_eq!(report.results.len(), 25);
    for result in &report.results {
        assert_eq!(result.error.as_deref(), Some("context canceled"));
        assert!(!result.has_drift);
    }
    assert_eq!(report.drifted_instances, 0);
}

#[tokio::test]
async fn test_empty_actual_side_gives_empty_report() {
    let report = BatchEvaluator::new(Vec::new(), 4)
        .evaluate_batch(
            &ExecutionContext::new(),
            Arc::new(InstanceMap::new()),
            Arc::new(InstanceMap::new()),
        )
        .await;

    assert_eq!(report.total_instances, 0);
    assert!(report.results.is_empty());
}
