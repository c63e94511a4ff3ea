//! Integration tests for exactly-once logging across pipeline chains

use functional_processing::{failure, success, success_void, ExecutionResult, LogLevel, VoidResult};
use functional_processing_logging::{
    handler_fn, LoggingPipeline, Next, Pipeline, PipelineBehavior, RequestHandler,
};
use functional_processing_test_utils::{CountingHandler, LogRecord, RecordingSink, TestRequest};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing_test::traced_test;

fn logging_chain<Res, H>(
    handler: H,
    sink: &RecordingSink,
    stages: usize,
) -> Pipeline<TestRequest, Res>
where
    Res: functional_processing::Outcome + Send + 'static,
    H: RequestHandler<TestRequest, Res> + 'static,
{
    (0..stages).fold(Pipeline::new(handler), |pipeline, _| {
        pipeline.with_behavior(LoggingPipeline::new(sink.clone()))
    })
}

#[tokio::test]
async fn test_logs_failure() {
    let sink = RecordingSink::new();
    let pipeline = logging_chain(CountingHandler::new(|| failure::<()>("Test")), &sink, 1);

    pipeline.send(&TestRequest::default()).await;

    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_does_not_log_when_suppressed() {
    let sink = RecordingSink::new();
    let pipeline = logging_chain(
        CountingHandler::new(|| failure::<()>("Test").with_log_level(LogLevel::None)),
        &sink,
        1,
    );

    for _ in 0..3 {
        let result = pipeline.send(&TestRequest::default()).await;
        assert!(!result.checked_error().is_logged());
    }

    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_chain_of_decorators_logs_once() {
    let sink = RecordingSink::new();
    let handler = CountingHandler::new(|| {
        failure::<u32>(["inventory unavailable", "retry later"]).with_log_level(LogLevel::Warning)
    });
    let calls = handler.counter();
    let pipeline = logging_chain(handler, &sink, 4);

    let result = pipeline.send(&TestRequest::new("reserve")).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(result.checked_error().is_logged());
    assert_eq!(
        sink.records(),
        [LogRecord {
            level: LogLevel::Warning,
            message: "inventory unavailable; retry later".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_each_response_instance_is_logged() {
    let sink = RecordingSink::new();
    let pipeline = logging_chain(CountingHandler::new(|| failure::<()>("again")), &sink, 2);

    pipeline.send(&TestRequest::default()).await;
    pipeline.send(&TestRequest::default()).await;

    assert_eq!(sink.messages(), ["again", "again"]);
}

#[tokio::test]
async fn test_success_passes_through_untouched() {
    let sink = RecordingSink::new();
    let pipeline = logging_chain(CountingHandler::new(|| success(41 + 1)), &sink, 3);

    let result = pipeline.send(&TestRequest::default()).await;

    assert_eq!(result, success(42));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_response_is_returned_unmodified() {
    let sink = RecordingSink::new();
    let expected = failure::<String>(["a", "b"]).with_error_code(409);
    let respond = expected.clone();
    let pipeline = logging_chain(CountingHandler::new(move || respond.clone()), &sink, 2);

    let result = pipeline.send(&TestRequest::default()).await;

    assert_eq!(result, expected);
    assert_eq!(result.checked_error().error_code(), Some(409));
}

#[tokio::test]
async fn test_same_instance_observed_twice_logs_once() {
    let sink = RecordingSink::new();
    let decorator = LoggingPipeline::new(sink.clone());
    let shared: Arc<VoidResult> = Arc::new(failure("shared failure"));
    let replay = {
        let shared = shared.clone();
        handler_fn(move |_: &TestRequest| {
            let response = shared.clone();
            async move { response }
        })
    };
    let replay: &dyn RequestHandler<TestRequest, Arc<VoidResult>> = &replay;
    let request = TestRequest::default();

    decorator.handle(&request, Next::handler(replay)).await;
    assert!(shared.checked_error().is_logged());
    decorator.handle(&request, Next::handler(replay)).await;

    assert_eq!(sink.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_sharing_a_response_log_once() {
    let sink = RecordingSink::new();
    let shared: Arc<ExecutionResult<u8>> =
        Arc::new(failure("cached failure").with_log_level(LogLevel::Critical));
    let respond = shared.clone();
    let pipeline = Arc::new(logging_chain(
        CountingHandler::new(move || respond.clone()),
        &sink,
        2,
    ));

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.send(&TestRequest::new(format!("call {i}"))).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(sink.count_at(LogLevel::Critical), 1);
    assert_eq!(sink.len(), 1);
}

#[tokio::test]
async fn test_outer_stage_logs_what_inner_threshold_skipped() {
    let outer_sink = RecordingSink::new();
    let inner_sink = RecordingSink::new();
    let pipeline = Pipeline::new(CountingHandler::new(|| {
        failure::<()>("slow response").with_log_level(LogLevel::Information)
    }))
    .with_behavior(LoggingPipeline::new(outer_sink.clone()))
    .with_behavior(LoggingPipeline::new(inner_sink.clone()).with_minimum_level(LogLevel::Warning));

    pipeline.send(&TestRequest::default()).await;

    assert!(inner_sink.is_empty());
    assert_eq!(outer_sink.count_at(LogLevel::Information), 1);
}

#[tokio::test]
async fn test_abandoned_call_logs_nothing() {
    let sink = RecordingSink::new();
    let pipeline = logging_chain(
        handler_fn(|_: &TestRequest| async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            failure::<()>("never produced")
        }),
        &sink,
        2,
    );

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        pipeline.send(&TestRequest::default()),
    )
    .await;

    assert!(outcome.is_err());
    assert!(sink.is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_default_decorator_logs_through_tracing() {
    let pipeline = Pipeline::new(CountingHandler::new(|| {
        failure::<()>("payment declined").with_log_level(LogLevel::Warning)
    }))
    .with_behavior(LoggingPipeline::for_request::<TestRequest>())
    .with_behavior(LoggingPipeline::for_request::<TestRequest>());

    let result = pipeline.send(&TestRequest::new("charge")).await;

    assert!(result.checked_error().is_logged());
    assert!(logs_contain("WARN"));
    assert!(logs_contain("payment declined"));
    assert!(logs_contain("TestRequest"));
    logs_assert(|lines: &[&str]| {
        match lines
            .iter()
            .filter(|line| line.contains("payment declined"))
            .count()
        {
            1 => Ok(()),
            n => Err(format!("expected one record, found {n}")),
        }
    });
}

#[tokio::test]
async fn test_void_success_through_chain() {
    let sink = RecordingSink::new();
    let pipeline = logging_chain(CountingHandler::new(success_void), &sink, 2);
    assert!(pipeline.send(&TestRequest::default()).await.succeeded());
    assert!(sink.is_empty());
}
