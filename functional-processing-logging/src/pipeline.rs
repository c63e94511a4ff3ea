//! Request pipeline: behaviors wrapped around a terminal handler
//!
//! A [`Pipeline`] holds an ordered list of [`PipelineBehavior`]s, outermost
//! first, and a [`RequestHandler`]. Sending a request runs the behaviors from
//! the outside in; each one receives a [`Next`] for the rest of the chain and
//! sees the response after everything inside it has completed.
//!
//! Cancellation is by drop: abandoning the future returned by
//! [`Pipeline::send`] abandons every stage that has not yet returned.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// A stage wrapped around the downstream computation
#[async_trait]
pub trait PipelineBehavior<Req, Res>: Send + Sync
where
    Req: Send + Sync + 'static,
    Res: Send + 'static,
{
    /// Handle `request`, calling `next` to run the rest of the chain
    async fn handle(&self, request: &Req, next: Next<'_, Req, Res>) -> Res;
}

/// The terminal handler of a pipeline
#[async_trait]
pub trait RequestHandler<Req, Res>: Send + Sync
where
    Req: Send + Sync + 'static,
    Res: Send + 'static,
{
    async fn handle(&self, request: &Req) -> Res;
}

/// The remainder of a pipeline below the current stage
pub struct Next<'a, Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + 'static,
{
    behaviors: &'a [Arc<dyn PipelineBehavior<Req, Res>>],
    handler: &'a dyn RequestHandler<Req, Res>,
}

impl<'a, Req, Res> Next<'a, Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + 'static,
{
    /// Continuation that calls `handler` directly, with no stages in between
    pub fn handler(handler: &'a dyn RequestHandler<Req, Res>) -> Self {
        Self {
            behaviors: &[],
            handler,
        }
    }

    /// Run the next stage, or the handler when no stages remain
    pub async fn run(self, request: &Req) -> Res {
        match self.behaviors.split_first() {
            Some((behavior, rest)) => {
                let next = Next {
                    behaviors: rest,
                    handler: self.handler,
                };
                behavior.handle(request, next).await
            }
            None => self.handler.handle(request).await,
        }
    }
}

/// Ordered behaviors around a terminal handler
pub struct Pipeline<Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + 'static,
{
    behaviors: Vec<Arc<dyn PipelineBehavior<Req, Res>>>,
    handler: Arc<dyn RequestHandler<Req, Res>>,
}

impl<Req, Res> Pipeline<Req, Res>
where
    Req: Send + Sync + 'static,
    Res: Send + 'static,
{
    pub fn new(handler: impl RequestHandler<Req, Res> + 'static) -> Self {
        Self {
            behaviors: Vec::new(),
            handler: Arc::new(handler),
        }
    }

    /// Add a behavior inside every behavior added before it
    pub fn with_behavior(self, behavior: impl PipelineBehavior<Req, Res> + 'static) -> Self {
        self.with_shared_behavior(Arc::new(behavior))
    }

    /// Add a behavior that is also held elsewhere
    pub fn with_shared_behavior(mut self, behavior: Arc<dyn PipelineBehavior<Req, Res>>) -> Self {
        self.behaviors.push(behavior);
        self
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Run `request` through every behavior and the handler
    pub async fn send(&self, request: &Req) -> Res {
        let next = Next {
            behaviors: &self.behaviors,
            handler: self.handler.as_ref(),
        };
        next.run(request).await
    }
}

/// Handler backed by a closure returning an owned future
pub struct FnHandler<F>(F);

/// Wrap `f` as a [`RequestHandler`]
///
/// ```
/// use functional_processing::{success, ExecutionResult};
/// use functional_processing_logging::{handler_fn, Pipeline};
///
/// # tokio_test::block_on(async {
/// let pipeline = Pipeline::new(handler_fn(|name: &String| {
///     let greeting = format!("hello {name}");
///     async move { success(greeting) }
/// }));
///
/// let result: ExecutionResult<String> = pipeline.send(&"world".to_string()).await;
/// assert_eq!(result.checked_value(), "hello world");
/// # });
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F> {
    FnHandler(f)
}

#[async_trait]
impl<Req, Res, F, Fut> RequestHandler<Req, Res> for FnHandler<F>
where
    Req: Send + Sync + 'static,
    Res: Send + 'static,
    F: Fn(&Req) -> Fut + Send + Sync,
    Fut: Future<Output = Res> + Send + 'static,
{
    async fn handle(&self, request: &Req) -> Res {
        (self.0)(request).await
    }
}
