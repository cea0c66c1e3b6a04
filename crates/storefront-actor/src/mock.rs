//! # Mocks for store clients
//!
//! Two ways to test code that talks to a store without running the real actor:
//!
//! | | [`MockClient`] | [`create_mock_client`] |
//! |---|---|---|
//! | **Style** | Queue canned replies up front | Receive each request and answer it by hand |
//! | **Good for** | Orchestration around a client | Asserting the exact payload a client sends |
//! | **Failure injection** | `return_err(..)` | send an `Err` on the responder |
//!
//! ```rust,ignore
//! let mut orders = MockClient::<Order>::new();
//! orders.expect_create().return_err(FrameworkError::ActorClosed);
//!
//! let persistence = ActorOrderPersistence::new(OrderClient::new(orders.client()), Duration::ZERO);
//! assert!(persistence.submit(order).await.is_err());
//! orders.verify();
//! ```
//!
//! A request that doesn't match the next queued expectation (wrong kind, or wrong id) is
//! not answered: the caller sees [`FrameworkError::ActorDropped`] and [`MockClient::verify`]
//! panics with a description of the mismatch.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Create(Result<T::Id, FrameworkError>),
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List(Result<Vec<T>, FrameworkError>),
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Create(_) => "create",
            Expectation::Get { .. } => "get",
            Expectation::List(_) => "list",
            Expectation::Update { .. } => "update",
            Expectation::Delete { .. } => "delete",
            Expectation::Action { .. } => "action",
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
    }
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
}

type SharedState<T> = Arc<Mutex<MockState<T>>>;

/// Answers `request` from `expectation`, or describes why it can't.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Result<(), String> {
    fn check_id<I: PartialEq + std::fmt::Display>(kind: &str, expected: &I, got: &I) -> Result<(), String> {
        if expected == got {
            Ok(())
        } else {
            Err(format!("{kind}: expected id {expected}, got {got}"))
        }
    }

    match (request, expectation) {
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(response))) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response })) => {
            check_id("get", &expected, &id)?;
            let _ = respond_to.send(response);
        }
        (ResourceRequest::List { respond_to }, Some(Expectation::List(response))) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update { id, respond_to, .. },
            Some(Expectation::Update { id: expected, response }),
        ) => {
            check_id("update", &expected, &id)?;
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: expected, response })) => {
            check_id("delete", &expected, &id)?;
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: expected, response }),
        ) => {
            check_id("action", &expected, &id)?;
            let _ = respond_to.send(response);
        }
        (request, Some(expectation)) => {
            return Err(format!(
                "unexpected {} request, next expectation was {}",
                request_kind(&request),
                expectation.kind()
            ));
        }
        (request, None) => {
            return Err(format!("unexpected {} request, no expectations left", request_kind(&request)));
        }
    }
    Ok(())
}

/// A client whose replies are queued in advance.
///
/// ```rust,ignore
/// let mut carts = MockClient::<Cart>::new();
/// carts.expect_get(CartId(1)).return_ok(Some(Cart::new(CartId(1))));
///
/// let cart = CartClient::new(carts.client(), CartId(1));
/// assert!(cart.snapshot().await?.is_empty());
/// carts.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: SharedState<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: SharedState<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = task_state.lock().unwrap().expectations.pop_front();
                if let Err(mismatch) = answer(request, next) {
                    tracing::warn!(%mismatch, "Mock expectation mismatch");
                    task_state.lock().unwrap().mismatches.push(mismatch);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// A client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            state: self.state.clone(),
            wrap: Box::new(wrap),
        }
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Panics if an expectation was never used or a request didn't match.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.mismatches.is_empty() {
            panic!("Mock received unexpected requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Queues one reply on a [`MockClient`].
pub struct ExpectationBuilder<T: ActorEntity, R> {
    state: SharedState<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.state.lock().unwrap().expectations.push_back(expectation);
    }
}

// =============================================================================
// Manual request handling
// =============================================================================

/// A client plus the receiving end of its channel, for answering requests by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Coupon {
        id: u32,
        code: String,
        redeemed: bool,
    }

    #[derive(Debug)]
    struct CouponCreate {
        code: String,
    }

    #[derive(Debug)]
    enum CouponAction {
        Redeem,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("coupon error")]
    struct CouponError;

    #[async_trait]
    impl ActorEntity for Coupon {
        type Id = u32;
        type Create = CouponCreate;
        type Update = ();
        type Action = CouponAction;
        type ActionResult = bool;
        type Context = ();
        type Error = CouponError;

        fn from_create_params(id: u32, params: CouponCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                code: params.code,
                redeemed: false,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: CouponAction, _: &()) -> Result<bool, Self::Error> {
            self.redeemed = true;
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_manual_mock_sees_create_payload() {
        let (client, mut receiver) = create_mock_client::<Coupon>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CouponCreate {
                    code: "WELCOME".to_string(),
                })
                .await
        });

        let Some(ResourceRequest::Create { params, respond_to }) = receiver.recv().await else {
            panic!("Expected Create request");
        };
        assert_eq!(params.code, "WELCOME");
        respond_to.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_mock_client_replays_expectations_in_order() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_create().return_ok(1);
        mock.expect_action(1).return_ok(true);
        mock.expect_list().return_ok(vec![Coupon {
            id: 1,
            code: "WELCOME".to_string(),
            redeemed: true,
        }]);

        let client = mock.client();
        let id = client
            .create(CouponCreate {
                code: "WELCOME".to_string(),
            })
            .await
            .unwrap();
        assert!(client.perform_action(id, CouponAction::Redeem).await.unwrap());
        let all = client.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].redeemed);

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_injects_errors() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_get(3).return_err(FrameworkError::NotFound("3".to_string()));

        let result = mock.client().get(3).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(id)) if id == "3"));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "expected id 3, got 4")]
    async fn test_mock_client_flags_wrong_id() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_get(3).return_ok(None);

        let result = mock.client().get(4).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
        mock.verify();
    }
}
