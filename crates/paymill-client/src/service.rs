//! # Resource Service
//!
//! Generic CRUD dispatch shared by every resource.
//!
//! `ResourceService<R>` turns the static metadata on [`Resource`] (endpoint
//! path, field table) into requests:
//!
//! | call       | request                          |
//! |------------|----------------------------------|
//! | `create`   | `POST   <path>` with form params |
//! | `get`      | `GET    <path>/<id>`             |
//! | `list`     | `GET    <path>?<filter/order>`   |
//! | `update`   | `PUT    <path>/<id>` partial form |
//! | `delete`   | `DELETE <path>/<id>`             |
//!
//! Resource-specific operations (`create_with_token`, `refund_transaction`,
//! ...) are inherent impls on `ResourceService<Transaction>` and friends.

use crate::transport::{ApiRequest, SharedTransport};
use paymill_core::{
    list_params, Envelope, Filter, Order, Pagination, Params, PaymillError, PaymillList,
    PaymillResult, Resource,
};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, error, info, instrument};

/// Service for one resource type
pub struct ResourceService<R> {
    transport: SharedTransport,
    _resource: PhantomData<fn() -> R>,
}

impl<R> ResourceService<R> {
    pub fn new(transport: SharedTransport) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    /// Send a request and unwrap the `data` envelope of a success answer
    pub(crate) async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> PaymillResult<T> {
        let body = self.round_trip(request).await?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            PaymillError::Serialization(format!("failed to parse PAYMILL response: {}", e))
        })?;
        Ok(envelope.data)
    }

    /// Send a request; success bodies come back raw, failures classified
    pub(crate) async fn round_trip(&self, request: ApiRequest) -> PaymillResult<String> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let err = PaymillError::from_response(response.status, &response.body);
            error!("PAYMILL {} {} failed: {}", method, path, err);
            return Err(err);
        }

        Ok(response.body)
    }
}

impl<R: Resource> ResourceService<R> {
    /// `<path>/<id>`, with the id checked to be one plain path segment
    pub(crate) fn item_path(id: &str) -> PaymillResult<String> {
        if id.is_empty() {
            return Err(PaymillError::MissingIdentifier { resource: R::NAME });
        }
        let plain = id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !plain || id.chars().all(|c| c == '.') {
            return Err(PaymillError::InvalidArgument(format!(
                "{} id {:?} is not a single path segment",
                R::NAME,
                id
            )));
        }
        Ok(format!("{}/{}", R::PATH, id))
    }

    /// Create from form parameters
    #[instrument(skip(self, params), fields(resource = R::NAME))]
    pub async fn create(&self, params: Params) -> PaymillResult<R> {
        debug!("Creating {} with {} params", R::NAME, params.len());

        let created: R = self
            .execute(ApiRequest::post(R::PATH).with_form(params))
            .await?;

        info!("Created {}: id={}", R::NAME, created.id().unwrap_or("<none>"));
        Ok(created)
    }

    /// Fetch one resource by id
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn get(&self, id: &str) -> PaymillResult<R> {
        self.execute(ApiRequest::get(Self::item_path(id)?)).await
    }

    /// Fetch the current server state of a resource
    pub async fn refresh(&self, resource: &R) -> PaymillResult<R> {
        let id = resource.require_id()?;
        self.get(id).await
    }

    /// One page of resources. `None` filter or order sends no parameters
    /// for it; the server then applies its defaults.
    #[instrument(skip(self, filter, order), fields(resource = R::NAME))]
    pub async fn list(
        &self,
        filter: Option<&Filter<R>>,
        order: Option<&Order<R>>,
        page: Option<Pagination>,
    ) -> PaymillResult<PaymillList<R>> {
        let query = list_params(filter, order, page);
        debug!("Listing {} with {} query params", R::PATH, query.len());

        let body = self
            .round_trip(ApiRequest::get(R::PATH).with_query(query))
            .await?;

        let list: PaymillList<R> = serde_json::from_str(&body).map_err(|e| {
            PaymillError::Serialization(format!("failed to parse {} list: {}", R::NAME, e))
        })?;

        debug!(
            "Listed {} of {} {}",
            list.data.len(),
            list.total_count(),
            R::PATH
        );
        Ok(list)
    }

    /// List everything with server defaults
    pub async fn list_all(&self) -> PaymillResult<PaymillList<R>> {
        self.list(None, None, None).await
    }

    /// Send the updateable fields that are set and return the server copy.
    ///
    /// Fails with `MissingIdentifier` before any request when the resource
    /// has no id.
    #[instrument(skip(self, resource), fields(resource = R::NAME))]
    pub async fn update(&self, resource: &R) -> PaymillResult<R> {
        let id = resource.require_id()?;

        if !R::is_updateable() {
            return Err(PaymillError::InvalidArgument(format!(
                "{} has no updateable fields",
                R::NAME
            )));
        }

        let params = resource.update_params()?;
        debug!("Updating {} {} ({} fields)", R::NAME, id, params.len());

        let updated: R = self
            .execute(ApiRequest::put(Self::item_path(id)?).with_form(params))
            .await?;

        info!("Updated {}: id={}", R::NAME, id);
        Ok(updated)
    }

    /// Delete by id. Fails with `MissingIdentifier` before any request
    /// when the resource has no id; a remote 404 comes back as `NotFound`.
    #[instrument(skip(self, resource), fields(resource = R::NAME))]
    pub async fn delete(&self, resource: &R) -> PaymillResult<()> {
        let id = resource.require_id()?;

        let mut query = Params::new();
        for (key, value) in R::DELETE_PARAMS {
            query.push(*key, *value);
        }

        self.round_trip(ApiRequest::delete(Self::item_path(id)?).with_query(query))
            .await?;

        info!("Deleted {}: id={}", R::NAME, id);
        Ok(())
    }
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceService")
            .field("resource", &std::any::type_name::<R>())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::transport::{ApiRequest, ApiResponse, SharedTransport, Transport};
    use async_trait::async_trait;
    use paymill_core::PaymillResult;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays canned responses and records every request
    #[derive(Default)]
    pub struct RecordingTransport {
        responses: Mutex<VecDeque<ApiResponse>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl RecordingTransport {
        pub fn replying(responses: Vec<(u16, serde_json::Value)>) -> Arc<Self> {
            let responses = responses
                .into_iter()
                .map(|(status, body)| ApiResponse {
                    status,
                    body: body.to_string(),
                })
                .collect();
            Arc::new(Self {
                responses: Mutex::new(responses),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn shared(self: &Arc<Self>) -> SharedTransport {
            self.clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> PaymillResult<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(ApiResponse {
                    status: 500,
                    body: String::new(),
                }))
        }
    }
}
