//! # Clients

use crate::service::ResourceService;
use paymill_core::{Client, Params, PaymillResult};
use tracing::instrument;

pub type ClientService = ResourceService<Client>;

impl ResourceService<Client> {
    /// Create a client; both fields are optional on the API side
    #[instrument(skip(self))]
    pub async fn create_client(
        &self,
        email: Option<&str>,
        description: Option<&str>,
    ) -> PaymillResult<Client> {
        let mut params = Params::new();
        params.push_opt("email", email);
        params.push_opt("description", description);
        self.create(params).await
    }
}
