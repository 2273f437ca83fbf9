// Manufacturer availability endpoint
//
// `GET /availability/{manufacturer}` answers `{code, response}`, where
// `response` is a record list or, when the API's backend failed, the
// string `"[]"`. Sentinel detection is left to the caller.

use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::AvailabilityEnvelope;

impl ApiClient {
    /// Fetch the availability table of one manufacturer.
    pub async fn availability(&self, manufacturer: &str) -> Result<AvailabilityEnvelope, Error> {
        let url = self.endpoint_url(&["availability", manufacturer])?;
        let envelope: AvailabilityEnvelope = self.get_json(url).await?;

        if envelope.response.is_error_sentinel() {
            warn!(manufacturer, "availability response is the error sentinel");
        } else {
            debug!(
                manufacturer,
                count = envelope.response.len(),
                "fetched availability"
            );
        }
        Ok(envelope)
    }
}
