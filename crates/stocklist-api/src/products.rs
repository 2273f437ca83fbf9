// Product listing endpoint
//
// `GET /products/{category}` answers a bare JSON array.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::ProductRecord;

impl ApiClient {
    /// List every product of one category.
    ///
    /// `category` is the lowercase path segment (`jackets`, `shirts`,
    /// `accessories`). The API does not paginate.
    pub async fn list_products(&self, category: &str) -> Result<Vec<ProductRecord>, Error> {
        let url = self.endpoint_url(&["products", category])?;
        let products: Vec<ProductRecord> = self.get_json(url).await?;
        debug!(category, count = products.len(), "fetched products");
        Ok(products)
    }
}
