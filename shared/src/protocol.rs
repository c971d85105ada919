use crate::{NewProductDraft, Order, OrderLines, Product, ProductId};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests of this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, relative to the backend origin.
    fn path(&self) -> String;
}

// =========================================================
// Request Definitions
// =========================================================

/// List the catalog
#[derive(Debug, Serialize, Deserialize)]
pub struct ListProductsRequest;

impl ApiRequest for ListProductsRequest {
    type Response = Vec<Product>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/products".to_string()
    }
}

/// Create a product. The backend echoes the created product, which the
/// client discards in favour of a fresh listing.
impl ApiRequest for NewProductDraft {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/products".to_string()
    }
}

/// Delete a product by id
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProductRequest {
    #[serde(skip)]
    pub id: ProductId,
}

impl ApiRequest for DeleteProductRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/products/{}", self.id)
    }
}

/// List orders
#[derive(Debug, Serialize, Deserialize)]
pub struct ListOrdersRequest;

impl ApiRequest for ListOrdersRequest {
    type Response = Vec<Order>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/orders".to_string()
    }
}

/// Submit an order (created order is discarded, like product creation)
impl ApiRequest for OrderLines {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/orders".to_string()
    }
}
