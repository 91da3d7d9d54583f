//! Product loading
//!
//! The catalogue is fetched once, on a background thread, and delivered to
//! the UI loop over a channel. There is no retry and no cancellation: if the
//! receiver is gone when the fetch finishes, the result is dropped.

use crate::error::{ProdViewError, Result};
use crate::product::Product;
use crossbeam_channel::{bounded, Receiver};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use std::thread;
use std::time::Duration;

/// Anything that can produce the full product list
pub trait ProductSource: Send + 'static {
    fn fetch(&self) -> Result<Vec<Product>>;

    /// Human-readable origin, used in log lines
    fn describe(&self) -> String;
}

/// Result of a background load
#[derive(Debug)]
pub enum LoadMessage {
    Loaded(Vec<Product>),
    Failed(ProdViewError),
}

impl From<Result<Vec<Product>>> for LoadMessage {
    fn from(result: Result<Vec<Product>>) -> Self {
        match result {
            Ok(products) => LoadMessage::Loaded(products),
            Err(e) => LoadMessage::Failed(e),
        }
    }
}

/// Fetches the catalogue with a plain GET against one endpoint
pub struct HttpProductSource {
    client: Client,
    endpoint: Url,
}

impl HttpProductSource {
    /// Build a source for `endpoint`. `timeout: None` leaves requests unbounded.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Build a source around a preconfigured client (proxies, TLS roots)
    pub fn with_client(endpoint: &str, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            endpoint: parse_endpoint(endpoint)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ProductSource for HttpProductSource {
    fn fetch(&self) -> Result<Vec<Product>> {
        let response = self.client.get(self.endpoint.clone()).send()?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProdViewError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: self.endpoint.to_string(),
            });
        }
        let body = response.bytes()?;
        parse_products(&body)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .map_err(|e| ProdViewError::InvalidEndpoint(endpoint.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProdViewError::InvalidEndpoint(
            endpoint.to_string(),
            "only http and https are supported".to_string(),
        ));
    }
    Ok(url)
}

/// Decode a JSON array of products
pub fn parse_products(body: &[u8]) -> Result<Vec<Product>> {
    Ok(serde_json::from_slice(body)?)
}

/// Fetch on a background thread; the receiver yields exactly one message
pub fn spawn_load<S: ProductSource>(source: S) -> Result<Receiver<LoadMessage>> {
    let (tx, rx) = bounded(1);
    thread::Builder::new()
        .name("product-loader".to_string())
        .spawn(move || {
            let origin = source.describe();
            tracing::info!(%origin, "fetching products");
            let message = LoadMessage::from(source.fetch());
            match &message {
                LoadMessage::Loaded(products) => {
                    tracing::info!(%origin, count = products.len(), "products fetched");
                }
                LoadMessage::Failed(e) => {
                    tracing::debug!(%origin, error = %e, "product fetch failed");
                }
            }
            let _ = tx.send(message);
        })?;
    Ok(rx)
}

/// Fetch on the current thread; used by the one-shot CLI commands
pub fn load_now<S: ProductSource>(source: &S) -> Result<Vec<Product>> {
    source.fetch()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<Product>);

    impl ProductSource for FixedSource {
        fn fetch(&self) -> Result<Vec<Product>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    struct BrokenSource;

    impl ProductSource for BrokenSource {
        fn fetch(&self) -> Result<Vec<Product>> {
            Err(ProdViewError::UnexpectedStatus {
                status: 500,
                endpoint: "test://broken".to_string(),
            })
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn spawn_load_delivers_products() {
        let rx = spawn_load(FixedSource(vec![Product::new(1, "Mug", 4.5, "Ceramic")])).unwrap();
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            LoadMessage::Loaded(products) => assert_eq!(products.len(), 1),
            LoadMessage::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }

    #[test]
    fn spawn_load_delivers_failures() {
        let rx = spawn_load(BrokenSource).unwrap();
        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            LoadMessage::Failed(e) => assert_eq!(e.status(), Some(500)),
            LoadMessage::Loaded(_) => panic!("expected a failure"),
        }
    }

    #[test]
    fn parse_products_rejects_non_arrays() {
        let err = parse_products(br#"{"id":1}"#).unwrap_err();
        assert!(matches!(err, ProdViewError::Decode(_)));
    }

    #[test]
    fn parse_products_reads_array() {
        let body = br#"[
            {"id":1,"title":"A","price":1.5,"description":"x","category":"c"},
            {"id":2,"title":"B","price":2,"description":"y"}
        ]"#;
        let products = parse_products(body).unwrap();
        assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn endpoint_must_be_http() {
        assert!(matches!(
            HttpProductSource::new("ftp://example.com/products", None),
            Err(ProdViewError::InvalidEndpoint(..))
        ));
        assert!(matches!(
            HttpProductSource::new("not a url", None),
            Err(ProdViewError::InvalidEndpoint(..))
        ));
    }
}
