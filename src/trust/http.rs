//! HTTP client trait for talking to the Trust Service.

/// HTTP POST request to be sent by an HTTP client.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// The URL to send the request to.
    pub url: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

/// HTTP response from an HTTP client.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Low-level, blocking HTTP client trait.
///
/// This trait provides a pure HTTP interface with no knowledge of the Trust Service
/// envelope. Wrap it in [`HttpTrustServiceClient`](super::HttpTrustServiceClient) to get a
/// [`TrustServiceClient`](super::TrustServiceClient).
pub trait HttpClient: Send + Sync {
    /// The error type returned by this HTTP client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send an HTTP request and return the response.
    fn request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

/// Error returned when using `()` as an HTTP client (trust checking disabled).
#[derive(Debug, thiserror::Error)]
#[error("trust checking is disabled (no HTTP client configured)")]
pub struct NoHttpClientError;

/// Implementation of [`HttpClient`] for `()` that always returns an error.
///
/// Every trust check made through it fails with a transport failure.
impl HttpClient for () {
    type Error = NoHttpClientError;

    fn request(&self, _request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        Err(NoHttpClientError)
    }
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    type Error = T::Error;

    fn request(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        (**self).request(request)
    }
}
