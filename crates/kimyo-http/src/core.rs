use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

pub type HttpRequest = http::request::Request<Vec<u8>>;

pub type HttpResponse<T> = http::response::Response<T>;

/// A file destined for a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Transport abstraction the API client is written against. Requests are
/// issued exactly once; retrying is the caller's decision, never the
/// transport's.
#[async_trait]
pub trait BaseHttpClient: Send + Sync + Default + Clone {
    type Error;

    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Self::Error>;

    async fn request_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<HttpResponse<T>, Self::Error>;

    /// Multipart POST of a single file under the form field `file`.
    async fn request_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        part: FilePart,
    ) -> Result<HttpResponse<T>, Self::Error>;
}
