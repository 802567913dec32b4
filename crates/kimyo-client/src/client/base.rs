use crate::error::{Error, HttpError, InternalError};
use async_trait::async_trait;
use http::Method;
use kimyo_http::{BaseHttpClient, FilePart};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: ApiUrl,
}

impl Config {
    /// `base_url` is the directory the PHP scripts live in and must end
    /// with a trailing slash, e.g. `https://example.org/api/`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: ApiUrl { url: base_url },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiUrl {
    pub url: Url,
}

impl From<ApiUrl> for Url {
    fn from(api_url: ApiUrl) -> Self {
        api_url.url
    }
}

impl ApiUrl {
    pub fn endpoint(&self, script: &str) -> Result<Url, InternalError> {
        self.url.join(script).map_err(Into::into)
    }
}

#[async_trait]
pub trait BaseClient: Send + Sync {
    type Http: BaseHttpClient<Error = kimyo_http::Error>;

    fn http_client(&self) -> &Self::Http;
    fn config(&self) -> &Config;

    async fn api_get<T: DeserializeOwned>(&self, script: &str, query: &[(&str, &str)]) -> Result<T, Error> {
        let mut url = self.config().base_url.endpoint(script)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        tracing::debug!(%url, "sending API request");
        let request = http::request::Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .body(Vec::new())
            .map_err(HttpError::from)?;
        let response = self
            .http_client()
            .request_json(request)
            .await
            .map_err(HttpError::from)?;
        Ok(response.into_body())
    }

    async fn api_send<T, B>(&self, method: Method, script: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.config().base_url.endpoint(script)?;
        let payload = serde_json::to_vec(body)?;
        tracing::debug!(%url, ?method, "sending API request");
        let request = http::request::Request::builder()
            .method(method)
            .uri(url.as_str())
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .map_err(HttpError::from)?;
        let response = self
            .http_client()
            .request_json(request)
            .await
            .map_err(HttpError::from)?;
        Ok(response.into_body())
    }

    async fn api_upload<T: DeserializeOwned>(&self, script: &str, part: FilePart) -> Result<T, Error> {
        let url = self.config().base_url.endpoint(script)?;
        tracing::debug!(%url, file = %part.file_name, "uploading file");
        let response = self
            .http_client()
            .request_multipart(url, part)
            .await
            .map_err(HttpError::from)?;
        Ok(response.into_body())
    }
}
