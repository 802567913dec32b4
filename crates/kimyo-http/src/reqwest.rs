use crate::core::{BaseHttpClient, FilePart, HttpRequest, HttpResponse};
use crate::error::Error;
use async_trait::async_trait;
use reqwest::{Request, Response};
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new().expect("failed to create default client")
    }
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, Error> {
        let mut client_builder = reqwest::ClientBuilder::new();
        client_builder = client_builder.redirect(reqwest::redirect::Policy::none());

        let client = client_builder.build()?;

        Ok(Self { client })
    }

    fn build_request(&self, request: HttpRequest) -> Result<Request, Error> {
        let mut request_builder = self
            .client
            .request(request.method().clone(), request.uri().to_string());
        for (name, value) in request.headers() {
            request_builder = request_builder.header(name.as_str(), value.as_bytes());
        }
        request_builder.body(request.into_body()).build().map_err(Into::into)
    }

    async fn check_status(response: Response) -> Result<Response, Error> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(Error::Status { status, body })
        }
    }

    async fn into_json_response<T: DeserializeOwned>(response: Response) -> Result<HttpResponse<T>, Error> {
        let response = Self::check_status(response).await?;
        let status_code = response.status();
        let headers = response.headers().clone();
        let body = response.json().await?;
        let mut http_response = http::response::Response::builder().status(status_code);
        if let Some(header_map) = http_response.headers_mut() {
            header_map.extend(headers);
        }
        http_response.body(body).map_err(Into::into)
    }
}

#[async_trait]
impl BaseHttpClient for ReqwestHttpClient {
    type Error = Error;

    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Self::Error> {
        let response = self.client.execute(self.build_request(request)?).await?;
        let response = Self::check_status(response).await?;

        let status_code = response.status();
        let text = response.text().await?;

        http::response::Response::builder()
            .status(status_code)
            .body(text)
            .map_err(Into::into)
    }

    async fn request_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<HttpResponse<T>, Self::Error> {
        let response = self.client.execute(self.build_request(request)?).await?;
        Self::into_json_response(response).await
    }

    async fn request_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        part: FilePart,
    ) -> Result<HttpResponse<T>, Self::Error> {
        let file = reqwest::multipart::Part::bytes(part.bytes)
            .file_name(part.file_name)
            .mime_str(&part.mime)?;
        let form = reqwest::multipart::Form::new().part("file", file);
        let response = self.client.post(url).multipart(form).send().await?;
        Self::into_json_response(response).await
    }
}
