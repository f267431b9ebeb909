//! reqwest-backed gateway talking to a live crafty server

use crate::envelope::{ValueEnvelope, ValuesEnvelope};
use crate::{
    Container, FileEntry, Gateway, GatewayError, LifecycleAction, MakeDirRequest, MultipartBody,
    NewContainer, PartValue, Result,
};
use async_trait::async_trait;
use crafty_config::ServerConfig;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// Gateway that issues HTTP requests against the configured server
pub struct HttpGateway {
    client: reqwest::Client,
    /// Always ends with `/` so relative joins keep any path prefix
    base: Url,
    credentials: Option<(String, Option<String>)>,
}

impl HttpGateway {
    /// Create a gateway for the given server settings
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut raw = config.url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw).map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", raw, e)))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(raw));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        let credentials = config
            .username
            .as_ref()
            .map(|user| (user.clone(), config.password.clone()));

        Ok(Self {
            client,
            base,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build `base + segments`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn with_path_query(mut url: Url, path: &str) -> Url {
        url.query_pairs_mut().append_pair("path", path);
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, password.as_ref()),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body, whatever the status
    ///
    /// The server reports failures as a 500 with an `{error}` envelope, so the
    /// body is decoded first and the status only decides the fallback error.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<T>(&body) {
            Ok(decoded) => Ok(decoded),
            Err(_) if !status.is_success() => Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(GatewayError::Decode(e.to_string())),
        }
    }

    async fn send_values<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Vec<T>> {
        self.send::<ValuesEnvelope<T>>(builder).await?.into_result()
    }

    async fn send_value<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Option<T>> {
        self.send::<ValueEnvelope<T>>(builder).await?.into_result()
    }

    /// For endpoints whose payload we ignore; an empty body counts as success
    async fn send_ack(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if let Ok(envelope) = serde_json::from_str::<ValueEnvelope<serde_json::Value>>(&body) {
            envelope.into_result()?;
        }
        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

fn into_form(body: MultipartBody) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in body.parts() {
        form = match &part.value {
            PartValue::Text(text) => form.text(part.name.clone(), text.clone()),
            PartValue::File(file) => {
                let file_part = reqwest::multipart::Part::bytes(file.contents.clone())
                    .file_name(file.file_name.clone())
                    .mime_str("application/octet-stream")
                    .map_err(|e| GatewayError::Connection(e.to_string()))?;
                form.part(part.name.clone(), file_part)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_containers(&self) -> Result<Vec<Container>> {
        let url = self.endpoint(&["api", "containers", ""]);
        self.send_values(self.request(Method::GET, url)).await
    }

    async fn list_versions(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["api", "versions"]);
        self.send_values(self.request(Method::GET, url)).await
    }

    async fn create_container(&self, request: &NewContainer) -> Result<Option<Container>> {
        let url = self.endpoint(&["api", "containers", ""]);
        self.send_value(self.request(Method::POST, url).json(request))
            .await
    }

    async fn container_action(&self, name: &str, action: LifecycleAction) -> Result<()> {
        let url = self.endpoint(&["api", "containers", name, action.as_str()]);
        self.send_ack(self.request(Method::PUT, url)).await
    }

    async fn remove_container(&self, name: &str) -> Result<()> {
        let url = self.endpoint(&["api", "containers", name]);
        self.send_ack(self.request(Method::DELETE, url)).await
    }

    async fn list_workspace(&self, name: &str, path: &str) -> Result<Vec<FileEntry>> {
        let url = Self::with_path_query(
            self.endpoint(&["api", "containers", name, "workspace"]),
            path,
        );
        self.send_values(self.request(Method::GET, url)).await
    }

    async fn upload(&self, name: &str, body: MultipartBody) -> Result<()> {
        let url = self.endpoint(&["api", "containers", name, "workspace", "upload"]);
        let form = into_form(body)?;
        self.send_ack(self.request(Method::POST, url).multipart(form))
            .await
    }

    async fn make_dir(&self, name: &str, request: &MakeDirRequest) -> Result<()> {
        let url = self.endpoint(&["api", "containers", name, "workspace", "mkdir"]);
        self.send_ack(self.request(Method::POST, url).json(request))
            .await
    }

    async fn delete_file(&self, name: &str, path: &str) -> Result<()> {
        let url = Self::with_path_query(
            self.endpoint(&["api", "containers", name, "workspace", "file"]),
            path,
        );
        self.send_ack(self.request(Method::DELETE, url)).await
    }

    fn download_url(&self, name: &str, path: Option<&str>) -> String {
        let url = self.endpoint(&["workspace", name, "file"]);
        match path {
            Some(path) => Self::with_path_query(url, path).to_string(),
            None => url.to_string(),
        }
    }
}
