use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use reqwest::cookie::Jar;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::CatalogEntry;
use crate::config::ServerSettings;

use super::error::ClientError;
use super::types::{DeleteResponse, EditRequest, EditResponse, UploadOutcome};
use super::upload::UploadCandidate;

const LOGIN_PATH: &str = "/auth";

/// Where a URL points once resolved against the server base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Remote(Url),
    Local(PathBuf),
}

/// Blocking client for the upload server. Cheap to clone; clones share the session cookies.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    no_redirect: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(settings: &ServerSettings) -> Result<Self, ClientError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", settings.base_url)))?;
        let jar = Arc::new(Jar::default());
        let timeout = Duration::from_secs(settings.timeout_secs.max(1));

        let http = Client::builder()
            .cookie_provider(jar.clone())
            .redirect(Policy::limited(10))
            .timeout(timeout)
            .build()?;
        let no_redirect = Client::builder()
            .cookie_provider(jar)
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            no_redirect,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve `url` against the base. `file://` URLs resolve to local paths.
    pub fn resolve(&self, url: &str) -> Result<Resource, ClientError> {
        let joined = self
            .base
            .join(url)
            .map_err(|e| ClientError::InvalidUrl(format!("{url}: {e}")))?;
        if joined.scheme() == "file" {
            return joined
                .to_file_path()
                .map(Resource::Local)
                .map_err(|_| ClientError::InvalidUrl(url.to_string()));
        }
        Ok(Resource::Remote(joined))
    }

    fn remote(&self, url: &str) -> Result<Url, ClientError> {
        match self.resolve(url)? {
            Resource::Remote(u) => Ok(u),
            Resource::Local(p) => Err(ClientError::InvalidUrl(p.display().to_string())),
        }
    }

    /// Open a session. The server answers a bad login by rendering the login page again.
    pub fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.remote(LOGIN_PATH)?)
            .form(&[
                ("action", "login"),
                ("username", username),
                ("password", password),
            ])
            .send()?
            .error_for_status()?;

        if response.url().path() == LOGIN_PATH {
            return Err(ClientError::Rejected("invalid credentials".to_string()));
        }
        debug!(user = username, "signed in");
        Ok(())
    }

    /// Create an account. The server redirects to the login page on success and
    /// renders the form again when the name is taken.
    pub fn register(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .no_redirect
            .post(self.remote(LOGIN_PATH)?)
            .form(&[
                ("action", "register"),
                ("username", username),
                ("password", password),
            ])
            .send()?;

        if response.status().is_redirection() {
            debug!(user = username, "registered");
            return Ok(());
        }
        response.error_for_status()?;
        Err(ClientError::Rejected("username already taken".to_string()))
    }

    pub fn list_tracks(&self) -> Result<Vec<CatalogEntry>, ClientError> {
        let response = self
            .http
            .get(self.remote("/api/musicas")?)
            .send()?
            .error_for_status()?;
        if response.url().path() == LOGIN_PATH {
            return Err(ClientError::LoginRequired);
        }
        Ok(response.json()?)
    }

    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        match self.resolve(url)? {
            Resource::Local(path) => Ok(fs::read(path)?),
            Resource::Remote(u) => {
                let response = self.http.get(u).send()?.error_for_status()?;
                Ok(response.bytes()?.to_vec())
            }
        }
    }

    /// Succeeds when `url` names a reachable image.
    pub fn probe_image(&self, url: &str) -> Result<(), ClientError> {
        match self.resolve(url)? {
            Resource::Local(path) => {
                let is_image = mime_guess::from_path(&path)
                    .first()
                    .map(|m| m.essence_str().starts_with("image/"))
                    .unwrap_or(false);
                if is_image && path.is_file() {
                    Ok(())
                } else {
                    Err(ClientError::Unexpected(format!(
                        "{} is not an image",
                        path.display()
                    )))
                }
            }
            Resource::Remote(u) => {
                let response = self.http.get(u).send()?.error_for_status()?;
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let body = response.bytes()?;
                if content_type.starts_with("image/") && !body.is_empty() {
                    Ok(())
                } else {
                    Err(ClientError::Unexpected(format!(
                        "content type {content_type:?}"
                    )))
                }
            }
        }
    }

    /// Post a validated batch as `file` multipart fields.
    pub fn upload(
        &self,
        upload_path: &str,
        batch: &[UploadCandidate],
    ) -> Result<UploadOutcome, ClientError> {
        let target = self.remote(upload_path)?;
        let mut form = Form::new();
        for candidate in batch {
            let part = Part::bytes(fs::read(&candidate.path)?)
                .file_name(candidate.name.clone())
                .mime_str(&candidate.mime)?;
            form = form.part("file", part);
        }

        let response = self.no_redirect.post(target.clone()).multipart(form).send()?;
        if response.status().is_redirection() {
            let location = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|loc| target.join(loc).ok())
                .unwrap_or(target);
            return Ok(UploadOutcome::Redirected(location.to_string()));
        }
        response.error_for_status()?;
        Ok(UploadOutcome::Completed)
    }

    pub fn delete_track(&self, file: &str) -> Result<DeleteResponse, ClientError> {
        let url = self.remote(&format!("/delete/{}", urlencoding::encode(file)))?;
        let response = self.http.post(url).send()?;
        decode_json(response)
    }

    pub fn edit_metadata(&self, request: &EditRequest) -> Result<EditResponse, ClientError> {
        let mut form = Form::new().text("file", request.file.clone());
        if let Some(title) = &request.title {
            form = form.text("title", title.clone());
        }
        if let Some(artist) = &request.artist {
            form = form.text("artist", artist.clone());
        }
        if let Some(cover) = &request.cover {
            let name = cover
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("cover")
                .to_string();
            let mime = mime_guess::from_path(cover).first_or_octet_stream();
            let part = Part::bytes(fs::read(cover)?)
                .file_name(name)
                .mime_str(mime.essence_str())?;
            form = form.part("cover", part);
        }
        if request.remove_cover {
            form = form.text("remove_cover", "true");
        }

        let response = self
            .http
            .post(self.remote("/edit_metadata")?)
            .multipart(form)
            .send()?;
        decode_json(response)
    }
}

/// Decode a JSON body whatever the status; the server reports failures in the body.
fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if response.url().path() == LOGIN_PATH {
        return Err(ClientError::LoginRequired);
    }
    let text = response.text()?;
    serde_json::from_str(&text).map_err(|e| ClientError::Unexpected(format!("{status}: {e}")))
}
