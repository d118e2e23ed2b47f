use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::blocking::RequestBuilder;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest_cookie_store::{CookieStore, CookieStoreRwLock};
use url::Url;

pub mod error;
pub mod folders;

use error::ApiClientError;

pub(crate) struct Login {
    user: String,
    password: String,
}

/// Request-dispatch collaborator the endpoint structs run through. Owns the
/// server url, credentials, and the session cookie jar; endpoint modules only
/// contribute a relative path and an optional body.
pub struct ApiClient {
    pub(crate) cookie_file: Option<Box<Path>>,
    pub(crate) store: Arc<CookieStoreRwLock>,
    pub(crate) client: reqwest::blocking::Client,
    pub(crate) login: Option<Login>,
    pub(crate) url: Url,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            secure: false,
            host: String::from("localhost"),
            port: None,
            login: None,
            file: None,
            exists: false,
            agent: None,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub(crate) fn get<U>(&self, path: U) -> RequestBuilder
    where
        U: AsRef<str>,
    {
        let url = self.url.join(path.as_ref()).unwrap();

        tracing::debug!("GET {}", url);

        self.with_login(self.client.get(url))
    }

    pub(crate) fn post<U>(&self, path: U) -> RequestBuilder
    where
        U: AsRef<str>,
    {
        let url = self.url.join(path.as_ref()).unwrap();

        tracing::debug!("POST {}", url);

        self.with_login(self.client.post(url))
    }

    pub(crate) fn delete<U>(&self, path: U) -> RequestBuilder
    where
        U: AsRef<str>,
    {
        let url = self.url.join(path.as_ref()).unwrap();

        tracing::debug!("DELETE {}", url);

        self.with_login(self.client.delete(url))
    }

    fn with_login(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(login) = &self.login {
            builder.basic_auth(&login.user, Some(&login.password))
        } else {
            builder
        }
    }

    pub fn save_session(&self) -> Result<bool, ApiClientError> {
        let Some(cookie_file) = &self.cookie_file else {
            return Ok(false);
        };

        let store = self.store.read()
            .map_err(|_| ApiClientError::PoisonedLock)?;
        let file = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(cookie_file)
            .map_err(|source| ApiClientError::CookieFile {
                path: cookie_file.to_path_buf(),
                source,
            })?;
        let mut writer = std::io::BufWriter::new(file);

        store.save_json(&mut writer)
            .map_err(ApiClientError::CookieFormat)?;

        Ok(true)
    }
}

pub struct ApiClientBuilder {
    secure: bool,
    host: String,
    port: Option<u16>,
    login: Option<Login>,
    file: Option<PathBuf>,
    exists: bool,
    agent: Option<String>,
}

impl ApiClientBuilder {
    pub fn secure(&mut self, is_secure: bool) {
        self.secure = is_secure;
    }

    pub fn host<H>(&mut self, host: H)
    where
        H: Into<String>,
    {
        self.host = host.into();
    }

    pub fn port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    pub fn login<U, P>(&mut self, user: U, password: P)
    where
        U: Into<String>,
        P: Into<String>,
    {
        self.login = Some(Login {
            user: user.into(),
            password: password.into(),
        });
    }

    pub fn cookie_file(&mut self, path: PathBuf) {
        self.file = Some(path);
    }

    pub fn cookie_file_exists(&mut self, exists: bool) {
        self.exists = exists;
    }

    pub fn user_agent<U>(&mut self, user_agent: U)
    where
        U: Into<String>,
    {
        self.agent = Some(user_agent.into());
    }

    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        let scheme = if self.secure { "https" } else { "http" };
        let mut url = Url::parse(&format!("{}://{}/", scheme, self.host))
            .map_err(|_| ApiClientError::InvalidHost(self.host.clone()))?;

        url.set_port(self.port)
            .map_err(|_| ApiClientError::InvalidHost(self.host.clone()))?;

        let store = match &self.file {
            Some(path) => match std::fs::OpenOptions::new().read(true).open(path) {
                Ok(file) => {
                    let reader = std::io::BufReader::new(file);

                    CookieStore::load_json(reader)
                        .map_err(ApiClientError::CookieFormat)?
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound && !self.exists => {
                    CookieStore::default()
                }
                Err(err) => {
                    return Err(ApiClientError::CookieFile {
                        path: path.clone(),
                        source: err,
                    });
                }
            },
            None => CookieStore::default(),
        };

        let store = Arc::new(CookieStoreRwLock::new(store));

        // the OCS layer rejects requests without the marker header and only
        // renders json when asked for it
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("ocs-apirequest"),
            HeaderValue::from_static("true"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let user_agent = self.agent.unwrap_or(String::from("groupfolders-api/0.1.0"));
        let client = reqwest::blocking::Client::builder()
            .cookie_provider(store.clone())
            .default_headers(headers)
            .user_agent(user_agent)
            .build()
            .map_err(ApiClientError::Reqwest)?;

        Ok(ApiClient {
            cookie_file: self.file.map(|v| v.into_boxed_path()),
            store,
            client,
            login: self.login,
            url,
        })
    }
}
