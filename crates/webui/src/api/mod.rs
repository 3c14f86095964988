//! REST client for the FEICOM API.

pub mod error;

pub use error::{ApiError, NETWORK_ERROR};

use crate::{
    API_PREFIX,
    config::ApiConfig,
    model::{
        Agence, Commune, Departement, Entreprise, Exercice, Lookup, Lookups, Lot, Projet, Resource,
        Session, session::LoginResponse,
    },
};
use futures::future::{join_all, try_join_all};
use reqwest::{
    Method, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use std::{fmt, rc::Rc};
use url::Url;

/// Server-side project filter: `filters/projects/<exercice>/<agence>/[<month>/]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectsQuery {
    pub exercice: i64,
    pub agence: i64,
    /// 1-12
    pub month: Option<u32>,
}

impl ProjectsQuery {
    pub fn path(&self) -> String {
        match self.month {
            Some(month) => format!(
                "filters/projects/{}/{}/{month}/",
                self.exercice, self.agence
            ),
            None => format!("filters/projects/{}/{}/", self.exercice, self.agence),
        }
    }
}

/// Collections come either bare or wrapped in a paginated envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Paginated { results: Vec<T> },
}

impl<T> From<ListResponse<T>> for Vec<T> {
    fn from(response: ListResponse<T>) -> Self {
        match response {
            ListResponse::Bare(items) | ListResponse::Paginated { results: items } => items,
        }
    }
}

enum Fetched {
    Agences(Vec<Agence>),
    Departements(Vec<Departement>),
    Communes(Vec<Commune>),
    Entreprises(Vec<Entreprise>),
    Exercices(Vec<Exercice>),
    Lots(Vec<Lot>),
    Projets(Vec<Projet>),
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    token: Option<String>,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.token == other.token
            && match (&self.on_unauthorized, &other.on_unauthorized) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: None,
            on_unauthorized: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Called whenever the server answers 401.
    #[must_use]
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.config.base_url.join(API_PREFIX)?.join(path)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        log::debug!("{method} {url}");
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Token {token}"));
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(self.config.timeout);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await.inspect_err(|err| {
            log::error!("Request failed - {err:?}");
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = read_body(response).await;
        if status == StatusCode::UNAUTHORIZED {
            log::warn!("Got 401, closing the session");
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(ApiError::Unauthorized { body });
        }
        log::error!("Got {status} - {body:?}");
        Err(ApiError::Server {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let text = self.send(builder).await?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn list_at<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let response: ListResponse<T> = self.send_json(self.request(Method::GET, path)?).await?;
        Ok(response.into())
    }

    /// Form-encoded credentials, as the login endpoint expects.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ApiError> {
        let builder = self
            .request(Method::POST, "login/")?
            .form(&[("username", username), ("password", password)]);
        let response: LoginResponse = self.send_json(builder).await?;
        Ok(response.into())
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        self.list_at(R::ENDPOINT).await
    }

    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        let path = format!("{}{id}/", R::ENDPOINT);
        self.send_json(self.request(Method::GET, &path)?).await
    }

    pub async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<R, ApiError> {
        let builder = self.request(Method::POST, R::ENDPOINT)?.json(payload);
        self.send_json(builder).await
    }

    pub async fn update<R: Resource>(&self, id: i64, payload: &R::Payload) -> Result<R, ApiError> {
        let path = format!("{}{id}/", R::ENDPOINT);
        let builder = self.request(Method::PUT, &path)?.json(payload);
        self.send_json(builder).await
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        let path = format!("{}{id}/", R::ENDPOINT);
        self.send(self.request(Method::DELETE, &path)?).await?;
        Ok(())
    }

    /// One DELETE per id, all in flight at once. Fails if any of them fails.
    pub async fn delete_many<R: Resource>(&self, ids: &[i64]) -> Result<(), ApiError> {
        try_join_all(ids.iter().map(|id| self.delete::<R>(*id))).await?;
        Ok(())
    }

    pub async fn projects_by_filters(&self, query: &ProjectsQuery) -> Result<Vec<Projet>, ApiError> {
        self.list_at(&query.path()).await
    }

    /// Fetches the requested reference lists concurrently. Each list stands
    /// alone: the ones that loaded are kept, the others are reported with
    /// their error.
    pub async fn lookups(&self, wanted: &[Lookup]) -> (Lookups, Vec<(Lookup, ApiError)>) {
        let mut kinds = wanted.to_vec();
        kinds.sort();
        kinds.dedup();
        let fetched = join_all(
            kinds
                .into_iter()
                .map(|kind| async move { (kind, self.fetch_lookup(kind).await) }),
        )
        .await;
        let mut lookups = Lookups::default();
        let mut failures = Vec::new();
        for (kind, list) in fetched {
            match list {
                Ok(Fetched::Agences(items)) => lookups.agences = items,
                Ok(Fetched::Departements(items)) => lookups.departements = items,
                Ok(Fetched::Communes(items)) => lookups.communes = items,
                Ok(Fetched::Entreprises(items)) => lookups.entreprises = items,
                Ok(Fetched::Exercices(items)) => lookups.exercices = items,
                Ok(Fetched::Lots(items)) => lookups.lots = items,
                Ok(Fetched::Projets(items)) => lookups.projets = items,
                Err(err) => failures.push((kind, err)),
            }
        }
        (lookups, failures)
    }

    async fn fetch_lookup(&self, kind: Lookup) -> Result<Fetched, ApiError> {
        Ok(match kind {
            Lookup::Agences => Fetched::Agences(self.list().await?),
            Lookup::Departements => Fetched::Departements(self.list().await?),
            Lookup::Communes => Fetched::Communes(self.list().await?),
            Lookup::Entreprises => Fetched::Entreprises(self.list().await?),
            Lookup::Exercices => Fetched::Exercices(self.list().await?),
            Lookup::Lots => Fetched::Lots(self.list().await?),
            Lookup::Projets => Fetched::Projets(self.list().await?),
        })
    }
}

/// Error payload: JSON when possible, raw text otherwise.
async fn read_body(response: Response) -> Option<Value> {
    let text = response.text().await.ok()?;
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_adds_a_path_segment() {
        let query = ProjectsQuery {
            exercice: 3,
            agence: 7,
            month: None,
        };
        assert_eq!(query.path(), "filters/projects/3/7/");
        let query = ProjectsQuery {
            month: Some(11),
            ..query
        };
        assert_eq!(query.path(), "filters/projects/3/7/11/");
    }

    #[test]
    fn list_accepts_bare_and_paginated() {
        let bare: ListResponse<Agence> =
            serde_json::from_str(r#"[{"id": 1, "nom": "Centre"}]"#).unwrap();
        assert_eq!(Vec::from(bare).len(), 1);
        let paginated: ListResponse<Agence> =
            serde_json::from_str(r#"{"count": 1, "next": null, "results": [{"id": 1, "nom": "Centre"}]}"#)
                .unwrap();
        assert_eq!(Vec::from(paginated).len(), 1);
        assert!(serde_json::from_str::<ListResponse<Agence>>(r#"{"count": 0}"#).is_err());
    }

    #[test]
    fn endpoint_urls_keep_base_path() {
        let client =
            ApiClient::new(ApiConfig::new("https://fcom.example.org/backend").unwrap());
        assert_eq!(
            client.url("agences/12/").unwrap().as_str(),
            "https://fcom.example.org/backend/feicom/api/agences/12/"
        );
    }

    #[test]
    fn clients_compare_by_token() {
        let config = ApiConfig::new("http://localhost:8000").unwrap();
        let anonymous = ApiClient::new(config.clone());
        let signed_in = ApiClient::new(config).with_token(Some("abc".into()));
        assert_ne!(anonymous, signed_in);
        assert_eq!(signed_in.clone(), signed_in);
        assert!(!anonymous.is_authenticated());
    }
}
