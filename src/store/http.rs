use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    config,
    store::{MovieStore, StoreError},
    types::{List, ListPatch, Movie, MoviePatch},
};

/// REST client for the local data API.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::api_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one so ids
    /// holding `/`, `#` or `?` stay a single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let invalid = || StoreError::Unavailable(format!("invalid base url {}", self.base_url));

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        entity: &'static str,
        id: &str,
    ) -> Result<T, StoreError> {
        let response = Self::check(request.send().await?, entity, id).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(
        &self,
        request: RequestBuilder,
        entity: &'static str,
        id: &str,
    ) -> Result<(), StoreError> {
        Self::check(request.send().await?, entity, id).await?;
        Ok(())
    }

    async fn check(
        response: reqwest::Response,
        entity: &'static str,
        id: &str,
    ) -> Result<reqwest::Response, StoreError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(StoreError::not_found(entity, id)),
            StatusCode::CONFLICT => Err(StoreError::conflict(entity, id)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl MovieStore for HttpStore {
    async fn get_lists(&self) -> Result<Vec<List>, StoreError> {
        self.send(self.client.get(self.url(&["lists"])?), "list", "*")
            .await
    }

    async fn create_list(&self, list: &List) -> Result<List, StoreError> {
        self.send(
            self.client.post(self.url(&["lists"])?).json(list),
            "list",
            &list.id,
        )
        .await
    }

    async fn update_list(&self, id: &str, patch: &ListPatch) -> Result<List, StoreError> {
        self.send(
            self.client
                .patch(self.url(&["lists", id])?)
                .json(patch),
            "list",
            id,
        )
        .await
    }

    async fn delete_list(&self, id: &str) -> Result<(), StoreError> {
        self.send_empty(
            self.client.delete(self.url(&["lists", id])?),
            "list",
            id,
        )
        .await
    }

    async fn get_custom_movies(&self) -> Result<Vec<Movie>, StoreError> {
        self.send(self.client.get(self.url(&["movies"])?), "movie", "*")
            .await
    }

    async fn create_movie(&self, movie: &Movie) -> Result<Movie, StoreError> {
        self.send(
            self.client.post(self.url(&["movies"])?).json(movie),
            "movie",
            &movie.id,
        )
        .await
    }

    async fn update_movie(&self, id: &str, patch: &MoviePatch) -> Result<Movie, StoreError> {
        self.send(
            self.client
                .patch(self.url(&["movies", id])?)
                .json(patch),
            "movie",
            id,
        )
        .await
    }

    async fn delete_movie(&self, id: &str) -> Result<(), StoreError> {
        self.send_empty(
            self.client.delete(self.url(&["movies", id])?),
            "movie",
            id,
        )
        .await
    }

    async fn add_movie_to_list(&self, list_id: &str, movie: &Movie) -> Result<List, StoreError> {
        self.send(
            self.client
                .post(self.url(&["lists", list_id, "movies"])?)
                .json(movie),
            "list",
            list_id,
        )
        .await
    }

    async fn remove_movie_from_list(
        &self,
        list_id: &str,
        movie_id: &str,
    ) -> Result<List, StoreError> {
        self.send(
            self.client
                .delete(self.url(&["lists", list_id, "movies", movie_id])?),
            "list",
            list_id,
        )
        .await
    }
}
