use reqwest::Client;

use crate::{
    config::{self, ConfigError},
    types::{Movie, SearchMoviesResponse},
};

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(config::tmdb_api_url(), config::tmdb_api_key()?))
    }

    /// Searches movies by title and returns the first result page.
    ///
    /// # Example
    ///
    /// ```
    /// let client = TmdbClient::from_env()?;
    /// let movies = client.search_movies("Alien").await?;
    /// ```
    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, reqwest::Error> {
        let api_url = format!("{uri}/search/movie", uri = self.base_url);
        let response = self
            .client
            .get(&api_url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?
            .error_for_status()?;

        let res = response.json::<SearchMoviesResponse>().await?;
        Ok(res.results)
    }

    pub async fn get_movie(&self, id: &str) -> Result<Movie, reqwest::Error> {
        let api_url = format!("{uri}/movie/{id}", uri = self.base_url, id = id);
        let response = self
            .client
            .get(&api_url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        response.json::<Movie>().await
    }
}
