//! Client library for the inklet REST API.
//!
//! Wraps the HTTP transport (`reqwest`) behind a typed async API. The client
//! stores the JWT returned by `register`/`login` and sends it automatically
//! with every subsequent call; all post and category routes require it.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{ClientError, ClientResult};
pub use models::{AuthResponse, Category, Post, User};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Typed client for the inklet REST API.
pub struct ApiClient {
    http: HttpClient,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for a server base URL, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(base_url),
            token: None,
        }
    }

    /// Sets the JWT manually (e.g. restored from disk).
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Returns the current JWT, if any.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Drops the stored JWT.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Registers a user and stores the returned JWT in the client.
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        let result = self.http.register(username, email, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Logs a user in and stores the returned JWT in the client.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        let result = self.http.login(username, password).await?;
        self.token = Some(result.access_token.clone());
        Ok(result)
    }

    /// Acknowledges the logout server-side and drops the stored JWT.
    pub async fn logout(&mut self) -> ClientResult<()> {
        let token = self.require_token()?.to_string();
        self.http.logout(&token).await?;
        self.token = None;
        Ok(())
    }

    /// Lists all posts, newest first.
    pub async fn list_posts(&self) -> ClientResult<Vec<Post>> {
        self.http.list_posts(self.require_token()?).await
    }

    /// Returns a post by id.
    pub async fn get_post(&self, id: i64) -> ClientResult<Post> {
        self.http.get_post(self.require_token()?, id).await
    }

    /// Creates a post in a category. Requires an admin token.
    pub async fn create_post(
        &self,
        title: &str,
        body: &str,
        category_id: i64,
    ) -> ClientResult<Post> {
        self.http
            .create_post(self.require_token()?, title, body, category_id)
            .await
    }

    /// Partially updates a post: absent fields keep their current values.
    /// Requires an admin token.
    pub async fn update_post(
        &self,
        id: i64,
        title: Option<&str>,
        body: Option<&str>,
        category_id: Option<i64>,
    ) -> ClientResult<Post> {
        self.http
            .update_post(self.require_token()?, id, title, body, category_id)
            .await
    }

    /// Deletes a post by id. Requires an admin token.
    pub async fn delete_post(&self, id: i64) -> ClientResult<()> {
        self.http.delete_post(self.require_token()?, id).await
    }

    /// Lists all categories.
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.http.list_categories(self.require_token()?).await
    }

    /// Returns a category by id.
    pub async fn get_category(&self, id: i64) -> ClientResult<Category> {
        self.http.get_category(self.require_token()?, id).await
    }

    /// Creates a category. Requires an admin token.
    pub async fn create_category(&self, name: &str) -> ClientResult<Category> {
        self.http
            .create_category(self.require_token()?, name)
            .await
    }

    /// Partially updates a category. Requires an admin token.
    pub async fn update_category(&self, id: i64, name: Option<&str>) -> ClientResult<Category> {
        self.http
            .update_category(self.require_token()?, id, name)
            .await
    }

    /// Deletes a category by id. Fails while posts still reference it.
    /// Requires an admin token.
    pub async fn delete_category(&self, id: i64) -> ClientResult<()> {
        self.http.delete_category(self.require_token()?, id).await
    }

    fn require_token(&self) -> ClientResult<&str> {
        self.token.as_deref().ok_or(ClientError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, ClientError};

    #[tokio::test]
    async fn calls_without_token_fail_locally() {
        let client = ApiClient::new("http://127.0.0.1:8080");
        let err = client.list_posts().await.expect_err("token is required");
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[test]
    fn token_management_round_trips() {
        let mut client = ApiClient::new("http://127.0.0.1:8080");
        assert!(client.get_token().is_none());

        client.set_token("abc.def.ghi");
        assert_eq!(client.get_token(), Some("abc.def.ghi"));

        client.clear_token();
        assert!(client.get_token().is_none());
    }
}
