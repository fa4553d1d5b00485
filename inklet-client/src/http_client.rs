use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{ClientError, ClientResult};
use crate::models::{AuthResponse, Category, Post, User};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct CreatePostRequestDto<'a> {
    title: &'a str,
    body: &'a str,
    category_id: i64,
}

/// Absent fields are omitted from the payload so the server leaves them
/// untouched.
#[derive(Debug, Serialize)]
struct UpdatePostRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct CreateCategoryRequestDto<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateCategoryRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorResponseDto {
    fn into_message(self) -> Option<String> {
        if let Some(error) = self.error {
            return Some(error);
        }
        let errors = self.errors?;
        let joined = errors
            .into_iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
        if joined.is_empty() { None } else { Some(joined) }
    }
}

#[derive(Debug, Deserialize)]
struct DataDto<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct AuthResponseDto {
    access_token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: i64,
    username: String,
    email: String,
    role: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
struct CategoryDto {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: i64,
    title: String,
    body: String,
    user: UserDto,
    category: CategoryDto,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            role: value.role,
            created_at: value.created_at,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(value: CategoryDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            body: value.body,
            user: value.user.into(),
            category: value.category.into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<AuthResponseDto> for AuthResponse {
    fn from(value: AuthResponseDto) -> Self {
        Self {
            access_token: value.access_token,
            user: value.user.into(),
        }
    }
}

#[derive(Debug, Clone)]
/// Plain HTTP transport for the inklet REST API.
pub(crate) struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> ClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body.into_message(),
            Err(_) => None,
        };
        ClientError::from_http_status(status, message)
    }

    /// Sends a request with an optional JSON payload and bearer token, and
    /// decodes a JSON response.
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: Option<&TReq>,
        token: Option<&str>,
    ) -> ClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(ClientError::from_reqwest)
    }

    /// Sends a request that expects an empty (204) response.
    async fn send_no_content(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> ClientResult<()> {
        let url = self.endpoint(path);

        let response = self
            .client
            .request(method, url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(())
    }

    pub(crate) async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        let payload = RegisterRequestDto {
            username,
            email,
            password,
        };
        let dto: AuthResponseDto = self
            .send_json(Method::POST, "/api/register", Some(&payload), None)
            .await?;
        Ok(dto.into())
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> ClientResult<AuthResponse> {
        let payload = LoginRequestDto { username, password };
        let dto: AuthResponseDto = self
            .send_json(Method::POST, "/api/login", Some(&payload), None)
            .await?;
        Ok(dto.into())
    }

    pub(crate) async fn logout(&self, token: &str) -> ClientResult<()> {
        let _: serde::de::IgnoredAny = self
            .send_json::<(), _>(Method::POST, "/api/logout", None, Some(token))
            .await?;
        Ok(())
    }

    pub(crate) async fn list_posts(&self, token: &str) -> ClientResult<Vec<Post>> {
        let dto: DataDto<Vec<PostDto>> = self
            .send_json::<(), _>(Method::GET, "/api/posts", None, Some(token))
            .await?;
        Ok(dto.data.into_iter().map(Post::from).collect())
    }

    pub(crate) async fn get_post(&self, token: &str, id: i64) -> ClientResult<Post> {
        let dto: DataDto<PostDto> = self
            .send_json::<(), _>(Method::GET, &format!("/api/posts/{id}"), None, Some(token))
            .await?;
        Ok(dto.data.into())
    }

    pub(crate) async fn create_post(
        &self,
        token: &str,
        title: &str,
        body: &str,
        category_id: i64,
    ) -> ClientResult<Post> {
        let payload = CreatePostRequestDto {
            title,
            body,
            category_id,
        };
        let dto: DataDto<PostDto> = self
            .send_json(Method::POST, "/api/posts", Some(&payload), Some(token))
            .await?;
        Ok(dto.data.into())
    }

    pub(crate) async fn update_post(
        &self,
        token: &str,
        id: i64,
        title: Option<&str>,
        body: Option<&str>,
        category_id: Option<i64>,
    ) -> ClientResult<Post> {
        let payload = UpdatePostRequestDto {
            title,
            body,
            category_id,
        };
        let dto: DataDto<PostDto> = self
            .send_json(
                Method::PUT,
                &format!("/api/posts/{id}"),
                Some(&payload),
                Some(token),
            )
            .await?;
        Ok(dto.data.into())
    }

    pub(crate) async fn delete_post(&self, token: &str, id: i64) -> ClientResult<()> {
        self.send_no_content(Method::DELETE, &format!("/api/posts/{id}"), token)
            .await
    }

    pub(crate) async fn list_categories(&self, token: &str) -> ClientResult<Vec<Category>> {
        let dto: DataDto<Vec<CategoryDto>> = self
            .send_json::<(), _>(Method::GET, "/api/categories", None, Some(token))
            .await?;
        Ok(dto.data.into_iter().map(Category::from).collect())
    }

    pub(crate) async fn get_category(&self, token: &str, id: i64) -> ClientResult<Category> {
        let dto: DataDto<CategoryDto> = self
            .send_json::<(), _>(
                Method::GET,
                &format!("/api/categories/{id}"),
                None,
                Some(token),
            )
            .await?;
        Ok(dto.data.into())
    }

    pub(crate) async fn create_category(&self, token: &str, name: &str) -> ClientResult<Category> {
        let payload = CreateCategoryRequestDto { name };
        let dto: DataDto<CategoryDto> = self
            .send_json(Method::POST, "/api/categories", Some(&payload), Some(token))
            .await?;
        Ok(dto.data.into())
    }

    pub(crate) async fn update_category(
        &self,
        token: &str,
        id: i64,
        name: Option<&str>,
    ) -> ClientResult<Category> {
        let payload = UpdateCategoryRequestDto { name };
        let dto: DataDto<CategoryDto> = self
            .send_json(
                Method::PUT,
                &format!("/api/categories/{id}"),
                Some(&payload),
                Some(token),
            )
            .await?;
        Ok(dto.data.into())
    }

    pub(crate) async fn delete_category(&self, token: &str, id: i64) -> ClientResult<()> {
        self.send_no_content(Method::DELETE, &format!("/api/categories/{id}"), token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn endpoint_normalizes_slashes() {
        let client = HttpClient::new("http://localhost:8080/");
        let full = client.endpoint("/api/posts");
        assert_eq!(full, "http://localhost:8080/api/posts");
    }

    #[test]
    fn update_post_payload_omits_absent_fields() {
        let payload = UpdatePostRequestDto {
            title: Some("new title"),
            body: None,
            category_id: None,
        };
        let json = serde_json::to_value(&payload).expect("payload must serialize");
        assert_eq!(json, serde_json::json!({"title": "new title"}));
    }

    #[test]
    fn error_body_with_error_key_becomes_the_message() {
        let dto = ErrorResponseDto {
            error: Some("forbidden".to_string()),
            errors: None,
        };
        assert_eq!(dto.into_message().as_deref(), Some("forbidden"));
    }

    #[test]
    fn error_body_with_field_errors_is_joined() {
        let mut errors = std::collections::BTreeMap::new();
        errors.insert(
            "title".to_string(),
            vec!["must not be empty".to_string()],
        );
        let dto = ErrorResponseDto {
            error: None,
            errors: Some(errors),
        };
        assert_eq!(
            dto.into_message().as_deref(),
            Some("title: must not be empty")
        );
    }

    #[test]
    fn post_dto_maps_embedded_relations() {
        let dto = PostDto {
            id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
            user: UserDto {
                id: 2,
                username: "author".to_string(),
                email: "author@example.com".to_string(),
                role: "admin".to_string(),
                created_at: Utc.timestamp_opt(10, 0).single().expect("valid ts"),
            },
            category: CategoryDto {
                id: 3,
                name: "Tech".to_string(),
            },
            created_at: Utc.timestamp_opt(10, 0).single().expect("valid ts"),
            updated_at: Utc.timestamp_opt(20, 0).single().expect("valid ts"),
        };

        let post = Post::from(dto);
        assert_eq!(post.id, 1);
        assert_eq!(post.user.id, 2);
        assert_eq!(post.user.role, "admin");
        assert_eq!(post.category.id, 3);
        assert_eq!(post.category.name, "Tech");
    }
}
