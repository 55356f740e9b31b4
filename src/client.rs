//! This module provides a client to connect to the task-scheduling REST service

use std::error::Error;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::{ApiError, ApiResult, TaskApi};
use crate::routine::Routine;
use crate::session::{Session, UserId};
use crate::task::{NewTask, Task, TaskId};

/// A [`TaskApi`] implementation that talks to the real REST service
pub struct RestClient {
    base_url: Url,
    http: reqwest::Client,
}

impl RestClient {
    /// Create a client. This does not start a connection
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, Box<dyn Error>> {
        let http = reqwest::Client::builder()
            .user_agent(crate::config::PRODUCT_NAME.lock().unwrap().clone())
            .build()?;
        Ok(Self {
            base_url: Url::parse(base_url.as_ref())?,
            http,
        })
    }

    /// Create a client against the base URL currently set in [`crate::config::BASE_URL`]
    pub fn from_config() -> Result<Self, Box<dyn Error>> {
        let base_url = crate::config::BASE_URL.lock().unwrap().clone();
        Self::new(base_url)
    }

    /// Build an endpoint URL by appending `path` to the base URL's path
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let full_path = format!("{}{}", url.path().trim_end_matches('/'), path);
        url.set_path(&full_path);
        url
    }

    fn request(&self, method: Method, url: Url, session: &Session) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        match session.token() {
            Some(token) => builder.bearer_auth(token),
            // No token: the request proceeds unauthenticated, authorization is the
            // server's concern
            None => builder,
        }
    }

    /// Map non-2xx statuses to the error categories callers can tell apart
    async fn check_status(response: reqwest::Response, url: &Url) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(url.path().to_string()),
            other => ApiError::Unexpected {
                status: other.as_u16(),
                body: response.text().await.unwrap_or_default(),
            },
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let text = response.text().await.map_err(ApiError::Connectivity)?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, session: &Session, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path);
        log::debug!("GET {}", url);
        let response = self
            .request(Method::GET, url.clone(), session)
            .send()
            .await
            .map_err(ApiError::Connectivity)?;
        let response = Self::check_status(response, &url).await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> ApiResult<reqwest::Response> {
        let url = self.endpoint(path);
        log::debug!("POST {}", url);
        let response = self
            .request(Method::POST, url.clone(), session)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Connectivity)?;
        Self::check_status(response, &url).await
    }
}

/// The body of completion/uncompletion requests.
///
/// Completion records are keyed by `(task, date)` on the server, so the date travels
/// along with the user.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompletionBody<'req> {
    user_id: &'req UserId,
    date: NaiveDate,
}

#[async_trait]
impl TaskApi for RestClient {
    async fn tasks_for_date(&self, session: &Session, date: NaiveDate) -> ApiResult<Vec<Task>> {
        self.get(session, &format!("/tasks/{}/{}", session.user(), date))
            .await
    }

    async fn routines(&self, session: &Session) -> ApiResult<Vec<Routine>> {
        self.get(session, &format!("/routines/{}", session.user()))
            .await
    }

    async fn create_task(&self, session: &Session, new_task: NewTask) -> ApiResult<Task> {
        let response = self.post(session, "/tasks", &new_task).await?;
        Self::decode(response).await
    }

    async fn complete_task(
        &self,
        session: &Session,
        task: &TaskId,
        date: NaiveDate,
    ) -> ApiResult<()> {
        let body = CompletionBody {
            user_id: session.user(),
            date,
        };
        self.post(session, &format!("/tasks/{}/complete", task), &body)
            .await?;
        Ok(())
    }

    async fn uncomplete_task(
        &self,
        session: &Session,
        task: &TaskId,
        date: NaiveDate,
    ) -> ApiResult<()> {
        let body = CompletionBody {
            user_id: session.user(),
            date,
        };
        self.post(session, &format!("/tasks/{}/uncomplete", task), &body)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls_extend_the_base_path() {
        let client = RestClient::new("https://skincare.example.com/api").unwrap();
        assert_eq!(
            client.endpoint("/tasks/user-1/2026-08-25").as_str(),
            "https://skincare.example.com/api/tasks/user-1/2026-08-25"
        );

        let client = RestClient::new("https://skincare.example.com/api/").unwrap();
        assert_eq!(
            client.endpoint("/routines/user-1").as_str(),
            "https://skincare.example.com/api/routines/user-1"
        );
    }

    #[test]
    fn the_default_config_points_to_a_valid_url() {
        assert!(RestClient::from_config().is_ok());
    }
}
