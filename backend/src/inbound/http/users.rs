//! Directory HTTP handlers.
//!
//! ```text
//! GET /api/v1/users?q=guitar
//! GET /api/v1/users/{id}
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// Query string for directory search.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct UserSearchQuery {
    /// Case-insensitive term matched against names and skills.
    pub q: Option<String>,
}

/// Search the directory. An absent or empty term lists everyone.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserSearchQuery),
    responses(
        (status = 200, description = "Matching users in directory order", body = Vec<UserSchema>),
        (status = 503, description = "Directory store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UserSearchQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let term = query.into_inner().q.unwrap_or_default();
    let users = state.directory.list_users(&term).await?;
    Ok(web::Json(users))
}

/// Fetch one directory user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner(), "id")?;
    let user = state.directory.fetch_user(&id).await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestDirectory, call_json, test_app, test_directory};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::Value;

    fn names(body: &Value) -> Vec<&str> {
        body.as_array()
            .expect("array body")
            .iter()
            .map(|user| user["name"].as_str().expect("name"))
            .collect()
    }

    #[rstest]
    #[case("/api/v1/users", &["Alice Rao", "Bob Mehta", "Carol Iyer"])]
    #[case("/api/v1/users?q=", &["Alice Rao", "Bob Mehta", "Carol Iyer"])]
    #[case("/api/v1/users?q=GUITAR", &["Alice Rao", "Carol Iyer"])]
    #[case("/api/v1/users?q=bob", &["Bob Mehta"])]
    #[case("/api/v1/users?q=underwater", &[])]
    #[actix_web::test]
    async fn searches_names_and_skills(
        test_directory: TestDirectory,
        #[case] uri: &str,
        #[case] expected: &[&str],
    ) {
        let app = actix_test::init_service(test_app(&test_directory)).await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let (status, body) = call_json(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn fetches_single_user(test_directory: TestDirectory) {
        let app = actix_test::init_service(test_app(&test_directory)).await;
        let uri = format!("/api/v1/users/{}", test_directory.bob.id());
        let request = actix_test::TestRequest::get().uri(&uri).to_request();
        let (status, body) = call_json(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Bob Mehta");
        assert_eq!(body["skillsOffered"], serde_json::json!(["Spanish"]));
    }

    #[rstest]
    #[case("/api/v1/users/not-a-uuid", StatusCode::BAD_REQUEST, "invalid_request")]
    #[case(
        "/api/v1/users/00000000-0000-0000-0000-000000000000",
        StatusCode::NOT_FOUND,
        "not_found"
    )]
    #[actix_web::test]
    async fn rejects_bad_or_unknown_ids(
        test_directory: TestDirectory,
        #[case] uri: &str,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app(&test_directory)).await;
        let request = actix_test::TestRequest::get().uri(uri).to_request();
        let (actual, body) = call_json(&app, request).await;
        assert_eq!(actual, status);
        assert_eq!(body["code"], code);
    }
}
