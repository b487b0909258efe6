use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::errors::AppError;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/api/auth/login";

/// Profile page for the logged-in user; anonymous visitors are sent to login.
pub async fn usuario_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    match state.sessions.from_jar(&jar).await? {
        Some(session) => Ok(Html(render_profile(&session.user_name)).into_response()),
        None => Ok(Redirect::to(LOGIN_PATH).into_response()),
    }
}

fn render_profile(user_name: &str) -> String {
    let name = escape_html(user_name);
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{name}</title></head>\n<body>\n<h1>Welcome, {name}</h1>\n</body>\n</html>\n"
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
