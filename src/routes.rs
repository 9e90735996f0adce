use std::str::FromStr;

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{
    AppState, csrf,
    error::{AppError, AppResult},
    models::{AddForm, EditForm},
    service, templates,
};

/// Parses an `id=<n>` path segment.
pub fn parse_id<T: FromStr>(segment: &str) -> AppResult<T> {
    segment
        .strip_prefix("id=")
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| AppError::InvalidPath(segment.to_string()))
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let movies = service::list_ranked(&state.store).await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn add_form(jar: SignedCookieJar) -> impl IntoResponse {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page(&token, "", &[])))
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddForm>,
) -> AppResult<Response> {
    csrf::verify(&jar, &form.csrf_token)?;

    match service::search_candidates(&state.tmdb, &form.title).await {
        Ok(candidates) => {
            Ok(Html(templates::select_page(form.title.trim(), &candidates)).into_response())
        },
        Err(AppError::Validation(errors)) => {
            let (jar, token) = csrf::issue(jar);
            let body = templates::add_page(&token, &form.title, &errors);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response())
        },
        Err(err) => Err(err),
    }
}

pub async fn find_movie(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> AppResult<Redirect> {
    let external_id: i64 = parse_id(&segment)?;
    let movie = service::import_candidate(
        &state.store,
        &state.tmdb,
        &state.config.tmdb_image_url,
        external_id,
    )
    .await?;
    Ok(Redirect::to(&format!("/edit/id={}", movie.id)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(segment): Path<String>,
) -> AppResult<Response> {
    let id: i32 = parse_id(&segment)?;
    let movie = state.store.get(id).await?;
    let (jar, token) = csrf::issue(jar);

    let rating = movie.rating.map(|r| r.to_string()).unwrap_or_default();
    let review = movie.review.as_deref().map(service::unquote).unwrap_or_default();
    let body = templates::edit_page(&movie, &token, &rating, review, &[]);
    Ok((jar, Html(body)).into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(segment): Path<String>,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let id: i32 = parse_id(&segment)?;
    csrf::verify(&jar, &form.csrf_token)?;

    match service::edit_rating(&state.store, id, &form).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(errors)) => {
            let movie = state.store.get(id).await?;
            let (jar, token) = csrf::issue(jar);
            let body = templates::edit_page(&movie, &token, &form.rating, &form.review, &errors);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response())
        },
        Err(err) => Err(err),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> AppResult<Redirect> {
    let id: i32 = parse_id(&segment)?;
    service::delete_movie(&state.store, id).await?;
    Ok(Redirect::to("/"))
}
