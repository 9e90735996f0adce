use tracing::{debug, info};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{CandidateDetail, CandidateSummary, EditForm, MovieUpdate, NewMovie},
    ranking,
    store::MovieStore,
    tmdb::TmdbClient,
};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// All stored movies, ranked and ordered best-first.
pub async fn list_ranked(store: &MovieStore) -> AppResult<Vec<movie::Model>> {
    let movies = store.list_all().await?;
    debug!(count = movies.len(), "ranking movies");
    Ok(ranking::rank(movies))
}

pub async fn search_candidates(tmdb: &TmdbClient, title: &str) -> AppResult<Vec<CandidateSummary>> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation(vec!["Movie title is required.".to_string()]));
    }
    tmdb.search(title).await
}

/// Fetches one catalog entry and stores it unrated. Returns the created movie.
pub async fn import_candidate(
    store: &MovieStore,
    tmdb: &TmdbClient,
    image_base_url: &str,
    external_id: i64,
) -> AppResult<movie::Model> {
    let detail = tmdb.fetch(external_id).await?;
    let new = detail_to_new_movie(detail, image_base_url)?;

    match store.find_by_title(&new.title).await {
        Ok(existing) => {
            return Err(AppError::ConstraintViolation(format!(
                "{:?} is already in the list as movie {}",
                existing.title, existing.id
            )));
        },
        Err(AppError::NotFound(_)) => {},
        Err(err) => return Err(err),
    }

    let created = store.create(new).await?;
    info!(external_id, movie_id = created.id, title = %created.title, "imported movie");
    Ok(created)
}

pub fn detail_to_new_movie(detail: CandidateDetail, image_base_url: &str) -> AppResult<NewMovie> {
    let title = detail.original_title.ok_or_else(|| missing("original_title"))?;
    let description = detail.overview.ok_or_else(|| missing("overview"))?;
    let release_date = detail.release_date.ok_or_else(|| missing("release_date"))?;
    let year = release_year(&release_date)?;

    let img_url = detail
        .belongs_to_collection
        .and_then(|c| c.poster_path)
        .map(|path| format!("{image_base_url}{path}"));

    Ok(NewMovie { title, year, description, img_url })
}

/// Year prefix of a `YYYY-MM-DD` release date.
pub fn release_year(release_date: &str) -> AppResult<i32> {
    let Some((year, _)) = release_date.split_once('-') else {
        return Err(AppError::MalformedUpstreamData(format!(
            "release_date {release_date:?} has no '-' separator"
        )));
    };
    year.trim().parse().map_err(|_| {
        AppError::MalformedUpstreamData(format!("release_date {release_date:?} has no year"))
    })
}

fn missing(field: &str) -> AppError {
    AppError::MalformedUpstreamData(format!("detail response lacks {field}"))
}

/// Checks an edit submission, returning the rating and the raw review or every problem found.
pub fn validate_edit(form: &EditForm) -> Result<(f64, String), Vec<String>> {
    let mut errors = Vec::new();

    let rating_raw = form.rating.trim();
    let rating = if rating_raw.is_empty() {
        errors.push("Rating is required.".to_string());
        None
    } else {
        match rating_raw.parse::<f64>() {
            Ok(r) if (MIN_RATING..=MAX_RATING).contains(&r) => Some(r),
            Ok(_) => {
                errors.push(format!("Rating must be between {MIN_RATING} and {MAX_RATING}."));
                None
            },
            Err(_) => {
                errors.push("Rating must be a number.".to_string());
                None
            },
        }
    };

    if form.review.trim().is_empty() {
        errors.push("Review is required.".to_string());
    }

    match rating {
        Some(rating) if errors.is_empty() => Ok((rating, form.review.clone())),
        _ => Err(errors),
    }
}

pub async fn edit_rating(store: &MovieStore, id: i32, form: &EditForm) -> AppResult<movie::Model> {
    let (rating, review) = validate_edit(form).map_err(AppError::Validation)?;
    let updated = store
        .update(id, MovieUpdate { rating: Some(rating), review: Some(quote(&review)) })
        .await?;
    info!(movie_id = id, rating, "rated movie");
    Ok(updated)
}

pub async fn delete_movie(store: &MovieStore, id: i32) -> AppResult<()> {
    store.delete(id).await?;
    info!(movie_id = id, "deleted movie");
    Ok(())
}

fn quote(review: &str) -> String {
    format!("\"{review}\"")
}

/// Inverse of the stored quoting: drops exactly one wrapping pair.
pub fn unquote(stored: &str) -> &str {
    stored.strip_prefix('"').and_then(|r| r.strip_suffix('"')).unwrap_or(stored)
}
