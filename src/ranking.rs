use std::cmp::Ordering;

use crate::entities::movie;

/// Assigns a dense 1..=N ranking, N going to the highest rating.
///
/// Unrated movies order below every rated one. Equal ratings keep their
/// incoming order. Returned best-first.
pub fn rank(mut movies: Vec<movie::Model>) -> Vec<movie::Model> {
    movies.sort_by(|a, b| by_rating(a.rating, b.rating));

    for (idx, movie) in movies.iter_mut().enumerate() {
        movie.ranking = Some(idx as i32 + 1);
    }

    movies.reverse();
    movies
}

fn by_rating(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.total_cmp(&b),
    }
}
