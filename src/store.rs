use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{MovieUpdate, NewMovie},
};

#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new: NewMovie) -> AppResult<movie::Model> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title),
            year: Set(new.year),
            description: Set(new.description),
            rating: Set(None),
            ranking: Set(None),
            review: Set(None),
            img_url: Set(new.img_url),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Every movie in store iteration order (ascending id).
    pub async fn list_all(&self) -> AppResult<Vec<movie::Model>> {
        Ok(movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?)
    }

    pub async fn update(&self, id: i32, update: MovieUpdate) -> AppResult<movie::Model> {
        let current = self.get(id).await?;
        if update == MovieUpdate::default() {
            return Ok(current);
        }
        let mut active: movie::ActiveModel = current.into();
        if let Some(rating) = update.rating {
            active.rating = Set(Some(rating));
        }
        if let Some(review) = update.review {
            active.review = Set(Some(review));
        }
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// First movie (lowest id) with exactly this title.
    pub async fn find_by_title(&self, title: &str) -> AppResult<movie::Model> {
        movie::Entity::find()
            .filter(movie::Column::Title.eq(title))
            .order_by_asc(movie::Column::Id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movie titled {title:?}")))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("movie {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> MovieStore {
        MovieStore::new(crate::db::memory().await)
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            year: 2004,
            description: format!("{title} synopsis"),
            img_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = store().await;
        let mut input = new_movie("Primer");
        input.img_url = Some("https://image.tmdb.org/t/p/w500/primer.jpg".into());

        let created = store.create(input.clone()).await.unwrap();
        let fetched = store.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.title, input.title);
        assert_eq!(fetched.year, input.year);
        assert_eq!(fetched.description, input.description);
        assert_eq!(fetched.img_url, input.img_url);
        assert_eq!(fetched.rating, None);
        assert_eq!(fetched.review, None);
        assert_eq!(fetched.ranking, None);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = store().await;
        let first = store.create(new_movie("Alien")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(new_movie("Aliens")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_update_overwrites_only_supplied_fields() {
        let store = store().await;
        let created = store.create(new_movie("Heat")).await.unwrap();

        store
            .update(
                created.id,
                MovieUpdate { rating: Some(7.5), review: Some("\"great\"".into()) },
            )
            .await
            .unwrap();
        store
            .update(created.id, MovieUpdate { rating: Some(8.0), review: None })
            .await
            .unwrap();

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.rating, Some(8.0));
        assert_eq!(fetched.review.as_deref(), Some("\"great\""));
        assert_eq!(fetched.title, "Heat");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = store().await;
        let err = store.update(42, MovieUpdate::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = store().await;
        let created = store.create(new_movie("Ran")).await.unwrap();

        store.delete(created.id).await.unwrap();

        assert!(matches!(store.get(created.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete(created.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_duplicate_title_is_constraint_violation() {
        let store = store().await;
        store.create(new_movie("Solaris")).await.unwrap();

        let mut dup = new_movie("Solaris");
        dup.description = "another synopsis".into();
        let err = store.create(dup).await.unwrap_err();
        assert!(matches!(err, AppError::ConstraintViolation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let store = store().await;
        let a = store.create(new_movie("Zodiac")).await.unwrap();
        let b = store.create(new_movie("Amelie")).await.unwrap();

        let ids: Vec<i32> = store.list_all().await.unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_find_by_title() {
        let store = store().await;
        let created = store.create(new_movie("Stalker")).await.unwrap();

        assert_eq!(store.find_by_title("Stalker").await.unwrap().id, created.id);
        assert!(matches!(store.find_by_title("stalker").await, Err(AppError::NotFound(_))));
    }
}
