//! SQLite implementation of `ContentRepo`.
//!
//! Maps the relational rows to the domain models. Ids are UUID strings,
//! timestamps RFC 3339 text, tags a JSON array column. List queries order by
//! `created_at DESC` with `rowid` as the tie-breaker so insertion order wins
//! when two rows share a timestamp.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use domains::error::{AppError, Result};
use domains::models::{
    ContentCounts, Destination, DestinationDraft, GalleryImage, GalleryImageDraft, Profile,
    ProfileDraft, Review, ReviewDraft,
};
use domains::ports::ContentRepo;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS destinations (
    id                TEXT PRIMARY KEY,
    name              TEXT NOT NULL,
    location          TEXT NOT NULL,
    short_description TEXT NOT NULL,
    full_description  TEXT NOT NULL,
    image_url         TEXT NOT NULL DEFAULT '',
    map_url           TEXT NOT NULL DEFAULT '',
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS gallery_images (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT,
    image_url   TEXT NOT NULL,
    tags        TEXT NOT NULL DEFAULT '[]',
    location    TEXT,
    created_at  TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS reviews (
    id         TEXT PRIMARY KEY,
    title      TEXT NOT NULL,
    content    TEXT NOT NULL,
    rating     INTEGER NOT NULL,
    location   TEXT,
    image_url  TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS profiles (
    id         TEXT PRIMARY KEY,
    full_name  TEXT NOT NULL,
    bio        TEXT NOT NULL,
    avatar_url TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

pub struct SqliteContentRepo {
    pool: SqlitePool,
}

impl SqliteContentRepo {
    /// Opens (or creates) the database and bootstraps the schema.
    ///
    /// A single connection is enough here: SQLite serializes writers anyway,
    /// and it keeps `sqlite::memory:` databases alive across queries in
    /// tests.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await
            .map_err(db_err)?;
        sqlx::raw_sql(SCHEMA).execute(&pool).await.map_err(db_err)?;
        Ok(Self { pool })
    }
}

fn db_err(err: sqlx::Error) -> AppError {
    AppError::Internal(err.to_string())
}

fn text_to_uuid(text: &str) -> Uuid {
    Uuid::parse_str(text).unwrap_or_default()
}

fn row_to_destination(row: &SqliteRow) -> Destination {
    Destination {
        id: text_to_uuid(&row.get::<String, _>("id")),
        name: row.get("name"),
        location: row.get("location"),
        short_description: row.get("short_description"),
        full_description: row.get("full_description"),
        image_url: row.get("image_url"),
        map_url: row.get("map_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn row_to_gallery_image(row: &SqliteRow) -> GalleryImage {
    GalleryImage {
        id: text_to_uuid(&row.get::<String, _>("id")),
        title: row.get("title"),
        description: row.get("description"),
        image_url: row.get("image_url"),
        tags: serde_json::from_str(&row.get::<String, _>("tags")).unwrap_or_default(),
        location: row.get("location"),
        created_at: row.get("created_at"),
    }
}

fn row_to_review(row: &SqliteRow) -> Review {
    Review {
        id: text_to_uuid(&row.get::<String, _>("id")),
        title: row.get("title"),
        content: row.get("content"),
        rating: row.get("rating"),
        location: row.get("location"),
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
    }
}

fn row_to_profile(row: &SqliteRow) -> Profile {
    Profile {
        id: text_to_uuid(&row.get::<String, _>("id")),
        full_name: row.get("full_name"),
        bio: row.get("bio"),
        avatar_url: row.get("avatar_url"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl ContentRepo for SqliteContentRepo {
    async fn list_destinations(&self) -> Result<Vec<Destination>> {
        let rows = sqlx::query(
            "SELECT * FROM destinations ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_destination).collect())
    }

    async fn get_destination(&self, id: Uuid) -> Result<Option<Destination>> {
        let row = sqlx::query("SELECT * FROM destinations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_destination))
    }

    async fn insert_destination(&self, draft: DestinationDraft) -> Result<Destination> {
        let now = Utc::now();
        let destination = Destination {
            id: Uuid::new_v4(),
            name: draft.name,
            location: draft.location,
            short_description: draft.short_description,
            full_description: draft.full_description,
            image_url: draft.image_url,
            map_url: draft.map_url,
            created_at: now,
            updated_at: now,
        };
        sqlx::query(
            "INSERT INTO destinations \
             (id, name, location, short_description, full_description, image_url, map_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(destination.id.to_string())
        .bind(&destination.name)
        .bind(&destination.location)
        .bind(&destination.short_description)
        .bind(&destination.full_description)
        .bind(&destination.image_url)
        .bind(&destination.map_url)
        .bind(destination.created_at)
        .bind(destination.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(destination)
    }

    async fn update_destination(&self, id: Uuid, draft: DestinationDraft) -> Result<Destination> {
        let result = sqlx::query(
            "UPDATE destinations SET name = ?, location = ?, short_description = ?, \
             full_description = ?, image_url = ?, map_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(&draft.location)
        .bind(&draft.short_description)
        .bind(&draft.full_description)
        .bind(&draft.image_url)
        .bind(&draft.map_url)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("destination", id));
        }
        self.get_destination(id)
            .await?
            .ok_or_else(|| AppError::not_found("destination", id))
    }

    async fn delete_destination(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM destinations WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("destination", id));
        }
        Ok(())
    }

    async fn list_gallery_images(&self) -> Result<Vec<GalleryImage>> {
        let rows = sqlx::query(
            "SELECT * FROM gallery_images ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_gallery_image).collect())
    }

    async fn get_gallery_image(&self, id: Uuid) -> Result<Option<GalleryImage>> {
        let row = sqlx::query("SELECT * FROM gallery_images WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_gallery_image))
    }

    async fn insert_gallery_image(&self, draft: GalleryImageDraft) -> Result<GalleryImage> {
        let image = GalleryImage {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            image_url: draft.image_url,
            tags: draft.tags,
            location: draft.location,
            created_at: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO gallery_images (id, title, description, image_url, tags, location, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(image.id.to_string())
        .bind(&image.title)
        .bind(&image.description)
        .bind(&image.image_url)
        .bind(serde_json::to_string(&image.tags).unwrap_or_else(|_| "[]".to_string()))
        .bind(&image.location)
        .bind(image.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(image)
    }

    async fn delete_gallery_image(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("gallery image", id));
        }
        Ok(())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>> {
        let rows = sqlx::query("SELECT * FROM reviews ORDER BY created_at DESC, rowid DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.iter().map(row_to_review).collect())
    }

    async fn insert_review(&self, draft: ReviewDraft) -> Result<Review> {
        let review = Review {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            rating: draft.rating,
            location: draft.location,
            image_url: draft.image_url,
            created_at: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO reviews (id, title, content, rating, location, image_url, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(review.id.to_string())
        .bind(&review.title)
        .bind(&review.content)
        .bind(review.rating)
        .bind(&review.location)
        .bind(&review.image_url)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(review)
    }

    async fn delete_review(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("review", id));
        }
        Ok(())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query("SELECT * FROM profiles WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_profile))
    }

    async fn upsert_profile(&self, id: Uuid, draft: ProfileDraft) -> Result<Profile> {
        let profile = Profile {
            id,
            full_name: draft.full_name,
            bio: draft.bio,
            avatar_url: draft.avatar_url,
            updated_at: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO profiles (id, full_name, bio, avatar_url, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
             full_name = excluded.full_name, bio = excluded.bio, \
             avatar_url = excluded.avatar_url, updated_at = excluded.updated_at",
        )
        .bind(profile.id.to_string())
        .bind(&profile.full_name)
        .bind(&profile.bio)
        .bind(&profile.avatar_url)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(profile)
    }

    async fn counts(&self) -> Result<ContentCounts> {
        let row = sqlx::query(
            "SELECT \
             (SELECT COUNT(*) FROM destinations) AS destinations, \
             (SELECT COUNT(*) FROM gallery_images) AS gallery_images, \
             (SELECT COUNT(*) FROM reviews) AS reviews",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(ContentCounts {
            destinations: row.get("destinations"),
            gallery_images: row.get("gallery_images"),
            reviews: row.get("reviews"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteContentRepo {
        SqliteContentRepo::connect("sqlite::memory:").await.unwrap()
    }

    fn destination_draft(name: &str) -> DestinationDraft {
        DestinationDraft {
            name: name.to_string(),
            location: "North Central Province, Sri Lanka".to_string(),
            short_description: "A paradise for wildlife enthusiasts.".to_string(),
            full_description: "A reservoir surrounded by forest reserve, famous for its large \
                               elephant population."
                .to_string(),
            image_url: "https://example.com/hero.jpg".to_string(),
            map_url: String::new(),
        }
    }

    #[tokio::test]
    async fn destination_round_trip_preserves_fields() {
        let repo = repo().await;
        let created = repo
            .insert_destination(destination_draft("Hurulu Wewa"))
            .await
            .unwrap();

        let fetched = repo.get_destination(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Hurulu Wewa");
        assert_eq!(fetched.location, created.location);
        assert_eq!(fetched.short_description, created.short_description);
        assert_eq!(fetched.full_description, created.full_description);
        assert_eq!(fetched.image_url, created.image_url);
        assert_eq!(fetched.map_url, "");
    }

    #[tokio::test]
    async fn lists_come_back_newest_first() {
        let repo = repo().await;
        repo.insert_destination(destination_draft("First")).await.unwrap();
        let second = repo
            .insert_destination(destination_draft("Second"))
            .await
            .unwrap();

        let all = repo.list_destinations().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
    }

    #[tokio::test]
    async fn delete_removes_the_row_from_the_list() {
        let repo = repo().await;
        let keep = repo.insert_destination(destination_draft("Keep")).await.unwrap();
        let gone = repo.insert_destination(destination_draft("Gone")).await.unwrap();

        repo.delete_destination(gone.id).await.unwrap();
        let all = repo.list_destinations().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, keep.id);
        assert!(!all.iter().any(|d| d.id == gone.id));
    }

    #[tokio::test]
    async fn updating_a_missing_destination_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update_destination(Uuid::new_v4(), destination_draft("Ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }

    #[tokio::test]
    async fn gallery_tags_survive_the_json_column() {
        let repo = repo().await;
        let created = repo
            .insert_gallery_image(GalleryImageDraft {
                title: "Elephants".to_string(),
                description: None,
                image_url: "/media/gallery/abc.jpg".to_string(),
                tags: vec!["nature".to_string(), "wildlife".to_string(), "nature".to_string()],
                location: Some("Hurulu Eco Park".to_string()),
            })
            .await
            .unwrap();

        let fetched = repo.get_gallery_image(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.tags, ["nature", "wildlife", "nature"]);
        assert_eq!(fetched.description, None);
        assert_eq!(fetched.location.as_deref(), Some("Hurulu Eco Park"));
    }

    #[tokio::test]
    async fn profile_upsert_replaces_by_identity_id() {
        let repo = repo().await;
        let identity = Uuid::new_v4();
        repo.upsert_profile(
            identity,
            ProfileDraft {
                full_name: "Lasin Raj".to_string(),
                bio: "Safari guide".to_string(),
                avatar_url: String::new(),
            },
        )
        .await
        .unwrap();

        repo.upsert_profile(
            identity,
            ProfileDraft {
                full_name: "Lasin R.".to_string(),
                bio: "Lead safari guide".to_string(),
                avatar_url: "https://example.com/a.png".to_string(),
            },
        )
        .await
        .unwrap();

        let profile = repo.get_profile(identity).await.unwrap().unwrap();
        assert_eq!(profile.full_name, "Lasin R.");
        assert_eq!(profile.bio, "Lead safari guide");
    }

    #[tokio::test]
    async fn counts_reflect_all_three_tables() {
        let repo = repo().await;
        repo.insert_destination(destination_draft("One")).await.unwrap();
        repo.insert_review(ReviewDraft {
            title: "Great trip".to_string(),
            content: "Saw elephants at dawn.".to_string(),
            rating: 5,
            location: None,
            image_url: None,
        })
        .await
        .unwrap();

        let counts = repo.counts().await.unwrap();
        assert_eq!(counts.destinations, 1);
        assert_eq!(counts.gallery_images, 0);
        assert_eq!(counts.reviews, 1);
    }
}
