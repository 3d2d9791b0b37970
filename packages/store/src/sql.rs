//! SQL-backed content store.
//!
//! All access goes through raw parameterized SQL via `query_raw_params()` /
//! `exec_raw_params()`, so the same store runs unchanged against SQLite and
//! PostgreSQL.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use club_network_club_models::{ImageSize, PostStatus, Taxonomy, Term};
use club_network_store_models::{NewClub, RawClubRecord, TermPredicate};
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};

use crate::{ContentStore, StoreError};

/// Content store backed by a relational database.
pub struct SqlContentStore {
    db: Arc<dyn Database>,
    site_url: String,
}

impl SqlContentStore {
    /// Creates a store over `db`. Permalinks are derived from `site_url`,
    /// which may carry a trailing slash.
    #[must_use]
    pub fn new(db: Arc<dyn Database>, site_url: impl Into<String>) -> Self {
        let site_url = site_url.into();

        Self {
            db,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    fn permalink_for(&self, slug: &str) -> String {
        format!("{}/clubs/{slug}", self.site_url)
    }
}

#[async_trait]
impl ContentStore for SqlContentStore {
    async fn query_published_clubs(
        &self,
        predicate: &TermPredicate,
    ) -> Result<Vec<RawClubRecord>, StoreError> {
        let mut sql = String::from(
            "SELECT c.id, c.title, c.slug, c.content, c.status
             FROM clubs c
             WHERE c.status = $1",
        );
        let mut params: Vec<DatabaseValue> =
            vec![DatabaseValue::String(PostStatus::Publish.to_string())];
        let mut param_idx = 2;

        for constraint in &predicate.constraints {
            write!(
                sql,
                " AND EXISTS (SELECT 1 FROM club_terms ct
                   JOIN terms t ON t.id = ct.term_id
                   WHERE ct.club_id = c.id
                     AND t.taxonomy = ${param_idx}
                     AND t.slug = ${next_idx})",
                next_idx = param_idx + 1,
            )
            .unwrap();
            params.push(DatabaseValue::String(constraint.taxonomy.to_string()));
            params.push(DatabaseValue::String(constraint.slug.clone()));
            param_idx += 2;
        }

        sql.push_str(" ORDER BY c.title, c.id");

        let rows = self.db.query_raw_params(&sql, &params).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let slug: String = row.to_value("slug").unwrap_or_default();
            let status: String = row.to_value("status").unwrap_or_default();

            records.push(RawClubRecord {
                id: row.to_value("id").unwrap_or_default(),
                title: row.to_value("title").unwrap_or_default(),
                permalink: self.permalink_for(&slug),
                slug,
                content: row.to_value("content").unwrap_or_default(),
                status: status.parse().unwrap_or(PostStatus::Draft),
            });
        }

        Ok(records)
    }

    async fn get_published_club(
        &self,
        club_id: i64,
    ) -> Result<Option<RawClubRecord>, StoreError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT id, title, slug, content, status
                 FROM clubs
                 WHERE id = $1 AND status = $2",
                &[
                    DatabaseValue::Int64(club_id),
                    DatabaseValue::String(PostStatus::Publish.to_string()),
                ],
            )
            .await?;

        Ok(rows.first().map(|row| {
            let slug: String = row.to_value("slug").unwrap_or_default();
            let status: String = row.to_value("status").unwrap_or_default();

            RawClubRecord {
                id: row.to_value("id").unwrap_or_default(),
                title: row.to_value("title").unwrap_or_default(),
                permalink: self.permalink_for(&slug),
                slug,
                content: row.to_value("content").unwrap_or_default(),
                status: status.parse().unwrap_or(PostStatus::Draft),
            }
        }))
    }

    async fn get_terms_for(
        &self,
        club_id: i64,
        taxonomy: Taxonomy,
    ) -> Result<Vec<Term>, StoreError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT t.id, t.name, t.slug
                 FROM terms t
                 JOIN club_terms ct ON ct.term_id = t.id
                 WHERE ct.club_id = $1 AND t.taxonomy = $2
                 ORDER BY t.name, t.id",
                &[
                    DatabaseValue::Int64(club_id),
                    DatabaseValue::String(taxonomy.to_string()),
                ],
            )
            .await?;

        Ok(rows
            .iter()
            .map(|row| Term {
                term_id: row.to_value("id").unwrap_or_default(),
                name: row.to_value("name").unwrap_or_default(),
                slug: row.to_value("slug").unwrap_or_default(),
            })
            .collect())
    }

    async fn get_terms_in_use(&self, taxonomy: Taxonomy) -> Result<Vec<Term>, StoreError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT DISTINCT t.id, t.name, t.slug
                 FROM terms t
                 JOIN club_terms ct ON ct.term_id = t.id
                 JOIN clubs c ON c.id = ct.club_id
                 WHERE t.taxonomy = $1 AND c.status = $2
                 ORDER BY t.name, t.id",
                &[
                    DatabaseValue::String(taxonomy.to_string()),
                    DatabaseValue::String(PostStatus::Publish.to_string()),
                ],
            )
            .await?;

        Ok(rows
            .iter()
            .map(|row| Term {
                term_id: row.to_value("id").unwrap_or_default(),
                name: row.to_value("name").unwrap_or_default(),
                slug: row.to_value("slug").unwrap_or_default(),
            })
            .collect())
    }

    async fn get_club_meta_map(
        &self,
        club_id: i64,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT meta_key, meta_value FROM club_meta WHERE club_id = $1",
                &[DatabaseValue::Int64(club_id)],
            )
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                (
                    row.to_value("meta_key").unwrap_or_default(),
                    row.to_value("meta_value").unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn get_term_meta(&self, term_id: i64, key: &str) -> Result<String, StoreError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT meta_value FROM term_meta WHERE term_id = $1 AND meta_key = $2",
                &[
                    DatabaseValue::Int64(term_id),
                    DatabaseValue::String(key.to_string()),
                ],
            )
            .await?;

        Ok(rows
            .first()
            .map(|row| row.to_value("meta_value").unwrap_or_default())
            .unwrap_or_default())
    }

    async fn get_thumbnail_url(
        &self,
        club_id: i64,
        size: ImageSize,
    ) -> Result<String, StoreError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT url FROM club_images WHERE club_id = $1 AND size = $2",
                &[
                    DatabaseValue::Int64(club_id),
                    DatabaseValue::String(size.to_string()),
                ],
            )
            .await?;

        Ok(rows
            .first()
            .map(|row| row.to_value("url").unwrap_or_default())
            .unwrap_or_default())
    }

    async fn upsert_club(&self, club: &NewClub) -> Result<i64, StoreError> {
        let rows = self
            .db
            .query_raw_params(
                "INSERT INTO clubs (title, slug, content, status)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (slug) DO UPDATE SET
                     title = EXCLUDED.title,
                     content = EXCLUDED.content,
                     status = EXCLUDED.status
                 RETURNING id",
                &[
                    DatabaseValue::String(club.title.clone()),
                    DatabaseValue::String(club.slug.clone()),
                    DatabaseValue::String(club.content.clone()),
                    DatabaseValue::String(club.status.to_string()),
                ],
            )
            .await?;

        let row = rows.first().ok_or_else(|| StoreError::Conversion {
            message: "Failed to get club id from upsert".to_string(),
        })?;

        let id: i64 = row.to_value("id").map_err(|e| StoreError::Conversion {
            message: format!("Failed to parse club id: {e}"),
        })?;

        Ok(id)
    }

    async fn upsert_term(
        &self,
        taxonomy: Taxonomy,
        name: &str,
        slug: &str,
    ) -> Result<i64, StoreError> {
        let rows = self
            .db
            .query_raw_params(
                "INSERT INTO terms (taxonomy, name, slug)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (taxonomy, slug) DO UPDATE SET
                     name = EXCLUDED.name
                 RETURNING id",
                &[
                    DatabaseValue::String(taxonomy.to_string()),
                    DatabaseValue::String(name.to_string()),
                    DatabaseValue::String(slug.to_string()),
                ],
            )
            .await?;

        let row = rows.first().ok_or_else(|| StoreError::Conversion {
            message: "Failed to get term id from upsert".to_string(),
        })?;

        let id: i64 = row.to_value("id").map_err(|e| StoreError::Conversion {
            message: format!("Failed to parse term id: {e}"),
        })?;

        Ok(id)
    }

    async fn set_club_terms(
        &self,
        club_id: i64,
        taxonomy: Taxonomy,
        term_ids: &[i64],
    ) -> Result<(), StoreError> {
        self.db
            .exec_raw_params(
                "DELETE FROM club_terms
                 WHERE club_id = $1
                   AND term_id IN (SELECT id FROM terms WHERE taxonomy = $2)",
                &[
                    DatabaseValue::Int64(club_id),
                    DatabaseValue::String(taxonomy.to_string()),
                ],
            )
            .await?;

        for term_id in term_ids {
            self.db
                .exec_raw_params(
                    "INSERT INTO club_terms (club_id, term_id)
                     VALUES ($1, $2)
                     ON CONFLICT (club_id, term_id) DO NOTHING",
                    &[DatabaseValue::Int64(club_id), DatabaseValue::Int64(*term_id)],
                )
                .await?;
        }

        Ok(())
    }

    async fn put_club_meta(
        &self,
        club_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.db
            .exec_raw_params(
                "INSERT INTO club_meta (club_id, meta_key, meta_value)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (club_id, meta_key) DO UPDATE SET
                     meta_value = EXCLUDED.meta_value",
                &[
                    DatabaseValue::Int64(club_id),
                    DatabaseValue::String(key.to_string()),
                    DatabaseValue::String(value.to_string()),
                ],
            )
            .await?;

        Ok(())
    }

    async fn delete_club_meta(&self, club_id: i64, key: &str) -> Result<(), StoreError> {
        self.db
            .exec_raw_params(
                "DELETE FROM club_meta WHERE club_id = $1 AND meta_key = $2",
                &[
                    DatabaseValue::Int64(club_id),
                    DatabaseValue::String(key.to_string()),
                ],
            )
            .await?;

        Ok(())
    }

    async fn put_term_meta(
        &self,
        term_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.db
            .exec_raw_params(
                "INSERT INTO term_meta (term_id, meta_key, meta_value)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (term_id, meta_key) DO UPDATE SET
                     meta_value = EXCLUDED.meta_value",
                &[
                    DatabaseValue::Int64(term_id),
                    DatabaseValue::String(key.to_string()),
                    DatabaseValue::String(value.to_string()),
                ],
            )
            .await?;

        Ok(())
    }

    async fn set_club_image(
        &self,
        club_id: i64,
        size: ImageSize,
        url: &str,
    ) -> Result<(), StoreError> {
        self.db
            .exec_raw_params(
                "INSERT INTO club_images (club_id, size, url)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (club_id, size) DO UPDATE SET
                     url = EXCLUDED.url",
                &[
                    DatabaseValue::Int64(club_id),
                    DatabaseValue::String(size.to_string()),
                    DatabaseValue::String(url.to_string()),
                ],
            )
            .await?;

        Ok(())
    }
}
