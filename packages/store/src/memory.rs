//! In-memory content store.
//!
//! Backs tests and ephemeral runs with the same semantics as the SQL store:
//! slug-keyed upserts, title-ordered queries, and empty-string reads for
//! absent meta.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use async_trait::async_trait;
use club_network_club_models::{ImageSize, PostStatus, Taxonomy, Term};
use club_network_store_models::{NewClub, RawClubRecord, TermPredicate};

use crate::{ContentStore, StoreError};

const DEFAULT_SITE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
struct ClubRow {
    title: String,
    slug: String,
    content: String,
    status: PostStatus,
}

#[derive(Debug, Clone)]
struct TermRow {
    taxonomy: Taxonomy,
    name: String,
    slug: String,
}

#[derive(Debug, Default)]
struct Inner {
    clubs: BTreeMap<i64, ClubRow>,
    terms: BTreeMap<i64, TermRow>,
    assignments: BTreeSet<(i64, i64)>,
    club_meta: BTreeMap<(i64, String), String>,
    term_meta: BTreeMap<(i64, String), String>,
    images: BTreeMap<(i64, ImageSize), String>,
    next_club_id: i64,
    next_term_id: i64,
}

/// Content store held entirely in memory.
///
/// Store methods panic if the inner lock is poisoned, which only happens
/// after a panic on another thread holding it.
#[derive(Debug)]
pub struct MemoryContentStore {
    inner: RwLock<Inner>,
    site_url: String,
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContentStore {
    /// Creates an empty store with a localhost site URL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_site_url(DEFAULT_SITE_URL)
    }

    /// Creates an empty store deriving permalinks from `site_url`.
    #[must_use]
    pub fn with_site_url(site_url: impl Into<String>) -> Self {
        let site_url = site_url.into();

        Self {
            inner: RwLock::new(Inner::default()),
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    fn record_from(&self, id: i64, club: &ClubRow) -> RawClubRecord {
        RawClubRecord {
            id,
            title: club.title.clone(),
            slug: club.slug.clone(),
            content: club.content.clone(),
            status: club.status,
            permalink: format!("{}/clubs/{}", self.site_url, club.slug),
        }
    }
}

fn satisfies(inner: &Inner, club_id: i64, predicate: &TermPredicate) -> bool {
    predicate.constraints.iter().all(|constraint| {
        inner.terms.iter().any(|(term_id, term)| {
            term.taxonomy == constraint.taxonomy
                && term.slug == constraint.slug
                && inner.assignments.contains(&(club_id, *term_id))
        })
    })
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn query_published_clubs(
        &self,
        predicate: &TermPredicate,
    ) -> Result<Vec<RawClubRecord>, StoreError> {
        let inner = self.inner.read().expect("content store lock poisoned");

        let mut records: Vec<RawClubRecord> = inner
            .clubs
            .iter()
            .filter(|(_, club)| club.status.is_public())
            .filter(|(id, _)| satisfies(&inner, **id, predicate))
            .map(|(id, club)| self.record_from(*id, club))
            .collect();

        records.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

        Ok(records)
    }

    async fn get_published_club(
        &self,
        club_id: i64,
    ) -> Result<Option<RawClubRecord>, StoreError> {
        let inner = self.inner.read().expect("content store lock poisoned");

        Ok(inner
            .clubs
            .get(&club_id)
            .filter(|club| club.status.is_public())
            .map(|club| self.record_from(club_id, club)))
    }

    async fn get_terms_for(
        &self,
        club_id: i64,
        taxonomy: Taxonomy,
    ) -> Result<Vec<Term>, StoreError> {
        let inner = self.inner.read().expect("content store lock poisoned");

        let mut terms: Vec<Term> = inner
            .terms
            .iter()
            .filter(|(_, term)| term.taxonomy == taxonomy)
            .filter(|(id, _)| inner.assignments.contains(&(club_id, **id)))
            .map(|(id, term)| Term {
                term_id: *id,
                name: term.name.clone(),
                slug: term.slug.clone(),
            })
            .collect();

        terms.sort_by(|a, b| a.name.cmp(&b.name).then(a.term_id.cmp(&b.term_id)));

        Ok(terms)
    }

    async fn get_terms_in_use(&self, taxonomy: Taxonomy) -> Result<Vec<Term>, StoreError> {
        let inner = self.inner.read().expect("content store lock poisoned");

        let mut terms: Vec<Term> = inner
            .terms
            .iter()
            .filter(|(_, term)| term.taxonomy == taxonomy)
            .filter(|(term_id, _)| {
                inner.clubs.iter().any(|(club_id, club)| {
                    club.status.is_public()
                        && inner.assignments.contains(&(*club_id, **term_id))
                })
            })
            .map(|(id, term)| Term {
                term_id: *id,
                name: term.name.clone(),
                slug: term.slug.clone(),
            })
            .collect();

        terms.sort_by(|a, b| a.name.cmp(&b.name).then(a.term_id.cmp(&b.term_id)));

        Ok(terms)
    }

    async fn get_club_meta_map(
        &self,
        club_id: i64,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        let inner = self.inner.read().expect("content store lock poisoned");

        Ok(inner
            .club_meta
            .iter()
            .filter(|((id, _), _)| *id == club_id)
            .map(|((_, key), value)| (key.clone(), value.clone()))
            .collect())
    }

    async fn get_term_meta(&self, term_id: i64, key: &str) -> Result<String, StoreError> {
        let inner = self.inner.read().expect("content store lock poisoned");

        Ok(inner
            .term_meta
            .get(&(term_id, key.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_thumbnail_url(
        &self,
        club_id: i64,
        size: ImageSize,
    ) -> Result<String, StoreError> {
        let inner = self.inner.read().expect("content store lock poisoned");

        Ok(inner
            .images
            .get(&(club_id, size))
            .cloned()
            .unwrap_or_default())
    }

    async fn upsert_club(&self, club: &NewClub) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().expect("content store lock poisoned");

        let existing = inner
            .clubs
            .iter()
            .find(|(_, row)| row.slug == club.slug)
            .map(|(id, _)| *id);

        let id = existing.unwrap_or_else(|| {
            inner.next_club_id += 1;
            inner.next_club_id
        });

        inner.clubs.insert(
            id,
            ClubRow {
                title: club.title.clone(),
                slug: club.slug.clone(),
                content: club.content.clone(),
                status: club.status,
            },
        );

        Ok(id)
    }

    async fn upsert_term(
        &self,
        taxonomy: Taxonomy,
        name: &str,
        slug: &str,
    ) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().expect("content store lock poisoned");

        let existing = inner
            .terms
            .iter()
            .find(|(_, term)| term.taxonomy == taxonomy && term.slug == slug)
            .map(|(id, _)| *id);

        let id = existing.unwrap_or_else(|| {
            inner.next_term_id += 1;
            inner.next_term_id
        });

        inner.terms.insert(
            id,
            TermRow {
                taxonomy,
                name: name.to_string(),
                slug: slug.to_string(),
            },
        );

        Ok(id)
    }

    async fn set_club_terms(
        &self,
        club_id: i64,
        taxonomy: Taxonomy,
        term_ids: &[i64],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("content store lock poisoned");

        let taxonomy_terms: BTreeSet<i64> = inner
            .terms
            .iter()
            .filter(|(_, term)| term.taxonomy == taxonomy)
            .map(|(id, _)| *id)
            .collect();

        inner
            .assignments
            .retain(|(club, term)| *club != club_id || !taxonomy_terms.contains(term));

        for term_id in term_ids {
            inner.assignments.insert((club_id, *term_id));
        }

        Ok(())
    }

    async fn put_club_meta(
        &self,
        club_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("content store lock poisoned");

        inner
            .club_meta
            .insert((club_id, key.to_string()), value.to_string());

        Ok(())
    }

    async fn delete_club_meta(&self, club_id: i64, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("content store lock poisoned");

        inner.club_meta.remove(&(club_id, key.to_string()));

        Ok(())
    }

    async fn put_term_meta(
        &self,
        term_id: i64,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("content store lock poisoned");

        inner
            .term_meta
            .insert((term_id, key.to_string()), value.to_string());

        Ok(())
    }

    async fn set_club_image(
        &self,
        club_id: i64,
        size: ImageSize,
        url: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().expect("content store lock poisoned");

        inner.images.insert((club_id, size), url.to_string());

        Ok(())
    }
}
