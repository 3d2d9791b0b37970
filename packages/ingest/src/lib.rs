#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for seeding and maintaining club network content.
//!
//! Content normally enters the store through this crate: a TOML seed
//! document is parsed into a [`seed::SeedFile`] and applied with
//! [`apply_seed`], which upserts clubs, terms, meta, and images through
//! the [`ContentStore`] trait.

pub mod interactive;
pub mod seed;

use std::collections::BTreeSet;
use std::sync::Arc;

use club_network_club_models::{ImageSize, Taxonomy, clamp_rating, flag_meta_value};
use club_network_settings::NetworkSettings;
use club_network_store::sql::SqlContentStore;
use club_network_store::{ContentStore, StoreError};
use club_network_store_models::{NewClub, TermPredicate, meta_keys};

use crate::seed::{SeedClub, SeedFacility, SeedFile};

/// Totals from applying a seed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Clubs created or replaced.
    pub clubs: u64,
    /// Distinct terms created or updated.
    pub terms: u64,
}

/// Connects to the content database, runs migrations, and wraps the
/// connection in a [`SqlContentStore`].
///
/// # Errors
///
/// Returns an error if settings loading, the database connection, or a
/// migration fails.
pub async fn open_store() -> Result<SqlContentStore, Box<dyn std::error::Error>> {
    let settings = NetworkSettings::load_from_env()?;
    let db = club_network_store::db::connect_from_env().await?;
    club_network_store::run_migrations(db.as_ref()).await?;

    Ok(SqlContentStore::new(Arc::from(db), settings.site_url))
}

/// Derives a URL-safe slug from a display name.
///
/// Lowercases alphanumeric runs and collapses everything between them
/// into single hyphens.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Applies a seed document: facility terms first, then each club with
/// its terms, meta, and images.
///
/// Clubs are keyed by slug and terms by `(taxonomy, slug)`, so applying
/// the same document twice replaces rather than duplicates.
///
/// # Errors
///
/// Returns an error if any store write fails.
pub async fn apply_seed(
    store: &dyn ContentStore,
    seed: &SeedFile,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let mut term_ids: BTreeSet<i64> = BTreeSet::new();

    for facility in &seed.facilities {
        let term_id = upsert_facility(store, facility).await?;
        term_ids.insert(term_id);
    }

    let mut clubs = 0u64;
    for club in &seed.clubs {
        let club_id = apply_club(store, club, &seed.facilities, &mut term_ids).await?;
        log::debug!("Seeded club {} (id={club_id})", club.title);
        clubs += 1;
    }

    Ok(SeedSummary {
        clubs,
        terms: term_ids.len() as u64,
    })
}

/// Prints a table of published clubs.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub async fn list_clubs(store: &dyn ContentStore) -> Result<(), Box<dyn std::error::Error>> {
    let clubs = store.query_published_clubs(&TermPredicate::default()).await?;

    println!("{:<6} {:<36} SLUG", "ID", "TITLE");
    println!("{}", "-".repeat(70));
    for club in &clubs {
        println!("{:<6} {:<36} {}", club.id, club.title, club.slug);
    }

    Ok(())
}

/// Upserts a declared facility term and writes its icon and description
/// meta.
async fn upsert_facility(
    store: &dyn ContentStore,
    facility: &SeedFacility,
) -> Result<i64, StoreError> {
    let slug = facility
        .slug
        .clone()
        .unwrap_or_else(|| slugify(&facility.name));

    let term_id = store
        .upsert_term(Taxonomy::Facility, facility.name.trim(), &slug)
        .await?;

    store
        .put_term_meta(
            term_id,
            meta_keys::FACILITY_ICON_URL,
            facility.icon_url.trim(),
        )
        .await?;
    store
        .put_term_meta(
            term_id,
            meta_keys::FACILITY_DESCRIPTION,
            facility.description.trim(),
        )
        .await?;

    Ok(term_id)
}

/// Upserts one club with its term assignments, meta, and images.
async fn apply_club(
    store: &dyn ContentStore,
    club: &SeedClub,
    declared_facilities: &[SeedFacility],
    term_ids: &mut BTreeSet<i64>,
) -> Result<i64, StoreError> {
    let slug = club.slug.clone().unwrap_or_else(|| slugify(&club.title));
    let club_id = store
        .upsert_club(&NewClub {
            title: club.title.trim().to_string(),
            slug,
            content: club.content.trim().to_string(),
            status: club.status,
        })
        .await?;

    let city = club.city.trim();
    let city_ids = if city.is_empty() {
        Vec::new()
    } else {
        let id = store
            .upsert_term(Taxonomy::City, city, &slugify(city))
            .await?;
        term_ids.insert(id);
        vec![id]
    };
    store
        .set_club_terms(club_id, Taxonomy::City, &city_ids)
        .await?;

    let mut facility_ids = Vec::with_capacity(club.facilities.len());
    for name in &club.facilities {
        let name = name.trim();
        // A facility declared up top may carry a slug override; honor it
        // here so the club attaches to the same term row.
        let slug = declared_facilities
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.slug.clone())
            .unwrap_or_else(|| slugify(name));
        let id = store.upsert_term(Taxonomy::Facility, name, &slug).await?;
        term_ids.insert(id);
        facility_ids.push(id);
    }
    store
        .set_club_terms(club_id, Taxonomy::Facility, &facility_ids)
        .await?;

    let mut category_ids = Vec::with_capacity(club.membership_categories.len());
    for name in &club.membership_categories {
        let name = name.trim();
        let id = store
            .upsert_term(Taxonomy::MembershipCategory, name, &slugify(name))
            .await?;
        term_ids.insert(id);
        category_ids.push(id);
    }
    store
        .set_club_terms(club_id, Taxonomy::MembershipCategory, &category_ids)
        .await?;

    write_club_meta(store, club_id, club).await?;

    if !club.card_image.trim().is_empty() {
        store
            .set_club_image(club_id, ImageSize::MediumLarge, club.card_image.trim())
            .await?;
    }
    if !club.hero_image.trim().is_empty() {
        store
            .set_club_image(club_id, ImageSize::Large, club.hero_image.trim())
            .await?;
    }

    Ok(club_id)
}

/// Writes a club's meta values, sanitizing the numeric and flag fields.
async fn write_club_meta(
    store: &dyn ContentStore,
    club_id: i64,
    club: &SeedClub,
) -> Result<(), StoreError> {
    let rating = clamp_rating(club.rating);
    store
        .put_club_meta(club_id, meta_keys::RATING, &rating.to_string())
        .await?;
    store
        .put_club_meta(
            club_id,
            meta_keys::REVIEWS_COUNT,
            &club.reviews_count.unsigned_abs().to_string(),
        )
        .await?;
    store
        .put_club_meta(
            club_id,
            meta_keys::IS_PREMIUM,
            flag_meta_value(club.is_premium),
        )
        .await?;

    for (key, value) in [
        (meta_keys::ADDRESS, &club.address),
        (meta_keys::HOURS_MF, &club.hours.mf),
        (meta_keys::HOURS_SAT, &club.hours.sat),
        (meta_keys::HOURS_SUN, &club.hours.sun),
        (meta_keys::LATITUDE, &club.latitude),
        (meta_keys::LONGITUDE, &club.longitude),
        (meta_keys::CONTACT_PHONE, &club.contact_phone),
        (meta_keys::CONTACT_EMAIL, &club.contact_email),
        (meta_keys::CONTACT_WEBSITE, &club.contact_website),
        (meta_keys::BOOK_TOUR_URL, &club.book_tour_url),
        (meta_keys::CLASS_SCHEDULE_PDF, &club.class_schedule_pdf),
        (meta_keys::CLASSES_DATA, &club.classes),
        (meta_keys::MEMBERSHIPS_DATA, &club.memberships),
    ] {
        put_or_clear(store, club_id, key, value).await?;
    }

    Ok(())
}

/// Writes a trimmed meta value, or deletes the key when the trimmed
/// value is empty so the attribute reads back as absent.
async fn put_or_clear(
    store: &dyn ContentStore,
    club_id: i64,
    key: &str,
    value: &str,
) -> Result<(), StoreError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        store.delete_club_meta(club_id, key).await
    } else {
        store.put_club_meta(club_id, key, trimmed).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_network_store::memory::MemoryContentStore;

    fn parse(raw: &str) -> SeedFile {
        SeedFile::from_toml_str(raw).unwrap()
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Atlas Fitness Club"), "atlas-fitness-club");
        assert_eq!(slugify("Gold's Gym & Spa"), "gold-s-gym-spa");
        assert_eq!(slugify("  Rabat  Agdal  "), "rabat-agdal");
    }

    #[test]
    fn slugify_keeps_non_ascii_letters() {
        assert_eq!(slugify("Aïn Diab"), "aïn-diab");
    }

    #[test]
    fn slugify_of_empty_input_is_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("---"), "");
    }

    #[tokio::test]
    async fn applied_seed_round_trips_through_the_store() {
        let store = MemoryContentStore::new();
        let seed = parse(
            r#"
[[facilities]]
name = "Pool"
icon_url = "/assets/images/facility-pool.svg"
description = "Indoor heated pool"

[[clubs]]
title = "Atlas Fitness Casablanca"
content = "Flagship location."
city = "Casablanca"
facilities = ["Pool"]
membership_categories = ["Premium"]
address = "12 Boulevard d'Anfa"
rating = 4.8
reviews_count = 120
is_premium = true
latitude = "33.5731"
longitude = "-7.5898"
card_image = "https://cdn.example.ma/atlas-card.jpg"

[clubs.hours]
mf = "06:00 - 23:00"
sat = "08:00 - 22:00"
sun = "08:00 - 20:00"
"#,
        );

        let summary = apply_seed(&store, &seed).await.unwrap();
        assert_eq!(summary.clubs, 1);
        assert_eq!(summary.terms, 3);

        let clubs = store
            .query_published_clubs(&TermPredicate::default())
            .await
            .unwrap();
        assert_eq!(clubs.len(), 1);
        let club = &clubs[0];
        assert_eq!(club.slug, "atlas-fitness-casablanca");
        assert_eq!(club.content, "Flagship location.");

        assert_eq!(
            store
                .get_club_meta(club.id, meta_keys::ADDRESS)
                .await
                .unwrap(),
            "12 Boulevard d'Anfa"
        );
        assert_eq!(
            store
                .get_club_meta(club.id, meta_keys::RATING)
                .await
                .unwrap(),
            "4.8"
        );
        assert_eq!(
            store
                .get_club_meta(club.id, meta_keys::HOURS_MF)
                .await
                .unwrap(),
            "06:00 - 23:00"
        );
        assert_eq!(
            store
                .get_club_meta(club.id, meta_keys::IS_PREMIUM)
                .await
                .unwrap(),
            "1"
        );
        assert_eq!(
            store
                .get_thumbnail_url(club.id, ImageSize::MediumLarge)
                .await
                .unwrap(),
            "https://cdn.example.ma/atlas-card.jpg"
        );

        let cities = store.get_terms_for(club.id, Taxonomy::City).await.unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Casablanca");
        assert_eq!(cities[0].slug, "casablanca");

        let facilities = store
            .get_terms_for(club.id, Taxonomy::Facility)
            .await
            .unwrap();
        assert_eq!(facilities.len(), 1);
        assert_eq!(
            store
                .get_term_meta(facilities[0].term_id, meta_keys::FACILITY_ICON_URL)
                .await
                .unwrap(),
            "/assets/images/facility-pool.svg"
        );
        assert_eq!(
            store
                .get_term_meta(facilities[0].term_id, meta_keys::FACILITY_DESCRIPTION)
                .await
                .unwrap(),
            "Indoor heated pool"
        );
    }

    #[tokio::test]
    async fn reapplying_replaces_instead_of_duplicating() {
        let store = MemoryContentStore::new();
        let first = parse(
            r#"
[[clubs]]
title = "Atlas Fitness Marina"
city = "Casablanca"
facilities = ["Pool", "Spa"]
rating = 4.8
"#,
        );
        let second = parse(
            r#"
[[clubs]]
title = "Atlas Fitness Marina"
city = "Casablanca"
rating = 3.0
"#,
        );

        apply_seed(&store, &first).await.unwrap();
        apply_seed(&store, &second).await.unwrap();

        let clubs = store
            .query_published_clubs(&TermPredicate::default())
            .await
            .unwrap();
        assert_eq!(clubs.len(), 1);

        let facilities = store
            .get_terms_for(clubs[0].id, Taxonomy::Facility)
            .await
            .unwrap();
        assert!(facilities.is_empty());

        assert_eq!(
            store
                .get_club_meta(clubs[0].id, meta_keys::RATING)
                .await
                .unwrap(),
            "3"
        );
    }

    #[tokio::test]
    async fn draft_clubs_are_seeded_but_not_published() {
        let store = MemoryContentStore::new();
        let seed = parse(
            r#"
[[clubs]]
title = "Coming Soon"
status = "draft"
city = "Tangier"
"#,
        );

        let summary = apply_seed(&store, &seed).await.unwrap();
        assert_eq!(summary.clubs, 1);

        let clubs = store
            .query_published_clubs(&TermPredicate::default())
            .await
            .unwrap();
        assert!(clubs.is_empty());
    }

    #[tokio::test]
    async fn empty_blobs_clear_previous_values() {
        let store = MemoryContentStore::new();
        let with_classes = parse(
            r#"
[[clubs]]
title = "Atlas Fitness Agadir"
classes = "Yoga | Mon - 9:00 AM | Beginner | Imane"
"#,
        );
        let without_classes = parse(
            r#"
[[clubs]]
title = "Atlas Fitness Agadir"
"#,
        );

        apply_seed(&store, &with_classes).await.unwrap();
        let clubs = store
            .query_published_clubs(&TermPredicate::default())
            .await
            .unwrap();
        let club_id = clubs[0].id;
        assert!(
            !store
                .get_club_meta(club_id, meta_keys::CLASSES_DATA)
                .await
                .unwrap()
                .is_empty()
        );

        apply_seed(&store, &without_classes).await.unwrap();
        assert_eq!(
            store
                .get_club_meta(club_id, meta_keys::CLASSES_DATA)
                .await
                .unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn sanitizes_ratings_and_review_counts() {
        let store = MemoryContentStore::new();
        let seed = parse(
            r#"
[[clubs]]
title = "Overrated Club"
rating = 7.5
reviews_count = -12
"#,
        );

        apply_seed(&store, &seed).await.unwrap();
        let clubs = store
            .query_published_clubs(&TermPredicate::default())
            .await
            .unwrap();
        assert_eq!(
            store
                .get_club_meta(clubs[0].id, meta_keys::RATING)
                .await
                .unwrap(),
            "5"
        );
        assert_eq!(
            store
                .get_club_meta(clubs[0].id, meta_keys::REVIEWS_COUNT)
                .await
                .unwrap(),
            "12"
        );
    }

    #[tokio::test]
    async fn declared_facility_slug_overrides_derived() {
        let store = MemoryContentStore::new();
        let seed = parse(
            r#"
[[facilities]]
name = "Kids Club"
slug = "kids-corner"

[[clubs]]
title = "Atlas Fitness Marrakech"
facilities = ["Kids Club"]
"#,
        );

        let summary = apply_seed(&store, &seed).await.unwrap();
        assert_eq!(summary.terms, 1);

        let clubs = store
            .query_published_clubs(&TermPredicate::default())
            .await
            .unwrap();
        let facilities = store
            .get_terms_for(clubs[0].id, Taxonomy::Facility)
            .await
            .unwrap();
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].slug, "kids-corner");
    }

    #[tokio::test]
    async fn bundled_sample_seed_applies_cleanly() {
        let store = MemoryContentStore::new();
        let seed = SeedFile::sample();

        let summary = apply_seed(&store, &seed).await.unwrap();
        assert_eq!(summary.clubs, seed.clubs.len() as u64);

        let published = store
            .query_published_clubs(&TermPredicate::default())
            .await
            .unwrap();
        let expected = seed
            .clubs
            .iter()
            .filter(|c| c.status.is_public())
            .count();
        assert_eq!(published.len(), expected);
    }
}
