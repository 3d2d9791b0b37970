//! Club list, filter option, and detail assembly.

use club_network_club_models::{
    Club, ClubContact, ClubUrls, DetailedClub, FacilityInfo, ImageSize, OpeningHours, Taxonomy,
    meta_flag, parse_rating, parse_review_count,
};
use club_network_directory_models::{AvailableFilters, FilterOption};
use club_network_settings::NetworkSettings;
use club_network_store::ContentStore;
use club_network_store_models::{ClubFilter, RawClubRecord, TermPredicate, meta_keys};

use crate::{DirectoryError, parsing};

/// Returns the published clubs matching `filter`, ordered by title, with
/// meta, terms, and thumbnails attached.
///
/// A filter slug that matches no term yields an empty list.
///
/// # Errors
///
/// * If the content store fails
pub async fn clubs_data(
    store: &dyn ContentStore,
    filter: &ClubFilter,
    settings: &NetworkSettings,
) -> Result<Vec<Club>, DirectoryError> {
    let predicate = TermPredicate::from_filter(filter);
    let records = store.query_published_clubs(&predicate).await?;

    let mut clubs = Vec::with_capacity(records.len());
    for record in records {
        clubs.push(build_club(store, &record, settings).await?);
    }

    Ok(clubs)
}

async fn build_club(
    store: &dyn ContentStore,
    record: &RawClubRecord,
    settings: &NetworkSettings,
) -> Result<Club, DirectoryError> {
    let meta = store.get_club_meta_map(record.id).await?;
    let get = |key: &str| meta.get(key).cloned().unwrap_or_default();

    let cities = store.get_terms_for(record.id, Taxonomy::City).await?;
    let city_name = cities.into_iter().next().map(|t| t.name).unwrap_or_default();

    let facilities = facility_infos(store, record.id).await?;
    let membership_category = store
        .get_terms_for(record.id, Taxonomy::MembershipCategory)
        .await?;

    let mut thumbnail = store
        .get_thumbnail_url(record.id, ImageSize::MediumLarge)
        .await?;
    if thumbnail.is_empty() {
        thumbnail = settings.default_image_url();
    }

    Ok(Club {
        id: record.id,
        title: record.title.clone(),
        permalink: record.permalink.clone(),
        city_name,
        facilities,
        membership_category,
        address: get(meta_keys::ADDRESS),
        hours: OpeningHours {
            mf: get(meta_keys::HOURS_MF),
            sat: get(meta_keys::HOURS_SAT),
            sun: get(meta_keys::HOURS_SUN),
        },
        rating: parse_rating(&get(meta_keys::RATING)),
        reviews_count: parse_review_count(&get(meta_keys::REVIEWS_COUNT)),
        is_premium: meta_flag(&get(meta_keys::IS_PREMIUM)),
        latitude: get(meta_keys::LATITUDE),
        longitude: get(meta_keys::LONGITUDE),
        thumbnail,
        contact_phone: get(meta_keys::CONTACT_PHONE),
        class_schedule_pdf: get(meta_keys::CLASS_SCHEDULE_PDF),
    })
}

async fn facility_infos(
    store: &dyn ContentStore,
    club_id: i64,
) -> Result<Vec<FacilityInfo>, DirectoryError> {
    let terms = store.get_terms_for(club_id, Taxonomy::Facility).await?;

    let mut infos = Vec::with_capacity(terms.len());
    for term in terms {
        let icon_url = store
            .get_term_meta(term.term_id, meta_keys::FACILITY_ICON_URL)
            .await?;
        let description = store
            .get_term_meta(term.term_id, meta_keys::FACILITY_DESCRIPTION)
            .await?;

        infos.push(FacilityInfo {
            name: term.name,
            slug: term.slug,
            icon_url,
            description,
        });
    }

    Ok(infos)
}

/// Returns the filter choices in use across published clubs, each list
/// ordered by name.
///
/// # Errors
///
/// * If the content store fails
pub async fn available_filters(
    store: &dyn ContentStore,
) -> Result<AvailableFilters, DirectoryError> {
    Ok(AvailableFilters {
        cities: filter_options(store, Taxonomy::City).await?,
        facilities: filter_options(store, Taxonomy::Facility).await?,
        membership_categories: filter_options(store, Taxonomy::MembershipCategory).await?,
    })
}

async fn filter_options(
    store: &dyn ContentStore,
    taxonomy: Taxonomy,
) -> Result<Vec<FilterOption>, DirectoryError> {
    let terms = store.get_terms_in_use(taxonomy).await?;

    Ok(terms.into_iter().map(FilterOption::from).collect())
}

/// Returns the detail payload for `club_id`, or `None` when the club does
/// not exist or is not published.
///
/// # Errors
///
/// * If the content store fails
pub async fn detailed_club_data(
    store: &dyn ContentStore,
    club_id: i64,
    settings: &NetworkSettings,
) -> Result<Option<DetailedClub>, DirectoryError> {
    let Some(record) = store.get_published_club(club_id).await? else {
        return Ok(None);
    };

    let meta = store.get_club_meta_map(club_id).await?;
    let get = |key: &str| meta.get(key).cloned().unwrap_or_default();

    let mut thumbnail = store.get_thumbnail_url(club_id, ImageSize::Large).await?;
    if thumbnail.is_empty() {
        thumbnail = settings.default_image_url();
    }

    let facilities = facility_infos(store, club_id).await?;

    Ok(Some(DetailedClub {
        id: club_id,
        title: record.title,
        description: record.content,
        thumbnail,
        address: get(meta_keys::ADDRESS),
        is_premium: meta_flag(&get(meta_keys::IS_PREMIUM)),
        latitude: get(meta_keys::LATITUDE),
        longitude: get(meta_keys::LONGITUDE),
        rating: parse_rating(&get(meta_keys::RATING)),
        reviews_count: parse_review_count(&get(meta_keys::REVIEWS_COUNT)),
        hours: OpeningHours {
            mf: get(meta_keys::HOURS_MF),
            sat: get(meta_keys::HOURS_SAT),
            sun: get(meta_keys::HOURS_SUN),
        },
        contact: ClubContact {
            phone: get(meta_keys::CONTACT_PHONE),
            email: get(meta_keys::CONTACT_EMAIL),
            website: get(meta_keys::CONTACT_WEBSITE),
        },
        urls: ClubUrls {
            book_tour: get(meta_keys::BOOK_TOUR_URL),
            permalink: record.permalink,
            class_schedule_pdf: get(meta_keys::CLASS_SCHEDULE_PDF),
        },
        facilities,
        classes: parsing::parse_classes(&get(meta_keys::CLASSES_DATA)),
        memberships: parsing::parse_memberships(&get(meta_keys::MEMBERSHIPS_DATA)),
    }))
}

#[cfg(test)]
mod tests {
    use club_network_club_models::PostStatus;
    use club_network_store::memory::MemoryContentStore;
    use club_network_store_models::NewClub;

    use super::*;

    fn settings() -> NetworkSettings {
        NetworkSettings::default()
    }

    async fn seed_club(store: &MemoryContentStore, title: &str, slug: &str) -> i64 {
        store
            .upsert_club(&NewClub {
                title: title.to_string(),
                slug: slug.to_string(),
                content: format!("About {title}."),
                status: PostStatus::Publish,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn list_item_carries_meta_terms_and_thumbnail() {
        let store = MemoryContentStore::new();
        let club = seed_club(&store, "Marina Fitness", "marina-fitness").await;

        let casa = store
            .upsert_term(Taxonomy::City, "Casablanca", "casablanca")
            .await
            .unwrap();
        store.set_club_terms(club, Taxonomy::City, &[casa]).await.unwrap();

        let pool = store
            .upsert_term(Taxonomy::Facility, "Pool", "pool")
            .await
            .unwrap();
        store
            .put_term_meta(pool, meta_keys::FACILITY_ICON_URL, "/assets/images/pool.svg")
            .await
            .unwrap();
        store
            .put_term_meta(pool, meta_keys::FACILITY_DESCRIPTION, "25m indoor pool")
            .await
            .unwrap();
        let gym = store
            .upsert_term(Taxonomy::Facility, "Gym Floor", "gym-floor")
            .await
            .unwrap();
        store
            .set_club_terms(club, Taxonomy::Facility, &[pool, gym])
            .await
            .unwrap();

        let premium = store
            .upsert_term(Taxonomy::MembershipCategory, "Premium", "premium")
            .await
            .unwrap();
        store
            .set_club_terms(club, Taxonomy::MembershipCategory, &[premium])
            .await
            .unwrap();

        for (key, value) in [
            (meta_keys::ADDRESS, "1 Marina Blvd"),
            (meta_keys::HOURS_MF, "06:00 - 22:00"),
            (meta_keys::HOURS_SAT, "08:00 - 20:00"),
            (meta_keys::HOURS_SUN, "Closed"),
            (meta_keys::RATING, "4.50"),
            (meta_keys::REVIEWS_COUNT, "128"),
            (meta_keys::IS_PREMIUM, "1"),
            (meta_keys::LATITUDE, "33.6062"),
            (meta_keys::LONGITUDE, "-7.6334"),
            (meta_keys::CONTACT_PHONE, "+212 522 000 000"),
            (meta_keys::CLASS_SCHEDULE_PDF, "https://cdn.example/schedule.pdf"),
        ] {
            store.put_club_meta(club, key, value).await.unwrap();
        }
        store
            .set_club_image(club, ImageSize::MediumLarge, "https://cdn.example/marina.jpg")
            .await
            .unwrap();

        let clubs = clubs_data(&store, &ClubFilter::default(), &settings())
            .await
            .unwrap();

        assert_eq!(clubs.len(), 1);
        let item = &clubs[0];
        assert_eq!(item.id, club);
        assert_eq!(item.title, "Marina Fitness");
        assert_eq!(item.permalink, "http://localhost:8080/clubs/marina-fitness");
        assert_eq!(item.city_name, "Casablanca");
        assert_eq!(item.address, "1 Marina Blvd");
        assert_eq!(item.hours.mf, "06:00 - 22:00");
        assert_eq!(item.hours.sun, "Closed");
        assert!((item.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(item.reviews_count, 128);
        assert!(item.is_premium);
        assert_eq!(item.latitude, "33.6062");
        assert_eq!(item.thumbnail, "https://cdn.example/marina.jpg");
        assert_eq!(item.contact_phone, "+212 522 000 000");
        assert_eq!(item.class_schedule_pdf, "https://cdn.example/schedule.pdf");

        let facility_names: Vec<&str> =
            item.facilities.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(facility_names, vec!["Gym Floor", "Pool"]);
        let pool_info = item.facilities.iter().find(|f| f.slug == "pool").unwrap();
        assert_eq!(pool_info.icon_url, "/assets/images/pool.svg");
        assert_eq!(pool_info.description, "25m indoor pool");

        assert_eq!(item.membership_category.len(), 1);
        assert_eq!(item.membership_category[0].slug, "premium");
    }

    #[tokio::test]
    async fn missing_meta_and_image_fall_back() {
        let store = MemoryContentStore::new();
        seed_club(&store, "Bare", "bare").await;

        let clubs = clubs_data(&store, &ClubFilter::default(), &settings())
            .await
            .unwrap();

        let item = &clubs[0];
        assert_eq!(item.address, "");
        assert_eq!(item.city_name, "");
        assert!(item.facilities.is_empty());
        assert!((item.rating - 0.0).abs() < f64::EPSILON);
        assert_eq!(item.reviews_count, 0);
        assert!(!item.is_premium);
        assert_eq!(item.thumbnail, "/assets/images/default-club-image.jpg");
    }

    #[tokio::test]
    async fn filter_narrows_list_and_unknown_slug_is_empty() {
        let store = MemoryContentStore::new();

        let casa = store
            .upsert_term(Taxonomy::City, "Casablanca", "casablanca")
            .await
            .unwrap();
        let rabat = store
            .upsert_term(Taxonomy::City, "Rabat", "rabat")
            .await
            .unwrap();

        let first = seed_club(&store, "Casa Club", "casa-club").await;
        store.set_club_terms(first, Taxonomy::City, &[casa]).await.unwrap();
        let second = seed_club(&store, "Rabat Club", "rabat-club").await;
        store.set_club_terms(second, Taxonomy::City, &[rabat]).await.unwrap();

        let filter = ClubFilter {
            city: Some("casablanca".to_string()),
            ..ClubFilter::default()
        };
        let clubs = clubs_data(&store, &filter, &settings()).await.unwrap();
        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].title, "Casa Club");

        let filter = ClubFilter {
            city: Some("tangier".to_string()),
            ..ClubFilter::default()
        };
        let clubs = clubs_data(&store, &filter, &settings()).await.unwrap();
        assert!(clubs.is_empty());
    }

    #[tokio::test]
    async fn combined_filter_requires_every_dimension() {
        let store = MemoryContentStore::new();

        let casa = store
            .upsert_term(Taxonomy::City, "Casablanca", "casablanca")
            .await
            .unwrap();
        let pool = store
            .upsert_term(Taxonomy::Facility, "Pool", "pool")
            .await
            .unwrap();
        let premium = store
            .upsert_term(Taxonomy::MembershipCategory, "Premium", "premium")
            .await
            .unwrap();

        // Clubs holding zero, one, two, and all three of the filtered terms.
        seed_club(&store, "Holds None", "holds-none").await;

        let one = seed_club(&store, "Holds One", "holds-one").await;
        store.set_club_terms(one, Taxonomy::City, &[casa]).await.unwrap();

        let two = seed_club(&store, "Holds Two", "holds-two").await;
        store.set_club_terms(two, Taxonomy::City, &[casa]).await.unwrap();
        store.set_club_terms(two, Taxonomy::Facility, &[pool]).await.unwrap();

        let three = seed_club(&store, "Holds Three", "holds-three").await;
        store.set_club_terms(three, Taxonomy::City, &[casa]).await.unwrap();
        store.set_club_terms(three, Taxonomy::Facility, &[pool]).await.unwrap();
        store
            .set_club_terms(three, Taxonomy::MembershipCategory, &[premium])
            .await
            .unwrap();

        let filter = ClubFilter {
            city: Some("casablanca".to_string()),
            facility: Some("pool".to_string()),
            membership_category: Some("premium".to_string()),
        };
        let clubs = clubs_data(&store, &filter, &settings()).await.unwrap();

        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].id, three);
    }

    #[tokio::test]
    async fn available_filters_list_terms_in_use_by_name() {
        let store = MemoryContentStore::new();

        let casa = store
            .upsert_term(Taxonomy::City, "Casablanca", "casablanca")
            .await
            .unwrap();
        let agadir = store
            .upsert_term(Taxonomy::City, "Agadir", "agadir")
            .await
            .unwrap();
        let sauna = store
            .upsert_term(Taxonomy::Facility, "Sauna", "sauna")
            .await
            .unwrap();
        store
            .upsert_term(Taxonomy::MembershipCategory, "Family", "family")
            .await
            .unwrap();

        let club = seed_club(&store, "Club", "club").await;
        store
            .set_club_terms(club, Taxonomy::City, &[casa, agadir])
            .await
            .unwrap();
        store.set_club_terms(club, Taxonomy::Facility, &[sauna]).await.unwrap();

        let filters = available_filters(&store).await.unwrap();

        let city_names: Vec<&str> = filters.cities.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(city_names, vec!["Agadir", "Casablanca"]);
        assert_eq!(filters.facilities.len(), 1);
        assert_eq!(filters.facilities[0].slug, "sauna");
        assert!(filters.membership_categories.is_empty());
    }

    #[tokio::test]
    async fn detail_is_none_for_missing_or_unpublished() {
        let store = MemoryContentStore::new();

        assert!(detailed_club_data(&store, 999, &settings())
            .await
            .unwrap()
            .is_none());

        let draft = store
            .upsert_club(&NewClub {
                title: "Draft".to_string(),
                slug: "draft".to_string(),
                content: String::new(),
                status: PostStatus::Draft,
            })
            .await
            .unwrap();
        assert!(detailed_club_data(&store, draft, &settings())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn detail_assembles_contact_urls_and_parsed_blobs() {
        let store = MemoryContentStore::new();
        let club = seed_club(&store, "Atlas Club", "atlas-club").await;

        for (key, value) in [
            (meta_keys::CONTACT_PHONE, "+212 537 000 000"),
            (meta_keys::CONTACT_EMAIL, "hello@atlas.example"),
            (meta_keys::CONTACT_WEBSITE, "https://atlas.example"),
            (meta_keys::BOOK_TOUR_URL, "https://atlas.example/tour"),
            (
                meta_keys::CLASSES_DATA,
                "Yoga|Mon 18:00|Beginner|Sara\nBroken|line\nSpin|Tue 19:00|Open|Karim",
            ),
            (
                meta_keys::MEMBERSHIPS_DATA,
                "Basic|250 MAD|month|Pool,Gym|0\nPremium|450 MAD|month|Pool,Sauna|1|https://atlas.example/premium",
            ),
        ] {
            store.put_club_meta(club, key, value).await.unwrap();
        }

        let detail = detailed_club_data(&store, club, &settings())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.title, "Atlas Club");
        assert_eq!(detail.description, "About Atlas Club.");
        assert_eq!(detail.thumbnail, "/assets/images/default-club-image.jpg");
        assert_eq!(detail.contact.email, "hello@atlas.example");
        assert_eq!(detail.urls.book_tour, "https://atlas.example/tour");
        assert_eq!(detail.urls.permalink, "http://localhost:8080/clubs/atlas-club");

        assert_eq!(detail.classes.len(), 2);
        assert_eq!(detail.classes[1].instructor, "Karim");

        assert_eq!(detail.memberships.len(), 2);
        assert_eq!(detail.memberships[0].url, "#");
        assert!(detail.memberships[1].is_popular);
        assert_eq!(detail.memberships[1].url, "https://atlas.example/premium");
    }

    #[tokio::test]
    async fn detail_uses_large_image_size() {
        let store = MemoryContentStore::new();
        let club = seed_club(&store, "Sized", "sized").await;

        store
            .set_club_image(club, ImageSize::MediumLarge, "https://cdn.example/medium.jpg")
            .await
            .unwrap();
        store
            .set_club_image(club, ImageSize::Large, "https://cdn.example/large.jpg")
            .await
            .unwrap();

        let detail = detailed_club_data(&store, club, &settings())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.thumbnail, "https://cdn.example/large.jpg");

        let clubs = clubs_data(&store, &ClubFilter::default(), &settings())
            .await
            .unwrap();
        assert_eq!(clubs[0].thumbnail, "https://cdn.example/medium.jpg");
    }
}
