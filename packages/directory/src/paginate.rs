//! Page slicing for club lists.

use club_network_club_models::Club;
use club_network_directory_models::PagedClubs;

/// Default page size.
pub const DEFAULT_PER_PAGE: u32 = 9;

/// Slices `clubs` into the 1-based `page` of `per_page` items.
///
/// A page below 1 is treated as page 1 and a `per_page` of 0 as 1. A page
/// past the end yields an empty page with the totals intact.
#[must_use]
pub fn paginate(clubs: Vec<Club>, page: u32, per_page: u32) -> PagedClubs {
    let per_page = per_page.max(1);
    let page = page.max(1);

    let total_count = clubs.len() as u64;
    #[allow(clippy::cast_possible_truncation)]
    let total_pages = clubs.len().div_ceil(per_page as usize) as u32;

    let start = ((page - 1) as usize).saturating_mul(per_page as usize);
    let page_clubs: Vec<Club> = clubs
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    PagedClubs {
        clubs: page_clubs,
        total_count,
        total_pages,
        page,
        per_page,
    }
}
