//! Tolerant parsers for club meta blobs and coordinates.
//!
//! Classes and membership plans are stored as free-text blobs, one
//! pipe-delimited record per line, pasted in by club operators. Parsing
//! skips anything malformed instead of failing: a line with too few columns
//! is dropped, a coordinate that is not a finite number is treated as
//! absent.

use club_network_club_models::{ClubClass, MembershipPlan, meta_flag};

/// Parses the classes blob, one `Name|Schedule|Level|Instructor` per line.
///
/// Lines with fewer than four columns are skipped. Extra columns are
/// ignored.
#[must_use]
pub fn parse_classes(raw: &str) -> Vec<ClubClass> {
    raw.trim().lines().filter_map(parse_class_line).collect()
}

fn parse_class_line(line: &str) -> Option<ClubClass> {
    let parts: Vec<&str> = line.trim().split('|').collect();
    if parts.len() < 4 {
        return None;
    }

    Some(ClubClass {
        name: parts[0].trim().to_string(),
        schedule: parts[1].trim().to_string(),
        level: parts[2].trim().to_string(),
        instructor: parts[3].trim().to_string(),
    })
}

/// Parses the memberships blob, one
/// `Name|Price|Period|Feature,Feature,...|IsPopular|URL` per line.
///
/// Lines with fewer than five columns are skipped. The URL column is
/// optional and defaults to `#` when absent.
#[must_use]
pub fn parse_memberships(raw: &str) -> Vec<MembershipPlan> {
    raw.trim().lines().filter_map(parse_membership_line).collect()
}

fn parse_membership_line(line: &str) -> Option<MembershipPlan> {
    let parts: Vec<&str> = line.trim().split('|').collect();
    if parts.len() < 5 {
        return None;
    }

    let features = parts[3].split(',').map(|f| f.trim().to_string()).collect();

    let url = parts
        .get(5)
        .map_or_else(|| "#".to_string(), |u| u.trim().to_string());

    Some(MembershipPlan {
        name: parts[0].trim().to_string(),
        price: parts[1].trim().to_string(),
        period: parts[2].trim().to_string(),
        features,
        is_popular: meta_flag(parts[4]),
        url,
    })
}

/// Parses a latitude/longitude pair, returning `None` unless both values
/// are non-empty and parse as finite numbers.
#[must_use]
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Option<(f64, f64)> {
    let lat = parse_coordinate(latitude)?;
    let lng = parse_coordinate(longitude)?;

    Some((lat, lng))
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
