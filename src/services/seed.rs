use crate::errors::ListingResult;
use crate::models::{Property, PropertyId, PropertyStatus};
use crate::services::traits::PropertyService;
use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use tracing::{info, warn};

fn listed_at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn listing(
    id: PropertyId,
    name: &str,
    address: &str,
    price: f64,
    status: PropertyStatus,
    description: &str,
) -> Property {
    let created_at = listed_at(id as u32);
    Property {
        id,
        name: name.to_string(),
        address: address.to_string(),
        price,
        description: description.to_string(),
        status,
        image: format!("https://images.example.com/listings/{id}.jpg"),
        is_deleted: false,
        created_at,
        updated_at: created_at,
    }
}

/// Built-in listings used when no seed file is configured
pub fn demo_listings() -> Vec<Property> {
    use PropertyStatus::{Available, Sold, UnderContract};

    vec![
        listing(
            1,
            "Sunset Villa",
            "123 Ocean Drive, Malibu, CA",
            2_450_000.0,
            Available,
            "Beachfront villa with panoramic ocean views and a private pool.",
        ),
        listing(
            2,
            "Downtown Loft",
            "88 Market Street, San Francisco, CA",
            1_150_000.0,
            UnderContract,
            "Converted warehouse loft with exposed brick and skyline views.",
        ),
        listing(
            3,
            "Maple Grove Cottage",
            "14 Maple Lane, Burlington, VT",
            389_000.0,
            Available,
            "Cozy two-bedroom cottage on a quiet, tree-lined street.",
        ),
        listing(
            4,
            "Lakeside Retreat",
            "7 Shoreline Road, Lake Tahoe, NV",
            1_780_000.0,
            Sold,
            "Timber-frame home with a dock and direct lake access.",
        ),
        listing(
            5,
            "Urban Studio",
            "450 W 42nd Street, New York, NY",
            625_000.0,
            Available,
            "Efficient studio near transit with a shared roof terrace.",
        ),
        listing(
            6,
            "Desert Modern",
            "2201 Cactus Way, Scottsdale, AZ",
            940_000.0,
            Available,
            "Single-level modern home with mountain views and a courtyard.",
        ),
        listing(
            7,
            "Historic Brownstone",
            "31 Beacon Hill Road, Boston, MA",
            2_100_000.0,
            UnderContract,
            "Restored 1890s brownstone with original millwork and a garden.",
        ),
        listing(
            8,
            "Prairie Farmhouse",
            "9 County Road 12, Lawrence, KS",
            310_000.0,
            Sold,
            "Four-bedroom farmhouse on five acres with a renovated barn.",
        ),
        listing(
            9,
            "Harbor View Condo",
            "600 Pier Avenue, Seattle, WA",
            815_000.0,
            Available,
            "Corner condo overlooking the harbor with floor-to-ceiling windows.",
        ),
        listing(
            10,
            "Mountain Chalet",
            "55 Summit Trail, Aspen, CO",
            3_200_000.0,
            Available,
            "Ski-in chalet with a stone fireplace and heated garage.",
        ),
        listing(
            11,
            "Garden Townhouse",
            "17 Magnolia Court, Charleston, SC",
            575_000.0,
            UnderContract,
            "Three-story townhouse with a private walled garden.",
        ),
        listing(
            12,
            "Riverside Bungalow",
            "42 River Road, Austin, TX",
            498_000.0,
            Available,
            "Craftsman bungalow a short walk from the riverfront trail.",
        ),
    ]
}

/// Read a JSON array of listings
pub async fn load_listings(path: impl AsRef<Path>) -> ListingResult<Vec<Property>> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await?;
    let listings: Vec<Property> = serde_json::from_str(&raw)?;
    if listings.is_empty() {
        warn!("Seed file {} contains no listings", path.display());
    }
    info!("Loaded {} listings from {}", listings.len(), path.display());
    Ok(listings)
}

/// Write every listing the service holds, deleted ones included, as pretty JSON
pub async fn export_listings<S>(service: &S, path: impl AsRef<Path>) -> ListingResult<usize>
where
    S: PropertyService + ?Sized,
{
    let path = path.as_ref();
    let listings = service.get_all().await?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(&listings)?;
    tokio::fs::write(path, json).await?;

    info!(
        "💾 Saved {} listings from {} to {}",
        listings.len(),
        service.source_name(),
        path.display()
    );
    Ok(listings.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ListingError;
    use crate::services::MockPropertyService;
    use std::collections::HashSet;
    use std::time::Duration;

    fn scratch_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("property-listings-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn demo_listings_are_consistent() {
        let listings = demo_listings();
        assert!(listings.len() > 10);

        let ids: HashSet<_> = listings.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), listings.len());
        assert!(listings.iter().enumerate().all(|(i, p)| p.id == i as PropertyId + 1));
        assert!(listings.iter().all(|p| p.updated_at >= p.created_at && !p.is_deleted));
        for status in PropertyStatus::ALL {
            assert!(listings.iter().any(|p| p.status == status));
        }
    }

    #[tokio::test]
    async fn export_then_load_preserves_listings() {
        let service = MockPropertyService::new();
        service.soft_delete(4).await.unwrap();
        let path = scratch_file("export.json");

        let written = export_listings(&service, &path).await.unwrap();
        let loaded = load_listings(&path).await.unwrap();

        assert_eq!(written, loaded.len());
        assert_eq!(loaded, service.get_all().await.unwrap());
        assert!(loaded.iter().find(|p| p.id == 4).unwrap().is_deleted);
        let reseeded = MockPropertyService::with_listings(loaded, Duration::ZERO);
        assert_eq!(reseeded.get_all().await.unwrap().len(), written);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn malformed_seed_is_a_json_error() {
        let path = scratch_file("broken.json");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = load_listings(&path).await.unwrap_err();
        assert!(matches!(err, ListingError::Json(_)));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_seed_is_an_io_error() {
        let err = load_listings(scratch_file("absent.json")).await.unwrap_err();
        assert!(matches!(err, ListingError::Io(_)));
    }
}
