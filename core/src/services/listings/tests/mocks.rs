//! Shared fixtures for listing service tests

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::listing::{Listing, Location, Rates, SellerInfo};
use crate::domain::entities::user::User;
use crate::domain::value_objects::identity::Session;
use crate::repositories::{MockListingRepository, MockUserRepository};
use crate::services::cache::MockPageCache;
use crate::services::listings::{
    ListingLifecycleService, ListingSearchService, ListingSubmission, SearchServiceConfig,
};
use crate::services::media::{ImageFile, MediaService, MediaServiceConfig, MockMediaStore};
use crate::services::session::{SessionService, SessionServiceConfig};

/// Fully mocked lifecycle service plus handles to every collaborator
pub struct LifecycleFixture {
    pub listings: Arc<MockListingRepository>,
    pub users: Arc<MockUserRepository>,
    pub media: Arc<MockMediaStore>,
    pub cache: Arc<MockPageCache>,
    pub service: ListingLifecycleService<
        MockListingRepository,
        MockUserRepository,
        MockMediaStore,
        MockPageCache,
    >,
}

pub fn lifecycle_fixture() -> LifecycleFixture {
    let listings = Arc::new(MockListingRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let media = Arc::new(MockMediaStore::new());
    let cache = Arc::new(MockPageCache::new());

    let session_service = Arc::new(SessionService::new(
        users.clone(),
        SessionServiceConfig::default(),
    ));
    let media_service = Arc::new(MediaService::new(
        media.clone(),
        MediaServiceConfig::default(),
    ));

    let service = ListingLifecycleService::new(
        listings.clone(),
        session_service,
        media_service,
        cache.clone(),
    );

    LifecycleFixture {
        listings,
        users,
        media,
        cache,
        service,
    }
}

/// Fully mocked search service plus handles to every collaborator
pub struct SearchFixture {
    pub listings: Arc<MockListingRepository>,
    pub cache: Arc<MockPageCache>,
    pub service: ListingSearchService<MockListingRepository, MockPageCache>,
}

pub fn search_fixture() -> SearchFixture {
    let listings = Arc::new(MockListingRepository::new());
    let cache = Arc::new(MockPageCache::new());
    let service = ListingSearchService::new(
        listings.clone(),
        cache.clone(),
        SearchServiceConfig::default(),
    );

    SearchFixture {
        listings,
        cache,
        service,
    }
}

/// Insert a user and return it together with a live session
pub async fn signed_in_user(users: &MockUserRepository, email: &str) -> (User, Session) {
    let user = User::new(email.to_string(), "Test Owner".to_string(), None);
    users.insert(user.clone()).await;
    let session = Session {
        user_id: user.id,
        email: user.email.clone(),
    };
    (user, session)
}

/// A valid submission with the given name and two images
pub fn submission(name: &str) -> ListingSubmission {
    ListingSubmission {
        name: name.to_string(),
        property_type: "Apartment".to_string(),
        description: "Bright two-bed with a view".to_string(),
        location: Location {
            street: "120 Tremont Street".to_string(),
            city: "Boston".to_string(),
            state: "MA".to_string(),
            zipcode: "02108".to_string(),
        },
        beds: 2,
        baths: 1.5,
        square_feet: 900,
        amenities: vec!["Wifi".to_string(), "Full Kitchen".to_string()],
        rates: Rates {
            monthly: Some(2800.0),
            ..Default::default()
        },
        seller_info: SellerInfo {
            name: "Test Owner".to_string(),
            email: "owner@example.com".to_string(),
            phone: "617-555-0100".to_string(),
        },
        images: vec![
            ImageFile {
                file_name: "front.png".to_string(),
                bytes: b"front-bytes".to_vec(),
            },
            ImageFile {
                file_name: "kitchen.png".to_string(),
                bytes: b"kitchen-bytes".to_vec(),
            },
        ],
    }
}

/// Build a stored listing directly, bypassing the create flow
pub fn stored_listing(
    owner: Uuid,
    name: &str,
    city: &str,
    property_type: &str,
    is_featured: bool,
    created_at: DateTime<Utc>,
) -> Listing {
    Listing {
        id: Uuid::new_v4(),
        owner,
        name: name.to_string(),
        property_type: property_type.to_string(),
        description: format!("{} in {}", property_type, city),
        location: Location {
            street: "1 Main Street".to_string(),
            city: city.to_string(),
            state: "MA".to_string(),
            zipcode: "02108".to_string(),
        },
        beds: 3,
        baths: 2.0,
        square_feet: 1200,
        amenities: vec!["Wifi".to_string()],
        rates: Rates {
            nightly: Some(150.0),
            ..Default::default()
        },
        seller_info: SellerInfo::default(),
        images: vec![format!("https://media.test/listings/{}.png", name)],
        is_featured,
        created_at,
        updated_at: created_at,
    }
}

/// `count` stored listings, created one minute apart, oldest first
pub fn seed_listings(repo: &MockListingRepository, owner: Uuid, count: usize) -> Vec<Listing> {
    let base = Utc::now() - Duration::hours(1);
    (0..count)
        .map(|i| {
            let listing = stored_listing(
                owner,
                &format!("Listing {}", i),
                "Boston",
                "Apartment",
                false,
                base + Duration::minutes(i as i64),
            );
            repo.insert(listing.clone());
            listing
        })
        .collect()
}
