//! Listing entity representing a rental property offered on Roost.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Street address of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Street line, e.g. "120 Tremont Street"
    pub street: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// Rental rates for a listing
///
/// All three are optional; which ones are offered is up to the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    /// Price per night
    pub nightly: Option<f64>,

    /// Price per week
    pub weekly: Option<f64>,

    /// Price per month
    pub monthly: Option<f64>,
}

impl Rates {
    /// Check whether any rate is set
    pub fn has_any(&self) -> bool {
        self.nightly.is_some() || self.weekly.is_some() || self.monthly.is_some()
    }
}

/// Contact details shown to interested renters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Listing entity representing a published rental property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier, assigned by the store
    pub id: Uuid,

    /// Identifier of the user who published the listing
    pub owner: Uuid,

    /// Display name of the property
    pub name: String,

    /// Property category, e.g. "Apartment", "House", "Cottage"
    pub property_type: String,

    /// Free-text description
    pub description: String,

    /// Street address
    pub location: Location,

    /// Number of bedrooms
    pub beds: u32,

    /// Number of bathrooms; half-baths make this fractional
    pub baths: f64,

    /// Floor area in square feet
    pub square_feet: u32,

    /// Amenity labels, de-duplicated, in submission order
    pub amenities: Vec<String>,

    /// Rental rates
    pub rates: Rates,

    /// Owner contact details
    pub seller_info: SellerInfo,

    /// Image URLs in upload order; the first is the cover image
    pub images: Vec<String>,

    /// Whether the listing is promoted on the home page
    pub is_featured: bool,

    /// Timestamp when the listing was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the listing was last updated
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Checks whether the given user owns this listing
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }

    /// Returns the cover image URL, if any images exist
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A listing as submitted for creation, before the store has assigned
/// an id and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub owner: Uuid,
    pub name: String,
    pub property_type: String,
    pub description: String,
    pub location: Location,
    pub beds: u32,
    pub baths: f64,
    pub square_feet: u32,
    pub amenities: Vec<String>,
    pub rates: Rates,
    pub seller_info: SellerInfo,
    /// Already-ingested image URLs in upload order
    pub images: Vec<String>,
    pub is_featured: bool,
}

impl NewListing {
    /// Materializes a full `Listing` with the given id and creation time
    ///
    /// Stores call this once they have assigned an identifier.
    pub fn into_listing(self, id: Uuid, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            owner: self.owner,
            name: self.name,
            property_type: self.property_type,
            description: self.description,
            location: self.location,
            beds: self.beds,
            baths: self.baths,
            square_feet: self.square_feet,
            amenities: self.amenities,
            rates: self.rates,
            seller_info: self.seller_info,
            images: self.images,
            is_featured: self.is_featured,
            created_at,
            updated_at: created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_has_any() {
        assert!(!Rates::default().has_any());
        assert!(Rates { weekly: Some(450.0), ..Default::default() }.has_any());
    }

    #[test]
    fn test_into_listing_sets_both_timestamps() {
        let new = NewListing {
            owner: Uuid::new_v4(),
            name: "Cozy Loft".to_string(),
            property_type: "Apartment".to_string(),
            description: String::new(),
            location: Location::default(),
            beds: 2,
            baths: 1.5,
            square_feet: 900,
            amenities: vec!["Wifi".to_string()],
            rates: Rates { monthly: Some(2100.0), ..Default::default() },
            seller_info: SellerInfo::default(),
            images: vec!["https://img.example/a.jpg".to_string()],
            is_featured: false,
        };

        let id = Uuid::new_v4();
        let listing = new.into_listing(id, Utc::now());
        assert_eq!(listing.id, id);
        assert_eq!(listing.created_at, listing.updated_at);
        assert_eq!(listing.cover_image(), Some("https://img.example/a.jpg"));
    }
}
