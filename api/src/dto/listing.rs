//! Request, query, and response shapes for listing endpoints.
//!
//! The submission schema is typed field by field; nothing is smuggled
//! through as loose form data. Read endpoints serialize the domain
//! entities directly because their shape already is the wire shape.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use roost_core::domain::entities::listing::{Location, Rates, SellerInfo};
use roost_core::errors::{DomainError, DomainResult};
use roost_core::services::listings::{ListingSubmission, SearchQuery};
use roost_core::services::media::ImageFile;
use roost_shared::types::Pagination;

/// Body of `POST /api/v1/listings`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "property_type must be 1 to 50 characters"))]
    pub property_type: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub location: LocationRequest,

    pub beds: u32,
    pub baths: f64,
    pub square_feet: u32,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub rates: RatesRequest,

    #[validate(nested)]
    pub seller_info: SellerInfoRequest,

    /// Image payloads in the order the owner arranged them
    #[serde(default)]
    pub images: Vec<ImageUpload>,
}

/// Street address fields of a submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationRequest {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
}

/// Rental rate fields of a submission; all optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RatesRequest {
    #[validate(range(min = 0.0, message = "nightly rate must not be negative"))]
    pub nightly: Option<f64>,
    #[validate(range(min = 0.0, message = "weekly rate must not be negative"))]
    pub weekly: Option<f64>,
    #[validate(range(min = 0.0, message = "monthly rate must not be negative"))]
    pub monthly: Option<f64>,
}

/// Owner contact fields of a submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SellerInfoRequest {
    #[serde(default)]
    pub name: String,
    #[validate(email(message = "seller email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// One image file, base64 encoded
///
/// Entries whose file name is empty are dropped during conversion; the
/// submission form pads its file input with a nameless placeholder when
/// no file was chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    pub file_name: String,
    /// Base64 image bytes, with or without a `data:` URI prefix
    pub data: String,
}

impl From<LocationRequest> for Location {
    fn from(location: LocationRequest) -> Self {
        Self {
            street: location.street,
            city: location.city,
            state: location.state,
            zipcode: location.zipcode,
        }
    }
}

impl From<RatesRequest> for Rates {
    fn from(rates: RatesRequest) -> Self {
        Self {
            nightly: rates.nightly,
            weekly: rates.weekly,
            monthly: rates.monthly,
        }
    }
}

impl From<SellerInfoRequest> for SellerInfo {
    fn from(seller: SellerInfoRequest) -> Self {
        Self {
            name: seller.name,
            email: seller.email,
            phone: seller.phone,
        }
    }
}

impl CreateListingRequest {
    /// Lower the request into a domain submission
    ///
    /// Decodes every image payload up front so a corrupt file rejects
    /// the whole request before any side effect.
    pub fn into_submission(self) -> DomainResult<ListingSubmission> {
        let mut images = Vec::with_capacity(self.images.len());
        for upload in self.images {
            if upload.file_name.is_empty() {
                continue;
            }
            let bytes = STANDARD
                .decode(base64_payload(&upload.data))
                .map_err(|_| {
                    DomainError::validation(format!(
                        "Image '{}' is not valid base64",
                        upload.file_name
                    ))
                })?;
            images.push(ImageFile {
                file_name: upload.file_name,
                bytes,
            });
        }

        Ok(ListingSubmission {
            name: self.name,
            property_type: self.property_type,
            description: self.description,
            location: self.location.into(),
            beds: self.beds,
            baths: self.baths,
            square_feet: self.square_feet,
            amenities: self.amenities,
            rates: self.rates.into(),
            seller_info: self.seller_info.into(),
            images,
        })
    }
}

/// Strip an optional `data:...;base64,` prefix from an image payload
fn base64_payload(data: &str) -> &str {
    if data.starts_with("data:") {
        data.split_once(',').map(|(_, rest)| rest).unwrap_or(data)
    } else {
        data
    }
}

/// Query string of the browse endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// Resolve defaults and clamp out-of-range values
    pub fn pagination(&self) -> Pagination {
        pagination_from(self.page, self.per_page)
    }
}

/// Query string of the search endpoint
///
/// Pagination fields are identical to [`PageQuery`]; search pages the
/// same way browse does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchListingsQuery {
    /// Free text matched against the name, description, and address
    pub location: Option<String>,
    pub property_type: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchListingsQuery {
    /// Resolve defaults and clamp out-of-range values
    pub fn pagination(&self) -> Pagination {
        pagination_from(self.page, self.per_page)
    }

    /// The free-text part of the query
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery {
            term: self.location.clone(),
            property_type: self.property_type.clone(),
        }
    }
}

fn pagination_from(page: Option<u32>, per_page: Option<u32>) -> Pagination {
    let defaults = Pagination::default();
    Pagination::new(
        page.unwrap_or(defaults.page),
        per_page.unwrap_or(defaults.per_page),
    )
}

/// Response of a successful listing creation
///
/// The detail path additionally travels in the `Location` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedListingResponse {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CreateListingRequest {
        CreateListingRequest {
            name: "Seaside Cottage".to_string(),
            property_type: "Cottage".to_string(),
            description: "Two minutes from the beach".to_string(),
            location: LocationRequest {
                street: "14 Shore Road".to_string(),
                city: "Falmouth".to_string(),
                state: "MA".to_string(),
                zipcode: "02540".to_string(),
            },
            beds: 3,
            baths: 1.5,
            square_feet: 1100,
            amenities: vec!["Wifi".to_string()],
            rates: RatesRequest {
                weekly: Some(1200.0),
                ..Default::default()
            },
            seller_info: SellerInfoRequest {
                name: "Pat".to_string(),
                email: "pat@example.com".to_string(),
                phone: "555-0134".to_string(),
            },
            images: Vec::new(),
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(sample_request().validate().is_ok());
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let mut request = sample_request();
        request.name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bad_seller_email_fails_validation() {
        let mut request = sample_request();
        request.seller_info.email = "not-an-address".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_rate_fails_validation() {
        let mut request = sample_request();
        request.rates.nightly = Some(-10.0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_submission_decodes_images_and_drops_nameless_entries() {
        let mut request = sample_request();
        request.images = vec![
            ImageUpload {
                file_name: "front.png".to_string(),
                data: STANDARD.encode(b"front-bytes"),
            },
            ImageUpload {
                file_name: String::new(),
                data: String::new(),
            },
            ImageUpload {
                file_name: "back.png".to_string(),
                data: format!("data:image/png;base64,{}", STANDARD.encode(b"back-bytes")),
            },
        ];

        let submission = request.into_submission().unwrap();
        assert_eq!(submission.images.len(), 2);
        assert_eq!(submission.images[0].file_name, "front.png");
        assert_eq!(submission.images[0].bytes, b"front-bytes");
        assert_eq!(submission.images[1].bytes, b"back-bytes");
    }

    #[test]
    fn test_into_submission_rejects_invalid_base64() {
        let mut request = sample_request();
        request.images = vec![ImageUpload {
            file_name: "broken.png".to_string(),
            data: "%%%not-base64%%%".to_string(),
        }];

        let error = request.into_submission().unwrap_err();
        match error {
            DomainError::Validation { message } => assert!(message.contains("broken.png")),
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_pagination_defaults_and_clamping() {
        let defaults = PageQuery {
            page: None,
            per_page: None,
        };
        assert_eq!(defaults.pagination(), Pagination::new(1, 9));

        let out_of_range = PageQuery {
            page: Some(0),
            per_page: Some(5000),
        };
        let page = out_of_range.pagination();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 100);
    }

    #[test]
    fn test_search_query_lowering() {
        let query = SearchListingsQuery {
            location: Some("beach".to_string()),
            property_type: Some("All".to_string()),
            page: Some(2),
            per_page: None,
        };
        assert_eq!(query.pagination(), Pagination::new(2, 9));
        let search = query.search_query();
        assert_eq!(search.term.as_deref(), Some("beach"));
        assert_eq!(search.property_type.as_deref(), Some("All"));
    }
}
