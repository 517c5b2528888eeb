//! MySQL implementation of the ListingRepository trait.
//!
//! Listings are stored in a single flat table; the `amenities` and
//! `images` collections are kept as JSON-encoded TEXT columns. Term
//! matching relies on the case-insensitive utf8mb4 collation, which
//! mirrors the lowercase-substring semantics of `ListingFilter`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlArguments;
use sqlx::query::Query;
use sqlx::{MySql, MySqlPool, Row};
use uuid::Uuid;

use roost_core::domain::entities::listing::{Listing, Location, NewListing, Rates, SellerInfo};
use roost_core::errors::DomainError;
use roost_core::repositories::{ListingFilter, ListingRepository};

const LISTING_COLUMNS: &str = "id, owner_id, name, property_type, description, \
     street, city, state, zipcode, beds, baths, square_feet, amenities, \
     rate_nightly, rate_weekly, rate_monthly, seller_name, seller_email, seller_phone, \
     images, is_featured, created_at, updated_at";

/// MySQL implementation of ListingRepository
pub struct MySqlListingRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlListingRepository {
    /// Create a new MySQL listing repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Listing entity
    fn row_to_listing(row: &sqlx::mysql::MySqlRow) -> Result<Listing, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let owner: String = row
            .try_get("owner_id")
            .map_err(|e| column_error("owner_id", e))?;
        let amenities_json: String = row
            .try_get("amenities")
            .map_err(|e| column_error("amenities", e))?;
        let images_json: String = row
            .try_get("images")
            .map_err(|e| column_error("images", e))?;

        Ok(Listing {
            id: parse_uuid("id", &id)?,
            owner: parse_uuid("owner_id", &owner)?,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            property_type: row
                .try_get("property_type")
                .map_err(|e| column_error("property_type", e))?,
            description: row
                .try_get("description")
                .map_err(|e| column_error("description", e))?,
            location: Location {
                street: row.try_get("street").map_err(|e| column_error("street", e))?,
                city: row.try_get("city").map_err(|e| column_error("city", e))?,
                state: row.try_get("state").map_err(|e| column_error("state", e))?,
                zipcode: row
                    .try_get("zipcode")
                    .map_err(|e| column_error("zipcode", e))?,
            },
            beds: row.try_get("beds").map_err(|e| column_error("beds", e))?,
            baths: row.try_get("baths").map_err(|e| column_error("baths", e))?,
            square_feet: row
                .try_get("square_feet")
                .map_err(|e| column_error("square_feet", e))?,
            amenities: decode_json_column("amenities", &amenities_json)?,
            rates: Rates {
                nightly: row
                    .try_get("rate_nightly")
                    .map_err(|e| column_error("rate_nightly", e))?,
                weekly: row
                    .try_get("rate_weekly")
                    .map_err(|e| column_error("rate_weekly", e))?,
                monthly: row
                    .try_get("rate_monthly")
                    .map_err(|e| column_error("rate_monthly", e))?,
            },
            seller_info: SellerInfo {
                name: row
                    .try_get("seller_name")
                    .map_err(|e| column_error("seller_name", e))?,
                email: row
                    .try_get("seller_email")
                    .map_err(|e| column_error("seller_email", e))?,
                phone: row
                    .try_get("seller_phone")
                    .map_err(|e| column_error("seller_phone", e))?,
            },
            images: decode_json_column("images", &images_json)?,
            is_featured: row
                .try_get("is_featured")
                .map_err(|e| column_error("is_featured", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl ListingRepository for MySqlListingRepository {
    async fn create(&self, new: NewListing) -> Result<Listing, DomainError> {
        let listing = new.into_listing(Uuid::new_v4(), Utc::now());

        let amenities = encode_json_column("amenities", &listing.amenities)?;
        let images = encode_json_column("images", &listing.images)?;

        let query = format!(
            "INSERT INTO listings ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            LISTING_COLUMNS
        );

        sqlx::query(&query)
            .bind(listing.id.to_string())
            .bind(listing.owner.to_string())
            .bind(&listing.name)
            .bind(&listing.property_type)
            .bind(&listing.description)
            .bind(&listing.location.street)
            .bind(&listing.location.city)
            .bind(&listing.location.state)
            .bind(&listing.location.zipcode)
            .bind(listing.beds)
            .bind(listing.baths)
            .bind(listing.square_feet)
            .bind(&amenities)
            .bind(listing.rates.nightly)
            .bind(listing.rates.weekly)
            .bind(listing.rates.monthly)
            .bind(&listing.seller_info.name)
            .bind(&listing.seller_info.email)
            .bind(&listing.seller_info.phone)
            .bind(&images)
            .bind(listing.is_featured)
            .bind(listing.created_at)
            .bind(listing.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to insert listing: {}", e),
            })?;

        Ok(listing)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, DomainError> {
        let query = format!(
            "SELECT {} FROM listings WHERE id = ? LIMIT 1",
            LISTING_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to find listing: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_listing(&row)?)),
            None => Ok(None),
        }
    }

    async fn find(
        &self,
        filter: &ListingFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Listing>, DomainError> {
        let query = format!(
            "SELECT {} FROM listings{} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            LISTING_COLUMNS,
            filter_sql(filter)
        );

        let rows = bind_filter(sqlx::query(&query), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to query listings: {}", e),
            })?;

        let mut listings = Vec::with_capacity(rows.len());
        for row in rows {
            listings.push(Self::row_to_listing(&row)?);
        }

        Ok(listings)
    }

    async fn count(&self, filter: &ListingFilter) -> Result<u64, DomainError> {
        let query = format!(
            "SELECT COUNT(*) AS total FROM listings{}",
            filter_sql(filter)
        );

        let row = bind_filter(sqlx::query(&query), filter)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to count listings: {}", e),
            })?;

        let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
        Ok(total as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to delete listing: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Build the WHERE clause for a filter, or an empty string
fn filter_sql(filter: &ListingFilter) -> String {
    let mut conditions: Vec<&str> = Vec::new();

    if filter.term.is_some() {
        conditions.push(
            "(name LIKE ? OR description LIKE ? OR street LIKE ? \
             OR city LIKE ? OR state LIKE ? OR zipcode LIKE ?)",
        );
    }
    if filter.property_type.is_some() {
        conditions.push("property_type = ?");
    }
    if filter.owner.is_some() {
        conditions.push("owner_id = ?");
    }
    if filter.featured.is_some() {
        conditions.push("is_featured = ?");
    }

    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

/// Bind filter values in the order `filter_sql` emits placeholders
fn bind_filter<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    filter: &ListingFilter,
) -> Query<'q, MySql, MySqlArguments> {
    if let Some(term) = &filter.term {
        let pattern = like_pattern(term);
        // One bind per searched column
        for _ in 0..6 {
            query = query.bind(pattern.clone());
        }
    }
    if let Some(property_type) = &filter.property_type {
        query = query.bind(property_type.clone());
    }
    if let Some(owner) = filter.owner {
        query = query.bind(owner.to_string());
    }
    if let Some(featured) = filter.featured {
        query = query.bind(featured);
    }
    query
}

/// Wrap a term in `%` wildcards, escaping LIKE metacharacters
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn parse_uuid(column: &str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Persistence {
        message: format!("Invalid UUID in column {}: {}", column, e),
    })
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Persistence {
        message: format!("Failed to read column {}: {}", column, e),
    }
}

fn decode_json_column(column: &str, raw: &str) -> Result<Vec<String>, DomainError> {
    serde_json::from_str(raw).map_err(|e| DomainError::Persistence {
        message: format!("Invalid JSON in column {}: {}", column, e),
    })
}

fn encode_json_column(column: &str, values: &[String]) -> Result<String, DomainError> {
    serde_json::to_string(values).map_err(|e| DomainError::Persistence {
        message: format!("Failed to encode column {}: {}", column, e),
    })
}
