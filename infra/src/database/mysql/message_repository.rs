//! MySQL implementation of the MessageRepository trait.
//!
//! The inbox is a read model assembled at query time: sender usernames
//! come from an inner join on users, listing names from a left join so
//! messages survive the deletion of the listing they were sent about.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use roost_core::domain::entities::message::Message;
use roost_core::domain::value_objects::inbox::InboxMessage;
use roost_core::errors::DomainError;
use roost_core::repositories::MessageRepository;

/// MySQL implementation of MessageRepository
pub struct MySqlMessageRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlMessageRepository {
    /// Create a new MySQL message repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a joined inbox row to an InboxMessage
    fn row_to_inbox_message(row: &sqlx::mysql::MySqlRow) -> Result<InboxMessage, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let sender_id: String = row
            .try_get("sender_id")
            .map_err(|e| column_error("sender_id", e))?;
        let recipient_id: String = row
            .try_get("recipient_id")
            .map_err(|e| column_error("recipient_id", e))?;
        let listing_id: Option<String> = row
            .try_get("listing_id")
            .map_err(|e| column_error("listing_id", e))?;

        let message = Message {
            id: parse_uuid("id", &id)?,
            sender_id: parse_uuid("sender_id", &sender_id)?,
            recipient_id: parse_uuid("recipient_id", &recipient_id)?,
            listing_id: listing_id
                .as_deref()
                .map(|value| parse_uuid("listing_id", value))
                .transpose()?,
            body: row.try_get("body").map_err(|e| column_error("body", e))?,
            is_read: row
                .try_get("is_read")
                .map_err(|e| column_error("is_read", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        };

        Ok(InboxMessage {
            message,
            sender_username: row
                .try_get("sender_username")
                .map_err(|e| column_error("sender_username", e))?,
            // NULL when the listing no longer exists
            listing_name: row
                .try_get("listing_name")
                .map_err(|e| column_error("listing_name", e))?,
        })
    }
}

#[async_trait]
impl MessageRepository for MySqlMessageRepository {
    async fn inbox_for(&self, recipient: Uuid) -> Result<Vec<InboxMessage>, DomainError> {
        let query = r#"
            SELECT m.id, m.sender_id, m.recipient_id, m.listing_id, m.body, m.is_read, m.created_at,
                   u.username AS sender_username, l.name AS listing_name
            FROM messages m
            INNER JOIN users u ON u.id = m.sender_id
            LEFT JOIN listings l ON l.id = m.listing_id
            WHERE m.recipient_id = ?
            ORDER BY m.is_read ASC, m.created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(recipient.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Persistence {
                message: format!("Failed to query inbox: {}", e),
            })?;

        let mut inbox = Vec::with_capacity(rows.len());
        for row in rows {
            inbox.push(Self::row_to_inbox_message(&row)?);
        }

        Ok(inbox)
    }

    async fn count_unread(&self, recipient: Uuid) -> Result<u64, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM messages WHERE recipient_id = ? AND is_read = FALSE",
        )
        .bind(recipient.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Persistence {
            message: format!("Failed to count unread messages: {}", e),
        })?;

        let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
        Ok(total as u64)
    }
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
