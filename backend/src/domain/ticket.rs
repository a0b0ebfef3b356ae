//! Ticket aggregate, its enumerations, and the creation/update inputs.
//!
//! The stored form and the wire form are the same camelCase JSON object:
//!
//! ```text
//! {"id":"…","title":"…","description":"…","priority":"Medium",
//!  "status":"In Progress","assignedTo":null,
//!  "createdAt":"2025-01-01T00:00:00Z","updatedAt":"2025-01-01T00:00:00Z"}
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors raised while building ticket inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketValidationError {
    /// Ticket identifier was empty.
    #[error("ticket id must not be empty")]
    EmptyId,
    /// Title was missing or blank.
    #[error("title must not be empty")]
    EmptyTitle,
    /// Description was missing or blank.
    #[error("description must not be empty")]
    EmptyDescription,
    /// Priority text did not name a known priority.
    #[error("unknown priority '{value}'; expected Low, Medium or High")]
    UnknownPriority {
        /// Rejected input.
        value: String,
    },
    /// Status text did not name a known status.
    #[error("unknown status '{value}'; expected Open, In Progress or Closed")]
    UnknownStatus {
        /// Rejected input.
        value: String,
    },
}

/// Opaque ticket identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    /// Wrap an identifier taken from a request path or a stored record.
    pub fn new(raw: impl Into<String>) -> Result<Self, TicketValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(TicketValidationError::EmptyId);
        }
        Ok(Self(raw))
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TicketId> for String {
    fn from(value: TicketId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TicketId {
    type Error = TicketValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Ticket urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TicketPriority {
    /// Can wait.
    Low,
    /// Default urgency.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl FromStr for TicketPriority {
    type Err = TicketValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(TicketValidationError::UnknownPriority {
                value: other.to_owned(),
            }),
        }
    }
}

/// Ticket lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TicketStatus {
    /// Newly raised.
    #[default]
    Open,
    /// Someone is working on it.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Done.
    Closed,
}

impl FromStr for TicketStatus {
    type Err = TicketValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "In Progress" => Ok(Self::InProgress),
            "Closed" => Ok(Self::Closed),
            other => Err(TicketValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validated input for creating a ticket.
///
/// ## Invariants
/// - `title` and `description` are not blank.
/// - an empty `assigned_to` is normalised to `None`.
///
/// # Examples
/// ```
/// use ticketdesk::domain::{NewTicket, TicketPriority};
///
/// let draft = NewTicket::try_new("Printer jam", "Tray 2", None, Some(String::new())).unwrap();
/// assert_eq!(draft.priority(), TicketPriority::Medium);
/// assert_eq!(draft.assigned_to(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    title: String,
    description: String,
    priority: TicketPriority,
    assigned_to: Option<String>,
}

impl NewTicket {
    /// Validate creation inputs, applying the priority default.
    pub fn try_new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Option<TicketPriority>,
        assigned_to: Option<String>,
    ) -> Result<Self, TicketValidationError> {
        let title = title.into();
        let description = description.into();
        if title.trim().is_empty() {
            return Err(TicketValidationError::EmptyTitle);
        }
        if description.trim().is_empty() {
            return Err(TicketValidationError::EmptyDescription);
        }
        Ok(Self {
            title,
            description,
            priority: priority.unwrap_or_default(),
            assigned_to: assigned_to.filter(|email| !email.is_empty()),
        })
    }

    /// Requested title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Requested description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Priority after defaulting.
    pub fn priority(&self) -> TicketPriority {
        self.priority
    }

    /// Assignee email, if any.
    pub fn assigned_to(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }
}

/// Partial update. `None` keeps the current value.
///
/// `assigned_to` is tri-state: `None` keeps, `Some(None)` clears,
/// `Some(Some(email))` reassigns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<TicketPriority>,
    /// Replacement status.
    pub status: Option<TicketStatus>,
    /// Assignment change.
    pub assigned_to: Option<Option<String>>,
}

impl TicketPatch {
    /// Build a patch from loosely typed request fields.
    ///
    /// Empty strings count as "not provided" for title, description, priority
    /// and status. For `assigned_to`, an explicit `null` or `""` clears the
    /// assignment.
    pub fn from_raw(
        title: Option<String>,
        description: Option<String>,
        priority: Option<String>,
        status: Option<String>,
        assigned_to: Option<Option<String>>,
    ) -> Result<Self, TicketValidationError> {
        let provided = |value: Option<String>| value.filter(|text| !text.is_empty());
        Ok(Self {
            title: provided(title),
            description: provided(description),
            priority: provided(priority).map(|p| p.parse::<TicketPriority>()).transpose()?,
            status: provided(status).map(|s| s.parse::<TicketStatus>()).transpose()?,
            assigned_to: assigned_to.map(|email| email.filter(|text| !text.is_empty())),
        })
    }
}

/// A support ticket.
///
/// ## Invariants
/// - `id` and `created_at` never change after creation.
/// - `updated_at >= created_at`, and it never moves backwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[schema(value_type = String, example = "0f8fad5b-d9cb-469f-a165-70867728950e")]
    id: TicketId,
    #[schema(example = "Printer on floor 2 is jammed")]
    title: String,
    description: String,
    #[serde(default)]
    priority: TicketPriority,
    #[serde(default)]
    status: TicketStatus,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    assigned_to: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Stamp a new ticket from a validated draft.
    pub fn create(id: TicketId, draft: NewTicket, now: DateTime<Utc>) -> Self {
        let NewTicket {
            title,
            description,
            priority,
            assigned_to,
        } = draft;
        Self {
            id,
            title,
            description,
            priority,
            status: TicketStatus::default(),
            assigned_to,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch and refresh `updated_at`.
    ///
    /// A clock that went backwards leaves `updated_at` where it was.
    pub fn apply(&mut self, patch: TicketPatch, now: DateTime<Utc>) {
        let TicketPatch {
            title,
            description,
            priority,
            status,
            assigned_to,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(assigned_to) = assigned_to {
            self.assigned_to = assigned_to;
        }
        self.updated_at = now.max(self.updated_at);
    }

    /// Identifier.
    pub fn id(&self) -> &TicketId {
        &self.id
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Priority.
    pub fn priority(&self) -> TicketPriority {
        self.priority
    }

    /// Status.
    pub fn status(&self) -> TicketStatus {
        self.status
    }

    /// Assignee email, if any.
    pub fn assigned_to(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }

    /// Creation instant.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification instant.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
