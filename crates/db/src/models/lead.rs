//! Lead entity model and DTOs.

use serde::{Deserialize, Serialize};
use shepherd_core::lead_filter::FilterableLead;
use shepherd_core::lead_import::ImportedLead;
use shepherd_core::status::{CallStatus, LeadStatus};
use shepherd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A lead row from the `leads` table.
///
/// `status` and `call_status` hold the storage strings of
/// [`LeadStatus`] and [`CallStatus`].
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub owner_email: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub call_status: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FilterableLead for Lead {
    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    fn status(&self) -> Option<LeadStatus> {
        LeadStatus::from_str(&self.status)
    }

    fn call_status(&self) -> Option<CallStatus> {
        self.call_status.as_deref().and_then(CallStatus::from_str)
    }
}

/// DTO for creating a new lead.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLead {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub owner_email: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
    /// Defaults to `new` if omitted.
    pub status: Option<LeadStatus>,
    pub call_status: Option<CallStatus>,
}

impl From<&ImportedLead> for CreateLead {
    fn from(lead: &ImportedLead) -> Self {
        Self {
            name: lead.name.clone(),
            phone: lead.phone.clone(),
            email: lead.email.clone(),
            category: lead.category.clone(),
            location: lead.location.clone(),
            owner_email: lead.owner_email.clone(),
            contact_person: lead.contact_person.clone(),
            notes: lead.notes.clone(),
            status: Some(lead.status),
            call_status: Some(lead.call_status),
        }
    }
}
