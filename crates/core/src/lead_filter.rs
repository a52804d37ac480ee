//! Client-side lead search and status filtering.
//!
//! Given a snapshot of leads (newest first, as returned by the Record
//! Store), a free-text query, and a [`LeadFilter`] tag, produce the visible
//! subsequence. The engine is a pure function: it never re-sorts and never
//! touches storage.
//!
//! Filters compose as a sequential AND:
//!
//! 1. Free-text query (skipped when empty): case-insensitive substring of
//!    `name` or `email`, or a literal substring of `phone`.
//! 2. Status filter, via the [`LeadBucket`] classification shared with the
//!    dashboard tally.

use serde::{Deserialize, Serialize};

use crate::status::{CallStatus, LeadStatus};

// ---------------------------------------------------------------------------
// Filter tags and buckets
// ---------------------------------------------------------------------------

/// Status filter selectable in the leads view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadFilter {
    #[default]
    All,
    New,
    NoAnswer,
    Appointment,
    Agreed,
    NotInterested,
}

impl LeadFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::New => "new",
            Self::NoAnswer => "no_answer",
            Self::Appointment => "appointment",
            Self::Agreed => "agreed",
            Self::NotInterested => "not_interested",
        }
    }

    /// Parse a filter tag. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "new" => Some(Self::New),
            "no_answer" => Some(Self::NoAnswer),
            "appointment" => Some(Self::Appointment),
            "agreed" => Some(Self::Agreed),
            "not_interested" => Some(Self::NotInterested),
            _ => None,
        }
    }

    /// All valid filter tags.
    pub const ALL: &'static [&'static str] = &[
        "all",
        "new",
        "no_answer",
        "appointment",
        "agreed",
        "not_interested",
    ];

    /// The bucket this filter selects, or `None` for [`LeadFilter::All`].
    pub fn bucket(&self) -> Option<LeadBucket> {
        match self {
            Self::All => None,
            Self::New => Some(LeadBucket::New),
            Self::NoAnswer => Some(LeadBucket::NoAnswer),
            Self::Appointment => Some(LeadBucket::Appointment),
            Self::Agreed => Some(LeadBucket::Agreed),
            Self::NotInterested => Some(LeadBucket::NotInterested),
        }
    }
}

impl std::fmt::Display for LeadFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutually exclusive outreach bucket a lead falls into.
///
/// A lead belongs to at most one bucket. Leads that have moved past `new`
/// but still have a pending (or absent) call status belong to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadBucket {
    New,
    NoAnswer,
    Appointment,
    Agreed,
    NotInterested,
}

// ---------------------------------------------------------------------------
// Filterable records
// ---------------------------------------------------------------------------

/// Read access to the lead fields the filter engine inspects.
///
/// Implemented by the Record Store row type and by test fixtures.
pub trait FilterableLead {
    fn name(&self) -> &str;
    fn email(&self) -> Option<&str>;
    fn phone(&self) -> Option<&str>;
    /// `None` when the stored value is not a known [`LeadStatus`].
    fn status(&self) -> Option<LeadStatus>;
    fn call_status(&self) -> Option<CallStatus>;
}

/// Classify a lead into its outreach bucket.
pub fn bucket_of<L: FilterableLead + ?Sized>(lead: &L) -> Option<LeadBucket> {
    match lead.call_status() {
        None | Some(CallStatus::Pending) => {
            (lead.status() == Some(LeadStatus::New)).then_some(LeadBucket::New)
        }
        Some(CallStatus::NoAnswer) => Some(LeadBucket::NoAnswer),
        Some(CallStatus::AppointmentScheduled) => Some(LeadBucket::Appointment),
        Some(CallStatus::Agreed) => Some(LeadBucket::Agreed),
        Some(CallStatus::NotInterested) => Some(LeadBucket::NotInterested),
    }
}

/// Whether `lead` matches the free-text `query`.
///
/// Name and email are compared case-insensitively; phone is a literal
/// substring match. An empty query matches everything.
pub fn matches_query<L: FilterableLead + ?Sized>(lead: &L, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    lead.name().to_lowercase().contains(&needle)
        || lead
            .email()
            .is_some_and(|email| email.to_lowercase().contains(&needle))
        || lead.phone().is_some_and(|phone| phone.contains(query))
}

/// Whether `lead` passes the status `filter`.
pub fn matches_filter<L: FilterableLead + ?Sized>(lead: &L, filter: LeadFilter) -> bool {
    match filter.bucket() {
        None => true,
        Some(bucket) => bucket_of(lead) == Some(bucket),
    }
}

/// Produce the visible subsequence of `leads`, preserving input order.
pub fn filter_leads<'a, L: FilterableLead>(
    leads: &'a [L],
    query: &str,
    filter: LeadFilter,
) -> Vec<&'a L> {
    leads
        .iter()
        .filter(|lead| matches_query(*lead, query))
        .filter(|lead| matches_filter(*lead, filter))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
