//! User-facing strings.
//!
//! Shepherd CRM ships in Polish; English is available for operators who
//! set `CRM_LOCALE=en`.

use serde::{Deserialize, Serialize};

use crate::lead_filter::LeadFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pl,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pl => "pl",
            Self::En => "en",
        }
    }

    /// Parse a locale code, ignoring case. Returns `None` for unsupported codes.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pl" => Some(Self::Pl),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// Result banner shown after an import batch completes.
    pub fn import_summary(&self, success: usize, errors: usize) -> String {
        match self {
            Self::Pl => format!("Zaimportowano {success} leadów. Błędów: {errors}"),
            Self::En => format!("Imported {success} leads. Errors: {errors}"),
        }
    }

    pub fn empty_file(&self) -> &'static str {
        match self {
            Self::Pl => "Plik jest pusty",
            Self::En => "File is empty",
        }
    }

    pub fn unreadable_file(&self) -> &'static str {
        match self {
            Self::Pl => "Błąd podczas czytania pliku",
            Self::En => "Error reading file",
        }
    }

    /// Heading of the leads view for a given filter.
    pub fn filter_title(&self, filter: LeadFilter) -> &'static str {
        match (self, filter) {
            (Self::Pl, LeadFilter::All) => "Wszystkie Leady",
            (Self::Pl, LeadFilter::New) => "Nowe Leady",
            (Self::Pl, LeadFilter::NoAnswer) => "Nie Odebrał",
            (Self::Pl, LeadFilter::Appointment) => "Umówiona Rozmowa",
            (Self::Pl, LeadFilter::Agreed) => "Zgodził Się",
            (Self::Pl, LeadFilter::NotInterested) => "Nie Jest Zainteresowany",
            (Self::En, LeadFilter::All) => "All Leads",
            (Self::En, LeadFilter::New) => "New Leads",
            (Self::En, LeadFilter::NoAnswer) => "No Answer",
            (Self::En, LeadFilter::Appointment) => "Appointment Scheduled",
            (Self::En, LeadFilter::Agreed) => "Agreed",
            (Self::En, LeadFilter::NotInterested) => "Not Interested",
        }
    }
}
