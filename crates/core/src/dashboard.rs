//! Dashboard aggregation over a lead snapshot.

use serde::Serialize;

use crate::lead_filter::{bucket_of, FilterableLead, LeadBucket};

/// Per-bucket lead counts shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeadStats {
    pub new_leads: i64,
    pub no_answer: i64,
    pub appointment_scheduled: i64,
    pub agreed: i64,
    pub not_interested: i64,
}

impl LeadStats {
    /// Count leads per outreach bucket using the filter engine's classification.
    pub fn tally<'a, L, I>(leads: I) -> Self
    where
        L: FilterableLead + 'a,
        I: IntoIterator<Item = &'a L>,
    {
        let mut stats = Self::default();
        for lead in leads {
            match bucket_of(lead) {
                Some(LeadBucket::New) => stats.new_leads += 1,
                Some(LeadBucket::NoAnswer) => stats.no_answer += 1,
                Some(LeadBucket::Appointment) => stats.appointment_scheduled += 1,
                Some(LeadBucket::Agreed) => stats.agreed += 1,
                Some(LeadBucket::NotInterested) => stats.not_interested += 1,
                None => {}
            }
        }
        stats
    }

    /// Sum of all bucket counts.
    pub fn bucketed(&self) -> i64 {
        self.new_leads + self.no_answer + self.appointment_scheduled + self.agreed + self.not_interested
    }
}
