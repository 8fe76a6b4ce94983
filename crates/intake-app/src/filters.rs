// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::borrow::Cow;

use crate::LeadRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Date,
    Email,
    Phone,
    Insurance,
}

impl FilterField {
    pub const ALL: [Self; 4] = [Self::Date, Self::Email, Self::Phone, Self::Insurance];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Insurance => "insurance",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Date => "By Date (YYYY-MM-DD)",
            Self::Email => "By Email",
            Self::Phone => "By Phone No.",
            Self::Insurance => "By Insurance Type",
        }
    }
}

/// The four active filter predicates. One instance per session, shared by
/// the filter bar and the table view; empty string means "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    date: String,
    email: String,
    phone: String,
    insurance: String,
}

impl FilterState {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Date => &self.date,
            FilterField::Email => &self.email,
            FilterField::Phone => &self.phone,
            FilterField::Insurance => &self.insurance,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let slot = match field {
            FilterField::Date => &mut self.date,
            FilterField::Email => &mut self.email,
            FilterField::Phone => &mut self.phone,
            FilterField::Insurance => &mut self.insurance,
        };
        *slot = value.into();
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.insurance.is_empty()
    }

    pub fn active_count(&self) -> usize {
        FilterField::ALL
            .iter()
            .filter(|field| !self.get(**field).is_empty())
            .count()
    }

    /// Whether one record satisfies every active predicate.
    pub fn matches(&self, lead: &LeadRecord) -> bool {
        let matches_date =
            self.date.is_empty() || lead.created_date().to_string() == self.date;
        let matches_email = self.email.is_empty()
            || contains_ignore_case(&lead.contact.email, &self.email);
        let matches_phone = self.phone.is_empty() || lead.contact.phone.contains(&self.phone);
        let matches_insurance = self.insurance.is_empty()
            || contains_ignore_case(&lead.insurance.kind, &self.insurance);

        matches_date && matches_email && matches_phone && matches_insurance
    }

    /// Pure filtering pass. With no active predicates the input slice is
    /// returned borrowed, untouched and in order; otherwise the surviving
    /// subset is cloned out, preserving relative order.
    pub fn apply<'a>(&self, leads: &'a [LeadRecord]) -> Cow<'a, [LeadRecord]> {
        if self.is_empty() {
            return Cow::Borrowed(leads);
        }

        Cow::Owned(
            leads
                .iter()
                .filter(|lead| self.matches(lead))
                .cloned()
                .collect(),
        )
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{FilterField, FilterState};
    use crate::{ContactInfo, DispositionStatus, Insurance, LeadId, LeadRecord};
    use std::borrow::Cow;
    use time::OffsetDateTime;
    use time::macros::datetime;

    fn lead(id: &str, email: &str, phone: &str, insurance: &str) -> LeadRecord {
        lead_created(id, email, phone, insurance, datetime!(2026-02-14 16:45 UTC))
    }

    fn lead_created(
        id: &str,
        email: &str,
        phone: &str,
        insurance: &str,
        created_at: OffsetDateTime,
    ) -> LeadRecord {
        LeadRecord {
            id: LeadId::new(id),
            created_at,
            contact: ContactInfo {
                name: format!("Lead {id}"),
                email: email.to_owned(),
                phone: phone.to_owned(),
            },
            date_of_birth: "1955-09-02".to_owned(),
            insurance: Insurance {
                kind: insurance.to_owned(),
                member_id: format!("M-{id}"),
            },
            has_message: false,
            has_logs: false,
            disposition: DispositionStatus::NewLead,
            follow_up_at: None,
        }
    }

    #[test]
    fn empty_filter_returns_borrowed_input_unchanged() {
        let leads = vec![
            lead("1", "a@example.com", "555-0101", "Aetna"),
            lead("2", "b@example.com", "555-0102", "Cigna"),
        ];
        let filters = FilterState::default();

        let visible = filters.apply(&leads);
        assert!(matches!(visible, Cow::Borrowed(_)));
        assert_eq!(visible.as_ref(), leads.as_slice());
    }

    #[test]
    fn all_active_predicates_must_hold() {
        let leads = vec![
            lead("1", "pat@clinic.org", "(512) 555-0101", "Medicare"),
            lead("2", "pat@clinic.org", "(737) 555-0199", "Medicare"),
        ];
        let mut filters = FilterState::default();
        filters.set(FilterField::Email, "pat@");
        filters.set(FilterField::Phone, "512");

        let visible = filters.apply(&leads);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, LeadId::new("1"));
        assert!(filters.matches(&leads[0]));
        assert!(!filters.matches(&leads[1]));
    }

    #[test]
    fn date_predicate_compares_calendar_date_only() {
        let leads = vec![
            lead_created("1", "x@y.z", "1", "Aetna", datetime!(2026-03-01 00:10 UTC)),
            lead_created("2", "x@y.z", "2", "Aetna", datetime!(2026-03-01 23:55 UTC)),
            lead_created("3", "x@y.z", "3", "Aetna", datetime!(2026-03-02 00:05 UTC)),
        ];
        let mut filters = FilterState::default();
        filters.set(FilterField::Date, "2026-03-01");

        let visible = filters.apply(&leads);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|l| l.created_date().to_string() == "2026-03-01"));
    }

    #[test]
    fn phone_predicate_is_literal_substring_without_normalization() {
        let leads = vec![lead("1", "x@y.z", "(512) 555-0101", "Aetna")];
        let mut filters = FilterState::default();

        filters.set(FilterField::Phone, "512) 555");
        assert_eq!(filters.apply(&leads).len(), 1);

        // Punctuation is not stripped; digits-only input misses formatted numbers.
        filters.set(FilterField::Phone, "5125550101");
        assert_eq!(filters.apply(&leads).len(), 0);
    }

    #[test]
    fn insurance_match_is_case_insensitive_both_ways() {
        let leads = vec![
            lead("1", "x@y.z", "1", "Aetna"),
            lead("2", "x@y.z", "2", "Cigna"),
        ];
        let mut upper = FilterState::default();
        upper.set(FilterField::Insurance, "AETNA");
        let mut lower = FilterState::default();
        lower.set(FilterField::Insurance, "aetna");

        assert_eq!(upper.apply(&leads), lower.apply(&leads));
        let visible = lower.apply(&leads);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, LeadId::new("1"));
    }

    #[test]
    fn filtering_is_idempotent() {
        let leads = vec![
            lead("1", "one@example.com", "555-0101", "Humana"),
            lead("2", "two@example.com", "555-0102", "Kaiser"),
            lead("3", "three@example.com", "555-0103", "Humana"),
        ];
        let mut filters = FilterState::default();
        filters.set(FilterField::Insurance, "humana");

        let once = filters.apply(&leads).into_owned();
        let twice = filters.apply(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn records_excluded_fail_at_least_one_active_predicate() {
        let leads = vec![
            lead("1", "match@example.com", "555-0101", "Blue Cross"),
            lead("2", "miss@example.com", "555-0102", "Blue Cross"),
            lead("3", "match@example.com", "555-0103", "United Healthcare"),
        ];
        let mut filters = FilterState::default();
        filters.set(FilterField::Email, "match@");
        filters.set(FilterField::Insurance, "blue");

        let visible = filters.apply(&leads);
        for lead in leads.iter() {
            if visible.iter().any(|v| v.id == lead.id) {
                assert!(filters.matches(lead));
            } else {
                assert!(!filters.matches(lead));
            }
        }
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn setters_are_independent_and_clear_all_resets_everything() {
        let mut filters = FilterState::default();
        filters.set(FilterField::Date, "2026-01-01");
        filters.set(FilterField::Email, "a@b.c");
        assert_eq!(filters.get(FilterField::Date), "2026-01-01");
        assert_eq!(filters.get(FilterField::Email), "a@b.c");
        assert_eq!(filters.get(FilterField::Phone), "");
        assert_eq!(filters.active_count(), 2);

        filters.set(FilterField::Phone, "555");
        assert_eq!(filters.get(FilterField::Date), "2026-01-01");

        filters.clear_all();
        assert!(filters.is_empty());
        assert_eq!(filters.active_count(), 0);
    }
}
