// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DispositionRequest, DispositionStatus, LeadPage, LeadRecord, PageInfo};

/// In-memory lead list plus the server pagination descriptor.
///
/// Fetches are tagged with a monotonically increasing sequence number so a
/// slow response that resolves after a newer request was issued is discarded
/// instead of clobbering fresher data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeadDirectory {
    leads: Vec<LeadRecord>,
    page: Option<PageInfo>,
    fetch_seq: u64,
}

impl LeadDirectory {
    pub fn leads(&self) -> &[LeadRecord] {
        &self.leads
    }

    pub fn page(&self) -> Option<&PageInfo> {
        self.page.as_ref()
    }

    pub fn current_page(&self) -> u32 {
        self.page.as_ref().map_or(1, |page| page.current_page)
    }

    /// Registers a new in-flight fetch and returns its sequence number.
    /// Issuing a new fetch supersedes every earlier one.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// Whether `seq` still identifies the newest issued fetch.
    pub fn is_current_fetch(&self, seq: u64) -> bool {
        seq == self.fetch_seq
    }

    /// Installs a fetched page. Returns false (and changes nothing) when the
    /// response is stale.
    pub fn apply_fetch(&mut self, seq: u64, page: LeadPage) -> bool {
        if !self.is_current_fetch(seq) {
            return false;
        }
        self.leads = page.leads;
        self.page = page.page;
        true
    }

    /// Whether a failed fetch is worth surfacing; stale failures are noise.
    pub fn fetch_failed(&self, seq: u64) -> bool {
        self.is_current_fetch(seq)
    }

    /// Applies a remotely confirmed disposition update to the matching
    /// record in place, preserving every other field and the list order.
    /// Moving away from "Follow Up" clears any scheduled follow-up date.
    pub fn apply_update(&mut self, request: &DispositionRequest) -> bool {
        let Some(lead) = self.leads.iter_mut().find(|lead| lead.id == request.lead_id) else {
            return false;
        };

        lead.disposition = request.status;
        lead.follow_up_at = match (request.status, &request.follow_up) {
            (DispositionStatus::FollowUp, Some(schedule)) => Some(schedule.at()),
            (DispositionStatus::FollowUp, None) => lead.follow_up_at,
            _ => None,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::LeadDirectory;
    use crate::{
        ContactInfo, DispositionRequest, DispositionStatus, FollowUpSchedule, Insurance, LeadId,
        LeadPage, LeadRecord, PageInfo,
    };
    use time::macros::{date, datetime, time};

    fn sample_lead(id: &str, disposition: DispositionStatus) -> LeadRecord {
        LeadRecord {
            id: LeadId::new(id),
            created_at: datetime!(2026-01-05 11:00 UTC),
            contact: ContactInfo {
                name: format!("Lead {id}"),
                email: format!("lead{id}@example.com"),
                phone: "(512) 555-0100".to_owned(),
            },
            date_of_birth: "1950-06-30".to_owned(),
            insurance: Insurance {
                kind: "Medicare".to_owned(),
                member_id: format!("M-{id}"),
            },
            has_message: true,
            has_logs: false,
            disposition,
            follow_up_at: None,
        }
    }

    fn page_of(leads: Vec<LeadRecord>) -> LeadPage {
        let total = leads.len() as u64;
        LeadPage {
            leads,
            page: Some(PageInfo {
                current_page: 1,
                last_page: 1,
                per_page: 10,
                total,
                next_page_url: None,
                prev_page_url: None,
            }),
        }
    }

    #[test]
    fn stale_fetch_response_is_discarded() {
        let mut directory = LeadDirectory::default();
        let slow = directory.begin_fetch();
        let fast = directory.begin_fetch();

        assert!(directory.apply_fetch(fast, page_of(vec![sample_lead("2", DispositionStatus::NewLead)])));
        assert!(!directory.apply_fetch(slow, page_of(vec![sample_lead("1", DispositionStatus::NewLead)])));

        assert_eq!(directory.leads().len(), 1);
        assert_eq!(directory.leads()[0].id, LeadId::new("2"));
        assert!(!directory.fetch_failed(slow));
        assert!(directory.fetch_failed(fast));
    }

    #[test]
    fn confirmed_update_mutates_only_the_matching_record() {
        let mut directory = LeadDirectory::default();
        let seq = directory.begin_fetch();
        directory.apply_fetch(
            seq,
            page_of(vec![
                sample_lead("41", DispositionStatus::NewLead),
                sample_lead("42", DispositionStatus::NewLead),
                sample_lead("43", DispositionStatus::NewLead),
            ]),
        );
        let before = directory.leads().to_vec();

        let applied = directory.apply_update(&DispositionRequest {
            lead_id: LeadId::new("42"),
            status: DispositionStatus::Converted,
            follow_up: None,
        });
        assert!(applied);

        let after = directory.leads();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].disposition, DispositionStatus::Converted);
        assert_eq!(after[1].contact, before[1].contact);
        assert_eq!(after[1].created_at, before[1].created_at);
    }

    #[test]
    fn update_for_unknown_lead_changes_nothing() {
        let mut directory = LeadDirectory::default();
        let seq = directory.begin_fetch();
        directory.apply_fetch(seq, page_of(vec![sample_lead("1", DispositionStatus::NewLead)]));
        let before = directory.clone();

        let applied = directory.apply_update(&DispositionRequest {
            lead_id: LeadId::new("missing"),
            status: DispositionStatus::Converted,
            follow_up: None,
        });
        assert!(!applied);
        assert_eq!(directory, before);
    }

    #[test]
    fn follow_up_update_records_the_scheduled_datetime() {
        let mut directory = LeadDirectory::default();
        let seq = directory.begin_fetch();
        directory.apply_fetch(seq, page_of(vec![sample_lead("7", DispositionStatus::NewLead)]));

        directory.apply_update(&DispositionRequest {
            lead_id: LeadId::new("7"),
            status: DispositionStatus::FollowUp,
            follow_up: Some(FollowUpSchedule {
                message: "call after lunch".to_owned(),
                date: date!(2026-02-20),
                time: time!(13:15),
            }),
        });

        assert_eq!(
            directory.leads()[0].follow_up_at,
            Some(datetime!(2026-02-20 13:15))
        );
    }

    #[test]
    fn leaving_follow_up_clears_the_stale_date() {
        let mut directory = LeadDirectory::default();
        let seq = directory.begin_fetch();
        let mut lead = sample_lead("9", DispositionStatus::FollowUp);
        lead.follow_up_at = Some(datetime!(2026-01-10 09:00));
        directory.apply_fetch(seq, page_of(vec![lead]));

        directory.apply_update(&DispositionRequest {
            lead_id: LeadId::new("9"),
            status: DispositionStatus::NotInterested,
            follow_up: None,
        });

        assert_eq!(directory.leads()[0].disposition, DispositionStatus::NotInterested);
        assert_eq!(directory.leads()[0].follow_up_at, None);
    }
}
