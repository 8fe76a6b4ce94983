// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use intake_api::Client;
use intake_app::{
    DispositionRequest, FetchError, LeadPage, LeadRecord, PageInfo, UpdateError,
};
use intake_testkit::LeadFaker;
use intake_tui::{AppRuntime, InternalEvent, LeadsEvent, UpdateEvent};
use std::sync::mpsc::Sender;
use std::thread;

/// Production runtime: every network call runs on its own worker thread and
/// reports back through the internal event channel. A worker whose receiver
/// is gone (the app quit) just drops its result.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for ApiRuntime {
    fn fetch_leads(&mut self, page: u32) -> Result<LeadPage, FetchError> {
        self.client.fetch_leads(page)
    }

    fn submit_disposition(&mut self, request: &DispositionRequest) -> Result<(), UpdateError> {
        self.client.update_disposition(request)
    }

    fn spawn_fetch_leads(
        &mut self,
        request_id: u64,
        page: u32,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let client = self.client.clone();
        thread::spawn(move || {
            let event = match client.fetch_leads(page) {
                Ok(page) => InternalEvent::Leads(LeadsEvent::Loaded { request_id, page }),
                Err(error) => InternalEvent::Leads(LeadsEvent::Failed { request_id, error }),
            };
            let _ = tx.send(event);
        });
        Ok(())
    }

    fn spawn_submit_disposition(
        &mut self,
        request: DispositionRequest,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let client = self.client.clone();
        thread::spawn(move || {
            let lead_id = request.lead_id.clone();
            let event = match client.update_disposition(&request) {
                Ok(()) => InternalEvent::Update(UpdateEvent::Committed { lead_id }),
                Err(error) => InternalEvent::Update(UpdateEvent::Failed { lead_id, error }),
            };
            let _ = tx.send(event);
        });
        Ok(())
    }
}

/// Offline runtime for `--demo`: serves deterministic sample leads with
/// server-shape pagination and acks updates against its own copy, so the
/// whole coordinator path works without a backend.
pub struct DemoRuntime {
    leads: Vec<LeadRecord>,
    per_page: u32,
}

impl DemoRuntime {
    pub fn new(seed: u64, count: usize, per_page: u32) -> Self {
        Self {
            leads: LeadFaker::new(seed).leads(count),
            per_page: per_page.max(1),
        }
    }

    fn last_page(&self) -> u32 {
        (self.leads.len().div_ceil(self.per_page as usize)).max(1) as u32
    }
}

impl AppRuntime for DemoRuntime {
    fn fetch_leads(&mut self, page: u32) -> Result<LeadPage, FetchError> {
        let last_page = self.last_page();
        let current_page = page.clamp(1, last_page);
        let start = (current_page - 1) as usize * self.per_page as usize;
        let end = (start + self.per_page as usize).min(self.leads.len());

        Ok(LeadPage {
            leads: self.leads[start..end].to_vec(),
            page: Some(PageInfo {
                current_page,
                last_page,
                per_page: self.per_page,
                total: self.leads.len() as u64,
                next_page_url: (current_page < last_page)
                    .then(|| format!("/leads?page={}", current_page + 1)),
                prev_page_url: (current_page > 1)
                    .then(|| format!("/leads?page={}", current_page - 1)),
            }),
        })
    }

    fn submit_disposition(&mut self, request: &DispositionRequest) -> Result<(), UpdateError> {
        let Some(lead) = self
            .leads
            .iter_mut()
            .find(|lead| lead.id == request.lead_id)
        else {
            return Err(UpdateError::Status {
                status: 404,
                detail: format!("no lead with id {}", request.lead_id),
            });
        };

        lead.disposition = request.status;
        lead.follow_up_at = request.follow_up.as_ref().map(|schedule| schedule.at());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DemoRuntime;
    use intake_app::{DispositionRequest, DispositionStatus, FollowUpSchedule, LeadId};
    use intake_tui::AppRuntime;
    use time::macros::{date, time};

    #[test]
    fn demo_pagination_slices_like_a_server() {
        let mut runtime = DemoRuntime::new(7, 23, 10);

        let first = runtime.fetch_leads(1).expect("page 1 should load");
        let info = first.page.expect("page info present");
        assert_eq!(first.leads.len(), 10);
        assert_eq!(info.total, 23);
        assert_eq!(info.total_pages(), 3);
        assert!(!info.has_prev());
        assert!(info.has_next());

        let last = runtime.fetch_leads(3).expect("page 3 should load");
        let info = last.page.expect("page info present");
        assert_eq!(last.leads.len(), 3);
        assert!(info.has_prev());
        assert!(!info.has_next());
        assert_eq!(info.showing_range(), (21, 23));
    }

    #[test]
    fn demo_clamps_out_of_range_pages() {
        let mut runtime = DemoRuntime::new(7, 5, 10);
        let page = runtime.fetch_leads(99).expect("page should load");
        let info = page.page.expect("page info present");
        assert_eq!(info.current_page, 1);
        assert_eq!(page.leads.len(), 5);
    }

    #[test]
    fn demo_updates_are_visible_on_refetch() {
        let mut runtime = DemoRuntime::new(7, 12, 10);
        let first = runtime.fetch_leads(1).expect("page 1 should load");
        let target = first.leads[4].id.clone();

        runtime
            .submit_disposition(&DispositionRequest {
                lead_id: target.clone(),
                status: DispositionStatus::FollowUp,
                follow_up: Some(FollowUpSchedule {
                    message: "demo follow-up".to_owned(),
                    date: date!(2026-06-20),
                    time: time!(10:30),
                }),
            })
            .expect("update should ack");

        let refetched = runtime.fetch_leads(1).expect("page 1 should reload");
        let lead = refetched
            .leads
            .iter()
            .find(|lead| lead.id == target)
            .expect("lead still on page 1");
        assert_eq!(lead.disposition, DispositionStatus::FollowUp);
        assert!(lead.follow_up_at.is_some());
    }

    #[test]
    fn demo_rejects_unknown_leads() {
        let mut runtime = DemoRuntime::new(7, 3, 10);
        let error = runtime
            .submit_disposition(&DispositionRequest {
                lead_id: LeadId::new("nope"),
                status: DispositionStatus::Converted,
                follow_up: None,
            })
            .expect_err("unknown lead should fail");
        assert!(error.to_string().contains("404"));
    }
}
