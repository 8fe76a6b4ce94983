// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

use crate::{
    DispositionStatus, FollowUpFormInput, FollowUpSchedule, LeadId, UpdateError, ValidationError,
};

/// A disposition change ready to persist remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispositionRequest {
    pub lead_id: LeadId,
    pub status: DispositionStatus,
    pub follow_up: Option<FollowUpSchedule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    AwaitingFollowUp,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingUpdate {
    phase: UpdatePhase,
    request: DispositionRequest,
}

/// What the caller must do next after starting a disposition change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeginOutcome {
    /// The new status is "Follow Up"; collect message/date/time first.
    CollectFollowUp,
    /// Send this request now.
    Submit(DispositionRequest),
}

/// Tracks disposition changes from the moment a user picks a new status
/// until the remote call resolves.
///
/// At most one update per lead may be pending. The local lead list is only
/// mutated after the remote ack (confirmed-only policy); on failure the
/// pending entry is dropped and nothing else changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispositionCoordinator {
    pending: BTreeMap<LeadId, PendingUpdate>,
}

impl DispositionCoordinator {
    pub fn begin(
        &mut self,
        lead_id: &LeadId,
        status: DispositionStatus,
    ) -> Result<BeginOutcome, UpdateError> {
        if self.pending.contains_key(lead_id) {
            return Err(UpdateError::AlreadyInFlight {
                lead_id: lead_id.clone(),
            });
        }

        let request = DispositionRequest {
            lead_id: lead_id.clone(),
            status,
            follow_up: None,
        };

        if status == DispositionStatus::FollowUp {
            self.pending.insert(
                lead_id.clone(),
                PendingUpdate {
                    phase: UpdatePhase::AwaitingFollowUp,
                    request,
                },
            );
            return Ok(BeginOutcome::CollectFollowUp);
        }

        self.pending.insert(
            lead_id.clone(),
            PendingUpdate {
                phase: UpdatePhase::Submitting,
                request: request.clone(),
            },
        );
        Ok(BeginOutcome::Submit(request))
    }

    /// Validates the follow-up form and, on success, moves the update to
    /// Submitting. Validation failures leave the pending entry awaiting the
    /// form so the caller can correct and resubmit; no network call happens.
    pub fn submit_follow_up(
        &mut self,
        lead_id: &LeadId,
        form: &FollowUpFormInput,
    ) -> Result<DispositionRequest, ValidationError> {
        let schedule = form.validate()?;
        let request = DispositionRequest {
            lead_id: lead_id.clone(),
            status: DispositionStatus::FollowUp,
            follow_up: Some(schedule),
        };
        self.pending.insert(
            lead_id.clone(),
            PendingUpdate {
                phase: UpdatePhase::Submitting,
                request: request.clone(),
            },
        );
        Ok(request)
    }

    /// Drops a pending follow-up collection (modal cancelled). Submitting
    /// entries are left alone; the remote call owns them until it resolves.
    pub fn cancel_follow_up(&mut self, lead_id: &LeadId) {
        if self
            .pending
            .get(lead_id)
            .is_some_and(|pending| pending.phase == UpdatePhase::AwaitingFollowUp)
        {
            self.pending.remove(lead_id);
        }
    }

    /// Resolves a pending update, returning the request so a successful
    /// caller can apply it to the lead directory. Failed callers just drop it.
    pub fn complete(&mut self, lead_id: &LeadId) -> Option<DispositionRequest> {
        self.pending.remove(lead_id).map(|pending| pending.request)
    }

    pub fn phase(&self, lead_id: &LeadId) -> Option<UpdatePhase> {
        self.pending.get(lead_id).map(|pending| pending.phase)
    }

    pub fn is_submitting(&self, lead_id: &LeadId) -> bool {
        self.phase(lead_id) == Some(UpdatePhase::Submitting)
    }

    pub fn submitting_count(&self) -> usize {
        self.pending
            .values()
            .filter(|pending| pending.phase == UpdatePhase::Submitting)
            .count()
    }
}
