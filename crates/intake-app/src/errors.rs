// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

use crate::LeadId;

/// Lead list fetch failures. The table keeps whatever it previously showed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("cannot reach {base_url} -- check [api].base_url and that the CRM backend is up ({detail})")]
    Connect { base_url: String, detail: String },
    #[error("lead service returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("malformed lead payload: {detail}")]
    Decode { detail: String },
}

/// Disposition persistence failures. Local state is never mutated on these;
/// the update is not retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("cannot reach {base_url} -- check [api].base_url and that the CRM backend is up ({detail})")]
    Connect { base_url: String, detail: String },
    #[error("lead service rejected the update ({status}): {detail}")]
    Status { status: u16, detail: String },
    #[error("malformed update response: {detail}")]
    Decode { detail: String },
    #[error("an update for lead {lead_id} is already in flight -- wait for it to finish")]
    AlreadyInFlight { lead_id: LeadId },
}

/// Local, synchronous follow-up rejection. Raised before any network call;
/// the follow-up form stays open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("follow-up date is required -- pick a date and retry")]
    MissingDate,
    #[error("follow-up date {value:?} is not a calendar date (YYYY-MM-DD)")]
    BadDate { value: String },
    #[error("follow-up time {value:?} is not a clock time (HH:MM)")]
    BadTime { value: String },
}
