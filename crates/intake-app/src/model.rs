// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Opaque lead identifier assigned by the remote CRM. Never minted locally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeadId(String);

impl LeadId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LeadId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispositionStatus {
    NewLead,
    NoResponse,
    NotInterested,
    FollowUp,
    Converted,
    WrongNumber,
}

impl DispositionStatus {
    pub const ALL: [Self; 6] = [
        Self::NewLead,
        Self::NoResponse,
        Self::NotInterested,
        Self::FollowUp,
        Self::Converted,
        Self::WrongNumber,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewLead => "New Lead",
            Self::NoResponse => "No response",
            Self::NotInterested => "Not interested",
            Self::FollowUp => "Follow Up",
            Self::Converted => "Converted",
            Self::WrongNumber => "Wrong No.",
        }
    }

    /// Accepts the wire spellings, including the lowercase "Follow up"
    /// variant one backend revision emits.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "New Lead" => Some(Self::NewLead),
            "No response" => Some(Self::NoResponse),
            "Not interested" => Some(Self::NotInterested),
            "Follow Up" | "Follow up" => Some(Self::FollowUp),
            "Converted" => Some(Self::Converted),
            "Wrong No." => Some(Self::WrongNumber),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    pub kind: String,
    pub member_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub created_at: OffsetDateTime,
    pub contact: ContactInfo,
    pub date_of_birth: String,
    pub insurance: Insurance,
    pub has_message: bool,
    pub has_logs: bool,
    pub disposition: DispositionStatus,
    pub follow_up_at: Option<PrimitiveDateTime>,
}

impl LeadRecord {
    /// Calendar date of intake, the value the date filter compares against.
    pub fn created_date(&self) -> Date {
        self.created_at.date()
    }

    /// Whole days the scheduled follow-up is overdue relative to `today`.
    /// `None` when no follow-up is scheduled or it is not yet due.
    pub fn days_late(&self, today: Date) -> Option<i64> {
        let follow_up = self.follow_up_at?;
        let days = (today - follow_up.date()).whole_days();
        (days > 0).then_some(days)
    }
}

/// Server pagination descriptor returned alongside a lead page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
}

impl PageInfo {
    pub fn has_prev(&self) -> bool {
        self.prev_page_url.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next_page_url.is_some()
    }

    pub fn total_pages(&self) -> u32 {
        self.last_page.max(1)
    }

    /// 1-indexed inclusive bounds of the visible slice, for the
    /// "Showing X to Y of N entries" footer.
    pub fn showing_range(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let per_page = u64::from(self.per_page);
        let current = u64::from(self.current_page);
        let from = (current - 1) * per_page + 1;
        let to = (current * per_page).min(self.total);
        (from, to)
    }
}

/// One fetched page of leads, as delivered by the remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadPage {
    pub leads: Vec<LeadRecord>,
    pub page: Option<PageInfo>,
}
