// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use intake_app::{
    ContactInfo, DispositionRequest, DispositionStatus, FetchError, Insurance, LeadId, LeadPage,
    LeadRecord, PageInfo, UpdateError,
};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use url::Url;

/// Blocking client for the lead service REST endpoints.
///
/// The update contract is fixed as POST `/leads/disposition-status` with a
/// string `lead_id`; follow-up fields are always present, empty when the new
/// status carries no follow-up.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    per_page: u32,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, per_page: u32, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("api.base_url {base_url:?} must use http or https");
        }
        if per_page == 0 || per_page > 100 {
            bail!("api.per_page must be between 1 and 100, got {per_page}");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            per_page,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// One page of leads, 1-indexed.
    pub fn fetch_leads(&self, page: u32) -> Result<LeadPage, FetchError> {
        self.fetch_page(page, self.per_page)
    }

    /// Cheap reachability probe used by `--check`.
    pub fn ping(&self) -> Result<(), FetchError> {
        self.fetch_page(1, 1).map(|_| ())
    }

    fn fetch_page(&self, page: u32, per_page: u32) -> Result<LeadPage, FetchError> {
        let url = format!(
            "{}/leads?page={page}&per_page={per_page}",
            self.base_url
        );
        let response = self.http.get(url).send().map_err(|error| {
            FetchError::Connect {
                base_url: self.base_url.clone(),
                detail: error.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                detail: clean_error_body(status, &body),
            });
        }

        let envelope: LeadsEnvelope =
            response.json().map_err(|error| FetchError::Decode {
                detail: error.to_string(),
            })?;
        decode_page(envelope)
    }

    pub fn update_disposition(&self, request: &DispositionRequest) -> Result<(), UpdateError> {
        let body = DispositionUpdateBody::from_request(request);
        let response = self
            .http
            .post(format!("{}/leads/disposition-status", self.base_url))
            .json(&body)
            .send()
            .map_err(|error| UpdateError::Connect {
                base_url: self.base_url.clone(),
                detail: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(UpdateError::Status {
                status: status.as_u16(),
                detail: clean_error_body(status, &body),
            });
        }

        Ok(())
    }
}

fn decode_page(envelope: LeadsEnvelope) -> Result<LeadPage, FetchError> {
    let leads = envelope
        .data
        .into_iter()
        .map(decode_lead)
        .collect::<Result<Vec<_>, _>>()?;
    let page = envelope.pagination.map(|row| PageInfo {
        current_page: row.current_page,
        last_page: row.last_page,
        per_page: row.per_page,
        total: row.total,
        next_page_url: row.next_page_url,
        prev_page_url: row.prev_page_url,
    });
    Ok(LeadPage { leads, page })
}

fn decode_lead(row: LeadRow) -> Result<LeadRecord, FetchError> {
    let disposition =
        DispositionStatus::parse(&row.disposition_status).ok_or_else(|| FetchError::Decode {
            detail: format!(
                "unknown disposition status {:?} for lead {}",
                row.disposition_status, row.id
            ),
        })?;
    let created_at = parse_created_at(&row.created_at).ok_or_else(|| FetchError::Decode {
        detail: format!("bad created_at {:?} for lead {}", row.created_at, row.id),
    })?;

    Ok(LeadRecord {
        id: LeadId::new(row.id),
        created_at,
        contact: ContactInfo {
            name: row.client_info.name,
            email: row.client_info.email,
            phone: row.client_info.phone,
        },
        date_of_birth: row.dob,
        insurance: Insurance {
            kind: row.insurance_type,
            member_id: row.med_id,
        },
        has_message: row.message,
        has_logs: row.logs,
        disposition,
        // Unparseable follow-up dates degrade to "none scheduled" rather
        // than poisoning the whole page.
        follow_up_at: parse_follow_up(&row.follow_up_date),
    })
}

fn parse_created_at(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed);
    }
    // Some backend revisions emit a bare "YYYY-MM-DD HH:MM:SS"; treat as UTC.
    PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

fn parse_follow_up(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .or_else(|_| {
            PrimitiveDateTime::parse(
                raw,
                format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            )
        })
        .ok()
}

fn clean_error_body(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<MessageEnvelope>(body)
        && let Some(message) = parsed.message
        && !message.is_empty()
    {
        return message;
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.is_empty()
    {
        return error;
    }

    if body.len() < 100 && !body.contains('{') && !body.trim().is_empty() {
        return body.trim().to_owned();
    }

    status
        .canonical_reason()
        .unwrap_or("unexpected response")
        .to_owned()
}

#[derive(Debug, Deserialize)]
struct LeadsEnvelope {
    data: Vec<LeadRow>,
    #[serde(default)]
    pagination: Option<PaginationRow>,
}

// Wire shape of one lead. `clientInfo` really is the only camelCase key the
// backend sends; everything else is snake_case.
#[derive(Debug, Deserialize)]
struct LeadRow {
    id: String,
    created_at: String,
    #[serde(rename = "clientInfo")]
    client_info: ClientInfoRow,
    #[serde(default)]
    dob: String,
    #[serde(default)]
    insurance_type: String,
    #[serde(default)]
    med_id: String,
    #[serde(default)]
    message: bool,
    disposition_status: String,
    #[serde(default)]
    follow_up_date: String,
    #[serde(default)]
    logs: bool,
}

#[derive(Debug, Deserialize)]
struct ClientInfoRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
}

#[derive(Debug, Deserialize)]
struct PaginationRow {
    current_page: u32,
    last_page: u32,
    per_page: u32,
    total: u64,
    #[serde(default)]
    next_page_url: Option<String>,
    #[serde(default)]
    prev_page_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct DispositionUpdateBody<'a> {
    lead_id: &'a str,
    disposition_status: &'static str,
    follow_up_message: String,
    follow_up_date: String,
    follow_up_time: String,
}

impl<'a> DispositionUpdateBody<'a> {
    fn from_request(request: &'a DispositionRequest) -> Self {
        let (message, date, time) = match &request.follow_up {
            Some(schedule) => (
                schedule.message.clone(),
                schedule.date_string(),
                schedule.time_string(),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        Self {
            lead_id: request.lead_id.as_str(),
            disposition_status: request.status.as_str(),
            follow_up_message: message,
            follow_up_date: date,
            follow_up_time: time,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}
