// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use intake_app::{ContactInfo, DispositionStatus, Insurance, LeadId, LeadRecord};
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const EMAIL_DOMAINS: [&str; 5] = [
    "example.com",
    "mailbox.org",
    "fastmail.test",
    "inbox.example",
    "postbox.net",
];

const INSURANCE_CARRIERS: [&str; 7] = [
    "Medicare",
    "Blue Cross",
    "Aetna",
    "Cigna",
    "United Healthcare",
    "Humana",
    "Kaiser",
];

const DISPOSITIONS: [DispositionStatus; 6] = [
    DispositionStatus::NewLead,
    DispositionStatus::NewLead,
    DispositionStatus::NoResponse,
    DispositionStatus::FollowUp,
    DispositionStatus::Converted,
    DispositionStatus::NotInterested,
];

const REFERENCE_YEAR: i32 = 2026;

/// Fixed "now" so generated data is stable across runs and in assertions.
pub fn reference_now() -> OffsetDateTime {
    PrimitiveDateTime::new(
        Date::from_calendar_date(REFERENCE_YEAR, Month::June, 1).expect("valid reference date"),
        Time::MIDNIGHT,
    )
    .assume_utc()
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Deterministic lead generator for demo mode and tests.
#[derive(Debug, Clone)]
pub struct LeadFaker {
    rng: DeterministicRng,
    next_id: u64,
}

impl LeadFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeterministicRng::new(if seed == 0 { 1 } else { seed }),
            next_id: 1000,
        }
    }

    pub fn lead(&mut self) -> LeadRecord {
        let id = self.next_id;
        self.next_id += 1;

        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&EMAIL_DOMAINS);
        let carrier = self.pick(&INSURANCE_CARRIERS);
        let disposition = DISPOSITIONS[self.rng.int_n(DISPOSITIONS.len())];

        let created_at = reference_now()
            - Duration::days(self.rng.int_n(60) as i64)
            - Duration::minutes(self.rng.int_n(24 * 60) as i64);

        let follow_up_at = (disposition == DispositionStatus::FollowUp).then(|| {
            // Spread schedules across past and future so some leads render late.
            let offset_days = self.rng.int_n(30) as i64 - 10;
            let at = reference_now() + Duration::days(offset_days)
                + Duration::minutes((self.rng.int_n(32) * 15) as i64);
            PrimitiveDateTime::new(at.date(), at.time())
        });

        LeadRecord {
            id: LeadId::new(id.to_string()),
            created_at,
            contact: ContactInfo {
                name: format!("{first} {last}"),
                email: format!(
                    "{}.{}@{domain}",
                    first.to_ascii_lowercase(),
                    last.to_ascii_lowercase()
                ),
                phone: format!(
                    "({:03}) 555-{:04}",
                    200 + self.rng.int_n(700),
                    self.rng.int_n(10_000),
                ),
            },
            date_of_birth: self.birth_date().to_string(),
            insurance: Insurance {
                kind: carrier.to_owned(),
                member_id: format!("{}-{:05}", carrier_prefix(carrier), self.rng.int_n(100_000)),
            },
            has_message: self.rng.bool(),
            has_logs: self.rng.bool(),
            disposition,
            follow_up_at,
        }
    }

    pub fn leads(&mut self, count: usize) -> Vec<LeadRecord> {
        (0..count).map(|_| self.lead()).collect()
    }

    fn pick<'a>(&mut self, pool: &[&'a str]) -> &'a str {
        pool[self.rng.int_n(pool.len())]
    }

    fn birth_date(&mut self) -> Date {
        let year = 1938 + self.rng.int_n(30) as i32;
        let month = Month::try_from(1 + self.rng.int_n(12) as u8).expect("month in 1..=12");
        let day = 1 + self.rng.int_n(28) as u8;
        Date::from_calendar_date(year, month, day).expect("day in 1..=28 is always valid")
    }
}

fn carrier_prefix(carrier: &str) -> String {
    carrier
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::{LeadFaker, carrier_prefix, reference_now};
    use intake_app::DispositionStatus;

    #[test]
    fn same_seed_generates_identical_leads() {
        let a = LeadFaker::new(7).leads(25);
        let b = LeadFaker::new(7).leads(25);
        assert_eq!(a, b);
    }

    #[test]
    fn ids_are_unique_and_sequential() {
        let leads = LeadFaker::new(3).leads(10);
        for (index, lead) in leads.iter().enumerate() {
            assert_eq!(lead.id.as_str(), (1000 + index).to_string());
        }
    }

    #[test]
    fn follow_up_dates_exist_only_on_follow_up_leads() {
        let leads = LeadFaker::new(11).leads(200);
        for lead in &leads {
            assert_eq!(
                lead.follow_up_at.is_some(),
                lead.disposition == DispositionStatus::FollowUp,
                "lead {}",
                lead.id
            );
        }
        // The spread must produce at least one late follow-up for demo realism.
        let today = reference_now().date();
        assert!(leads.iter().any(|lead| lead.days_late(today).is_some()));
    }

    #[test]
    fn created_dates_stay_within_the_recent_window() {
        let now = reference_now();
        for lead in LeadFaker::new(5).leads(100) {
            assert!(lead.created_at <= now);
            assert!(now - lead.created_at <= time::Duration::days(61));
        }
    }

    #[test]
    fn carrier_prefixes_abbreviate_multi_word_names() {
        assert_eq!(carrier_prefix("Medicare"), "M");
        assert_eq!(carrier_prefix("Blue Cross"), "BC");
        assert_eq!(carrier_prefix("United Healthcare"), "UH");
    }
}
