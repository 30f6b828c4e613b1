use crate::types::{DiurnalQuarter, RateLimitProfile};

/// Outcome of free-tier capacity planning. Never an error: when nothing in
/// the catalog is big enough we recommend the fallback and flag it, the
/// report still goes out.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SelectedPlan {
    pub profile: RateLimitProfile,

    /// False when the fallback was substituted because no catalog profile
    /// covered the peak. Advisory, not a failure.
    pub within_limits: bool,

    pub peak_requests_per_hour: f64,
    pub peak_tokens_per_hour: f64,
}

/// Spreads a daily volume over a synthetic 24-hour day.
///
/// Each quarter's share of the day is split evenly across its hours, which
/// gives a step curve. Crude, but the point is a defensible peak-hour
/// figure, not a measured load profile.
pub fn distribute_over_day(
    daily_requests: f64,
    daily_tokens: f64,
    quarters: &[DiurnalQuarter; 4],
) -> ([f64; 24], [f64; 24]) {
    let mut requests = [0.0; 24];
    let mut tokens = [0.0; 24];

    let mut hour = 0;
    for quarter in quarters {
        let requests_per_hour = daily_requests * quarter.traffic_share / quarter.hours as f64;
        let tokens_per_hour = daily_tokens * quarter.traffic_share / quarter.hours as f64;

        for _ in 0..quarter.hours {
            requests[hour] = requests_per_hour;
            tokens[hour] = tokens_per_hour;
            hour += 1;
        }
    }

    (requests, tokens)
}

/// Picks the zero-cost model for a projected day.
///
/// Per-minute limits scaled by 60 stand in for hourly capacity. The catalog
/// is walked in order and the first profile covering both peaks wins, so
/// keep the catalog sorted by preference.
pub fn select_model(
    hourly_requests: &[f64; 24],
    hourly_tokens: &[f64; 24],
    free_profiles: &[RateLimitProfile],
    fallback: RateLimitProfile,
) -> SelectedPlan {
    let peak_requests_per_hour = peak(hourly_requests);
    let peak_tokens_per_hour = peak(hourly_tokens);

    let qualifying = free_profiles.iter().find(|profile| {
        let hourly_request_capacity = (profile.requests_per_minute * 60) as f64;
        let hourly_token_capacity = (profile.tokens_per_minute * 60) as f64;

        hourly_request_capacity >= peak_requests_per_hour
            && hourly_token_capacity >= peak_tokens_per_hour
    });

    match qualifying {
        Some(profile) => SelectedPlan {
            profile: *profile,
            within_limits: true,
            peak_requests_per_hour,
            peak_tokens_per_hour,
        },
        None => SelectedPlan {
            profile: fallback,
            within_limits: false,
            peak_requests_per_hour,
            peak_tokens_per_hour,
        },
    }
}

fn peak(series: &[f64; 24]) -> f64 {
    series.iter().copied().fold(0.0, f64::max)
}
