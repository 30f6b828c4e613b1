use crate::types::RateLimitProfile;

// Zero-cost (free plan) model catalog, from the provider's rate limit page.
//
// Order matters: selection walks this slice front to back and the first
// profile that covers the projected peak wins. Cheapest-to-run first, so
// keep new entries where they belong in that ordering.
pub static FREE_PROFILES: &[RateLimitProfile] = &[
    RateLimitProfile {
        model: "gemini-2.5-flash-lite",
        requests_per_minute: 15,
        requests_per_day: 1000,
        tokens_per_minute: 250_000,
    },
    RateLimitProfile {
        model: "gemini-2.5-flash",
        requests_per_minute: 10,
        requests_per_day: 250,
        tokens_per_minute: 250_000,
    },
    RateLimitProfile {
        model: "gemini-2.0-flash",
        requests_per_minute: 15,
        requests_per_day: 200,
        tokens_per_minute: 1_000_000,
    },
    RateLimitProfile {
        model: "gemini-2.0-flash-lite",
        requests_per_minute: 30,
        requests_per_day: 200,
        tokens_per_minute: 1_000_000,
    },
];

/// Where capacity planning lands when nothing in the catalog is big enough.
/// Free-tier sizing is advisory, so this is a recommendation, not a limit.
pub static FALLBACK_PROFILE: RateLimitProfile = RateLimitProfile {
    model: "gemini-2.5-flash-lite",
    requests_per_minute: 15,
    requests_per_day: 1000,
    tokens_per_minute: 250_000,
};
