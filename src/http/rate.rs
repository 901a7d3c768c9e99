use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

/// Window lengths, in the order the rate-limit headers list them.
pub const WINDOW_MINUTES: [u32; 4] = [15, 30, 60, 1440];

pub const HEADER_MADE: &str = "x-ratelimit";
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RESET: &str = "x-ratelimit-reset";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimit {
    pub interval_minutes: u32,
    pub calls_made: u64,
    pub calls_remaining: u64,
    pub reset_at: Option<DateTime<Utc>>,
}

/// Advisory call budget reported by the last response. Never enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimits {
    pub windows: [RateLimit; 4],
}

impl Default for RateLimits {
    fn default() -> Self {
        let window = |interval_minutes| RateLimit {
            interval_minutes,
            calls_made: 0,
            calls_remaining: 0,
            reset_at: None,
        };
        RateLimits {
            windows: WINDOW_MINUTES.map(window),
        }
    }
}

impl RateLimits {
    pub fn window(&self, interval_minutes: u32) -> Option<&RateLimit> {
        self.windows.iter().find(|w| w.interval_minutes == interval_minutes)
    }

    /// Overwrites the snapshot from response headers.
    ///
    /// Each header is optional. All present headers are parsed before anything
    /// is written, so a malformed one leaves the snapshot untouched. Returns
    /// whether anything was applied.
    pub fn update_from_headers(&mut self, headers: &HeaderMap) -> Result<bool, String> {
        let made = parse_counts(headers, HEADER_MADE)?;
        let remaining = parse_counts(headers, HEADER_REMAINING)?;
        let reset = match parse_counts(headers, HEADER_RESET)? {
            Some(epochs) => {
                let mut out = [None; 4];
                for (slot, secs) in out.iter_mut().zip(epochs) {
                    let secs = i64::try_from(secs).map_err(|_| format!("{}: {} out of range", HEADER_RESET, secs))?;
                    *slot = Some(
                        DateTime::<Utc>::from_timestamp(secs, 0)
                            .ok_or_else(|| format!("{}: {} out of range", HEADER_RESET, secs))?,
                    );
                }
                Some(out)
            }
            None => None,
        };

        for (i, window) in self.windows.iter_mut().enumerate() {
            if let Some(made) = made {
                window.calls_made = made[i];
            }
            if let Some(remaining) = remaining {
                window.calls_remaining = remaining[i];
            }
            if let Some(reset) = reset {
                window.reset_at = reset[i];
            }
        }
        Ok(made.is_some() || remaining.is_some() || reset.is_some())
    }
}

fn parse_counts(headers: &HeaderMap, name: &str) -> Result<Option<[u64; 4]>, String> {
    let Some(raw) = headers.get(name) else {
        return Ok(None);
    };
    let raw = raw.to_str().map_err(|e| format!("{}: {}", name, e))?;
    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("{}: {:?}: {}", name, raw, e))?;
    let counts: [u64; 4] = values
        .try_into()
        .map_err(|v: Vec<u64>| format!("{}: expected 4 values, got {}", name, v.len()))?;
    Ok(Some(counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut h = HeaderMap::new();
        for (k, v) in pairs {
            h.insert(*k, v.parse().unwrap());
        }
        h
    }

    #[test]
    fn parses_four_windows_in_order() {
        let h = headers(&[
            (HEADER_MADE, "1, 2, 3, 4"),
            (HEADER_REMAINING, "2299, 4498, 8997, 107996"),
            (HEADER_RESET, "1700000900, 1700001800, 1700003600, 1700086400"),
        ]);
        let mut limits = RateLimits::default();
        assert!(limits.update_from_headers(&h).unwrap());
        let quarter = limits.window(15).unwrap();
        assert_eq!(quarter.calls_made, 1);
        assert_eq!(quarter.calls_remaining, 2299);
        assert_eq!(quarter.reset_at.unwrap().timestamp(), 1_700_000_900);
        let day = limits.window(1440).unwrap();
        assert_eq!(day.calls_made, 4);
        assert_eq!(day.calls_remaining, 107996);
    }

    #[test]
    fn applying_same_headers_twice_is_idempotent() {
        let h = headers(&[(HEADER_MADE, "5,6,7,8"), (HEADER_REMAINING, "10,20,30,40")]);
        let mut once = RateLimits::default();
        once.update_from_headers(&h).unwrap();
        let mut twice = once;
        twice.update_from_headers(&h).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn malformed_header_leaves_snapshot_untouched() {
        let mut limits = RateLimits::default();
        limits
            .update_from_headers(&headers(&[(HEADER_MADE, "1,1,1,1")]))
            .unwrap();
        let before = limits;
        let bad = headers(&[(HEADER_MADE, "9,9,9,9"), (HEADER_REMAINING, "-1,0,0,0")]);
        assert!(limits.update_from_headers(&bad).is_err());
        assert_eq!(limits, before);
        let short = headers(&[(HEADER_MADE, "1,2,3")]);
        assert!(limits.update_from_headers(&short).is_err());
        assert_eq!(limits, before);
    }

    #[test]
    fn absent_headers_change_nothing() {
        let mut limits = RateLimits::default();
        assert!(!limits.update_from_headers(&HeaderMap::new()).unwrap());
        assert_eq!(limits, RateLimits::default());
    }
}
