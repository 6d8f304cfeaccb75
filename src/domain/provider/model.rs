//! Provider response-time statistic

/// Profile types that answer inquiries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Guide,
    Driver,
    Company,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::Guide, Self::Driver, Self::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guide => "GUIDE",
            Self::Driver => "DRIVER",
            Self::Company => "COMPANY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rolling average of minutes-to-first-response.
///
/// Only the previous average and count are kept, so each update rounds
/// once and the rounding error carries into the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseStats {
    pub avg_response_time_minutes: Option<i32>,
    pub response_count: i32,
}

impl ResponseStats {
    /// Fold one more response time into the average.
    pub fn record(self, response_minutes: i64) -> Self {
        let new_time = response_minutes.max(0);
        let avg = match self.avg_response_time_minutes {
            Some(old) if self.response_count > 0 => {
                let count = i64::from(self.response_count);
                let total = i64::from(old) * count + new_time;
                (total as f64 / (count + 1) as f64).round() as i64
            }
            _ => new_time,
        };

        Self {
            avg_response_time_minutes: Some(avg.min(i64::from(i32::MAX)) as i32),
            response_count: self.response_count + 1,
        }
    }
}

/// A Guide, Driver or Company profile owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub kind: ProviderKind,
    pub profile_id: String,
    pub user_id: String,
    pub stats: ResponseStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(times: &[i64]) -> ResponseStats {
        times
            .iter()
            .fold(ResponseStats::default(), |s, &t| s.record(t))
    }

    #[test]
    fn first_response_sets_average() {
        let s = ResponseStats::default().record(42);
        assert_eq!(s.avg_response_time_minutes, Some(42));
        assert_eq!(s.response_count, 1);
    }

    #[test]
    fn ten_evenly_spaced_responses() {
        let s = fold(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        assert_eq!(s.avg_response_time_minutes, Some(55));
        assert_eq!(s.response_count, 10);
    }

    #[test]
    fn step_rounding_one_to_five() {
        // 1, 2 (1.5), 2 (2.33), 3 (2.5), 3 (3.4)
        let s = fold(&[1, 2, 3, 4, 5]);
        assert_eq!(s.avg_response_time_minutes, Some(3));
    }

    #[test]
    fn outlier_after_nine_fast_responses() {
        let s = fold(&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1000]);
        assert_eq!(s.avg_response_time_minutes, Some(101));
        assert_eq!(s.response_count, 10);
    }

    #[test]
    fn missing_average_with_nonzero_count_restarts() {
        let s = ResponseStats {
            avg_response_time_minutes: None,
            response_count: 4,
        }
        .record(30);
        assert_eq!(s.avg_response_time_minutes, Some(30));
        assert_eq!(s.response_count, 5);
    }
}
