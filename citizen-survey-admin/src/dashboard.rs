//! Dashboard statistics.
//!
//! Everything here is computed from the full respondent and answer tables.
//! The trend chart shows five daily buckets ending today; how a respondent
//! is assigned to a day depends on [`TrendBucketing`].

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use citizen_survey::{AnswerRecord, Respondent, TrendBucketing};
use serde::Serialize;
use tracing::debug;

use crate::{AdminError, FeedbackAdmin};

/// Number of daily buckets in the trend chart.
pub const TREND_DAYS: usize = 5;

/// Respondent counts per day, oldest first. The last bucket is today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrendBuckets(pub [usize; TREND_DAYS]);

impl TrendBuckets {
    /// Bucket respondents by the day they were created, relative to `now`.
    pub fn collect<Tz: TimeZone>(
        respondents: &[Respondent],
        now: &DateTime<Tz>,
        bucketing: TrendBucketing,
    ) -> Self {
        let mut buckets = [0; TREND_DAYS];
        for respondent in respondents {
            let days_ago = match bucketing {
                TrendBucketing::CalendarAligned => {
                    let created = respondent.created_at.with_timezone(&now.timezone());
                    (now.date_naive() - created.date_naive()).num_days()
                }
                TrendBucketing::RollingOffset => {
                    let elapsed = now.with_timezone(&Utc) - respondent.created_at;
                    if elapsed < TimeDelta::zero() {
                        continue;
                    }
                    elapsed.num_days()
                }
            };

            if let Ok(days_ago) = usize::try_from(days_ago)
                && days_ago < TREND_DAYS
            {
                buckets[TREND_DAYS - 1 - days_ago] += 1;
            }
        }
        Self(buckets)
    }

    pub fn counts(&self) -> [usize; TREND_DAYS] {
        self.0
    }

    /// Each bucket as a percentage of the largest one. All zero when empty.
    pub fn relative_heights(&self) -> [f64; TREND_DAYS] {
        let max = self.0.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return [0.0; TREND_DAYS];
        }
        self.0.map(|count| count as f64 / max as f64 * 100.0)
    }
}

/// The numbers shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_respondents: usize,

    /// Mean of every stored score, `0.0` when there are none.
    pub average_score: f64,

    /// Respondents that left a non-blank comment.
    pub comment_count: usize,

    pub trend: TrendBuckets,
}

impl DashboardStats {
    pub fn compute<Tz: TimeZone>(
        respondents: &[Respondent],
        answers: &[AnswerRecord],
        now: &DateTime<Tz>,
        bucketing: TrendBucketing,
    ) -> Self {
        let average_score = if answers.is_empty() {
            0.0
        } else {
            let total: u64 = answers
                .iter()
                .map(|answer| u64::from(answer.score.value()))
                .sum();
            total as f64 / answers.len() as f64
        };

        Self {
            total_respondents: respondents.len(),
            average_score,
            comment_count: respondents.iter().filter(|r| r.has_comment()).count(),
            trend: TrendBuckets::collect(respondents, now, bucketing),
        }
    }

    /// The average score with one decimal, e.g. `"4.2"`.
    pub fn average_score_display(&self) -> String {
        format!("{:.1}", self.average_score)
    }
}

/// Fetch both tables and compute the dashboard.
pub async fn load_dashboard<S, Tz>(
    store: &S,
    now: &DateTime<Tz>,
    bucketing: TrendBucketing,
) -> Result<DashboardStats, AdminError>
where
    S: FeedbackAdmin,
    Tz: TimeZone,
{
    let respondents = store.list_respondents().await.map_err(AdminError::store)?;
    let answers = store.list_answers().await.map_err(AdminError::store)?;

    let stats = DashboardStats::compute(&respondents, &answers, now, bucketing);
    debug!(
        respondents = stats.total_respondents,
        answers = answers.len(),
        "Dashboard computed"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use citizen_survey::{Biodata, QuestionId, RespondentId, Score};

    use super::*;

    fn respondent(id: i64, created_at: &str, comment: &str) -> Respondent {
        Respondent {
            id: RespondentId(id),
            biodata: Biodata::default(),
            comment: comment.into(),
            created_at: created_at.parse().unwrap(),
        }
    }

    fn answer(respondent: i64, question: i64, score: u8) -> AnswerRecord {
        AnswerRecord {
            respondent_id: RespondentId(respondent),
            question_id: QuestionId(question),
            score: Score::new(score).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        "2026-02-06T09:00:00Z".parse().unwrap()
    }

    #[test]
    fn empty_tables() {
        let stats = DashboardStats::compute(&[], &[], &now(), TrendBucketing::CalendarAligned);
        assert_eq!(stats.total_respondents, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.average_score_display(), "0.0");
        assert_eq!(stats.trend.relative_heights(), [0.0; TREND_DAYS]);
    }

    #[test]
    fn average_and_comments() {
        let respondents = [
            respondent(1, "2026-02-06T08:00:00Z", "Antrian terlalu panjang"),
            respondent(2, "2026-02-06T08:30:00Z", "   "),
            respondent(3, "2026-02-06T08:45:00Z", ""),
        ];
        let answers = [answer(1, 1, 4), answer(1, 2, 5), answer(2, 1, 3), answer(3, 1, 4)];

        let stats =
            DashboardStats::compute(&respondents, &answers, &now(), TrendBucketing::CalendarAligned);

        assert_eq!(stats.total_respondents, 3);
        assert_eq!(stats.comment_count, 1);
        assert_eq!(stats.average_score, 4.0);
        assert_eq!(stats.average_score_display(), "4.0");
    }

    #[test]
    fn average_is_shown_with_one_decimal() {
        let answers = [answer(1, 1, 4), answer(1, 2, 4), answer(1, 3, 5)];
        let stats = DashboardStats::compute(&[], &answers, &now(), TrendBucketing::RollingOffset);
        assert_eq!(stats.average_score_display(), "4.3");
    }

    #[test]
    fn calendar_buckets_follow_dates() {
        // Yesterday late evening is a full calendar day back even though
        // fewer than 24 hours have passed.
        let respondents = [
            respondent(1, "2026-02-06T00:10:00Z", ""),
            respondent(2, "2026-02-05T23:50:00Z", ""),
            respondent(3, "2026-02-02T12:00:00Z", ""),
            respondent(4, "2026-02-01T12:00:00Z", ""),
        ];
        let trend = TrendBuckets::collect(&respondents, &now(), TrendBucketing::CalendarAligned);
        assert_eq!(trend.counts(), [1, 0, 0, 1, 1]);
    }

    #[test]
    fn rolling_buckets_follow_elapsed_time() {
        let respondents = [
            respondent(1, "2026-02-06T00:10:00Z", ""),
            respondent(2, "2026-02-05T23:50:00Z", ""),
            respondent(3, "2026-02-05T08:59:00Z", ""),
            respondent(4, "2026-02-07T08:00:00Z", ""),
        ];
        let trend = TrendBuckets::collect(&respondents, &now(), TrendBucketing::RollingOffset);
        assert_eq!(trend.counts(), [0, 0, 0, 1, 2]);
    }

    #[test]
    fn calendar_dates_use_the_reference_time_zone() {
        let jakarta = FixedOffset::east_opt(7 * 3600).unwrap();
        let now = now().with_timezone(&jakarta);

        // 18:00 UTC on the 5th is already the 6th in Jakarta.
        let respondents = [respondent(1, "2026-02-05T18:00:00Z", "")];
        let trend = TrendBuckets::collect(&respondents, &now, TrendBucketing::CalendarAligned);
        assert_eq!(trend.counts(), [0, 0, 0, 0, 1]);
    }

    #[test]
    fn heights_are_relative_to_the_busiest_day() {
        let trend = TrendBuckets([1, 0, 2, 4, 4]);
        assert_eq!(trend.relative_heights(), [25.0, 0.0, 50.0, 100.0, 100.0]);
    }

    #[test]
    fn old_respondents_fall_off_the_chart() {
        let old = respondent(1, "2026-01-06T09:00:00Z", "");
        let stats = DashboardStats::compute(
            std::slice::from_ref(&old),
            &[],
            &now(),
            TrendBucketing::CalendarAligned,
        );
        assert_eq!(stats.total_respondents, 1);
        assert_eq!(stats.trend.counts(), [0; TREND_DAYS]);
    }
}
