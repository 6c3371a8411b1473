//! Descriptive statistics over a user's mood history.
//!
//! All functions take records in the order the caller fetched them
//! (date ascending) and never reorder them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::mood_record::MoodRecord;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum MoodCategory {
    Happy,
    Calm,
    Neutral,
    Stressed,
    Sad,
}

impl MoodCategory {
    /// Chart legend order.
    pub const ALL: [MoodCategory; 5] = [
        Self::Happy,
        Self::Calm,
        Self::Neutral,
        Self::Stressed,
        Self::Sad,
    ];

    pub fn from_mood(mood: i16) -> Self {
        match mood {
            4 => Self::Happy,
            3 => Self::Calm,
            2 => Self::Neutral,
            1 => Self::Stressed,
            _ => Self::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Calm => "Calm",
            Self::Neutral => "Neutral",
            Self::Stressed => "Stressed",
            Self::Sad => "Sad",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Happy => "#A8DADC",
            Self::Calm => "#D9C7F5",
            Self::Neutral => "#FAF3E0",
            Self::Stressed => "#FF9E9E",
            Self::Sad => "#9EC1FF",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DistributionSlice {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mood: i16,
    pub energy: i16,
    pub sleep: i16,
    pub mood_label: &'static str,
}

/// Mean mood rounded to one decimal; 0.0 for an empty history.
pub fn average_mood(records: &[MoodRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: i64 = records.iter().map(|r| i64::from(r.mood)).sum();
    let mean = total as f64 / records.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// First record holding the highest mood.
pub fn best_day(records: &[MoodRecord]) -> Option<&MoodRecord> {
    records
        .iter()
        .reduce(|best, r| if r.mood > best.mood { r } else { best })
}

/// Count of records per category, only for categories that occur, in order
/// of first appearance.
pub fn mood_distribution(records: &[MoodRecord]) -> Vec<DistributionSlice> {
    let mut counts: Vec<(MoodCategory, usize)> = Vec::new();
    for r in records {
        let category = MoodCategory::from_mood(r.mood);
        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, n)) => *n += 1,
            None => counts.push((category, 1)),
        }
    }

    counts
        .into_iter()
        .map(|(c, value)| DistributionSlice {
            name: c.label(),
            value,
            color: c.color(),
        })
        .collect()
}

/// Every category in legend order, zero counts included. `Sad` is always 0
/// for quiz and manual records, which only produce moods 1-4.
pub fn mood_distribution_dense(records: &[MoodRecord]) -> Vec<DistributionSlice> {
    MoodCategory::ALL
        .iter()
        .map(|&c| DistributionSlice {
            name: c.label(),
            value: records
                .iter()
                .filter(|r| MoodCategory::from_mood(r.mood) == c)
                .count(),
            color: c.color(),
        })
        .collect()
}

pub fn mood_label(value: i16) -> &'static str {
    match value {
        4 => "Great",
        3 => "Good",
        2 => "Okay",
        1 => "Low",
        _ => "",
    }
}

pub fn mood_trends(records: &[MoodRecord]) -> Vec<TrendPoint> {
    records
        .iter()
        .map(|r| TrendPoint {
            date: r.date,
            mood: r.mood,
            energy: r.energy,
            sleep: r.sleep,
            mood_label: mood_label(r.mood),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn record(mood: i16, day: u32) -> MoodRecord {
        MoodRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            mood,
            energy: 2,
            sleep: 3,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn average_of_sample_histories() {
        assert_eq!(average_mood(&[record(4, 1), record(2, 2)]), 3.0);
        assert_eq!(average_mood(&[record(3, 1)]), 3.0);
        assert_eq!(average_mood(&[record(4, 1), record(3, 2), record(3, 3)]), 3.3);
        assert_eq!(average_mood(&[record(4, 1), record(4, 2), record(3, 3)]), 3.7);
    }

    #[test]
    fn average_of_empty_history_is_zero() {
        assert_eq!(average_mood(&[]), 0.0);
    }

    #[test]
    fn best_day_picks_first_maximum() {
        let records = [record(2, 1), record(4, 2), record(4, 3)];
        let best = best_day(&records).unwrap();
        assert_eq!(best.date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
    }

    #[test]
    fn best_day_of_empty_history_is_none() {
        assert!(best_day(&[]).is_none());
    }

    #[test]
    fn distribution_is_sparse_and_ordered_by_first_appearance() {
        let records = [record(4, 1), record(4, 2), record(3, 3), record(1, 4)];
        let dist = mood_distribution(&records);
        let pairs: Vec<(&str, usize)> = dist.iter().map(|s| (s.name, s.value)).collect();
        assert_eq!(pairs, vec![("Happy", 2), ("Calm", 1), ("Stressed", 1)]);
        assert!(dist.iter().all(|s| s.name != "Neutral" && s.name != "Sad"));
    }

    #[test]
    fn unexpected_mood_values_count_as_neutral() {
        let dist = mood_distribution(&[record(0, 1), record(2, 2), record(7, 3)]);
        assert_eq!(
            dist,
            vec![DistributionSlice {
                name: "Neutral",
                value: 3,
                color: "#FAF3E0"
            }]
        );
    }

    #[test]
    fn trends_keep_input_order_and_label_mood() {
        let points = mood_trends(&[record(1, 3), record(4, 5)]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].mood_label, "Low");
        assert_eq!(points[1].mood_label, "Great");
        assert_eq!(points[1].energy, 2);
        assert_eq!(mood_label(9), "");
    }

    #[test]
    fn dense_distribution_lists_every_category() {
        let records = vec![record(4, 1), record(4, 2), record(3, 3), record(1, 4)];
        let dense = mood_distribution_dense(&records);
        let pairs: Vec<_> = dense.iter().map(|s| (s.name, s.value)).collect();
        assert_eq!(
            pairs,
            vec![("Happy", 2), ("Calm", 1), ("Neutral", 0), ("Stressed", 1), ("Sad", 0)]
        );
        assert_eq!(dense[4].color, "#9EC1FF");
        assert!(mood_distribution_dense(&[]).iter().all(|s| s.value == 0));
    }
}
