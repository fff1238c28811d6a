use crate::models::{DayKey, DaySummary, ForecastSample, SelectionState, TemperatureRange};
use chrono::TimeZone;

/// Distinct day keys in order of first appearance
pub fn grouped_days<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DayKey> {
    let mut days: Vec<DayKey> = Vec::new();
    for sample in samples {
        let key = sample.day_key(tz);
        // At most a handful of days, a linear scan keeps first-seen order
        if !days.contains(&key) {
            days.push(key);
        }
    }
    days
}

/// Highest `temp_max` and lowest `temp_min` over the samples of one day.
///
/// Returns `None` when no sample falls on `key`. Callers derive keys from
/// [`grouped_days`], so `None` indicates a stale or foreign key.
pub fn day_temperature_range<Tz: TimeZone>(
    samples: &[ForecastSample],
    key: DayKey,
    tz: &Tz,
) -> Option<TemperatureRange> {
    samples
        .iter()
        .filter(|s| s.day_key(tz) == key)
        .fold(None, |range, s| {
            Some(match range {
                None => TemperatureRange {
                    max: s.temp_max,
                    min: s.temp_min,
                },
                Some(r) => TemperatureRange {
                    max: r.max.max(s.temp_max),
                    min: r.min.min(s.temp_min),
                },
            })
        })
}

/// Samples falling on `key`, in input order
pub fn samples_for_day<'a, Tz: TimeZone>(
    samples: &'a [ForecastSample],
    key: DayKey,
    tz: &Tz,
) -> Vec<&'a ForecastSample> {
    samples.iter().filter(|s| s.day_key(tz) == key).collect()
}

/// Make `key` the active day. Not checked against any sample set; a key with
/// no samples simply yields an empty [`samples_for_day`].
pub fn select_day(key: DayKey) -> SelectionState {
    SelectionState { selected: key }
}

/// One summary per grouped day, in grouped order
pub fn day_summaries<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DaySummary> {
    let mut summaries: Vec<DaySummary> = Vec::new();
    for sample in samples {
        let key = sample.day_key(tz);
        match summaries.iter_mut().find(|d| d.key == key) {
            Some(summary) => {
                summary.range.max = summary.range.max.max(sample.temp_max);
                summary.range.min = summary.range.min.min(sample.temp_min);
            }
            None => summaries.push(DaySummary {
                key,
                range: TemperatureRange {
                    max: sample.temp_max,
                    min: sample.temp_min,
                },
            }),
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn sample(day: u32, hour: u32, temp: f64, temp_max: f64, temp_min: f64) -> ForecastSample {
        ForecastSample {
            timestamp: at(day, hour),
            temperature: temp,
            feels_like: temp,
            temp_min,
            temp_max,
            humidity: 60.0,
            wind_speed: 2.5,
            condition_description: "clear sky".into(),
        }
    }

    fn june_scenario() -> Vec<ForecastSample> {
        vec![
            sample(15, 0, 10.0, 12.0, 8.0),
            sample(15, 12, 20.0, 22.0, 15.0),
            sample(16, 0, 5.0, 6.0, 2.0),
        ]
    }

    #[test]
    fn june_scenario_grouping() {
        let samples = june_scenario();
        let days = grouped_days(&samples, &tz());
        let labels: Vec<String> = days.iter().map(|d| d.to_string()).collect();
        assert_eq!(labels, vec!["15 June", "16 June"]);
    }

    #[test]
    fn june_scenario_range() {
        let samples = june_scenario();
        let range = day_temperature_range(&samples, DayKey::new(15, 6), &tz()).unwrap();
        assert_eq!(range.max, 22.0);
        assert_eq!(range.min, 8.0);
    }

    #[test]
    fn june_scenario_samples_for_day() {
        let samples = june_scenario();
        let day = samples_for_day(&samples, DayKey::new(15, 6), &tz());
        assert_eq!(day.len(), 2);
        assert_eq!(day[0], &samples[0]);
        assert_eq!(day[1], &samples[1]);
    }

    #[test]
    fn grouping_is_deterministic() {
        let samples = june_scenario();
        assert_eq!(grouped_days(&samples, &tz()), grouped_days(&samples, &tz()));
    }

    #[test]
    fn grouping_tolerates_unordered_input() {
        let samples = vec![
            sample(16, 3, 5.0, 6.0, 2.0),
            sample(15, 9, 10.0, 12.0, 8.0),
            sample(17, 0, 7.0, 8.0, 4.0),
            sample(15, 21, 11.0, 13.0, 9.0),
            sample(16, 18, 6.0, 7.0, 3.0),
        ];
        let days = grouped_days(&samples, &tz());

        assert_eq!(
            days,
            vec![DayKey::new(16, 6), DayKey::new(15, 6), DayKey::new(17, 6)]
        );
        assert!(days.len() <= samples.len());
        for s in &samples {
            let key = s.day_key(&tz());
            assert_eq!(days.iter().filter(|d| **d == key).count(), 1);
        }
    }

    #[test]
    fn grouping_empty_input() {
        assert!(grouped_days(&[], &tz()).is_empty());
        assert!(day_summaries(&[], &tz()).is_empty());
    }

    #[test]
    fn day_key_stable_across_hours() {
        let keys: Vec<DayKey> = (0..24)
            .map(|h| sample(15, h, 0.0, 0.0, 0.0).day_key(&tz()))
            .collect();
        assert!(keys.iter().all(|k| *k == DayKey::new(15, 6)));
    }

    #[test]
    fn grouping_uses_local_day() {
        // 22:00 UTC on the 15th is already the 16th at UTC+3
        let east = FixedOffset::east_opt(3 * 3600).unwrap();
        let samples = vec![sample(15, 12, 0.0, 0.0, 0.0), sample(15, 22, 0.0, 0.0, 0.0)];
        assert_eq!(
            grouped_days(&samples, &east),
            vec![DayKey::new(15, 6), DayKey::new(16, 6)]
        );
    }

    #[test]
    fn hotter_sample_raises_max() {
        let mut samples = june_scenario();
        let before = day_temperature_range(&samples, DayKey::new(15, 6), &tz()).unwrap();

        samples.push(sample(15, 15, 25.0, 27.0, 18.0));
        let after = day_temperature_range(&samples, DayKey::new(15, 6), &tz()).unwrap();

        assert!(after.max > before.max);
        assert_eq!(after.max, 27.0);
        assert_eq!(after.min, 8.0);
    }

    #[test]
    fn range_only_counts_matching_day() {
        let samples = june_scenario();
        let range = day_temperature_range(&samples, DayKey::new(16, 6), &tz()).unwrap();
        assert_eq!(range, TemperatureRange { max: 6.0, min: 2.0 });
    }

    #[test]
    fn range_for_missing_day_is_none() {
        let samples = june_scenario();
        assert!(day_temperature_range(&samples, DayKey::new(20, 6), &tz()).is_none());
    }

    #[test]
    fn samples_for_day_preserves_order() {
        let samples = vec![
            sample(15, 21, 1.0, 0.0, 0.0),
            sample(16, 0, 2.0, 0.0, 0.0),
            sample(15, 3, 3.0, 0.0, 0.0),
            sample(15, 12, 4.0, 0.0, 0.0),
        ];
        let temps: Vec<f64> = samples_for_day(&samples, DayKey::new(15, 6), &tz())
            .iter()
            .map(|s| s.temperature)
            .collect();
        assert_eq!(temps, vec![1.0, 3.0, 4.0]);
    }

    #[test]
    fn samples_for_missing_day_is_empty() {
        let samples = june_scenario();
        assert!(samples_for_day(&samples, DayKey::new(1, 1), &tz()).is_empty());
    }

    #[test]
    fn select_day_is_unvalidated() {
        let samples = june_scenario();
        let selection = select_day(DayKey::new(30, 6));
        assert_eq!(selection.selected, DayKey::new(30, 6));
        assert!(samples_for_day(&samples, selection.selected, &tz()).is_empty());
    }

    #[test]
    fn summaries_match_ranges() {
        let mut samples = june_scenario();
        samples.push(sample(16, 12, 9.0, 11.0, 4.0));
        let summaries = day_summaries(&samples, &tz());

        assert_eq!(
            summaries.iter().map(|d| d.key).collect::<Vec<_>>(),
            grouped_days(&samples, &tz())
        );
        for summary in &summaries {
            assert_eq!(
                Some(summary.range),
                day_temperature_range(&samples, summary.key, &tz())
            );
        }
    }
}
