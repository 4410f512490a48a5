//! Day-of-week breakdown of a forecast window

use chrono::{Datelike, Weekday};
use sales_forecast::ForecastWindow;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayAverage {
    pub weekday: Weekday,
    /// Mean estimate over the days falling on this weekday
    pub average: f64,
    pub days: usize,
}

/// Average estimate per weekday, Monday first; absent weekdays are omitted
pub fn weekday_profile(window: &ForecastWindow) -> Vec<WeekdayAverage> {
    let mut sums = [0.0; 7];
    let mut counts = [0usize; 7];
    for point in window {
        let idx = point.date().weekday().num_days_from_monday() as usize;
        sums[idx] += point.estimate();
        counts[idx] += 1;
    }

    let mut weekday = Weekday::Mon;
    let mut profile = Vec::with_capacity(7);
    for idx in 0..7 {
        if counts[idx] > 0 {
            profile.push(WeekdayAverage {
                weekday,
                average: sums[idx] / counts[idx] as f64,
                days: counts[idx],
            });
        }
        weekday = weekday.succ();
    }

    profile
}

/// Weekday with the highest average, the earliest in the week on ties
pub fn best_weekday(profile: &[WeekdayAverage]) -> Option<&WeekdayAverage> {
    profile.iter().fold(None, |best: Option<&WeekdayAverage>, entry| match best {
        Some(current) if current.average >= entry.average => Some(current),
        _ => Some(entry),
    })
}
