//! The "recent cities" view over the service's saved list.

use std::collections::HashSet;

use crate::model::WeatherRecord;

/// Most cities the dashboard shows at once.
pub const RECENT_CITIES_LIMIT: usize = 4;

/// Keep the first record of each city in the order given, then cap the list.
///
/// City names are compared exactly, so "london" and "London" are distinct.
pub fn dedupe_recent(records: Vec<WeatherRecord>) -> Vec<WeatherRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.city.clone()))
        .take(RECENT_CITIES_LIMIT)
        .collect()
}
