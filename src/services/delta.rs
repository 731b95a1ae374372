use crate::entities::price_observations::Model;
use crate::error::AppError;
use crate::models::record::PriceDelta;
use crate::services::history::{HistoryStore, ItemHistory};

/// Outcome of a store-backed delta report.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaReport {
    pub deltas: Vec<PriceDelta>,
    /// Items seen only once; they produce no delta.
    pub single_observation_items: usize,
}

/// Latest-vs-previous price deltas over an observation history.
///
/// One delta per item with at least two observations; items seen only once
/// are excluded. Duplicate timestamps for one item are resolved by the row
/// id (higher id counts as more recent). Read-only and idempotent; the
/// result is sorted by `item_id`, then `current_timestamp`, regardless of
/// input order.
pub fn compute_deltas(history: &[Model]) -> Vec<PriceDelta> {
    let mut rows: Vec<&Model> = history.iter().collect();
    rows.sort_by(|a, b| {
        a.item_id
            .cmp(&b.item_id)
            .then(b.timestamp.cmp(&a.timestamp))
            .then(b.id.cmp(&a.id))
    });

    let mut deltas = Vec::new();
    let mut i = 0;
    while i < rows.len() {
        let item_id = rows[i].item_id;
        let mut j = i + 1;
        while j < rows.len() && rows[j].item_id == item_id {
            j += 1;
        }
        if j - i >= 2 {
            deltas.push(pair_delta(rows[i], rows[i + 1]));
        }
        i = j;
    }

    deltas
}

/// Delta report straight from the store's latest-two-per-item view.
pub async fn report_from_store(store: &HistoryStore) -> Result<DeltaReport, AppError> {
    let histories = store.latest_two_per_item().await?;
    Ok(report_from_histories(histories))
}

fn report_from_histories(histories: Vec<ItemHistory>) -> DeltaReport {
    let mut single_observation_items = 0;

    let mut deltas: Vec<PriceDelta> = histories
        .into_iter()
        .filter_map(|history| match history.previous {
            Some(previous) => Some(pair_delta(&history.latest, &previous)),
            None => {
                single_observation_items += 1;
                None
            }
        })
        .collect();

    deltas.sort_by(|a, b| {
        a.item_id
            .cmp(&b.item_id)
            .then(a.current_timestamp.cmp(&b.current_timestamp))
    });

    DeltaReport {
        deltas,
        single_observation_items,
    }
}

fn pair_delta(current: &Model, previous: &Model) -> PriceDelta {
    let delta = match (current.min_buyout, previous.min_buyout) {
        (Some(cur), Some(prev)) => Some(cur - prev),
        // No buyout on one side: the delta is unavailable, not zero
        _ => None,
    };

    PriceDelta {
        item_id: current.item_id,
        current_price: current.min_buyout,
        previous_price: previous.min_buyout,
        current_timestamp: current.timestamp,
        previous_timestamp: previous.timestamp,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn obs(id: i64, item_id: i64, min_buyout: Option<i64>, hour: u32) -> Model {
        Model {
            id,
            item_id,
            min_buyout,
            quantity: Some(1),
            market_value: min_buyout,
            historical: min_buyout,
            num_auctions: Some(1),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 25, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_two_observations_yield_one_delta() {
        let history = vec![obs(1, 1, Some(100), 10), obs(2, 1, Some(80), 12)];

        let deltas = compute_deltas(&history);

        assert_eq!(deltas.len(), 1);
        let d = &deltas[0];
        assert_eq!(d.item_id, 1);
        assert_eq!(d.current_price, Some(80));
        assert_eq!(d.previous_price, Some(100));
        assert_eq!(d.delta, Some(-20));
        assert!(d.current_timestamp > d.previous_timestamp);
    }

    #[test]
    fn test_single_observation_is_excluded() {
        let history = vec![obs(1, 2, Some(50), 10)];

        assert!(compute_deltas(&history).is_empty());
    }

    #[test]
    fn test_missing_buyout_gives_unavailable_delta() {
        let history = vec![obs(1, 3, None, 10), obs(2, 3, Some(30), 12)];

        let deltas = compute_deltas(&history);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].current_price, Some(30));
        assert_eq!(deltas[0].previous_price, None);
        // Not 30 - 0
        assert_eq!(deltas[0].delta, None);
    }

    #[test]
    fn test_only_two_most_recent_are_paired() {
        let history = vec![
            obs(1, 5, Some(10), 8),
            obs(2, 5, Some(20), 10),
            obs(3, 5, Some(35), 12),
        ];

        let deltas = compute_deltas(&history);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].current_price, Some(35));
        assert_eq!(deltas[0].previous_price, Some(20));
        assert_eq!(deltas[0].delta, Some(15));
    }

    #[test]
    fn test_output_sorted_by_item_id() {
        let history = vec![
            obs(1, 9, Some(5), 10),
            obs(2, 9, Some(6), 12),
            obs(3, 4, Some(100), 10),
            obs(4, 4, Some(90), 12),
        ];

        let deltas = compute_deltas(&history);

        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].item_id, 4);
        assert_eq!(deltas[1].item_id, 9);
    }

    #[test]
    fn test_idempotent_over_same_history() {
        let history = vec![
            obs(1, 1, Some(100), 10),
            obs(2, 1, Some(80), 12),
            obs(3, 2, Some(50), 10),
        ];

        let first = compute_deltas(&history);
        let second = compute_deltas(&history);

        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_timestamp_resolved_by_row_id() {
        // Malformed input: same item, same timestamp. Higher id counts as
        // the more recent observation.
        let history = vec![obs(8, 7, Some(70), 10), obs(9, 7, Some(60), 10)];

        let deltas = compute_deltas(&history);

        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].current_price, Some(60));
        assert_eq!(deltas[0].previous_price, Some(70));
        assert_eq!(deltas[0].delta, Some(-10));
    }

    #[test]
    fn test_report_from_histories_counts_singles() {
        let histories = vec![
            ItemHistory {
                item_id: 1,
                latest: obs(2, 1, Some(80), 12),
                previous: Some(obs(1, 1, Some(100), 10)),
            },
            ItemHistory {
                item_id: 2,
                latest: obs(3, 2, Some(50), 12),
                previous: None,
            },
        ];

        let report = report_from_histories(histories);

        assert_eq!(report.deltas.len(), 1);
        assert_eq!(report.single_observation_items, 1);
        assert_eq!(report.deltas[0].delta, Some(-20));
    }
}
