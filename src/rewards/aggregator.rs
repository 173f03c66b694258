use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::database::models::reward::RewardRecord;

/// Group reward records by customer id and sum their points.
///
/// Customer ids are matched exactly (case-sensitive). Input order does not
/// affect the result, and an empty input yields an empty map - callers decide
/// whether emptiness is an error.
pub fn aggregate(records: &[RewardRecord]) -> HashMap<String, Decimal> {
    let mut totals: HashMap<String, Decimal> = HashMap::new();
    for record in records {
        *totals
            .entry(record.customer_id.clone())
            .or_insert(Decimal::ZERO) += record.reward_points;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn record(customer_id: &str, points: i64) -> RewardRecord {
        RewardRecord {
            id: Uuid::new_v4(),
            customer_id: customer_id.to_string(),
            invoice_id: 100,
            invoice_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            invoice_amount: Decimal::from(150),
            reward_points: Decimal::from(points),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sums_points_per_customer() {
        let records = vec![record("c1", 100), record("c1", 150), record("c2", 90)];

        let totals = aggregate(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["c1"], Decimal::from(250));
        assert_eq!(totals["c2"], Decimal::from(90));
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn result_is_order_independent() {
        let mut records = vec![record("c1", 10), record("c2", 20), record("c1", 30)];
        let forward = aggregate(&records);
        records.reverse();
        let backward = aggregate(&records);

        assert_eq!(forward, backward);
    }

    #[test]
    fn customer_ids_are_case_sensitive() {
        let records = vec![record("c1", 10), record("C1", 20)];

        let totals = aggregate(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["c1"], Decimal::from(10));
        assert_eq!(totals["C1"], Decimal::from(20));
    }
}
