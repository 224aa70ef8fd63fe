//! Price-per-sqft outlier filters.
//!
//! Both filters group rows by location. Groups are visited in sorted key
//! order and keep the relative order of their rows, so the output order is
//! a pure function of the input.

use crate::preprocessing::record::CleanedRecord;
use std::collections::BTreeMap;

/// Mean and sample standard deviation (ddof = 1).
///
/// The deviation is `None` for fewer than two values.
pub fn mean_std(values: &[f64]) -> (f64, Option<f64>) {
    let n = values.len();
    if n == 0 {
        return (f64::NAN, None);
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, None);
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, Some(var.sqrt()))
}

fn group_by_location(records: &[CleanedRecord]) -> BTreeMap<&str, Vec<usize>> {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, r) in records.iter().enumerate() {
        groups.entry(r.location.as_str()).or_default().push(i);
    }
    groups
}

/// Keeps rows within one standard deviation of their location's mean
/// price per sqft: `m - s < pps <= m + s`.
///
/// A location with a single row has no deviation and loses that row.
/// Output rows are ordered by location, then by input position.
pub fn remove_pps_outliers(records: Vec<CleanedRecord>) -> Vec<CleanedRecord> {
    let mut keep = Vec::with_capacity(records.len());
    for indices in group_by_location(&records).into_values() {
        let pps: Vec<f64> = indices
            .iter()
            .map(|&i| records[i].price_per_sqft())
            .collect();
        let (m, s) = match mean_std(&pps) {
            (m, Some(s)) => (m, s),
            _ => continue,
        };
        keep.extend(
            indices
                .iter()
                .zip(&pps)
                .filter(|(_, &v)| v > m - s && v <= m + s)
                .map(|(&i, _)| i),
        );
    }

    let mut slots: Vec<Option<CleanedRecord>> = records.into_iter().map(Some).collect();
    keep.into_iter().filter_map(|i| slots[i].take()).collect()
}

#[derive(Debug, Clone, Copy)]
struct BhkStats {
    mean: f64,
    count: usize,
}

/// Drops `b`-bedroom rows priced per sqft below the mean of the `b - 1`
/// bedroom rows in the same location, provided that smaller group has more
/// than `min_group_size` rows. Input order is preserved.
pub fn remove_bhk_outliers(
    records: Vec<CleanedRecord>,
    min_group_size: usize,
) -> Vec<CleanedRecord> {
    let mut exclude = vec![false; records.len()];

    for indices in group_by_location(&records).into_values() {
        let mut by_bhk: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for &i in &indices {
            by_bhk.entry(records[i].bhk).or_default().push(i);
        }

        let stats: BTreeMap<u32, BhkStats> = by_bhk
            .iter()
            .map(|(&bhk, rows)| {
                let pps: Vec<f64> = rows.iter().map(|&i| records[i].price_per_sqft()).collect();
                let (mean, _) = mean_std(&pps);
                (
                    bhk,
                    BhkStats {
                        mean,
                        count: rows.len(),
                    },
                )
            })
            .collect();

        for (bhk, rows) in &by_bhk {
            let smaller = match bhk.checked_sub(1).and_then(|b| stats.get(&b)) {
                Some(s) if s.count > min_group_size => s,
                _ => continue,
            };
            for &i in rows {
                if records[i].price_per_sqft() < smaller.mean {
                    exclude[i] = true;
                }
            }
        }
    }

    records
        .into_iter()
        .zip(exclude)
        .filter(|(_, drop)| !drop)
        .map(|(r, _)| r)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(location: &str, bhk: u32, total_sqft: f64, price: f64) -> CleanedRecord {
        CleanedRecord {
            location: location.to_string(),
            total_sqft,
            bhk,
            bath: bhk,
            price,
        }
    }

    #[test]
    fn test_mean_std_sample_deviation() {
        let (m, s) = mean_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(m, 5.0);
        assert!((s.unwrap() - 2.138089935299395).abs() < 1e-12);
    }

    #[test]
    fn test_mean_std_single_value_has_no_std() {
        assert_eq!(mean_std(&[3.0]), (3.0, None));
    }

    #[test]
    fn test_pps_outliers_drop_tails() {
        // pps: 4000, 5000, 6000, 20000 -> mean 8750, std ~7500
        let records = vec![
            rec("A", 2, 1000.0, 40.0),
            rec("A", 2, 1000.0, 50.0),
            rec("A", 2, 1000.0, 60.0),
            rec("A", 2, 1000.0, 200.0),
        ];
        let out = remove_pps_outliers(records);
        let prices: Vec<f64> = out.iter().map(|r| r.price).collect();
        assert_eq!(prices, vec![40.0, 50.0, 60.0]);
    }

    #[test]
    fn test_pps_outliers_single_row_group_is_dropped() {
        let records = vec![
            rec("Lonely", 2, 1000.0, 40.0),
            rec("A", 2, 1000.0, 50.0),
            rec("A", 2, 1000.0, 52.0),
            rec("A", 2, 1000.0, 51.0),
        ];
        let out = remove_pps_outliers(records);
        assert!(out.iter().all(|r| r.location == "A"));
    }

    #[test]
    fn test_pps_outliers_orders_by_location() {
        let records = vec![
            rec("B", 2, 1000.0, 50.0),
            rec("A", 2, 1000.0, 50.0),
            rec("B", 2, 1000.0, 51.0),
            rec("A", 2, 1000.0, 51.0),
            rec("A", 2, 1000.0, 52.0),
            rec("B", 2, 1000.0, 52.0),
        ];
        let out = remove_pps_outliers(records);
        let locs: Vec<&str> = out.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locs, vec!["A", "A", "B", "B"]);
        // pps 5000 sits exactly on m - s and is excluded
        assert_eq!(out[0].price, 51.0);
        assert_eq!(out[1].price, 52.0);
        assert_eq!(out[2].price, 51.0);
    }

    #[test]
    fn test_bhk_outliers_drop_cheaper_larger_units() {
        let mut records: Vec<CleanedRecord> =
            (0..6).map(|_| rec("A", 2, 1000.0, 60.0)).collect(); // 2 BHK mean pps 6000
        records.push(rec("A", 3, 1000.0, 50.0)); // 5000 < 6000 -> dropped
        records.push(rec("A", 3, 1000.0, 70.0)); // kept
        let out = remove_bhk_outliers(records, 5);
        assert_eq!(out.len(), 7);
        assert!(out.iter().all(|r| !(r.bhk == 3 && r.price == 50.0)));
    }

    #[test]
    fn test_bhk_outliers_need_large_smaller_group() {
        let mut records: Vec<CleanedRecord> =
            (0..5).map(|_| rec("A", 2, 1000.0, 60.0)).collect();
        records.push(rec("A", 3, 1000.0, 50.0));
        let out = remove_bhk_outliers(records, 5);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_bhk_outliers_are_per_location() {
        let mut records: Vec<CleanedRecord> =
            (0..6).map(|_| rec("A", 2, 1000.0, 60.0)).collect();
        records.push(rec("B", 3, 1000.0, 50.0));
        let out = remove_bhk_outliers(records, 5);
        assert_eq!(out.len(), 7);
    }
}
