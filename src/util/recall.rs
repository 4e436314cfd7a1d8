//! function(s) for evaluating recall
use std::cmp::min;
use std::collections::HashSet;
use std::path::Path;

use super::ground_truth::MISSING_ID;
use crate::error::Result;

/// recall against filtered groundtruth, where queries may have fewer than $k$ true neighbors
///
/// counts the distinct true neighbors present in the output, over the number of true
/// neighbors. duplicate output ids are counted once. returns `None` when the groundtruth
/// holds no neighbors at all.
pub fn filtered_recall(output: &[u32], groundtruth: &[u32]) -> Option<f64> {
    let length = min(output.len(), groundtruth.len());
    let truth: HashSet<u32> = groundtruth[..length]
        .iter()
        .copied()
        .filter(|&id| id != MISSING_ID)
        .collect();
    if truth.is_empty() {
        return None;
    }

    let found: HashSet<u32> = output[..length].iter().copied().collect();
    let matches = truth.intersection(&found).count();
    Some(matches as f64 / truth.len() as f64)
}

/// writes one `query,recall` record per query; unscored queries get an empty recall
pub fn write_recall_csv(path: &Path, per_query: &[Option<f64>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["query", "recall"])?;
    for (i, recall) in per_query.iter().enumerate() {
        let recall = recall.map(|r| format!("{r:.5}")).unwrap_or_default();
        writer.write_record([i.to_string(), recall])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_filtered_recall() {
        let gt = [3, 5, MISSING_ID, MISSING_ID];
        assert_eq!(filtered_recall(&[5, 9, 9, 3], &gt), Some(1.0));
        assert_eq!(filtered_recall(&[5, 5, 5, 5], &gt), Some(0.5));
        assert_eq!(filtered_recall(&[0, 1, 2, 4], &gt), Some(0.0));
        assert_eq!(filtered_recall(&[0, 1], &[MISSING_ID, MISSING_ID]), None);
    }

    #[test]
    fn test_write_recall_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recall.csv");
        write_recall_csv(&path, &[Some(1.0), None, Some(0.25)]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "query,recall\n0,1.00000\n1,\n2,0.25000\n");
    }
}
