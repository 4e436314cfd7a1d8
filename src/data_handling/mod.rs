pub mod bin_file;
pub mod dataset;
pub mod dataset_traits;
pub mod knn_file;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use tempfile::tempdir;

    use super::bin_file::{read_bin, write_bin};
    use super::dataset::VectorDataset;
    use super::knn_file::{read_knn, write_knn, KnnResults};
    use crate::error::Error;

    fn raw_file(count: u32, values: &[f32], extra: &[u8]) -> Vec<u8> {
        let mut bytes = count.to_le_bytes().to_vec();
        for v in values {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        bytes.extend_from_slice(extra);
        bytes
    }

    #[test]
    fn test_read_bin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, raw_file(2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[])).unwrap();

        let dataset = read_bin(&path, 3).unwrap();
        assert_eq!(dataset.n, 2);
        assert_eq!(dataset.dim, 3);
        assert_eq!(dataset.get(0), &[1.0, 2.0, 3.0]);
        assert_eq!(dataset.get(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_read_bin_drops_partial_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        // two full rows then half a row and a stray byte
        fs::write(
            &path,
            raw_file(3, &[1.0, 2.0, 3.0, 4.0, 5.0], &[0xff]),
        )
        .unwrap();

        let dataset = read_bin(&path, 2).unwrap();
        assert_eq!(dataset.n, 2);
        assert_eq!(dataset.get(1), &[3.0, 4.0]);
    }

    #[test]
    fn test_read_bin_stops_at_declared_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, raw_file(1, &[1.0, 2.0, 3.0, 4.0], &[])).unwrap();

        let dataset = read_bin(&path, 2).unwrap();
        assert_eq!(dataset.n, 1);
        assert_eq!(dataset.get(0), &[1.0, 2.0]);
    }

    #[test]
    fn test_read_bin_errors() {
        let dir = tempdir().unwrap();

        let missing = dir.path().join("missing.bin");
        assert!(matches!(read_bin(&missing, 2), Err(Error::Io { .. })));

        let short = dir.path().join("short.bin");
        let mut file = fs::File::create(&short).unwrap();
        file.write_all(&[1, 0]).unwrap();
        assert!(matches!(
            read_bin(&short, 2),
            Err(Error::Truncated { len: 2, .. })
        ));

        assert!(matches!(
            read_bin(&short, 0),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_write_then_read_bin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("points.bin");
        let dataset = VectorDataset::from_rows(&[
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 1.0, 2.0, 2.0],
            vec![1.0, 0.0, 3.0, 3.0],
        ]);

        write_bin(&path, &dataset).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 4 + 3 * 4 * 4);

        let read = read_bin(&path, 4).unwrap();
        assert_eq!(read.n, 3);
        assert_eq!(read.as_slice(), dataset.as_slice());
    }

    #[test]
    fn test_point_view() {
        let dataset = VectorDataset::from_rows(&[vec![3.0, 0.25, 7.0, 8.0]]);
        let point = dataset.point(0);
        assert_eq!(point.category(), 3.0);
        assert_eq!(point.attribute(), 0.25);
        assert_eq!(point.features(), &[7.0, 8.0]);
    }

    #[test]
    fn test_write_knn_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.bin");
        let rows = vec![vec![4, 1, 7], vec![0, 2, 9]];

        write_knn(&path, &rows, 3).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 2 * 3 * 4);
        assert_eq!(&bytes[0..4], &4u32.to_le_bytes());
        assert_eq!(&bytes[20..24], &9u32.to_le_bytes());

        let read = read_knn(&path, 3).unwrap();
        assert_eq!(read.n, 2);
        assert_eq!(read.get_neighbors(0), &[4, 1, 7]);
        assert_eq!(read.get_neighbors(1), &[0, 2, 9]);
    }

    #[test]
    fn test_write_knn_checks_first_row_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.bin");

        let bad_first = vec![vec![1, 2], vec![1, 2, 3]];
        assert!(matches!(
            write_knn(&path, &bad_first, 3),
            Err(Error::ResultWidth {
                expected: 3,
                found: 2
            })
        ));

        // later rows are written as given
        let bad_second = vec![vec![1, 2, 3], vec![4]];
        write_knn(&path, &bad_second, 3).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 4 * 4);
    }

    #[test]
    fn test_write_knn_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.bin");
        write_knn(&path, &[], 100).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(read_knn(&path, 100).unwrap().n, 0);
    }

    #[test]
    fn test_knn_results_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output.bin");
        let results = KnnResults::new(3, 2, vec![5, 6, 7, 8, 9, 10]);

        results.write(&path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 3 * 2 * 4);
        let read = read_knn(&path, 2).unwrap();
        assert_eq!(read, results);
        assert_eq!(read.rows().count(), 3);
        assert_eq!(read.get_neighbors(2), &[9, 10]);
    }
}
