//! Tests for tar indexing and random-access entry reads

#[cfg(test)]
mod tests {
    use seedgrid::ViewerError;
    use seedgrid::archive::{TarArchive, TileSource};
    use std::io::Cursor;

    fn tar_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            builder
                .append_data(&mut header, path, data.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap()
    }

    fn with_directory_entry(dir: &str, entries: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Directory);
        header.set_size(0);
        header.set_mode(0o755);
        builder
            .append_data(&mut header, dir, std::io::empty())
            .unwrap();
        for (path, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            builder
                .append_data(&mut header, path, data.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap()
    }

    // Tests every regular entry is indexed and read back byte-for-byte
    // Verified by reading from the header offset instead of the payload
    #[test]
    fn test_fetch_returns_entry_payload() {
        let bytes = tar_bytes(&[
            ("0-99999/0000000.jpg", "zero"),
            ("0-99999/0000001.jpg", "one, longer payload"),
            ("0-99999/0000002.jpg", "two"),
        ]);
        let mut archive = TarArchive::from_reader(Cursor::new(bytes), "0-99999").unwrap();

        assert_eq!(archive.len(), 3);
        assert_eq!(archive.fetch(1).unwrap().unwrap(), b"one, longer payload");
        assert_eq!(archive.fetch(0).unwrap().unwrap(), b"zero");
        assert_eq!(archive.fetch(2).unwrap().unwrap(), b"two");
    }

    // Tests absent seeds are reported as missing rather than errors
    // Verified by returning an error on index miss
    #[test]
    fn test_fetch_missing_seed() {
        let bytes = tar_bytes(&[("0-99999/0000005.jpg", "five")]);
        let mut archive = TarArchive::from_reader(Cursor::new(bytes), "0-99999").unwrap();

        assert!(archive.fetch(4).unwrap().is_none());
        assert!(!archive.contains(4));
        assert!(archive.contains(5));
    }

    // Tests lookups only match entries under the configured prefix
    // Verified by ignoring the directory in the key
    #[test]
    fn test_fetch_respects_dirname() {
        let bytes = tar_bytes(&[("other/0000000.jpg", "elsewhere")]);
        let mut archive = TarArchive::from_reader(Cursor::new(bytes), "0-99999").unwrap();

        assert_eq!(archive.dirname(), "0-99999");
        assert!(archive.fetch(0).unwrap().is_none());
    }

    // Tests directory entries are left out of the index
    // Verified by indexing every header type
    #[test]
    fn test_directory_entries_not_indexed() {
        let bytes = with_directory_entry("0-99999", &[("0-99999/0000000.jpg", "zero")]);
        let archive = TarArchive::from_reader(Cursor::new(bytes), "0-99999").unwrap();

        assert_eq!(archive.len(), 1);
        assert!(!archive.is_empty());
    }

    // Tests recorded locations point at the payload
    // Verified by recording the header position
    #[test]
    fn test_location_points_at_payload() {
        let bytes = tar_bytes(&[("d/0000007.jpg", "seven")]);
        let archive = TarArchive::from_reader(Cursor::new(bytes.clone()), "d").unwrap();

        let location = archive.location(7).unwrap();
        let start = location.offset as usize;
        let end = start + location.size as usize;
        assert_eq!(&bytes[start..end], b"seven");
        assert!(archive.location(8).is_none());
    }

    // Tests fetch can revisit entries in any order
    // Verified by reading sequentially without seeking
    #[test]
    fn test_random_access_order() {
        let bytes = tar_bytes(&[
            ("d/0000000.jpg", "a"),
            ("d/0000001.jpg", "bb"),
            ("d/0000002.jpg", "ccc"),
        ]);
        let mut archive = TarArchive::from_reader(Cursor::new(bytes), "d").unwrap();

        for seed in [2, 0, 1, 2, 0] {
            let data = archive.fetch(seed).unwrap().unwrap();
            assert_eq!(data.len() as i64, seed + 1);
        }
    }

    // Tests a nonexistent file is reported as an unavailable archive
    // Verified by panicking on open failure
    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.tar");

        let err = TarArchive::open(&path, "0-99999").err().unwrap();
        assert!(matches!(err, ViewerError::ArchiveUnavailable { .. }));
        assert!(err.to_string().contains("absent.tar"));
    }

    // Tests opening from disk indexes the same entries as in memory
    // Verified by skipping the header walk on open
    #[test]
    fn test_open_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images.tar");
        std::fs::write(&path, tar_bytes(&[("d/0000003.jpg", "three")])).unwrap();

        let mut archive = TarArchive::open(&path, "d").unwrap();
        assert_eq!(archive.describe(3), "d/0000003.jpg");
        assert_eq!(archive.fetch(3).unwrap().unwrap(), b"three");
    }
}
