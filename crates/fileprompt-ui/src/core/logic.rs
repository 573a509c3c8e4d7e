//! Pure formatting helpers extracted from components for non-wasm testing.

use fileprompt_api_models::HistoryEntry;

/// Human-friendly size using binary units with one decimal.
#[must_use]
pub fn format_bytes(value: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    const GIB: u64 = 1024 * 1024 * 1024;
    let (unit, label) = if value >= GIB {
        (GIB, "GiB")
    } else if value >= MIB {
        (MIB, "MiB")
    } else if value >= KIB {
        (KIB, "KiB")
    } else {
        return format!("{value} B");
    };
    let whole = value / unit;
    let tenths = (value % unit) * 10 / unit;
    format!("{whole}.{tenths} {label}")
}

/// "Total files: N" line of a history card.
#[must_use]
pub fn file_count_label(entry: &HistoryEntry) -> String {
    format!("Total files: {}", entry.file_count)
}

/// Summary line under the drop zone.
#[must_use]
pub fn selection_summary(count: usize, total_bytes: u64) -> String {
    match count {
        0 => String::new(),
        1 => format!("1 file, {}", format_bytes(total_bytes)),
        n => format!("{n} files, {}", format_bytes(total_bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024 / 2), "1.5 GiB");
    }

    #[test]
    fn summaries_pluralise() {
        assert_eq!(selection_summary(0, 0), "");
        assert_eq!(selection_summary(1, 10), "1 file, 10 B");
        assert_eq!(selection_summary(3, 2048), "3 files, 2.0 KiB");
    }

    #[test]
    fn file_count_label_uses_server_count() {
        let entry = HistoryEntry {
            id: "1".into(),
            timestamp: "2024-05-01T10:20:30".into(),
            original_files: vec!["a".into(), "b".into()],
            file_count: 2,
        };
        assert_eq!(file_count_label(&entry), "Total files: 2");
    }
}
