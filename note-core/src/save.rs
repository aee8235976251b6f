use chrono::NaiveDateTime;

pub const TEXT_MIME: &str = "text/plain;charset=utf-8";

/// A file ready to hand to the download port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

pub fn timestamped_filename(prefix: &str, extension: &str, at: NaiveDateTime) -> String {
    format!("{prefix}_{}.{extension}", at.format("%Y%m%d_%H%M%S"))
}

pub fn text_file(prefix: &str, extension: &str, at: NaiveDateTime, text: &str) -> SaveFile {
    SaveFile {
        filename: timestamped_filename(prefix, extension, at),
        mime: TEXT_MIME,
        bytes: text.as_bytes().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid timestamp")
    }

    #[test]
    fn filename_is_zero_padded() {
        assert_eq!(
            timestamped_filename("note", "txt", at(2024, 1, 2, 3, 4, 5)),
            "note_20240102_030405.txt"
        );
    }

    #[test]
    fn text_file_carries_utf8_bytes() {
        let file = text_file("note", "txt", at(2024, 12, 31, 23, 59, 59), "héllo");
        assert_eq!(file.filename, "note_20241231_235959.txt");
        assert_eq!(file.mime, TEXT_MIME);
        assert_eq!(file.bytes, "héllo".as_bytes());
    }
}
