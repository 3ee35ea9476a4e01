/// Submission timestamps are recorded in the server's local time zone, the
/// same wall clock the respondents and the sheet's readers share.
pub type Timestamp = chrono::DateTime<chrono::Local>;

/// A single worksheet cell as sent to the spreadsheet API.
pub type CellValue = serde_json::Value;
