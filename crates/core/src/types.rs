/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Audit timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Flight arrival and shift departure times are airport-local wall-clock
/// values with no zone attached.
pub type LocalDateTime = chrono::NaiveDateTime;

/// Calendar date of a flight arrival.
pub type LocalDate = chrono::NaiveDate;
