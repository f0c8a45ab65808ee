// ⚠️ Error Taxonomy - input validation and calendar conversion failures
//
// Engines are total over their closed enums, so the only ways an analysis can
// fail are bad caller input or a calendar conversion the collaborator rejects.

use thiserror::Error;

/// Result type alias for chart operations
pub type Result<T> = std::result::Result<T, SajuError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SajuError {
    /// Birth date missing or not `YYYY-MM-DD`
    #[error("invalid birth date `{value}`: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Lunar date components out of range (month 1-12, day 1-30)
    #[error("invalid lunar date `{value}`: expected YYYY-MM-DD with month 1-12 and day 1-30")]
    InvalidLunarDate { value: String },

    #[error("gender is required")]
    MissingGender,

    #[error("unknown gender `{value}`: expected male or female")]
    InvalidGender { value: String },

    #[error("unknown time slot `{value}`")]
    InvalidTimeSlot { value: String },

    #[error("unknown stem `{value}`")]
    InvalidStem { value: String },

    /// Reference year too far from the birth year to count an age
    #[error("reference year {year} is out of range")]
    InvalidReferenceYear { year: i32 },

    /// Date arithmetic left the range chrono can represent
    #[error("date {date} is outside the supported range")]
    OutOfRange { date: String },

    /// The calendar collaborator rejected a conversion
    #[error("calendar conversion failed: {message}")]
    Conversion { message: String },
}

impl SajuError {
    pub fn conversion(message: impl Into<String>) -> Self {
        SajuError::Conversion {
            message: message.into(),
        }
    }

    /// True for every variant caused by malformed caller input
    pub fn is_input_error(&self) -> bool {
        !self.is_conversion_error()
    }

    pub fn is_conversion_error(&self) -> bool {
        matches!(self, SajuError::Conversion { .. })
    }
}
