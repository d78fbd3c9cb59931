use thiserror::Error;

/// Maximum number of characters accepted for a single submission
pub const MAX_INPUT_CHARS: usize = 5000;

/// User-input shape violations, reported before any network call
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("入力が空です")]
    Empty,

    #[error("5000文字以内で入力してください")]
    TooLong,

    #[error("Please provide some text or an image of your notes.")]
    MissingContent,
}

/// Check text submitted to the summarize flow.
///
/// Length is counted in Unicode scalar values, so 5000 Japanese characters
/// pass just like 5000 ASCII ones.
pub fn validate_input(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.chars().count() > MAX_INPUT_CHARS {
        return Err(ValidationError::TooLong);
    }
    Ok(())
}

/// Check a submission to the analyze flow, where an image may stand in for text.
///
/// Blank text counts as no text, so an empty submission always gets the
/// analyze flow's own message.
pub fn validate_analysis_input(
    content: &str,
    image_uri: Option<&str>,
) -> Result<(), ValidationError> {
    let has_image = image_uri.is_some_and(|uri| !uri.is_empty());
    if content.trim().is_empty() && !has_image {
        return Err(ValidationError::MissingContent);
    }
    if content.chars().count() > MAX_INPUT_CHARS {
        return Err(ValidationError::TooLong);
    }
    Ok(())
}
