//! Field validators used with `#[validate(custom(function = ...))]`.

use std::borrow::Cow;

use validator::ValidationError;

use crate::patch::Patch;

fn blank_error() -> ValidationError {
    ValidationError::new("blank").with_message(Cow::Borrowed("cannot be blank"))
}

/// Reject empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(blank_error());
    }
    Ok(())
}

/// For required columns in a patch: absent is fine, but the field may be
/// neither cleared nor set to a blank string.
pub fn patch_not_blank(value: &Patch<String>) -> Result<(), ValidationError> {
    match value {
        Patch::Absent => Ok(()),
        Patch::Clear => Err(blank_error()),
        Patch::Set(v) => not_blank(v),
    }
}

/// For nullable reference columns in a patch: `null` clears the reference,
/// a supplied value must not be blank.
pub fn patch_reference(value: &Patch<String>) -> Result<(), ValidationError> {
    match value {
        Patch::Set(v) => not_blank(v),
        _ => Ok(()),
    }
}
