/// Request data rejected before it reaches the store.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for CoreError {
    /// Flatten field errors into `field: message` pairs, sorted by field name
    /// so the output is stable.
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{field}: {msg}")
                })
            })
            .collect();
        messages.sort();
        CoreError::Validation(messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::not_blank;

    #[test]
    fn validation_errors_flatten_to_field_messages() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("name", not_blank("").unwrap_err());
        errors.add("category_id", not_blank(" ").unwrap_err());

        let core: CoreError = errors.into();
        let CoreError::Validation(msg) = &core;
        assert_eq!(msg, "category_id: cannot be blank; name: cannot be blank");
        assert!(core.to_string().starts_with("Validation failed: "));
    }
}
