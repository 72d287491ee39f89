/// Errors raised by preset resolution and catalog loading.
///
/// Prompt composition itself never fails; every malformed input there is
/// replaced by a documented default instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Validation(format!("Malformed location catalog: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entity_or_reason() {
        let errors = [
            CoreError::NotFound {
                entity: "generation",
                id: "gen-1".to_string(),
            },
            CoreError::Validation("Unknown tone".to_string()),
        ];
        for err in &errors {
            let message = err.to_string();
            match err {
                CoreError::NotFound { entity, id } => {
                    assert!(message.contains(*entity) && message.contains(id.as_str()));
                }
                CoreError::Validation(reason) => assert!(message.ends_with(reason.as_str())),
            }
        }
    }
}
