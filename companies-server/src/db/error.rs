//! Persistence error type

/// Database error type
///
/// Every store-level failure (constraint violation, I/O, lost connection,
/// undecodable row) is wrapped here with a short description of the
/// operation that failed. The message always ends with the underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{context}: {source}")]
    Persistence {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    pub fn persistence(context: &'static str, source: sqlx::Error) -> Self {
        Self::Persistence { context, source }
    }

    /// Closure form for `map_err`.
    pub(crate) fn during(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::persistence(context, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_cause() {
        let err = DbError::persistence("failed to register company", sqlx::Error::RowNotFound);
        let message = err.to_string();
        assert!(message.starts_with("failed to register company: "));
        assert!(message.len() > "failed to register company: ".len());
    }
}
