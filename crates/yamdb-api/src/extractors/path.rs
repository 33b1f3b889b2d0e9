//! Typed path parameter helpers.

use uuid::Uuid;

use yamdb_core::error::AppError;

/// Parses a resource id from a path segment.
///
/// A segment that is not a UUID cannot address any row, so it is reported
/// as a missing resource.
pub fn parse_id(kind: &str, s: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(s).map_err(|_| AppError::not_found(format!("{kind} {s} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamdb_core::error::ErrorKind;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("Title", &id.to_string()).unwrap(), id);
        assert!(parse_id("Title", "42").unwrap_err().is(ErrorKind::NotFound));
    }
}
