use crate::errors::CatalogError;

/// Positional components of a dotted fully-qualified name.
///
/// Parts fill from the right: the last segment is always the table name,
/// then schema, database, connection. Missing leading segments stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FqnParts {
    pub connection: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub table_name: Option<String>,
}

pub fn parse_fqn(fqn: &str) -> Result<FqnParts, CatalogError> {
    if fqn.is_empty() {
        return Err(CatalogError::invalid_input("fqn must not be empty"));
    }
    let parts: Vec<&str> = fqn.split('.').collect();
    let pick = |offset: usize| -> Option<String> {
        if parts.len() >= offset {
            Some(parts[parts.len() - offset].to_string())
        } else {
            None
        }
    };
    Ok(FqnParts {
        connection: pick(4),
        database: pick(3),
        schema: pick(2),
        table_name: pick(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_fqn() {
        let parts = parse_fqn("conn.db.sch.tbl").expect("parse");
        assert_eq!(parts.connection.as_deref(), Some("conn"));
        assert_eq!(parts.database.as_deref(), Some("db"));
        assert_eq!(parts.schema.as_deref(), Some("sch"));
        assert_eq!(parts.table_name.as_deref(), Some("tbl"));
    }

    #[test]
    fn test_parse_bare_table() {
        let parts = parse_fqn("tbl").expect("parse");
        assert_eq!(parts.connection, None);
        assert_eq!(parts.database, None);
        assert_eq!(parts.schema, None);
        assert_eq!(parts.table_name.as_deref(), Some("tbl"));
    }

    #[test]
    fn test_parse_two_segments_fills_schema() {
        let parts = parse_fqn("sch.tbl").expect("parse");
        assert_eq!(parts.connection, None);
        assert_eq!(parts.database, None);
        assert_eq!(parts.schema.as_deref(), Some("sch"));
        assert_eq!(parts.table_name.as_deref(), Some("tbl"));
    }

    #[test]
    fn test_parse_extra_segments_keep_rightmost_four() {
        let parts = parse_fqn("org.conn.db.sch.tbl").expect("parse");
        assert_eq!(parts.connection.as_deref(), Some("conn"));
        assert_eq!(parts.table_name.as_deref(), Some("tbl"));
    }

    #[test]
    fn test_parse_empty_fqn_rejected() {
        let err = parse_fqn("").expect_err("invalid");
        assert!(matches!(err, CatalogError::InvalidInput(_)));
    }
}
