use rusqlite::Connection;

use crate::errors::CatalogError;

/// Scoped write transaction: `BEGIN IMMEDIATE` on construction, rollback on
/// drop unless explicitly committed. Every mutation acts as of the single
/// commit point; an abandoned operation leaves no partial state.
pub(crate) struct TransactionGuard<'a> {
    conn: &'a Connection,
    committed: bool,
}

impl<'a> TransactionGuard<'a> {
    pub fn begin(conn: &'a Connection) -> Result<Self, CatalogError> {
        conn.execute_batch("BEGIN IMMEDIATE")
            .map_err(|e| CatalogError::transaction(e.to_string()))?;
        Ok(Self {
            conn,
            committed: false,
        })
    }

    pub fn conn(&self) -> &Connection {
        self.conn
    }

    pub fn commit(mut self) -> Result<(), CatalogError> {
        self.conn
            .execute_batch("COMMIT")
            .map_err(|e| CatalogError::transaction(e.to_string()))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        if !self.committed {
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
