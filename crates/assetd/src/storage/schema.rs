//! `SQLite` schema definitions for assetd.

/// SQL statement to create the assets table.
pub const CREATE_ASSETS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS Assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    vendor TEXT,
    warranty_expiry TEXT,
    status TEXT,
    barcode TEXT,
    history TEXT
)
";

/// SQL statement to create an index on barcode for scanner lookups.
///
/// Not unique: duplicate barcodes are left to the operator.
pub const CREATE_BARCODE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_assets_barcode ON Assets(barcode)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// The single insert the intake endpoint performs.
pub const INSERT_ASSET: &str = r"
INSERT INTO Assets (name, vendor, warranty_expiry, status, barcode, history)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_ASSETS_TABLE,
    CREATE_BARCODE_INDEX,
    CREATE_METADATA_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.trim().is_empty());
        }
    }

    #[test]
    fn test_assets_table_has_asset_columns() {
        for column in [
            "name TEXT",
            "vendor TEXT",
            "warranty_expiry TEXT",
            "status TEXT",
            "barcode TEXT",
            "history TEXT",
        ] {
            assert!(CREATE_ASSETS_TABLE.contains(column), "missing {column}");
        }
    }

    #[test]
    fn test_barcode_is_not_unique() {
        assert!(!CREATE_ASSETS_TABLE.contains("UNIQUE"));
        assert!(!CREATE_BARCODE_INDEX.contains("UNIQUE"));
    }

    #[test]
    fn test_insert_binds_six_parameters() {
        assert!(INSERT_ASSET.contains("?6"));
        assert!(!INSERT_ASSET.contains("?7"));
    }
}
