//! Metadata loading tests against a scripted schema source

use pretty_assertions::assert_eq;
use rust_dbmeta::catalog::{MappedType, PrimaryKeyPolicy, TypeMapper};
use rust_dbmeta::error::error_chain;
use rust_dbmeta::{DbMetaError, LoadOptions, MetaLoader, TableMeta};

use crate::common::{fixture_ddl, ScriptedSource};

fn users_source() -> ScriptedSource {
    ScriptedSource::new(&fixture_ddl("shop", "users"))
        .column("id", Some(false), "UNSIGNED INT")
        .column("tenant_id", Some(false), "INT")
        .column("email", Some(false), "VARCHAR")
        .column("display_name", Some(true), "VARCHAR")
        .column("status", Some(false), "ENUM")
        .column("created_at", Some(false), "TIMESTAMP")
        .char_length("email", 255)
        .char_length("display_name", 64)
        .default_value("status", b"'active'")
        .default_value("created_at", b"CURRENT_TIMESTAMP")
}

// ============================================================================
// Column assembly
// ============================================================================

#[test]
fn test_users_columns() {
    let table = MetaLoader::new(users_source()).load("users").unwrap();

    let names: Vec<&str> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["id", "tenant_id", "email", "display_name", "status", "created_at"]
    );

    let id = table.column("id").unwrap();
    assert_eq!(id.index, 0);
    assert_eq!(id.database_type_name, "UNSIGNED INT");
    assert_eq!(id.column_type, "uint");
    assert!(id.is_unsigned);
    assert!(id.is_auto_increment);
    assert!(id.is_primary_key);
    assert_eq!(id.comment, "id field");
    assert_eq!(id.notes, "column is set for unsigned");

    let tenant = table.column("tenant_id").unwrap();
    assert_eq!(tenant.column_type, "int");
    assert!(!tenant.is_unsigned);
    assert!(!tenant.is_primary_key);
    assert_eq!(tenant.notes, "");
}

#[test]
fn test_character_lengths_are_refined() {
    let table = MetaLoader::new(users_source()).load("users").unwrap();
    assert_eq!(table.column("email").unwrap().column_len, Some(255));
    assert_eq!(table.column("display_name").unwrap().column_len, Some(64));
    assert_eq!(table.column("tenant_id").unwrap().column_len, None);
}

#[test]
fn test_failed_length_lookup_keeps_mapped_length() {
    let source = ScriptedSource::new(
        "CREATE TABLE `t` (\n  `code` char(12) NOT NULL,\n  PRIMARY KEY (`code`)\n)",
    )
    .column("code", Some(false), "char(12)");

    let table = MetaLoader::new(source).load("t").unwrap();
    let code = table.column("code").unwrap();
    assert_eq!(code.column_type, "char");
    assert_eq!(code.column_len, Some(12));
}

#[test]
fn test_length_refinement_can_be_disabled() {
    let loader = MetaLoader::new(users_source()).with_options(LoadOptions {
        refine_char_length: false,
        ..Default::default()
    });
    let table = loader.load("users").unwrap();
    assert_eq!(table.column("email").unwrap().column_len, None);
}

#[test]
fn test_defaults_and_comments() {
    let table = MetaLoader::new(users_source()).load("users").unwrap();
    assert_eq!(table.column("status").unwrap().default_value, "active");
    assert_eq!(
        table.column("created_at").unwrap().default_value,
        "CURRENT_TIMESTAMP"
    );
    assert_eq!(table.column("email").unwrap().default_value, "");
    assert_eq!(table.column("display_name").unwrap().comment, "shown in the UI");
    assert_eq!(table.column("status").unwrap().comment, "");
}

#[test]
fn test_unknown_nullability_is_not_null() {
    let source = ScriptedSource::new("CREATE TABLE `t` (\n  `a` int,\n  PRIMARY KEY (`a`)\n)")
        .column("a", None, "INT");
    let table = MetaLoader::new(source).load("t").unwrap();
    assert!(!table.columns[0].nullable);
}

#[test]
fn test_custom_unsigned_prefix() {
    let loader = MetaLoader::new(users_source()).with_options(LoadOptions {
        unsigned_prefix: "unsigned ".to_string(),
        ..Default::default()
    });
    let table = loader.load("users").unwrap();
    assert_eq!(table.column("id").unwrap().column_type, "unsigned int");
}

// ============================================================================
// Keys and indexes
// ============================================================================

#[test]
fn test_unique_indexes_resolve_to_ordinals() {
    let table = MetaLoader::new(users_source()).load("users").unwrap();
    assert_eq!(table.primary_keys, vec![0]);
    assert_eq!(table.unique_indexes["uq_email"], vec![2]);
    assert_eq!(table.unique_indexes["uq_tenant_name"], vec![1, 3]);

    let members: Vec<&str> = table
        .unique_index("uq_tenant_name")
        .unwrap()
        .into_iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(members, vec!["tenant_id", "display_name"]);
}

#[test]
fn test_key_members_missing_from_introspection_are_dropped() {
    // The driver only reports two of the three columns.
    let source = ScriptedSource::new(&fixture_ddl("shop", "order_items"))
        .column("order_id", Some(false), "UNSIGNED BIGINT")
        .column("sku", Some(false), "CHAR");

    let table = MetaLoader::new(source).load("order_items").unwrap();
    assert_eq!(table.primary_keys, vec![0]);
    assert!(table.columns[0].is_primary_key);
    assert!(!table.columns[1].is_primary_key);
}

#[test]
fn test_ordinals_follow_introspection_not_ddl() {
    let source = ScriptedSource::new(&fixture_ddl("shop", "order_items"))
        .column("line_no", Some(false), "UNSIGNED SMALLINT")
        .column("order_id", Some(false), "UNSIGNED BIGINT");

    let table = MetaLoader::new(source).load("order_items").unwrap();
    // PRIMARY KEY (`order_id`,`line_no`) keeps declaration order
    assert_eq!(table.primary_keys, vec![1, 0]);
    assert_eq!(table.columns[0].column_type, "usmallint");
}

#[test]
fn test_fallback_primary_key_on_keyless_table() {
    let source = ScriptedSource::new(&fixture_ddl("shop", "audit_log"))
        .column("happened_at", Some(false), "DATETIME")
        .column("actor", Some(true), "VARCHAR")
        .column("message", Some(true), "TEXT");

    let table = MetaLoader::new(source).load("audit_log").unwrap();
    assert_eq!(table.primary_keys, vec![0]);
    assert!(table.columns[0].is_primary_key);
    assert!(table.columns[0].notes.contains("no primary key"));
    assert!(table.unique_indexes.is_empty());
}

struct LastColumn;

impl PrimaryKeyPolicy for LastColumn {
    fn choose_fallback(&self, mut table: TableMeta) -> TableMeta {
        if let Some(last) = table.columns.last_mut() {
            last.is_primary_key = true;
            table.primary_keys = vec![last.index];
        }
        table
    }
}

#[test]
fn test_custom_fallback_policy() {
    let source = ScriptedSource::new(&fixture_ddl("shop", "audit_log"))
        .column("happened_at", Some(false), "DATETIME")
        .column("actor", Some(true), "VARCHAR")
        .column("message", Some(true), "TEXT");

    let table = MetaLoader::new(source)
        .with_fallback_policy(LastColumn)
        .load("audit_log")
        .unwrap();
    assert_eq!(table.primary_keys, vec![2]);
    assert!(!table.columns[0].is_primary_key);
}

struct Shouting;

impl TypeMapper for Shouting {
    fn map_native_type(&self, native_type: &str) -> MappedType {
        MappedType {
            canonical: native_type.to_ascii_uppercase(),
            length: None,
        }
    }
}

#[test]
fn test_custom_type_mapper() {
    let table = MetaLoader::new(users_source())
        .with_type_mapper(Shouting)
        .load("users")
        .unwrap();
    assert_eq!(table.column("id").unwrap().column_type, "uUNSIGNED INT");
    // Upper-case names are still recognized as character types
    assert_eq!(table.column("email").unwrap().column_len, Some(255));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_table_is_a_fetch_failure() {
    let source = ScriptedSource {
        ddl: None,
        ..Default::default()
    };
    let err = MetaLoader::new(source).load("ghost").unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(
        error_chain(&err),
        "Failed to fetch DDL for table `ghost`: Table 'ghost' doesn't exist"
    );
}

#[test]
fn test_introspection_failure_aborts_before_fetch() {
    let mut source = users_source();
    source.fail_introspection = true;

    let err = MetaLoader::new(source).load("users").unwrap_err();
    assert!(matches!(err, DbMetaError::IntrospectionFailure { .. }));
    assert!(error_chain(&err).contains("SELECT command denied"));
}

#[test]
fn test_loaded_table_keeps_ddl_text() {
    let ddl = fixture_ddl("shop", "users");
    let table = MetaLoader::new(users_source()).load("users").unwrap();
    assert_eq!(table.ddl, ddl);
    assert_eq!(
        table.column("email").unwrap().column_ddl,
        " varchar(255) NOT NULL DEFAULT ''"
    );
}
