//! End-to-end inspection of DDL files on disk

use pretty_assertions::assert_eq;
use rust_dbmeta::report::{render_json, render_text};
use rust_dbmeta::{inspect, InspectOptions, LoadOptions, TableMeta};

use crate::common::{fixture_path, TestContext};

const SIMPLE_DDL: &str = "CREATE TABLE `simple` (
  `id` int(11) NOT NULL,
  `label` varchar(32) DEFAULT 'none',
  PRIMARY KEY (`id`)
) ENGINE=InnoDB";

fn options(input: impl Into<std::path::PathBuf>) -> InspectOptions {
    InspectOptions {
        input_path: input.into(),
        include: None,
        load: LoadOptions::default(),
    }
}

fn table<'a>(tables: &'a [TableMeta], name: &str) -> &'a TableMeta {
    tables
        .iter()
        .find(|t| t.table_name == name)
        .unwrap_or_else(|| panic!("table {} not loaded", name))
}

// ============================================================================
// Fixture directory
// ============================================================================

#[test]
fn test_inspect_shop_fixture() {
    let tables = inspect(&options(fixture_path("shop"))).unwrap();

    let names: Vec<&str> = tables.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["audit_log", "order_items", "users"]);
}

#[test]
fn test_users_from_ddl_alone() {
    let tables = inspect(&options(fixture_path("shop"))).unwrap();
    let users = table(&tables, "users");

    let id = users.column("id").unwrap();
    assert_eq!(id.database_type_name, "int(10)");
    assert_eq!(id.column_type, "uint");
    assert_eq!(id.column_len, Some(10));
    assert!(id.is_auto_increment);
    assert!(!id.nullable);

    // No database to ask, so the declared length is kept
    assert_eq!(users.column("email").unwrap().column_len, Some(255));
    assert_eq!(users.column("status").unwrap().default_value, "active");
    assert_eq!(
        users.column("created_at").unwrap().default_value,
        "CURRENT_TIMESTAMP"
    );
    assert!(users.column("display_name").unwrap().nullable);

    assert_eq!(users.primary_keys, vec![0]);
    assert_eq!(users.unique_indexes["uq_tenant_name"], vec![1, 3]);
    assert!(!users.unique_indexes.contains_key("idx_created"));
}

#[test]
fn test_order_items_composite_key() {
    let tables = inspect(&options(fixture_path("shop"))).unwrap();
    let items = table(&tables, "order_items");

    assert_eq!(items.primary_keys, vec![0, 1]);
    assert_eq!(items.column("order_id").unwrap().column_type, "ubigint");
    assert_eq!(items.column("line_no").unwrap().column_type, "usmallint");
    assert_eq!(items.column("sku").unwrap().column_len, Some(12));
    assert_eq!(items.column("qty").unwrap().default_value, "1");
    assert_eq!(items.column("price").unwrap().default_value, "0.00");
    assert!(items.unique_indexes.is_empty());
}

#[test]
fn test_keyless_table_gets_fallback() {
    let tables = inspect(&options(fixture_path("shop"))).unwrap();
    let log = table(&tables, "audit_log");

    assert_eq!(log.primary_keys, vec![0]);
    assert_eq!(log.columns[0].name, "happened_at");
    assert!(log.columns[0].notes.contains("no primary key"));
}

#[test]
fn test_fallback_disabled() {
    let mut opts = options(fixture_path("shop"));
    opts.load.apply_fallback_primary_key = false;

    let tables = inspect(&opts).unwrap();
    assert!(table(&tables, "audit_log").primary_keys.is_empty());
}

#[test]
fn test_include_glob() {
    let mut opts = options(fixture_path("shop"));
    opts.include = Some("u*.sql".to_string());

    let tables = inspect(&opts).unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].table_name, "users");
}

// ============================================================================
// Ad-hoc files
// ============================================================================

#[test]
fn test_single_file_input() {
    let ctx = TestContext::new();
    let path = ctx.write("simple.sql", SIMPLE_DDL);

    let tables = inspect(&options(path)).unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].column("label").unwrap().default_value, "none");
}

#[test]
fn test_file_stem_names_table_without_create_line() {
    let ctx = TestContext::new();
    ctx.write("legacy.sql", "  `code` char(4) NOT NULL,\n  PRIMARY KEY (`code`)\n");

    let tables = inspect(&options(ctx.path())).unwrap();
    assert_eq!(tables[0].table_name, "legacy");
    assert_eq!(tables[0].primary_keys, vec![0]);
}

#[test]
fn test_bom_prefixed_file() {
    let ctx = TestContext::new();
    ctx.write("simple.sql", format!("\u{FEFF}{}", SIMPLE_DDL));

    let tables = inspect(&options(ctx.path())).unwrap();
    assert_eq!(tables[0].table_name, "simple");
}

#[test]
fn test_nested_directories() {
    let ctx = TestContext::new();
    ctx.write("a/simple.sql", SIMPLE_DDL);
    ctx.write(
        "b/other.sql",
        "CREATE TABLE `other` (\n  `k` int NOT NULL,\n  PRIMARY KEY (`k`)\n)",
    );

    let tables = inspect(&options(ctx.path())).unwrap();
    let names: Vec<&str> = tables.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["simple", "other"]);
}

#[test]
fn test_duplicate_table_is_an_error() {
    let ctx = TestContext::new();
    ctx.write("one.sql", SIMPLE_DDL);
    ctx.write("two.sql", SIMPLE_DDL);

    let err = inspect(&options(ctx.path())).unwrap_err();
    assert!(err.to_string().contains("more than one file"));
}

#[test]
fn test_empty_directory_is_an_error() {
    let ctx = TestContext::new();
    ctx.write("readme.txt", "nothing here");

    let err = inspect(&options(ctx.path())).unwrap_err();
    assert!(err.to_string().contains("No .sql files"));
}

#[test]
fn test_unreadable_column_fails_its_table() {
    let ctx = TestContext::new();
    ctx.write("broken.sql", "CREATE TABLE `broken` (\n  `a`,\n  PRIMARY KEY (`a`)\n)");

    let err = inspect(&options(ctx.path())).unwrap_err();
    let rendered = format!("{:#}", err);
    assert!(rendered.contains("while inspecting table `broken`"));
    assert!(rendered.contains("Failed to introspect columns"));
}

// ============================================================================
// Reports
// ============================================================================

#[test]
fn test_json_report_of_fixture() {
    let tables = inspect(&options(fixture_path("shop"))).unwrap();
    let json = render_json(&tables).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value.as_array().unwrap().len(), 3);
    assert_eq!(value[1]["table"], "order_items");
    assert_eq!(
        value[1]["primary_key"],
        serde_json::json!(["order_id", "line_no"])
    );
    assert_eq!(
        value[2]["unique_indexes"]["uq_tenant_name"],
        serde_json::json!(["tenant_id", "display_name"])
    );
    assert_eq!(value[2]["columns"][0]["column_type"], "uint");
}

#[test]
fn test_text_report_of_fixture() {
    let tables = inspect(&options(fixture_path("shop"))).unwrap();
    let text = render_text(table(&tables, "users"));

    assert!(text.contains("=== Table `users` ==="));
    assert!(text.contains("Columns (6):"));
    assert!(text.contains("Primary key: (id)"));
    assert!(text.contains("  uq_email (email)"));
    assert!(text.contains("-- shown in the UI"));
}
