//! Column sets as consumed by INSERT/UPDATE statement builders.

use pgcolumns::prelude::*;
use pgcolumns::{Layered, escape_identifier};
use serde_json::{Map, Value, json};

// ── Minimal statement builders ───────────────────────────────────────────────

fn insert_sql(cs: &ColumnSet) -> String {
    let table = cs.table().map(TableName::name).unwrap_or("\"_\"");
    format!("insert into {table}({}) values({})", cs.names(), cs.variables())
}

fn update_sql(cs: &ColumnSet) -> String {
    let table = cs.table().map(TableName::name).unwrap_or("\"_\"");
    format!("update {table} set {}", cs.updates())
}

fn now(_: Option<&Value>, _: &dyn Record) -> Value {
    json!("2024-01-01T00:00:00Z")
}

fn users() -> ColumnSet {
    ColumnSet::new(
        [
            ColumnDescriptor::new("id"),
            ColumnDescriptor::new("login").prop("userLogin"),
            ColumnDescriptor::new("active").def(true),
            ColumnDescriptor::new("tags").format_mod(FormatMod::Csv),
            ColumnDescriptor::new("created_at").cast("timestamptz").init(now),
        ],
        ColumnSetOptions::new().with_table(TableName::with_schema("app", "users").unwrap()),
    )
    .unwrap()
}

// ── Fragments ───────────────────────────────────────────────────────────────

#[test]
fn insert_fragments() {
    assert_eq!(
        insert_sql(&users()),
        r#"insert into "app"."users"("id","login","active","tags","created_at") values(${id},${userLogin},${active},${tags:csv},${created_at}::timestamptz)"#
    );
}

#[test]
fn update_fragments() {
    assert_eq!(
        update_sql(&users()),
        r#"update "app"."users" set "id"=${id},"login"=${userLogin},"active"=${active},"tags"=${tags:csv},"created_at"=${created_at}::timestamptz"#
    );
}

#[test]
fn names_match_escaped_input() {
    let input = ["a", "B", "c_d", "e$"];
    let cs = ColumnSet::new(input, ColumnSetOptions::default()).unwrap();
    let expected: Vec<String> = input.iter().map(|n| escape_identifier(n)).collect();
    assert_eq!(cs.names(), expected.join(","));
    assert_eq!(cs.columns().len(), input.len());
}

// ── Row preparation ─────────────────────────────────────────────────────────

#[test]
fn prepare_many_rows_with_one_set() {
    let cs = users();
    let rows = [
        json!({ "id": 1, "userLogin": "ada", "tags": ["a"] }),
        json!({ "id": 2, "userLogin": "bob", "active": false }),
    ];
    let prepared: Vec<Map<String, Value>> = rows.iter().map(|r| cs.prepare(r)).collect();

    assert_eq!(
        Value::Object(prepared[0].clone()),
        json!({
            "id": 1,
            "userLogin": "ada",
            "active": true,
            "tags": ["a"],
            "created_at": "2024-01-01T00:00:00Z"
        })
    );
    assert_eq!(prepared[1]["active"], json!(false));
    assert!(!prepared[1].contains_key("tags"));
}

#[test]
fn prepare_output_follows_column_order() {
    let cs = ColumnSet::new(["z", "a", "m"], ColumnSetOptions::default()).unwrap();
    let out = cs.prepare(&json!({ "a": 1, "m": 2, "z": 3 }));
    let keys: Vec<&str> = out.keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn shape_from_template_row() {
    let defaults = json!({ "status": "new" });
    let template = Layered::new(json!({ "id": 0, "title": "" }), &defaults);

    let cs = ColumnSet::from_record(&template, ColumnSetOptions::new().with_inherit(true)).unwrap();
    assert_eq!(cs.names(), r#""id","title","status""#);

    let row = Layered::new(json!({ "id": 5, "title": "hello" }), &defaults);
    assert_eq!(
        Value::Object(cs.prepare(&row)),
        json!({ "id": 5, "title": "hello", "status": "new" })
    );
}

#[test]
fn dynamic_definition_round_trip() {
    let cs = ColumnSet::from_value(
        &json!([
            "id",
            { "name": "body", "mod": ":json", "cast": "::jsonb" },
            { "name": "score", "def": null }
        ]),
        &json!({ "table": "posts" }),
    )
    .unwrap();
    assert_eq!(cs.variables(), "${id},${body:json}::jsonb,${score}");
    assert_eq!(
        Value::Object(cs.prepare(&json!({ "id": 3 }))),
        json!({ "id": 3, "score": null })
    );
}

#[test]
fn shared_across_threads() {
    let cs = std::sync::Arc::new(users());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let cs = cs.clone();
            std::thread::spawn(move || cs.prepare(&json!({ "id": i })))
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        let out = h.join().unwrap();
        assert_eq!(out["id"], json!(i));
        assert_eq!(out["active"], json!(true));
    }
}

// ── Rendering ───────────────────────────────────────────────────────────────

#[test]
fn render_nested_level() {
    let cs = ColumnSet::new(["id"], ColumnSetOptions::default()).unwrap();
    assert_eq!(
        cs.render(1),
        [
            "ColumnSet {",
            "        columns: [",
            "            Column {",
            "                name: \"id\"",
            "            }",
            "        ]",
            "    }",
        ]
        .join("\n")
    );
}
