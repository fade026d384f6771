use bytes::BytesMut;
use query_engine_execution::params::{text_params, TextParam};
use query_engine_execution::query::{rows_statement, ListResponse};
use query_engine_sql::sql::dialect::Dialect;
use query_engine_sql::sql::string::{Param, SQL};
use similar_asserts::assert_eq;
use tokio_postgres::types::{Format, IsNull, ToSql, Type};

#[test]
fn list_response_has_the_grid_shape() {
    let response = ListResponse {
        data: vec![serde_json::json!({ "id": 1, "nama": "X IPA 1" })],
        total: 41,
    };

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({ "data": [{ "id": 1, "nama": "X IPA 1" }], "total": 41 })
    );
    assert_eq!(
        serde_json::from_slice::<ListResponse>(&response.to_bytes().unwrap()).unwrap(),
        response
    );
}

#[test]
fn the_page_is_aggregated_into_one_array() {
    let mut rows = SQL::new(Dialect::Postgres);
    rows.append_syntax("SELECT id, nama FROM kelas ORDER BY nama DESC OFFSET 0 LIMIT 10");

    assert_eq!(
        rows_statement(&rows).as_str(),
        "SELECT coalesce(json_agg(row_to_json(grid_rows)), '[]') FROM (SELECT id, nama FROM kelas ORDER BY nama DESC OFFSET 0 LIMIT 10) AS grid_rows"
    );
}

#[test]
fn params_are_sent_as_text() {
    let params = vec![
        Param::from("%API%"),
        Param::Value(serde_json::json!(42)),
        Param::Value(serde_json::Value::Null),
    ];
    let text = text_params(&params);

    let mut out = BytesMut::new();
    assert!(matches!(
        text[0].to_sql(&Type::TEXT, &mut out).unwrap(),
        IsNull::No
    ));
    assert_eq!(&out[..], b"%API%");

    let mut out = BytesMut::new();
    assert!(matches!(
        text[1].to_sql(&Type::INT8, &mut out).unwrap(),
        IsNull::No
    ));
    assert_eq!(&out[..], b"42");

    let mut out = BytesMut::new();
    assert!(matches!(
        text[2].to_sql(&Type::UUID, &mut out).unwrap(),
        IsNull::Yes
    ));
    assert!(out.is_empty());
}

#[test]
fn text_params_accept_every_type() {
    assert!(<TextParam as ToSql>::accepts(&Type::INT4));
    assert!(<TextParam as ToSql>::accepts(&Type::TIMESTAMPTZ));
    assert!(matches!(
        TextParam(None).encode_format(&Type::BOOL),
        Format::Text
    ));
}

/// Needs a database: `GRID_QUERY_CONNECTION_URI=postgresql://... cargo test -- --ignored`
#[tokio::test]
#[ignore]
async fn lists_a_page_and_counts_every_match() {
    use query_engine_metadata::metadata::{ColumnInfo, Metadata, TableInfo, TablesInfo};
    use query_engine_models::{Filter, FilterNode, Logic, QueryDescription, SortSpec};
    use query_engine_sql::sql::ast::RawPredicate;
    use query_engine_translation::translation::query::helpers::Env;
    use query_engine_translation::translation::query::list::translate_list;

    let connection_uri = std::env::var("GRID_QUERY_CONNECTION_URI").unwrap();
    let mut client = query_engine_execution::connection::connect(&connection_uri)
        .await
        .unwrap();

    client
        .batch_execute(
            "CREATE TEMPORARY TABLE kelas (id int, sekolah_id int, nama text, tingkat int);
             INSERT INTO kelas VALUES
               (1, 1, 'X IPA 1', 10), (2, 1, 'X IPA 2', 10), (3, 1, 'XI IPS 1', 11),
               (4, 1, 'XII IPA 1', 12), (5, 2, 'X IPA 1', 10);",
        )
        .await
        .unwrap();

    let metadata = Metadata {
        tables: TablesInfo(
            [(
                "kelas".to_string(),
                TableInfo::new(
                    "",
                    "kelas",
                    ["id", "nama", "tingkat"]
                        .map(|column| (column.to_string(), ColumnInfo::new(column))),
                ),
            )]
            .into(),
        ),
    };
    let description = QueryDescription::paged(0, 2)
        .with_sort(vec![SortSpec::asc("id")])
        .with_filter(Filter::new(
            Logic::And,
            vec![
                FilterNode::leaf("nama", "contains", "IPA"),
                FilterNode::group(
                    Logic::Or,
                    vec![
                        FilterNode::leaf("tingkat", "eq", 10),
                        FilterNode::leaf("tingkat", "eq", 12),
                    ],
                ),
            ],
        ));
    let predicate = RawPredicate::new("sekolah_id = ?", vec![Param::Value(serde_json::json!(1))]);

    let plan = translate_list(
        &Env::default(),
        &metadata,
        "kelas",
        &description,
        Some(&predicate),
    )
    .unwrap();
    let response = query_engine_execution::query::execute_list(&mut client, &plan)
        .await
        .unwrap();

    assert_eq!(response.total, 3);
    assert_eq!(
        response.data,
        vec![
            serde_json::json!({ "id": 1, "nama": "X IPA 1", "tingkat": 10 }),
            serde_json::json!({ "id": 2, "nama": "X IPA 2", "tingkat": 10 }),
        ]
    );
}
