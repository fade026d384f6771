mod common;

use query_engine_sql::sql::dialect::Dialect;
use query_engine_sql::sql::string::Param;
use query_engine_translation::translation::query::error::Error;
use similar_asserts::assert_eq;

fn strings(values: &[&str]) -> Vec<Param> {
    values.iter().map(|value| Param::from(*value)).collect()
}

#[tokio::test]
async fn tenant_scoped_listing() {
    let result = common::test_translation("tenant_scoped_listing").await.unwrap();

    assert_eq!(
        result.sql.as_str(),
        " WHERE tenant_id = $1 AND name LIKE $2 AND type = $3 ORDER BY name ASC OFFSET 0 LIMIT 10"
    );
    insta::assert_json_snapshot!(result.params, @r#"
    [
      "6f1c2d9e-tenant",
      "%API%",
      "API"
    ]
    "#);
}

#[tokio::test]
async fn tenant_scoped_listing_filter_only() {
    let result = common::test_filter_translation("tenant_scoped_listing")
        .await
        .unwrap();

    assert_eq!(
        result.sql.as_str(),
        " WHERE tenant_id = $1 AND name LIKE $2 AND type = $3 "
    );
    assert_eq!(result.params, strings(&["6f1c2d9e-tenant", "%API%", "API"]));
}

#[tokio::test]
async fn sort_only() {
    let result = common::test_translation("sort_only").await.unwrap();

    assert_eq!(result.sql.as_str(), " ORDER BY name ASC OFFSET 0 LIMIT 10");
    assert!(result.params.is_empty());
}

#[tokio::test]
async fn sort_only_filter_only() {
    let result = common::test_filter_translation("sort_only").await.unwrap();

    assert_eq!(result.sql.as_str(), " ");
    assert!(result.params.is_empty());
}

#[tokio::test]
async fn multi_column_sort() {
    let result = common::test_translation("multi_column_sort").await.unwrap();

    assert_eq!(
        result.sql.as_str(),
        " ORDER BY created_at DESC, name ASC, id DESC OFFSET 20 LIMIT 10"
    );
}

#[tokio::test]
async fn nested_groups() {
    let result = common::test_translation("nested_groups").await.unwrap();

    assert_eq!(
        result.sql.as_str(),
        " WHERE status <> $1 AND ( name LIKE $2 OR ( deleted_at IS NULL AND ( email LIKE $3 OR phone <> '' OR note NOT LIKE $4 ) ) ) AND nickname = '' AND guardian_id IS NOT NULL OFFSET 0 LIMIT 25"
    );
    assert_eq!(
        result.params,
        strings(&["archived", "Bu%", "%@sekolah.id", "%spam%"])
    );
}

#[tokio::test]
async fn root_or_is_parenthesized_after_a_predicate() {
    let result = common::test_translation("root_or_with_predicate")
        .await
        .unwrap();

    assert_eq!(
        result.sql.as_str(),
        " WHERE tenant_id = $1 AND ( name = $2 OR name = $3 ) OFFSET 0 LIMIT 10"
    );
    assert_eq!(result.params, strings(&["t1", "Budi", "Siti"]));
}

#[tokio::test]
async fn predicate_with_or_is_parenthesized() {
    let result = common::test_translation("predicate_with_or").await.unwrap();

    assert_eq!(
        result.sql.as_str(),
        " WHERE ( owner_id = $1 OR visibility = 'public' ) AND name = $2 OFFSET 0 LIMIT 10"
    );
    insta::assert_json_snapshot!(result.params, @r#"
    [
      42,
      "Budi"
    ]
    "#);
}

#[tokio::test]
async fn predicate_only() {
    let result = common::test_translation("predicate_only").await.unwrap();

    assert_eq!(
        result.sql.as_str(),
        " WHERE tenant_id = $1 AND data ? 'archived' = false OFFSET 10 LIMIT 10"
    );
    assert_eq!(result.params, strings(&["t1"]));
}

#[tokio::test]
async fn flags_disable_clauses() {
    let result = common::test_translation("flags_disable_clauses")
        .await
        .unwrap();

    assert_eq!(result.sql.as_str(), " OFFSET 0 LIMIT 10");
    assert!(result.params.is_empty());
}

#[tokio::test]
async fn typed_values() {
    let result = common::test_translation("typed_values").await.unwrap();

    assert_eq!(
        result.sql.as_str(),
        " WHERE tingkat = $1 AND score <> $2 AND active = $3 AND code LIKE $4 OFFSET 0 LIMIT 10"
    );
    assert_eq!(result.params, strings(&["10", "2.5", "true", "%7%"]));
}

#[tokio::test]
async fn like_wildcards_in_values() {
    let result = common::test_translation("like_wildcards_in_values")
        .await
        .unwrap();

    assert_eq!(result.sql.as_str(), " WHERE code LIKE $1 OFFSET 0 LIMIT 10");
    assert_eq!(result.params, strings(&["50%_off%"]));
}

#[tokio::test]
async fn unbounded_page() {
    let result = common::test_translation("unbounded_page").await.unwrap();

    assert_eq!(result.sql.as_str(), " ORDER BY id ASC OFFSET 20");
}

#[tokio::test]
async fn max_page_size() {
    let result = common::test_translation("max_page_size").await.unwrap();

    assert_eq!(result.sql.as_str(), " OFFSET 0 LIMIT 100");
}

#[tokio::test]
async fn max_page_size_unbounded() {
    let result = common::test_translation("max_page_size_unbounded")
        .await
        .unwrap();

    assert_eq!(result.sql.as_str(), " OFFSET 30 LIMIT 100");
}

mod dialects {
    use super::*;
    use similar_asserts::assert_eq;

    fn expected_params() -> Vec<Param> {
        vec![
            Param::Value(serde_json::json!(7)),
            Param::from("%an%"),
            Param::from("1"),
            Param::from("2"),
        ]
    }

    #[tokio::test]
    async fn mysql() {
        let result = common::test_translation("dialect_mysql").await.unwrap();

        assert_eq!(
            result.sql.as_str(),
            " WHERE sekolah_id = ? AND name LIKE ? AND ( tingkat = ? OR tingkat = ? ) ORDER BY name ASC LIMIT 20 OFFSET 40"
        );
        assert_eq!(result.params, expected_params());
    }

    #[tokio::test]
    async fn sqlite() {
        let result = common::test_translation("dialect_sqlite").await.unwrap();

        assert_eq!(
            result.sql.as_str(),
            " WHERE sekolah_id = ? AND name LIKE ? AND ( tingkat = ? OR tingkat = ? ) ORDER BY name ASC LIMIT 20 OFFSET 40"
        );
        assert_eq!(result.params, expected_params());
    }

    #[tokio::test]
    async fn oracle() {
        let result = common::test_translation("dialect_oracle").await.unwrap();

        assert_eq!(
            result.sql.as_str(),
            " WHERE sekolah_id = :arg1 AND name LIKE :arg2 AND ( tingkat = :arg3 OR tingkat = :arg4 ) ORDER BY name ASC OFFSET 40 ROWS FETCH NEXT 20 ROWS ONLY"
        );
        assert_eq!(result.params, expected_params());
    }

    #[tokio::test]
    async fn sqlserver() {
        let result = common::test_translation("dialect_sqlserver").await.unwrap();

        assert_eq!(
            result.sql.as_str(),
            " WHERE sekolah_id = @p1 AND name LIKE @p2 AND ( tingkat = @p3 OR tingkat = @p4 ) ORDER BY name ASC OFFSET 40 ROWS FETCH NEXT 20 ROWS ONLY"
        );
        assert_eq!(result.params, expected_params());
    }

    #[tokio::test]
    async fn sqlserver_unsorted_page() {
        let result = common::test_translation("sqlserver_unsorted").await.unwrap();

        assert_eq!(
            result.sql.as_str(),
            " WHERE status = @p1 ORDER BY (SELECT NULL) OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(result.params, strings(&["active"]));
    }

    #[tokio::test]
    async fn sqlserver_unsorted_filter_only() {
        let result = common::test_filter_translation("sqlserver_unsorted")
            .await
            .unwrap();

        assert_eq!(result.sql.as_str(), " WHERE status = @p1 ");
    }

    #[tokio::test]
    async fn sqlite_unbounded_first_page() {
        let result = common::test_translation("sqlite_unbounded").await.unwrap();

        assert_eq!(result.sql.as_str(), " ORDER BY id ASC");
    }
}

mod errors {
    use super::*;
    use similar_asserts::assert_eq;

    #[tokio::test]
    async fn unknown_operator() {
        let error = common::test_translation_error("unknown_operator")
            .await
            .unwrap();

        assert_eq!(error, Error::UnsupportedOperator("regexmatch".to_string()));
        insta::assert_snapshot!(error.to_string(), @"Filter operator 'regexmatch' is not supported.");
    }

    #[tokio::test]
    async fn empty_group() {
        let error = common::test_translation_error("empty_group").await.unwrap();

        assert!(matches!(error, Error::MalformedFilterNode(_)));
    }

    #[tokio::test]
    async fn missing_value() {
        let error = common::test_translation_error("missing_value")
            .await
            .unwrap();

        assert_eq!(
            error,
            Error::MissingFilterValue {
                field: "name".to_string(),
                operator: "contains".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn array_value() {
        let error = common::test_translation_error("array_value").await.unwrap();

        assert_eq!(
            error,
            Error::UnsupportedFilterValue {
                field: "name".to_string(),
                value: serde_json::json!(["a", "b"]),
            }
        );
    }

    #[tokio::test]
    async fn placeholder_mismatch() {
        let error = common::test_translation_error("placeholder_mismatch")
            .await
            .unwrap();

        assert_eq!(
            error,
            Error::PlaceholderMismatch {
                placeholders: 2,
                parameters: 1,
            }
        );
    }

    #[tokio::test]
    async fn escaped_question_mark_with_mysql() {
        let error = common::test_translation_error("escaped_question_mysql")
            .await
            .unwrap();

        assert_eq!(error, Error::AmbiguousQuestionMark(Dialect::Mysql));
    }

    #[tokio::test]
    async fn escaped_question_mark_with_sqlite() {
        let error = common::test_translation_error("escaped_question_sqlite")
            .await
            .unwrap();

        assert_eq!(error, Error::AmbiguousQuestionMark(Dialect::Sqlite));
    }
}

mod list {
    use super::*;
    use similar_asserts::assert_eq;

    #[tokio::test]
    async fn list_kelas() {
        let plan = common::test_list_translation("list_kelas", "kelas")
            .await
            .unwrap();

        assert_eq!(plan.collection.as_str(), "kelas");
        assert_eq!(
            plan.rows.sql.as_str(),
            "SELECT created_at AS \"createdAt\", id, nama, tingkat FROM public.kelas WHERE sekolah_id = $1 AND nama LIKE $2 AND ( tingkat = $3 OR tingkat = $4 ) ORDER BY created_at DESC OFFSET 0 LIMIT 10"
        );
        assert_eq!(
            plan.count.sql.as_str(),
            "SELECT count(*) FROM public.kelas WHERE sekolah_id = $1 AND nama LIKE $2 AND ( tingkat = $3 OR tingkat = $4 ) "
        );
        assert_eq!(plan.rows.params, plan.count.params);
        insta::assert_json_snapshot!(plan.rows.params, @r#"
        [
          3,
          "%IPA%",
          "10",
          "11"
        ]
        "#);
    }

    #[tokio::test]
    async fn undeclared_fields_are_rejected() {
        let error = common::test_list_translation("list_unknown_column", "kelas")
            .await
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<Error>(),
            Some(&Error::ColumnNotFoundInTable {
                field: "1=1; DROP TABLE kelas; --".to_string(),
                table: "kelas".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn undeclared_tables_are_rejected() {
        let error = common::test_list_translation("list_kelas", "siswa")
            .await
            .unwrap_err();

        assert_eq!(
            error.downcast_ref::<Error>(),
            Some(&Error::TableNotFound("siswa".to_string()))
        );
    }
}
