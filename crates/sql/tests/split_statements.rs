use slipway_sql::{split_statements, StatementParser, StatementSplitter};

#[test]
fn splits_plpgsql_do_block_as_single_statement() {
    let sql = r#"
DO $$
BEGIN
    RAISE NOTICE 'hello; world';
END $$;
"#;
    let parser = StatementSplitter::new();
    let stmts = parser.parse_statements(sql);
    assert_eq!(stmts.len(), 1);
    assert!(stmts[0].sql.contains("RAISE NOTICE 'hello; world';"));
}

#[test]
fn string_with_semicolon_and_escaped_quote_is_one_statement() {
    let stmts = split_statements("INSERT INTO t VALUES ('a;b''c');");
    assert_eq!(stmts.len(), 1);
    assert_eq!(stmts[0].sql, "INSERT INTO t VALUES ('a;b''c')");
}

#[test]
fn function_definition_with_inner_semicolons_is_one_statement() {
    let sql = "CREATE FUNCTION f() RETURNS void AS $$ BEGIN RAISE NOTICE 'x;y'; END; $$ LANGUAGE plpgsql;";
    let stmts = split_statements(sql);
    assert_eq!(stmts.len(), 1);
    assert_eq!(stmts[0].ordinal, 1);
}

#[test]
fn realistic_schema_script() {
    let sql = r#"
-- users and their posts
CREATE TABLE IF NOT EXISTS public.users (
    id serial PRIMARY KEY,
    name text NOT NULL DEFAULT 'anonymous; unnamed'
);

/* posts reference users; keep ordering */
CREATE TABLE posts (
    id serial PRIMARY KEY,
    user_id int REFERENCES users(id),
    "body;text" text
);

CREATE OR REPLACE FUNCTION touch() RETURNS trigger AS $fn$
BEGIN
    NEW.body := NEW.body || ';';
    RETURN NEW;
END;
$fn$ LANGUAGE plpgsql;

INSERT INTO users (name) VALUES ('O''Brien'), ('semi;colon');
INSERT INTO posts (user_id) VALUES (1)
"#;

    let stmts = split_statements(sql);
    let heads: Vec<&str> = stmts
        .iter()
        .map(|s| s.sql.split_whitespace().next().unwrap_or(""))
        .collect();

    assert_eq!(heads, vec!["CREATE", "CREATE", "CREATE", "INSERT", "INSERT"]);
    assert!(stmts[0].sql.starts_with("CREATE TABLE IF NOT EXISTS public.users"));
    assert!(stmts[2].sql.ends_with("$fn$ LANGUAGE plpgsql"));
    assert!(stmts[3].sql.contains("('O''Brien'), ('semi;colon')"));
    assert_eq!(stmts[4].ordinal, 5);
}

#[test]
fn comments_before_a_statement_do_not_hide_its_keyword() {
    let stmts = split_statements("-- seed data\nINSERT INTO t VALUES (1);");
    assert_eq!(stmts[0].sql, "INSERT INTO t VALUES (1)");
}
