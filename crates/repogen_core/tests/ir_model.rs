use repogen_core::ir::QueryModel;
use repogen_core::schema::extract_schema;

const USER_DECL: &str = r#"
/// User user
pub struct User {
    #[column("id")]
    pub id: i64,
    #[column("name")]
    pub name: String,
    #[column("password")]
    pub password: String,
    #[column("created_at")]
    pub created_at: i64,
}
"#;

fn user_model() -> QueryModel {
    let schema = extract_schema(USER_DECL, "User").unwrap().unwrap();
    QueryModel::from_schema(&schema)
}

#[test]
fn select_base_qualifies_the_primary_key_with_the_table_name() {
    assert_eq!(
        user_model().select_base,
        "select user.id,name,password,created_at from user"
    );
}

#[test]
fn statement_bases_are_fixed_by_the_schema() {
    let model = user_model();
    assert_eq!(model.delete_base, "delete from user");
    assert_eq!(model.update_base, "update user set");
    assert_eq!(
        model.insert_base,
        "insert into user(name,password,created_at)"
    );
}

#[test]
fn placeholder_lists_cover_full_and_creatable_column_counts() {
    let model = user_model();
    assert_eq!(model.placeholders, "?,?,?,?");
    assert_eq!(model.create_placeholders, "?,?,?");
}

#[test]
fn creatable_fields_exclude_the_primary_key() {
    let model = user_model();
    assert_eq!(model.primary_key().column, "id");
    let creatable: Vec<&str> = model
        .creatable_fields()
        .iter()
        .map(|field| field.column.as_str())
        .collect();
    assert_eq!(creatable, vec!["name", "password", "created_at"]);
}

#[test]
fn scan_targets_follow_select_column_order() {
    assert_eq!(
        user_model().scan_targets(),
        vec!["id", "name", "password", "created_at"]
    );
}
