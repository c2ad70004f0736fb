use crate::{Profile, Role, UserMeta};

use uuid::Uuid;

fn meta() -> UserMeta {
    UserMeta {
        id: Uuid::new_v4(),
        email: Some("jo@example.com".to_string()),
        name: Some("Jo".to_string()),
    }
}

#[test]
fn given_meta_when_placeholder_then_role_is_none() {
    let meta = meta();
    let profile = Profile::placeholder(&meta);

    assert_eq!(profile.user_id, meta.id);
    assert_eq!(profile.display_name.as_deref(), Some("Jo"));
    assert!(profile.role.is_none());
    assert!(!profile.is_admin);
    assert!(profile.role_set().is_empty());
    assert!(profile.needs_company_setup());
}

#[test]
fn given_meta_without_name_when_placeholder_then_falls_back_to_email() {
    let mut meta = meta();
    meta.name = None;
    let profile = Profile::placeholder(&meta);

    assert_eq!(profile.display_name.as_deref(), Some("jo@example.com"));
}

#[test]
fn given_meta_when_default_row_then_role_is_staff() {
    let profile = Profile::default_row(&meta());

    assert_eq!(profile.role, Some(Role::Staff));
    assert!(!profile.is_admin);
    assert!(!profile.is_deleted());
}

#[test]
fn given_deleted_at_set_when_is_deleted_then_true() {
    let mut profile = Profile::placeholder(&meta());
    assert!(!profile.is_deleted());

    profile.deleted_at = Some(chrono::Utc::now());
    assert!(profile.is_deleted());
}

#[test]
fn given_same_profile_when_role_set_derived_twice_then_sets_are_equal() {
    let mut profile = Profile::default_row(&meta());
    profile.role = Some(Role::Cashier);
    profile.is_admin = true;

    let first = profile.role_set();
    let second = profile.role_set();

    assert_eq!(first, second);
    assert!(first.is_admin());
    assert!(first.has(Role::Cashier));
    assert!(!first.has(Role::Warehouse));
}
