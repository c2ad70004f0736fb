use crate::snapshot::SessionSnapshot;

use till_core::{Profile, Role, UserMeta};
use uuid::Uuid;

fn meta() -> UserMeta {
    UserMeta {
        id: Uuid::new_v4(),
        email: Some("pat@example.com".to_string()),
        name: Some("Pat".to_string()),
    }
}

#[test]
fn given_default_snapshot_then_it_reads_as_signed_out() {
    let snapshot = SessionSnapshot::default();

    assert!(!snapshot.is_signed_in());
    assert!(!snapshot.loading);
    assert!(snapshot.profile.is_none());
    assert!(snapshot.roles.is_empty());
}

#[test]
fn given_profile_with_company_when_applied_then_setup_flag_is_clear() {
    let mut snapshot = SessionSnapshot::default();
    let mut profile = Profile::default_row(&meta());
    profile.company_id = Some(Uuid::new_v4());

    snapshot.apply_profile(profile);

    assert!(!snapshot.needs_company_setup);
    assert!(snapshot.roles.has(Role::Staff));
}

#[test]
fn given_profile_without_company_when_applied_then_setup_flag_is_set() {
    let mut snapshot = SessionSnapshot::default();

    snapshot.apply_profile(Profile::default_row(&meta()));

    assert!(snapshot.needs_company_setup);
}

#[test]
fn given_placeholder_profile_when_applied_then_role_set_is_empty() {
    let mut snapshot = SessionSnapshot::default();

    snapshot.apply_profile(Profile::placeholder(&meta()));

    assert!(snapshot.roles.is_empty());
    assert!(!snapshot.roles.is_admin());
}
