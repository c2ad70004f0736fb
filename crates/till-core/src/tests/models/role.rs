use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::Cashier.as_str(), "cashier");
    assert_eq!(Role::Warehouse.as_str(), "warehouse");
    assert_eq!(Role::Staff.as_str(), "staff");
}

#[test]
fn test_role_from_str() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("warehouse").unwrap(), Role::Warehouse);
    assert!(Role::from_str("manager").is_err());
    assert!(Role::from_str("").is_err());
}

#[test]
fn test_role_serde_snake_case() {
    let json = serde_json::to_string(&Role::Cashier).unwrap();
    assert_eq!(json, "\"cashier\"");
    let back: Role = serde_json::from_str("\"staff\"").unwrap();
    assert_eq!(back, Role::Staff);
}
