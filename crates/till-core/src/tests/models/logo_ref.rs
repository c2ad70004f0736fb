use crate::LogoRef;

#[test]
fn given_absolute_url_when_parsed_then_returns_url_variant() {
    let parsed = LogoRef::parse("https://cdn.example.com/logo.png");
    assert_eq!(
        parsed,
        LogoRef::Url("https://cdn.example.com/logo.png".to_string())
    );
}

#[test]
fn given_storage_path_when_parsed_then_returns_storage_variant() {
    let parsed = LogoRef::parse("company-logos/acme.png");
    assert_eq!(
        parsed,
        LogoRef::StoragePath("company-logos/acme.png".to_string())
    );
}

#[test]
fn given_leading_slash_path_when_parsed_then_slash_is_stripped() {
    let parsed = LogoRef::parse("/company-logos/acme.png");
    assert_eq!(
        parsed,
        LogoRef::StoragePath("company-logos/acme.png".to_string())
    );
}
