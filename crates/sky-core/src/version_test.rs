use super::*;

#[test]
fn test_parse_simple() {
    let v = Version::parse("001").unwrap();
    assert_eq!(v.as_str(), "001");
    assert_eq!(v.number(), 1);
}

#[test]
fn test_parse_rejects_non_digits() {
    assert!(Version::parse("").is_none());
    assert!(Version::parse("1a").is_none());
    assert!(Version::parse("-1").is_none());
}

#[test]
fn test_parse_rejects_overflow() {
    assert!(Version::parse("99999999999999999999999999").is_none());
}

#[test]
fn test_ordering_is_numeric() {
    let v2 = Version::parse("2").unwrap();
    let v10 = Version::parse("010").unwrap();
    assert!(v2 < v10, "V2 must sort before V010 despite lexical order");
}

#[test]
fn test_ordering_breaks_ties_on_raw() {
    let short = Version::parse("1").unwrap();
    let padded = Version::parse("001").unwrap();
    assert_ne!(short, padded);
    assert_eq!(short.number(), padded.number());
    assert!(padded < short);
}

#[test]
fn test_display_preserves_padding() {
    assert_eq!(Version::parse("007").unwrap().to_string(), "007");
}
