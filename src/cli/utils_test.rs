use crate::cli::utils::*;

#[test]
fn test_truncate_with_ellipsis_short_string() {
    let result = truncate_with_ellipsis("hello", 10);
    assert_eq!(result, "hello");
}

#[test]
fn test_truncate_with_ellipsis_long_string() {
    let result = truncate_with_ellipsis("Full-day speedboat tour to Phi Phi Islands", 10);
    assert_eq!(result, "Full-da...");
}

#[test]
fn test_truncate_with_ellipsis_unicode() {
    let result = truncate_with_ellipsis("Phuket 海滩", 9);
    assert_eq!(result, "Phuket 海滩");

    let result = truncate_with_ellipsis("Phuket 海滩", 8);
    assert_eq!(result, "Phuke...");
}

#[test]
fn test_format_minutes() {
    assert_eq!(format_minutes(None), "-");
    assert_eq!(format_minutes(Some(45)), "45m");
    assert_eq!(format_minutes(Some(120)), "2h");
    assert_eq!(format_minutes(Some(90)), "1h 30m");
}

#[test]
fn test_format_price() {
    assert_eq!(format_price(None), "-");
    assert_eq!(format_price(Some(0.0)), "free");
    assert_eq!(format_price(Some(25.0)), "25.00");
}
