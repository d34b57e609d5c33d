use crate::cli::utils::*;

#[test]
fn test_truncate_with_ellipsis_short_string() {
    assert_eq!(truncate_with_ellipsis("Bonn", 10), "Bonn");
}

#[test]
fn test_truncate_with_ellipsis_exact_length() {
    assert_eq!(truncate_with_ellipsis("Bonn", 4), "Bonn");
}

#[test]
fn test_truncate_with_ellipsis_long_string() {
    let result = truncate_with_ellipsis("Unwetterwarnung vor Gewitter mit Starkregen", 12);
    assert_eq!(result, "Unwetterw...");
}

#[test]
fn test_truncate_with_ellipsis_unicode() {
    // Counts characters, not bytes
    assert_eq!(truncate_with_ellipsis("Glätte in München", 17), "Glätte in München");
    assert_eq!(truncate_with_ellipsis("Glätte in München", 9), "Glätte...");
}

#[test]
fn test_truncate_with_ellipsis_tiny_max() {
    assert_eq!(truncate_with_ellipsis("Hochwasser", 2), "...");
}

#[test]
fn test_or_dash() {
    assert_eq!(or_dash(Some("Severe")), "Severe");
    assert_eq!(or_dash(Some("")), "-");
    assert_eq!(or_dash(None), "-");
}
