/// Suffix of the analyzed companion field of a match-query column.
pub const MATCH_FIELD_SUFFIX: &str = "_match";

/// Name of the analyzed companion field for `field`.
///
/// The name only depends on `field`, so repeated installs always target the
/// same companion field.
pub fn match_field_name(field: &str) -> String {
    format!("{field}{MATCH_FIELD_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_suffix() {
        assert_eq!(match_field_name("endpoint_name"), "endpoint_name_match");
    }

    #[test]
    fn stable() {
        assert_eq!(match_field_name("content"), match_field_name("content"));
    }
}
