use super::ColumnType;
use crate::Result;

use std::fmt;

/// Backend field types produced for model columns.
///
/// Live mappings may contain field types this enum does not list (`date`,
/// `object`, ...); those are kept as plain strings in [`FieldDef`] and only
/// ever compared, never produced.
///
/// [`FieldDef`]: super::FieldDef
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Integer,
    Long,
    Double,
    Boolean,
    Keyword,
    Text,
    Binary,
}

impl FieldType {
    /// Maps a logical column type to the backend field type.
    ///
    /// `hint` is the column's generic type and is only consulted for lists,
    /// which map to the type of their element: the backend has no list type,
    /// every field accepts an array of its values.
    pub fn from_column(ty: &ColumnType, hint: Option<&ColumnType>) -> Result<FieldType> {
        match ty {
            ColumnType::Int | ColumnType::Enum => Ok(FieldType::Integer),
            ColumnType::Long => Ok(FieldType::Long),
            ColumnType::Double => Ok(FieldType::Double),
            ColumnType::Bool => Ok(FieldType::Boolean),
            ColumnType::String => Ok(FieldType::Keyword),
            ColumnType::Json | ColumnType::Complex => Ok(FieldType::Text),
            ColumnType::Bytes => Ok(FieldType::Binary),
            ColumnType::List => match hint {
                Some(ColumnType::List) => Err(crate::Error::invalid_schema(
                    "nested list columns are not supported",
                )),
                Some(element) => FieldType::from_column(element, None),
                None => Err(crate::Error::invalid_schema(
                    "list column is missing its element type",
                )),
            },
            ColumnType::Other(name) => Err(crate::Error::invalid_schema(format!(
                "unsupported data type: {name}"
            ))),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::Keyword => "keyword",
            FieldType::Text => "text",
            FieldType::Binary => "binary",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_types() {
        let cases = [
            (ColumnType::Int, FieldType::Integer),
            (ColumnType::Enum, FieldType::Integer),
            (ColumnType::Long, FieldType::Long),
            (ColumnType::Double, FieldType::Double),
            (ColumnType::Bool, FieldType::Boolean),
            (ColumnType::String, FieldType::Keyword),
            (ColumnType::Json, FieldType::Text),
            (ColumnType::Complex, FieldType::Text),
            (ColumnType::Bytes, FieldType::Binary),
        ];

        for (ty, expected) in cases {
            assert_eq!(FieldType::from_column(&ty, None).unwrap(), expected);
        }
    }

    #[test]
    fn hint_ignored_for_scalars() {
        let ty = FieldType::from_column(&ColumnType::Long, Some(&ColumnType::String)).unwrap();
        assert_eq!(ty, FieldType::Long);
    }

    #[test]
    fn list_maps_to_element() {
        let ty = FieldType::from_column(&ColumnType::List, Some(&ColumnType::String)).unwrap();
        assert_eq!(ty, FieldType::Keyword);
    }

    #[test]
    fn list_without_hint() {
        let err = FieldType::from_column(&ColumnType::List, None).unwrap_err();
        assert!(err.is_invalid_schema());
    }

    #[test]
    fn nested_list() {
        let err = FieldType::from_column(&ColumnType::List, Some(&ColumnType::List)).unwrap_err();
        assert!(err.is_invalid_schema());
    }

    #[test]
    fn unmapped_type() {
        let err =
            FieldType::from_column(&ColumnType::Other("HyperLogLog".into()), None).unwrap_err();
        assert!(err.is_invalid_schema());
        assert_eq!(
            err.to_string(),
            "invalid schema: unsupported data type: HyperLogLog"
        );
    }
}
