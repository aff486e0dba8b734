use leadgate_core::domain::RawSubmission;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("invalid json: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("expected an array of rows at the document root")]
    NotAnArray,
}

/// Decodes a JSON export: the root must be an array; each element is read as
/// a row object. Elements that are not objects yield rows with every field absent.
pub fn parse_json(data: &str) -> Result<Vec<RawSubmission>, JsonError> {
    let root: Value = serde_json::from_str(data)?;
    let Value::Array(items) = root else {
        return Err(JsonError::NotAnArray);
    };

    Ok(items
        .iter()
        .map(|item| match item {
            Value::Object(row) => raw_submission(row),
            _ => RawSubmission::default(),
        })
        .collect())
}

fn raw_submission(row: &Map<String, Value>) -> RawSubmission {
    RawSubmission {
        source_id: scalar_field(row, "sourceId"),
        offer_id: scalar_field(row, "offerId"),
        telephone: scalar_field(row, "telephone"),
        created_at: scalar_field(row, "createdAt"),
    }
}

fn scalar_field(row: &Map<String, Value>, key: &str) -> Option<String> {
    scalar_text(row.get(key)?)
}

/// Text form of a scalar JSON value: numbers as written, `true` as `"1"`,
/// `false` as `""`. Null, arrays and objects have none.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_json, scalar_text, JsonError};
    use serde_json::json;

    #[test]
    fn parse_reads_row_objects() {
        let rows = parse_json(
            r#"[{"sourceId":"src-1","offerId":"OFR-1","telephone":"+351 912","createdAt":"2024-01-01T00:00:00Z"}]"#,
        )
        .expect("parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_id.as_deref(), Some("src-1"));
        assert_eq!(rows[0].telephone.as_deref(), Some("+351 912"));
    }

    #[test]
    fn parse_stringifies_scalars_and_drops_nulls() {
        let rows = parse_json(r#"[{"sourceId":15,"telephone":3331112222,"createdAt":null}]"#)
            .expect("parse");
        assert_eq!(rows[0].source_id.as_deref(), Some("15"));
        assert_eq!(rows[0].telephone.as_deref(), Some("3331112222"));
        assert!(rows[0].offer_id.is_none());
        assert!(rows[0].created_at.is_none());
    }

    #[test]
    fn parse_turns_non_objects_into_empty_rows() {
        let rows = parse_json(r#"[1, "x", {"sourceId":"src-2"}]"#).expect("parse");
        assert_eq!(rows.len(), 3);
        assert!(rows[0].source_id.is_none());
        assert_eq!(rows[2].source_id.as_deref(), Some("src-2"));
    }

    #[test]
    fn parse_rejects_non_array_roots() {
        assert!(matches!(
            parse_json(r#"{"sourceId":"src-1"}"#),
            Err(JsonError::NotAnArray)
        ));
        assert!(matches!(parse_json("42"), Err(JsonError::NotAnArray)));
        assert!(matches!(parse_json("[{"), Err(JsonError::Decode(_))));
    }

    #[test]
    fn scalar_text_follows_string_casts() {
        assert_eq!(scalar_text(&json!(true)).as_deref(), Some("1"));
        assert_eq!(scalar_text(&json!(false)).as_deref(), Some(""));
        assert_eq!(scalar_text(&json!(12.5)).as_deref(), Some("12.5"));
        assert!(scalar_text(&json!(null)).is_none());
        assert!(scalar_text(&json!(["1"])).is_none());
    }
}
