// Response body decoding
//
// Strict JSON decode with one recovery path: some daemons emit `-nan` for
// not-a-number values, which is not valid JSON. When decoding fails and that
// token is present, every `:-nan,` occurrence is rewritten to `:0,` and the
// decode is retried exactly once.

use serde_json::Value;

const NAN_TOKEN: &str = ":-nan";

/// Decode a raw response body into a JSON value.
pub fn decode_body(raw: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            if raw.contains(NAN_TOKEN) {
                let repaired = raw.replace(":-nan,", ":0,");
                serde_json::from_str(&repaired)
            } else {
                Err(err)
            }
        }
    }
}

/// Pull the `error` and `result` fields out of a decoded single-call body.
///
/// Nulls and missing fields both map to `None`; non-object bodies have
/// neither field.
pub fn split_response(value: &Value) -> (Option<Value>, Option<Value>) {
    let error = value
        .get("error")
        .filter(|v| !v.is_null())
        .cloned();
    let result = value
        .get("result")
        .filter(|v| !v.is_null())
        .cloned();
    (error, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_valid_body() {
        let value = decode_body(r#"{"result": 42, "error": null, "id": 1}"#).unwrap();
        assert_eq!(value["result"], 42);
    }

    #[test]
    fn test_nan_token_is_repaired() {
        let raw = r#"{"result": {"difficulty":-nan, "blocks": 10}, "error": null}"#;
        let value = decode_body(raw).unwrap();
        assert_eq!(value["result"]["difficulty"], 0);
        assert_eq!(value["result"]["blocks"], 10);
    }

    #[test]
    fn test_every_nan_occurrence_is_repaired() {
        let raw = r#"{"result": {"a":-nan, "b":-nan, "c": 1}, "error": null}"#;
        let value = decode_body(raw).unwrap();
        assert_eq!(value["result"]["a"], 0);
        assert_eq!(value["result"]["b"], 0);
    }

    #[test]
    fn test_other_malformed_bodies_still_fail() {
        assert!(decode_body("{not json at all").is_err());
        // Token present but body broken in another way: the single retry
        // still fails.
        assert!(decode_body(r#"{"a":-nan, "b": }"#).is_err());
    }

    #[test]
    fn test_split_response_extracts_fields() {
        let value = json!({"result": {"blocks": 5}, "error": null, "id": 7});
        let (error, result) = split_response(&value);
        assert!(error.is_none());
        assert_eq!(result, Some(json!({"blocks": 5})));
    }

    #[test]
    fn test_split_response_daemon_error() {
        let value = json!({"result": null, "error": {"code": -32601, "message": "not found"}});
        let (error, result) = split_response(&value);
        assert_eq!(error.unwrap()["code"], -32601);
        assert!(result.is_none());
    }

    #[test]
    fn test_split_response_on_array_body() {
        let value = json!([{"result": 1, "error": null}]);
        let (error, result) = split_response(&value);
        assert!(error.is_none());
        assert!(result.is_none());
    }
}
