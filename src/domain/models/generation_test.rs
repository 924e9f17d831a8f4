use super::ErrorResponse;
use super::GenerationError;

#[test]
fn it_omits_details_for_client_errors() -> anyhow::Result<()> {
    let body = serde_json::to_string(&GenerationError::InvalidRequest.to_response())?;

    insta::assert_snapshot!(body, @r###"{"error":"Invalid request. Expected JSON body with a non-empty string 'prompt' field."}"###);

    return Ok(());
}

#[test]
fn it_carries_upstream_details() -> anyhow::Result<()> {
    let err = GenerationError::UpstreamFailure {
        details: "rate limited".to_string(),
    };
    let body = serde_json::to_string(&err.to_response())?;

    insta::assert_snapshot!(body, @r###"{"error":"Failed to generate component code.","details":"rate limited"}"###);

    return Ok(());
}

#[test]
fn it_formats_messages_with_details() {
    let res = ErrorResponse {
        error: "Failed to generate component code.".to_string(),
        details: Some("timed out".to_string()),
    };

    assert_eq!(res.message(), "Failed to generate component code. (timed out)");
}

#[test]
fn it_formats_messages_without_details() {
    let res: ErrorResponse = serde_json::from_str(r#"{"error":"Nope"}"#).unwrap();

    assert_eq!(res.details, None);
    assert_eq!(res.message(), "Nope");
}
