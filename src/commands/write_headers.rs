/// `write_headers` command: overwrite `content.headers` on a draft or
/// published template.
use std::io::Write;

use serde_json::Value;

use crate::api::{ApiClient, Query};
use crate::cli::args::WriteHeadersArgs;
use crate::cli::output::{report, report_error};
use crate::errors::AppError;
use crate::template::Template;

/// Query selecting the version to work on: `draft=false` targets the
/// published version, `draft=true` the draft.
///
/// Built once per invocation and used for both the fetch and the update.
#[must_use]
pub fn version_query(update_published: Option<bool>) -> Query {
    Query::single("draft", update_published != Some(true))
}

/// Run `sparkytemplate write_headers`.
///
/// Fetches the selected version, reports its current headers, then PUTs the
/// whole template back with `content.headers` replaced.
///
/// # Errors
///
/// Returns `AppError` if the template URL cannot be built.
pub fn run(args: &WriteHeadersArgs, client: &ApiClient) -> Result<(), AppError> {
    let mut err = std::io::stderr().lock();
    update_headers(args, client, &mut err)
}

/// Fetch, report and update; every diagnostic goes to `err`.
///
/// # Errors
///
/// Returns `AppError` if the template URL cannot be built.
pub fn update_headers(
    args: &WriteHeadersArgs,
    client: &ApiClient,
    err: &mut dyn Write,
) -> Result<(), AppError> {
    let query = version_query(args.update_published);
    let url = client.template_url(&args.id)?;

    let Some(response) = client.get(&url, &query, err) else {
        return Ok(());
    };
    if !response.is_ok() {
        response.report_failure(err);
        return Ok(());
    }
    let Some(mut template) = response.results().and_then(Template::from_value) else {
        return Ok(());
    };

    report(
        err,
        "Working on",
        &Value::String(template.version_label().to_owned()),
    );
    report(
        err,
        "Previous headers",
        template.headers().unwrap_or(&Value::Null),
    );

    let Some(headers) = &args.headers else {
        report_error(err, "No new headers specified - template not changed");
        return Ok(());
    };

    template.set_headers(headers.clone());
    let body = template.into_value();
    let Some(put_response) = client.put(&url, &query, &body, err) else {
        return Ok(());
    };
    if put_response.is_ok() {
        report(
            err,
            "Updated headers",
            body.pointer("/content/headers").unwrap_or(&Value::Null),
        );
    } else {
        put_response.report_failure(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::test_utils::client_for;

    fn args(update_published: Option<bool>, headers: Option<Value>) -> WriteHeadersArgs {
        WriteHeadersArgs {
            id: "welcome".to_owned(),
            update_published,
            headers,
        }
    }

    fn template_body(published: bool) -> String {
        json!({"results": {
            "id": "welcome",
            "name": "Welcome",
            "published": published,
            "content": {"subject": "Hi", "headers": {"CC": "old@example.com"}}
        }})
        .to_string()
    }

    fn report_lines(err: Vec<u8>) -> Vec<String> {
        String::from_utf8(err)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    fn draft_param(value: &str) -> Matcher {
        Matcher::UrlEncoded("draft".into(), value.into())
    }

    #[test]
    fn test_version_query() {
        assert_eq!(version_query(None).to_json(), json!({"draft": true, "options": {}}));
        assert_eq!(
            version_query(Some(false)).to_json(),
            json!({"draft": true, "options": {}})
        );
        assert_eq!(
            version_query(Some(true)).to_json(),
            json!({"draft": false, "options": {}})
        );
    }

    #[test]
    fn test_draft_fetch_and_put_use_same_version() {
        let mut server = mockito::Server::new();
        // A published template comes back even though the draft was asked for.
        let get = server
            .mock("GET", "/api/v1/templates/welcome")
            .match_query(draft_param("true"))
            .with_status(200)
            .with_body(template_body(true))
            .create();
        let put_draft = server
            .mock("PUT", "/api/v1/templates/welcome")
            .match_query(draft_param("true"))
            .match_body(Matcher::Json(json!({
                "id": "welcome",
                "name": "Welcome",
                "published": true,
                "content": {"subject": "Hi", "headers": {"X-New": "1"}}
            })))
            .with_status(200)
            .with_body(r#"{"results": {"id": "welcome"}}"#)
            .create();
        let put_published = server
            .mock("PUT", "/api/v1/templates/welcome")
            .match_query(draft_param("false"))
            .expect(0)
            .create();

        let client = client_for(&server.url());
        let mut err = Vec::new();
        update_headers(&args(None, Some(json!({"X-New": "1"}))), &client, &mut err).unwrap();

        get.assert();
        put_draft.assert();
        put_published.assert();
        assert_eq!(
            report_lines(err),
            [
                format!("{:24} Published", "Working on:"),
                format!("{:24} {{\"CC\":\"old@example.com\"}}", "Previous headers:"),
                format!("{:24} {{\"X-New\":\"1\"}}", "Updated headers:"),
            ]
        );
    }

    #[test]
    fn test_update_published() {
        let mut server = mockito::Server::new();
        let get = server
            .mock("GET", "/api/v1/templates/welcome")
            .match_query(draft_param("false"))
            .with_status(200)
            .with_body(template_body(true))
            .create();
        let put = server
            .mock("PUT", "/api/v1/templates/welcome")
            .match_query(draft_param("false"))
            .match_body(Matcher::PartialJson(
                json!({"content": {"headers": {"BCC": "b"}}}),
            ))
            .with_status(200)
            .create();

        let client = client_for(&server.url());
        update_headers(&args(Some(true), Some(json!({"BCC": "b"}))), &client, &mut Vec::new())
            .unwrap();

        get.assert();
        put.assert();
    }

    #[test]
    fn test_missing_headers_means_no_put() {
        let mut server = mockito::Server::new();
        let get = server
            .mock("GET", "/api/v1/templates/welcome")
            .match_query(draft_param("true"))
            .with_status(200)
            .with_body(template_body(false))
            .create();
        let put = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create();

        let client = client_for(&server.url());
        let mut err = Vec::new();
        update_headers(&args(None, None), &client, &mut err).unwrap();

        get.assert();
        put.assert();
        assert_eq!(
            report_lines(err),
            [
                format!("{:24} Draft", "Working on:"),
                format!("{:24} {{\"CC\":\"old@example.com\"}}", "Previous headers:"),
                "No new headers specified - template not changed".to_owned(),
            ]
        );
    }

    #[test]
    fn test_fetch_failure_means_no_put() {
        let mut server = mockito::Server::new();
        let get = server
            .mock("GET", "/api/v1/templates/welcome")
            .match_query(draft_param("true"))
            .with_status(404)
            .with_body(r#"{"errors": [{"message": "resource not found"}]}"#)
            .expect(2)
            .create();
        let put = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create();

        let client = client_for(&server.url());
        let mut err = Vec::new();
        update_headers(&args(None, Some(json!({"CC": "x"}))), &client, &mut err).unwrap();
        update_headers(&args(None, None), &client, &mut err).unwrap();

        get.assert();
        put.assert();
        let not_found = r#"404 {"errors": [{"message": "resource not found"}]}"#;
        assert_eq!(report_lines(err), [not_found, not_found]);
    }

    #[test]
    fn test_no_results_means_no_put() {
        let mut server = mockito::Server::new();
        let get = server
            .mock("GET", "/api/v1/templates/welcome")
            .match_query(draft_param("true"))
            .with_status(200)
            .with_body("{}")
            .create();
        let put = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create();

        let client = client_for(&server.url());
        let mut err = Vec::new();
        update_headers(&args(None, Some(json!({"CC": "x"}))), &client, &mut err).unwrap();

        get.assert();
        put.assert();
        assert!(err.is_empty());
    }

    #[test]
    fn test_put_failure_is_not_an_error() {
        let mut server = mockito::Server::new();
        let get = server
            .mock("GET", "/api/v1/templates/welcome")
            .match_query(draft_param("true"))
            .with_status(200)
            .with_body(template_body(false))
            .create();
        let put = server
            .mock("PUT", "/api/v1/templates/welcome")
            .match_query(draft_param("true"))
            .with_status(422)
            .with_body(r#"{"errors": [{"message": "invalid headers"}]}"#)
            .create();

        let client = client_for(&server.url());
        let mut err = Vec::new();
        assert!(update_headers(&args(None, Some(json!({"CC": "x"}))), &client, &mut err).is_ok());
        get.assert();
        put.assert();
        assert_eq!(
            report_lines(err).last().map(String::as_str),
            Some(r#"422 {"errors": [{"message": "invalid headers"}]}"#)
        );
    }
}
