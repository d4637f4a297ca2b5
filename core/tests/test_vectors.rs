//! Drive `FormState` through the cases stored in `test-vectors/submit.json`.
//!
//! Each case names a variant and the raw text typed into each field. Cases
//! with `expected_errors` must be blocked before a request exists; the rest
//! must produce `expected_request`, and the simulated response must settle
//! into `expected_notice`. Bodies are compared as parsed JSON.

use registration_core::{
    FormRecord, FormSchema, FormState, HttpMethod, HttpResponse, NoticeKind, RegistrationClient,
    SubmitBlocked,
};

const ENDPOINT: &str = "http://localhost:6080/submit";

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> NoticeKind {
    match s {
        "Success" => NoticeKind::Success,
        "Rejected" => NoticeKind::Rejected,
        "Failure" => NoticeKind::Failure,
        other => panic!("unknown notice kind: {other}"),
    }
}

#[test]
fn submit_test_vectors() {
    let raw = include_str!("../../test-vectors/submit.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = RegistrationClient::new(ENDPOINT);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let schema = FormSchema::variant(case["variant"].as_str().unwrap()).unwrap();
        let mut form = FormState::new(schema);

        for (field, value) in case["input"].as_object().unwrap() {
            form.update(field, value.as_str().unwrap()).unwrap();
        }
        let submitted = form.record().clone();

        // Blocked cases
        if let Some(expected_errors) = case.get("expected_errors") {
            let errors = match form.begin_submit(&client) {
                Err(SubmitBlocked::Invalid(errors)) => errors,
                other => panic!("{name}: expected validation errors, got {other:?}"),
            };
            let expected = expected_errors.as_object().unwrap();
            assert_eq!(errors.len(), expected.len(), "{name}: error count");
            for (field, message) in expected {
                assert_eq!(errors.get(field), message.as_str(), "{name}: {field}");
            }
            assert!(!form.is_submitting(), "{name}: still submitting");
            continue;
        }

        // Verify build
        let expected_req = &case["expected_request"];
        let req = form.begin_submit(&client).unwrap();
        assert!(form.is_submitting(), "{name}: not marked submitting");
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, expected_req["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify settle
        let sim = &case["simulated_response"];
        let response = HttpResponse::new(
            sim["status"].as_u64().unwrap() as u16,
            sim["body"].as_str().unwrap(),
        );
        let notice = form.finish_submit(&client, Ok(response));
        let expected = &case["expected_notice"];
        assert_eq!(notice.kind, parse_kind(expected["kind"].as_str().unwrap()), "{name}: kind");
        assert_eq!(notice.message, expected["message"].as_str().unwrap(), "{name}: message");
        assert!(!form.is_submitting(), "{name}: still submitting");

        if notice.is_success() {
            assert_eq!(form.record(), &FormRecord::defaults(form.schema()), "{name}: reset");
        } else {
            assert_eq!(form.record(), &submitted, "{name}: record retained");
        }
    }
}
