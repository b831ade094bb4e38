//! Dispatch behavior through a mock transport

mod common;

use std::sync::Arc;

use common::{MockTransport, UnreachableTransport};
use restbind_client::prelude::*;
use serde::Deserialize;

fn service_with(
    endpoints: Vec<(String, EndpointDecl)>,
    transport: Arc<dyn Transport>,
) -> ApiService {
    let config = ServiceConfig::new("http://x.com").expect("config");
    ApiService::new(config, endpoints, transport)
}

#[test]
fn resolves_full_request_triple() {
    let transport = Arc::new(MockTransport::ok_with(b"{}"));
    let decl = EndpointDecl::get("app/{name}/profile")
        .header("Accept", "application/json")
        .url_param("name")
        .query_param("type")
        .header_param("X-Trace");
    let service = service_with(vec![("profile".to_string(), decl)], transport.clone());

    service
        .dispatch(
            "profile",
            &["gpscompass".into(), "full".into(), "trace-1".into()],
        )
        .expect("dispatch");

    let recorded = transport.recorded();
    assert_eq!(recorded.len(), 1);
    let request = &recorded[0];
    assert_eq!(request.method, RequestMethod::Get);
    assert_eq!(request.url, "http://x.com/app/gpscompass/profile?type=full");
    assert_eq!(request.headers.get("Accept").unwrap(), "application/json");
    assert_eq!(request.headers.get("X-Trace").unwrap(), "trace-1");
    assert_eq!(
        request.headers.get("Content-Type").unwrap(),
        "application/json"
    );
    assert!(request.body.is_none());
}

#[test]
fn post_sends_bound_body_bytes() {
    let transport = Arc::new(MockTransport::ok_with(b"{}"));
    let decl = EndpointDecl::post("upload").body_param();
    let service = service_with(vec![("upload".to_string(), decl)], transport.clone());

    let payload = vec![1u8, 2, 3];
    service
        .dispatch("upload", &[payload.clone().into()])
        .expect("dispatch");

    let recorded = transport.recorded();
    assert_eq!(recorded[0].method, RequestMethod::Post);
    assert_eq!(recorded[0].body.as_deref(), Some(payload.as_slice()));
}

#[test]
fn credential_is_merged_when_method_does_not_set_it() {
    let transport = Arc::new(MockTransport::ok_with(b"{}"));
    let config = ServiceConfig::new("http://x.com")
        .expect("config")
        .with_basic_auth("user", "pass");
    let service = ApiService::new(
        config,
        vec![("ping".to_string(), EndpointDecl::get("ping"))],
        transport.clone(),
    );

    service.dispatch("ping", &[]).expect("dispatch");

    let recorded = transport.recorded();
    assert_eq!(
        recorded[0].headers.get("Authorization").unwrap(),
        "Basic dXNlcjpwYXNz"
    );
}

#[test]
fn method_level_authorization_wins_over_credential() {
    let transport = Arc::new(MockTransport::ok_with(b"{}"));
    let config = ServiceConfig::new("http://x.com")
        .expect("config")
        .with_basic_auth("user", "pass");
    let decl = EndpointDecl::get("me").header_param("Authorization");
    let service = ApiService::new(config, vec![("me".to_string(), decl)], transport.clone());

    service
        .dispatch("me", &["Bearer token-123".into()])
        .expect("dispatch");

    let recorded = transport.recorded();
    let auth = recorded[0].headers.get_all("Authorization");
    let values: Vec<_> = auth.iter().collect();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0], "Bearer token-123");
}

#[test]
fn non_success_status_is_a_failed_response_not_an_error() {
    let transport = Arc::new(MockTransport::with_status(
        StatusCode::NOT_FOUND,
        b"no such user",
    ));
    let service = service_with(
        vec![("user".to_string(), EndpointDecl::get("user/{id}").url_param("id"))],
        transport,
    );

    let response = service.dispatch("user", &[42.into()]).expect("dispatch");

    assert!(response.is_failure());
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Not Found");
    assert_eq!(response.body().text().expect("error payload"), "no such user");

    let stats = service.stats().snapshot();
    assert_eq!(stats.failed_responses, 1);
    assert_eq!(stats.successful_responses, 0);
}

#[test]
fn transport_failure_propagates_as_error() {
    let service = service_with(
        vec![("ping".to_string(), EndpointDecl::get("ping"))],
        Arc::new(UnreachableTransport),
    );

    let err = service.dispatch("ping", &[]).unwrap_err();

    assert!(err.is_request());
    assert_eq!(service.stats().snapshot().transport_errors, 1);
}

#[test]
fn unknown_endpoint_is_a_configuration_error() {
    let service = service_with(Vec::new(), Arc::new(MockTransport::ok_with(b"{}")));

    let err = service.dispatch("nowhere", &[]).unwrap_err();

    assert!(err.is_config());
    assert!(err.to_string().contains("nowhere"));
}

#[test]
fn descriptor_failure_does_not_poison_the_cache() {
    let transport = Arc::new(MockTransport::ok_with(b"{}"));
    // No request-method annotation: parsing fails on every dispatch.
    let decl = EndpointDecl::new().header("Accept", "application/json");
    let service = service_with(vec![("broken".to_string(), decl)], transport);

    assert!(service.dispatch("broken", &[]).is_err());
    assert!(service.dispatch("broken", &[]).is_err());

    let stats = service.stats().snapshot();
    assert_eq!(stats.builders_constructed, 0);
    assert_eq!(stats.requests_dispatched, 0);
}

#[test]
fn builder_is_reused_across_calls() {
    let transport = Arc::new(MockTransport::ok_with(b"{}"));
    let service = service_with(
        vec![("ping".to_string(), EndpointDecl::get("ping"))],
        transport,
    );

    for _ in 0..3 {
        service.dispatch("ping", &[]).expect("dispatch");
    }

    let stats = service.stats().snapshot();
    assert_eq!(stats.builders_constructed, 1);
    assert_eq!(stats.builder_cache_hits, 2);
    assert_eq!(stats.requests_dispatched, 3);
}

#[derive(Debug, Deserialize)]
struct Profile {
    id: u64,
    name: String,
}

#[test]
fn call_json_decodes_success_payload() {
    let transport = Arc::new(MockTransport::ok_with(br#"{"id": 7, "name": "gps"}"#));
    let service = service_with(
        vec![("profile".to_string(), EndpointDecl::get("profile"))],
        transport,
    );

    let profile: Profile = service.call_json("profile", &[]).expect("typed call");

    assert_eq!(profile.id, 7);
    assert_eq!(profile.name, "gps");
}

#[test]
fn call_json_surfaces_status_failures_uniformly() {
    let transport = Arc::new(MockTransport::with_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        b"boom",
    ));
    let service = service_with(
        vec![("profile".to_string(), EndpointDecl::get("profile"))],
        transport,
    );

    let err = service.call_json::<Profile>("profile", &[]).unwrap_err();

    assert!(err.is_status());
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[test]
fn call_json_reports_malformed_payload_as_decode_error() {
    let transport = Arc::new(MockTransport::ok_with(b"not json"));
    let service = service_with(
        vec![("profile".to_string(), EndpointDecl::get("profile"))],
        transport,
    );

    let err = service.call_json::<Profile>("profile", &[]).unwrap_err();

    assert!(err.is_decode());
}
