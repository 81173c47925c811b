use crate::ClientIp;

use axum::{body::Body, http::Request};

fn client_ip(headers: &[(&str, &str)]) -> ClientIp {
    let mut builder = Request::builder();
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let (parts, _body) = builder.body(Body::empty()).unwrap().into_parts();
    ClientIp::from_parts(&parts)
}

#[test]
fn given_forwarded_chain_when_extracted_then_first_hop() {
    let ip = client_ip(&[("X-Forwarded-For", " 198.51.100.4 , 10.0.0.2")]);

    assert_eq!(ip, ClientIp(Some("198.51.100.4".to_string())));
}

#[test]
fn given_only_real_ip_when_extracted_then_real_ip() {
    let ip = client_ip(&[("X-Real-IP", "198.51.100.7")]);

    assert_eq!(ip.0.as_deref(), Some("198.51.100.7"));
}

#[test]
fn given_empty_forwarded_for_when_extracted_then_falls_back_to_real_ip() {
    let ip = client_ip(&[("X-Forwarded-For", " "), ("X-Real-IP", "198.51.100.7")]);

    assert_eq!(ip.0.as_deref(), Some("198.51.100.7"));
}

#[test]
fn given_no_proxy_headers_when_extracted_then_none() {
    assert_eq!(client_ip(&[]), ClientIp(None));
}
