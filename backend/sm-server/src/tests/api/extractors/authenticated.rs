use crate::Authenticated;

use sm_auth::{AuthContext, Claims};

use axum::{body::Body, extract::FromRequestParts, http::Request, response::IntoResponse};
use http::StatusCode;

fn teacher_context() -> AuthContext {
    AuthContext::from_claims(Claims {
        id: Some(11),
        account_id: Some(4),
        admin_id: None,
        role: "teacher".to_string(),
        email: None,
        iat: 0,
        exp: i64::MAX,
    })
}

#[tokio::test]
async fn given_context_in_extensions_when_extracted_then_returned() {
    let mut request = Request::builder().body(Body::empty()).unwrap();
    request.extensions_mut().insert(teacher_context());

    let (mut parts, _body) = request.into_parts();
    let result = Authenticated::from_request_parts(&mut parts, &()).await;

    let Authenticated(ctx) = result.unwrap();
    assert_eq!(ctx, teacher_context());
}

#[tokio::test]
async fn given_no_context_when_extracted_then_401() {
    let request = Request::builder().body(Body::empty()).unwrap();

    let (mut parts, _body) = request.into_parts();
    let result = Authenticated::from_request_parts(&mut parts, &()).await;

    let rejection = result.unwrap_err();
    assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
}
