use axum::{
    http::{header, StatusCode},
    response::Response,
};

/// Asserts a 303 pointing at `target`
pub fn assert_redirect(response: &Response, target: &str) {
    assert_eq!(
        response.status(),
        StatusCode::SEE_OTHER,
        "expected redirect to {}",
        target
    );
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a Location header")
        .to_str()
        .unwrap();
    assert_eq!(location, target);
}

/// Value of the session cookie set by the response, if any
pub fn cookie_value(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| value.strip_prefix("token="))
        .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
}

/// Whether the response clears the session cookie
pub fn is_removal(response: &Response) -> bool {
    cookie_value(response).is_some_and(|value| value.is_empty())
}
