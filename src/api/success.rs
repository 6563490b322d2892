use actix_web::HttpResponse;

/// Typed responder: entity JSON on success, empty body when there is nothing
/// to return (friendship and like mutations respond 200 with no body).
pub struct Success<T: serde::Serialize> {
    pub status: actix_web::http::StatusCode,
    pub body: Option<T>,
}

impl<T: serde::Serialize> Success<T> {
    pub fn ok(data: T) -> Self {
        Self { status: actix_web::http::StatusCode::OK, body: Some(data) }
    }

    pub fn created(data: T) -> Self {
        Self { status: actix_web::http::StatusCode::CREATED, body: Some(data) }
    }

    pub fn empty() -> Self {
        Self { status: actix_web::http::StatusCode::OK, body: None }
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        let mut response = HttpResponse::build(self.status);

        match self.body {
            Some(body) => response.json(body),
            None => response.finish(),
        }
    }
}
