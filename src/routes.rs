use crate::api::{attendance, health};
use actix_cors::Cors;
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(attendance::query_error_handler))
        .service(web::resource("/health").route(web::get().to(health::health)))
        .service(
            // /attendance
            web::resource("/attendance")
                .route(web::post().to(attendance::record_attendance))
                .route(web::get().to(attendance::list_attendance)),
        );
}

/// Readers and browser-based test clients call from anywhere.
pub fn cors() -> Cors {
    Cors::permissive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::AttendanceService;
    use crate::store::memory::MemoryAttendanceStore;
    use actix_web::http::{StatusCode, header};
    use actix_web::middleware::NormalizePath;
    use actix_web::{App, test};
    use std::sync::Arc;
    use std::time::Duration;

    #[actix_web::test]
    async fn any_origin_may_post_and_trailing_slash_is_tolerated() {
        let service = web::Data::new(AttendanceService::new(
            Arc::new(MemoryAttendanceStore::default()),
            Duration::from_millis(200),
        ));
        let app = test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .wrap(cors())
                .app_data(service.clone())
                .configure(configure),
        )
        .await;

        let preflight = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/attendance")
            .insert_header((header::ORIGIN, "http://example.test"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, preflight).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

        let req = test::TestRequest::get()
            .uri("/attendance/")
            .insert_header((header::ORIGIN, "http://example.test"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://example.test"
        );
    }
}
