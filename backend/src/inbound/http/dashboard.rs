//! Dashboard page and the root redirect.
//!
//! `/dashboard` is the only gated route; [`configure`] registers it behind
//! [`RequireSession`] so the handler always has an identity.

use actix_web::{HttpResponse, get, web};

use super::auth::{DASHBOARD_PATH, see_other};
use super::gate::{CurrentSession, RequireSession};
use crate::domain::DashboardView;

/// Signed-in dashboard.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard for the signed-in user", body = DashboardView),
        (status = 401, description = "No session; login form prompt", body = DashboardView)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard",
    security(("SessionCookie" = []))
)]
pub async fn dashboard(user: CurrentSession) -> web::Json<DashboardView> {
    web::Json(DashboardView::for_user(&user))
}

/// Redirect the bare root to the dashboard.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 303, description = "Redirect to the dashboard")),
    tags = ["dashboard"],
    operation_id = "root",
    security([])
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    see_other(DASHBOARD_PATH)
}

/// Register the gated dashboard resource and the root redirect.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(DASHBOARD_PATH)
            .wrap(RequireSession)
            .route(web::get().to(dashboard)),
    )
    .service(root);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::LOCATION;
    use actix_web::{App, test};
    use rstest::rstest;

    use crate::domain::{AuthenticatedUser, Error};
    use crate::inbound::http::session::SessionContext;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    #[rstest]
    #[actix_web::test]
    async fn anonymous_visitors_are_prompted_to_log_in() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .configure(configure),
        )
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/dashboard").to_request())
                .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let view: DashboardView = test::read_body_json(res).await;
        assert!(view.show_login);
        assert_eq!(view, DashboardView::login_required());
    }

    #[rstest]
    #[actix_web::test]
    async fn signed_in_users_see_their_name_and_photo() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/seed",
                    web::get().to(|session: SessionContext| async move {
                        let user = AuthenticatedUser::new("ada", Some("1700000000_ada.png".into()));
                        session.establish(&user)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .configure(configure),
        )
        .await;
        let seed = test::call_service(&app, test::TestRequest::get().uri("/seed").to_request()).await;
        let cookie = session_cookie(&seed).expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/dashboard")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let view: DashboardView = test::read_body_json(res).await;
        assert_eq!(view.username.as_deref(), Some("ada"));
        assert_eq!(view.profile_photo.as_deref(), Some("1700000000_ada.png"));
        assert!(!view.show_login);
    }

    #[rstest]
    #[actix_web::test]
    async fn root_redirects_to_dashboard() {
        let app = test::init_service(App::new().configure(configure)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/dashboard")
        );
    }
}
