use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{http, web, Error, HttpMessage};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::configuration::SecretConfig;
use crate::errors::GenericError;
use crate::routes::user::schemas::{UserAccount, UserType};
use crate::routes::user::utils::get_user;
use crate::schemas::Status;
use crate::utils::decode_token;

pub struct AuthMiddleware<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .cookie("token")
            .map(|c| c.value().to_string())
            .or_else(|| {
                req.headers()
                    .get(http::header::AUTHORIZATION)
                    .and_then(|h| h.to_str().ok())
                    .and_then(|h| h.strip_prefix("Bearer "))
                    .map(|t| t.to_string())
            });

        let token = match token {
            Some(token) => token,
            None => {
                let json_error =
                    GenericError::ValidationError("Authorization token is missing".to_string());
                let (request, _pl) = req.into_parts();
                return Box::pin(async { Ok(ServiceResponse::from_err(json_error, request)) });
            }
        };

        let jwt_secret = &req
            .app_data::<web::Data<SecretConfig>>()
            .expect("SecretConfig is registered as app data")
            .jwt
            .secret;

        let user_id = match decode_token(token, jwt_secret) {
            Ok(id) => id,
            Err(e) => {
                return Box::pin(async move {
                    let (request, _pl) = req.into_parts();
                    Ok(ServiceResponse::from_err(
                        GenericError::InvalidJWT(e.to_string()),
                        request,
                    ))
                });
            }
        };

        let srv = Rc::clone(&self.service);
        Box::pin(async move {
            let db_pool = req
                .app_data::<web::Data<PgPool>>()
                .expect("PgPool is registered as app data");
            let user = get_user(user_id, db_pool)
                .await
                .map_err(GenericError::UnexpectedError)?
                .ok_or_else(|| {
                    GenericError::InvalidJWT("Token references an unknown user".to_string())
                })?;
            if user.is_active == Status::Inactive {
                return Err(GenericError::ValidationError(
                    "User is inactive. Please contact customer support".to_string(),
                ))?;
            } else if user.is_deleted {
                return Err(GenericError::ValidationError(
                    "User is deleted. Please contact customer support".to_string(),
                ))?;
            }

            req.extensions_mut().insert::<UserAccount>(user);

            let res = srv.call(req).await?;
            Ok(res)
        })
    }
}

/// Middleware factory for requiring authentication.
pub struct RequireAuth;

impl<S> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RoleMiddleware<S> {
    service: Rc<S>,
    pub role_list: Vec<UserType>,
}

impl<S> Service<ServiceRequest> for RoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);
        let role_list = self.role_list.clone();
        Box::pin(async move {
            let role = req
                .extensions()
                .get::<UserAccount>()
                .ok_or_else(|| {
                    GenericError::ValidationError("User Account doesn't exist".to_string())
                })?
                .role;

            if !role_list.contains(&role) {
                return Err(GenericError::InsufficientPrivilegeError(format!(
                    "A {} account cannot perform this action",
                    role
                )))?;
            }

            let res = srv.call(req).await?;
            Ok(res)
        })
    }
}

/// Middleware factory gating a route to a set of account roles; must be
/// layered inside `RequireAuth`.
pub struct RoleValidation {
    pub role_list: Vec<UserType>,
}

impl<S> Transform<S, ServiceRequest> for RoleValidation
where
    S: Service<ServiceRequest, Response = ServiceResponse<actix_web::body::BoxBody>, Error = Error>
        + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = RoleMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleMiddleware {
            service: Rc::new(service),
            role_list: self.role_list.clone(),
        }))
    }
}
