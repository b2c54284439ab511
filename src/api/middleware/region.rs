//! 区域作用域中间件
//!
//! 从请求路径第一段解析区域，写入 `RegionContext` 扩展，
//! 并在响应中附带 `Content-Language`。不支持的区域段回落到主区域。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{CONTENT_LANGUAGE, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{Instrument, info_span, trace};

use crate::context::RegionContext;

/// 区域作用域中间件工厂
#[derive(Clone, Default)]
pub struct RegionScope;

impl<S, B> Transform<S, ServiceRequest> for RegionScope
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RegionScopeService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RegionScopeService {
            service: Rc::new(service),
        }))
    }
}

pub struct RegionScopeService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RegionScopeService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        let ctx = RegionContext::from_path(req.path());
        trace!("Resolved region {} for {}", ctx.region(), req.path());
        req.extensions_mut().insert(ctx);

        let span = info_span!(
            "request",
            region = %ctx.region(),
            method = %req.method(),
            path = %req.path(),
        );

        Box::pin(
            async move {
                let mut response = srv.call(req).await?;
                response
                    .headers_mut()
                    .insert(CONTENT_LANGUAGE, HeaderValue::from_static(ctx.locale()));
                Ok(response)
            }
            .instrument(span),
        )
    }
}
