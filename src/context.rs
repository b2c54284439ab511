//! 请求级区域上下文
//!
//! `RegionContext` 由 `RegionScope` 中间件根据 URL 第一段写入请求扩展，
//! handler 通过提取器读取。没有任何全局的"当前区域"：区域总是显式传递。
//! 在未包裹 `RegionScope` 的路由上提取会直接失败（500），而不是回落到默认区域。

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::error;

use crate::errors::PortalError;
use crate::i18n::Translator;
use crate::region::{self, Region};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionContext {
    region: Region,
    translator: Translator,
}

impl RegionContext {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            translator: Translator::new(region),
        }
    }

    /// 从请求路径推导上下文
    pub fn from_path(path: &str) -> Self {
        Self::new(region::resolve(path))
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn locale(&self) -> &'static str {
        self.region.locale()
    }

    pub fn translator(&self) -> Translator {
        self.translator
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.translator.t(key)
    }

    /// 切换区域后的目标路径，目标即当前区域时返回 None
    pub fn change_region_path(&self, current_path: &str, target: Region) -> Option<String> {
        if target == self.region {
            return None;
        }
        Some(region::rewrite(current_path, target))
    }
}

impl FromRequest for RegionContext {
    type Error = PortalError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let ctx = req.extensions().get::<RegionContext>().copied();
        match ctx {
            Some(ctx) => ready(Ok(ctx)),
            None => {
                error!(
                    "RegionContext requested outside of a region scope: {} {}",
                    req.method(),
                    req.path()
                );
                ready(Err(PortalError::missing_region_context(
                    "Region context is not available for this route",
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_context_equality_follows_region() {
        assert_eq!(RegionContext::new(Region::Mx), RegionContext::from_path("/mx/a"));
        assert_ne!(RegionContext::new(Region::Mx), RegionContext::new(Region::Fr));
    }

    #[test]
    fn test_translate_through_context() {
        let ctx = RegionContext::new(Region::Fr);
        assert_eq!(ctx.t("nav.events"), "Événements");
        assert_eq!(ctx.t("missing.key"), "missing.key");
        assert_eq!(ctx.locale(), "fr-FR");
    }

    #[test]
    fn test_change_region_path() {
        let ctx = RegionContext::new(Region::Br);
        assert_eq!(ctx.change_region_path("/br/ebooks?p=2", Region::Br), None);
        assert_eq!(
            ctx.change_region_path("/br/ebooks?p=2", Region::Fr).as_deref(),
            Some("/fr/ebooks?p=2")
        );
    }

    #[actix_rt::test]
    async fn test_extractor_fails_without_scope() {
        let req = TestRequest::default().uri("/mx/api/news").to_http_request();
        let result = RegionContext::extract(&req).await;
        assert!(matches!(result, Err(PortalError::MissingRegionContext(_))));
    }

    #[actix_rt::test]
    async fn test_extractor_reads_extension() {
        let req = TestRequest::default().uri("/mx/api/news").to_http_request();
        req.extensions_mut().insert(RegionContext::new(Region::Mx));
        let ctx = RegionContext::extract(&req).await.unwrap();
        assert_eq!(ctx.region(), Region::Mx);
    }
}
