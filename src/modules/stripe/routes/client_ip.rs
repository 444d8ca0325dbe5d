use crate::types::Context;
use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};
use std::{convert::Infallible, net::SocketAddr, sync::Arc};

/// Network address the request was observed from.
///
/// The socket peer is used unless the app is configured to trust a proxy, in
/// which case the first `X-Forwarded-For` entry wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientIp(pub Option<String>);

fn forwarded_for(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[async_trait]
impl FromRequestParts<Arc<Context>> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<Context>,
    ) -> Result<Self, Self::Rejection> {
        if ctx.app.trust_proxy {
            if let Some(ip) = forwarded_for(parts) {
                return Ok(Self(Some(ip)));
            }
        }

        Ok(Self(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string()),
        ))
    }
}
