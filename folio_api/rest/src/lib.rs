use std::net::IpAddr;

use anyhow::Context;
use axum::Router;
use folio_core_blog_contracts::BlogService;
use folio_core_contact_contracts::ContactService;
use folio_core_revalidate_contracts::RevalidateService;
use folio_di::Build;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;


#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact, Revalidate, Blog> {
    config: RestServerConfig,
    contact: Contact,
    revalidate: Revalidate,
    blog: Blog,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl<Contact, Revalidate, Blog> RestServer<Contact, Revalidate, Blog>
where
    Contact: ContactService,
    Revalidate: RevalidateService,
    Blog: BlogService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let RestServerConfig { host, port } = self.config.clone();

        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        info!("Listening on http://{host}:{port}");

        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }

    fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::contact::router(self.contact.into()))
            .merge(routes::revalidate::router(self.revalidate.into()))
            .merge(routes::blog::router(self.blog.into()))
            .fallback(routes::not_found);

        // outermost layer last: request ids must exist before the trace span is created
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
