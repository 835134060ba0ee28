use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use crate::clients::InventoryChecker;
use crate::domain::order::OrderCommandHandler;
use crate::domain::product::ProductCatalog;
use crate::metrics::Metrics;
use crate::store::OrderStore;

use super::localizer::MessageLocalizer;
use super::routes;
use super::translator::ErrorTranslator;

/// Shared application data, cloned into every worker
#[derive(Clone)]
pub struct AppContext {
    handler: web::Data<OrderCommandHandler>,
    catalog: web::Data<ProductCatalog>,
    translator: web::Data<ErrorTranslator>,
    localizer: web::Data<dyn MessageLocalizer>,
    metrics: web::Data<Arc<Metrics>>,
}

impl AppContext {
    pub fn new(
        inventory: Arc<dyn InventoryChecker>,
        store: Arc<dyn OrderStore>,
        localizer: Arc<dyn MessageLocalizer>,
        metrics: Arc<Metrics>,
    ) -> Self {
        let handler = OrderCommandHandler::new(inventory, store, metrics.clone());
        let translator = ErrorTranslator::new(localizer.clone()).with_metrics(metrics.clone());

        Self {
            handler: web::Data::new(handler),
            catalog: web::Data::new(ProductCatalog::new()),
            translator: web::Data::new(translator),
            localizer: web::Data::from(localizer),
            metrics: web::Data::new(metrics),
        }
    }

    /// Register app data and routes
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.handler.clone())
            .app_data(self.catalog.clone())
            .app_data(self.translator.clone())
            .app_data(self.localizer.clone())
            .app_data(self.metrics.clone());
        routes::configure(cfg);
    }
}

pub async fn serve(context: AppContext, host: &str, port: u16) -> std::io::Result<()> {
    tracing::info!("🚀 Starting order service on http://{}:{}", host, port);

    HttpServer::new(move || {
        let context = context.clone();
        App::new().configure(move |cfg| context.register(cfg))
    })
    .bind((host, port))?
    .run()
    .await
}
