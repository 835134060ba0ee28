use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use validator::Validate;

use crate::domain::order::{CommandId, OrderCommandHandler, PlaceOrderRequest};
use crate::domain::product::{CreateProductRequest, ListProductsQuery, ProductCatalog};
use crate::metrics::{health_handler, metrics_handler};

use super::failure::Failure;
use super::localizer::{MessageLocalizer, ORDER_PLACED_KEY, SUCCESS_KEY};
use super::response::{ErrorResponse, GenericResponse};
use super::translator::ErrorTranslator;

// ============================================================================
// HTTP routes
// ============================================================================
//
// Routes:
// - POST /api/order           place an order
// - POST /api/product         create a product
// - GET  /api/product         list products (?limit=1..100)
// - GET  /api/product/{id}    fetch one product
// - GET  /health, GET /metrics
//
// Expects app data: OrderCommandHandler, ProductCatalog, ErrorTranslator,
// dyn MessageLocalizer, Arc<Metrics>.
//
// ============================================================================

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/health", web::get().to(health_handler))
        .route("/metrics", web::get().to(metrics_handler))
        .service(
            web::scope("/api")
                .route("/order", web::post().to(place_order))
                .route("/product", web::post().to(create_product))
                .route("/product", web::get().to(list_products))
                .route("/product/{id}", web::get().to(get_product)),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        translate_with(req, Failure::from_json_error(err)).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        translate_with(req, Failure::from_query_error(err)).into()
    })
}

/// Extractor failures happen before handlers run, so the translator comes
/// from app data when registered.
fn translate_with(req: &HttpRequest, failure: Failure) -> ErrorResponse {
    match req.app_data::<web::Data<ErrorTranslator>>() {
        Some(translator) => translator.translate(failure),
        None => ErrorTranslator::default().translate(failure),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderResponse {
    command_id: CommandId,
}

async fn place_order(
    handler: web::Data<OrderCommandHandler>,
    translator: web::Data<ErrorTranslator>,
    localizer: web::Data<dyn MessageLocalizer>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, ErrorResponse> {
    let command_id = translator.respond(handler.place_order(body.into_inner()).await)?;

    Ok(HttpResponse::Created().json(GenericResponse::success(
        PlaceOrderResponse { command_id },
        localizer.translate(ORDER_PLACED_KEY),
    )))
}

async fn create_product(
    catalog: web::Data<ProductCatalog>,
    translator: web::Data<ErrorTranslator>,
    localizer: web::Data<dyn MessageLocalizer>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, ErrorResponse> {
    let product = translator.respond(catalog.create(body.into_inner()))?;
    Ok(HttpResponse::Created().json(GenericResponse::success(product, localizer.translate(SUCCESS_KEY))))
}

async fn get_product(
    catalog: web::Data<ProductCatalog>,
    translator: web::Data<ErrorTranslator>,
    localizer: web::Data<dyn MessageLocalizer>,
    path: web::Path<String>,
) -> Result<HttpResponse, ErrorResponse> {
    let product = translator.respond(catalog.get(&path.into_inner()))?;
    Ok(HttpResponse::Ok().json(GenericResponse::success(product, localizer.translate(SUCCESS_KEY))))
}

async fn list_products(
    catalog: web::Data<ProductCatalog>,
    translator: web::Data<ErrorTranslator>,
    localizer: web::Data<dyn MessageLocalizer>,
    query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, ErrorResponse> {
    let query = query.into_inner();
    if let Err(errors) = query.validate() {
        return Err(translator.translate(Failure::constraint_violation("listProducts", &errors)));
    }

    let products = catalog.list(query.limit() as usize);
    Ok(HttpResponse::Ok().json(GenericResponse::success(products, localizer.translate(SUCCESS_KEY))))
}
