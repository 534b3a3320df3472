pub mod app;
pub mod layout;
pub mod routes;
pub mod shared;
pub mod system;

use contracts::domain::brand::BrandCatalogPayload;
use contracts::system::auth::LoginResponse;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::routes::navigator::LoginParams;
use crate::shared::catalog::BrandCatalog;
use crate::system::auth::context::do_login;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(app::App);
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}

/// Entry point for the brand loader: swaps in a freshly fetched catalog
#[wasm_bindgen]
pub fn load_brand_catalog(payload: JsValue) -> Result<(), JsValue> {
    let payload: BrandCatalogPayload = serde_wasm_bindgen::from_value(payload)
        .map_err(|e| JsValue::from_str(&format!("Invalid brand catalog: {}", e)))?;
    let catalog = BrandCatalog::from_payload(payload);

    app::with_handles(|ctx, _| ctx.replace_brands(catalog))
        .ok_or_else(|| JsValue::from_str("Portal is not mounted"))
}

/// Entry point for the sign-in widget: starts the session and returns to
/// the page that asked for login
#[wasm_bindgen]
pub fn complete_login(response: JsValue) -> Result<(), JsValue> {
    let response: LoginResponse = serde_wasm_bindgen::from_value(response)
        .map_err(|e| JsValue::from_str(&format!("Invalid login response: {}", e)))?;

    app::with_handles(|ctx, session| {
        let params = LoginParams::from_query(&ctx.location.get_untracked().query);
        do_login(session, response);
        ctx.redirect(params.safe_return_url().unwrap_or("/"));
    })
    .ok_or_else(|| JsValue::from_str("Portal is not mounted"))
}
