use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use storefront_frontend::App;
use storefront_frontend::auth::IdentityProvider;
use storefront_frontend::config::AppConfig;
use storefront_frontend::web::keycloak::KeycloakSession;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    let config = AppConfig::from_build_env();
    tracing::info!(api = %config.api_base_url, realm = %config.keycloak.realm, "starting storefront");

    let session = match KeycloakSession::new(&config.keycloak) {
        Ok(session) => Rc::new(session),
        Err(e) => {
            tracing::error!(error = %e, "cannot create identity provider");
            return;
        }
    };

    // 未登录时 init 会重定向到登录页，只有已认证的会话才挂载应用
    spawn_local(async move {
        match session.init().await {
            Ok(true) => {
                let session: Rc<dyn IdentityProvider> = session;
                mount_to_body(move || view! { <App session=session config=config /> });
            }
            Ok(false) => tracing::warn!("identity provider reported an unauthenticated session"),
            Err(e) => tracing::error!(error = %e, "identity provider initialization failed"),
        }
    });
}
