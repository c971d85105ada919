use super::{ErrorBanner, LoadStatus};
use crate::api::StorefrontApi;
use crate::cart::CartStore;
use crate::web::dialog::Dialogs;
use leptos::prelude::*;
use std::rc::Rc;
use storefront_shared::{ApiError, NewProductDraft, Product, ProductId};

pub const CONFIRM_DELETE: &str = "Are you sure?";
pub const PRODUCT_ADDED: &str = "Product added!";
pub const PRODUCT_ADD_FAILED: &str = "Failed to add product";
pub const PRODUCT_DELETED: &str = "Product deleted!";
pub const PRODUCT_DELETE_FAILED: &str = "Failed to delete product";

/// 商品目录控制器
///
/// 显示的目录总是最近一次成功获取的完整快照（或为空），失败时保留旧快照。
/// 新建/删除商品只在界面上对管理员开放，真正的权限检查在后端。
#[derive(Clone, Copy)]
pub struct CatalogController {
    api: StoredValue<StorefrontApi, LocalStorage>,
    dialogs: StoredValue<Rc<dyn Dialogs>, LocalStorage>,
    products: RwSignal<Vec<Product>>,
    status: RwSignal<LoadStatus>,
    draft: RwSignal<NewProductDraft>,
    cart: RwSignal<CartStore>,
    banner: ErrorBanner,
}

impl CatalogController {
    pub fn new(
        api: StorefrontApi,
        dialogs: Rc<dyn Dialogs>,
        cart: RwSignal<CartStore>,
        banner: ErrorBanner,
    ) -> Self {
        Self {
            api: StoredValue::new_local(api),
            dialogs: StoredValue::new_local(dialogs),
            products: RwSignal::new(Vec::new()),
            status: RwSignal::new(LoadStatus::Idle),
            draft: RwSignal::new(NewProductDraft::default()),
            cart,
            banner,
        }
    }

    pub fn products(&self) -> RwSignal<Vec<Product>> {
        self.products
    }

    pub fn status(&self) -> RwSignal<LoadStatus> {
        self.status
    }

    /// 新建商品表单草稿
    pub fn draft(&self) -> RwSignal<NewProductDraft> {
        self.draft
    }

    /// 重新获取整个目录
    pub async fn refresh(&self) {
        self.status.set(LoadStatus::Loading);

        let api = self.api.get_value();
        match api.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "catalog loaded");
                self.products.set(products);
                self.status.set(LoadStatus::Loaded);
                self.banner.clear();
            }
            Err(e) => {
                let error = e.classify();
                tracing::warn!(error = %e, status = ?error.status_code(), "failed to load catalog");
                self.status.set(LoadStatus::Error(error.clone()));
                self.banner.show(error);
            }
        }
    }

    pub fn add_to_cart(&self, product_id: ProductId) {
        self.cart.update(|cart| cart.add(product_id));
    }

    /// 提交草稿；成功后重置草稿并刷新目录，失败保留用户输入
    pub async fn add_product(&self) -> Result<(), ApiError> {
        let draft = self.draft.get_untracked();
        let api = self.api.get_value();

        match api.create_product(&draft).await {
            Ok(()) => {
                tracing::info!(name = %draft.name, "product created");
                self.draft.set(NewProductDraft::default());
                self.acknowledge(PRODUCT_ADDED);
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                let error = e.classify();
                tracing::warn!(error = %e, status = ?error.status_code(), "failed to create product");
                self.banner.show(error.clone());
                self.acknowledge(PRODUCT_ADD_FAILED);
                Err(error)
            }
        }
    }

    /// 删除商品，需要用户先确认
    ///
    /// 返回 `Ok(false)` 表示用户取消，未发送任何请求。
    pub async fn delete_product(&self, id: ProductId) -> Result<bool, ApiError> {
        if !self.dialogs.with_value(|d| d.confirm(CONFIRM_DELETE)) {
            tracing::debug!(id, "product deletion cancelled");
            return Ok(false);
        }

        let api = self.api.get_value();
        match api.delete_product(id).await {
            Ok(()) => {
                tracing::info!(id, "product deleted");
                self.acknowledge(PRODUCT_DELETED);
                self.refresh().await;
                Ok(true)
            }
            Err(e) => {
                let error = e.classify();
                tracing::warn!(id, error = %e, status = ?error.status_code(), "failed to delete product");
                self.banner.show(error.clone());
                self.acknowledge(PRODUCT_DELETE_FAILED);
                Err(error)
            }
        }
    }

    fn acknowledge(&self, message: &str) {
        self.dialogs.with_value(|d| d.acknowledge(message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthGate;
    use crate::test_support::{BASE_URL, FakeIdentity, MockHttpClient, ScriptedDialogs};
    use rust_decimal::Decimal;
    use serde_json::json;
    use storefront_shared::protocol::HttpMethod;

    struct Fixture {
        http: Rc<MockHttpClient>,
        dialogs: Rc<ScriptedDialogs>,
        banner: ErrorBanner,
        cart: RwSignal<CartStore>,
        catalog: CatalogController,
    }

    fn setup(dialogs: ScriptedDialogs) -> Fixture {
        let http = Rc::new(MockHttpClient::new());
        let dialogs = Rc::new(dialogs);
        let gate = Rc::new(AuthGate::new(Rc::new(FakeIdentity::with_roles(&["ADMIN"]))));
        let api = StorefrontApi::new(BASE_URL, http.clone(), gate);
        let banner = ErrorBanner::new();
        let cart = RwSignal::new(CartStore::new());
        let catalog = CatalogController::new(api, dialogs.clone(), cart, banner);
        Fixture {
            http,
            dialogs,
            banner,
            cart,
            catalog,
        }
    }

    fn product_json(id: i64, name: &str) -> serde_json::Value {
        json!({ "id": id, "name": name, "price": 10.0, "quantity": 5, "description": "" })
    }

    #[tokio::test]
    async fn test_refresh_replaces_catalog_and_clears_error() {
        let f = setup(ScriptedDialogs::accepting());
        f.banner.show(ApiError::Forbidden);
        f.http.mock_response(
            HttpMethod::Get,
            "/products",
            200,
            json!([product_json(1, "Pen"), product_json(2, "Ink")]),
        );

        f.catalog.refresh().await;

        let names: Vec<String> = f
            .catalog
            .products()
            .get_untracked()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Pen", "Ink"]);
        assert_eq!(f.catalog.status().get_untracked(), LoadStatus::Loaded);
        assert_eq!(f.banner.get_untracked(), None);
    }

    #[tokio::test]
    async fn test_refresh_reports_loading_while_in_flight() {
        let f = setup(ScriptedDialogs::accepting());
        f.http
            .mock_response(HttpMethod::Get, "/products", 200, json!([product_json(1, "Pen")]));

        let ((), seen) = futures::join!(f.catalog.refresh(), async {
            (
                f.catalog.status().get_untracked(),
                f.catalog.products().get_untracked().len(),
            )
        });

        assert_eq!(seen, (LoadStatus::Loading, 0));
        assert_eq!(f.catalog.status().get_untracked(), LoadStatus::Loaded);
        assert_eq!(f.catalog.products().get_untracked().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_snapshot() {
        let f = setup(ScriptedDialogs::accepting());
        f.http
            .mock_response(HttpMethod::Get, "/products", 200, json!([product_json(1, "Pen")]));
        f.catalog.refresh().await;

        f.http.mock_empty(HttpMethod::Get, "/products", 500);
        f.catalog.refresh().await;

        assert_eq!(f.catalog.products().get_untracked().len(), 1);
        assert_eq!(
            f.catalog.status().get_untracked(),
            LoadStatus::Error(ApiError::ServerError(500))
        );
        assert_eq!(f.banner.get_untracked(), Some(ApiError::ServerError(500)));
    }

    #[tokio::test]
    async fn test_refresh_classifies_unauthorized_and_network() {
        let f = setup(ScriptedDialogs::accepting());

        f.http.mock_empty(HttpMethod::Get, "/products", 401);
        f.catalog.refresh().await;
        assert_eq!(f.banner.get_untracked(), Some(ApiError::Unauthorized));

        f.http.mock_unreachable(HttpMethod::Get, "/products");
        f.catalog.refresh().await;
        assert!(matches!(
            f.banner.get_untracked(),
            Some(ApiError::NetworkError { .. })
        ));
    }

    #[tokio::test]
    async fn test_add_to_cart_does_not_touch_backend() {
        let f = setup(ScriptedDialogs::accepting());

        f.catalog.add_to_cart(4);
        f.catalog.add_to_cart(4);

        assert_eq!(f.cart.get_untracked().quantity(4), 2);
        assert!(f.http.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_add_product_resets_draft_and_refreshes() {
        let f = setup(ScriptedDialogs::accepting());
        f.http.mock_response(HttpMethod::Post, "/products", 200, product_json(3, "Cap"));
        f.http
            .mock_response(HttpMethod::Get, "/products", 200, json!([product_json(3, "Cap")]));
        f.catalog.draft().set(NewProductDraft {
            name: "Cap".into(),
            price: Decimal::new(10, 0),
            quantity: 5,
            description: String::new(),
        });

        f.catalog.add_product().await.unwrap();

        assert_eq!(f.catalog.draft().get_untracked(), NewProductDraft::default());
        assert_eq!(
            f.http.sent(),
            vec![
                (HttpMethod::Post, "/products".to_string()),
                (HttpMethod::Get, "/products".to_string()),
            ]
        );
        assert_eq!(f.catalog.products().get_untracked().len(), 1);
        assert_eq!(f.dialogs.acknowledged(), vec![PRODUCT_ADDED]);
    }

    #[tokio::test]
    async fn test_add_product_failure_preserves_draft() {
        let f = setup(ScriptedDialogs::accepting());
        f.http.mock_empty(HttpMethod::Post, "/products", 403);
        let draft = NewProductDraft {
            name: "Cap".into(),
            ..Default::default()
        };
        f.catalog.draft().set(draft.clone());

        let result = f.catalog.add_product().await;

        assert_eq!(result, Err(ApiError::Forbidden));
        assert_eq!(f.catalog.draft().get_untracked(), draft);
        assert_eq!(f.http.sent_count(HttpMethod::Get, "/products"), 0);
        assert_eq!(f.banner.get_untracked(), Some(ApiError::Forbidden));
        assert_eq!(f.dialogs.acknowledged(), vec![PRODUCT_ADD_FAILED]);
    }

    #[tokio::test]
    async fn test_delete_without_confirmation_sends_nothing() {
        let f = setup(ScriptedDialogs::declining());
        f.http
            .mock_response(HttpMethod::Get, "/products", 200, json!([product_json(5, "Lamp")]));
        f.catalog.refresh().await;

        let deleted = f.catalog.delete_product(5).await.unwrap();

        assert!(!deleted);
        assert_eq!(f.http.sent_count(HttpMethod::Delete, "/products/5"), 0);
        assert_eq!(f.catalog.products().get_untracked().len(), 1);
        assert_eq!(*f.dialogs.prompts.borrow(), vec![CONFIRM_DELETE]);
    }

    #[tokio::test]
    async fn test_delete_confirmed_refreshes_catalog() {
        let f = setup(ScriptedDialogs::accepting());
        f.http.mock_empty(HttpMethod::Delete, "/products/5", 200);
        f.http.mock_response(HttpMethod::Get, "/products", 200, json!([]));

        let deleted = f.catalog.delete_product(5).await.unwrap();

        assert!(deleted);
        assert_eq!(
            f.http.sent(),
            vec![
                (HttpMethod::Delete, "/products/5".to_string()),
                (HttpMethod::Get, "/products".to_string()),
            ]
        );
        assert_eq!(f.dialogs.acknowledged(), vec![PRODUCT_DELETED]);
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces_error() {
        let f = setup(ScriptedDialogs::accepting());
        f.http.mock_empty(HttpMethod::Delete, "/products/5", 403);

        let result = f.catalog.delete_product(5).await;

        assert_eq!(result, Err(ApiError::Forbidden));
        assert_eq!(f.http.sent_count(HttpMethod::Get, "/products"), 0);
        assert_eq!(f.banner.get_untracked(), Some(ApiError::Forbidden));
    }
}
