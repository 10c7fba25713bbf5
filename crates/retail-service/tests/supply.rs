mod common;

use common::Fixture;
use retail_core::WarehouseId;
use retail_service::ErrorCode;

#[tokio::test]
async fn test_manager_restocks_own_store() {
    let fx = Fixture::new().await;
    let mia = fx.login("mia").await;
    fx.stock(fx.near, 2, "Widget").await;

    let request = fx
        .service
        .supply()
        .place_supply_request(&mia, fx.near, "Widget", 10, fx.warehouse)
        .await
        .unwrap();
    assert_eq!(request.manager_id, fx.mia);
    assert_eq!(request.warehouse_id, fx.warehouse);
    assert_eq!(request.units_requested, 10);

    assert_eq!(fx.units(fx.near, "Widget").await, 12);
    assert_eq!(fx.count("supply_requests").await, 1);

    let listed = fx
        .service
        .supply()
        .requests_for_store(&mia, fx.near)
        .await
        .unwrap();
    assert_eq!(listed, vec![request]);
}

#[tokio::test]
async fn test_only_the_stores_manager_may_request() {
    let fx = Fixture::new().await;
    fx.stock(fx.near, 2, "Widget").await;

    for who in ["max", "root", "cal"] {
        let ctx = fx.login(who).await;
        let err = fx
            .service
            .supply()
            .place_supply_request(&ctx, fx.near, "Widget", 10, fx.warehouse)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotAuthorized, "{who}");
    }

    assert_eq!(fx.units(fx.near, "Widget").await, 2);
    assert_eq!(fx.count("supply_requests").await, 0);
}

#[tokio::test]
async fn test_rejected_requests_change_nothing() {
    let fx = Fixture::new().await;
    let mia = fx.login("mia").await;
    fx.stock(fx.near, 2, "Widget").await;
    let supply = fx.service.supply();

    let err = supply
        .place_supply_request(&mia, fx.near, "Widget", 5, WarehouseId::new(404))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    let err = supply
        .place_supply_request(&mia, fx.near, "Gadget", 5, fx.warehouse)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    let err = supply
        .place_supply_request(&mia, fx.near, "Widget", 0, fx.warehouse)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);

    assert_eq!(fx.units(fx.near, "Widget").await, 2);
    assert_eq!(fx.count("supply_requests").await, 0);
}

#[tokio::test]
async fn test_authorization_is_checked_before_input() {
    let fx = Fixture::new().await;
    fx.stock(fx.near, 2, "Widget").await;

    for (who, units) in [("cal", 0), ("max", -4), ("root", i64::MAX)] {
        let ctx = fx.login(who).await;
        let err = fx
            .service
            .supply()
            .place_supply_request(&ctx, fx.near, "Widget", units, fx.warehouse)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotAuthorized, "{who} {units}");
    }

    assert_eq!(fx.count("supply_requests").await, 0);
}

#[tokio::test]
async fn test_oversized_restock_leaves_stock_readable() {
    let fx = Fixture::new().await;
    let mia = fx.login("mia").await;
    fx.stock(fx.near, 2, "Widget").await;
    fx.stock(fx.near, i64::MAX - 5, "Bolt").await;
    let supply = fx.service.supply();

    let err = supply
        .place_supply_request(&mia, fx.near, "Widget", i64::MAX, fx.warehouse)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);

    // Within the per-request cap but past what the column holds
    let err = supply
        .place_supply_request(&mia, fx.near, "Bolt", 10, fx.warehouse)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert!(err.is_recoverable());

    let products = fx.service.catalog().list_products(fx.near).await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(fx.units(fx.near, "Bolt").await, i64::MAX - 5);
    assert_eq!(fx.units(fx.near, "Widget").await, 2);
    assert_eq!(fx.count("supply_requests").await, 0);
}

#[tokio::test]
async fn test_product_name_is_trimmed() {
    let fx = Fixture::new().await;
    let mia = fx.login("mia").await;
    fx.stock(fx.near, 2, "Widget").await;

    let request = fx
        .service
        .supply()
        .place_supply_request(&mia, fx.near, "  Widget ", 3, fx.warehouse)
        .await
        .unwrap();
    assert_eq!(request.product_name, "Widget");
    assert_eq!(fx.units(fx.near, "Widget").await, 5);
}
