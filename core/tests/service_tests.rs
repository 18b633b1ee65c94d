// tests/service_tests.rs
mod common;

use common::*;
use serde_json::json;
use storefront::http::{Credential, Method};
use storefront::models::{
  ActivityStatus, AffiliateStatus, BankInfo, BankTransferInfo, PayoutRequest, ProductQuery, ProductSort,
  RegisterAffiliateRequest, SubscriptionDurationInput, SubscriptionTypeInput,
};
use storefront::ApiError;

fn duration_json(id: &str) -> serde_json::Value {
  json!({ "_id": id, "productId": "p1", "subscriptionTypeId": "t1", "duration": "1 month", "days": 30, "price": 90000 })
}

#[tokio::test]
async fn test_product_endpoints() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  transport.respond("GET /products", 200, json!([]));
  transport.respond("GET /products/by-slug/netflix-premium", 200, json!({ "_id": "p1", "name": "Netflix Premium" }));
  let storefront = storefront_with(&transport);

  let query = ProductQuery {
    search: Some("netflix".to_string()),
    sort: Some(ProductSort::BestSelling),
    page: Some(2),
    ..ProductQuery::default()
  };
  storefront.products().list(&query).await.unwrap();
  assert_eq!(
    transport.last_request().unwrap().query,
    vec![
      ("search".to_string(), "netflix".to_string()),
      ("sort".to_string(), "best_selling".to_string()),
      ("page".to_string(), "2".to_string()),
    ]
  );

  let product = storefront.products().by_slug("netflix-premium").await.unwrap();
  assert_eq!(product.name, "Netflix Premium");
}

#[tokio::test]
async fn test_subscription_type_crud_uses_admin_credential() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  let type_json = json!({ "_id": "t1", "productId": "p1", "typeName": "family", "displayName": "Family" });
  transport.respond("POST /subscription-types", 201, type_json.clone());
  transport.respond("PUT /subscription-types/t1", 200, type_json);
  transport.respond_raw("DELETE /subscription-types/t1", 204, "");
  let storefront = signed_in_storefront(&transport, "t");
  let input = SubscriptionTypeInput {
    product_id: "p1".to_string(),
    type_name: "family".to_string(),
    display_name: "Family".to_string(),
    status: ActivityStatus::Active,
    description: None,
  };

  let created = storefront.subscription_types().create(&input).await.unwrap();
  assert_eq!(created.status, ActivityStatus::Active);
  storefront.subscription_types().update("t1", &input).await.unwrap();
  storefront.subscription_types().delete("t1").await.unwrap();

  let requests = transport.requests();
  assert_eq!(requests.len(), 3);
  assert!(requests.iter().all(|r| r.credential == Credential::Admin));
  assert_eq!(requests[2].method, Method::Delete);
}

#[tokio::test]
async fn test_subscription_inputs_are_validated_first() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  let storefront = signed_in_storefront(&transport, "t");

  let missing_name = SubscriptionTypeInput {
    product_id: "p1".to_string(),
    ..SubscriptionTypeInput::default()
  };
  let err = storefront.subscription_types().create(&missing_name).await.unwrap_err();
  assert!(matches!(err, ApiError::InvalidInput(_)));

  let zero_days = SubscriptionDurationInput {
    product_id: "p1".to_string(),
    subscription_type_id: "t1".to_string(),
    label: "Trial".to_string(),
    days: 0,
    price: 0.0,
  };
  let err = storefront.subscription_durations().create(&zero_days).await.unwrap_err();
  assert!(matches!(err, ApiError::InvalidInput(_)));
  assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_duration_listing_filters_and_label_alias() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  transport.respond("GET /subscription-durations", 200, json!([duration_json("d1")]));
  let storefront = storefront_with(&transport);

  let durations = storefront.subscription_durations().list(Some("p1"), Some("t1")).await.unwrap();
  assert_eq!(durations[0].label, "1 month");
  assert_eq!(durations[0].days, 30);
  assert_eq!(
    transport.last_request().unwrap().query,
    vec![
      ("productId".to_string(), "p1".to_string()),
      ("subscriptionTypeId".to_string(), "t1".to_string()),
    ]
  );
}

#[tokio::test]
async fn test_duplicate_duration_maps_to_conflict() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  transport.respond("POST /subscription-durations", 409, json!({ "message": "duplicate" }));
  let storefront = signed_in_storefront(&transport, "t");
  let input = SubscriptionDurationInput {
    product_id: "p1".to_string(),
    subscription_type_id: "t1".to_string(),
    label: "1 month".to_string(),
    days: 30,
    price: 90000.0,
  };

  let err = storefront.subscription_durations().create(&input).await.unwrap_err();
  assert!(matches!(err, ApiError::Conflict));
}

#[tokio::test]
async fn test_bank_transfer_submission() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  transport.respond("PATCH /payments/pay1/bank-transfer", 200, payment_json("pay1", "o1", "PROCESSING"));
  let storefront = signed_in_storefront(&transport, "t");
  let info = BankTransferInfo {
    bank_name: "VCB".to_string(),
    account_number: "0123456789".to_string(),
    account_name: "NGUYEN LAN".to_string(),
    transfer_content: Some("ORDER o1".to_string()),
    ..BankTransferInfo::default()
  };

  let payment = storefront.payments().submit_bank_transfer("pay1", &info).await.unwrap();
  assert_eq!(payment.status.as_str(), "PROCESSING");
  let body = transport.last_request().unwrap().body.unwrap();
  assert_eq!(body["accountNumber"], json!("0123456789"));
}

#[tokio::test]
async fn test_affiliate_customer_endpoints() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  transport.respond("POST /affiliates/register", 201, profile_json("PENDING"));
  transport.respond("POST /affiliates/payout", 200, json!({ "message": "ok" }));
  let storefront = signed_in_storefront(&transport, "t");
  let bank = BankInfo {
    bank_name: "VCB".to_string(),
    account_number: "0123456789".to_string(),
    account_holder: "NGUYEN LAN".to_string(),
    branch: None,
  };

  let profile = storefront
    .affiliates()
    .register(&RegisterAffiliateRequest {
      bank_info: bank.clone(),
      note: None,
    })
    .await
    .unwrap();
  assert_eq!(profile.status, AffiliateStatus::Pending);

  let err = storefront
    .affiliates()
    .request_payout(&PayoutRequest {
      amount: 0.0,
      bank_info: None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, ApiError::InvalidInput(_)));

  storefront
    .affiliates()
    .request_payout(&PayoutRequest {
      amount: 100000.0,
      bank_info: Some(bank),
    })
    .await
    .unwrap();
  assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_affiliate_admin_endpoints() {
  setup_tracing();
  let transport = ScriptedTransport::new();
  transport.respond(
    "GET /affiliates/admin/list",
    200,
    json!([{ "_id": "a1", "affiliateCode": "AFF123", "status": "ACTIVE" }]),
  );
  transport.respond("GET /affiliates/admin/detail/a1", 200, profile_json("ACTIVE"));
  transport.respond(
    "GET /affiliates/admin/a1/commissions",
    200,
    json!([{ "_id": "c1", "orderId": "o1", "amount": 18000, "status": "PENDING" }]),
  );
  transport.respond("GET /affiliates/admin/a1/links", 200, json!([link_json("l1", "AFF-NF", "ACTIVE", None)]));
  transport.respond("PATCH /affiliates/admin/a1/status", 200, profile_json("SUSPENDED"));
  let storefront = signed_in_storefront(&transport, "t");
  let affiliates = storefront.affiliates();

  assert_eq!(affiliates.admin_list().await.unwrap()[0].affiliate_code, "AFF123");
  assert_eq!(affiliates.admin_detail("a1").await.unwrap().affiliate_code, "AFF123");
  assert_eq!(affiliates.admin_commissions("a1").await.unwrap().len(), 1);
  assert_eq!(affiliates.admin_links("a1").await.unwrap()[0].code, "AFF-NF");
  let updated = affiliates.admin_set_status("a1", AffiliateStatus::Suspended).await.unwrap();
  assert_eq!(updated.status, AffiliateStatus::Suspended);

  let last = transport.last_request().unwrap();
  assert_eq!(last.body, Some(json!({ "status": "SUSPENDED" })));
  assert!(transport.requests().iter().all(|r| r.credential == Credential::Admin));
}
